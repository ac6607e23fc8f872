// ABOUTME: Response transformer shaping external deal records into the UI Deal view
// ABOUTME: Resolves field fallbacks, formats currency, derives progress from status

use crate::constants::{CURRENCY_SYMBOL, MILLION};
use crate::progress::progress_for_status;
use crate::types::{AiInsights, Deal, GeneratedDeal, PersistedDealRecord, RedFlag};
use crate::utils::{non_blank, now_rfc3339, timestamp_id};

/// Format a raw amount as millions with one decimal place, e.g. `£1.8M`
pub fn format_amount_millions(raw_amount: f64) -> String {
    let millions = (raw_amount / MILLION * 10.0).round() / 10.0;
    format!("{}{:.1}M", CURRENCY_SYMBOL, millions)
}

fn pick(primary: Option<&str>, fallback: &str) -> String {
    non_blank(primary).unwrap_or(fallback).to_string()
}

/// Field values used when the persisted record leaves something out
struct Fallbacks<'a> {
    name: &'a str,
    stage: &'a str,
    loan_type: &'a str,
    status: &'a str,
    amount: f64,
}

fn base_view(record: &PersistedDealRecord, fallbacks: Fallbacks<'_>) -> Deal {
    let id = record
        .id
        .map(|id| id.to_string())
        .unwrap_or_else(timestamp_id);
    let raw_amount = record.amount.unwrap_or(fallbacks.amount);
    let status = pick(record.status.as_deref(), fallbacks.status);
    let created = non_blank(record.date_created.as_deref());
    let updated = non_blank(record.date_updated.as_deref());
    let (created_at, updated_at) = match (created, updated) {
        (None, None) => {
            let now = now_rfc3339();
            (now.clone(), now)
        }
        (created, updated) => (
            created.or(updated).unwrap_or_default().to_string(),
            updated.or(created).unwrap_or_default().to_string(),
        ),
    };

    Deal {
        id,
        name: pick(record.client_name.as_deref(), fallbacks.name),
        amount: format_amount_millions(raw_amount),
        raw_amount,
        stage: pick(record.next_steps.as_deref(), fallbacks.stage),
        progress: progress_for_status(Some(&status)),
        loan_type: pick(record.loan_type.as_deref(), fallbacks.loan_type),
        status,
        created_at,
        updated_at,
        ai_insights: None,
        ai_red_flags: None,
        credit_paper_draft: None,
        short_summary: None,
        connected_data_sources: None,
    }
}

/// Shape a persisted record plus the deal it was generated from into the UI view.
///
/// Enrichment always comes from the generated deal, since the record only
/// holds it as flattened strings. A fresh timestamp id is minted when the
/// record has none.
pub fn to_deal_view(record: &PersistedDealRecord, generated: &GeneratedDeal) -> Deal {
    let mut deal = base_view(
        record,
        Fallbacks {
            name: &generated.client_name,
            stage: &generated.next_step,
            loan_type: &generated.loan_type,
            status: &generated.status,
            amount: generated.amount,
        },
    );

    deal.ai_insights = Some(generated.ai_insights.clone());
    deal.ai_red_flags = Some(generated.ai_red_flags.clone());
    deal.credit_paper_draft = Some(generated.credit_paper_draft.clone());
    deal.short_summary = Some(generated.short_summary.clone());
    deal.connected_data_sources = Some(generated.connected_data_sources.clone());
    deal
}

/// Shape a record read back from the lending API (list/detail/update paths).
///
/// Enrichment is decoded from the record's own fields; JSON strings that do
/// not decode are dropped.
pub fn record_to_deal_view(record: &PersistedDealRecord) -> Deal {
    let mut deal = base_view(
        record,
        Fallbacks {
            name: "",
            stage: "",
            loan_type: "",
            status: "",
            amount: 0.0,
        },
    );

    let insight_fields = [
        &record.ltv_ratio,
        &record.exit_probability,
        &record.market_score,
        &record.risk_rating,
    ];
    if insight_fields.iter().any(|f| f.is_some()) {
        deal.ai_insights = Some(AiInsights {
            ltv_ratio: record.ltv_ratio.clone().unwrap_or_default(),
            exit_probability: record.exit_probability.clone().unwrap_or_default(),
            market_score: record.market_score.clone().unwrap_or_default(),
            risk_rating: record.risk_rating.clone().unwrap_or_default(),
        });
    }

    deal.ai_red_flags = record
        .ai_red_flags
        .as_deref()
        .and_then(|raw| serde_json::from_str::<Vec<RedFlag>>(raw).ok());
    deal.connected_data_sources = record
        .connected_data_sources
        .as_deref()
        .and_then(|raw| serde_json::from_str::<Vec<String>>(raw).ok());
    deal.credit_paper_draft = record.credit_paper_draft.clone();
    deal.short_summary = record.short_summary.clone();
    deal
}
