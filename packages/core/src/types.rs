// ABOUTME: Deal data model shared across Lendflow packages
// ABOUTME: Generated deals, external record schema, UI-facing deal view and list shapes

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_EXIT_PROBABILITY, DEFAULT_LTV_RATIO, DEFAULT_MARKET_SCORE, DEFAULT_NEXT_STEP,
    DEFAULT_RISK_RATING, DEFAULT_STATUS,
};
use crate::utils::non_blank;

/// Display-ready analysis produced alongside a generated deal
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiInsights {
    #[serde(default)]
    pub ltv_ratio: String,
    #[serde(default)]
    pub exit_probability: String,
    #[serde(default)]
    pub market_score: String,
    #[serde(default)]
    pub risk_rating: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedFlag {
    pub title: String,
    pub recommendation: String,
}

/// Structured deal proposal, either returned by the generation endpoint or
/// synthesized locally from the submitted text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedDeal {
    pub client_name: String,
    pub amount: f64,
    #[serde(rename = "type", default)]
    pub loan_type: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub next_step: String,
    #[serde(default)]
    pub short_summary: String,
    #[serde(default)]
    pub credit_paper_draft: String,
    #[serde(default)]
    pub ai_insights: AiInsights,
    #[serde(default)]
    pub ai_red_flags: Vec<RedFlag>,
    #[serde(default)]
    pub connected_data_sources: Vec<String>,
}

/// Create-request body in the external lending API's schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExternalDealInput {
    pub amount: f64,
    #[serde(rename = "Type")]
    pub loan_type: String,
    pub next_steps: String,
    pub status: String,
    pub client_name: String,
    pub credit_paper_draft: String,
    pub ltv_ratio: String,
    pub exit_probability: String,
    pub market_score: String,
    pub risk_rating: String,
    /// JSON-encoded `Vec<RedFlag>`
    pub ai_red_flags: String,
    /// JSON-encoded `Vec<String>`
    pub connected_data_sources: String,
    pub short_summary: String,
}

fn or_default(value: &str, default: &str) -> String {
    non_blank(Some(value)).unwrap_or(default).to_string()
}

impl From<&GeneratedDeal> for ExternalDealInput {
    fn from(deal: &GeneratedDeal) -> Self {
        let insights = &deal.ai_insights;
        Self {
            amount: deal.amount,
            loan_type: deal.loan_type.clone(),
            next_steps: or_default(&deal.next_step, DEFAULT_NEXT_STEP),
            status: or_default(&deal.status, DEFAULT_STATUS),
            client_name: deal.client_name.clone(),
            credit_paper_draft: deal.credit_paper_draft.clone(),
            ltv_ratio: or_default(&insights.ltv_ratio, DEFAULT_LTV_RATIO),
            exit_probability: or_default(&insights.exit_probability, DEFAULT_EXIT_PROBABILITY),
            market_score: or_default(&insights.market_score, DEFAULT_MARKET_SCORE),
            risk_rating: or_default(&insights.risk_rating, DEFAULT_RISK_RATING),
            ai_red_flags: serde_json::to_string(&deal.ai_red_flags)
                .unwrap_or_else(|_| "[]".to_string()),
            connected_data_sources: serde_json::to_string(&deal.connected_data_sources)
                .unwrap_or_else(|_| "[]".to_string()),
            short_summary: deal.short_summary.clone(),
        }
    }
}

/// A deal as acknowledged by the external system of record.
///
/// Every field is optional on the wire; the view layer decides what to fall
/// back to when one is missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PersistedDealRecord {
    pub id: Option<i64>,
    pub client_name: Option<String>,
    pub amount: Option<f64>,
    #[serde(rename = "Type")]
    pub loan_type: Option<String>,
    pub next_steps: Option<String>,
    pub status: Option<String>,
    pub credit_paper_draft: Option<String>,
    pub ltv_ratio: Option<String>,
    pub exit_probability: Option<String>,
    pub market_score: Option<String>,
    pub risk_rating: Option<String>,
    pub ai_red_flags: Option<String>,
    pub connected_data_sources: Option<String>,
    pub short_summary: Option<String>,
    pub date_created: Option<String>,
    pub date_updated: Option<String>,
}

impl PersistedDealRecord {
    /// Build a locally fabricated record carrying every mapped input field
    pub fn fabricated(input: &ExternalDealInput, id: i64, timestamp: String) -> Self {
        Self {
            id: Some(id),
            client_name: Some(input.client_name.clone()),
            amount: Some(input.amount),
            loan_type: Some(input.loan_type.clone()),
            next_steps: Some(input.next_steps.clone()),
            status: Some(input.status.clone()),
            credit_paper_draft: Some(input.credit_paper_draft.clone()),
            ltv_ratio: Some(input.ltv_ratio.clone()),
            exit_probability: Some(input.exit_probability.clone()),
            market_score: Some(input.market_score.clone()),
            risk_rating: Some(input.risk_rating.clone()),
            ai_red_flags: Some(input.ai_red_flags.clone()),
            connected_data_sources: Some(input.connected_data_sources.clone()),
            short_summary: Some(input.short_summary.clone()),
            date_created: Some(timestamp.clone()),
            date_updated: Some(timestamp),
        }
    }
}

/// UI-facing deal shape.
///
/// `progress` is derived from `status` when the view is built and is only
/// readable from outside this crate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    pub id: String,
    pub name: String,
    pub amount: String,
    pub raw_amount: f64,
    pub stage: String,
    pub(crate) progress: u8,
    #[serde(rename = "type")]
    pub loan_type: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_insights: Option<AiInsights>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_red_flags: Option<Vec<RedFlag>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_paper_draft: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connected_data_sources: Option<Vec<String>>,
}

impl Deal {
    pub fn progress(&self) -> u8 {
        self.progress
    }
}

/// One page of records as returned by the external list endpoint
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalDealPage {
    #[serde(default)]
    pub data: Vec<PersistedDealRecord>,
    #[serde(default)]
    pub total: u64,
    #[serde(default = "default_page")]
    pub current_page: u32,
    #[serde(default = "default_page")]
    pub total_pages: u32,
    #[serde(default)]
    pub start: bool,
    #[serde(default)]
    pub end: bool,
}

fn default_page() -> u32 {
    1
}

/// List response sent to the dashboard
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DealsPage {
    pub deals: Vec<Deal>,
    pub total: u64,
    pub current_page: u32,
    pub total_pages: u32,
    pub start: bool,
    pub end: bool,
}

/// Partial update accepted from the dashboard
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealUpdate {
    pub name: Option<String>,
    pub amount: Option<f64>,
    pub stage: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub loan_type: Option<String>,
}

impl DealUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.amount.is_none()
            && self.stage.is_none()
            && self.status.is_none()
            && self.loan_type.is_none()
    }
}

/// [`DealUpdate`] in the external API's field names
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExternalDealUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_steps: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "Type", skip_serializing_if = "Option::is_none")]
    pub loan_type: Option<String>,
}

impl From<DealUpdate> for ExternalDealUpdate {
    fn from(update: DealUpdate) -> Self {
        Self {
            client_name: update.name,
            amount: update.amount,
            next_steps: update.stage,
            status: update.status,
            loan_type: update.loan_type,
        }
    }
}
