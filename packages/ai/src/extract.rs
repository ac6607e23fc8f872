// ABOUTME: Heuristic field extraction from free-text deal submissions
// ABOUTME: Pulls client name, requested amount and loan type when the generation endpoint is unavailable

use std::sync::LazyLock;

use lendflow_core::constants::MILLION;
use regex::Regex;
use tracing::warn;

const WORD: &str = r"[A-Z][\w&'.-]*";
const LEGAL_SUFFIX: &str = r"(?:Corporation|Corp|Limited|Ltd|Inc|PLC|plc)";
const LABEL: &str = r"(?i:borrower|client|company)[ \t]*:[ \t]*";
const NUMBER: &str = r"(\d{1,3}(?:,\d{3})+(?:\.\d+)?|\d+(?:\.\d+)?)";
const MILLION_UNIT: &str = r"[ \t]*(?i:million|mn|m)\b";
const AMOUNT_LABEL: &str = r"(?i:loan amount|amount requested|facility)[^\d£$\n]{0,20}[£$]?[ \t]*";

/// Largest amount accepted from free text; anything above is treated as noise
const MAX_AMOUNT: f64 = 1e15;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("extraction pattern must compile")
}

static CLIENT_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    let phrase_with_suffix = format!(r"({w}(?:[ \t]+{w})*?[ \t]+{s})\b", w = WORD, s = LEGAL_SUFFIX);
    [
        compile(&format!("{}{}", LABEL, phrase_with_suffix)),
        compile(&format!(r"\b{}", phrase_with_suffix)),
        compile(&format!(r"{}({w}(?:[ \t]+{w})*)", LABEL, w = WORD)),
    ]
});

/// Amount patterns in priority order, paired with whether they carry a unit token
static AMOUNT_PATTERNS: LazyLock<[(Regex, bool); 4]> = LazyLock::new(|| {
    [
        (compile(&format!("{}{}{}", AMOUNT_LABEL, NUMBER, MILLION_UNIT)), true),
        (compile(&format!("£[ \t]*{}{}", NUMBER, MILLION_UNIT)), true),
        (compile(&format!(r"\$[ \t]*{}{}", NUMBER, MILLION_UNIT)), true),
        (compile(&format!("{}{}", AMOUNT_LABEL, NUMBER)), false),
    ]
});

/// Recognised loan products, in match priority order
const LOAN_TYPES: &[&str] = &[
    "bridging loan",
    "bridge loan",
    "development loan",
    "development finance",
    "commercial mortgage",
    "btl portfolio",
    "buy-to-let",
    "refurbishment loan",
    "acquisition loan",
];

/// How an extracted amount was scaled to whole currency units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountBasis {
    /// A million-unit token followed the number
    MillionsStated,
    /// The bare number was already above one million
    Absolute,
    /// No unit was present and the number was small, so millions were assumed
    AssumedMillions,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractedAmount {
    pub value: f64,
    pub basis: AmountBasis,
}

/// Find the borrowing entity's name
pub fn extract_client_name(content: &str) -> Option<String> {
    CLIENT_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures(content)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|name| !name.is_empty())
    })
}

/// Find the requested amount in whole currency units
pub fn extract_amount(content: &str) -> Option<f64> {
    extract_amount_detailed(content).map(|amount| amount.value)
}

/// Like [`extract_amount`], but also reports how the unit was decided
pub fn extract_amount_detailed(content: &str) -> Option<ExtractedAmount> {
    for (pattern, has_unit) in AMOUNT_PATTERNS.iter() {
        let Some(raw) = pattern
            .captures(content)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().replace(',', ""))
        else {
            continue;
        };

        let Ok(number) = raw.parse::<f64>() else {
            continue;
        };

        let (value, basis) = if *has_unit {
            (number * MILLION, AmountBasis::MillionsStated)
        } else if number > MILLION {
            (number, AmountBasis::Absolute)
        } else {
            warn!(
                "Amount {} has no unit; assuming millions. Verify before approval",
                raw
            );
            (number * MILLION, AmountBasis::AssumedMillions)
        };

        if !value.is_finite() || value > MAX_AMOUNT {
            warn!("Ignoring implausible amount {} in submission", raw);
            continue;
        }

        return Some(ExtractedAmount {
            value: value.round(),
            basis,
        });
    }
    None
}

/// Find the loan product, rendered in title case
pub fn extract_loan_type(content: &str) -> Option<String> {
    let lowered = content.to_lowercase();
    LOAN_TYPES
        .iter()
        .find(|loan_type| lowered.contains(*loan_type))
        .map(|loan_type| title_case(loan_type))
}

/// Capitalize the first letter of every alphanumeric run
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_run_start = true;
    for c in text.chars() {
        if c.is_alphanumeric() {
            if at_run_start {
                out.extend(c.to_uppercase());
            } else {
                out.push(c);
            }
            at_run_start = false;
        } else {
            out.push(c);
            at_run_start = true;
        }
    }
    out
}
