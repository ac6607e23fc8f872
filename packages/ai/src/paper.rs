// ABOUTME: Fallback credit paper template
// ABOUTME: Renders a six-section draft from extracted fields when no generated paper exists

use lendflow_core::constants::MILLION;
use lendflow_core::content_preview;

/// Render a credit paper draft for a deal built from local extraction.
///
/// The draft always ends with a preview of the submitted text and a notice
/// that it needs manual review.
pub fn generate_mock_credit_paper(
    client_name: &str,
    amount: f64,
    loan_type: &str,
    content: &str,
) -> String {
    let millions = amount / MILLION;

    format!(
        r#"# Credit Paper: {client_name}

## 1. Transaction Summary
- **Borrower:** {client_name}
- **Facility:** {loan_type}
- **Amount Requested:** £{millions:.1}M
- **Proposed Term:** 12 months

## 2. Customer Profile
{client_name} has approached the lender for {loan_type_lower} funding. Corporate structure, ownership and track record are to be confirmed during due diligence.

## 3. Security Overview
- First legal charge over the subject property (to be confirmed)
- Valuation to be instructed from a panel valuer
- Personal guarantees to be assessed

## 4. Risk Assessment
- **Credit risk:** Medium, pending financial statements
- **Exit risk:** Medium, exit strategy to be evidenced
- **Market risk:** To be assessed against the local comparables

## 5. Recommendation
Proceed to initial review. Approval of a £{millions:.1}M {loan_type_lower} is subject to satisfactory due diligence.

## Source Submission
{preview}

---
*This credit paper was generated from a fallback template because the AI generation service was unavailable. All figures require manual review before any credit decision.*
"#,
        client_name = client_name,
        loan_type = loan_type,
        loan_type_lower = loan_type.to_lowercase(),
        millions = millions,
        preview = content_preview(content),
    )
}
