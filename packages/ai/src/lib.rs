// ABOUTME: AI deal generation for Lendflow
// ABOUTME: Generation endpoint client with local extraction and credit paper fallbacks

pub mod extract;
pub mod paper;
pub mod service;

pub use extract::{
    extract_amount, extract_amount_detailed, extract_client_name, extract_loan_type, AmountBasis,
    ExtractedAmount,
};
pub use paper::generate_mock_credit_paper;
pub use service::{synthesize_deal, AIServiceError, AIServiceResult, GenerationClient};
