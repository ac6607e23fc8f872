// ABOUTME: Client for the AI deal generation endpoint
// ABOUTME: Posts raw submissions for structuring and synthesizes a deal locally when the call fails

use std::time::Duration;

use async_trait::async_trait;
use lendflow_config::{Config, GenerationEndpoint};
use lendflow_core::constants::{DEFAULT_NEXT_STEP, DEFAULT_STATUS, MILLION};
use lendflow_core::{AiInsights, DealGenerator, FallbackReason, GeneratedDeal, RedFlag, Sourced};
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::extract::{extract_amount, extract_client_name, extract_loan_type};
use crate::paper::generate_mock_credit_paper;

const CONNECT_TIMEOUT_SECS: u64 = 10;

// Values used when extraction finds nothing
pub const FALLBACK_CLIENT_NAME: &str = "Generated Client";
pub const FALLBACK_AMOUNT: f64 = 25_000_000.0;
pub const FALLBACK_LOAN_TYPE: &str = "Bridging Loan";

pub const MOCK_RED_FLAG_TITLE: &str = "Mock Data Generated";
pub const FALLBACK_DATA_SOURCES: [&str; 2] = ["Local Text Extraction", "Fallback Credit Paper Template"];

#[derive(Debug, Error)]
pub enum AIServiceError {
    #[error("Generation endpoint not configured")]
    NotConfigured,

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("API returned {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

impl AIServiceError {
    /// The fallback reason recorded when this error triggers synthesis
    pub fn fallback_reason(&self) -> FallbackReason {
        match self {
            AIServiceError::NotConfigured => FallbackReason::NotConfigured,
            AIServiceError::Timeout(_) => FallbackReason::Timeout,
            AIServiceError::Connection(msg) => FallbackReason::Unreachable(msg.clone()),
            AIServiceError::RequestFailed(e) => FallbackReason::Unreachable(e.to_string()),
            AIServiceError::ApiError { status, .. } => FallbackReason::UpstreamStatus(*status),
            AIServiceError::ParseError(msg) => FallbackReason::MalformedResponse(msg.clone()),
        }
    }
}

pub type AIServiceResult<T> = Result<T, AIServiceError>;

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    content: &'a str,
}

/// Client for the deal generation webhook
#[derive(Debug, Clone)]
pub struct GenerationClient {
    client: Client,
    endpoint: Option<GenerationEndpoint>,
}

impl GenerationClient {
    /// Create HTTP client with timeout configuration
    fn create_client(timeout: Duration) -> AIServiceResult<Client> {
        Ok(Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS).min(timeout))
            .build()?)
    }

    /// Creates a client for the given endpoint. With `None` every call
    /// synthesizes locally.
    pub fn new(endpoint: Option<GenerationEndpoint>, default_timeout: Duration) -> AIServiceResult<Self> {
        let timeout = endpoint
            .as_ref()
            .map(|e| e.endpoint.timeout)
            .unwrap_or(default_timeout);

        match &endpoint {
            Some(e) => info!("Generation endpoint configured: {} (timeout {:?})", e.endpoint.url, timeout),
            None => info!("Generation endpoint not configured - deals will be synthesized locally"),
        }

        Ok(Self {
            client: Self::create_client(timeout)?,
            endpoint,
        })
    }

    pub fn from_config(config: &Config) -> AIServiceResult<Self> {
        Self::new(config.generation.clone(), config.generation_timeout)
    }

    pub fn is_configured(&self) -> bool {
        self.endpoint.is_some()
    }

    /// Ask the generation endpoint to structure the submission
    pub async fn request_deal(&self, content: &str) -> AIServiceResult<GeneratedDeal> {
        let endpoint = self.endpoint.as_ref().ok_or(AIServiceError::NotConfigured)?;
        let timeout = endpoint.endpoint.timeout;

        info!(
            "Making generation request: url={}, content_chars={}, timeout={:?}",
            endpoint.endpoint.url,
            content.chars().count(),
            timeout
        );

        let mut request = self
            .client
            .post(&endpoint.endpoint.url)
            .json(&GenerationRequest { content });
        if let Some(secret) = &endpoint.secret {
            request = request.bearer_auth(secret);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                error!("Generation request timed out after {:?}", timeout);
                AIServiceError::Timeout(timeout)
            } else if e.is_connect() {
                error!("Failed to connect to generation endpoint: {}", e);
                AIServiceError::Connection(e.to_string())
            } else {
                error!("Generation request failed: {}", e);
                AIServiceError::RequestFailed(e)
            }
        })?;

        let status = response.status();
        info!("Received response from generation endpoint: status={}", status);

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("Generation endpoint error: {} - {}", status, error_text);
            return Err(AIServiceError::ApiError {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                AIServiceError::Timeout(timeout)
            } else {
                AIServiceError::RequestFailed(e)
            }
        })?;

        serde_json::from_str::<GeneratedDeal>(&body).map_err(|e| {
            error!(
                "Generation response parsing failed: {}. Body snippet: {}",
                e,
                lendflow_core::truncate_chars(&body, 200)
            );
            AIServiceError::ParseError(e.to_string())
        })
    }
}

#[async_trait]
impl DealGenerator for GenerationClient {
    async fn generate(&self, content: &str) -> Sourced<GeneratedDeal> {
        match self.request_deal(content).await {
            Ok(deal) => {
                info!("Deal generated upstream for client {}", deal.client_name);
                Sourced::Upstream(deal)
            }
            Err(e) => {
                let reason = e.fallback_reason();
                warn!("Generation unavailable ({}); synthesizing deal from local extraction", reason);
                Sourced::synthesized(synthesize_deal(content), reason)
            }
        }
    }
}

/// Build a complete deal from the submission text alone
pub fn synthesize_deal(content: &str) -> GeneratedDeal {
    let client_name =
        extract_client_name(content).unwrap_or_else(|| FALLBACK_CLIENT_NAME.to_string());
    let amount = extract_amount(content).unwrap_or(FALLBACK_AMOUNT);
    let loan_type = extract_loan_type(content).unwrap_or_else(|| FALLBACK_LOAN_TYPE.to_string());

    let short_summary = format!(
        "• Borrower: {}\n• Facility: {} of £{:.1}M\n• Status: {} pending manual verification\n• Generated from local text extraction",
        client_name,
        loan_type,
        amount / MILLION,
        DEFAULT_STATUS
    );
    let credit_paper_draft = generate_mock_credit_paper(&client_name, amount, &loan_type, content);

    GeneratedDeal {
        client_name,
        amount,
        loan_type,
        status: DEFAULT_STATUS.to_string(),
        next_step: DEFAULT_NEXT_STEP.to_string(),
        short_summary,
        credit_paper_draft,
        ai_insights: AiInsights {
            ltv_ratio: "70%".to_string(),
            exit_probability: "Medium".to_string(),
            market_score: "7/10".to_string(),
            risk_rating: "Medium".to_string(),
        },
        ai_red_flags: vec![RedFlag {
            title: MOCK_RED_FLAG_TITLE.to_string(),
            recommendation: "AI generation was unavailable. Verify the borrower, amount and loan type against the source documents before proceeding.".to_string(),
        }],
        connected_data_sources: FALLBACK_DATA_SOURCES.iter().map(|s| s.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_synthesize_uses_extracted_fields() {
        let deal = synthesize_deal(
            "Borrower: Oakwood Development Ltd requests a £2.5 million bridging loan for acquisition.",
        );

        assert_eq!(deal.client_name, "Oakwood Development Ltd");
        assert_eq!(deal.amount, 2_500_000.0);
        assert_eq!(deal.loan_type, "Bridging Loan");
        assert!(deal.short_summary.contains("£2.5M"));
    }

    #[test]
    fn test_synthesize_defaults() {
        let deal = synthesize_deal("nothing useful here");

        assert_eq!(deal.client_name, FALLBACK_CLIENT_NAME);
        assert_eq!(deal.amount, FALLBACK_AMOUNT);
        assert_eq!(deal.loan_type, FALLBACK_LOAN_TYPE);
        assert_eq!(deal.status, "Under Review");
        assert_eq!(deal.next_step, "Initial Review");
        assert_eq!(
            deal.ai_insights,
            AiInsights {
                ltv_ratio: "70%".to_string(),
                exit_probability: "Medium".to_string(),
                market_score: "7/10".to_string(),
                risk_rating: "Medium".to_string(),
            }
        );
        assert_eq!(deal.ai_red_flags.len(), 1);
        assert_eq!(deal.ai_red_flags[0].title, MOCK_RED_FLAG_TITLE);
        assert_eq!(
            deal.connected_data_sources,
            vec!["Local Text Extraction", "Fallback Credit Paper Template"]
        );
    }

    #[test]
    fn test_synthesize_huge_amount_uses_default() {
        let content = format!("Borrower: Big Ltd wants £{} million bridging loan", "9".repeat(400));
        let deal = synthesize_deal(&content);

        assert_eq!(deal.amount, FALLBACK_AMOUNT);
        let input = lendflow_core::ExternalDealInput::from(&deal);
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["Amount"], serde_json::json!(FALLBACK_AMOUNT));
    }

    #[test]
    fn test_fallback_reason_mapping() {
        assert_eq!(AIServiceError::NotConfigured.fallback_reason(), FallbackReason::NotConfigured);
        assert_eq!(
            AIServiceError::Timeout(Duration::from_secs(30)).fallback_reason(),
            FallbackReason::Timeout
        );
        assert_eq!(
            AIServiceError::ApiError { status: 502, message: "bad gateway".to_string() }
                .fallback_reason(),
            FallbackReason::UpstreamStatus(502)
        );
    }

    #[tokio::test]
    async fn test_unconfigured_client_synthesizes() {
        let client = GenerationClient::new(None, Duration::from_secs(30)).unwrap();
        assert!(!client.is_configured());

        let result = client.generate("Client: Acme Ltd wants a bridge loan").await;
        assert!(result.is_synthesized());
        assert_eq!(result.reason(), Some(&FallbackReason::NotConfigured));
        assert_eq!(result.data().client_name, "Acme Ltd");
    }
}
