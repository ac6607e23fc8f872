// ABOUTME: Deal ingestion orchestrator
// ABOUTME: Validates a submission, generates and persists the deal, and shapes the result for the UI

use std::sync::Arc;

use lendflow_core::{to_deal_view, Credential, Deal, DealGenerator, DealStore, StageReport};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IngestError {
    #[error("Content is required")]
    EmptyContent,

    #[error("Authorization is required")]
    MissingCredential,
}

pub type IngestResult<T> = Result<T, IngestError>;

/// Where each stage's data came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestionMetadata {
    pub generation: StageReport,
    pub persistence: StageReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct IngestionOutcome {
    pub deal: Deal,
    pub message: String,
    pub metadata: IngestionMetadata,
}

impl IngestionOutcome {
    pub fn used_fallback(&self) -> bool {
        self.metadata.generation.reason.is_some() || self.metadata.persistence.reason.is_some()
    }
}

/// Runs submissions through generation and persistence.
///
/// Holds no per-request state; the credential travels with each call.
#[derive(Clone)]
pub struct DealIngestion {
    generator: Arc<dyn DealGenerator>,
    store: Arc<dyn DealStore>,
}

impl DealIngestion {
    pub fn new(generator: Arc<dyn DealGenerator>, store: Arc<dyn DealStore>) -> Self {
        Self { generator, store }
    }

    pub async fn ingest(
        &self,
        content: &str,
        credential: Option<Credential>,
    ) -> IngestResult<IngestionOutcome> {
        if content.trim().is_empty() {
            return Err(IngestError::EmptyContent);
        }
        let credential = credential.ok_or(IngestError::MissingCredential)?;

        let generated = self.generator.generate(content).await;
        if let Some(reason) = generated.reason() {
            warn!("Generation fell back to local synthesis: {}", reason);
        }

        let persisted = self.store.persist(generated.data(), &credential).await;
        if let Some(reason) = persisted.reason() {
            warn!("Persistence fell back to a local record: {}", reason);
        }

        let deal = to_deal_view(persisted.data(), generated.data());
        let message = compose_message(generated.is_synthesized(), persisted.is_synthesized());
        info!("Ingested deal {} ({}): {}", deal.id, deal.name, message);

        Ok(IngestionOutcome {
            deal,
            message,
            metadata: IngestionMetadata {
                generation: generated.report(),
                persistence: persisted.report(),
            },
        })
    }
}

fn compose_message(generation_mocked: bool, persistence_mocked: bool) -> String {
    match (generation_mocked, persistence_mocked) {
        (false, false) => "Deal created successfully".to_string(),
        (true, false) => "Deal created successfully using mock generation".to_string(),
        (false, true) => "Deal created successfully using mock persistence".to_string(),
        (true, true) => {
            "Deal created successfully using mock generation and mock persistence".to_string()
        }
    }
}
