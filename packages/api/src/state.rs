// ABOUTME: Shared handler state
// ABOUTME: Wires the generation and lending API clients into the ingestion pipeline

use std::sync::Arc;

use anyhow::Context;
use lendflow_ai::GenerationClient;
use lendflow_config::Config;
use lendflow_deals::DealIngestion;
use lendflow_store::StoreClient;

/// Read-only state cloned into every handler
#[derive(Clone)]
pub struct AppState {
    pub ingestion: DealIngestion,
    pub store: Arc<StoreClient>,
}

impl AppState {
    pub fn new(generator: GenerationClient, store: StoreClient) -> Self {
        let store = Arc::new(store);
        Self {
            ingestion: DealIngestion::new(Arc::new(generator), store.clone()),
            store,
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let generator =
            GenerationClient::from_config(config).context("Failed to build generation client")?;
        let store = StoreClient::from_config(config).context("Failed to build lending API client")?;
        Ok(Self::new(generator, store))
    }
}
