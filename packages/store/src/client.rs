use std::time::Duration;

use async_trait::async_trait;
use lendflow_config::{Config, Endpoint};
use lendflow_core::{
    epoch_millis, now_rfc3339, Credential, DealStore, ExternalDealInput, ExternalDealPage,
    ExternalDealUpdate, FallbackReason, GeneratedDeal, PersistedDealRecord, Sourced,
};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{StoreError, StoreResult};

/// Query forwarded to the external list endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Client for the external lending API that owns deal records
#[derive(Debug, Clone)]
pub struct StoreClient {
    http_client: Client,
    base_url: Option<String>,
}

impl StoreClient {
    /// Create a new store client. With no endpoint, persistence fabricates
    /// records locally and the proxy operations return a configuration error.
    pub fn new(endpoint: Option<Endpoint>, default_timeout: Duration) -> StoreResult<Self> {
        let timeout = endpoint.as_ref().map(|e| e.timeout).unwrap_or(default_timeout);
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::Network(e.to_string()))?;

        match &endpoint {
            Some(e) => info!("Lending API configured: {} (timeout {:?})", e.url, timeout),
            None => info!("Lending API not configured - saved records will be fabricated locally"),
        }

        Ok(Self {
            http_client,
            base_url: endpoint.map(|e| e.url),
        })
    }

    pub fn from_config(config: &Config) -> StoreResult<Self> {
        Self::new(config.lending_api.clone(), config.persist_timeout)
    }

    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    fn deals_url(&self) -> StoreResult<Url> {
        let base = self
            .base_url
            .as_deref()
            .ok_or_else(|| StoreError::config("Lending API URL is not configured"))?;
        Url::parse(&format!("{}/deals", base)).map_err(|e| StoreError::config(e.to_string()))
    }

    fn deal_url(&self, id: &str) -> StoreResult<Url> {
        let mut url = self.deals_url()?;
        url.path_segments_mut()
            .map_err(|_| StoreError::config("Lending API URL cannot take a path"))?
            .push(id);
        Ok(url)
    }

    /// Attach the caller's authorization header, unchanged
    fn authorized(request: RequestBuilder, credential: &Credential) -> RequestBuilder {
        request.header(reqwest::header::AUTHORIZATION, credential.header_value())
    }

    /// Create a deal record
    pub async fn create_deal(
        &self,
        input: &ExternalDealInput,
        credential: &Credential,
    ) -> StoreResult<PersistedDealRecord> {
        let url = self.deals_url()?;
        info!("Creating deal record for {}", input.client_name);

        let response = Self::authorized(self.http_client.post(url), credential)
            .json(input)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Fetch one page of deal records
    pub async fn list_deals(
        &self,
        query: &ListQuery,
        credential: &Credential,
    ) -> StoreResult<ExternalDealPage> {
        let url = self.deals_url()?;

        let response = Self::authorized(self.http_client.get(url), credential)
            .query(query)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Fetch a single deal record
    pub async fn get_deal(
        &self,
        id: &str,
        credential: &Credential,
    ) -> StoreResult<PersistedDealRecord> {
        let url = self.deal_url(id)?;

        let response = Self::authorized(self.http_client.get(url), credential)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Apply a partial update to a deal record
    pub async fn update_deal(
        &self,
        id: &str,
        update: &ExternalDealUpdate,
        credential: &Credential,
    ) -> StoreResult<PersistedDealRecord> {
        let url = self.deal_url(id)?;
        info!("Updating deal record {}", id);

        let response = Self::authorized(self.http_client.put(url), credential)
            .json(update)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn parse_response<T: DeserializeOwned>(response: Response) -> StoreResult<T> {
        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| StoreError::InvalidResponse(e.to_string()));
        }

        let error_text = response.text().await.unwrap_or_else(|_| status.to_string());
        let message = upstream_message(&error_text).unwrap_or_else(|| status.to_string());

        match status {
            StatusCode::UNAUTHORIZED => Err(StoreError::Unauthorized(message)),
            StatusCode::FORBIDDEN => Err(StoreError::Forbidden(message)),
            StatusCode::NOT_FOUND => Err(StoreError::NotFound(message)),
            status => Err(StoreError::Http {
                status: status.as_u16(),
                message,
            }),
        }
    }
}

/// Pull a human-readable message out of an error body
fn upstream_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => ["message", "error"]
            .iter()
            .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
            .map(str::to_string),
        Err(_) => Some(body.to_string()),
    }
}

#[async_trait]
impl DealStore for StoreClient {
    async fn persist(
        &self,
        deal: &GeneratedDeal,
        credential: &Credential,
    ) -> Sourced<PersistedDealRecord> {
        let input = ExternalDealInput::from(deal);

        if !self.is_configured() {
            warn!("Lending API not configured; fabricating saved record");
            return fabricate(&input, FallbackReason::NotConfigured);
        }

        match self.create_deal(&input, credential).await {
            Ok(record) => {
                info!("Deal persisted with id {:?}", record.id);
                Sourced::Upstream(record)
            }
            Err(e) => {
                warn!("Persisting deal failed ({}); fabricating saved record", e);
                fabricate(&input, e.fallback_reason())
            }
        }
    }
}

fn fabricate(input: &ExternalDealInput, reason: FallbackReason) -> Sourced<PersistedDealRecord> {
    let record = PersistedDealRecord::fabricated(input, epoch_millis(), now_rfc3339());
    Sourced::synthesized(record, reason)
}
