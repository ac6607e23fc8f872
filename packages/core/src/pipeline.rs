// ABOUTME: Seams between the ingestion orchestrator and its outbound clients
// ABOUTME: Per-request credential type plus the generator and store traits

use std::fmt;

use async_trait::async_trait;

use crate::sourced::Sourced;
use crate::types::{GeneratedDeal, PersistedDealRecord};

/// Caller-supplied authorization header value, forwarded verbatim upstream.
///
/// Passed explicitly into every outbound call; never stored on a shared client.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a raw header value. Blank values are rejected.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    /// Build a `Bearer` credential from a bare token
    pub fn bearer(token: &str) -> Option<Self> {
        if token.trim().is_empty() {
            return None;
        }
        Self::new(format!("Bearer {}", token.trim()))
    }

    pub fn header_value(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Turns raw content into a structured deal. Never fails; unavailability is
/// absorbed into a synthesized result.
#[async_trait]
pub trait DealGenerator: Send + Sync {
    async fn generate(&self, content: &str) -> Sourced<GeneratedDeal>;
}

/// Persists a generated deal in the system of record. Never fails; a
/// locally fabricated record stands in when the store is unavailable.
#[async_trait]
pub trait DealStore: Send + Sync {
    async fn persist(
        &self,
        deal: &GeneratedDeal,
        credential: &Credential,
    ) -> Sourced<PersistedDealRecord>;
}
