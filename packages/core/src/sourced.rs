// ABOUTME: Tagged result distinguishing upstream data from locally synthesized data
// ABOUTME: Threaded through the ingestion pipeline so fallbacks are explicit, not inferred

use std::fmt;

use serde::Serialize;

/// Why a stage produced synthesized data instead of the upstream response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FallbackReason {
    /// Endpoint unset or still a placeholder value
    NotConfigured,
    Timeout,
    Unreachable(String),
    UpstreamStatus(u16),
    MalformedResponse(String),
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::NotConfigured => write!(f, "endpoint not configured"),
            FallbackReason::Timeout => write!(f, "request timed out"),
            FallbackReason::Unreachable(msg) => write!(f, "endpoint unreachable: {}", msg),
            FallbackReason::UpstreamStatus(status) => write!(f, "upstream returned {}", status),
            FallbackReason::MalformedResponse(msg) => write!(f, "malformed response: {}", msg),
        }
    }
}

/// Data tagged with where it came from
#[derive(Debug, Clone, PartialEq)]
pub enum Sourced<T> {
    Upstream(T),
    Synthesized { data: T, reason: FallbackReason },
}

impl<T> Sourced<T> {
    pub fn synthesized(data: T, reason: FallbackReason) -> Self {
        Sourced::Synthesized { data, reason }
    }

    pub fn data(&self) -> &T {
        match self {
            Sourced::Upstream(data) | Sourced::Synthesized { data, .. } => data,
        }
    }

    pub fn into_data(self) -> T {
        match self {
            Sourced::Upstream(data) | Sourced::Synthesized { data, .. } => data,
        }
    }

    pub fn is_synthesized(&self) -> bool {
        matches!(self, Sourced::Synthesized { .. })
    }

    pub fn reason(&self) -> Option<&FallbackReason> {
        match self {
            Sourced::Upstream(_) => None,
            Sourced::Synthesized { reason, .. } => Some(reason),
        }
    }

    /// Metadata describing this stage, detached from the data
    pub fn report(&self) -> StageReport {
        match self {
            Sourced::Upstream(_) => StageReport {
                source: DataSource::Upstream,
                reason: None,
            },
            Sourced::Synthesized { reason, .. } => StageReport {
                source: DataSource::Synthesized,
                reason: Some(reason.clone()),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Upstream,
    Synthesized,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageReport {
    pub source: DataSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<FallbackReason>,
}
