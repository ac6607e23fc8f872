// ABOUTME: Core deal types, traits, and utilities for Lendflow
// ABOUTME: Foundational package shared by the generation, store, ingestion and API packages

pub mod constants;
pub mod filter;
pub mod pipeline;
pub mod progress;
pub mod sourced;
pub mod types;
pub mod utils;
pub mod view;

// Re-export main types
pub use types::{
    AiInsights, Deal, DealUpdate, DealsPage, ExternalDealInput, ExternalDealPage,
    ExternalDealUpdate, GeneratedDeal, PersistedDealRecord, RedFlag,
};

pub use filter::DealFilter;
pub use pipeline::{Credential, DealGenerator, DealStore};
pub use progress::progress_for_status;
pub use sourced::{DataSource, FallbackReason, Sourced, StageReport};
pub use view::{format_amount_millions, record_to_deal_view, to_deal_view};

// Re-export utilities
pub use utils::{content_preview, epoch_millis, now_rfc3339, timestamp_id, truncate_chars};
