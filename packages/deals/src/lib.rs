// ABOUTME: Deal ingestion pipeline for Lendflow
// ABOUTME: Orchestrates generation, persistence and view shaping for submitted deal text

pub mod ingestion;

pub use ingestion::{DealIngestion, IngestError, IngestResult, IngestionMetadata, IngestionOutcome};
