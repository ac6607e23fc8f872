// ABOUTME: Environment variable name constants
// ABOUTME: Centralized definitions of all environment variable names used across Lendflow

// Port Configuration
pub const LENDFLOW_API_PORT: &str = "LENDFLOW_API_PORT";
pub const PORT: &str = "PORT"; // Legacy

// CORS Configuration
pub const LENDFLOW_CORS_ORIGIN: &str = "LENDFLOW_CORS_ORIGIN";

// AI Generation Endpoint
pub const LENDFLOW_GENERATION_URL: &str = "LENDFLOW_GENERATION_URL";
pub const LENDFLOW_GENERATION_SECRET: &str = "LENDFLOW_GENERATION_SECRET";
pub const LENDFLOW_GENERATION_TIMEOUT_SECS: &str = "LENDFLOW_GENERATION_TIMEOUT_SECS";

// Lending API (system of record)
pub const LENDFLOW_LENDING_API_URL: &str = "LENDFLOW_LENDING_API_URL";
pub const LENDFLOW_PERSIST_TIMEOUT_SECS: &str = "LENDFLOW_PERSIST_TIMEOUT_SECS";

// Defaults
pub const DEFAULT_PORT: u16 = 4001;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";
/// AI inference can be slow, so generation gets a long bound
pub const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_PERSIST_TIMEOUT_SECS: u64 = 10;

/// Fragments marking a value copied from a template rather than configured
pub const PLACEHOLDER_MARKERS: &[&str] = &["your-", "example.com", "placeholder", "changeme"];
