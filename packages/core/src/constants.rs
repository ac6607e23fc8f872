/// One million, the unit deal amounts are displayed and extracted in
pub const MILLION: f64 = 1_000_000.0;

/// Currency symbol used for formatted deal amounts
pub const CURRENCY_SYMBOL: &str = "£";

/// Number of content characters kept when raw text is embedded in a document
pub const CONTENT_PREVIEW_CHARS: usize = 500;

/// Next step recorded when the generated deal carries none
pub const DEFAULT_NEXT_STEP: &str = "Initial Review";

/// Status recorded when the generated deal carries none
pub const DEFAULT_STATUS: &str = "Under Review";

// Defaults for insight fields missing from a generated deal
pub const DEFAULT_LTV_RATIO: &str = "N/A";
pub const DEFAULT_EXIT_PROBABILITY: &str = "Unknown";
pub const DEFAULT_MARKET_SCORE: &str = "N/A";
pub const DEFAULT_RISK_RATING: &str = "Unknown";
