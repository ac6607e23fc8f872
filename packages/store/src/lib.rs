// ABOUTME: Client for the external lending API that stores deal records
// ABOUTME: Persists generated deals with local fabrication fallback and proxies list, detail and update calls

pub mod client;
pub mod error;

pub use client::{ListQuery, StoreClient};
pub use error::{StoreError, StoreResult};
