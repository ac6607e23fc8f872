// ABOUTME: Configuration package for Lendflow
// ABOUTME: Environment variable names and the validated service configuration

pub mod constants;
pub mod settings;

pub use settings::{
    is_placeholder, Config, ConfigError, ConfigResult, Endpoint, GenerationEndpoint,
};
