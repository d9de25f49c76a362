//! Configuration error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("Failed to read prompt file {path}: {source}")]
    PromptFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind address: {0}")]
    InvalidHost(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Request timeout of {request_secs}s does not cover a turn budget of {turn_secs}s")]
    RequestTimeoutBelowTurnBudget { request_secs: u64, turn_secs: u64 },

    #[error("Sweep interval must be greater than zero")]
    InvalidSweepInterval,

    #[error("Turn log capacity must be greater than zero")]
    InvalidTurnCapacity,

    #[error("Chunk overlap must be smaller than chunk size")]
    InvalidChunking,

    #[error("No document extensions configured")]
    NoDocumentExtensions,

    #[error("Temperature for {0} must be within 0..=2")]
    InvalidTemperature(&'static str),

    #[error("Token budget for {0} must be greater than zero")]
    InvalidMaxTokens(&'static str),

    #[error("Speech speed must be within 0.25..=4")]
    InvalidSpeechSpeed,

    #[error("Public audio path must start with '/'")]
    InvalidPublicPath,

    #[error("Upload limit must be greater than zero")]
    InvalidUploadLimit,
}
