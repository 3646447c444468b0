//! # Engine Error Types Module
//!
//! This module defines the error types surfaced by the matching and nutrition engine.
//! Ranking and aggregation only ever fail on the shape of their input; everything
//! else (unresolved ingredients, malformed recipe documents) is tolerated and logged.

use thiserror::Error;

/// Errors produced by the engine and its collaborators
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Empty or non-list ingredient input. Client error, never retried.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Reference nutrition table could not be read or decoded
    #[error("Reference data error: {0}")]
    ReferenceData(String),

    /// Recipe corpus could not be read or decoded
    #[error("Corpus error: {0}")]
    Corpus(String),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),
}

impl EngineError {
    /// Whether this error should be reported to the caller as a client error
    pub fn is_client_error(&self) -> bool {
        matches!(self, EngineError::Validation(_))
    }
}
