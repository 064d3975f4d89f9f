//! Domain-specific error types for frailcare

use thiserror::Error;

/// Main error type for the care-plan pipeline
#[derive(Error, Debug)]
pub enum FrailcareError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Embedding provider error: {message}")]
    Embedding { message: String },

    #[error("Retrieval error: {message}")]
    Retrieval { message: String },

    #[error("Completion error: {message}")]
    Completion { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Plan store error: {message}")]
    PlanStore { message: String },

    #[error("Invalid parameters: {message}")]
    InvalidParams { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl From<anyhow::Error> for FrailcareError {
    fn from(err: anyhow::Error) -> Self {
        FrailcareError::Internal {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for FrailcareError {
    fn from(err: serde_json::Error) -> Self {
        FrailcareError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for FrailcareError {
    fn from(err: std::io::Error) -> Self {
        FrailcareError::PlanStore {
            message: err.to_string(),
        }
    }
}

/// Result type alias for frailcare operations
pub type Result<T> = std::result::Result<T, FrailcareError>;
