//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`InvalidPayload`] thrown when a payload fails schema validation.
//! - [`InvalidId`] thrown when an identifier is not 24 hex characters.
//! - [`Database`] thrown when the store itself fails.
//!
//!  [`InvalidPayload`]: EngineError::InvalidPayload
//!  [`InvalidId`]: EngineError::InvalidId
//!  [`Database`]: EngineError::Database
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{0}")]
    InvalidPayload(String),
    #[error("transaction id must be a string of 24 hex characters")]
    InvalidId,
    #[error("corrupt document: {0}")]
    CorruptDocument(String),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl EngineError {
    /// Client-side errors: the request itself is malformed.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidPayload(_) | Self::InvalidId)
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidPayload(a), Self::InvalidPayload(b)) => a == b,
            (Self::InvalidId, Self::InvalidId) => true,
            (Self::CorruptDocument(a), Self::CorruptDocument(b)) => a == b,
            (Self::Serialization(a), Self::Serialization(b)) => a.to_string() == b.to_string(),
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
