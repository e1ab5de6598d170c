//! # DomainError
//!
//! Failure kinds shared by the ports, the services and the adapters.
//! The HTTP layer maps each kind to a status code in exactly one place.

use thiserror::Error;

/// The primary error type for all forum operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// No record with the given identifier (e.g., Post, Comment)
    #[error("{0} not found with ID {1}")]
    NotFound(&'static str, String),

    /// The store rejected a write (e.g., body is not a JSON object)
    #[error("validation error: {0}")]
    Validation(String),

    /// Infrastructure failure (e.g., DB down, query failed)
    #[error("storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn post_not_found(id: impl Into<String>) -> Self {
        Self::NotFound("post", id.into())
    }

    pub fn comment_not_found(id: impl Into<String>) -> Self {
        Self::NotFound("comment", id.into())
    }
}

/// A specialized Result type for forum logic.
pub type Result<T> = std::result::Result<T, DomainError>;
