//! # AppError
//!
//! Centralized error handling for the moodboard ecosystem.
//! Maps domain-specific failures to actionable error types.

use thiserror::Error;

/// The primary error type for all mb-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Referenced resource absent (e.g., Board, Label, User)
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),

    /// Malformed identifier, missing required field, value out of policy range
    #[error("validation error: {0}")]
    ValidationError(String),

    /// Bearer credential missing or invalid
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// An authorization predicate failed; carries the rule that failed
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Uniqueness constraint violated (duplicate like, follow, username…)
    #[error("conflict: {0}")]
    Conflict(String),

    /// Underlying store unreachable or misbehaving
    #[error("transport error: {0}")]
    Transport(String),
}

/// A specialized Result type for moodboard logic.
pub type Result<T> = std::result::Result<T, AppError>;
