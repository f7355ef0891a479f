//! # Validation Errors
//!
//! Construction-time errors for domain primitive newtypes. Each variant
//! carries the rejected input and the expected format so that operators can
//! diagnose misconfiguration without guesswork.

use thiserror::Error;

/// Validation errors for domain primitive newtypes.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Account identifier is empty or whitespace-only.
    #[error("invalid account id: \"{0}\" (expected a non-empty identifier)")]
    InvalidAccountId(String),

    /// Escrow identifier is empty or whitespace-only.
    #[error("invalid escrow id: \"{0}\" (expected a non-empty identifier)")]
    InvalidEscrowId(String),

    /// Dispute identifier string is not a 64-character lowercase hex digest.
    #[error("invalid dispute id: \"{0}\" (expected 64 lowercase hex characters)")]
    InvalidDisputeId(String),
}
