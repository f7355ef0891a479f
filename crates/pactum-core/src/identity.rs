//! # Identity Newtypes
//!
//! Domain-primitive newtypes for identifiers throughout Pactum. Each
//! identifier is a distinct type — you cannot pass an [`AccountId`] where an
//! [`EscrowId`] is expected.
//!
//! ## Validation
//!
//! [`AccountId`] and [`EscrowId`] are caller-supplied strings validated at
//! construction time (non-empty, no surrounding whitespace). [`DisputeId`]
//! is never caller-supplied: it is derived from a monotonic nonce salted
//! into a SHA-256 hash, so distinct nonces yield distinct identifiers by
//! construction, not by chance.

use serde::{Deserialize, Serialize};

use crate::digest::sha256_hex;
use crate::error::ValidationError;

/// Helper macro to implement `Deserialize` for string newtypes that must
/// validate their contents. Deserializes as a plain `String`, then routes
/// through the type's `new()` constructor so that invalid values are
/// rejected at deserialization time — not silently accepted.
macro_rules! impl_validating_deserialize {
    ($ty:ident) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::new(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

fn is_well_formed(raw: &str) -> bool {
    !raw.is_empty() && raw.trim() == raw
}

// ---------------------------------------------------------------------------
// Caller-supplied identifiers (validated at construction)
// ---------------------------------------------------------------------------

/// The identity of a party: buyer, merchant, facilitator, administrator,
/// or the custody vault itself.
///
/// Authorization throughout Pactum is equality comparison between a caller's
/// `AccountId` and a stored `AccountId` — never a role hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AccountId(String);

impl AccountId {
    /// Create an account identifier, validating that it is non-empty and
    /// carries no surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidAccountId`] on malformed input.
    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        if !is_well_formed(&raw) {
            return Err(ValidationError::InvalidAccountId(raw));
        }
        Ok(Self(raw))
    }

    /// Access the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl_validating_deserialize!(AccountId);

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The caller-chosen unique key of an escrow record.
///
/// Assigned exactly once at deposit time; the ledger rejects re-use.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EscrowId(String);

impl EscrowId {
    /// Create an escrow identifier, validating that it is non-empty and
    /// carries no surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidEscrowId`] on malformed input.
    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        if !is_well_formed(&raw) {
            return Err(ValidationError::InvalidEscrowId(raw));
        }
        Ok(Self(raw))
    }

    /// Access the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl_validating_deserialize!(EscrowId);

impl std::fmt::Display for EscrowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "escrow:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Derived identifiers
// ---------------------------------------------------------------------------

/// A unique identifier for a dispute proceeding.
///
/// Derived as `sha256(nonce_be_bytes || escrow_id)` rendered in lowercase
/// hex. The nonce is a monotonic counter owned by the arbitration desk, so
/// two derivations can never collide regardless of escrow id contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DisputeId(String);

impl DisputeId {
    /// Derive the dispute identifier for `escrow_id` under `nonce`.
    pub fn derive(nonce: u64, escrow_id: &EscrowId) -> Self {
        let mut material = Vec::with_capacity(8 + escrow_id.as_str().len());
        material.extend_from_slice(&nonce.to_be_bytes());
        material.extend_from_slice(escrow_id.as_str().as_bytes());
        Self(sha256_hex(&material))
    }

    /// Reconstruct a dispute identifier from its hex form (e.g., from a
    /// persisted event), validating shape.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDisputeId`] unless the input is
    /// exactly 64 lowercase hex characters.
    pub fn from_hex(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        let well_formed = raw.len() == 64
            && raw
                .chars()
                .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase());
        if !well_formed {
            return Err(ValidationError::InvalidDisputeId(raw));
        }
        Ok(Self(raw))
    }

    /// Access the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// DisputeId has no `new()` — route deserialization through `from_hex` so
// only well-shaped digests are accepted.
impl<'de> Deserialize<'de> for DisputeId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::from_hex(raw).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for DisputeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "dispute:{}", self.0)
    }
}
