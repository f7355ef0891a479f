//! # Audit Event Envelope
//!
//! Every state-changing operation in Pactum appends a structured record to
//! its component's event log. The log is append-only and records are never
//! deleted: an external observer can reconstruct the full history of any
//! escrow or dispute from events alone, without querying current state.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::temporal::Timestamp;

/// A unique identifier for an audit event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(Uuid);

impl EventId {
    /// Create a new random event identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an event identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "event:{}", self.0)
    }
}

/// An audit log entry: a domain payload stamped with an event id and the
/// instant it was recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord<T> {
    /// Unique event identifier.
    pub event_id: EventId,
    /// When the event was recorded (UTC).
    pub recorded_at: Timestamp,
    /// The domain payload.
    pub payload: T,
}

impl<T> EventRecord<T> {
    /// Stamp `payload` with a fresh event id at `recorded_at`.
    pub fn record(recorded_at: Timestamp, payload: T) -> Self {
        Self {
            event_id: EventId::new(),
            recorded_at,
            payload,
        }
    }
}
