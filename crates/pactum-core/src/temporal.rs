//! # Temporal Types
//!
//! UTC-only timestamp type and the clock abstraction behind every time gate
//! in the system.
//!
//! ## Design Decision
//!
//! Every deadline in Pactum (release times, dispute windows, response
//! windows, auto-resolve timeouts) is evaluated synchronously at call time
//! as a now-vs-stored-instant comparison — there is no timer-driven
//! cancellation. Components therefore read "now" from an injected [`Clock`]
//! rather than calling `Utc::now()` directly: production wiring uses
//! [`SystemClock`], and tests use [`ManualClock`] to place a call exactly
//! on, before, or after a window boundary.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// A UTC timestamp with second-level precision in serialized form.
///
/// Serializes via chrono to ISO 8601 with a `Z` suffix
/// (e.g., `2026-01-15T12:00:00Z`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp representing the current UTC time.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Create a timestamp from a `chrono::DateTime<Utc>`.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Access the underlying `chrono::DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Return this timestamp shifted forward by `duration`.
    ///
    /// Saturates at the chrono representable range rather than panicking,
    /// so a pathological window configuration cannot take the process down.
    pub fn plus(&self, duration: Duration) -> Self {
        Self(
            self.0
                .checked_add_signed(duration)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        )
    }

    /// Return the timestamp as an ISO 8601 string with Z suffix,
    /// truncated to seconds.
    pub fn to_canonical_string(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_canonical_string())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

// ── Clock ──────────────────────────────────────────────────────────────

/// A source of the current UTC instant.
///
/// Injected once at component construction and never reassigned.
pub trait Clock: Send + Sync {
    /// The current instant according to this clock.
    fn now(&self) -> Timestamp;
}

/// The production clock: reads the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// A settable clock for deterministic window tests.
///
/// Cloneable handle semantics: all clones share the same instant, so a test
/// can hand the clock to several components and advance them in lockstep.
#[derive(Debug, Clone)]
pub struct ManualClock {
    instant: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    /// Create a manual clock fixed at `start`.
    pub fn starting_at(start: Timestamp) -> Self {
        Self {
            instant: Arc::new(Mutex::new(*start.as_datetime())),
        }
    }

    /// Move the clock forward by `duration`.
    pub fn advance(&self, duration: Duration) {
        let mut instant = self.instant.lock();
        *instant += duration;
    }

    /// Set the clock to an absolute instant.
    pub fn set(&self, instant: Timestamp) {
        *self.instant.lock() = *instant.as_datetime();
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp(*self.instant.lock())
    }
}
