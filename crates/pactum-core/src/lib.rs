#![deny(missing_docs)]

//! # pactum-core — Foundational Types for Pactum
//!
//! This crate defines the types every other crate in the workspace depends
//! on. It has no internal crate dependencies — only `serde`, `serde_json`,
//! `thiserror`, `chrono`, `uuid`, `sha2`, and `parking_lot` from the
//! external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** Every identifier is a
//!    distinct type. You cannot pass an [`AccountId`] where an [`EscrowId`]
//!    is expected, and a [`DisputeId`] can only be produced by derivation.
//!
//! 2. **Time flows through a [`Clock`].** Every window and deadline in the
//!    system is a synchronous now-vs-stored-instant comparison. Components
//!    read the current instant from an injected clock so that boundary
//!    behavior is testable to the second.
//!
//! 3. **[`ValidationError`] hierarchy.** Structured errors with `thiserror`
//!    — no `Box<dyn Error>`, no `.unwrap()` outside tests.

pub mod digest;
pub mod error;
pub mod events;
pub mod identity;
pub mod temporal;

// Re-export primary types at crate root for ergonomic imports.
pub use digest::sha256_hex;
pub use error::ValidationError;
pub use events::{EventId, EventRecord};
pub use identity::{AccountId, DisputeId, EscrowId};
pub use temporal::{Clock, ManualClock, SystemClock, Timestamp};
