//! # Pactum Arbitration
//!
//! Dispute intake and resolution over the Pactum escrow ledger.
//!
//! The [`ArbitrationDesk`] owns the dispute lifecycle: a buyer opens a
//! dispute within the dispute window, the merchant may answer once within
//! the response window, and the case ends by exactly one of three paths —
//! an admin ruling for the buyer, an admin ruling for the merchant, or a
//! buyer-favored default once the ruling deadline lapses. Funds never move
//! here directly; every settlement goes through the ledger's restricted
//! arbitration channel.
//!
//! ## Design
//!
//! - One dispute per escrow, ever. Resolution does not reopen the slot.
//! - Windows are boundary-inclusive and evaluated against an injected
//!   [`pactum_core::Clock`] at call time.
//! - The system defaults to the buyer: silence from the admin becomes a
//!   refund, and merchant evidence is advisory only.

#![deny(missing_docs)]

pub mod desk;
pub mod dispute;
pub mod error;

pub use desk::{ArbitrationDesk, DisputeEvent};
pub use dispute::{ArbitrationWindows, DisputeRecord, Resolution, Ruling};
pub use error::ArbitrationError;
