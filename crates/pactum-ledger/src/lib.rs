#![deny(missing_docs)]

//! # pactum-ledger — Escrow Custody Ledger
//!
//! The system of record for committed funds. The ledger owns the map of
//! escrow records and the running committed total, and is the only
//! component allowed to move value out of custody:
//!
//! - **Record** ([`record`]): The escrow record and its one-way status
//!   machine `Held → {Released, Refunded, Disputed}`,
//!   `Disputed → {Released, Refunded}`.
//!
//! - **Custodian** ([`custodian`]): The external transfer-or-fail
//!   capability the ledger drives, plus an in-memory implementation for
//!   tests and local wiring.
//!
//! - **Ledger** ([`ledger`]): Deposit, release, refund, the restricted
//!   arbitration channel, and the read-only query and audit surfaces.
//!
//! - **Error** ([`error`]): One named failure condition per rejection
//!   class — callers can always distinguish why an operation aborted.
//!
//! ## Security Invariant
//!
//! Funds leave custody through exactly one of release, refund, or an
//! arbitrated outcome, and no path can be taken twice: every settlement
//! marks the record terminal and decrements the committed total *before*
//! invoking the custodian, and a failed transfer rolls both back so no
//! partial state is observable.

pub mod custodian;
pub mod error;
pub mod ledger;
pub mod record;

// Re-export primary types for ergonomic imports.
pub use custodian::{AssetCustodian, VaultCustodian};
pub use error::LedgerError;
pub use ledger::{EscrowLedger, LedgerEvent, Reconciliation};
pub use record::{EscrowRecord, EscrowStatus};
