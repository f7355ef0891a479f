//! # Ledger Error Types
//!
//! Structured error hierarchy for the escrow ledger. Every failure is a
//! total-operation abort signaled by a specific, named condition — never a
//! generic failure. Each variant carries enough context for operators to
//! diagnose the rejection without inspecting logs.

use thiserror::Error;

/// Errors arising from escrow ledger operations.
///
/// Authorization errors name the operation and the rejected caller. State
/// machine errors name the record and its current status. Custody errors
/// carry the amounts involved.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Caller identity does not match the identity required for this
    /// operation on this record.
    #[error("caller {caller} is not authorized for {operation}")]
    Unauthorized {
        /// The attempted operation (e.g., "deposit", "release").
        operation: String,
        /// The rejected caller identity.
        caller: String,
    },

    /// Referenced escrow identifier has never been used.
    #[error("escrow {escrow_id} not found")]
    EscrowNotFound {
        /// The unknown escrow identifier.
        escrow_id: String,
    },

    /// Escrow identifier has already been assigned to a record.
    #[error("escrow {escrow_id} already exists; identifiers are assigned exactly once")]
    DuplicateEscrow {
        /// The re-used escrow identifier.
        escrow_id: String,
    },

    /// Deposit amount was zero.
    #[error("deposit for escrow {escrow_id} rejected: amount must be positive")]
    ZeroAmount {
        /// The escrow identifier of the rejected deposit.
        escrow_id: String,
    },

    /// Buyer and merchant resolve to the same identity.
    #[error("deposit for escrow {escrow_id} rejected: buyer and merchant are both {party}")]
    IdentityConflict {
        /// The escrow identifier of the rejected deposit.
        escrow_id: String,
        /// The identity supplied for both roles.
        party: String,
    },

    /// Committing this amount would exceed assets actually on hand.
    #[error(
        "deposit of {requested} for escrow {escrow_id} exceeds custody: {committed} already committed, {on_hand} on hand"
    )]
    InsufficientCustody {
        /// The escrow identifier of the rejected deposit.
        escrow_id: String,
        /// The requested deposit amount.
        requested: u64,
        /// The committed total before this deposit.
        committed: u64,
        /// Custody actually on hand.
        on_hand: u64,
    },

    /// Operation requires a status the record is not currently in.
    #[error("escrow {escrow_id} cannot perform {operation} in status {status}")]
    WrongStatus {
        /// The escrow identifier.
        escrow_id: String,
        /// The attempted operation.
        operation: String,
        /// The current record status.
        status: String,
    },

    /// Normal release attempted before the record's release time.
    #[error("escrow {escrow_id} cannot release before {release_time}")]
    ReleaseTimeNotReached {
        /// The escrow identifier.
        escrow_id: String,
        /// The earliest permitted release instant (ISO 8601).
        release_time: String,
    },

    /// The arbitration channel was already bound; the binding is one-time.
    #[error("arbitration channel is already bound to {arbiter}")]
    ArbiterAlreadyBound {
        /// The identity the channel is bound to.
        arbiter: String,
    },

    /// A restricted-channel operation arrived before any arbitration
    /// identity was bound.
    #[error("no arbitration channel is bound to this ledger")]
    ArbiterNotBound,

    /// The custodian signaled that the transfer did not succeed. All state
    /// changes of the operation were rolled back.
    #[error("custodian transfer of {amount} to {payee} failed for escrow {escrow_id}")]
    TransferFailed {
        /// The escrow identifier.
        escrow_id: String,
        /// The intended payee.
        payee: String,
        /// The amount that was not transferred.
        amount: u64,
    },
}
