//! Arbitration error taxonomy.
//!
//! Every rejection names the operation, the offending value, and — for
//! window violations — the boundary instant, so callers can distinguish
//! "not allowed" from "not yet" from "too late" without string matching.

use thiserror::Error;

use pactum_ledger::LedgerError;

/// Errors from dispute intake, response, and resolution.
#[derive(Debug, Error)]
pub enum ArbitrationError {
    /// The caller lacks the authority the operation requires.
    #[error("unauthorized {operation} by '{caller}'")]
    Unauthorized {
        /// The operation that was attempted.
        operation: String,
        /// The identity that attempted it.
        caller: String,
    },

    /// No dispute exists under the given identifier.
    #[error("dispute not found: {dispute_id}")]
    DisputeNotFound {
        /// The unknown dispute identifier.
        dispute_id: String,
    },

    /// The escrow already has a dispute; at most one per escrow, ever.
    #[error("escrow {escrow_id} already disputed under {dispute_id}")]
    AlreadyDisputed {
        /// The escrow the buyer tried to dispute again.
        escrow_id: String,
        /// The existing dispute.
        dispute_id: String,
    },

    /// The dispute has already been resolved; rulings are final.
    #[error("dispute {dispute_id} already resolved ({resolution})")]
    AlreadyResolved {
        /// The resolved dispute.
        dispute_id: String,
        /// How it was resolved.
        resolution: String,
    },

    /// The merchant has already submitted evidence for this dispute.
    #[error("dispute {dispute_id} already has a merchant response")]
    AlreadyResponded {
        /// The dispute that already carries evidence.
        dispute_id: String,
    },

    /// The dispute window measured from escrow creation has passed.
    #[error("dispute window for escrow {escrow_id} closed at {window_end}")]
    DisputeWindowClosed {
        /// The escrow the buyer tried to dispute.
        escrow_id: String,
        /// The last permitted instant, inclusive.
        window_end: String,
    },

    /// The merchant response window measured from dispute opening has
    /// passed.
    #[error("response window for dispute {dispute_id} closed at {window_end}")]
    ResponseWindowClosed {
        /// The dispute the merchant tried to answer.
        dispute_id: String,
        /// The last permitted instant, inclusive.
        window_end: String,
    },

    /// The auto-resolve timeout has not yet elapsed.
    #[error("dispute {dispute_id} not auto-resolvable before {eligible_at}")]
    AutoResolveNotReached {
        /// The dispute that was offered for auto-resolution.
        dispute_id: String,
        /// The first permitted instant, inclusive.
        eligible_at: String,
    },

    /// The escrow is not in a state from which a dispute can be opened.
    #[error("escrow {escrow_id} not disputable in status {status}")]
    EscrowNotDisputable {
        /// The escrow the buyer tried to dispute.
        escrow_id: String,
        /// Its current status.
        status: String,
    },

    /// The underlying ledger rejected the operation.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_errors_name_the_boundary() {
        let err = ArbitrationError::DisputeWindowClosed {
            escrow_id: "escrow:order-1".to_string(),
            window_end: "2026-01-22T12:00:00Z".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "dispute window for escrow escrow:order-1 closed at 2026-01-22T12:00:00Z"
        );
    }

    #[test]
    fn ledger_errors_pass_through_transparently() {
        let inner = LedgerError::ArbiterNotBound;
        let wrapped = ArbitrationError::from(inner);
        assert_eq!(
            wrapped.to_string(),
            "no arbitration channel is bound to this ledger"
        );
    }
}
