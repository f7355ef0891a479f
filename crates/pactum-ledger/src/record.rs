//! # Escrow Records
//!
//! The escrow record and its status machine. Statuses advance one way:
//!
//! ```text
//! Held ──▶ Released            (normal or arbitrated payout to merchant)
//!   │ ───▶ Refunded            (facilitator or arbitrated return to buyer)
//!   └ ───▶ Disputed ──▶ Released | Refunded   (arbitration channel only)
//! ```
//!
//! `Released` and `Refunded` are terminal; no transition ever returns a
//! record to `Held`. Absence of a record is the implicit "never used"
//! state — records are retained indefinitely once terminal, as an
//! auditable trail.

use serde::{Deserialize, Serialize};

use pactum_core::{AccountId, EscrowId, Timestamp};

// ── Escrow Status ──────────────────────────────────────────────────────

/// The lifecycle status of an escrow record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EscrowStatus {
    /// Funds committed and awaiting release, refund, or dispute.
    Held,
    /// Funds paid out to the merchant. Terminal state.
    Released,
    /// Funds returned to the buyer. Terminal state.
    Refunded,
    /// Funds frozen pending arbitration; only the restricted channel may
    /// settle this record.
    Disputed,
}

impl EscrowStatus {
    /// The canonical string name of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Held => "HELD",
            Self::Released => "RELEASED",
            Self::Refunded => "REFUNDED",
            Self::Disputed => "DISPUTED",
        }
    }

    /// Whether this status is terminal (no further transitions allowed).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Released | Self::Refunded)
    }

    /// Whether funds for a record in this status count toward the
    /// committed total.
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Held | Self::Disputed)
    }

    /// Valid target statuses from this status.
    pub fn valid_transitions(&self) -> &'static [EscrowStatus] {
        match self {
            Self::Held => &[Self::Released, Self::Refunded, Self::Disputed],
            Self::Disputed => &[Self::Released, Self::Refunded],
            Self::Released | Self::Refunded => &[],
        }
    }
}

impl std::fmt::Display for EscrowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ── Escrow Record ──────────────────────────────────────────────────────

/// A single committed-fund entry pending an eventual release or refund.
///
/// Created by a deposit and retained indefinitely after settlement. Query
/// operations return clones of this record — callers never receive a
/// mutable view into the ledger's store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EscrowRecord {
    /// The caller-chosen unique key.
    pub escrow_id: EscrowId,
    /// The party funds are returned to on refund.
    pub buyer: AccountId,
    /// The party funds are paid to on release.
    pub merchant: AccountId,
    /// Committed quantity of the custodied asset, in smallest units.
    pub amount: u64,
    /// When the commitment was created (UTC).
    pub created_at: Timestamp,
    /// Earliest instant at which a normal release may execute. May equal
    /// `created_at` for immediate release.
    pub release_time: Timestamp,
    /// Current lifecycle status.
    pub status: EscrowStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_is_not_terminal_and_counts_as_committed() {
        assert!(!EscrowStatus::Held.is_terminal());
        assert!(EscrowStatus::Held.is_committed());
    }

    #[test]
    fn disputed_is_not_terminal_but_still_committed() {
        assert!(!EscrowStatus::Disputed.is_terminal());
        assert!(EscrowStatus::Disputed.is_committed());
    }

    #[test]
    fn settled_statuses_are_terminal_and_uncommitted() {
        for status in [EscrowStatus::Released, EscrowStatus::Refunded] {
            assert!(status.is_terminal());
            assert!(!status.is_committed());
            assert!(status.valid_transitions().is_empty());
        }
    }

    #[test]
    fn held_may_reach_all_three_paths() {
        let transitions = EscrowStatus::Held.valid_transitions();
        assert!(transitions.contains(&EscrowStatus::Released));
        assert!(transitions.contains(&EscrowStatus::Refunded));
        assert!(transitions.contains(&EscrowStatus::Disputed));
    }

    #[test]
    fn disputed_never_returns_to_held() {
        let transitions = EscrowStatus::Disputed.valid_transitions();
        assert!(!transitions.contains(&EscrowStatus::Held));
        assert_eq!(transitions.len(), 2);
    }

    #[test]
    fn status_display_all_variants() {
        assert_eq!(format!("{}", EscrowStatus::Held), "HELD");
        assert_eq!(format!("{}", EscrowStatus::Released), "RELEASED");
        assert_eq!(format!("{}", EscrowStatus::Refunded), "REFUNDED");
        assert_eq!(format!("{}", EscrowStatus::Disputed), "DISPUTED");
    }

    #[test]
    fn record_serde_roundtrip() {
        let record = EscrowRecord {
            escrow_id: EscrowId::new("order-1").unwrap(),
            buyer: AccountId::new("buyer-1").unwrap(),
            merchant: AccountId::new("merchant-1").unwrap(),
            amount: 100,
            created_at: Timestamp::now(),
            release_time: Timestamp::now(),
            status: EscrowStatus::Held,
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: EscrowRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
