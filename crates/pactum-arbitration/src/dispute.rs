//! Dispute records, resolutions, and window configuration.
//!
//! A dispute record is the arbitration-side view of a frozen escrow: who
//! raised it, why, what the merchant answered, and — once settled — which
//! of the three mutually exclusive resolution paths was taken.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use pactum_core::{AccountId, DisputeId, EscrowId, Timestamp};

// ── Resolution ─────────────────────────────────────────────────────────

/// How a dispute was settled. Exactly one of these is ever recorded per
/// dispute, and recording it is irreversible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// Admin ruled for the buyer: the escrow was refunded.
    BuyerFavored,
    /// Admin ruled for the merchant: the escrow was released.
    MerchantFavored,
    /// The ruling deadline lapsed; the escrow was refunded by default.
    AutoResolved,
}

impl Resolution {
    /// Canonical uppercase form used in logs and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::BuyerFavored => "BUYER_FAVORED",
            Resolution::MerchantFavored => "MERCHANT_FAVORED",
            Resolution::AutoResolved => "AUTO_RESOLVED",
        }
    }

    /// Whether this resolution paid the buyer rather than the merchant.
    pub fn favors_buyer(&self) -> bool {
        !matches!(self, Resolution::MerchantFavored)
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An admin's explicit ruling on a dispute.
///
/// Deliberately narrower than [`Resolution`]: an admin can find for either
/// party, but the auto-resolved outcome is only ever produced by the
/// timeout path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ruling {
    /// Refund the buyer.
    ForBuyer,
    /// Release to the merchant.
    ForMerchant,
}

impl Ruling {
    /// The resolution this ruling records.
    pub fn resolution(&self) -> Resolution {
        match self {
            Ruling::ForBuyer => Resolution::BuyerFavored,
            Ruling::ForMerchant => Resolution::MerchantFavored,
        }
    }
}

// ── Dispute record ─────────────────────────────────────────────────────

/// The full lifecycle state of one dispute.
///
/// `merchant_evidence` and `responded_at` are set together by the
/// merchant's one permitted response; `resolution` is set exactly once by
/// a ruling or by auto-resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisputeRecord {
    /// Content-derived dispute identifier.
    pub dispute_id: DisputeId,
    /// The escrow under dispute.
    pub escrow_id: EscrowId,
    /// The buyer who opened the dispute.
    pub buyer: AccountId,
    /// The merchant on the disputed escrow.
    pub merchant: AccountId,
    /// The buyer's stated grounds.
    pub reason: String,
    /// The merchant's evidence, if submitted within the response window.
    pub merchant_evidence: Option<String>,
    /// When the dispute was opened.
    pub opened_at: Timestamp,
    /// When the merchant responded, if they did.
    pub responded_at: Option<Timestamp>,
    /// The final outcome, once settled.
    pub resolution: Option<Resolution>,
}

impl DisputeRecord {
    /// Whether the dispute has been settled.
    pub fn is_resolved(&self) -> bool {
        self.resolution.is_some()
    }

    /// Whether the merchant has submitted evidence.
    pub fn has_response(&self) -> bool {
        self.merchant_evidence.is_some()
    }
}

// ── Window configuration ───────────────────────────────────────────────

/// The three time windows that govern a dispute's lifecycle.
///
/// All three are inclusive at their boundary instant: an action exactly at
/// `origin + window` is still permitted (or, for the auto-resolve timeout,
/// first becomes permitted).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArbitrationWindows {
    /// How long after escrow creation a buyer may open a dispute.
    pub dispute_window: Duration,
    /// How long after dispute opening a merchant may respond.
    pub response_window: Duration,
    /// How long after dispute opening anyone may force a buyer-favored
    /// default resolution.
    pub auto_resolve_timeout: Duration,
}

impl ArbitrationWindows {
    /// Seven days to dispute, three to respond, fourteen until the case
    /// defaults to the buyer.
    pub fn standard() -> Self {
        Self {
            dispute_window: Duration::days(7),
            response_window: Duration::days(3),
            auto_resolve_timeout: Duration::days(14),
        }
    }
}
