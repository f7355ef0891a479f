//! # Arbitration Desk
//!
//! Dispute intake, merchant response collection, admin rulings, and the
//! buyer-favored auto-resolution path. The desk owns the dispute records;
//! the [`EscrowLedger`] stays the single source of truth for funds, and
//! the desk reaches it only through the ledger's restricted arbitration
//! channel, presenting the channel identity bound at wiring time.
//!
//! ## Ordering Discipline
//!
//! Resolution writes the ledger first and the dispute record second. If
//! the ledger rejects the settlement (for example a failing custodian),
//! the dispute is left unresolved and the ruling can simply be retried —
//! the desk never records an outcome the ledger did not execute.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use pactum_core::{AccountId, Clock, DisputeId, EscrowId, EventRecord};
use pactum_ledger::{EscrowLedger, EscrowStatus};

use crate::dispute::{ArbitrationWindows, DisputeRecord, Resolution, Ruling};
use crate::error::ArbitrationError;

// ── Audit Events ───────────────────────────────────────────────────────

/// A state-changing desk operation, as recorded in the audit log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisputeEvent {
    /// A buyer opened a dispute; the escrow is now frozen.
    Opened {
        /// The new dispute.
        dispute_id: DisputeId,
        /// The escrow it freezes.
        escrow_id: EscrowId,
        /// The buyer who opened it.
        buyer: AccountId,
    },
    /// The merchant submitted evidence.
    Responded {
        /// The dispute answered.
        dispute_id: DisputeId,
        /// The responding merchant.
        merchant: AccountId,
    },
    /// An admin ruled on the dispute.
    Resolved {
        /// The settled dispute.
        dispute_id: DisputeId,
        /// The recorded outcome.
        resolution: Resolution,
        /// The admin who ruled.
        admin: AccountId,
    },
    /// The ruling deadline lapsed and the dispute defaulted to the buyer.
    AutoResolved {
        /// The settled dispute.
        dispute_id: DisputeId,
        /// Whoever triggered the timeout path.
        caller: AccountId,
    },
}

// ── The Desk ───────────────────────────────────────────────────────────

/// The arbitration desk.
///
/// `channel` is the identity this desk presents on the ledger's restricted
/// arbitration channel; wiring must bind it via
/// [`EscrowLedger::bind_arbiter`] before the desk can freeze or settle
/// anything.
pub struct ArbitrationDesk {
    admin: AccountId,
    channel: AccountId,
    windows: ArbitrationWindows,
    ledger: Arc<Mutex<EscrowLedger>>,
    clock: Arc<dyn Clock>,
    disputes: HashMap<DisputeId, DisputeRecord>,
    by_escrow: HashMap<EscrowId, DisputeId>,
    next_nonce: u64,
    events: Vec<EventRecord<DisputeEvent>>,
}

impl ArbitrationDesk {
    /// Create a desk over `ledger` with its identities and windows fixed.
    pub fn new(
        admin: AccountId,
        channel: AccountId,
        windows: ArbitrationWindows,
        ledger: Arc<Mutex<EscrowLedger>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            admin,
            channel,
            windows,
            ledger,
            clock,
            disputes: HashMap::new(),
            by_escrow: HashMap::new(),
            next_nonce: 0,
            events: Vec::new(),
        }
    }

    /// Open a dispute over an escrow, freezing it on the ledger.
    ///
    /// Buyer-only, one dispute per escrow ever, and only within the
    /// dispute window measured from escrow creation (boundary inclusive).
    /// The escrow must still be `Held`.
    ///
    /// # Errors
    ///
    /// [`ArbitrationError::AlreadyDisputed`], [`ArbitrationError::Unauthorized`],
    /// [`ArbitrationError::EscrowNotDisputable`],
    /// [`ArbitrationError::DisputeWindowClosed`], or a wrapped
    /// [`pactum_ledger::LedgerError`] if the escrow does not exist or the
    /// channel is not bound.
    pub fn open_dispute(
        &mut self,
        caller: &AccountId,
        escrow_id: &EscrowId,
        reason: impl Into<String>,
    ) -> Result<DisputeId, ArbitrationError> {
        if let Some(existing) = self.by_escrow.get(escrow_id) {
            return Err(ArbitrationError::AlreadyDisputed {
                escrow_id: escrow_id.to_string(),
                dispute_id: existing.to_string(),
            });
        }

        let ledger = Arc::clone(&self.ledger);
        let mut ledger = ledger.lock();
        let record = ledger.inspect(escrow_id).ok_or_else(|| {
            pactum_ledger::LedgerError::EscrowNotFound {
                escrow_id: escrow_id.to_string(),
            }
        })?;
        if caller != &record.buyer {
            return Err(ArbitrationError::Unauthorized {
                operation: "open_dispute".to_string(),
                caller: caller.to_string(),
            });
        }
        if record.status != EscrowStatus::Held {
            return Err(ArbitrationError::EscrowNotDisputable {
                escrow_id: escrow_id.to_string(),
                status: record.status.as_str().to_string(),
            });
        }
        let now = self.clock.now();
        let window_end = record.created_at.plus(self.windows.dispute_window);
        if now > window_end {
            return Err(ArbitrationError::DisputeWindowClosed {
                escrow_id: escrow_id.to_string(),
                window_end: window_end.to_string(),
            });
        }

        // Freeze on the ledger before admitting the dispute locally; if
        // the channel is rejected nothing is recorded here.
        ledger.flag_dispute(&self.channel, escrow_id)?;
        drop(ledger);

        let dispute_id = DisputeId::derive(self.next_nonce, escrow_id);
        self.next_nonce += 1;
        let dispute = DisputeRecord {
            dispute_id: dispute_id.clone(),
            escrow_id: escrow_id.clone(),
            buyer: record.buyer.clone(),
            merchant: record.merchant.clone(),
            reason: reason.into(),
            merchant_evidence: None,
            opened_at: now,
            responded_at: None,
            resolution: None,
        };
        self.disputes.insert(dispute_id.clone(), dispute);
        self.by_escrow.insert(escrow_id.clone(), dispute_id.clone());

        tracing::info!(dispute_id = %dispute_id, escrow_id = %escrow_id, buyer = %record.buyer, "dispute opened");
        self.record_event(DisputeEvent::Opened {
            dispute_id: dispute_id.clone(),
            escrow_id: escrow_id.clone(),
            buyer: record.buyer,
        });
        Ok(dispute_id)
    }

    /// Submit the merchant's evidence for a dispute.
    ///
    /// Merchant-only, at most once, and only within the response window
    /// measured from dispute opening (boundary inclusive). Evidence is
    /// informational: it is stored for the admin's review and has no
    /// mechanical effect on the outcome.
    ///
    /// # Errors
    ///
    /// [`ArbitrationError::DisputeNotFound`], [`ArbitrationError::Unauthorized`],
    /// [`ArbitrationError::AlreadyResolved`],
    /// [`ArbitrationError::AlreadyResponded`], or
    /// [`ArbitrationError::ResponseWindowClosed`].
    pub fn respond(
        &mut self,
        caller: &AccountId,
        dispute_id: &DisputeId,
        evidence: impl Into<String>,
    ) -> Result<(), ArbitrationError> {
        let now = self.clock.now();
        let response_window = self.windows.response_window;
        let dispute = self.disputes.get_mut(dispute_id).ok_or_else(|| {
            ArbitrationError::DisputeNotFound {
                dispute_id: dispute_id.to_string(),
            }
        })?;
        if caller != &dispute.merchant {
            return Err(ArbitrationError::Unauthorized {
                operation: "respond".to_string(),
                caller: caller.to_string(),
            });
        }
        if let Some(resolution) = dispute.resolution {
            return Err(ArbitrationError::AlreadyResolved {
                dispute_id: dispute_id.to_string(),
                resolution: resolution.to_string(),
            });
        }
        if dispute.has_response() {
            return Err(ArbitrationError::AlreadyResponded {
                dispute_id: dispute_id.to_string(),
            });
        }
        let window_end = dispute.opened_at.plus(response_window);
        if now > window_end {
            return Err(ArbitrationError::ResponseWindowClosed {
                dispute_id: dispute_id.to_string(),
                window_end: window_end.to_string(),
            });
        }

        dispute.merchant_evidence = Some(evidence.into());
        dispute.responded_at = Some(now);
        let merchant = dispute.merchant.clone();

        tracing::info!(dispute_id = %dispute_id, merchant = %merchant, "merchant responded");
        self.record_event(DisputeEvent::Responded {
            dispute_id: dispute_id.clone(),
            merchant,
        });
        Ok(())
    }

    /// Record an admin ruling and settle the escrow accordingly.
    ///
    /// Admin-only and final. A ruling for the buyer refunds; a ruling for
    /// the merchant releases. The admin may rule at any time after opening
    /// — before, during, or after the response window — with or without
    /// merchant evidence on file.
    ///
    /// # Errors
    ///
    /// [`ArbitrationError::Unauthorized`],
    /// [`ArbitrationError::DisputeNotFound`],
    /// [`ArbitrationError::AlreadyResolved`], or a wrapped ledger error if
    /// settlement fails (the dispute stays open and the ruling can be
    /// retried).
    pub fn resolve(
        &mut self,
        caller: &AccountId,
        dispute_id: &DisputeId,
        ruling: Ruling,
    ) -> Result<(), ArbitrationError> {
        if caller != &self.admin {
            return Err(ArbitrationError::Unauthorized {
                operation: "resolve".to_string(),
                caller: caller.to_string(),
            });
        }
        let escrow_id = self.settleable(dispute_id)?;

        {
            let ledger = Arc::clone(&self.ledger);
            let mut ledger = ledger.lock();
            match ruling {
                Ruling::ForBuyer => ledger.refund_disputed(&self.channel, &escrow_id)?,
                Ruling::ForMerchant => ledger.release_disputed(&self.channel, &escrow_id)?,
            }
        }

        let resolution = ruling.resolution();
        if let Some(dispute) = self.disputes.get_mut(dispute_id) {
            dispute.resolution = Some(resolution);
        }
        tracing::info!(dispute_id = %dispute_id, resolution = resolution.as_str(), "dispute resolved by ruling");
        self.record_event(DisputeEvent::Resolved {
            dispute_id: dispute_id.clone(),
            resolution,
            admin: caller.clone(),
        });
        Ok(())
    }

    /// Force the buyer-favored default once the ruling deadline lapses.
    ///
    /// Callable by anyone — the time gate, not the caller, is the
    /// authority; the caller is recorded in the audit log. Permitted from
    /// the timeout instant onward (boundary inclusive).
    ///
    /// # Errors
    ///
    /// [`ArbitrationError::DisputeNotFound`],
    /// [`ArbitrationError::AlreadyResolved`],
    /// [`ArbitrationError::AutoResolveNotReached`], or a wrapped ledger
    /// error if the refund fails.
    pub fn auto_resolve(
        &mut self,
        caller: &AccountId,
        dispute_id: &DisputeId,
    ) -> Result<(), ArbitrationError> {
        let escrow_id = self.settleable(dispute_id)?;
        let dispute = self.disputes.get(dispute_id).ok_or_else(|| {
            ArbitrationError::DisputeNotFound {
                dispute_id: dispute_id.to_string(),
            }
        })?;
        let now = self.clock.now();
        let eligible_at = dispute.opened_at.plus(self.windows.auto_resolve_timeout);
        if now < eligible_at {
            return Err(ArbitrationError::AutoResolveNotReached {
                dispute_id: dispute_id.to_string(),
                eligible_at: eligible_at.to_string(),
            });
        }

        {
            let ledger = Arc::clone(&self.ledger);
            let mut ledger = ledger.lock();
            ledger.refund_disputed(&self.channel, &escrow_id)?;
        }

        if let Some(dispute) = self.disputes.get_mut(dispute_id) {
            dispute.resolution = Some(Resolution::AutoResolved);
        }
        tracing::info!(dispute_id = %dispute_id, caller = %caller, "dispute auto-resolved to buyer");
        self.record_event(DisputeEvent::AutoResolved {
            dispute_id: dispute_id.clone(),
            caller: caller.clone(),
        });
        Ok(())
    }

    // ── Query surface ──────────────────────────────────────────────────

    /// Look up a dispute record by its identifier.
    pub fn dispute(&self, dispute_id: &DisputeId) -> Option<DisputeRecord> {
        self.disputes.get(dispute_id).cloned()
    }

    /// Look up the dispute (if any) covering an escrow.
    pub fn dispute_for_escrow(&self, escrow_id: &EscrowId) -> Option<DisputeRecord> {
        self.by_escrow
            .get(escrow_id)
            .and_then(|id| self.disputes.get(id))
            .cloned()
    }

    /// The admin identity fixed at construction.
    pub fn admin(&self) -> &AccountId {
        &self.admin
    }

    /// The append-only audit log.
    pub fn events(&self) -> &[EventRecord<DisputeEvent>] {
        &self.events
    }

    // ── Internal ───────────────────────────────────────────────────────

    /// Confirm the dispute exists and is still open; return its escrow.
    fn settleable(&self, dispute_id: &DisputeId) -> Result<EscrowId, ArbitrationError> {
        let dispute = self.disputes.get(dispute_id).ok_or_else(|| {
            ArbitrationError::DisputeNotFound {
                dispute_id: dispute_id.to_string(),
            }
        })?;
        if let Some(resolution) = dispute.resolution {
            return Err(ArbitrationError::AlreadyResolved {
                dispute_id: dispute_id.to_string(),
                resolution: resolution.to_string(),
            });
        }
        Ok(dispute.escrow_id.clone())
    }

    fn record_event(&mut self, payload: DisputeEvent) {
        let now = self.clock.now();
        self.events.push(EventRecord::record(now, payload));
    }
}
