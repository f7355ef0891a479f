//! # Escrow Ledger
//!
//! The single source of truth for how much value is currently committed.
//! The ledger owns the record map and the committed total, and exposes:
//!
//! - the facilitator surface (`deposit`, `refund`),
//! - the settlement surface (`release`, callable by the facilitator or the
//!   record's own merchant),
//! - the restricted arbitration channel (`flag_dispute`,
//!   `release_disputed`, `refund_disputed`), gated on a one-time identity
//!   binding, and
//! - the read-only query and audit surfaces.
//!
//! ## Ordering Discipline
//!
//! Settlement marks the record terminal and decrements the committed total
//! *before* invoking the custodian. A custodian that could somehow call
//! back into the ledger for the same record would observe the terminal
//! status and fail with a wrong-status rejection — no double payout is
//! possible. If the custodian reports failure, both mutations are rolled
//! back and the whole operation aborts with no residual side effects.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use pactum_core::{AccountId, Clock, EscrowId, EventRecord, Timestamp};

use crate::custodian::AssetCustodian;
use crate::error::LedgerError;
use crate::record::{EscrowRecord, EscrowStatus};

// ── Audit Events ───────────────────────────────────────────────────────

/// A state-changing ledger operation, as recorded in the audit log.
///
/// Carries the identifiers, parties, and amount involved — sufficient for
/// an external observer to reconstruct the full history of any escrow
/// without querying current state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerEvent {
    /// The arbitration channel was bound to an identity.
    ArbiterBound {
        /// The identity now authorized on the restricted channel.
        arbiter: AccountId,
    },
    /// A new commitment entered custody.
    Deposited {
        /// The escrow record key.
        escrow_id: EscrowId,
        /// The buyer identity.
        buyer: AccountId,
        /// The merchant identity.
        merchant: AccountId,
        /// The committed amount.
        amount: u64,
        /// Earliest normal release instant.
        release_time: Timestamp,
    },
    /// Funds were paid out to the merchant.
    Released {
        /// The escrow record key.
        escrow_id: EscrowId,
        /// The payee.
        merchant: AccountId,
        /// The amount paid out.
        amount: u64,
        /// The identity that triggered the release.
        caller: AccountId,
    },
    /// Funds were returned to the buyer.
    Refunded {
        /// The escrow record key.
        escrow_id: EscrowId,
        /// The payee.
        buyer: AccountId,
        /// The amount returned.
        amount: u64,
        /// The identity that triggered the refund.
        caller: AccountId,
    },
    /// The record was frozen pending arbitration.
    DisputeFlagged {
        /// The escrow record key.
        escrow_id: EscrowId,
        /// The arbitration identity that flagged it.
        arbiter: AccountId,
    },
}

// ── Reconciliation ─────────────────────────────────────────────────────

/// A point-in-time view of custody versus commitments.
///
/// The conservation invariant requires `custody_on_hand >= committed_total`
/// at every observation point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reconciliation {
    /// Custody actually on hand at the custodian.
    pub custody_on_hand: u64,
    /// Running sum of amounts in `Held` or `Disputed` records.
    pub committed_total: u64,
}

impl Reconciliation {
    /// Whether custody on hand covers every outstanding commitment.
    pub fn is_covered(&self) -> bool {
        self.custody_on_hand >= self.committed_total
    }
}

// ── The Ledger ─────────────────────────────────────────────────────────

/// The escrow custody ledger.
///
/// Identity parameters are fixed at construction: the facilitator (the
/// only depositor), the vault account the custodian draws from, the
/// custodian itself, and the clock. The arbitration identity is bound
/// exactly once afterwards via [`EscrowLedger::bind_arbiter`].
pub struct EscrowLedger {
    facilitator: AccountId,
    vault: AccountId,
    custodian: Box<dyn AssetCustodian>,
    clock: Arc<dyn Clock>,
    arbiter: Option<AccountId>,
    records: HashMap<EscrowId, EscrowRecord>,
    committed_total: u64,
    events: Vec<EventRecord<LedgerEvent>>,
}

impl EscrowLedger {
    /// Create a ledger with its identity parameters fixed for its lifetime.
    pub fn new(
        facilitator: AccountId,
        vault: AccountId,
        custodian: Box<dyn AssetCustodian>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            facilitator,
            vault,
            custodian,
            clock,
            arbiter: None,
            records: HashMap::new(),
            committed_total: 0,
            events: Vec::new(),
        }
    }

    /// Bind the arbitration identity that may use the restricted channel.
    ///
    /// One-time and facilitator-authorized: a second call fails regardless
    /// of caller, and the binding is never reassigned.
    ///
    /// # Errors
    ///
    /// [`LedgerError::Unauthorized`] unless `caller` is the facilitator;
    /// [`LedgerError::ArbiterAlreadyBound`] on any repeat call.
    pub fn bind_arbiter(
        &mut self,
        caller: &AccountId,
        arbiter: AccountId,
    ) -> Result<(), LedgerError> {
        if caller != &self.facilitator {
            return Err(LedgerError::Unauthorized {
                operation: "bind_arbiter".to_string(),
                caller: caller.to_string(),
            });
        }
        if let Some(bound) = &self.arbiter {
            return Err(LedgerError::ArbiterAlreadyBound {
                arbiter: bound.to_string(),
            });
        }
        tracing::info!(arbiter = %arbiter, "arbitration channel bound");
        self.record_event(LedgerEvent::ArbiterBound {
            arbiter: arbiter.clone(),
        });
        self.arbiter = Some(arbiter);
        Ok(())
    }

    /// Commit `amount` units into custody under `escrow_id`.
    ///
    /// # Errors
    ///
    /// [`LedgerError::Unauthorized`] unless `caller` is the facilitator;
    /// [`LedgerError::ZeroAmount`] for a zero amount;
    /// [`LedgerError::IdentityConflict`] if buyer and merchant are the
    /// same identity; [`LedgerError::DuplicateEscrow`] if the identifier
    /// was ever used; [`LedgerError::InsufficientCustody`] if custody on
    /// hand cannot cover the new commitment on top of the committed total.
    #[allow(clippy::too_many_arguments)]
    pub fn deposit(
        &mut self,
        caller: &AccountId,
        escrow_id: EscrowId,
        buyer: AccountId,
        merchant: AccountId,
        amount: u64,
        release_time: Timestamp,
    ) -> Result<(), LedgerError> {
        if caller != &self.facilitator {
            return Err(LedgerError::Unauthorized {
                operation: "deposit".to_string(),
                caller: caller.to_string(),
            });
        }
        if amount == 0 {
            return Err(LedgerError::ZeroAmount {
                escrow_id: escrow_id.to_string(),
            });
        }
        if buyer == merchant {
            return Err(LedgerError::IdentityConflict {
                escrow_id: escrow_id.to_string(),
                party: buyer.to_string(),
            });
        }
        if self.records.contains_key(&escrow_id) {
            return Err(LedgerError::DuplicateEscrow {
                escrow_id: escrow_id.to_string(),
            });
        }
        let on_hand = self.custodian.balance_of(&self.vault);
        let new_committed = self.committed_total.checked_add(amount);
        match new_committed {
            Some(total) if total <= on_hand => {}
            _ => {
                return Err(LedgerError::InsufficientCustody {
                    escrow_id: escrow_id.to_string(),
                    requested: amount,
                    committed: self.committed_total,
                    on_hand,
                });
            }
        }

        let created_at = self.clock.now();
        let record = EscrowRecord {
            escrow_id: escrow_id.clone(),
            buyer: buyer.clone(),
            merchant: merchant.clone(),
            amount,
            created_at,
            release_time,
            status: EscrowStatus::Held,
        };
        self.records.insert(escrow_id.clone(), record);
        self.committed_total += amount;

        tracing::info!(escrow_id = %escrow_id, amount, buyer = %buyer, merchant = %merchant, "escrow deposited");
        self.record_event(LedgerEvent::Deposited {
            escrow_id,
            buyer,
            merchant,
            amount,
            release_time,
        });
        Ok(())
    }

    /// Pay out a `Held` record to its merchant.
    ///
    /// Callable by the facilitator or by the record's own merchant — a
    /// per-record authorization fact, not a global role. Merchant
    /// self-release once the time lock has passed is a deliberate trust
    /// assumption of the system: the buyer's recourse is to open a dispute
    /// before that point.
    ///
    /// # Errors
    ///
    /// [`LedgerError::EscrowNotFound`], [`LedgerError::Unauthorized`],
    /// [`LedgerError::WrongStatus`] unless the record is `Held`,
    /// [`LedgerError::ReleaseTimeNotReached`] before the time lock,
    /// [`LedgerError::TransferFailed`] if the custodian rejects the payout
    /// (all state rolled back).
    pub fn release(
        &mut self,
        caller: &AccountId,
        escrow_id: &EscrowId,
    ) -> Result<(), LedgerError> {
        let record = self.fetch(escrow_id)?;
        if caller != &self.facilitator && caller != &record.merchant {
            return Err(LedgerError::Unauthorized {
                operation: "release".to_string(),
                caller: caller.to_string(),
            });
        }
        if record.status != EscrowStatus::Held {
            return Err(LedgerError::WrongStatus {
                escrow_id: escrow_id.to_string(),
                operation: "release".to_string(),
                status: record.status.as_str().to_string(),
            });
        }
        let now = self.clock.now();
        if now < record.release_time {
            return Err(LedgerError::ReleaseTimeNotReached {
                escrow_id: escrow_id.to_string(),
                release_time: record.release_time.to_string(),
            });
        }

        let (merchant, amount) =
            self.settle(escrow_id, "release", EscrowStatus::Held, EscrowStatus::Released)?;
        tracing::info!(escrow_id = %escrow_id, amount, merchant = %merchant, "escrow released");
        self.record_event(LedgerEvent::Released {
            escrow_id: escrow_id.clone(),
            merchant,
            amount,
            caller: caller.clone(),
        });
        Ok(())
    }

    /// Return a record's funds to its buyer.
    ///
    /// Facilitator-only. Permitted from `Held` and — unlike release — from
    /// `Disputed`: a facilitator refund is a shortcut to the same
    /// buyer-favored outcome arbitration defaults to, and never pays the
    /// merchant.
    ///
    /// # Errors
    ///
    /// [`LedgerError::EscrowNotFound`], [`LedgerError::Unauthorized`],
    /// [`LedgerError::WrongStatus`] if the record is already settled,
    /// [`LedgerError::TransferFailed`] on custodian rejection (all state
    /// rolled back).
    pub fn refund(&mut self, caller: &AccountId, escrow_id: &EscrowId) -> Result<(), LedgerError> {
        if caller != &self.facilitator {
            return Err(LedgerError::Unauthorized {
                operation: "refund".to_string(),
                caller: caller.to_string(),
            });
        }
        let record = self.fetch(escrow_id)?;
        if !record.status.is_committed() {
            return Err(LedgerError::WrongStatus {
                escrow_id: escrow_id.to_string(),
                operation: "refund".to_string(),
                status: record.status.as_str().to_string(),
            });
        }
        let from = record.status;
        let (buyer, amount) = self.settle(escrow_id, "refund", from, EscrowStatus::Refunded)?;
        tracing::info!(escrow_id = %escrow_id, amount, buyer = %buyer, "escrow refunded");
        self.record_event(LedgerEvent::Refunded {
            escrow_id: escrow_id.clone(),
            buyer,
            amount,
            caller: caller.clone(),
        });
        Ok(())
    }

    /// Freeze a `Held` record pending arbitration.
    ///
    /// Restricted channel: `caller` must present the bound arbitration
    /// identity. The committed total is unchanged — funds stay committed,
    /// now pending arbitration.
    ///
    /// # Errors
    ///
    /// [`LedgerError::ArbiterNotBound`] / [`LedgerError::Unauthorized`] on
    /// channel violations; [`LedgerError::EscrowNotFound`];
    /// [`LedgerError::WrongStatus`] unless the record is `Held`.
    pub fn flag_dispute(
        &mut self,
        caller: &AccountId,
        escrow_id: &EscrowId,
    ) -> Result<(), LedgerError> {
        let arbiter = self.require_arbiter(caller, "flag_dispute")?;
        let record = self
            .records
            .get_mut(escrow_id)
            .ok_or_else(|| LedgerError::EscrowNotFound {
                escrow_id: escrow_id.to_string(),
            })?;
        if record.status != EscrowStatus::Held {
            return Err(LedgerError::WrongStatus {
                escrow_id: escrow_id.to_string(),
                operation: "flag_dispute".to_string(),
                status: record.status.as_str().to_string(),
            });
        }
        record.status = EscrowStatus::Disputed;
        tracing::info!(escrow_id = %escrow_id, "escrow flagged disputed");
        self.record_event(LedgerEvent::DisputeFlagged {
            escrow_id: escrow_id.clone(),
            arbiter,
        });
        Ok(())
    }

    /// Pay out a `Disputed` record to its merchant. Restricted channel.
    ///
    /// # Errors
    ///
    /// Channel violations as for [`EscrowLedger::flag_dispute`];
    /// [`LedgerError::WrongStatus`] unless the record is `Disputed`;
    /// [`LedgerError::TransferFailed`] on custodian rejection.
    pub fn release_disputed(
        &mut self,
        caller: &AccountId,
        escrow_id: &EscrowId,
    ) -> Result<(), LedgerError> {
        self.require_arbiter(caller, "release_disputed")?;
        let (merchant, amount) = self.settle(
            escrow_id,
            "release_disputed",
            EscrowStatus::Disputed,
            EscrowStatus::Released,
        )?;
        tracing::info!(escrow_id = %escrow_id, amount, merchant = %merchant, "disputed escrow released");
        self.record_event(LedgerEvent::Released {
            escrow_id: escrow_id.clone(),
            merchant,
            amount,
            caller: caller.clone(),
        });
        Ok(())
    }

    /// Return a `Disputed` record's funds to its buyer. Restricted channel.
    ///
    /// # Errors
    ///
    /// Channel violations as for [`EscrowLedger::flag_dispute`];
    /// [`LedgerError::WrongStatus`] unless the record is `Disputed`;
    /// [`LedgerError::TransferFailed`] on custodian rejection.
    pub fn refund_disputed(
        &mut self,
        caller: &AccountId,
        escrow_id: &EscrowId,
    ) -> Result<(), LedgerError> {
        self.require_arbiter(caller, "refund_disputed")?;
        let (buyer, amount) = self.settle(
            escrow_id,
            "refund_disputed",
            EscrowStatus::Disputed,
            EscrowStatus::Refunded,
        )?;
        tracing::info!(escrow_id = %escrow_id, amount, buyer = %buyer, "disputed escrow refunded");
        self.record_event(LedgerEvent::Refunded {
            escrow_id: escrow_id.clone(),
            buyer,
            amount,
            caller: caller.clone(),
        });
        Ok(())
    }

    // ── Query surface ──────────────────────────────────────────────────

    /// Look up an escrow record. Returns a clone; absence means the
    /// identifier has never been used.
    pub fn inspect(&self, escrow_id: &EscrowId) -> Option<EscrowRecord> {
        self.records.get(escrow_id).cloned()
    }

    /// Running sum of amounts in `Held` or `Disputed` records.
    pub fn committed_total(&self) -> u64 {
        self.committed_total
    }

    /// Custody actually on hand at the custodian.
    pub fn custody_on_hand(&self) -> u64 {
        self.custodian.balance_of(&self.vault)
    }

    /// Custody on hand versus committed total, for external conservation
    /// checks.
    pub fn reconcile(&self) -> Reconciliation {
        Reconciliation {
            custody_on_hand: self.custody_on_hand(),
            committed_total: self.committed_total,
        }
    }

    /// The facilitator identity fixed at construction.
    pub fn facilitator(&self) -> &AccountId {
        &self.facilitator
    }

    /// The append-only audit log.
    pub fn events(&self) -> &[EventRecord<LedgerEvent>] {
        &self.events
    }

    // ── Internal ───────────────────────────────────────────────────────

    fn fetch(&self, escrow_id: &EscrowId) -> Result<&EscrowRecord, LedgerError> {
        self.records
            .get(escrow_id)
            .ok_or_else(|| LedgerError::EscrowNotFound {
                escrow_id: escrow_id.to_string(),
            })
    }

    fn require_arbiter(
        &self,
        caller: &AccountId,
        operation: &str,
    ) -> Result<AccountId, LedgerError> {
        let arbiter = self.arbiter.as_ref().ok_or(LedgerError::ArbiterNotBound)?;
        if caller != arbiter {
            return Err(LedgerError::Unauthorized {
                operation: operation.to_string(),
                caller: caller.to_string(),
            });
        }
        Ok(arbiter.clone())
    }

    /// Move a record to a terminal status and pay out.
    ///
    /// Effects before interaction: the status flip and committed-total
    /// decrement are applied first, then the custodian is invoked. A
    /// custodian failure rolls both back, so the operation aborts with no
    /// partial state.
    fn settle(
        &mut self,
        escrow_id: &EscrowId,
        operation: &str,
        required: EscrowStatus,
        terminal: EscrowStatus,
    ) -> Result<(AccountId, u64), LedgerError> {
        let record = self
            .records
            .get_mut(escrow_id)
            .ok_or_else(|| LedgerError::EscrowNotFound {
                escrow_id: escrow_id.to_string(),
            })?;
        if record.status != required {
            return Err(LedgerError::WrongStatus {
                escrow_id: escrow_id.to_string(),
                operation: operation.to_string(),
                status: record.status.as_str().to_string(),
            });
        }
        let amount = record.amount;
        let prior = record.status;
        let payee = match terminal {
            EscrowStatus::Released => record.merchant.clone(),
            _ => record.buyer.clone(),
        };

        record.status = terminal;
        self.committed_total = self.committed_total.saturating_sub(amount);

        if !self.custodian.transfer(&payee, amount) {
            if let Some(record) = self.records.get_mut(escrow_id) {
                record.status = prior;
            }
            self.committed_total = self.committed_total.saturating_add(amount);
            tracing::warn!(escrow_id = %escrow_id, amount, payee = %payee, "custodian transfer failed — operation rolled back");
            return Err(LedgerError::TransferFailed {
                escrow_id: escrow_id.to_string(),
                payee: payee.to_string(),
                amount,
            });
        }
        Ok((payee, amount))
    }

    fn record_event(&mut self, payload: LedgerEvent) {
        let now = self.clock.now();
        self.events.push(EventRecord::record(now, payload));
    }
}
