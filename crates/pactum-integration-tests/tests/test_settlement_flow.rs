//! Undisputed settlement flows across the ledger surface.
//!
//! Covers the happy path (deposit, wait out the time lock, release to the
//! merchant), the time-lock gate at its exact boundary, and the custody
//! cover check that rejects deposits the vault cannot back.

mod common;

use chrono::Duration;
use common::{account, escrow, Harness};
use pactum_ledger::{EscrowStatus, LedgerError};

#[test]
fn deposit_then_release_pays_the_merchant_in_full() {
    let h = Harness::new(1_000);
    h.deposit("order-1", 250, Duration::days(7));

    {
        let ledger = h.ledger.lock();
        assert_eq!(ledger.committed_total(), 250);
        assert!(ledger.reconcile().is_covered());
    }

    h.clock.advance(Duration::days(7));
    h.ledger
        .lock()
        .release(&account("facilitator"), &escrow("order-1"))
        .unwrap();

    {
        let ledger = h.ledger.lock();
        let record = ledger.inspect(&escrow("order-1")).unwrap();
        assert_eq!(record.status, EscrowStatus::Released);
        assert_eq!(ledger.committed_total(), 0);
        assert_eq!(ledger.custody_on_hand(), 750);
    }
    // The 250 landed with the merchant, and only the merchant.
    assert_eq!(h.balance_of("merchant"), 250);
    assert_eq!(h.balance_of("buyer"), 0);
}

#[test]
fn release_gate_opens_exactly_at_the_release_time() {
    let h = Harness::new(1_000);
    h.deposit("order-1", 100, Duration::days(7));

    // One second early: rejected, record untouched.
    h.clock.advance(Duration::days(7) - Duration::seconds(1));
    let err = h
        .ledger
        .lock()
        .release(&account("facilitator"), &escrow("order-1"))
        .unwrap_err();
    assert!(matches!(err, LedgerError::ReleaseTimeNotReached { .. }));
    assert_eq!(
        h.ledger.lock().inspect(&escrow("order-1")).unwrap().status,
        EscrowStatus::Held
    );

    // Exactly at the boundary: permitted.
    h.clock.advance(Duration::seconds(1));
    h.ledger
        .lock()
        .release(&account("facilitator"), &escrow("order-1"))
        .unwrap();
}

#[test]
fn merchant_self_release_honors_the_same_gate() {
    let h = Harness::new(1_000);
    h.deposit("order-1", 100, Duration::days(7));

    let err = h
        .ledger
        .lock()
        .release(&account("merchant"), &escrow("order-1"))
        .unwrap_err();
    assert!(matches!(err, LedgerError::ReleaseTimeNotReached { .. }));

    h.clock.advance(Duration::days(7));
    h.ledger
        .lock()
        .release(&account("merchant"), &escrow("order-1"))
        .unwrap();
}

#[test]
fn deposit_exceeding_custody_leaves_no_trace() {
    let h = Harness::new(300);
    h.deposit("order-1", 200, Duration::days(7));

    // 200 of 300 committed; a further 200 cannot be covered.
    let err = h
        .ledger
        .lock()
        .deposit(
            &account("facilitator"),
            escrow("order-2"),
            account("buyer"),
            account("merchant"),
            200,
            common::start().plus(Duration::days(7)),
        )
        .unwrap_err();
    assert!(matches!(err, LedgerError::InsufficientCustody { .. }));

    let ledger = h.ledger.lock();
    assert!(ledger.inspect(&escrow("order-2")).is_none());
    assert_eq!(ledger.committed_total(), 200);
    assert!(ledger.reconcile().is_covered());
}

#[test]
fn settled_records_reject_every_further_settlement() {
    let h = Harness::new(1_000);
    h.deposit("order-1", 100, Duration::zero());
    h.ledger
        .lock()
        .release(&account("facilitator"), &escrow("order-1"))
        .unwrap();

    let mut ledger = h.ledger.lock();
    let release_again = ledger
        .release(&account("facilitator"), &escrow("order-1"))
        .unwrap_err();
    assert!(matches!(release_again, LedgerError::WrongStatus { .. }));
    let refund_after = ledger
        .refund(&account("facilitator"), &escrow("order-1"))
        .unwrap_err();
    assert!(matches!(refund_after, LedgerError::WrongStatus { .. }));
    // Exactly one payout left custody, and it went to the merchant.
    assert_eq!(ledger.custody_on_hand(), 900);
    drop(ledger);
    assert_eq!(h.balance_of("merchant"), 100);
    assert_eq!(h.balance_of("buyer"), 0);
}

#[test]
fn independent_escrows_settle_independently() {
    let h = Harness::new(1_000);
    h.deposit("order-1", 100, Duration::zero());
    h.deposit("order-2", 300, Duration::zero());

    h.ledger
        .lock()
        .release(&account("facilitator"), &escrow("order-1"))
        .unwrap();
    h.ledger
        .lock()
        .refund(&account("facilitator"), &escrow("order-2"))
        .unwrap();

    {
        let ledger = h.ledger.lock();
        assert_eq!(
            ledger.inspect(&escrow("order-1")).unwrap().status,
            EscrowStatus::Released
        );
        assert_eq!(
            ledger.inspect(&escrow("order-2")).unwrap().status,
            EscrowStatus::Refunded
        );
        assert_eq!(ledger.committed_total(), 0);
        assert_eq!(ledger.custody_on_hand(), 600);
    }
    // Release paid the merchant, refund paid the buyer.
    assert_eq!(h.balance_of("merchant"), 100);
    assert_eq!(h.balance_of("buyer"), 300);
}
