//! Shared wiring for the integration suite: a funded ledger and an
//! arbitration desk on one manual clock, with the standard window
//! configuration.

// Each test binary uses a different slice of this module.
#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

use pactum_arbitration::{ArbitrationDesk, ArbitrationWindows};
use pactum_core::{AccountId, Clock, EscrowId, ManualClock, Timestamp};
use pactum_ledger::{AssetCustodian, EscrowLedger, VaultCustodian};

pub fn account(name: &str) -> AccountId {
    AccountId::new(name).unwrap()
}

pub fn escrow(name: &str) -> EscrowId {
    EscrowId::new(name).unwrap()
}

pub fn start() -> Timestamp {
    Timestamp::from_datetime(
        DateTime::parse_from_rfc3339("2026-01-15T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc),
    )
}

/// A custodian the harness keeps a handle to after the ledger takes
/// ownership, so tests can assert which party ended up with the funds.
pub struct SharedCustodian(Arc<Mutex<VaultCustodian>>);

impl AssetCustodian for SharedCustodian {
    fn transfer(&mut self, to: &AccountId, amount: u64) -> bool {
        self.0.lock().transfer(to, amount)
    }

    fn balance_of(&self, holder: &AccountId) -> u64 {
        self.0.lock().balance_of(holder)
    }
}

pub struct Harness {
    pub ledger: Arc<Mutex<EscrowLedger>>,
    pub desk: ArbitrationDesk,
    pub clock: ManualClock,
    pub custodian: Arc<Mutex<VaultCustodian>>,
}

impl Harness {
    /// Ledger funded with `funding` units, arbitration channel bound,
    /// desk wired, everything on one manual clock starting at
    /// 2026-01-15T12:00:00Z with the standard windows.
    pub fn new(funding: u64) -> Self {
        // Idempotent across test binaries; output captured per test.
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let clock = ManualClock::starting_at(start());
        let mut custodian = VaultCustodian::new(account("vault"));
        custodian.fund_vault(funding);
        let custodian = Arc::new(Mutex::new(custodian));
        let mut ledger = EscrowLedger::new(
            account("facilitator"),
            account("vault"),
            Box::new(SharedCustodian(Arc::clone(&custodian))),
            Arc::new(clock.clone()) as Arc<dyn Clock>,
        );
        ledger
            .bind_arbiter(&account("facilitator"), account("desk"))
            .unwrap();
        let ledger = Arc::new(Mutex::new(ledger));
        let desk = ArbitrationDesk::new(
            account("admin"),
            account("desk"),
            ArbitrationWindows::standard(),
            Arc::clone(&ledger),
            Arc::new(clock.clone()) as Arc<dyn Clock>,
        );
        Self { ledger, desk, clock, custodian }
    }

    /// The balance `name` currently holds at the custodian.
    pub fn balance_of(&self, name: &str) -> u64 {
        self.custodian.lock().balance_of(&account(name))
    }

    /// Deposit `amount` under `id` for buyer/merchant with the release
    /// time `release_after` from now.
    pub fn deposit(&self, id: &str, amount: u64, release_after: Duration) {
        let now = self.clock.now();
        self.ledger
            .lock()
            .deposit(
                &account("facilitator"),
                escrow(id),
                account("buyer"),
                account("merchant"),
                amount,
                now.plus(release_after),
            )
            .unwrap();
    }
}
