//! # Asset Custodian
//!
//! The external capability that actually holds and moves the fungible
//! asset. The ledger requires exactly two primitives: a transfer that
//! either fully succeeds or reports failure (never a partial transfer),
//! and a balance query. The custodian's answer is observable synchronously
//! before the ledger's own operation returns.

use std::collections::HashMap;

use pactum_core::AccountId;

/// The transfer-or-fail capability the escrow ledger drives.
///
/// Implementations must never partially fulfil a transfer: on `true` the
/// full amount has moved, on `false` nothing has.
pub trait AssetCustodian: Send {
    /// Move `amount` units out of custody to `to`. Returns whether the
    /// transfer succeeded in full.
    fn transfer(&mut self, to: &AccountId, amount: u64) -> bool;

    /// The balance currently held by `holder`.
    fn balance_of(&self, holder: &AccountId) -> u64;
}

/// An in-memory custodian for tests and local wiring.
///
/// Holds per-account balances and a designated vault account that outgoing
/// transfers draw from. Deposits into the vault are performed out-of-band
/// via [`VaultCustodian::fund_vault`] — mirroring a real custodian, where
/// value arrives in custody before the ledger is asked to commit it.
#[derive(Debug)]
pub struct VaultCustodian {
    vault: AccountId,
    balances: HashMap<AccountId, u64>,
}

impl VaultCustodian {
    /// Create a custodian whose outgoing transfers draw from `vault`.
    pub fn new(vault: AccountId) -> Self {
        Self {
            vault,
            balances: HashMap::new(),
        }
    }

    /// Place `amount` units into the vault account.
    pub fn fund_vault(&mut self, amount: u64) {
        let balance = self.balances.entry(self.vault.clone()).or_insert(0);
        *balance = balance.saturating_add(amount);
    }
}

impl AssetCustodian for VaultCustodian {
    fn transfer(&mut self, to: &AccountId, amount: u64) -> bool {
        let Some(vault_balance) = self.balances.get_mut(&self.vault) else {
            return false;
        };
        if *vault_balance < amount {
            return false;
        }
        *vault_balance -= amount;
        let payee_balance = self.balances.entry(to.clone()).or_insert(0);
        *payee_balance = payee_balance.saturating_add(amount);
        true
    }

    fn balance_of(&self, holder: &AccountId) -> u64 {
        self.balances.get(holder).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vault() -> AccountId {
        AccountId::new("vault").unwrap()
    }

    fn payee() -> AccountId {
        AccountId::new("payee").unwrap()
    }

    #[test]
    fn fund_vault_raises_balance() {
        let mut custodian = VaultCustodian::new(vault());
        custodian.fund_vault(500);
        assert_eq!(custodian.balance_of(&vault()), 500);
    }

    #[test]
    fn transfer_moves_full_amount() {
        let mut custodian = VaultCustodian::new(vault());
        custodian.fund_vault(500);
        assert!(custodian.transfer(&payee(), 200));
        assert_eq!(custodian.balance_of(&vault()), 300);
        assert_eq!(custodian.balance_of(&payee()), 200);
    }

    #[test]
    fn transfer_beyond_balance_fails_without_moving_anything() {
        let mut custodian = VaultCustodian::new(vault());
        custodian.fund_vault(100);
        assert!(!custodian.transfer(&payee(), 200));
        assert_eq!(custodian.balance_of(&vault()), 100);
        assert_eq!(custodian.balance_of(&payee()), 0);
    }

    #[test]
    fn transfer_from_unfunded_vault_fails() {
        let mut custodian = VaultCustodian::new(vault());
        assert!(!custodian.transfer(&payee(), 1));
    }

    #[test]
    fn unknown_holder_has_zero_balance() {
        let custodian = VaultCustodian::new(vault());
        assert_eq!(custodian.balance_of(&payee()), 0);
    }
}
