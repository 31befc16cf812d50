//! Treasury Control
//!
//! The shared balance funds every payout and is the only thing the
//! authority can withdraw from. Value leaves the ledger only through a
//! [`ValueTransfer`], called after the ledger has already written its own
//! effects.
//!
//! Payout policy is **pooled**: nothing is reserved for winning bets that
//! have not been claimed yet, so withdrawals or earlier claims can leave a
//! later winner unpaid (`InsufficientFunds`, retryable once the pool is
//! topped up). [`Ledger::outstanding_liability`] reports the exposure.

use std::collections::BTreeMap;
use tracing::{info, warn};

use crate::core::amount::Amount;
use crate::core::identity::Identity;
use super::context::CallContext;
use super::error::{LedgerError, LedgerResult, TransferError};
use super::events::LedgerEventData;
use super::simulator::EntropySource;
use super::state::Ledger;

/// External primitive that moves value out of the pool.
pub trait ValueTransfer {
    /// Pay `amount` to `to`.
    fn transfer(&mut self, to: &Identity, amount: Amount) -> Result<(), TransferError>;
}

/// In-memory account balances credited by transfers.
#[derive(Clone, Debug, Default)]
pub struct AccountBook {
    balances: BTreeMap<Identity, Amount>,
}

impl AccountBook {
    /// Empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Balance of `who` (0 if never credited).
    pub fn balance_of(&self, who: &Identity) -> Amount {
        self.balances.get(who).copied().unwrap_or(0)
    }

    /// Sum of all credited balances.
    pub fn total(&self) -> Amount {
        self.balances.values().fold(0, |acc, v| acc.saturating_add(*v))
    }
}

impl ValueTransfer for AccountBook {
    fn transfer(&mut self, to: &Identity, amount: Amount) -> Result<(), TransferError> {
        let entry = self.balances.entry(*to).or_insert(0);
        *entry = entry
            .checked_add(amount)
            .ok_or_else(|| TransferError(format!("balance overflow for {}", to)))?;
        Ok(())
    }
}

impl<E: EntropySource> Ledger<E> {
    /// Add the attached value to the shared balance.
    ///
    /// Open to any caller; this is how the house bankroll gets seeded.
    pub fn fund(&mut self, ctx: &CallContext) -> LedgerResult<Amount> {
        let amount = ctx.value;
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }
        let balance = self.state.balance.checked_add(amount).ok_or(LedgerError::Overflow)?;

        self.state.balance = balance;
        self.emit(
            &ctx.block,
            vec![LedgerEventData::PoolFunded { from: ctx.caller, amount }],
        );
        info!("Pool funded by {} with {} (balance {})", ctx.caller.short(), amount, balance);

        Ok(balance)
    }

    /// Withdraw `amount` from the shared balance to the authority.
    ///
    /// Only the authority may call this, and only up to the current
    /// balance. Balance is debited before the transfer; if the transfer
    /// fails the debit is undone.
    pub fn withdraw<T>(
        &mut self,
        ctx: &CallContext,
        amount: Amount,
        transfer: &mut T,
    ) -> LedgerResult<()>
    where
        T: ValueTransfer + ?Sized,
    {
        ctx.reject_value()?;

        if ctx.caller != self.state.authority {
            warn!("Withdrawal of {} refused for non-authority {}", amount, ctx.caller);
            return Err(LedgerError::NotAuthority);
        }

        let available = self.state.balance;
        if amount > available {
            return Err(LedgerError::InsufficientFunds { needed: amount, available });
        }

        // Effects
        self.state.balance = available - amount;

        // Interaction
        if let Err(e) = transfer.transfer(&ctx.caller, amount) {
            self.state.balance = available;
            warn!("Withdrawal transfer failed, rolled back: {}", e);
            return Err(e.into());
        }

        self.emit(
            &ctx.block,
            vec![LedgerEventData::Withdrawal { authority: ctx.caller, amount }],
        );
        info!("Authority withdrew {} (balance {})", amount, self.state.balance);

        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::amount::UNIT;
    use crate::ledger::test_support::*;

    /// Transfer primitive that refuses every payment.
    pub(crate) struct RejectingTransfer;

    impl ValueTransfer for RejectingTransfer {
        fn transfer(&mut self, _to: &Identity, _amount: Amount) -> Result<(), TransferError> {
            Err(TransferError("recipient refused".into()))
        }
    }

    #[test]
    fn test_fund() {
        let (mut ledger, block) = deploy();
        assert_eq!(ledger.fund(&call(owner(), block).with_value(5 * UNIT)), Ok(5 * UNIT));
        assert_eq!(ledger.fund(&call(alice(), block).with_value(UNIT)), Ok(6 * UNIT));
        assert_eq!(ledger.balance(), 6 * UNIT);
        assert_eq!(ledger.fund(&call(alice(), block)), Err(LedgerError::ZeroAmount));
    }

    #[test]
    fn test_withdraw_by_authority() {
        let (mut ledger, block) = deploy();
        fund(&mut ledger, block, 3 * UNIT);
        let mut book = book();

        ledger.withdraw(&call(owner(), block), UNIT / 2, &mut book).unwrap();
        assert_eq!(ledger.balance(), 3 * UNIT - UNIT / 2);
        assert_eq!(book.balance_of(&owner()), UNIT / 2);

        let last = ledger.events().all().last().unwrap();
        assert_eq!(last.data, LedgerEventData::Withdrawal { authority: owner(), amount: UNIT / 2 });
    }

    #[test]
    fn test_withdraw_whole_balance() {
        let (mut ledger, block) = deploy();
        fund(&mut ledger, block, UNIT);
        let mut book = book();
        ledger.withdraw(&call(owner(), block), UNIT, &mut book).unwrap();
        assert_eq!(ledger.balance(), 0);
    }

    #[test]
    fn test_withdraw_by_other_fails() {
        let (mut ledger, block) = deploy();
        fund(&mut ledger, block, 3 * UNIT);
        let mut book = book();
        let events = ledger.events().len();

        let err = ledger.withdraw(&call(alice(), block), UNIT, &mut book).unwrap_err();
        assert_eq!(err, LedgerError::NotAuthority);
        assert_eq!(ledger.balance(), 3 * UNIT);
        assert_eq!(book.total(), 0);
        assert_eq!(ledger.events().len(), events);
    }

    #[test]
    fn test_withdraw_more_than_balance_fails() {
        let (mut ledger, block) = deploy();
        fund(&mut ledger, block, UNIT);
        let mut book = book();

        let err = ledger.withdraw(&call(owner(), block), UNIT + 1, &mut book).unwrap_err();
        assert_eq!(err, LedgerError::InsufficientFunds { needed: UNIT + 1, available: UNIT });
        assert_eq!(ledger.balance(), UNIT);
        assert_eq!(book.balance_of(&owner()), 0);
    }

    #[test]
    fn test_withdraw_rolls_back_on_transfer_failure() {
        let (mut ledger, block) = deploy();
        fund(&mut ledger, block, UNIT);
        let before = ledger.compute_hash();
        let events = ledger.events().len();

        let err = ledger.withdraw(&call(owner(), block), UNIT, &mut RejectingTransfer).unwrap_err();
        assert_eq!(err.kind(), crate::ledger::error::ErrorKind::Transfer);
        assert_eq!(ledger.balance(), UNIT);
        assert_eq!(ledger.compute_hash(), before);
        assert_eq!(ledger.events().len(), events);
    }

    #[test]
    fn test_withdraw_rejects_attached_value() {
        let (mut ledger, block) = deploy();
        let mut book = book();
        let err = ledger.withdraw(&call(owner(), block).with_value(1), 0, &mut book).unwrap_err();
        assert_eq!(err, LedgerError::UnexpectedValue(1));
    }

    #[test]
    fn test_account_book_overflow() {
        let mut book = AccountBook::new();
        book.transfer(&alice(), Amount::MAX).unwrap();
        assert!(book.transfer(&alice(), 1).is_err());
        assert_eq!(book.balance_of(&alice()), Amount::MAX);
    }
}
