//! Allocation/withdrawal bookkeeping against one pooled custody balance.
//!
//! Invariants kept by every successful call:
//! - total_allocated - total_withdrawn <= custody balance
//! - account.withdrawn <= unlocked_amount(account.allocated, now)
//! - allocated and withdrawn never decrease

use anchor_lang::prelude::*;

use crate::error::KeeperError;
use crate::state::InvestorAccount;
use crate::utils::{Custody, Schedule};

/// Aggregate counters across all investors of one keeper.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Ledger {
    pub total_allocated: u64,
    pub total_withdrawn: u64,
}

impl Ledger {
    pub const SIZE: usize = 8 + 8;

    /// Allocated but not yet withdrawn; the share of custody already committed.
    pub fn outstanding(&self) -> std::result::Result<u64, KeeperError> {
        self.total_allocated
            .checked_sub(self.total_withdrawn)
            .ok_or(KeeperError::MathOverflow)
    }

    pub fn credit(
        &mut self,
        account: &mut InvestorAccount,
        investor: &Pubkey,
        amount: u64,
        custody_balance: u64,
    ) -> std::result::Result<(), KeeperError> {
        if *investor == Pubkey::default() {
            return Err(KeeperError::InvalidRecipient);
        }
        if amount == 0 {
            return Err(KeeperError::InvalidAmount);
        }
        if account.is_bound() && account.investor != *investor {
            return Err(KeeperError::InvalidRecipient);
        }

        let committed = self
            .outstanding()?
            .checked_add(amount)
            .ok_or(KeeperError::InsufficientCustody)?;
        if committed > custody_balance {
            return Err(KeeperError::InsufficientCustody);
        }

        let allocated = account
            .allocated
            .checked_add(amount)
            .ok_or(KeeperError::MathOverflow)?;
        let total_allocated = self
            .total_allocated
            .checked_add(amount)
            .ok_or(KeeperError::MathOverflow)?;

        account.investor = *investor;
        account.allocated = allocated;
        self.total_allocated = total_allocated;
        Ok(())
    }

    /// unlocked_amount(allocated, now) - withdrawn, floored at zero.
    pub fn withdrawable(
        account: &InvestorAccount,
        schedule: &Schedule,
        now: i64,
    ) -> std::result::Result<u64, KeeperError> {
        let unlocked = schedule.unlocked_amount(account.allocated, now)?;
        Ok(unlocked.saturating_sub(account.withdrawn))
    }

    /// Draws `amount` from `account` and sends it to `destination`. Counters
    /// are only written once the transfer went through.
    #[allow(clippy::too_many_arguments)]
    pub fn debit<C: Custody>(
        &mut self,
        account: &mut InvestorAccount,
        schedule: &Schedule,
        destination: &Pubkey,
        amount: u64,
        now: i64,
        custody: &mut C,
    ) -> std::result::Result<(), KeeperError> {
        if *destination == Pubkey::default() {
            return Err(KeeperError::InvalidRecipient);
        }
        if amount == 0 {
            return Err(KeeperError::InvalidAmount);
        }
        if amount > Self::withdrawable(account, schedule, now)? {
            return Err(KeeperError::ExceedsWithdrawable);
        }

        let withdrawn = account
            .withdrawn
            .checked_add(amount)
            .ok_or(KeeperError::MathOverflow)?;
        let total_withdrawn = self
            .total_withdrawn
            .checked_add(amount)
            .ok_or(KeeperError::MathOverflow)?;

        custody.send(destination, amount)?;

        account.withdrawn = withdrawn;
        self.total_withdrawn = total_withdrawn;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::MemoryCustody;

    const NOW: i64 = 1_700_000_000;
    const DAY: i64 = 86_400;

    fn key(b: u8) -> Pubkey {
        Pubkey::new_from_array([b; 32])
    }

    fn schedule() -> Schedule {
        Schedule::new(NOW, NOW + DAY, NOW + 11 * DAY).unwrap()
    }

    #[test]
    fn credit_binds_and_accumulates() {
        let mut ledger = Ledger::default();
        let mut acct = InvestorAccount::default();
        ledger.credit(&mut acct, &key(1), 4, 10).unwrap();
        ledger.credit(&mut acct, &key(1), 6, 10).unwrap();
        assert_eq!(acct.investor, key(1));
        assert_eq!(acct.allocated, 10);
        assert_eq!(acct.withdrawn, 0);
        assert_eq!(ledger.total_allocated, 10);
        assert_eq!(ledger.outstanding().unwrap(), 10);
    }

    #[test]
    fn credit_rejects_null_zero_and_uncustodied() {
        let mut ledger = Ledger::default();
        let mut acct = InvestorAccount::default();

        let r = ledger.credit(&mut acct, &Pubkey::default(), 10, 10);
        assert!(matches!(r, Err(KeeperError::InvalidRecipient)));
        // Null address is rejected regardless of custody level.
        let r = ledger.credit(&mut acct, &Pubkey::default(), 10, u64::MAX);
        assert!(matches!(r, Err(KeeperError::InvalidRecipient)));

        let r = ledger.credit(&mut acct, &key(1), 0, 10);
        assert!(matches!(r, Err(KeeperError::InvalidAmount)));

        let r = ledger.credit(&mut acct, &key(1), 20, 10);
        assert!(matches!(r, Err(KeeperError::InsufficientCustody)));

        assert_eq!(acct, InvestorAccount::default());
        assert_eq!(ledger, Ledger::default());
    }

    #[test]
    fn credit_rejects_foreign_record() {
        let mut ledger = Ledger::default();
        let mut acct = InvestorAccount::default();
        ledger.credit(&mut acct, &key(1), 1, 10).unwrap();
        let r = ledger.credit(&mut acct, &key(2), 1, 10);
        assert!(matches!(r, Err(KeeperError::InvalidRecipient)));
        assert_eq!(acct.allocated, 1);
    }

    #[test]
    fn custody_is_shared_across_investors() {
        let mut ledger = Ledger::default();
        let mut a = InvestorAccount::default();
        let mut b = InvestorAccount::default();
        ledger.credit(&mut a, &key(1), 6, 10).unwrap();
        let r = ledger.credit(&mut b, &key(2), 5, 10);
        assert!(matches!(r, Err(KeeperError::InsufficientCustody)));
        ledger.credit(&mut b, &key(2), 4, 10).unwrap();
        assert_eq!(ledger.outstanding().unwrap(), 10);
        let r = ledger.credit(&mut a, &key(1), 1, 10);
        assert!(matches!(r, Err(KeeperError::InsufficientCustody)));
    }

    #[test]
    fn withdrawals_release_commitment_with_custody() {
        let s = schedule();
        let mut ledger = Ledger::default();
        let mut custody = MemoryCustody::holding(10);
        let mut a = InvestorAccount::default();
        ledger.credit(&mut a, &key(1), 10, custody.balance()).unwrap();
        ledger
            .debit(&mut a, &s, &key(9), 10, s.unlock_end, &mut custody)
            .unwrap();
        assert_eq!(custody.held, 0);
        assert_eq!(ledger.outstanding().unwrap(), 0);

        // Topping up custody makes room again.
        custody.held += 3;
        let mut b = InvestorAccount::default();
        ledger.credit(&mut b, &key(2), 3, custody.balance()).unwrap();
        let r = ledger.credit(&mut b, &key(2), 1, custody.balance());
        assert!(matches!(r, Err(KeeperError::InsufficientCustody)));
    }

    #[test]
    fn withdrawable_of_unknown_investor_is_zero() {
        let s = schedule();
        let acct = InvestorAccount::default();
        assert_eq!(Ledger::withdrawable(&acct, &s, s.unlock_end).unwrap(), 0);
    }

    #[test]
    fn withdrawable_tracks_schedule_and_withdrawals() {
        let s = schedule();
        let mut ledger = Ledger::default();
        let mut custody = MemoryCustody::holding(1_000);
        let mut acct = InvestorAccount::default();
        ledger.credit(&mut acct, &key(1), 1_000, custody.balance()).unwrap();

        assert_eq!(Ledger::withdrawable(&acct, &s, s.unlock_start).unwrap(), 0);
        assert_eq!(Ledger::withdrawable(&acct, &s, s.unlock_end).unwrap(), 1_000);

        let half = s.unlock_start + 5 * DAY;
        assert_eq!(Ledger::withdrawable(&acct, &s, half).unwrap(), 500);
        ledger
            .debit(&mut acct, &s, &key(9), 200, half, &mut custody)
            .unwrap();
        assert_eq!(Ledger::withdrawable(&acct, &s, half).unwrap(), 300);
        assert_eq!(Ledger::withdrawable(&acct, &s, s.unlock_end).unwrap(), 800);
        assert_eq!(custody.sent, vec![(key(9), 200)]);
    }

    #[test]
    fn debit_guards() {
        let s = schedule();
        let mut ledger = Ledger::default();
        let mut custody = MemoryCustody::holding(500);
        let mut acct = InvestorAccount::default();
        ledger.credit(&mut acct, &key(1), 123, custody.balance()).unwrap();
        let end = s.unlock_end + 1;

        let r = ledger.debit(&mut acct, &s, &Pubkey::default(), 10, end, &mut custody);
        assert!(matches!(r, Err(KeeperError::InvalidRecipient)));
        let r = ledger.debit(&mut acct, &s, &key(9), 0, end, &mut custody);
        assert!(matches!(r, Err(KeeperError::InvalidAmount)));
        let r = ledger.debit(&mut acct, &s, &key(9), 124, end, &mut custody);
        assert!(matches!(r, Err(KeeperError::ExceedsWithdrawable)));
        // Still frozen before the window opens.
        let r = ledger.debit(&mut acct, &s, &key(9), 12, NOW, &mut custody);
        assert!(matches!(r, Err(KeeperError::ExceedsWithdrawable)));

        assert_eq!(acct.withdrawn, 0);
        assert!(custody.sent.is_empty());
        ledger.debit(&mut acct, &s, &key(9), 123, end, &mut custody).unwrap();
        assert_eq!(acct.withdrawn, 123);
    }

    #[test]
    fn failed_transfer_leaves_no_trace() {
        let s = schedule();
        let mut ledger = Ledger::default();
        let mut custody = MemoryCustody::failing(100);
        let mut acct = InvestorAccount::default();
        ledger.credit(&mut acct, &key(1), 100, custody.balance()).unwrap();
        let before = (acct.clone(), ledger);

        let r = ledger.debit(&mut acct, &s, &key(9), 50, s.unlock_end, &mut custody);
        assert!(matches!(r, Err(KeeperError::InsufficientCustody)));
        assert_eq!((acct, ledger), before);
        assert_eq!(custody.held, 100);
    }

    #[test]
    fn never_over_withdraws_across_the_window() {
        let s = schedule();
        let mut ledger = Ledger::default();
        let mut custody = MemoryCustody::holding(u64::MAX);
        let mut acct = InvestorAccount::default();
        let allocated = 987_654_321_987u64;
        ledger.credit(&mut acct, &key(1), allocated, custody.balance()).unwrap();

        let mut t = s.unlock_start - DAY;
        let mut prev_withdrawn = 0;
        while t <= s.unlock_end + DAY {
            let available = Ledger::withdrawable(&acct, &s, t).unwrap();
            // Greedy investor: try one more than allowed first.
            let r = ledger.debit(&mut acct, &s, &key(9), available + 1, t, &mut custody);
            assert!(matches!(r, Err(KeeperError::ExceedsWithdrawable)));
            if available > 0 {
                ledger.debit(&mut acct, &s, &key(9), available, t, &mut custody).unwrap();
            }
            assert!(acct.withdrawn <= s.unlocked_amount(acct.allocated, t).unwrap());
            assert!(acct.withdrawn >= prev_withdrawn);
            assert_eq!(acct.allocated, allocated);
            prev_withdrawn = acct.withdrawn;
            t += 7_919;
        }
        assert_eq!(acct.withdrawn, allocated);
        assert_eq!(ledger.outstanding().unwrap(), 0);
    }
}
