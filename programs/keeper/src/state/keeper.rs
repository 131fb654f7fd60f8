use anchor_lang::prelude::*;

use crate::error::KeeperError;
use crate::state::{AccessGuard, InvestorAccount, Ledger};
use crate::utils::{audit, AuditKind, AuditRecord, Custody, Schedule};

/// Keeper PDA: owns the schedule, the aggregate ledger and the administrator
/// record. All allocation and withdrawal traffic for one mint goes through it.
#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct Keeper {
    /// Escrowed token mint.
    pub mint: Pubkey,
    /// Vault token account (PDA) holding custody.
    pub vault: Pubkey,
    pub guard: AccessGuard,
    pub schedule: Schedule,
    pub ledger: Ledger,
    /// Clock reading at construction.
    pub created_at: i64,
    /// Number of ledger mutations folded into `audit_digest`.
    pub audit_sequence: u64,
    pub audit_digest: [u8; 32],
    pub bump: u8,
    pub vault_bump: u8,
}

/// Outcome of a successful allocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Allocation {
    pub investor: Pubkey,
    pub amount: u64,
    pub allocated: u64,
    pub outstanding: u64,
    pub audit_sequence: u64,
    pub audit_digest: [u8; 32],
}

/// Outcome of a successful withdrawal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Withdrawal {
    pub investor: Pubkey,
    pub destination: Pubkey,
    pub amount: u64,
    pub allocated: u64,
    pub withdrawn: u64,
    pub audit_sequence: u64,
    pub audit_digest: [u8; 32],
}

/// Point-in-time view of one investor's position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Quote {
    pub allocated: u64,
    pub unlocked: u64,
    pub withdrawn: u64,
    pub withdrawable: u64,
}

impl Keeper {
    pub const SIZE: usize =
        32 + // mint
        32 + // vault
        AccessGuard::SIZE +
        Schedule::SIZE +
        Ledger::SIZE +
        8 +  // created_at
        8 +  // audit_sequence
        32 + // audit_digest
        1 +  // bump
        1;   // vault_bump

    /// Builds a keeper, validating the unlock window against `created_at`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        mint: Pubkey,
        vault: Pubkey,
        admin: Pubkey,
        created_at: i64,
        unlock_start: i64,
        unlock_end: i64,
        bump: u8,
        vault_bump: u8,
    ) -> std::result::Result<Self, KeeperError> {
        if admin == Pubkey::default() {
            return Err(KeeperError::InvalidRecipient);
        }
        let schedule = Schedule::new(created_at, unlock_start, unlock_end)?;
        Ok(Self {
            mint,
            vault,
            guard: AccessGuard::new(admin),
            schedule,
            ledger: Ledger::default(),
            created_at,
            audit_sequence: 0,
            audit_digest: audit::genesis(&mint),
            bump,
            vault_bump,
        })
    }

    /// Administrator-only. Credits `amount` to `investor` if custody backs it.
    #[allow(clippy::too_many_arguments)]
    pub fn allocate<C: Custody>(
        &mut self,
        caller: &Pubkey,
        account: &mut InvestorAccount,
        investor: &Pubkey,
        amount: u64,
        custody: &C,
        now: i64,
    ) -> std::result::Result<Allocation, KeeperError> {
        self.guard.require_administrator(caller)?;

        let mut ledger = self.ledger;
        let mut staged = account.clone();
        ledger.credit(&mut staged, investor, amount, custody.balance())?;
        let outstanding = ledger.outstanding()?;

        let (sequence, digest) = self.next_audit(&AuditRecord::new(
            0,
            AuditKind::Allocation,
            investor,
            caller,
            amount,
            staged.allocated,
            staged.withdrawn,
            now,
        ))?;

        self.ledger = ledger;
        *account = staged;
        self.audit_sequence = sequence;
        self.audit_digest = digest;

        Ok(Allocation {
            investor: *investor,
            amount,
            allocated: account.allocated,
            outstanding,
            audit_sequence: sequence,
            audit_digest: digest,
        })
    }

    /// Investor-only. Sends `amount` of the caller's thawed balance to
    /// `destination`.
    #[allow(clippy::too_many_arguments)]
    pub fn withdraw<C: Custody>(
        &mut self,
        caller: &Pubkey,
        account: &mut InvestorAccount,
        destination: &Pubkey,
        amount: u64,
        now: i64,
        custody: &mut C,
    ) -> std::result::Result<Withdrawal, KeeperError> {
        if !account.is_bound() || account.investor != *caller {
            return Err(KeeperError::Unauthorized);
        }

        let mut ledger = self.ledger;
        let mut staged = account.clone();
        let schedule = self.schedule;
        // Record the audit entry before moving tokens so nothing fallible runs
        // after the transfer.
        let (sequence, digest) = self.next_audit(&AuditRecord::new(
            0,
            AuditKind::Withdrawal,
            caller,
            destination,
            amount,
            staged.allocated,
            staged.withdrawn.saturating_add(amount),
            now,
        ))?;
        ledger.debit(&mut staged, &schedule, destination, amount, now, custody)?;

        self.ledger = ledger;
        *account = staged;
        self.audit_sequence = sequence;
        self.audit_digest = digest;

        Ok(Withdrawal {
            investor: *caller,
            destination: *destination,
            amount,
            allocated: account.allocated,
            withdrawn: account.withdrawn,
            audit_sequence: sequence,
            audit_digest: digest,
        })
    }

    /// Position of an investor at `now`; `None` means no record exists yet.
    pub fn quote(
        &self,
        account: Option<&InvestorAccount>,
        now: i64,
    ) -> std::result::Result<Quote, KeeperError> {
        let Some(account) = account else {
            return Ok(Quote::default());
        };
        let unlocked = self.schedule.unlocked_amount(account.allocated, now)?;
        Ok(Quote {
            allocated: account.allocated,
            unlocked,
            withdrawn: account.withdrawn,
            withdrawable: Ledger::withdrawable(account, &self.schedule, now)?,
        })
    }

    /// Sequence number and digest the chain would advance to with `record`.
    /// Does not mutate.
    fn next_audit(
        &self,
        record: &AuditRecord,
    ) -> std::result::Result<(u64, [u8; 32]), KeeperError> {
        let sequence = self
            .audit_sequence
            .checked_add(1)
            .ok_or(KeeperError::MathOverflow)?;
        let mut record = *record;
        record.sequence = sequence;
        Ok((sequence, audit::chain(&self.audit_digest, &record)))
    }
}
