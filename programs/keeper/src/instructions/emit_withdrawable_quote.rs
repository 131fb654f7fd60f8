use anchor_lang::prelude::*;

use crate::constants::KEEPER_SEED;
use crate::error::KeeperError;
use crate::state::{InvestorAccount, Keeper};

/// Read-only: reports what `investor` could withdraw right now. An investor
/// without a record quotes zero.
pub fn emit_withdrawable_quote(ctx: Context<EmitWithdrawableQuote>, investor: Pubkey) -> Result<()> {
    let keeper = &ctx.accounts.keeper;
    let now = Clock::get()?.unix_timestamp;

    let account = ctx.accounts.investor_account.as_deref();
    if let Some(acct) = account {
        require_keys_eq!(acct.keeper, keeper.key(), KeeperError::InvalidInvestorAccount);
        require_keys_eq!(acct.investor, investor, KeeperError::InvalidInvestorAccount);
    }
    let quote = keeper.quote(account, now)?;

    emit!(WithdrawableQuote {
        investor,
        now,
        allocated: quote.allocated,
        unlocked: quote.unlocked,
        withdrawn: quote.withdrawn,
        withdrawable: quote.withdrawable,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct EmitWithdrawableQuote<'info> {
    #[account(seeds = [KEEPER_SEED, keeper.mint.as_ref()], bump = keeper.bump)]
    pub keeper: Account<'info, Keeper>,

    pub investor_account: Option<Account<'info, InvestorAccount>>,
}

#[event]
pub struct WithdrawableQuote {
    pub investor: Pubkey,
    pub now: i64,
    pub allocated: u64,
    pub unlocked: u64,
    pub withdrawn: u64,
    pub withdrawable: u64,
}
