use anchor_lang::prelude::*;
use anchor_spl::token::TokenAccount;

use crate::constants::{INVESTOR_SEED, KEEPER_SEED, VAULT_SEED};
use crate::error::KeeperError;
use crate::state::{InvestorAccount, Keeper};
use crate::utils::VaultCustody;

pub fn allocate(ctx: Context<Allocate>, investor: Pubkey, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let keeper_key = ctx.accounts.keeper.key();

    let account = &mut ctx.accounts.investor_account;
    if !account.is_bound() {
        account.keeper = keeper_key;
        account.bump = ctx.bumps.investor_account;
    }

    let custody = VaultCustody::read_only(&ctx.accounts.vault);
    let allocation = ctx.accounts.keeper.allocate(
        &ctx.accounts.admin.key(),
        &mut ctx.accounts.investor_account,
        &investor,
        amount,
        &custody,
        now,
    )?;

    emit!(BalanceAllocated {
        investor: allocation.investor,
        amount: allocation.amount,
        allocated: allocation.allocated,
        outstanding: allocation.outstanding,
        audit_sequence: allocation.audit_sequence,
        audit_digest: allocation.audit_digest,
    });

    Ok(())
}

#[derive(Accounts)]
#[instruction(investor: Pubkey)]
pub struct Allocate<'info> {
    #[account(mut, seeds = [KEEPER_SEED, keeper.mint.as_ref()], bump = keeper.bump)]
    pub keeper: Account<'info, Keeper>,

    #[account(
        init_if_needed,
        payer = admin,
        space = 8 + InvestorAccount::SIZE,
        seeds = [INVESTOR_SEED, keeper.key().as_ref(), investor.as_ref()],
        bump
    )]
    pub investor_account: Account<'info, InvestorAccount>,

    #[account(
        seeds = [VAULT_SEED, keeper.key().as_ref()],
        bump = keeper.vault_bump,
        constraint = vault.mint == keeper.mint @ KeeperError::InvalidTokenMint,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct BalanceAllocated {
    pub investor: Pubkey,
    pub amount: u64,
    /// Investor's total allocation after this call.
    pub allocated: u64,
    /// Keeper-wide allocated minus withdrawn after this call.
    pub outstanding: u64,
    pub audit_sequence: u64,
    pub audit_digest: [u8; 32],
}
