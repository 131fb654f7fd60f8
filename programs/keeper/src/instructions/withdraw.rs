use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::{INVESTOR_SEED, KEEPER_SEED, VAULT_SEED};
use crate::error::KeeperError;
use crate::state::{InvestorAccount, Keeper};
use crate::utils::{VaultCustody, VaultPayout};

pub fn withdraw(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    // Capture the signer seeds and keeper AccountInfo before the mutable borrow.
    let keeper_ai = ctx.accounts.keeper.to_account_info();
    let mint = ctx.accounts.keeper.mint;
    let bump = [ctx.accounts.keeper.bump];
    let seeds: &[&[u8]] = &[KEEPER_SEED, mint.as_ref(), &bump];
    let signer_seeds: &[&[&[u8]]] = &[seeds];

    let destination = ctx.accounts.destination.owner;
    let mut custody = VaultCustody::with_payout(
        &ctx.accounts.vault,
        VaultPayout {
            destination: &ctx.accounts.destination,
            authority: keeper_ai,
            token_program: ctx.accounts.token_program.to_account_info(),
            signer_seeds,
        },
    );

    let withdrawal = ctx.accounts.keeper.withdraw(
        &ctx.accounts.investor.key(),
        &mut ctx.accounts.investor_account,
        &destination,
        amount,
        now,
        &mut custody,
    )?;

    emit!(FundsWithdrawn {
        investor: withdrawal.investor,
        destination: withdrawal.destination,
        amount: withdrawal.amount,
        allocated: withdrawal.allocated,
        withdrawn: withdrawal.withdrawn,
        audit_sequence: withdrawal.audit_sequence,
        audit_digest: withdrawal.audit_digest,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Withdraw<'info> {
    #[account(mut, seeds = [KEEPER_SEED, keeper.mint.as_ref()], bump = keeper.bump)]
    pub keeper: Account<'info, Keeper>,

    /// Seeded on the stored investor; `Keeper::withdraw` matches it against
    /// the signer.
    #[account(
        mut,
        seeds = [INVESTOR_SEED, keeper.key().as_ref(), investor_account.investor.as_ref()],
        bump = investor_account.bump,
        constraint = investor_account.keeper == keeper.key() @ KeeperError::InvalidInvestorAccount,
    )]
    pub investor_account: Account<'info, InvestorAccount>,

    #[account(
        mut,
        seeds = [VAULT_SEED, keeper.key().as_ref()],
        bump = keeper.vault_bump,
        constraint = vault.mint == keeper.mint @ KeeperError::InvalidTokenMint,
    )]
    pub vault: Account<'info, TokenAccount>,

    /// Any token account of the mint; its owner is the destination wallet.
    #[account(
        mut,
        constraint = destination.mint == keeper.mint @ KeeperError::InvalidTokenMint,
    )]
    pub destination: Account<'info, TokenAccount>,

    pub investor: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct FundsWithdrawn {
    pub investor: Pubkey,
    pub destination: Pubkey,
    pub amount: u64,
    pub allocated: u64,
    /// Investor's total withdrawn after this call.
    pub withdrawn: u64,
    pub audit_sequence: u64,
    pub audit_digest: [u8; 32],
}
