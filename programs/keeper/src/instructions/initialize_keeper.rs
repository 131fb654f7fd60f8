use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{KEEPER_SEED, VAULT_SEED};
use crate::state::Keeper;

pub fn initialize_keeper(
    ctx: Context<InitializeKeeper>,
    unlock_start: i64,
    unlock_end: i64,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let keeper = Keeper::new(
        ctx.accounts.mint.key(),
        ctx.accounts.vault.key(),
        ctx.accounts.admin.key(),
        now,
        unlock_start,
        unlock_end,
        ctx.bumps.keeper,
        ctx.bumps.vault,
    )?;

    emit!(KeeperInitialized {
        mint: keeper.mint,
        vault: keeper.vault,
        admin: keeper.guard.current,
        unlock_start,
        unlock_end,
        created_at: now,
    });

    ctx.accounts.keeper.set_inner(keeper);
    Ok(())
}

#[derive(Accounts)]
pub struct InitializeKeeper<'info> {
    #[account(
        init,
        payer = admin,
        space = 8 + Keeper::SIZE,
        seeds = [KEEPER_SEED, mint.key().as_ref()],
        bump
    )]
    pub keeper: Account<'info, Keeper>,

    #[account(
        init,
        payer = admin,
        token::mint = mint,
        token::authority = keeper,
        seeds = [VAULT_SEED, keeper.key().as_ref()],
        bump
    )]
    pub vault: Account<'info, TokenAccount>,

    pub mint: Account<'info, Mint>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[event]
pub struct KeeperInitialized {
    pub mint: Pubkey,
    pub vault: Pubkey,
    pub admin: Pubkey,
    pub unlock_start: i64,
    pub unlock_end: i64,
    pub created_at: i64,
}
