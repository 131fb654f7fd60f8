use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::{KEEPER_SEED, VAULT_SEED};
use crate::error::KeeperError;
use crate::state::Keeper;

/// Tops up custody. Tokens sent here only become claimable once allocated.
pub fn deposit_tokens(ctx: Context<DepositTokens>, amount: u64) -> Result<()> {
    require!(amount > 0, KeeperError::InvalidAmount);

    let keeper = &ctx.accounts.keeper;
    require_keys_eq!(ctx.accounts.funder_token_account.mint, keeper.mint, KeeperError::InvalidTokenMint);
    require_keys_eq!(
        ctx.accounts.funder_token_account.owner,
        ctx.accounts.funder.key(),
        KeeperError::InvalidTokenAccount
    );

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.funder_token_account.to_account_info(),
                to: ctx.accounts.vault.to_account_info(),
                authority: ctx.accounts.funder.to_account_info(),
            },
        ),
        amount,
    )?;

    ctx.accounts.vault.reload()?;

    emit!(TokensDeposited {
        funder: ctx.accounts.funder.key(),
        amount,
        vault_balance: ctx.accounts.vault.amount,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct DepositTokens<'info> {
    #[account(seeds = [KEEPER_SEED, keeper.mint.as_ref()], bump = keeper.bump)]
    pub keeper: Account<'info, Keeper>,

    #[account(
        mut,
        seeds = [VAULT_SEED, keeper.key().as_ref()],
        bump = keeper.vault_bump,
        constraint = vault.mint == keeper.mint @ KeeperError::InvalidTokenMint,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub funder_token_account: Account<'info, TokenAccount>,

    pub funder: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct TokensDeposited {
    pub funder: Pubkey,
    pub amount: u64,
    pub vault_balance: u64,
}
