use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;
pub mod utils;

pub use instructions::*;

declare_id!("87nPcf5GkKoKx1ZRbHnzVJdnCWUt5AsFEt6gonKr2uGu");

#[program]
pub mod keeper {
    use super::*;

    /// Creates the keeper and its vault. `unlock_start` must be in the future
    /// and strictly before `unlock_end`.
    pub fn initialize_keeper(
        ctx: Context<InitializeKeeper>,
        unlock_start: i64,
        unlock_end: i64,
    ) -> Result<()> {
        instructions::initialize_keeper::initialize_keeper(ctx, unlock_start, unlock_end)
    }

    pub fn deposit_tokens(ctx: Context<DepositTokens>, amount: u64) -> Result<()> {
        instructions::deposit_tokens::deposit_tokens(ctx, amount)
    }

    /// Administrator-only.
    pub fn allocate(ctx: Context<Allocate>, investor: Pubkey, amount: u64) -> Result<()> {
        instructions::allocate::allocate(ctx, investor, amount)
    }

    /// Signed by the investor; pays out to the owner of `destination`.
    pub fn withdraw(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
        instructions::withdraw::withdraw(ctx, amount)
    }

    pub fn emit_withdrawable_quote(
        ctx: Context<EmitWithdrawableQuote>,
        investor: Pubkey,
    ) -> Result<()> {
        instructions::emit_withdrawable_quote::emit_withdrawable_quote(ctx, investor)
    }

    pub fn transfer_ownership(ctx: Context<TransferOwnership>, new_admin: Pubkey) -> Result<()> {
        instructions::transfer_ownership::transfer_ownership(ctx, new_admin)
    }

    pub fn claim_ownership(ctx: Context<ClaimOwnership>) -> Result<()> {
        instructions::claim_ownership::claim_ownership(ctx)
    }
}
