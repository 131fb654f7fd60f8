use anchor_lang::prelude::*;

use crate::constants::KEEPER_SEED;
use crate::state::Keeper;

pub fn transfer_ownership(ctx: Context<TransferOwnership>, new_admin: Pubkey) -> Result<()> {
    let keeper = &mut ctx.accounts.keeper;
    keeper
        .guard
        .propose_transfer(&ctx.accounts.admin.key(), new_admin)?;

    msg!("ownership transfer proposed to {}", new_admin);
    emit!(OwnershipTransferProposed {
        admin: keeper.guard.current,
        pending_admin: new_admin,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct TransferOwnership<'info> {
    #[account(mut, seeds = [KEEPER_SEED, keeper.mint.as_ref()], bump = keeper.bump)]
    pub keeper: Account<'info, Keeper>,

    pub admin: Signer<'info>,
}

#[event]
pub struct OwnershipTransferProposed {
    pub admin: Pubkey,
    pub pending_admin: Pubkey,
}
