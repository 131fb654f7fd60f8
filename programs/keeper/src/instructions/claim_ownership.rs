use anchor_lang::prelude::*;

use crate::constants::KEEPER_SEED;
use crate::state::Keeper;

pub fn claim_ownership(ctx: Context<ClaimOwnership>) -> Result<()> {
    let keeper = &mut ctx.accounts.keeper;
    let (previous_admin, new_admin) = keeper
        .guard
        .accept_transfer(&ctx.accounts.pending_admin.key())?;

    msg!("ownership transferred from {} to {}", previous_admin, new_admin);
    emit!(OwnershipTransferred {
        previous_admin,
        new_admin,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct ClaimOwnership<'info> {
    #[account(mut, seeds = [KEEPER_SEED, keeper.mint.as_ref()], bump = keeper.bump)]
    pub keeper: Account<'info, Keeper>,

    pub pending_admin: Signer<'info>,
}

#[event]
pub struct OwnershipTransferred {
    pub previous_admin: Pubkey,
    pub new_admin: Pubkey,
}
