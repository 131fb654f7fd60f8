//! Seam between the keeper's accounting and the token ledger that physically
//! holds the escrowed balance.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, TokenAccount, Transfer};

use crate::error::KeeperError;

/// Asset ledger as seen by the keeper.
pub trait Custody {
    /// Tokens currently held by the escrow.
    fn balance(&self) -> u64;

    /// Moves `amount` out of custody to `to`.
    fn send(&mut self, to: &Pubkey, amount: u64) -> std::result::Result<(), KeeperError>;
}

/// SPL vault owned by the keeper PDA. Without a payout leg it can only
/// report its balance.
pub struct VaultCustody<'a, 'info> {
    pub vault: &'a Account<'info, TokenAccount>,
    pub payout: Option<VaultPayout<'a, 'info>>,
}

/// Accounts needed to move tokens out of the vault.
pub struct VaultPayout<'a, 'info> {
    /// Token account owned by the wallet passed to `send`.
    pub destination: &'a Account<'info, TokenAccount>,
    /// Keeper PDA, the vault's token authority.
    pub authority: AccountInfo<'info>,
    pub token_program: AccountInfo<'info>,
    pub signer_seeds: &'a [&'a [&'a [u8]]],
}

impl<'a, 'info> VaultCustody<'a, 'info> {
    pub fn read_only(vault: &'a Account<'info, TokenAccount>) -> Self {
        Self {
            vault,
            payout: None,
        }
    }

    pub fn with_payout(
        vault: &'a Account<'info, TokenAccount>,
        payout: VaultPayout<'a, 'info>,
    ) -> Self {
        Self {
            vault,
            payout: Some(payout),
        }
    }
}

impl Custody for VaultCustody<'_, '_> {
    fn balance(&self) -> u64 {
        self.vault.amount
    }

    // The destination account is fixed by the instruction context; its owner
    // is the wallet the keeper was asked to pay.
    fn send(&mut self, _to: &Pubkey, amount: u64) -> std::result::Result<(), KeeperError> {
        let payout = self
            .payout
            .as_ref()
            .ok_or(KeeperError::InvalidTokenAccount)?;
        token::transfer(
            CpiContext::new_with_signer(
                payout.token_program.clone(),
                Transfer {
                    from: self.vault.to_account_info(),
                    to: payout.destination.to_account_info(),
                    authority: payout.authority.clone(),
                },
                payout.signer_seeds,
            ),
            amount,
        )
        .map_err(|e| {
            msg!("vault transfer of {} failed: {:?}", amount, e);
            KeeperError::InsufficientCustody
        })
    }
}

/// In-memory custody used by unit tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryCustody {
    pub held: u64,
    pub sent: Vec<(Pubkey, u64)>,
    pub fail_transfers: bool,
}

#[cfg(test)]
impl MemoryCustody {
    pub fn holding(held: u64) -> Self {
        Self {
            held,
            ..Self::default()
        }
    }

    pub fn failing(held: u64) -> Self {
        Self {
            held,
            fail_transfers: true,
            ..Self::default()
        }
    }
}

#[cfg(test)]
impl Custody for MemoryCustody {
    fn balance(&self) -> u64 {
        self.held
    }

    fn send(&mut self, to: &Pubkey, amount: u64) -> std::result::Result<(), KeeperError> {
        if self.fail_transfers || amount > self.held {
            return Err(KeeperError::InsufficientCustody);
        }
        self.held -= amount;
        self.sent.push((*to, amount));
        Ok(())
    }
}
