use anchor_lang::prelude::*;

/// Per-investor allocation record. Created on first allocation, never closed.
#[account]
#[derive(Default, Debug, PartialEq, Eq)]
pub struct InvestorAccount {
    /// Keeper this record belongs to.
    pub keeper: Pubkey,
    /// Investor wallet; `Pubkey::default()` until the first credit binds it.
    pub investor: Pubkey,
    /// Total ever allocated. Only grows.
    pub allocated: u64,
    /// Total ever withdrawn. Only grows; never above the unlocked amount.
    pub withdrawn: u64,
    pub bump: u8,
}

impl InvestorAccount {
    pub const SIZE: usize =
        32 + // keeper
        32 + // investor
        8 +  // allocated
        8 +  // withdrawn
        1;   // bump

    pub fn is_bound(&self) -> bool {
        self.investor != Pubkey::default()
    }
}
