use anchor_lang::prelude::*;

/// Custom error codes for the keeper program.
#[error_code]
pub enum KeeperError {
    #[msg("Invalid recipient: null address")]
    InvalidRecipient,

    #[msg("Invalid amount (must be > 0)")]
    InvalidAmount,

    #[msg("Insufficient custody: escrow does not hold enough uncommitted tokens")]
    InsufficientCustody,

    #[msg("Amount exceeds the currently withdrawable balance")]
    ExceedsWithdrawable,

    #[msg("Unauthorized: caller lacks the required role")]
    Unauthorized,

    #[msg("Invalid schedule: unlock start must be in the future and before unlock end")]
    InvalidSchedule,

    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Invalid token mint")]
    InvalidTokenMint,

    #[msg("Invalid token account")]
    InvalidTokenAccount,

    #[msg("Investor record does not belong to this keeper or investor")]
    InvalidInvestorAccount,
}
