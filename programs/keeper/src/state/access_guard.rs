use anchor_lang::prelude::*;

use crate::error::KeeperError;

/// Administrator record with a two-step handover: the current administrator
/// proposes, the candidate accepts.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AccessGuard {
    pub current: Pubkey,
    /// `Pubkey::default()` when no handover is in progress.
    pub pending: Pubkey,
}

impl AccessGuard {
    pub const SIZE: usize = 32 + 32;

    pub fn new(admin: Pubkey) -> Self {
        Self {
            current: admin,
            pending: Pubkey::default(),
        }
    }

    pub fn current_administrator(&self) -> Pubkey {
        self.current
    }

    pub fn pending_administrator(&self) -> Option<Pubkey> {
        (self.pending != Pubkey::default()).then_some(self.pending)
    }

    pub fn is_administrator(&self, caller: &Pubkey) -> bool {
        *caller != Pubkey::default() && *caller == self.current
    }

    pub fn require_administrator(&self, caller: &Pubkey) -> std::result::Result<(), KeeperError> {
        if self.is_administrator(caller) {
            Ok(())
        } else {
            Err(KeeperError::Unauthorized)
        }
    }

    /// Records `candidate` as pending. A later proposal replaces an earlier one.
    pub fn propose_transfer(
        &mut self,
        caller: &Pubkey,
        candidate: Pubkey,
    ) -> std::result::Result<(), KeeperError> {
        self.require_administrator(caller)?;
        if candidate == Pubkey::default() {
            return Err(KeeperError::InvalidRecipient);
        }
        self.pending = candidate;
        Ok(())
    }

    /// Completes the handover. Returns `(previous, new)` administrators.
    pub fn accept_transfer(
        &mut self,
        caller: &Pubkey,
    ) -> std::result::Result<(Pubkey, Pubkey), KeeperError> {
        let pending = self.pending_administrator().ok_or(KeeperError::Unauthorized)?;
        if *caller != pending {
            return Err(KeeperError::Unauthorized);
        }
        let previous = self.current;
        self.current = pending;
        self.pending = Pubkey::default();
        Ok((previous, pending))
    }
}
