//! BLAKE3 hash chain over every ledger mutation.
//!
//! digest_0 = blake3(AUDIT_DOMAIN || mint)
//! digest_n = blake3(digest_{n-1} || bytes_of(record_n))

use anchor_lang::prelude::*;
use bytemuck::{Pod, Zeroable};

use crate::constants::AUDIT_DOMAIN;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum AuditKind {
    Allocation = 1,
    Withdrawal = 2,
}

/// Fixed-layout record hashed into the chain. No padding, so the byte view
/// is stable across hosts.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct AuditRecord {
    pub sequence: u64,
    pub kind: u64,
    pub investor: [u8; 32],
    /// Destination wallet for withdrawals, administrator for allocations.
    pub counterparty: [u8; 32],
    pub amount: u64,
    pub allocated: u64,
    pub withdrawn: u64,
    pub timestamp: i64,
}

impl AuditRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        sequence: u64,
        kind: AuditKind,
        investor: &Pubkey,
        counterparty: &Pubkey,
        amount: u64,
        allocated: u64,
        withdrawn: u64,
        timestamp: i64,
    ) -> Self {
        Self {
            sequence,
            kind: kind as u64,
            investor: investor.to_bytes(),
            counterparty: counterparty.to_bytes(),
            amount,
            allocated,
            withdrawn,
            timestamp,
        }
    }
}

pub fn genesis(mint: &Pubkey) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new();
    hasher.update(AUDIT_DOMAIN);
    hasher.update(mint.as_ref());
    *hasher.finalize().as_bytes()
}

pub fn chain(prev: &[u8; 32], record: &AuditRecord) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new();
    hasher.update(prev);
    hasher.update(bytemuck::bytes_of(record));
    *hasher.finalize().as_bytes()
}
