//! Program-wide constants.

/// Seed of the keeper PDA, followed by the mint key.
pub const KEEPER_SEED: &[u8] = b"keeper";

/// Seed of the vault token account PDA, followed by the keeper key.
pub const VAULT_SEED: &[u8] = b"vault";

/// Seed of an investor record PDA, followed by the keeper and investor keys.
pub const INVESTOR_SEED: &[u8] = b"investor";

/// Domain tag mixed into the genesis audit digest.
pub const AUDIT_DOMAIN: &[u8] = b"keeper-audit-v1";
