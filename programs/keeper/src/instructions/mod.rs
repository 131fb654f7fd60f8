pub mod initialize_keeper;
pub mod deposit_tokens;
pub mod allocate;
pub mod withdraw;
pub mod emit_withdrawable_quote;
pub mod transfer_ownership;
pub mod claim_ownership;

pub use initialize_keeper::*;
pub use deposit_tokens::*;
pub use allocate::*;
pub use withdraw::*;
pub use emit_withdrawable_quote::*;
pub use transfer_ownership::*;
pub use claim_ownership::*;
