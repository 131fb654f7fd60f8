pub mod access_guard;
pub mod investor_account;
pub mod keeper;
pub mod ledger;

pub use access_guard::*;
pub use investor_account::*;
pub use keeper::*;
pub use ledger::*;
