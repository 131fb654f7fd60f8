pub mod audit;
pub mod custody;
pub mod schedule;

pub use audit::*;
pub use custody::*;
pub use schedule::*;
