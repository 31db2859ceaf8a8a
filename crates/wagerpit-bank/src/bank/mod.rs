//! Value-transfer interface and implementations.

mod mock;
mod traits;

pub use mock::MockBank;
pub use traits::{Bank, BankError};
