//! Ledger module: posting rules, contact and transaction management,
//! and the derived financial position

pub mod contact;
pub mod core;
pub mod overview;
pub mod posting;
pub mod transaction;

pub use contact::*;
pub use core::*;
pub use overview::*;
pub use posting::*;
pub use transaction::*;
