//! # Bookkeeping Core
//!
//! A small-business bookkeeping library providing single-entry transaction
//! recording, contact balance tracking, and financial reporting.
//!
//! ## Features
//!
//! - **Transaction recording**: Sales, purchases, payments, receipts, and expenses
//! - **Contact management**: Customers, suppliers, and borrowers with running balances
//! - **Derived financial position**: Cash, bank, receivables, and payables computed from the log
//! - **Financial reporting**: Profit & loss, balance sheet, cash flow, contact ledgers, and tax summary
//! - **Export**: CSV and print-formatted text renditions of every report
//! - **Storage abstraction**: Database-agnostic design with trait-based storage
//!
//! ## Quick Start
//!
//! ```rust
//! use bookkeeping_core::{Books, MemoryStore, NewContact, ContactType};
//!
//! # async fn demo() -> bookkeeping_core::BooksResult<()> {
//! let mut books = Books::new(MemoryStore::new());
//! let customer = books.create_contact(NewContact::new("Acme Ltd", ContactType::Customer)).await?;
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod ledger;
pub mod reports;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use export::*;
pub use ledger::*;
pub use reports::*;
pub use traits::*;
pub use types::*;
pub use utils::*;
