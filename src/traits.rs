//! Storage abstraction for the bookkeeping core
//!
//! The core never assumes a query language; any backend that can persist
//! records, retrieve them by field equality, and aggregate by SUM/COUNT
//! can implement this trait.

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::types::*;

/// Persistence seam between the engines and whatever actually stores records
///
/// Aggregate methods return 0 over an empty data set; that is correct
/// behavior, not an error. Genuine backend failures surface as
/// [`BooksError::Storage`].
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Save a new contact
    async fn save_contact(&mut self, contact: &Contact) -> BooksResult<()>;

    /// Get a contact by ID
    async fn get_contact(&self, contact_id: Uuid) -> BooksResult<Option<Contact>>;

    /// List contacts sorted by name, optionally filtered by type
    async fn list_contacts(&self, contact_type: Option<ContactType>)
        -> BooksResult<Vec<Contact>>;

    /// Update an existing contact
    async fn update_contact(&mut self, contact: &Contact) -> BooksResult<()>;

    /// Delete a contact row (callers enforce the no-referencing-transactions policy)
    async fn delete_contact(&mut self, contact_id: Uuid) -> BooksResult<()>;

    /// Count contacts, optionally filtered by type
    async fn count_contacts(&self, contact_type: Option<ContactType>) -> BooksResult<u64>;

    /// Save a new transaction
    async fn save_transaction(&mut self, transaction: &Transaction) -> BooksResult<()>;

    /// Get a transaction by ID
    async fn get_transaction(&self, transaction_id: Uuid) -> BooksResult<Option<Transaction>>;

    /// List transactions within an inclusive date range, newest first
    async fn list_transactions(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> BooksResult<Vec<Transaction>>;

    /// List transactions referencing a contact within an inclusive date range
    async fn list_contact_transactions(
        &self,
        contact_id: Uuid,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> BooksResult<Vec<Transaction>>;

    /// Update an existing transaction row (callers re-post balances first)
    async fn update_transaction(&mut self, transaction: &Transaction) -> BooksResult<()>;

    /// Delete a transaction row (callers reverse its posting first)
    async fn delete_transaction(&mut self, transaction_id: Uuid) -> BooksResult<()>;

    /// Sum transaction amounts for a type; 0 when no rows match
    async fn sum_amount_by_type(&self, txn_type: TransactionType) -> BooksResult<BigDecimal>;
}
