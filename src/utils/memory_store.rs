//! In-memory storage implementation for testing and development

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::traits::*;
use crate::types::*;

/// In-memory record store backed by shared hash maps
///
/// Clones share the same tables, so an engine and a report reader built
/// from clones observe the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    contacts: Arc<RwLock<HashMap<Uuid, Contact>>>,
    transactions: Arc<RwLock<HashMap<Uuid, Transaction>>>,
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) {
        self.contacts.write().unwrap().clear();
        self.transactions.write().unwrap().clear();
    }
}

fn in_range(date: NaiveDate, start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
    if let Some(start) = start {
        if date < start {
            return false;
        }
    }
    if let Some(end) = end {
        if date > end {
            return false;
        }
    }
    true
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn save_contact(&mut self, contact: &Contact) -> BooksResult<()> {
        self.contacts
            .write()
            .unwrap()
            .insert(contact.id, contact.clone());
        Ok(())
    }

    async fn get_contact(&self, contact_id: Uuid) -> BooksResult<Option<Contact>> {
        Ok(self.contacts.read().unwrap().get(&contact_id).cloned())
    }

    async fn list_contacts(
        &self,
        contact_type: Option<ContactType>,
    ) -> BooksResult<Vec<Contact>> {
        let contacts = self.contacts.read().unwrap();
        let mut filtered: Vec<Contact> = contacts
            .values()
            .filter(|contact| contact_type.is_none_or(|t| contact.contact_type == t))
            .cloned()
            .collect();
        filtered.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(filtered)
    }

    async fn update_contact(&mut self, contact: &Contact) -> BooksResult<()> {
        let mut contacts = self.contacts.write().unwrap();
        if contacts.contains_key(&contact.id) {
            contacts.insert(contact.id, contact.clone());
            Ok(())
        } else {
            Err(BooksError::ContactNotFound(contact.id))
        }
    }

    async fn delete_contact(&mut self, contact_id: Uuid) -> BooksResult<()> {
        if self.contacts.write().unwrap().remove(&contact_id).is_some() {
            Ok(())
        } else {
            Err(BooksError::ContactNotFound(contact_id))
        }
    }

    async fn count_contacts(&self, contact_type: Option<ContactType>) -> BooksResult<u64> {
        let contacts = self.contacts.read().unwrap();
        let count = contacts
            .values()
            .filter(|contact| contact_type.is_none_or(|t| contact.contact_type == t))
            .count();
        Ok(count as u64)
    }

    async fn save_transaction(&mut self, transaction: &Transaction) -> BooksResult<()> {
        self.transactions
            .write()
            .unwrap()
            .insert(transaction.id, transaction.clone());
        Ok(())
    }

    async fn get_transaction(
        &self,
        transaction_id: Uuid,
    ) -> BooksResult<Option<Transaction>> {
        Ok(self
            .transactions
            .read()
            .unwrap()
            .get(&transaction_id)
            .cloned())
    }

    async fn list_transactions(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> BooksResult<Vec<Transaction>> {
        let transactions = self.transactions.read().unwrap();
        let mut filtered: Vec<Transaction> = transactions
            .values()
            .filter(|txn| in_range(txn.date, start_date, end_date))
            .cloned()
            .collect();
        filtered.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        Ok(filtered)
    }

    async fn list_contact_transactions(
        &self,
        contact_id: Uuid,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> BooksResult<Vec<Transaction>> {
        let transactions = self.transactions.read().unwrap();
        let mut filtered: Vec<Transaction> = transactions
            .values()
            .filter(|txn| {
                txn.contact_id == Some(contact_id) && in_range(txn.date, start_date, end_date)
            })
            .cloned()
            .collect();
        filtered.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));
        Ok(filtered)
    }

    async fn update_transaction(&mut self, transaction: &Transaction) -> BooksResult<()> {
        let mut transactions = self.transactions.write().unwrap();
        if transactions.contains_key(&transaction.id) {
            transactions.insert(transaction.id, transaction.clone());
            Ok(())
        } else {
            Err(BooksError::TransactionNotFound(transaction.id))
        }
    }

    async fn delete_transaction(&mut self, transaction_id: Uuid) -> BooksResult<()> {
        if self
            .transactions
            .write()
            .unwrap()
            .remove(&transaction_id)
            .is_some()
        {
            Ok(())
        } else {
            Err(BooksError::TransactionNotFound(transaction_id))
        }
    }

    async fn sum_amount_by_type(&self, txn_type: TransactionType) -> BooksResult<BigDecimal> {
        let transactions = self.transactions.read().unwrap();
        let sum = transactions
            .values()
            .filter(|txn| txn.txn_type == txn_type)
            .map(|txn| &txn.amount)
            .sum();
        Ok(sum)
    }
}
