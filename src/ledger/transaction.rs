//! Transaction recording, posting, and reversal

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::ledger::posting;
use crate::traits::*;
use crate::types::*;
use crate::utils::validation;

/// Manager that keeps transaction persistence and contact balances in step
///
/// A posting and the transaction it belongs to succeed or fail together:
/// if the balance update cannot be applied, the saved transaction row is
/// removed again before the error propagates.
pub struct TransactionManager<S: RecordStore> {
    storage: S,
}

impl<S: RecordStore> TransactionManager<S> {
    /// Create a new transaction manager
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Record a new transaction and apply its posting to the referenced contact
    pub async fn record_transaction(
        &mut self,
        input: NewTransaction,
    ) -> BooksResult<Transaction> {
        validation::validate_new_transaction(&input)?;

        // Resolve the contact up front so a missing reference never leaves
        // a stray transaction row behind.
        let contact = match input.contact_id {
            Some(contact_id) => Some(
                self.storage
                    .get_contact(contact_id)
                    .await?
                    .ok_or(BooksError::ContactNotFound(contact_id))?,
            ),
            None => None,
        };

        let transaction = Transaction::new(input);
        self.storage.save_transaction(&transaction).await?;

        if let Some(mut contact) = contact {
            let delta = posting::contact_delta(transaction.txn_type, &transaction.amount);
            if delta != BigDecimal::from(0) {
                contact.apply_delta(&delta);
                if let Err(err) = self.storage.update_contact(&contact).await {
                    // Roll back the half-applied posting.
                    if let Err(rollback) = self.storage.delete_transaction(transaction.id).await {
                        return Err(BooksError::Storage(format!(
                            "posting failed ({err}); rollback of transaction {} also failed ({rollback})",
                            transaction.id
                        )));
                    }
                    return Err(err);
                }
            }
        }

        Ok(transaction)
    }

    /// Update a transaction, re-posting its balance effects
    ///
    /// The old posting is reversed and the new one applied, so editing the
    /// amount, type, or contact keeps every balance consistent with the log.
    pub async fn update_transaction(
        &mut self,
        transaction_id: Uuid,
        input: NewTransaction,
    ) -> BooksResult<Transaction> {
        validation::validate_new_transaction(&input)?;
        let existing = self.get_transaction_required(transaction_id).await?;

        // Resolve the new contact before any balance moves.
        if let Some(contact_id) = input.contact_id {
            if self.storage.get_contact(contact_id).await?.is_none() {
                return Err(BooksError::ContactNotFound(contact_id));
            }
        }

        self.apply_contact_delta(
            existing.contact_id,
            -posting::contact_delta(existing.txn_type, &existing.amount),
        )
        .await?;

        let mut updated = existing;
        updated.txn_type = input.txn_type;
        updated.amount = input.amount;
        updated.date = input.date;
        updated.contact_id = input.contact_id;
        updated.reference = input.reference;
        updated.payment_method = input.payment_method;
        updated.category = input.category;
        updated.description = input.description;
        updated.updated_at = chrono::Utc::now().naive_utc();

        self.apply_contact_delta(
            updated.contact_id,
            posting::contact_delta(updated.txn_type, &updated.amount),
        )
        .await?;

        self.storage.update_transaction(&updated).await?;
        Ok(updated)
    }

    /// Get a transaction by ID
    pub async fn get_transaction(
        &self,
        transaction_id: Uuid,
    ) -> BooksResult<Option<Transaction>> {
        self.storage.get_transaction(transaction_id).await
    }

    /// Get a transaction by ID, returning an error if not found
    pub async fn get_transaction_required(
        &self,
        transaction_id: Uuid,
    ) -> BooksResult<Transaction> {
        self.storage
            .get_transaction(transaction_id)
            .await?
            .ok_or(BooksError::TransactionNotFound(transaction_id))
    }

    /// List transactions within an inclusive date range
    pub async fn list_transactions(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> BooksResult<Vec<Transaction>> {
        self.storage.list_transactions(start_date, end_date).await
    }

    /// List transactions referencing a contact
    pub async fn list_contact_transactions(
        &self,
        contact_id: Uuid,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> BooksResult<Vec<Transaction>> {
        self.storage
            .list_contact_transactions(contact_id, start_date, end_date)
            .await
    }

    /// Delete a transaction, reversing its balance effects exactly
    ///
    /// Reversal negates the original contact delta; it never remaps the
    /// transaction to a different type.
    pub async fn delete_transaction(&mut self, transaction_id: Uuid) -> BooksResult<()> {
        let transaction = self.get_transaction_required(transaction_id).await?;

        self.apply_contact_delta(
            transaction.contact_id,
            -posting::contact_delta(transaction.txn_type, &transaction.amount),
        )
        .await?;

        self.storage.delete_transaction(transaction_id).await
    }

    /// Apply a signed delta to a contact's balance; a no-op for zero deltas
    /// and for transactions without a contact.
    async fn apply_contact_delta(
        &mut self,
        contact_id: Option<Uuid>,
        delta: BigDecimal,
    ) -> BooksResult<()> {
        let Some(contact_id) = contact_id else {
            return Ok(());
        };
        if delta == BigDecimal::from(0) {
            return Ok(());
        }

        let mut contact = self
            .storage
            .get_contact(contact_id)
            .await?
            .ok_or(BooksError::ContactNotFound(contact_id))?;
        contact.apply_delta(&delta);
        self.storage.update_contact(&contact).await
    }
}
