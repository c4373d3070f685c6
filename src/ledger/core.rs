//! Main bookkeeping orchestrator

use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::ledger::{overview, ContactManager, TransactionManager};
use crate::reports::{ReportData, ReportEngine, ReportType};
use crate::traits::*;
use crate::types::*;

/// The books: contact and transaction operations plus derived figures
///
/// All balance-mutating operations go through `&mut self`, which is the
/// single serialization point for postings and reversals. Report
/// generation is read-only.
pub struct Books<S: RecordStore> {
    contact_manager: ContactManager<S>,
    transaction_manager: TransactionManager<S>,
    report_engine: ReportEngine<S>,
}

impl<S: RecordStore + Clone> Books<S> {
    /// Open the books over the given storage backend
    pub fn new(storage: S) -> Self {
        Self {
            contact_manager: ContactManager::new(storage.clone()),
            transaction_manager: TransactionManager::new(storage.clone()),
            report_engine: ReportEngine::new(storage),
        }
    }

    // Contact operations

    /// Create a new contact
    pub async fn create_contact(&mut self, input: NewContact) -> BooksResult<Contact> {
        self.contact_manager.create_contact(input).await
    }

    /// Get a contact by ID
    pub async fn get_contact(&self, contact_id: Uuid) -> BooksResult<Option<Contact>> {
        self.contact_manager.get_contact(contact_id).await
    }

    /// List all contacts
    pub async fn list_contacts(&self) -> BooksResult<Vec<Contact>> {
        self.contact_manager.list_contacts().await
    }

    /// List contacts of one type
    pub async fn list_contacts_by_type(
        &self,
        contact_type: ContactType,
    ) -> BooksResult<Vec<Contact>> {
        self.contact_manager
            .list_contacts_by_type(contact_type)
            .await
    }

    /// Update a contact
    pub async fn update_contact(&mut self, contact: &Contact) -> BooksResult<()> {
        self.contact_manager.update_contact(contact).await
    }

    /// Delete a contact (blocked while transactions reference it)
    pub async fn delete_contact(&mut self, contact_id: Uuid) -> BooksResult<()> {
        self.contact_manager.delete_contact(contact_id).await
    }

    // Transaction operations

    /// Record a transaction and post its balance effects
    pub async fn create_transaction(
        &mut self,
        input: NewTransaction,
    ) -> BooksResult<Transaction> {
        self.transaction_manager.record_transaction(input).await
    }

    /// Get a transaction by ID
    pub async fn get_transaction(
        &self,
        transaction_id: Uuid,
    ) -> BooksResult<Option<Transaction>> {
        self.transaction_manager.get_transaction(transaction_id).await
    }

    /// List transactions within an inclusive date range
    pub async fn list_transactions(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> BooksResult<Vec<Transaction>> {
        self.transaction_manager
            .list_transactions(start_date, end_date)
            .await
    }

    /// List transactions referencing a contact
    pub async fn list_contact_transactions(
        &self,
        contact_id: Uuid,
    ) -> BooksResult<Vec<Transaction>> {
        self.transaction_manager
            .list_contact_transactions(contact_id, None, None)
            .await
    }

    /// Update a transaction, reversing the old posting and applying the new one
    pub async fn update_transaction(
        &mut self,
        transaction_id: Uuid,
        input: NewTransaction,
    ) -> BooksResult<Transaction> {
        self.transaction_manager
            .update_transaction(transaction_id, input)
            .await
    }

    /// Delete a transaction, reversing its posting exactly
    pub async fn delete_transaction(&mut self, transaction_id: Uuid) -> BooksResult<()> {
        self.transaction_manager
            .delete_transaction(transaction_id)
            .await
    }

    // Derived figures

    /// Current cash/bank position and open balances, recomputed from scratch
    pub async fn financial_overview(&self) -> BooksResult<FinancialOverview> {
        let transactions = self
            .transaction_manager
            .list_transactions(None, None)
            .await?;
        let contacts = self.contact_manager.list_contacts().await?;
        Ok(overview::derive_overview(&transactions, &contacts))
    }

    /// Dashboard totals over the whole transaction log
    pub async fn financial_summary(&self) -> BooksResult<FinancialSummary> {
        let total_sales = self
            .contact_manager
            .storage
            .sum_amount_by_type(TransactionType::Sale)
            .await?;
        let total_expenses = self
            .contact_manager
            .storage
            .sum_amount_by_type(TransactionType::Expense)
            .await?;
        let contacts = self.contact_manager.list_contacts().await?;

        let net_profit = &total_sales - &total_expenses;
        Ok(FinancialSummary {
            total_sales,
            total_expenses,
            total_receivables: overview::total_receivables(&contacts),
            total_payables: overview::total_payables(&contacts),
            net_profit,
        })
    }

    /// Per-month sale and expense totals for one calendar year
    ///
    /// Only months with at least one matching transaction appear, sorted
    /// by month number.
    pub async fn monthly_performance(&self, year: i32) -> BooksResult<Vec<MonthlyPerformance>> {
        let transactions = self
            .transaction_manager
            .list_transactions(None, None)
            .await?;

        let mut months: BTreeMap<u32, MonthlyPerformance> = BTreeMap::new();
        for txn in transactions {
            if txn.date.year() != year
                || !matches!(
                    txn.txn_type,
                    TransactionType::Sale | TransactionType::Expense
                )
            {
                continue;
            }
            let entry = months
                .entry(txn.date.month())
                .or_insert_with(|| MonthlyPerformance {
                    month: txn.date.month(),
                    sales: 0.into(),
                    expenses: 0.into(),
                });
            if txn.txn_type == TransactionType::Sale {
                entry.sales += txn.amount;
            } else {
                entry.expenses += txn.amount;
            }
        }

        Ok(months.into_values().collect())
    }

    /// Generate one of the canned reports over a trailing period of days
    pub async fn generate_report(
        &self,
        report_type: ReportType,
        period_days: u32,
    ) -> BooksResult<ReportData> {
        self.report_engine.generate(report_type, period_days).await
    }

    /// Access the report engine directly
    pub fn reports(&self) -> &ReportEngine<S> {
        &self.report_engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::memory_store::MemoryStore;
    use bigdecimal::BigDecimal;
    use std::str::FromStr;

    fn amount(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[tokio::test]
    async fn overview_matches_incremental_postings() {
        let store = MemoryStore::new();
        let mut books = Books::new(store);

        let customer = books
            .create_contact(NewContact::new("Acme Corp", ContactType::Customer))
            .await
            .unwrap();

        let date = NaiveDate::from_ymd_opt(2026, 4, 2).unwrap();
        books
            .create_transaction(NewTransaction::new(
                TransactionType::Sale,
                amount("1000.00"),
                date,
                Some(customer.id),
                PaymentMethod::Cash,
            ))
            .await
            .unwrap();
        books
            .create_transaction(NewTransaction::new(
                TransactionType::Receipt,
                amount("400.00"),
                date,
                Some(customer.id),
                PaymentMethod::Cash,
            ))
            .await
            .unwrap();
        books
            .create_transaction(NewTransaction::new(
                TransactionType::Expense,
                amount("150.00"),
                date,
                None,
                PaymentMethod::BankTransfer,
            ))
            .await
            .unwrap();

        let overview = books.financial_overview().await.unwrap();
        assert_eq!(overview.cash_balance, amount("400.00"));
        assert_eq!(overview.bank_balance, amount("-150.00"));
        assert_eq!(overview.receivables, amount("600.00"));
        assert_eq!(overview.payables, amount("0"));
    }

    #[tokio::test]
    async fn contact_delete_blocked_while_referenced() {
        let store = MemoryStore::new();
        let mut books = Books::new(store);

        let supplier = books
            .create_contact(NewContact::new("Parts Inc", ContactType::Supplier))
            .await
            .unwrap();
        let purchase = books
            .create_transaction(NewTransaction::new(
                TransactionType::Purchase,
                amount("75.00"),
                NaiveDate::from_ymd_opt(2026, 3, 3).unwrap(),
                Some(supplier.id),
                PaymentMethod::Check,
            ))
            .await
            .unwrap();

        assert!(matches!(
            books.delete_contact(supplier.id).await,
            Err(BooksError::Validation(_))
        ));

        books.delete_transaction(purchase.id).await.unwrap();
        books.delete_contact(supplier.id).await.unwrap();
        assert!(books.get_contact(supplier.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn monthly_performance_groups_by_month() {
        let store = MemoryStore::new();
        let mut books = Books::new(store);
        let customer = books
            .create_contact(NewContact::new("Acme Corp", ContactType::Customer))
            .await
            .unwrap();

        for (month, day, amt) in [(1u32, 5u32, "100.00"), (1, 20, "50.00"), (3, 1, "200.00")] {
            books
                .create_transaction(NewTransaction::new(
                    TransactionType::Sale,
                    amount(amt),
                    NaiveDate::from_ymd_opt(2026, month, day).unwrap(),
                    Some(customer.id),
                    PaymentMethod::Cash,
                ))
                .await
                .unwrap();
        }
        books
            .create_transaction(NewTransaction::new(
                TransactionType::Expense,
                amount("30.00"),
                NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
                None,
                PaymentMethod::Cash,
            ))
            .await
            .unwrap();
        // Different year, must not appear
        books
            .create_transaction(NewTransaction::new(
                TransactionType::Sale,
                amount("999.00"),
                NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
                Some(customer.id),
                PaymentMethod::Cash,
            ))
            .await
            .unwrap();

        let months = books.monthly_performance(2026).await.unwrap();
        assert_eq!(months.len(), 2);
        assert_eq!(months[0].month, 1);
        assert_eq!(months[0].sales, amount("150.00"));
        assert_eq!(months[0].expenses, amount("0"));
        assert_eq!(months[1].month, 3);
        assert_eq!(months[1].sales, amount("200.00"));
        assert_eq!(months[1].expenses, amount("30.00"));
    }

    #[tokio::test]
    async fn financial_summary_uses_store_aggregates() {
        let store = MemoryStore::new();
        let mut books = Books::new(store);
        let customer = books
            .create_contact(NewContact::new("Acme Corp", ContactType::Customer))
            .await
            .unwrap();

        let date = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
        books
            .create_transaction(NewTransaction::new(
                TransactionType::Sale,
                amount("900.00"),
                date,
                Some(customer.id),
                PaymentMethod::Cash,
            ))
            .await
            .unwrap();
        books
            .create_transaction(NewTransaction::new(
                TransactionType::Expense,
                amount("250.00"),
                date,
                None,
                PaymentMethod::Cash,
            ))
            .await
            .unwrap();

        let summary = books.financial_summary().await.unwrap();
        assert_eq!(summary.total_sales, amount("900.00"));
        assert_eq!(summary.total_expenses, amount("250.00"));
        assert_eq!(summary.net_profit, amount("650.00"));
        assert_eq!(summary.total_receivables, amount("900.00"));
        assert_eq!(summary.total_payables, amount("0"));
    }
}
