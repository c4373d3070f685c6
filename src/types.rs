//! Core types and data structures for the bookkeeping system

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kinds of contacts the books track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactType {
    /// Customers - parties that owe the business money (positive balance = receivable)
    Customer,
    /// Suppliers - parties the business owes money to (negative balance = payable)
    Supplier,
    /// Borrowers - parties holding money lent out by the business
    Borrower,
}

/// Kinds of transactions and their posting behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Sale on credit - the customer owes more
    Sale,
    /// Purchase on credit - the business owes the supplier more
    Purchase,
    /// Payment made to a supplier - settles a payable, money leaves cash/bank
    Payment,
    /// Receipt from a customer - settles a receivable, money enters cash/bank
    Receipt,
    /// Direct expense - money leaves cash/bank, no contact involved
    Expense,
}

impl TransactionType {
    /// Whether this transaction type must reference a contact.
    /// Expense is the only type permitted without one.
    pub fn requires_contact(&self) -> bool {
        !matches!(self, TransactionType::Expense)
    }

    /// Lowercase label used by report renderers
    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::Sale => "sale",
            TransactionType::Purchase => "purchase",
            TransactionType::Payment => "payment",
            TransactionType::Receipt => "receipt",
            TransactionType::Expense => "expense",
        }
    }
}

/// How a transaction was settled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    Cash,
    BankTransfer,
    Check,
    CreditCard,
}

/// Contact record with a running signed balance
///
/// The balance is mutated only through ledger postings (and explicit
/// updates). For customers a positive balance is a receivable; for
/// suppliers a negative balance is a payable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Unique identifier for the contact
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Kind of contact
    #[serde(rename = "type")]
    pub contact_type: ContactType,
    /// Contact email, if known
    pub email: Option<String>,
    /// Contact phone, if known
    pub phone: Option<String>,
    /// Person to reach at the contact's organization.
    /// The alias accepts the legacy snake_case spelling found in old exports.
    #[serde(alias = "contact_person")]
    pub contact_person: Option<String>,
    /// Running signed balance, updated by postings
    pub balance: BigDecimal,
    /// When the contact was created
    #[serde(alias = "created_at")]
    pub created_at: NaiveDateTime,
    /// When the contact was last updated
    #[serde(alias = "updated_at")]
    pub updated_at: NaiveDateTime,
}

impl Contact {
    /// Create a new contact with a zero opening balance
    pub fn new(input: NewContact) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            contact_type: input.contact_type,
            email: input.email,
            phone: input.phone,
            contact_person: input.contact_person,
            balance: BigDecimal::from(0),
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a signed balance delta from a posting
    pub fn apply_delta(&mut self, delta: &BigDecimal) {
        self.balance += delta;
        self.updated_at = chrono::Utc::now().naive_utc();
    }
}

/// Input shape for creating a contact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContact {
    pub name: String,
    #[serde(rename = "type")]
    pub contact_type: ContactType,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(alias = "contact_person")]
    pub contact_person: Option<String>,
}

impl NewContact {
    /// Convenience constructor for the common name + type case
    pub fn new(name: impl Into<String>, contact_type: ContactType) -> Self {
        Self {
            name: name.into(),
            contact_type,
            email: None,
            phone: None,
            contact_person: None,
        }
    }
}

/// A recorded transaction
///
/// The amount is always a positive magnitude as entered; the sign of its
/// balance effects is determined by the transaction type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier for the transaction
    pub id: Uuid,
    /// Transaction type, which determines the posting rules
    #[serde(rename = "type")]
    pub txn_type: TransactionType,
    /// Positive magnitude
    pub amount: BigDecimal,
    /// Date the transaction occurred
    pub date: NaiveDate,
    /// Referenced contact; None only for expenses.
    /// The alias accepts the legacy snake_case spelling found in old exports.
    #[serde(alias = "contact_id")]
    pub contact_id: Option<Uuid>,
    /// Optional reference number (invoice number, check number, etc.)
    pub reference: Option<String>,
    /// How the transaction was settled
    #[serde(alias = "payment_method")]
    pub payment_method: PaymentMethod,
    /// Reporting category; reports default it to "Uncategorized"
    pub category: Option<String>,
    /// Free-form description
    pub description: Option<String>,
    /// When the transaction was created
    #[serde(alias = "created_at")]
    pub created_at: NaiveDateTime,
    /// When the transaction was last updated
    #[serde(alias = "updated_at")]
    pub updated_at: NaiveDateTime,
}

impl Transaction {
    /// Create a transaction record from form input
    pub fn new(input: NewTransaction) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: Uuid::new_v4(),
            txn_type: input.txn_type,
            amount: input.amount,
            date: input.date,
            contact_id: input.contact_id,
            reference: input.reference,
            payment_method: input.payment_method,
            category: input.category,
            description: input.description,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input shape for recording a transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    #[serde(rename = "type")]
    pub txn_type: TransactionType,
    pub amount: BigDecimal,
    pub date: NaiveDate,
    #[serde(alias = "contact_id")]
    pub contact_id: Option<Uuid>,
    pub reference: Option<String>,
    #[serde(alias = "payment_method")]
    pub payment_method: PaymentMethod,
    pub category: Option<String>,
    pub description: Option<String>,
}

impl NewTransaction {
    /// Convenience constructor; optional fields start empty
    pub fn new(
        txn_type: TransactionType,
        amount: BigDecimal,
        date: NaiveDate,
        contact_id: Option<Uuid>,
        payment_method: PaymentMethod,
    ) -> Self {
        Self {
            txn_type,
            amount,
            date,
            contact_id,
            reference: None,
            payment_method,
            category: None,
            description: None,
        }
    }

    /// Set the reference number
    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Set the reporting category
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Derived cash position and open balances, recomputed on demand
///
/// Cash and bank balances are never stored; they are always a fold over
/// the settlement-bearing transactions (receipt/payment/expense).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialOverview {
    pub cash_balance: BigDecimal,
    pub bank_balance: BigDecimal,
    pub receivables: BigDecimal,
    pub payables: BigDecimal,
}

/// Derived dashboard statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub total_sales: BigDecimal,
    pub total_expenses: BigDecimal,
    pub total_receivables: BigDecimal,
    pub total_payables: BigDecimal,
    pub net_profit: BigDecimal,
}

/// Sales and expense totals for one month of a year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPerformance {
    pub month: u32,
    pub sales: BigDecimal,
    pub expenses: BigDecimal,
}

/// Errors that can occur in the bookkeeping system
#[derive(Debug, thiserror::Error)]
pub enum BooksError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Contact not found: {0}")]
    ContactNotFound(Uuid),
    #[error("Transaction not found: {0}")]
    TransactionNotFound(Uuid),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Unsupported report type: {0}")]
    UnsupportedReport(String),
}

/// Result type for bookkeeping operations
pub type BooksResult<T> = Result<T, BooksError>;
