//! Report types and generation
//!
//! Six canned reports are derived fresh from the transaction log and
//! contact set on every request; nothing here is persisted.

pub mod generator;

pub use generator::*;

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::types::{BooksError, TransactionType};

/// The six canned report shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportType {
    ProfitLoss,
    BalanceSheet,
    CashFlow,
    CustomerLedger,
    SupplierLedger,
    TaxSummary,
}

impl ReportType {
    /// Display title stamped onto the generated report
    pub fn title(&self) -> &'static str {
        match self {
            ReportType::ProfitLoss => "Profit & Loss Statement",
            ReportType::BalanceSheet => "Balance Sheet",
            ReportType::CashFlow => "Cash Flow Statement",
            ReportType::CustomerLedger => "Customer Ledger",
            ReportType::SupplierLedger => "Supplier Ledger",
            ReportType::TaxSummary => "Tax Summary",
        }
    }
}

impl FromStr for ReportType {
    type Err = BooksError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "profit-loss" => Ok(ReportType::ProfitLoss),
            "balance-sheet" => Ok(ReportType::BalanceSheet),
            "cash-flow" => Ok(ReportType::CashFlow),
            "customer-ledger" => Ok(ReportType::CustomerLedger),
            "supplier-ledger" => Ok(ReportType::SupplierLedger),
            "tax-summary" => Ok(ReportType::TaxSummary),
            other => Err(BooksError::UnsupportedReport(other.to_string())),
        }
    }
}

/// Inclusive reporting window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Category with an aggregated amount (Profit & Loss rows)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAmount {
    pub category: String,
    pub amount: BigDecimal,
}

/// Named amount (Balance Sheet and Cash Flow rows)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub amount: BigDecimal,
}

/// One section of the cash flow statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowSection {
    pub title: String,
    pub items: Vec<LineItem>,
    pub total: BigDecimal,
}

/// A single transaction line in a contact ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerLine {
    pub id: Uuid,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub txn_type: TransactionType,
    pub amount: BigDecimal,
    pub reference: Option<String>,
}

/// One contact's block in a customer or supplier ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactLedgerEntry {
    pub id: Uuid,
    pub name: String,
    pub balance: BigDecimal,
    pub transactions: Vec<LedgerLine>,
}

/// Report-specific payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReportPayload {
    #[serde(rename_all = "camelCase")]
    ProfitLoss {
        period: ReportPeriod,
        revenue_items: Vec<CategoryAmount>,
        expense_items: Vec<CategoryAmount>,
    },
    BalanceSheet {
        assets: Vec<LineItem>,
        liabilities: Vec<LineItem>,
    },
    CashFlow {
        period: ReportPeriod,
        sections: Vec<CashFlowSection>,
    },
    CustomerLedger {
        customers: Vec<ContactLedgerEntry>,
    },
    SupplierLedger {
        suppliers: Vec<ContactLedgerEntry>,
    },
    #[serde(rename_all = "camelCase")]
    TaxSummary {
        period: ReportPeriod,
        total_revenue: BigDecimal,
        taxable_revenue: BigDecimal,
        total_expenses: BigDecimal,
        deductible_expenses: BigDecimal,
    },
}

/// Report-specific totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReportSummary {
    #[serde(rename_all = "camelCase")]
    ProfitLoss {
        total_revenue: BigDecimal,
        total_expenses: BigDecimal,
        net_profit: BigDecimal,
    },
    #[serde(rename_all = "camelCase")]
    BalanceSheet {
        total_assets: BigDecimal,
        total_liabilities: BigDecimal,
        equity: BigDecimal,
    },
    #[serde(rename_all = "camelCase")]
    CashFlow {
        net_cash_flow: BigDecimal,
        beginning_cash_balance: BigDecimal,
        ending_cash_balance: BigDecimal,
    },
    #[serde(rename_all = "camelCase")]
    CustomerLedger {
        total_customers: u64,
        total_receivables: BigDecimal,
    },
    #[serde(rename_all = "camelCase")]
    SupplierLedger {
        total_suppliers: u64,
        total_payables: BigDecimal,
    },
    #[serde(rename_all = "camelCase")]
    TaxSummary {
        taxable_income: BigDecimal,
        estimated_tax: BigDecimal,
    },
}

/// A freshly generated report, ready for display or export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportData {
    pub title: String,
    pub generated_on: NaiveDate,
    pub data: ReportPayload,
    pub summary: ReportSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_type_parses_kebab_case_names() {
        assert_eq!(
            "profit-loss".parse::<ReportType>().unwrap(),
            ReportType::ProfitLoss
        );
        assert_eq!(
            "tax-summary".parse::<ReportType>().unwrap(),
            ReportType::TaxSummary
        );
    }

    #[test]
    fn unknown_report_type_is_rejected() {
        let err = "general-ledger".parse::<ReportType>().unwrap_err();
        assert!(matches!(err, BooksError::UnsupportedReport(name) if name == "general-ledger"));
    }

    #[test]
    fn titles_match_the_on_screen_names() {
        assert_eq!(ReportType::ProfitLoss.title(), "Profit & Loss Statement");
        assert_eq!(ReportType::BalanceSheet.title(), "Balance Sheet");
        assert_eq!(ReportType::CashFlow.title(), "Cash Flow Statement");
        assert_eq!(ReportType::CustomerLedger.title(), "Customer Ledger");
        assert_eq!(ReportType::SupplierLedger.title(), "Supplier Ledger");
        assert_eq!(ReportType::TaxSummary.title(), "Tax Summary");
    }
}
