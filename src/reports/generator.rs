//! Report builders and the storage-backed report engine
//!
//! The builders are pure functions over already-loaded records, taking an
//! explicit `as_of` date so they stay deterministic under test. The
//! [`ReportEngine`] loads from a [`RecordStore`] and stamps today's date.

use bigdecimal::{BigDecimal, RoundingMode};
use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;

use crate::ledger::overview;
use crate::reports::*;
use crate::traits::RecordStore;
use crate::types::*;

/// Trailing window of `period_days` ending at `as_of`, inclusive on both ends
fn window(period_days: u32, as_of: NaiveDate) -> ReportPeriod {
    ReportPeriod {
        start: as_of - Duration::days(i64::from(period_days)),
        end: as_of,
    }
}

fn in_period<'a>(
    transactions: &'a [Transaction],
    period: ReportPeriod,
) -> impl Iterator<Item = &'a Transaction> {
    transactions
        .iter()
        .filter(move |t| t.date >= period.start && t.date <= period.end)
}

fn is_revenue(txn_type: TransactionType) -> bool {
    matches!(txn_type, TransactionType::Sale | TransactionType::Receipt)
}

fn is_expense(txn_type: TransactionType) -> bool {
    matches!(
        txn_type,
        TransactionType::Purchase | TransactionType::Payment | TransactionType::Expense
    )
}

/// Build the Profit & Loss statement over a trailing period
pub fn build_profit_loss(
    transactions: &[Transaction],
    period_days: u32,
    as_of: NaiveDate,
) -> ReportData {
    let period = window(period_days, as_of);

    let mut total_revenue = BigDecimal::from(0);
    let mut total_expenses = BigDecimal::from(0);
    let mut revenue_by_category: BTreeMap<String, BigDecimal> = BTreeMap::new();
    let mut expenses_by_category: BTreeMap<String, BigDecimal> = BTreeMap::new();

    for txn in in_period(transactions, period) {
        let category = txn
            .category
            .clone()
            .unwrap_or_else(|| "Uncategorized".to_string());
        if is_revenue(txn.txn_type) {
            total_revenue += &txn.amount;
            *revenue_by_category.entry(category).or_default() += &txn.amount;
        } else if is_expense(txn.txn_type) {
            total_expenses += &txn.amount;
            *expenses_by_category.entry(category).or_default() += &txn.amount;
        }
    }

    let net_profit = &total_revenue - &total_expenses;
    let to_items = |map: BTreeMap<String, BigDecimal>| {
        map.into_iter()
            .map(|(category, amount)| CategoryAmount { category, amount })
            .collect()
    };

    ReportData {
        title: ReportType::ProfitLoss.title().to_string(),
        generated_on: as_of,
        data: ReportPayload::ProfitLoss {
            period,
            revenue_items: to_items(revenue_by_category),
            expense_items: to_items(expenses_by_category),
        },
        summary: ReportSummary::ProfitLoss {
            total_revenue,
            total_expenses,
            net_profit,
        },
    }
}

/// Build the Balance Sheet snapshot (never period-filtered)
pub fn build_balance_sheet(
    transactions: &[Transaction],
    contacts: &[Contact],
    as_of: NaiveDate,
) -> ReportData {
    let position = overview::derive_overview(transactions, contacts);

    let total_assets =
        &position.cash_balance + &position.bank_balance + &position.receivables;
    let total_liabilities = position.payables.clone();
    let equity = &total_assets - &total_liabilities;

    ReportData {
        title: ReportType::BalanceSheet.title().to_string(),
        generated_on: as_of,
        data: ReportPayload::BalanceSheet {
            assets: vec![
                LineItem {
                    name: "Cash".to_string(),
                    amount: position.cash_balance,
                },
                LineItem {
                    name: "Bank Account".to_string(),
                    amount: position.bank_balance,
                },
                LineItem {
                    name: "Accounts Receivable".to_string(),
                    amount: position.receivables,
                },
            ],
            liabilities: vec![LineItem {
                name: "Accounts Payable".to_string(),
                amount: position.payables,
            }],
        },
        summary: ReportSummary::BalanceSheet {
            total_assets,
            total_liabilities,
            equity,
        },
    }
}

/// Build the Cash Flow statement over a trailing period
///
/// Investing and financing sections are deliberate placeholders and are
/// always zero; only operating activity is derived from the log.
pub fn build_cash_flow(
    transactions: &[Transaction],
    period_days: u32,
    as_of: NaiveDate,
) -> ReportData {
    let period = window(period_days, as_of);

    let mut operating = BigDecimal::from(0);
    for txn in in_period(transactions, period) {
        if is_revenue(txn.txn_type) {
            operating += &txn.amount;
        } else if is_expense(txn.txn_type) {
            operating -= &txn.amount;
        }
    }

    let investing = BigDecimal::from(0);
    let financing = BigDecimal::from(0);
    let net_cash_flow = &operating + &investing + &financing;

    let section = |title: &str, item: &str, total: BigDecimal| CashFlowSection {
        title: title.to_string(),
        items: vec![LineItem {
            name: item.to_string(),
            amount: total.clone(),
        }],
        total,
    };

    ReportData {
        title: ReportType::CashFlow.title().to_string(),
        generated_on: as_of,
        data: ReportPayload::CashFlow {
            period,
            sections: vec![
                section("Operating Activities", "Cash from Operations", operating),
                section("Investing Activities", "Capital Expenditures", investing),
                section("Financing Activities", "Loan Proceeds", financing),
            ],
        },
        summary: ReportSummary::CashFlow {
            beginning_cash_balance: BigDecimal::from(0),
            ending_cash_balance: net_cash_flow.clone(),
            net_cash_flow,
        },
    }
}

fn ledger_entries(contacts: &[Contact], transactions: &[Transaction]) -> Vec<ContactLedgerEntry> {
    let mut sorted: Vec<&Contact> = contacts.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));

    sorted
        .into_iter()
        .map(|contact| {
            let mut lines: Vec<LedgerLine> = transactions
                .iter()
                .filter(|t| t.contact_id == Some(contact.id))
                .map(|t| LedgerLine {
                    id: t.id,
                    date: t.date,
                    txn_type: t.txn_type,
                    amount: t.amount.clone(),
                    reference: t.reference.clone(),
                })
                .collect();
            lines.sort_by(|a, b| a.date.cmp(&b.date));
            ContactLedgerEntry {
                id: contact.id,
                name: contact.name.clone(),
                balance: contact.balance.clone(),
                transactions: lines,
            }
        })
        .collect()
}

/// Build the Customer Ledger: every customer with their transactions and balance
pub fn build_customer_ledger(
    customers: &[Contact],
    transactions: &[Transaction],
    as_of: NaiveDate,
) -> ReportData {
    ReportData {
        title: ReportType::CustomerLedger.title().to_string(),
        generated_on: as_of,
        data: ReportPayload::CustomerLedger {
            customers: ledger_entries(customers, transactions),
        },
        summary: ReportSummary::CustomerLedger {
            total_customers: customers.len() as u64,
            total_receivables: overview::total_receivables(customers),
        },
    }
}

/// Build the Supplier Ledger: every supplier with their transactions and balance
pub fn build_supplier_ledger(
    suppliers: &[Contact],
    transactions: &[Transaction],
    as_of: NaiveDate,
) -> ReportData {
    ReportData {
        title: ReportType::SupplierLedger.title().to_string(),
        generated_on: as_of,
        data: ReportPayload::SupplierLedger {
            suppliers: ledger_entries(suppliers, transactions),
        },
        summary: ReportSummary::SupplierLedger {
            total_suppliers: suppliers.len() as u64,
            total_payables: overview::total_payables(suppliers),
        },
    }
}

/// Build the Tax Summary over a trailing period
///
/// Uses a flat 20% rate: estimated tax = max(0, revenue*0.2 - expenses*0.2),
/// rounded half-up to 2 decimals.
pub fn build_tax_summary(
    transactions: &[Transaction],
    period_days: u32,
    as_of: NaiveDate,
) -> ReportData {
    let period = window(period_days, as_of);

    let mut total_revenue = BigDecimal::from(0);
    let mut total_expenses = BigDecimal::from(0);
    for txn in in_period(transactions, period) {
        if is_revenue(txn.txn_type) {
            total_revenue += &txn.amount;
        } else if is_expense(txn.txn_type) {
            total_expenses += &txn.amount;
        }
    }

    let taxable_income = &total_revenue - &total_expenses;

    // 0.2 as an exact decimal, not a float
    let rate = BigDecimal::new(2.into(), 1);
    let raw_tax = &total_revenue * &rate - &total_expenses * &rate;
    let zero = BigDecimal::from(0);
    let estimated_tax = if raw_tax > zero {
        raw_tax.with_scale_round(2, RoundingMode::HalfUp)
    } else {
        zero
    };

    ReportData {
        title: ReportType::TaxSummary.title().to_string(),
        generated_on: as_of,
        data: ReportPayload::TaxSummary {
            period,
            taxable_revenue: total_revenue.clone(),
            total_revenue,
            deductible_expenses: total_expenses.clone(),
            total_expenses,
        },
        summary: ReportSummary::TaxSummary {
            taxable_income,
            estimated_tax,
        },
    }
}

/// Storage-backed report generation
pub struct ReportEngine<S: RecordStore> {
    storage: S,
}

impl<S: RecordStore> ReportEngine<S> {
    /// Create a report engine over the given storage backend
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Generate any report type over a trailing period of days
    ///
    /// The period is ignored by snapshot reports (Balance Sheet) and the
    /// contact ledgers, which always cover the full history.
    pub async fn generate(
        &self,
        report_type: ReportType,
        period_days: u32,
    ) -> BooksResult<ReportData> {
        let as_of = chrono::Utc::now().date_naive();
        let transactions = self.storage.list_transactions(None, None).await?;

        let report = match report_type {
            ReportType::ProfitLoss => build_profit_loss(&transactions, period_days, as_of),
            ReportType::BalanceSheet => {
                let contacts = self.storage.list_contacts(None).await?;
                build_balance_sheet(&transactions, &contacts, as_of)
            }
            ReportType::CashFlow => build_cash_flow(&transactions, period_days, as_of),
            ReportType::CustomerLedger => {
                let customers = self
                    .storage
                    .list_contacts(Some(ContactType::Customer))
                    .await?;
                build_customer_ledger(&customers, &transactions, as_of)
            }
            ReportType::SupplierLedger => {
                let suppliers = self
                    .storage
                    .list_contacts(Some(ContactType::Supplier))
                    .await?;
                build_supplier_ledger(&suppliers, &transactions, as_of)
            }
            ReportType::TaxSummary => build_tax_summary(&transactions, period_days, as_of),
        };

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use uuid::Uuid;

    fn amount(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 30).unwrap()
    }

    fn txn(
        txn_type: TransactionType,
        amt: &str,
        date: NaiveDate,
        contact_id: Option<Uuid>,
        category: Option<&str>,
    ) -> Transaction {
        let mut input = NewTransaction::new(
            txn_type,
            amount(amt),
            date,
            contact_id,
            PaymentMethod::Cash,
        );
        input.category = category.map(str::to_string);
        Transaction::new(input)
    }

    #[test]
    fn profit_loss_buckets_by_category_and_nets_out() {
        let date = as_of() - Duration::days(3);
        let log = vec![
            txn(TransactionType::Sale, "1000.00", date, None, Some("Consulting")),
            txn(TransactionType::Receipt, "500.00", date, None, None),
            txn(TransactionType::Expense, "200.00", date, None, Some("Rent")),
            txn(TransactionType::Purchase, "300.00", date, None, None),
            // Outside the window, must be ignored
            txn(
                TransactionType::Sale,
                "9999.00",
                as_of() - Duration::days(31),
                None,
                None,
            ),
        ];
        let report = build_profit_loss(&log, 30, as_of());

        let ReportSummary::ProfitLoss {
            total_revenue,
            total_expenses,
            net_profit,
        } = &report.summary
        else {
            panic!("wrong summary shape");
        };
        assert_eq!(*total_revenue, amount("1500.00"));
        assert_eq!(*total_expenses, amount("500.00"));
        assert_eq!(*net_profit, amount("1000.00"));

        let ReportPayload::ProfitLoss {
            revenue_items,
            expense_items,
            ..
        } = &report.data
        else {
            panic!("wrong payload shape");
        };
        // Categories are sorted; missing category falls back to Uncategorized
        assert_eq!(revenue_items[0].category, "Consulting");
        assert_eq!(revenue_items[1].category, "Uncategorized");
        assert_eq!(expense_items[0].category, "Rent");
        assert_eq!(expense_items[1].category, "Uncategorized");
    }

    #[test]
    fn balance_sheet_identity_holds() {
        let mut customer = Contact::new(NewContact::new("Acme", ContactType::Customer));
        customer.balance = amount("600.00");
        let mut supplier = Contact::new(NewContact::new("Parts", ContactType::Supplier));
        supplier.balance = amount("-430.00");

        let date = as_of() - Duration::days(1);
        let log = vec![
            txn(TransactionType::Receipt, "400.00", date, Some(customer.id), None),
            txn(TransactionType::Expense, "150.00", date, None, None),
        ];

        let report = build_balance_sheet(&log, &[customer, supplier], as_of());
        let ReportSummary::BalanceSheet {
            total_assets,
            total_liabilities,
            equity,
        } = &report.summary
        else {
            panic!("wrong summary shape");
        };
        // cash 250 + bank 0 + receivables 600 = 850
        assert_eq!(*total_assets, amount("850.00"));
        assert_eq!(*total_liabilities, amount("430.00"));
        assert_eq!(total_assets - total_liabilities, *equity);
    }

    #[test]
    fn cash_flow_placeholders_stay_zero() {
        let date = as_of() - Duration::days(2);
        let log = vec![
            txn(TransactionType::Receipt, "800.00", date, None, None),
            txn(TransactionType::Payment, "300.00", date, None, None),
        ];
        let report = build_cash_flow(&log, 30, as_of());

        let ReportPayload::CashFlow { sections, .. } = &report.data else {
            panic!("wrong payload shape");
        };
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0].total, amount("500.00"));
        assert_eq!(sections[1].total, amount("0"));
        assert_eq!(sections[2].total, amount("0"));

        let ReportSummary::CashFlow { net_cash_flow, .. } = &report.summary else {
            panic!("wrong summary shape");
        };
        assert_eq!(*net_cash_flow, amount("500.00"));
    }

    #[test]
    fn customer_ledger_collects_transactions_per_customer() {
        let mut alice = Contact::new(NewContact::new("Alice Ltd", ContactType::Customer));
        alice.balance = amount("250.00");
        let mut zeta = Contact::new(NewContact::new("Zeta Co", ContactType::Customer));
        zeta.balance = amount("-10.00");

        let date = as_of() - Duration::days(5);
        let log = vec![
            txn(TransactionType::Sale, "250.00", date, Some(alice.id), None),
            txn(TransactionType::Sale, "40.00", date, Some(zeta.id), None),
            txn(TransactionType::Receipt, "50.00", date, Some(zeta.id), None),
        ];

        let report = build_customer_ledger(&[zeta, alice], &log, as_of());
        let ReportPayload::CustomerLedger { customers } = &report.data else {
            panic!("wrong payload shape");
        };
        assert_eq!(customers.len(), 2);
        // Sorted by name regardless of input order
        assert_eq!(customers[0].name, "Alice Ltd");
        assert_eq!(customers[0].transactions.len(), 1);
        assert_eq!(customers[1].transactions.len(), 2);

        let ReportSummary::CustomerLedger {
            total_customers,
            total_receivables,
        } = &report.summary
        else {
            panic!("wrong summary shape");
        };
        assert_eq!(*total_customers, 2);
        // Negative customer balances do not count as receivables
        assert_eq!(*total_receivables, amount("250.00"));
    }

    #[test]
    fn tax_summary_matches_the_flat_rate_formula() {
        let date = as_of() - Duration::days(10);
        let log = vec![
            txn(TransactionType::Sale, "45250.65", date, None, None),
            txn(TransactionType::Purchase, "32480.20", date, None, None),
        ];
        let report = build_tax_summary(&log, 365, as_of());

        let ReportSummary::TaxSummary {
            taxable_income,
            estimated_tax,
        } = &report.summary
        else {
            panic!("wrong summary shape");
        };
        assert_eq!(*taxable_income, amount("12770.45"));
        assert_eq!(*estimated_tax, amount("2554.09"));
    }

    #[test]
    fn tax_never_goes_negative() {
        let date = as_of() - Duration::days(1);
        let log = vec![
            txn(TransactionType::Sale, "100.00", date, None, None),
            txn(TransactionType::Expense, "900.00", date, None, None),
        ];
        let report = build_tax_summary(&log, 30, as_of());
        let ReportSummary::TaxSummary { estimated_tax, .. } = &report.summary else {
            panic!("wrong summary shape");
        };
        assert_eq!(*estimated_tax, amount("0"));
    }

    #[test]
    fn empty_log_generates_every_report_with_zero_totals() {
        let reports = [
            build_profit_loss(&[], 30, as_of()),
            build_balance_sheet(&[], &[], as_of()),
            build_cash_flow(&[], 30, as_of()),
            build_customer_ledger(&[], &[], as_of()),
            build_supplier_ledger(&[], &[], as_of()),
            build_tax_summary(&[], 365, as_of()),
        ];
        for report in &reports {
            match &report.summary {
                ReportSummary::ProfitLoss { net_profit, .. } => {
                    assert_eq!(*net_profit, amount("0"))
                }
                ReportSummary::BalanceSheet { equity, .. } => assert_eq!(*equity, amount("0")),
                ReportSummary::CashFlow { net_cash_flow, .. } => {
                    assert_eq!(*net_cash_flow, amount("0"))
                }
                ReportSummary::CustomerLedger {
                    total_receivables, ..
                } => assert_eq!(*total_receivables, amount("0")),
                ReportSummary::SupplierLedger { total_payables, .. } => {
                    assert_eq!(*total_payables, amount("0"))
                }
                ReportSummary::TaxSummary { estimated_tax, .. } => {
                    assert_eq!(*estimated_tax, amount("0"))
                }
            }
        }
    }
}
