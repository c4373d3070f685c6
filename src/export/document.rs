//! Print-formatted export
//!
//! Renders a report as monospaced text: title and generation date up top,
//! then one fixed-width table per section in the same order the CSV export
//! uses, with the summary table last. Amounts carry a `$` prefix.

use crate::export::{format_date, format_period, money};
use crate::reports::{ContactLedgerEntry, ReportData, ReportPayload, ReportSummary};

fn dollars(amount: &bigdecimal::BigDecimal) -> String {
    format!("${}", money(amount))
}

/// Render a fixed-width table: headers, a dash rule per column, then rows.
/// Every column is padded to its widest cell; the Amount column is
/// right-aligned.
fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let amount_col = headers.iter().position(|h| *h == "Amount");
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if cell.len() > widths[i] {
                widths[i] = cell.len();
            }
        }
    }

    let render = |cells: &[String]| -> String {
        let mut line = String::new();
        for (i, cell) in cells.iter().enumerate() {
            if i > 0 {
                line.push_str("  ");
            }
            if Some(i) == amount_col {
                line.push_str(&format!("{:>width$}", cell, width = widths[i]));
            } else {
                line.push_str(&format!("{:<width$}", cell, width = widths[i]));
            }
        }
        line
    };

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let rule_cells: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();

    let mut out = String::new();
    out.push_str(&render(&header_cells));
    out.push('\n');
    out.push_str(&render(&rule_cells));
    out.push('\n');
    for row in rows {
        out.push_str(&render(row));
        out.push('\n');
    }
    out
}

fn section(out: &mut String, title: &str, headers: &[&str], rows: &[Vec<String>]) {
    out.push_str(title);
    out.push('\n');
    out.push_str(&table(headers, rows));
    out.push('\n');
}

fn ledger_sections(out: &mut String, entries: &[ContactLedgerEntry]) {
    for entry in entries {
        let rows: Vec<Vec<String>> = entry
            .transactions
            .iter()
            .map(|line| {
                vec![
                    format_date(line.date),
                    line.txn_type.label().to_string(),
                    dollars(&line.amount),
                    line.reference.clone().unwrap_or_else(|| "-".to_string()),
                ]
            })
            .collect();
        let title = format!("{} (Balance: {})", entry.name, dollars(&entry.balance));
        section(out, &title, &["Date", "Type", "Amount", "Reference"], &rows);
    }
}

/// Render a report as print-formatted text
pub fn to_document(report: &ReportData) -> String {
    let mut out = String::new();
    out.push_str(&report.title);
    out.push('\n');
    out.push_str(&format!("Generated: {}\n\n", format_date(report.generated_on)));

    match &report.data {
        ReportPayload::ProfitLoss {
            period,
            revenue_items,
            expense_items,
        } => {
            out.push_str(&format!("Period: {}\n\n", format_period(*period)));

            let revenue: Vec<Vec<String>> = revenue_items
                .iter()
                .map(|i| vec![i.category.clone(), dollars(&i.amount)])
                .collect();
            section(&mut out, "Revenue", &["Category", "Amount"], &revenue);

            let expenses: Vec<Vec<String>> = expense_items
                .iter()
                .map(|i| vec![i.category.clone(), dollars(&i.amount)])
                .collect();
            section(&mut out, "Expenses", &["Category", "Amount"], &expenses);
        }
        ReportPayload::BalanceSheet {
            assets,
            liabilities,
        } => {
            let asset_rows: Vec<Vec<String>> = assets
                .iter()
                .map(|i| vec![i.name.clone(), dollars(&i.amount)])
                .collect();
            section(&mut out, "Assets", &["Asset", "Amount"], &asset_rows);

            let liability_rows: Vec<Vec<String>> = liabilities
                .iter()
                .map(|i| vec![i.name.clone(), dollars(&i.amount)])
                .collect();
            section(
                &mut out,
                "Liabilities",
                &["Liability", "Amount"],
                &liability_rows,
            );
        }
        ReportPayload::CashFlow { period, sections } => {
            out.push_str(&format!("Period: {}\n\n", format_period(*period)));

            for cash_section in sections {
                let mut rows: Vec<Vec<String>> = cash_section
                    .items
                    .iter()
                    .map(|i| vec![i.name.clone(), dollars(&i.amount)])
                    .collect();
                rows.push(vec!["Total".to_string(), dollars(&cash_section.total)]);
                section(&mut out, &cash_section.title, &["Item", "Amount"], &rows);
            }
        }
        ReportPayload::CustomerLedger { customers } => {
            ledger_sections(&mut out, customers);
        }
        ReportPayload::SupplierLedger { suppliers } => {
            ledger_sections(&mut out, suppliers);
        }
        ReportPayload::TaxSummary {
            period,
            total_revenue,
            taxable_revenue,
            total_expenses,
            deductible_expenses,
        } => {
            out.push_str(&format!("Period: {}\n\n", format_period(*period)));

            let revenue = vec![
                vec!["Total Revenue".to_string(), dollars(total_revenue)],
                vec!["Taxable Revenue".to_string(), dollars(taxable_revenue)],
            ];
            section(&mut out, "Revenue", &["Item", "Amount"], &revenue);

            let expenses = vec![
                vec!["Total Expenses".to_string(), dollars(total_expenses)],
                vec![
                    "Deductible Expenses".to_string(),
                    dollars(deductible_expenses),
                ],
            ];
            section(&mut out, "Expenses", &["Item", "Amount"], &expenses);
        }
    }

    let summary_rows: Vec<Vec<String>> = match &report.summary {
        ReportSummary::ProfitLoss {
            total_revenue,
            total_expenses,
            net_profit,
        } => vec![
            vec!["Total Revenue".to_string(), dollars(total_revenue)],
            vec!["Total Expenses".to_string(), dollars(total_expenses)],
            vec!["Net Profit".to_string(), dollars(net_profit)],
        ],
        ReportSummary::BalanceSheet {
            total_assets,
            total_liabilities,
            equity,
        } => vec![
            vec!["Total Assets".to_string(), dollars(total_assets)],
            vec!["Total Liabilities".to_string(), dollars(total_liabilities)],
            vec!["Equity".to_string(), dollars(equity)],
        ],
        ReportSummary::CashFlow {
            net_cash_flow,
            beginning_cash_balance,
            ending_cash_balance,
        } => vec![
            vec!["Net Cash Flow".to_string(), dollars(net_cash_flow)],
            vec![
                "Beginning Cash Balance".to_string(),
                dollars(beginning_cash_balance),
            ],
            vec![
                "Ending Cash Balance".to_string(),
                dollars(ending_cash_balance),
            ],
        ],
        ReportSummary::CustomerLedger {
            total_customers,
            total_receivables,
        } => vec![
            vec!["Total Customers".to_string(), total_customers.to_string()],
            vec!["Total Receivables".to_string(), dollars(total_receivables)],
        ],
        ReportSummary::SupplierLedger {
            total_suppliers,
            total_payables,
        } => vec![
            vec!["Total Suppliers".to_string(), total_suppliers.to_string()],
            vec!["Total Payables".to_string(), dollars(total_payables)],
        ],
        ReportSummary::TaxSummary {
            taxable_income,
            estimated_tax,
        } => vec![
            vec!["Taxable Income".to_string(), dollars(taxable_income)],
            vec!["Estimated Tax".to_string(), dollars(estimated_tax)],
        ],
    };
    out.push_str("Summary\n");
    out.push_str(&table(&["Item", "Amount"], &summary_rows));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::{build_balance_sheet, build_customer_ledger, build_profit_loss};
    use crate::types::{
        Contact, NewContact, NewTransaction, PaymentMethod, Transaction, TransactionType,
    };
    use bigdecimal::BigDecimal;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn txn(
        txn_type: TransactionType,
        amount: &str,
        day: u32,
        contact_id: Option<uuid::Uuid>,
    ) -> Transaction {
        Transaction::new(NewTransaction::new(
            txn_type,
            BigDecimal::from_str(amount).unwrap(),
            NaiveDate::from_ymd_opt(2026, 6, day).unwrap(),
            contact_id,
            PaymentMethod::Cash,
        ))
    }

    #[test]
    fn document_starts_with_title_and_generated_line() {
        let report = build_profit_loss(&[], 30, NaiveDate::from_ymd_opt(2026, 6, 30).unwrap());
        let doc = to_document(&report);
        assert!(doc.starts_with("Profit & Loss Statement\nGenerated: Jun 30, 2026\n\n"));
    }

    #[test]
    fn amounts_are_dollar_prefixed_and_right_aligned() {
        let mut input = NewTransaction::new(
            TransactionType::Sale,
            BigDecimal::from_str("1250.00").unwrap(),
            NaiveDate::from_ymd_opt(2026, 6, 20).unwrap(),
            None,
            PaymentMethod::Cash,
        );
        input.category = Some("Sales".to_string());
        let log = vec![Transaction::new(input)];
        let report = build_profit_loss(&log, 30, NaiveDate::from_ymd_opt(2026, 6, 30).unwrap());
        let doc = to_document(&report);
        assert!(doc.contains("$1250.00"));

        // the Amount column header lines up with the right-aligned cell
        let lines: Vec<&str> = doc.lines().collect();
        let header_idx = lines
            .iter()
            .position(|l| l.starts_with("Category"))
            .unwrap();
        let header = lines[header_idx];
        let cell_row = lines[header_idx + 2];
        assert_eq!(header.len(), cell_row.len());
        assert!(cell_row.ends_with("$1250.00"));
    }

    #[test]
    fn balance_sheet_document_lists_both_sections_and_summary() {
        let log = vec![txn(TransactionType::Receipt, "850", 10, None)];
        let report = build_balance_sheet(
            &log,
            &[],
            NaiveDate::from_ymd_opt(2026, 6, 30).unwrap(),
        );
        let doc = to_document(&report);
        assert!(doc.contains("Assets\n"));
        assert!(doc.contains("Liabilities\n"));
        assert!(doc.contains("Summary\n"));
        assert!(doc.contains("Total Assets"));
    }

    #[test]
    fn customer_ledger_document_shows_balance_per_customer() {
        let mut customer = Contact::new(NewContact::new(
            "Acme Ltd",
            crate::types::ContactType::Customer,
        ));
        customer.balance = BigDecimal::from_str("750.00").unwrap();
        let log = vec![txn(TransactionType::Sale, "750", 12, Some(customer.id))];
        let report = build_customer_ledger(
            &[customer],
            &log,
            NaiveDate::from_ymd_opt(2026, 6, 30).unwrap(),
        );
        let doc = to_document(&report);
        assert!(doc.contains("Acme Ltd (Balance: $750.00)"));
        assert!(doc.contains("Jun 12, 2026"));
        assert!(doc.contains("sale"));
    }

    #[test]
    fn ledger_columns_follow_the_date_type_amount_reference_order() {
        let mut customer = Contact::new(NewContact::new(
            "Acme Ltd",
            crate::types::ContactType::Customer,
        ));
        customer.balance = BigDecimal::from_str("99.95").unwrap();
        let mut input = NewTransaction::new(
            TransactionType::Sale,
            BigDecimal::from_str("99.95").unwrap(),
            NaiveDate::from_ymd_opt(2026, 6, 12).unwrap(),
            Some(customer.id),
            PaymentMethod::Cash,
        );
        input.reference = Some("INV-001".to_string());
        let log = vec![Transaction::new(input)];
        let report = build_customer_ledger(
            &[customer],
            &log,
            NaiveDate::from_ymd_opt(2026, 6, 30).unwrap(),
        );

        let doc = to_document(&report);
        let header = doc
            .lines()
            .find(|l| l.starts_with("Date"))
            .unwrap();
        let columns: Vec<&str> = header.split_whitespace().collect();
        assert_eq!(columns, ["Date", "Type", "Amount", "Reference"]);

        // Same field order as the CSV exporter
        let csv = crate::export::to_csv(&report);
        assert!(csv.contains("\"Date\",\"Type\",\"Amount\",\"Reference\""));
        let row = doc.lines().find(|l| l.contains("INV-001")).unwrap();
        assert!(row.find("$99.95").unwrap() < row.find("INV-001").unwrap());
    }
}
