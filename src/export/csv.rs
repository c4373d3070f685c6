//! CSV export
//!
//! Plain UTF-8 text with every field double-quoted; one block per report
//! section, blocks separated by a blank line, mirroring the on-screen
//! section order.

use crate::export::{format_date, format_period, money};
use crate::reports::{ContactLedgerEntry, ReportData, ReportPayload, ReportSummary};

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn row(fields: &[&str]) -> String {
    fields
        .iter()
        .map(|f| quote(f))
        .collect::<Vec<_>>()
        .join(",")
}

fn push_ledger_blocks(lines: &mut Vec<String>, entries: &[ContactLedgerEntry]) {
    for entry in entries {
        lines.push(row(&[&entry.name]));
        lines.push(row(&["Balance", &money(&entry.balance)]));
        lines.push(row(&["Date", "Type", "Amount", "Reference"]));
        for line in &entry.transactions {
            lines.push(row(&[
                &format_date(line.date),
                line.txn_type.label(),
                &money(&line.amount),
                line.reference.as_deref().unwrap_or("-"),
            ]));
        }
        lines.push(String::new());
    }
}

/// File name for a CSV export: the title with spaces as underscores
pub fn csv_file_name(report: &ReportData) -> String {
    format!("{}.csv", report.title.replace(' ', "_"))
}

/// Serialize a report to CSV text
pub fn to_csv(report: &ReportData) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(row(&[&report.title]));
    lines.push(row(&[&format!(
        "Generated: {}",
        format_date(report.generated_on)
    )]));
    lines.push(String::new());

    match &report.data {
        ReportPayload::ProfitLoss {
            period,
            revenue_items,
            expense_items,
        } => {
            lines.push(row(&[&format!("Period: {}", format_period(*period))]));
            lines.push(String::new());

            lines.push(row(&["Revenue"]));
            lines.push(row(&["Category", "Amount"]));
            for item in revenue_items {
                lines.push(row(&[&item.category, &money(&item.amount)]));
            }
            lines.push(String::new());

            lines.push(row(&["Expenses"]));
            lines.push(row(&["Category", "Amount"]));
            for item in expense_items {
                lines.push(row(&[&item.category, &money(&item.amount)]));
            }
            lines.push(String::new());
        }
        ReportPayload::BalanceSheet {
            assets,
            liabilities,
        } => {
            lines.push(row(&["Assets"]));
            lines.push(row(&["Asset", "Amount"]));
            for item in assets {
                lines.push(row(&[&item.name, &money(&item.amount)]));
            }
            lines.push(String::new());

            lines.push(row(&["Liabilities"]));
            lines.push(row(&["Liability", "Amount"]));
            for item in liabilities {
                lines.push(row(&[&item.name, &money(&item.amount)]));
            }
            lines.push(String::new());
        }
        ReportPayload::CashFlow { period, sections } => {
            lines.push(row(&[&format!("Period: {}", format_period(*period))]));
            lines.push(String::new());

            for section in sections {
                lines.push(row(&[&section.title]));
                lines.push(row(&["Item", "Amount"]));
                for item in &section.items {
                    lines.push(row(&[&item.name, &money(&item.amount)]));
                }
                lines.push(row(&["Total", &money(&section.total)]));
                lines.push(String::new());
            }
        }
        ReportPayload::CustomerLedger { customers } => {
            push_ledger_blocks(&mut lines, customers);
        }
        ReportPayload::SupplierLedger { suppliers } => {
            push_ledger_blocks(&mut lines, suppliers);
        }
        ReportPayload::TaxSummary {
            period,
            total_revenue,
            taxable_revenue,
            total_expenses,
            deductible_expenses,
        } => {
            lines.push(row(&[&format!("Period: {}", format_period(*period))]));
            lines.push(String::new());

            lines.push(row(&["Revenue"]));
            lines.push(row(&["Total Revenue", &money(total_revenue)]));
            lines.push(row(&["Taxable Revenue", &money(taxable_revenue)]));
            lines.push(String::new());

            lines.push(row(&["Expenses"]));
            lines.push(row(&["Total Expenses", &money(total_expenses)]));
            lines.push(row(&["Deductible Expenses", &money(deductible_expenses)]));
            lines.push(String::new());
        }
    }

    lines.push(row(&["Summary"]));
    match &report.summary {
        ReportSummary::ProfitLoss {
            total_revenue,
            total_expenses,
            net_profit,
        } => {
            lines.push(row(&["Total Revenue", &money(total_revenue)]));
            lines.push(row(&["Total Expenses", &money(total_expenses)]));
            lines.push(row(&["Net Profit", &money(net_profit)]));
        }
        ReportSummary::BalanceSheet {
            total_assets,
            total_liabilities,
            equity,
        } => {
            lines.push(row(&["Total Assets", &money(total_assets)]));
            lines.push(row(&["Total Liabilities", &money(total_liabilities)]));
            lines.push(row(&["Equity", &money(equity)]));
        }
        ReportSummary::CashFlow {
            net_cash_flow,
            beginning_cash_balance,
            ending_cash_balance,
        } => {
            lines.push(row(&["Net Cash Flow", &money(net_cash_flow)]));
            lines.push(row(&[
                "Beginning Cash Balance",
                &money(beginning_cash_balance),
            ]));
            lines.push(row(&["Ending Cash Balance", &money(ending_cash_balance)]));
        }
        ReportSummary::CustomerLedger {
            total_customers,
            total_receivables,
        } => {
            lines.push(row(&["Total Customers", &total_customers.to_string()]));
            lines.push(row(&["Total Receivables", &money(total_receivables)]));
        }
        ReportSummary::SupplierLedger {
            total_suppliers,
            total_payables,
        } => {
            lines.push(row(&["Total Suppliers", &total_suppliers.to_string()]));
            lines.push(row(&["Total Payables", &money(total_payables)]));
        }
        ReportSummary::TaxSummary {
            taxable_income,
            estimated_tax,
        } => {
            lines.push(row(&["Taxable Income", &money(taxable_income)]));
            lines.push(row(&["Estimated Tax", &money(estimated_tax)]));
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
