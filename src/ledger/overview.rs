//! Derived financial position
//!
//! Cash and bank balances are not stored fields. They are always derived
//! by folding over the settlement-bearing transactions, so full
//! recomputation and incremental posting can never drift apart.

use bigdecimal::BigDecimal;

use crate::ledger::posting::{settlement_account, settlement_delta, SettlementAccount};
use crate::types::*;

/// Compute the financial overview from the full transaction log and contact set
pub fn derive_overview(transactions: &[Transaction], contacts: &[Contact]) -> FinancialOverview {
    let mut cash_balance = BigDecimal::from(0);
    let mut bank_balance = BigDecimal::from(0);

    for txn in transactions {
        let delta = settlement_delta(txn.txn_type, &txn.amount);
        match settlement_account(txn.payment_method) {
            SettlementAccount::Cash => cash_balance += delta,
            SettlementAccount::Bank => bank_balance += delta,
        }
    }

    FinancialOverview {
        cash_balance,
        bank_balance,
        receivables: total_receivables(contacts),
        payables: total_payables(contacts),
    }
}

/// Sum of positive customer balances
pub fn total_receivables(contacts: &[Contact]) -> BigDecimal {
    let zero = BigDecimal::from(0);
    contacts
        .iter()
        .filter(|c| c.contact_type == ContactType::Customer && c.balance > zero)
        .map(|c| &c.balance)
        .sum()
}

/// Absolute sum of negative supplier balances
pub fn total_payables(contacts: &[Contact]) -> BigDecimal {
    let zero = BigDecimal::from(0);
    contacts
        .iter()
        .filter(|c| c.contact_type == ContactType::Supplier && c.balance < zero)
        .map(|c| c.balance.abs())
        .sum()
}
