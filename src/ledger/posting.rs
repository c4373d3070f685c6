//! Posting rules: how a transaction becomes balance deltas
//!
//! Amounts are entered as positive magnitudes; the transaction type alone
//! determines the sign of each effect. Reversal is the exact negation of
//! the original deltas, never a remapping to a different transaction type.

use bigdecimal::BigDecimal;

use crate::types::{PaymentMethod, TransactionType};

/// Which derived running total a settlement touches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlementAccount {
    Cash,
    Bank,
}

/// The running total a payment method settles against.
/// Only bank transfers hit the bank balance; every other method is cash-like.
pub fn settlement_account(method: PaymentMethod) -> SettlementAccount {
    match method {
        PaymentMethod::BankTransfer => SettlementAccount::Bank,
        PaymentMethod::Cash | PaymentMethod::Check | PaymentMethod::CreditCard => {
            SettlementAccount::Cash
        }
    }
}

/// Signed delta a posting applies to the referenced contact's balance
///
/// | type     | delta   |
/// |----------|---------|
/// | sale     | +amount |
/// | purchase | -amount |
/// | payment  | +amount |
/// | receipt  | -amount |
/// | expense  | 0       |
pub fn contact_delta(txn_type: TransactionType, amount: &BigDecimal) -> BigDecimal {
    match txn_type {
        TransactionType::Sale | TransactionType::Payment => amount.clone(),
        TransactionType::Purchase | TransactionType::Receipt => -amount.clone(),
        TransactionType::Expense => BigDecimal::from(0),
    }
}

/// Signed delta a posting applies to the cash/bank running total
///
/// Sales and purchases are credit events and move no money; receipts bring
/// money in, payments and expenses move it out.
pub fn settlement_delta(txn_type: TransactionType, amount: &BigDecimal) -> BigDecimal {
    match txn_type {
        TransactionType::Receipt => amount.clone(),
        TransactionType::Payment | TransactionType::Expense => -amount.clone(),
        TransactionType::Sale | TransactionType::Purchase => BigDecimal::from(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn amount(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn contact_delta_follows_the_posting_table() {
        let a = amount("250.00");
        assert_eq!(contact_delta(TransactionType::Sale, &a), amount("250.00"));
        assert_eq!(
            contact_delta(TransactionType::Purchase, &a),
            amount("-250.00")
        );
        assert_eq!(
            contact_delta(TransactionType::Payment, &a),
            amount("250.00")
        );
        assert_eq!(
            contact_delta(TransactionType::Receipt, &a),
            amount("-250.00")
        );
        assert_eq!(contact_delta(TransactionType::Expense, &a), amount("0"));
    }

    #[test]
    fn settlement_delta_moves_money_only_for_settlements() {
        let a = amount("99.99");
        assert_eq!(settlement_delta(TransactionType::Sale, &a), amount("0"));
        assert_eq!(settlement_delta(TransactionType::Purchase, &a), amount("0"));
        assert_eq!(
            settlement_delta(TransactionType::Receipt, &a),
            amount("99.99")
        );
        assert_eq!(
            settlement_delta(TransactionType::Payment, &a),
            amount("-99.99")
        );
        assert_eq!(
            settlement_delta(TransactionType::Expense, &a),
            amount("-99.99")
        );
    }

    #[test]
    fn only_bank_transfer_settles_against_bank() {
        assert_eq!(
            settlement_account(PaymentMethod::BankTransfer),
            SettlementAccount::Bank
        );
        for method in [
            PaymentMethod::Cash,
            PaymentMethod::Check,
            PaymentMethod::CreditCard,
        ] {
            assert_eq!(settlement_account(method), SettlementAccount::Cash);
        }
    }

    #[test]
    fn reversal_is_straight_negation() {
        // Applying a delta and then its negation is an exact round trip.
        let a = amount("1234.56");
        for txn_type in [
            TransactionType::Sale,
            TransactionType::Purchase,
            TransactionType::Payment,
            TransactionType::Receipt,
            TransactionType::Expense,
        ] {
            let delta = contact_delta(txn_type, &a);
            assert_eq!(&delta + -delta.clone(), amount("0"));
        }
    }
}
