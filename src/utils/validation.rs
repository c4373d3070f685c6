//! Input validation for the form boundary

use bigdecimal::BigDecimal;

use crate::types::*;

/// Validate that an amount is a positive magnitude
pub fn validate_positive_amount(amount: &BigDecimal) -> BooksResult<()> {
    if *amount <= BigDecimal::from(0) {
        Err(BooksError::Validation(
            "Amount must be positive".to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Validate contact input before saving
pub fn validate_new_contact(input: &NewContact) -> BooksResult<()> {
    if input.name.trim().is_empty() {
        return Err(BooksError::Validation(
            "Contact name cannot be empty".to_string(),
        ));
    }

    if input.name.len() > 100 {
        return Err(BooksError::Validation(
            "Contact name cannot exceed 100 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validate transaction input before posting
///
/// Every type except expense must reference a contact; the referenced
/// contact's existence is checked separately against storage.
pub fn validate_new_transaction(input: &NewTransaction) -> BooksResult<()> {
    validate_positive_amount(&input.amount)?;

    if input.txn_type.requires_contact() && input.contact_id.is_none() {
        return Err(BooksError::Validation(format!(
            "A {} transaction must reference a contact",
            input.txn_type.label()
        )));
    }

    if let Some(ref description) = input.description {
        if description.len() > 500 {
            return Err(BooksError::Validation(
                "Transaction description cannot exceed 500 characters".to_string(),
            ));
        }
    }

    Ok(())
}
