use bigdecimal::BigDecimal;
use std::fmt;

pub const ACCOUNT_NUMBER_LEN: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult = Result<(), ValidationError>;

/// Account numbers are exactly 12 ASCII decimal digits, nothing else.
/// Checked before any ledger access so a malformed number never reaches
/// persistent state.
pub fn validate_account_number(account_number: &str) -> ValidationResult {
    if account_number.len() != ACCOUNT_NUMBER_LEN
        || !account_number.chars().all(|ch| ch.is_ascii_digit())
    {
        return Err(ValidationError::new(
            "account_number",
            format!("must be exactly {} decimal digits", ACCOUNT_NUMBER_LEN),
        ));
    }

    Ok(())
}

pub fn validate_positive_amount(amount: &BigDecimal) -> ValidationResult {
    if amount <= &BigDecimal::from(0) {
        return Err(ValidationError::new("amount", "must be greater than zero"));
    }

    Ok(())
}
