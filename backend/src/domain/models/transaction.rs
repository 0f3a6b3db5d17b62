//! Domain model for a transaction.
use chrono::{DateTime, Utc};

use super::ValidationError;
use crate::domain::capabilities::{AttributeValue, Attributes};

pub const MAX_DESCRIPTION_LENGTH: usize = 256;

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: String,
    pub reg_no: String,
    pub account_no: String,
    pub amount: f64,
    pub description: String,
    pub date: DateTime<Utc>,
}

impl Transaction {
    pub fn validate_description(description: &str) -> Result<(), ValidationError> {
        let length = description.chars().count();
        if length == 0 || length > MAX_DESCRIPTION_LENGTH {
            return Err(ValidationError::InvalidDescription);
        }
        Ok(())
    }

    /// Parse an amount of the form `123`, `123.45` or `-123.45`.
    pub fn parse_amount(amount: &str) -> Result<f64, ValidationError> {
        let invalid = || ValidationError::InvalidAmount(amount.to_string());
        let unsigned = amount.strip_prefix('-').unwrap_or(amount);
        let (whole, fraction) = match unsigned.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (unsigned, None),
        };

        let digits = |text: &str| !text.is_empty() && text.chars().all(|c| c.is_ascii_digit());
        if !digits(whole) || whole.len() > 9 {
            return Err(invalid());
        }
        if let Some(fraction) = fraction {
            if fraction.len() != 2 || !digits(fraction) {
                return Err(invalid());
            }
        }
        amount.parse().map_err(|_| invalid())
    }
}

impl Attributes for Transaction {
    const VOCABULARY: &'static [&'static str] = &["id", "amount", "description", "date"];
    const TIME_ATTRIBUTE: Option<&'static str> = Some("date");

    fn attribute(&self, name: &str) -> Option<AttributeValue> {
        match name {
            "id" => Some(self.id.as_str().into()),
            "amount" => Some(self.amount.into()),
            "description" => Some(self.description.as_str().into()),
            "date" => Some(self.date.into()),
            _ => None,
        }
    }
}
