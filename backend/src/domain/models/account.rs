//! Domain model for an account.
use chrono::{DateTime, Utc};

use super::ValidationError;
use crate::domain::capabilities::{AttributeValue, Attributes};

#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub reg_no: String,
    pub account_no: String,
    pub name: String,
    pub balance: f64,
    pub last_update: DateTime<Utc>,
}

impl Account {
    pub fn new(reg_no: &str, account_no: &str, name: &str, now: DateTime<Utc>) -> Self {
        Self {
            reg_no: reg_no.to_string(),
            account_no: account_no.to_string(),
            name: name.to_string(),
            balance: 0.0,
            last_update: now,
        }
    }

    /// Path key of this account, `<regNo>-<accountNo>`.
    pub fn key(&self) -> String {
        format!("{}-{}", self.reg_no, self.account_no)
    }

    /// Split and validate a `<regNo>-<accountNo>` path key.
    pub fn parse_key(key: &str) -> Result<(String, String), ValidationError> {
        let (reg_no, account_no) = key
            .split_once('-')
            .ok_or_else(|| ValidationError::InvalidAccountKey(key.to_string()))?;
        Self::validate_numbers(reg_no, account_no)?;
        Ok((reg_no.to_string(), account_no.to_string()))
    }

    pub fn validate_numbers(reg_no: &str, account_no: &str) -> Result<(), ValidationError> {
        if reg_no.len() != 4 || !reg_no.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::InvalidRegNo(reg_no.to_string()));
        }
        if account_no.is_empty() || !account_no.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::InvalidAccountNo(account_no.to_string()));
        }
        Ok(())
    }
}

impl Attributes for Account {
    const VOCABULARY: &'static [&'static str] = &["regNo", "accountNo", "name", "balance", "lastUpdate"];
    const TIME_ATTRIBUTE: Option<&'static str> = Some("lastUpdate");

    fn attribute(&self, name: &str) -> Option<AttributeValue> {
        match name {
            "regNo" => Some(self.reg_no.as_str().into()),
            "accountNo" => Some(self.account_no.as_str().into()),
            "name" => Some(self.name.as_str().into()),
            "balance" => Some(self.balance.into()),
            "lastUpdate" => Some(self.last_update.into()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key() {
        assert_eq!(
            Account::parse_key("5479-1234").unwrap(),
            ("5479".to_string(), "1234".to_string())
        );
        assert_eq!(
            Account::parse_key("54791234").unwrap_err(),
            ValidationError::InvalidAccountKey("54791234".to_string())
        );
        assert_eq!(
            Account::parse_key("547-1234").unwrap_err(),
            ValidationError::InvalidRegNo("547".to_string())
        );
        assert_eq!(
            Account::parse_key("5479-12a4").unwrap_err(),
            ValidationError::InvalidAccountNo("12a4".to_string())
        );
    }

    #[test]
    fn test_attributes() {
        let account = Account::new("5479", "1234", "Savings account", Utc::now());
        assert_eq!(account.attribute("balance"), Some(AttributeValue::Number(0.0)));
        assert_eq!(account.attribute("name"), Some(AttributeValue::from("Savings account")));
        assert_eq!(account.attribute("unknown"), None);
        assert_eq!(account.point_in_time(), Some(account.last_update));
        assert_eq!(account.key(), "5479-1234");
    }
}
