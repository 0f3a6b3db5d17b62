//! Domain records exposed by the account service.

pub mod account;
pub mod event;
pub mod transaction;

pub use account::Account;
pub use event::Event;
pub use transaction::Transaction;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Registration number must be four digits: {0}")]
    InvalidRegNo(String),
    #[error("Account number must be digits only: {0}")]
    InvalidAccountNo(String),
    #[error("Account must be given as <regNo>-<accountNo>: {0}")]
    InvalidAccountKey(String),
    #[error("Request body names a different account than the path")]
    AccountMismatch,
    #[error("Account name cannot be empty")]
    EmptyName,
    #[error("Description must be between 1 and 256 characters")]
    InvalidDescription,
    #[error("Amount must have up to nine digits and optionally two decimals: {0}")]
    InvalidAmount(String),
}
