//! # Storage Traits
//!
//! Interface between the domain services and whatever persists accounts,
//! transactions and events.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::{Account, Event, Transaction};

/// Outcome of booking a transaction on an account.
#[derive(Debug, Clone, PartialEq)]
pub enum Booking {
    /// Stored together with the balance change and its event. `account`
    /// carries the balance after the booking.
    Booked { account: Account, event: Event },
    /// The account already holds a transaction with this id; nothing changed.
    AlreadyBooked(Transaction),
    UnknownAccount,
}

/// Source of the ordered, finite record sequences the services shape.
///
/// Every list operation returns records in store (insertion) order;
/// ordering for clients is the capability pipeline's job.
#[async_trait]
pub trait RecordStore: Send + Sync + Clone + 'static {
    async fn list_accounts(&self) -> Result<Vec<Account>>;

    async fn find_account(&self, reg_no: &str, account_no: &str) -> Result<Option<Account>>;

    /// Insert a new account, or rename the stored one with the same numbers.
    /// The stored balance only changes through [`RecordStore::book_transaction`].
    async fn save_account(&self, account: &Account) -> Result<()>;

    async fn list_transactions(&self, reg_no: &str, account_no: &str) -> Result<Vec<Transaction>>;

    async fn find_transaction(&self, reg_no: &str, account_no: &str, id: &str) -> Result<Option<Transaction>>;

    /// Atomically store `transaction`, add its amount to the account balance,
    /// set the account's last update to the transaction date and append `event`.
    async fn book_transaction(&self, transaction: &Transaction, event: &Event) -> Result<Booking>;

    /// All events, or only those filed under `category`.
    async fn list_events(&self, category: Option<&str>) -> Result<Vec<Event>>;

    async fn find_event(&self, category: &str, id: &str) -> Result<Option<Event>>;

    /// Append an event; the returned copy carries its assigned sequence number.
    async fn save_event(&self, event: &Event) -> Result<Event>;
}
