//! Transaction service domain logic.
use anyhow::Result;
use chrono::{DateTime, Utc};
use shared::TransactionUpdateRequest;
use tracing::info;

use crate::domain::capabilities::CapabilityQuery;
use crate::domain::models::{Event, Transaction};
use crate::storage::{Booking, RecordStore};

#[derive(Clone)]
pub struct TransactionService<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> TransactionService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// All transactions of one account in store order.
    pub async fn all_transactions(&self, reg_no: &str, account_no: &str) -> Result<Vec<Transaction>> {
        self.store.list_transactions(reg_no, account_no).await
    }

    /// Transactions of one account shaped by the request's capabilities;
    /// `None` when the account does not exist.
    pub async fn list_transactions(
        &self,
        reg_no: &str,
        account_no: &str,
        query: &CapabilityQuery,
    ) -> Result<Option<Vec<Transaction>>> {
        if self.store.find_account(reg_no, account_no).await?.is_none() {
            return Ok(None);
        }
        let transactions = self.store.list_transactions(reg_no, account_no).await?;
        let shaped: Vec<Transaction> = query.apply(&transactions).into_iter().cloned().collect();
        info!(
            "Listing {} of {} transactions on {}-{}",
            shaped.len(),
            transactions.len(),
            reg_no,
            account_no
        );
        Ok(Some(shaped))
    }

    pub async fn get_transaction(&self, reg_no: &str, account_no: &str, id: &str) -> Result<Option<Transaction>> {
        info!("Getting transaction {} on {}-{}", id, reg_no, account_no);
        self.store.find_transaction(reg_no, account_no, id).await
    }

    /// Book a transaction on an account, adjust its balance and record an
    /// event for it. Re-sending an id that is already booked returns the
    /// stored transaction unchanged. `None` when the account does not exist.
    pub async fn create_transaction(
        &self,
        reg_no: &str,
        account_no: &str,
        id: &str,
        request: TransactionUpdateRequest,
        now: DateTime<Utc>,
    ) -> Result<Option<(Transaction, bool)>> {
        Transaction::validate_description(&request.description)?;
        let amount = Transaction::parse_amount(&request.amount)?;

        let transaction = Transaction {
            id: id.to_string(),
            reg_no: reg_no.to_string(),
            account_no: account_no.to_string(),
            amount,
            description: request.description,
            date: now,
        };
        let key = Event::category_for(reg_no, account_no);
        let event = Event::new(
            &format!("accounts/{}/transactions/{}", key, transaction.id),
            &key,
            &format!("new transaction on account {}", key),
            now,
        );

        match self.store.book_transaction(&transaction, &event).await? {
            Booking::Booked { account, event } => {
                info!(
                    "Booked transaction {} of {:.2} on {} as event {}, balance now {:.2}",
                    transaction.id,
                    amount,
                    key,
                    event.sequence,
                    account.balance
                );
            }
            Booking::AlreadyBooked(existing) => {
                info!("Transaction {} already booked on {}", id, key);
                return Ok(Some((existing, false)));
            }
            Booking::UnknownAccount => return Ok(None),
        }
        Ok(Some((transaction, true)))
    }
}
