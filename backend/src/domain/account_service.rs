//! Account service domain logic.
use anyhow::Result;
use chrono::{DateTime, Utc};
use shared::AccountUpdateRequest;
use tracing::info;

use crate::domain::capabilities::CapabilityQuery;
use crate::domain::models::{Account, ValidationError};
use crate::storage::RecordStore;

#[derive(Clone)]
pub struct AccountService<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> AccountService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// List accounts shaped by the request's capabilities.
    pub async fn list_accounts(&self, query: &CapabilityQuery) -> Result<Vec<Account>> {
        let accounts = self.store.list_accounts().await?;
        let shaped: Vec<Account> = query.apply(&accounts).into_iter().cloned().collect();
        info!("Listing {} of {} accounts", shaped.len(), accounts.len());
        Ok(shaped)
    }

    pub async fn get_account(&self, reg_no: &str, account_no: &str) -> Result<Option<Account>> {
        info!("Getting account {}-{}", reg_no, account_no);
        self.store.find_account(reg_no, account_no).await
    }

    /// Create the account, or rename it when it already exists.
    /// Returns the stored account and whether it was created.
    pub async fn create_or_update(
        &self,
        reg_no: &str,
        account_no: &str,
        request: AccountUpdateRequest,
        now: DateTime<Utc>,
    ) -> Result<(Account, bool)> {
        Account::validate_numbers(reg_no, account_no)?;
        if request.reg_no != reg_no || request.account_no != account_no {
            return Err(ValidationError::AccountMismatch.into());
        }
        if request.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }

        let (account, created) = match self.store.find_account(reg_no, account_no).await? {
            Some(mut existing) => {
                existing.name = request.name;
                existing.last_update = now;
                (existing, false)
            }
            None => (Account::new(reg_no, account_no, &request.name, now), true),
        };
        self.store.save_account(&account).await?;

        info!(
            "{} account {} ({})",
            if created { "Created" } else { "Updated" },
            account.key(),
            account.name
        );
        Ok((account, created))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::capabilities::RawCapabilities;
    use crate::storage::DbConnection;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2016, 10, 14, 0, 0, 0).unwrap()
    }

    async fn create_test_service() -> AccountService<DbConnection> {
        let db = DbConnection::init_test().await.expect("Failed to init test DB");
        AccountService::new(db)
    }

    fn update(reg_no: &str, account_no: &str, name: &str) -> AccountUpdateRequest {
        AccountUpdateRequest {
            reg_no: reg_no.to_string(),
            account_no: account_no.to_string(),
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_then_update() {
        let service = create_test_service().await;

        let (account, created) = service
            .create_or_update("5479", "12345678", update("5479", "12345678", "new Account"), now())
            .await
            .unwrap();
        assert!(created);
        assert_eq!(account.name, "new Account");
        assert_eq!(account.balance, 0.0);

        let (account, created) = service
            .create_or_update("5479", "12345678", update("5479", "12345678", "new name"), now())
            .await
            .unwrap();
        assert!(!created);
        assert_eq!(account.name, "new name");

        let stored = service.get_account("5479", "12345678").await.unwrap().unwrap();
        assert_eq!(stored.name, "new name");
    }

    #[tokio::test]
    async fn test_mismatched_body_is_rejected() {
        let service = create_test_service().await;
        let err = service
            .create_or_update("5479", "87654321", update("5479", "12345678", "x"), now())
            .await
            .unwrap_err();
        assert_eq!(err.downcast_ref::<ValidationError>(), Some(&ValidationError::AccountMismatch));
        assert!(service.get_account("5479", "87654321").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_accounts_with_capabilities() {
        let service = create_test_service().await;
        for (account_no, name) in [("1", "Checking account"), ("2", "Savings account"), ("3", "Budget")] {
            service
                .create_or_update("5479", account_no, update("5479", account_no, name), now())
                .await
                .unwrap();
        }

        let all = service.list_accounts(&CapabilityQuery::default()).await.unwrap();
        assert_eq!(all.len(), 3);

        let raw = RawCapabilities {
            sort: Some("name-".to_string()),
            elements: Some("0|1".to_string()),
            ..Default::default()
        };
        let query = CapabilityQuery::parse(&raw, now()).unwrap();
        let names: Vec<String> = service
            .list_accounts(&query)
            .await
            .unwrap()
            .into_iter()
            .map(|account| account.name)
            .collect();
        assert_eq!(names, vec!["Savings account", "Checking account"]);
    }
}
