use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{migrate::MigrateDatabase, sqlite::SqliteRow, Row, Sqlite, SqlitePool};
use std::sync::Arc;
use tracing::info;

use super::traits::{Booking, RecordStore};
use crate::domain::models::{Account, Event, Transaction};

/// DbConnection manages database operations
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Create a new database connection
    pub async fn new(url: &str) -> Result<Self> {
        // Create database if it doesn't exist
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            info!("Creating database {}", url);
            Sqlite::create_database(url).await?
        }

        let pool = SqlitePool::connect(url).await?;
        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Initialize a test database with a unique name
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        let test_id = uuid::Uuid::new_v4().simple().to_string();
        let db_url = format!("sqlite:file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url).await
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS accounts (
                reg_no TEXT NOT NULL,
                account_no TEXT NOT NULL,
                name TEXT NOT NULL,
                balance REAL NOT NULL,
                last_update TEXT NOT NULL,
                UNIQUE (reg_no, account_no)
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS transactions (
                id TEXT NOT NULL,
                reg_no TEXT NOT NULL,
                account_no TEXT NOT NULL,
                amount REAL NOT NULL,
                description TEXT NOT NULL,
                date TEXT NOT NULL,
                PRIMARY KEY (reg_no, account_no, id)
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS events (
                sequence INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL UNIQUE,
                category TEXT NOT NULL,
                origin TEXT NOT NULL,
                information TEXT NOT NULL,
                time TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Get the underlying SQLite pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn parse_time(text: &str) -> Result<DateTime<Utc>> {
    let time = DateTime::parse_from_rfc3339(text)
        .with_context(|| format!("Invalid stored timestamp: {}", text))?;
    Ok(time.with_timezone(&Utc))
}

fn account_from_row(row: &SqliteRow) -> Result<Account> {
    Ok(Account {
        reg_no: row.try_get("reg_no")?,
        account_no: row.try_get("account_no")?,
        name: row.try_get("name")?,
        balance: row.try_get("balance")?,
        last_update: parse_time(row.try_get("last_update")?)?,
    })
}

fn transaction_from_row(row: &SqliteRow) -> Result<Transaction> {
    Ok(Transaction {
        id: row.try_get("id")?,
        reg_no: row.try_get("reg_no")?,
        account_no: row.try_get("account_no")?,
        amount: row.try_get("amount")?,
        description: row.try_get("description")?,
        date: parse_time(row.try_get("date")?)?,
    })
}

fn event_from_row(row: &SqliteRow) -> Result<Event> {
    Ok(Event {
        id: row.try_get("id")?,
        sequence: row.try_get("sequence")?,
        category: row.try_get("category")?,
        origin: row.try_get("origin")?,
        information: row.try_get("information")?,
        time: parse_time(row.try_get("time")?)?,
    })
}

#[async_trait]
impl RecordStore for DbConnection {
    async fn list_accounts(&self) -> Result<Vec<Account>> {
        let rows = sqlx::query("SELECT * FROM accounts ORDER BY rowid")
            .fetch_all(self.pool())
            .await?;
        rows.iter().map(account_from_row).collect()
    }

    async fn find_account(&self, reg_no: &str, account_no: &str) -> Result<Option<Account>> {
        let row = sqlx::query("SELECT * FROM accounts WHERE reg_no = ? AND account_no = ?")
            .bind(reg_no)
            .bind(account_no)
            .fetch_optional(self.pool())
            .await?;
        row.as_ref().map(account_from_row).transpose()
    }

    async fn save_account(&self, account: &Account) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO accounts (reg_no, account_no, name, balance, last_update)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT (reg_no, account_no) DO UPDATE SET
                name = excluded.name,
                last_update = excluded.last_update
            "#,
        )
        .bind(&account.reg_no)
        .bind(&account.account_no)
        .bind(&account.name)
        .bind(account.balance)
        .bind(account.last_update.to_rfc3339())
        .execute(self.pool())
        .await?;
        Ok(())
    }

    async fn list_transactions(&self, reg_no: &str, account_no: &str) -> Result<Vec<Transaction>> {
        let rows = sqlx::query("SELECT * FROM transactions WHERE reg_no = ? AND account_no = ? ORDER BY rowid")
            .bind(reg_no)
            .bind(account_no)
            .fetch_all(self.pool())
            .await?;
        rows.iter().map(transaction_from_row).collect()
    }

    async fn find_transaction(&self, reg_no: &str, account_no: &str, id: &str) -> Result<Option<Transaction>> {
        let row = sqlx::query("SELECT * FROM transactions WHERE reg_no = ? AND account_no = ? AND id = ?")
            .bind(reg_no)
            .bind(account_no)
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        row.as_ref().map(transaction_from_row).transpose()
    }

    async fn book_transaction(&self, transaction: &Transaction, event: &Event) -> Result<Booking> {
        // Writes come first so concurrent bookings queue on the write lock
        // instead of upgrading a read lock.
        let mut tx = self.pool().begin().await?;

        let updated = sqlx::query(
            "UPDATE accounts SET balance = balance + ?, last_update = ? WHERE reg_no = ? AND account_no = ?",
        )
        .bind(transaction.amount)
        .bind(transaction.date.to_rfc3339())
        .bind(&transaction.reg_no)
        .bind(&transaction.account_no)
        .execute(&mut *tx)
        .await?;
        if updated.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(Booking::UnknownAccount);
        }

        let inserted = sqlx::query(
            r#"
            INSERT INTO transactions (id, reg_no, account_no, amount, description, date)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT (reg_no, account_no, id) DO NOTHING
            "#,
        )
        .bind(&transaction.id)
        .bind(&transaction.reg_no)
        .bind(&transaction.account_no)
        .bind(transaction.amount)
        .bind(&transaction.description)
        .bind(transaction.date.to_rfc3339())
        .execute(&mut *tx)
        .await?;
        if inserted.rows_affected() == 0 {
            tx.rollback().await?;
            let existing = self
                .find_transaction(&transaction.reg_no, &transaction.account_no, &transaction.id)
                .await?
                .with_context(|| format!("Transaction {} vanished while booking", transaction.id))?;
            return Ok(Booking::AlreadyBooked(existing));
        }

        let appended = sqlx::query(
            "INSERT INTO events (id, category, origin, information, time) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&event.id)
        .bind(&event.category)
        .bind(&event.origin)
        .bind(&event.information)
        .bind(event.time.to_rfc3339())
        .execute(&mut *tx)
        .await?;

        let row = sqlx::query("SELECT * FROM accounts WHERE reg_no = ? AND account_no = ?")
            .bind(&transaction.reg_no)
            .bind(&transaction.account_no)
            .fetch_one(&mut *tx)
            .await?;
        let account = account_from_row(&row)?;

        tx.commit().await?;

        Ok(Booking::Booked {
            account,
            event: Event {
                sequence: appended.last_insert_rowid(),
                ..event.clone()
            },
        })
    }

    async fn list_events(&self, category: Option<&str>) -> Result<Vec<Event>> {
        let rows = match category {
            Some(category) => {
                sqlx::query("SELECT * FROM events WHERE category = ? ORDER BY sequence")
                    .bind(category)
                    .fetch_all(self.pool())
                    .await?
            }
            None => {
                sqlx::query("SELECT * FROM events ORDER BY sequence")
                    .fetch_all(self.pool())
                    .await?
            }
        };
        rows.iter().map(event_from_row).collect()
    }

    async fn find_event(&self, category: &str, id: &str) -> Result<Option<Event>> {
        let row = sqlx::query("SELECT * FROM events WHERE category = ? AND id = ?")
            .bind(category)
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        row.as_ref().map(event_from_row).transpose()
    }

    async fn save_event(&self, event: &Event) -> Result<Event> {
        let result = sqlx::query(
            "INSERT INTO events (id, category, origin, information, time) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&event.id)
        .bind(&event.category)
        .bind(&event.origin)
        .bind(&event.information)
        .bind(event.time.to_rfc3339())
        .execute(self.pool())
        .await?;

        Ok(Event {
            sequence: result.last_insert_rowid(),
            ..event.clone()
        })
    }
}
