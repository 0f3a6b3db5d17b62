//! # Account Service
//!
//! A REST service for accounts, their transactions and the events those
//! transactions produce. Every collection endpoint can be shaped through the
//! capability query parameters (`select`, `sort`, `interval`, `elements`,
//! `filter`, `embed`) implemented in [`domain::capabilities`].
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (REST handlers)
//!     ↓
//! Domain Layer (capability engine, services)
//!     ↓
//! Storage Layer (SQLite)
//! ```

pub mod clock;
pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::domain::{AccountService, EventService, TransactionService};
use crate::storage::DbConnection;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub account_service: AccountService<DbConnection>,
    pub transaction_service: TransactionService<DbConnection>,
    pub event_service: EventService<DbConnection>,
    /// Read once per request; every relative interval bound resolves against it.
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(db_conn: DbConnection, clock: Arc<dyn Clock>) -> Self {
        Self {
            account_service: AccountService::new(db_conn.clone()),
            transaction_service: TransactionService::new(db_conn.clone()),
            event_service: EventService::new(db_conn),
            clock,
        }
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &Config) -> Result<AppState> {
    info!("Setting up database at {}", config.database_url);
    let db_conn = DbConnection::new(&config.database_url).await?;

    info!("Setting up application state");
    Ok(AppState::new(db_conn, Arc::new(SystemClock)))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, cors_origin: &str) -> Result<Router> {
    let origin = cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin '{}'", cors_origin))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::PUT])
        .allow_headers(Any);

    let router = Router::new()
        .route("/accounts", get(io::list_accounts))
        .route("/accounts/:account", get(io::get_account).put(io::put_account))
        .route("/accounts/:account/transactions", get(io::list_transactions))
        .route(
            "/accounts/:account/transactions/:id",
            get(io::get_transaction).put(io::put_transaction),
        )
        .route("/account-events", get(io::list_events))
        .route("/account-events/metadata", get(io::get_events_metadata))
        .route("/account-events/:category", get(io::list_events_for_category))
        .route("/account-events/:category/:id", get(io::get_event))
        .layer(cors)
        .with_state(app_state);
    Ok(router)
}
