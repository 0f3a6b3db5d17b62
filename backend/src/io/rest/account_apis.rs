//! # REST API for Accounts
//!
//! `GET /accounts`, `GET /accounts/:account` and `PUT /accounts/:account`,
//! where `:account` is `<regNo>-<accountNo>`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use shared::AccountUpdateRequest;
use tracing::info;

use super::errors::ApiError;
use super::mappers::AccountMapper;
use super::params::CapabilityParams;
use super::representation::{embed_transactions, project, wants_transactions};
use crate::domain::capabilities::CapabilityQuery;
use crate::domain::models::Account;
use crate::AppState;

/// List accounts shaped by the capability parameters
pub async fn list_accounts(
    State(state): State<AppState>,
    CapabilityParams(raw): CapabilityParams,
) -> Result<Json<Value>, ApiError> {
    info!("GET /accounts - query: {:?}", raw);

    let query = CapabilityQuery::parse(&raw, state.clock.now())?;
    query.validate_for::<Account>()?;

    let accounts = state.account_service.list_accounts(&query).await?;
    let mut representations = Vec::with_capacity(accounts.len());
    for account in accounts {
        representations.push(represent(&state, account, &query).await?);
    }
    Ok(Json(Value::Array(representations)))
}

/// Get one account; `filter` and `embed` apply to its representation
pub async fn get_account(
    State(state): State<AppState>,
    Path(account): Path<String>,
    CapabilityParams(raw): CapabilityParams,
) -> Result<Json<Value>, ApiError> {
    info!("GET /accounts/{} - query: {:?}", account, raw);

    let (reg_no, account_no) = Account::parse_key(&account)?;
    let query = CapabilityQuery::parse(&raw, state.clock.now())?;
    query.validate_for::<Account>()?;

    let found = state
        .account_service
        .get_account(&reg_no, &account_no)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Account {} not found", account)))?;
    Ok(Json(represent(&state, found, &query).await?))
}

/// Create an account or rename an existing one
pub async fn put_account(
    State(state): State<AppState>,
    Path(account): Path<String>,
    Json(request): Json<AccountUpdateRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    info!("PUT /accounts/{} - request: {:?}", account, request);

    let (reg_no, account_no) = Account::parse_key(&account)?;
    let (stored, created) = state
        .account_service
        .create_or_update(&reg_no, &account_no, request, state.clock.now())
        .await?;

    let status = if created { StatusCode::CREATED } else { StatusCode::OK };
    Ok((status, Json(represent(&state, stored, &CapabilityQuery::default()).await?)))
}

async fn represent(state: &AppState, account: Account, query: &CapabilityQuery) -> Result<Value, ApiError> {
    let transactions = if wants_transactions(&query.embed) {
        state
            .transaction_service
            .all_transactions(&account.reg_no, &account.account_no)
            .await?
    } else {
        Vec::new()
    };

    let mut representation = project(&AccountMapper::to_dto(account), &query.projection)?;
    embed_transactions(&mut representation, &transactions, &query.embed)?;
    Ok(representation)
}
