//! # REST API for Transactions
//!
//! Transactions live under their account:
//! `/accounts/:account/transactions[/:id]`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use shared::TransactionUpdateRequest;
use tracing::info;

use super::errors::ApiError;
use super::mappers::TransactionMapper;
use super::params::CapabilityParams;
use super::representation::project;
use crate::domain::capabilities::{CapabilityQuery, ProjectionSpec};
use crate::domain::models::{Account, Transaction};
use crate::AppState;

/// List the transactions of one account shaped by the capability parameters
pub async fn list_transactions(
    State(state): State<AppState>,
    Path(account): Path<String>,
    CapabilityParams(raw): CapabilityParams,
) -> Result<Json<Value>, ApiError> {
    info!("GET /accounts/{}/transactions - query: {:?}", account, raw);

    let (reg_no, account_no) = Account::parse_key(&account)?;
    let query = CapabilityQuery::parse(&raw, state.clock.now())?;
    query.validate_for::<Transaction>()?;

    let transactions = state
        .transaction_service
        .list_transactions(&reg_no, &account_no, &query)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Account {} not found", account)))?;

    let representations = transactions
        .into_iter()
        .map(|transaction| project(&TransactionMapper::to_dto(transaction), &query.projection))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(Value::Array(representations)))
}

pub async fn get_transaction(
    State(state): State<AppState>,
    Path((account, id)): Path<(String, String)>,
    CapabilityParams(raw): CapabilityParams,
) -> Result<Json<Value>, ApiError> {
    info!("GET /accounts/{}/transactions/{} - query: {:?}", account, id, raw);

    let (reg_no, account_no) = Account::parse_key(&account)?;
    let query = CapabilityQuery::parse(&raw, state.clock.now())?;
    query.validate_for::<Transaction>()?;

    let transaction = state
        .transaction_service
        .get_transaction(&reg_no, &account_no, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Transaction {} not found on account {}", id, account)))?;
    Ok(Json(project(&TransactionMapper::to_dto(transaction), &query.projection)?))
}

/// Book a transaction under a client-chosen id
pub async fn put_transaction(
    State(state): State<AppState>,
    Path((account, id)): Path<(String, String)>,
    Json(request): Json<TransactionUpdateRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    info!("PUT /accounts/{}/transactions/{} - request: {:?}", account, id, request);

    let (reg_no, account_no) = Account::parse_key(&account)?;
    let (transaction, created) = state
        .transaction_service
        .create_transaction(&reg_no, &account_no, &id, request, state.clock.now())
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Account {} not found", account)))?;

    let status = if created { StatusCode::CREATED } else { StatusCode::OK };
    Ok((status, Json(project(&TransactionMapper::to_dto(transaction), &ProjectionSpec::All)?)))
}
