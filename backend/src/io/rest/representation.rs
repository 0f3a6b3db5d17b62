//! JSON representations that honour the `filter` and `embed` capabilities.
//!
//! Filtering removes or keeps top-level attributes of a record. Embedded
//! objects live under `_embedded` and are added after filtering, so the
//! projection never hides them.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::capabilities::{EmbedRequests, ProjectionSpec};
use crate::domain::models::Transaction;

use super::errors::ApiError;
use super::mappers::TransactionMapper;

pub const EMBEDDED: &str = "_embedded";
pub const TRANSACTIONS_CONCEPT: &str = "transactions";
pub const SPARSE_PROJECTION: &str = "sparse";

/// Serialize `value` and drop the top-level attributes the projection does not admit.
pub fn project<T: Serialize>(value: &T, projection: &ProjectionSpec) -> Result<Value, ApiError> {
    let mut json = serde_json::to_value(value)
        .map_err(|e| ApiError::Internal(format!("Failed to serialize representation: {}", e)))?;
    if let Value::Object(map) = &mut json {
        map.retain(|attribute, _| projection.admits(attribute));
    }
    Ok(json)
}

/// Embed an account's transactions when the request asks for them. The last
/// request for the concept decides the projection; other concepts are ignored.
pub fn embed_transactions(
    representation: &mut Value,
    transactions: &[Transaction],
    embed: &EmbedRequests,
) -> Result<(), ApiError> {
    let Some(request) = embed.for_concept(TRANSACTIONS_CONCEPT).last() else {
        return Ok(());
    };

    let embedded = if request.projection == SPARSE_PROJECTION {
        let sparse: Vec<_> = transactions.iter().cloned().map(TransactionMapper::to_sparse_dto).collect();
        serde_json::to_value(sparse)
    } else {
        let full: Vec<_> = transactions.iter().cloned().map(TransactionMapper::to_dto).collect();
        serde_json::to_value(full)
    }
    .map_err(|e| ApiError::Internal(format!("Failed to serialize embedded transactions: {}", e)))?;

    if let Value::Object(map) = representation {
        let mut concepts = Map::new();
        concepts.insert(TRANSACTIONS_CONCEPT.to_string(), embedded);
        map.insert(EMBEDDED.to_string(), Value::Object(concepts));
    }
    Ok(())
}

/// Whether the request embeds anything this service knows how to resolve.
pub fn wants_transactions(embed: &EmbedRequests) -> bool {
    embed.for_concept(TRANSACTIONS_CONCEPT).next().is_some()
}
