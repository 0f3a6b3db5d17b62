//! # REST API for Account Events
//!
//! Read-only access to the event stream, globally or per category.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;
use shared::{EventsMetadata, EventsMetadataRepresentation};
use tracing::info;

use super::errors::ApiError;
use super::mappers::EventMapper;
use super::params::CapabilityParams;
use super::representation::project;
use crate::domain::capabilities::CapabilityQuery;
use crate::domain::models::Event;
use crate::AppState;

pub async fn list_events(
    State(state): State<AppState>,
    CapabilityParams(raw): CapabilityParams,
) -> Result<Json<Value>, ApiError> {
    info!("GET /account-events - query: {:?}", raw);

    let query = CapabilityQuery::parse(&raw, state.clock.now())?;
    query.validate_for::<Event>()?;

    let events = state.event_service.list_events(&query).await?;
    represent_all(events, &query)
}

pub async fn list_events_for_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
    CapabilityParams(raw): CapabilityParams,
) -> Result<Json<Value>, ApiError> {
    info!("GET /account-events/{} - query: {:?}", category, raw);

    let query = CapabilityQuery::parse(&raw, state.clock.now())?;
    query.validate_for::<Event>()?;

    let events = state.event_service.list_events_for_category(&category, &query).await?;
    represent_all(events, &query)
}

pub async fn get_event(
    State(state): State<AppState>,
    Path((category, id)): Path<(String, String)>,
    CapabilityParams(raw): CapabilityParams,
) -> Result<Json<Value>, ApiError> {
    info!("GET /account-events/{}/{} - query: {:?}", category, id, raw);

    let query = CapabilityQuery::parse(&raw, state.clock.now())?;
    query.validate_for::<Event>()?;

    let event = state
        .event_service
        .get_event(&category, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Event {} not found in category {}", id, category)))?;
    Ok(Json(project(&EventMapper::to_dto(event), &query.projection)?))
}

/// Describe the event stream. The document is fixed for this version.
pub async fn get_events_metadata() -> Json<EventsMetadataRepresentation> {
    info!("GET /account-events/metadata");

    Json(EventsMetadataRepresentation {
        metadata: EventsMetadata {
            description: "Non-persisted metadata for the events on accounts".to_string(),
            purpose: "Deliver service information as part of the service, not only in the API docs".to_string(),
            supported_versions: "1".to_string(),
        },
    })
}

fn represent_all(events: Vec<Event>, query: &CapabilityQuery) -> Result<Json<Value>, ApiError> {
    let representations = events
        .into_iter()
        .map(|event| project(&EventMapper::to_dto(event), &query.projection))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(Value::Array(representations)))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{put_json, send_get, test_state};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_transactions_produce_events() {
        let state = test_state().await;
        let body = json!({"regNo": "5479", "accountNo": "1234", "name": "Savings"});
        put_json(&state, "/accounts/5479-1234", body).await;
        for id in ["tx-1", "tx-2"] {
            let body = json!({"description": "Coffee", "amount": "2.00"});
            put_json(&state, &format!("/accounts/5479-1234/transactions/{}", id), body).await;
        }

        let (status, events) = send_get(&state, "/account-events/5479-1234?sort=sequence-").await;
        assert_eq!(status, StatusCode::OK);
        let events = events.as_array().unwrap().clone();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0]["origin"], "accounts/5479-1234/transactions/tx-2");
        assert_eq!(events[0]["information"], "new transaction on account 5479-1234");

        let id = events[1]["id"].as_str().unwrap();
        let (status, event) = send_get(&state, &format!("/account-events/5479-1234/{}?filter=origin::+", id)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(event, json!({"origin": "accounts/5479-1234/transactions/tx-1"}));

        let (status, _) = send_get(&state, &format!("/account-events/default/{}", id)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_events_metadata() {
        let state = test_state().await;
        let (status, body) = send_get(&state, "/account-events/metadata").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["metadata"]["supported-versions"], "1");
        assert!(body["metadata"]["description"].is_string());
    }

    #[tokio::test]
    async fn test_list_all_events() {
        let state = test_state().await;
        let (status, events) = send_get(&state, "/account-events?elements=0%7C9").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(events, json!([]));

        let (status, _) = send_get(&state, "/account-events?sort=balance").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
