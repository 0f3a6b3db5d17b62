//! Query-string extraction for the capability parameters.
//!
//! Form decoding turns a literal `+` into a space, but `+` is the suffix
//! operator of the capability grammars, so it is kept literal here. A client
//! that means a space sends `%20`.

use axum::async_trait;
use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use axum::http::Uri;

use super::errors::ApiError;
use crate::domain::capabilities::RawCapabilities;

#[derive(Debug, Clone, Default)]
pub struct CapabilityParams(pub RawCapabilities);

impl CapabilityParams {
    pub fn from_query(query: Option<&str>) -> Result<Self, ApiError> {
        let Some(query) = query else {
            return Ok(Self::default());
        };
        let uri: Uri = format!("/?{}", query.replace('+', "%2B"))
            .parse()
            .map_err(|_| ApiError::BadRequest("Invalid query string".to_string()))?;
        let Query(raw) = Query::<RawCapabilities>::try_from_uri(&uri)
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        Ok(Self(raw))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CapabilityParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Self::from_query(parts.uri.query())
    }
}
