//! # REST API Interface Layer
//!
//! Thin axum handlers over the domain services. Each handler:
//! - reads the clock once and parses the capability parameters against it
//! - rejects attribute names the resource does not expose
//! - calls the service and builds the JSON representation, honouring
//!   `filter` and `embed`
//!
//! Malformed queries and invalid bodies become `400`, unknown resources
//! `404`, anything else `500`.

pub mod account_apis;
pub mod errors;
pub mod event_apis;
pub mod mappers;
pub mod params;
pub mod representation;
pub mod transaction_apis;

pub use account_apis::*;
pub use errors::ApiError;
pub use event_apis::*;
pub use params::CapabilityParams;
pub use transaction_apis::*;
