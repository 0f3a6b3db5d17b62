//! Domain layer: the capability query engine, domain records and the
//! services that serve them.

pub mod account_service;
pub mod capabilities;
pub mod event_service;
pub mod models;
pub mod transaction_service;

pub use account_service::AccountService;
pub use event_service::EventService;
pub use transaction_service::TransactionService;
