//! # Storage Layer
//!
//! The record store the capability pipeline draws its candidate sequences
//! from. Domain services depend on the [`RecordStore`] trait; [`DbConnection`]
//! implements it on SQLite.

pub mod db;
pub mod traits;

pub use db::DbConnection;
pub use traits::{Booking, RecordStore};
