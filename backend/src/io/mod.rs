//! # IO Layer
//!
//! Exposes the domain services over HTTP.

pub mod rest;

pub use rest::*;
