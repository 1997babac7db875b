//!
//! Common types and utilities shared by the market dashboard crates.
//!
//! This crate aggregates:
//! - `error` — unified error type `DashboardError` used across the workspace.
//! - `result` — handy `Result<T, DashboardError>` alias.
//! - `model` — JSON payloads returned by the dashboard endpoints.
//! - `endpoints` — endpoint paths and URL helpers.
#![warn(missing_docs)]
pub mod endpoints;
pub mod error;
pub mod model;
pub mod result;

pub use error::DashboardError;
pub use model::{ApiErrorBody, InstrumentPrice, InstrumentSuggestion, StockStatus};
pub use result::Result;
