//! Error types shared by the dashboard crates.
//!
//! The `DashboardError` enum unifies transport, decoding, API status and lock
//! failures so that every component can propagate a single error type
//! and the callers can decide whether to log and continue.
use std::io;
use std::sync::PoisonError;

use thiserror::Error;

/// Unified error type shared by the dashboard crates.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// I/O error originating from the standard library (stdin, sockets).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic formatting/validation error with a human-readable message.
    #[error("Format error: {0}")]
    Format(String),

    /// Transport-level HTTP failure (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the server.
        status: u16,
        /// Message taken from the `error` field of the body, or the raw body.
        message: String,
    },

    /// A base URL or endpoint path could not be parsed or joined.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// Error indicating a poisoned mutex/lock was encountered.
    #[error("Mutex Lock Poisoned: {0}")]
    MutexLock(String),
}

impl<T> From<PoisonError<T>> for DashboardError {
    fn from(err: PoisonError<T>) -> Self {
        DashboardError::MutexLock(err.to_string())
    }
}
