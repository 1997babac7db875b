//! JSON payloads returned by the dashboard endpoints.
//!
//! Only the fields the dashboard consumes are modelled; anything else the server sends
//! (for example `currency` or `categoryName` on a search result) is ignored by `serde`.
use serde::{Deserialize, Serialize};

/// Trading status of a single exchange, as listed by `/api/stock_status/`.
///
/// The list has no identifier: the position in the array is the identity and the
/// server-side order is the display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockStatus {
    /// Exchange name (e.g., `NASDAQ`).
    pub name: String,
    /// Human readable status text (e.g., `LIVE`, `Closed`).
    pub status: String,
    /// Style class chosen by the server for the status text.
    pub css_class: String,
    /// Time left until the next session opens, `-` while live.
    pub time_to_open: String,
}

/// One entry returned by `/search_instruments/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentSuggestion {
    /// Instrument symbol (e.g., `US500`).
    pub symbol: String,
}

/// Current quote returned by `/instrument_price/`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InstrumentPrice {
    /// Ask price.
    pub ask: f64,
    /// Bid price.
    pub bid: f64,
}

/// Body sent by the server together with a non-success status.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    /// Short error description.
    pub error: String,
    /// Optional upstream detail, passed through as-is.
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

impl ApiErrorBody {
    /// Single-line message suitable for a log record.
    pub fn message(&self) -> String {
        match &self.details {
            Some(serde_json::Value::String(details)) => format!("{} ({})", self.error, details),
            Some(serde_json::Value::Null) | None => self.error.clone(),
            Some(details) => format!("{} ({})", self.error, details),
        }
    }
}
