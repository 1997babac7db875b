//! Endpoint paths and URL helpers for the dashboard API.
//!
//! Paths are root-relative, so they resolve against the host of the base URL and
//! replace any path it carries. Query values are percent-encoded.
use reqwest::Url;

use crate::error::DashboardError;

/// Market status list.
pub const STOCK_STATUS_PATH: &str = "/api/stock_status/";
/// Instrument symbol search.
pub const SEARCH_INSTRUMENTS_PATH: &str = "/search_instruments/";
/// Instrument bid/ask price.
pub const INSTRUMENT_PRICE_PATH: &str = "/instrument_price/";

/// Query parameter carrying the search text.
pub const SEARCH_QUERY_PARAM: &str = "q";
/// Query parameter carrying the instrument symbol.
pub const SYMBOL_PARAM: &str = "symbol";

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Resolved endpoint URLs for one dashboard server.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    /// Parse `base` (e.g., `http://127.0.0.1:8000`) into a set of endpoints.
    pub fn new(base: &str) -> Result<Self, DashboardError> {
        let base = Url::parse(base.trim())
            .map_err(|e| DashboardError::InvalidUrl(format!("{}: {}", base, e)))?;
        if base.cannot_be_a_base() {
            return Err(DashboardError::InvalidUrl(format!(
                "{} cannot be used as a base URL",
                base
            )));
        }
        Ok(Self { base })
    }

    /// The configured base URL.
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// `GET /api/stock_status/`
    pub fn stock_status(&self) -> Result<Url, DashboardError> {
        self.join(STOCK_STATUS_PATH)
    }

    /// `GET /search_instruments/?q=<query>`
    pub fn search_instruments(&self, query: &str) -> Result<Url, DashboardError> {
        let mut url = self.join(SEARCH_INSTRUMENTS_PATH)?;
        url.query_pairs_mut().append_pair(SEARCH_QUERY_PARAM, query);
        Ok(url)
    }

    /// `GET /instrument_price/?symbol=<symbol>`
    pub fn instrument_price(&self, symbol: &str) -> Result<Url, DashboardError> {
        let mut url = self.join(INSTRUMENT_PRICE_PATH)?;
        url.query_pairs_mut().append_pair(SYMBOL_PARAM, symbol);
        Ok(url)
    }

    fn join(&self, path: &str) -> Result<Url, DashboardError> {
        self.base
            .join(path)
            .map_err(|e| DashboardError::InvalidUrl(format!("{}{}: {}", self.base, path, e)))
    }
}
