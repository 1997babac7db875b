//! Symbol search box with a suggestion dropdown.
//!
//! Every input change starts a suggestion request tagged with a fresh token. A response
//! is applied only while its token is still the latest one issued, so a slow answer to
//! an old keystroke can never replace the dropdown of a newer one. The token check and
//! the dropdown update happen under the dropdown's lock.
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::{self, JoinHandle};

use dashboard_common::{InstrumentSuggestion, Result};
use log::{debug, error, warn};

use crate::api::DashboardApi;
use crate::price::PriceLoader;
use crate::view::{Node, SuggestionBox};

/// An issued suggestion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTicket {
    pub token: u64,
    /// Trimmed query text sent to the server.
    pub query: String,
}

/// The search widget: input value, dropdown, and the request sequence.
#[derive(Clone)]
pub struct SymbolSearch {
    api: Arc<dyn DashboardApi>,
    prices: PriceLoader,
    default_symbol: String,
    input: Node<String>,
    suggestions: Node<SuggestionBox>,
    latest: Arc<AtomicU64>,
}

impl SymbolSearch {
    pub fn new(api: Arc<dyn DashboardApi>, prices: PriceLoader, default_symbol: &str) -> Self {
        Self {
            api,
            prices,
            default_symbol: default_symbol.to_string(),
            input: Node::new(String::new()),
            suggestions: Node::new(SuggestionBox::default()),
            latest: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn input_node(&self) -> &Node<String> {
        &self.input
    }

    pub fn suggestions_node(&self) -> &Node<SuggestionBox> {
        &self.suggestions
    }

    /// Handle an input change and fetch suggestions in the background.
    ///
    /// Returns the worker handle when a request was issued.
    pub fn input(&self, value: &str) -> Result<Option<JoinHandle<()>>> {
        let Some(ticket) = self.begin_query(value)? else {
            return Ok(None);
        };

        let search = self.clone();
        let worker = thread::Builder::new()
            .name(format!("suggest-{}", ticket.token))
            .spawn(move || {
                let result = search.api.search_instruments(&ticket.query);
                if let Err(e) = search.apply_suggestions(&ticket, result) {
                    error!("Failed to update suggestions: {}", e);
                }
            })?;
        Ok(Some(worker))
    }

    /// Record the new input value and issue a request token.
    ///
    /// A blank value hides the dropdown and issues no request.
    pub fn begin_query(&self, value: &str) -> Result<Option<QueryTicket>> {
        self.input.set(value.to_string())?;
        let token = self.next_token();

        let query = value.trim();
        if query.is_empty() {
            self.suggestions.update(SuggestionBox::hide)?;
            return Ok(None);
        }

        debug!("Suggestion request #{} for '{}'", token, query);
        Ok(Some(QueryTicket {
            token,
            query: query.to_string(),
        }))
    }

    /// Apply the server's answer to `ticket`. Returns `false` when it was not applied.
    pub fn apply_suggestions(
        &self,
        ticket: &QueryTicket,
        result: Result<Vec<InstrumentSuggestion>>,
    ) -> Result<bool> {
        let suggestions = match result {
            Ok(suggestions) => suggestions,
            Err(e) => {
                error!("Error searching instruments for '{}': {}", ticket.query, e);
                return Ok(false);
            }
        };

        let applied = self.suggestions.update(|dropdown| {
            if self.latest.load(Ordering::SeqCst) != ticket.token {
                return false;
            }
            dropdown.show(suggestions.into_iter().map(|s| s.symbol).collect());
            true
        })?;

        if !applied {
            debug!(
                "Discarding stale suggestions #{} for '{}'",
                ticket.token, ticket.query
            );
        }
        Ok(applied)
    }

    /// Commit suggestion `index` (0-based) into the input and hide the dropdown.
    pub fn select(&self, index: usize) -> Result<Option<String>> {
        let picked = self.suggestions.update(|dropdown| {
            let symbol = dropdown.entries.get(index).filter(|_| dropdown.visible).cloned();
            if symbol.is_some() {
                // Answers still in flight belong to the text being replaced.
                self.next_token();
                dropdown.hide();
            }
            symbol
        })?;

        match picked {
            Some(symbol) => {
                self.input.set(symbol.clone())?;
                Ok(Some(symbol))
            }
            None => {
                warn!("No suggestion at position {}", index + 1);
                Ok(None)
            }
        }
    }

    /// Load the price of the symbol in the input, if there is one.
    pub fn click_search_icon(&self) -> Result<Option<String>> {
        let symbol = self.input.snapshot()?.trim().to_string();
        if symbol.is_empty() {
            return Ok(None);
        }
        self.prices.load(&symbol);
        Ok(Some(symbol))
    }

    /// Load the configured default symbol.
    pub fn load_default(&self) {
        self.prices.load(&self.default_symbol);
    }

    /// Load `symbol` without touching the input.
    pub fn load_price(&self, symbol: &str) {
        self.prices.load(symbol);
    }

    fn next_token(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }
}
