//! Instrument price panel.
use std::sync::Arc;

use dashboard_common::{InstrumentPrice, Result};
use log::{debug, error};

use crate::api::DashboardApi;
use crate::view::{Node, PriceReport};

/// Build the panel content for `symbol`.
pub fn price_report(symbol: &str, price: &InstrumentPrice) -> PriceReport {
    PriceReport {
        title: format!("{} Price", symbol),
        ask: format!("Ask: {}", price.ask),
        bid: format!("Bid: {}", price.bid),
    }
}

/// Loads prices into the price panel, if the page has one.
#[derive(Clone)]
pub struct PriceLoader {
    api: Arc<dyn DashboardApi>,
    panel: Option<Node<Option<PriceReport>>>,
}

impl PriceLoader {
    pub fn new(api: Arc<dyn DashboardApi>, panel: Option<Node<Option<PriceReport>>>) -> Self {
        Self { api, panel }
    }

    /// Fetch the price of `symbol` and show it. Errors are logged; the panel keeps its
    /// previous content.
    pub fn load(&self, symbol: &str) {
        if let Err(e) = self.try_load(symbol) {
            error!("Error loading price of {}: {}", symbol, e);
        }
    }

    fn try_load(&self, symbol: &str) -> Result<()> {
        let price = self.api.instrument_price(symbol)?;
        debug!("{} ask={} bid={}", symbol, price.ask, price.bid);
        match &self.panel {
            Some(panel) => panel.set(Some(price_report(symbol, &price))),
            None => Ok(()),
        }
    }
}
