//! Market status poller.
//!
//! Fetches `/api/stock_status/` and replaces the status table with one row per
//! exchange. A failed fetch is logged and the table keeps whatever it showed before.
use std::sync::Arc;
use std::time::Duration;

use dashboard_common::{Result, StockStatus};
use log::{debug, error};

use crate::api::DashboardApi;
use crate::scheduler::{Scheduler, TaskHandle};
use crate::view::{Node, StatusRow};

/// Map the server's status list onto table rows, keeping its order.
pub fn render_rows(statuses: &[StockStatus]) -> Vec<StatusRow> {
    statuses
        .iter()
        .enumerate()
        .map(|(i, stock)| StatusRow {
            index: i + 1,
            name: stock.name.clone(),
            status: stock.status.clone(),
            css_class: stock.css_class.clone(),
            time_to_open: stock.time_to_open.clone(),
        })
        .collect()
}

/// Keeps the status table in sync with the server.
pub struct StatusPoller {
    api: Arc<dyn DashboardApi>,
    table: Node<Vec<StatusRow>>,
}

impl StatusPoller {
    pub fn new(api: Arc<dyn DashboardApi>, table: Node<Vec<StatusRow>>) -> Self {
        Self { api, table }
    }

    /// Fetch once and replace the table rows.
    pub fn refresh(&self) -> Result<()> {
        let statuses = self.api.stock_status()?;
        debug!("Received {} market statuses", statuses.len());
        self.table.set(render_rows(&statuses))
    }

    /// Refresh, logging a failure instead of returning it.
    pub fn poll(&self) {
        if let Err(e) = self.refresh() {
            error!("Error fetching stock market status: {}", e);
        }
    }

    /// Refresh now and then every `interval` until the handle is cancelled.
    pub fn start(self, interval: Duration) -> Result<TaskHandle> {
        Scheduler::every("status-poller", interval, move || self.poll())
    }
}
