//! Page assembly: the view nodes, the three widgets and their periodic tasks.
use std::sync::Arc;
use std::time::Duration;

use dashboard_common::Result;
use log::{info, warn};

use crate::api::DashboardApi;
use crate::clock::Clock;
use crate::poller::StatusPoller;
use crate::price::PriceLoader;
use crate::scheduler::TaskHandle;
use crate::search::SymbolSearch;
use crate::view::{Frame, Node, PriceReport, StatusRow, SuggestionBox};

/// Read-only handles to every node of the page.
#[derive(Clone)]
pub struct Page {
    pub table: Node<Vec<StatusRow>>,
    pub clock: Option<Node<String>>,
    pub price_panel: Option<Node<Option<PriceReport>>>,
    pub input: Node<String>,
    pub suggestions: Node<SuggestionBox>,
}

impl Page {
    /// Snapshot every node.
    pub fn frame(&self) -> Result<Frame> {
        let clock = match &self.clock {
            Some(label) => Some(label.snapshot()?),
            None => None,
        };
        let price = match &self.price_panel {
            Some(panel) => Some(panel.snapshot()?),
            None => None,
        };
        Ok(Frame {
            clock,
            rows: self.table.snapshot()?,
            input: self.input.snapshot()?,
            suggestions: self.suggestions.snapshot()?,
            price,
        })
    }
}

/// Refresh intervals of the periodic widgets.
#[derive(Debug, Clone, Copy)]
pub struct Intervals {
    pub status: Duration,
    pub clock: Duration,
}

/// The running dashboard.
pub struct Dashboard {
    api: Arc<dyn DashboardApi>,
    page: Page,
    search: SymbolSearch,
    tasks: Vec<TaskHandle>,
}

impl Dashboard {
    pub fn new(api: Arc<dyn DashboardApi>, default_symbol: &str) -> Self {
        let price_panel = Node::new(None);
        let prices = PriceLoader::new(Arc::clone(&api), Some(price_panel.clone()));
        let search = SymbolSearch::new(Arc::clone(&api), prices, default_symbol);
        let page = Page {
            table: Node::new(Vec::new()),
            clock: Some(Node::new(String::new())),
            price_panel: Some(price_panel),
            input: search.input_node().clone(),
            suggestions: search.suggestions_node().clone(),
        };
        Self {
            api,
            page,
            search,
            tasks: Vec::new(),
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn search(&self) -> &SymbolSearch {
        &self.search
    }

    /// Start the status poller and the clock, then load the default price.
    pub fn start(&mut self, intervals: Intervals) -> Result<()> {
        let poller = StatusPoller::new(Arc::clone(&self.api), self.page.table.clone());
        self.tasks.push(poller.start(intervals.status)?);

        let clock = Clock::new(self.page.clock.clone());
        self.tasks.push(clock.start(intervals.clock)?);

        self.search.load_default();
        Ok(())
    }

    /// Cancel every periodic task.
    pub fn shutdown(&mut self) {
        for task in self.tasks.drain(..) {
            if task.is_finished() {
                warn!("Task '{}' had already exited", task.name());
            }
            info!("Stopping task '{}'", task.name());
            task.cancel();
        }
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        self.shutdown();
    }
}
