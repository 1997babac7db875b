//! UTC clock label.
use std::time::Duration;

use chrono::{DateTime, Utc};
use dashboard_common::Result;
use log::error;

use crate::scheduler::{Scheduler, TaskHandle};
use crate::view::Node;

/// `UTC: HH:MM:SS`, fraction truncated.
pub fn format_utc(now: DateTime<Utc>) -> String {
    format!("UTC: {}", now.format("%H:%M:%S"))
}

pub struct Clock {
    label: Option<Node<String>>,
}

impl Clock {
    pub fn new(label: Option<Node<String>>) -> Self {
        Self { label }
    }

    pub fn tick(&self) -> Result<()> {
        self.tick_at(Utc::now())
    }

    /// Show `now`; does nothing when the page has no clock label.
    pub fn tick_at(&self, now: DateTime<Utc>) -> Result<()> {
        match &self.label {
            Some(label) => label.set(format_utc(now)),
            None => Ok(()),
        }
    }

    /// Tick now and then every `interval` until the handle is cancelled.
    pub fn start(self, interval: Duration) -> Result<TaskHandle> {
        Scheduler::every("utc-clock", interval, move || {
            if let Err(e) = self.tick() {
                error!("Failed to update clock: {}", e);
            }
        })
    }
}
