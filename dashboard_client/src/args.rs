//! Command-line arguments for the dashboard client.
//!
//! This module defines the CLI interface using `clap`. Every flag can also be supplied
//! through the environment variable named next to it. See `main` for end-to-end usage.
use std::time::Duration;

use clap::Parser;
use dashboard_common::endpoints::DEFAULT_BASE_URL;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Base URL of the dashboard server; endpoint paths are resolved against its host.
    #[clap(long, env = "DASHBOARD_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Refresh interval of the market status table, in milliseconds.
    #[clap(long, env = "DASHBOARD_STATUS_INTERVAL_MS", default_value_t = 1000)]
    pub status_interval_ms: u64,

    /// Refresh interval of the UTC clock, in milliseconds.
    #[clap(long, env = "DASHBOARD_CLOCK_INTERVAL_MS", default_value_t = 1000)]
    pub clock_interval_ms: u64,

    /// Interval between terminal redraws, in milliseconds.
    #[clap(long, env = "DASHBOARD_REDRAW_INTERVAL_MS", default_value_t = 1000)]
    pub redraw_interval_ms: u64,

    /// Instrument whose price is shown on startup.
    #[clap(long, env = "DASHBOARD_DEFAULT_SYMBOL", default_value = "US500")]
    pub default_symbol: String,

    /// HTTP request timeout, in seconds (at least 1).
    #[clap(
        long,
        env = "DASHBOARD_TIMEOUT_SECS",
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: u64,

    /// Value of the `Cookie` header sent with every request (an existing login session).
    #[clap(long, env = "DASHBOARD_SESSION")]
    pub session_cookie: Option<String>,

    /// Draw the dashboard without ANSI colours.
    #[clap(long)]
    pub no_color: bool,
}

impl Args {
    /// Status poller interval.
    pub fn status_interval(&self) -> Duration {
        Duration::from_millis(self.status_interval_ms.max(1))
    }

    /// Clock interval.
    pub fn clock_interval(&self) -> Duration {
        Duration::from_millis(self.clock_interval_ms.max(1))
    }

    /// Redraw interval.
    pub fn redraw_interval(&self) -> Duration {
        Duration::from_millis(self.redraw_interval_ms.max(1))
    }

    /// HTTP request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
