//! Market Dashboard Client — a terminal dashboard that polls a market-status endpoint,
//! offers symbol search with suggestions, shows the bid/ask of a selected instrument, and
//! keeps a UTC clock running.
//!
//! Usage example (CLI):
//! ```bash
//! dashboard_client --base-url http://127.0.0.1:8000 --session-cookie "sessionid=..."
//! ```
//!
//! Typing a line replaces the content of the symbol input and fetches suggestions.
//! `/pick N` takes suggestion N, `/go` loads the price of the symbol in the input,
//! `/price SYMBOL` loads a price directly, `/show` redraws and `/quit` exits.
//! See `console` for details.
#![warn(missing_docs)]
mod api;
mod args;
mod clock;
mod console;
mod dashboard;
mod poller;
mod price;
mod render;
mod scheduler;
mod search;
mod view;

use crate::api::{DashboardApi, HttpApi};
use crate::args::Args;
use crate::console::{Command, parse_command};
use crate::dashboard::{Dashboard, Intervals, Page};
use crate::render::render_frame;
use crate::scheduler::Scheduler;
use clap::Parser;
use crossbeam_channel::{Receiver, bounded, select, unbounded};
use dashboard_common::endpoints::Endpoints;
use dashboard_common::{DashboardError, Result};
use log::{debug, error, info, warn};
use std::io::{BufRead, Write};
use std::sync::Arc;
use std::thread;

fn main() -> Result<(), DashboardError> {
    init_logger();
    let args = Args::parse();

    let (shutdown_tx, shutdown_rx) = bounded::<()>(1);
    ctrlc::set_handler(move || {
        info!("Ctrl+C received. Shutting down dashboard...");
        let _ = shutdown_tx.try_send(());
    })
    .map_err(|e| DashboardError::Format(format!("Error setting Ctrl+C handler: {}", e)))?;

    let endpoints = Endpoints::new(&args.base_url)?;
    info!("Dashboard server: {}", endpoints.base());
    let api: Arc<dyn DashboardApi> = Arc::new(HttpApi::new(
        endpoints,
        args.timeout(),
        args.session_cookie.as_deref(),
    )?);

    let mut dashboard = Dashboard::new(api, &args.default_symbol);
    dashboard.start(Intervals {
        status: args.status_interval(),
        clock: args.clock_interval(),
    })?;

    let color = !args.no_color;
    let page = dashboard.page().clone();
    let redraw = Scheduler::every("redraw", args.redraw_interval(), move || draw(&page, color))?;

    let lines = start_stdin_reader()?;
    info!("Dashboard is running. Type /quit or press Ctrl+C to exit.");

    loop {
        select! {
            recv(shutdown_rx) -> _ => break,
            recv(lines) -> line => match line {
                Ok(line) => match parse_command(&line) {
                    Ok(Command::Quit) => break,
                    Ok(command) => {
                        if let Err(e) = apply(&dashboard, command, color) {
                            error!("Command failed: {}", e);
                        }
                    }
                    Err(e) => warn!("{}", e),
                },
                Err(_) => {
                    info!("Input closed");
                    break;
                }
            }
        }
    }

    redraw.cancel();
    dashboard.shutdown();
    info!("Dashboard stopped");
    Ok(())
}

fn apply(dashboard: &Dashboard, command: Command, color: bool) -> Result<()> {
    let search = dashboard.search();
    match command {
        Command::Input(value) => {
            // The worker applies its own result; nothing waits on it.
            search.input(&value)?;
        }
        Command::Pick(index) => {
            if let Some(symbol) = search.select(index)? {
                debug!("Picked {}", symbol);
            }
        }
        Command::Search => {
            if search.click_search_icon()?.is_none() {
                warn!("Symbol input is empty");
            }
        }
        Command::Price(symbol) => search.load_price(&symbol),
        Command::Show | Command::Quit => {}
    }
    draw(dashboard.page(), color);
    Ok(())
}

/// Clear the terminal and draw the current frame on stdout.
fn draw(page: &Page, color: bool) {
    match page.frame() {
        Ok(frame) => {
            let mut stdout = std::io::stdout().lock();
            let text = render_frame(&frame, color);
            if let Err(e) = write!(stdout, "\x1B[2J\x1B[H{}> ", text).and_then(|_| stdout.flush())
            {
                error!("Failed to draw dashboard: {}", e);
            }
        }
        Err(e) => error!("Failed to read dashboard state: {}", e),
    }
}

/// Forward stdin lines to a channel; the channel closes at end of input.
fn start_stdin_reader() -> Result<Receiver<String>> {
    let (tx, rx) = unbounded::<String>();
    thread::Builder::new()
        .name("stdin".to_string())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        error!("Failed to read input: {}", e);
                        break;
                    }
                }
            }
        })?;
    Ok(rx)
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
