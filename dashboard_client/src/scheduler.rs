//! Cancellable periodic tasks.
//!
//! `Scheduler::every` runs a job once right away and then at a fixed rate on its own
//! worker thread. Ticks that fall due while the job is still running are coalesced. The returned `TaskHandle` owns that thread: `cancel` (or dropping the
//! handle) closes the stop channel and joins the worker, so once it returns the job is
//! never invoked again.
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Sender, bounded, select, tick};
use dashboard_common::Result;
use log::{error, info};

/// Factory for periodic background tasks.
pub struct Scheduler;

impl Scheduler {
    /// Spawn a worker named `name` that calls `job` immediately and then every `interval`.
    pub fn every<F>(name: &str, interval: Duration, mut job: F) -> Result<TaskHandle>
    where
        F: FnMut() + Send + 'static,
    {
        let (stop_tx, stop_rx) = bounded::<()>(1);
        let task_name = name.to_string();

        let worker = thread::Builder::new()
            .name(task_name.clone())
            .spawn(move || {
                info!("Task '{}' started (every {:?})", task_name, interval);
                let ticker = tick(interval);
                loop {
                    job();
                    select! {
                        recv(stop_rx) -> _ => break,
                        recv(ticker) -> _ => {}
                    }
                }
                info!("Task '{}' stopped", task_name);
            })?;

        Ok(TaskHandle {
            name: name.to_string(),
            stop_tx: Some(stop_tx),
            worker: Some(worker),
        })
    }
}

/// Owner of one periodic task.
pub struct TaskHandle {
    name: String,
    stop_tx: Option<Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

impl TaskHandle {
    /// Task name, as given to `Scheduler::every`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stop the task and wait for its worker to exit.
    pub fn cancel(mut self) {
        self.stop();
    }

    /// `true` once the worker thread has exited.
    pub fn is_finished(&self) -> bool {
        self.worker.as_ref().is_none_or(|worker| worker.is_finished())
    }

    fn stop(&mut self) {
        // Dropping the sender disconnects the channel, which also wakes the worker.
        self.stop_tx.take();

        if let Some(worker) = self.worker.take() {
            // A job cancelling its own task cannot join itself.
            if worker.thread().id() == thread::current().id() {
                return;
            }
            if worker.join().is_err() {
                error!("Task '{}' panicked", self.name);
            }
        }
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
