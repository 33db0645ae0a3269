use std::future::Future;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// A deferred UI step that can be cancelled before it runs.
#[derive(Debug)]
pub struct ScheduledTask {
    label: String,
    handle: JoinHandle<()>,
}

impl ScheduledTask {
    pub fn spawn<F>(runtime: &Handle, label: impl Into<String>, future: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self {
            label: label.into(),
            handle: runtime.spawn(future),
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Abort the task. Returns `true` if it had not finished yet.
    pub fn cancel(self) -> bool {
        let pending = !self.handle.is_finished();
        self.handle.abort();
        if pending {
            log::debug!("Cancelled scheduled task '{}'", self.label);
        }
        pending
    }

    /// Wait for the task to run to completion (or to be aborted)
    pub async fn join(self) {
        if let Err(err) = self.handle.await {
            if err.is_panic() {
                log::error!("Scheduled task '{}' panicked", self.label);
            }
        }
    }
}
