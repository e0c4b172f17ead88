//! Search task runner
//!
//! Each task runs on the tokio blocking pool; callbacks come back to the
//! owner thread through a bounded channel.

use super::sink::ChannelSink;
use super::task::{SearchTask, TaskHandle};
use crate::kernel::services::ports::{PageProvider, SearchMessage};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::sync::Arc;

pub const CHANNEL_CAPACITY: usize = 64;

pub struct SearchService {
    runtime: tokio::runtime::Handle,
    tx: SyncSender<SearchMessage>,
}

impl SearchService {
    pub fn new(runtime: tokio::runtime::Handle) -> (Self, Receiver<SearchMessage>) {
        let (tx, rx) = mpsc::sync_channel(CHANNEL_CAPACITY);
        (Self { runtime, tx }, rx)
    }

    /// Start `task` on a worker and return its handle.
    pub fn spawn(
        &self,
        mut task: Box<dyn SearchTask>,
        provider: Arc<dyn PageProvider>,
    ) -> TaskHandle {
        let handle = task.handle().clone();
        let task_id = handle.id();
        let tx = self.tx.clone();
        let tx_for_failure = self.tx.clone();

        tracing::debug!(task_id, kind = ?task.kind(), "spawning search task");

        self.runtime.spawn(async move {
            let result = tokio::task::spawn_blocking(move || {
                let mut sink = ChannelSink::new(task_id, tx);
                task.run(provider.as_ref(), &mut sink);
            })
            .await;

            if let Err(e) = result {
                tracing::error!(task_id, error = %e, "search task failed");
                let _ = tx_for_failure.send(SearchMessage::IoError {
                    task_id,
                    message: format!("Search task failed: {}", e),
                });
            }
        });

        handle
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/search/service.rs"]
mod tests;
