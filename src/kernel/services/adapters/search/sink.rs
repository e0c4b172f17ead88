use crate::kernel::services::ports::{PageError, SearchMessage, SearchResult};
use std::sync::mpsc::SyncSender;

/// Receiver of everything a running task reports. Methods return `false`
/// when the consumer is gone; the task then stops scanning.
pub trait SearchSink {
    fn started(&mut self, first_page: i64, total_pages: i64) -> bool;

    fn frame_results_found(&mut self, page: i64, results: Vec<SearchResult>) -> bool;

    fn closest_result_found(&mut self, results: Vec<SearchResult>, closest: usize) -> bool;

    fn progress(&mut self, page: i64, total_pages: i64) -> bool;

    fn finished(&mut self, last_page: Option<i64>);

    fn stopped(&mut self, last_page: Option<i64>);

    fn io_error(&mut self, error: &PageError);
}

/// Marshals task callbacks onto the engine thread as `SearchMessage`s.
pub struct ChannelSink {
    task_id: u64,
    tx: SyncSender<SearchMessage>,
}

impl ChannelSink {
    pub fn new(task_id: u64, tx: SyncSender<SearchMessage>) -> Self {
        Self { task_id, tx }
    }

    fn send(&self, msg: SearchMessage) -> bool {
        self.tx.send(msg).is_ok()
    }
}

impl SearchSink for ChannelSink {
    fn started(&mut self, first_page: i64, total_pages: i64) -> bool {
        self.send(SearchMessage::Started {
            task_id: self.task_id,
            first_page,
            total_pages,
        })
    }

    fn frame_results_found(&mut self, page: i64, results: Vec<SearchResult>) -> bool {
        self.send(SearchMessage::FrameFound {
            task_id: self.task_id,
            page,
            results,
        })
    }

    fn closest_result_found(&mut self, results: Vec<SearchResult>, closest: usize) -> bool {
        self.send(SearchMessage::ClosestFound {
            task_id: self.task_id,
            results,
            closest,
        })
    }

    fn progress(&mut self, page: i64, total_pages: i64) -> bool {
        self.send(SearchMessage::Progress {
            task_id: self.task_id,
            page,
            total_pages,
        })
    }

    fn finished(&mut self, last_page: Option<i64>) {
        let _ = self.send(SearchMessage::Finished {
            task_id: self.task_id,
            last_page,
        });
    }

    fn stopped(&mut self, last_page: Option<i64>) {
        let _ = self.send(SearchMessage::Stopped {
            task_id: self.task_id,
            last_page,
        });
    }

    fn io_error(&mut self, error: &PageError) {
        let _ = self.send(SearchMessage::IoError {
            task_id: self.task_id,
            message: error.to_string(),
        });
    }
}
