//! Page-scanning search tasks
//!
//! - `SearchTask::run` is the shared scanning loop (one page per step)
//! - `CloseSearchTask` stops at the first page with an in-bounds match
//! - `RangeSearchTask` publishes every non-empty frame

use super::matcher::LiteralMatcher;
use super::sink::SearchSink;
use crate::kernel::services::ports::{PageProvider, SearchResult, SearchTaskOptions};
use std::ops::Range;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicU8, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub const PROGRESS_PERIOD: Duration = Duration::from_millis(150);

static TASK_ID: AtomicU64 = AtomicU64::new(1);

fn next_task_id() -> u64 {
    TASK_ID.fetch_add(1, Ordering::Relaxed)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Created,
    Running,
    Finished,
    Stopped,
    Failed,
}

impl TaskState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => TaskState::Created,
            1 => TaskState::Running,
            2 => TaskState::Finished,
            3 => TaskState::Stopped,
            _ => TaskState::Failed,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            TaskState::Finished | TaskState::Stopped | TaskState::Failed
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    Close,
    Range,
}

struct TaskShared {
    stop: AtomicBool,
    state: AtomicU8,
}

/// Cloneable handle to a task: identity plus the cooperative stop flag.
#[derive(Clone)]
pub struct TaskHandle {
    id: u64,
    shared: Arc<TaskShared>,
}

impl TaskHandle {
    pub fn new() -> Self {
        Self {
            id: next_task_id(),
            shared: Arc::new(TaskShared {
                stop: AtomicBool::new(false),
                state: AtomicU8::new(TaskState::Created as u8),
            }),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn request_stop(&self) {
        self.shared.stop.store(true, Ordering::Relaxed);
    }

    pub fn should_stop(&self) -> bool {
        self.shared.stop.load(Ordering::Relaxed)
    }

    pub fn state(&self) -> TaskState {
        TaskState::from_u8(self.shared.state.load(Ordering::Acquire))
    }

    fn transition(&self, from: TaskState, to: TaskState) -> bool {
        self.shared
            .state
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

impl Default for TaskHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TaskHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskHandle")
            .field("id", &self.id)
            .field("state", &self.state())
            .finish()
    }
}

/// All matches of one page, plus the slice that lies inside the task bounds.
pub struct PageFrame {
    pub page: i64,
    pub results: Vec<SearchResult>,
    pub in_bounds: Range<usize>,
}

pub enum FrameOutcome {
    Continue,
    Done,
    HungUp,
}

pub trait SearchTask: Send {
    fn handle(&self) -> &TaskHandle;

    fn options(&self) -> &SearchTaskOptions;

    fn kind(&self) -> TaskKind;

    /// Called for every frame with at least one in-bounds match.
    fn on_frame(&mut self, frame: PageFrame, sink: &mut dyn SearchSink) -> FrameOutcome;

    fn progress_period(&self) -> Duration {
        PROGRESS_PERIOD
    }

    /// Scan pages in the options' direction and report through `sink`.
    /// Exactly one terminal callback is emitted, after every frame.
    fn run(&mut self, provider: &dyn PageProvider, sink: &mut dyn SearchSink) {
        let handle = self.handle().clone();
        if !handle.transition(TaskState::Created, TaskState::Running) {
            tracing::warn!(task_id = handle.id(), "search task started twice");
            return;
        }

        let total_pages = match provider.page_count() {
            Ok(total) => total,
            Err(e) => {
                handle.transition(TaskState::Running, TaskState::Failed);
                sink.io_error(&e);
                return;
            }
        };

        let options = self.options().clone();
        let matcher = LiteralMatcher::from_options(&options);
        let step: i64 = if options.forward { 1 } else { -1 };
        let (first, last) = scan_range(&options, total_pages);
        let period = self.progress_period();
        if !sink.started(first, total_pages) {
            handle.transition(TaskState::Running, TaskState::Stopped);
            return;
        }

        let mut last_scanned = None;
        let mut last_progress = Instant::now();
        let mut page = first;

        while (options.forward && page <= last) || (!options.forward && page >= last) {
            if handle.should_stop() {
                handle.transition(TaskState::Running, TaskState::Stopped);
                sink.stopped(last_scanned);
                return;
            }

            let text = match provider.page_text(page) {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(task_id = handle.id(), page, error = %e, "page fetch failed");
                    handle.transition(TaskState::Running, TaskState::Failed);
                    sink.io_error(&e);
                    return;
                }
            };

            let results = matcher.page_results(page, &text);
            let in_bounds = bounded_slice(&options, &results);
            last_scanned = Some(page);

            if !in_bounds.is_empty() {
                let frame = PageFrame {
                    page,
                    results,
                    in_bounds,
                };
                match self.on_frame(frame, sink) {
                    FrameOutcome::Continue => {}
                    FrameOutcome::Done => break,
                    FrameOutcome::HungUp => {
                        handle.transition(TaskState::Running, TaskState::Stopped);
                        return;
                    }
                }
            }

            if options.only_one_page {
                break;
            }

            if last_progress.elapsed() >= period {
                if !sink.progress(page, total_pages) {
                    handle.transition(TaskState::Running, TaskState::Stopped);
                    return;
                }
                last_progress = Instant::now();
            }

            page += step;
        }

        handle.transition(TaskState::Running, TaskState::Finished);
        sink.finished(last_scanned);
    }
}

/// First and last page to visit, in scan order. Empty when `first` is already
/// past `last` in the scan direction.
fn scan_range(options: &SearchTaskOptions, total_pages: i64) -> (i64, i64) {
    if total_pages <= 0 {
        return if options.forward { (0, -1) } else { (-1, 0) };
    }
    let last_page = total_pages - 1;
    let clamp = |page: i64| page.clamp(0, last_page);

    let start = options.start_bound().page();
    let stop = options.stop_bound().page();
    if options.forward {
        (start.map_or(0, clamp), stop.map_or(last_page, clamp))
    } else {
        (start.map_or(last_page, clamp), stop.map_or(0, clamp))
    }
}

/// Results are sorted, and bounds are monotone, so the in-bounds ones form
/// one contiguous run.
fn bounded_slice(options: &SearchTaskOptions, results: &[SearchResult]) -> Range<usize> {
    let begin = results
        .iter()
        .position(|r| options.contains(r.start, r.end))
        .unwrap_or(results.len());
    let end = results[begin..]
        .iter()
        .position(|r| !options.contains(r.start, r.end))
        .map_or(results.len(), |n| begin + n);
    begin..end
}

pub struct CloseSearchTask {
    handle: TaskHandle,
    options: SearchTaskOptions,
    progress_period: Duration,
}

impl CloseSearchTask {
    pub fn new(options: SearchTaskOptions) -> Self {
        Self {
            handle: TaskHandle::new(),
            options,
            progress_period: PROGRESS_PERIOD,
        }
    }

    pub fn with_progress_period(mut self, period: Duration) -> Self {
        self.progress_period = period;
        self
    }
}

impl SearchTask for CloseSearchTask {
    fn handle(&self) -> &TaskHandle {
        &self.handle
    }

    fn options(&self) -> &SearchTaskOptions {
        &self.options
    }

    fn kind(&self) -> TaskKind {
        TaskKind::Close
    }

    fn progress_period(&self) -> Duration {
        self.progress_period
    }

    fn on_frame(&mut self, frame: PageFrame, sink: &mut dyn SearchSink) -> FrameOutcome {
        let closest = if self.options.forward {
            frame.in_bounds.start
        } else {
            frame.in_bounds.end - 1
        };
        if sink.closest_result_found(frame.results, closest) {
            FrameOutcome::Done
        } else {
            FrameOutcome::HungUp
        }
    }
}

pub struct RangeSearchTask {
    handle: TaskHandle,
    options: SearchTaskOptions,
    progress_period: Duration,
}

impl RangeSearchTask {
    pub fn new(options: SearchTaskOptions) -> Self {
        Self {
            handle: TaskHandle::new(),
            options,
            progress_period: PROGRESS_PERIOD,
        }
    }

    pub fn with_progress_period(mut self, period: Duration) -> Self {
        self.progress_period = period;
        self
    }
}

impl SearchTask for RangeSearchTask {
    fn handle(&self) -> &TaskHandle {
        &self.handle
    }

    fn options(&self) -> &SearchTaskOptions {
        &self.options
    }

    fn kind(&self) -> TaskKind {
        TaskKind::Range
    }

    fn progress_period(&self) -> Duration {
        self.progress_period
    }

    fn on_frame(&mut self, frame: PageFrame, sink: &mut dyn SearchSink) -> FrameOutcome {
        let PageFrame {
            page,
            mut results,
            in_bounds,
        } = frame;
        results.truncate(in_bounds.end);
        results.drain(..in_bounds.start);
        if sink.frame_results_found(page, results) {
            FrameOutcome::Continue
        } else {
            FrameOutcome::HungUp
        }
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/search/task.rs"]
mod tests;
