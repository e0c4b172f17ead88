//! Search orchestrator
//!
//! Owns the single in-flight task slot. Launching anything stops and detaches
//! the previous task first; messages tagged with a detached id are dropped in
//! `apply_message`.

use super::close::CloseSearchResults;
use super::panel::RangeSearchPanel;
use super::status::StatusText;
use crate::kernel::services::adapters::search::{
    CloseSearchTask, RangeSearchTask, SearchService, SearchTask, TaskHandle, TaskKind,
};
use crate::kernel::services::ports::{
    Bound, CaretSource, PageProvider, Position, SearchError, SearchMessage, SearchResult,
    SearchSettings, SearchTaskOptions, NO_LIMIT,
};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub type Result<T> = std::result::Result<T, SearchError>;

/// What the user typed into the search bar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub pattern: String,
    pub case_sensitive: bool,
    pub whole_words: bool,
}

impl SearchQuery {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            ..Self::default()
        }
    }

    pub fn with_case_sensitivity(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn with_whole_words(mut self, whole_words: bool) -> Self {
        self.whole_words = whole_words;
        self
    }

    fn from_options(options: &SearchTaskOptions) -> Self {
        Self {
            pattern: options.pattern.clone(),
            case_sensitive: options.case_sensitive,
            whole_words: options.whole_words,
        }
    }

    fn describes(&self, options: &SearchTaskOptions) -> bool {
        self.pattern == options.pattern
            && self.case_sensitive == options.case_sensitive
            && self.whole_words == options.whole_words
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Moved the selection inside the current close-search list.
    Selected(usize),
    /// Started a close search with this task id.
    Launched(u64),
}

struct ActiveTask {
    handle: TaskHandle,
    kind: TaskKind,
    options: SearchTaskOptions,
    found: bool,
    result_limit: usize,
}

pub struct SearchEngine {
    service: SearchService,
    rx: Receiver<SearchMessage>,
    provider: Arc<dyn PageProvider>,
    caret: Arc<dyn CaretSource>,
    settings: SearchSettings,
    query: SearchQuery,
    active: Option<ActiveTask>,
    close: CloseSearchResults,
    /// Query the close list was found with.
    close_query: Option<SearchQuery>,
    panel: RangeSearchPanel,
    status: StatusText,
}

impl SearchEngine {
    pub fn new(
        runtime: tokio::runtime::Handle,
        provider: Arc<dyn PageProvider>,
        caret: Arc<dyn CaretSource>,
        settings: SearchSettings,
    ) -> Self {
        let (service, rx) = SearchService::new(runtime);
        let status = StatusText::new(settings.status_ttl());
        Self {
            service,
            rx,
            provider,
            caret,
            settings,
            query: SearchQuery::default(),
            active: None,
            close: CloseSearchResults::default(),
            close_query: None,
            panel: RangeSearchPanel::default(),
            status,
        }
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    pub fn set_query(&mut self, query: SearchQuery) -> bool {
        if self.query == query {
            return false;
        }
        self.query = query;
        self.drop_stale_list();
        true
    }

    pub fn close_results(&self) -> &CloseSearchResults {
        &self.close
    }

    pub fn panel(&self) -> &RangeSearchPanel {
        &self.panel
    }

    pub fn status(&self) -> &StatusText {
        &self.status
    }

    pub fn status_text(&self) -> Option<&str> {
        self.status.visible_text(Instant::now())
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    pub fn is_searching(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_task_id(&self) -> Option<u64> {
        self.active.as_ref().map(|a| a.handle.id())
    }

    /// The caret moved on its own; the next step starts from it.
    pub fn on_caret_moved(&mut self) -> bool {
        self.close.deselect()
    }

    pub fn launch_close_search(
        &mut self,
        query: SearchQuery,
        forward: bool,
        only_one_page: bool,
    ) -> Result<u64> {
        if query.pattern.is_empty() {
            return Err(SearchError::EmptyPattern);
        }
        self.query = query.clone();
        self.drop_stale_list();
        let anchor = self
            .close
            .anchor(forward)
            .unwrap_or_else(|| self.caret.caret());
        let (left, right) = close_bounds(anchor, forward, only_one_page);
        let options = self
            .base_options(&query, forward)
            .with_only_one_page(only_one_page)
            .with_bounds(left, right);
        options.validate()?;

        if let Some(active) = &self.active {
            if active.kind == TaskKind::Close
                && active.options.only_one_page == only_one_page
                && active.options.same_search(&options)
            {
                return Ok(active.handle.id());
            }
        }

        self.status.set(format!("Searching for '{}'...", options.pattern));
        Ok(self.start_close(options))
    }

    /// Step to the next occurrence, scanning only when the current list
    /// cannot answer.
    pub fn goto_next_occurrence(&mut self, forward: bool) -> Result<Navigation> {
        self.drop_stale_list();
        if let Some(index) = self.close.next_index(forward, self.caret.caret()) {
            self.close.select(index);
            return Ok(Navigation::Selected(index));
        }
        let query = self.query.clone();
        self.launch_close_search(query, forward, false).map(Navigation::Launched)
    }

    pub fn launch_range_search(
        &mut self,
        options: SearchTaskOptions,
        clear_previous: bool,
    ) -> Result<u64> {
        options.validate()?;

        self.stop_active();
        self.panel.begin(options.clone(), clear_previous);
        let result_limit = self.panel.len() + options.critical_result_count;
        self.status.set(format!("Searching for '{}'...", options.pattern));

        let task = RangeSearchTask::new(options.clone())
            .with_progress_period(self.settings.progress_period());
        Ok(self.start(Box::new(task), options, result_limit))
    }

    /// Continue the panel's search past its border. `Ok(None)` when that
    /// side of the file is already covered.
    pub fn search_further(&mut self, forward: bool) -> Result<Option<u64>> {
        let Some(base) = self.panel.options().cloned() else {
            return Ok(None);
        };
        let Some(page) = self.panel.next_page(forward) else {
            return Ok(None);
        };
        let (left, right) = if forward {
            (Bound::Page(page), NO_LIMIT)
        } else {
            (NO_LIMIT, Bound::Page(page))
        };
        let options = base.with_direction(forward).with_bounds(left, right);
        self.launch_range_search(options, false).map(Some)
    }

    pub fn stop(&mut self) -> bool {
        if !self.stop_active() {
            return false;
        }
        self.status.set("Search stopped by user");
        true
    }

    pub fn on_escape(&mut self) -> bool {
        if self.stop() {
            return true;
        }
        let cleared = self.close.clear();
        self.panel.hide() | cleared
    }

    /// Apply every message already queued. Returns whether anything changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(msg) = self.rx.try_recv() {
            changed |= self.apply_message(msg);
        }
        changed
    }

    /// Wait up to `timeout` for the next message, then drain the rest.
    pub fn poll_timeout(&mut self, timeout: Duration) -> bool {
        match self.rx.recv_timeout(timeout) {
            Ok(msg) => {
                let changed = self.apply_message(msg);
                self.poll() | changed
            }
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => false,
        }
    }

    pub fn apply_message(&mut self, msg: SearchMessage) -> bool {
        let kind = match &self.active {
            Some(active) if active.handle.id() == msg.task_id() => active.kind,
            _ => {
                tracing::trace!(task_id = msg.task_id(), "dropping stale search message");
                return false;
            }
        };

        match msg {
            SearchMessage::Started {
                first_page,
                total_pages,
                ..
            } => {
                if kind != TaskKind::Range {
                    return false;
                }
                self.panel.start_scan(first_page, total_pages);
                true
            }
            SearchMessage::Progress {
                page, total_pages, ..
            } => {
                if kind == TaskKind::Range {
                    self.panel.set_progress(page, total_pages);
                }
                self.status
                    .set(format!("Searching page {} of {}", page + 1, total_pages));
                true
            }
            SearchMessage::ClosestFound {
                results, closest, ..
            } => self.on_closest_found(results, closest),
            SearchMessage::FrameFound { page, results, .. } => {
                if kind != TaskKind::Range {
                    return false;
                }
                self.on_frame_found(page, results)
            }
            SearchMessage::Finished { last_page, .. } => {
                let Some(active) = self.active.take() else {
                    return false;
                };
                match active.kind {
                    TaskKind::Close => self.on_close_finished(active),
                    TaskKind::Range => self.on_range_finished(last_page),
                }
                true
            }
            SearchMessage::Stopped { .. } => {
                self.active = None;
                self.panel.stop();
                self.status.set("Search stopped");
                true
            }
            SearchMessage::IoError { message, .. } => {
                tracing::warn!(error = %message, "search failed");
                self.active = None;
                self.panel.stop();
                self.status.set(format!(
                    "Search stopped because something went wrong: {}",
                    message
                ));
                true
            }
        }
    }

    fn on_closest_found(&mut self, results: Vec<SearchResult>, closest: usize) -> bool {
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        active.found = true;
        let text = if active.options.looped_phase {
            if active.options.forward {
                "Search wrapped to the start of the file".to_string()
            } else {
                "Search wrapped to the end of the file".to_string()
            }
        } else {
            let page = results.get(closest).map_or(0, |r| r.start.page_number);
            format!("Found '{}' on page {}", active.options.pattern, page + 1)
        };
        self.close_query = Some(SearchQuery::from_options(&active.options));
        self.close.replace(results, Some(closest));
        self.status.set(text);
        true
    }

    fn on_frame_found(&mut self, page: i64, results: Vec<SearchResult>) -> bool {
        self.panel.apply_frame(page, results);
        let limit = self.active.as_ref().map_or(usize::MAX, |a| a.result_limit);
        if self.panel.len() >= limit {
            self.stop_active();
            self.panel.truncate_at(page);
            tracing::info!(page, results = self.panel.len(), "range search truncated");
            self.status
                .set(format!("Too many results: search stopped at page {}", page + 1));
        }
        true
    }

    fn on_close_finished(&mut self, active: ActiveTask) {
        if active.found {
            return;
        }
        let options = active.options;
        if options.only_one_page {
            self.status
                .set(format!("'{}' not found on this page", options.pattern));
            return;
        }
        if options.looped_phase {
            self.close.clear();
            self.status.set("No matches found");
            return;
        }
        if !self.query.describes(&options) {
            tracing::debug!(pattern = %options.pattern, "query changed, loop abandoned");
            self.status.set(format!("'{}' not found", options.pattern));
            return;
        }

        let looped = options.looped();
        tracing::info!(forward = looped.forward, "close search wrapping around");
        self.status.set(if looped.forward {
            "Searching from the start of the file..."
        } else {
            "Searching from the end of the file..."
        });
        self.start_close(looped);
    }

    fn on_range_finished(&mut self, last_page: Option<i64>) {
        self.panel.finish(last_page);
        if self.panel.is_empty() {
            self.status.set("No matches found");
        } else {
            self.status.set(format!("Found {} results", self.panel.len()));
        }
    }

    fn start_close(&mut self, options: SearchTaskOptions) -> u64 {
        let task = CloseSearchTask::new(options.clone())
            .with_progress_period(self.settings.progress_period());
        self.start(Box::new(task), options, usize::MAX)
    }

    fn start(
        &mut self,
        task: Box<dyn SearchTask>,
        options: SearchTaskOptions,
        result_limit: usize,
    ) -> u64 {
        self.stop_active();
        let kind = task.kind();
        let handle = self.service.spawn(task, self.provider.clone());
        let id = handle.id();
        tracing::debug!(task_id = id, ?kind, looped = options.looped_phase, "search launched");
        self.active = Some(ActiveTask {
            handle,
            kind,
            options,
            found: false,
            result_limit,
        });
        id
    }

    /// Ask the running task to stop and forget it.
    fn stop_active(&mut self) -> bool {
        let Some(active) = self.active.take() else {
            return false;
        };
        active.handle.request_stop();
        if active.kind == TaskKind::Range {
            self.panel.stop();
        }
        tracing::debug!(task_id = active.handle.id(), "search task detached");
        true
    }

    /// Forget a close list found with a query other than the current one.
    fn drop_stale_list(&mut self) {
        if self.close_query.as_ref().is_some_and(|q| *q != self.query) {
            self.close.clear();
            self.close_query = None;
        }
    }

    fn base_options(&self, query: &SearchQuery, forward: bool) -> SearchTaskOptions {
        SearchTaskOptions::new()
            .with_pattern(query.pattern.clone())
            .with_direction(forward)
            .with_case_sensitivity(query.case_sensitive)
            .with_whole_words(query.whole_words)
            .with_context_radius(self.settings.context_radius)
            .with_critical_result_count(self.settings.critical_result_count)
    }
}

/// Bounds of a close search starting at `anchor`, limited to the anchor's
/// page for single-page checks.
fn close_bounds(anchor: Position, forward: bool, only_one_page: bool) -> (Bound, Bound) {
    let limit = if only_one_page {
        Bound::Page(anchor.page_number)
    } else {
        NO_LIMIT
    };
    if forward {
        (Bound::At(anchor), limit)
    } else {
        (limit, Bound::At(anchor))
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/search/engine.rs"]
mod tests;
