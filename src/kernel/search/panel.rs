use crate::kernel::services::ports::{SearchResult, SearchTaskOptions};

/// Accumulated results of range searches, kept in file order.
///
/// Borders are the first and last page known to be scanned, so "search
/// further" can continue on either side without rescanning.
#[derive(Debug, Clone, Default)]
pub struct RangeSearchPanel {
    pub visible: bool,
    pub searching: bool,
    results: Vec<SearchResult>,
    options: Option<SearchTaskOptions>,
    backward_border: Option<i64>,
    forward_border: Option<i64>,
    truncated_at: Option<i64>,
    progress: Option<(i64, i64)>,
    total_pages: Option<i64>,
}

impl RangeSearchPanel {
    /// Prepare for a range search. Borders are pinned once the task
    /// reports where it starts.
    pub fn begin(&mut self, options: SearchTaskOptions, clear_previous: bool) {
        if clear_previous {
            self.results.clear();
            self.backward_border = None;
            self.forward_border = None;
        }
        self.visible = true;
        self.searching = true;
        self.truncated_at = None;
        self.progress = None;
        self.options = Some(options);
    }

    /// The task starts at `first_page`, already clamped to the file.
    pub fn start_scan(&mut self, first_page: i64, total_pages: i64) {
        self.total_pages = Some(total_pages);

        // The page a search starts from is not covered until it is scanned;
        // only the side it grows from is pinned here.
        if self.backward_border.is_none() && self.forward_border.is_none() {
            if self.options.as_ref().is_some_and(|o| o.forward) {
                self.backward_border = Some(first_page);
            } else {
                self.forward_border = Some(first_page);
            }
        }
    }

    pub fn apply_frame(&mut self, page: i64, results: Vec<SearchResult>) {
        self.mark_scanned(page);
        let Some(first) = results.first() else {
            return;
        };
        let at = self.results.partition_point(|r| r.start < first.start);
        self.results.splice(at..at, results);
    }

    pub fn set_progress(&mut self, page: i64, total_pages: i64) {
        self.mark_scanned(page);
        self.progress = Some((page, total_pages));
        self.total_pages = Some(total_pages);
    }

    pub fn finish(&mut self, last_page: Option<i64>) {
        if let Some(page) = last_page {
            self.mark_scanned(page);
        }
        self.searching = false;
        self.progress = None;
    }

    pub fn truncate_at(&mut self, page: i64) {
        self.truncated_at = Some(page);
        self.searching = false;
        self.progress = None;
    }

    pub fn stop(&mut self) {
        self.searching = false;
        self.progress = None;
    }

    pub fn hide(&mut self) -> bool {
        if !self.visible {
            return false;
        }
        self.visible = false;
        true
    }

    fn mark_scanned(&mut self, page: i64) {
        let forward = self.options.as_ref().map_or(true, |o| o.forward);
        if forward {
            self.forward_border = Some(self.forward_border.map_or(page, |b| b.max(page)));
            self.backward_border.get_or_insert(page);
        } else {
            self.backward_border = Some(self.backward_border.map_or(page, |b| b.min(page)));
            self.forward_border.get_or_insert(page);
        }
    }

    /// First page "search further" would scan in the given direction, or
    /// `None` when the scanned region already touches that end of the file.
    pub fn next_page(&self, forward: bool) -> Option<i64> {
        let total = self.total_pages?;
        if forward {
            let next = match self.forward_border {
                Some(border) => border + 1,
                None => self.backward_border?,
            };
            (next < total).then_some(next)
        } else {
            let next = match self.backward_border {
                Some(border) => border - 1,
                None => self.forward_border?,
            };
            (next >= 0).then_some(next)
        }
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn options(&self) -> Option<&SearchTaskOptions> {
        self.options.as_ref()
    }

    pub fn borders(&self) -> (Option<i64>, Option<i64>) {
        (self.backward_border, self.forward_border)
    }

    pub fn truncated_at(&self) -> Option<i64> {
        self.truncated_at
    }

    pub fn progress(&self) -> Option<(i64, i64)> {
        self.progress
    }

    pub fn total_pages(&self) -> Option<i64> {
        self.total_pages
    }
}
