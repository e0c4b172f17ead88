use crate::kernel::services::ports::{Position, SearchResult};

/// Matches of the page where the last close search stopped, plus the
/// selected one. The list always holds a whole page, so stepping inside it
/// never skips an occurrence.
#[derive(Debug, Clone, Default)]
pub struct CloseSearchResults {
    results: Vec<SearchResult>,
    selected: Option<usize>,
}

impl CloseSearchResults {
    pub fn replace(&mut self, results: Vec<SearchResult>, selected: Option<usize>) {
        self.selected = selected.filter(|&index| index < results.len());
        self.results = results;
    }

    pub fn clear(&mut self) -> bool {
        if self.results.is_empty() && self.selected.is_none() {
            return false;
        }
        self.results.clear();
        self.selected = None;
        true
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

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_result(&self) -> Option<&SearchResult> {
        self.selected.and_then(|index| self.results.get(index))
    }

    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.results.len() || self.selected == Some(index) {
            return false;
        }
        self.selected = Some(index);
        true
    }

    pub fn deselect(&mut self) -> bool {
        self.selected.take().is_some()
    }

    pub fn page(&self) -> Option<i64> {
        self.results.first().map(|r| r.start.page_number)
    }

    /// Where the next close search starts from, if a result is selected.
    pub fn anchor(&self, forward: bool) -> Option<Position> {
        let result = self.selected_result()?;
        Some(if forward { result.end } else { result.start })
    }

    /// Index of the next occurrence reachable without scanning.
    ///
    /// With a selection this is the neighbour in the list. Without one, the
    /// first result at or after the caret (forward) or the last one ending
    /// at or before it, provided the caret is on the page the list covers.
    pub fn next_index(&self, forward: bool, caret: Position) -> Option<usize> {
        if let Some(index) = self.selected {
            return if forward {
                (index + 1 < self.results.len()).then_some(index + 1)
            } else {
                index.checked_sub(1)
            };
        }

        if self.page() != Some(caret.page_number) {
            return None;
        }
        if forward {
            let index = self.results.partition_point(|r| r.start < caret);
            (index < self.results.len()).then_some(index)
        } else {
            self.results
                .partition_point(|r| r.end <= caret)
                .checked_sub(1)
        }
    }
}
