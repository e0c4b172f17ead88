//! Parameters of a single search launch.
//!
//! Bounds are direction-anchored:
//! - forward: a match is in range when `start >= left` and `start < right`
//! - backward: a match is in range when `end <= right` and `end > left`
//!
//! so a search and its looped retry cover the file exactly once.

use super::search::{Position, Result, SearchError};

pub const DEFAULT_CONTEXT_RADIUS: usize = 32;
pub const DEFAULT_CRITICAL_RESULT_COUNT: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Bound {
    /// Open end (or start) of the file.
    #[default]
    Open,
    /// Whole page: its start as a left bound, its end as a right bound.
    Page(i64),
    At(Position),
}

pub const NO_LIMIT: Bound = Bound::Open;

impl Bound {
    pub fn page(&self) -> Option<i64> {
        match self {
            Bound::Open => None,
            Bound::Page(page) => Some(*page),
            Bound::At(pos) => Some(pos.page_number),
        }
    }

    pub fn offset(&self) -> Option<i32> {
        match self {
            Bound::At(pos) => Some(pos.offset_in_page),
            _ => None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Bound::Open)
    }

    fn allows_from_left(&self, pos: Position) -> bool {
        match self {
            Bound::Open => true,
            Bound::Page(page) => pos.page_number >= *page,
            Bound::At(left) => pos >= *left,
        }
    }

    fn allows_from_right(&self, pos: Position) -> bool {
        match self {
            Bound::Open => true,
            Bound::Page(page) => pos.page_number <= *page,
            Bound::At(right) => pos <= *right,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTaskOptions {
    pub pattern: String,
    pub forward: bool,
    pub case_sensitive: bool,
    pub whole_words: bool,
    pub only_one_page: bool,
    pub looped_phase: bool,
    pub left: Bound,
    pub right: Bound,
    pub context_radius: usize,
    pub critical_result_count: usize,
}

impl Default for SearchTaskOptions {
    fn default() -> Self {
        Self {
            pattern: String::new(),
            forward: true,
            case_sensitive: false,
            whole_words: false,
            only_one_page: false,
            looped_phase: false,
            left: NO_LIMIT,
            right: NO_LIMIT,
            context_radius: DEFAULT_CONTEXT_RADIUS,
            critical_result_count: DEFAULT_CRITICAL_RESULT_COUNT,
        }
    }
}

impl SearchTaskOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    pub fn with_direction(mut self, forward: bool) -> Self {
        self.forward = forward;
        self
    }

    pub fn with_case_sensitivity(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn with_whole_words(mut self, whole_words: bool) -> Self {
        self.whole_words = whole_words;
        self
    }

    pub fn with_only_one_page(mut self, only_one_page: bool) -> Self {
        self.only_one_page = only_one_page;
        self
    }

    pub fn with_bounds(mut self, left: Bound, right: Bound) -> Self {
        self.left = left;
        self.right = right;
        self
    }

    pub fn with_context_radius(mut self, radius: usize) -> Self {
        self.context_radius = radius;
        self
    }

    pub fn with_critical_result_count(mut self, count: usize) -> Self {
        self.critical_result_count = count;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.pattern.is_empty() {
            return Err(SearchError::EmptyPattern);
        }
        Ok(())
    }

    /// Bound the scan starts from.
    pub fn start_bound(&self) -> Bound {
        if self.forward {
            self.left
        } else {
            self.right
        }
    }

    /// Optional bound the scan stops at.
    pub fn stop_bound(&self) -> Bound {
        if self.forward {
            self.right
        } else {
            self.left
        }
    }

    /// Wrap-around retry: the part of the file the first pass never looked at.
    pub fn looped(&self) -> Self {
        let mut next = self.clone();
        if self.forward {
            next.left = NO_LIMIT;
            next.right = self.left;
        } else {
            next.left = self.right;
            next.right = NO_LIMIT;
        }
        next.looped_phase = true;
        next
    }

    /// Whether `other` describes the same user search as `self`, comparing
    /// the bounds of the first pass for looped options.
    pub fn same_search(&self, other: &Self) -> bool {
        self.pattern == other.pattern
            && self.forward == other.forward
            && self.case_sensitive == other.case_sensitive
            && self.whole_words == other.whole_words
            && self.original_bounds() == other.original_bounds()
    }

    fn original_bounds(&self) -> (Bound, Bound) {
        if !self.looped_phase {
            return (self.left, self.right);
        }
        if self.forward {
            (self.right, NO_LIMIT)
        } else {
            (NO_LIMIT, self.left)
        }
    }

    pub fn contains(&self, start: Position, end: Position) -> bool {
        if self.forward {
            self.left.allows_from_left(start) && self.right_excludes_start(start)
        } else {
            self.right.allows_from_right(end) && self.left_excludes_end(end)
        }
    }

    fn right_excludes_start(&self, start: Position) -> bool {
        match self.right {
            Bound::Open => true,
            Bound::Page(page) => start.page_number <= page,
            Bound::At(right) => start < right,
        }
    }

    fn left_excludes_end(&self, end: Position) -> bool {
        match self.left {
            Bound::Open => true,
            Bound::Page(page) => end.page_number >= page,
            Bound::At(left) => end > left,
        }
    }
}
