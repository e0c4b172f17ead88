use super::page::PageError;
use std::cmp::Ordering;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Debug)]
pub enum SearchError {
    EmptyPattern,
    Page(PageError),
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchError::EmptyPattern => write!(f, "Search pattern is empty"),
            SearchError::Page(e) => write!(f, "Page error: {}", e),
        }
    }
}

impl std::error::Error for SearchError {}

impl From<PageError> for SearchError {
    fn from(e: PageError) -> Self {
        SearchError::Page(e)
    }
}

/// Address of a single byte inside the paged file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub page_number: i64,
    pub offset_in_page: i32,
}

impl Position {
    pub fn new(page_number: i64, offset_in_page: i32) -> Self {
        Self {
            page_number,
            offset_in_page,
        }
    }

    pub fn set(&mut self, page_number: i64, offset_in_page: i32) {
        self.page_number = page_number;
        self.offset_in_page = offset_in_page;
    }

    pub fn reset(&mut self) {
        self.set(0, 0);
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.page_number
            .cmp(&other.page_number)
            .then_with(|| self.offset_in_page.cmp(&other.offset_in_page))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.page_number, self.offset_in_page)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub start: Position,
    pub end: Position,
    pub context_prefix: String,
    pub matched_text: String,
    pub context_postfix: String,
}

impl SearchResult {
    pub fn new(
        start: Position,
        end: Position,
        context_prefix: String,
        matched_text: String,
        context_postfix: String,
    ) -> Self {
        Self {
            start,
            end,
            context_prefix,
            matched_text,
            context_postfix,
        }
    }
}

/// Messages marshaled from a running task back to the engine thread.
#[derive(Debug, Clone)]
pub enum SearchMessage {
    /// First message of every task: where the scan begins and how many
    /// pages the file has.
    Started {
        task_id: u64,
        first_page: i64,
        total_pages: i64,
    },
    FrameFound {
        task_id: u64,
        page: i64,
        results: Vec<SearchResult>,
    },
    ClosestFound {
        task_id: u64,
        results: Vec<SearchResult>,
        closest: usize,
    },
    Progress {
        task_id: u64,
        page: i64,
        total_pages: i64,
    },
    Finished {
        task_id: u64,
        last_page: Option<i64>,
    },
    Stopped {
        task_id: u64,
        last_page: Option<i64>,
    },
    IoError {
        task_id: u64,
        message: String,
    },
}

impl SearchMessage {
    pub fn task_id(&self) -> u64 {
        match self {
            SearchMessage::Started { task_id, .. }
            | SearchMessage::FrameFound { task_id, .. }
            | SearchMessage::ClosestFound { task_id, .. }
            | SearchMessage::Progress { task_id, .. }
            | SearchMessage::Finished { task_id, .. }
            | SearchMessage::Stopped { task_id, .. }
            | SearchMessage::IoError { task_id, .. } => *task_id,
        }
    }
}
