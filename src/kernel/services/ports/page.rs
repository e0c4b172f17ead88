//! Page storage contract.
//!
//! A large file is exposed as an ordered sequence of pages; only one page of
//! text is ever requested at a time.

use std::io;

pub type Result<T> = std::result::Result<T, PageError>;

#[derive(Debug)]
pub enum PageError {
    Io(io::Error),
    OutOfRange { page: i64, total: i64 },
}

impl std::fmt::Display for PageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageError::Io(e) => write!(f, "IO error: {}", e),
            PageError::OutOfRange { page, total } => {
                write!(f, "Page {} out of range (total {})", page, total)
            }
        }
    }
}

impl std::error::Error for PageError {}

impl From<io::Error> for PageError {
    fn from(e: io::Error) -> Self {
        PageError::Io(e)
    }
}

/// Must tolerate concurrent reads: a superseded task may still be fetching
/// while the next task starts.
pub trait PageProvider: Send + Sync {
    fn page_count(&self) -> Result<i64>;

    fn page_text(&self, page_number: i64) -> Result<String>;
}
