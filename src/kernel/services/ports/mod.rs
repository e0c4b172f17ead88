//! Service ports: traits + data contracts.

pub mod caret;
pub mod config;
pub mod options;
pub mod page;
pub mod search;

pub use caret::{CaretSource, SharedCaret};
pub use config::SearchSettings;
pub use options::{Bound, SearchTaskOptions, NO_LIMIT};
pub use page::{PageError, PageProvider, Result as PageResult};
pub use search::{Position, SearchError, SearchMessage, SearchResult};
