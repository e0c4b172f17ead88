//! Engine-side search state, owned by the thread that drives the UI.

mod close;
mod engine;
mod panel;
mod status;

pub use close::CloseSearchResults;
pub use engine::{Navigation, SearchEngine, SearchQuery};
pub use panel::RangeSearchPanel;
pub use status::StatusText;
