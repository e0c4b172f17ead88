//! Headless search core (engine state + services).

pub mod search;
pub mod services;

pub use search::{
    CloseSearchResults, Navigation, RangeSearchPanel, SearchEngine, SearchQuery, StatusText,
};
