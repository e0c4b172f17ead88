//! Service adapters: OS/runtime specific implementations (IO/async).

pub mod page;
pub mod search;
pub mod settings;

pub use page::{FilePageProvider, MemoryPageProvider, MAX_PAGE_SIZE};
pub use search::{
    ChannelSink, CloseSearchTask, LiteralMatcher, RangeSearchTask, SearchService, SearchSink,
    SearchTask, TaskHandle, TaskKind, TaskState,
};
pub use settings::{
    ensure_log_dir, ensure_settings_file, get_log_dir, get_settings_path, load_settings,
    load_settings_from,
};
