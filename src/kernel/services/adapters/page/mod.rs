//! Page providers: file-backed and in-memory.

mod file;
mod memory;

pub use file::{FilePageProvider, MAX_PAGE_SIZE};
pub use memory::MemoryPageProvider;
