use crate::kernel::services::ports::page::{PageError, PageProvider, Result};

/// Pages held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryPageProvider {
    pages: Vec<String>,
}

impl MemoryPageProvider {
    pub fn new(pages: Vec<String>) -> Self {
        Self { pages }
    }

    /// Split `text` into pages of at most `page_chars` characters.
    pub fn from_text(text: &str, page_chars: usize) -> Self {
        let page_chars = page_chars.max(1);
        let mut pages = Vec::new();
        let mut current = String::new();
        let mut count = 0usize;
        for ch in text.chars() {
            current.push(ch);
            count += 1;
            if count == page_chars {
                pages.push(std::mem::take(&mut current));
                count = 0;
            }
        }
        if !current.is_empty() {
            pages.push(current);
        }
        Self { pages }
    }
}

impl PageProvider for MemoryPageProvider {
    fn page_count(&self) -> Result<i64> {
        Ok(self.pages.len() as i64)
    }

    fn page_text(&self, page_number: i64) -> Result<String> {
        usize::try_from(page_number)
            .ok()
            .and_then(|index| self.pages.get(index))
            .cloned()
            .ok_or(PageError::OutOfRange {
                page: page_number,
                total: self.pages.len() as i64,
            })
    }
}
