//! 本地文件分页 Provider
//!
//! 固定字节大小的分页；页边界向后对齐到 UTF-8 字符起点，字符不会被拆到两页

use crate::kernel::services::ports::page::{PageError, PageProvider, Result};
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Longest tail of a UTF-8 character after its first byte.
const MAX_CONTINUATION: usize = 3;
/// Largest page whose byte offsets still fit a `Position` offset.
pub const MAX_PAGE_SIZE: usize = i32::MAX as usize - MAX_CONTINUATION;

pub struct FilePageProvider {
    path: PathBuf,
    file: Mutex<File>,
    len: u64,
    page_size: usize,
}

impl FilePageProvider {
    pub fn open(path: &Path, page_size: usize) -> Result<Self> {
        let file = File::open(path)?;
        let len = file.metadata()?.len();
        Ok(Self {
            path: path.to_path_buf(),
            file: Mutex::new(file),
            len,
            page_size: page_size.clamp(MAX_CONTINUATION + 1, MAX_PAGE_SIZE),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    fn read_span(&self, offset: u64, len: usize) -> io::Result<Vec<u8>> {
        let mut file = self
            .file
            .lock()
            .map_err(|_| io::Error::other("page file lock poisoned"))?;
        file.seek(SeekFrom::Start(offset))?;
        let remaining = self.len.saturating_sub(offset);
        let mut buf = Vec::with_capacity(len.min(remaining as usize));
        file.by_ref().take(len as u64).read_to_end(&mut buf)?;
        Ok(buf)
    }
}

fn is_continuation(byte: u8) -> bool {
    byte & 0b1100_0000 == 0b1000_0000
}

/// Index of the first byte at or after `at` that starts a character.
fn char_start(buf: &[u8], at: usize) -> usize {
    let mut i = at.min(buf.len());
    while i < buf.len() && i < at + MAX_CONTINUATION && is_continuation(buf[i]) {
        i += 1;
    }
    i
}

impl PageProvider for FilePageProvider {
    fn page_count(&self) -> Result<i64> {
        let size = self.page_size as u64;
        Ok(self.len.div_ceil(size) as i64)
    }

    fn page_text(&self, page_number: i64) -> Result<String> {
        let total = self.page_count()?;
        if page_number < 0 || page_number >= total {
            return Err(PageError::OutOfRange {
                page: page_number,
                total,
            });
        }

        let nominal = page_number as u64 * self.page_size as u64;
        let span = self.page_size + MAX_CONTINUATION;
        let buf = self.read_span(nominal, span)?;

        let begin = if page_number == 0 {
            0
        } else {
            char_start(&buf, 0)
        };
        let end = char_start(&buf, self.page_size);
        if begin >= end {
            return Ok(String::new());
        }
        Ok(String::from_utf8_lossy(&buf[begin..end]).into_owned())
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/page/file.rs"]
mod tests;
