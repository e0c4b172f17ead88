//! Literal page matcher
//!
//! - memchr `Finder` built once per task
//! - case-insensitive mode folds ASCII only so byte offsets stay valid
//! - whole-word mode checks XID-continue characters around the match

use crate::kernel::services::ports::{Position, SearchResult, SearchTaskOptions};
use memchr::memmem::Finder;
use unicode_xid::UnicodeXID;

pub struct LiteralMatcher {
    finder: Finder<'static>,
    pattern_len: usize,
    case_sensitive: bool,
    check_before: bool,
    check_after: bool,
    context_radius: usize,
}

impl LiteralMatcher {
    pub fn new(pattern: &str, case_sensitive: bool, whole_words: bool) -> Self {
        let needle = if case_sensitive {
            pattern.as_bytes().to_vec()
        } else {
            pattern.to_ascii_lowercase().into_bytes()
        };
        let check_before = whole_words && pattern.chars().next().is_some_and(is_word_char);
        let check_after = whole_words && pattern.chars().next_back().is_some_and(is_word_char);

        Self {
            finder: Finder::new(&needle).into_owned(),
            pattern_len: needle.len(),
            case_sensitive,
            check_before,
            check_after,
            context_radius: 0,
        }
    }

    pub fn from_options(options: &SearchTaskOptions) -> Self {
        let mut matcher = Self::new(
            &options.pattern,
            options.case_sensitive,
            options.whole_words,
        );
        matcher.context_radius = options.context_radius;
        matcher
    }

    /// Byte ranges of all non-overlapping matches, in text order.
    pub fn find_all(&self, text: &str) -> Vec<(usize, usize)> {
        if self.pattern_len == 0 {
            return Vec::new();
        }

        let folded;
        let haystack = if self.case_sensitive {
            text.as_bytes()
        } else {
            folded = text.to_ascii_lowercase();
            folded.as_bytes()
        };

        let mut ranges = Vec::new();
        let mut from = 0usize;
        while let Some(pos) = self.finder.find(&haystack[from..]) {
            let start = from + pos;
            let end = start + self.pattern_len;
            if self.is_whole_word(text, start, end) {
                ranges.push((start, end));
                from = end;
            } else {
                // a UTF-8 needle never matches at a continuation byte
                from = start + 1;
            }
        }
        ranges
    }

    /// Matches of one page turned into results with clipped context.
    pub fn page_results(&self, page_number: i64, text: &str) -> Vec<SearchResult> {
        self.find_all(text)
            .into_iter()
            .map_while(|(start, end)| {
                // positions cannot address bytes past i32::MAX
                let start_offset = i32::try_from(start).ok()?;
                let end_offset = i32::try_from(end).ok()?;
                Some(SearchResult::new(
                    Position::new(page_number, start_offset),
                    Position::new(page_number, end_offset),
                    context_before(text, start, self.context_radius),
                    text[start..end].to_string(),
                    context_after(text, end, self.context_radius),
                ))
            })
            .collect()
    }

    fn is_whole_word(&self, text: &str, start: usize, end: usize) -> bool {
        if self.check_before && text[..start].chars().next_back().is_some_and(is_word_char) {
            return false;
        }
        if self.check_after && text[end..].chars().next().is_some_and(is_word_char) {
            return false;
        }
        true
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_xid_continue()
}

fn context_before(text: &str, start: usize, radius: usize) -> String {
    if radius == 0 {
        return String::new();
    }
    let head = &text[..start];
    let cut = head
        .char_indices()
        .rev()
        .nth(radius - 1)
        .map(|(i, _)| i)
        .unwrap_or(0);
    head[cut..].to_string()
}

fn context_after(text: &str, end: usize, radius: usize) -> String {
    text[end..].chars().take(radius).collect()
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/search/matcher.rs"]
mod tests;
