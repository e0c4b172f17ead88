use super::*;
use std::io::Write;

fn write_temp(content: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_page_count_rounds_up() {
    let file = write_temp(b"0123456789");
    let provider = FilePageProvider::open(file.path(), 4).unwrap();
    assert_eq!(provider.page_count().unwrap(), 3);
    assert_eq!(provider.page_text(0).unwrap(), "0123");
    assert_eq!(provider.page_text(1).unwrap(), "4567");
    assert_eq!(provider.page_text(2).unwrap(), "89");
}

#[test]
fn test_empty_file_has_no_pages() {
    let file = write_temp(b"");
    let provider = FilePageProvider::open(file.path(), 16).unwrap();
    assert_eq!(provider.page_count().unwrap(), 0);
    assert!(matches!(
        provider.page_text(0),
        Err(PageError::OutOfRange { page: 0, total: 0 })
    ));
}

#[test]
fn test_multibyte_chars_are_not_split() {
    // "abcä" + "éfgh": 'ä' straddles the first page boundary
    let text = "abcäéfgh";
    let file = write_temp(text.as_bytes());
    let provider = FilePageProvider::open(file.path(), 4).unwrap();

    let mut joined = String::new();
    for page in 0..provider.page_count().unwrap() {
        let chunk = provider.page_text(page).unwrap();
        assert!(!chunk.contains('\u{FFFD}'), "page {} split a char", page);
        joined.push_str(&chunk);
    }
    assert_eq!(joined, text);
    assert_eq!(provider.page_text(0).unwrap(), "abcä");
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = FilePageProvider::open(&dir.path().join("missing.txt"), 16);
    assert!(matches!(result, Err(PageError::Io(_))));
}

#[test]
fn test_page_size_keeps_offsets_addressable() {
    let file = write_temp(b"huge pages");
    let provider = FilePageProvider::open(file.path(), usize::MAX).unwrap();
    assert_eq!(provider.page_size(), MAX_PAGE_SIZE);
    assert!(provider.page_size() + 3 <= i32::MAX as usize);
    assert_eq!(provider.page_count().unwrap(), 1);
    assert_eq!(provider.page_text(0).unwrap(), "huge pages");
}
