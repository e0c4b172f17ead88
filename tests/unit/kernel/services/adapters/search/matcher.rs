use super::*;

#[test]
fn test_literal_search() {
    let matcher = LiteralMatcher::new("hello", true, false);
    let ranges = matcher.find_all("hello world hello");
    assert_eq!(ranges, vec![(0, 5), (12, 17)]);
}

#[test]
fn test_case_insensitive() {
    let matcher = LiteralMatcher::new("hello", false, false);
    assert_eq!(matcher.find_all("Hello HELLO hello").len(), 3);

    let matcher = LiteralMatcher::new("hello", true, false);
    assert_eq!(matcher.find_all("Hello HELLO hello").len(), 1);
}

#[test]
fn test_matches_do_not_overlap() {
    let matcher = LiteralMatcher::new("aa", true, false);
    assert_eq!(matcher.find_all("aaaaa"), vec![(0, 2), (2, 4)]);
}

#[test]
fn test_whole_words() {
    let matcher = LiteralMatcher::new("foo", true, true);
    let ranges = matcher.find_all("foobar foo_x foo, (foo) barfoo");
    assert_eq!(ranges, vec![(13, 16), (19, 22)]);
}

#[test]
fn test_whole_words_skips_non_word_edges() {
    let matcher = LiteralMatcher::new("foo.", true, true);
    assert_eq!(matcher.find_all("foo.bar"), vec![(0, 4)]);
    assert!(matcher.find_all("xfoo.bar").is_empty());
}

#[test]
fn test_empty_pattern() {
    let matcher = LiteralMatcher::new("", true, false);
    assert!(matcher.find_all("hello").is_empty());
}

#[test]
fn test_multibyte_offsets_and_context() {
    let opts = SearchTaskOptions::new()
        .with_pattern("ß")
        .with_context_radius(2);
    let matcher = LiteralMatcher::from_options(&opts);
    let results = matcher.page_results(4, "äöß ü");

    assert_eq!(results.len(), 1);
    let r = &results[0];
    assert_eq!(r.start, Position::new(4, 4));
    assert_eq!(r.end, Position::new(4, 6));
    assert_eq!(r.context_prefix, "äö");
    assert_eq!(r.matched_text, "ß");
    assert_eq!(r.context_postfix, " ü");
}

#[test]
fn test_context_clipped_at_page() {
    let opts = SearchTaskOptions::new()
        .with_pattern("foo")
        .with_context_radius(10);
    let matcher = LiteralMatcher::from_options(&opts);
    let results = matcher.page_results(0, "abFOOcd");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].context_prefix, "ab");
    assert_eq!(results[0].matched_text, "FOO");
    assert_eq!(results[0].context_postfix, "cd");
}
