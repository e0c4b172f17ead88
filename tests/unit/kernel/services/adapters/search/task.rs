use super::*;
use crate::kernel::services::adapters::page::MemoryPageProvider;
use crate::kernel::services::ports::{Bound, PageError, Position, NO_LIMIT};

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Frame(i64, Vec<SearchResult>),
    Closest(Vec<SearchResult>, usize),
    Progress(i64, i64),
    Finished(Option<i64>),
    Stopped(Option<i64>),
    IoError(String),
}

#[derive(Default)]
struct RecordingSink {
    started: Option<(i64, i64)>,
    events: Vec<Event>,
}

impl RecordingSink {
    fn terminal_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    Event::Finished(_) | Event::Stopped(_) | Event::IoError(_)
                )
            })
            .count()
    }

    fn frames(&self) -> Vec<(i64, Vec<SearchResult>)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Frame(page, results) => Some((*page, results.clone())),
                _ => None,
            })
            .collect()
    }
}

impl SearchSink for RecordingSink {
    fn started(&mut self, first_page: i64, total_pages: i64) -> bool {
        assert!(self.events.is_empty(), "start reported after other events");
        self.started = Some((first_page, total_pages));
        true
    }

    fn frame_results_found(&mut self, page: i64, results: Vec<SearchResult>) -> bool {
        self.events.push(Event::Frame(page, results));
        true
    }

    fn closest_result_found(&mut self, results: Vec<SearchResult>, closest: usize) -> bool {
        self.events.push(Event::Closest(results, closest));
        true
    }

    fn progress(&mut self, page: i64, total_pages: i64) -> bool {
        self.events.push(Event::Progress(page, total_pages));
        true
    }

    fn finished(&mut self, last_page: Option<i64>) {
        self.events.push(Event::Finished(last_page));
    }

    fn stopped(&mut self, last_page: Option<i64>) {
        self.events.push(Event::Stopped(last_page));
    }

    fn io_error(&mut self, error: &PageError) {
        self.events.push(Event::IoError(error.to_string()));
    }
}

struct FailingProvider {
    inner: MemoryPageProvider,
    fail_at: i64,
}

impl PageProvider for FailingProvider {
    fn page_count(&self) -> crate::kernel::services::ports::PageResult<i64> {
        self.inner.page_count()
    }

    fn page_text(&self, page_number: i64) -> crate::kernel::services::ports::PageResult<String> {
        if page_number == self.fail_at {
            return Err(PageError::Io(std::io::Error::other("disk gone")));
        }
        self.inner.page_text(page_number)
    }
}

/// Ten pages; "foo" only on page 7 at offset 3.
fn ten_pages() -> MemoryPageProvider {
    let pages = (0..10)
        .map(|i| {
            if i == 7 {
                "abcfoo def".to_string()
            } else {
                format!("page {} text", i)
            }
        })
        .collect();
    MemoryPageProvider::new(pages)
}

fn one_match_per_page(count: usize) -> MemoryPageProvider {
    MemoryPageProvider::new((0..count).map(|i| format!("{} foo", i)).collect())
}

fn at(page: i64, offset: i32) -> Bound {
    Bound::At(Position::new(page, offset))
}

#[test]
fn test_close_forward_finds_page_seven() {
    let opts = SearchTaskOptions::new()
        .with_pattern("foo")
        .with_bounds(at(0, 0), NO_LIMIT);
    let mut task = CloseSearchTask::new(opts).with_progress_period(Duration::from_secs(60));
    let mut sink = RecordingSink::default();
    task.run(&ten_pages(), &mut sink);

    match &sink.events[0] {
        Event::Closest(results, closest) => {
            assert_eq!(*closest, 0);
            assert_eq!(results.len(), 1);
            assert_eq!(results[0].start, Position::new(7, 3));
            assert_eq!(results[0].end, Position::new(7, 6));
        }
        other => panic!("unexpected event {:?}", other),
    }
    assert_eq!(sink.events[1], Event::Finished(Some(7)));
    assert_eq!(sink.events.len(), 2);
    assert_eq!(task.handle().state(), TaskState::Finished);
}

#[test]
fn test_close_backward_from_start_finds_nothing_then_loop_finds() {
    let opts = SearchTaskOptions::new()
        .with_pattern("foo")
        .with_direction(false)
        .with_bounds(NO_LIMIT, at(0, 0));
    let mut sink = RecordingSink::default();
    CloseSearchTask::new(opts.clone()).run(&ten_pages(), &mut sink);
    assert_eq!(sink.events, vec![Event::Finished(Some(0))]);

    let mut sink = RecordingSink::default();
    CloseSearchTask::new(opts.looped())
        .with_progress_period(Duration::from_secs(60))
        .run(&ten_pages(), &mut sink);
    match &sink.events[0] {
        Event::Closest(results, closest) => {
            assert_eq!(results[*closest].start, Position::new(7, 3));
        }
        other => panic!("unexpected event {:?}", other),
    }
    assert_eq!(sink.events.last(), Some(&Event::Finished(Some(7))));
}

#[test]
fn test_close_picks_nearest_in_page() {
    let provider = MemoryPageProvider::new(vec!["foo foo foo foo".to_string()]);

    let forward = SearchTaskOptions::new()
        .with_pattern("foo")
        .with_bounds(at(0, 5), NO_LIMIT);
    let mut sink = RecordingSink::default();
    CloseSearchTask::new(forward).run(&provider, &mut sink);
    assert!(matches!(&sink.events[0], Event::Closest(results, 2) if results.len() == 4));

    let backward = SearchTaskOptions::new()
        .with_pattern("foo")
        .with_direction(false)
        .with_bounds(NO_LIMIT, at(0, 11));
    let mut sink = RecordingSink::default();
    CloseSearchTask::new(backward).run(&provider, &mut sink);
    assert!(matches!(&sink.events[0], Event::Closest(_, 2)));
}

#[test]
fn test_range_frames_in_scan_order() {
    let opts = SearchTaskOptions::new().with_pattern("foo");
    let mut sink = RecordingSink::default();
    RangeSearchTask::new(opts.clone())
        .with_progress_period(Duration::from_secs(60))
        .run(&one_match_per_page(5), &mut sink);
    let pages: Vec<i64> = sink.frames().iter().map(|(p, _)| *p).collect();
    assert_eq!(pages, vec![0, 1, 2, 3, 4]);
    assert_eq!(sink.events.last(), Some(&Event::Finished(Some(4))));

    let mut sink = RecordingSink::default();
    RangeSearchTask::new(opts.with_direction(false))
        .with_progress_period(Duration::from_secs(60))
        .run(&one_match_per_page(5), &mut sink);
    let pages: Vec<i64> = sink.frames().iter().map(|(p, _)| *p).collect();
    assert_eq!(pages, vec![4, 3, 2, 1, 0]);
    assert_eq!(sink.events.last(), Some(&Event::Finished(Some(0))));
}

#[test]
fn test_range_respects_bounds() {
    let provider = MemoryPageProvider::new(vec![
        "foo foo".to_string(),
        "foo foo".to_string(),
        "foo foo".to_string(),
    ]);
    let opts = SearchTaskOptions::new()
        .with_pattern("foo")
        .with_bounds(at(0, 1), Bound::Page(1));
    let mut sink = RecordingSink::default();
    RangeSearchTask::new(opts).run(&provider, &mut sink);

    let starts: Vec<Position> = sink
        .frames()
        .into_iter()
        .flat_map(|(_, results)| results.into_iter().map(|r| r.start))
        .collect();
    assert_eq!(
        starts,
        vec![
            Position::new(0, 4),
            Position::new(1, 0),
            Position::new(1, 4)
        ]
    );
    assert_eq!(sink.events.last(), Some(&Event::Finished(Some(1))));
}

#[test]
fn test_rescan_is_identical() {
    let provider = one_match_per_page(12);
    let opts = SearchTaskOptions::new()
        .with_pattern("FOO")
        .with_context_radius(4);

    let mut first = RecordingSink::default();
    RangeSearchTask::new(opts.clone()).run(&provider, &mut first);
    let mut second = RecordingSink::default();
    RangeSearchTask::new(opts).run(&provider, &mut second);

    assert_eq!(first.frames().len(), 12);
    assert_eq!(first.frames(), second.frames());
}

#[test]
fn test_only_one_page() {
    let opts = SearchTaskOptions::new()
        .with_pattern("foo")
        .with_only_one_page(true)
        .with_bounds(Bound::Page(2), Bound::Page(2));
    let mut sink = RecordingSink::default();
    CloseSearchTask::new(opts).run(&ten_pages(), &mut sink);
    assert_eq!(sink.events, vec![Event::Finished(Some(2))]);
}

#[test]
fn test_stop_before_run() {
    let mut task = RangeSearchTask::new(SearchTaskOptions::new().with_pattern("foo"));
    task.handle().request_stop();
    let mut sink = RecordingSink::default();
    task.run(&one_match_per_page(3), &mut sink);

    assert_eq!(sink.events, vec![Event::Stopped(None)]);
    assert_eq!(task.handle().state(), TaskState::Stopped);
}

#[test]
fn test_io_error_is_terminal() {
    let provider = FailingProvider {
        inner: one_match_per_page(6),
        fail_at: 3,
    };
    let mut task = RangeSearchTask::new(SearchTaskOptions::new().with_pattern("foo"));
    let mut sink = RecordingSink::default();
    task.run(&provider, &mut sink);

    assert_eq!(sink.frames().len(), 3);
    assert_eq!(sink.terminal_count(), 1);
    assert!(matches!(sink.events.last(), Some(Event::IoError(msg)) if msg.contains("disk gone")));
    assert_eq!(task.handle().state(), TaskState::Failed);
}

#[test]
fn test_progress_reported_and_terminal_last() {
    let mut task = RangeSearchTask::new(SearchTaskOptions::new().with_pattern("zzz"))
        .with_progress_period(Duration::ZERO);
    let mut sink = RecordingSink::default();
    task.run(&one_match_per_page(3), &mut sink);

    assert_eq!(
        sink.events,
        vec![
            Event::Progress(0, 3),
            Event::Progress(1, 3),
            Event::Progress(2, 3),
            Event::Finished(Some(2)),
        ]
    );
}

#[test]
fn test_empty_provider_finishes() {
    let mut sink = RecordingSink::default();
    RangeSearchTask::new(SearchTaskOptions::new().with_pattern("foo"))
        .run(&MemoryPageProvider::default(), &mut sink);
    assert_eq!(sink.events, vec![Event::Finished(None)]);
}

#[test]
fn test_task_runs_once() {
    let mut task = RangeSearchTask::new(SearchTaskOptions::new().with_pattern("foo"));
    let mut sink = RecordingSink::default();
    task.run(&one_match_per_page(2), &mut sink);
    let first_len = sink.events.len();
    task.run(&one_match_per_page(2), &mut sink);
    assert_eq!(sink.events.len(), first_len);
}

#[test]
fn test_start_page_past_end_is_clamped() {
    let opts = SearchTaskOptions::new()
        .with_pattern("foo")
        .with_bounds(Bound::Page(50), NO_LIMIT);
    let mut sink = RecordingSink::default();
    RangeSearchTask::new(opts).run(&one_match_per_page(5), &mut sink);

    assert_eq!(sink.started, Some((4, 5)));
    let pages: Vec<i64> = sink.frames().iter().map(|(page, _)| *page).collect();
    assert_eq!(pages, vec![4]);
    assert_eq!(sink.events.last(), Some(&Event::Finished(Some(4))));
}

#[test]
fn test_backward_start_defaults_to_last_page() {
    let opts = SearchTaskOptions::new().with_pattern("foo").with_direction(false);
    let mut sink = RecordingSink::default();
    RangeSearchTask::new(opts).run(&one_match_per_page(3), &mut sink);
    assert_eq!(sink.started, Some((2, 3)));
}

#[test]
fn test_failed_page_count_never_starts() {
    struct NoCount;

    impl PageProvider for NoCount {
        fn page_count(&self) -> crate::kernel::services::ports::PageResult<i64> {
            Err(std::io::Error::other("count failed").into())
        }

        fn page_text(
            &self,
            _page_number: i64,
        ) -> crate::kernel::services::ports::PageResult<String> {
            unreachable!()
        }
    }

    let mut task = RangeSearchTask::new(SearchTaskOptions::new().with_pattern("foo"));
    let mut sink = RecordingSink::default();
    task.run(&NoCount, &mut sink);

    assert_eq!(sink.started, None);
    assert!(matches!(sink.events.as_slice(), [Event::IoError(msg)] if msg.contains("count failed")));
    assert_eq!(task.handle().state(), TaskState::Failed);
}
