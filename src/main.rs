use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use lfsearch::kernel::services::adapters::{ensure_settings_file, load_settings, FilePageProvider};
use lfsearch::kernel::services::ports::{
    Position, SearchResult, SearchSettings, SearchTaskOptions, SharedCaret,
};
use lfsearch::kernel::{SearchEngine, SearchQuery};

mod logging;

const USAGE: &str = "usage: lfsearch <file> <pattern> [--backward] [--case] [--words] [--next]";

struct Args {
    path: PathBuf,
    pattern: String,
    forward: bool,
    case_sensitive: bool,
    whole_words: bool,
    next_only: bool,
}

fn parse_args() -> Option<Args> {
    let mut positional = Vec::new();
    let mut args = Args {
        path: PathBuf::new(),
        pattern: String::new(),
        forward: true,
        case_sensitive: false,
        whole_words: false,
        next_only: false,
    };

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--backward" => args.forward = false,
            "--case" => args.case_sensitive = true,
            "--words" => args.whole_words = true,
            "--next" => args.next_only = true,
            _ if arg.starts_with("--") => return None,
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    args.path = PathBuf::from(positional.next()?);
    args.pattern = positional.next()?;
    if positional.next().is_some() {
        return None;
    }
    Some(args)
}

fn main() -> ExitCode {
    let Some(args) = parse_args() else {
        eprintln!("{}", USAGE);
        return ExitCode::from(2);
    };

    let _logging = logging::init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "lfsearch failed");
            eprintln!("lfsearch: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = ensure_settings_file() {
        tracing::warn!(error = %e, "settings file unavailable");
    }
    let settings: SearchSettings = load_settings().unwrap_or_default();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let provider = Arc::new(FilePageProvider::open(&args.path, settings.page_size)?);
    let caret = Arc::new(SharedCaret::new(Position::default()));

    let mut engine = SearchEngine::new(
        runtime.handle().clone(),
        provider,
        caret,
        settings.clone(),
    );

    let query = SearchQuery::new(args.pattern.clone())
        .with_case_sensitivity(args.case_sensitive)
        .with_whole_words(args.whole_words);

    if args.next_only {
        engine.launch_close_search(query, args.forward, false)?;
    } else {
        let options = SearchTaskOptions::new()
            .with_pattern(query.pattern.clone())
            .with_direction(args.forward)
            .with_case_sensitivity(query.case_sensitive)
            .with_whole_words(query.whole_words)
            .with_context_radius(settings.context_radius)
            .with_critical_result_count(settings.critical_result_count);
        engine.set_query(query);
        engine.launch_range_search(options, true)?;
    }

    while engine.is_searching() {
        engine.poll_timeout(Duration::from_millis(50));
    }

    if args.next_only {
        if let Some(result) = engine.close_results().selected_result() {
            print_result(result);
        }
    } else {
        for result in engine.panel().results() {
            print_result(result);
        }
    }

    if let Some(status) = engine.status().text() {
        println!("{}", status);
    }
    Ok(())
}

fn print_result(result: &SearchResult) {
    println!(
        "{}  {}[{}]{}",
        result.start,
        one_line(&result.context_prefix),
        result.matched_text,
        one_line(&result.context_postfix)
    );
}

fn one_line(text: &str) -> String {
    text.replace(['\r', '\n'], " ")
}
