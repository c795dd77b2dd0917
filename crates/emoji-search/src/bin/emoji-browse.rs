//! Queries an emoji dataset from the command line.
//!
//! With `--watch`, each line read from stdin is treated as the query being
//! typed and results are printed after the debounce window.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use emoji_search::config::SEARCH_CONFIG_FILENAME;
use emoji_search::{
    summarize, DebouncedSearch, EmojiDataset, FilterEngine, FilterState, Result, SearchConfig,
    SearchError, SearchSnapshot,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;

/// Filter an emoji sequence dataset with `field:value` queries.
#[derive(Debug, Parser)]
#[command(name = "emoji-browse")]
struct BrowseArgs {
    /// Search config file. Defaults to `emoji-search.json` when present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Dataset JSON file. Overrides `dataset_path` from the config.
    #[arg(long, short)]
    dataset: Option<PathBuf>,

    /// Print supported sequence counts per API level.
    #[arg(long, action)]
    summary: bool,

    /// Read queries line by line from stdin and print debounced results.
    #[arg(long, action)]
    watch: bool,

    /// Query clauses, e.g. `api:21..24 note:ring`.
    query: Vec<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(BrowseArgs::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("emoji-browse: {error}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: BrowseArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => SearchConfig::load(path)?,
        None => SearchConfig::load_or_default(&PathBuf::from(SEARCH_CONFIG_FILENAME))?,
    };

    let dataset_path = args
        .dataset
        .clone()
        .or_else(|| config.dataset_path.clone())
        .ok_or_else(|| SearchError::InvalidInput("no dataset given".to_string()))?;
    let dataset = Arc::new(EmojiDataset::load(&dataset_path)?);

    if args.summary {
        for level in summarize(dataset.records().iter().map(Arc::as_ref), dataset.api_range()) {
            println!(
                "api {:>3}  {:>5} supported  {:>+6}",
                level.api_level, level.supported, level.delta
            );
        }
    }

    let engine = FilterEngine::new(dataset);
    if args.watch {
        return watch(engine, &config).await;
    }

    if !args.summary || !args.query.is_empty() {
        let state = engine.search(&args.query.join(" "))?;
        print_state(&state, config.max_printed);
    }
    Ok(())
}

async fn watch(engine: FilterEngine, config: &SearchConfig) -> Result<()> {
    let search = DebouncedSearch::spawn(engine, config.debounce_window());
    let mut updates = search.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(query) => {
                    if !search.submit(query) {
                        return Err(SearchError::InvalidInput("search driver stopped".to_string()));
                    }
                }
                None => {
                    search.flush().await;
                    if let Some(snapshot) = take_unseen(&mut updates) {
                        print_snapshot(&snapshot, config.max_printed);
                    }
                    return Ok(());
                }
            },
            changed = updates.changed() => {
                if changed.is_err() {
                    return Ok(());
                }
                let snapshot = updates.borrow_and_update().clone();
                print_snapshot(&snapshot, config.max_printed);
            }
        }
    }
}

/// Returns the latest snapshot if it has not been printed yet.
fn take_unseen(updates: &mut watch::Receiver<SearchSnapshot>) -> Option<SearchSnapshot> {
    match updates.has_changed() {
        Ok(true) => Some(updates.borrow_and_update().clone()),
        _ => None,
    }
}

fn print_snapshot(snapshot: &SearchSnapshot, max_printed: usize) {
    if let Some(error) = &snapshot.error {
        eprintln!("search failed: {error}");
        return;
    }
    print_state(&snapshot.state, max_printed);
}

fn print_state(state: &FilterState, max_printed: usize) {
    let levels = state
        .visible_api_levels
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    println!("api levels: {levels}");

    for record in state.matches.iter().take(max_printed) {
        let added = record
            .api_added()
            .map_or_else(|| "-".to_string(), |level| level.to_string());
        println!(
            "{}\t{}\tadded {}\t{}",
            record.as_text(),
            record.codepoint_label(),
            added,
            record.notes
        );
    }
    if state.match_count > max_printed {
        println!("... {} more", state.match_count - max_printed);
    }
    println!("{} results", state.match_count);
}
