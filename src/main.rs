// SPDX-License-Identifier: MPL-2.0
//! Scripted demo of the paged lightbox against an in-memory library.
//!
//! ```text
//! paged-lightbox --total 60 --page-size 24 open:22 next next prev close page:2
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use paged_lightbox::application::library::{Message, PagedLibrary};
use paged_lightbox::config::{self, Config};
use paged_lightbox::domain::library::{MediaItem, MediaPatch, Rating};
use paged_lightbox::infrastructure::InMemorySource;
use tracing::{info, warn};

const HELP: &str = "\
Usage: paged-lightbox [OPTIONS] [COMMAND]...

Options:
  --total N          Items in the generated library (default 100)
  --page-size N      Grid page size (default from settings.toml)
  --cache N          Cached pages, 0 disables (default from settings.toml)
  --fail-every N     Fail every N-th page request
  --latency-ms N     Delay every page request
  --config PATH      Read settings from PATH instead of the user config
  -h, --help         Print this help

Commands:
  open:N   next   prev   close   page:N   refresh
  rate:N   fav    shrink:N (keep the first N items, then refresh)
";

struct Args {
    total: usize,
    page_size: Option<usize>,
    cache: Option<usize>,
    fail_every: Option<u64>,
    latency_ms: Option<u64>,
    config: Option<PathBuf>,
    script: Vec<String>,
}

fn parse_args() -> Result<Option<Args>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    Ok(Some(Args {
        total: args.opt_value_from_str("--total")?.unwrap_or(100),
        page_size: args.opt_value_from_str("--page-size")?,
        cache: args.opt_value_from_str("--cache")?,
        fail_every: args.opt_value_from_str("--fail-every")?,
        latency_ms: args.opt_value_from_str("--latency-ms")?,
        config: args.opt_value_from_str("--config")?,
        script: args
            .finish()
            .into_iter()
            .filter_map(|s| s.into_string().ok())
            .collect(),
    }))
}

fn configure_logging() {
    use tracing_subscriber::prelude::*;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn load_config(args: &Args) -> Config {
    let loaded = match &args.config {
        Some(path) => config::load_from_path(path),
        None => config::load(),
    };
    let mut config = loaded.unwrap_or_else(|e| {
        warn!(error = %e, "settings unavailable, using defaults");
        Config::default()
    });

    if args.page_size.is_some() {
        config.page_size = args.page_size;
    }
    if args.cache.is_some() {
        config.page_cache_pages = args.cache;
    }
    config
}

/// One scripted user action.
enum Command {
    Open(usize),
    Next,
    Prev,
    Close,
    Page(usize),
    Refresh,
    Rate(u8),
    Favorite,
    Shrink(usize),
}

fn parse_command(word: &str) -> Option<Command> {
    let (name, value) = match word.split_once(':') {
        Some((name, value)) => (name, Some(value)),
        None => (word, None),
    };
    let number = || value.and_then(|v| v.parse::<usize>().ok());

    match name {
        "open" => number().map(Command::Open),
        "next" => Some(Command::Next),
        "prev" => Some(Command::Prev),
        "close" => Some(Command::Close),
        "page" => number().map(Command::Page),
        "refresh" => Some(Command::Refresh),
        "rate" => value.and_then(|v| v.parse().ok()).map(Command::Rate),
        "fav" => Some(Command::Favorite),
        "shrink" => number().map(Command::Shrink),
        _ => None,
    }
}

/// Feeds a message in and runs every fetch it triggers to completion.
async fn dispatch(library: &mut PagedLibrary<InMemorySource>, message: Message<MediaItem>) {
    let mut task = library.update(message);
    while let Some(fetch) = task {
        let message = fetch.run().await;
        task = library.update(message);
    }
}

/// Applies an edit to the backend copy, then to the library.
async fn edit_current(
    library: &mut PagedLibrary<InMemorySource>,
    source: &InMemorySource,
    patch_for: impl FnOnce(&MediaItem) -> MediaPatch,
) {
    let Some(item) = library.lightbox_view().current().cloned() else {
        println!("  (nothing open to edit)");
        return;
    };
    let patch = patch_for(&item);
    if let Err(e) = source.update(&item.id, &patch) {
        warn!(error = %e, "edit not stored");
        return;
    }
    dispatch(library, Message::ItemUpdated { id: item.id, patch }).await;
}

async fn run_command(
    library: &mut PagedLibrary<InMemorySource>,
    source: &InMemorySource,
    command: Command,
) {
    match command {
        Command::Open(local) => dispatch(library, Message::OpenAt(local)).await,
        Command::Next => dispatch(library, Message::Next).await,
        Command::Prev => dispatch(library, Message::Prev).await,
        Command::Close => dispatch(library, Message::Close).await,
        Command::Page(number) => dispatch(library, Message::GoToPage(number)).await,
        Command::Refresh => dispatch(library, Message::Refresh).await,
        Command::Rate(stars) => {
            edit_current(library, source, |_| MediaPatch::rating(Rating::new(stars))).await;
        }
        Command::Favorite => {
            edit_current(library, source, |item| MediaPatch::favorite(!item.favorite)).await;
        }
        Command::Shrink(len) => {
            if let Err(e) = source.truncate(len) {
                warn!(error = %e, "shrink not applied");
                return;
            }
            dispatch(library, Message::Refresh).await;
        }
    }
}

fn print_state(library: &PagedLibrary<InMemorySource>) {
    let grid = library.grid_view();
    println!(
        "  grid: page {}/{} (offset {}, {} items of {})",
        grid.page_number + 1,
        grid.page_count.max(1),
        grid.offset,
        grid.items.len(),
        grid.total_count
    );

    let lightbox = library.lightbox_view();
    match (lightbox.position_label(), lightbox.current()) {
        (Some(position), Some(item)) => {
            let rating = item.rating.map_or(0, Rating::value);
            println!(
                "  lightbox: {position} {} [{}] rating {rating}{}",
                item.title,
                item.kind.as_str(),
                if item.favorite { " fav" } else { "" }
            );
        }
        (Some(position), None) => println!("  lightbox: {position} (loading)"),
        _ => println!("  lightbox: closed"),
    }

    if let Some(error) = library.last_error() {
        println!("  error: {error} ({})", error.i18n_key());
    }
}

async fn run(args: Args) {
    let config = load_config(&args);

    let mut source = InMemorySource::generate(args.total);
    if let Some(ms) = args.latency_ms {
        source = source.with_latency(Duration::from_millis(ms));
    }
    if let Some(every) = args.fail_every {
        if let Err(e) = source.fail_every(every) {
            warn!(error = %e, "failure injection not applied");
        }
    }

    let mut library = PagedLibrary::new(source.clone(), &config);
    info!(
        total = args.total,
        page_size = library.page_size().value(),
        "library created"
    );

    dispatch(&mut library, Message::GoToPage(0)).await;
    println!("> load");
    print_state(&library);

    for word in &args.script {
        println!("> {word}");
        match parse_command(word) {
            Some(command) => run_command(&mut library, &source, command).await,
            None => {
                println!("  (unknown command)");
                continue;
            }
        }
        print_state(&library);
    }

    let stats = library.cache_stats();
    println!(
        "cache: {} hits, {} misses ({:.0}%), {} page requests",
        stats.hits,
        stats.misses,
        stats.hit_rate(),
        source.requests()
    );
    println!("events: {} recorded", library.events().total_recorded());
}

fn main() -> ExitCode {
    configure_logging();

    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            print!("{HELP}");
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("Error: {e}\n\n{HELP}");
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: failed to start runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    runtime.block_on(run(args));
    ExitCode::SUCCESS
}
