// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Check that every seed URL is alive (any failure aborts the run)
// 3. Crawl depth-first from each seed, listening for Ctrl-C / SIGTERM
// 4. Save the url tree, whether the crawl finished or was interrupted
// 5. Exit with proper code (0 = finished, 1 = interrupted, 2 = error)
//
// Rust concepts used:
// - async/await: The HTTP client and signal handling are async
// - Result<T, E>: For error handling (T = success type, E = error type)
// =============================================================================

mod checker; // src/checker/ - seed validation
mod checkpoint; // src/checkpoint.rs - saving the tree to disk
mod cli; // src/cli.rs - command-line parsing
mod config; // src/config.rs - runtime settings and defaults
mod crawl; // src/crawl/ - link extraction, dedup and the tree builder
mod error; // src/error.rs - error types
mod session; // src/session.rs - state of one crawl
mod signal; // src/signal.rs - interrupt handling

use anyhow::{bail, Result};
use clap::Parser; // Parser trait enables the parse() method
use cli::Cli;
use crawl::CrawlOutcome;
use session::CrawlSession;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

const EXIT_OK: i32 = 0;
const EXIT_ERROR: i32 = 2;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_ERROR
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = crawl finished and was saved
//   Ok(1) = crawl was interrupted, partial tree saved
//   Err   = a seed failed validation or the tree could not be saved
async fn run() -> Result<i32> {
    // clap prints usage and exits on its own when no seeds are given
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.is_resume_request() {
        bail!("resuming a saved url tree is not supported; pass the seed url(s) to crawl instead");
    }

    let mut session = CrawlSession::new(cli.crawl_config())?;

    println!("🔍 Checking {} seed url(s)...", cli.seeds.len());
    let seeds = session.validate_seeds(&cli.seeds).await?;

    // Only start catching Ctrl-C once there is something worth saving
    let cancel = CancellationToken::new();
    let listener = signal::spawn_interrupt_listener(cancel.clone());

    println!("🌐 Crawling (Ctrl-C saves progress and stops)");
    let outcome = session.crawl(&seeds, &cancel).await;

    session.checkpoint()?;
    listener.abort();

    print_summary(&session, outcome);

    Ok(match outcome {
        CrawlOutcome::Completed => EXIT_OK,
        CrawlOutcome::Interrupted => signal::EXIT_INTERRUPTED,
    })
}

// Logs go to stderr; RUST_LOG wins over --verbose when set
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "urltree=debug" } else { "urltree=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_summary(session: &CrawlSession, outcome: CrawlOutcome) {
    let stats = session.stats();
    info!(
        fetched = stats.pages_fetched,
        failed = stats.pages_failed,
        duplicates = stats.duplicates_skipped,
        "crawl finished"
    );

    println!();
    match outcome {
        CrawlOutcome::Completed => println!("✅ Crawl complete"),
        CrawlOutcome::Interrupted => println!("⏹️  Crawl interrupted, progress saved"),
    }

    let forest = session.forest();
    if forest.is_empty() {
        println!("   No urls were recorded");
    }
    println!("📊 Summary:");
    println!("   🌳 Trees: {}", forest.roots().len());
    println!("   🔗 Urls: {}", session.visited().len());
    println!("   ❌ Failed fetches: {}", stats.pages_failed);
    println!("   💾 Saved to: {}", session.config().store_path.display());
}
