//! flat-crawler main entry point
//!
//! This is the command-line interface for the ss.lv flat crawler.

use anyhow::Context;
use clap::Parser;
use flat_crawler::config::{load_config_with_hash, Config};
use flat_crawler::crawler::crawl;
use flat_crawler::job::{City, Job, Language, ListingType, RecencyWindow};
use flat_crawler::storage::{SqliteStorage, SystemClock};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// flat-crawler: collects flat listings from ss.lv
///
/// Crawls every results page of one listing category (type, language, city,
/// recency window), extracts each listing row, and stores the listings in a
/// SQLite database. Listings already stored are left untouched.
#[derive(Parser, Debug)]
#[command(name = "flat-crawler")]
#[command(version)]
#[command(about = "Collects flat listings from ss.lv", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Override the listing type (sell, rent)
    #[arg(long)]
    listing_type: Option<ListingType>,

    /// Override the site language (ru, lv)
    #[arg(long)]
    language: Option<Language>,

    /// Override the city
    #[arg(long)]
    city: Option<City>,

    /// Override the recency window (all, today, today-2, today-5)
    #[arg(long)]
    window: Option<RecencyWindow>,

    /// Show the job and its start URL without crawling
    #[arg(long, conflicts_with_all = ["stats", "no_persist"])]
    dry_run: bool,

    /// Crawl and report, but do not write to the database
    #[arg(long, conflicts_with = "stats")]
    no_persist: bool,

    /// Show stored listing counts from the database and exit
    #[arg(long)]
    stats: bool,
}

impl Cli {
    /// Rebuilds the configured job with any command-line overrides applied
    fn job(&self, configured: &Job) -> Job {
        Job::new(
            configured.user_agent().clone(),
            self.listing_type.unwrap_or(configured.listing_type()),
            self.language.unwrap_or(configured.language()),
            self.city.unwrap_or(configured.city()),
            self.window.unwrap_or(configured.window()),
        )
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, config_hash) = match load_config_with_hash(&cli.config) {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);
    config.job = cli.job(&config.job);

    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.stats {
        handle_stats(&config)?;
    } else {
        handle_crawl(&config, !cli.no_persist).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("flat_crawler=info,warn"),
            1 => EnvFilter::new("flat_crawler=debug,info"),
            2 => EnvFilter::new("flat_crawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the job and where the crawl would start
fn handle_dry_run(config: &Config) {
    let job = &config.job;

    println!("=== flat-crawler Dry Run ===\n");

    println!("Job:");
    println!("  Listing type: {}", job.listing_type());
    println!("  Language: {}", job.language());
    println!("  City: {}", job.city());
    println!("  Window: {}", job.window());
    println!("  User agent: {}", job.user_agent().as_str());

    println!("\nCrawler:");
    println!("  Base URL: {}", config.crawler.base_url);
    println!(
        "  Request timeout: {}s",
        config.crawler.request_timeout_secs
    );

    println!("\nOutput:");
    println!("  Database: {}", config.output.database_path);

    println!(
        "\n✓ Would start crawling at {}",
        job.construct_url_on(&config.crawler.base_url)
    );
}

/// Handles the --stats mode: shows stored listing counts
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    println!("Database: {}\n", config.output.database_path);

    let storage = SqliteStorage::open(Path::new(&config.output.database_path))
        .context("Failed to open database")?;

    println!("Stored flats: {}", storage.count_flats()?);
    for (listing_type, count) in storage.count_flats_by_type()? {
        println!("  {}: {}", listing_type, count);
    }

    Ok(())
}

/// Handles the main crawl operation
///
/// Crawl problems are absorbed page by page; a storage failure ends the
/// process with an error.
async fn handle_crawl(config: &Config, persist: bool) -> anyhow::Result<()> {
    let report = crawl(config).await?;

    tracing::info!(
        "Collected {} listings from {} pages ({} pages failed)",
        report.records.len(),
        report.stats.pages_fetched,
        report.stats.pages_failed
    );

    if !persist {
        tracing::info!("Skipping persistence (--no-persist)");
        return Ok(());
    }

    let mut storage = SqliteStorage::open(Path::new(&config.output.database_path))
        .context("Failed to open database")?;

    if let Err(e) = report.records.persist(&mut storage, &SystemClock) {
        tracing::error!("Failed to persist listings: {}", e);
        return Err(e.into());
    }

    tracing::info!("Database now holds {} flats", storage.count_flats()?);

    Ok(())
}
