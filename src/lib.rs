//! flat-crawler: an ss.lv flat listings crawler
//!
//! This crate crawls the flat classifieds of ss.lv for one job (listing type,
//! language, city and recency window), extracts a typed record for every
//! listing row, and stages the records for a single batch insert.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod job;
pub mod state;
pub mod storage;

use thiserror::Error;

/// Main error type for crawl operations
///
/// Only setup can fail a run; per-page problems surface as [`FetchError`]
/// and are absorbed by the engine.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors raised while fetching a single page
///
/// These never abort a crawl: the engine logs them and moves on to the next
/// discovered URL.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Unexpected status {status} for {url}")]
    Status { url: String, status: u16 },
}

/// Result type alias for crawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlReport, Crawler};
pub use extract::Listing;
pub use job::{AgentIdentity, City, Job, Language, ListingType, RecencyWindow};
pub use storage::{RecordStore, SqliteStorage};
