//! Crawler module for page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching under the host politeness policy
//! - HTML dispatch of listing rows and pagination links
//! - The crawl engine driving traversal and extraction

mod engine;
mod fetcher;
mod parser;
mod throttle;

pub use engine::{CrawlReport, CrawlStats, Crawler};
pub use fetcher::{build_http_client, HttpFetcher, PageFetcher};
pub use parser::{dispatch_page, resolve_link, PageHandler};
pub use throttle::{Slot, Throttle, MAX_RANDOM_DELAY};

use crate::config::Config;
use crate::CrawlError;
use std::time::Duration;

/// Runs a complete crawl for a loaded configuration
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client with the job's user agent
/// 2. Construct the start URL on the configured base
/// 3. Follow pagination links until every reachable page was fetched once
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl finished; listings are in the report
/// * `Err(CrawlError)` - The HTTP client or start URL could not be built
pub async fn crawl(config: &Config) -> Result<CrawlReport, CrawlError> {
    let timeout = Duration::from_secs(config.crawler.request_timeout_secs);
    let fetcher = HttpFetcher::new(config.job.user_agent(), timeout)?;

    Crawler::new(config.job.clone(), fetcher)
        .with_base_url(config.crawler.base_url.clone())
        .run()
        .await
}
