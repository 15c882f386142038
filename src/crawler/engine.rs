//! Crawl engine - traversal and extraction for one job
//!
//! The engine owns everything a run mutates:
//! - The visited-URL set
//! - The record store receiving extracted listings
//! - The frontier of discovered but not yet fetched pages
//!
//! Pages are fetched one at a time. Each fetched page is dispatched to the
//! engine's row and link handlers; newly discovered links are followed
//! depth-first until nothing unvisited remains.

use crate::crawler::fetcher::PageFetcher;
use crate::crawler::parser::{dispatch_page, resolve_link, PageHandler};
use crate::extract::{classify_row_id, extract_listing, RowKind};
use crate::job::{Job, BASE_URL};
use crate::state::VisitedSet;
use crate::storage::RecordStore;
use crate::CrawlError;
use scraper::ElementRef;
use std::time::Instant;
use url::Url;

/// Counters collected during a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlStats {
    pub pages_fetched: usize,
    pub pages_failed: usize,
    pub rows_stored: usize,
    pub adverts_skipped: usize,
}

/// Outcome of a finished run
#[derive(Debug)]
pub struct CrawlReport {
    pub start_url: String,
    /// Listings in extraction order, ready to persist
    pub records: RecordStore,
    pub stats: CrawlStats,
    /// Number of distinct URLs claimed during the run
    pub visited: usize,
}

/// Crawler for a single job
pub struct Crawler<F> {
    job: Job,
    fetcher: F,
    base_url: String,
    allowed_host: Option<String>,
    visited: VisitedSet,
    store: RecordStore,
    discovered: Vec<Url>,
    stats: CrawlStats,
}

impl<F: PageFetcher> Crawler<F> {
    /// Creates a crawler targeting ss.lv
    pub fn new(job: Job, fetcher: F) -> Self {
        Self {
            job,
            fetcher,
            base_url: BASE_URL.to_string(),
            allowed_host: None,
            visited: VisitedSet::new(),
            store: RecordStore::new(),
            discovered: Vec::new(),
            stats: CrawlStats::default(),
        }
    }

    /// Points the crawler at another host serving the same layout
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn job(&self) -> &Job {
        &self.job
    }

    /// Start URL of this run
    pub fn start_url(&self) -> String {
        self.job.construct_url_on(&self.base_url)
    }

    /// Runs the crawl to completion
    ///
    /// Only links on the start URL's host are followed. Fetch failures are
    /// logged and skipped; the run itself fails only if the start URL cannot
    /// be parsed.
    pub async fn run(mut self) -> Result<CrawlReport, CrawlError> {
        let start_url = Url::parse(&self.start_url())?;
        self.allowed_host = start_url.host_str().map(str::to_string);
        self.visited.insert(start_url.as_str());

        tracing::info!("Initial url: {}", start_url);
        let started = Instant::now();

        let mut frontier = vec![start_url.clone()];
        while let Some(url) = frontier.pop() {
            self.visit(&url).await;

            // Reversed so the first link found on the page is fetched next
            frontier.extend(self.discovered.drain(..).rev());
        }

        tracing::info!(
            "Crawl finished in {:?}: {} pages fetched, {} failed, {} listings, {} adverts skipped",
            started.elapsed(),
            self.stats.pages_fetched,
            self.stats.pages_failed,
            self.stats.rows_stored,
            self.stats.adverts_skipped
        );

        Ok(CrawlReport {
            start_url: start_url.to_string(),
            records: self.store,
            stats: self.stats,
            visited: self.visited.len(),
        })
    }

    async fn visit(&mut self, url: &Url) {
        match self.fetcher.fetch(url).await {
            Ok(body) => {
                self.stats.pages_fetched += 1;
                dispatch_page(&body, url, self);
            }
            Err(e) => {
                self.stats.pages_failed += 1;
                tracing::warn!("Fetch failed: {}", e);
            }
        }
    }
}

impl<F> PageHandler for Crawler<F> {
    fn on_row(&mut self, row: ElementRef<'_>, page_url: &Url) {
        let Some(id) = row.value().attr("id") else {
            return;
        };

        match classify_row_id(id) {
            RowKind::Listing(external_id) => {
                let listing = extract_listing(row, external_id, &self.job, page_url);
                self.store.put(listing);
                self.stats.rows_stored += 1;
            }
            RowKind::Advert => {
                tracing::debug!("Skipping advert row {}", id);
                self.stats.adverts_skipped += 1;
            }
            RowKind::Other => {}
        }
    }

    fn on_link(&mut self, anchor: ElementRef<'_>, page_url: &Url) {
        let Some(href) = anchor.value().attr("href") else {
            return;
        };
        let Some(url) = resolve_link(href, page_url) else {
            tracing::debug!("Ignoring link '{}' on {}", href, page_url);
            return;
        };

        if url.host_str() != self.allowed_host.as_deref() {
            tracing::debug!("Skipping off-site link {}", url);
            return;
        }

        if self.visited.insert(url.as_str()) {
            tracing::info!("Visit {}", url);
            self.discovered.push(url);
        }
    }
}
