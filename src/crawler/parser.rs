//! HTML dispatch for listing pages
//!
//! This module parses a fetched page and hands the elements the crawler cares
//! about to a [`PageHandler`]:
//! - Every `<tr>` carrying an `id` attribute (candidate listing rows)
//! - Every `<a>` carrying a `name` attribute (pagination anchors)
//!
//! All rows are dispatched before any anchor, each group in document order.

use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Callbacks invoked while a page is dispatched
pub trait PageHandler {
    /// Called once per `tr[id]` element
    fn on_row(&mut self, row: ElementRef<'_>, page_url: &Url);

    /// Called once per `a[name]` element
    fn on_link(&mut self, anchor: ElementRef<'_>, page_url: &Url);
}

/// Parses `html` and drives `handler` over its rows and anchors
///
/// # Arguments
///
/// * `html` - The page body
/// * `page_url` - The URL the body was fetched from
/// * `handler` - Receiver of the row and link callbacks
///
/// # Example
///
/// ```
/// use flat_crawler::crawler::{dispatch_page, PageHandler};
/// use scraper::ElementRef;
/// use url::Url;
///
/// #[derive(Default)]
/// struct Counter { rows: usize, links: usize }
///
/// impl PageHandler for Counter {
///     fn on_row(&mut self, _row: ElementRef<'_>, _page_url: &Url) { self.rows += 1; }
///     fn on_link(&mut self, _anchor: ElementRef<'_>, _page_url: &Url) { self.links += 1; }
/// }
///
/// let html = r#"<table><tr id="tr_1"><td>x</td></tr></table><a name="nav_id" href="/p2">2</a>"#;
/// let mut counter = Counter::default();
/// dispatch_page(html, &Url::parse("https://www.ss.lv/").unwrap(), &mut counter);
/// assert_eq!((counter.rows, counter.links), (1, 1));
/// ```
pub fn dispatch_page<H: PageHandler>(html: &str, page_url: &Url, handler: &mut H) {
    let document = Html::parse_document(html);

    if let Ok(row_selector) = Selector::parse("tr[id]") {
        for row in document.select(&row_selector) {
            handler.on_row(row, page_url);
        }
    }

    if let Ok(anchor_selector) = Selector::parse("a[name]") {
        for anchor in document.select(&anchor_selector) {
            handler.on_link(anchor, page_url);
        }
    }
}

/// Resolves an href to an absolute http(s) URL without its fragment
///
/// Returns None if the link should be ignored:
/// - Empty or fragment-only hrefs
/// - javascript:, mailto: and other non-HTTP(S) schemes
/// - Hrefs that cannot be resolved against the page URL
pub fn resolve_link(href: &str, page_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let mut absolute = page_url.join(href).ok()?;
    if absolute.scheme() != "http" && absolute.scheme() != "https" {
        return None;
    }

    absolute.set_fragment(None);
    Some(absolute)
}
