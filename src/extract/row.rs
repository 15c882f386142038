//! Column mapping for a single listing row

use crate::extract::fields::{
    parse_int_or_zero, parse_price, resolve_price, split_location, strip_newlines,
};
use crate::extract::Listing;
use crate::job::Job;
use scraper::{ElementRef, Selector};
use url::Url;

const DESCRIPTION_COLUMN: usize = 2;
const LOCATION_COLUMN: usize = 3;
const ROOMS_COLUMN: usize = 4;
const AREA_COLUMN: usize = 5;
const FLOOR_COLUMN: usize = 6;
const HOUSE_TYPE_COLUMN: usize = 7;
const PRICE_COLUMN: usize = 8;
const ALT_PRICE_COLUMN: usize = 9;

/// Builds a [`Listing`] from the cells of a qualifying row
///
/// The caller has already decided the row is a listing and parsed its
/// external id. Columns are mapped by position; positions without a mapping
/// are ignored. The row is never rejected here.
///
/// # Arguments
///
/// * `row` - The `<tr>` element
/// * `external_id` - Numeric suffix of the row id
/// * `job` - The running job, supplying city and listing label
/// * `page_url` - URL of the page the row came from, for resolving links
pub fn extract_listing(
    row: ElementRef<'_>,
    external_id: i64,
    job: &Job,
    page_url: &Url,
) -> Listing {
    let mut listing = Listing {
        id_external: external_id,
        listing_type: job.listing_label().to_string(),
        city: job.city().as_str().to_string(),
        ..Listing::default()
    };

    let Ok(cell_selector) = Selector::parse("td") else {
        return listing;
    };

    for (index, cell) in row.select(&cell_selector).enumerate() {
        match index {
            DESCRIPTION_COLUMN => {
                listing.text = strip_newlines(&cell_text(cell));
                if let Some(url) = cell_link(cell, page_url) {
                    listing.url = url;
                }
            }
            LOCATION_COLUMN => {
                let (district, street) = split_location(&cell.inner_html());
                listing.district = district;
                listing.street = street;
            }
            ROOMS_COLUMN => listing.rooms = parse_int_or_zero(&cell_text(cell)),
            AREA_COLUMN => listing.apartment_area = parse_int_or_zero(&cell_text(cell)),
            FLOOR_COLUMN => listing.floor = cell_text(cell),
            HOUSE_TYPE_COLUMN => listing.house_type = cell_text(cell),
            PRICE_COLUMN | ALT_PRICE_COLUMN => {
                listing.price = resolve_price(listing.price, parse_price(&cell_text(cell)));
            }
            _ => {}
        }
    }

    listing
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect()
}

/// Resolves the last `a[href]` inside a cell against the page URL
fn cell_link(cell: ElementRef<'_>, page_url: &Url) -> Option<String> {
    let anchor_selector = Selector::parse("a[href]").ok()?;
    let href = cell
        .select(&anchor_selector)
        .filter_map(|anchor| anchor.value().attr("href"))
        .last()?;

    page_url.join(href.trim()).ok().map(|url| url.to_string())
}
