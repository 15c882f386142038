//! Listing extraction
//!
//! This module turns listing table rows into typed records:
//! - Row classification by `id` attribute (listings, adverts, other rows)
//! - Positional column mapping
//! - Lenient numeric coercion and location layout variants

mod fields;
mod row;

pub use fields::{
    classify_row_id, parse_int_or_zero, parse_price, resolve_price, split_location,
    strip_newlines, RowKind, ADVERT_PREFIX, ROW_PREFIX,
};
pub use row::extract_listing;

/// One flat listing extracted from a results page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    /// Numeric id taken from the row's `id` attribute
    pub id_external: i64,
    /// Description, with line breaks removed
    pub text: String,
    pub district: String,
    /// Empty for cities without street data
    pub street: String,
    pub rooms: i64,
    /// Floor area in square meters
    pub apartment_area: i64,
    /// Raw floor descriptor such as `3/5`
    pub floor: String,
    pub house_type: String,
    pub price: i64,
    /// `sell` or `rent`
    pub listing_type: String,
    pub city: String,
    /// Absolute URL of the listing page
    pub url: String,
}
