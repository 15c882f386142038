//! Per-cell coercion rules
//!
//! Everything here is pure and infallible: malformed input degrades to an
//! empty or zero value instead of failing the row.

/// Row id prefix carried by every listing row
pub const ROW_PREFIX: &str = "tr_";

/// Row id prefix of sponsored placements
pub const ADVERT_PREFIX: &str = "tr_bnr";

/// What a table row's `id` attribute says about it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// A listing row, carrying its external id (0 if the suffix is not numeric)
    Listing(i64),
    /// A sponsored row that must be skipped
    Advert,
    /// Any other row (headers, filters, layout)
    Other,
}

/// Classifies a row by its `id` attribute
pub fn classify_row_id(id: &str) -> RowKind {
    if !id.starts_with(ROW_PREFIX) {
        return RowKind::Other;
    }
    if id.starts_with(ADVERT_PREFIX) {
        return RowKind::Advert;
    }
    RowKind::Listing(parse_int_or_zero(&id[ROW_PREFIX.len()..]))
}

/// Removes every line break from a description
pub fn strip_newlines(text: &str) -> String {
    text.chars().filter(|c| *c != '\n' && *c != '\r').collect()
}

/// Splits a location fragment into `(district, street)`
///
/// Bold tags are dropped first. A fragment with exactly one line break is a
/// district followed by a street; anything else (no street in this city, or an
/// unexpected layout) is kept whole as the district.
pub fn split_location(fragment: &str) -> (String, String) {
    let location = fragment.replace("<b>", "").replace("</b>", "");
    let normalized = location.replace("<br />", "<br>").replace("<br/>", "<br>");

    let parts: Vec<&str> = normalized.split("<br>").collect();
    match parts.as_slice() {
        [district, street] => (district.to_string(), street.to_string()),
        _ => (location, String::new()),
    }
}

/// Parses an integer cell, yielding 0 for anything unparsable
pub fn parse_int_or_zero(text: &str) -> i64 {
    text.trim().parse().unwrap_or(0)
}

/// Parses a price cell by keeping only its digits
///
/// `"€1 250"` becomes 1250. A cell with no digits, or too many to fit, is 0.
pub fn parse_price(text: &str) -> i64 {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

/// Folds a price column into the price seen so far
///
/// Price columns are read left to right. A zero (unparsable) column never
/// replaces an earlier price; a non-zero one always does.
pub fn resolve_price(current: i64, candidate: i64) -> i64 {
    if candidate != 0 {
        candidate
    } else {
        current
    }
}
