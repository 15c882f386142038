//! Job descriptor for a single crawl
//!
//! A [`Job`] names what to crawl: listing type, language, city and recency
//! window, plus the user agent to present. It maps to exactly one start URL.
//!
//! # Example
//!
//! ```
//! use flat_crawler::job::{AgentIdentity, City, Job, Language, ListingType, RecencyWindow};
//!
//! let job = Job::new(
//!     AgentIdentity::Chrome,
//!     ListingType::Sell,
//!     Language::Ru,
//!     City::Riga,
//!     RecencyWindow::Today,
//! );
//! assert_eq!(
//!     job.construct_url(),
//!     "https://www.ss.lv/ru/real-estate/flats/Riga/today/sell/"
//! );
//! ```

mod types;

pub use types::{
    AgentIdentity, City, Language, ListingType, RecencyWindow, CHROME_USER_AGENT,
    FIREFOX_USER_AGENT,
};

use serde::Deserialize;

/// Host every start URL is built on
pub const BASE_URL: &str = "https://www.ss.lv/";

/// Path between the language code and the city
const FLATS_PATH: &str = "real-estate/flats";

/// Immutable crawl parameters
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Job {
    #[serde(default)]
    user_agent: AgentIdentity,
    listing_type: ListingType,
    language: Language,
    city: City,
    window: RecencyWindow,
}

impl Job {
    pub fn new(
        user_agent: AgentIdentity,
        listing_type: ListingType,
        language: Language,
        city: City,
        window: RecencyWindow,
    ) -> Self {
        Self {
            user_agent,
            listing_type,
            language,
            city,
            window,
        }
    }

    pub fn user_agent(&self) -> &AgentIdentity {
        &self.user_agent
    }

    pub fn listing_type(&self) -> ListingType {
        self.listing_type
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn city(&self) -> City {
        self.city
    }

    pub fn window(&self) -> RecencyWindow {
        self.window
    }

    /// Label written to the `type` column of extracted records
    pub fn listing_label(&self) -> &'static str {
        self.listing_type.label()
    }

    /// Builds the start URL on the ss.lv host
    pub fn construct_url(&self) -> String {
        self.construct_url_on(BASE_URL)
    }

    /// Builds the start URL on an arbitrary base
    ///
    /// Segments are appended in a fixed order: language, flats path, city,
    /// recency window, listing type. The result always ends with `/`.
    pub fn construct_url_on(&self, base: &str) -> String {
        let separator = if base.ends_with('/') { "" } else { "/" };
        format!(
            "{}{}{}/{}/{}/{}/{}/",
            base,
            separator,
            self.language.code(),
            FLATS_PATH,
            self.city.as_str(),
            self.window.as_str(),
            self.listing_type.path_segment(),
        )
    }
}
