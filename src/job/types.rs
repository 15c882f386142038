//! Closed enumerations making up a job descriptor

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// User agent preset that mimics Chrome on Windows
pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/42.0.2311.135 Safari/537.36 Edge/12.246";

/// User agent preset that mimics Firefox on Windows
pub const FIREFOX_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:62.0) Gecko/20100101 Firefox/62.0";

/// Identity sent in the `User-Agent` header
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum AgentIdentity {
    Chrome,
    Firefox,
    /// Any other user agent string, passed through untouched
    Custom(String),
}

impl AgentIdentity {
    /// Returns the header value for this identity
    pub fn as_str(&self) -> &str {
        match self {
            Self::Chrome => CHROME_USER_AGENT,
            Self::Firefox => FIREFOX_USER_AGENT,
            Self::Custom(agent) => agent,
        }
    }
}

impl From<String> for AgentIdentity {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "chrome" => Self::Chrome,
            "firefox" => Self::Firefox,
            _ => Self::Custom(value),
        }
    }
}

impl Default for AgentIdentity {
    fn default() -> Self {
        Self::Chrome
    }
}

/// Kind of listing to crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum ListingType {
    #[serde(rename = "sell")]
    Sell,
    #[serde(rename = "rent", alias = "hand_over")]
    Rent,
}

impl ListingType {
    /// Path segment used by the site for this listing type
    pub fn path_segment(&self) -> &'static str {
        match self {
            Self::Sell => "sell",
            Self::Rent => "hand_over",
        }
    }

    /// Label stored on extracted records
    ///
    /// The site calls rentals `hand_over`; records carry `rent` instead.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Sell => "sell",
            Self::Rent => "rent",
        }
    }
}

impl fmt::Display for ListingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ListingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sell" => Ok(Self::Sell),
            "rent" | "hand_over" => Ok(Self::Rent),
            other => Err(format!("unknown listing type '{}'", other)),
        }
    }
}

/// Site language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Ru,
    Lv,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Ru => "ru",
            Self::Lv => "lv",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ru" => Ok(Self::Ru),
            "lv" => Ok(Self::Lv),
            other => Err(format!("unknown language '{}'", other)),
        }
    }
}

/// City section of the flats category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum City {
    #[serde(rename = "Riga", alias = "riga")]
    Riga,
    #[serde(rename = "Jurmala", alias = "jurmala")]
    Jurmala,
    #[serde(rename = "Riga-region", alias = "riga-region")]
    RigaRegion,
    #[serde(rename = "Daugavpils", alias = "daugavpils")]
    Daugavpils,
    #[serde(rename = "Jelgava", alias = "jelgava")]
    Jelgava,
    #[serde(rename = "Liepaja", alias = "liepaja")]
    Liepaja,
    #[serde(rename = "Ventspils", alias = "ventspils")]
    Ventspils,
}

impl City {
    pub const ALL: [City; 7] = [
        City::Riga,
        City::Jurmala,
        City::RigaRegion,
        City::Daugavpils,
        City::Jelgava,
        City::Liepaja,
        City::Ventspils,
    ];

    /// Path segment, also copied onto every extracted record
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Riga => "Riga",
            Self::Jurmala => "Jurmala",
            Self::RigaRegion => "Riga-region",
            Self::Daugavpils => "Daugavpils",
            Self::Jelgava => "Jelgava",
            Self::Liepaja => "Liepaja",
            Self::Ventspils => "Ventspils",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for City {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        City::ALL
            .iter()
            .find(|city| city.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| format!("unknown city '{}'", s))
    }
}

/// How far back listings are included
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum RecencyWindow {
    #[serde(rename = "all")]
    All,
    #[serde(rename = "today")]
    Today,
    #[serde(rename = "today-2")]
    Today2,
    #[serde(rename = "today-5")]
    Today5,
}

impl RecencyWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Today => "today",
            Self::Today2 => "today-2",
            Self::Today5 => "today-5",
        }
    }
}

impl fmt::Display for RecencyWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecencyWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "today" => Ok(Self::Today),
            "today-2" => Ok(Self::Today2),
            "today-5" => Ok(Self::Today5),
            other => Err(format!("unknown recency window '{}'", other)),
        }
    }
}
