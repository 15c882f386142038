//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `VisitedSet`: URLs already claimed during the current run

mod visited;

pub use visited::VisitedSet;
