//! Thread acquisition: id extraction, fetch strategies, the fallback driver,
//! and normalization of the raw listing document.
//!
//! # Strategy order
//!
//! | # | Strategy | Transport | Notes |
//! |---|----------|-----------|-------|
//! | 1 | old.reddit.com | direct, browser profile | Cheapest; usually succeeds |
//! | 2 | www.reddit.com | direct, alternate browser profile | |
//! | 3 | reddit.com | direct, plain tool profile | |
//! | 4 | allorigins relay | third-party passthrough | Slowest; may double-wrap the JSON |
//!
//! Strategies execute strictly in list order, never concurrently, and the
//! first well-formed response wins; later strategies are not attempted. A
//! 429 pauses for a fixed backoff before moving on; any other failure advances
//! immediately. When the list is exhausted the pipeline fails terminally with
//! a message pointing at the manual-entry fallback.

pub mod ids;
pub mod normalize;
pub mod pipeline;
pub mod strategies;

pub use ids::extract_post_id;
pub use pipeline::ThreadFetcher;
