//! Data models for threads, chat exchanges, and the Reddit wire format.
//!
//! This module defines the core data structures used throughout the tool:
//! - [`ThreadRecord`]: A normalized thread, immutable once constructed
//! - [`Reply`]: One surviving top-level reply during normalization
//! - [`Exchange`] / [`Role`]: One turn of the follow-up chat transcript
//! - [`FetchOptions`]: Reply-inlining knobs for acquisition
//! - The listing wire types mirroring the two-element JSON document Reddit
//!   returns for `/comments/<id>.json`

use serde::Deserialize;

/// A normalized Reddit thread.
///
/// Constructed once per successful acquisition (or manual entry) and never
/// mutated; a new fetch replaces the record wholesale along with the analysis
/// and chat history that were associated with it.
#[derive(Debug, Clone)]
pub struct ThreadRecord {
    /// The canonical post id (or a `manual_<timestamp>` token for manual entry).
    pub post_id: String,
    /// The post title.
    pub title: String,
    /// The bounded, fixed-format text block: post fields plus up to
    /// `max_replies` inlined replies.
    pub normalized_text: String,
    /// The post score.
    pub score: i64,
    /// Canonical URL of the post, or `"manual entry"`.
    pub source_url: String,
    /// Subreddit name, without the `r/` prefix.
    pub community: String,
}

/// One top-level reply that survived filtering.
///
/// Replies whose body is empty or moderated away (`[deleted]`/`[removed]`)
/// are dropped before they count toward the reply cap.
#[derive(Debug, Clone)]
pub struct Reply {
    pub body: String,
    pub score: i64,
    /// 1-based position among the surviving replies.
    pub ordinal: usize,
}

/// Which side of the chat produced an exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Label used in the export transcript.
    pub fn label(self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Assistant => "Assistant",
        }
    }
}

/// One turn of the follow-up conversation.
#[derive(Debug, Clone)]
pub struct Exchange {
    pub role: Role,
    pub text: String,
}

/// Options controlling reply inlining during normalization.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Whether to append a reply section to the normalized text at all.
    pub include_replies: bool,
    /// Upper bound on inlined replies; iteration stops early once reached.
    pub max_replies: usize,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            include_replies: true,
            max_replies: 15,
        }
    }
}

// ---- Reddit wire format ----
//
// A comments document is a two-element array of listings: element 0 holds the
// post itself, element 1 (optional) holds the top-level comment tree. Every
// node is kind-tagged; `t3` is a post, `t1` a comment.

/// One listing of the comments document.
#[derive(Debug, Deserialize)]
pub struct Listing {
    pub data: ListingData,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListingData {
    #[serde(default)]
    pub children: Vec<Thing>,
}

/// A kind-tagged node in a listing.
#[derive(Debug, Default, Deserialize)]
pub struct Thing {
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub data: ThingData,
}

/// Union of the post (`t3`) and comment (`t1`) fields read by the normalizer.
/// Reddit omits fields depending on node kind, so everything is defaulted.
#[derive(Debug, Default, Deserialize)]
pub struct ThingData {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub selftext: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub num_comments: i64,
    #[serde(default)]
    pub permalink: String,
    #[serde(default)]
    pub subreddit: String,
    #[serde(default)]
    pub body: String,
}
