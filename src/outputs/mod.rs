//! Output generation: the plain-text export document.
//!
//! # Document Structure
//!
//! ```text
//! ════════ banner + generation timestamp
//! ORIGINAL POST      title, subreddit, URL, score, full normalized text
//! ANALYSIS           the stored LLM analysis
//! CHAT TRANSCRIPT    role-labeled exchanges, chronological
//!                    (section present only when the history is non-empty)
//! ```

pub mod export;
