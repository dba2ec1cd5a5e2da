//! # Reddit Digest
//!
//! A command-line tool that fetches a single Reddit discussion thread,
//! summarizes it through an OpenAI-compatible LLM API, and answers follow-up
//! questions against the cached content in an interactive chat loop.
//!
//! ## Architecture
//!
//! The tool is a linear pipeline:
//! 1. **Extraction**: Parse the post id out of a user-supplied URL
//! 2. **Acquisition**: Try an ordered list of fetch strategies (direct
//!    endpoints with rotating header profiles, then an anonymizing relay)
//!    until one yields a well-formed thread document
//! 3. **Normalization**: Flatten the post and its top-level replies into a
//!    bounded text block
//! 4. **Analysis**: Summarize the normalized thread via a chat-completion call
//! 5. **Chat**: Round-trip user questions with the thread and analysis as
//!    fixed context
//! 6. **Export**: Render thread, analysis, and transcript into a single
//!    plain-text document
//!
//! When every automatic fetch mechanism fails, the `manual` subcommand accepts
//! pasted content so analysis and chat keep working.

pub mod api;
pub mod cli;
pub mod error;
pub mod fetch;
pub mod models;
pub mod outputs;
pub mod session;
pub mod utils;
