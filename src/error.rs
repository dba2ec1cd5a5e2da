//! Error taxonomy for the digest pipeline.
//!
//! Two layers exist on purpose:
//! - [`DigestError`] is the terminal, user-visible taxonomy. Every variant
//!   names what failed and what the user can do next; nothing here is a raw
//!   stack trace.
//! - [`FetchOutcome`] classifies a single strategy attempt inside the
//!   acquisition pipeline. These are transient by construction: the pipeline
//!   consumes them to decide whether to pause (rate limiting) or advance, and
//!   only the last one survives, folded into [`DigestError::FetchExhausted`].

use std::fmt;
use thiserror::Error;

/// Terminal errors surfaced to the user.
#[derive(Debug, Error)]
pub enum DigestError {
    /// The input string contained no recognizable post id.
    #[error(
        "that does not look like a Reddit post URL; expected a shape like \
         reddit.com/r/<sub>/comments/<id>, redd.it/<id>, or a /comments/<id> path"
    )]
    InvalidUrl,

    /// Every strategy in the acquisition pipeline failed.
    #[error(
        "could not fetch the post after trying {attempts} mechanism(s); \
         last error: {last_error}. The post may be deleted, or Reddit may be \
         blocking this network. Use the `manual` subcommand to paste the \
         content instead."
    )]
    FetchExhausted { attempts: usize, last_error: String },

    /// JSON was present but did not match the expected thread-document shape.
    #[error("response did not match the expected thread document shape: {0}")]
    MalformedPayload(String),

    /// The language-model call failed. Non-fatal: callers display this in
    /// place of an analysis or answer and never store it as valid content.
    #[error("analysis call failed: {0}")]
    Analysis(String),

    /// Manual entry was missing a required field; the user must resupply.
    #[error("invalid input: {0}")]
    Validation(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Classification of one strategy attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The request exceeded the per-call timeout.
    Timeout,
    /// The connection could not be established or was dropped mid-transfer.
    ConnectionError,
    /// HTTP 429; the pipeline pauses for a fixed backoff before advancing.
    RateLimited,
    /// Any other non-200 status.
    HttpError(u16),
    /// The body was not JSON, or was JSON of the wrong shape.
    MalformedPayload(String),
}

impl fmt::Display for FetchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchOutcome::Timeout => write!(f, "request timed out"),
            FetchOutcome::ConnectionError => write!(f, "connection failed"),
            FetchOutcome::RateLimited => write!(f, "rate limited (HTTP 429)"),
            FetchOutcome::HttpError(code) => write!(f, "HTTP {code}"),
            FetchOutcome::MalformedPayload(detail) => write!(f, "malformed payload: {detail}"),
        }
    }
}

/// One attempted strategy and how it ended. Ephemeral: kept only for the
/// duration of a pipeline run to compose the final error message.
#[derive(Debug, Clone)]
pub struct FetchAttempt {
    pub strategy: String,
    /// The resolved URL the strategy requested.
    pub endpoint: String,
    pub outcome: FetchOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhausted_message_names_count_and_last_error() {
        let err = DigestError::FetchExhausted {
            attempts: 4,
            last_error: "HTTP 403 (reddit.com)".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("4 mechanism"));
        assert!(msg.contains("HTTP 403 (reddit.com)"));
        assert!(msg.contains("manual"));
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(FetchOutcome::Timeout.to_string(), "request timed out");
        assert_eq!(FetchOutcome::HttpError(503).to_string(), "HTTP 503");
        assert_eq!(
            FetchOutcome::RateLimited.to_string(),
            "rate limited (HTTP 429)"
        );
        assert!(
            FetchOutcome::MalformedPayload("expected array".to_string())
                .to_string()
                .contains("expected array")
        );
    }
}
