//! Fetch strategy descriptors.
//!
//! A strategy is one (endpoint template, transport header profile) pair, or
//! the single relay-based mechanism. The list is ordered cheapest first:
//! direct endpoints with rotating header profiles, then the anonymizing relay,
//! which adds latency and a dependency on a third party's availability.
//!
//! Keeping strategies as plain descriptors driven by a uniform loop (see
//! [`pipeline`](super::pipeline)) makes it trivial to add, reorder, or test
//! them independently.

use serde::Deserialize;

use crate::models::Listing;

/// Transport headers sent with a request.
#[derive(Debug, Clone, Copy)]
pub struct HeaderProfile {
    pub user_agent: &'static str,
    pub accept: &'static str,
}

/// Desktop Chrome profile; what Reddit expects from an ordinary browser.
pub const BROWSER_CHROME: HeaderProfile = HeaderProfile {
    user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    accept: "application/json, text/plain, */*",
};

/// Desktop Safari profile, used as the rotation alternative.
pub const BROWSER_SAFARI: HeaderProfile = HeaderProfile {
    user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
                 AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Safari/605.1.15",
    accept: "*/*",
};

/// Honest tool identification, the polite last direct attempt.
pub const PLAIN_TOOL: HeaderProfile = HeaderProfile {
    user_agent: "reddit_digest/0.1 (command-line thread summarizer)",
    accept: "application/json",
};

/// How a strategy's 200 body decodes back into the listing document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    /// Body is the listing JSON itself.
    Direct,
    /// Body passed through a relay; may arrive raw or wrapped in a
    /// `{"contents": "..."}` envelope depending on the relay configuration.
    Relay,
}

/// One acquisition mechanism.
#[derive(Debug, Clone)]
pub struct Strategy {
    /// Short name used in logs and the terminal error message.
    pub name: String,
    /// Endpoint with `{id}` standing in for the post id.
    pub url_template: String,
    pub profile: HeaderProfile,
    pub kind: StrategyKind,
}

impl Strategy {
    /// Substitute the post id into the endpoint template.
    pub fn request_url(&self, post_id: &str) -> String {
        self.url_template.replace("{id}", post_id)
    }

    /// Decode a 200 response body into the two-listing document.
    ///
    /// Relay parsing is strategy-specific: the passthrough shape is tried
    /// first, then the double-wrapped envelope whose `contents` string holds
    /// the listing JSON.
    pub fn decode(&self, body: &str) -> Result<Vec<Listing>, String> {
        match self.kind {
            StrategyKind::Direct => serde_json::from_str(body).map_err(|e| e.to_string()),
            StrategyKind::Relay => {
                if let Ok(document) = serde_json::from_str::<Vec<Listing>>(body) {
                    return Ok(document);
                }
                let envelope: RelayEnvelope =
                    serde_json::from_str(body).map_err(|e| format!("relay envelope: {e}"))?;
                serde_json::from_str(&envelope.contents)
                    .map_err(|e| format!("relay contents: {e}"))
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct RelayEnvelope {
    contents: String,
}

/// The default strategy list, in execution order.
pub fn default_strategies() -> Vec<Strategy> {
    vec![
        Strategy {
            name: "old.reddit.com".to_string(),
            url_template: "https://old.reddit.com/comments/{id}.json".to_string(),
            profile: BROWSER_CHROME,
            kind: StrategyKind::Direct,
        },
        Strategy {
            name: "www.reddit.com".to_string(),
            url_template: "https://www.reddit.com/comments/{id}.json".to_string(),
            profile: BROWSER_SAFARI,
            kind: StrategyKind::Direct,
        },
        Strategy {
            name: "reddit.com".to_string(),
            url_template: "https://reddit.com/comments/{id}.json".to_string(),
            profile: PLAIN_TOOL,
            kind: StrategyKind::Direct,
        },
        Strategy {
            name: "allorigins relay".to_string(),
            url_template: relay_template("https://www.reddit.com/comments/"),
            profile: PLAIN_TOOL,
            kind: StrategyKind::Relay,
        },
    ]
}

/// Build the relay endpoint template around a target URL prefix.
///
/// The prefix is URL-encoded into the relay's query parameter; the `{id}.json`
/// tail stays literal since post ids are plain alphanumerics.
fn relay_template(target_prefix: &str) -> String {
    format!(
        "https://api.allorigins.win/get?url={}{{id}}.json",
        urlencoding::encode(target_prefix)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"[
        {"data": {"children": [{"kind": "t3", "data": {
            "title": "T", "selftext": "B", "score": 1, "num_comments": 0,
            "permalink": "/r/rust/comments/x1/t/", "subreddit": "rust"
        }}]}},
        {"data": {"children": []}}
    ]"#;

    #[test]
    fn test_request_url_substitution() {
        let strategy = &default_strategies()[0];
        assert_eq!(
            strategy.request_url("1abc23"),
            "https://old.reddit.com/comments/1abc23.json"
        );
    }

    #[test]
    fn test_relay_url_encodes_target() {
        let relay = default_strategies().pop().unwrap();
        let url = relay.request_url("1abc23");
        assert!(url.starts_with("https://api.allorigins.win/get?url="));
        assert!(url.contains("https%3A%2F%2Fwww.reddit.com%2Fcomments%2F"));
        assert!(url.ends_with("1abc23.json"));
    }

    #[test]
    fn test_default_order_is_direct_then_relay() {
        let strategies = default_strategies();
        assert_eq!(strategies.len(), 4);
        assert!(
            strategies[..3]
                .iter()
                .all(|s| s.kind == StrategyKind::Direct)
        );
        assert_eq!(strategies[3].kind, StrategyKind::Relay);
    }

    #[test]
    fn test_direct_decode() {
        let strategy = &default_strategies()[0];
        let document = strategy.decode(DOCUMENT).unwrap();
        assert_eq!(document[0].data.children[0].data.title, "T");
    }

    #[test]
    fn test_relay_decode_passthrough_shape() {
        let relay = default_strategies().pop().unwrap();
        let document = relay.decode(DOCUMENT).unwrap();
        assert_eq!(document.len(), 2);
    }

    #[test]
    fn test_relay_decode_double_wrapped_shape() {
        let relay = default_strategies().pop().unwrap();
        let wrapped = serde_json::json!({ "contents": DOCUMENT }).to_string();
        let document = relay.decode(&wrapped).unwrap();
        assert_eq!(document[0].data.children[0].data.subreddit, "rust");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let strategy = &default_strategies()[0];
        assert!(strategy.decode("<html>blocked</html>").is_err());
        let relay = default_strategies().pop().unwrap();
        assert!(relay.decode(r#"{"status": "ok"}"#).is_err());
    }
}
