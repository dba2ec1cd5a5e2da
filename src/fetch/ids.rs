//! Post-id extraction from user-supplied URLs.
//!
//! Patterns are ordered most specific first: the full permalink form must win
//! before the bare `/comments/` form gets a chance to capture a different
//! segment of the same URL. No network access happens here.

use once_cell::sync::Lazy;
use regex::Regex;

static ID_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // Subreddit permalink: reddit.com/r/<sub>/comments/<id>/...
        r"reddit\.com/r/[^/]+/comments/([a-z0-9]+)",
        // Short link: redd.it/<id>
        r"redd\.it/([a-z0-9]+)",
        // Bare comments path, catches old.reddit.com and pasted fragments
        r"/comments/([a-z0-9]+)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("id pattern must compile"))
    .collect()
});

/// Extract the canonical post id from a free-form URL string.
///
/// Returns the first capturing match across the ordered pattern list, or
/// `None` when the input contains no supported URL shape.
pub fn extract_post_id(url: &str) -> Option<String> {
    ID_PATTERNS
        .iter()
        .find_map(|re| re.captures(url))
        .map(|caps| caps[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subreddit_permalink() {
        let url = "https://www.reddit.com/r/rust/comments/1abc23/why_is_my_borrow_checker_sad/";
        assert_eq!(extract_post_id(url), Some("1abc23".to_string()));
    }

    #[test]
    fn test_short_link() {
        assert_eq!(
            extract_post_id("https://redd.it/1abc23"),
            Some("1abc23".to_string())
        );
    }

    #[test]
    fn test_bare_comments_path() {
        assert_eq!(
            extract_post_id("https://old.reddit.com/comments/1abc23.json"),
            Some("1abc23".to_string())
        );
    }

    #[test]
    fn test_permalink_wins_over_bare_path() {
        // Both patterns match here; the permalink pattern must capture first
        // and both point at the same id segment.
        let url = "reddit.com/r/programming/comments/9xy8z7/title_slug/";
        assert_eq!(extract_post_id(url), Some("9xy8z7".to_string()));
    }

    #[test]
    fn test_unrelated_string_is_not_found() {
        assert_eq!(extract_post_id("https://example.com/blog/post-42"), None);
        assert_eq!(extract_post_id("not even a url"), None);
    }
}
