//! Thread document normalization.
//!
//! Converts a raw two-listing comments document into a [`ThreadRecord`] with
//! a flat, bounded text block: the post's own fields in a fixed format,
//! optionally followed by up to `max_replies` surviving top-level replies.

use crate::error::DigestError;
use crate::models::{FetchOptions, Listing, Reply, ThreadRecord};

/// Stands in for the post body when the selftext is empty (link posts).
const EMPTY_BODY_PLACEHOLDER: &str = "No additional content";

/// Bodies Reddit substitutes for moderated or author-deleted comments.
const REMOVED_BODIES: [&str; 2] = ["[deleted]", "[removed]"];

/// Build a [`ThreadRecord`] from a decoded comments document.
///
/// The normalized text block has a fixed section order: TITLE, CONTENT,
/// SCORE, COMMENTS, URL, SUBREDDIT, then (only when `include_replies` is set)
/// either a reply section or an explicit "No replies available." marker,
/// never a silent empty section.
///
/// # Errors
///
/// [`DigestError::MalformedPayload`] when the document carries no post node.
pub fn normalize(
    post_id: &str,
    document: &[Listing],
    options: &FetchOptions,
) -> Result<ThreadRecord, DigestError> {
    let post = document
        .first()
        .and_then(|listing| listing.data.children.first())
        .map(|thing| &thing.data)
        .ok_or_else(|| DigestError::MalformedPayload("document has no post node".to_string()))?;

    let source_url = format!("https://reddit.com{}", post.permalink);
    let body = if post.selftext.trim().is_empty() {
        EMPTY_BODY_PLACEHOLDER
    } else {
        post.selftext.as_str()
    };

    let mut text = format!(
        "TITLE: {}\nCONTENT: {}\nSCORE: {} points\nCOMMENTS: {} comments\nURL: {}\nSUBREDDIT: r/{}\n",
        post.title, body, post.score, post.num_comments, source_url, post.subreddit,
    );

    if options.include_replies {
        let replies = collect_replies(document, options.max_replies);
        if replies.is_empty() {
            text.push_str("\nNo replies available.\n");
        } else {
            text.push_str("\nTOP REPLIES:\n");
            for reply in &replies {
                text.push_str(&format!(
                    "\n--- REPLY {} (score: {}) ---\n{}\n",
                    reply.ordinal, reply.score, reply.body
                ));
            }
        }
    }

    Ok(ThreadRecord {
        post_id: post_id.to_string(),
        title: post.title.clone(),
        normalized_text: text,
        score: post.score,
        source_url,
        community: post.subreddit.clone(),
    })
}

/// Walk the comment listing in received order, keeping top-level replies with
/// usable bodies until the cap is reached; remaining nodes are not visited.
fn collect_replies(document: &[Listing], max_replies: usize) -> Vec<Reply> {
    let mut replies = Vec::new();
    if max_replies == 0 {
        return replies;
    }
    let Some(listing) = document.get(1) else {
        return replies;
    };
    for thing in &listing.data.children {
        // "more"/other node kinds are not replies.
        if thing.kind != "t1" {
            continue;
        }
        let body = thing.data.body.trim();
        if body.is_empty() || REMOVED_BODIES.contains(&body) {
            continue;
        }
        replies.push(Reply {
            body: thing.data.body.clone(),
            score: thing.data.score,
            ordinal: replies.len() + 1,
        });
        if replies.len() >= max_replies {
            break;
        }
    }
    replies
}
