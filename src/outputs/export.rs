//! Plain-text export rendering and file writing.
//!
//! Rendering is a pure function of its inputs plus the supplied timestamp;
//! only [`write_export`] touches the file system.

use chrono::{DateTime, Local};
use tokio::fs;
use tracing::{info, instrument};

use crate::error::DigestError;
use crate::models::{Exchange, ThreadRecord};

const BANNER: &str = "════════════════════════════════════════════════";

/// Render the export document in fixed section order: header, original post,
/// analysis, and (only when `history` is non-empty) the chat transcript
/// with role labels in chronological order.
pub fn render_export(
    record: &ThreadRecord,
    analysis: &str,
    history: &[Exchange],
    generated_at: DateTime<Local>,
) -> String {
    let mut doc = format!(
        "{BANNER}\nREDDIT THREAD ANALYSIS\nGenerated: {}\n{BANNER}\n\n\
         ORIGINAL POST\n-------------\n\
         Title: {}\nSubreddit: r/{}\nURL: {}\nScore: {} points\n\n\
         FULL CONTENT:\n{}\n\
         ANALYSIS:\n{}\n",
        generated_at.format("%Y-%m-%d %H:%M:%S"),
        record.title,
        record.community,
        record.source_url,
        record.score,
        record.normalized_text,
        analysis,
    );

    if !history.is_empty() {
        doc.push_str("\nCHAT TRANSCRIPT\n");
        doc.push_str(&"=".repeat(40));
        doc.push('\n');
        for exchange in history {
            doc.push_str(&format!(
                "\n{}: {}\n{}\n",
                exchange.role.label(),
                exchange.text,
                "-".repeat(40)
            ));
        }
    }

    doc
}

/// Filename convention: `reddit_<post id>_<YYYYMMDD_HHMMSS>.txt`.
pub fn export_filename(post_id: &str, generated_at: DateTime<Local>) -> String {
    format!(
        "reddit_{}_{}.txt",
        post_id,
        generated_at.format("%Y%m%d_%H%M%S")
    )
}

/// Render and write the export document under `dir`, returning the path.
#[instrument(level = "info", skip_all, fields(dir = %dir))]
pub async fn write_export(
    dir: &str,
    record: &ThreadRecord,
    analysis: &str,
    history: &[Exchange],
) -> Result<String, DigestError> {
    let now = Local::now();
    let path = format!(
        "{}/{}",
        dir.trim_end_matches('/'),
        export_filename(&record.post_id, now)
    );
    let doc = render_export(record, analysis, history, now);

    fs::create_dir_all(dir).await?;
    fs::write(&path, doc).await?;
    info!(%path, "Wrote export document");
    Ok(path)
}
