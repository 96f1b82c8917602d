//! Post composition and file output.
//!
//! Builds the Jekyll front matter, derives the filename slug, and writes the
//! finished post into the posts directory. Timestamps are pinned to UTC+9 so
//! the blog's dates stay in KST no matter where the generator runs (CI hosts
//! are usually UTC). The timestamp is passed in by the caller so tests can
//! fix the instant.
//!
//! The write is not atomic and filenames are not checked for collisions: two
//! runs on the same day that pick the same topic overwrite each other, last
//! write wins.

use chrono::{DateTime, FixedOffset, Utc};
use std::error::Error;
use tokio::fs;
use tracing::{info, instrument};

/// Maximum slug length in characters.
const SLUG_MAX_CHARS: usize = 50;

/// Current time at the fixed UTC+9 (KST) offset.
pub fn kst_now() -> DateTime<FixedOffset> {
    let kst = FixedOffset::east_opt(9 * 3600).unwrap();
    Utc::now().with_timezone(&kst)
}

/// Derive a filesystem-safe slug from a topic.
///
/// Lower-cased; spaces and slashes become hyphens; parentheses and commas
/// are stripped; truncated to 50 characters without splitting a code point.
pub fn slugify(topic: &str) -> String {
    topic
        .to_lowercase()
        .chars()
        .filter_map(|c| match c {
            ' ' | '/' => Some('-'),
            '(' | ')' | ',' => None,
            other => Some(other),
        })
        .take(SLUG_MAX_CHARS)
        .collect()
}

/// Build the front-matter block for a topic at a given instant.
pub fn front_matter(topic: &str, now: &DateTime<FixedOffset>) -> String {
    format!(
        "---\n\
         title: \"[Deep Dive] {topic}\"\n\
         date: {date}\n\
         categories: [개발지식]\n\
         tags: [CS, 심화]\n\
         ---\n\n",
        date = now.format("%Y-%m-%d %H:%M:%S %z"),
    )
}

/// Compose front matter plus content and write the post file.
///
/// Creates the posts directory if it does not exist. Returns the filename
/// (not the full path) that was written.
#[instrument(level = "info", skip_all, fields(posts_dir = %posts_dir, topic = %topic))]
pub async fn write_post(
    posts_dir: &str,
    topic: &str,
    content: &str,
    now: DateTime<FixedOffset>,
) -> Result<String, Box<dyn Error>> {
    let filename = format!("{}-{}.md", now.format("%Y-%m-%d"), slugify(topic));
    let full_content = format!("{}{}", front_matter(topic, &now), content);

    fs::create_dir_all(posts_dir).await?;
    let path = format!("{}/{}", posts_dir.trim_end_matches('/'), filename);
    fs::write(&path, full_content).await?;

    info!(%path, bytes = content.len(), "Wrote post file");
    Ok(filename)
}
