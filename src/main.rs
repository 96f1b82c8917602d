//! # Daily Deep Dive
//!
//! A single-shot generator that writes one Korean CS deep-dive blog post per
//! invocation. It picks a random topic that has not been covered by the
//! posts already on disk, asks the Gemini API for the post body, filters the
//! response down to ASCII and Korean script, and writes a Jekyll markdown
//! file with front matter.
//!
//! ## Usage
//!
//! ```sh
//! GEMINI_API_KEY=... daily_deep_dive -p ./_posts
//! ```
//!
//! ## Flow
//!
//! One strict sequence per run, no retries and no concurrency:
//! 1. **Scan**: read existing posts' front matter to collect used topics
//! 2. **Select**: pick an unused topic at random (reset when exhausted)
//! 3. **Generate**: send the prompt to Gemini and take the response as-is
//! 4. **Sanitize**: drop non-ASCII, non-Hangul characters (skippable)
//! 5. **Write**: compose front matter and save `{date}-{slug}.md`

use clap::Parser;
use std::error::Error;
use tracing::{debug, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cli;
mod post;
mod prompt;
mod sanitize;
mod topics;

use api::{GeminiClient, GenerateText};
use cli::Cli;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("daily_deep_dive starting up");

    let args = Cli::parse();
    debug!(?args.posts_dir, ?args.model, args.no_sanitize, "Parsed CLI arguments");

    if args.list_topics {
        for topic in topics::TOPICS {
            println!("{topic}");
        }
        return Ok(());
    }

    // ---- Select a topic ----
    let used = topics::scan_used_topics(&args.posts_dir).await;
    info!(used = used.len(), pool = topics::TOPICS.len(), "Scanned prior posts");

    let mut rng = rand::rng();
    let topic = topics::select_topic(topics::TOPICS, &used, &mut rng)
        .ok_or("topic pool is empty")?;
    info!(%topic, "Selected topic");

    // ---- Generate content ----
    // Client construction validates the credential before any request.
    let client = GeminiClient::from_env(&args.model, prompt::SYSTEM_INSTRUCTION)?;
    let request_prompt = prompt::build_prompt(topic);
    let content = client.generate(&request_prompt).await?;
    info!(chars = content.chars().count(), "Received generated content");

    // ---- Sanitize ----
    let content = if args.no_sanitize {
        content
    } else {
        let sanitized = sanitize::sanitize(&content);
        info!(removed = sanitized.removed, "Sanitized content");
        sanitized.text
    };

    // ---- Write the post ----
    let filename = post::write_post(&args.posts_dir, topic, &content, post::kst_now()).await?;
    info!(%filename, "Post generation complete");
    println!("{filename}");

    let elapsed = start_time.elapsed();
    info!(secs = elapsed.as_secs(), millis = elapsed.subsec_millis(), "Execution complete");

    Ok(())
}
