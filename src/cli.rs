//! Command-line interface definitions.
//!
//! This module defines the CLI arguments and options using the `clap` crate.

use clap::Parser;

/// Command-line arguments for the post generator.
///
/// # Examples
///
/// ```sh
/// # Default: write into ./_posts with gemini-1.5-flash
/// daily_deep_dive
///
/// # Custom posts directory and model
/// daily_deep_dive -p ./blog/_posts --model gemini-1.5-pro
///
/// # Keep the raw model output, skipping the character filter
/// daily_deep_dive --no-sanitize
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Directory where generated posts are written
    #[arg(short, long, default_value = "_posts")]
    pub posts_dir: String,

    /// Gemini model identifier
    #[arg(long, env = "GEMINI_MODEL", default_value = "gemini-1.5-flash")]
    pub model: String,

    /// Skip the character sanitization pass and keep the raw model output
    #[arg(long)]
    pub no_sanitize: bool,

    /// Print the topic pool and exit without calling the API
    #[arg(long)]
    pub list_topics: bool,
}
