//! Command-line interface definitions.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! The API credential is read per invocation (flag or environment variable)
//! and never persisted; without it the tool still fetches and exports threads,
//! it just cannot analyze or chat.

use clap::{Args, Parser, Subcommand};

use crate::api::DEFAULT_API_BASE;

/// Command-line arguments for reddit_digest.
///
/// # Examples
///
/// ```sh
/// # Fetch, analyze, and chat about a post
/// reddit_digest fetch "https://www.reddit.com/r/rust/comments/1abc23/title/"
///
/// # Limit inlined replies and focus the analysis
/// reddit_digest fetch https://redd.it/1abc23 --max-replies 5 --focus "performance claims"
///
/// # Paste content manually when Reddit blocks automatic fetching
/// reddit_digest manual --title "My post" --community rust --file post.txt
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// OpenAI-compatible chat-completions endpoint
    #[arg(long, env = "OPENAI_API_BASE", default_value = DEFAULT_API_BASE, global = true)]
    pub api_base: String,

    /// API credential; analysis and chat are disabled without it
    #[arg(long, env = "OPENAI_API_KEY", global = true)]
    pub api_key: Option<String>,

    /// Model identifier passed to the completion API
    #[arg(long, env = "OPENAI_MODEL", default_value = "gpt-4o-mini", global = true)]
    pub model: String,

    /// Directory where export documents are written
    #[arg(long, default_value = ".", global = true)]
    pub export_dir: String,

    /// Write the text document when the run ends, even without a chat loop
    #[arg(long, global = true)]
    pub export: bool,

    /// Skip the interactive chat loop after analysis
    #[arg(long, global = true)]
    pub no_chat: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch a post by URL, then analyze and chat about it
    Fetch(FetchArgs),
    /// Analyze manually pasted content when automatic fetching fails
    Manual(ManualArgs),
}

#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Reddit post URL (permalink, redd.it short link, or /comments/ path)
    pub url: String,

    /// Leave top-level replies out of the normalized thread
    #[arg(long)]
    pub no_replies: bool,

    /// Maximum number of replies to inline
    #[arg(long, default_value_t = 15)]
    pub max_replies: usize,

    /// Specific aspect the analysis should focus on
    #[arg(long, default_value = "")]
    pub focus: String,
}

#[derive(Args, Debug)]
pub struct ManualArgs {
    /// Post title
    #[arg(long)]
    pub title: String,

    /// Community name
    #[arg(long, default_value = "unknown")]
    pub community: String,

    /// Read the post content from this file instead of stdin
    #[arg(long)]
    pub file: Option<String>,

    /// Specific aspect the analysis should focus on
    #[arg(long, default_value = "")]
    pub focus: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_defaults() {
        let cli = Cli::parse_from([
            "reddit_digest",
            "fetch",
            "https://redd.it/1abc23",
        ]);

        assert_eq!(cli.model, "gpt-4o-mini");
        assert_eq!(cli.export_dir, ".");
        assert!(!cli.export);
        assert!(!cli.no_chat);
        match cli.command {
            Command::Fetch(args) => {
                assert_eq!(args.url, "https://redd.it/1abc23");
                assert!(!args.no_replies);
                assert_eq!(args.max_replies, 15);
                assert_eq!(args.focus, "");
            }
            Command::Manual(_) => panic!("expected fetch subcommand"),
        }
    }

    #[test]
    fn test_fetch_flags() {
        let cli = Cli::parse_from([
            "reddit_digest",
            "fetch",
            "https://redd.it/1abc23",
            "--no-replies",
            "--max-replies",
            "5",
            "--focus",
            "performance claims",
            "--no-chat",
            "--export",
        ]);

        assert!(cli.no_chat);
        assert!(cli.export);
        match cli.command {
            Command::Fetch(args) => {
                assert!(args.no_replies);
                assert_eq!(args.max_replies, 5);
                assert_eq!(args.focus, "performance claims");
            }
            Command::Manual(_) => panic!("expected fetch subcommand"),
        }
    }

    #[test]
    fn test_manual_subcommand() {
        let cli = Cli::parse_from([
            "reddit_digest",
            "manual",
            "--title",
            "My post",
            "--community",
            "rust",
            "--file",
            "post.txt",
        ]);

        match cli.command {
            Command::Manual(args) => {
                assert_eq!(args.title, "My post");
                assert_eq!(args.community, "rust");
                assert_eq!(args.file.as_deref(), Some("post.txt"));
            }
            Command::Fetch(_) => panic!("expected manual subcommand"),
        }
    }
}
