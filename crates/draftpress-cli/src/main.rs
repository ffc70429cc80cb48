//! draftpress — publish markdown blog posts to WordPress as drafts.
//!
//! Reads a markdown file, converts it to Gutenberg block markup, and
//! creates or updates a draft post on the site named by the
//! `WORDPRESS_URL` / `WORDPRESS_USERNAME` / `WORDPRESS_APP_PASSWORD`
//! environment (or dotenv) variables. Every invocation prints one JSON
//! result object and exits 0 on success, 1 on failure.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use draftpress_wp::{Credentials, FailureReport, PublishReport, Result, WpClient, publish};

/// Publish a markdown file to WordPress as a draft.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Markdown file to publish.
    file: PathBuf,

    /// Comma-separated tags to attach to the post.
    #[arg(long, default_value = "")]
    tags: String,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long)]
    quiet: bool,
}

impl CliArgs {
    /// Requested tag names: comma-split, trimmed, empties dropped.
    fn tag_names(&self) -> Vec<String> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect()
    }
}

/// Initialise tracing-based logging.
///
/// Uses `RUST_LOG` if set, otherwise defaults based on verbosity flags.
/// Diagnostics go to stderr so stdout stays pure JSON.
fn init_logging(verbose: bool, quiet: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if quiet {
        EnvFilter::new("warn")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Ignore error if a subscriber is already set (e.g. in tests).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn run(args: &CliArgs) -> Result<PublishReport> {
    let creds = Credentials::resolve()?;
    let client = WpClient::new(creds);
    publish(&client, &args.file, &args.tag_names()).await
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("failed to serialize result: {e}"),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_logging(args.verbose, args.quiet);

    match run(&args).await {
        Ok(report) => {
            print_json(&report);
            ExitCode::SUCCESS
        }
        Err(err) => {
            print_json(&FailureReport::from_error(&err));
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_args_file_only() {
        let args = CliArgs::parse_from(["draftpress", "post.md"]);
        assert_eq!(args.file, PathBuf::from("post.md"));
        assert!(args.tag_names().is_empty());
        assert!(!args.verbose);
        assert!(!args.quiet);
    }

    #[test]
    fn test_cli_args_tags() {
        let args = CliArgs::parse_from(["draftpress", "post.md", "--tags", "rust, cli ,,web"]);
        assert_eq!(args.tag_names(), vec!["rust", "cli", "web"]);
    }

    #[test]
    fn test_cli_args_verbose() {
        let args = CliArgs::parse_from(["draftpress", "post.md", "--verbose"]);
        assert!(args.verbose);
    }

    #[test]
    fn test_cli_args_requires_file() {
        assert!(CliArgs::try_parse_from(["draftpress"]).is_err());
    }

    #[test]
    fn test_init_logging_does_not_panic() {
        init_logging(false, false);
        init_logging(true, false);
        init_logging(false, true);
    }
}
