use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use std::time::Duration;
use tokio::io::BufReader;

use precedent::api::QueryClient;
use precedent::app::{self, QUIT_COMMAND};
use precedent::config::CONFIG;
use precedent::view::{Outcome, SearchView, ViewOptions};

/// Search legal precedents from the terminal.
#[derive(Debug, Parser)]
#[command(name = "precedent", version)]
struct Cli {
    /// Base URL of the search backend [env: PRECEDENT_API_URL]
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Request timeout in seconds; unset or 0 means none [env: PRECEDENT_TIMEOUT_SECS]
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Keep the loading state on failure and apply responses in arrival order [env: PRECEDENT_FAITHFUL]
    #[arg(long, global = true)]
    faithful: bool,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run a single search and exit
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Check that the backend is up
    Health,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let api_url = cli.api_url.as_deref().unwrap_or(&CONFIG.api_url);
    let timeout = match cli.timeout {
        Some(0) => None,
        Some(secs) => Some(Duration::from_secs(secs)),
        None => CONFIG.request_timeout,
    };
    let client = QueryClient::with_timeout(api_url, timeout)
        .with_context(|| format!("Failed to create client for {api_url}"))?;

    let options = if cli.faithful {
        ViewOptions::faithful()
    } else {
        ViewOptions::from_config()
    };
    let mut view = SearchView::new(options);

    match cli.command {
        Some(Command::Search { query }) => {
            let query = query.join(" ");
            let outcome = app::run_once(&mut view, &client, &query, tokio::io::stdout()).await?;
            if outcome == Outcome::Failed {
                bail!("Search failed");
            }
        }
        Some(Command::Health) => {
            let health = client
                .health()
                .await
                .with_context(|| format!("Health check against {} failed", client.base_url()))?;
            println!("{}: {}", client.base_url(), health.status);
        }
        None => {
            eprintln!(
                "Searching {} (one query per line, {QUIT_COMMAND} to exit)",
                client.base_url()
            );
            let stdin = BufReader::new(tokio::io::stdin());
            app::run_interactive(&mut view, &client, stdin, tokio::io::stdout()).await?;
        }
    }
    Ok(())
}

#[test]
fn test_timeout_flag_requires_whole_seconds() {
    let cli = Cli::try_parse_from(["precedent", "--timeout", "5", "health"]).unwrap();
    assert_eq!(cli.timeout, Some(5));
    assert!(matches!(cli.command, Some(Command::Health)));

    let err = Cli::try_parse_from(["precedent", "--timeout", "5s", "health"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    assert!(Cli::try_parse_from(["precedent", "--timeout", "-1"]).is_err());
}

#[test]
fn test_search_subcommand_collects_words() {
    let cli = Cli::try_parse_from(["precedent", "search", "duty", "of", "care", "--timeout", "0"])
        .unwrap();
    assert_eq!(cli.timeout, Some(0));
    match cli.command {
        Some(Command::Search { query }) => assert_eq!(query.join(" "), "duty of care"),
        other => panic!("unexpected command: {other:?}"),
    }
}
