//! Command-line interface definitions for Market Headlines.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Global options can also be provided via environment variables.

use crate::portfolio::DEFAULT_OWNER;
use clap::{Parser, Subcommand};

/// Command-line arguments for the Market Headlines application.
///
/// # Examples
///
/// ```sh
/// # All headlines as JSON, plus a dated snapshot
/// market_headlines news --out-dir ./snapshots
///
/// # Only headlines about the given tickers
/// market_headlines watch -t RELIANCE -t NIFTY50
///
/// # Sentiment of the first five headlines
/// market_headlines analyze --template market_sentiment
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to the YAML application config
    #[arg(short, long, env = "MARKET_HEADLINES_CONFIG", global = true)]
    pub config: Option<String>,

    /// Per-source fetch timeout in seconds (overrides the config file)
    #[arg(long, env = "MARKET_HEADLINES_TIMEOUT_SECS", global = true)]
    pub timeout_secs: Option<u64>,

    /// User-Agent sent to the news sites (overrides the config file)
    #[arg(long, env = "MARKET_HEADLINES_USER_AGENT", global = true)]
    pub user_agent: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print every scraped headline as `{"news": [...]}`
    News {
        /// Also write a dated JSON snapshot under this directory
        #[arg(short, long)]
        out_dir: Option<String>,
    },

    /// Print headlines mentioning any of the watched tickers
    Watch {
        /// Ticker to watch; repeatable. Defaults to the owner's portfolio
        #[arg(short = 't', long = "ticker")]
        tickers: Vec<String>,

        /// Portfolio owner whose tickers are used when none are given
        #[arg(long, default_value = DEFAULT_OWNER)]
        owner: String,
    },

    /// Classify the sentiment of the latest headlines with an LLM
    Analyze {
        /// Name of the awful_aj chat template (overrides the config file)
        #[arg(long)]
        template: Option<String>,

        /// Path to the awful_aj config.yaml (defaults to the awful_aj config dir)
        #[arg(long, env = "AWFUL_AJ_CONFIG")]
        llm_config: Option<String>,
    },

    /// Inspect or edit the in-memory ticker portfolio
    Portfolio {
        #[command(subcommand)]
        action: PortfolioAction,

        /// Portfolio owner
        #[arg(long, default_value = DEFAULT_OWNER, global = true)]
        owner: String,
    },
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum PortfolioAction {
    /// Print the owner's tickers
    Show,
    /// Add a ticker (normalized to upper case)
    Add { symbol: String },
    /// Remove a ticker
    Remove { symbol: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_news_with_out_dir() {
        let cli = Cli::parse_from(["market_headlines", "news", "--out-dir", "./json"]);

        match cli.command {
            Command::News { out_dir } => assert_eq!(out_dir.as_deref(), Some("./json")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_watch_repeated_tickers() {
        let cli = Cli::parse_from(["market_headlines", "watch", "-t", "RELIANCE", "--ticker", "nifty50"]);

        match cli.command {
            Command::Watch { tickers, owner } => {
                assert_eq!(tickers, ["RELIANCE", "nifty50"]);
                assert_eq!(owner, "default");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "market_headlines",
            "analyze",
            "--timeout-secs",
            "4",
            "--template",
            "custom",
        ]);

        assert_eq!(cli.timeout_secs, Some(4));
        match cli.command {
            Command::Analyze { template, .. } => assert_eq!(template.as_deref(), Some("custom")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_portfolio_add() {
        let cli = Cli::parse_from(["market_headlines", "portfolio", "add", "tcs", "--owner", "alice"]);

        match cli.command {
            Command::Portfolio { action, owner } => {
                assert_eq!(action, PortfolioAction::Add { symbol: "tcs".to_string() });
                assert_eq!(owner, "alice");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
