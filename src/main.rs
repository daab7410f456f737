//! # Market Headlines
//!
//! Scrapes the latest Indian stock market headlines from Moneycontrol and
//! Economic Times, filters them against a ticker watch-list, and asks an
//! OpenAI-compatible LLM to classify their sentiment.
//!
//! ## Usage
//!
//! ```sh
//! market_headlines news
//! market_headlines watch -t RELIANCE -t TCS
//! market_headlines analyze
//! ```
//!
//! ## Architecture
//!
//! 1. **Scraping**: Each source fetches its listing page and extracts up to
//!    10 headlines; a failing source yields nothing instead of an error
//! 2. **Aggregation**: All sources run concurrently and are concatenated in
//!    a fixed order
//! 3. **Filtering / Classification**: The merged list is matched against a
//!    watch-list or sent to the LLM
//!
//! JSON results go to stdout; logs go to stderr.

use awful_aj::{config as aj_config, config_dir, template};
use chrono::Local;
use clap::Parser;
use serde::Serialize;
use std::error::Error;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod aggregator;
mod analysis;
mod api;
mod cli;
mod config;
mod models;
mod outputs;
mod portfolio;
mod scrapers;
mod utils;
mod watchlist;

use crate::config::AppConfig;
use aggregator::Aggregator;
use api::AskFnWrapper;
use cli::{Cli, Command, PortfolioAction};
use outputs::json;
use portfolio::{MemoryPortfolio, PortfolioStore};
use scrapers::HttpFetcher;
use utils::{ensure_writable_dir, time_of_day};
use watchlist::{Watchlist, filter_news};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let mut app_config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(secs) = args.timeout_secs {
        app_config.timeout_secs = secs;
    }
    if let Some(agent) = &args.user_agent {
        app_config.user_agent = agent.clone();
    }

    let portfolio = MemoryPortfolio::seeded(Watchlist::from(app_config.seed_tickers.clone()).into());

    match args.command {
        Command::News { out_dir } => run_news(&app_config, out_dir.as_deref()).await?,
        Command::Watch { tickers, owner } => run_watch(&app_config, &portfolio, tickers, &owner).await?,
        Command::Analyze {
            template,
            llm_config,
        } => run_analyze(&app_config, template, llm_config).await?,
        Command::Portfolio { action, owner } => run_portfolio(&portfolio, action, &owner)?,
    }

    let elapsed = start_time.elapsed();
    info!(?elapsed, millis = elapsed.as_millis() as u64, "Execution complete");
    Ok(())
}

fn build_aggregator(app_config: &AppConfig) -> Result<Aggregator<HttpFetcher>, Box<dyn Error>> {
    let fetcher = HttpFetcher::new(app_config.timeout(), &app_config.user_agent)?;
    Ok(Aggregator::standard(fetcher).with_per_source_limit(app_config.per_source_limit))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[instrument(level = "info", skip_all)]
async fn run_news(app_config: &AppConfig, out_dir: Option<&str>) -> Result<(), Box<dyn Error>> {
    // Fail before scraping if the snapshot can't be written anyway
    if let Some(dir) = out_dir {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(path = %dir, error = %e, "Output directory is not writable");
            return Err(e);
        }
    }

    let feed = build_aggregator(app_config)?.feed().await;
    print_json(&feed)?;

    if let Some(dir) = out_dir {
        let local_date = Local::now().date_naive().to_string();
        let path = json::write_feed(&feed, dir, &local_date, &time_of_day()).await?;
        info!(path = %path.display(), "Snapshot written");
    }
    Ok(())
}

#[instrument(level = "info", skip_all, fields(owner = %owner))]
async fn run_watch(
    app_config: &AppConfig,
    portfolio: &impl PortfolioStore,
    tickers: Vec<String>,
    owner: &str,
) -> Result<(), Box<dyn Error>> {
    let watchlist = if tickers.is_empty() {
        Watchlist::from(portfolio.get(owner)?)
    } else {
        Watchlist::from(tickers)
    };
    if watchlist.is_empty() {
        warn!("Watch-list is empty; nothing can match");
    }
    info!(tickers = ?watchlist.symbols(), "Filtering headlines");

    let news = build_aggregator(app_config)?.aggregate().await;
    let watched = filter_news(&news, watchlist.symbols());
    info!(total = news.len(), matched = watched.len(), "Filtered headlines");
    print_json(&watched)
}

#[instrument(level = "info", skip_all)]
async fn run_analyze(
    app_config: &AppConfig,
    template_name: Option<String>,
    llm_config: Option<String>,
) -> Result<(), Box<dyn Error>> {
    let template_name = template_name.unwrap_or_else(|| app_config.sentiment_template.clone());
    let template = template::load_template(&template_name).await?;
    info!(template = %template_name, "Loaded template");

    let config_path = match llm_config {
        Some(path) => path,
        None => config_dir()?.join("config.yaml").to_string_lossy().into_owned(),
    };
    let llm = aj_config::load_config(&config_path)?;
    info!(config_path = %config_path, "Loaded LLM configuration");

    let news = build_aggregator(app_config)?.aggregate().await;
    let asker = AskFnWrapper {
        config: &llm,
        template: &template,
    };

    match analysis::analyze(&asker, &news, app_config.analysis_batch).await {
        Ok(report) => print_json(&report),
        Err(e) => {
            error!(error = %e, "Analysis failed");
            print_json(&e.envelope())?;
            Err(e.into())
        }
    }
}

fn run_portfolio(
    portfolio: &impl PortfolioStore,
    action: PortfolioAction,
    owner: &str,
) -> Result<(), Box<dyn Error>> {
    let mut watchlist = Watchlist::from(portfolio.get(owner)?);
    match action {
        PortfolioAction::Show => {}
        PortfolioAction::Add { symbol } => {
            let added = watchlist.add(&symbol)?;
            info!(%owner, symbol = %added, "Added ticker");
            portfolio.set(owner, watchlist.symbols().to_vec())?;
        }
        PortfolioAction::Remove { symbol } => {
            if watchlist.remove(&symbol) {
                info!(%owner, %symbol, "Removed ticker");
                portfolio.set(owner, watchlist.symbols().to_vec())?;
            } else {
                warn!(%owner, %symbol, "Ticker was not in the portfolio");
            }
        }
    }
    print_json(&serde_json::json!({ "stocks": portfolio.get(owner)? }))
}
