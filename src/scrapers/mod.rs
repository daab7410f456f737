//! Headline scrapers for the supported market news sites.
//!
//! Every source is split into two capabilities:
//!
//! 1. **Fetching**: Download the source's listing page through a [`Fetch`]
//!    implementation (the production one is [`HttpFetcher`])
//! 2. **Extraction**: Walk the page's repeating "story blocks" and turn each
//!    into a [`NewsRecord`] via [`NewsSource::extract`]
//!
//! # Supported Sources
//!
//! | Source | Module | Story block | Links |
//! |--------|--------|-------------|-------|
//! | Moneycontrol | [`moneycontrol`] | `li.clearfix` | Absolute |
//! | Economic Times | [`economic_times`] | `.eachStory` | Relative to the site root |
//!
//! # Failure Isolation
//!
//! [`scrape`] is the only entry point callers use. It never returns an
//! error: a failed fetch or extraction is logged and becomes an empty list,
//! so one broken site can't take its siblings down with it.

pub mod economic_times;
pub mod moneycontrol;

use crate::models::NewsRecord;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument};
use url::Url;

/// Errors raised while fetching or extracting a single source.
///
/// These never escape [`scrape`]; they only exist to be logged.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} answered with HTTP {status}")]
    Status { status: u16, url: String },

    #[error("invalid selector: {0}")]
    Selector(String),
}

/// Capability to download the raw text of a page.
pub trait Fetch {
    async fn fetch(&self, url: &Url) -> Result<String, ScrapeError>;
}

/// A news site that can turn its listing page into headlines.
pub trait NewsSource: Send + Sync {
    /// Fixed label stamped on every record from this source.
    fn name(&self) -> &str;

    /// The well-known page listing the latest stories.
    fn listing_url(&self) -> &Url;

    /// Extract records from the raw listing page, in document order.
    ///
    /// Blocks missing a title or a resolvable link are skipped.
    fn extract(&self, document: &str) -> Result<Vec<NewsRecord>, ScrapeError>;
}

/// [`Fetch`] implementation backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a fetcher with an explicit per-request timeout.
    ///
    /// Both sites reject obviously non-browser user agents, so the caller
    /// supplies one.
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    #[instrument(level = "debug", skip_all, fields(url = %url))]
    async fn fetch(&self, url: &Url) -> Result<String, ScrapeError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let body = response.text().await?;
        debug!(bytes = body.len(), "Fetched listing page");
        Ok(body)
    }
}

/// Fetch and extract one source, keeping at most `limit` records.
///
/// Any error is logged and converted into an empty list.
#[instrument(level = "info", skip_all, fields(source = %source.name()))]
pub async fn scrape<F: Fetch>(fetcher: &F, source: &dyn NewsSource, limit: usize) -> Vec<NewsRecord> {
    let t0 = Instant::now();
    let result = match fetcher.fetch(source.listing_url()).await {
        Ok(document) => source.extract(&document),
        Err(e) => Err(e),
    };

    match result {
        Ok(mut records) => {
            records.truncate(limit);
            info!(
                count = records.len(),
                elapsed_ms = t0.elapsed().as_millis() as u64,
                "Scraped headlines"
            );
            records
        }
        Err(e) => {
            error!(
                url = %source.listing_url(),
                elapsed_ms = t0.elapsed().as_millis() as u64,
                error = %e,
                "Scrape failed; source contributes no headlines"
            );
            Vec::new()
        }
    }
}

/// CSS selectors describing one site's story block.
#[derive(Debug, Clone, Copy)]
pub(crate) struct StoryLayout {
    /// The repeating element holding one story.
    pub block: &'static str,
    /// Anchor carrying both the headline text and the href.
    pub anchor: &'static str,
    /// Element holding the displayed time label.
    pub time: &'static str,
}

/// Walk every story block of `document` and build records for `source`.
///
/// Links are joined onto `base`, so absolute hrefs pass through unchanged.
pub(crate) fn extract_stories(
    document: &str,
    layout: StoryLayout,
    base: &Url,
    source: &str,
) -> Result<Vec<NewsRecord>, ScrapeError> {
    let block_sel = parse_selector(layout.block)?;
    let anchor_sel = parse_selector(layout.anchor)?;
    let time_sel = parse_selector(layout.time)?;

    let html = Html::parse_document(document);
    let mut records = Vec::new();
    for story in html.select(&block_sel) {
        let Some(link_el) = story.select(&anchor_sel).next() else {
            continue;
        };
        let title = element_text(link_el);
        let link = link_el
            .value()
            .attr("href")
            .and_then(|href| resolve_link(base, href));

        let Some(link) = link else {
            continue;
        };
        if title.is_empty() {
            continue;
        }

        let time = story.select(&time_sel).next().map(element_text).unwrap_or_default();
        records.push(NewsRecord {
            title,
            link,
            time,
            source: source.to_string(),
        });
    }
    Ok(records)
}

fn parse_selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector(format!("{css}: {e}")))
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Resolve an href against the site root. Only http(s) targets are kept.
pub(crate) fn resolve_link(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    let resolved = base.join(href).ok()?;
    match resolved.scheme() {
        "http" | "https" => Some(resolved.to_string()),
        _ => None,
    }
}
