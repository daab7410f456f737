//! Concurrent fan-out over every configured news source.
//!
//! The [`Aggregator`] scrapes all sources at once, waits for every one of
//! them, and concatenates their headlines in configuration order. Sources
//! that fail simply contribute nothing; the aggregate itself cannot fail.

use crate::models::{NewsFeed, NewsRecord};
use crate::scrapers::economic_times::EconomicTimes;
use crate::scrapers::moneycontrol::Moneycontrol;
use crate::scrapers::{Fetch, NewsSource, scrape};
use futures::future::join_all;
use std::time::Instant;
use tracing::{info, instrument, warn};

/// Default number of headlines kept per source.
pub const DEFAULT_PER_SOURCE_LIMIT: usize = 10;

pub struct Aggregator<F> {
    fetcher: F,
    sources: Vec<Box<dyn NewsSource>>,
    per_source_limit: usize,
}

impl<F: Fetch> Aggregator<F> {
    pub fn new(fetcher: F, sources: Vec<Box<dyn NewsSource>>) -> Self {
        Self {
            fetcher,
            sources,
            per_source_limit: DEFAULT_PER_SOURCE_LIMIT,
        }
    }

    /// Moneycontrol followed by Economic Times.
    pub fn standard(fetcher: F) -> Self {
        Self::new(
            fetcher,
            vec![
                Box::new(Moneycontrol::default()),
                Box::new(EconomicTimes::default()),
            ],
        )
    }

    pub fn with_per_source_limit(mut self, limit: usize) -> Self {
        self.per_source_limit = limit;
        self
    }

    /// Scrape every source concurrently and merge the results.
    ///
    /// Records keep their per-source grouping: everything from the first
    /// source precedes everything from the second, and so on. No sorting by
    /// time is attempted since the sites' time labels aren't comparable.
    #[instrument(level = "info", skip_all, fields(sources = self.sources.len()))]
    pub async fn aggregate(&self) -> Vec<NewsRecord> {
        let t0 = Instant::now();
        let batches = join_all(
            self.sources
                .iter()
                .map(|source| scrape(&self.fetcher, source.as_ref(), self.per_source_limit)),
        )
        .await;

        for (source, batch) in self.sources.iter().zip(&batches) {
            info!(source = source.name(), count = batch.len(), "Source contributed headlines");
        }

        let news: Vec<NewsRecord> = batches
            .into_iter()
            .flatten()
            .filter(NewsRecord::is_complete)
            .collect();

        if news.is_empty() {
            warn!("No source yielded headlines this round");
        }
        info!(
            count = news.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Aggregation complete"
        );
        news
    }

    /// [`aggregate`](Self::aggregate) wrapped in the `{ "news": [...] }` envelope.
    pub async fn feed(&self) -> NewsFeed {
        NewsFeed {
            news: self.aggregate().await,
        }
    }
}
