//! Economic Times stock news scraper.
//!
//! This module scrapes the [Economic Times stocks news listing](https://economictimes.indiatimes.com/markets/stocks/news).
//!
//! # URL Pattern
//!
//! Stories are `.eachStory` blocks whose `h3 a` links are relative, e.g.
//! `/markets/stocks/news/some-slug/articleshow/123.cms`. They are resolved
//! against the site root to produce absolute URLs.

use super::{NewsSource, ScrapeError, StoryLayout, extract_stories};
use crate::models::NewsRecord;
use url::Url;

/// Label stamped on every Economic Times record.
pub const SOURCE_NAME: &str = "Economic Times";

const SITE_ROOT: &str = "https://economictimes.indiatimes.com";
const LISTING_PATH: &str = "/markets/stocks/news";

const LAYOUT: StoryLayout = StoryLayout {
    block: ".eachStory",
    anchor: "h3 a",
    time: ".time",
};

#[derive(Debug, Clone)]
pub struct EconomicTimes {
    site_root: Url,
    listing_url: Url,
}

impl EconomicTimes {
    /// Scrape a site mirror rooted at `site_root` (used against mock servers).
    ///
    /// Relative story links are resolved against the same root.
    pub fn with_site_root(site_root: Url) -> Result<Self, url::ParseError> {
        let listing_url = site_root.join(LISTING_PATH)?;
        Ok(Self {
            site_root,
            listing_url,
        })
    }
}

impl Default for EconomicTimes {
    fn default() -> Self {
        let site_root = Url::parse(SITE_ROOT).expect("static Economic Times URL is valid");
        Self::with_site_root(site_root).expect("static Economic Times listing path is valid")
    }
}

impl NewsSource for EconomicTimes {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    fn listing_url(&self) -> &Url {
        &self.listing_url
    }

    fn extract(&self, document: &str) -> Result<Vec<NewsRecord>, ScrapeError> {
        extract_stories(document, LAYOUT, &self.site_root, SOURCE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrapers::{HttpFetcher, scrape};
    use httpmock::{Method::GET, MockServer};
    use std::time::Duration;

    const PAGE: &str = r#"
        <section>
          <div class="eachStory">
            <h3><a href="/markets/stocks/news/tcs-wins-deal/articleshow/101.cms">TCS wins $1 billion deal</a></h3>
            <time class="time">Jul 22, 2025, 10:05 AM IST</time>
          </div>
          <div class="eachStory">
            <h3><a>Headline without a link</a></h3>
          </div>
          <div class="eachStory">
            <h3><a href="/markets/stocks/news/itc-hotels/articleshow/102.cms">ITC Hotels lists today</a></h3>
            <time class="time">Jul 22, 2025, 09:40 AM IST</time>
          </div>
        </section>
    "#;

    #[test]
    fn test_default_listing_url() {
        assert_eq!(
            EconomicTimes::default().listing_url().as_str(),
            "https://economictimes.indiatimes.com/markets/stocks/news"
        );
    }

    #[test]
    fn test_extract_resolves_relative_links() {
        let records = EconomicTimes::default().extract(PAGE).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "TCS wins $1 billion deal");
        assert_eq!(
            records[0].link,
            "https://economictimes.indiatimes.com/markets/stocks/news/tcs-wins-deal/articleshow/101.cms"
        );
        assert_eq!(records[0].time, "Jul 22, 2025, 10:05 AM IST");
        assert_eq!(records[1].title, "ITC Hotels lists today");
        assert!(records.iter().all(|r| r.source == "Economic Times"));
    }

    #[tokio::test]
    async fn test_scrape_economic_times_from_mock_server() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/markets/stocks/news");
            then.status(200).header("content-type", "text/html").body(PAGE);
        });

        let source = EconomicTimes::with_site_root(Url::parse(&server.base_url()).unwrap()).unwrap();
        let fetcher = HttpFetcher::new(Duration::from_secs(5), "test-agent").unwrap();
        let records = scrape(&fetcher, &source, 10).await;

        mock.assert();
        assert_eq!(records.len(), 2);
        assert!(records[0].link.starts_with(&server.base_url()));
    }
}
