//! Moneycontrol markets news scraper.
//!
//! This module scrapes the [Moneycontrol markets listing](https://www.moneycontrol.com/news/business/markets/).
//! Each story sits in an `li.clearfix` block whose `h2 a` carries the headline
//! and an absolute article URL, with the time label in a nested `span span`.

use super::{NewsSource, ScrapeError, StoryLayout, extract_stories};
use crate::models::NewsRecord;
use url::Url;

/// Label stamped on every Moneycontrol record.
pub const SOURCE_NAME: &str = "Moneycontrol";

const LISTING_URL: &str = "https://www.moneycontrol.com/news/business/markets/";

const LAYOUT: StoryLayout = StoryLayout {
    block: "li.clearfix",
    anchor: "h2 a",
    time: "span span",
};

#[derive(Debug, Clone)]
pub struct Moneycontrol {
    listing_url: Url,
}

impl Moneycontrol {
    /// Point the scraper at a different listing page (used against mock servers).
    pub fn with_listing_url(listing_url: Url) -> Self {
        Self { listing_url }
    }
}

impl Default for Moneycontrol {
    fn default() -> Self {
        Self {
            listing_url: Url::parse(LISTING_URL).expect("static Moneycontrol URL is valid"),
        }
    }
}

impl NewsSource for Moneycontrol {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    fn listing_url(&self) -> &Url {
        &self.listing_url
    }

    fn extract(&self, document: &str) -> Result<Vec<NewsRecord>, ScrapeError> {
        // hrefs are already absolute; joining onto the listing page is a no-op for them
        extract_stories(document, LAYOUT, &self.listing_url, SOURCE_NAME)
    }
}
