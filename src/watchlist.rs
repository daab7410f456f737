//! Ticker watch-lists and headline matching.
//!
//! Matching is a cheap lexical heuristic: a headline is "about" a ticker when
//! its lower-cased title contains the lower-cased ticker, or the ticker with
//! its digits removed (`NIFTY50` also matches "Nifty"). Short tickers will
//! happily match inside unrelated words, and an all-digit ticker strips to
//! the empty string and matches every title; both are accepted.

use crate::models::{NewsRecord, WatchedRecord};
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("digit pattern is valid"));

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum WatchlistError {
    #[error("ticker symbol is empty")]
    EmptySymbol,

    #[error("{0} is already on the watch-list")]
    Duplicate(String),
}

/// Trim and upper-case a user-entered symbol.
pub fn normalize_symbol(raw: &str) -> Result<String, WatchlistError> {
    let symbol = raw.trim().to_uppercase();
    if symbol.is_empty() {
        return Err(WatchlistError::EmptySymbol);
    }
    Ok(symbol)
}

/// Whether `title` mentions `ticker` under the matching rule.
pub fn title_matches(title: &str, ticker: &str) -> bool {
    let title = title.to_lowercase();
    let ticker = ticker.to_lowercase();
    if ticker.is_empty() {
        return false;
    }
    if title.contains(&ticker) {
        return true;
    }
    let stripped = DIGITS.replace_all(&ticker, "");
    title.contains(&*stripped)
}

/// Tickers matching `title`, in watch-list order.
pub fn matching_tickers(title: &str, tickers: &[String]) -> Vec<String> {
    tickers
        .iter()
        .filter(|ticker| title_matches(title, ticker))
        .cloned()
        .collect()
}

/// Keep the records that match at least one ticker, preserving order.
pub fn filter_news(records: &[NewsRecord], tickers: &[String]) -> Vec<WatchedRecord> {
    records
        .iter()
        .filter_map(|record| {
            let matched = matching_tickers(&record.title, tickers);
            (!matched.is_empty()).then(|| WatchedRecord {
                record: record.clone(),
                tickers: matched,
            })
        })
        .collect()
}

/// An ordered set of upper-case ticker symbols.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Watchlist {
    symbols: Vec<String>,
}

impl Watchlist {
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Add a symbol, returning its normalized form.
    pub fn add(&mut self, raw: &str) -> Result<String, WatchlistError> {
        let symbol = normalize_symbol(raw)?;
        if self.symbols.contains(&symbol) {
            return Err(WatchlistError::Duplicate(symbol));
        }
        self.symbols.push(symbol.clone());
        Ok(symbol)
    }

    /// Remove a symbol. Returns whether it was present.
    pub fn remove(&mut self, raw: &str) -> bool {
        let Ok(symbol) = normalize_symbol(raw) else {
            return false;
        };
        let before = self.symbols.len();
        self.symbols.retain(|s| *s != symbol);
        self.symbols.len() != before
    }
}

impl From<Vec<String>> for Watchlist {
    /// Normalizes every entry, dropping blanks and repeats.
    fn from(raw: Vec<String>) -> Self {
        let symbols = raw
            .iter()
            .filter_map(|s| normalize_symbol(s).ok())
            .unique()
            .collect();
        Self { symbols }
    }
}

impl From<Watchlist> for Vec<String> {
    fn from(list: Watchlist) -> Self {
        list.symbols
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tickers(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn record(title: &str) -> NewsRecord {
        NewsRecord {
            title: title.to_string(),
            link: "https://example.com".to_string(),
            time: String::new(),
            source: "Moneycontrol".to_string(),
        }
    }

    #[test]
    fn test_case_insensitive_substring() {
        assert!(title_matches("Reliance shares surge on Q1 results", "RELIANCE"));
    }

    #[test]
    fn test_digit_stripped_match() {
        assert!(title_matches("Nifty ends the week higher", "NIFTY50"));
    }

    #[test]
    fn test_literal_substring_false_positive_is_kept() {
        // "itc" is a substring of "switching"
        assert!(title_matches("Switching circuits", "ITC"));
        assert!(!title_matches("Circuit breakers hit", "ITC"));
    }

    #[test]
    fn test_all_digit_ticker_matches_any_title() {
        // "500" strips to "", and every title contains ""
        assert!(title_matches("Markets close flat", "500"));
        assert!(title_matches("Sensex crosses 500 points", "500"));
    }

    #[test]
    fn test_matching_tickers_in_watchlist_order() {
        let list = tickers(&["TCS", "INFY", "NIFTY50"]);
        assert_eq!(
            matching_tickers("Nifty drags TCS lower", &list),
            ["TCS", "NIFTY50"]
        );
    }

    #[test]
    fn test_filter_news_preserves_order() {
        let records = vec![
            record("TCS wins deal"),
            record("Rupee falls"),
            record("Infosys and TCS rally"),
        ];
        let watched = filter_news(&records, &tickers(&["TCS"]));

        assert_eq!(watched.len(), 2);
        assert_eq!(watched[0].record.title, "TCS wins deal");
        assert_eq!(watched[1].record.title, "Infosys and TCS rally");
    }

    #[test]
    fn test_filter_news_no_match_or_no_tickers() {
        let records = vec![record("Rupee falls")];
        assert!(filter_news(&records, &tickers(&["HDFCBANK"])).is_empty());
        assert!(filter_news(&records, &[]).is_empty());
    }

    #[test]
    fn test_watchlist_add_normalizes_and_rejects_duplicates() {
        let mut list = Watchlist::default();
        assert_eq!(list.add("  tcs "), Ok("TCS".to_string()));
        assert_eq!(list.add("TCS"), Err(WatchlistError::Duplicate("TCS".to_string())));
        assert_eq!(list.add("   "), Err(WatchlistError::EmptySymbol));
        assert_eq!(list.symbols(), ["TCS"]);
    }

    #[test]
    fn test_watchlist_remove() {
        let mut list = Watchlist::from(tickers(&["TCS", "ITC"]));
        assert!(list.remove("itc"));
        assert!(!list.remove("ITC"));
        assert_eq!(list.symbols(), ["TCS"]);
    }

    #[test]
    fn test_watchlist_from_vec_dedupes() {
        let list = Watchlist::from(tickers(&["sbin", "SBIN", " ", "Itc"]));
        assert_eq!(list.symbols(), ["SBIN", "ITC"]);
    }
}
