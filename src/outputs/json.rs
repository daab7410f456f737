//! JSON snapshot output.
//!
//! Each run of `news --out-dir` serializes the aggregated feed to
//! `{out_dir}/{date}/{time_of_day}.json`. A later run in the same edition
//! overwrites the earlier file.

use crate::models::NewsFeed;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

/// Path of the snapshot for a given date and edition.
pub fn snapshot_path(out_dir: &str, local_date: &str, time_of_day: &str) -> PathBuf {
    Path::new(out_dir)
        .join(local_date)
        .join(format!("{time_of_day}.json"))
}

/// Write a [`NewsFeed`] snapshot, creating the dated directory as needed.
///
/// # Returns
///
/// The path written, or an error if directory creation or file writing fails.
#[instrument(level = "info", skip_all, fields(out_dir = %out_dir))]
pub async fn write_feed(
    feed: &NewsFeed,
    out_dir: &str,
    local_date: &str,
    time_of_day: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(feed)?;
    let path = snapshot_path(out_dir, local_date, time_of_day);

    if let Some(dir) = path.parent() {
        info!(dir = %dir.display(), "Ensuring JSON directory exists");
        if let Err(e) = fs::create_dir_all(dir).await {
            error!(dir = %dir.display(), error = %e, "Failed to create JSON dir");
            return Err(e.into());
        }
    }

    fs::write(&path, json).await?;
    info!(path = %path.display(), count = feed.news.len(), "Wrote news snapshot");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewsRecord;

    #[test]
    fn test_snapshot_path_layout() {
        let path = snapshot_path("/tmp/out", "2025-07-22", "morning");
        assert_eq!(path, PathBuf::from("/tmp/out/2025-07-22/morning.json"));
    }

    #[tokio::test]
    async fn test_write_feed_round_trips() {
        let out = std::env::temp_dir().join(format!("market_headlines_json_{}", std::process::id()));
        let out_dir = out.to_str().unwrap();
        let feed = NewsFeed {
            news: vec![NewsRecord {
                title: "Nifty hits record".to_string(),
                link: "https://example.com/nifty".to_string(),
                time: "2 hrs ago".to_string(),
                source: "Economic Times".to_string(),
            }],
        };

        let path = write_feed(&feed, out_dir, "2025-07-22", "evening").await.unwrap();
        let written: NewsFeed = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.news, feed.news);

        let _ = std::fs::remove_dir_all(&out);
    }
}
