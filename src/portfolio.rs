//! Per-owner ticker lists.
//!
//! [`PortfolioStore`] is an opaque key-value collaborator keyed by owner id.
//! The only implementation, [`MemoryPortfolio`], lives for the lifetime of the
//! process and persists nothing.

use std::collections::HashMap;
use std::sync::RwLock;
use tracing::{debug, instrument};

/// Owner id used when the caller doesn't name one.
pub const DEFAULT_OWNER: &str = "default";

#[derive(Debug, thiserror::Error)]
pub enum PortfolioError {
    #[error("portfolio store lock poisoned")]
    Poisoned,
}

pub trait PortfolioStore {
    fn get(&self, owner: &str) -> Result<Vec<String>, PortfolioError>;
    fn set(&self, owner: &str, tickers: Vec<String>) -> Result<(), PortfolioError>;
}

/// In-memory store. Owners without an entry see the seed list.
#[derive(Debug, Default)]
pub struct MemoryPortfolio {
    seed: Vec<String>,
    entries: RwLock<HashMap<String, Vec<String>>>,
}

impl MemoryPortfolio {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn seeded(seed: Vec<String>) -> Self {
        Self {
            seed,
            entries: RwLock::default(),
        }
    }
}

impl PortfolioStore for MemoryPortfolio {
    #[instrument(level = "debug", skip(self))]
    fn get(&self, owner: &str) -> Result<Vec<String>, PortfolioError> {
        let entries = self.entries.read().map_err(|_| PortfolioError::Poisoned)?;
        Ok(entries.get(owner).cloned().unwrap_or_else(|| self.seed.clone()))
    }

    #[instrument(level = "debug", skip(self, tickers), fields(count = tickers.len()))]
    fn set(&self, owner: &str, tickers: Vec<String>) -> Result<(), PortfolioError> {
        let mut entries = self.entries.write().map_err(|_| PortfolioError::Poisoned)?;
        entries.insert(owner.to_string(), tickers);
        debug!("Stored portfolio");
        Ok(())
    }
}
