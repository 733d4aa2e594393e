//! Ticker universe: the two index proxies and the equal-weight basket.

use std::collections::HashSet;

pub const DEFAULT_SMALL_CAP: &str = "^SP600";
pub const DEFAULT_LARGE_CAP: &str = "^GSPC";
pub const DEFAULT_BASKET: [&str; 7] = ["AAPL", "MSFT", "AMZN", "GOOGL", "META", "NVDA", "TSLA"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Universe {
    pub small_cap: String,
    pub large_cap: String,
    pub basket: Vec<String>,
}

impl Default for Universe {
    fn default() -> Self {
        Self {
            small_cap: DEFAULT_SMALL_CAP.to_string(),
            large_cap: DEFAULT_LARGE_CAP.to_string(),
            basket: DEFAULT_BASKET.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl Universe {
    /// Small-cap, large-cap, then basket constituents.
    pub fn all_tickers(&self) -> Vec<String> {
        let mut tickers = Vec::with_capacity(self.basket.len() + 2);
        tickers.push(self.small_cap.clone());
        tickers.push(self.large_cap.clone());
        tickers.extend(self.basket.iter().cloned());
        tickers
    }

    pub fn count(&self) -> usize {
        self.basket.len() + 2
    }

    pub fn validate(&self) -> Result<(), UniverseError> {
        if self.small_cap.is_empty() || self.large_cap.is_empty() {
            return Err(UniverseError::EmptyToken);
        }
        if self.basket.is_empty() {
            return Err(UniverseError::EmptyBasket);
        }
        let mut seen = HashSet::new();
        for ticker in self.all_tickers() {
            if !seen.insert(ticker.clone()) {
                return Err(UniverseError::DuplicateCode(ticker));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UniverseError {
    #[error("empty token in ticker list")]
    EmptyToken,

    #[error("duplicate ticker: {0}")]
    DuplicateCode(String),

    #[error("basket must contain at least one ticker")]
    EmptyBasket,
}

/// Parse a comma-separated ticker list. Tickers are upper-cased; empty
/// tokens and duplicates are rejected.
pub fn parse_codes(input: &str) -> Result<Vec<String>, UniverseError> {
    let mut codes = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(UniverseError::EmptyToken);
        }
        let code = trimmed.to_uppercase();
        if !seen.insert(code.clone()) {
            return Err(UniverseError::DuplicateCode(code));
        }
        codes.push(code);
    }

    Ok(codes)
}
