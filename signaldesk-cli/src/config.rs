//! Serializable session configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Configuration for one `run` session. Every field has a default, so a
/// config file only needs to name what it overrides.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    /// Symbols to simulate and analyze.
    pub symbols: Vec<String>,

    /// Market the strategy engine filters on (forex, crypto, stocks,
    /// indices, commodities).
    pub market: String,

    /// Session timeframe (30s, 1m, 2m, 5m, 15m, 30m, 1h, 4h, 1d).
    pub timeframe: String,

    /// Number of cycles to run.
    pub cycles: u32,

    /// Master seed; the whole session replays identically under it.
    pub seed: u64,

    /// Execute STRONG verdicts against the paper broker.
    pub paper_trade: bool,

    /// Stake per paper trade, in account currency.
    pub trade_amount: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            symbols: vec!["EURUSD".to_string()],
            market: "forex".to_string(),
            timeframe: "1m".to_string(),
            cycles: 20,
            seed: 42,
            paper_trade: false,
            trade_amount: 10.0,
        }
    }
}

impl SessionConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}
