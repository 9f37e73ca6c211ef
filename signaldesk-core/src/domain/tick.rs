//! PriceTick — the unit of simulated market data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One simulated quote for a symbol.
///
/// `price` is always strictly positive and tick-aligned. `bid`/`ask` are
/// derived from the symbol's fixed spread, centered on `price`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceTick {
    pub symbol: String,
    pub price: f64,
    pub timestamp: DateTime<Utc>,
    /// Absolute move versus the previous price.
    pub change: f64,
    /// Percent move versus the previous price.
    pub change_percent: f64,
    /// Normalized 10-point price delta; 0.0 until enough history exists.
    pub trend: f64,
    /// Annualized stdev of recent one-step returns, or the symbol's base
    /// volatility while history is short.
    pub volatility: f64,
    pub volume: u64,
    pub bid: f64,
    pub ask: f64,
}

/// A single entry in a symbol's bounded price history.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PricePoint {
    pub price: f64,
    pub timestamp: DateTime<Utc>,
}
