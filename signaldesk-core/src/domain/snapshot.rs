//! MarketSnapshot — the analysis input refreshed by an external collaborator.
//!
//! The core never produces snapshots during signal processing; it only
//! consumes them. A seeded generator lives in [`crate::snapshot`] for
//! sessions that have no real collaborator attached.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Coarse volatility classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolatilityBand {
    Low,
    Medium,
    High,
}

impl VolatilityBand {
    /// Numeric volatility used by the strategy scorer (Low=20, Medium=50, High=80).
    pub fn score(&self) -> f64 {
        match self {
            VolatilityBand::Low => 20.0,
            VolatilityBand::Medium => 50.0,
            VolatilityBand::High => 80.0,
        }
    }
}

/// Five-level market sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentLabel {
    StrongBearish,
    Bearish,
    Neutral,
    Bullish,
    StrongBullish,
}

impl SentimentLabel {
    /// Fixed contribution to the sentiment fusion layer.
    pub fn layer_score(&self) -> f64 {
        match self {
            SentimentLabel::StrongBullish => 30.0,
            SentimentLabel::Bullish => 20.0,
            SentimentLabel::Neutral => 5.0,
            SentimentLabel::Bearish => -20.0,
            SentimentLabel::StrongBearish => -30.0,
        }
    }

    pub fn is_bullish(&self) -> bool {
        matches!(self, SentimentLabel::Bullish | SentimentLabel::StrongBullish)
    }

    pub fn is_bearish(&self) -> bool {
        matches!(self, SentimentLabel::Bearish | SentimentLabel::StrongBearish)
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SentimentLabel::StrongBearish => "Strong Bearish",
            SentimentLabel::Bearish => "Bearish",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Bullish => "Bullish",
            SentimentLabel::StrongBullish => "Strong Bullish",
        };
        f.write_str(name)
    }
}

/// RSI classification at the conventional 30/70 bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RsiStatus {
    Overbought,
    Oversold,
    Normal,
}

impl RsiStatus {
    pub fn from_rsi(rsi: f64) -> RsiStatus {
        if rsi > 70.0 {
            RsiStatus::Overbought
        } else if rsi < 30.0 {
            RsiStatus::Oversold
        } else {
            RsiStatus::Normal
        }
    }
}

/// MACD reduced to a crossover label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MacdSignal {
    BullishCrossover,
    BearishCrossover,
}

impl MacdSignal {
    pub fn is_bullish(&self) -> bool {
        matches!(self, MacdSignal::BullishCrossover)
    }
}

impl std::fmt::Display for MacdSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MacdSignal::BullishCrossover => f.write_str("Bullish crossover"),
            MacdSignal::BearishCrossover => f.write_str("Bearish crossover"),
        }
    }
}

/// Price position relative to the 50 EMA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaSide {
    Above,
    Below,
}

impl std::fmt::Display for MaSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaSide::Above => f.write_str("Above 50 EMA"),
            MaSide::Below => f.write_str("Below 50 EMA"),
        }
    }
}

/// Broad market state block of a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketInfo {
    pub volatility: VolatilityBand,
    /// Relative asset strength in [0, 100].
    pub asset_strength: f64,
    /// Volume score in [0, 100].
    pub volume_result: f64,
    pub sentiment: SentimentLabel,
    pub last_update: DateTime<Utc>,
}

/// Technical indicator block of a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechnicalOverview {
    pub current_price: f64,
    pub price_change: f64,
    pub price_change_percent: f64,
    pub resistance1: f64,
    pub resistance2: f64,
    pub support1: f64,
    pub support2: f64,
    /// RSI oscillator in [0, 100].
    pub rsi: f64,
    pub rsi_status: RsiStatus,
    pub macd: MacdSignal,
    pub moving_average: MaSide,
}

/// The full analysis input: market state plus technical overview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub market_info: MarketInfo,
    pub technical_overview: TechnicalOverview,
}
