//! Strategy catalog types and derived trade parameters.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Market;

/// The closed set of shipped strategies. Dispatch is on this tag, never on
/// the display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Scalping,
    Momentum,
    MeanReversion,
    Breakout,
    Swing,
    Arbitrage,
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StrategyKind::Scalping => "scalping",
            StrategyKind::Momentum => "momentum",
            StrategyKind::MeanReversion => "mean_reversion",
            StrategyKind::Breakout => "breakout",
            StrategyKind::Swing => "swing",
            StrategyKind::Arbitrage => "arbitrage",
        };
        f.write_str(name)
    }
}

/// Strategy risk classification; also fixes the position-size fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Fraction of the account a single position may use.
    pub fn position_fraction(&self) -> f64 {
        match self {
            RiskLevel::High => 0.05,
            RiskLevel::Medium => 0.03,
            RiskLevel::Low => 0.02,
        }
    }
}

/// Chart timeframe a strategy (or session) operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    S30,
    M1,
    M2,
    M5,
    M15,
    M30,
    H1,
    H4,
    D1,
}

impl Timeframe {
    /// Nominal duration in minutes.
    pub fn minutes(&self) -> f64 {
        match self {
            Timeframe::S30 => 0.5,
            Timeframe::M1 => 1.0,
            Timeframe::M2 => 2.0,
            Timeframe::M5 => 5.0,
            Timeframe::M15 => 15.0,
            Timeframe::M30 => 30.0,
            Timeframe::H1 => 60.0,
            Timeframe::H4 => 240.0,
            Timeframe::D1 => 1440.0,
        }
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Timeframe::S30 => "30s",
            Timeframe::M1 => "1m",
            Timeframe::M2 => "2m",
            Timeframe::M5 => "5m",
            Timeframe::M15 => "15m",
            Timeframe::M30 => "30m",
            Timeframe::H1 => "1h",
            Timeframe::H4 => "4h",
            Timeframe::D1 => "1d",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("unknown timeframe '{0}', expected one of 30s 1m 2m 5m 15m 30m 1h 4h 1d")]
pub struct TimeframeParseError(pub String);

impl std::str::FromStr for Timeframe {
    type Err = TimeframeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "30s" => Ok(Timeframe::S30),
            "1m" => Ok(Timeframe::M1),
            "2m" => Ok(Timeframe::M2),
            "5m" => Ok(Timeframe::M5),
            "15m" => Ok(Timeframe::M15),
            "30m" => Ok(Timeframe::M30),
            "1h" => Ok(Timeframe::H1),
            "4h" => Ok(Timeframe::H4),
            "1d" => Ok(Timeframe::D1),
            other => Err(TimeframeParseError(other.to_string())),
        }
    }
}

/// Static definition of one catalog strategy.
///
/// The catalog is fixed at engine construction and never mutated at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Strategy {
    pub kind: StrategyKind,
    pub name: String,
    pub timeframes: Vec<Timeframe>,
    pub markets: Vec<Market>,
    pub indicators: Vec<String>,
    pub risk_level: RiskLevel,
    /// Historical win rate in (0, 1).
    pub win_rate: f64,
    pub description: String,
}

impl Strategy {
    pub fn applies_to(&self, market: Market, timeframe: Timeframe) -> bool {
        self.markets.contains(&market) && self.timeframes.contains(&timeframe)
    }
}

/// Outcome of strategy selection: the winning strategy and its score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategySelection {
    pub kind: StrategyKind,
    pub score: f64,
    pub strategy: Strategy,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct EntryPoints {
    pub buy: f64,
    pub sell: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ExitPoints {
    pub buy_exit: f64,
    pub sell_exit: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct StopLoss {
    pub buy_stop_loss: f64,
    pub sell_stop_loss: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TakeProfit {
    pub buy_take_profit: f64,
    pub sell_take_profit: f64,
}

/// Concrete trade parameters derived for a selected strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategySignals {
    pub entry_points: EntryPoints,
    pub exit_points: ExitPoints,
    pub stop_loss: StopLoss,
    pub take_profit: TakeProfit,
    /// Fraction of the account to commit, in (0, 1).
    pub position_size: f64,
    /// Carried over from the selection score.
    pub confidence: f64,
}

/// A selection plus its derived signals — the unit the fusion layer consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyPlan {
    pub selection: StrategySelection,
    pub signals: StrategySignals,
}
