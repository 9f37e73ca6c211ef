//! Per-variant trade-parameter profiles.
//!
//! Each strategy kind maps to fixed percentage offsets (or
//! support/resistance levels) for entries, exits, stops, and targets. This
//! table is the dispatch point for deriving concrete trade parameters —
//! adding a strategy means adding a variant and a profile row, never
//! matching on display names.

use serde::{Deserialize, Serialize};

use crate::domain::{StrategyKind, TechnicalOverview};

/// Where a profile anchors its entry band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EntryBands {
    /// Buy `pct` below and sell `pct` above the current price.
    PercentOffset { pct: f64 },
    /// Buy at support, sell at resistance, at the given level (1 = nearest).
    SupportResistance { level: u8 },
}

/// Fixed trade-parameter offsets for one strategy kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalProfile {
    pub entry: EntryBands,
    /// Exit band as a fraction of current price.
    pub exit_pct: f64,
    /// Stop-loss distance as a fraction of current price.
    pub stop_pct: f64,
    /// Take-profit distance as a fraction of current price.
    pub target_pct: f64,
}

impl SignalProfile {
    /// Generic template used by kinds with no special entry/exit handling:
    /// ±0.1% entry band, 1% exit, 2% stop, 3% target.
    pub const GENERIC: SignalProfile = SignalProfile {
        entry: EntryBands::PercentOffset { pct: 0.001 },
        exit_pct: 0.01,
        stop_pct: 0.02,
        target_pct: 0.03,
    };

    /// Resolve the entry band against a technical overview.
    /// Returns (buy, sell).
    pub fn entry_prices(&self, overview: &TechnicalOverview) -> (f64, f64) {
        let price = overview.current_price;
        match self.entry {
            EntryBands::PercentOffset { pct } => (price * (1.0 - pct), price * (1.0 + pct)),
            EntryBands::SupportResistance { level: 1 } => {
                (overview.support1, overview.resistance1)
            }
            EntryBands::SupportResistance { .. } => (overview.support2, overview.resistance2),
        }
    }
}

impl StrategyKind {
    /// The fixed parameter profile for this strategy kind.
    pub fn profile(&self) -> SignalProfile {
        match self {
            StrategyKind::Scalping => SignalProfile {
                entry: EntryBands::PercentOffset { pct: 0.0005 },
                exit_pct: 0.002,
                stop_pct: 0.005,
                target_pct: 0.01,
            },
            StrategyKind::Momentum => SignalProfile {
                entry: EntryBands::SupportResistance { level: 1 },
                stop_pct: 0.02,
                target_pct: 0.04,
                ..SignalProfile::GENERIC
            },
            StrategyKind::MeanReversion => SignalProfile {
                entry: EntryBands::SupportResistance { level: 2 },
                stop_pct: 0.015,
                target_pct: 0.03,
                ..SignalProfile::GENERIC
            },
            StrategyKind::Breakout => SignalProfile {
                stop_pct: 0.025,
                target_pct: 0.06,
                ..SignalProfile::GENERIC
            },
            StrategyKind::Swing => SignalProfile {
                exit_pct: 0.05,
                stop_pct: 0.03,
                target_pct: 0.08,
                ..SignalProfile::GENERIC
            },
            StrategyKind::Arbitrage => SignalProfile {
                stop_pct: 0.01,
                target_pct: 0.02,
                ..SignalProfile::GENERIC
            },
        }
    }
}
