//! StrategyEngine — regime classification, strategy scoring, trade parameters.
//!
//! Pure, synchronous computation over a market snapshot: no simulator
//! access, no hidden randomness. Given the same snapshot and catalog,
//! selection is fully reproducible.

pub mod catalog;
pub mod profile;

use serde::{Deserialize, Serialize};

use crate::domain::{
    EntryPoints, ExitPoints, Market, MarketSnapshot, StopLoss, Strategy, StrategyKind,
    StrategyPlan, StrategySelection, StrategySignals, TakeProfit, Timeframe,
};

pub use catalog::{default_catalog, symbol_bias};
pub use profile::{EntryBands, SignalProfile};

/// Mutually exclusive market regime, classified in priority order:
/// volatile, then trending, then stable, then ranging as the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketRegime {
    Volatile,
    Trending,
    Stable,
    Ranging,
}

impl MarketRegime {
    /// Strategies favored under this regime (+25 in the scorer).
    pub fn preferred(&self) -> &'static [StrategyKind] {
        match self {
            MarketRegime::Trending => &[
                StrategyKind::Momentum,
                StrategyKind::Breakout,
                StrategyKind::Swing,
            ],
            MarketRegime::Ranging => &[
                StrategyKind::MeanReversion,
                StrategyKind::Scalping,
                StrategyKind::Arbitrage,
            ],
            MarketRegime::Volatile => &[StrategyKind::Scalping, StrategyKind::Breakout],
            MarketRegime::Stable => &[
                StrategyKind::MeanReversion,
                StrategyKind::Swing,
                StrategyKind::Arbitrage,
            ],
        }
    }
}

impl std::fmt::Display for MarketRegime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MarketRegime::Volatile => "volatile",
            MarketRegime::Trending => "trending",
            MarketRegime::Stable => "stable",
            MarketRegime::Ranging => "ranging",
        };
        f.write_str(name)
    }
}

/// Strategy catalog plus the scoring and derivation logic over it.
pub struct StrategyEngine {
    catalog: Vec<Strategy>,
}

impl Default for StrategyEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl StrategyEngine {
    /// Engine over the default six-strategy catalog.
    pub fn new() -> Self {
        Self {
            catalog: default_catalog(),
        }
    }

    /// Engine over a custom catalog. The catalog is closed after this.
    pub fn with_catalog(catalog: Vec<Strategy>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &[Strategy] {
        &self.catalog
    }

    /// Every catalog strategy applicable to both the market and the
    /// timeframe, in declaration order. Empty is a valid outcome and means
    /// "no strategy recommendation".
    pub fn available_strategies(&self, market: Market, timeframe: Timeframe) -> Vec<&Strategy> {
        self.catalog
            .iter()
            .filter(|s| s.applies_to(market, timeframe))
            .collect()
    }

    /// Classify the market regime from a snapshot.
    pub fn classify_market(snapshot: &MarketSnapshot) -> MarketRegime {
        let info = &snapshot.market_info;
        let overview = &snapshot.technical_overview;

        if info.volatility == crate::domain::VolatilityBand::High
            && (overview.rsi - 50.0).abs() > 20.0
        {
            return MarketRegime::Volatile;
        }
        // Both MACD labels are crossover labels, so trending hinges on
        // sentiment alone once the volatile case is excluded.
        let macd_crossover = matches!(
            overview.macd,
            crate::domain::MacdSignal::BullishCrossover | crate::domain::MacdSignal::BearishCrossover
        );
        if macd_crossover && snapshot.market_info.sentiment != crate::domain::SentimentLabel::Neutral
        {
            return MarketRegime::Trending;
        }
        if info.volatility == crate::domain::VolatilityBand::Low
            && overview.rsi > 30.0
            && overview.rsi < 70.0
        {
            return MarketRegime::Stable;
        }
        MarketRegime::Ranging
    }

    /// Score one candidate strategy for the given context.
    fn score(
        &self,
        strategy: &Strategy,
        symbol: &str,
        timeframe: Timeframe,
        regime: MarketRegime,
        volatility: f64,
    ) -> f64 {
        let mut score = strategy.win_rate * 40.0;

        if regime.preferred().contains(&strategy.kind) {
            score += 25.0;
        }

        // Volatility/risk matching: each band rewards exactly one risk level.
        let bonus = match strategy.risk_level {
            crate::domain::RiskLevel::High if volatility > 70.0 => 15.0,
            crate::domain::RiskLevel::Low if volatility < 30.0 => 15.0,
            crate::domain::RiskLevel::Medium if (30.0..=70.0).contains(&volatility) => 15.0,
            _ => 0.0,
        };
        score += bonus;

        if strategy.timeframes.contains(&timeframe) {
            score += 10.0;
        }

        score + symbol_bias(symbol, strategy.kind)
    }

    /// Pick the highest-scoring applicable strategy, or None when the
    /// catalog has nothing for this market/timeframe. Ties break toward the
    /// first-declared strategy (documented, not meaningful).
    pub fn select_optimal(
        &self,
        market: Market,
        symbol: &str,
        timeframe: Timeframe,
        snapshot: &MarketSnapshot,
    ) -> Option<StrategySelection> {
        let candidates = self.available_strategies(market, timeframe);
        let regime = Self::classify_market(snapshot);
        let volatility = snapshot.market_info.volatility.score();

        let mut best: Option<(&Strategy, f64)> = None;
        for strategy in candidates {
            let score = self.score(strategy, symbol, timeframe, regime, volatility);
            // Strict comparison keeps the first-declared winner on ties.
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((strategy, score));
            }
        }

        best.map(|(strategy, score)| StrategySelection {
            kind: strategy.kind,
            score,
            strategy: strategy.clone(),
        })
    }

    /// Derive concrete trade parameters for a selected strategy.
    pub fn generate_signals(
        &self,
        selection: &StrategySelection,
        snapshot: &MarketSnapshot,
    ) -> StrategySignals {
        let overview = &snapshot.technical_overview;
        let price = overview.current_price;
        let profile = selection.kind.profile();

        let (buy, sell) = profile.entry_prices(overview);

        StrategySignals {
            entry_points: EntryPoints { buy, sell },
            exit_points: ExitPoints {
                buy_exit: price * (1.0 + profile.exit_pct),
                sell_exit: price * (1.0 - profile.exit_pct),
            },
            stop_loss: StopLoss {
                buy_stop_loss: price * (1.0 - profile.stop_pct),
                sell_stop_loss: price * (1.0 + profile.stop_pct),
            },
            take_profit: TakeProfit {
                buy_take_profit: price * (1.0 + profile.target_pct),
                sell_take_profit: price * (1.0 - profile.target_pct),
            },
            position_size: selection.strategy.risk_level.position_fraction(),
            confidence: selection.score,
        }
    }

    /// Select and derive in one step; None when nothing is applicable.
    pub fn build_plan(
        &self,
        market: Market,
        symbol: &str,
        timeframe: Timeframe,
        snapshot: &MarketSnapshot,
    ) -> Option<StrategyPlan> {
        let selection = self.select_optimal(market, symbol, timeframe, snapshot)?;
        let signals = self.generate_signals(&selection, snapshot);
        Some(StrategyPlan { selection, signals })
    }

    /// Human-readable explanation of a selection.
    pub fn reasoning(&self, selection: &StrategySelection, snapshot: &MarketSnapshot) -> String {
        let regime = Self::classify_market(snapshot);
        format!(
            "Selected {} based on {} market conditions. This strategy has a {}% historical win \
             rate and is optimized for {:?} risk trading using {} indicators.",
            selection.strategy.name,
            regime,
            (selection.strategy.win_rate * 100.0).round(),
            selection.strategy.risk_level,
            selection.strategy.indicators.join(", "),
        )
    }
}
