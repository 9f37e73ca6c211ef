//! Multi-layer signal fusion.
//!
//! [`SignalFusionProcessor`] combines six analysis layers into one verdict
//! per call: each layer produces a score in [-100, 100], the scores are
//! blended with fixed weights, and the blended value is shifted into a
//! 0-100 confidence that an action filter turns into a
//! [`FusedSignal`](crate::domain::FusedSignal). The processor also keeps a
//! bounded per-symbol record of past verdicts, which feeds the pattern
//! layer and the rolling accuracy estimate.

pub mod layers;

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    FusedSignal, LayerBreakdown, MarketSnapshot, PriceTick, SignalAction, SignalStrength,
    StrategyPlan, Symbol,
};
use crate::history::CappedHistory;

/// Per-symbol record cap. Eviction is oldest-first.
pub const SIGNAL_HISTORY_CAP: usize = 50;

/// Accuracy reported until a symbol has at least [`MIN_RECORDS_FOR_ACCURACY`]
/// records.
pub const DEFAULT_ACCURACY: f64 = 65.0;
pub const MIN_RECORDS_FOR_ACCURACY: usize = 5;

/// How many recent records the accuracy estimate averages over.
const ACCURACY_LOOKBACK: usize = 10;

const WEIGHT_TECHNICAL: f64 = 0.25;
const WEIGHT_MOMENTUM: f64 = 0.20;
const WEIGHT_VOLUME: f64 = 0.15;
const WEIGHT_SENTIMENT: f64 = 0.15;
const WEIGHT_PATTERN: f64 = 0.10;
const WEIGHT_STRATEGY: f64 = 0.15;

/// One stored verdict. The price is taken from the tick when one was
/// supplied, falling back to the snapshot's current price, so the pattern
/// layer always has real prices to compare.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalRecord {
    pub price: f64,
    pub confidence: f64,
    pub action: SignalAction,
    pub timestamp: DateTime<Utc>,
}

/// Stateful fusion engine. All state is per-symbol signal history; the
/// layer computations themselves are pure.
#[derive(Debug, Default)]
pub struct SignalFusionProcessor {
    history: HashMap<Symbol, CappedHistory<SignalRecord>>,
}

impl SignalFusionProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the full pipeline for one symbol: compute all layers, fuse,
    /// filter into an action, record the verdict, and report accuracy.
    ///
    /// `plan` gates the strategy-alignment layer; without one, that layer's
    /// weight is excluded from normalization rather than scored as zero.
    /// `tick` gates the momentum and volume layers, which degrade to
    /// neutral score-0 layers when it is absent.
    pub fn process_signal(
        &mut self,
        symbol: &str,
        snapshot: &MarketSnapshot,
        plan: Option<&StrategyPlan>,
        tick: Option<&PriceTick>,
    ) -> FusedSignal {
        let history = self
            .history
            .entry(symbol.to_string())
            .or_insert_with(|| CappedHistory::new(SIGNAL_HISTORY_CAP));

        let layers = LayerBreakdown {
            technical: layers::technical(snapshot),
            momentum: layers::momentum(tick),
            volume: layers::volume_profile(tick),
            sentiment: layers::sentiment(snapshot),
            pattern: layers::pattern(&history.last_n(layers::PATTERN_LOOKBACK)),
            strategy: plan.map(|p| layers::strategy_alignment(p, snapshot)),
        };

        let confidence = fuse(&layers);
        let (action, strength, recommendation) = action_filter(confidence, layers.technical.score);
        let timestamp = Utc::now();

        let price = tick
            .map(|t| t.price)
            .unwrap_or(snapshot.technical_overview.current_price);
        history.push(SignalRecord {
            price,
            confidence,
            action,
            timestamp,
        });
        let accuracy = accuracy_of(history);

        tracing::debug!(symbol, confidence, %action, "signal fused");

        FusedSignal {
            action,
            strength,
            recommendation,
            layers,
            confidence,
            accuracy,
            timestamp,
        }
    }

    /// Rolling accuracy for a symbol without processing a new signal.
    pub fn accuracy(&self, symbol: &str) -> f64 {
        self.history
            .get(symbol)
            .map_or(DEFAULT_ACCURACY, accuracy_of)
    }

    /// Number of records currently retained for a symbol.
    pub fn history_len(&self, symbol: &str) -> usize {
        self.history.get(symbol).map_or(0, CappedHistory::len)
    }

    /// The most recent record for a symbol, if any.
    pub fn latest_record(&self, symbol: &str) -> Option<&SignalRecord> {
        self.history.get(symbol).and_then(CappedHistory::latest)
    }
}

/// Blend layer scores into a confidence in [0, 100].
///
/// The weighted average is normalized by the sum of the weights actually
/// used, then shifted by 50 so an all-neutral breakdown lands at exactly
/// 50 regardless of which layers were present.
fn fuse(layers: &LayerBreakdown) -> f64 {
    let mut weighted = layers.technical.score * WEIGHT_TECHNICAL
        + layers.momentum.score * WEIGHT_MOMENTUM
        + layers.volume.score * WEIGHT_VOLUME
        + layers.sentiment.score * WEIGHT_SENTIMENT
        + layers.pattern.score * WEIGHT_PATTERN;
    let mut total_weight =
        WEIGHT_TECHNICAL + WEIGHT_MOMENTUM + WEIGHT_VOLUME + WEIGHT_SENTIMENT + WEIGHT_PATTERN;

    if let Some(strategy) = &layers.strategy {
        weighted += strategy.score * WEIGHT_STRATEGY;
        total_weight += WEIGHT_STRATEGY;
    }

    (50.0 + weighted / total_weight).clamp(0.0, 100.0)
}

/// Map confidence to a verdict. Buy/sell direction comes from the sign of
/// the technical score.
fn action_filter(confidence: f64, technical_score: f64) -> (SignalAction, SignalStrength, String) {
    let bullish = technical_score > 0.0;
    if confidence > 75.0 {
        let action = if bullish {
            SignalAction::StrongBuy
        } else {
            SignalAction::StrongSell
        };
        let recommendation = format!(
            "High confidence {} signal detected",
            action.to_string().to_lowercase()
        );
        (action, SignalStrength::VeryHigh, recommendation)
    } else if confidence > 60.0 {
        let action = if bullish {
            SignalAction::Buy
        } else {
            SignalAction::Sell
        };
        let recommendation = format!(
            "Good {} opportunity identified",
            action.to_string().to_lowercase()
        );
        (action, SignalStrength::High, recommendation)
    } else if confidence >= 45.0 {
        (
            SignalAction::Hold,
            SignalStrength::Medium,
            "Mixed signals - consider waiting".to_string(),
        )
    } else {
        (
            SignalAction::Wait,
            SignalStrength::Low,
            "Insufficient signal strength - avoid trading".to_string(),
        )
    }
}

/// Mean confidence of the last ten records, rounded; [`DEFAULT_ACCURACY`]
/// until enough records exist.
fn accuracy_of(history: &CappedHistory<SignalRecord>) -> f64 {
    if history.len() < MIN_RECORDS_FOR_ACCURACY {
        return DEFAULT_ACCURACY;
    }
    let recent = history.last_n(ACCURACY_LOOKBACK);
    let sum: f64 = recent.iter().map(|r| r.confidence).sum();
    (sum / recent.len() as f64).round()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        MacdSignal, MarketInfo, MaSide, RsiStatus, SentimentLabel, SignalLayer, TechnicalOverview,
        VolatilityBand,
    };

    fn snapshot(
        volatility: VolatilityBand,
        sentiment: SentimentLabel,
        rsi: f64,
        macd: MacdSignal,
        price: f64,
    ) -> MarketSnapshot {
        MarketSnapshot {
            market_info: MarketInfo {
                volatility,
                asset_strength: 50.0,
                volume_result: 50.0,
                sentiment,
                last_update: Utc::now(),
            },
            technical_overview: TechnicalOverview {
                current_price: price,
                price_change: 0.0,
                price_change_percent: 0.0,
                resistance1: price * 1.004,
                resistance2: price * 1.009,
                support1: price * 0.996,
                support2: price * 0.991,
                rsi,
                rsi_status: RsiStatus::from_rsi(rsi),
                macd,
                moving_average: MaSide::Above,
            },
        }
    }

    fn tick(price: f64, change_percent: f64, trend: f64, volume: u64) -> PriceTick {
        PriceTick {
            symbol: "EURUSD".into(),
            price,
            timestamp: Utc::now(),
            change: change_percent,
            change_percent,
            trend,
            volatility: 0.001,
            volume,
            bid: price - 0.00004,
            ask: price + 0.00004,
        }
    }

    fn neutral_snapshot() -> MarketSnapshot {
        // rsi 40 is in no RSI band; bearish macd -15 and neutral sentiment +5
        // keep everything quiet.
        snapshot(
            VolatilityBand::Medium,
            SentimentLabel::Neutral,
            40.0,
            MacdSignal::BearishCrossover,
            100.0,
        )
    }

    #[test]
    fn strongly_aligned_bullish_inputs_give_strong_buy() {
        let mut processor = SignalFusionProcessor::new();
        // technical 65, momentum 45, volume 25, sentiment 20, pattern 0.
        let snap = snapshot(
            VolatilityBand::Low,
            SentimentLabel::Bullish,
            20.0,
            MacdSignal::BullishCrossover,
            100.0,
        );
        let signal = processor.process_signal("EURUSD", &snap, None, Some(&tick(100.0, 0.6, 0.002, 60_000)));

        // (65*.25 + 45*.20 + 25*.15 + 20*.15) / 0.85 + 50 ≈ 87.6
        assert!((signal.confidence - 87.647).abs() < 0.01);
        assert_eq!(signal.action, SignalAction::StrongBuy);
        assert_eq!(signal.strength, SignalStrength::VeryHigh);
        assert_eq!(signal.recommendation, "High confidence strong buy signal detected");
    }

    #[test]
    fn all_neutral_layers_land_at_confidence_50_and_hold() {
        let mut processor = SignalFusionProcessor::new();
        // No tick: momentum and volume are score-0; technical -15,
        // sentiment +5, pattern 0 → weighted -3.0 / 0.85 ≈ -3.53.
        let signal = processor.process_signal("EURUSD", &neutral_snapshot(), None, None);
        assert!((signal.confidence - 46.47).abs() < 0.01);
        assert_eq!(signal.action, SignalAction::Hold);
        assert_eq!(signal.strength, SignalStrength::Medium);
    }

    #[test]
    fn action_filter_boundaries() {
        let (action, strength, _) = action_filter(76.0, 10.0);
        assert_eq!((action, strength), (SignalAction::StrongBuy, SignalStrength::VeryHigh));

        let (action, _, _) = action_filter(76.0, -10.0);
        assert_eq!(action, SignalAction::StrongSell);

        // 75 exactly is not "strong".
        let (action, _, _) = action_filter(75.0, 10.0);
        assert_eq!(action, SignalAction::Buy);

        let (action, _, rec) = action_filter(61.0, -10.0);
        assert_eq!(action, SignalAction::Sell);
        assert_eq!(rec, "Good sell opportunity identified");

        // 60 exactly falls through to HOLD.
        let (action, _, _) = action_filter(60.0, 10.0);
        assert_eq!(action, SignalAction::Hold);

        // 45 exactly is still HOLD; just below it is WAIT.
        let (action, strength, _) = action_filter(45.0, 10.0);
        assert_eq!((action, strength), (SignalAction::Hold, SignalStrength::Medium));
        let (action, strength, rec) = action_filter(44.99, 10.0);
        assert_eq!((action, strength), (SignalAction::Wait, SignalStrength::Low));
        assert_eq!(rec, "Insufficient signal strength - avoid trading");
    }

    #[test]
    fn strategy_weight_only_counts_when_a_plan_is_supplied() {
        let with_strategy = fuse(&LayerBreakdown {
            technical: SignalLayer::new(20.0, vec![]),
            momentum: SignalLayer::new(0.0, vec![]),
            volume: SignalLayer::new(0.0, vec![]),
            sentiment: SignalLayer::new(0.0, vec![]),
            pattern: SignalLayer::new(0.0, vec![]),
            strategy: Some(SignalLayer::new(0.0, vec![])),
        });
        let without_strategy = fuse(&LayerBreakdown {
            technical: SignalLayer::new(20.0, vec![]),
            momentum: SignalLayer::new(0.0, vec![]),
            volume: SignalLayer::new(0.0, vec![]),
            sentiment: SignalLayer::new(0.0, vec![]),
            pattern: SignalLayer::new(0.0, vec![]),
            strategy: None,
        });
        // Same scores, different denominators: 5/1.0 vs 5/0.85.
        assert!((with_strategy - 55.0).abs() < 1e-9);
        assert!((without_strategy - 55.882).abs() < 0.01);
        assert!(without_strategy > with_strategy);
    }

    #[test]
    fn accuracy_defaults_until_five_records_then_averages() {
        let mut processor = SignalFusionProcessor::new();
        let snap = neutral_snapshot();

        for _ in 0..4 {
            let signal = processor.process_signal("EURUSD", &snap, None, None);
            assert_eq!(signal.accuracy, DEFAULT_ACCURACY);
        }

        // Fifth record crosses the threshold: mean of five identical
        // confidences, rounded.
        let signal = processor.process_signal("EURUSD", &snap, None, None);
        assert_eq!(signal.accuracy, signal.confidence.round());
    }

    #[test]
    fn accuracy_is_per_symbol() {
        let mut processor = SignalFusionProcessor::new();
        let snap = neutral_snapshot();
        for _ in 0..10 {
            processor.process_signal("EURUSD", &snap, None, None);
        }
        assert_ne!(processor.accuracy("EURUSD"), DEFAULT_ACCURACY);
        assert_eq!(processor.accuracy("GBPUSD"), DEFAULT_ACCURACY);
    }

    #[test]
    fn history_is_capped_at_fifty_records() {
        let mut processor = SignalFusionProcessor::new();
        let snap = neutral_snapshot();
        for _ in 0..60 {
            processor.process_signal("EURUSD", &snap, None, None);
        }
        assert_eq!(processor.history_len("EURUSD"), SIGNAL_HISTORY_CAP);
    }

    #[test]
    fn pattern_layer_sees_recorded_tick_prices() {
        let mut processor = SignalFusionProcessor::new();
        let snap = neutral_snapshot();

        // Three ascending-price calls seed the history.
        for price in [100.0, 101.0, 102.0] {
            processor.process_signal("EURUSD", &snap, None, Some(&tick(price, 0.0, 0.0, 0)));
        }

        // Fourth call sees an ascending pattern over the stored prices.
        let signal = processor.process_signal("EURUSD", &snap, None, Some(&tick(103.0, 0.0, 0.0, 0)));
        assert_eq!(signal.layers.pattern.score, 20.0);
        assert_eq!(
            signal.layers.pattern.notes,
            vec!["Ascending Price Pattern Detected".to_string()]
        );
    }

    #[test]
    fn record_price_falls_back_to_snapshot_when_tick_absent() {
        let mut processor = SignalFusionProcessor::new();
        processor.process_signal("EURUSD", &neutral_snapshot(), None, None);
        let record = processor.latest_record("EURUSD").unwrap();
        assert_eq!(record.price, 100.0);
    }
}
