//! PriceSimulator — per-symbol price state, history, and tick fan-out.
//!
//! Each cycle advances every tracked symbol through a four-force stochastic
//! step (sentiment, trend, random walk, mean reversion), rounds to the
//! symbol's tick grid, and clamps the move to ±0.1% of the previous price
//! (circuit breaker). All randomness comes from the seed hierarchy, so a
//! session replays identically under the same master seed.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{PricePoint, PriceTick, SymbolSpec};
use crate::history::CappedHistory;
use crate::rng::SeedHierarchy;

use super::scheduler::TickScheduler;

/// Retained price points per symbol.
const PRICE_HISTORY_CAP: usize = 100;
/// Max fraction a single tick may move the price (circuit breaker).
const MAX_TICK_MOVE: f64 = 0.001;
/// Lookback for the normalized trend estimate.
const TREND_LOOKBACK: usize = 10;
/// Lookback for the realized-volatility estimate.
const VOLATILITY_LOOKBACK: usize = 20;
/// Sentiment nudge applied per tick, signed by the direction of the move.
const SENTIMENT_STEP: f64 = 0.005;
/// Simulated transient failure rate of the async fetch helper.
const FETCH_FAILURE_RATE: f64 = 0.05;

/// Handle returned by [`PriceSimulator::subscribe`]; pass it back to
/// [`PriceSimulator::unsubscribe`] to remove the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(pub u64);

type Listener = Box<dyn FnMut(&PriceTick) + Send>;

/// Derived rollup over a symbol's recent history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketStats {
    pub current: f64,
    pub change: f64,
    pub change_percent: f64,
    pub day_high: f64,
    pub day_low: f64,
    pub open: f64,
    pub volume: u64,
    pub volatility: f64,
    pub trend: f64,
    pub sentiment: f64,
}

/// Result of the one-shot fetch helper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceQuote {
    pub symbol: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
}

/// Transient, retryable failures of the fetch helper. Never fatal: callers
/// are expected to retry or substitute a neutral value.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("price feed temporarily unavailable for {symbol}")]
    TemporarilyUnavailable { symbol: String },
}

/// Synthetic market feed for a fixed universe of symbols.
pub struct PriceSimulator {
    universe: Vec<SymbolSpec>,
    seeds: SeedHierarchy,
    scheduler: TickScheduler,
    /// Completed advancement cycles; also the RNG iteration counter.
    iteration: u64,
    fetch_rolls: u64,
    last_tick: HashMap<String, PriceTick>,
    history: HashMap<String, CappedHistory<PricePoint>>,
    /// Per-symbol sentiment scalar in [0, 1]; 0.5 is neutral.
    sentiment: HashMap<String, f64>,
    subscribers: HashMap<String, Vec<(SubscriptionId, Listener)>>,
    next_subscription: u64,
}

impl PriceSimulator {
    /// Simulator over the default 24-symbol universe at the default period.
    pub fn new(master_seed: u64) -> Self {
        Self::with_universe(master_seed, SymbolSpec::universe())
    }

    /// Simulator over a custom universe at the default period.
    pub fn with_universe(master_seed: u64, universe: Vec<SymbolSpec>) -> Self {
        Self::with_universe_and_period(master_seed, universe, super::DEFAULT_TICK_PERIOD)
    }

    /// Fully-configured simulator.
    pub fn with_universe_and_period(
        master_seed: u64,
        universe: Vec<SymbolSpec>,
        period: Duration,
    ) -> Self {
        Self {
            universe,
            seeds: SeedHierarchy::new(master_seed),
            scheduler: TickScheduler::new(period),
            iteration: 0,
            fetch_rolls: 0,
            last_tick: HashMap::new(),
            history: HashMap::new(),
            sentiment: HashMap::new(),
            subscribers: HashMap::new(),
            next_subscription: 0,
        }
    }

    pub fn universe(&self) -> &[SymbolSpec] {
        &self.universe
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Begin periodic advancement. Idempotent.
    pub fn start(&mut self) {
        self.scheduler.start(Instant::now());
    }

    /// Halt periodic advancement; no further ticks are delivered through
    /// `poll` after this returns. Safe when not running.
    pub fn stop(&mut self) {
        self.scheduler.stop();
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Advance one full cycle per period elapsed since the last poll.
    /// Returns the number of cycles run (0 when stopped).
    pub fn poll(&mut self, now: Instant) -> u32 {
        let due = self.scheduler.poll(now);
        for _ in 0..due {
            self.advance_cycle();
        }
        due
    }

    /// Advance every tracked symbol by one tick, in universe order.
    ///
    /// `poll` is the cadence-driven entry point; this is the raw step,
    /// exposed so tests and offline sessions can drive cycles directly.
    pub fn advance_cycle(&mut self) {
        let specs = self.universe.clone();
        for spec in &specs {
            self.advance_symbol(spec);
        }
        self.iteration += 1;
        tracing::trace!(cycle = self.iteration, symbols = specs.len(), "cycle advanced");
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Last known price, or the symbol's fixed base price before any tick.
    pub fn current_price(&self, symbol: &str) -> f64 {
        match self.last_tick.get(symbol) {
            Some(tick) => tick.price,
            None => self.spec_for(symbol).base_price,
        }
    }

    /// Latest full tick for a symbol, if it has ever advanced.
    pub fn latest_tick(&self, symbol: &str) -> Option<&PriceTick> {
        self.last_tick.get(symbol)
    }

    /// Retained price points for a symbol, oldest first.
    pub fn price_history(&self, symbol: &str) -> Vec<&PricePoint> {
        self.history
            .get(symbol)
            .map(|h| h.iter().collect())
            .unwrap_or_default()
    }

    /// Derived rollup over recent history, or None with fewer than 2 points.
    pub fn market_stats(&self, symbol: &str) -> Option<MarketStats> {
        let tick = self.last_tick.get(symbol)?;
        let history = self.history.get(symbol)?;
        if history.len() < 2 {
            return None;
        }

        let recent = history.last_n(50);
        let day_high = recent.iter().map(|p| p.price).fold(f64::MIN, f64::max);
        let day_low = recent.iter().map(|p| p.price).fold(f64::MAX, f64::min);
        let all: Vec<&PricePoint> = history.iter().collect();
        let open = if all.len() > 20 {
            all[all.len() - 20].price
        } else {
            all[0].price
        };

        Some(MarketStats {
            current: tick.price,
            change: tick.change,
            change_percent: tick.change_percent,
            day_high,
            day_low,
            open,
            volume: tick.volume,
            volatility: tick.volatility,
            trend: tick.trend,
            sentiment: *self.sentiment.get(symbol).unwrap_or(&0.5),
        })
    }

    /// One-shot fetch with a simulated ~5% transient failure rate. The error
    /// is retryable by contract; it must never be treated as fatal.
    pub fn fetch_price(&mut self, symbol: &str) -> Result<PriceQuote, FetchError> {
        let roll = self.fetch_rolls;
        self.fetch_rolls += 1;
        let mut rng = self.seeds.rng_for("fetch", symbol, roll);
        if rng.gen::<f64>() < FETCH_FAILURE_RATE {
            tracing::debug!(symbol, "simulated fetch failure");
            return Err(FetchError::TemporarilyUnavailable {
                symbol: symbol.to_string(),
            });
        }

        Ok(match self.last_tick.get(symbol) {
            Some(tick) => PriceQuote {
                symbol: symbol.to_string(),
                price: tick.price,
                change: tick.change,
                change_percent: tick.change_percent,
            },
            None => PriceQuote {
                symbol: symbol.to_string(),
                price: self.current_price(symbol),
                change: 0.0,
                change_percent: 0.0,
            },
        })
    }

    // ── Subscriptions ────────────────────────────────────────────────

    /// Register a listener for a symbol's ticks. Listeners are notified in
    /// registration order.
    pub fn subscribe(
        &mut self,
        symbol: &str,
        listener: impl FnMut(&PriceTick) + Send + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers
            .entry(symbol.to_string())
            .or_default()
            .push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. No-op when the id was never registered for this
    /// symbol or was already removed.
    pub fn unsubscribe(&mut self, symbol: &str, id: SubscriptionId) {
        if let Some(subs) = self.subscribers.get_mut(symbol) {
            subs.retain(|(sub_id, _)| *sub_id != id);
        }
    }

    pub fn subscriber_count(&self, symbol: &str) -> usize {
        self.subscribers.get(symbol).map_or(0, Vec::len)
    }

    // ── Per-tick algorithm ───────────────────────────────────────────

    fn spec_for(&self, symbol: &str) -> SymbolSpec {
        self.universe
            .iter()
            .find(|s| s.symbol == symbol)
            .cloned()
            .unwrap_or_else(|| SymbolSpec::lookup(symbol))
    }

    fn advance_symbol(&mut self, spec: &SymbolSpec) {
        let symbol = spec.symbol.as_str();
        let current = self.current_price(symbol);
        let sentiment = *self.sentiment.get(symbol).unwrap_or(&0.5);
        let trend_before = Self::trend_of(self.history.get(symbol));

        // Four additive forces, each a fraction of the current price.
        let mut rng = self.seeds.rng_for("tick", symbol, self.iteration);
        let sentiment_factor = (sentiment - 0.5) * 0.3;
        let trend_factor = trend_before * 0.2;
        let random_walk = (rng.gen::<f64>() - 0.5) * spec.base_volatility;
        let mean_reversion = -((current - spec.base_price) / spec.base_price) * 0.5 * 0.1;

        let raw_move = (sentiment_factor + trend_factor + random_walk + mean_reversion) * current;

        // Snap to the tick grid, then apply the circuit breaker.
        let snapped = spec.round_to_tick(current + raw_move);
        let max_move = current * MAX_TICK_MOVE;
        let new_price = snapped.clamp(current - max_move, current + max_move);

        let now = Utc::now();
        let change = new_price - current;
        let change_percent = (change / current) * 100.0;

        // History records the pre-move price, so trend/volatility always
        // look at completed points.
        let history = self
            .history
            .entry(symbol.to_string())
            .or_insert_with(|| CappedHistory::new(PRICE_HISTORY_CAP));
        history.push(PricePoint {
            price: current,
            timestamp: now,
        });

        let trend = Self::trend_of(self.history.get(symbol));
        let volatility = Self::volatility_of(self.history.get(symbol), spec.base_volatility);

        let mut volume_rng = self.seeds.rng_for("volume", symbol, self.iteration);
        let multiplier = 1.0 + (volume_rng.gen::<f64>() - 0.5) * 0.5;
        let volume = (spec.base_volume as f64 * multiplier).round() as u64;

        let tick = PriceTick {
            symbol: symbol.to_string(),
            price: new_price,
            timestamp: now,
            change,
            change_percent,
            trend,
            volatility,
            volume,
            bid: new_price - spec.spread / 2.0,
            ask: new_price + spec.spread / 2.0,
        };

        let nudge = if change_percent > 0.0 {
            SENTIMENT_STEP
        } else {
            -SENTIMENT_STEP
        };
        self.sentiment
            .insert(symbol.to_string(), (sentiment + nudge).clamp(0.0, 1.0));

        self.last_tick.insert(symbol.to_string(), tick.clone());
        self.notify(symbol, &tick);
    }

    /// Normalized price delta over the last `TREND_LOOKBACK` points; 0 until
    /// enough history exists.
    fn trend_of(history: Option<&CappedHistory<PricePoint>>) -> f64 {
        let Some(history) = history else { return 0.0 };
        if history.len() < TREND_LOOKBACK {
            return 0.0;
        }
        let recent = history.last_n(TREND_LOOKBACK);
        let oldest = recent[0].price;
        let newest = recent[recent.len() - 1].price;
        (newest - oldest) / oldest
    }

    /// Annualized stdev of the last `VOLATILITY_LOOKBACK` one-step returns,
    /// falling back to the symbol's base volatility while history is short.
    fn volatility_of(history: Option<&CappedHistory<PricePoint>>, base: f64) -> f64 {
        let Some(history) = history else { return base };
        if history.len() < VOLATILITY_LOOKBACK {
            return base;
        }
        let recent = history.last_n(VOLATILITY_LOOKBACK);
        let returns: Vec<f64> = recent
            .windows(2)
            .map(|w| (w[1].price - w[0].price) / w[0].price)
            .collect();

        let mean = returns.iter().sum::<f64>() / returns.len() as f64;
        let variance =
            returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / returns.len() as f64;
        variance.sqrt() * (252.0_f64).sqrt()
    }

    /// Fan a tick out to the symbol's listeners, in registration order.
    /// The list is detached for the duration of the walk so iteration can
    /// never observe a partially-updated set.
    fn notify(&mut self, symbol: &str, tick: &PriceTick) {
        let Some(mut subs) = self.subscribers.remove(symbol) else {
            return;
        };
        for (_, listener) in subs.iter_mut() {
            listener(tick);
        }
        self.subscribers.insert(symbol.to_string(), subs);
    }
}
