//! SignalDesk Core — synthetic market simulation, strategy selection, signal fusion.
//!
//! This crate contains the decision engine behind the desk:
//! - Domain types (ticks, snapshots, strategies, fused signals)
//! - Bounded stochastic price simulator with a tick scheduler
//! - Adaptive strategy-selection scorer over a closed six-strategy catalog
//! - Six-layer confidence-fusion pipeline with bounded per-symbol history
//! - Deterministic seed hierarchy so every run is reproducible
//!
//! The three engines are consumed bottom-up: the simulator produces ticks,
//! the strategy engine turns a market snapshot into a trade plan, and the
//! fusion processor combines both into one actionable verdict.

pub mod domain;
pub mod fusion;
pub mod history;
pub mod rng;
pub mod sim;
pub mod snapshot;
pub mod strategy;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: all engine types are Send + Sync so a caller may
    /// drive sessions from a worker thread.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        // Domain types
        require_send::<domain::PriceTick>();
        require_sync::<domain::PriceTick>();
        require_send::<domain::SymbolSpec>();
        require_sync::<domain::SymbolSpec>();
        require_send::<domain::MarketSnapshot>();
        require_sync::<domain::MarketSnapshot>();
        require_send::<domain::Strategy>();
        require_sync::<domain::Strategy>();
        require_send::<domain::StrategySelection>();
        require_sync::<domain::StrategySelection>();
        require_send::<domain::StrategySignals>();
        require_sync::<domain::StrategySignals>();
        require_send::<domain::FusedSignal>();
        require_sync::<domain::FusedSignal>();
        require_send::<domain::SignalLayer>();
        require_sync::<domain::SignalLayer>();

        // Engines
        require_send::<sim::PriceSimulator>();
        require_send::<sim::TickScheduler>();
        require_sync::<sim::TickScheduler>();
        require_send::<strategy::StrategyEngine>();
        require_sync::<strategy::StrategyEngine>();
        require_send::<fusion::SignalFusionProcessor>();
        require_sync::<fusion::SignalFusionProcessor>();
        require_send::<snapshot::SnapshotGenerator>();
        require_sync::<snapshot::SnapshotGenerator>();

        // RNG
        require_send::<rng::SeedHierarchy>();
        require_sync::<rng::SeedHierarchy>();
    }

    /// Architecture contract: strategy and fusion engines never touch the
    /// simulator. `select_optimal` takes a snapshot, `process_signal` takes
    /// a snapshot plus an already-produced tick — neither signature accepts
    /// a `PriceSimulator`, so the two upper engines stay pure over their
    /// inputs and concurrent calls for different symbols are independent.
    #[test]
    fn upper_engines_take_data_not_the_simulator() {
        fn _strategy_is_snapshot_pure(
            engine: &strategy::StrategyEngine,
            snapshot: &domain::MarketSnapshot,
        ) -> Option<domain::StrategySelection> {
            engine.select_optimal(
                domain::Market::Forex,
                "EURUSD",
                domain::Timeframe::M5,
                snapshot,
            )
        }

        fn _fusion_is_data_pure(
            processor: &mut fusion::SignalFusionProcessor,
            snapshot: &domain::MarketSnapshot,
            tick: &domain::PriceTick,
        ) -> domain::FusedSignal {
            processor.process_signal("EURUSD", snapshot, None, Some(tick))
        }
    }
}
