//! Domain types for SignalDesk

pub mod instrument;
pub mod signal;
pub mod snapshot;
pub mod strategy;
pub mod tick;

pub use instrument::{Market, SymbolSpec};
pub use signal::{
    FusedSignal, LayerBreakdown, SignalAction, SignalLayer, SignalStrength,
};
pub use snapshot::{
    MacdSignal, MaSide, MarketInfo, MarketSnapshot, RsiStatus, SentimentLabel, TechnicalOverview,
    VolatilityBand,
};
pub use strategy::{
    EntryPoints, ExitPoints, RiskLevel, StopLoss, Strategy, StrategyKind, StrategyPlan,
    StrategySelection, StrategySignals, TakeProfit, Timeframe, TimeframeParseError,
};
pub use tick::{PricePoint, PriceTick};

/// Symbol type alias
pub type Symbol = String;
