//! Price simulation — bounded stochastic walk over a fixed symbol universe.

pub mod scheduler;
pub mod simulator;

pub use scheduler::{TickScheduler, DEFAULT_TICK_PERIOD};
pub use simulator::{
    FetchError, MarketStats, PriceQuote, PriceSimulator, SubscriptionId,
};
