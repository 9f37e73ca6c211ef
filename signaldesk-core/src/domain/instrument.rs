//! Symbol specifications — fixed per-symbol market configuration.
//!
//! Tick size, spread, base price, base volatility and base volume are fixed
//! lookup-table constants, never derived and never mutated per tick. Unknown
//! symbols fall back to generic defaults so callers cannot hit a missing-key
//! error.

use serde::{Deserialize, Serialize};

/// Asset category a symbol trades in. Strategy applicability is keyed on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Market {
    Forex,
    Crypto,
    Stocks,
    Indices,
    Commodities,
}

impl std::fmt::Display for Market {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Market::Forex => "forex",
            Market::Crypto => "crypto",
            Market::Stocks => "stocks",
            Market::Indices => "indices",
            Market::Commodities => "commodities",
        };
        f.write_str(name)
    }
}

/// Fixed configuration for one tradable symbol.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SymbolSpec {
    pub symbol: String,
    pub market: Market,
    /// Reference price the mean-reversion force pulls toward.
    pub base_price: f64,
    /// Minimum price increment; every simulated price is a multiple of this.
    pub tick_size: f64,
    /// Fixed bid/ask spread.
    pub spread: f64,
    /// Scale of the per-tick random walk.
    pub base_volatility: f64,
    /// Reference trade volume per tick.
    pub base_volume: u64,
}

/// (symbol, market, base price, spread, volatility, volume) rows for the
/// tracked universe. Tick size is rule-based, see [`tick_size_for`].
const UNIVERSE: &[(&str, Market, f64, f64, f64, u64)] = &[
    // Forex majors
    ("EURUSD", Market::Forex, 1.085, 0.00001, 0.00008, 1_000_000),
    ("GBPUSD", Market::Forex, 1.2642, 0.00002, 0.0001, 800_000),
    ("USDJPY", Market::Forex, 149.85, 0.001, 0.008, 900_000),
    ("AUDUSD", Market::Forex, 0.6725, 0.01, 0.0001, 10_000),
    ("USDCAD", Market::Forex, 1.3458, 0.01, 0.00009, 10_000),
    ("NZDUSD", Market::Forex, 0.6148, 0.01, 0.00012, 10_000),
    ("USDCHF", Market::Forex, 0.8975, 0.01, 0.001, 10_000),
    // Crypto
    ("BTCUSD", Market::Crypto, 43_850.0, 0.5, 30.0, 50_000),
    ("ETHUSD", Market::Crypto, 2_680.5, 0.1, 3.0, 80_000),
    ("LTCUSD", Market::Crypto, 73.25, 0.01, 0.5, 10_000),
    ("XRPUSD", Market::Crypto, 0.618, 0.01, 0.005, 10_000),
    ("ADAUSD", Market::Crypto, 0.492, 0.01, 0.001, 10_000),
    // US stocks
    ("AAPL", Market::Stocks, 195.89, 0.01, 0.3, 100_000),
    ("GOOGL", Market::Stocks, 142.56, 0.02, 0.8, 50_000),
    ("MSFT", Market::Stocks, 415.26, 0.01, 0.4, 80_000),
    ("TSLA", Market::Stocks, 248.48, 0.01, 1.2, 10_000),
    ("AMZN", Market::Stocks, 155.89, 0.01, 0.001, 10_000),
    ("META", Market::Stocks, 485.59, 0.01, 0.001, 10_000),
    // Indices
    ("NASDAQ100", Market::Indices, 16_845.3, 0.01, 3.0, 10_000),
    ("SP500", Market::Indices, 4_750.89, 0.01, 1.5, 10_000),
    ("DOW30", Market::Indices, 37_504.81, 0.01, 20.0, 10_000),
    // Commodities
    ("GOLD", Market::Commodities, 2_045.5, 0.05, 0.3, 30_000),
    ("SILVER", Market::Commodities, 24.85, 0.01, 0.015, 20_000),
    ("USOIL", Market::Commodities, 78.45, 0.01, 0.5, 10_000),
];

/// Default configuration for symbols outside the tracked universe.
const DEFAULT_BASE_PRICE: f64 = 100.0;
const DEFAULT_SPREAD: f64 = 0.01;
const DEFAULT_VOLATILITY: f64 = 0.001;
const DEFAULT_VOLUME: u64 = 10_000;

/// Rule-based tick size. Forex pairs quote at a pip fraction, JPY crosses at
/// a tenth of a pip, crypto majors coarser, indices at 0.1.
fn tick_size_for(symbol: &str) -> f64 {
    if symbol.contains("JPY") {
        return 0.001;
    }
    // Crypto majors before the generic six-letter forex rule: BTCUSD and
    // ETHUSD would otherwise match it.
    if symbol.contains("BTC") {
        return 0.1;
    }
    if symbol.contains("ETH") {
        return 0.01;
    }
    if symbol.contains("USD") && symbol.len() == 6 {
        return 0.00001;
    }
    if symbol == "GOLD" || symbol == "SILVER" {
        return 0.01;
    }
    if matches!(symbol, "NASDAQ100" | "SP500" | "DOW30") {
        return 0.1;
    }
    0.01
}

impl SymbolSpec {
    /// Look up the fixed spec for a symbol, falling back to generic defaults
    /// for unknown symbols.
    pub fn lookup(symbol: &str) -> SymbolSpec {
        let row = UNIVERSE.iter().find(|(s, ..)| *s == symbol);
        match row {
            Some((s, market, base, spread, vol, volume)) => SymbolSpec {
                symbol: (*s).to_string(),
                market: *market,
                base_price: *base,
                tick_size: tick_size_for(s),
                spread: *spread,
                base_volatility: *vol,
                base_volume: *volume,
            },
            None => SymbolSpec {
                symbol: symbol.to_string(),
                market: Market::Stocks,
                base_price: DEFAULT_BASE_PRICE,
                tick_size: tick_size_for(symbol),
                spread: DEFAULT_SPREAD,
                base_volatility: DEFAULT_VOLATILITY,
                base_volume: DEFAULT_VOLUME,
            },
        }
    }

    /// The full tracked universe, in declaration order.
    pub fn universe() -> Vec<SymbolSpec> {
        UNIVERSE.iter().map(|(s, ..)| Self::lookup(s)).collect()
    }

    /// Round a price to the nearest multiple of this symbol's tick size.
    pub fn round_to_tick(&self, price: f64) -> f64 {
        (price / self.tick_size).round() * self.tick_size
    }

    /// Display precision for quoting this symbol.
    pub fn decimal_places(&self) -> usize {
        if self.symbol.contains("JPY") {
            return 3;
        }
        if self.symbol.contains("BTC") || self.symbol.contains("ETH") {
            return 2;
        }
        if self.symbol.contains("USD") && self.symbol.len() == 6 {
            return 5;
        }
        2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_symbol_has_table_constants() {
        let spec = SymbolSpec::lookup("EURUSD");
        assert_eq!(spec.market, Market::Forex);
        assert_eq!(spec.base_price, 1.085);
        assert_eq!(spec.spread, 0.00001);
        assert_eq!(spec.base_volume, 1_000_000);
        assert_eq!(spec.tick_size, 0.00001);
    }

    #[test]
    fn unknown_symbol_falls_back_to_defaults() {
        let spec = SymbolSpec::lookup("ZZZZ");
        assert_eq!(spec.base_price, 100.0);
        assert_eq!(spec.spread, 0.01);
        assert_eq!(spec.base_volatility, 0.001);
        assert_eq!(spec.base_volume, 10_000);
    }

    #[test]
    fn jpy_crosses_use_fine_tick() {
        assert_eq!(SymbolSpec::lookup("USDJPY").tick_size, 0.001);
    }

    #[test]
    fn crypto_majors_use_coarse_tick() {
        assert_eq!(SymbolSpec::lookup("BTCUSD").tick_size, 0.1);
        assert_eq!(SymbolSpec::lookup("ETHUSD").tick_size, 0.01);
    }

    #[test]
    fn indices_use_tenth_tick() {
        assert_eq!(SymbolSpec::lookup("SP500").tick_size, 0.1);
    }

    #[test]
    fn round_to_tick_snaps_to_grid() {
        let spec = SymbolSpec::lookup("BTCUSD"); // tick 0.1
        assert!((spec.round_to_tick(43_850.27) - 43_850.3).abs() < 1e-9);
        assert!((spec.round_to_tick(43_850.24) - 43_850.2).abs() < 1e-9);
    }

    #[test]
    fn universe_has_24_symbols_in_declaration_order() {
        let universe = SymbolSpec::universe();
        assert_eq!(universe.len(), 24);
        assert_eq!(universe[0].symbol, "EURUSD");
        assert_eq!(universe[23].symbol, "USOIL");
    }

    #[test]
    fn forex_quotes_five_decimals_jpy_three() {
        assert_eq!(SymbolSpec::lookup("EURUSD").decimal_places(), 5);
        assert_eq!(SymbolSpec::lookup("USDJPY").decimal_places(), 3);
        assert_eq!(SymbolSpec::lookup("AAPL").decimal_places(), 2);
    }

    #[test]
    fn spec_serialization_roundtrip() {
        let spec = SymbolSpec::lookup("GOLD");
        let json = serde_json::to_string(&spec).unwrap();
        let deser: SymbolSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(spec, deser);
    }
}
