//! The closed six-strategy catalog.
//!
//! Declaration order matters: selection ties break toward the
//! first-declared strategy. That tie-break is documented behavior, not a
//! meaningful ranking.

use crate::domain::{Market, RiskLevel, Strategy, StrategyKind, Timeframe};

/// Build the default catalog, in declaration order.
pub fn default_catalog() -> Vec<Strategy> {
    vec![
        Strategy {
            kind: StrategyKind::Scalping,
            name: "Scalping Strategy".to_string(),
            timeframes: vec![Timeframe::S30, Timeframe::M1, Timeframe::M2],
            markets: vec![Market::Forex, Market::Crypto],
            indicators: strs(&["RSI", "MACD", "Bollinger Bands"]),
            risk_level: RiskLevel::High,
            win_rate: 0.65,
            description: "Quick profits from small price movements".to_string(),
        },
        Strategy {
            kind: StrategyKind::Momentum,
            name: "Momentum Strategy".to_string(),
            timeframes: vec![Timeframe::M5, Timeframe::M15, Timeframe::M30],
            markets: vec![Market::Stocks, Market::Crypto, Market::Indices],
            indicators: strs(&["Moving Averages", "RSI", "Volume"]),
            risk_level: RiskLevel::Medium,
            win_rate: 0.58,
            description: "Following strong price trends".to_string(),
        },
        Strategy {
            kind: StrategyKind::MeanReversion,
            name: "Mean Reversion Strategy".to_string(),
            timeframes: vec![Timeframe::M15, Timeframe::M30, Timeframe::H1],
            markets: vec![Market::Forex, Market::Commodities],
            indicators: strs(&["Bollinger Bands", "RSI", "Stochastic"]),
            risk_level: RiskLevel::Medium,
            win_rate: 0.62,
            description: "Trading oversold/overbought conditions".to_string(),
        },
        Strategy {
            kind: StrategyKind::Breakout,
            name: "Breakout Strategy".to_string(),
            timeframes: vec![Timeframe::M30, Timeframe::H1, Timeframe::H4],
            markets: vec![Market::Stocks, Market::Indices, Market::Crypto],
            indicators: strs(&["Support/Resistance", "Volume", "ATR"]),
            risk_level: RiskLevel::High,
            win_rate: 0.55,
            description: "Trading price breakouts from consolidation".to_string(),
        },
        Strategy {
            kind: StrategyKind::Swing,
            name: "Swing Trading Strategy".to_string(),
            timeframes: vec![Timeframe::H4, Timeframe::D1],
            markets: vec![Market::Stocks, Market::Indices, Market::Commodities],
            indicators: strs(&["Moving Averages", "MACD", "Fibonacci"]),
            risk_level: RiskLevel::Low,
            win_rate: 0.70,
            description: "Medium-term trend following".to_string(),
        },
        Strategy {
            kind: StrategyKind::Arbitrage,
            name: "Statistical Arbitrage".to_string(),
            timeframes: vec![Timeframe::M1, Timeframe::M5],
            markets: vec![Market::Crypto, Market::Forex],
            indicators: strs(&["Correlation", "Spread", "Z-Score"]),
            risk_level: RiskLevel::Low,
            win_rate: 0.75,
            description: "Exploiting price differences".to_string(),
        },
    ]
}

fn strs(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Small fixed per-symbol strategy bias. Unknown pairs score 0.
pub fn symbol_bias(symbol: &str, kind: StrategyKind) -> f64 {
    match (symbol, kind) {
        ("EURUSD", StrategyKind::MeanReversion) => 5.0,
        ("EURUSD", StrategyKind::Scalping) => 3.0,
        ("BTCUSD", StrategyKind::Momentum) => 5.0,
        ("BTCUSD", StrategyKind::Breakout) => 4.0,
        ("AAPL", StrategyKind::Swing) => 4.0,
        ("AAPL", StrategyKind::Momentum) => 3.0,
        ("GOLD", StrategyKind::MeanReversion) => 5.0,
        ("GOLD", StrategyKind::Swing) => 3.0,
        _ => 0.0,
    }
}
