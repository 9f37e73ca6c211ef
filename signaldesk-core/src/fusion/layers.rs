//! The six analysis layers.
//!
//! Each layer is a pure function from its inputs to a clamped
//! [`SignalLayer`]. Missing inputs degrade to a neutral score-0 layer with
//! an explanatory note — never an error. Positive scores lean buy,
//! negative lean sell.

use crate::domain::{MarketSnapshot, PriceTick, SignalLayer, StrategyPlan, VolatilityBand};

use super::SignalRecord;

/// Pattern recognition looks at exactly this many recent signals.
pub const PATTERN_LOOKBACK: usize = 3;

/// Technical layer: RSI rule ladder, MACD crossover bonus, and a
/// volatility/sentiment interaction term.
pub fn technical(snapshot: &MarketSnapshot) -> SignalLayer {
    let rsi = snapshot.technical_overview.rsi;
    let macd = snapshot.technical_overview.macd;
    let volatility = snapshot.market_info.volatility;
    let sentiment = snapshot.market_info.sentiment;

    let mut score = 0.0;
    let mut notes = Vec::new();

    if rsi < 25.0 {
        score += 30.0;
        notes.push("Strong Oversold - High Buy Probability".to_string());
    } else if rsi < 35.0 {
        score += 20.0;
        notes.push("Oversold - Buy Signal".to_string());
    } else if rsi > 75.0 {
        score -= 30.0;
        notes.push("Strong Overbought - High Sell Probability".to_string());
    } else if rsi > 65.0 {
        score -= 20.0;
        notes.push("Overbought - Sell Signal".to_string());
    } else if (45.0..=55.0).contains(&rsi) {
        score += 10.0;
        notes.push("RSI Neutral - Stable Conditions".to_string());
    }

    if macd.is_bullish() {
        score += 15.0;
        notes.push("MACD Bullish Crossover".to_string());
    } else {
        score -= 15.0;
        notes.push("MACD Bearish Crossover".to_string());
    }

    if volatility == VolatilityBand::Low && sentiment.is_bullish() {
        score += 20.0;
        notes.push("Low Volatility Bullish Environment".to_string());
    } else if volatility == VolatilityBand::High && sentiment.is_bearish() {
        score -= 15.0;
        notes.push("High Volatility Bearish Environment".to_string());
    }

    SignalLayer::new(score, notes)
}

/// Momentum layer: price change magnitude plus trend confirmation.
pub fn momentum(tick: Option<&PriceTick>) -> SignalLayer {
    let Some(tick) = tick else {
        return SignalLayer::unavailable("No price data available");
    };

    let change_percent = tick.change_percent;
    let mut score = 0.0;
    let mut notes = Vec::new();

    if change_percent.abs() > 0.5 {
        if change_percent > 0.0 {
            score += 25.0;
            notes.push(format!("Strong Upward Momentum (+{change_percent:.2}%)"));
        } else {
            score -= 25.0;
            notes.push(format!("Strong Downward Momentum ({change_percent:.2}%)"));
        }
    } else if change_percent.abs() > 0.1 {
        let direction = if change_percent > 0.0 { "Upward" } else { "Downward" };
        score += if change_percent > 0.0 { 15.0 } else { -15.0 };
        notes.push(format!("Moderate {direction} Momentum"));
    } else {
        score += 5.0;
        notes.push("Stable Price Action".to_string());
    }

    if tick.trend > 0.001 {
        score += 20.0;
        notes.push("Strong Uptrend Confirmed".to_string());
    } else if tick.trend < -0.001 {
        score -= 20.0;
        notes.push("Strong Downtrend Confirmed".to_string());
    }

    SignalLayer::new(score, notes)
}

/// Volume layer: volume/price-move interaction.
pub fn volume_profile(tick: Option<&PriceTick>) -> SignalLayer {
    let Some(tick) = tick else {
        return SignalLayer::unavailable("No volume data");
    };

    let volume = tick.volume;
    let change_percent = tick.change_percent;
    let mut score = 0.0;
    let mut notes = Vec::new();

    if volume > 50_000 && change_percent.abs() > 0.2 {
        let pressure = if change_percent > 0.0 { "Buying" } else { "Selling" };
        score += if change_percent > 0.0 { 25.0 } else { -25.0 };
        notes.push(format!("High Volume {pressure} Pressure"));
    } else if volume < 10_000 && change_percent.abs() < 0.1 {
        score += 10.0;
        notes.push("Low Volume Consolidation".to_string());
    } else if volume > 30_000 {
        score += 15.0;
        notes.push("Above Average Volume Activity".to_string());
    }

    SignalLayer::new(score, notes)
}

/// Sentiment layer: direct mapping from the five-level label.
pub fn sentiment(snapshot: &MarketSnapshot) -> SignalLayer {
    let label = snapshot.market_info.sentiment;
    let note = match label.layer_score() {
        s if s >= 30.0 => "Very Positive Market Sentiment",
        s if s >= 20.0 => "Positive Market Sentiment",
        s if s > 0.0 => "Neutral Market Sentiment",
        s if s <= -30.0 => "Very Negative Market Sentiment",
        _ => "Negative Market Sentiment",
    };
    SignalLayer::new(label.layer_score(), vec![note.to_string()])
}

/// Pattern layer: shape of the last three recorded signal prices.
/// Needs at least [`PATTERN_LOOKBACK`] records; fewer yields a silent zero.
pub fn pattern(records: &[&SignalRecord]) -> SignalLayer {
    let mut score = 0.0;
    let mut notes = Vec::new();

    if records.len() >= PATTERN_LOOKBACK {
        let recent = &records[records.len() - PATTERN_LOOKBACK..];
        let prices: Vec<f64> = recent.iter().map(|r| r.price).collect();

        if prices[0] < prices[1] && prices[1] < prices[2] {
            score += 20.0;
            notes.push("Ascending Price Pattern Detected".to_string());
        } else if prices[0] > prices[1] && prices[1] > prices[2] {
            score -= 20.0;
            notes.push("Descending Price Pattern Detected".to_string());
        } else if (prices[0] - prices[2]).abs() < prices[1] * 0.001 {
            score += 10.0;
            notes.push("Consolidation Pattern Detected".to_string());
        }
    }

    SignalLayer::new(score, notes)
}

/// Strategy-alignment layer: distance from the plan's entry bands plus a
/// selection-confidence bonus. Only computed when a plan is present.
pub fn strategy_alignment(plan: &StrategyPlan, snapshot: &MarketSnapshot) -> SignalLayer {
    let price = snapshot.technical_overview.current_price;
    let entry = &plan.signals.entry_points;

    let buy_distance = (price - entry.buy).abs() / price;
    let sell_distance = (price - entry.sell).abs() / price;

    let mut score = 0.0;
    let mut notes = Vec::new();

    if buy_distance < 0.001 {
        score += 35.0;
        notes.push("Price at Optimal Buy Entry Point".to_string());
    } else if sell_distance < 0.001 {
        score -= 35.0;
        notes.push("Price at Optimal Sell Entry Point".to_string());
    } else if buy_distance < 0.005 {
        score += 20.0;
        notes.push("Price Near Buy Entry Point".to_string());
    } else if sell_distance < 0.005 {
        score -= 20.0;
        notes.push("Price Near Sell Entry Point".to_string());
    }

    if plan.signals.confidence > 80.0 {
        score += 15.0;
        notes.push("High Strategy Confidence".to_string());
    } else if plan.signals.confidence > 60.0 {
        score += 10.0;
        notes.push("Medium Strategy Confidence".to_string());
    }

    SignalLayer::new(score, notes)
}
