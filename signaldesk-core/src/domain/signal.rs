//! Fused signal types — the verdict side of the data model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Hard bounds every layer score is clamped to at the point of computation.
pub const LAYER_SCORE_MIN: f64 = -100.0;
pub const LAYER_SCORE_MAX: f64 = 100.0;

/// One analysis dimension: a clamped score plus human-readable descriptors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalLayer {
    /// Always within [-100, 100].
    pub score: f64,
    pub notes: Vec<String>,
}

impl SignalLayer {
    /// Build a layer, clamping the score into bounds.
    pub fn new(score: f64, notes: Vec<String>) -> SignalLayer {
        SignalLayer {
            score: score.clamp(LAYER_SCORE_MIN, LAYER_SCORE_MAX),
            notes,
        }
    }

    /// Neutral layer with a single descriptor, used when input data is absent.
    pub fn unavailable(note: &str) -> SignalLayer {
        SignalLayer {
            score: 0.0,
            notes: vec![note.to_string()],
        }
    }
}

/// All six analysis layers. `strategy` is None when no strategy plan was
/// supplied; its fusion weight is then excluded from normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerBreakdown {
    pub technical: SignalLayer,
    pub momentum: SignalLayer,
    pub volume: SignalLayer,
    pub sentiment: SignalLayer,
    pub pattern: SignalLayer,
    pub strategy: Option<SignalLayer>,
}

/// Trading verdict after the action filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalAction {
    StrongBuy,
    Buy,
    Hold,
    Sell,
    StrongSell,
    Wait,
}

impl std::fmt::Display for SignalAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SignalAction::StrongBuy => "STRONG BUY",
            SignalAction::Buy => "BUY",
            SignalAction::Hold => "HOLD",
            SignalAction::Sell => "SELL",
            SignalAction::StrongSell => "STRONG SELL",
            SignalAction::Wait => "WAIT",
        };
        f.write_str(name)
    }
}

/// Confidence band attached to a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalStrength {
    VeryHigh,
    High,
    Medium,
    Low,
}

impl std::fmt::Display for SignalStrength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SignalStrength::VeryHigh => "Very High",
            SignalStrength::High => "High",
            SignalStrength::Medium => "Medium",
            SignalStrength::Low => "Low",
        };
        f.write_str(name)
    }
}

/// The fused output of one `process_signal` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FusedSignal {
    pub action: SignalAction,
    pub strength: SignalStrength,
    pub recommendation: String,
    pub layers: LayerBreakdown,
    /// Normalized confidence in [0, 100].
    pub confidence: f64,
    /// Rolling accuracy estimate in [0, 100].
    pub accuracy: f64,
    pub timestamp: DateTime<Utc>,
}
