//! PaperBroker — simulated connect/execute lifecycle.
//!
//! Mirrors the contract a real binary-options broker integration would
//! expose: connect with validated credentials, execute fixed-payout trades
//! against a demo balance, inspect history and connection state. Fills are
//! deterministic under a master seed.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use signaldesk_core::domain::{SymbolSpec, Timeframe};
use signaldesk_core::history::CappedHistory;
use signaldesk_core::rng::SeedHierarchy;

use crate::credentials::{CredentialError, Credentials};

/// Demo account starting balance, in the account currency.
const STARTING_BALANCE: f64 = 1000.0;
/// Fixed payout fraction applied to a winning trade.
const PAYOUT_RATE: f64 = 0.85;
/// Retained trade receipts.
const TRADE_HISTORY_CAP: usize = 100;

/// Execution failures. `NotConnected`, `InvalidAmount` and
/// `InsufficientBalance` are contract violations by the caller;
/// `Credentials` wraps format errors from the validation step.
#[derive(Debug, Error)]
pub enum BrokerError {
    #[error("not connected to broker")]
    NotConnected,
    #[error(transparent)]
    Credentials(#[from] CredentialError),
    #[error("trade amount must be positive, got {amount}")]
    InvalidAmount { amount: f64 },
    #[error("insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: f64, available: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountType {
    Demo,
}

/// Demo account state handed out on connect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountInfo {
    pub balance: f64,
    pub currency: String,
    pub account_type: AccountType,
    pub leverage: String,
}

impl AccountInfo {
    fn demo() -> Self {
        Self {
            balance: STARTING_BALANCE,
            currency: "USD".to_string(),
            account_type: AccountType::Demo,
            leverage: "1:100".to_string(),
        }
    }
}

/// Point-in-time connection report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionStatus {
    pub connected: bool,
    pub last_update: DateTime<Utc>,
}

/// Direction of a fixed-payout trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeAction {
    Buy,
    Sell,
}

impl std::fmt::Display for TradeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeAction::Buy => f.write_str("BUY"),
            TradeAction::Sell => f.write_str("SELL"),
        }
    }
}

/// Everything needed to place one trade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeRequest {
    pub symbol: String,
    pub action: TradeAction,
    pub amount: f64,
    pub timeframe: Timeframe,
    pub strategy_name: String,
}

/// Confirmation of an executed trade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeReceipt {
    pub trade_id: String,
    pub symbol: String,
    pub action: TradeAction,
    pub amount: f64,
    pub timeframe: Timeframe,
    pub strategy_name: String,
    pub entry_price: f64,
    /// Payout credited if the trade wins.
    pub expected_return: f64,
    pub timestamp: DateTime<Utc>,
    pub expiry: DateTime<Utc>,
}

/// Simulated broker session. One instance is one logical connection slot;
/// reconnecting resets the demo balance.
#[derive(Debug)]
pub struct PaperBroker {
    seeds: SeedHierarchy,
    account: Option<AccountInfo>,
    trades: CappedHistory<TradeReceipt>,
    trade_seq: u64,
}

impl PaperBroker {
    pub fn new(master_seed: u64) -> Self {
        Self {
            seeds: SeedHierarchy::new(master_seed),
            account: None,
            trades: CappedHistory::new(TRADE_HISTORY_CAP),
            trade_seq: 0,
        }
    }

    // ── Session lifecycle ────────────────────────────────────────────

    /// Validate credentials and open a demo session.
    pub fn connect(&mut self, credentials: &Credentials) -> Result<&AccountInfo, BrokerError> {
        credentials.validate()?;
        tracing::info!(account_id = %credentials.account_id, "broker session opened");
        Ok(self.account.insert(AccountInfo::demo()))
    }

    /// Close the session. Safe to call when not connected.
    pub fn disconnect(&mut self) {
        if self.account.take().is_some() {
            tracing::info!("broker session closed");
        }
    }

    pub fn is_connected(&self) -> bool {
        self.account.is_some()
    }

    pub fn connection_status(&self) -> ConnectionStatus {
        ConnectionStatus {
            connected: self.is_connected(),
            last_update: Utc::now(),
        }
    }

    pub fn account_info(&self) -> Option<&AccountInfo> {
        self.account.as_ref()
    }

    // ── Execution ────────────────────────────────────────────────────

    /// Fill a trade at a jittered reference price, debit the balance, and
    /// record the receipt.
    pub fn execute_trade(&mut self, request: &TradeRequest) -> Result<TradeReceipt, BrokerError> {
        let account = self.account.as_mut().ok_or(BrokerError::NotConnected)?;

        if request.amount <= 0.0 || !request.amount.is_finite() {
            return Err(BrokerError::InvalidAmount {
                amount: request.amount,
            });
        }
        if request.amount > account.balance {
            return Err(BrokerError::InsufficientBalance {
                requested: request.amount,
                available: account.balance,
            });
        }

        let seq = self.trade_seq;
        self.trade_seq += 1;

        // Reference price within ±0.05% of the instrument base.
        let mut rng = self.seeds.rng_for("fill", &request.symbol, seq);
        let base = SymbolSpec::lookup(&request.symbol).base_price;
        let entry_price = base * (1.0 + (rng.gen::<f64>() - 0.5) * 0.001);

        let now = Utc::now();
        let expiry_minutes = request.timeframe.minutes();
        let receipt = TradeReceipt {
            trade_id: format!("PO-{seq:06}"),
            symbol: request.symbol.clone(),
            action: request.action,
            amount: request.amount,
            timeframe: request.timeframe,
            strategy_name: request.strategy_name.clone(),
            entry_price,
            expected_return: request.amount * PAYOUT_RATE,
            timestamp: now,
            expiry: now + Duration::seconds((expiry_minutes * 60.0) as i64),
        };

        account.balance -= request.amount;
        self.trades.push(receipt.clone());

        tracing::info!(
            trade_id = %receipt.trade_id,
            symbol = %receipt.symbol,
            action = %receipt.action,
            amount = receipt.amount,
            "trade executed"
        );
        Ok(receipt)
    }

    /// Most recent receipts, oldest first, at most `limit`.
    pub fn trade_history(&self, limit: usize) -> Vec<&TradeReceipt> {
        self.trades.last_n(limit)
    }
}
