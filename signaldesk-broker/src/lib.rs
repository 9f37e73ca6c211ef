//! SignalDesk paper broker.
//!
//! A simulated execution collaborator: it validates credential formats,
//! hands out a demo account, fills binary-option style trades at a
//! jittered reference price, and keeps a bounded in-memory trade history.
//! No network connection is ever made; the core only depends on this
//! crate's request/response contract.

pub mod broker;
pub mod credentials;

pub use broker::{
    AccountInfo, AccountType, BrokerError, ConnectionStatus, PaperBroker, TradeAction,
    TradeReceipt, TradeRequest,
};
pub use credentials::{CredentialError, Credentials};
