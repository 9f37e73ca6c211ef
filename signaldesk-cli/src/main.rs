//! SignalDesk CLI — seeded trading-assistant sessions in the terminal.
//!
//! Commands:
//! - `run` — drive simulator + strategy engine + signal fusion for N cycles
//! - `strategies` — list the strategy catalog, optionally filtered
//! - `stats` — warm up the simulator and print market stats for a symbol

mod config;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use signaldesk_broker::{Credentials, PaperBroker, TradeAction, TradeRequest};
use signaldesk_core::domain::{Market, SignalAction, SymbolSpec, Timeframe};
use signaldesk_core::fusion::SignalFusionProcessor;
use signaldesk_core::sim::PriceSimulator;
use signaldesk_core::snapshot::SnapshotGenerator;
use signaldesk_core::strategy::StrategyEngine;

use config::SessionConfig;

#[derive(Parser)]
#[command(
    name = "signaldesk",
    about = "SignalDesk CLI — synthetic market simulation and signal fusion"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a full session: price simulation, strategy selection, fusion.
    Run {
        /// Path to a TOML session config; flags below override it.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Symbols to simulate (e.g., EURUSD BTCUSD).
        #[arg(long)]
        symbol: Vec<String>,

        /// Market filter for strategy selection.
        #[arg(long)]
        market: Option<String>,

        /// Session timeframe (30s, 1m, 2m, 5m, 15m, 30m, 1h, 4h, 1d).
        #[arg(long)]
        timeframe: Option<String>,

        /// Number of cycles to run.
        #[arg(long)]
        cycles: Option<u32>,

        /// Master seed; the whole session replays identically under it.
        #[arg(long)]
        seed: Option<u64>,

        /// Execute STRONG verdicts against the paper broker.
        #[arg(long, default_value_t = false)]
        paper_trade: bool,

        /// Stake per paper trade.
        #[arg(long)]
        trade_amount: Option<f64>,

        /// Print each fused signal as a JSON line instead of a summary line.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List the strategy catalog, optionally filtered by market/timeframe.
    Strategies {
        /// Only strategies applicable to this market.
        #[arg(long)]
        market: Option<String>,

        /// Only strategies applicable to this timeframe.
        #[arg(long)]
        timeframe: Option<String>,
    },
    /// Warm up the simulator and print market stats for one symbol.
    Stats {
        /// Symbol to report on.
        #[arg(default_value = "EURUSD")]
        symbol: String,

        /// Master seed for the warm-up run.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Warm-up cycles before reporting.
        #[arg(long, default_value_t = 30)]
        cycles: u32,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            symbol,
            market,
            timeframe,
            cycles,
            seed,
            paper_trade,
            trade_amount,
            json,
        } => {
            let mut session = match config {
                Some(path) => SessionConfig::from_file(&path)?,
                None => SessionConfig::default(),
            };
            if !symbol.is_empty() {
                session.symbols = symbol;
            }
            if let Some(market) = market {
                session.market = market;
            }
            if let Some(timeframe) = timeframe {
                session.timeframe = timeframe;
            }
            if let Some(cycles) = cycles {
                session.cycles = cycles;
            }
            if let Some(seed) = seed {
                session.seed = seed;
            }
            if paper_trade {
                session.paper_trade = true;
            }
            if let Some(amount) = trade_amount {
                session.trade_amount = amount;
            }
            run_session(&session, json)
        }
        Commands::Strategies { market, timeframe } => run_strategies(market, timeframe),
        Commands::Stats {
            symbol,
            seed,
            cycles,
        } => run_stats(&symbol, seed, cycles),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_target(true)
        .with_level(true)
        .compact()
        .with_env_filter(filter)
        .init();
}

fn parse_market(name: &str) -> Result<Market> {
    Ok(match name {
        "forex" => Market::Forex,
        "crypto" => Market::Crypto,
        "stocks" => Market::Stocks,
        "indices" => Market::Indices,
        "commodities" => Market::Commodities,
        other => bail!("unknown market '{other}' (forex, crypto, stocks, indices, commodities)"),
    })
}

fn run_session(session: &SessionConfig, json: bool) -> Result<()> {
    if session.symbols.is_empty() {
        bail!("at least one symbol is required");
    }
    let market = parse_market(&session.market)?;
    let timeframe: Timeframe = session
        .timeframe
        .parse()
        .with_context(|| format!("invalid timeframe '{}'", session.timeframe))?;

    let universe: Vec<SymbolSpec> = session
        .symbols
        .iter()
        .map(|s| SymbolSpec::lookup(s))
        .collect();
    let mut sim = PriceSimulator::with_universe(session.seed, universe.clone());
    let mut snapshots = SnapshotGenerator::new(session.seed);
    let engine = StrategyEngine::new();
    let mut processor = SignalFusionProcessor::new();

    let mut broker = session
        .paper_trade
        .then(|| connect_demo_broker(session.seed))
        .transpose()?;

    let mut action_counts: Vec<(SignalAction, u32)> = Vec::new();
    let mut trades = 0u32;

    for cycle in 1..=session.cycles {
        sim.advance_cycle();

        for spec in &universe {
            let symbol = spec.symbol.as_str();
            let snapshot = snapshots.generate(symbol);
            let plan = engine.build_plan(market, symbol, timeframe, &snapshot);
            let tick = sim.latest_tick(symbol).cloned();
            let signal = processor.process_signal(symbol, &snapshot, plan.as_ref(), tick.as_ref());

            if json {
                println!("{}", serde_json::to_string(&signal)?);
            } else {
                println!(
                    "[cycle {cycle:3}] {symbol:<9} {price:>12.places$}  {action:<11} {strength:<9} confidence {confidence:5.1}  accuracy {accuracy:3.0}",
                    price = sim.current_price(symbol),
                    places = spec.decimal_places(),
                    action = signal.action.to_string(),
                    strength = signal.strength.to_string(),
                    confidence = signal.confidence,
                    accuracy = signal.accuracy,
                );
            }

            tally(&mut action_counts, signal.action);

            if let Some(broker) = broker.as_mut() {
                if let Some(side) = strong_side(signal.action) {
                    let request = TradeRequest {
                        symbol: symbol.to_string(),
                        action: side,
                        amount: session.trade_amount,
                        timeframe,
                        strategy_name: plan
                            .as_ref()
                            .map(|p| p.selection.strategy.name.clone())
                            .unwrap_or_else(|| "Unassisted".to_string()),
                    };
                    match broker.execute_trade(&request) {
                        Ok(receipt) => {
                            trades += 1;
                            println!(
                                "    -> trade {} {} {} @ {:.places$}, expires {}",
                                receipt.trade_id,
                                receipt.action,
                                receipt.symbol,
                                receipt.entry_price,
                                receipt.expiry.format("%H:%M:%S"),
                                places = spec.decimal_places(),
                            );
                        }
                        Err(err) => tracing::warn!(symbol, %err, "paper trade skipped"),
                    }
                }
            }
        }
    }

    println!();
    println!("Session complete: {} cycles over {} symbol(s)", session.cycles, universe.len());
    for (action, count) in &action_counts {
        println!("  {action:<11} {count}");
    }
    if let Some(broker) = &broker {
        let balance = broker.account_info().map_or(0.0, |a| a.balance);
        println!("  paper trades executed: {trades}, balance {balance:.2} USD");
    }

    Ok(())
}

fn connect_demo_broker(seed: u64) -> Result<PaperBroker> {
    let mut broker = PaperBroker::new(seed);
    let credentials = Credentials::new("demo-api-key-0000", "demo-secret-0000", "10000001");
    broker
        .connect(&credentials)
        .context("connecting paper broker")?;
    Ok(broker)
}

/// Map a fused verdict to a trade side; only STRONG verdicts trade.
fn strong_side(action: SignalAction) -> Option<TradeAction> {
    match action {
        SignalAction::StrongBuy => Some(TradeAction::Buy),
        SignalAction::StrongSell => Some(TradeAction::Sell),
        _ => None,
    }
}

fn tally(counts: &mut Vec<(SignalAction, u32)>, action: SignalAction) {
    match counts.iter_mut().find(|(a, _)| *a == action) {
        Some((_, count)) => *count += 1,
        None => counts.push((action, 1)),
    }
}

fn run_strategies(market: Option<String>, timeframe: Option<String>) -> Result<()> {
    let engine = StrategyEngine::new();
    let market = market.as_deref().map(parse_market).transpose()?;
    let timeframe: Option<Timeframe> = timeframe
        .as_deref()
        .map(|t| t.parse().with_context(|| format!("invalid timeframe '{t}'")))
        .transpose()?;

    for strategy in engine.catalog() {
        let market_ok = market.map_or(true, |m| strategy.markets.contains(&m));
        let timeframe_ok = timeframe.map_or(true, |t| strategy.timeframes.contains(&t));
        if !market_ok || !timeframe_ok {
            continue;
        }

        let timeframes: Vec<String> = strategy.timeframes.iter().map(|t| t.to_string()).collect();
        let markets: Vec<String> = strategy.markets.iter().map(|m| m.to_string()).collect();
        println!("{} ({:?} risk, {:.0}% win rate)", strategy.name, strategy.risk_level, strategy.win_rate * 100.0);
        println!("    {}", strategy.description);
        println!("    timeframes: {}  markets: {}", timeframes.join(", "), markets.join(", "));
        println!("    indicators: {}", strategy.indicators.join(", "));
    }

    Ok(())
}

fn run_stats(symbol: &str, seed: u64, cycles: u32) -> Result<()> {
    let spec = SymbolSpec::lookup(symbol);
    let places = spec.decimal_places();
    let mut sim = PriceSimulator::with_universe(seed, vec![spec]);
    for _ in 0..cycles {
        sim.advance_cycle();
    }

    let Some(stats) = sim.market_stats(symbol) else {
        bail!("not enough history for {symbol}; need at least 2 cycles");
    };

    println!("{symbol} after {cycles} cycles (seed {seed})");
    println!("  current     {:.places$}", stats.current);
    println!("  change      {:+.places$} ({:+.3}%)", stats.change, stats.change_percent);
    println!("  open        {:.places$}", stats.open);
    println!("  high / low  {:.places$} / {:.places$}", stats.day_high, stats.day_low);
    println!("  volume      {}", stats.volume);
    println!("  volatility  {:.6}", stats.volatility);
    println!("  trend       {:+.6}", stats.trend);
    println!("  sentiment   {:.3}", stats.sentiment);

    Ok(())
}
