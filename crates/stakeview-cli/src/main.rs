//! Stakeview CLI
//!
//! Command-line interface for watching a staking protocol's derived
//! dashboard figures.

use anyhow::Result;
use clap::{Parser, Subcommand};
use stakeview_economics::{AprCurve, UnitConverter, DECIMALS};
use stakeview_service::{
    DashboardSnapshot, RefreshEngine, RefreshEvent, ServiceConfig, SimulatedProvider,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "stakeview")]
#[command(version = "0.1.0")]
#[command(about = "Stakeview - staking protocol dashboard", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Watch protocol and user state on a fixed cadence
    Watch {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Poll interval in seconds
        #[arg(short, long)]
        interval: Option<u64>,

        /// Address whose staking data to watch
        #[arg(short, long)]
        address: Option<String>,

        /// Emit snapshots as JSON lines instead of text
        #[arg(long)]
        json: bool,

        /// Simulation seed
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Print the current APR for a given pool size
    Apr {
        /// Total staked, in whole tokens
        total_staked: String,
    },

    /// Version information
    Version,
}

fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_file(false),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Watch {
            config,
            interval,
            address,
            json,
            seed,
        } => watch(config, interval, address, json, seed).await,
        Commands::Apr { total_staked } => print_apr(&total_staked),
        Commands::Version => {
            println!("stakeview {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

async fn watch(
    config_path: Option<PathBuf>,
    interval: Option<u64>,
    address: Option<String>,
    json: bool,
    seed: u64,
) -> Result<()> {
    let mut config = ServiceConfig::load(config_path.as_deref())?;
    if let Some(interval) = interval {
        config.refresh.interval_secs = interval;
    }
    if address.is_some() {
        config.refresh.watch_address = address;
    }
    if config.refresh.watch_address.is_none() {
        config.refresh.watch_address = Some("demo".to_string());
    }

    let provider = Arc::new(SimulatedProvider::new(seed, chrono::Utc::now().timestamp()));
    let engine = Arc::new(RefreshEngine::new(
        config.refresh.clone(),
        provider.clone(),
        provider,
    ));

    let mut events = engine.subscribe();
    let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

    let runner = {
        let engine = engine.clone();
        tokio::spawn(async move { engine.run(shutdown_rx).await })
    };

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                let _ = shutdown_tx.send(()).await;
                break;
            }
            event = events.recv() => match event {
                Ok(RefreshEvent::SnapshotReady { .. }) => {
                    if let Some(snapshot) = engine.latest() {
                        if json {
                            println!("{}", serde_json::to_string(&snapshot)?);
                        } else {
                            print_snapshot(&snapshot);
                        }
                    }
                }
                Ok(RefreshEvent::RefreshFailed { seq, error }) => {
                    error!("refresh #{} failed: {}", seq, error);
                }
                Err(_) => break,
            }
        }
    }

    runner.await?;
    Ok(())
}

fn print_snapshot(snapshot: &DashboardSnapshot) {
    println!("── snapshot #{} ──", snapshot.seq);
    println!("  TVL:           {}", snapshot.protocol.total_staked_display);
    println!("  Current APR:   {}", snapshot.protocol.current_apr_display);
    println!(
        "  Total rewards: {} (incl. claimed: {})",
        snapshot.protocol.total_rewards_display, snapshot.protocol.combined_rewards_display
    );

    if let Some(user) = &snapshot.user {
        println!("  Staked:        {} {}", user.staked_amount_display, user.token_symbol);
        println!("  Pending:       {} {}", user.pending_rewards_display, user.token_symbol);
        println!("  Balance:       {} {}", user.balance_display, user.token_symbol);
        println!("  Unlock:        {}", user.time_until_unlock_display);
    }
}

fn print_apr(total_staked: &str) -> Result<()> {
    let raw = UnitConverter::from_display(total_staked, DECIMALS)?;
    let rate = AprCurve::current_apr(raw);

    println!(
        "{} tokens staked -> {}",
        total_staked,
        UnitConverter::format_percentage(rate, 1)
    );
    Ok(())
}
