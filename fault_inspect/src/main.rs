//! # Fault Inspector
//!
//! Reads the fault record left behind by a halted device (or process),
//! prints it in the same layout as the text reporter, and optionally clears
//! it so the next fault starts from a clean slate.
//!
//! # Usage
//!
//! ```bash
//! # Record path from the reporter's config
//! fault_inspect --config /etc/fault/fault.toml
//!
//! # Explicit record file, erase after printing
//! fault_inspect --store /var/lib/fault/record.bin --clear
//!
//! # Verbose JSON logs
//! fault_inspect -v --json
//! ```

mod inspect;

use clap::Parser;
use fault_common::config::{load_fault_config, FaultConfig};
use fault_common::consts::DEFAULT_STORE_PATH;
use std::io;
use std::path::PathBuf;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

/// Fault Inspector - print and clear persisted fault records
#[derive(Parser, Debug)]
#[command(name = "fault_inspect")]
#[command(version)]
#[command(about = "Post-mortem inspector for persisted fault records")]
#[command(long_about = None)]
struct Args {
    /// Fault reporter configuration (fault.toml); supplies the record path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Record file to inspect; overrides the config
    #[arg(short, long, value_name = "FILE")]
    store: Option<PathBuf>,

    /// Erase the record after printing it
    #[arg(long)]
    clear: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json: bool,
}

fn main() {
    if let Err(e) = run() {
        error!("Fault inspection failed: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = args
        .config
        .as_deref()
        .map(load_fault_config)
        .transpose();
    setup_tracing(&args, config.as_ref().ok().and_then(Option::as_ref));
    let config = config?;

    let path = match (&args.store, &config) {
        (Some(path), _) => path.clone(),
        (None, Some(config)) => config.store.record_path().to_path_buf(),
        (None, None) => PathBuf::from(DEFAULT_STORE_PATH),
    };
    info!("Inspecting fault record {}", path.display());

    let stdout = io::stdout();
    inspect::inspect(&mut stdout.lock(), &path, args.clear)?;
    Ok(())
}

/// Setup tracing subscriber from CLI arguments and the configured level.
fn setup_tracing(args: &Args, config: Option<&FaultConfig>) {
    let level = if args.verbose {
        Level::DEBUG
    } else {
        config.map_or(Level::INFO, |c| c.shared.log_level.into())
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }
}
