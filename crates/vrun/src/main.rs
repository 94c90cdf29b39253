//! vrun CLI

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, Level};
use tracing_subscriber::EnvFilter;
use vrun::{Chain, Command, Config, CHAIN_ENV, DEFAULT_DB_DIR, VRUN_DB_ENV};

/// Validator key runner
#[derive(Parser)]
#[command(name = "vrun")]
#[command(version)]
#[command(about = "Derive, track and export validator keys", long_about = None)]
#[command(propagate_version = true)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// Chain id or name (1|mainnet|17000|holesky)
    #[arg(long, global = true, env = CHAIN_ENV, default_value = "mainnet")]
    chain: Chain,

    /// Database root directory
    #[arg(long, global = true, env = VRUN_DB_ENV, default_value = DEFAULT_DB_DIR)]
    db: PathBuf,

    /// The logging level (trace|debug|info|warn|error)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// The logging format (json|plain)
    #[arg(long, global = true, default_value = "plain")]
    log_format: String,

    /// Disable colored logs
    #[arg(long, global = true, default_value = "false")]
    log_no_color: bool,

    /// Print out full error chain on failure
    #[arg(long, global = true, default_value = "false")]
    trace: bool,

    #[command(subcommand)]
    command: Command,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.log_level, &cli.log_format, cli.log_no_color);

    let config = Config::new(cli.chain, cli.db);
    debug!(chain = %config.chain, db = %config.db_root.display(), "loaded config");

    if let Err(e) = vrun::execute(&config, cli.command) {
        if cli.trace {
            eprintln!("Error: {:?}", e);
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }

    Ok(())
}

/// Logs go to stderr so stdout carries only command output
fn init_tracing(log_level: &str, log_format: &str, no_color: bool) {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_ansi(!no_color);

    match log_format {
        "json" => subscriber.json().init(),
        _ => subscriber.init(),
    }
}
