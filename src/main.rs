//! Command-line interface for specimen
//!
//! # Usage Examples
//!
//! ## Populate
//! ```bash
//! # One random Person as JSON
//! specimen populate --types catalog.yaml --type Person
//!
//! # Ten reproducible orders, small collections, YAML output
//! specimen populate --types catalog.yaml --type Order --count 10 \
//!   --seed 42 --min-collection-size 1 --max-collection-size 3 \
//!   --format yaml
//!
//! # Resolve interfaces to concrete types, skip a field
//! specimen populate --types catalog.yaml --type Shape \
//!   --scan-concrete-types --exclude Circle.radius
//! ```
//!
//! ## Check
//! ```bash
//! specimen check --types catalog.yaml
//! ```
//!
//! Set `RUST_LOG=debug` to trace the engine's decisions.

use clap::{Parser, Subcommand};
use specimen::{run_check, run_populate, PopulateArgs};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "specimen")]
#[command(about = "Populate arbitrary types with random values")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate random values of a type
    Populate(PopulateArgs),

    /// Validate a type catalog and list its types
    Check {
        /// Type catalog (YAML)
        #[arg(long, value_name = "PATH")]
        types: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let output = match cli.command {
        Commands::Populate(args) => run_populate(&args)?,
        Commands::Check { types } => run_check(&types)?,
    };
    println!("{output}");

    Ok(())
}
