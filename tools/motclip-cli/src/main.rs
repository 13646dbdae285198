//! motclip - inspect, evaluate and generate motion clip files
//!
//! # Commands
//!
//! - `motclip info` - Print the header and a per-node track summary
//! - `motclip find` - Resolve a node name to its index
//! - `motclip eval` - Evaluate a node's pose at a (fractional) frame
//! - `motclip generate` - Write a synthetic looping clip
//!
//! # Usage
//!
//! ```bash
//! motclip generate wave.mclp --nodes 4 --frames 60
//! motclip info wave.mclp
//! motclip eval wave.mclp node_1 12.5 --degrees
//! RUST_LOG=debug motclip find wave.mclp node_3
//! ```

mod eval;
mod find;
mod generate;
mod info;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// motclip - motion clip inspection tool
#[derive(Parser)]
#[command(name = "motclip")]
#[command(about = "Inspect, evaluate and generate motion clip files")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the clip header and per-node track summary
    Info(info::InfoArgs),

    /// Resolve a node name to its index
    Find(find::FindArgs),

    /// Evaluate a node's pose at a frame
    Eval(eval::EvalArgs),

    /// Write a synthetic looping clip
    Generate(generate::GenerateArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Info(args) => info::execute(args),
        Commands::Find(args) => find::execute(args),
        Commands::Eval(args) => eval::execute(args),
        Commands::Generate(args) => generate::execute(args),
    }
}
