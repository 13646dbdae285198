//! Find command - resolve a node name to its index

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Args;
use motclip::{ClipFile, LookupStrategy, PlaybackConfig};

/// Arguments for the find command
#[derive(Args)]
pub struct FindArgs {
    /// Clip file
    pub clip: PathBuf,

    /// Node name
    pub name: String,

    /// Playback config (TOML) selecting the lookup strategy
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Execute the find command
pub fn execute(args: FindArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => PlaybackConfig::load(path)?,
        None => PlaybackConfig::default(),
    };
    let file = ClipFile::load(&args.clip)?;
    let clip = file.clip();
    let strategy = config.lookup_strategy();

    match clip.find_node_with(&args.name, strategy) {
        Some(index) => {
            println!("{index}");
            Ok(())
        }
        None => bail!(
            "Node '{}' not found in {} ({})",
            args.name,
            args.clip.display(),
            strategy_name(strategy)
        ),
    }
}

fn strategy_name(strategy: LookupStrategy) -> String {
    match strategy {
        LookupStrategy::Auto { threshold } => format!("auto, threshold {threshold}"),
        LookupStrategy::Linear => "linear".to_string(),
        LookupStrategy::Hashed => "hashed".to_string(),
    }
}
