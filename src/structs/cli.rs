use std::path::PathBuf;
use clap::Parser;
use crate::enums::commands::Commands;

#[derive(Parser, Debug)]
#[clap(name = "sonar-analyzer")]
#[clap(about = "Analyzes Sonar issues with an Ollama model", long_about = None)]
pub struct Cli {
    /// Path to config.toml (defaults to ~/sonar-analyzer/config.toml)
    #[clap(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Commands,
}
