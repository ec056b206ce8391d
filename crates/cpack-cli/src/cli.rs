use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "cpack",
    about = "Extract and build compendium packs",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// TOML file with pack storage settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Fail on unresolved embedded references instead of dropping them
    #[arg(long, global = true)]
    pub strict: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Read every pack in a manifest into JSON files
    Extract(ExtractArgs),
    /// Rebuild every pack in a manifest from extracted JSON files
    Build(BuildArgs),
}

#[derive(Args)]
pub struct ExtractArgs {
    /// Path to module.json
    pub manifest: PathBuf,
    /// Output directory for extracted JSON
    pub out: PathBuf,
}

#[derive(Args)]
pub struct BuildArgs {
    /// Path to module.json
    pub manifest: PathBuf,
    /// Directory holding extracted JSON
    pub extracted: PathBuf,
}
