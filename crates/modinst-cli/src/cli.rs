//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "modinst")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Install unit tarballs into a destination directory
    Install(InstallArgs),
    /// Check unit tarballs for unsafe paths without installing
    Check(CheckArgs),
    /// Generate shell completions
    Completion(CompletionArgs),
}

#[derive(clap::Args)]
pub struct InstallArgs {
    /// Destination directory units are installed into
    #[arg(value_name = "DEST")]
    pub destination: PathBuf,

    /// Unit tarballs to install (unit keys derive from file names)
    #[arg(value_name = "ARCHIVE", required_unless_present = "manifest")]
    pub archives: Vec<PathBuf>,

    /// JSON manifest of units: [{"unit_key": {...}, "storage_path": "..."}]
    #[arg(long, value_name = "FILE", conflicts_with = "archives")]
    pub manifest: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct CheckArgs {
    /// Destination directory to check containment against
    #[arg(value_name = "DEST")]
    pub destination: PathBuf,

    /// Unit tarballs to check
    #[arg(value_name = "ARCHIVE", required = true)]
    pub archives: Vec<PathBuf>,
}

#[derive(clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}
