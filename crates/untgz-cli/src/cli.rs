//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "untgz")]
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
    /// Extract a .tgz package
    Extract(ExtractArgs),
    /// List package contents without extraction
    List(ListArgs),
    /// Generate shell completions
    Completion(CompletionArgs),
}

impl Commands {
    /// Operation name used in structured output.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Extract(_) => "extract",
            Self::List(_) => "list",
            Self::Completion(_) => "completion",
        }
    }
}

#[derive(clap::Args)]
pub struct ExtractArgs {
    /// Path to the .tgz file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Destination directory, created if missing (default: current directory)
    #[arg(value_name = "DEST")]
    pub output_dir: Option<PathBuf>,

    /// Name of the package subdirectory reported on success
    #[arg(long, value_name = "NAME", default_value = untgz_core::config::DEFAULT_PACKAGE_DIR)]
    pub package_dir: String,

    /// Skip the validation pass that runs before anything is written
    #[arg(long)]
    pub no_verify: bool,

    /// Remove files and directories created by a failed extraction
    #[arg(long)]
    pub cleanup_on_failure: bool,

    /// Replace files that are in the way of directories
    #[arg(long)]
    pub replace_conflicting_files: bool,
}

#[derive(clap::Args)]
pub struct ListArgs {
    /// Path to the .tgz file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Show entry kind and size
    #[arg(short, long)]
    pub long: bool,

    /// Show sizes in human-readable format
    #[arg(short = 'H', long)]
    pub human_readable: bool,
}

#[derive(clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}
