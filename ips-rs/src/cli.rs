//! Root CLI structure for ips-rs

use clap::{Args, Parser, Subcommand};
use ips_patch::PatchLimits;
use ips_patch::limits::{DEFAULT_MAX_PATCH_SIZE, DEFAULT_MAX_TARGET_SIZE};

#[derive(Parser)]
#[command(name = "ips-rs")]
#[command(about = "Command-line tools for IPS binary patches", long_about = None)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Apply an IPS patch to a target file
    Apply {
        /// File to patch (left untouched)
        target: std::path::PathBuf,

        /// IPS patch file
        patch: std::path::PathBuf,

        /// Where to write the patched file (default: <target>.patched.<ext>)
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,

        /// Overwrite the output file if it exists
        #[arg(short, long)]
        force: bool,

        #[command(flatten)]
        limits: LimitArgs,
    },

    /// Display information about an IPS patch
    Info {
        /// IPS patch file
        patch: std::path::PathBuf,

        /// List every record
        #[arg(long)]
        records: bool,

        #[command(flatten)]
        limits: LimitArgs,
    },

    /// Check an IPS patch without applying it
    Validate {
        /// IPS patch file
        patch: std::path::PathBuf,

        /// Also check record ranges against this target file
        #[arg(long, value_name = "FILE")]
        target: Option<std::path::PathBuf>,

        #[command(flatten)]
        limits: LimitArgs,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Size limit overrides shared by commands that read patches
#[derive(Args, Debug, Clone, Copy)]
pub struct LimitArgs {
    /// Reject patches of this many bytes or more
    #[arg(long, value_name = "BYTES", env = "IPS_MAX_PATCH_SIZE", default_value_t = DEFAULT_MAX_PATCH_SIZE)]
    pub max_patch_size: usize,

    /// Reject targets of this many bytes or more
    #[arg(long, value_name = "BYTES", env = "IPS_MAX_TARGET_SIZE", default_value_t = DEFAULT_MAX_TARGET_SIZE)]
    pub max_target_size: usize,
}

impl From<LimitArgs> for PatchLimits {
    fn from(args: LimitArgs) -> Self {
        Self::default()
            .with_max_patch_size(args.max_patch_size)
            .with_max_target_size(args.max_target_size)
    }
}
