//! Command line interface.

use std::path::PathBuf;

use clap::Parser;

/// Mirror fixed regions of a window onto a click-through, always-on-top overlay
#[derive(Debug, Parser)]
#[command(name = "area-mirror", version)]
pub struct Cli {
    /// Substring of the target window's title (case-sensitive)
    pub title: String,

    /// Configuration file (default: ~/.config/area-mirror/config.toml)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Exit if the target window does not exist at startup
    #[arg(long)]
    pub fail_fast: bool,

    /// Log discovery and geometry changes
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Default tracing filter when RUST_LOG is unset
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "area_mirror=debug,info"
        } else {
            "area_mirror=info,warn"
        }
    }
}
