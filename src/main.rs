//! area-mirror
//!
//! Picture-in-picture overlay for X11: finds a window by title and keeps
//! copying a few fixed regions of it onto a transparent, click-through,
//! always-on-top surface that follows the window around the screen.

mod cli;
mod compositor;
mod config;
mod error;
mod geometry;
mod locator;
mod mirror;
mod overlay;
mod protocol;
mod region;
#[cfg(test)]
mod testing;
mod tracker;
mod x11;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::Cli;
use config::Config;
use mirror::Mirror;
use x11::X11Display;

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            std::process::exit(1);
        }
        Err(e) => e.exit(),
    };

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| cli.log_filter().into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting area-mirror for '{}'", cli.title);

    let config = Config::load(cli.config.as_deref())
        .context("Failed to load configuration")?;

    let display = X11Display::connect()
        .context("Failed to connect to X server")?;

    let overlay = display
        .create_overlay()
        .context("Failed to create overlay window")?;

    let mut mirror = Mirror::new(
        display,
        overlay,
        cli.title,
        config.regions,
        config.mirror.timing(),
    )
    .fail_fast(cli.fail_fast || config.mirror.fail_fast);

    mirror.run()?;
    Ok(())
}
