/// Pyra terminal demo
///
/// Renders the scene as colored ASCII.
/// Controls:
///   - Mouse: look around
///   - WASD / Arrow Keys: move
///   - Q/ESC: Quit
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use pyra_core::logging::{init_logging, LoggingConfig};
use pyra_core::{Config, Shape};
use pyra_terminal::TerminalApp;

#[derive(Debug, Parser)]
#[command(name = "pyra-terminal", version, about = "Fly around a pyramid in the terminal")]
struct Cli {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Mesh to render (pyramid or prism)
    #[arg(long)]
    shape: Option<Shape>,

    /// Horizontal field of view in degrees
    #[arg(long)]
    fov: Option<f32>,

    /// Log filter; logs go to stderr, so redirect it while rendering
    #[arg(long)]
    log: Option<String>,
}

fn run(cli: Cli) -> Result<()> {
    let mut config =
        Config::load_or_default(cli.config.as_deref()).context("could not load config")?;
    if let Some(shape) = cli.shape {
        config.scene.shape = shape;
    }
    if let Some(fov) = cli.fov {
        config.projection.fov_x = fov;
    }
    config.validate().context("invalid command line")?;

    init_logging(
        LoggingConfig::default()
            .with_filter(cli.log.or(config.log.clone()))
            .with_default_level(log::LevelFilter::Warn),
    );

    let mut app = TerminalApp::new(&config).context("could not query the terminal")?;
    app.run().context("terminal renderer failed")
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", fatal_message(&e));
            ExitCode::FAILURE
        }
    }
}

/// The one line printed on failure. Logging may not be up yet, so this goes
/// to stderr only.
fn fatal_message(e: &anyhow::Error) -> String {
    format!("FATAL ERROR: {e:#}")
}
