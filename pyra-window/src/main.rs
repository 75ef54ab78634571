/// Pyra window demo
///
/// Controls:
///   - Mouse: look around
///   - W/A/S/D: move
///   - Esc: quit
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use pyra_core::logging::{init_logging, LoggingConfig};
use pyra_core::{Config, Shape};

#[derive(Debug, Parser)]
#[command(name = "pyra-window", version, about = "Fly around a pyramid rendered with wgpu")]
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

    /// Log filter, e.g. "debug" or "pyra_window=trace,wgpu=warn"
    #[arg(long)]
    log: Option<String>,

    /// Print the effective config as TOML and exit
    #[arg(long)]
    dump_config: bool,
}

impl Cli {
    fn resolve_config(&self) -> Result<Config> {
        let mut config =
            Config::load_or_default(self.config.as_deref()).context("could not load config")?;

        if let Some(shape) = self.shape {
            config.scene.shape = shape;
        }
        if let Some(fov) = self.fov {
            config.projection.fov_x = fov;
        }
        if let Some(filter) = &self.log {
            config.log = Some(filter.clone());
        }

        config.validate().context("invalid command line")?;
        Ok(config)
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.resolve_config()?;

    if cli.dump_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    init_logging(LoggingConfig::default().with_filter(config.log.clone()));
    log::info!("starting pyra-window");

    pyra_window::run(&config)
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
