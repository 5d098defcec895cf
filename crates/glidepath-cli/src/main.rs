use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use glidepath_core::{AppConfig, Point, SizePreset};

mod commands;

#[derive(Parser)]
#[command(name = "glidepath")]
#[command(author, version, about = "Pointer-tracked, scroll-synchronized step guide")]
struct Cli {
    /// Use this config file instead of ~/.config/glidepath/config.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the terminal demo
    Run,
    /// Print the guide state at a scroll fraction
    Inspect {
        /// Scroll fraction in [0, 1]; omitted means no scroll source
        #[arg(short, long, allow_hyphen_values = true)]
        fraction: Option<f64>,
        /// Print the snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compute a pointer offset and its smoothed trajectory
    Track {
        /// Anchor center as X,Y
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        anchor: Point,
        /// Pointer position as X,Y
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        pointer: Point,
        /// Size preset selecting the deflection radius
        #[arg(long, default_value_t = SizePreset::Md)]
        size: SizePreset,
        /// Override the preset's deflection radius
        #[arg(long)]
        max_deflection: Option<f64>,
        /// Number of frames to simulate
        #[arg(long, default_value_t = 0)]
        frames: usize,
        /// Frame duration in milliseconds
        #[arg(long, default_value_t = 16)]
        dt_ms: u64,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the effective configuration
    Config {
        /// Write the default configuration if no file exists yet
        #[arg(long)]
        init: bool,
    },
}

/// Parse "X,Y" into a point
fn parse_point(s: &str) -> std::result::Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{}'", s))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("invalid x '{}': {}", x, e))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("invalid y '{}': {}", y, e))?;
    let point = Point::new(x, y);
    if !point.is_finite() {
        return Err(format!("coordinates must be finite, got '{}'", s));
    }
    Ok(point)
}

/// Install the tracing subscriber; the TUI logs to a file so it never draws over the screen
fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if to_file {
        let log_path = config.log_path();
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&log_path)?;
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_path = cli.config.unwrap_or_else(AppConfig::config_path);
    let config = Arc::new(AppConfig::load_from(&config_path)?);

    let tui = matches!(cli.command, Some(Commands::Run) | None);
    init_logging(&config, tui)?;

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config),
        Some(Commands::Inspect { fraction, json }) => {
            commands::inspect::run(&config, fraction, json)
        }
        Some(Commands::Track {
            anchor,
            pointer,
            size,
            max_deflection,
            frames,
            dt_ms,
            json,
        }) => commands::track::run(
            &config,
            commands::track::TrackArgs {
                anchor,
                pointer,
                size,
                max_deflection,
                frames,
                dt_ms,
                json,
            },
        ),
        Some(Commands::Config { init }) => commands::config::run(&config, &config_path, init),
    }
}
