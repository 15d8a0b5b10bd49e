use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use taskdeck_core::AppConfig;

mod commands;

use commands::simulate::{AxisArg, SimulateParams};

#[derive(Parser)]
#[command(name = "taskdeck")]
#[command(author, version, about = "A drag-scrolling user deck for the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI
    Run,
    /// Replay a fling through the scroll engine and print the trajectory as JSON
    Simulate {
        /// Release velocity in units per millisecond
        #[arg(short = 'v', long, allow_hyphen_values = true)]
        velocity: f64,
        /// Scroll axis
        #[arg(short = 'a', long, value_enum, default_value_t = AxisArg::Horizontal)]
        axis: AxisArg,
        /// Viewport length along the axis
        #[arg(long, default_value_t = 300.0)]
        viewport: f64,
        /// Content length along the axis
        #[arg(long, default_value_t = 1000.0)]
        content: f64,
        /// Offset before the fling
        #[arg(long, default_value_t = 350.0)]
        start: f64,
        /// Disable wrap-around at the extremes
        #[arg(long)]
        no_wrap: bool,
    },
    /// Print the effective configuration as TOML
    Config {
        /// Write the configuration file if it does not exist yet
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Arc::new(AppConfig::load()?);

    match cli.command {
        Some(Commands::Run) | None => {
            // The TUI owns the terminal, so it logs to a file instead
            commands::run::run(config).await
        }
        Some(Commands::Simulate {
            velocity,
            axis,
            viewport,
            content,
            start,
            no_wrap,
        }) => {
            init_stderr_logging(&config);
            let params = SimulateParams {
                velocity,
                axis,
                viewport,
                content,
                start,
                wrap: !no_wrap,
            };
            commands::simulate::run(&config, &params)
        }
        Some(Commands::Config { init }) => {
            init_stderr_logging(&config);
            commands::config::run(&config, init)
        }
    }
}

fn init_stderr_logging(config: &AppConfig) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
