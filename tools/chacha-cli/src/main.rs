//! Chacha Photobooth CLI — shoot a three-photo strip from the webcam.
//!
//! Usage:
//!   chacha shoot [OPTIONS]          Run an interactive capture session
//!   chacha compose <IMAGES>...      Build a strip from existing photos
//!   chacha check                    Check camera, assets, and fonts
//!   chacha config [--init]          Show or initialize the configuration

use std::path::PathBuf;

use chacha_common::config::AppConfig;
use clap::{Parser, Subcommand};

mod commands;
mod terminal;

#[derive(Parser)]
#[command(
    name = "chacha",
    about = "Three-shot webcam photobooth that prints a dated photo strip",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use this config file instead of the standard location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an interactive capture session and export the strip
    Shoot {
        /// Strip theme: pink or blue
        #[arg(short, long)]
        theme: Option<String>,

        /// Directory to write the strip into
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Capture device (e.g. /dev/video2)
        #[arg(long)]
        device: Option<String>,

        /// Countdown length in seconds
        #[arg(long)]
        countdown: Option<u32>,

        /// Use these images as camera frames instead of the webcam
        #[arg(long, num_args = 1..)]
        from_files: Vec<PathBuf>,

        /// Fire every shot without waiting for Enter
        #[arg(long)]
        auto: bool,

        /// Don't open the live preview window
        #[arg(long)]
        no_preview: bool,
    },

    /// Build a strip from existing photo files (first three are used)
    Compose {
        /// Photo files in slot order
        #[arg(required = true)]
        images: Vec<PathBuf>,

        /// Strip theme: pink or blue
        #[arg(short, long)]
        theme: Option<String>,

        /// Directory to write the strip into
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Date to stamp (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },

    /// Check camera, overlay assets, and stamp font
    Check,

    /// Show the effective configuration
    Config {
        /// Write the default configuration to the config file
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    };
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    chacha_common::logging::init_logging(&config.logging);

    match cli.command {
        Commands::Shoot {
            theme,
            output,
            device,
            countdown,
            from_files,
            auto,
            no_preview,
        } => {
            commands::shoot::run(
                config,
                commands::shoot::ShootOptions {
                    theme,
                    output,
                    device,
                    countdown,
                    from_files,
                    auto,
                    no_preview,
                },
            )
            .await
        }
        Commands::Compose {
            images,
            theme,
            output,
            date,
        } => commands::compose::run(config, images, theme, output, date).await,
        Commands::Check => commands::check::run(&config).await,
        Commands::Config { init } => commands::config::run(&config, cli.config, init),
    }
}
