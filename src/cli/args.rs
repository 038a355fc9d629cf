use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "wpuq-pipeline")]
#[command(about = "WPuQ energy metering data pipeline orchestrator")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the yearly processing pipeline for the configured site
    Run {
        #[arg(short, long, help = "Pipeline configuration file (TOML)")]
        config: Option<PathBuf>,

        #[arg(long, help = "Override the configured site")]
        site: Option<String>,

        #[arg(
            long,
            value_delimiter = ',',
            help = "Override the configured years (comma separated)"
        )]
        years: Option<Vec<i32>>,
    },

    /// Copy the archived processed artifacts for a single year
    CopyArchive {
        #[arg(short, long, help = "Pipeline configuration file (TOML)")]
        config: Option<PathBuf>,

        #[arg(short, long)]
        year: i32,
    },

    /// Render the cross-year data-quality plots
    Quality {
        #[arg(short, long, help = "Pipeline configuration file (TOML)")]
        config: Option<PathBuf>,
    },

    /// Display the effective configuration and artifact set
    Info {
        #[arg(short, long, help = "Pipeline configuration file (TOML)")]
        config: Option<PathBuf>,
    },
}
