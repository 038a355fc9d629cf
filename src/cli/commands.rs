use std::fs::File;
use std::sync::Arc;

use chrono::Local;
use tracing_subscriber::EnvFilter;

use crate::archive::ArchiveCopier;
use crate::cli::args::{Cli, Commands};
use crate::collaborators::PythonToolchain;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::models::ProcessedArtifact;
use crate::pipeline::Pipeline;
use crate::utils::progress::ProgressReporter;

pub async fn run(cli: Cli) -> Result<()> {
    init_logging(&cli)?;

    match cli.command {
        Commands::Run {
            config,
            site,
            years,
        } => {
            let mut config = PipelineConfig::load(config.as_deref())?;
            if let Some(site) = site {
                config.site = site;
            }
            if let Some(years) = years {
                config.years = years;
            }
            config.ensure_valid()?;

            println!(
                "{} WPuQ dataprocessing for {} {:?}",
                Local::now().format("%m/%d/%Y, %H:%M:%S"),
                config.site,
                config.years
            );

            let toolchain = PythonToolchain::new(&config.toolchain.python);
            let mut pipeline = Pipeline::new(
                toolchain.collector(),
                toolchain.processor(),
                toolchain.plotter(),
            );

            let progress =
                ProgressReporter::new(config.years.len() as u64, "Processing years...", false);
            let summary = pipeline.run(&config, Some(&progress))?;
            progress.finish_with_message("Pipeline complete");

            println!("\n{}", summary);
        }

        Commands::CopyArchive { config, year } => {
            let config = PipelineConfig::load(config.as_deref())?;
            let copier = ArchiveCopier::new(config.resolved_archive_dir());
            let copied = copier.copy_processed_data(year, &config.year_folder(year))?;
            println!(
                "Copied {} artifacts into {}",
                copied,
                config.resampled_dir(year).display()
            );
        }

        Commands::Quality { config } => {
            let config = PipelineConfig::load(config.as_deref())?;
            let toolchain = PythonToolchain::new(&config.toolchain.python);
            let mut pipeline = Pipeline::new(
                toolchain.collector(),
                toolchain.processor(),
                toolchain.plotter(),
            );
            let plots = pipeline.plot_data_quality(&config)?;
            println!(
                "Rendered {} data-quality plots into {}",
                plots,
                config.folder_base.display()
            );
        }

        Commands::Info { config } => {
            let config = PipelineConfig::load(config.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&config)?);
            println!("\nArchive artifacts per year:");
            for artifact in ProcessedArtifact::ALL {
                println!("  {}", artifact.file_name());
            }
        }
    }

    Ok(())
}

fn init_logging(cli: &Cli) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "debug" } else { "info" }));

    match &cli.log_file {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Arc::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
        }
    }
    Ok(())
}
