use std::path::Path;

use tracing::info;

use crate::archive::ArchiveCopier;
use crate::collaborators::{CollectionRequest, DataCollector, DataProcessor, ReportPlotter};
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::models::{Feed, Language, QuantityKind, SeasonalCurveOptions};
use crate::pipeline::RunSummary;
use crate::utils::constants::{RESAMPLED_DIR, VALIDATION_DIR};
use crate::utils::filename;
use crate::utils::progress::ProgressReporter;

/// Drives the yearly processing sequence against the three collaborators.
///
/// The runner owns the control flow only; data acquisition, aggregation and
/// rendering happen behind the collaborator traits.
pub struct Pipeline<C, P, R> {
    collector: C,
    processor: P,
    plotter: R,
}

impl<C, P, R> Pipeline<C, P, R>
where
    C: DataCollector,
    P: DataProcessor,
    R: ReportPlotter,
{
    pub fn new(collector: C, processor: P, plotter: R) -> Self {
        Self {
            collector,
            processor,
            plotter,
        }
    }

    /// Run the year loop and, when configured for a recompute of the
    /// reference site, the cross-year quality pass.
    pub fn run(
        &mut self,
        config: &PipelineConfig,
        progress: Option<&ProgressReporter>,
    ) -> Result<RunSummary> {
        config.ensure_valid()?;
        let corrections = config.site_corrections()?;
        let copier = ArchiveCopier::new(config.resolved_archive_dir());
        let mut summary = RunSummary::default();

        for &year in &config.years {
            info!(year, site = %config.site, "starting yearly processing");
            if let Some(progress) = progress {
                progress.set_message(&format!("Processing {} {}", config.site, year));
            }
            let folder = config.year_folder(year);

            // raw download works only with an access key
            if config.api_key.is_some() {
                self.collector.get_objects(&config.site)?;
                self.collector
                    .get_data(&CollectionRequest::for_year(year, corrections.collector))?;
            }

            if config.archive_available {
                summary.artifacts_copied += copier.copy_processed_data(year, &folder)?;
            } else {
                self.processor.get_pv_objects(&config.site)?;
                self.processor
                    .aggregate_temporal(&folder, &corrections.processor)?;
                if !config.is_reference_site() {
                    // consistency proving, heating rod detection and spatial
                    // aggregation exist only for the reference site; its
                    // report plots are skipped along with them
                    summary.years_skipped += 1;
                    if let Some(progress) = progress {
                        progress.increment(1);
                    }
                    continue;
                }
                self.processor
                    .prove_consistency(&folder, &corrections.processor)?;
                self.processor
                    .detect_heating_rod_operation(&folder, &folder.join(VALIDATION_DIR))?;
                self.processor.aggregate_spatial(&folder)?;
            }

            summary.report_plots += self.plot_year(config, year, &folder)?;
            summary.years_processed += 1;
            if let Some(progress) = progress {
                progress.increment(1);
            }
        }

        if config.is_reference_site() && !config.archive_available {
            summary.quality_plots += self.plot_data_quality(config)?;
        }

        Ok(summary)
    }

    /// The fixed report sequence for one prepared year.
    fn plot_year(&mut self, config: &PipelineConfig, year: i32, folder: &Path) -> Result<usize> {
        let resampled = folder.join(RESAMPLED_DIR);
        let mut plots = 0;

        self.plotter.get_pv_objects(&config.site)?;

        for feed in Feed::BOTH {
            self.plotter
                .plot_seasonal_load_curves(&resampled, &SeasonalCurveOptions::report_defaults(feed))?;
            plots += 1;
        }

        self.plotter.plot_annual_consumption_household(
            folder,
            &filename::household_report(&config.folder_base, year),
        )?;
        plots += 1;

        let method = config.heat_pump_threshold;
        self.plotter.plot_annual_consumption_heat_pump(
            &resampled,
            &method,
            Language::English,
            &filename::heat_pump_report(&config.folder_base, year, &method),
        )?;
        plots += 1;

        for language in Language::ALL {
            self.plotter.plot_daily(
                &resampled,
                language,
                language.daily_y_max(),
                &filename::daily_report(&config.folder_base, year, language),
            )?;
            plots += 1;
        }

        Ok(plots)
    }

    /// Cross-year data-quality pass over every quantity and feed combination.
    pub fn plot_data_quality(&mut self, config: &PipelineConfig) -> Result<usize> {
        let mut plots = 0;
        for quantity in QuantityKind::BOTH {
            for feed in Feed::BOTH {
                info!(%quantity, %feed, "rendering data-quality plot");
                self.plotter.plot_data_quality(
                    &config.folder_base,
                    &config.site,
                    &config.years,
                    feed,
                    quantity,
                    &config.folder_base,
                )?;
                plots += 1;
            }
        }
        Ok(plots)
    }
}
