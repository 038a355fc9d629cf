use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use wpuq_pipeline::collaborators::{
    CollectionRequest, DataCollector, DataProcessor, ReportPlotter,
};
use wpuq_pipeline::config::PipelineConfig;
use wpuq_pipeline::error::{PipelineError, Result};
use wpuq_pipeline::models::{
    CorrectionFlags, Feed, Language, OperationThreshold, ProcessedArtifact, QuantityKind,
    SeasonalCurveOptions,
};
use wpuq_pipeline::pipeline::Pipeline;

type CallLog = Rc<RefCell<Vec<String>>>;

fn file_name(path: &Path) -> String {
    path.file_name().unwrap().to_string_lossy().into_owned()
}

struct RecordingCollector {
    log: CallLog,
}

impl DataCollector for RecordingCollector {
    fn get_objects(&mut self, site: &str) -> Result<()> {
        self.log.borrow_mut().push(format!("get_objects {}", site));
        Ok(())
    }

    fn get_data(&mut self, request: &CollectionRequest) -> Result<()> {
        self.log.borrow_mut().push(format!(
            "get_data {} {} interval={} weather={}",
            request.start_month, request.end_month, request.time_interval, request.weather_data
        ));
        Ok(())
    }
}

struct RecordingProcessor {
    log: CallLog,
}

impl DataProcessor for RecordingProcessor {
    fn get_pv_objects(&mut self, site: &str) -> Result<()> {
        self.log
            .borrow_mut()
            .push(format!("get_pv_objects {}", site));
        Ok(())
    }

    fn aggregate_temporal(&mut self, folder: &Path, _corrections: &CorrectionFlags) -> Result<()> {
        self.log
            .borrow_mut()
            .push(format!("aggregate_temporal {}", file_name(folder)));
        Ok(())
    }

    fn prove_consistency(&mut self, folder: &Path, _corrections: &CorrectionFlags) -> Result<()> {
        self.log
            .borrow_mut()
            .push(format!("prove_consistency {}", file_name(folder)));
        Ok(())
    }

    fn detect_heating_rod_operation(&mut self, folder: &Path, output: &Path) -> Result<()> {
        self.log.borrow_mut().push(format!(
            "detect_heating_rod {} {}",
            file_name(folder),
            file_name(output)
        ));
        Ok(())
    }

    fn aggregate_spatial(&mut self, folder: &Path) -> Result<()> {
        self.log
            .borrow_mut()
            .push(format!("aggregate_spatial {}", file_name(folder)));
        Ok(())
    }
}

struct RecordingPlotter {
    log: CallLog,
}

impl ReportPlotter for RecordingPlotter {
    fn get_pv_objects(&mut self, site: &str) -> Result<()> {
        self.log
            .borrow_mut()
            .push(format!("get_pv_objects {}", site));
        Ok(())
    }

    fn plot_seasonal_load_curves(
        &mut self,
        folder: &Path,
        options: &SeasonalCurveOptions,
    ) -> Result<()> {
        self.log.borrow_mut().push(format!(
            "seasonal {} {} {} slp={}",
            file_name(folder),
            options.feed,
            options.resolution,
            options.plot_slp
        ));
        Ok(())
    }

    fn plot_annual_consumption_household(&mut self, _folder: &Path, output: &Path) -> Result<()> {
        self.log
            .borrow_mut()
            .push(format!("household {}", file_name(output)));
        Ok(())
    }

    fn plot_annual_consumption_heat_pump(
        &mut self,
        _folder: &Path,
        method: &OperationThreshold,
        language: Language,
        output: &Path,
    ) -> Result<()> {
        self.log.borrow_mut().push(format!(
            "heat_pump {} {} {}",
            method,
            language.code(),
            file_name(output)
        ));
        Ok(())
    }

    fn plot_daily(
        &mut self,
        _folder: &Path,
        language: Language,
        y_max: Option<f64>,
        output: &Path,
    ) -> Result<()> {
        self.log.borrow_mut().push(format!(
            "daily {} {:?} {}",
            language.code(),
            y_max,
            file_name(output)
        ));
        Ok(())
    }

    fn plot_data_quality(
        &mut self,
        _folder: &Path,
        site: &str,
        years: &[i32],
        feed: Feed,
        quantity: QuantityKind,
        _output_dir: &Path,
    ) -> Result<()> {
        self.log.borrow_mut().push(format!(
            "quality {} {:?} {} {}",
            site, years, quantity, feed
        ));
        Ok(())
    }
}

struct Fixture {
    _dir: TempDir,
    config: PipelineConfig,
    collector_log: CallLog,
    processor_log: CallLog,
    plotter_log: CallLog,
}

impl Fixture {
    /// Working tree plus a seeded archive for the given years.
    fn new(years: &[i32]) -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let base = dir.path().join("WPuQ");
        let archive = dir.path().join("ZenodoDownloads");
        fs::create_dir_all(&base).unwrap();
        fs::create_dir_all(&archive).unwrap();
        for &year in years {
            for artifact in ProcessedArtifact::ALL {
                fs::write(
                    archive.join(artifact.archive_file_name(year)),
                    format!("{} {}", year, artifact.file_name()),
                )
                .unwrap();
            }
        }

        let mut config = PipelineConfig::default();
        config.folder_base = base;
        config.archive_dir = Some(archive);
        config.years = years.to_vec();

        Self {
            _dir: dir,
            config,
            collector_log: Rc::new(RefCell::new(Vec::new())),
            processor_log: Rc::new(RefCell::new(Vec::new())),
            plotter_log: Rc::new(RefCell::new(Vec::new())),
        }
    }

    fn pipeline(&self) -> Pipeline<RecordingCollector, RecordingProcessor, RecordingPlotter> {
        Pipeline::new(
            RecordingCollector {
                log: Rc::clone(&self.collector_log),
            },
            RecordingProcessor {
                log: Rc::clone(&self.processor_log),
            },
            RecordingPlotter {
                log: Rc::clone(&self.plotter_log),
            },
        )
    }
}

#[test]
fn archive_run_copies_artifacts_and_renders_reports() {
    let fixture = Fixture::new(&[2019]);
    let summary = fixture.pipeline().run(&fixture.config, None).unwrap();

    assert_eq!(summary.years_processed, 1);
    assert_eq!(summary.years_skipped, 0);
    assert_eq!(summary.artifacts_copied, 7);
    assert_eq!(summary.report_plots, 6);
    assert_eq!(summary.quality_plots, 0);

    // every artifact landed byte-identical under resampled/
    let resampled = fixture.config.resampled_dir(2019);
    for artifact in ProcessedArtifact::ALL {
        let source = fs::read(
            fixture
                .config
                .resolved_archive_dir()
                .join(artifact.archive_file_name(2019)),
        )
        .unwrap();
        let target = fs::read(resampled.join(artifact.file_name())).unwrap();
        assert_eq!(source, target);
    }

    // no access key, so the collector never ran; the processor stayed idle
    assert!(fixture.collector_log.borrow().is_empty());
    assert!(fixture.processor_log.borrow().is_empty());

    let plots = fixture.plotter_log.borrow();
    assert_eq!(
        *plots,
        vec![
            "get_pv_objects Ohrberg".to_string(),
            "seasonal resampled HOUSEHOLD 10s slp=true".to_string(),
            "seasonal resampled HEATPUMP 10s slp=true".to_string(),
            "household household_operation_wpuq_report_2019.png".to_string(),
            "heat_pump larger 4kW en heat_pump_operation_wpuq_report_2019_larger 4kW.png"
                .to_string(),
            "daily de Some(255.0) daily_plot_wpuq_report_2019_de.png".to_string(),
            "daily en None daily_plot_wpuq_report_2019_en.png".to_string(),
        ]
    );
}

#[test]
fn archive_run_is_idempotent() {
    let fixture = Fixture::new(&[2019]);
    fixture.pipeline().run(&fixture.config, None).unwrap();
    fixture.pipeline().run(&fixture.config, None).unwrap();

    let weather = fixture.config.resampled_dir(2019).join("weather.hdf5");
    assert_eq!(fs::read_to_string(weather).unwrap(), "2019 weather.hdf5");
}

#[test]
fn missing_artifact_aborts_the_run_before_plotting() {
    let fixture = Fixture::new(&[2019]);
    fs::remove_file(
        fixture
            .config
            .resolved_archive_dir()
            .join("2019_data_15min.hdf5"),
    )
    .unwrap();

    let err = fixture.pipeline().run(&fixture.config, None).unwrap_err();
    match err {
        PipelineError::MissingArtifact { path } => {
            assert!(path.ends_with("2019_data_15min.hdf5"));
        }
        other => panic!("expected MissingArtifact, got {}", other),
    }

    // artifacts after the missing one were never copied, and no plot ran
    let resampled = fixture.config.resampled_dir(2019);
    assert!(resampled.join("data_60min.hdf5").exists());
    assert!(!resampled.join("data_1min.hdf5").exists());
    assert!(fixture.plotter_log.borrow().is_empty());
}

#[test]
fn recompute_reference_site_runs_full_processor_sequence() {
    let mut fixture = Fixture::new(&[2018, 2019]);
    fixture.config.archive_available = false;

    let summary = fixture.pipeline().run(&fixture.config, None).unwrap();
    assert_eq!(summary.years_processed, 2);
    assert_eq!(summary.artifacts_copied, 0);
    assert_eq!(summary.report_plots, 12);

    let calls = fixture.processor_log.borrow();
    assert_eq!(
        *calls,
        vec![
            "get_pv_objects Ohrberg".to_string(),
            "aggregate_temporal Ohrberg_2018".to_string(),
            "prove_consistency Ohrberg_2018".to_string(),
            "detect_heating_rod Ohrberg_2018 validation".to_string(),
            "aggregate_spatial Ohrberg_2018".to_string(),
            "get_pv_objects Ohrberg".to_string(),
            "aggregate_temporal Ohrberg_2019".to_string(),
            "prove_consistency Ohrberg_2019".to_string(),
            "detect_heating_rod Ohrberg_2019 validation".to_string(),
            "aggregate_spatial Ohrberg_2019".to_string(),
        ]
    );
}

#[test]
fn recompute_reference_site_runs_quality_pass_for_every_combination() {
    let mut fixture = Fixture::new(&[2018, 2019, 2020]);
    fixture.config.archive_available = false;

    let summary = fixture.pipeline().run(&fixture.config, None).unwrap();
    assert_eq!(summary.quality_plots, 4);

    let plots = fixture.plotter_log.borrow();
    let quality: Vec<&String> = plots.iter().filter(|c| c.starts_with("quality")).collect();
    assert_eq!(
        quality,
        vec![
            "quality Ohrberg [2018, 2019, 2020] POWER HOUSEHOLD",
            "quality Ohrberg [2018, 2019, 2020] POWER HEATPUMP",
            "quality Ohrberg [2018, 2019, 2020] ENERGY HOUSEHOLD",
            "quality Ohrberg [2018, 2019, 2020] ENERGY HEATPUMP",
        ]
    );
}

#[test]
fn archive_run_never_triggers_quality_pass() {
    let fixture = Fixture::new(&[2019]);
    let summary = fixture.pipeline().run(&fixture.config, None).unwrap();
    assert_eq!(summary.quality_plots, 0);
    assert!(fixture
        .plotter_log
        .borrow()
        .iter()
        .all(|c| !c.starts_with("quality")));
}

#[test]
fn recompute_other_site_stops_after_temporal_aggregation() {
    let mut fixture = Fixture::new(&[2018, 2019]);
    fixture.config.archive_available = false;
    fixture.config.site = "Huegelshart".to_string();

    let summary = fixture.pipeline().run(&fixture.config, None).unwrap();
    assert_eq!(summary.years_processed, 0);
    assert_eq!(summary.years_skipped, 2);
    assert_eq!(summary.report_plots, 0);
    assert_eq!(summary.quality_plots, 0);

    let calls = fixture.processor_log.borrow();
    assert_eq!(
        *calls,
        vec![
            "get_pv_objects Huegelshart".to_string(),
            "aggregate_temporal Huegelshart_2018".to_string(),
            "get_pv_objects Huegelshart".to_string(),
            "aggregate_temporal Huegelshart_2019".to_string(),
        ]
    );
    assert!(fixture.plotter_log.borrow().is_empty());
}

#[test]
fn collector_runs_only_with_an_access_key() {
    let fixture = Fixture::new(&[2019]);
    fixture.pipeline().run(&fixture.config, None).unwrap();
    assert!(fixture.collector_log.borrow().is_empty());

    let mut fixture = Fixture::new(&[2019]);
    fixture.config.api_key = Some("secret".to_string());
    fixture.pipeline().run(&fixture.config, None).unwrap();

    let calls = fixture.collector_log.borrow();
    assert_eq!(
        *calls,
        vec![
            "get_objects Ohrberg".to_string(),
            "get_data 01-2019 12-2019 interval=10 weather=false".to_string(),
        ]
    );
}

#[test]
fn unknown_site_fails_before_any_work() {
    let mut fixture = Fixture::new(&[2019]);
    fixture.config.site = "Elsewhere".to_string();

    let err = fixture.pipeline().run(&fixture.config, None).unwrap_err();
    assert!(matches!(err, PipelineError::UnknownSite(site) if site == "Elsewhere"));
    assert!(fixture.processor_log.borrow().is_empty());
    assert!(fixture.plotter_log.borrow().is_empty());
}

#[test]
fn standalone_quality_pass_runs_unconditionally() {
    let fixture = Fixture::new(&[2019]);
    let plots = fixture
        .pipeline()
        .plot_data_quality(&fixture.config)
        .unwrap();
    assert_eq!(plots, 4);
}
