//! Shell-out implementations driving the external WPuQ Python toolchain.
//!
//! Every trait call builds a deterministic script and runs it through the
//! configured interpreter with inherited stdio, so the toolchain's own
//! progress output stays visible. Stages are independent processes; each
//! script re-establishes the PV objects for the remembered site before
//! invoking its one method.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::models::{
    CorrectionFlags, Feed, Language, OperationThreshold, QuantityKind, SeasonalCurveOptions,
};

use super::{CollectionRequest, DataCollector, DataProcessor, ReportPlotter};

/// Handle on the Python interpreter carrying the WPuQ package.
#[derive(Debug, Clone)]
pub struct PythonToolchain {
    interpreter: PathBuf,
}

impl PythonToolchain {
    pub fn new(interpreter: impl Into<PathBuf>) -> Self {
        Self {
            interpreter: interpreter.into(),
        }
    }

    pub fn collector(&self) -> PythonCollector {
        PythonCollector {
            toolchain: self.clone(),
            site: None,
        }
    }

    pub fn processor(&self) -> PythonProcessor {
        PythonProcessor {
            toolchain: self.clone(),
            site: None,
        }
    }

    pub fn plotter(&self) -> PythonPlotter {
        PythonPlotter {
            toolchain: self.clone(),
            site: None,
        }
    }

    fn run(&self, stage: &str, script: &str) -> Result<()> {
        debug!(stage, "running collaborator stage");
        let status = Command::new(&self.interpreter)
            .arg("-c")
            .arg(script)
            .status()?;
        if !status.success() {
            return Err(PipelineError::Collaborator {
                stage: stage.to_string(),
                status,
            });
        }
        Ok(())
    }
}

fn py_bool(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

fn py_str(value: &str) -> String {
    format!("'{}'", value)
}

/// Raw-string literal, so Windows-style paths survive unescaped.
fn py_path(path: &Path) -> String {
    format!("r'{}'", path.display())
}

fn py_opt_f64(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{}", v),
        None => "None".to_string(),
    }
}

fn py_corrections(flags: &CorrectionFlags) -> String {
    format!(
        "{{'timestamps': {}, 'device_bounds': {}, 'outliers': {}}}",
        py_bool(flags.timestamps),
        py_bool(flags.device_bounds),
        py_bool(flags.outliers)
    )
}

fn py_years(years: &[i32]) -> String {
    let joined = years
        .iter()
        .map(|y| y.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{}]", joined)
}

fn collector_data_call(request: &CollectionRequest) -> String {
    format!(
        "collector.get_data(start_month={}, end_month={}, time_interval={}, corrections={}, weather_data={})",
        py_str(&request.start_month),
        py_str(&request.end_month),
        request.time_interval,
        py_corrections(&request.corrections),
        py_bool(request.weather_data)
    )
}

fn collector_script(site: &str, call: Option<&str>) -> String {
    let mut script = String::from("from WPuQ import Datacollector\n");
    script.push_str("collector = Datacollector()\n");
    script.push_str(&format!("collector.get_objects(quarter={})\n", py_str(site)));
    if let Some(call) = call {
        script.push_str(call);
        script.push('\n');
    }
    script
}

fn processor_script(site: &str, call: Option<&str>) -> String {
    let mut script = String::from("from WPuQ import Dataprocessor\n");
    script.push_str("processor = Dataprocessor()\n");
    script.push_str(&format!(
        "processor.get_pv_objects(quarter={})\n",
        py_str(site)
    ));
    if let Some(call) = call {
        script.push_str(call);
        script.push('\n');
    }
    script
}

fn plotter_script(site: &str, call: Option<&str>) -> String {
    let mut script = String::from("from WPuQ import WPuQPlots\n");
    script.push_str("plotter = WPuQPlots()\n");
    script.push_str(&format!("plotter.get_pv_objects(quarter={})\n", py_str(site)));
    if let Some(call) = call {
        script.push_str(call);
        script.push('\n');
    }
    script
}

/// Drives `WPuQ.Datacollector` against the remote metering service.
pub struct PythonCollector {
    toolchain: PythonToolchain,
    site: Option<String>,
}

impl PythonCollector {
    fn site(&self) -> Result<&str> {
        self.site.as_deref().ok_or_else(|| {
            PipelineError::Config("collector has no site; call get_objects first".to_string())
        })
    }
}

impl DataCollector for PythonCollector {
    fn get_objects(&mut self, site: &str) -> Result<()> {
        self.site = Some(site.to_string());
        let script = collector_script(site, None);
        self.toolchain.run("Datacollector.get_objects", &script)
    }

    fn get_data(&mut self, request: &CollectionRequest) -> Result<()> {
        let call = collector_data_call(request);
        let script = collector_script(self.site()?, Some(&call));
        self.toolchain.run("Datacollector.get_data", &script)
    }
}

/// Drives `WPuQ.Dataprocessor` over the per-year working folder.
pub struct PythonProcessor {
    toolchain: PythonToolchain,
    site: Option<String>,
}

impl PythonProcessor {
    fn site(&self) -> Result<&str> {
        self.site.as_deref().ok_or_else(|| {
            PipelineError::Config("processor has no site; call get_pv_objects first".to_string())
        })
    }

    fn run_stage(&self, stage: &str, call: &str) -> Result<()> {
        let script = processor_script(self.site()?, Some(call));
        self.toolchain.run(stage, &script)
    }
}

impl DataProcessor for PythonProcessor {
    fn get_pv_objects(&mut self, site: &str) -> Result<()> {
        self.site = Some(site.to_string());
        let script = processor_script(site, None);
        self.toolchain.run("Dataprocessor.get_pv_objects", &script)
    }

    fn aggregate_temporal(&mut self, folder: &Path, corrections: &CorrectionFlags) -> Result<()> {
        let call = format!(
            "processor.aggregate_temporal(folder={}, corrections={})",
            py_path(folder),
            py_corrections(corrections)
        );
        self.run_stage("Dataprocessor.aggregate_temporal", &call)
    }

    fn prove_consistency(&mut self, folder: &Path, corrections: &CorrectionFlags) -> Result<()> {
        let call = format!(
            "processor.prove_consistency(folder={}, corrections={})",
            py_path(folder),
            py_corrections(corrections)
        );
        self.run_stage("Dataprocessor.prove_consistency", &call)
    }

    fn detect_heating_rod_operation(&mut self, folder: &Path, output: &Path) -> Result<()> {
        let call = format!(
            "processor.detect_heating_rod_operation(folder={}, strfile={})",
            py_path(folder),
            py_path(output)
        );
        self.run_stage("Dataprocessor.detect_heating_rod_operation", &call)
    }

    fn aggregate_spatial(&mut self, folder: &Path) -> Result<()> {
        let call = format!("processor.aggregate_spatial(folder={})", py_path(folder));
        self.run_stage("Dataprocessor.aggregate_spatial", &call)
    }
}

/// Drives `WPuQ.WPuQPlots` to render the report images.
pub struct PythonPlotter {
    toolchain: PythonToolchain,
    site: Option<String>,
}

impl PythonPlotter {
    fn site(&self) -> Result<&str> {
        self.site.as_deref().ok_or_else(|| {
            PipelineError::Config("plotter has no site; call get_pv_objects first".to_string())
        })
    }

    fn run_stage(&self, stage: &str, call: &str) -> Result<()> {
        let script = plotter_script(self.site()?, Some(call));
        self.toolchain.run(stage, &script)
    }
}

impl ReportPlotter for PythonPlotter {
    fn get_pv_objects(&mut self, site: &str) -> Result<()> {
        self.site = Some(site.to_string());
        let script = plotter_script(site, None);
        self.toolchain.run("WPuQPlots.get_pv_objects", &script)
    }

    fn plot_seasonal_load_curves(
        &mut self,
        folder: &Path,
        options: &SeasonalCurveOptions,
    ) -> Result<()> {
        let call = format!(
            "plotter.plot_seasonal_load_curves(folder={}, objects=None, feed={}, res={}, correct_pv={}, use_average={}, plot_slp={})",
            py_path(folder),
            py_str(options.feed.as_str()),
            py_str(options.resolution.label()),
            py_bool(options.correct_pv),
            py_bool(options.use_average),
            py_bool(options.plot_slp)
        );
        self.run_stage("WPuQPlots.plot_seasonal_load_curves", &call)
    }

    fn plot_annual_consumption_household(&mut self, folder: &Path, output: &Path) -> Result<()> {
        let call = format!(
            "plotter.plot_annual_consumption_household_for_report(folder={}, strfile={})",
            py_path(folder),
            py_path(output)
        );
        self.run_stage("WPuQPlots.plot_annual_consumption_household_for_report", &call)
    }

    fn plot_annual_consumption_heat_pump(
        &mut self,
        folder: &Path,
        method: &OperationThreshold,
        language: Language,
        output: &Path,
    ) -> Result<()> {
        let call = format!(
            "plotter.plot_annual_consumption_heat_pump_for_report(folder={}, method={}, language={}, strfile={})",
            py_path(folder),
            py_str(&method.to_string()),
            py_str(language.code()),
            py_path(output)
        );
        self.run_stage("WPuQPlots.plot_annual_consumption_heat_pump_for_report", &call)
    }

    fn plot_daily(
        &mut self,
        folder: &Path,
        language: Language,
        y_max: Option<f64>,
        output: &Path,
    ) -> Result<()> {
        let call = format!(
            "plotter.plot_daily_for_report({}, {}, {}, strfile={})",
            py_path(folder),
            py_str(language.code()),
            py_opt_f64(y_max),
            py_path(output)
        );
        self.run_stage("WPuQPlots.plot_daily_for_report", &call)
    }

    fn plot_data_quality(
        &mut self,
        folder: &Path,
        site: &str,
        years: &[i32],
        feed: Feed,
        quantity: QuantityKind,
        output_dir: &Path,
    ) -> Result<()> {
        let call = format!(
            "plotter.plot_data_quality(folder={}, quarter={}, years={}, feed={}, power={}, strfile={})",
            py_path(folder),
            py_str(site),
            py_years(years),
            py_str(feed.as_str()),
            py_str(quantity.as_str()),
            py_path(output_dir)
        );
        // the quality pass carries its own plotter state
        let script = plotter_script(site, Some(&call));
        self.site = Some(site.to_string());
        self.toolchain.run("WPuQPlots.plot_data_quality", &script)
    }
}
