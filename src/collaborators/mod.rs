use std::path::Path;

use crate::error::Result;
use crate::models::{
    CorrectionFlags, Feed, Language, OperationThreshold, QuantityKind, SeasonalCurveOptions,
};
use crate::utils::constants::COLLECTION_INTERVAL_S;

pub mod python;

pub use python::{PythonCollector, PythonPlotter, PythonProcessor, PythonToolchain};

/// One raw-data collection request covering a span of months.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionRequest {
    /// First month to fetch, `MM-YYYY`.
    pub start_month: String,
    /// Last month to fetch, `MM-YYYY`.
    pub end_month: String,
    /// Sampling interval of the raw readings [s].
    pub time_interval: u32,
    pub corrections: CorrectionFlags,
    pub weather_data: bool,
}

impl CollectionRequest {
    /// Full-year request at the raw collection interval, without weather data.
    pub fn for_year(year: i32, corrections: CorrectionFlags) -> Self {
        Self {
            start_month: format!("01-{}", year),
            end_month: format!("12-{}", year),
            time_interval: COLLECTION_INTERVAL_S,
            corrections,
            weather_data: false,
        }
    }
}

/// Fetches raw metering and weather data from the remote service.
pub trait DataCollector {
    fn get_objects(&mut self, site: &str) -> Result<()>;
    fn get_data(&mut self, request: &CollectionRequest) -> Result<()>;
}

/// Derives the aggregated per-site datasets from raw data.
pub trait DataProcessor {
    fn get_pv_objects(&mut self, site: &str) -> Result<()>;
    fn aggregate_temporal(&mut self, folder: &Path, corrections: &CorrectionFlags) -> Result<()>;
    fn prove_consistency(&mut self, folder: &Path, corrections: &CorrectionFlags) -> Result<()>;
    fn detect_heating_rod_operation(&mut self, folder: &Path, output: &Path) -> Result<()>;
    fn aggregate_spatial(&mut self, folder: &Path) -> Result<()>;
}

/// Renders the diagnostic and report plots.
pub trait ReportPlotter {
    fn get_pv_objects(&mut self, site: &str) -> Result<()>;
    fn plot_seasonal_load_curves(
        &mut self,
        folder: &Path,
        options: &SeasonalCurveOptions,
    ) -> Result<()>;
    fn plot_annual_consumption_household(&mut self, folder: &Path, output: &Path) -> Result<()>;
    fn plot_annual_consumption_heat_pump(
        &mut self,
        folder: &Path,
        method: &OperationThreshold,
        language: Language,
        output: &Path,
    ) -> Result<()>;
    fn plot_daily(
        &mut self,
        folder: &Path,
        language: Language,
        y_max: Option<f64>,
        output: &Path,
    ) -> Result<()>;
    fn plot_data_quality(
        &mut self,
        folder: &Path,
        site: &str,
        years: &[i32],
        feed: Feed,
        quantity: QuantityKind,
        output_dir: &Path,
    ) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_request_for_year() {
        let request = CollectionRequest::for_year(2019, CorrectionFlags::NONE);
        assert_eq!(request.start_month, "01-2019");
        assert_eq!(request.end_month, "12-2019");
        assert_eq!(request.time_interval, 10);
        assert!(!request.weather_data);
    }
}
