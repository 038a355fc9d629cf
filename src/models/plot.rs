use serde::{Deserialize, Serialize};

use crate::models::TimeResolution;
use crate::utils::constants::{DAILY_PLOT_Y_MAX_DE, DEFAULT_OPERATION_THRESHOLD_KW};

/// Metering channel category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Feed {
    Household,
    Heatpump,
}

impl Feed {
    pub const BOTH: [Feed; 2] = [Feed::Household, Feed::Heatpump];

    pub fn as_str(&self) -> &'static str {
        match self {
            Feed::Household => "HOUSEHOLD",
            Feed::Heatpump => "HEATPUMP",
        }
    }
}

impl std::fmt::Display for Feed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Report output language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    German,
    English,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::German, Language::English];

    pub fn code(&self) -> &'static str {
        match self {
            Language::German => "de",
            Language::English => "en",
        }
    }

    /// y-axis cap for the daily report plot; only the German report is capped.
    pub fn daily_y_max(&self) -> Option<f64> {
        match self {
            Language::German => Some(DAILY_PLOT_Y_MAX_DE),
            Language::English => None,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Power vs energy view for the data-quality plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuantityKind {
    Power,
    Energy,
}

impl QuantityKind {
    pub const BOTH: [QuantityKind; 2] = [QuantityKind::Power, QuantityKind::Energy];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuantityKind::Power => "POWER",
            QuantityKind::Energy => "ENERGY",
        }
    }
}

impl std::fmt::Display for QuantityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Operation-size threshold used to classify heat pump operation in the
/// annual consumption report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperationThreshold {
    pub min_power_kw: f64,
}

impl Default for OperationThreshold {
    fn default() -> Self {
        Self {
            min_power_kw: DEFAULT_OPERATION_THRESHOLD_KW,
        }
    }
}

impl std::fmt::Display for OperationThreshold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "larger {}kW", self.min_power_kw)
    }
}

/// Options for one seasonal load curve plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonalCurveOptions {
    pub feed: Feed,
    pub resolution: TimeResolution,
    pub correct_pv: bool,
    pub use_average: bool,
    pub plot_slp: bool,
}

impl SeasonalCurveOptions {
    /// The configuration used by the yearly report pass: averaged 10 s curves
    /// without PV correction, with the standard load profile overlaid.
    pub fn report_defaults(feed: Feed) -> Self {
        Self {
            feed,
            resolution: TimeResolution::TenSeconds,
            correct_pv: false,
            use_average: true,
            plot_slp: true,
        }
    }
}
