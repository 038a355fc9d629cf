use serde::{Deserialize, Serialize};

/// Switches for the correction passes a stage applies to raw readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrectionFlags {
    pub timestamps: bool,
    pub device_bounds: bool,
    pub outliers: bool,
}

impl CorrectionFlags {
    pub const NONE: CorrectionFlags = CorrectionFlags {
        timestamps: false,
        device_bounds: false,
        outliers: false,
    };

    pub fn new(timestamps: bool, device_bounds: bool, outliers: bool) -> Self {
        Self {
            timestamps,
            device_bounds,
            outliers,
        }
    }
}

/// Correction switches for both pipeline stages of one site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteCorrections {
    pub collector: CorrectionFlags,
    pub processor: CorrectionFlags,
}
