use serde::{Deserialize, Serialize};

/// Temporal resolution of a resampled dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeResolution {
    TenSeconds,
    OneMinute,
    FifteenMinutes,
    SixtyMinutes,
}

impl TimeResolution {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "10s" => Some(TimeResolution::TenSeconds),
            "1min" => Some(TimeResolution::OneMinute),
            "15min" => Some(TimeResolution::FifteenMinutes),
            "60min" => Some(TimeResolution::SixtyMinutes),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeResolution::TenSeconds => "10s",
            TimeResolution::OneMinute => "1min",
            TimeResolution::FifteenMinutes => "15min",
            TimeResolution::SixtyMinutes => "60min",
        }
    }
}

impl std::fmt::Display for TimeResolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One of the processed measurement files published per year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessedArtifact {
    Weather,
    Spatial,
    Resampled(TimeResolution),
    DistrictHeatingGrid,
}

impl ProcessedArtifact {
    /// Every artifact a yearly archive must provide, in copy order.
    pub const ALL: [ProcessedArtifact; 7] = [
        ProcessedArtifact::Weather,
        ProcessedArtifact::Spatial,
        ProcessedArtifact::Resampled(TimeResolution::TenSeconds),
        ProcessedArtifact::Resampled(TimeResolution::SixtyMinutes),
        ProcessedArtifact::Resampled(TimeResolution::FifteenMinutes),
        ProcessedArtifact::Resampled(TimeResolution::OneMinute),
        ProcessedArtifact::DistrictHeatingGrid,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            ProcessedArtifact::Weather => "weather.hdf5",
            ProcessedArtifact::Spatial => "data_spatial.hdf5",
            ProcessedArtifact::Resampled(TimeResolution::TenSeconds) => "data_10s.hdf5",
            ProcessedArtifact::Resampled(TimeResolution::OneMinute) => "data_1min.hdf5",
            ProcessedArtifact::Resampled(TimeResolution::FifteenMinutes) => "data_15min.hdf5",
            ProcessedArtifact::Resampled(TimeResolution::SixtyMinutes) => "data_60min.hdf5",
            ProcessedArtifact::DistrictHeatingGrid => "district_heating_grid.hdf5",
        }
    }

    /// File name under the yearly download archive.
    pub fn archive_file_name(&self, year: i32) -> String {
        format!("{}_{}", year, self.file_name())
    }
}

impl std::fmt::Display for ProcessedArtifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.file_name())
    }
}
