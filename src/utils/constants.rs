/// Directory names inside the per-year working folder
pub const RESAMPLED_DIR: &str = "resampled";
pub const VALIDATION_DIR: &str = "validation";

/// Download archive directory published next to the working tree
pub const ARCHIVE_DIR_NAME: &str = "ZenodoDownloads";

/// Years covered by the published dataset
pub const DEFAULT_YEARS: [i32; 3] = [2018, 2019, 2020];

/// Site whose data feeds consistency proving and spatial aggregation
pub const REFERENCE_SITE: &str = "Ohrberg";

/// y-axis cap for the German daily report plot [W]
pub const DAILY_PLOT_Y_MAX_DE: f64 = 255.0;

/// Raw metering collection interval [s]
pub const COLLECTION_INTERVAL_S: u32 = 10;

/// Default heat pump operation-size threshold [kW]
pub const DEFAULT_OPERATION_THRESHOLD_KW: f64 = 4.0;

/// Plausible bounds for configured processing years
pub const MIN_PLAUSIBLE_YEAR: i32 = 2000;
pub const MAX_PLAUSIBLE_YEAR: i32 = 2100;
