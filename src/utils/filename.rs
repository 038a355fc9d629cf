use std::path::{Path, PathBuf};

use crate::models::{Language, OperationThreshold};

/// Annual household consumption report image under the base folder.
pub fn household_report(folder_base: &Path, year: i32) -> PathBuf {
    folder_base.join(format!("household_operation_wpuq_report_{}.png", year))
}

/// Annual heat pump consumption report image, named after the threshold method.
pub fn heat_pump_report(folder_base: &Path, year: i32, method: &OperationThreshold) -> PathBuf {
    folder_base.join(format!(
        "heat_pump_operation_wpuq_report_{}_{}.png",
        year, method
    ))
}

/// Daily profile report image for one language variant.
pub fn daily_report(folder_base: &Path, year: i32, language: Language) -> PathBuf {
    folder_base.join(format!(
        "daily_plot_wpuq_report_{}_{}.png",
        year,
        language.code()
    ))
}
