use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{PipelineError, Result};
use crate::models::{CorrectionFlags, OperationThreshold, SiteCorrections};
use crate::utils::constants::{
    ARCHIVE_DIR_NAME, DEFAULT_YEARS, MAX_PLAUSIBLE_YEAR, MIN_PLAUSIBLE_YEAR, REFERENCE_SITE,
    RESAMPLED_DIR, VALIDATION_DIR,
};

/// External toolchain the collaborator stages shell out to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainConfig {
    /// Python interpreter carrying the WPuQ package.
    pub python: PathBuf,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            python: PathBuf::from("python3"),
        }
    }
}

/// Everything one pipeline run needs, resolved up front.
///
/// Defaults reproduce the published dataset run: the Ohrberg site over
/// 2018-2020 with the Zenodo archive available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct PipelineConfig {
    /// Working directory holding the per-year folders and report images.
    pub folder_base: PathBuf,

    /// Download archive; defaults to `{folder_base}/../ZenodoDownloads`.
    pub archive_dir: Option<PathBuf>,

    #[validate(length(min = 1))]
    pub site: String,

    /// Site whose data feeds consistency proving and spatial aggregation.
    #[validate(length(min = 1))]
    pub reference_site: String,

    #[validate(length(min = 1))]
    pub years: Vec<i32>,

    /// Prefer the published archive over a full recompute.
    pub archive_available: bool,

    /// Access key for the raw metering service; collection runs only when set.
    pub api_key: Option<String>,

    pub heat_pump_threshold: OperationThreshold,

    pub corrections: HashMap<String, SiteCorrections>,

    pub toolchain: ToolchainConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let mut corrections = HashMap::new();
        corrections.insert(
            "Ohrberg".to_string(),
            SiteCorrections {
                collector: CorrectionFlags::NONE,
                processor: CorrectionFlags::new(true, true, false),
            },
        );
        corrections.insert(
            "Huegelshart".to_string(),
            SiteCorrections {
                collector: CorrectionFlags::NONE,
                processor: CorrectionFlags::new(true, false, false),
            },
        );

        Self {
            folder_base: PathBuf::from("."),
            archive_dir: None,
            site: REFERENCE_SITE.to_string(),
            reference_site: REFERENCE_SITE.to_string(),
            years: DEFAULT_YEARS.to_vec(),
            archive_available: true,
            api_key: None,
            heat_pump_threshold: OperationThreshold::default(),
            corrections,
            toolchain: ToolchainConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Load defaults, overlaid by an optional TOML file, overlaid by
    /// `WPUQ_*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder =
            Config::builder().add_source(Config::try_from(&PipelineConfig::default())?);
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        let cfg: PipelineConfig = builder
            .add_source(
                Environment::with_prefix("WPUQ")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        cfg.ensure_valid()?;
        Ok(cfg)
    }

    /// Derive-level rules plus the year plausibility check.
    pub fn ensure_valid(&self) -> Result<()> {
        self.validate()?;
        if let Some(year) = self
            .years
            .iter()
            .find(|y| !(MIN_PLAUSIBLE_YEAR..=MAX_PLAUSIBLE_YEAR).contains(*y))
        {
            return Err(PipelineError::Config(format!(
                "implausible processing year {}",
                year
            )));
        }
        Ok(())
    }

    /// Per-year working folder: `{folder_base}/{site}_{year}`.
    pub fn year_folder(&self, year: i32) -> PathBuf {
        self.folder_base.join(format!("{}_{}", self.site, year))
    }

    pub fn resampled_dir(&self, year: i32) -> PathBuf {
        self.year_folder(year).join(RESAMPLED_DIR)
    }

    pub fn validation_dir(&self, year: i32) -> PathBuf {
        self.year_folder(year).join(VALIDATION_DIR)
    }

    pub fn resolved_archive_dir(&self) -> PathBuf {
        self.archive_dir
            .clone()
            .unwrap_or_else(|| self.folder_base.join("..").join(ARCHIVE_DIR_NAME))
    }

    /// Site keys are matched case-insensitively; configuration sources do
    /// not agree on key casing.
    pub fn site_corrections(&self) -> Result<SiteCorrections> {
        self.corrections
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(&self.site))
            .map(|(_, corrections)| *corrections)
            .ok_or_else(|| PipelineError::UnknownSite(self.site.clone()))
    }

    pub fn is_reference_site(&self) -> bool {
        self.site == self.reference_site
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write as _;

    #[test]
    fn test_defaults_match_published_run() {
        let cfg = PipelineConfig::default();
        assert_eq!(cfg.site, "Ohrberg");
        assert_eq!(cfg.years, vec![2018, 2019, 2020]);
        assert!(cfg.archive_available);
        assert!(cfg.api_key.is_none());
        assert!(cfg.is_reference_site());

        let ohrberg = cfg.corrections["Ohrberg"];
        assert_eq!(ohrberg.collector, CorrectionFlags::NONE);
        assert!(ohrberg.processor.timestamps);
        assert!(ohrberg.processor.device_bounds);
        assert!(!ohrberg.processor.outliers);

        let huegelshart = cfg.corrections["Huegelshart"];
        assert!(huegelshart.processor.timestamps);
        assert!(!huegelshart.processor.device_bounds);
    }

    #[test]
    fn test_year_folder_layout() {
        let mut cfg = PipelineConfig::default();
        cfg.folder_base = PathBuf::from("/data/wpuq");
        assert_eq!(cfg.year_folder(2019), PathBuf::from("/data/wpuq/Ohrberg_2019"));
        assert_eq!(
            cfg.resampled_dir(2019),
            PathBuf::from("/data/wpuq/Ohrberg_2019/resampled")
        );
        assert_eq!(
            cfg.validation_dir(2019),
            PathBuf::from("/data/wpuq/Ohrberg_2019/validation")
        );
        assert_eq!(
            cfg.resolved_archive_dir(),
            PathBuf::from("/data/wpuq/../ZenodoDownloads")
        );
    }

    #[test]
    fn test_archive_dir_override() {
        let mut cfg = PipelineConfig::default();
        cfg.archive_dir = Some(PathBuf::from("/archive"));
        assert_eq!(cfg.resolved_archive_dir(), PathBuf::from("/archive"));
    }

    #[test]
    fn test_site_corrections_ignore_key_casing() {
        let mut cfg = PipelineConfig::default();
        let ohrberg = cfg.corrections.remove("Ohrberg").unwrap();
        cfg.corrections.insert("ohrberg".to_string(), ohrberg);
        assert_eq!(cfg.site_corrections().unwrap(), ohrberg);
    }

    #[test]
    fn test_unknown_site_is_rejected() {
        let mut cfg = PipelineConfig::default();
        cfg.site = "Elsewhere".to_string();
        match cfg.site_corrections() {
            Err(PipelineError::UnknownSite(site)) => assert_eq!(site, "Elsewhere"),
            other => panic!("expected UnknownSite, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_years_fail_validation() {
        let mut cfg = PipelineConfig::default();
        cfg.years.clear();
        assert!(cfg.ensure_valid().is_err());
    }

    #[test]
    fn test_implausible_year_fails_validation() {
        let mut cfg = PipelineConfig::default();
        cfg.years = vec![2019, 19];
        assert!(cfg.ensure_valid().is_err());
    }

    #[test]
    fn test_load_overlays_toml_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            r#"
folder_base = "/data/wpuq"
site = "Huegelshart"
years = [2019]
archive_available = false

[toolchain]
python = "/usr/bin/python3"
"#
        )
        .unwrap();

        let cfg = PipelineConfig::load(Some(file.path())).unwrap();
        assert_eq!(cfg.folder_base, PathBuf::from("/data/wpuq"));
        assert_eq!(cfg.site, "Huegelshart");
        assert_eq!(cfg.years, vec![2019]);
        assert!(!cfg.archive_available);
        assert_eq!(cfg.toolchain.python, PathBuf::from("/usr/bin/python3"));
        // untouched keys keep their defaults
        assert_eq!(cfg.reference_site, "Ohrberg");
        assert!(cfg.corrections.contains_key("Ohrberg"));
    }
}
