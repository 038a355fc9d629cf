use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{PipelineError, Result};
use crate::models::ProcessedArtifact;
use crate::utils::constants::RESAMPLED_DIR;

/// Copies the published processed artifacts for one year into the working tree.
pub struct ArchiveCopier {
    archive_dir: PathBuf,
}

impl ArchiveCopier {
    pub fn new(archive_dir: impl Into<PathBuf>) -> Self {
        Self {
            archive_dir: archive_dir.into(),
        }
    }

    pub fn archive_dir(&self) -> &Path {
        &self.archive_dir
    }

    /// Copy all seven artifacts for `year` into `{folder}/resampled/`.
    ///
    /// Destinations are overwritten. The pass aborts on the first missing
    /// source without touching artifacts later in the copy order.
    pub fn copy_processed_data(&self, year: i32, folder: &Path) -> Result<usize> {
        let target_dir = folder.join(RESAMPLED_DIR);
        fs::create_dir_all(&target_dir)?;

        for artifact in ProcessedArtifact::ALL {
            let source = self.archive_dir.join(artifact.archive_file_name(year));
            if !source.is_file() {
                return Err(PipelineError::MissingArtifact { path: source });
            }
            info!(year, artifact = artifact.file_name(), "copying archived artifact");
            fs::copy(&source, target_dir.join(artifact.file_name()))?;
        }

        Ok(ProcessedArtifact::ALL.len())
    }
}
