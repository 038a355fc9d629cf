use std::fmt;

/// Counters accumulated over one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub years_processed: usize,
    /// Years dropped by the non-reference early exit in the recompute branch.
    pub years_skipped: usize,
    pub artifacts_copied: usize,
    pub report_plots: usize,
    pub quality_plots: usize,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pipeline Run Summary")?;
        writeln!(f, "====================")?;
        writeln!(f, "Years processed:  {}", self.years_processed)?;
        writeln!(f, "Years skipped:    {}", self.years_skipped)?;
        writeln!(f, "Artifacts copied: {}", self.artifacts_copied)?;
        writeln!(f, "Report plots:     {}", self.report_plots)?;
        write!(f, "Quality plots:    {}", self.quality_plots)
    }
}
