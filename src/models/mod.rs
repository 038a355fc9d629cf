pub mod artifacts;
pub mod corrections;
pub mod plot;

pub use artifacts::{ProcessedArtifact, TimeResolution};
pub use corrections::{CorrectionFlags, SiteCorrections};
pub use plot::{Feed, Language, OperationThreshold, QuantityKind, SeasonalCurveOptions};
