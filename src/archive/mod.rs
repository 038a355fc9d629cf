pub mod copier;

pub use copier::ArchiveCopier;
