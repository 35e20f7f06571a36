// xcclean-core/src/lib.rs
pub mod category;
pub mod clean;
pub mod disk;
pub mod scan;

// Re-export key types
pub use category::{Category, Granularity};
pub use clean::{clean_entries, partition_by_age, CleanOptions, CleanOutcome};
pub use disk::DiskOverview;
pub use scan::{scan_categories, ScanEntry, ScanReport};
