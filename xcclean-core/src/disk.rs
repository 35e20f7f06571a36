// xcclean-core/src/disk.rs
//! Root-volume usage for the storage overview.

use std::path::{Path, PathBuf};

use serde::Serialize;
use sysinfo::Disks;
use tracing::debug;
use xcclean_common::error::{Result, XccleanError};

#[derive(Debug, Clone, Serialize)]
pub struct DiskOverview {
    pub mount_point: PathBuf,
    pub total_bytes: u64,
    pub available_bytes: u64,
}

impl DiskOverview {
    pub fn used_bytes(&self) -> u64 {
        self.total_bytes.saturating_sub(self.available_bytes)
    }
}

/// Reports the volume mounted at `/`. On APFS the data volume may be the
/// bigger mount; when nothing is mounted at `/` the largest volume wins.
pub fn root_volume() -> Result<DiskOverview> {
    let disks = Disks::new_with_refreshed_list();
    let root = Path::new("/");
    let disk = disks
        .list()
        .iter()
        .find(|d| d.mount_point() == root)
        .or_else(|| disks.list().iter().max_by_key(|d| d.total_space()))
        .ok_or_else(|| {
            XccleanError::Generic("No mounted volumes reported by the system".to_string())
        })?;
    debug!(
        "Using volume {} ({} total, {} available)",
        disk.mount_point().display(),
        disk.total_space(),
        disk.available_space()
    );
    Ok(DiskOverview {
        mount_point: disk.mount_point().to_path_buf(),
        total_bytes: disk.total_space(),
        available_bytes: disk.available_space(),
    })
}
