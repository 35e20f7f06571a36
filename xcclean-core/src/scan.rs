// xcclean-core/src/scan.rs
//! Walks the managed storage areas and sizes their cleanable items.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::SystemTime;
use std::{fs, io};

use serde::Serialize;
use tokio::task::JoinSet;
use tracing::{debug, warn};
use xcclean_common::config::Config;
use xcclean_common::error::Result;

use crate::category::{Category, Granularity};

#[derive(Debug, Clone, Serialize)]
pub struct ScanEntry {
    pub category: Category,
    pub name: String,
    pub path: PathBuf,
    pub size_bytes: u64,
    pub modified: Option<SystemTime>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    pub entries: Vec<ScanEntry>,
}

impl ScanReport {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_bytes(&self) -> u64 {
        self.entries.iter().map(|e| e.size_bytes).sum()
    }

    pub fn category_total(&self, category: Category) -> u64 {
        self.entries_for(category).map(|e| e.size_bytes).sum()
    }

    pub fn category_count(&self, category: Category) -> usize {
        self.entries_for(category).count()
    }

    pub fn entries_for(&self, category: Category) -> impl Iterator<Item = &ScanEntry> {
        self.entries.iter().filter(move |e| e.category == category)
    }
}

/// Scans the given categories concurrently, one blocking walk per category.
///
/// A category whose directory does not exist contributes no entries. Entries
/// are returned in catalog order, largest first within each category.
pub async fn scan_categories(categories: &[Category], config: &Config) -> Result<ScanReport> {
    let mut join_set = JoinSet::new();
    for &category in categories {
        let config = config.clone();
        join_set.spawn_blocking(move || (category, scan_category(category, &config)));
    }

    let mut by_category: HashMap<Category, Vec<ScanEntry>> = HashMap::new();
    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok((category, Ok(entries))) => {
                by_category.insert(category, entries);
            }
            Ok((category, Err(e))) => {
                warn!("Scan of {} failed: {}", category.label(), e);
            }
            Err(e) => {
                warn!("Scan task aborted: {e}");
            }
        }
    }

    let mut entries = Vec::new();
    for category in Category::all() {
        if let Some(found) = by_category.remove(category) {
            entries.extend(found);
        }
    }
    Ok(ScanReport { entries })
}

/// Scans a single category synchronously.
pub fn scan_category(category: Category, config: &Config) -> Result<Vec<ScanEntry>> {
    let dir = category.dir(config);
    if !dir.is_dir() {
        debug!(
            "{} not present at {}, nothing to scan",
            category.label(),
            dir.display()
        );
        return Ok(Vec::new());
    }

    let mut entries = Vec::new();
    match category.granularity() {
        Granularity::WholeDir => {
            let size_bytes = directory_size(&dir);
            if size_bytes > 0 {
                let name = dir
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| category.label().to_string());
                let modified = modified_time(&dir);
                entries.push(ScanEntry {
                    category,
                    name,
                    path: dir,
                    size_bytes,
                    modified,
                });
            }
        }
        Granularity::PerChild => {
            let dir_str = dir.to_string_lossy().into_owned();
            for child in fs::read_dir(&dir)?.filter_map(|res| handle_dir_entry(res, &dir_str)) {
                let path = child.path();
                let metadata = match child.metadata() {
                    Ok(m) => m,
                    Err(e) => {
                        warn!("Could not get metadata for {}: {}", path.display(), e);
                        continue;
                    }
                };
                let size_bytes = if metadata.is_dir() {
                    directory_size(&path)
                } else {
                    metadata.len()
                };
                // Empty leftovers, file or directory, are not worth listing.
                if size_bytes == 0 {
                    continue;
                }
                let name = child.file_name().to_string_lossy().into_owned();
                entries.push(ScanEntry {
                    category,
                    name,
                    path,
                    size_bytes,
                    modified: metadata.modified().ok(),
                });
            }
            entries.sort_by(|a, b| b.size_bytes.cmp(&a.size_bytes));
        }
    }
    Ok(entries)
}

fn handle_dir_entry(res: io::Result<fs::DirEntry>, dir_path_str: &str) -> Option<fs::DirEntry> {
    match res {
        Ok(entry) => Some(entry),
        Err(e) => {
            warn!("Error reading entry in {}: {}", dir_path_str, e);
            None
        }
    }
}

/// Sums the sizes of all regular files under `path`. Symlinks are counted as
/// entries but never followed; unreadable entries are logged and skipped.
fn directory_size(path: &std::path::Path) -> u64 {
    let mut total_size = 0;
    for entry in walkdir::WalkDir::new(path) {
        match entry {
            Ok(entry_data) => {
                if entry_data.file_type().is_file() {
                    match entry_data.metadata() {
                        Ok(metadata) => total_size += metadata.len(),
                        Err(e) => {
                            warn!(
                                "Could not get metadata for {}: {}",
                                entry_data.path().display(),
                                e
                            );
                        }
                    }
                }
            }
            Err(e) => {
                warn!("Error traversing directory {}: {}", path.display(), e);
            }
        }
    }
    total_size
}

fn modified_time(path: &std::path::Path) -> Option<SystemTime> {
    match fs::metadata(path) {
        Ok(metadata) => metadata.modified().ok(),
        Err(e) => {
            warn!("Could not stat {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use tempfile::TempDir;

    use super::*;

    fn write_file(path: &Path, len: usize) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, vec![b'x'; len]).unwrap();
    }

    fn fixture() -> (TempDir, Config) {
        let tmp = TempDir::new().unwrap();
        let config = Config::with_library_dir(tmp.path().join("Library"));
        (tmp, config)
    }

    #[test]
    fn missing_directory_scans_as_empty() {
        let (_tmp, config) = fixture();
        let entries = scan_category(Category::DerivedData, &config).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn per_child_category_yields_one_entry_per_child_sorted_by_size() {
        let (_tmp, config) = fixture();
        let dd = config.derived_data_dir();
        write_file(&dd.join("ProjA-hash").join("Build/Products/app.bin"), 1_000);
        write_file(&dd.join("ProjB-hash").join("Index/store.db"), 2_500);
        write_file(&dd.join("ProjB-hash").join("Logs/build.log"), 500);

        let entries = scan_category(Category::DerivedData, &config).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "ProjB-hash");
        assert_eq!(entries[0].size_bytes, 3_000);
        assert_eq!(entries[1].name, "ProjA-hash");
        assert_eq!(entries[1].size_bytes, 1_000);
        assert!(entries.iter().all(|e| e.modified.is_some()));
    }

    #[test]
    fn empty_children_are_not_listed() {
        let (_tmp, config) = fixture();
        let dd = config.derived_data_dir();
        fs::create_dir_all(dd.join("EmptyProj")).unwrap();
        write_file(&dd.join(".DS_Store"), 0);
        write_file(&dd.join("RealProj").join("obj.o"), 10);

        let entries = scan_category(Category::DerivedData, &config).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "RealProj");
    }

    #[test]
    fn whole_dir_category_yields_single_entry_with_total_size() {
        let (_tmp, config) = fixture();
        let caches = config.xcode_caches_dir();
        write_file(&caches.join("fsCachedData/blob1"), 300);
        write_file(&caches.join("blob2"), 700);

        let entries = scan_category(Category::XcodeCaches, &config).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path, caches);
        assert_eq!(entries[0].size_bytes, 1_000);
    }

    #[test]
    fn empty_whole_dir_category_yields_no_entry() {
        let (_tmp, config) = fixture();
        fs::create_dir_all(config.previews_dir()).unwrap();
        let entries = scan_category(Category::Previews, &config).unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn report_groups_categories_in_catalog_order() {
        let (_tmp, config) = fixture();
        write_file(&config.xcode_caches_dir().join("blob"), 100);
        write_file(&config.derived_data_dir().join("Proj").join("f"), 400);
        write_file(&config.archives_dir().join("2026-08-01").join("a"), 200);

        let report = scan_categories(Category::all(), &config).await.unwrap();
        assert_eq!(report.entries.len(), 3);
        let order: Vec<Category> = report.entries.iter().map(|e| e.category).collect();
        assert_eq!(
            order,
            vec![
                Category::DerivedData,
                Category::Archives,
                Category::XcodeCaches
            ]
        );
        assert_eq!(report.total_bytes(), 700);
        assert_eq!(report.category_total(Category::DerivedData), 400);
        assert_eq!(report.category_count(Category::Previews), 0);
    }
}
