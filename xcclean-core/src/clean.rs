// xcclean-core/src/clean.rs
//! Removes scanned items, with containment checks so nothing outside the
//! managed storage areas is ever touched.

use std::path::{Component, Path};
use std::time::{Duration, SystemTime};
use std::{fs, io};

use tracing::{debug, warn};
use xcclean_common::config::Config;
use xcclean_common::error::{Result, XccleanError};

use crate::scan::ScanEntry;

#[derive(Debug, Clone, Default)]
pub struct CleanOptions {
    /// Report what would be removed without deleting anything.
    pub dry_run: bool,
    /// Only remove entries whose last modification is at least this old.
    pub older_than: Option<Duration>,
}

#[derive(Debug, Default)]
pub struct CleanOutcome {
    pub removed: Vec<ScanEntry>,
    pub skipped: Vec<(ScanEntry, String)>,
    pub failed: Vec<(ScanEntry, XccleanError)>,
    pub freed_bytes: u64,
}

impl CleanOutcome {
    pub fn is_clean_failure(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Removes (or, under `dry_run`, pretends to remove) the given entries.
///
/// Per-entry failures never abort the batch; they are collected in the
/// outcome. An entry that vanished between scan and clean counts as removed.
pub fn clean_entries(entries: &[ScanEntry], config: &Config, opts: &CleanOptions) -> CleanOutcome {
    let mut outcome = CleanOutcome::default();

    for entry in entries {
        if let Some(min_age) = opts.older_than {
            if !is_old_enough(entry, min_age) {
                debug!(
                    "Skipping {} ({}): younger than the requested age",
                    entry.name,
                    entry.path.display()
                );
                outcome.skipped.push((
                    entry.clone(),
                    format!("modified within the last {}", humantime_approx(min_age)),
                ));
                continue;
            }
        }

        let root = entry.category.dir(config);
        if let Err(e) = check_containment(&entry.path, &root, config) {
            warn!("Refusing to remove {}: {}", entry.path.display(), e);
            outcome.failed.push((entry.clone(), e));
            continue;
        }

        if opts.dry_run {
            debug!("Dry run, keeping {}", entry.path.display());
            outcome.freed_bytes += entry.size_bytes;
            outcome.removed.push(entry.clone());
            continue;
        }

        match remove_artifact(&entry.path) {
            Ok(()) => {
                outcome.freed_bytes += entry.size_bytes;
                outcome.removed.push(entry.clone());
            }
            Err(e) => outcome.failed.push((entry.clone(), e)),
        }
    }

    outcome
}

/// Splits entries into those old enough to remove under `min_age` and those
/// modified more recently. Callers that prompt before cleaning use this so
/// the preview matches what will actually be removed.
pub fn partition_by_age(
    entries: &[ScanEntry],
    min_age: Duration,
) -> (Vec<ScanEntry>, Vec<ScanEntry>) {
    entries
        .iter()
        .cloned()
        .partition(|entry| is_old_enough(entry, min_age))
}

fn is_old_enough(entry: &ScanEntry, min_age: Duration) -> bool {
    match entry
        .modified
        .and_then(|m| SystemTime::now().duration_since(m).ok())
    {
        Some(age) => age >= min_age,
        // Unknown or in-the-future mtime: keep the item, deleting on a guess
        // is the wrong default.
        None => false,
    }
}

/// An entry may only be removed if it is the category directory itself or a
/// path strictly inside it, which in turn must sit inside the library root.
fn check_containment(path: &Path, category_root: &Path, config: &Config) -> Result<()> {
    if path
        .components()
        .any(|c| matches!(c, Component::ParentDir | Component::CurDir))
    {
        return Err(XccleanError::UnsafePath(path.display().to_string()));
    }
    if !path.is_absolute()
        || !path.starts_with(category_root)
        || !category_root.starts_with(config.library_dir())
        || path == config.library_dir()
    {
        return Err(XccleanError::UnsafePath(path.display().to_string()));
    }
    Ok(())
}

/// Removes a filesystem artifact (file, symlink or directory).
///
/// Symlinks are removed as links, never followed. A path that is already
/// gone is treated as success.
fn remove_artifact(path: &Path) -> Result<()> {
    let metadata = match path.symlink_metadata() {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("Artifact already gone: {}", path.display());
            return Ok(());
        }
        Err(e) => {
            return Err(XccleanError::Clean(format!(
                "Failed to stat {}: {}",
                path.display(),
                e
            )))
        }
    };

    let file_type = metadata.file_type();
    // A directory is only a "real" directory if it's not a symlink.
    let is_real_dir = file_type.is_dir();
    debug!(
        "Removing {} at: {}",
        if is_real_dir {
            "directory"
        } else if file_type.is_symlink() {
            "symlink"
        } else {
            "file"
        },
        path.display()
    );

    let removal = if is_real_dir {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    match removal {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(XccleanError::Clean(format!(
            "Failed to remove {}: {}",
            path.display(),
            e
        ))),
    }
}

fn humantime_approx(d: Duration) -> String {
    humantime::format_duration(Duration::from_secs(d.as_secs())).to_string()
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use tempfile::TempDir;

    use super::*;
    use crate::category::Category;
    use crate::scan::scan_category;

    fn write_file(path: &Path, len: usize) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, vec![b'x'; len]).unwrap();
    }

    fn derived_data_fixture() -> (TempDir, Config) {
        let tmp = TempDir::new().unwrap();
        let config = Config::with_library_dir(tmp.path().join("Library"));
        write_file(&config.derived_data_dir().join("ProjA").join("a.o"), 1_000);
        write_file(&config.derived_data_dir().join("ProjB").join("b.o"), 2_000);
        (tmp, config)
    }

    #[test]
    fn dry_run_removes_nothing_but_reports_freed_bytes() {
        let (_tmp, config) = derived_data_fixture();
        let entries = scan_category(Category::DerivedData, &config).unwrap();

        let outcome = clean_entries(
            &entries,
            &config,
            &CleanOptions {
                dry_run: true,
                older_than: None,
            },
        );

        assert_eq!(outcome.removed.len(), 2);
        assert_eq!(outcome.freed_bytes, 3_000);
        assert!(outcome.failed.is_empty());
        for entry in &entries {
            assert!(entry.path.exists(), "{} was deleted", entry.path.display());
        }
    }

    #[test]
    fn clean_removes_exactly_the_scanned_entries() {
        let (_tmp, config) = derived_data_fixture();
        let entries = scan_category(Category::DerivedData, &config).unwrap();

        let outcome = clean_entries(&entries, &config, &CleanOptions::default());

        assert_eq!(outcome.removed.len(), 2);
        assert_eq!(outcome.freed_bytes, 3_000);
        assert!(!outcome.is_clean_failure());
        for entry in &entries {
            assert!(!entry.path.exists());
        }
        // The category root itself stays in place.
        assert!(config.derived_data_dir().exists());
    }

    #[test]
    fn older_than_skips_freshly_modified_entries() {
        let (_tmp, config) = derived_data_fixture();
        let entries = scan_category(Category::DerivedData, &config).unwrap();

        let outcome = clean_entries(
            &entries,
            &config,
            &CleanOptions {
                dry_run: false,
                older_than: Some(Duration::from_secs(3_600)),
            },
        );

        assert!(outcome.removed.is_empty());
        assert_eq!(outcome.skipped.len(), 2);
        assert_eq!(outcome.freed_bytes, 0);
        for entry in &entries {
            assert!(entry.path.exists());
        }
    }

    #[test]
    fn partition_by_age_separates_fresh_entries() {
        let (_tmp, config) = derived_data_fixture();
        let entries = scan_category(Category::DerivedData, &config).unwrap();

        let (old, fresh) = partition_by_age(&entries, Duration::from_secs(3_600));
        assert!(old.is_empty());
        assert_eq!(fresh.len(), 2);

        let (old, fresh) = partition_by_age(&entries, Duration::ZERO);
        assert_eq!(old.len(), 2);
        assert!(fresh.is_empty());
    }

    #[test]
    fn refuses_paths_outside_the_category_root() {
        let (tmp, config) = derived_data_fixture();
        let stray = tmp.path().join("precious.txt");
        fs::write(&stray, b"keep me").unwrap();

        let rogue = ScanEntry {
            category: Category::DerivedData,
            name: "precious.txt".into(),
            path: stray.clone(),
            size_bytes: 7,
            modified: None,
        };

        let outcome = clean_entries(&[rogue], &config, &CleanOptions::default());
        assert!(outcome.removed.is_empty());
        assert_eq!(outcome.failed.len(), 1);
        assert!(matches!(outcome.failed[0].1, XccleanError::UnsafePath(_)));
        assert!(stray.exists());
    }

    #[test]
    fn refuses_parent_dir_components() {
        let (_tmp, config) = derived_data_fixture();
        let sneaky = ScanEntry {
            category: Category::DerivedData,
            name: "sneaky".into(),
            path: config.derived_data_dir().join("..").join("Xcode"),
            size_bytes: 0,
            modified: None,
        };

        let outcome = clean_entries(&[sneaky], &config, &CleanOptions::default());
        assert_eq!(outcome.failed.len(), 1);
        assert!(matches!(outcome.failed[0].1, XccleanError::UnsafePath(_)));
    }

    #[test]
    fn vanished_entry_counts_as_removed() {
        let (_tmp, config) = derived_data_fixture();
        let entries = scan_category(Category::DerivedData, &config).unwrap();
        fs::remove_dir_all(&entries[0].path).unwrap();

        let outcome = clean_entries(&entries, &config, &CleanOptions::default());
        assert_eq!(outcome.removed.len(), 2);
        assert!(outcome.failed.is_empty());
    }

    #[test]
    fn symlinked_entry_is_unlinked_not_followed() {
        let (tmp, config) = derived_data_fixture();
        let target = tmp.path().join("real-checkout");
        write_file(&target.join("src.rs"), 100);
        let link = config.derived_data_dir().join("LinkedProj");
        #[cfg(unix)]
        std::os::unix::fs::symlink(&target, &link).unwrap();
        #[cfg(not(unix))]
        return;

        let entries = scan_category(Category::DerivedData, &config).unwrap();
        let linked: Vec<ScanEntry> = entries
            .into_iter()
            .filter(|e| e.name == "LinkedProj")
            .collect();
        assert_eq!(linked.len(), 1);

        let outcome = clean_entries(&linked, &config, &CleanOptions::default());
        assert_eq!(outcome.removed.len(), 1);
        assert!(!link.exists());
        assert!(target.join("src.rs").exists(), "symlink target was deleted");
    }
}
