// xcclean-core/src/category.rs
//! The closed catalog of Xcode storage areas xcclean manages.

use std::fmt;
use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use xcclean_common::config::Config;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    DerivedData,
    Archives,
    IosDeviceSupport,
    WatchosDeviceSupport,
    TvosDeviceSupport,
    SimulatorCaches,
    Previews,
    XcodeCaches,
    DocumentationCache,
}

/// How a category breaks down into cleanable items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    /// Each child of the category directory is one item (a project build
    /// dir, an archive date folder, an OS build's symbols).
    PerChild,
    /// The category directory itself is the single item.
    WholeDir,
}

impl Category {
    pub fn all() -> &'static [Category] {
        &[
            Category::DerivedData,
            Category::Archives,
            Category::IosDeviceSupport,
            Category::WatchosDeviceSupport,
            Category::TvosDeviceSupport,
            Category::SimulatorCaches,
            Category::Previews,
            Category::XcodeCaches,
            Category::DocumentationCache,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::DerivedData => "DerivedData",
            Category::Archives => "Archives",
            Category::IosDeviceSupport => "iOS DeviceSupport",
            Category::WatchosDeviceSupport => "watchOS DeviceSupport",
            Category::TvosDeviceSupport => "tvOS DeviceSupport",
            Category::SimulatorCaches => "Simulator Caches",
            Category::Previews => "SwiftUI Previews",
            Category::XcodeCaches => "Xcode Caches",
            Category::DocumentationCache => "Documentation Cache",
        }
    }

    pub fn dir(&self, config: &Config) -> PathBuf {
        match self {
            Category::DerivedData => config.derived_data_dir(),
            Category::Archives => config.archives_dir(),
            Category::IosDeviceSupport => config.device_support_dir("iOS"),
            Category::WatchosDeviceSupport => config.device_support_dir("watchOS"),
            Category::TvosDeviceSupport => config.device_support_dir("tvOS"),
            Category::SimulatorCaches => config.simulator_caches_dir(),
            Category::Previews => config.previews_dir(),
            Category::XcodeCaches => config.xcode_caches_dir(),
            Category::DocumentationCache => config.documentation_cache_dir(),
        }
    }

    pub fn granularity(&self) -> Granularity {
        match self {
            Category::DerivedData
            | Category::Archives
            | Category::IosDeviceSupport
            | Category::WatchosDeviceSupport
            | Category::TvosDeviceSupport => Granularity::PerChild,
            Category::SimulatorCaches
            | Category::Previews
            | Category::XcodeCaches
            | Category::DocumentationCache => Granularity::WholeDir,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_dir_is_inside_the_library_root() {
        let config = Config::with_library_dir("/tmp/fixture/Library");
        for category in Category::all() {
            let dir = category.dir(&config);
            assert!(
                dir.starts_with(config.library_dir()),
                "{} resolves outside the library root: {}",
                category,
                dir.display()
            );
            assert_ne!(dir, config.library_dir());
        }
    }

    #[test]
    fn value_enum_parses_kebab_case_tokens() {
        use clap::ValueEnum;
        assert_eq!(
            Category::from_str("derived-data", false).unwrap(),
            Category::DerivedData
        );
        assert_eq!(
            Category::from_str("ios-device-support", false).unwrap(),
            Category::IosDeviceSupport
        );
        assert!(Category::from_str("system32", false).is_err());
    }
}
