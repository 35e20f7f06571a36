// xcclean-common/src/config.rs
use std::env;
use std::path::{Path, PathBuf};

use directories::UserDirs;
use tracing::debug;

use super::error::Result;

// Overrides the `~/Library` root, mainly for tests and unusual setups.
const LIBRARY_DIR_ENV: &str = "XCCLEAN_LIBRARY_DIR";

#[derive(Debug, Clone)]
pub struct Config {
    pub library_dir: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self> {
        debug!("Loading xcclean configuration");

        let library_dir = env::var(LIBRARY_DIR_ENV)
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_library_dir);

        debug!("Effective library root set to: {}", library_dir.display());
        Ok(Self { library_dir })
    }

    /// Builds a config rooted at an explicit directory, bypassing the
    /// environment. Used by tests to point at fixture trees.
    pub fn with_library_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            library_dir: dir.into(),
        }
    }

    pub fn library_dir(&self) -> &Path {
        &self.library_dir
    }

    pub fn developer_dir(&self) -> PathBuf {
        self.library_dir.join("Developer")
    }

    pub fn xcode_dir(&self) -> PathBuf {
        self.developer_dir().join("Xcode")
    }

    pub fn derived_data_dir(&self) -> PathBuf {
        self.xcode_dir().join("DerivedData")
    }

    pub fn archives_dir(&self) -> PathBuf {
        self.xcode_dir().join("Archives")
    }

    pub fn device_support_dir(&self, platform: &str) -> PathBuf {
        self.xcode_dir().join(format!("{platform} DeviceSupport"))
    }

    pub fn simulator_caches_dir(&self) -> PathBuf {
        self.developer_dir().join("CoreSimulator").join("Caches")
    }

    pub fn previews_dir(&self) -> PathBuf {
        self.xcode_dir().join("UserData").join("Previews")
    }

    pub fn xcode_caches_dir(&self) -> PathBuf {
        self.library_dir.join("Caches").join("com.apple.dt.Xcode")
    }

    pub fn documentation_cache_dir(&self) -> PathBuf {
        self.xcode_dir().join("DocumentationCache")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.library_dir.join("Logs").join("xcclean")
    }
}

fn default_library_dir() -> PathBuf {
    UserDirs::new().map_or_else(
        || PathBuf::from("/Library"),
        |ud| ud.home_dir().join("Library"),
    )
}

pub fn load_config() -> Result<Config> {
    Config::load()
}
