use std::path::{Path, PathBuf};

use crate::error::{LauncherError, LauncherResult};

const APP_DIR_NAME: &str = "Emberlight";

/// Filesystem layout of the launcher's data directory.
///
/// Everything the launcher persists lives under one base directory:
/// - `config.json`     - configuration store
/// - `accounts.json`   - account store
/// - `skins/`          - locally bundled skins, one folder per id
/// - `instances/`      - installed game instances
/// - `extract/`        - scratch space for archive extraction, purged at startup
/// - `logs/`           - rotating launcher logs
#[derive(Debug, Clone)]
pub struct LauncherDirs {
    base_dir: PathBuf,
}

impl LauncherDirs {
    /// Resolve the directory layout, creating the base directory.
    ///
    /// An explicit base dir (from the bootstrapper's command line) wins;
    /// otherwise the platform data dir is used. Failure to create the base
    /// directory means no persisted store is reachable at all, which is the
    /// one non-recoverable condition here.
    pub fn resolve(base_override: Option<PathBuf>) -> LauncherResult<Self> {
        let base_dir = match base_override {
            Some(dir) => dir,
            None => default_base_dir().join(APP_DIR_NAME),
        };

        std::fs::create_dir_all(&base_dir)
            .map_err(|_| LauncherError::DataDirUnavailable(base_dir.clone()))?;

        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn config_path(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn accounts_path(&self) -> PathBuf {
        self.base_dir.join("accounts.json")
    }

    pub fn skins_dir(&self) -> PathBuf {
        self.base_dir.join("skins")
    }

    pub fn instances_dir(&self) -> PathBuf {
        self.base_dir.join("instances")
    }

    pub fn extract_dir(&self) -> PathBuf {
        self.base_dir.join("extract")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.base_dir.join("logs")
    }
}

fn default_base_dir() -> PathBuf {
    dirs::data_dir().unwrap_or_else(|| PathBuf::from("."))
}
