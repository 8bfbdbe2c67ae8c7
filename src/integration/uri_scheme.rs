//! OS handler registration for the launcher's custom URI scheme.
//!
//! Runs as a startup job on the worker pool. Registration is best effort:
//! nothing in the launcher depends on it succeeding, so every failure is
//! logged and swallowed, and unsupported platforms no-op.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

pub struct UriScheme {
    scheme: String,
}

impl UriScheme {
    pub fn new(scheme: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
        }
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Register this process as the handler for `<scheme>://` links.
    pub fn install(&self) {
        match self.install_inner() {
            Ok(true) => info!(scheme = %self.scheme, "registered URI scheme handler"),
            Ok(false) => debug!(scheme = %self.scheme, "URI scheme registration not supported here"),
            Err(err) => warn!(scheme = %self.scheme, error = %err, "URI scheme registration failed"),
        }
    }

    #[cfg(target_os = "linux")]
    fn install_inner(&self) -> std::io::Result<bool> {
        let Ok(exe) = std::env::current_exe() else {
            return Ok(false);
        };
        let Some(applications_dir) = dirs::data_dir().map(|d| d.join("applications")) else {
            return Ok(false);
        };
        self.write_desktop_entry(&applications_dir, &exe)?;
        Ok(true)
    }

    #[cfg(not(target_os = "linux"))]
    fn install_inner(&self) -> std::io::Result<bool> {
        // Windows registry / macOS Launch Services wiring is carried out by
        // the platform installer package, not at runtime.
        Ok(false)
    }

    #[allow(dead_code)]
    fn write_desktop_entry(&self, applications_dir: &Path, exe: &Path) -> std::io::Result<()> {
        std::fs::create_dir_all(applications_dir)?;
        let entry = format!(
            "[Desktop Entry]\n\
             Type=Application\n\
             Name=Emberlight\n\
             Exec={} %u\n\
             NoDisplay=true\n\
             MimeType=x-scheme-handler/{};\n",
            exe.display(),
            self.scheme
        );
        std::fs::write(self.desktop_entry_path(applications_dir), entry)
    }

    fn desktop_entry_path(&self, applications_dir: &Path) -> PathBuf {
        applications_dir.join(format!("emberlight-{}.desktop", self.scheme))
    }
}
