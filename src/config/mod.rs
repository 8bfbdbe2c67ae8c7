pub mod memory;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::memory::MemoryProbe;

/// Skin id stored when the user has never picked one. Resolves to the
/// built-in default skin.
pub const DEFAULT_SKIN_ID: &str = "-";

/// Persisted launcher configuration, loaded once at startup and mutated
/// in place afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Maximum memory granted to a launched game process, in megabytes.
    /// May be zero or negative on disk (fresh install, bad migration);
    /// corrected by [`Configuration::apply_startup_defaults`].
    pub max_memory_mb: i64,
    /// Id of the selected skin. Empty until startup defaulting runs.
    pub skin: String,
    /// Key unlocking private package listings. Empty for public installs.
    pub game_key: String,
    /// Extra JVM arguments passed through to launched processes.
    pub jvm_args: Vec<String>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            max_memory_mb: 0,
            skin: String::new(),
            game_key: String::new(),
            jvm_args: Vec::new(),
        }
    }
}

impl Configuration {
    /// Update incorrect or unset settings with defaults.
    ///
    /// Runs exactly once, during bootstrap, before any other component
    /// reads the configuration:
    /// - the memory ceiling is corrected against the probed physical
    ///   memory (see [`memory::correct`]);
    /// - an unset skin id is filled from the edition hint when one was
    ///   given on the command line, else the placeholder default.
    pub fn apply_startup_defaults(&mut self, edition_hint: Option<&str>, probe: &dyn MemoryProbe) {
        let available = probe.total_memory_gib();
        let corrected = memory::correct(self.max_memory_mb, available);
        if corrected != self.max_memory_mb {
            info!(
                configured = self.max_memory_mb,
                corrected = corrected,
                "corrected max memory setting"
            );
            self.max_memory_mb = corrected;
        }

        if self.skin.is_empty() {
            self.skin = match edition_hint {
                Some(edition) if !edition.is_empty() => edition.to_string(),
                _ => DEFAULT_SKIN_ID.to_string(),
            };
        }
    }
}
