use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::DEFAULT_SKIN_ID;
use crate::error::LauncherResult;
use crate::locale::LocaleBundle;

const DEFAULT_NEWS_URL: &str = "https://launcher.emberlight.app/news.html?version=%s";
const DEFAULT_TIPS_URL: &str = "https://launcher.emberlight.app/tips.json?version=%s";
const DEFAULT_SUPPORT_URL: &str = "https://emberlight.app/support?version=%s";

/// An immutable visual/localization variant.
///
/// A skin bundles the launcher's message catalog with the per-skin remote
/// endpoints (each a template with one `%s` slot for the encoded launcher
/// version). Skins are values: changing skin means publishing a new one,
/// never mutating the current one.
#[derive(Debug, Clone)]
pub struct Skin {
    pub id: String,
    pub name: String,
    pub news_url: String,
    pub tips_url: String,
    pub support_url: String,
    pub lang: Arc<LocaleBundle>,
}

impl Skin {
    /// The compiled-in skin used when nothing else resolves.
    pub fn default_skin() -> Self {
        Self {
            id: DEFAULT_SKIN_ID.to_string(),
            name: "Emberlight".to_string(),
            news_url: DEFAULT_NEWS_URL.to_string(),
            tips_url: DEFAULT_TIPS_URL.to_string(),
            support_url: DEFAULT_SUPPORT_URL.to_string(),
            lang: Arc::new(LocaleBundle::builtin_default()),
        }
    }
}

/// On-disk shape of `skins/<id>/skin.json`.
///
/// Unset templates fall back to the defaults so a skin can restyle only
/// what it cares about.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SkinManifest {
    pub name: String,
    pub news_url: String,
    pub tips_url: String,
    pub support_url: String,
    pub messages: HashMap<String, String>,
}

impl Default for SkinManifest {
    fn default() -> Self {
        Self {
            name: String::new(),
            news_url: DEFAULT_NEWS_URL.to_string(),
            tips_url: DEFAULT_TIPS_URL.to_string(),
            support_url: DEFAULT_SUPPORT_URL.to_string(),
            messages: HashMap::new(),
        }
    }
}

impl SkinManifest {
    fn into_skin(self, id: &str) -> Skin {
        let lang = if self.messages.is_empty() {
            Arc::new(LocaleBundle::builtin_default())
        } else {
            Arc::new(LocaleBundle::from_map(self.messages))
        };
        Skin {
            id: id.to_string(),
            name: if self.name.is_empty() {
                id.to_string()
            } else {
                self.name
            },
            news_url: self.news_url,
            tips_url: self.tips_url,
            support_url: self.support_url,
            lang,
        }
    }
}

/// Source of skins not bundled with the install.
///
/// The network side lives in an external collaborator; bootstrap only needs
/// the seam. `Ok(None)` means the id is unknown upstream.
pub trait RemoteSkinSource: Send + Sync {
    fn fetch(&self, id: &str) -> LauncherResult<Option<Skin>>;
}

/// Installs without a remote skin catalog.
pub struct NoRemoteSkins;

impl RemoteSkinSource for NoRemoteSkins {
    fn fetch(&self, _id: &str) -> LauncherResult<Option<Skin>> {
        Ok(None)
    }
}

/// Turns a configured skin id into a concrete [`Skin`].
pub struct SkinResolver {
    skins_dir: PathBuf,
    remote: Box<dyn RemoteSkinSource>,
}

impl SkinResolver {
    pub fn new(skins_dir: PathBuf, remote: Box<dyn RemoteSkinSource>) -> Self {
        Self { skins_dir, remote }
    }

    /// Resolve a configured id to a skin.
    ///
    /// Empty and placeholder ids mean the default skin. Other ids try the
    /// local bundle first, then the remote source. Resolution failures are
    /// absorbed: whatever goes wrong, the caller gets a usable skin and
    /// startup proceeds.
    pub fn resolve(&self, configured_id: &str) -> Skin {
        if configured_id.is_empty() || configured_id == DEFAULT_SKIN_ID {
            return Skin::default_skin();
        }

        if let Some(skin) = self.load_local(configured_id) {
            return skin;
        }

        match self.remote.fetch(configured_id) {
            Ok(Some(skin)) => skin,
            Ok(None) => {
                warn!(id = configured_id, "skin not found, using default");
                Skin::default_skin()
            }
            Err(err) => {
                warn!(id = configured_id, error = %err, "skin resolution failed, using default");
                Skin::default_skin()
            }
        }
    }

    fn load_local(&self, id: &str) -> Option<Skin> {
        let manifest_path = self.skins_dir.join(id).join("skin.json");
        if !manifest_path.exists() {
            debug!(id, "no local skin bundle");
            return None;
        }

        let raw = match std::fs::read_to_string(&manifest_path) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(path = ?manifest_path, error = %err, "cannot read skin manifest");
                return None;
            }
        };

        match serde_json::from_str::<SkinManifest>(&raw) {
            Ok(manifest) => Some(manifest.into_skin(id)),
            Err(err) => {
                warn!(path = ?manifest_path, error = %err, "corrupt skin manifest");
                None
            }
        }
    }
}
