use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

const INSTANCE_MANIFEST: &str = "instance.json";

/// An installed game instance, persisted as `instances/<id>/instance.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instance {
    pub id: String,
    pub name: String,
    pub path: PathBuf,
    pub created_at: DateTime<Utc>,
    pub last_played: Option<DateTime<Utc>>,
}

impl Instance {
    pub fn new(name: String, instances_dir: &Path) -> Self {
        let id = Uuid::new_v4().to_string();
        let path = instances_dir.join(&id);
        Self {
            id,
            name,
            path,
            created_at: Utc::now(),
            last_played: None,
        }
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.path.join(INSTANCE_MANIFEST)
    }
}

/// The set of instances known to this install, loaded once at startup.
///
/// Install/update/delete flows live outside the bootstrap core; they rescan
/// through [`InstanceRegistry::load`] after mutating the directory.
#[derive(Debug, Default)]
pub struct InstanceRegistry {
    instances: Vec<Instance>,
}

impl InstanceRegistry {
    /// Scan the instances directory. A missing directory is an empty
    /// registry; an entry with an unreadable or corrupt manifest is skipped
    /// with a warning rather than failing the whole scan.
    pub fn load(instances_dir: &Path) -> Self {
        let mut instances = Vec::new();

        let entries = match std::fs::read_dir(instances_dir) {
            Ok(entries) => entries,
            Err(_) => return Self { instances },
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let manifest = path.join(INSTANCE_MANIFEST);
            if !manifest.exists() {
                continue;
            }
            match std::fs::read_to_string(&manifest) {
                Ok(json) => match serde_json::from_str::<Instance>(&json) {
                    Ok(instance) => instances.push(instance),
                    Err(err) => {
                        warn!(path = ?manifest, error = %err, "corrupt instance manifest, skipping");
                    }
                },
                Err(err) => {
                    warn!(path = ?manifest, error = %err, "cannot read instance manifest, skipping");
                }
            }
        }

        instances.sort_by(|a, b| a.name.cmp(&b.name));
        Self { instances }
    }

    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    pub fn get(&self, id: &str) -> Option<&Instance> {
        self.instances.iter().find(|i| i.id == id)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}
