use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Deserialize;
use tracing::{info, warn};

/// Latest-version document published alongside launcher releases.
#[derive(Debug, Deserialize)]
struct LatestVersion {
    version: String,
}

/// Checks whether a newer launcher build has been published.
///
/// The check is a startup job: fire-and-forget, failures logged and
/// swallowed. Downloading and applying an update is handled elsewhere;
/// this only raises the flag the shell polls.
#[derive(Clone)]
pub struct UpdateManager {
    client: reqwest::Client,
    latest_version_url: String,
    current_version: String,
    update_available: Arc<AtomicBool>,
}

impl UpdateManager {
    pub fn new(
        client: reqwest::Client,
        latest_version_url: impl Into<String>,
        current_version: impl Into<String>,
    ) -> Self {
        Self {
            client,
            latest_version_url: latest_version_url.into(),
            current_version: current_version.into(),
            update_available: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn update_available(&self) -> bool {
        self.update_available.load(Ordering::Relaxed)
    }

    /// Fetch the published version and compare against the running one.
    pub async fn check_for_update(&self) {
        let latest = match self.fetch_latest().await {
            Ok(latest) => latest,
            Err(err) => {
                warn!(error = %err, "update check failed");
                return;
            }
        };

        if latest.version != self.current_version {
            info!(
                current = %self.current_version,
                latest = %latest.version,
                "launcher update available"
            );
            self.update_available.store(true, Ordering::Relaxed);
        } else {
            info!(version = %self.current_version, "launcher is up to date");
        }
    }

    async fn fetch_latest(&self) -> Result<LatestVersion, reqwest::Error> {
        self.client
            .get(&self.latest_version_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}
