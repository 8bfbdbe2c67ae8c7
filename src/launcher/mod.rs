use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use tracing::{info, warn};
use url::Url;

use crate::auth::AccountStore;
use crate::config::memory::{MemoryProbe, SystemProbe};
use crate::config::Configuration;
use crate::error::{LauncherError, LauncherResult};
use crate::instance::InstanceRegistry;
use crate::integration::UriScheme;
use crate::locale::{ActiveSkin, LocaleBundle, SharedLocale};
use crate::paths::LauncherDirs;
use crate::persistence;
use crate::properties::InstallProperties;
use crate::remote::{build_url, RemoteEndpoint, UrlBuildError};
use crate::skins::{NoRemoteSkins, RemoteSkinSource, Skin, SkinResolver};
use crate::tasks::{self, Tasks};
use crate::update::UpdateManager;

/// Guards against a second bootstrap in the same process. The sequence
/// builds process-wide state; running it twice is an invariant violation,
/// not a supported operation.
static BOOTSTRAPPED: AtomicBool = AtomicBool::new(false);

/// Hints forwarded from the command line by the embedding shell.
/// Argument parsing itself happens out there.
#[derive(Debug, Clone, Default)]
pub struct BootstrapHints {
    /// Overrides the platform data directory.
    pub base_dir: Option<PathBuf>,
    /// Edition preselects a skin id on first run.
    pub edition: Option<String>,
}

/// Fully initialized process state, handed to the shell once bootstrap
/// reaches READY.
///
/// Configuration and accounts sit behind locks: bootstrap is the only
/// writer until READY, and later settings edits go through
/// [`Launcher::update_config`] / [`Launcher::update_accounts`] to keep the
/// single-writer discipline explicit.
pub struct Launcher {
    dirs: LauncherDirs,
    properties: InstallProperties,
    config: RwLock<Configuration>,
    accounts: RwLock<AccountStore>,
    instances: InstanceRegistry,
    active_skin: Arc<ActiveSkin>,
    locale: SharedLocale,
    tasks: Tasks,
    update_manager: UpdateManager,
    http_client: reqwest::Client,
}

impl Launcher {
    /// Run the one-time startup sequence and return the initialized state.
    ///
    /// Per-step failures with a safe fallback (missing or corrupt stores,
    /// an unresolvable skin id) degrade and continue; only an unusable
    /// storage location or a repeated bootstrap abort with an error.
    pub fn bootstrap(hints: BootstrapHints) -> LauncherResult<Launcher> {
        if BOOTSTRAPPED
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(LauncherError::AlreadyBootstrapped);
        }

        let result = Self::bootstrap_with(hints, &SystemProbe, Box::new(NoRemoteSkins));
        if result.is_err() {
            // A failed attempt never reached READY; allow a retry.
            BOOTSTRAPPED.store(false, Ordering::SeqCst);
        }
        result
    }

    /// The bootstrap sequence with its host collaborators injected.
    pub(crate) fn bootstrap_with(
        hints: BootstrapHints,
        probe: &dyn MemoryProbe,
        remote_skins: Box<dyn RemoteSkinSource>,
    ) -> LauncherResult<Launcher> {
        let properties = InstallProperties::default();
        info!(version = %properties.version, "bootstrapping launcher");

        let dirs = LauncherDirs::resolve(hints.base_dir.clone())?;
        info!(base_dir = ?dirs.base_dir(), "using data directory");

        let mut config: Configuration = load_or_default(&dirs.config_path(), "configuration")?;
        config.apply_startup_defaults(hints.edition.as_deref(), probe);

        let mut accounts: AccountStore = load_or_default(&dirs.accounts_path(), "accounts")?;
        accounts.select_default();

        let instances = InstanceRegistry::load(&dirs.instances_dir());
        info!(count = instances.len(), "loaded instance registry");

        let resolver = SkinResolver::new(dirs.skins_dir(), remote_skins);
        let skin = resolver.resolve(&config.skin);
        info!(skin = %skin.id, "active skin resolved");
        let active_skin = Arc::new(ActiveSkin::new(skin));

        // Installed strictly after the skin is published: lookups during
        // the rest of bootstrap already resolve against the active skin.
        let locale = SharedLocale::new(active_skin.clone());

        let http_client = crate::net::build_http_client()?;
        let update_manager = UpdateManager::new(
            http_client.clone(),
            properties.latest_version_url.clone(),
            properties.version.clone(),
        );
        let tasks = Tasks::new()?;

        let launcher = Launcher {
            dirs,
            properties,
            config: RwLock::new(config),
            accounts: RwLock::new(accounts),
            instances,
            active_skin,
            locale,
            tasks,
            update_manager,
            http_client,
        };

        launcher.dispatch_startup_jobs();
        info!("bootstrap complete");
        Ok(launcher)
    }

    /// Submit the independent startup jobs. None is awaited; none may
    /// block the return to the caller, and their failures stay inside
    /// the worker pool.
    fn dispatch_startup_jobs(&self) {
        let extract_dir = self.dirs.extract_dir();
        self.tasks
            .submit(move || tasks::cleanup_extract_dir(&extract_dir));

        let scheme = UriScheme::new(self.properties.uri_scheme.clone());
        self.tasks.submit(move || scheme.install());

        let update = self.update_manager.clone();
        self.tasks.spawn(async move { update.check_for_update().await });
    }

    // ── ProcessState surface ────────────────────────────

    pub fn dirs(&self) -> &LauncherDirs {
        &self.dirs
    }

    pub fn version(&self) -> &str {
        &self.properties.version
    }

    pub fn properties(&self) -> &InstallProperties {
        &self.properties
    }

    /// Snapshot of the current configuration.
    pub fn config(&self) -> Configuration {
        self.config.read().unwrap().clone()
    }

    /// Mutate the configuration under the write lock and persist it.
    pub fn update_config(&self, mutate: impl FnOnce(&mut Configuration)) -> LauncherResult<()> {
        let snapshot = {
            let mut config = self.config.write().unwrap();
            mutate(&mut config);
            config.clone()
        };
        persistence::save(&self.dirs.config_path(), &snapshot)?;
        Ok(())
    }

    /// Snapshot of the current account store.
    pub fn accounts(&self) -> AccountStore {
        self.accounts.read().unwrap().clone()
    }

    /// Mutate the account store under the write lock and persist it.
    pub fn update_accounts(&self, mutate: impl FnOnce(&mut AccountStore)) -> LauncherResult<()> {
        let snapshot = {
            let mut accounts = self.accounts.write().unwrap();
            mutate(&mut accounts);
            accounts.clone()
        };
        persistence::save(&self.dirs.accounts_path(), &snapshot)?;
        Ok(())
    }

    pub fn instances(&self) -> &InstanceRegistry {
        &self.instances
    }

    /// The currently active skin.
    pub fn active_skin(&self) -> Arc<Skin> {
        self.active_skin.current()
    }

    /// Atomically publish a new active skin. The localization indirection
    /// and every endpoint template pick it up on their next read.
    pub fn set_skin(&self, skin: Skin) {
        info!(skin = %skin.id, "switching active skin");
        self.active_skin.publish(skin);
    }

    /// The process-wide localization indirection. Consumers hold a clone
    /// of this, never a bundle.
    pub fn locale(&self) -> &SharedLocale {
        &self.locale
    }

    pub fn current_bundle(&self) -> Arc<LocaleBundle> {
        self.locale.current_bundle()
    }

    pub fn update_manager(&self) -> &UpdateManager {
        &self.update_manager
    }

    pub fn http_client(&self) -> &reqwest::Client {
        &self.http_client
    }

    /// Build the fully qualified URL for a remote endpoint from the
    /// template and value sources the endpoint prescribes.
    pub fn resolve_url(&self, endpoint: RemoteEndpoint) -> Result<Url, UrlBuildError> {
        match endpoint {
            RemoteEndpoint::News => {
                build_url(&self.active_skin.current().news_url, self.version())
            }
            RemoteEndpoint::Tips => {
                build_url(&self.active_skin.current().tips_url, self.version())
            }
            RemoteEndpoint::Support => {
                build_url(&self.active_skin.current().support_url, self.version())
            }
            RemoteEndpoint::SkinsListing => {
                build_url(&self.properties.skins_list_url, self.version())
            }
            RemoteEndpoint::PackagesListing => {
                let game_key = self.config.read().unwrap().game_key.clone();
                build_url(&self.properties.packages_list_url, &game_key)
            }
        }
    }
}

fn load_or_default<T>(path: &std::path::Path, what: &str) -> LauncherResult<T>
where
    T: serde::de::DeserializeOwned + Default,
{
    match persistence::load(path) {
        Ok(value) => Ok(value),
        Err(err) if err.is_recoverable() => {
            warn!(store = what, error = %err, "using default store");
            Ok(T::default())
        }
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Account;
    use crate::config::memory::UnknownProbe;
    use crate::config::DEFAULT_SKIN_ID;
    use tempfile::TempDir;

    fn hints(dir: &TempDir) -> BootstrapHints {
        BootstrapHints {
            base_dir: Some(dir.path().join("data")),
            edition: None,
        }
    }

    fn boot(dir: &TempDir) -> Launcher {
        Launcher::bootstrap_with(hints(dir), &UnknownProbe, Box::new(NoRemoteSkins)).unwrap()
    }

    #[test]
    fn fresh_install_boots_with_defaults() {
        let tmp = TempDir::new().unwrap();
        let launcher = boot(&tmp);

        let config = launcher.config();
        assert_eq!(config.max_memory_mb, 8 * 1024);
        assert_eq!(config.skin, DEFAULT_SKIN_ID);
        assert!(launcher.accounts().is_empty());
        assert!(launcher.instances().is_empty());
        assert_eq!(launcher.active_skin().id, DEFAULT_SKIN_ID);
    }

    #[test]
    fn corrupt_stores_degrade_to_defaults() {
        let tmp = TempDir::new().unwrap();
        let base = tmp.path().join("data");
        std::fs::create_dir_all(&base).unwrap();
        std::fs::write(base.join("config.json"), "{broken").unwrap();
        std::fs::write(base.join("accounts.json"), "not even json").unwrap();

        let launcher = boot(&tmp);
        assert_eq!(launcher.config().skin, DEFAULT_SKIN_ID);
        assert!(launcher.accounts().is_empty());
    }

    #[test]
    fn edition_hint_seeds_the_skin_id() {
        let tmp = TempDir::new().unwrap();
        let launcher = Launcher::bootstrap_with(
            BootstrapHints {
                base_dir: Some(tmp.path().join("data")),
                edition: Some("ruby".to_string()),
            },
            &UnknownProbe,
            Box::new(NoRemoteSkins),
        )
        .unwrap();

        assert_eq!(launcher.config().skin, "ruby");
        // No such skin is bundled, so the default is published.
        assert_eq!(launcher.active_skin().id, DEFAULT_SKIN_ID);
    }

    #[test]
    fn stored_accounts_get_a_default_selection() {
        let tmp = TempDir::new().unwrap();
        let base = tmp.path().join("data");

        let mut store = AccountStore::default();
        store.add(Account {
            id: "first".to_string(),
            username: "First".to_string(),
            uuid: "u-1".to_string(),
        });
        store.add(Account {
            id: "second".to_string(),
            username: "Second".to_string(),
            uuid: "u-2".to_string(),
        });
        persistence::save(&base.join("accounts.json"), &store).unwrap();

        let launcher = boot(&tmp);
        assert_eq!(launcher.accounts().selected_account().unwrap().id, "first");
    }

    #[test]
    fn bundled_skin_is_resolved_and_published() {
        let tmp = TempDir::new().unwrap();
        let base = tmp.path().join("data");

        persistence::save(
            &base.join("config.json"),
            &Configuration {
                skin: "aurora".to_string(),
                max_memory_mb: 2048,
                ..Configuration::default()
            },
        )
        .unwrap();
        let skin_dir = base.join("skins").join("aurora");
        std::fs::create_dir_all(&skin_dir).unwrap();
        std::fs::write(
            skin_dir.join("skin.json"),
            r#"{"name": "Aurora", "news_url": "https://aurora.example/news?v=%s"}"#,
        )
        .unwrap();

        let launcher = boot(&tmp);
        assert_eq!(launcher.active_skin().name, "Aurora");
        assert_eq!(
            launcher.resolve_url(RemoteEndpoint::News).unwrap().as_str(),
            format!("https://aurora.example/news?v={}", launcher.version())
        );
    }

    #[test]
    fn endpoint_urls_use_their_template_and_value_sources() {
        let tmp = TempDir::new().unwrap();
        let launcher = boot(&tmp);

        let news = launcher.resolve_url(RemoteEndpoint::News).unwrap();
        assert!(news.as_str().contains(launcher.version()));

        let skins = launcher.resolve_url(RemoteEndpoint::SkinsListing).unwrap();
        assert!(skins.as_str().contains(launcher.version()));

        // Empty game key is allowed and renders an empty slot.
        let packages = launcher
            .resolve_url(RemoteEndpoint::PackagesListing)
            .unwrap();
        assert!(packages.as_str().ends_with("key="));

        launcher
            .update_config(|config| config.game_key = "secret key".to_string())
            .unwrap();
        let packages = launcher
            .resolve_url(RemoteEndpoint::PackagesListing)
            .unwrap();
        assert!(packages.as_str().ends_with("key=secret%20key"));
    }

    #[test]
    fn config_edits_persist_across_boots() {
        let tmp = TempDir::new().unwrap();
        {
            let launcher = boot(&tmp);
            launcher
                .update_config(|config| config.max_memory_mb = 4096)
                .unwrap();
        }
        let launcher = boot(&tmp);
        assert_eq!(launcher.config().max_memory_mb, 4096);
    }

    #[test]
    fn skin_change_reaches_the_locale_indirection() {
        let tmp = TempDir::new().unwrap();
        let launcher = boot(&tmp);
        let locale = launcher.locale().clone();
        assert_eq!(locale.tr("launcher.title"), "Emberlight");

        let mut skin = Skin::default_skin();
        skin.id = "night".to_string();
        skin.lang = Arc::new(LocaleBundle::from_pairs(&[("launcher.title", "Night")]));
        launcher.set_skin(skin);

        assert_eq!(locale.tr("launcher.title"), "Night");
    }

    #[test]
    fn second_public_bootstrap_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let first = Launcher::bootstrap(hints(&tmp));
        assert!(first.is_ok());

        let second = Launcher::bootstrap(hints(&tmp));
        assert!(matches!(second, Err(LauncherError::AlreadyBootstrapped)));
    }
}
