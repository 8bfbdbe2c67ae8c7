// ─── Emberlight Core ───
// Backend core of the Emberlight game launcher: builds process-wide state
// and coordinates startup. The GUI shell embeds this crate and owns
// everything visual.
//
// Architecture:
//   launcher/    - bootstrap orchestrator + process state
//   config/      - persisted configuration + memory correction
//   auth/        - account store with default selection
//   skins/       - skin values + resolver with default fallback
//   locale/      - message bundles, active-skin cell, locale indirection
//   remote/      - endpoint URL templating
//   instance/    - installed-instance registry
//   tasks/       - shared worker pool for fire-and-forget startup jobs
//   integration/ - OS URI-scheme registration
//   update/      - update-availability check
//   persistence  - JSON store load/save
//   paths        - data directory layout

pub mod auth;
pub mod config;
pub mod error;
pub mod instance;
pub mod integration;
pub mod launcher;
pub mod locale;
pub mod logging;
pub mod net;
pub mod paths;
pub mod persistence;
pub mod properties;
pub mod remote;
pub mod skins;
pub mod tasks;
pub mod update;

pub use error::{LauncherError, LauncherResult};
pub use launcher::{BootstrapHints, Launcher};
pub use remote::RemoteEndpoint;
