/// Install-time properties baked into the binary.
///
/// Per-skin URL templates live on [`crate::skins::Skin`]; the templates here
/// are install-wide and do not change with the selected skin. Each template
/// carries a single `%s` slot filled by [`crate::remote::build_url`].
#[derive(Debug, Clone)]
pub struct InstallProperties {
    pub version: String,
    pub skins_list_url: String,
    pub packages_list_url: String,
    pub latest_version_url: String,
    pub uri_scheme: String,
}

const SKINS_LIST_URL: &str = "https://launcher.emberlight.app/skins.json?version=%s";
const PACKAGES_LIST_URL: &str = "https://launcher.emberlight.app/packages.json?key=%s";
const LATEST_VERSION_URL: &str = "https://launcher.emberlight.app/latest.json";
const URI_SCHEME: &str = "emberlight";

impl Default for InstallProperties {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            skins_list_url: SKINS_LIST_URL.to_string(),
            packages_list_url: PACKAGES_LIST_URL.to_string(),
            latest_version_url: LATEST_VERSION_URL.to_string(),
            uri_scheme: URI_SCHEME.to_string(),
        }
    }
}
