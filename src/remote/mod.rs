//! Remote endpoint URL construction.
//!
//! Endpoint templates carry exactly one `%s` slot. The substituted value is
//! UTF-8 percent-encoded, so rendering never fails for any input string;
//! the only failures are malformed templates, which are data errors in the
//! install properties or a skin bundle.

use thiserror::Error;
use url::Url;

/// Slot marker in endpoint templates.
const SLOT: &str = "%s";

#[derive(Debug, Error)]
pub enum UrlBuildError {
    #[error("template has no substitution slot: {0}")]
    MissingSlot(String),

    #[error("template has more than one substitution slot: {0}")]
    ExtraSlot(String),

    #[error("rendered URL is invalid: {0}")]
    Invalid(#[from] url::ParseError),
}

/// The remote resources the launcher resolves at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteEndpoint {
    /// News page, templated per skin, keyed by launcher version.
    News,
    /// Tip list, templated per skin, keyed by launcher version.
    Tips,
    /// Support page, templated per skin, keyed by launcher version.
    Support,
    /// Catalog of available skins, install-wide, keyed by launcher version.
    SkinsListing,
    /// Package listing, install-wide, keyed by the configured game key.
    PackagesListing,
}

/// Render a template by substituting the percent-encoded value into its
/// single slot and parsing the result.
pub fn build_url(template: &str, value: &str) -> Result<Url, UrlBuildError> {
    match template.matches(SLOT).count() {
        0 => return Err(UrlBuildError::MissingSlot(template.to_string())),
        1 => {}
        _ => return Err(UrlBuildError::ExtraSlot(template.to_string())),
    }

    let encoded = urlencoding::encode(value);
    let rendered = template.replacen(SLOT, &encoded, 1);
    Ok(Url::parse(&rendered)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_and_encodes_version() {
        let url = build_url("https://example.com/news.html?version=%s", "1.0 beta").unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.com/news.html?version=1.0%20beta"
        );
    }

    #[test]
    fn reserved_characters_round_trip() {
        let version = "1.0 beta+x/&?=";
        let url = build_url("https://example.com/n?v=%s", version).unwrap();
        let rendered = url.as_str();
        let substituted = rendered.strip_prefix("https://example.com/n?v=").unwrap();
        assert!(!substituted.contains(' '));
        assert!(!substituted.contains('&'));
        assert!(!substituted.contains('?'));
        assert_eq!(urlencoding::decode(substituted).unwrap(), version);
    }

    #[test]
    fn empty_value_is_allowed() {
        let url = build_url("https://example.com/packages.json?key=%s", "").unwrap();
        assert_eq!(url.as_str(), "https://example.com/packages.json?key=");
    }

    #[test]
    fn template_without_slot_is_rejected() {
        let err = build_url("https://example.com/static.html", "1.0").unwrap_err();
        assert!(matches!(err, UrlBuildError::MissingSlot(_)));
    }

    #[test]
    fn template_with_two_slots_is_rejected() {
        let err = build_url("https://example.com/%s/%s", "1.0").unwrap_err();
        assert!(matches!(err, UrlBuildError::ExtraSlot(_)));
    }

    #[test]
    fn garbage_template_is_rejected() {
        let err = build_url("not a url %s", "1.0").unwrap_err();
        assert!(matches!(err, UrlBuildError::Invalid(_)));
    }
}
