use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::{Deserialize, Serialize};

use crate::skins::Skin;

/// Messages shown by the launcher for one locale, keyed by message id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocaleBundle {
    messages: HashMap<String, String>,
}

/// Compiled-in messages backing the default skin.
const DEFAULT_MESSAGES: &[(&str, &str)] = &[
    ("launcher.title", "Emberlight"),
    ("launcher.news", "News"),
    ("launcher.tips", "Tips"),
    ("launcher.support", "Support"),
    ("launcher.launch", "Launch"),
    ("launcher.accounts", "Accounts"),
    ("launcher.updateAvailable", "A launcher update is available."),
];

impl LocaleBundle {
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            messages: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn from_map(messages: HashMap<String, String>) -> Self {
        Self { messages }
    }

    pub fn builtin_default() -> Self {
        Self::from_pairs(DEFAULT_MESSAGES)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(String::as_str)
    }

    /// Translate a message id, falling back to the id itself when the
    /// bundle has no entry for it.
    pub fn tr(&self, key: &str) -> String {
        self.get(key).unwrap_or(key).to_string()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// The process-wide slot holding the currently active skin.
///
/// Exactly one of these exists per process, owned by the launcher state.
/// Bootstrap writes it once; a later skin change is the only other writer.
/// Publishing swaps an `Arc` pointer, so concurrent readers always observe
/// a fully formed skin.
pub struct ActiveSkin {
    inner: ArcSwap<Skin>,
}

impl ActiveSkin {
    pub fn new(skin: Skin) -> Self {
        Self {
            inner: ArcSwap::from_pointee(skin),
        }
    }

    pub fn current(&self) -> Arc<Skin> {
        self.inner.load_full()
    }

    /// Atomically publish a new skin. Single-writer discipline: callers
    /// outside bootstrap go through `Launcher::set_skin`.
    pub fn publish(&self, skin: Skin) {
        self.inner.store(Arc::new(skin));
    }
}

/// Forwarding accessor from "current localization" to "currently selected
/// skin".
///
/// Message lookup happens at many unrelated call sites which must not know
/// which skin is active; they hold a `SharedLocale` and nothing else. Every
/// lookup dereferences the live [`ActiveSkin`], so no bundle is ever cached
/// across a skin change.
#[derive(Clone)]
pub struct SharedLocale {
    active: Arc<ActiveSkin>,
}

impl SharedLocale {
    pub fn new(active: Arc<ActiveSkin>) -> Self {
        Self { active }
    }

    pub fn current_bundle(&self) -> Arc<LocaleBundle> {
        self.active.current().lang.clone()
    }

    pub fn tr(&self, key: &str) -> String {
        self.current_bundle().tr(key)
    }
}
