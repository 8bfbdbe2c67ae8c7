use serde::{Deserialize, Serialize};

/// A stored credential record. Tokens are managed by the login flow and
/// refreshed outside the bootstrap path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    /// Stable identifier (login name or provider id).
    pub id: String,
    /// Display name shown in the account picker.
    pub username: String,
    /// Player uuid assigned by the auth provider.
    pub uuid: String,
}

/// Ordered collection of stored accounts with a single selection.
///
/// `selected` is a relation into `accounts` by id, never a second copy of
/// the record. A selection that no longer matches any stored account is
/// treated as no selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountStore {
    accounts: Vec<Account>,
    selected: Option<String>,
}

impl AccountStore {
    /// Apply the load-time selection rule: if accounts exist and nothing is
    /// selected, the first stored account becomes selected. Called exactly
    /// once, right after the store is deserialized; it never re-fires.
    pub fn select_default(&mut self) {
        if let Some(id) = &self.selected {
            if !self.accounts.iter().any(|a| &a.id == id) {
                self.selected = None;
            }
        }

        if self.selected.is_none() {
            if let Some(first) = self.accounts.first() {
                self.selected = Some(first.id.clone());
            }
        }
    }

    pub fn selected_account(&self) -> Option<&Account> {
        let id = self.selected.as_ref()?;
        self.accounts.iter().find(|a| &a.id == id)
    }

    pub fn select(&mut self, id: &str) -> bool {
        if self.accounts.iter().any(|a| a.id == id) {
            self.selected = Some(id.to_string());
            true
        } else {
            false
        }
    }

    pub fn add(&mut self, account: Account) {
        if let Some(existing) = self.accounts.iter_mut().find(|a| a.id == account.id) {
            *existing = account;
        } else {
            self.accounts.push(account);
        }
    }

    pub fn remove(&mut self, id: &str) {
        self.accounts.retain(|a| a.id != id);
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(id: &str) -> Account {
        Account {
            id: id.to_string(),
            username: id.to_uppercase(),
            uuid: uuid::Uuid::new_v4().to_string(),
        }
    }

    fn store_with(ids: &[&str]) -> AccountStore {
        let mut store = AccountStore::default();
        for id in ids {
            store.add(account(id));
        }
        store
    }

    #[test]
    fn first_account_selected_when_nothing_selected() {
        let mut store = store_with(&["a", "b", "c"]);
        store.select_default();
        assert_eq!(store.selected_account().unwrap().id, "a");
    }

    #[test]
    fn existing_selection_survives_load() {
        let mut store = store_with(&["a", "b", "c"]);
        assert!(store.select("c"));
        store.select_default();
        assert_eq!(store.selected_account().unwrap().id, "c");
    }

    #[test]
    fn dangling_selection_falls_back_to_first() {
        let mut store = store_with(&["a", "b"]);
        store.selected = Some("gone".to_string());
        store.select_default();
        assert_eq!(store.selected_account().unwrap().id, "a");
    }

    #[test]
    fn empty_store_selects_nothing() {
        let mut store = AccountStore::default();
        store.select_default();
        assert!(store.selected_account().is_none());
    }

    #[test]
    fn removing_selected_account_clears_selection() {
        let mut store = store_with(&["a", "b"]);
        store.select_default();
        store.remove("a");
        assert!(store.selected_account().is_none());
        assert_eq!(store.len(), 1);
    }
}
