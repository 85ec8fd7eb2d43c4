// Account store - pure logic, no Tauri imports allowed.
// Every invalid input (unknown id, bad index, empty or duplicate tag) is a silent no-op.

use std::collections::HashMap;

use crate::modules::observers::{Observers, SubscriptionId};
use crate::modules::tag_input::{is_commit_key, KeyEvent};
use crate::settings::StoreSettings;
use crate::state::{Account, AccountId, AccountsSnapshot, StoreEvent, Tag};

/// Owns the account list plus the per-account UI state the form needs.
#[derive(Debug, Default)]
pub struct AccountStore {
    accounts: Vec<Account>,
    password_visible: HashMap<AccountId, bool>,
    current_tag_input: HashMap<AccountId, String>,
    settings: StoreSettings,
    observers: Observers,
}

impl AccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: StoreSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&StoreEvent) + Send + 'static,
    {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    // --- reads ---

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn account(&self, id: AccountId) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Absent entries read as hidden.
    pub fn is_password_visible(&self, id: AccountId) -> bool {
        self.password_visible.get(&id).copied().unwrap_or(false)
    }

    pub fn tag_input(&self, id: AccountId) -> Option<&str> {
        self.current_tag_input.get(&id).map(String::as_str)
    }

    pub fn password_visible(&self) -> &HashMap<AccountId, bool> {
        &self.password_visible
    }

    pub fn current_tag_input(&self) -> &HashMap<AccountId, String> {
        &self.current_tag_input
    }

    pub fn snapshot(&self) -> AccountsSnapshot {
        AccountsSnapshot {
            accounts: self.accounts.clone(),
            password_visible: self.password_visible.clone(),
            current_tag_input: self.current_tag_input.clone(),
        }
    }

    // --- mutations ---

    /// Appends a blank account and returns its id (`max + 1`, or 1 when empty).
    pub fn add_account(&mut self) -> AccountId {
        let id = self.accounts.iter().map(|a| a.id).max().map_or(1, |max| max + 1);
        self.accounts.push(Account::empty(id));
        self.current_tag_input.insert(id, String::new());

        log::debug!("[Accounts] Added account {}", id);
        self.observers.notify(&StoreEvent::AccountAdded { id });
        id
    }

    /// Returns true if an account was removed. A leftover visibility flag for
    /// an unknown id may still be cleared, which notifies `VisibilityCleared`.
    pub fn remove_account(&mut self, id: AccountId) -> bool {
        let before = self.accounts.len();
        self.accounts.retain(|a| a.id != id);
        let removed = self.accounts.len() != before;

        self.current_tag_input.remove(&id);
        let cleared = self.settings.clear_visibility_on_remove
            && self.password_visible.remove(&id).is_some();

        if removed {
            log::debug!("[Accounts] Removed account {}", id);
            self.observers.notify(&StoreEvent::AccountRemoved { id });
        } else if cleared {
            log::debug!("[Accounts] Cleared stale visibility flag for {}", id);
            self.observers.notify(&StoreEvent::VisibilityCleared { id });
        } else {
            log::debug!("[Accounts] remove_account: no account {}", id);
        }
        removed
    }

    pub fn update_name(&mut self, id: AccountId, name: impl Into<String>) -> bool {
        let Some(account) = self.find_mut(id) else {
            log::debug!("[Accounts] update_name: no account {}", id);
            return false;
        };
        account.name = name.into();
        self.observers.notify(&StoreEvent::NameUpdated { id });
        true
    }

    pub fn update_type(&mut self, id: AccountId, new_type: impl Into<String>) -> bool {
        let Some(account) = self.find_mut(id) else {
            log::debug!("[Accounts] update_type: no account {}", id);
            return false;
        };
        account.account_type = new_type.into();
        self.observers.notify(&StoreEvent::TypeUpdated { id });
        true
    }

    pub fn update_password(&mut self, id: AccountId, password: impl Into<String>) -> bool {
        let Some(account) = self.find_mut(id) else {
            log::debug!("[Accounts] update_password: no account {}", id);
            return false;
        };
        account.password = password.into();
        self.observers.notify(&StoreEvent::PasswordUpdated { id });
        true
    }

    /// Flips the flag for `id` (absent counts as hidden) and returns the new value.
    /// Does not check that the account exists.
    pub fn toggle_password_visibility(&mut self, id: AccountId) -> bool {
        let flag = self.password_visible.entry(id).or_insert(false);
        *flag = !*flag;
        let visible = *flag;

        self.observers.notify(&StoreEvent::PasswordVisibilityToggled { id, visible });
        visible
    }

    /// Replaces the pending tag text for an existing account.
    pub fn set_tag_input(&mut self, id: AccountId, text: impl Into<String>) -> bool {
        if self.account(id).is_none() {
            return false;
        }
        self.current_tag_input.insert(id, text.into());
        self.observers.notify(&StoreEvent::TagInputChanged { id });
        true
    }

    /// Commits the trimmed pending text as a tag. The input is cleared only
    /// when a tag is actually appended.
    pub fn add_tag(&mut self, id: AccountId) -> bool {
        let value = match self.current_tag_input.get(&id) {
            Some(text) => text.trim().to_string(),
            None => return false,
        };
        if value.is_empty() {
            return false;
        }

        let Some(account) = self.accounts.iter_mut().find(|a| a.id == id) else {
            return false;
        };
        if account.has_tag(&value) {
            log::debug!("[Accounts] Tag '{}' already on account {}", value, id);
            return false;
        }

        account.tags.push(Tag::new(value.clone()));
        self.current_tag_input.insert(id, String::new());

        log::debug!("[Accounts] Added tag '{}' to account {}", value, id);
        self.observers.notify(&StoreEvent::TagAdded { id, value });
        true
    }

    /// Removes and returns the tag at `tag_index`. Out-of-range is a no-op.
    pub fn remove_tag(&mut self, id: AccountId, tag_index: usize) -> Option<Tag> {
        let account = self.find_mut(id)?;
        if tag_index >= account.tags.len() {
            log::debug!(
                "[Accounts] remove_tag: index {} out of range for account {}",
                tag_index,
                id
            );
            return None;
        }
        let tag = account.tags.remove(tag_index);

        self.observers.notify(&StoreEvent::TagRemoved {
            id,
            index: tag_index,
            value: tag.value.clone(),
        });
        Some(tag)
    }

    /// Commit keys prevent the event's default action and run `add_tag`;
    /// anything else passes through. Returns true if the key was consumed.
    pub fn handle_tag_keydown(&mut self, event: &mut KeyEvent, id: AccountId) -> bool {
        if !is_commit_key(&event.key, self.settings.tag_commit_keys.as_slice()) {
            return false;
        }
        event.prevent_default();
        self.add_tag(id);
        true
    }

    fn find_mut(&mut self, id: AccountId) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|a| a.id == id)
    }
}
