// Shared types for the account store.
// Used by the pure logic modules and the desktop bridge, testable without Tauri.

use std::collections::HashMap;
use serde::{Deserialize, Serialize};

pub type AccountId = u64;

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Tag {
    pub value: String,
}

impl Tag {
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into() }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: String,
    pub password: String,
    pub tags: Vec<Tag>,
}

impl Account {
    /// Blank record as created by the "add account" button.
    pub fn empty(id: AccountId) -> Self {
        Self {
            id,
            name: String::new(),
            account_type: String::new(),
            password: String::new(),
            tags: Vec::new(),
        }
    }

    pub fn has_tag(&self, value: &str) -> bool {
        self.tags.iter().any(|t| t.value == value)
    }
}

/// Change notifications delivered to store subscribers.
/// Password text is never carried in an event.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum StoreEvent {
    AccountAdded { id: AccountId },
    AccountRemoved { id: AccountId },
    NameUpdated { id: AccountId },
    TypeUpdated { id: AccountId },
    PasswordUpdated { id: AccountId },
    PasswordVisibilityToggled { id: AccountId, visible: bool },
    VisibilityCleared { id: AccountId },
    TagInputChanged { id: AccountId },
    TagAdded { id: AccountId, value: String },
    TagRemoved { id: AccountId, index: usize, value: String },
}

impl StoreEvent {
    pub fn account_id(&self) -> AccountId {
        match self {
            Self::AccountAdded { id }
            | Self::AccountRemoved { id }
            | Self::NameUpdated { id }
            | Self::TypeUpdated { id }
            | Self::PasswordUpdated { id }
            | Self::PasswordVisibilityToggled { id, .. }
            | Self::VisibilityCleared { id }
            | Self::TagInputChanged { id }
            | Self::TagAdded { id, .. }
            | Self::TagRemoved { id, .. } => *id,
        }
    }
}

/// Read model handed to the view layer.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccountsSnapshot {
    pub accounts: Vec<Account>,
    pub password_visible: HashMap<AccountId, bool>,
    pub current_tag_input: HashMap<AccountId, String>,
}
