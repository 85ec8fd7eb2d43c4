// Desktop bridge - Tauri plugin exposing the account store to the webview.
// The store logic lives in modules::accounts; this file only locks, calls, and emits.

use std::sync::Mutex;

use tauri::plugin::{Builder, TauriPlugin};
use tauri::{AppHandle, Emitter, Manager, Runtime, State};

use crate::modules::accounts::AccountStore;
use crate::modules::tag_input::KeyEvent;
use crate::settings::StoreSettings;
use crate::state::{AccountId, AccountsSnapshot, Tag};

pub const UPDATE_EVENT: &str = "accounts-updated";

pub struct AccountsState {
    pub store: Mutex<AccountStore>,
}

impl AccountsState {
    pub fn new(settings: StoreSettings) -> Self {
        Self {
            store: Mutex::new(AccountStore::with_settings(settings)),
        }
    }
}

/// Runs `op` under the lock. `op` reports whether it changed anything; if it
/// did, the post-change snapshot comes back alongside its result.
fn apply<T>(
    state: &AccountsState,
    op: impl FnOnce(&mut AccountStore) -> (T, bool),
) -> Result<(T, Option<AccountsSnapshot>), String> {
    let mut store = state.store.lock().map_err(|e| e.to_string())?;
    let (result, changed) = op(&mut store);
    let snapshot = changed.then(|| store.snapshot());
    Ok((result, snapshot))
}

fn apply_and_emit<R: Runtime, T>(
    app: &AppHandle<R>,
    state: &AccountsState,
    op: impl FnOnce(&mut AccountStore) -> (T, bool),
) -> Result<T, String> {
    let (result, snapshot) = apply(state, op)?;
    if let Some(snapshot) = snapshot {
        // Emit update event to sync UI
        if let Err(e) = app.emit(UPDATE_EVENT, snapshot) {
            log::warn!("[Accounts] Failed to emit {}: {}", UPDATE_EVENT, e);
        }
    }
    Ok(result)
}

/// Also reports a change when only a stale visibility flag was cleared.
fn remove_account_op(store: &mut AccountStore, id: AccountId) -> (bool, bool) {
    let clears_flag = store.settings().clear_visibility_on_remove
        && store.password_visible().contains_key(&id);
    let removed = store.remove_account(id);
    (removed, removed || clears_flag)
}

fn current_settings(state: &AccountsState) -> Result<StoreSettings, String> {
    let store = state.store.lock().map_err(|e| e.to_string())?;
    Ok(store.settings().clone())
}

/// The front-end needs `tag_commit_keys` to call `preventDefault()` synchronously,
/// before the `handle_tag_keydown` invoke resolves.
#[tauri::command]
fn get_settings(state: State<'_, AccountsState>) -> Result<StoreSettings, String> {
    current_settings(&state)
}

#[tauri::command]
fn get_accounts(state: State<'_, AccountsState>) -> Result<AccountsSnapshot, String> {
    let store = state.store.lock().map_err(|e| e.to_string())?;
    Ok(store.snapshot())
}

#[tauri::command]
fn add_account<R: Runtime>(app: AppHandle<R>, state: State<'_, AccountsState>) -> Result<AccountId, String> {
    apply_and_emit(&app, &state, |store| (store.add_account(), true))
}

#[tauri::command]
fn remove_account<R: Runtime>(
    app: AppHandle<R>,
    state: State<'_, AccountsState>,
    id: AccountId,
) -> Result<bool, String> {
    apply_and_emit(&app, &state, |store| remove_account_op(store, id))
}

#[tauri::command]
fn update_name<R: Runtime>(
    app: AppHandle<R>,
    state: State<'_, AccountsState>,
    id: AccountId,
    name: String,
) -> Result<bool, String> {
    apply_and_emit(&app, &state, |store| {
        let changed = store.update_name(id, name);
        (changed, changed)
    })
}

#[tauri::command]
fn update_type<R: Runtime>(
    app: AppHandle<R>,
    state: State<'_, AccountsState>,
    id: AccountId,
    new_type: String,
) -> Result<bool, String> {
    apply_and_emit(&app, &state, |store| {
        let changed = store.update_type(id, new_type);
        (changed, changed)
    })
}

#[tauri::command]
fn update_password<R: Runtime>(
    app: AppHandle<R>,
    state: State<'_, AccountsState>,
    id: AccountId,
    password: String,
) -> Result<bool, String> {
    apply_and_emit(&app, &state, |store| {
        let changed = store.update_password(id, password);
        (changed, changed)
    })
}

#[tauri::command]
fn toggle_password_visibility<R: Runtime>(
    app: AppHandle<R>,
    state: State<'_, AccountsState>,
    id: AccountId,
) -> Result<bool, String> {
    apply_and_emit(&app, &state, |store| (store.toggle_password_visibility(id), true))
}

#[tauri::command]
fn set_tag_input<R: Runtime>(
    app: AppHandle<R>,
    state: State<'_, AccountsState>,
    id: AccountId,
    text: String,
) -> Result<bool, String> {
    apply_and_emit(&app, &state, |store| {
        let changed = store.set_tag_input(id, text);
        (changed, changed)
    })
}

#[tauri::command]
fn add_tag<R: Runtime>(app: AppHandle<R>, state: State<'_, AccountsState>, id: AccountId) -> Result<bool, String> {
    apply_and_emit(&app, &state, |store| {
        let added = store.add_tag(id);
        (added, added)
    })
}

#[tauri::command]
fn remove_tag<R: Runtime>(
    app: AppHandle<R>,
    state: State<'_, AccountsState>,
    id: AccountId,
    tag_index: usize,
) -> Result<Option<Tag>, String> {
    apply_and_emit(&app, &state, |store| {
        let removed = store.remove_tag(id, tag_index);
        let changed = removed.is_some();
        (removed, changed)
    })
}

/// Returns true when the key was a commit key. The invoke resolves too late to
/// prevent the DOM default; the front-end does that from `get_settings` keys.
#[tauri::command]
fn handle_tag_keydown<R: Runtime>(
    app: AppHandle<R>,
    state: State<'_, AccountsState>,
    key: String,
    id: AccountId,
) -> Result<bool, String> {
    apply_and_emit(&app, &state, |store| {
        let before = store.account(id).map(|a| a.tags.len());
        let mut event = KeyEvent::new(key);
        store.handle_tag_keydown(&mut event, id);
        let changed = store.account(id).map(|a| a.tags.len()) != before;
        (event.default_prevented, changed)
    })
}

/// Log backend for the host application, at the level from the store settings.
pub fn log_plugin<R: Runtime>(settings: &StoreSettings) -> TauriPlugin<R> {
    tauri_plugin_log::Builder::default()
        .level(settings.log_level_filter())
        .build()
}

/// The `accounts` plugin. Settings are read from the app data dir on setup.
pub fn init<R: Runtime>() -> TauriPlugin<R> {
    Builder::new("accounts")
        .invoke_handler(tauri::generate_handler![
            get_settings,
            get_accounts,
            add_account,
            remove_account,
            update_name,
            update_type,
            update_password,
            toggle_password_visibility,
            set_tag_input,
            add_tag,
            remove_tag,
            handle_tag_keydown,
        ])
        .setup(|app, _api| {
            let dir = app.path().app_data_dir()?;
            let settings = StoreSettings::load(&dir);
            log::info!("[Accounts] Loaded settings from {:?}", StoreSettings::get_path(&dir));
            app.manage(AccountsState::new(settings));
            Ok(())
        })
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_returns_snapshot_on_change() {
        let state = AccountsState::new(StoreSettings::default());

        let (id, snapshot) = apply(&state, |store| (store.add_account(), true)).unwrap();

        assert_eq!(id, 1);
        let snapshot = snapshot.unwrap();
        assert_eq!(snapshot.accounts.len(), 1);
        assert_eq!(snapshot.current_tag_input.get(&1), Some(&String::new()));
    }

    #[test]
    fn test_settings_expose_commit_keys() {
        let state = AccountsState::new(StoreSettings {
            tag_commit_keys: vec!["Tab".to_string()],
            ..Default::default()
        });

        let settings = current_settings(&state).unwrap();
        assert_eq!(settings.tag_commit_keys, vec!["Tab"]);
    }

    #[test]
    fn test_remove_reports_cleared_flag_as_change() {
        let state = AccountsState::new(StoreSettings {
            clear_visibility_on_remove: true,
            ..Default::default()
        });
        state.store.lock().unwrap().toggle_password_visibility(5);

        let (removed, snapshot) = apply(&state, |store| remove_account_op(store, 5)).unwrap();

        assert!(!removed);
        assert!(snapshot.unwrap().password_visible.is_empty());

        let (_, snapshot) = apply(&state, |store| remove_account_op(store, 5)).unwrap();
        assert!(snapshot.is_none());
    }

    #[test]
    fn test_apply_skips_snapshot_on_noop() {
        let state = AccountsState::new(StoreSettings::default());

        let (removed, snapshot) = apply(&state, |store| {
            let removed = store.remove_account(3);
            (removed, removed)
        })
        .unwrap();

        assert!(!removed);
        assert!(snapshot.is_none());
    }
}
