//! Process-wide session state.
//!
//! The browser build of ClickDelivery keeps auth tokens, the correlation
//! id, and the mock-mode user marker in local storage; this is the same
//! store as an explicit object with named accessors. All reads and
//! writes go through here rather than touching storage ad hoc.
//!
//! Backing is an in-memory map, optionally mirrored to a JSON file.
//! File failures degrade silently to memory-only: a session store must
//! never fail its caller over persistence.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockWriteGuard};

use crate::cart::Cart;

const AUTH_TOKEN_KEY: &str = "auth_token";
const REFRESH_TOKEN_KEY: &str = "refresh_token";
const CORRELATION_ID_KEY: &str = "x_cid";
const CURRENT_USER_KEY: &str = "internal_mode_user_id";
const OVERRIDE_ROLE_KEY: &str = "override_role";
const CART_KEY: &str = "cart";

const SESSION_FILE: &str = "session.json";

/// Key-value session store with optional durable backing.
pub struct SessionStore {
    values: RwLock<HashMap<String, String>>,
    file: Option<PathBuf>,
}

impl SessionStore {
    /// Memory-only store.
    pub fn new() -> Self {
        Self {
            values: RwLock::new(HashMap::new()),
            file: None,
        }
    }

    /// Store mirrored to `<dir>/session.json`, hydrated once here.
    /// An unreadable or absent file leaves the store empty.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        let file = dir.into().join(SESSION_FILE);
        let values = match std::fs::read_to_string(&file) {
            Ok(data) => serde_json::from_str(&data).unwrap_or_else(|err| {
                tracing::warn!(?file, %err, "session file is not valid JSON, starting empty");
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        };
        Self {
            values: RwLock::new(values),
            file: Some(file),
        }
    }

    fn persist(&self, values: &HashMap<String, String>) {
        let Some(file) = &self.file else { return };
        let data = match serde_json::to_string(values) {
            Ok(data) => data,
            Err(err) => {
                tracing::warn!(%err, "could not serialize session state");
                return;
            }
        };
        if let Err(err) = std::fs::write(file, data) {
            tracing::warn!(?file, %err, "could not persist session state");
        }
    }

    // Plain string values stay consistent even if a writer panicked
    // mid-call, so a poisoned lock is recovered rather than propagated.
    fn write_values(&self) -> RwLockWriteGuard<'_, HashMap<String, String>> {
        self.values
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned()
    }

    pub fn set(&self, key: &str, value: &str) {
        let mut values = self.write_values();
        values.insert(key.to_string(), value.to_string());
        self.persist(&values);
    }

    pub fn remove(&self, key: &str) {
        let mut values = self.write_values();
        values.remove(key);
        self.persist(&values);
    }

    pub fn auth_token(&self) -> Option<String> {
        self.get(AUTH_TOKEN_KEY)
    }

    pub fn set_auth_token(&self, token: &str) {
        self.set(AUTH_TOKEN_KEY, token);
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.get(REFRESH_TOKEN_KEY)
    }

    pub fn set_refresh_token(&self, token: &str) {
        self.set(REFRESH_TOKEN_KEY, token);
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth_token().is_some()
    }

    /// Stable per-session correlation id, generated on first use and
    /// reused for every request until rotated.
    pub fn get_or_create_correlation_id(&self) -> String {
        if let Some(cid) = self.get(CORRELATION_ID_KEY) {
            return cid;
        }
        let cid = uuid::Uuid::new_v4().to_string();
        self.set(CORRELATION_ID_KEY, &cid);
        cid
    }

    pub fn rotate_correlation_id(&self) -> String {
        let cid = uuid::Uuid::new_v4().to_string();
        self.set(CORRELATION_ID_KEY, &cid);
        cid
    }

    pub fn clear_correlation_id(&self) {
        self.remove(CORRELATION_ID_KEY);
    }

    /// Id of the user logged in against the mock backend.
    pub fn current_user_id(&self) -> Option<String> {
        self.get(CURRENT_USER_KEY)
    }

    pub fn set_current_user_id(&self, id: &str) {
        self.set(CURRENT_USER_KEY, id);
    }

    /// Manually forced role for the dev/test role switcher. Stored
    /// lowercase; only consulted when the `role-override` feature of
    /// the roles crate is enabled.
    pub fn override_role(&self) -> Option<String> {
        self.get(OVERRIDE_ROLE_KEY)
    }

    pub fn set_override_role(&self, role: &str) {
        self.set(OVERRIDE_ROLE_KEY, &role.to_lowercase());
    }

    pub fn clear_override_role(&self) {
        self.remove(OVERRIDE_ROLE_KEY);
    }

    pub fn cart(&self) -> Cart {
        self.get(CART_KEY)
            .and_then(|data| serde_json::from_str(&data).ok())
            .unwrap_or_default()
    }

    pub fn set_cart(&self, cart: &Cart) {
        match serde_json::to_string(cart) {
            Ok(data) => self.set(CART_KEY, &data),
            Err(err) => tracing::warn!(%err, "could not serialize cart"),
        }
    }

    pub fn clear_cart(&self) {
        self.remove(CART_KEY);
    }

    /// Drops authentication state. The correlation id survives so a
    /// re-login within the same session stays traceable.
    pub fn clear_session(&self) {
        let mut values = self.write_values();
        values.remove(AUTH_TOKEN_KEY);
        values.remove(REFRESH_TOKEN_KEY);
        values.remove(CURRENT_USER_KEY);
        self.persist(&values);
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correlation_id_is_stable_until_rotated() {
        let session = SessionStore::new();
        let first = session.get_or_create_correlation_id();
        let second = session.get_or_create_correlation_id();
        assert_eq!(first, second);

        let rotated = session.rotate_correlation_id();
        assert_ne!(first, rotated);
        assert_eq!(session.get_or_create_correlation_id(), rotated);
    }

    #[test]
    fn clear_session_keeps_correlation_id() {
        let session = SessionStore::new();
        session.set_auth_token("token");
        session.set_refresh_token("refresh");
        session.set_current_user_id("customer-1");
        let cid = session.get_or_create_correlation_id();

        session.clear_session();

        assert!(!session.is_authenticated());
        assert!(session.refresh_token().is_none());
        assert!(session.current_user_id().is_none());
        assert_eq!(session.get_or_create_correlation_id(), cid);
    }

    #[test]
    fn hydrates_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        {
            let session = SessionStore::with_dir(dir.path());
            session.set_auth_token("persisted-token");
        }
        let reloaded = SessionStore::with_dir(dir.path());
        assert_eq!(reloaded.auth_token().as_deref(), Some("persisted-token"));
    }

    #[test]
    fn unwritable_dir_degrades_to_memory_only() {
        let session = SessionStore::with_dir("/nonexistent/path/to/nowhere");
        session.set_auth_token("token");
        assert_eq!(session.auth_token().as_deref(), Some("token"));
    }

    #[test]
    fn override_role_is_lowercased() {
        let session = SessionStore::new();
        session.set_override_role("Admin");
        assert_eq!(session.override_role().as_deref(), Some("admin"));
        session.clear_override_role();
        assert!(session.override_role().is_none());
    }
}
