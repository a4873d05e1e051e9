//! Key/value persistence behind a small trait so the login flow can run against
//! `window.localStorage` in the browser and an in-memory map everywhere else.
//! Values written here are plain text; callers decide what is safe to keep.

use super::errors::AppError;
use std::{cell::RefCell, collections::HashMap};

/// Storage key holding the last submitted email.
pub const EMAIL_KEY: &str = "email";
/// Storage key holding the last submitted raw password.
pub const PASSWORD_KEY: &str = "password";
/// Storage key holding the session token returned by a successful login.
pub const AUTHORIZATION_KEY: &str = "Authorization";

/// String-keyed persistent store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), AppError>;
    fn remove(&self, key: &str) -> Result<(), AppError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::rc::Rc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), AppError> {
        (**self).remove(key)
    }
}

/// Last-used credentials cached between visits. The password is the raw value
/// typed by the user, never the encrypted one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersistedCredentials {
    pub email: String,
    pub password: String,
}

impl PersistedCredentials {
    /// Reads both entries; returns `None` unless both are present and non-empty.
    pub fn load(store: &impl KeyValueStore) -> Option<Self> {
        let email = store.get(EMAIL_KEY).filter(|value| !value.is_empty())?;
        let password = store.get(PASSWORD_KEY).filter(|value| !value.is_empty())?;
        Some(Self { email, password })
    }

    /// Overwrites both entries.
    pub fn save(&self, store: &impl KeyValueStore) -> Result<(), AppError> {
        store.set(EMAIL_KEY, &self.email)?;
        store.set(PASSWORD_KEY, &self.password)
    }
}

/// In-memory store used by tests and as a fallback when browser storage is
/// unavailable (for example in some private browsing modes).
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AppError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// `window.localStorage` wrapper.
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Debug)]
pub struct BrowserStorage {
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl BrowserStorage {
    /// Returns `None` when there is no window or local storage is disabled.
    pub fn local() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok()??;
        Some(Self { storage })
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.storage
            .set_item(key, value)
            .map_err(|_| AppError::Storage(format!("Unable to write `{key}`.")))
    }

    fn remove(&self, key: &str) -> Result<(), AppError> {
        self.storage
            .remove_item(key)
            .map_err(|_| AppError::Storage(format!("Unable to remove `{key}`.")))
    }
}

#[cfg(test)]
mod tests {
    use super::{EMAIL_KEY, KeyValueStore, MemoryStore, PASSWORD_KEY, PersistedCredentials};

    #[test]
    fn load_requires_both_entries() {
        let store = MemoryStore::new();
        assert_eq!(PersistedCredentials::load(&store), None);

        store.set(EMAIL_KEY, "a@b.com").unwrap();
        assert_eq!(PersistedCredentials::load(&store), None);

        store.set(PASSWORD_KEY, "").unwrap();
        assert_eq!(PersistedCredentials::load(&store), None);

        store.set(PASSWORD_KEY, "secret1").unwrap();
        assert_eq!(
            PersistedCredentials::load(&store),
            Some(PersistedCredentials {
                email: "a@b.com".to_string(),
                password: "secret1".to_string(),
            })
        );
    }

    #[test]
    fn save_overwrites_previous_values() {
        let store = MemoryStore::new();
        PersistedCredentials {
            email: "old@b.com".to_string(),
            password: "old".to_string(),
        }
        .save(&store)
        .unwrap();
        PersistedCredentials {
            email: "new@b.com".to_string(),
            password: "new".to_string(),
        }
        .save(&store)
        .unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.get(EMAIL_KEY).as_deref(), Some("new@b.com"));
        assert_eq!(store.get(PASSWORD_KEY).as_deref(), Some("new"));
    }

    #[test]
    fn remove_deletes_entry() {
        let store = MemoryStore::new();
        store.set("k", "v").unwrap();
        store.remove("k").unwrap();
        assert!(store.is_empty());
    }
}
