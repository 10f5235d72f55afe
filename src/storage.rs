//! Key-value persistence backends.

use std::collections::HashMap;

use crate::error::StorageError;

/// Key for the serialized progress store.
pub const PROGRESS_KEY: &str = "matematicas_andinas_progress";
/// Key for the serialized user profile.
pub const USER_KEY: &str = "matematicas_andinas_user";

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Browser `localStorage`.
pub struct LocalStorage {
    inner: web_sys::Storage,
}

impl LocalStorage {
    pub fn open() -> Result<Self, StorageError> {
        let win = web_sys::window().ok_or(StorageError::Unavailable)?;
        match win.local_storage() {
            Ok(Some(inner)) => Ok(Self { inner }),
            _ => Err(StorageError::Unavailable),
        }
    }
}

fn js_reason(err: wasm_bindgen::JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get_item(key).map_err(|_| StorageError::Unavailable)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        // Quota errors surface here.
        self.inner.set_item(key, value).map_err(|e| StorageError::Write {
            key: key.to_string(),
            reason: js_reason(e),
        })
    }
}

/// In-process store; used when the browser refuses storage and in tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Browser storage when available, memory otherwise.
pub enum Backend {
    Browser(LocalStorage),
    Memory(MemoryStorage),
}

impl Backend {
    pub fn detect() -> Self {
        match LocalStorage::open() {
            Ok(ls) => Backend::Browser(ls),
            Err(e) => {
                log::warn!("{e}; progress will not survive a reload");
                Backend::Memory(MemoryStorage::new())
            }
        }
    }
}

impl KeyValueStore for Backend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self {
            Backend::Browser(s) => s.get(key),
            Backend::Memory(s) => s.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        match self {
            Backend::Browser(s) => s.set(key, value),
            Backend::Memory(s) => s.set(key, value),
        }
    }
}
