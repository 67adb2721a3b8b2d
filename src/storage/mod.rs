//! Durable key-value storage for the few flags the portal persists
//!
//! Reads and writes are synchronous from the caller's point of view. The
//! in-memory backend is used by tests; the SQLite backend serves reads from
//! a cache and persists writes on a background task.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::PortalError;

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

/// Keys used in the store
pub mod keys {
    pub const SESSION: &str = "unex.session";
    pub const TUTORIAL_SEEN: &str = "unex.tutorial_seen";
    pub const THEME: &str = "unex.theme";

    pub const ALL: [&str; 3] = [SESSION, TUTORIAL_SEEN, THEME];
}

/// String key-value store
pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Decode a JSON record stored under `key`
///
/// Returns `Ok(None)` when the key is absent.
pub fn load_json<T: DeserializeOwned>(
    storage: &dyn Storage,
    key: &str,
) -> Result<Option<T>, PortalError> {
    let Some(raw) = storage.get(key) else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| PortalError::Decode {
            key: key.to_string(),
            source,
        })
}

/// Encode `value` as JSON and store it under `key`
pub fn save_json<T: Serialize>(storage: &dyn Storage, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => storage.set(key, &json),
        Err(e) => log::error!("Failed to encode record for key {}: {}", key, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Flag {
        on: bool,
    }

    #[test]
    fn test_load_json_absent_is_none() {
        let storage = MemoryStorage::new();
        let loaded: Option<Flag> = load_json(&storage, "missing").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_json_roundtrip_and_corruption() {
        let storage = MemoryStorage::new();
        save_json(&storage, "flag", &Flag { on: true });
        assert_eq!(load_json::<Flag>(&storage, "flag").unwrap(), Some(Flag { on: true }));

        storage.set("flag", "{not json");
        match load_json::<Flag>(&storage, "flag") {
            Err(PortalError::Decode { key, .. }) => assert_eq!(key, "flag"),
            other => panic!("expected decode error, got {:?}", other),
        }
    }
}
