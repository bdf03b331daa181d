//! Opaque string-keyed persistence.
//!
//! Collections are read in full, mutated in memory, and written back in full
//! on every change (last-writer-wins). Read failures fall back to documented
//! defaults; write failures are logged and never surfaced to the user.

pub mod json_backend;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::TrackerError;

pub use json_backend::JsonStore;

pub const SUBSCRIPTIONS_KEY: &str = "subscriptions";
pub const RESERVATIONS_KEY: &str = "reservations";
pub const SETTINGS_KEY: &str = "app_settings";
pub const THEME_KEY: &str = "theme";
pub const CREDENTIALS_KEY: &str = "user_credentials";
pub const PROFILE_KEY: &str = "user_profile";

/// Abstraction over the key-value stores the application persists through.
pub trait KeyValueStore: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>, TrackerError>;
    fn write(&self, key: &str, value: &str) -> Result<(), TrackerError>;
    fn remove(&self, key: &str) -> Result<(), TrackerError>;
}

/// Reads and deserializes a value, falling back on a missing key, unreadable
/// store, or malformed JSON. Fallbacks are logged, never fatal.
pub fn read_json_or<T, F>(store: &dyn KeyValueStore, key: &str, fallback: F) -> T
where
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    match store.read(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(key, error = %err, "malformed stored value, using fallback");
                fallback()
            }
        },
        Ok(None) => fallback(),
        Err(err) => {
            tracing::warn!(key, error = %err, "failed to read stored value, using fallback");
            fallback()
        }
    }
}

/// Serializes and writes a value. Failures are logged and swallowed; the
/// caller's in-memory state stays authoritative for the session.
pub fn write_json<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            if let Err(err) = store.write(key, &json) {
                tracing::error!(key, error = %err, "failed to persist value");
            }
        }
        Err(err) => {
            tracing::error!(key, error = %err, "failed to serialize value");
        }
    }
}
