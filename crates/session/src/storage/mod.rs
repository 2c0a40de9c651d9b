//! Durable credential persistence.
//!
//! The session layer needs nothing more than a string-keyed store;
//! implementations can be file-backed, browser storage, or a remote KV.

pub mod json_file_store;

use async_trait::async_trait;

use crate::auth::errors::SessionError;

pub use json_file_store::JsonFileStore;

/// Store key for the credential token.
pub const TOKEN_KEY: &str = "token";
/// Store key for the JSON-serialized user record.
pub const USER_KEY: &str = "user";

/// Trait abstraction for session credential storage.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, SessionError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), SessionError>;
    async fn remove(&self, key: &str) -> Result<(), SessionError>;
}

/// Simple in-memory store for tests and doc examples
pub mod memory {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    pub struct MemoryStore {
        inner: Mutex<HashMap<String, String>>,
    }

    impl MemoryStore {
        /// Number of keys currently held.
        pub fn len(&self) -> usize {
            self.inner.lock().unwrap().len()
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }
    }

    #[async_trait]
    impl SessionStore for MemoryStore {
        async fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
            Ok(self.inner.lock().unwrap().get(key).cloned())
        }

        async fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
            self.inner.lock().unwrap().insert(key.to_string(), value.to_string());
            Ok(())
        }

        async fn remove(&self, key: &str) -> Result<(), SessionError> {
            self.inner.lock().unwrap().remove(key);
            Ok(())
        }
    }
}
