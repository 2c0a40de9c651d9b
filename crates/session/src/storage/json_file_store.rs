use std::{collections::HashMap, path::PathBuf, sync::Arc};

use async_trait::async_trait;
use tokio::{fs, sync::RwLock};

use super::SessionStore;
use crate::auth::errors::SessionError;

/// JSON file-backed session store.
///
/// Persists a flat string map to a single JSON file. Intended for
/// desktop/CLI hosts where a browser's storage is unavailable and a
/// database is overkill.
pub struct JsonFileStore {
    inner: Arc<RwLock<HashMap<String, String>>>,
    file_path: PathBuf,
}

impl JsonFileStore {
    /// Open the store at a path. Creates the file with an empty map if
    /// missing; an unreadable or corrupt file starts empty rather than
    /// failing (restoration failures are silent by contract).
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, SessionError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await.ok();
        }

        let map: HashMap<String, String> = match fs::read(&file_path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_default(),
            Err(_) => {
                let empty: HashMap<String, String> = HashMap::new();
                fs::write(
                    &file_path,
                    serde_json::to_vec(&empty).map_err(|e| SessionError::Storage(e.to_string()))?,
                )
                .await
                .map_err(|e| SessionError::Storage(e.to_string()))?;
                empty
            }
        };

        Ok(Arc::new(Self { inner: Arc::new(RwLock::new(map)), file_path }))
    }

    async fn save(&self) -> Result<(), SessionError> {
        let map = self.inner.read().await;
        let data = serde_json::to_vec(&*map).map_err(|e| SessionError::Storage(e.to_string()))?;
        fs::write(&self.file_path, data)
            .await
            .map_err(|e| SessionError::Storage(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl SessionStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        let map = self.inner.read().await;
        Ok(map.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let mut map = self.inner.write().await;
        map.insert(key.to_string(), value.to_string());
        drop(map);
        self.save().await
    }

    async fn remove(&self, key: &str) -> Result<(), SessionError> {
        let mut map = self.inner.write().await;
        map.remove(key);
        drop(map);
        self.save().await
    }
}
