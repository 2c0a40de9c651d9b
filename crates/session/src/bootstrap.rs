//! Wiring of the default HTTP + file-backed session manager.

use std::sync::Arc;

use tracing::info;

use configs::AppConfig;

use crate::auth::errors::SessionError;
use crate::auth::manager::SessionManager;
use crate::client::HttpIdentityClient;
use crate::storage::JsonFileStore;

/// Build the process-wide session manager from configuration and restore
/// any prior session. The returned manager is already idle.
pub async fn bootstrap(
    cfg: &AppConfig,
) -> Result<SessionManager<HttpIdentityClient, JsonFileStore>, SessionError> {
    let client = Arc::new(HttpIdentityClient::new(&cfg.identity)?);
    let store = JsonFileStore::new(cfg.storage.path.as_str()).await?;

    let mut manager = SessionManager::new(client, store);
    manager.init().await;
    info!(store = %cfg.storage.path, authenticated = manager.is_authenticated(), "session manager ready");
    Ok(manager)
}
