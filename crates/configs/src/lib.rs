use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub identity: IdentityConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Remote identity service endpoint settings.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    pub base_url: String,
    #[serde(default = "default_login_path")]
    pub login_path: String,
    #[serde(default = "default_register_path")]
    pub register_path: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            login_path: default_login_path(),
            register_path: default_register_path(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Durable credential store settings.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_store_path")]
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { path: default_store_path() }
    }
}

fn default_login_path() -> String { "/auth/login".to_string() }
fn default_register_path() -> String { "/auth/register".to_string() }
fn default_timeout() -> u64 { 30 }
fn default_store_path() -> String { "session.json".to_string() }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let mut cfg: AppConfig = toml::from_str(&content)?;
    cfg.identity.normalize_from_env();
    cfg.identity.validate()?;
    Ok(cfg)
}

impl IdentityConfig {
    /// Fill the base URL from the environment when the TOML omits it.
    pub fn normalize_from_env(&mut self) {
        if self.base_url.trim().is_empty() {
            if let Ok(url) = std::env::var("IDENTITY_BASE_URL") {
                self.base_url = url;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(anyhow!(
                "identity.base_url is empty; provide it in config.toml or via IDENTITY_BASE_URL"
            ));
        }
        let lower = self.base_url.to_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            return Err(anyhow!("identity.base_url must start with http:// or https://"));
        }
        if !self.login_path.starts_with('/') || !self.register_path.starts_with('/') {
            return Err(anyhow!("identity paths must start with /"));
        }
        if self.timeout_secs == 0 {
            return Err(anyhow!("identity.timeout_secs must be a positive number of seconds"));
        }
        Ok(())
    }
}
