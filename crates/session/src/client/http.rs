//! reqwest-backed identity client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use configs::IdentityConfig;

use super::IdentityClient;
use crate::auth::domain::{LoginRequest, RegisterResponse, RegistrationRequest};
use crate::auth::envelope::remote_message;
use crate::auth::errors::SessionError;

pub struct HttpIdentityClient {
    http: Client,
    base_url: String,
    login_path: String,
    register_path: String,
}

impl HttpIdentityClient {
    pub fn new(cfg: &IdentityConfig) -> Result<Self, SessionError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .map_err(transport_err)?;
        Ok(Self {
            http,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            login_path: cfg.login_path.clone(),
            register_path: cfg.register_path.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<Value, SessionError> {
        let url = self.url(path);
        debug!(%url, "posting to identity service");

        let response = self.http.post(&url).json(body).send().await.map_err(transport_err)?;
        let status = response.status();
        let value: Value = response.json().await.map_err(transport_err)?;

        if !status.is_success() {
            return Err(match remote_message(&value) {
                Some(message) => SessionError::RemoteRejected(message),
                None => SessionError::Transport {
                    message: format!("identity service returned {status}"),
                    detail: None,
                },
            });
        }
        Ok(value)
    }
}

fn transport_err(err: reqwest::Error) -> SessionError {
    SessionError::Transport { message: err.to_string(), detail: None }
}

#[async_trait]
impl IdentityClient for HttpIdentityClient {
    async fn login(&self, request: &LoginRequest) -> Result<Value, SessionError> {
        self.post_json(&self.login_path, request).await
    }

    async fn register(
        &self,
        request: &RegistrationRequest,
    ) -> Result<RegisterResponse, SessionError> {
        let value = self.post_json(&self.register_path, request).await?;
        serde_json::from_value(value).map_err(|e| SessionError::Unknown(e.to_string()))
    }
}
