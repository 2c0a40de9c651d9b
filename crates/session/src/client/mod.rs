//! Identity-service transport abstraction.

pub mod http;

use async_trait::async_trait;
use serde_json::Value;

use crate::auth::domain::{LoginRequest, RegisterResponse, RegistrationRequest};
use crate::auth::errors::SessionError;

pub use http::HttpIdentityClient;

/// Remote identity service seam.
///
/// `login` returns the raw envelope because its nesting is inconsistent
/// across deployments; decoding happens in the auth layer.
#[async_trait]
pub trait IdentityClient: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> Result<Value, SessionError>;
    async fn register(&self, request: &RegistrationRequest)
        -> Result<RegisterResponse, SessionError>;
}

/// Scripted in-memory client for tests and doc examples
pub mod mock {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    pub struct MockIdentityClient {
        login_outcome: Mutex<Option<Result<Value, SessionError>>>,
        register_outcome: Mutex<Option<Result<RegisterResponse, SessionError>>>,
        login_calls: Mutex<Vec<LoginRequest>>,
        register_calls: Mutex<Vec<RegistrationRequest>>,
    }

    impl MockIdentityClient {
        pub fn with_login(outcome: Result<Value, SessionError>) -> Self {
            let client = Self::default();
            *client.login_outcome.lock().unwrap() = Some(outcome);
            client
        }

        pub fn with_register(outcome: Result<RegisterResponse, SessionError>) -> Self {
            let client = Self::default();
            *client.register_outcome.lock().unwrap() = Some(outcome);
            client
        }

        /// Requests seen by `login`, in call order.
        pub fn login_calls(&self) -> Vec<LoginRequest> {
            self.login_calls.lock().unwrap().clone()
        }

        /// Requests seen by `register`, in call order.
        pub fn register_calls(&self) -> Vec<RegistrationRequest> {
            self.register_calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl IdentityClient for MockIdentityClient {
        async fn login(&self, request: &LoginRequest) -> Result<Value, SessionError> {
            self.login_calls.lock().unwrap().push(request.clone());
            self.login_outcome
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Err(SessionError::Unknown("no scripted login response".into())))
        }

        async fn register(
            &self,
            request: &RegistrationRequest,
        ) -> Result<RegisterResponse, SessionError> {
            self.register_calls.lock().unwrap().push(request.clone());
            self.register_outcome.lock().unwrap().take().unwrap_or_else(|| {
                Err(SessionError::Unknown("no scripted register response".into()))
            })
        }
    }
}
