use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};

use super::domain::{
    LoginRequest, RegistrationProfile, RegistrationRequest, Role, SessionStatus, UserRecord,
};
use super::envelope::{self, Credentials};
use super::errors::SessionError;
use super::phone;
use crate::client::IdentityClient;
use crate::storage::{SessionStore, TOKEN_KEY, USER_KEY};

const LOGIN_FALLBACK: &str = "Authentication failed";
const REGISTER_FALLBACK: &str = "Registration failed";

/// Navigation targets known to the session layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    AdminDashboard,
    Dashboard,
    Login,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::AdminDashboard => "/admin/dashboard",
            Route::Dashboard => "/dashboard",
            Route::Login => "/login",
        }
    }
}

/// Routing intent emitted by session operations. The presentation layer
/// decides whether and how to act on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Replace the current history entry.
    Replace(Route),
    /// Push a new history entry.
    Push(Route),
}

impl Navigation {
    pub fn route(&self) -> Route {
        match self {
            Navigation::Replace(route) | Navigation::Push(route) => *route,
        }
    }

    pub fn path(&self) -> &'static str {
        self.route().path()
    }
}

/// Post-login destination for an upper-cased role string. Unknown roles
/// land on the default dashboard; the anomaly is logged, not fatal.
pub fn route_for_role(role: &str) -> Route {
    match role.to_ascii_uppercase().as_str() {
        "ADMIN" => Route::AdminDashboard,
        "DRIVER" | "CLIENT" => Route::Dashboard,
        other => {
            error!(role = %other, "unknown user role, routing to default dashboard");
            Route::Dashboard
        }
    }
}

/// The session state machine.
///
/// Owns the in-memory user/token pair and its durable mirror in the
/// store; both are always written together. Callers are expected to
/// issue operations sequentially; overlapping calls are not serialized
/// here and resolve last-writer-wins.
pub struct SessionManager<C, S> {
    client: Arc<C>,
    store: Arc<S>,
    user: Option<UserRecord>,
    token: Option<String>,
    status: SessionStatus,
    last_error: Option<String>,
}

impl<C: IdentityClient, S: SessionStore> SessionManager<C, S> {
    pub fn new(client: Arc<C>, store: Arc<S>) -> Self {
        Self {
            client,
            store,
            user: None,
            token: None,
            status: SessionStatus::Initializing,
            last_error: None,
        }
    }

    /// Restore any prior session from the store, then go idle.
    ///
    /// Restoration failures are silent: they mean "no prior session",
    /// never an error surfaced to the caller.
    pub async fn init(&mut self) {
        match self.restore().await {
            Ok(true) => debug!("restored session from store"),
            Ok(false) => debug!("no prior session in store"),
            Err(err) => debug!(error = %err, "session restore failed, starting empty"),
        }
        self.status = SessionStatus::Idle;
    }

    async fn restore(&mut self) -> Result<bool, SessionError> {
        let token = self.store.get(TOKEN_KEY).await?;
        let raw_user = self.store.get(USER_KEY).await?;
        // Only a complete pair is restored; a lone key is left in place.
        if let (Some(token), Some(raw_user)) = (token, raw_user) {
            let user: UserRecord = serde_json::from_str(&raw_user)
                .map_err(|e| SessionError::Storage(e.to_string()))?;
            self.token = Some(token);
            self.user = Some(user);
            return Ok(true);
        }
        Ok(false)
    }

    /// Authenticate against the identity service.
    ///
    /// On success the credentials are persisted and a replace-navigation
    /// to the role's dashboard is returned (the login screen must not
    /// remain in history). On any failure the store and the in-memory
    /// session are cleared entirely before the error propagates.
    #[instrument(skip(self, password))]
    pub async fn login(&mut self, phone: &str, password: &str) -> Result<Navigation, SessionError> {
        self.status = SessionStatus::Authenticating;
        self.last_error = None;

        let request = LoginRequest {
            phone: phone::normalize(phone),
            password: password.to_string(),
        };

        match self.try_login(&request).await {
            Ok(navigation) => {
                self.status = SessionStatus::Idle;
                Ok(navigation)
            }
            Err(err) => {
                error!(code = err.code(), error = %err, "login failed");
                self.clear().await;
                self.status = SessionStatus::Error;
                self.last_error = Some(err.display_message(LOGIN_FALLBACK));
                Err(err)
            }
        }
    }

    async fn try_login(&mut self, request: &LoginRequest) -> Result<Navigation, SessionError> {
        let response = self.client.login(request).await?;
        let Credentials { user, token } = envelope::unwrap_credentials(&response)?;

        let raw_user =
            serde_json::to_string(&user).map_err(|e| SessionError::Storage(e.to_string()))?;
        self.store.set(TOKEN_KEY, &token).await?;
        self.store.set(USER_KEY, &raw_user).await?;

        info!(user_id = %user.id, role = %user.role, "login succeeded");
        let route = route_for_role(&user.role);
        self.user = Some(user);
        self.token = Some(token);
        Ok(Navigation::Replace(route))
    }

    /// Register a new account.
    ///
    /// A successful registration does NOT create a session; the user
    /// authenticates separately afterwards, so the returned intent is a
    /// push to the login entry point (back-navigation stays possible).
    #[instrument(skip(self, password, profile))]
    pub async fn register(
        &mut self,
        phone: &str,
        password: &str,
        profile: RegistrationProfile,
    ) -> Result<Navigation, SessionError> {
        self.status = SessionStatus::Authenticating;
        self.last_error = None;

        let request =
            RegistrationRequest::new(phone::normalize(phone), password.to_string(), profile);
        debug!(phone = %request.phone, role = request.role.as_str(), "sending registration");

        match self.client.register(&request).await {
            Ok(response) if response.is_success() => {
                info!(phone = %request.phone, "registration accepted");
                self.status = SessionStatus::Idle;
                Ok(Navigation::Push(Route::Login))
            }
            Ok(response) => {
                let message =
                    response.message.unwrap_or_else(|| REGISTER_FALLBACK.to_string());
                self.fail_register(SessionError::RemoteRejected(message))
            }
            Err(err) => self.fail_register(err),
        }
    }

    fn fail_register(&mut self, err: SessionError) -> Result<Navigation, SessionError> {
        error!(code = err.code(), error = %err, "registration failed");
        self.status = SessionStatus::Error;
        self.last_error = Some(err.display_message(REGISTER_FALLBACK));
        Err(err)
    }

    /// Drop the session everywhere and route back to login.
    ///
    /// Idempotent: with no active session this only emits the navigation.
    pub async fn logout(&mut self) -> Navigation {
        self.clear().await;
        self.status = SessionStatus::Idle;
        self.last_error = None;
        info!("logged out");
        Navigation::Replace(Route::Login)
    }

    // Clears the durable mirror first, then memory. Store failures are
    // logged and swallowed so logout and error recovery never throw.
    async fn clear(&mut self) {
        if let Err(err) = self.store.remove(TOKEN_KEY).await {
            warn!(error = %err, "failed to remove stored token");
        }
        if let Err(err) = self.store.remove(USER_KEY).await {
            warn!(error = %err, "failed to remove stored user");
        }
        self.user = None;
        self.token = None;
    }

    pub fn user(&self) -> Option<&UserRecord> {
        self.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// True while an operation (or the initial restore) is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self.status, SessionStatus::Initializing | SessionStatus::Authenticating)
    }

    /// True iff both user and token are present.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }

    pub fn is_client(&self) -> bool {
        self.has_role(Role::Client)
    }

    pub fn is_driver(&self) -> bool {
        self.has_role(Role::Driver)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    fn has_role(&self, role: Role) -> bool {
        self.user.as_ref().is_some_and(|u| u.role == role.as_str())
    }
}
