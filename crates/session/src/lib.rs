//! Client-side session management.
//! - Authenticates against the remote identity service and keeps the
//!   current user/token in memory.
//! - Persists credentials across restarts through a pluggable store.
//! - Emits routing intents so the presentation layer decides navigation.

pub mod auth;
pub mod bootstrap;
pub mod client;
pub mod storage;

pub use auth::manager::{Navigation, Route, SessionManager};
pub use auth::SessionError;
pub use bootstrap::bootstrap;
