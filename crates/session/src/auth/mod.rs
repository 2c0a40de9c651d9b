//! Auth module: domain types, phone canonicalization, envelope
//! unwrapping and the session state machine.

pub mod domain;
pub mod envelope;
pub mod errors;
pub mod manager;
pub mod phone;

pub use errors::SessionError;
pub use manager::SessionManager;
