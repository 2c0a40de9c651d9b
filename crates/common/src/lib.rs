//! Shared plumbing for the session workspace.

pub mod logging;
