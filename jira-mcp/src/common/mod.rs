//! Common utilities module
//!
//! Small helpers shared by the configuration layer and the MCP tools.

/// Environment variable loading utilities
pub mod env_loader;

pub use env_loader::{load_env_string, EnvLoader};
