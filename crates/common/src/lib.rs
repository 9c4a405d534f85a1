//! Chumchon E2E Common Library
//!
//! Shared fixtures, credentials and configuration for the Chumchon
//! browser test suite.

pub mod config;
pub mod credentials;
pub mod error;
pub mod fixtures;

// Re-export commonly used types
pub use config::{Browser, SuiteConfig};
pub use credentials::{CredentialRegistry, Role, RoleCredential};
pub use error::{Error, Result};
pub use fixtures::FixtureArena;

/// Suite version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
