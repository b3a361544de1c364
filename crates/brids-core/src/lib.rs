//! brids-core - Foundation crate for the brazilian-ids workspace.
//!
//! This crate provides the shared error type, configuration management,
//! state-code newtype, and digit helpers that the identifier and CEP range
//! crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`types`] - Shared newtypes (`StateCode`)
//! - [`digits`] - Digit extraction and padding helpers
//!
//! # Example
//!
//! ```rust
//! use brids_core::{AppConfig, StateCode};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//! assert!(config.correios.root_url.starts_with("https://"));
//!
//! let uf = StateCode::new("mg")?;
//! assert_eq!(uf.as_str(), "MG");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod digits;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, CorreiosConfig, LoggingConfig};
pub use error::{BridsError, ConfigError, ConfigResult, Result};
pub use types::StateCode;
