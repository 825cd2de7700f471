//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks, all errors at once)
//!     → ForwarderConfig (validated, immutable)
//!     → ForwarderConfig::transport_options()
//!     → caller-level TransportOptions for the kernel
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a reload by the host
//! - All fields have defaults to allow minimal configs

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::ForwarderConfig;
pub use validation::{validate_config, ValidationError};
