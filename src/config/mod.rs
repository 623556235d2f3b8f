//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ValidatorConfig (validated, immutable)
//!     → compiled into the shared Pipeline at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; endpoint tables never change at runtime
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::CallerConfig;
pub use schema::ComplianceConfig;
pub use schema::EndpointDescriptor;
pub use schema::ValidatorConfig;
