//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! connection profile (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → SdkConfig (validated, immutable)
//!     → shared via Arc by the SDK handle and its providers
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All sections have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{ChannelConfig, ClientConfig, ObservabilityConfig, OrganizationConfig, PeerConfig, SdkConfig};
pub use validation::ValidationError;
