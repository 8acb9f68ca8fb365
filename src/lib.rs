//! # Alias Registry
//!
//! An in-process registry for short, time-limited URL aliases: submit one or
//! more long URLs, get back short codes that resolve to the originals until
//! they expire.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Entities, the storage trait, and the
//!   injectable clock
//! - **Application Layer** ([`application`]) - The alias service: validation,
//!   code generation, batch commit, expiry policy
//! - **Infrastructure Layer** ([`infrastructure`]) - The in-memory store
//!
//! ## Features
//!
//! - Custom short codes with collision checking
//! - All-or-nothing batch creation with per-request error reporting
//! - Time-limited aliases with explicit and read-triggered purging
//! - Deterministic expiry testing through an injected clock
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use alias_registry::prelude::*;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), RegistryError> {
//! let registry = AliasService::new(
//!     Arc::new(MemoryAliasRepository::new()),
//!     Arc::new(SystemClock),
//! );
//!
//! let alias = registry
//!     .create(AliasRequest {
//!         original_url: "https://example.com".to_string(),
//!         validity_minutes: Some(60),
//!         custom_code: None,
//!     })
//!     .await?;
//!
//! let resolved = registry.resolve(&alias.code).await?;
//! assert_eq!(resolved.original_url, "https://example.com");
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! The console binary loads its settings from environment variables via
//! [`config::Config`]. See the [`config`] module for available options.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod utils;

pub use error::RegistryError;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::AliasService;
    pub use crate::domain::clock::{Clock, SystemClock};
    pub use crate::domain::entities::{Alias, AliasRequest, NewAlias};
    pub use crate::domain::repositories::AliasRepository;
    pub use crate::error::{RegistryError, RequestError, RequestField, ValidationError};
    pub use crate::infrastructure::persistence::MemoryAliasRepository;
}
