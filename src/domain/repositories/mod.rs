//! Repository trait definitions for the domain layer.
//!
//! Traits define the storage contract; the concrete store lives in
//! `crate::infrastructure::persistence`. Mock implementations are
//! auto-generated via `mockall` for unit tests.

pub mod alias_repository;

pub use alias_repository::AliasRepository;

#[cfg(test)]
pub use alias_repository::MockAliasRepository;
