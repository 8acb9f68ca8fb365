//! Concrete storage implementations.

pub mod memory_alias_repository;

pub use memory_alias_repository::MemoryAliasRepository;
