//! Application services.

pub mod alias_service;

pub use alias_service::AliasService;
