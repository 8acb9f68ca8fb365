//! Core domain entities.

pub mod alias;

pub use alias::{Alias, AliasRequest, NewAlias};
