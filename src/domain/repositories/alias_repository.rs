//! Repository trait for alias storage.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::{Alias, NewAlias};
use crate::error::RegistryError;

/// Storage contract for alias records and the occupied-code index.
///
/// The store owns both the ordered record collection and the code-uniqueness
/// index; no other component constructs or deletes records. Expiry
/// comparisons use a timestamp passed in by the caller, so the store itself
/// is time-blind.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::MemoryAliasRepository`] - in-process store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AliasRepository: Send + Sync {
    /// Commits a batch of records in input order, all or nothing.
    ///
    /// Conflict checking and insertion happen atomically: if any payload's
    /// code is already occupied, or repeated within the batch, no record is
    /// inserted.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Validation`] carrying a
    /// [`CodeAlreadyInUse`](crate::error::ValidationError::CodeAlreadyInUse)
    /// error tagged with the offending request index.
    async fn create_batch(&self, new_aliases: Vec<NewAlias>) -> Result<Vec<Alias>, RegistryError>;

    /// Finds a record by its short code, expired or not.
    async fn find_by_code(&self, code: &str) -> Result<Option<Alias>, RegistryError>;

    /// True while `code` is held by any tracked record, including expired
    /// records that have not been purged yet.
    async fn code_occupied(&self, code: &str) -> Result<bool, RegistryError>;

    /// Lists all tracked records, newest first; insertion order breaks ties.
    async fn list(&self) -> Result<Vec<Alias>, RegistryError>;

    /// Removes every record expired as of `now` and frees its code.
    /// Returns the number of records removed.
    async fn remove_expired(&self, now: DateTime<Utc>) -> Result<usize, RegistryError>;

    /// Drops every record and frees every code.
    async fn clear(&self) -> Result<(), RegistryError>;
}
