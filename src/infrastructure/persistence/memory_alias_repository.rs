//! In-memory implementation of the alias repository.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::entities::{Alias, NewAlias};
use crate::domain::repositories::AliasRepository;
use crate::error::{RegistryError, RequestError, ValidationError};

/// Process-local alias store.
///
/// Records sit in insertion order next to a code-occupancy index, all behind
/// one reader-writer lock: a write lock per mutating operation, shared reads
/// for lookups. Conflict checking and insertion share the same critical
/// section, so a batch is never partially visible. Ids come from a
/// process-lifetime sequence.
pub struct MemoryAliasRepository {
    store: RwLock<Store>,
}

#[derive(Default)]
struct Store {
    aliases: Vec<Alias>,
    codes: HashSet<String>,
    next_id: i64,
}

impl MemoryAliasRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store::default()),
        }
    }
}

impl Default for MemoryAliasRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AliasRepository for MemoryAliasRepository {
    async fn create_batch(&self, new_aliases: Vec<NewAlias>) -> Result<Vec<Alias>, RegistryError> {
        let mut store = self.store.write().await;

        // Every code must be free before anything is inserted.
        {
            let mut claimed: HashSet<&str> = HashSet::new();
            for (index, new_alias) in new_aliases.iter().enumerate() {
                let code = new_alias.code.as_str();
                if store.codes.contains(code) || !claimed.insert(code) {
                    return Err(RegistryError::Validation(vec![RequestError::new(
                        index,
                        ValidationError::CodeAlreadyInUse,
                    )]));
                }
            }
        }

        let mut created = Vec::with_capacity(new_aliases.len());
        for new_alias in new_aliases {
            store.next_id += 1;
            let id = store.next_id;
            store.codes.insert(new_alias.code.clone());

            let alias = new_alias.into_alias(id);
            store.aliases.push(alias.clone());
            created.push(alias);
        }

        Ok(created)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Alias>, RegistryError> {
        let store = self.store.read().await;
        Ok(store.aliases.iter().find(|a| a.code == code).cloned())
    }

    async fn code_occupied(&self, code: &str) -> Result<bool, RegistryError> {
        let store = self.store.read().await;
        Ok(store.codes.contains(code))
    }

    async fn list(&self) -> Result<Vec<Alias>, RegistryError> {
        let store = self.store.read().await;
        let mut aliases = store.aliases.clone();
        // Stable sort: equal timestamps keep insertion order.
        aliases.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(aliases)
    }

    async fn remove_expired(&self, now: DateTime<Utc>) -> Result<usize, RegistryError> {
        let mut store = self.store.write().await;

        let before = store.aliases.len();
        let mut freed = Vec::new();
        store.aliases.retain(|alias| {
            if alias.is_expired_at(now) {
                freed.push(alias.code.clone());
                false
            } else {
                true
            }
        });
        for code in &freed {
            store.codes.remove(code);
        }

        Ok(before - store.aliases.len())
    }

    async fn clear(&self) -> Result<(), RegistryError> {
        let mut store = self.store.write().await;
        store.aliases.clear();
        store.codes.clear();
        Ok(())
    }
}
