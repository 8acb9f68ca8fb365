//! Alias entity: a short code mapped to an original URL with an expiry.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// A tracked alias record.
///
/// Immutable after creation: there is no update operation, and records leave
/// the store only through an expiry purge or a full reset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alias {
    pub id: i64,
    pub code: String,
    pub original_url: String,
    pub validity_minutes: u32,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Alias {
    /// True once `at` has passed the expiry instant.
    ///
    /// A record is live while `at <= expires_at`; the boundary instant
    /// itself still resolves.
    pub fn is_expired_at(&self, at: DateTime<Utc>) -> bool {
        at > self.expires_at
    }
}

/// Insert payload for a validated creation request.
///
/// The store assigns the id; everything else is fixed here, including the
/// derived expiry instant.
#[derive(Debug, Clone)]
pub struct NewAlias {
    pub code: String,
    pub original_url: String,
    pub validity_minutes: u32,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl NewAlias {
    /// Builds a payload, deriving `expires_at = created_at + validity_minutes`.
    pub fn new(
        code: String,
        original_url: String,
        validity_minutes: u32,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            code,
            original_url,
            validity_minutes,
            created_at,
            expires_at: created_at + Duration::minutes(i64::from(validity_minutes)),
        }
    }

    /// Attaches the store-assigned id, completing the record.
    pub fn into_alias(self, id: i64) -> Alias {
        Alias {
            id,
            code: self.code,
            original_url: self.original_url,
            validity_minutes: self.validity_minutes,
            created_at: self.created_at,
            expires_at: self.expires_at,
        }
    }
}

/// A request to create one alias. Ephemeral: only the records built from it
/// are kept.
#[derive(Debug, Clone, Default)]
pub struct AliasRequest {
    pub original_url: String,
    /// Defaults to 30 minutes when absent.
    pub validity_minutes: Option<u32>,
    /// When absent, a code is generated.
    pub custom_code: Option<String>,
}
