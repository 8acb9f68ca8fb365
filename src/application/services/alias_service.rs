//! Alias creation, resolution, and expiry service.

use std::collections::HashSet;
use std::sync::Arc;

use url::Url;

use crate::domain::clock::Clock;
use crate::domain::entities::{Alias, AliasRequest, NewAlias};
use crate::domain::repositories::AliasRepository;
use crate::error::{RegistryError, RequestError, RequestField, ValidationError};
use crate::utils::code_generator::{generate_code, validate_custom_code};

/// Validity window applied when a request does not specify one.
pub const DEFAULT_VALIDITY_MINUTES: u32 = 30;

/// Collision redraws allowed before code generation is declared exhausted.
const MAX_GENERATION_ATTEMPTS: u32 = 32;

/// The alias registry: validation, code resolution, and expiry policy over
/// an [`AliasRepository`] store and an injected [`Clock`].
///
/// Creation is all-or-nothing per batch: every request is validated before
/// any record is committed, and each validation error is tagged with the
/// index of the request it belongs to. Batch size ceilings are the caller's
/// contract; the registry commits any batch it is given once validation
/// passes.
pub struct AliasService<R: AliasRepository, C: Clock> {
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R: AliasRepository, C: Clock> AliasService<R, C> {
    /// Creates a new alias service.
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Checks a single creation request, returning every violation found
    /// rather than stopping at the first.
    ///
    /// An empty list means the request is valid. Custom-code occupancy is
    /// checked against the store index, so expired-but-unpurged records
    /// still block their code.
    pub async fn validate(
        &self,
        request: &AliasRequest,
    ) -> Result<Vec<ValidationError>, RegistryError> {
        let mut errors = Vec::new();

        if request.original_url.trim().is_empty() {
            errors.push(ValidationError::RequiredField);
        } else if !is_absolute_url(&request.original_url) {
            errors.push(ValidationError::MalformedUrl);
        }

        if request.validity_minutes == Some(0) {
            errors.push(ValidationError::InvalidValidity);
        }

        if let Some(code) = request.custom_code.as_deref() {
            if let Err(error) = validate_custom_code(code) {
                errors.push(error);
            } else if self.repository.code_occupied(code).await? {
                errors.push(ValidationError::CodeAlreadyInUse);
            }
        }

        Ok(errors)
    }

    /// Creates a single alias.
    ///
    /// Behaves as a one-element batch; validation errors carry index 0.
    ///
    /// # Errors
    ///
    /// See [`Self::create_batch`].
    pub async fn create(&self, request: AliasRequest) -> Result<Alias, RegistryError> {
        let mut created = self.create_batch(vec![request]).await?;
        Ok(created
            .pop()
            .expect("a committed one-element batch holds one record"))
    }

    /// Creates a batch of aliases with all-or-nothing semantics.
    ///
    /// Every request is validated first; if any fails, nothing is committed
    /// and the error lists each violation tagged with its request index. A
    /// custom code repeated within the batch is a `CodeAlreadyInUse` on the
    /// later request. Only when every request passes does the registry
    /// commit all of them, in input order.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::Validation`] - one or more requests invalid, nothing committed
    /// - [`RegistryError::CodeSpaceExhausted`] - generation could not find a free code
    pub async fn create_batch(
        &self,
        requests: Vec<AliasRequest>,
    ) -> Result<Vec<Alias>, RegistryError> {
        tracing::info!(count = requests.len(), "shortening urls");

        let mut errors = Vec::new();
        {
            let mut seen_codes: HashSet<&str> = HashSet::new();
            for (index, request) in requests.iter().enumerate() {
                let mut request_errors = self.validate(request).await?;

                // A custom code may also collide with an earlier request in
                // the same batch; neither occupies the store index yet.
                if let Some(code) = request.custom_code.as_deref() {
                    let code_clean = request_errors
                        .iter()
                        .all(|e| e.field() != RequestField::CustomCode);
                    if code_clean && !seen_codes.insert(code) {
                        request_errors.push(ValidationError::CodeAlreadyInUse);
                    }
                }

                errors.extend(
                    request_errors
                        .into_iter()
                        .map(|error| RequestError::new(index, error)),
                );
            }
        }

        if !errors.is_empty() {
            tracing::warn!(errors = errors.len(), "validation failed, nothing created");
            return Err(RegistryError::Validation(errors));
        }

        let mut claimed: HashSet<String> = HashSet::new();
        let mut new_aliases = Vec::with_capacity(requests.len());
        for AliasRequest {
            original_url,
            validity_minutes,
            custom_code,
        } in requests
        {
            let code = match custom_code {
                Some(code) => code,
                None => self.generate_unique_code(&claimed).await?,
            };
            claimed.insert(code.clone());

            let minutes = validity_minutes.unwrap_or(DEFAULT_VALIDITY_MINUTES);
            new_aliases.push(NewAlias::new(code, original_url, minutes, self.clock.now()));
        }

        let created = self.repository.create_batch(new_aliases).await?;
        for alias in &created {
            tracing::info!(
                code = %alias.code,
                original_url = %alias.original_url,
                expires_at = %alias.expires_at,
                "alias created"
            );
        }

        Ok(created)
    }

    /// Looks up the live record for a short code.
    ///
    /// Expired records report as not found but stay in place; only purging
    /// removes them.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] for unknown or expired codes.
    pub async fn resolve(&self, code: &str) -> Result<Alias, RegistryError> {
        let Some(alias) = self.repository.find_by_code(code).await? else {
            tracing::warn!(code, "short code not found");
            return Err(RegistryError::NotFound {
                code: code.to_string(),
            });
        };

        if alias.is_expired_at(self.clock.now()) {
            tracing::warn!(code, expires_at = %alias.expires_at, "short code expired");
            return Err(RegistryError::NotFound {
                code: code.to_string(),
            });
        }

        tracing::info!(code, original_url = %alias.original_url, "alias resolved");
        Ok(alias)
    }

    /// Purges expired records, then lists the remainder newest first.
    ///
    /// This is the read path that frees expired codes for reuse; it mirrors
    /// the statistics view loading the table.
    pub async fn list_live(&self) -> Result<Vec<Alias>, RegistryError> {
        self.purge_expired().await?;
        self.repository.list().await
    }

    /// Removes every expired record and frees its code.
    ///
    /// Returns the number of records removed. Idempotent: a second sweep
    /// with no time passing removes nothing.
    pub async fn purge_expired(&self) -> Result<usize, RegistryError> {
        let removed = self.repository.remove_expired(self.clock.now()).await?;
        if removed > 0 {
            tracing::info!(removed, "cleared expired aliases");
        }
        Ok(removed)
    }

    /// Display form of a short URL: `{origin}/{code}`.
    ///
    /// The origin comes from the caller; the registry never derives it.
    pub fn short_url(&self, origin: &str, code: &str) -> String {
        format!("{}/{}", origin.trim_end_matches('/'), code)
    }

    /// Draws codes until one is neither occupied nor claimed earlier in the
    /// current batch.
    async fn generate_unique_code(
        &self,
        claimed: &HashSet<String>,
    ) -> Result<String, RegistryError> {
        for _ in 0..MAX_GENERATION_ATTEMPTS {
            let code = generate_code();

            if claimed.contains(&code) {
                continue;
            }
            if !self.repository.code_occupied(&code).await? {
                return Ok(code);
            }
        }

        tracing::error!(
            attempts = MAX_GENERATION_ATTEMPTS,
            "short code space exhausted"
        );
        Err(RegistryError::CodeSpaceExhausted {
            attempts: MAX_GENERATION_ATTEMPTS,
        })
    }
}

/// An original URL must parse as absolute and name a host.
fn is_absolute_url(input: &str) -> bool {
    Url::parse(input).map(|url| url.has_host()).unwrap_or(false)
}
