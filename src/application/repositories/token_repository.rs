use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{application::error::ApplicationError, domain::models::csrf_token::CsrfToken};

/// Shared store of issued anti-forgery tokens.
///
/// Implementations must make `consume` atomic per token value: when several
/// callers race on the same value, exactly one of them observes `true`.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Stores the token unless its value is already present.
    ///
    /// # Returns
    /// - Ok(true) if the token was stored
    /// - Ok(false) if a token with the same value already exists
    async fn insert(&self, token: &CsrfToken) -> Result<bool, ApplicationError>;

    /// Marks the token consumed if it exists, is not consumed, has not
    /// expired at `now` and accepts `binding`.
    ///
    /// # Returns
    /// - Ok(true) if this call consumed the token
    /// - Ok(false) otherwise; the store is left untouched
    async fn consume(
        &self,
        value: &str,
        binding: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<bool, ApplicationError>;

    /// Removes entries that expired before `now`, returning how many were
    /// removed. Backends with native expiry return 0.
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, ApplicationError>;

    /// Number of tokens still usable at `now`, when the backend can tell.
    async fn live_count(&self, now: DateTime<Utc>) -> Option<usize>;

    fn backend_name(&self) -> &'static str;
}
