use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::{mapref::entry::Entry, DashMap};

use crate::{
    application::{error::ApplicationError, repositories::token_repository::TokenRepository},
    domain::models::csrf_token::CsrfToken,
};

/// Process-local token store for single-instance deployments.
///
/// Consumed tokens stay in the map until they expire so a replay is
/// rejected the same way as any other invalid token.
#[derive(Default)]
pub struct InMemoryTokenRepository {
    tokens: DashMap<String, CsrfToken>,
}

impl InMemoryTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, value: &str) -> Option<CsrfToken> {
        self.tokens.get(value).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[async_trait]
impl TokenRepository for InMemoryTokenRepository {
    async fn insert(&self, token: &CsrfToken) -> Result<bool, ApplicationError> {
        match self.tokens.entry(token.value.clone()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(token.clone());
                Ok(true)
            }
        }
    }

    async fn consume(
        &self,
        value: &str,
        binding: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<bool, ApplicationError> {
        // get_mut holds the shard write lock for the whole check-and-mark.
        let Some(mut token) = self.tokens.get_mut(value) else {
            return Ok(false);
        };

        if !token.is_usable(now, binding) {
            return Ok(false);
        }

        token.consumed = true;
        Ok(true)
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, ApplicationError> {
        let mut removed = 0;
        self.tokens.retain(|_, token| {
            let keep = !token.is_expired(now);
            if !keep {
                removed += 1;
            }
            keep
        });
        Ok(removed)
    }

    async fn live_count(&self, now: DateTime<Utc>) -> Option<usize> {
        Some(
            self.tokens
                .iter()
                .filter(|entry| !entry.consumed && !entry.is_expired(now))
                .count(),
        )
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn token(value: &str, issued_at: DateTime<Utc>) -> CsrfToken {
        CsrfToken::new(value.to_string(), None, issued_at, Duration::seconds(900))
    }

    #[tokio::test]
    async fn insert_refuses_duplicate_values() {
        let repo = InMemoryTokenRepository::new();
        let now = Utc::now();

        assert!(repo.insert(&token("a", now)).await.unwrap());
        assert!(!repo.insert(&token("a", now)).await.unwrap());
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn consume_marks_token_and_keeps_entry() {
        let repo = InMemoryTokenRepository::new();
        let now = Utc::now();
        repo.insert(&token("a", now)).await.unwrap();

        assert!(repo.consume("a", None, now).await.unwrap());
        assert!(repo.get("a").unwrap().consumed);
        assert!(!repo.consume("a", None, now).await.unwrap());
    }

    #[tokio::test]
    async fn failed_consume_does_not_mutate() {
        let repo = InMemoryTokenRepository::new();
        let now = Utc::now();
        let stored = token("a", now);
        repo.insert(&stored).await.unwrap();

        let later = now + Duration::seconds(901);
        assert!(!repo.consume("a", None, later).await.unwrap());
        assert!(!repo.consume("missing", None, now).await.unwrap());
        assert_eq!(repo.get("a"), Some(stored));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn purge_removes_only_expired_entries() {
        let repo = InMemoryTokenRepository::new();
        let now = Utc::now();
        repo.insert(&token("old", now - Duration::seconds(1000)))
            .await
            .unwrap();
        repo.insert(&token("fresh", now)).await.unwrap();

        assert_eq!(repo.purge_expired(now).await.unwrap(), 1);
        assert!(repo.get("old").is_none());
        assert!(repo.get("fresh").is_some());
    }

    #[tokio::test]
    async fn live_count_skips_consumed_and_expired() {
        let repo = InMemoryTokenRepository::new();
        let now = Utc::now();
        repo.insert(&token("old", now - Duration::seconds(1000)))
            .await
            .unwrap();
        repo.insert(&token("used", now)).await.unwrap();
        repo.insert(&token("fresh", now)).await.unwrap();
        repo.consume("used", None, now).await.unwrap();

        assert_eq!(repo.live_count(now).await, Some(1));
    }
}
