use std::{sync::Arc, time::Duration};

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::{rngs::OsRng, RngCore};
use tokio::{task::JoinHandle, time::MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::{
    application::{
        error::ApplicationError, repositories::token_repository::TokenRepository,
        services::clock::Clock,
    },
    domain::models::csrf_token::CsrfToken,
};

/// 256 bits from the OS CSPRNG.
const TOKEN_BYTES: usize = 32;
const MAX_ISSUE_ATTEMPTS: usize = 3;

pub type TokenGenerator = fn() -> Result<String, ApplicationError>;

#[derive(Debug, Clone, PartialEq)]
pub struct IssuedToken {
    pub value: String,
    pub expires_in: u64,
}

/// Issues and validates single-use anti-forgery tokens.
#[derive(Clone)]
pub struct TokenService {
    repository: Arc<dyn TokenRepository>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    generate: TokenGenerator,
}

impl TokenService {
    pub fn new(repository: Arc<dyn TokenRepository>, clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            repository,
            clock,
            ttl,
            generate: generate_token_value,
        }
    }

    pub fn with_generator(mut self, generate: TokenGenerator) -> Self {
        self.generate = generate;
        self
    }

    pub fn repository(&self) -> &Arc<dyn TokenRepository> {
        &self.repository
    }

    /// Issues a fresh token, optionally bound to a session identifier.
    pub async fn issue(&self, binding: Option<String>) -> Result<IssuedToken, ApplicationError> {
        let ttl = chrono::Duration::from_std(self.ttl).map_err(|e| {
            ApplicationError::GenerationFailure(format!("Token TTL out of range: {}", e))
        })?;

        for attempt in 1..=MAX_ISSUE_ATTEMPTS {
            let value = (self.generate)()?;
            let issued_at = self.clock.now();
            if issued_at.checked_add_signed(ttl).is_none() {
                return Err(ApplicationError::GenerationFailure(
                    "Token expiry is past the representable date range".to_string(),
                ));
            }
            let token = CsrfToken::new(value, binding.clone(), issued_at, ttl);

            let stored = self.repository.insert(&token).await.map_err(|e| {
                ApplicationError::GenerationFailure(format!("Failed to store token: {}", e))
            })?;

            if stored {
                debug!(
                    "Issued token {} (bound: {}, expires_at: {})",
                    token_prefix(&token.value),
                    token.binding.is_some(),
                    token.expires_at
                );
                return Ok(IssuedToken {
                    value: token.value,
                    expires_in: self.ttl.as_secs(),
                });
            }

            warn!("Token value collision on attempt {}", attempt);
        }

        Err(ApplicationError::GenerationFailure(
            "Could not allocate a unique token value".to_string(),
        ))
    }

    /// Accepts `value` exactly once, before it expires.
    pub async fn validate(&self, value: &str, binding: Option<&str>) -> Result<(), ApplicationError> {
        if value.is_empty() {
            return Err(ApplicationError::InvalidToken);
        }

        if self
            .repository
            .consume(value, binding, self.clock.now())
            .await?
        {
            debug!("Token {} consumed", token_prefix(value));
            Ok(())
        } else {
            debug!("Token {} rejected", token_prefix(value));
            Err(ApplicationError::InvalidToken)
        }
    }

    pub async fn purge_expired(&self) -> Result<usize, ApplicationError> {
        self.repository.purge_expired(self.clock.now()).await
    }

    pub async fn live_count(&self) -> Option<usize> {
        self.repository.live_count(self.clock.now()).await
    }
}

/// Periodically reclaims expired tokens. Validation already rejects them,
/// so a failed sweep only delays reclamation.
pub fn spawn_sweeper(service: TokenService, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await;

        info!(
            "Token sweeper started for {} store, interval {:?}",
            service.repository.backend_name(),
            every
        );

        loop {
            ticker.tick().await;
            match service.purge_expired().await {
                Ok(0) => {}
                Ok(removed) => debug!("Reclaimed {} expired tokens", removed),
                Err(e) => error!("Token sweep failed: {}", e),
            }
        }
    })
}

pub fn generate_token_value() -> Result<String, ApplicationError> {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| ApplicationError::GenerationFailure(format!("Random source failed: {}", e)))?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

/// Enough of a token to correlate log lines without leaking it.
pub(crate) fn token_prefix(value: &str) -> String {
    let prefix: String = value.chars().take(6).collect();
    format!("{}...", prefix)
}
