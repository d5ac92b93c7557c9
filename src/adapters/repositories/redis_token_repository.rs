use async_trait::async_trait;
use chrono::{DateTime, Utc};
use redis::Script;
use tracing::{debug, error};

use crate::{
    application::{error::ApplicationError, repositories::token_repository::TokenRepository},
    domain::models::csrf_token::CsrfToken,
};

/// GET, compare binding and DEL in one server-side step so racing consumers
/// across instances see exactly one success. An empty stored binding marks
/// an anonymous token.
const CONSUME_SCRIPT: &str = r#"
local binding = redis.call('GET', KEYS[1])
if not binding then
    return 0
end
if binding ~= '' and binding ~= ARGV[1] then
    return 0
end
redis.call('DEL', KEYS[1])
return 1
"#;

/// Token store shared by every instance behind the load balancer.
///
/// Expiry is delegated to Redis (`EX`), and consumption deletes the key.
pub struct RedisTokenRepository {
    client: redis::aio::ConnectionManager,
    consume_script: Script,
}

impl RedisTokenRepository {
    pub fn new(client: redis::aio::ConnectionManager) -> Self {
        Self {
            client,
            consume_script: Script::new(CONSUME_SCRIPT),
        }
    }

    fn get_redis_key(token: &str) -> String {
        format!("csrf_token:{}", token)
    }

    fn ttl_seconds(token: &CsrfToken) -> u64 {
        (token.expires_at - token.issued_at).num_seconds().max(1) as u64
    }
}

#[async_trait]
impl TokenRepository for RedisTokenRepository {
    async fn insert(&self, token: &CsrfToken) -> Result<bool, ApplicationError> {
        let key = Self::get_redis_key(&token.value);
        let binding = token.binding.clone().unwrap_or_default();
        let mut conn = self.client.clone();

        // SET NX replies OK when stored and nil when the key already exists.
        let reply: Option<String> = redis::cmd("SET")
            .arg(&key)
            .arg(&binding)
            .arg("NX")
            .arg("EX")
            .arg(Self::ttl_seconds(token))
            .query_async(&mut conn)
            .await
            .map_err(|e| {
                error!("Failed to store token in Redis: {}", e);
                ApplicationError::InternalError(format!("Failed to store token: {}", e))
            })?;

        Ok(reply.is_some())
    }

    async fn consume(
        &self,
        value: &str,
        binding: Option<&str>,
        _now: DateTime<Utc>,
    ) -> Result<bool, ApplicationError> {
        let key = Self::get_redis_key(value);
        let mut conn = self.client.clone();

        let consumed: i64 = self
            .consume_script
            .key(&key)
            .arg(binding.unwrap_or_default())
            .invoke_async(&mut conn)
            .await
            .map_err(|e| {
                error!("Failed to verify token in Redis: {}", e);
                ApplicationError::InternalError(format!("Failed to verify token: {}", e))
            })?;

        debug!("Redis consume result for token: {}", consumed);
        Ok(consumed == 1)
    }

    async fn purge_expired(&self, _now: DateTime<Utc>) -> Result<usize, ApplicationError> {
        Ok(0)
    }

    async fn live_count(&self, _now: DateTime<Utc>) -> Option<usize> {
        None
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}
