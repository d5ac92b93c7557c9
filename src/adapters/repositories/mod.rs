mod in_memory_token_repository;
mod pg_news_repository;
mod pg_status_repository;
mod redis_token_repository;

pub use in_memory_token_repository::InMemoryTokenRepository;
pub use pg_news_repository::PgNewsRepository;
pub use pg_status_repository::PgStatusRepository;
pub use redis_token_repository::RedisTokenRepository;
