pub mod news_repository;
pub mod status_repository;
pub mod token_repository;
