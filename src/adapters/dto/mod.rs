pub mod lead_dto;
pub mod news_dto;
pub mod token_dto;
