pub mod csrf_token;
pub mod lead;
pub mod news;
pub mod system_status;
