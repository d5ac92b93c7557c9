pub mod csrf_controller;
pub mod health_controller;
pub mod lead_controller;
pub mod news_controller;
pub mod status_controller;
