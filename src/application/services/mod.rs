pub mod clock;
pub mod crm_client;
pub mod status_cache;
pub mod token_service;

pub use clock::{Clock, ManualClock, SystemClock};
pub use crm_client::CrmClient;
pub use status_cache::{spawn_status_refresher, SystemStatusCache};
pub use token_service::{spawn_sweeper, IssuedToken, TokenService};
