mod error;
mod http_crm_client;

pub use error::CrmError;
pub use http_crm_client::HttpCrmClient;
