// Service exports
pub mod api_client;
pub mod auth;
pub mod geodb_api;
pub mod geodb_client;

pub use api_client::{ApiClient, API_KEY_HEADER, DEFAULT_TIMEOUT_SECS, USER_SECURITY};
pub use auth::{ApiKeyAuth, ApiKeyLocation};
pub use geodb_api::GeoDbApi;
pub use geodb_client::{GeoDbApiClient, AUTH_NAMES};
