//! GeoDB Client - typed access to the GeoDB geographic data API
//!
//! Requests are plain structs rendered into calls, every call is
//! authenticated with the `UserSecurity` API key scheme, and responses come
//! back as typed envelopes carrying data, errors and pagination metadata.
//!
//! ```no_run
//! use geodb_client::{GeoDbApi, GeoDbApiClient, GeoDbInstanceType, FindRegionsRequest};
//!
//! # async fn run() -> Result<(), geodb_client::ApiError> {
//! let client = GeoDbApiClient::with_api_key(GeoDbInstanceType::Pro, "my-key")?;
//! let api = GeoDbApi::new(client);
//! let regions = api.find_regions(&FindRegionsRequest::new("US")).await?;
//! println!("{} regions", regions.total_count().unwrap_or_default());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use crate::core::{ApiCall, CollectionFormat, ProgressListener};
pub use error::{ApiError, Result};
pub use models::*;
pub use services::{ApiClient, GeoDbApi, GeoDbApiClient, AUTH_NAMES};
