use crate::config::ClientSettings;
use crate::core::query::ApiCall;
use crate::error::Result;
use crate::models::GeoDbInstanceType;
use crate::services::api_client::{ApiClient, DEFAULT_TIMEOUT_SECS, USER_SECURITY};
use reqwest::header::USER_AGENT;
use reqwest::Request;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Auth names attached to every GeoDB call, whatever the caller passes
pub const AUTH_NAMES: [&str; 1] = [USER_SECURITY];

/// GeoDB client that always authenticates with `UserSecurity`
///
/// The generic [`ApiClient`] authenticates with whichever scheme names it is
/// given. GeoDB only accepts its header API key, so this wrapper replaces the
/// caller's auth names with [`AUTH_NAMES`] at the one place calls are built.
/// The replacement cannot be turned off.
#[derive(Debug, Clone)]
pub struct GeoDbApiClient {
    inner: ApiClient,
}

impl GeoDbApiClient {
    pub fn new(instance: GeoDbInstanceType) -> Result<Self> {
        Ok(Self {
            inner: ApiClient::new(instance)?,
        })
    }

    pub fn with_api_key(instance: GeoDbInstanceType, api_key: &str) -> Result<Self> {
        let mut client = Self::new(instance)?;
        client.set_api_key(api_key);
        Ok(client)
    }

    /// Point the client at a custom base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            inner: ApiClient::with_base_url(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))?,
        })
    }

    /// Create a client from loaded settings
    pub fn from_settings(settings: &ClientSettings) -> Result<Self> {
        let base_url = settings
            .base_url
            .clone()
            .unwrap_or_else(|| settings.instance.instance_uri().to_string());
        let timeout = Duration::from_secs(settings.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));

        let mut inner = ApiClient::with_base_url(base_url, timeout)?;
        if let Some(api_key) = &settings.api_key {
            inner.set_api_key(api_key);
        }
        if let Some(user_agent) = &settings.user_agent {
            inner.add_default_header(USER_AGENT.as_str(), user_agent.clone());
        }

        tracing::debug!(
            "GeoDB client for {} (key configured: {})",
            inner.base_url(),
            settings.api_key.is_some()
        );

        Ok(Self { inner })
    }

    pub fn set_api_key(&mut self, api_key: &str) {
        self.inner.set_api_key(api_key);
    }

    pub fn base_url(&self) -> &str {
        self.inner.base_url()
    }

    /// The fixed auth-name set every call is built with
    pub fn auth_names(&self) -> &'static [&'static str] {
        &AUTH_NAMES
    }

    pub fn inner(&self) -> &ApiClient {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut ApiClient {
        &mut self.inner
    }

    /// Build a call; `auth_names` is ignored in favor of [`AUTH_NAMES`]
    pub fn build_call(&self, call: &ApiCall, auth_names: &[&str]) -> Result<Request> {
        if replaces_auth_names(auth_names) {
            tracing::debug!("Replacing auth names {:?} with {:?}", auth_names, AUTH_NAMES);
        }
        self.inner.build_call(call, &AUTH_NAMES)
    }

    /// Build, send and deserialize one call
    pub async fn invoke<T>(&self, call: ApiCall) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let request = self.build_call(&call, &AUTH_NAMES)?;
        self.inner.execute(request, call.progress.as_deref()).await
    }
}

/// Whether the caller asked for schemes other than [`AUTH_NAMES`]
fn replaces_auth_names(auth_names: &[&str]) -> bool {
    !auth_names.is_empty() && auth_names != &AUTH_NAMES[..]
}
