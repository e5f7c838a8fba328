use crate::core::query::{ApiCall, ProgressListener};
use crate::error::{ApiError, Result};
use crate::models::GeoDbInstanceType;
use crate::services::auth::{ApiKeyAuth, ApiKeyLocation};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::{Client, Request, Url};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::time::Duration;

/// Name of the API key scheme registered by default
pub const USER_SECURITY: &str = "UserSecurity";

/// Header carrying the `UserSecurity` key
pub const API_KEY_HEADER: &str = "X-Mashape-Key";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Generic HTTP client for the GeoDB API
///
/// Turns an [`ApiCall`] into a `reqwest::Request`, applying whichever
/// authentication schemes the caller names, then executes it and maps the
/// JSON body onto a typed value.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
    default_headers: BTreeMap<String, String>,
    authentications: BTreeMap<String, ApiKeyAuth>,
}

impl ApiClient {
    /// Create a client for one of the public GeoDB instances
    pub fn new(instance: GeoDbInstanceType) -> Result<Self> {
        Self::with_base_url(instance.instance_uri(), Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client against an arbitrary base URL (proxies, test servers)
    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        let mut authentications = BTreeMap::new();
        authentications.insert(
            USER_SECURITY.to_string(),
            ApiKeyAuth::new(ApiKeyLocation::Header, API_KEY_HEADER),
        );

        let mut default_headers = BTreeMap::new();
        default_headers.insert(
            USER_AGENT.as_str().to_string(),
            format!("geodb-client/{}", env!("CARGO_PKG_VERSION")),
        );

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
            default_headers,
            authentications,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Set the key on every registered API key scheme
    pub fn set_api_key(&mut self, api_key: &str) {
        for auth in self.authentications.values_mut() {
            auth.set_api_key(api_key);
        }
    }

    pub fn set_api_key_prefix(&mut self, prefix: &str) {
        for auth in self.authentications.values_mut() {
            auth.set_api_key_prefix(prefix);
        }
    }

    pub fn add_default_header(&mut self, name: &str, value: impl Into<String>) {
        self.default_headers.insert(name.to_string(), value.into());
    }

    pub fn add_authentication(&mut self, name: &str, auth: ApiKeyAuth) {
        self.authentications.insert(name.to_string(), auth);
    }

    pub fn authentication(&self, name: &str) -> Option<&ApiKeyAuth> {
        self.authentications.get(name)
    }

    /// Build the outgoing request for `call`, authenticated with `auth_names`
    pub fn build_call(&self, call: &ApiCall, auth_names: &[&str]) -> Result<Request> {
        let mut query = call.query_pairs();
        let mut headers = self.default_headers.clone();
        headers.extend(call.headers.iter().map(|(k, v)| (k.clone(), v.clone())));

        for name in auth_names {
            let auth = self
                .authentications
                .get(*name)
                .ok_or_else(|| ApiError::invalid_call(format!("Authentication undefined: {}", name)))?;
            auth.apply(&mut query, &mut headers);
        }

        let raw_url = format!("{}{}", self.base_url, call.path);
        let mut url = Url::parse(&raw_url)
            .map_err(|e| ApiError::invalid_call(format!("Invalid URL {}: {}", raw_url, e)))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter());
        }

        let mut header_map = HeaderMap::new();
        for (name, value) in &headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ApiError::invalid_call(format!("Invalid header name {}: {}", name, e)))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|e| ApiError::invalid_call(format!("Invalid value for header {}: {}", name, e)))?;
            header_map.insert(header_name, header_value);
        }

        let mut builder = self.client.request(call.method.clone(), url).headers(header_map);
        if let Some(body) = &call.body {
            builder = builder.json(body);
        } else if !call.form.is_empty() {
            builder = builder.form(&call.form);
        }

        let request = builder.build()?;

        tracing::debug!("Built {} {} with auth {:?}", call.method, call.path, auth_names);

        Ok(request)
    }

    /// Send a built request and deserialize the response body
    pub async fn execute<T>(&self, request: Request, progress: Option<&dyn ProgressListener>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let method = request.method().clone();
        let path = request.url().path().to_string();

        let mut response = self.client.execute(request).await?;
        let status = response.status();
        let content_length = response.content_length();

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            body.extend_from_slice(&chunk);
            if let Some(listener) = progress {
                listener.update(body.len() as u64, content_length, false);
            }
        }
        if let Some(listener) = progress {
            listener.update(body.len() as u64, content_length, true);
        }

        let text = String::from_utf8_lossy(&body).into_owned();

        if !status.is_success() {
            tracing::warn!("{} {} failed: {} - {}", method, path, status, text);
            return Err(ApiError::status(status.as_u16(), text));
        }

        tracing::debug!("{} {} returned {} ({} bytes)", method, path, status, body.len());

        serde_json::from_slice(&body).map_err(|e| ApiError::deserialize(status.as_u16(), e, text))
    }
}
