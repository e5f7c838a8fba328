use std::collections::BTreeMap;
use std::fmt;

/// Where an API key is sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeyLocation {
    Header,
    Query,
}

/// API key authentication scheme
#[derive(Clone)]
pub struct ApiKeyAuth {
    location: ApiKeyLocation,
    param_name: String,
    api_key: Option<String>,
    api_key_prefix: Option<String>,
}

impl ApiKeyAuth {
    pub fn new(location: ApiKeyLocation, param_name: impl Into<String>) -> Self {
        Self {
            location,
            param_name: param_name.into(),
            api_key: None,
            api_key_prefix: None,
        }
    }

    pub fn location(&self) -> ApiKeyLocation {
        self.location
    }

    pub fn param_name(&self) -> &str {
        &self.param_name
    }

    pub fn has_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = Some(api_key.into());
    }

    pub fn set_api_key_prefix(&mut self, prefix: impl Into<String>) {
        self.api_key_prefix = Some(prefix.into());
    }

    /// Add the key to the outgoing query or headers; no-op without a key
    pub fn apply(&self, query: &mut Vec<(String, String)>, headers: &mut BTreeMap<String, String>) {
        let Some(api_key) = &self.api_key else {
            return;
        };

        let value = match &self.api_key_prefix {
            Some(prefix) => format!("{} {}", prefix, api_key),
            None => api_key.clone(),
        };

        match self.location {
            ApiKeyLocation::Header => {
                headers.insert(self.param_name.clone(), value);
            }
            ApiKeyLocation::Query => query.push((self.param_name.clone(), value)),
        }
    }
}

// Keeps keys out of logs
impl fmt::Debug for ApiKeyAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyAuth")
            .field("location", &self.location)
            .field("param_name", &self.param_name)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_key_prefix", &self.api_key_prefix)
            .finish()
    }
}
