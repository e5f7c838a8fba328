use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error returned by every GeoDB call
///
/// Carries the HTTP status code and raw response body when the remote API
/// produced one, so callers can inspect the API's own error payload.
/// Transport, status and deserialization failures all surface as this type.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ApiError {
    message: String,
    code: Option<u16>,
    response_body: Option<String>,
    #[source]
    source: Option<BoxError>,
}

impl ApiError {
    /// A call could not be constructed (bad header, unknown auth name, bad URL)
    pub fn invalid_call(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            response_body: None,
            source: None,
        }
    }

    /// The remote API answered with a non-2xx status
    pub fn status(code: u16, response_body: String) -> Self {
        Self {
            message: format!("API returned status {}", code),
            code: Some(code),
            response_body: Some(response_body),
            source: None,
        }
    }

    /// The response body could not be mapped onto the expected envelope
    pub fn deserialize(code: u16, err: serde_json::Error, response_body: String) -> Self {
        Self {
            message: format!("Invalid response format: {}", err),
            code: Some(code),
            response_body: Some(response_body),
            source: Some(Box::new(err)),
        }
    }

    /// HTTP status code, if the call got as far as a response
    pub fn code(&self) -> Option<u16> {
        self.code
    }

    /// Raw response body text, if any was read
    pub fn response_body(&self) -> Option<&str> {
        self.response_body.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self {
            message: format!("HTTP request failed: {}", err),
            code: err.status().map(|s| s.as_u16()),
            response_body: None,
            source: Some(Box::new(err)),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_status_error_keeps_body() {
        let err = ApiError::status(401, r#"{"message":"Invalid API key"}"#.to_string());

        assert_eq!(err.code(), Some(401));
        assert_eq!(err.response_body(), Some(r#"{"message":"Invalid API key"}"#));
        assert!(err.to_string().contains("401"));
        assert!(err.source().is_none());
    }

    #[test]
    fn test_deserialize_error_has_source() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = ApiError::deserialize(200, json_err, "{not json".to_string());

        assert_eq!(err.code(), Some(200));
        assert_eq!(err.response_body(), Some("{not json"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_invalid_call_has_no_status() {
        let err = ApiError::invalid_call("Authentication undefined: Other");
        assert_eq!(err.code(), None);
        assert_eq!(err.response_body(), None);
        assert_eq!(err.message(), "Authentication undefined: Other");
    }
}
