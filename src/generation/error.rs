pub type GenerationResult<T> = Result<T, GenerationError>;

/// Why a generation request did not produce an image
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    #[error("API key not found. Add your key in settings.")]
    MissingCredential,

    #[error("invalid request: {0}")]
    Validation(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl GenerationError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

/// Failure reported by the remote generation provider
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("rate limit exceeded, wait a moment and try again")]
    RateLimited,

    #[error("the API key was rejected, check it in settings")]
    InvalidCredential,

    #[error("content was blocked by the safety filter, try another idea")]
    SafetyBlocked,

    #[error("the provider returned no image")]
    NoImage,

    #[error("provider error (HTTP {status}): {message}")]
    Http { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ProviderError {
    /// Rate-limit failures get one delayed retry
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, ProviderError::RateLimited)
    }

    /// Classify a non-success HTTP response.
    ///
    /// The body is inspected for the provider's status strings because quota
    /// and safety rejections do not always use a distinctive status code.
    pub fn from_http(status: u16, body: &str) -> Self {
        let upper = body.to_ascii_uppercase();
        if status == 429 || upper.contains("RESOURCE_EXHAUSTED") || upper.contains("QUOTA") {
            return ProviderError::RateLimited;
        }
        if status == 401
            || status == 403
            || upper.contains("API_KEY_INVALID")
            || upper.contains("PERMISSION_DENIED")
        {
            return ProviderError::InvalidCredential;
        }
        if upper.contains("SAFETY") || upper.contains("BLOCKED") {
            return ProviderError::SafetyBlocked;
        }

        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
            .unwrap_or_else(|| format!("HTTP {}", status));
        ProviderError::Http { status, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_classification() {
        assert_eq!(ProviderError::from_http(429, ""), ProviderError::RateLimited);
        let body = r#"{"error":{"code":400,"status":"RESOURCE_EXHAUSTED","message":"Quota exceeded"}}"#;
        assert!(ProviderError::from_http(400, body).is_rate_limit());
    }

    #[test]
    fn test_credential_classification() {
        assert_eq!(ProviderError::from_http(403, "{}"), ProviderError::InvalidCredential);
        let body = r#"{"error":{"status":"INVALID_ARGUMENT","message":"API key not valid","details":[{"reason":"API_KEY_INVALID"}]}}"#;
        assert_eq!(ProviderError::from_http(400, body), ProviderError::InvalidCredential);
    }

    #[test]
    fn test_http_message_extraction() {
        let body = r#"{"error":{"code":500,"message":"backend unavailable"}}"#;
        assert_eq!(
            ProviderError::from_http(500, body),
            ProviderError::Http {
                status: 500,
                message: "backend unavailable".to_string()
            }
        );
        assert_eq!(
            ProviderError::from_http(502, "<html>bad gateway</html>"),
            ProviderError::Http {
                status: 502,
                message: "HTTP 502".to_string()
            }
        );
    }

    #[test]
    fn test_only_rate_limit_is_retryable() {
        assert!(ProviderError::RateLimited.is_rate_limit());
        assert!(!ProviderError::NoImage.is_rate_limit());
        assert!(!ProviderError::Network("offline".into()).is_rate_limit());
    }

    #[test]
    fn test_provider_error_converts_transparently() {
        let err: GenerationError = ProviderError::SafetyBlocked.into();
        assert!(err.to_string().contains("safety filter"));
        assert!(GenerationError::validation("empty prompt")
            .to_string()
            .contains("invalid request:"));
    }
}
