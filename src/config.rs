use std::fmt;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_IMAGE_MODEL: &str = "imagen-4.0-generate-001";
/// Image model used when reference images accompany the request
pub const DEFAULT_REFERENCE_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";

/// Provider credential. Never empty, never padded with whitespace.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(raw: impl AsRef<str>) -> Option<Self> {
        let trimmed = raw.as_ref().trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Masked form for display, e.g. `AIza…9xQk`
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 8 {
            return "•".repeat(chars.len());
        }
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}…{}", head, tail)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey({})", self.masked())
    }
}

/// Pacing of a multi-image request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPolicy {
    /// Images requested per generation
    pub count: usize,
    /// Pause before every request after the first
    pub inter_request_delay_ms: u32,
    /// Pause before the single retry of a rate-limited request
    pub rate_limit_retry_delay_ms: u32,
}

impl Default for BatchPolicy {
    fn default() -> Self {
        Self {
            count: 1,
            inter_request_delay_ms: 1000,
            rate_limit_retry_delay_ms: 10_000,
        }
    }
}

/// Runtime configuration of the application
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_key: Option<ApiKey>,
    pub api_base: String,
    pub image_model: String,
    pub reference_image_model: String,
    pub text_model: String,
    pub batch: BatchPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            reference_image_model: DEFAULT_REFERENCE_IMAGE_MODEL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            batch: BatchPolicy::default(),
        }
    }
}

impl Config {
    pub fn with_api_key(mut self, api_key: Option<ApiKey>) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Full URL of a model method, e.g. `.../models/gemini-2.5-flash:generateContent`
    pub fn model_url(&self, model: &str, method: &str) -> String {
        format!("{}/models/{}:{}", self.api_base.trim_end_matches('/'), model, method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_is_trimmed_and_non_empty() {
        assert_eq!(ApiKey::new("  AIzaKey \n").unwrap().expose(), "AIzaKey");
        assert!(ApiKey::new("").is_none());
        assert!(ApiKey::new(" \t ").is_none());
    }

    #[test]
    fn test_api_key_debug_is_masked() {
        let key = ApiKey::new("AIzaSyA1234567890xyz").unwrap();
        let debug = format!("{:?}", key);
        assert_eq!(debug, "ApiKey(AIza…0xyz)");
        assert!(!debug.contains("1234567"));
        assert_eq!(ApiKey::new("short").unwrap().masked(), "•••••");
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(!config.has_api_key());
        assert_eq!(config.batch.count, 1);
        assert_eq!(config.batch.inter_request_delay_ms, 1000);
        assert_eq!(config.batch.rate_limit_retry_delay_ms, 10_000);
        assert_eq!(config.text_model, "gemini-2.5-flash");
    }

    #[test]
    fn test_model_url() {
        let config = Config {
            api_base: "https://example.test/v1beta/".to_string(),
            ..Config::default()
        };
        assert_eq!(
            config.model_url("imagen-4.0-generate-001", "predict"),
            "https://example.test/v1beta/models/imagen-4.0-generate-001:predict"
        );
    }
}
