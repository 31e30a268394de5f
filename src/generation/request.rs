use serde::{Deserialize, Serialize};

use super::error::{GenerationError, GenerationResult};
use super::options::{Hook, Language, Vertical, VisualStyle};

/// Maximum number of style reference images sent with one request
pub const MAX_REFERENCE_IMAGES: usize = 10;

/// Base64 image bytes plus their MIME type
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePayload {
    pub mime_type: String,
    pub data: String,
}

impl ImagePayload {
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Generated images are PNG unless the provider says otherwise
    pub fn png(data: impl Into<String>) -> Self {
        Self::new("image/png", data)
    }

    /// Parse a `data:<mime>;base64,<data>` URL
    pub fn from_data_url(url: &str) -> Option<Self> {
        let rest = url.strip_prefix("data:")?;
        let (mime_type, data) = rest.split_once(";base64,")?;
        if mime_type.is_empty() || data.is_empty() {
            return None;
        }
        Some(Self::new(mime_type, data))
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

/// Everything the provider needs to produce one creative
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Free-form creative idea
    pub prompt: String,
    pub hook: Hook,
    pub style: VisualStyle,
    pub vertical: Vertical,
    pub language: Language,
    /// Text the user wants to appear on the image, empty when none
    pub optional_text: String,
    pub reference_images: Vec<ImagePayload>,
    /// Leave room for a headline and write one after a variant is chosen
    pub auto_generate_text: bool,
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            hook: Hook::PainBased,
            style: VisualStyle::Realism,
            vertical: Vertical::Joints,
            language: Language::default(),
            optional_text: String::new(),
            reference_images: Vec::new(),
            auto_generate_text: true,
        }
    }
}

impl GenerationRequest {
    pub fn validate(&self) -> GenerationResult<()> {
        if self.prompt.trim().is_empty() {
            return Err(GenerationError::validation("enter a creative idea"));
        }
        if self.reference_images.len() > MAX_REFERENCE_IMAGES {
            return Err(GenerationError::validation(format!(
                "at most {} reference images are allowed, got {}",
                MAX_REFERENCE_IMAGES,
                self.reference_images.len()
            )));
        }
        Ok(())
    }

    /// Topic handed to the copywriter when a headline is auto-generated
    pub fn headline_topic(&self) -> String {
        let custom = self.optional_text.trim();
        if custom.is_empty() {
            format!("Sell a remedy for: {}", self.vertical.name())
        } else {
            custom.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(prompt: &str) -> GenerationRequest {
        GenerationRequest {
            prompt: prompt.to_string(),
            ..GenerationRequest::default()
        }
    }

    #[test]
    fn test_data_url_parsing() {
        let payload = ImagePayload::from_data_url("data:image/jpeg;base64,/9j/4AAQ").unwrap();
        assert_eq!(payload.mime_type, "image/jpeg");
        assert_eq!(payload.data, "/9j/4AAQ");
        assert_eq!(payload.to_data_url(), "data:image/jpeg;base64,/9j/4AAQ");

        assert!(ImagePayload::from_data_url("https://example.com/a.png").is_none());
        assert!(ImagePayload::from_data_url("data:image/png,raw").is_none());
        assert!(ImagePayload::from_data_url("data:;base64,AAAA").is_none());
    }

    #[test]
    fn test_validate_rejects_blank_prompt() {
        assert!(matches!(request("   ").validate(), Err(GenerationError::Validation(_))));
        assert!(request("knee pain relief").validate().is_ok());
    }

    #[test]
    fn test_validate_caps_reference_images() {
        let mut req = request("idea");
        req.reference_images = vec![ImagePayload::png("AAAA"); MAX_REFERENCE_IMAGES];
        assert!(req.validate().is_ok());

        req.reference_images.push(ImagePayload::png("AAAA"));
        assert!(matches!(req.validate(), Err(GenerationError::Validation(_))));
    }

    #[test]
    fn test_headline_topic_falls_back_to_vertical() {
        let mut req = request("idea");
        req.vertical = Vertical::Cardio;
        assert_eq!(req.headline_topic(), "Sell a remedy for: Cardio/Heart");

        req.optional_text = "  Heart like new  ".to_string();
        assert_eq!(req.headline_topic(), "Heart like new");
    }
}
