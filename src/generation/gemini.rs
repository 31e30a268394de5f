//! REST client for the Gemini API.
//!
//! Plain prompts go to the Imagen `:predict` endpoint. Requests with
//! reference images go to a Gemini image model through `:generateContent`,
//! since that endpoint accepts inline image parts. Copy is written by a text
//! model through `:generateContent`.

use gloo::net::http::Request;
use serde_json::{json, Value};

use super::error::{GenerationError, GenerationResult, ProviderError};
use super::options::Language;
use super::prompt::{self, CopyKind};
use super::provider::{ImageProvider, TextProvider};
use super::request::{GenerationRequest, ImagePayload};
use crate::config::{ApiKey, Config};

const API_KEY_HEADER: &str = "x-goog-api-key";
const ASPECT_RATIO: &str = "1:1";
const SAFETY_FINISH_REASONS: [&str; 5] = ["SAFETY", "IMAGE_SAFETY", "PROHIBITED_CONTENT", "BLOCKLIST", "SPII"];

#[derive(Debug, Clone)]
pub struct GeminiClient {
    api_key: ApiKey,
    config: Config,
}

impl GeminiClient {
    /// Fails with [`GenerationError::MissingCredential`] when no key is configured
    pub fn new(config: &Config) -> GenerationResult<Self> {
        let api_key = config.api_key.clone().ok_or(GenerationError::MissingCredential)?;
        Ok(Self {
            api_key,
            config: config.clone(),
        })
    }

    async fn post(&self, url: &str, body: &Value) -> Result<Value, ProviderError> {
        let response = Request::post(url)
            .header(API_KEY_HEADER, self.api_key.expose())
            .json(body)
            .map_err(|e| ProviderError::Decode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !response.ok() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            log::warn!("{} responded with HTTP {}", url, status);
            return Err(ProviderError::from_http(status, &text));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))
    }
}

impl ImageProvider for GeminiClient {
    async fn generate_image(&self, request: &GenerationRequest) -> Result<ImagePayload, ProviderError> {
        let prompt = prompt::image_prompt(request);
        let (url, body) = if request.reference_images.is_empty() {
            (
                self.config.model_url(&self.config.image_model, "predict"),
                predict_body(&prompt),
            )
        } else {
            (
                self.config.model_url(&self.config.reference_image_model, "generateContent"),
                image_content_body(&prompt, &request.reference_images),
            )
        };
        log::debug!("image request to {} ({} chars)", url, prompt.len());

        let response = self.post(&url, &body).await?;
        extract_image(&response)
    }
}

impl TextProvider for GeminiClient {
    async fn generate_text(&self, topic: &str, language: Language, kind: CopyKind) -> Result<String, ProviderError> {
        let prompt = prompt::copy_prompt(topic, language, kind);
        let url = self.config.model_url(&self.config.text_model, "generateContent");
        let response = self.post(&url, &text_body(&prompt)).await?;
        extract_text(&response)
    }
}

fn predict_body(prompt: &str) -> Value {
    json!({
        "instances": [{ "prompt": prompt }],
        "parameters": {
            "sampleCount": 1,
            "aspectRatio": ASPECT_RATIO,
            "personGeneration": "allow_all",
        },
    })
}

fn image_content_body(prompt: &str, references: &[ImagePayload]) -> Value {
    let mut parts = vec![json!({ "text": prompt })];
    parts.extend(references.iter().map(|image| {
        json!({
            "inlineData": {
                "mimeType": image.mime_type,
                "data": image.data,
            }
        })
    }));

    json!({
        "contents": [{ "role": "user", "parts": parts }],
        "generationConfig": {
            "responseModalities": ["IMAGE"],
            "imageConfig": { "aspectRatio": ASPECT_RATIO },
        },
    })
}

fn text_body(prompt: &str) -> Value {
    json!({
        "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
    })
}

fn payload(mime_type: Option<&str>, data: &str) -> ImagePayload {
    ImagePayload::new(mime_type.unwrap_or("image/png"), data)
}

/// Pull the first image out of any of the response shapes the API uses
fn extract_image(response: &Value) -> Result<ImagePayload, ProviderError> {
    // Imagen :predict
    if let Some(predictions) = response["predictions"].as_array() {
        for prediction in predictions {
            if let Some(data) = prediction["bytesBase64Encoded"].as_str() {
                return Ok(payload(prediction["mimeType"].as_str(), data));
            }
        }
        if predictions.iter().any(|p| p["raiFilteredReason"].is_string()) {
            return Err(ProviderError::SafetyBlocked);
        }
    }

    // SDK-style generatedImages
    if let Some(images) = response["generatedImages"].as_array() {
        for image in images {
            let data = image["image"]["imageBytes"]
                .as_str()
                .or_else(|| image["imageBytes"].as_str())
                .or_else(|| image["bytes"].as_str());
            if let Some(data) = data {
                return Ok(payload(image["image"]["mimeType"].as_str(), data));
            }
        }
    }

    if response["promptFeedback"]["blockReason"].is_string() {
        return Err(ProviderError::SafetyBlocked);
    }

    // :generateContent
    if let Some(candidate) = response["candidates"].get(0) {
        if let Some(parts) = candidate["content"]["parts"].as_array() {
            for part in parts {
                let inline = &part["inlineData"];
                if let Some(data) = inline["data"].as_str() {
                    return Ok(payload(inline["mimeType"].as_str(), data));
                }
            }
        }
        let blocked = candidate["finishReason"]
            .as_str()
            .is_some_and(|reason| SAFETY_FINISH_REASONS.contains(&reason));
        if blocked {
            return Err(ProviderError::SafetyBlocked);
        }
    }

    Err(ProviderError::NoImage)
}

/// Concatenate the text parts of the first candidate
fn extract_text(response: &Value) -> Result<String, ProviderError> {
    if response["promptFeedback"]["blockReason"].is_string() {
        return Err(ProviderError::SafetyBlocked);
    }
    let text: String = response["candidates"][0]["content"]["parts"]
        .as_array()
        .map(|parts| parts.iter().filter_map(|p| p["text"].as_str()).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(ProviderError::Decode("response contained no text".to_string()));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_requires_key() {
        let err = GeminiClient::new(&Config::default()).unwrap_err();
        assert_eq!(err, GenerationError::MissingCredential);

        let config = Config::default().with_api_key(ApiKey::new("key"));
        assert!(GeminiClient::new(&config).is_ok());
    }

    #[test]
    fn test_predict_body_shape() {
        let body = predict_body("a knee");
        assert_eq!(body["instances"][0]["prompt"], "a knee");
        assert_eq!(body["parameters"]["sampleCount"], 1);
        assert_eq!(body["parameters"]["aspectRatio"], "1:1");
    }

    #[test]
    fn test_reference_images_sent_inline() {
        let refs = vec![ImagePayload::new("image/jpeg", "JPEG"), ImagePayload::png("PNG")];
        let body = image_content_body("prompt", &refs);
        let parts = body["contents"][0]["parts"].as_array().unwrap();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0]["text"], "prompt");
        assert_eq!(parts[1]["inlineData"]["mimeType"], "image/jpeg");
        assert_eq!(parts[2]["inlineData"]["data"], "PNG");
        assert_eq!(body["generationConfig"]["responseModalities"][0], "IMAGE");
    }

    #[test]
    fn test_extract_image_from_predictions() {
        let response = json!({ "predictions": [{ "bytesBase64Encoded": "AAAA", "mimeType": "image/jpeg" }] });
        assert_eq!(extract_image(&response), Ok(ImagePayload::new("image/jpeg", "AAAA")));

        let filtered = json!({ "predictions": [{ "raiFilteredReason": "filtered" }] });
        assert_eq!(extract_image(&filtered), Err(ProviderError::SafetyBlocked));
    }

    #[test]
    fn test_extract_image_from_generated_images() {
        let response = json!({ "generatedImages": [{ "image": { "imageBytes": "BBBB" } }] });
        assert_eq!(extract_image(&response), Ok(ImagePayload::png("BBBB")));
    }

    #[test]
    fn test_extract_image_from_candidates() {
        let response = json!({
            "candidates": [{
                "content": { "parts": [
                    { "text": "here you go" },
                    { "inlineData": { "mimeType": "image/png", "data": "CCCC" } }
                ]},
                "finishReason": "STOP"
            }]
        });
        assert_eq!(extract_image(&response), Ok(ImagePayload::png("CCCC")));
    }

    #[test]
    fn test_extract_image_failures() {
        let text_only = json!({ "candidates": [{ "content": { "parts": [{ "text": "no" }] }, "finishReason": "STOP" }] });
        assert_eq!(extract_image(&text_only), Err(ProviderError::NoImage));

        let safety = json!({ "candidates": [{ "finishReason": "IMAGE_SAFETY" }] });
        assert_eq!(extract_image(&safety), Err(ProviderError::SafetyBlocked));

        let blocked = json!({ "promptFeedback": { "blockReason": "SAFETY" } });
        assert_eq!(extract_image(&blocked), Err(ProviderError::SafetyBlocked));

        assert_eq!(extract_image(&json!({})), Err(ProviderError::NoImage));
    }

    #[test]
    fn test_extract_text() {
        let response = json!({
            "candidates": [{ "content": { "parts": [{ "text": "Stop " }, { "text": "pain now" }] } }]
        });
        assert_eq!(extract_text(&response).unwrap(), "Stop pain now");

        assert!(matches!(extract_text(&json!({ "candidates": [] })), Err(ProviderError::Decode(_))));
    }
}
