use super::error::ProviderError;
use super::options::Language;
use super::prompt::CopyKind;
use super::request::{GenerationRequest, ImagePayload};

/// Produces one image per call
#[allow(async_fn_in_trait)]
pub trait ImageProvider {
    async fn generate_image(&self, request: &GenerationRequest) -> Result<ImagePayload, ProviderError>;
}

/// Writes short ad copy
#[allow(async_fn_in_trait)]
pub trait TextProvider {
    async fn generate_text(&self, topic: &str, language: Language, kind: CopyKind) -> Result<String, ProviderError>;
}

/// Suspends the batch between requests
#[allow(async_fn_in_trait)]
pub trait Delay {
    async fn wait(&self, ms: u32);
}

/// Browser timer backed delay
#[derive(Debug, Clone, Copy, Default)]
pub struct TimerDelay;

impl Delay for TimerDelay {
    async fn wait(&self, ms: u32) {
        gloo::timers::future::TimeoutFuture::new(ms).await;
    }
}
