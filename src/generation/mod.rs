//! Image and copy generation against the remote provider.

mod batch;
mod error;
mod gemini;
mod options;
pub mod prompt;
mod provider;
mod request;

pub use batch::{generate_batch, generate_marketing_text, FALLBACK_TEXT};
pub use error::{GenerationError, GenerationResult, ProviderError};
pub use gemini::GeminiClient;
pub use options::{Hook, Language, Vertical, VisualStyle};
pub use prompt::CopyKind;
pub use provider::{Delay, ImageProvider, TextProvider, TimerDelay};
pub use request::{GenerationRequest, ImagePayload, MAX_REFERENCE_IMAGES};
