use super::error::GenerationResult;
use super::options::Language;
use super::prompt::CopyKind;
use super::provider::{Delay, ImageProvider, TextProvider};
use super::request::{GenerationRequest, ImagePayload};
use crate::config::BatchPolicy;

/// Returned in place of ad copy when the copywriter fails
pub const FALLBACK_TEXT: &str = "Error";

/// Generate `policy.count` images one after another.
///
/// Requests never overlap. Every request after the first waits
/// `inter_request_delay_ms`; a rate-limited request is retried exactly once
/// after `rate_limit_retry_delay_ms`. Any other failure, or a failed retry,
/// aborts the whole batch. `on_progress(current, total)` fires before each
/// request with a 1-based index.
pub async fn generate_batch<P, D, F>(
    provider: &P,
    delay: &D,
    request: &GenerationRequest,
    policy: &BatchPolicy,
    mut on_progress: F,
) -> GenerationResult<Vec<ImagePayload>>
where
    P: ImageProvider,
    D: Delay,
    F: FnMut(usize, usize),
{
    request.validate()?;

    let total = policy.count;
    let mut images = Vec::with_capacity(total);
    log::info!("generating {} image(s)", total);

    for index in 0..total {
        on_progress(index + 1, total);
        if index > 0 {
            delay.wait(policy.inter_request_delay_ms).await;
        }

        match provider.generate_image(request).await {
            Ok(image) => images.push(image),
            Err(err) if err.is_rate_limit() => {
                log::warn!(
                    "request {} of {} rate limited, retrying in {} ms",
                    index + 1,
                    total,
                    policy.rate_limit_retry_delay_ms
                );
                delay.wait(policy.rate_limit_retry_delay_ms).await;
                let image = provider.generate_image(request).await.map_err(|retry_err| {
                    log::error!("retry failed: {}", retry_err);
                    retry_err
                })?;
                images.push(image);
            }
            Err(err) => {
                log::error!("request {} of {} failed: {}", index + 1, total, err);
                return Err(err.into());
            }
        }
    }

    log::info!("generated {} image(s)", images.len());
    Ok(images)
}

/// Ask the copywriter for a short line of ad copy.
///
/// Never fails: provider errors and blank answers yield [`FALLBACK_TEXT`].
pub async fn generate_marketing_text<P: TextProvider>(
    provider: &P,
    topic: &str,
    language: Language,
    kind: CopyKind,
) -> String {
    match provider.generate_text(topic, language, kind).await {
        Ok(text) => {
            let text = text.trim();
            if text.is_empty() {
                log::warn!("copywriter returned an empty answer");
                FALLBACK_TEXT.to_string()
            } else {
                text.to_string()
            }
        }
        Err(err) => {
            log::error!("marketing text failed: {}", err);
            FALLBACK_TEXT.to_string()
        }
    }
}
