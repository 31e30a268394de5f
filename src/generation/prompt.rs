//! Prompt templates for the image and copywriting models.

use super::options::Language;
use super::request::GenerationRequest;

/// Which piece of ad copy the copywriter is asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CopyKind {
    #[default]
    Headline,
    Body,
    Button,
}

impl CopyKind {
    fn describe(&self) -> &'static str {
        match self {
            CopyKind::Headline => "text overlay/headline",
            CopyKind::Body => "body",
            CopyKind::Button => "button",
        }
    }
}

/// Art-direction prompt for one creative
pub fn image_prompt(request: &GenerationRequest) -> String {
    let hook = request.hook;
    let vertical = request.vertical.name();
    let mut lines = vec![
        "Create a high-quality advertising image for a Nutra (Health Supplement) campaign.".to_string(),
        String::new(),
        format!("Vertical (Niche): {}", vertical),
        format!(
            "Marketing Angle: {} ({})",
            hook.name(),
            hook.prompt_modifier().unwrap_or_default()
        ),
        format!("Visual Style: {}", request.style.name()),
        format!("Target Audience Language Context: {}", request.language.code()),
        String::new(),
        format!("User Idea: \"{}\"", request.prompt.trim()),
    ];

    let optional_text = request.optional_text.trim();
    if optional_text.is_empty() {
        lines.push(
            "Text: Do NOT include text on the image unless it's a generic label or strictly necessary.".to_string(),
        );
    } else {
        lines.push(format!(
            "Text Requirement: The user explicitly wants text on the image like: \"{}\". Integrate it naturally if possible, or leave clear space for it.",
            optional_text
        ));
    }

    if request.auto_generate_text {
        lines.push(String::new());
        lines.push(
            "IMPORTANT COMPOSITION RULE: Leave the bottom 30% of the image relatively empty (negative space) or solid color so I can overlay text later. Do not put crucial details at the very bottom.".to_string(),
        );
    }

    lines.extend([
        String::new(),
        "Instructions:".to_string(),
        "1. Analyze the User Idea. If it is not in English, translate it to English internally to understand the context.".to_string(),
        "2. Generate an image based on the Vertical, Marketing Angle, and Style.".to_string(),
        "3. CRITICAL REQUIREMENT: Do NOT render generic 3D bottles, jars, pills, or packaging unless the User Idea explicitly asks for them. The user will add their own product layer later. Focus on the problem, the result, or the ingredients.".to_string(),
        "4. Requirements:".to_string(),
        "   - High resolution, professional composition.".to_string(),
        "   - If Medical style: ensure anatomical correctness (artistic).".to_string(),
        "   - If Natural style: make it look organic and fresh.".to_string(),
        "   - If Pain based: visualize the area of discomfort clearly (e.g., glowing red knee, heatmap on back).".to_string(),
        "   - If Pixel Art style: make sure it looks like 8-bit or 16-bit retro game graphics.".to_string(),
        "   - If Comic style: use bold lines and pop-art colors.".to_string(),
        format!("   - Context: Ensure the image makes sense for the '{}' niche.", vertical),
    ]);

    if !request.reference_images.is_empty() {
        lines.push(
            "   - Reference images have been provided. Use them as strong inspiration for the composition, color palette, or subject matter, but adapt them to the specified Marketing Angle.".to_string(),
        );
    }

    lines.join("\n")
}

/// Copywriting prompt: a few punchy words in the target language
pub fn copy_prompt(topic: &str, language: Language, kind: CopyKind) -> String {
    let code = language.code();
    [
        "You are a world-class copywriter for Nutra/CPA marketing.".to_string(),
        String::new(),
        format!("Task: Write a short, punchy {} for an ad creative.", kind.describe()),
        format!("Input Context: \"{}\"", topic.trim()),
        format!("Target Language: {}", code),
        String::new(),
        "Constraints:".to_string(),
        format!("- Language: MUST be in the target language ({}).", code),
        "- Length: Maximum 5-6 words. Short and impactful.".to_string(),
        "- Style: Clickbait, Urgent, or Trustworthy (depending on context).".to_string(),
        "- Return ONLY the text, no quotes, no explanations.".to_string(),
    ]
    .join("\n")
}
