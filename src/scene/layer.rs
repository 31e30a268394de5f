use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use super::types::{Color, Placement, Vec2};

/// Global layer ID counter
static NEXT_LAYER_ID: AtomicU64 = AtomicU64::new(1);

/// Prefix reserved for the generated background layer
const BACKGROUND_PREFIX: &str = "bg-";

pub const TEXT_DEFAULT_WIDTH: f32 = 800.0;
pub const BLUR_DEFAULT_SIZE: f32 = 300.0;
pub const AUTO_TEXT_OFFSET_Y: f32 = 350.0;
pub const PLACEHOLDER_TEXT: &str = "Text";

/// Session-unique layer identifier.
///
/// The string carries a kind prefix (`bg-`, `txt-`, `prod-`, `blur-`);
/// the `bg-` prefix marks the background layer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerId(String);

impl LayerId {
    fn generate(prefix: &str) -> Self {
        let n = NEXT_LAYER_ID.fetch_add(1, Ordering::Relaxed);
        Self(format!("{}{}", prefix, n))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_background(&self) -> bool {
        self.0.starts_with(BACKGROUND_PREFIX)
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Discriminant of [`LayerKind`] without its payload
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerType {
    Image,
    Text,
    Product,
    Blur,
}

impl LayerType {
    pub fn label(&self) -> &'static str {
        match self {
            LayerType::Image => "image",
            LayerType::Text => "text",
            LayerType::Product => "product",
            LayerType::Blur => "blur",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageStyle {
    /// CSS filter applied to the image, e.g. `brightness(1.2)`
    pub filter: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_size: f32,
    pub color: Color,
    /// `None` renders a transparent background
    pub background: Option<Color>,
    pub background_opacity: f32,
    pub padding: f32,
    pub line_height: f32,
    pub font_family: String,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 80.0,
            color: Color::white(),
            background: Some(Color::black()),
            background_opacity: 0.5,
            padding: 16.0,
            line_height: 1.2,
            font_family: "Inter".to_string(),
        }
    }
}

impl TextStyle {
    /// Style of the headline produced by automatic text generation
    pub fn headline() -> Self {
        Self {
            background: Some(Color::rgb(0xef, 0x44, 0x44)),
            background_opacity: 0.8,
            padding: 32.0,
            ..Self::default()
        }
    }

    /// CSS background value for the text box
    pub fn css_background(&self) -> String {
        match self.background {
            Some(color) => color.to_css_rgba(self.background_opacity),
            None => "transparent".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlurStyle {
    /// Blur radius in logical pixels
    pub strength: f32,
}

impl Default for BlurStyle {
    fn default() -> Self {
        Self { strength: 20.0 }
    }
}

/// Kind-specific payload of a layer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum LayerKind {
    Image { src: String, style: ImageStyle },
    Product { src: String, style: ImageStyle },
    Text { text: String, width: f32, style: TextStyle },
    Blur { width: f32, height: f32, style: BlurStyle },
}

/// Replacement style for a layer; only applied when it matches the layer kind
#[derive(Clone, Debug, PartialEq)]
pub enum LayerStyle {
    Image(ImageStyle),
    Text(TextStyle),
    Blur(BlurStyle),
}

/// One visual element of the composition
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub id: LayerId,
    pub placement: Placement,
    pub kind: LayerKind,
}

impl Layer {
    /// The generated base image; always centered and unscaled
    pub fn background(src: impl Into<String>) -> Self {
        Self {
            id: LayerId::generate(BACKGROUND_PREFIX),
            placement: Placement::identity(),
            kind: LayerKind::Image {
                src: src.into(),
                style: ImageStyle::default(),
            },
        }
    }

    /// A non-background image layer
    pub fn image(src: impl Into<String>) -> Self {
        Self {
            id: LayerId::generate("img-"),
            placement: Placement::identity(),
            kind: LayerKind::Image {
                src: src.into(),
                style: ImageStyle::default(),
            },
        }
    }

    pub fn product(src: impl Into<String>) -> Self {
        Self {
            id: LayerId::generate("prod-"),
            placement: Placement::identity(),
            kind: LayerKind::Product {
                src: src.into(),
                style: ImageStyle::default(),
            },
        }
    }

    pub fn text(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            id: LayerId::generate("txt-"),
            placement: Placement::identity(),
            kind: LayerKind::Text {
                text: text.into(),
                width: TEXT_DEFAULT_WIDTH,
                style,
            },
        }
    }

    /// Fresh text layer created by the "add text" tool
    pub fn text_placeholder() -> Self {
        Self::text(PLACEHOLDER_TEXT, TextStyle::default())
    }

    /// Headline layer placed below the image center
    pub fn auto_text(text: impl Into<String>) -> Self {
        let mut layer = Self::text(text, TextStyle::headline());
        layer.placement = Placement::at(0.0, AUTO_TEXT_OFFSET_Y);
        layer
    }

    pub fn blur() -> Self {
        Self {
            id: LayerId::generate("blur-"),
            placement: Placement::identity(),
            kind: LayerKind::Blur {
                width: BLUR_DEFAULT_SIZE,
                height: BLUR_DEFAULT_SIZE,
                style: BlurStyle::default(),
            },
        }
    }

    pub fn is_background(&self) -> bool {
        self.id.is_background()
    }

    pub fn layer_type(&self) -> LayerType {
        match self.kind {
            LayerKind::Image { .. } => LayerType::Image,
            LayerKind::Product { .. } => LayerType::Product,
            LayerKind::Text { .. } => LayerType::Text,
            LayerKind::Blur { .. } => LayerType::Blur,
        }
    }

    /// Image payload for image/product layers, the literal string for text
    pub fn content(&self) -> &str {
        match &self.kind {
            LayerKind::Image { src, .. } | LayerKind::Product { src, .. } => src,
            LayerKind::Text { text, .. } => text,
            LayerKind::Blur { .. } => "",
        }
    }

    pub fn position(&self) -> Vec2 {
        self.placement.position
    }

    pub fn scale(&self) -> f32 {
        self.placement.scale
    }

    /// Explicit box width; only text and blur layers have one
    pub fn width(&self) -> Option<f32> {
        match self.kind {
            LayerKind::Text { width, .. } | LayerKind::Blur { width, .. } => Some(width),
            _ => None,
        }
    }

    /// Explicit box height; only blur layers have one
    pub fn height(&self) -> Option<f32> {
        match self.kind {
            LayerKind::Blur { height, .. } => Some(height),
            _ => None,
        }
    }

    /// Merge a partial update into this layer.
    ///
    /// Fields that do not exist for the layer kind are ignored.
    pub fn apply(&mut self, update: &LayerUpdate) {
        if let Some(position) = update.position {
            self.placement.position = position;
        }
        if let Some(scale) = update.scale {
            self.placement.scale = scale;
        }
        if let Some(rotation) = update.rotation {
            self.placement.rotation = rotation;
        }

        match &mut self.kind {
            LayerKind::Image { src, style } | LayerKind::Product { src, style } => {
                if let Some(content) = &update.content {
                    *src = content.clone();
                }
                if let Some(LayerStyle::Image(next)) = &update.style {
                    *style = next.clone();
                }
            }
            LayerKind::Text { text, width, style } => {
                if let Some(content) = &update.content {
                    *text = content.clone();
                }
                if let Some(w) = update.width {
                    *width = w;
                }
                if let Some(LayerStyle::Text(next)) = &update.style {
                    *style = next.clone();
                }
            }
            LayerKind::Blur { width, height, style } => {
                if let Some(w) = update.width {
                    *width = w;
                }
                if let Some(h) = update.height {
                    *height = h;
                }
                if let Some(LayerStyle::Blur(next)) = &update.style {
                    *style = next.clone();
                }
            }
        }
    }
}

/// Partial set of layer fields, merged by [`Layer::apply`]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayerUpdate {
    pub position: Option<Vec2>,
    pub scale: Option<f32>,
    pub rotation: Option<f32>,
    pub content: Option<String>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub style: Option<LayerStyle>,
}

impl LayerUpdate {
    pub fn position(position: Vec2) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    pub fn scale(scale: f32) -> Self {
        Self {
            scale: Some(scale),
            ..Self::default()
        }
    }

    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn width(width: f32) -> Self {
        Self {
            width: Some(width),
            ..Self::default()
        }
    }

    pub fn size(width: f32, height: f32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    pub fn style(style: LayerStyle) -> Self {
        Self {
            style: Some(style),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// True for pure drag moves, which are not recorded in history
    pub fn is_position_only(&self) -> bool {
        self.position.is_some()
            && Self {
                position: None,
                ..self.clone()
            }
            .is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = Layer::text_placeholder();
        let b = Layer::text_placeholder();
        let c = Layer::blur();
        assert_ne!(a.id, b.id);
        assert_ne!(b.id, c.id);
    }

    #[test]
    fn test_background_naming_convention() {
        let bg = Layer::background("data:image/png;base64,AAAA");
        assert!(bg.is_background());
        assert!(bg.id.as_str().starts_with("bg-"));
        assert!(!Layer::image("data:image/png;base64,AAAA").is_background());
        assert!(!Layer::product("x").is_background());
    }

    #[test]
    fn test_defaults() {
        let text = Layer::text_placeholder();
        assert_eq!(text.content(), PLACEHOLDER_TEXT);
        assert_eq!(text.width(), Some(800.0));
        assert_eq!(text.height(), None);

        let blur = Layer::blur();
        assert_eq!(blur.width(), Some(300.0));
        assert_eq!(blur.height(), Some(300.0));
        assert_eq!(blur.content(), "");

        let product = Layer::product("p");
        assert_eq!(product.width(), None);
        assert_eq!(product.scale(), 1.0);
    }

    #[test]
    fn test_auto_text_layout() {
        let layer = Layer::auto_text("Stop joint pain");
        assert_eq!(layer.position(), Vec2::new(0.0, 350.0));
        assert_eq!(layer.layer_type(), LayerType::Text);
        match &layer.kind {
            LayerKind::Text { style, width, .. } => {
                assert_eq!(*width, 800.0);
                assert_eq!(style.padding, 32.0);
                assert_eq!(style.css_background(), "rgba(239, 68, 68, 0.8)");
            }
            other => panic!("unexpected kind {:?}", other),
        }
    }

    #[test]
    fn test_apply_ignores_fields_of_other_kinds() {
        let mut product = Layer::product("p");
        product.apply(&LayerUpdate::size(10.0, 20.0));
        assert_eq!(product.width(), None);

        let mut text = Layer::text_placeholder();
        text.apply(&LayerUpdate::size(500.0, 20.0));
        assert_eq!(text.width(), Some(500.0));
        assert_eq!(text.height(), None);

        text.apply(&LayerUpdate::style(LayerStyle::Blur(BlurStyle { strength: 5.0 })));
        assert!(matches!(&text.kind, LayerKind::Text { style, .. } if *style == TextStyle::default()));
    }

    #[test]
    fn test_apply_merges_content_and_style() {
        let mut text = Layer::text_placeholder();
        let style = TextStyle {
            font_size: 120.0,
            ..TextStyle::default()
        };
        text.apply(&LayerUpdate {
            content: Some("Sale".to_string()),
            style: Some(LayerStyle::Text(style.clone())),
            ..LayerUpdate::default()
        });
        assert_eq!(text.content(), "Sale");
        assert!(matches!(&text.kind, LayerKind::Text { style: s, .. } if *s == style));

        let mut blur = Layer::blur();
        blur.apply(&LayerUpdate::content("ignored"));
        assert_eq!(blur.content(), "");
    }

    #[test]
    fn test_position_only_detection() {
        assert!(LayerUpdate::position(Vec2::new(1.0, 2.0)).is_position_only());
        assert!(!LayerUpdate::width(200.0).is_position_only());
        assert!(!LayerUpdate::default().is_position_only());

        let mixed = LayerUpdate {
            position: Some(Vec2::ZERO),
            scale: Some(2.0),
            ..LayerUpdate::default()
        };
        assert!(!mixed.is_position_only());
    }
}
