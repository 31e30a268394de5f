//! Geometry of the exported image, independent of any drawing backend.

use crate::scene::{Layer, LayerKind, TextStyle, Vec2, CANVAS_SIZE};

/// Widest a product cutout is drawn before scaling
pub const PRODUCT_MAX_WIDTH: f32 = 400.0;

/// Layers in the order they are painted into the exported image.
///
/// Backgrounds go first, the rest keep list order. Selection does not
/// affect the output, so the selected layer is not promoted.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportPlan {
    items: Vec<Layer>,
}

impl ExportPlan {
    pub fn from_layers(layers: &[Layer]) -> Self {
        let (mut items, rest): (Vec<Layer>, Vec<Layer>) = layers.iter().cloned().partition(Layer::is_background);
        items.extend(rest);
        Self { items }
    }

    pub fn items(&self) -> &[Layer] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Distinct image sources that must be decoded before painting
    pub fn image_sources(&self) -> Vec<&str> {
        let mut sources: Vec<&str> = Vec::new();
        for layer in &self.items {
            if let LayerKind::Image { src, .. } | LayerKind::Product { src, .. } = &layer.kind {
                if !sources.contains(&src.as_str()) {
                    sources.push(src);
                }
            }
        }
        sources
    }
}

/// Unscaled size an image layer occupies on the canvas.
///
/// The background always spans the full canvas width. Other images keep
/// their natural size, shrunk to fit their maximum width.
pub fn fit_image(layer: &Layer, natural: Vec2) -> Vec2 {
    if natural.x <= 0.0 || natural.y <= 0.0 {
        return Vec2::ZERO;
    }
    let max_width = match layer.kind {
        LayerKind::Product { .. } => PRODUCT_MAX_WIDTH,
        _ => CANVAS_SIZE,
    };
    let width = if layer.is_background() {
        CANVAS_SIZE
    } else {
        natural.x.min(max_width)
    };
    Vec2::new(width, natural.y * width / natural.x)
}

/// A text layer broken into lines, with the size of its backing box
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub lines: Vec<String>,
    /// Box size including padding
    pub size: Vec2,
    /// Distance between baselines in pixels
    pub line_advance: f32,
}

/// Lay out `text` in a box `width` wide. `measure` returns the rendered
/// width of a string in the style's font.
pub fn layout_text(text: &str, width: f32, style: &TextStyle, measure: impl Fn(&str) -> f32) -> TextBlock {
    let content_width = (width - 2.0 * style.padding).max(1.0);
    let lines: Vec<String> = text
        .split('\n')
        .flat_map(|paragraph| wrap_paragraph(paragraph, content_width, &measure))
        .collect();

    let line_advance = style.font_size * style.line_height;
    let height = lines.len() as f32 * line_advance + 2.0 * style.padding;
    TextBlock {
        lines,
        size: Vec2::new(width, height),
        line_advance,
    }
}

/// Greedy word wrap that keeps runs of spaces, matching `white-space: pre-wrap`.
/// The space a line breaks on is dropped.
fn wrap_paragraph(paragraph: &str, max_width: f32, measure: &impl Fn(&str) -> f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut line_open = false;

    for word in paragraph.split(' ') {
        let candidate = if line_open {
            format!("{} {}", current, word)
        } else {
            word.to_string()
        };
        if measure(&candidate) <= max_width {
            current = candidate;
            line_open = true;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        line_open = !word.is_empty();
        if measure(word) <= max_width {
            current = word.to_string();
            continue;
        }

        // A single word wider than the box breaks between characters
        for ch in word.chars() {
            current.push(ch);
            if measure(&current) > max_width && current.chars().count() > 1 {
                current.pop();
                lines.push(std::mem::take(&mut current));
                current.push(ch);
            }
        }
    }

    lines.push(current);
    lines
}

/// Download name of an exported creative
pub fn export_filename(timestamp_ms: u64) -> String {
    format!("creative-{}.png", timestamp_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Monospace stand-in: every character is 10px wide
    fn mono(s: &str) -> f32 {
        s.chars().count() as f32 * 10.0
    }

    fn style(padding: f32) -> TextStyle {
        TextStyle {
            font_size: 20.0,
            line_height: 1.5,
            padding,
            ..TextStyle::default()
        }
    }

    #[test]
    fn test_plan_paints_background_first_ignoring_selection() {
        let text = Layer::text_placeholder();
        let blur = Layer::blur();
        let bg = Layer::background("bg.png");
        let plan = ExportPlan::from_layers(&[text.clone(), bg.clone(), blur.clone()]);

        let ids: Vec<_> = plan.items().iter().map(|l| l.id.clone()).collect();
        assert_eq!(ids, vec![bg.id, text.id, blur.id]);
        assert_eq!(plan.len(), 3);
    }

    #[test]
    fn test_image_sources_are_distinct() {
        let plan = ExportPlan::from_layers(&[
            Layer::background("a.png"),
            Layer::product("b.png"),
            Layer::product("a.png"),
            Layer::text_placeholder(),
        ]);
        assert_eq!(plan.image_sources(), vec!["a.png", "b.png"]);
        assert!(ExportPlan::from_layers(&[]).is_empty());
    }

    #[test]
    fn test_fit_image() {
        let bg = Layer::background("bg");
        assert_eq!(fit_image(&bg, Vec2::new(512.0, 512.0)), Vec2::new(1080.0, 1080.0));

        let product = Layer::product("p");
        assert_eq!(fit_image(&product, Vec2::new(800.0, 1200.0)), Vec2::new(400.0, 600.0));
        assert_eq!(fit_image(&product, Vec2::new(200.0, 100.0)), Vec2::new(200.0, 100.0));

        let image = Layer::image("i");
        assert_eq!(fit_image(&image, Vec2::new(2160.0, 1080.0)), Vec2::new(1080.0, 540.0));
        assert_eq!(fit_image(&image, Vec2::ZERO), Vec2::ZERO);
    }

    #[test]
    fn test_layout_wraps_words() {
        // 120px box minus 2 * 10px padding leaves room for 10 characters
        let block = layout_text("Stop joint pain today", 120.0, &style(10.0), mono);
        assert_eq!(block.lines, vec!["Stop joint", "pain today"]);
        assert_eq!(block.line_advance, 30.0);
        assert_eq!(block.size, Vec2::new(120.0, 2.0 * 30.0 + 20.0));
    }

    #[test]
    fn test_layout_keeps_explicit_breaks() {
        let block = layout_text("Sale\n\n-50%", 400.0, &style(0.0), mono);
        assert_eq!(block.lines, vec!["Sale", "", "-50%"]);
    }

    #[test]
    fn test_layout_breaks_long_words() {
        let block = layout_text("abcdefghijkl", 50.0, &style(0.0), mono);
        assert_eq!(block.lines, vec!["abcde", "fghij", "kl"]);
    }

    #[test]
    fn test_layout_preserves_repeated_spaces() {
        let block = layout_text("-50%  NOW", 400.0, &style(0.0), mono);
        assert_eq!(block.lines, vec!["-50%  NOW"]);

        let block = layout_text("  Sale", 400.0, &style(0.0), mono);
        assert_eq!(block.lines, vec!["  Sale"]);
    }

    #[test]
    fn test_layout_drops_space_at_break() {
        let block = layout_text("abcd efgh", 50.0, &style(0.0), mono);
        assert_eq!(block.lines, vec!["abcd", "efgh"]);
    }

    #[test]
    fn test_empty_text_keeps_one_line() {
        let block = layout_text("", 200.0, &style(16.0), mono);
        assert_eq!(block.lines, vec![""]);
        assert_eq!(block.size.y, 30.0 + 32.0);
    }

    #[test]
    fn test_export_filename() {
        assert_eq!(export_filename(1_700_000_000_123), "creative-1700000000123.png");
    }
}
