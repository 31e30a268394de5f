use serde::{Deserialize, Serialize};
pub use glam::Vec2;

/// Side length of the logical canvas. Every layer coordinate is expressed
/// in this space regardless of how large the canvas is rendered on screen.
pub const CANVAS_SIZE: f32 = 1080.0;

/// Center of the logical canvas; layer positions are offsets from here.
pub const CANVAS_CENTER: Vec2 = Vec2::new(CANVAS_SIZE / 2.0, CANVAS_SIZE / 2.0);

/// RGB color with an opacity applied at render time
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    /// Parse a hex color string ("#ef4444", "ef4444" or the "#fff" shorthand)
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let expanded: String = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 => hex.to_string(),
            _ => return None,
        };

        let r = u8::from_str_radix(&expanded[0..2], 16).ok()?;
        let g = u8::from_str_radix(&expanded[2..4], 16).ok()?;
        let b = u8::from_str_radix(&expanded[4..6], 16).ok()?;

        Some(Self::rgb(r, g, b))
    }

    /// Convert to hex string (e.g., "#ef4444")
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// CSS `rgba()` with the given opacity clamped to 0..=1
    pub fn to_css_rgba(&self, opacity: f32) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.r,
            self.g,
            self.b,
            opacity.clamp(0.0, 1.0)
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::white()
    }
}

/// Placement of a layer on the logical canvas.
///
/// `position` is relative to the canvas center, `rotation` is in degrees and
/// `scale` is uniform.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub position: Vec2,
    pub scale: f32,
    pub rotation: f32,
}

impl Placement {
    pub fn identity() -> Self {
        Self {
            position: Vec2::ZERO,
            scale: 1.0,
            rotation: 0.0,
        }
    }

    pub fn at(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            ..Self::identity()
        }
    }

    /// Absolute point on the logical canvas the layer is centered on
    pub fn anchor(&self) -> Vec2 {
        CANVAS_CENTER + self.position
    }

    /// Rotation in radians, for canvas 2D drawing
    pub fn rotation_radians(&self) -> f64 {
        (self.rotation as f64).to_radians()
    }

    /// CSS transform for a box centered at 50%/50% of the canvas
    pub fn css_transform(&self) -> String {
        format!(
            "translate(-50%, -50%) translate({}px, {}px) rotate({}deg)",
            self.position.x, self.position.y, self.rotation
        )
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_hex_parsing() {
        let color = Color::from_hex("#ef4444").unwrap();
        assert_eq!(color, Color::rgb(0xef, 0x44, 0x44));
    }

    #[test]
    fn test_color_shorthand_hex() {
        assert_eq!(Color::from_hex("#fff"), Some(Color::white()));
        assert_eq!(Color::from_hex("000"), Some(Color::black()));
        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("#gggggg"), None);
    }

    #[test]
    fn test_color_non_ascii_hex() {
        assert_eq!(Color::from_hex("#aé123"), None);
        assert_eq!(Color::from_hex("éé"), None);
        assert_eq!(Color::from_hex("#ffé"), None);
    }

    #[test]
    fn test_color_hex_roundtrip() {
        let original = "#3b82f6";
        let color = Color::from_hex(original).unwrap();
        assert_eq!(color.to_hex(), original);
    }

    #[test]
    fn test_css_rgba_clamps_opacity() {
        let red = Color::rgb(239, 68, 68);
        assert_eq!(red.to_css_rgba(0.8), "rgba(239, 68, 68, 0.8)");
        assert_eq!(red.to_css_rgba(3.0), "rgba(239, 68, 68, 1)");
    }

    #[test]
    fn test_placement_anchor_is_center_relative() {
        let placement = Placement::at(0.0, 350.0);
        assert_eq!(placement.anchor(), Vec2::new(540.0, 890.0));
        assert_eq!(Placement::identity().anchor(), CANVAS_CENTER);
    }

    #[test]
    fn test_css_transform() {
        let mut placement = Placement::at(10.0, -20.0);
        placement.rotation = 15.0;
        assert_eq!(
            placement.css_transform(),
            "translate(-50%, -50%) translate(10px, -20px) rotate(15deg)"
        );
    }
}
