use plotters::style::RGBAColor;
use serde::{Deserialize, Serialize};

/// RGBA color used for strokes, fills and backgrounds
///
/// `alpha` is clamped to `0.0..=1.0` by the constructors.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub alpha: f64,
}

fn opaque() -> f64 {
    1.0
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, alpha: 1.0 }
    }

    pub fn rgba(r: u8, g: u8, b: u8, alpha: f64) -> Self {
        let alpha = if alpha.is_nan() { 1.0 } else { alpha.clamp(0.0, 1.0) };
        Self { r, g, b, alpha }
    }

    pub fn is_transparent(&self) -> bool {
        self.alpha <= 0.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<Color> for RGBAColor {
    fn from(color: Color) -> Self {
        RGBAColor(color.r, color.g, color.b, color.alpha)
    }
}

impl From<&Color> for RGBAColor {
    fn from(color: &Color) -> Self {
        RGBAColor(color.r, color.g, color.b, color.alpha)
    }
}
