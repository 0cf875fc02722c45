use crate::PlotRange;
use crate::options::Color;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Base plot options containing layout and display settings
///
/// These options are common to all plot views and control the size of the
/// rendered image and the visible x range.
///
/// # Example
///
/// ```rust
/// use trace_plots::options::BasePlotOptions;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let base = BasePlotOptions::new()
///     .width(1200u32)
///     .height(160u32)
///     .x_range(0.0..=30.0)
///     .title("CPU usage")
///     .build()?;
/// assert_eq!(base.margin, 10);
/// assert_eq!(base.title, "CPU usage");
/// # Ok(())
/// # }
/// ```
#[derive(Builder, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[builder(setter(into, strip_option), default)]
#[builder(build_fn(validate = "Self::validate"))]
#[serde(default)]
pub struct BasePlotOptions {
    /// Plot width in pixels
    #[builder(default = "800")]
    pub width: u32,

    /// Plot height in pixels
    #[builder(default = "200")]
    pub height: u32,

    /// Margin around the plot area in pixels
    #[builder(default = "10")]
    pub margin: u32,

    /// Background color of the rendered image
    #[builder(default = "Color::WHITE")]
    pub background: Color,

    /// Fixed visible x range; the data extent is used when unset
    pub x_range: Option<PlotRange>,

    /// Plot title; nothing is drawn when empty
    #[builder(default = "String::new()")]
    pub title: String,
}

impl Default for BasePlotOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 200,
            margin: 10,
            background: Color::WHITE,
            x_range: None,
            title: String::new(),
        }
    }
}

impl BasePlotOptions {
    /// Create a new builder for BasePlotOptions
    pub fn new() -> BasePlotOptionsBuilder {
        BasePlotOptionsBuilder::default()
    }
}

impl BasePlotOptionsBuilder {
    fn validate(&self) -> Result<(), String> {
        if self.width == Some(0) || self.height == Some(0) {
            return Err("width and height must be greater than zero".to_string());
        }
        if let Some(Some(range)) = &self.x_range {
            if !(range.start().is_finite() && range.end().is_finite()) {
                return Err("x_range bounds must be finite".to_string());
            }
        }
        Ok(())
    }
}
