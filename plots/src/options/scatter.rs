use crate::error::{PlotError, Result};
use crate::geometry::{HeightMapping, Interpolation};
use crate::options::{BasePlotOptions, Color, PlotOptions};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Options for scatter plot views
///
/// Styling for the stroke, the two-tone fill, and the mapping from data
/// values to plot heights.
///
/// # Example
///
/// ```rust
/// use trace_plots::options::{Color, ScatterPlotOptions};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let options = ScatterPlotOptions::new()
///     .line_width(2.0)
///     .fill_color1(Color::rgba(30, 144, 255, 0.4))
///     .minimum_value_for_plot_height(50.0)
///     .stepped(true)
///     .build()?;
/// assert_eq!(options.plot_height_multiplier, 1.0);
/// # Ok(())
/// # }
/// ```
#[derive(Builder, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[builder(setter(into, strip_option), default)]
#[builder(build_fn(validate = "Self::validate"))]
#[serde(default)]
pub struct ScatterPlotOptions {
    /// Base plot options (layout, dimensions, etc.)
    #[builder(default)]
    pub base: BasePlotOptions,

    /// Stroke width in pixels; zero disables the stroke
    #[builder(default = "1.0")]
    pub line_width: f64,

    /// Stroke color
    #[builder(default = "Color::BLACK")]
    pub line_color: Color,

    /// Fill for the parts of the curve at or above the baseline
    #[builder(default = "default_upper_fill()")]
    pub fill_color1: Color,

    /// Fill for the parts of the curve below the baseline
    #[builder(default = "default_lower_fill()")]
    pub fill_color2: Color,

    /// Baseline in data space separating the two fill tones
    #[builder(default = "0.0")]
    pub minimum_value_for_plot_height: f64,

    /// Scale from data height to plot height
    #[builder(default = "1.0")]
    pub plot_height_multiplier: f64,

    /// Staircase interpolation between consecutive points
    #[builder(default = "false")]
    pub stepped: bool,
}

fn default_upper_fill() -> Color {
    Color::rgba(52, 120, 246, 0.35)
}

fn default_lower_fill() -> Color {
    Color::rgba(235, 77, 61, 0.35)
}

impl Default for ScatterPlotOptions {
    fn default() -> Self {
        Self {
            base: BasePlotOptions::default(),
            line_width: 1.0,
            line_color: Color::BLACK,
            fill_color1: default_upper_fill(),
            fill_color2: default_lower_fill(),
            minimum_value_for_plot_height: 0.0,
            plot_height_multiplier: 1.0,
            stepped: false,
        }
    }
}

impl PlotOptions for ScatterPlotOptions {
    fn base(&self) -> &BasePlotOptions {
        &self.base
    }
}

impl ScatterPlotOptions {
    /// Create a new builder for ScatterPlotOptions
    pub fn new() -> ScatterPlotOptionsBuilder {
        ScatterPlotOptionsBuilder::default()
    }

    /// Load options from a JSON document; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Check every numeric field
    pub fn validate(&self) -> Result<()> {
        check_line_width(self.line_width)?;
        check_baseline(self.minimum_value_for_plot_height)?;
        check_multiplier(self.plot_height_multiplier)?;
        if self.base.width == 0 || self.base.height == 0 {
            return Err(PlotError::InvalidOptions(
                "width and height must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn height_mapping(&self) -> HeightMapping {
        HeightMapping::new(self.minimum_value_for_plot_height, self.plot_height_multiplier)
    }

    pub fn interpolation(&self) -> Interpolation {
        if self.stepped {
            Interpolation::Stepped
        } else {
            Interpolation::Straight
        }
    }
}

impl ScatterPlotOptionsBuilder {
    fn validate(&self) -> std::result::Result<(), String> {
        if let Some(width) = self.line_width {
            check_line_width(width).map_err(|e| e.to_string())?;
        }
        if let Some(baseline) = self.minimum_value_for_plot_height {
            check_baseline(baseline).map_err(|e| e.to_string())?;
        }
        if let Some(multiplier) = self.plot_height_multiplier {
            check_multiplier(multiplier).map_err(|e| e.to_string())?;
        }
        Ok(())
    }
}

pub(crate) fn check_line_width(value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(PlotError::invalid_argument(
            "line_width",
            format!("expected a finite, non-negative width, got {value}"),
        ));
    }
    Ok(())
}

pub(crate) fn check_baseline(value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(PlotError::invalid_argument(
            "minimum_value_for_plot_height",
            format!("expected a finite baseline, got {value}"),
        ));
    }
    Ok(())
}

pub(crate) fn check_multiplier(value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(PlotError::invalid_argument(
            "plot_height_multiplier",
            format!("expected a finite, positive multiplier, got {value}"),
        ));
    }
    Ok(())
}
