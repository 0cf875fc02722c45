pub mod base;
pub mod color;
pub mod scatter;

pub use base::{BasePlotOptions, BasePlotOptionsBuilder, BasePlotOptionsBuilderError};
pub use color::Color;
pub use scatter::{ScatterPlotOptions, ScatterPlotOptionsBuilder, ScatterPlotOptionsBuilderError};

/// Trait for plot options types
///
/// All plot-specific options structs should implement this trait to provide
/// access to the base options.
pub trait PlotOptions {
    /// Get a reference to the base plot options
    fn base(&self) -> &BasePlotOptions;
}
