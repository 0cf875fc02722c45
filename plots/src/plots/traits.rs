use crate::PlotBytes;
use crate::error::Result;
use crate::options::BasePlotOptions;
use crate::render::RenderConfig;

/// Trait for plot views
///
/// This is the surface every plot view shares regardless of the kind of
/// data source it pulls from.
///
/// # Example
///
/// ```rust
/// use trace_plots::plots::PlotView;
/// use trace_plots::render::RenderConfig;
/// use trace_plots::ScatterPlotView;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut view = ScatterPlotView::default();
/// assert!(!view.has_data_source());
///
/// // No data source renders an empty (background only) image
/// let bytes = view.render(&mut RenderConfig::default())?;
/// assert!(!bytes.is_empty());
/// # Ok(())
/// # }
/// ```
pub trait PlotView {
    /// Layout and display settings shared by every plot view
    fn base_options(&self) -> &BasePlotOptions;

    /// Whether a live data source is attached
    fn has_data_source(&self) -> bool;

    /// Discard cached geometry and re-read everything on the next update
    fn reload_data(&mut self);

    /// Bring the view up to date and render it
    ///
    /// # Returns
    ///
    /// PNG-encoded plot image bytes
    fn render(&mut self, render_config: &mut RenderConfig) -> Result<PlotBytes>;
}
