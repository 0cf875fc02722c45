use crate::cache::{PlotCache, UpdateSummary};
use crate::error::{PlotError, Result};
use crate::geometry::SegmentGeometry;
use crate::options::scatter::{check_baseline, check_line_width, check_multiplier};
use crate::options::{BasePlotOptions, Color, ScatterPlotOptions};
use crate::plots::traits::PlotView;
use crate::point::ScatterPoint;
use crate::render::plotters_backend::render_display_list;
use crate::render::{DisplayList, RenderConfig};
use crate::source::ScatterDataSource;
use crate::{PlotBounds, PlotBytes};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::{debug, warn};

type SharedSource = Rc<RefCell<dyn ScatterDataSource>>;

/// Line/area plot view driven by a [`ScatterDataSource`]
///
/// The view holds only a weak handle to its source. A source that has been
/// dropped reads as no data, and every mutation hook is a no-op until a
/// source is attached.
///
/// Changes are applied lazily: the mutation hooks record what changed and
/// [`update`](Self::update) (called implicitly by
/// [`display_list`](Self::display_list) and [`render`](PlotView::render))
/// recomputes only the affected segments.
///
/// # Example
///
/// ```rust
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use trace_plots::{ScatterPlotView, ScatterPoint, VecDataSource};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let cpu = Rc::new(RefCell::new(VecDataSource::from(vec![
///     ScatterPoint::new(0.0, 12.0),
///     ScatterPoint::new(1.0, 48.0),
///     ScatterPoint::new(2.0, 31.0),
/// ])));
///
/// let mut view = ScatterPlotView::default();
/// view.set_data_source(&cpu);
/// view.update();
///
/// cpu.borrow_mut().set(1, ScatterPoint::new(1.0, 52.0))?;
/// view.reload_point_at_index(1)?;
/// assert_eq!(view.update().rebuilt_segments, 2);
/// # Ok(())
/// # }
/// ```
pub struct ScatterPlotView {
    data_source: Option<Weak<RefCell<dyn ScatterDataSource>>>,
    options: ScatterPlotOptions,
    cache: PlotCache,
}

impl fmt::Debug for ScatterPlotView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScatterPlotView")
            .field("has_data_source", &self.has_data_source())
            .field("options", &self.options)
            .field("points", &self.cache.point_count())
            .finish()
    }
}

impl Default for ScatterPlotView {
    fn default() -> Self {
        Self::new(ScatterPlotOptions::default())
    }
}

impl ScatterPlotView {
    pub fn new(options: ScatterPlotOptions) -> Self {
        Self {
            data_source: None,
            options,
            cache: PlotCache::new(),
        }
    }

    /// Attach a data source without taking ownership of it
    pub fn set_data_source<S: ScatterDataSource + 'static>(&mut self, source: &Rc<RefCell<S>>) {
        let shared: SharedSource = source.clone();
        self.data_source = Some(Rc::downgrade(&shared));
        self.cache.invalidate_all();
        debug!("attached data source to scatter plot view");
    }

    /// Detach the data source; the view renders empty afterwards
    pub fn clear_data_source(&mut self) {
        self.data_source = None;
        self.cache.clear();
    }

    fn source(&self) -> Option<SharedSource> {
        self.data_source.as_ref().and_then(Weak::upgrade)
    }

    /// Inform the view that the point at `index` changed value
    ///
    /// Only the segments to the neighbouring points are rebuilt on the next
    /// update. Without a data source this is a no-op.
    ///
    /// # Errors
    ///
    /// [`PlotError::IndexOutOfRange`] if `index` is past the source's current
    /// count or was never rendered or announced to the view.
    pub fn reload_point_at_index(&mut self, index: usize) -> Result<()> {
        let Some(source) = self.source() else {
            debug!(index, "reload without a data source ignored");
            return Ok(());
        };

        // A busy source can't be asked; the cached count still guards the index
        if let Ok(source) = source.try_borrow() {
            let count = source.point_count();
            if index >= count {
                return Err(PlotError::index_out_of_range(index, count));
            }
        }

        if self.cache.needs_full_rebuild() {
            return Ok(());
        }

        let known = self.cache.known_count();
        if index >= known {
            return Err(PlotError::index_out_of_range(index, known));
        }

        self.cache.mark_point_dirty(index);
        Ok(())
    }

    /// Inform the view that `count` points were appended to the source
    ///
    /// Zero, or a call without a data source, is a no-op.
    pub fn add_number_of_points(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        if self.source().is_none() {
            debug!(count, "append without a data source ignored");
            return;
        }
        self.cache.mark_appended(count);
    }

    /// Bring the cached geometry in line with the data source
    pub fn update(&mut self) -> UpdateSummary {
        let Some(source) = self.source() else {
            if self.data_source.take().is_some() {
                debug!("data source was dropped, clearing scatter plot view");
            }
            self.cache.clear();
            return UpdateSummary::default();
        };

        let Ok(source) = source.try_borrow() else {
            warn!("data source is mutably borrowed, keeping cached geometry");
            return UpdateSummary::default();
        };

        self.cache.sync(
            &*source,
            self.options.height_mapping(),
            self.options.interpolation(),
        )
    }

    /// Number of points the cached geometry covers
    pub fn point_count(&self) -> usize {
        self.cache.point_count()
    }

    /// Points as of the last update
    pub fn points(&self) -> &[ScatterPoint] {
        self.cache.points()
    }

    /// Segment geometry as of the last update; segment `i` joins points `i` and `i + 1`
    pub fn segments(&self) -> &[SegmentGeometry] {
        self.cache.segments()
    }

    /// Whether changes are waiting for the next update
    pub fn needs_update(&self) -> bool {
        self.cache.is_dirty()
    }

    /// Update, then resolve geometry into colored drawing commands
    pub fn display_list(&mut self) -> DisplayList {
        self.update();
        DisplayList::from_segments(self.cache.segments(), &self.options)
    }

    /// Visible extent in plot space
    ///
    /// Covers the drawn points only; points the view has not synced yet do not
    /// widen the axes. `None` when there is nothing to show.
    pub fn data_bounds(&self) -> Option<PlotBounds> {
        self.cache.bounds(self.options.height_mapping())
    }

    pub fn options(&self) -> &ScatterPlotOptions {
        &self.options
    }

    pub fn line_width(&self) -> f64 {
        self.options.line_width
    }

    pub fn set_line_width(&mut self, width: f64) -> Result<()> {
        check_line_width(width)?;
        self.options.line_width = width;
        Ok(())
    }

    pub fn line_color(&self) -> Color {
        self.options.line_color
    }

    pub fn set_line_color(&mut self, color: Color) {
        self.options.line_color = color;
    }

    pub fn fill_color1(&self) -> Color {
        self.options.fill_color1
    }

    pub fn set_fill_color1(&mut self, color: Color) {
        self.options.fill_color1 = color;
    }

    pub fn fill_color2(&self) -> Color {
        self.options.fill_color2
    }

    pub fn set_fill_color2(&mut self, color: Color) {
        self.options.fill_color2 = color;
    }

    pub fn minimum_value_for_plot_height(&self) -> f64 {
        self.options.minimum_value_for_plot_height
    }

    /// Move the baseline; all geometry is rebuilt on the next update
    pub fn set_minimum_value_for_plot_height(&mut self, value: f64) -> Result<()> {
        check_baseline(value)?;
        if value != self.options.minimum_value_for_plot_height {
            self.options.minimum_value_for_plot_height = value;
            self.invalidate_geometry();
        }
        Ok(())
    }

    pub fn plot_height_multiplier(&self) -> f64 {
        self.options.plot_height_multiplier
    }

    pub fn set_plot_height_multiplier(&mut self, value: f64) -> Result<()> {
        check_multiplier(value)?;
        if value != self.options.plot_height_multiplier {
            self.options.plot_height_multiplier = value;
            self.invalidate_geometry();
        }
        Ok(())
    }

    pub fn is_stepped(&self) -> bool {
        self.options.stepped
    }

    pub fn set_stepped(&mut self, stepped: bool) {
        if stepped != self.options.stepped {
            self.options.stepped = stepped;
            self.invalidate_geometry();
        }
    }

    /// Layout changes never touch geometry
    pub fn set_base_options(&mut self, base: BasePlotOptions) {
        self.options.base = base;
    }

    fn invalidate_geometry(&mut self) {
        if self.data_source.is_some() {
            self.cache.invalidate_all();
        }
    }
}

impl PlotView for ScatterPlotView {
    fn base_options(&self) -> &BasePlotOptions {
        &self.options.base
    }

    fn has_data_source(&self) -> bool {
        self.source().is_some()
    }

    fn reload_data(&mut self) {
        if self.data_source.is_some() {
            self.cache.invalidate_all();
        }
    }

    fn render(&mut self, render_config: &mut RenderConfig) -> Result<PlotBytes> {
        let list = self.display_list();
        let bounds = self.data_bounds();
        render_display_list(&list, bounds.as_ref(), &self.options.base, render_config)
    }
}
