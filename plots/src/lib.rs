//! # trace-plots
//!
//! Scatter/line plot views for profiler telemetry that stay cheap to update
//! while a recording is running.
//!
//! ## Overview
//!
//! A host application owns its samples and exposes them through the
//! [`ScatterDataSource`] capability. A [`ScatterPlotView`] holds a weak handle
//! to that source, pulls points on demand, and keeps per-segment stroke and
//! fill geometry cached. When the host changes data it tells the view what
//! changed, and the view recomputes only that part:
//!
//! - [`ScatterPlotView::reload_point_at_index`] rebuilds the two segments that
//!   touch one point
//! - [`ScatterPlotView::add_number_of_points`] appends geometry for new points
//! - [`ScatterPlotView::reload_data`] throws everything away and starts over
//!
//! ## Basic Usage
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use trace_plots::{ScatterPlotView, ScatterPoint, VecDataSource};
//!
//! let samples = Rc::new(RefCell::new(VecDataSource::from(vec![
//!     ScatterPoint::new(0.0, 0.0),
//!     ScatterPoint::new(1.0, 5.0),
//! ])));
//!
//! let mut view = ScatterPlotView::default();
//! view.set_data_source(&samples);
//! view.update();
//!
//! samples.borrow_mut().push(ScatterPoint::new(2.0, -3.0));
//! view.add_number_of_points(1);
//! let summary = view.update();
//! assert_eq!(summary.appended_points, 1);
//! assert_eq!(view.point_count(), 3);
//! ```
//!
//! ## Architecture
//!
//! - `point`: the plot point value type
//! - `source`: data-source capabilities and the bundled backing stores
//! - `options`: view configuration using the builder pattern
//! - `geometry`: per-segment stroke and two-tone fill computation
//! - `cache`: incremental invalidation of cached geometry
//! - `plots`: the view types and the `PlotView` trait
//! - `render`: display lists and the raster backend

pub mod cache;
pub mod error;
pub mod geometry;
pub mod options;
pub mod plots;
pub mod point;
pub mod render;
pub mod source;


pub use cache::{PlotCache, UpdateSummary};
pub use error::{PlotError, Result};
pub use geometry::{FillRegion, FillTone, HeightMapping, Interpolation, SegmentGeometry};
pub use options::{BasePlotOptions, Color, PlotOptions, ScatterPlotOptions};
pub use plots::{PlotView, ScatterPlotView};
pub use point::ScatterPoint;
pub use render::{DisplayList, ProgressCallback, ProgressInfo, RenderConfig};
pub use source::{DataRange, PlotDataSource, RingDataSource, ScatterDataSource, VecDataSource};

// Type aliases
pub type PlotBytes = Vec<u8>;
pub type PlotRange = std::ops::RangeInclusive<f64>;

use std::ops::Range;

/// Visible extent of a plot in plot space
///
/// `x` is in data units, `y` is in plot height units (baseline at 0).
#[derive(Clone, Debug, PartialEq)]
pub struct PlotBounds {
    pub x: PlotRange,
    pub y: PlotRange,
}

/// Create axis ranges with nice bounds for drawing
///
/// A fixed x range from the options wins over the data extent. The y range is
/// always widened to nice numbers so the baseline sits on a round value.
pub fn create_axis_specs(bounds: &PlotBounds, fixed_x: Option<&PlotRange>) -> (Range<f64>, Range<f64>) {
    let x_spec = match fixed_x {
        Some(range) if range.start() < range.end() => *range.start()..*range.end(),
        _ => {
            let (min, max) = nice_bounds(*bounds.x.start(), *bounds.x.end());
            min..max
        }
    };

    let (nice_min, nice_max) = nice_bounds(*bounds.y.start(), *bounds.y.end());

    (x_spec, nice_min..nice_max)
}

fn nice_bounds(min: f64, max: f64) -> (f64, f64) {
    if min.is_infinite() || max.is_infinite() || min.is_nan() || max.is_nan() {
        return (0.0, 1.0); // Fallback for invalid ranges
    }

    let range = max - min;
    if range <= 0.0 {
        return (min - 0.5, min + 0.5); // Handle single-point case
    }

    // Find nice step size
    let step_size = 10_f64.powi(range.log10().floor() as i32);
    let nice_min = (min / step_size).floor() * step_size;
    let nice_max = (max / step_size).ceil() * step_size;

    (nice_min, nice_max)
}
