//! Data-source capabilities.
//!
//! Views never own their data. A host implements [`ScatterDataSource`] on
//! whatever storage it already has and hands the view an `Rc<RefCell<_>>`;
//! the view keeps only a weak handle and pulls points when it needs them.

pub mod ring;
pub mod vec;

pub use ring::RingDataSource;
pub use vec::VecDataSource;

use crate::PlotRange;
use crate::error::Result;
use crate::point::ScatterPoint;

/// Bounds of the data a source currently holds, in data space
#[derive(Clone, Debug, PartialEq)]
pub struct DataRange {
    pub x: PlotRange,
    pub y: PlotRange,
}

impl DataRange {
    /// Compute bounds over the finite points of an iterator
    ///
    /// Returns `None` when there are no finite points.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a ScatterPoint>) -> Option<Self> {
        let mut bounds: Option<(f64, f64, f64, f64)> = None;
        for point in points.into_iter().filter(|p| p.is_finite()) {
            bounds = Some(match bounds {
                None => (point.x, point.x, point.y, point.y),
                Some((min_x, max_x, min_y, max_y)) => (
                    min_x.min(point.x),
                    max_x.max(point.x),
                    min_y.min(point.y),
                    max_y.max(point.y),
                ),
            });
        }

        bounds.map(|(min_x, max_x, min_y, max_y)| Self {
            x: min_x..=max_x,
            y: min_y..=max_y,
        })
    }
}

/// Base capability every plot data source provides
pub trait PlotDataSource {
    /// Number of points currently available
    fn point_count(&self) -> usize;

    /// Bounds of the data, if the source already tracks them
    ///
    /// Views fall back to the extent of the points they have cached when this
    /// returns `None`.
    fn data_range(&self) -> Option<DataRange> {
        None
    }
}

/// Scatter-specific extension: per-index point access
pub trait ScatterDataSource: PlotDataSource {
    /// Point at `index`, for `index < point_count()`
    ///
    /// Implementations must return [`PlotError::IndexOutOfRange`](crate::PlotError::IndexOutOfRange)
    /// for indices past the end rather than a sentinel value.
    fn point_at(&self, index: usize) -> Result<ScatterPoint>;
}
