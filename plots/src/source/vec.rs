use crate::error::{PlotError, Result};
use crate::point::ScatterPoint;
use crate::source::{DataRange, PlotDataSource, ScatterDataSource};

/// Array-backed data source
///
/// Mutating methods only change the stored points; the host is still
/// responsible for telling attached views what changed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VecDataSource {
    points: Vec<ScatterPoint>,
}

impl VecDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    /// Append a point, returning its index
    pub fn push(&mut self, point: impl Into<ScatterPoint>) -> usize {
        self.points.push(point.into());
        self.points.len() - 1
    }

    /// Append a batch of points, returning how many were added
    pub fn extend<I, P>(&mut self, points: I) -> usize
    where
        I: IntoIterator<Item = P>,
        P: Into<ScatterPoint>,
    {
        let before = self.points.len();
        self.points.extend(points.into_iter().map(Into::into));
        self.points.len() - before
    }

    /// Replace the point at `index`, returning the previous value
    pub fn set(&mut self, index: usize, point: impl Into<ScatterPoint>) -> Result<ScatterPoint> {
        let count = self.points.len();
        let slot = self
            .points
            .get_mut(index)
            .ok_or_else(|| PlotError::index_out_of_range(index, count))?;
        Ok(std::mem::replace(slot, point.into()))
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[ScatterPoint] {
        &self.points
    }
}

impl From<Vec<ScatterPoint>> for VecDataSource {
    fn from(points: Vec<ScatterPoint>) -> Self {
        Self { points }
    }
}

impl FromIterator<ScatterPoint> for VecDataSource {
    fn from_iter<T: IntoIterator<Item = ScatterPoint>>(iter: T) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl PlotDataSource for VecDataSource {
    fn point_count(&self) -> usize {
        self.points.len()
    }

    fn data_range(&self) -> Option<DataRange> {
        DataRange::from_points(&self.points)
    }
}

impl ScatterDataSource for VecDataSource {
    fn point_at(&self, index: usize) -> Result<ScatterPoint> {
        self.points
            .get(index)
            .copied()
            .ok_or_else(|| PlotError::index_out_of_range(index, self.points.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_at_out_of_range() {
        let source = VecDataSource::from(vec![ScatterPoint::new(0.0, 1.0)]);
        let err = source.point_at(1).unwrap_err();
        assert!(matches!(
            err,
            PlotError::IndexOutOfRange { index: 1, count: 1 }
        ));
    }

    #[test]
    fn test_set_returns_previous_value() {
        let mut source = VecDataSource::new();
        source.push((0.0, 1.0));
        let previous = source.set(0, (0.0, 2.0)).unwrap();
        assert_eq!(previous, ScatterPoint::new(0.0, 1.0));
        assert_eq!(source.point_at(0).unwrap(), ScatterPoint::new(0.0, 2.0));
        assert!(source.set(3, (1.0, 1.0)).is_err());
    }

    #[test]
    fn test_data_range_skips_non_finite() {
        let source: VecDataSource = vec![
            ScatterPoint::new(0.0, -2.0),
            ScatterPoint::new(f64::NAN, 100.0),
            ScatterPoint::new(4.0, 3.0),
        ]
        .into_iter()
        .collect();

        let range = source.data_range().unwrap();
        assert_eq!(range.x, 0.0..=4.0);
        assert_eq!(range.y, -2.0..=3.0);
    }

    #[test]
    fn test_data_range_empty() {
        assert!(VecDataSource::new().data_range().is_none());
    }
}
