use crate::error::{PlotError, Result};
use crate::point::ScatterPoint;
use crate::source::{DataRange, PlotDataSource, ScatterDataSource};
use std::collections::VecDeque;

/// Fixed-capacity data source for streaming telemetry
///
/// Index `0` is always the oldest retained point. Once the buffer is full,
/// every push evicts the oldest point and shifts all indices down by one, so
/// attached views need a full `reload_data` rather than an append.
#[derive(Clone, Debug)]
pub struct RingDataSource {
    points: VecDeque<ScatterPoint>,
    capacity: usize,
    evicted: u64,
}

impl RingDataSource {
    /// Create a ring buffer holding at most `capacity` points
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(PlotError::invalid_argument(
                "capacity",
                "ring buffer capacity must be at least 1",
            ));
        }

        Ok(Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
            evicted: 0,
        })
    }

    /// Append a point, returning `true` if the oldest point was evicted
    pub fn push(&mut self, point: impl Into<ScatterPoint>) -> bool {
        let evicted = if self.points.len() == self.capacity {
            self.points.pop_front();
            self.evicted += 1;
            true
        } else {
            false
        };
        self.points.push_back(point.into());
        evicted
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total number of points evicted since creation
    pub fn evicted(&self) -> u64 {
        self.evicted
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.points.len() == self.capacity
    }
}

impl PlotDataSource for RingDataSource {
    fn point_count(&self) -> usize {
        self.points.len()
    }

    fn data_range(&self) -> Option<DataRange> {
        DataRange::from_points(&self.points)
    }
}

impl ScatterDataSource for RingDataSource {
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
    fn test_zero_capacity_rejected() {
        assert!(matches!(
            RingDataSource::new(0),
            Err(PlotError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_push_evicts_oldest() {
        let mut ring = RingDataSource::new(2).unwrap();
        assert!(!ring.push((0.0, 0.0)));
        assert!(!ring.push((1.0, 1.0)));
        assert!(ring.is_full());
        assert!(ring.push((2.0, 2.0)));

        assert_eq!(ring.point_count(), 2);
        assert_eq!(ring.evicted(), 1);
        assert_eq!(ring.point_at(0).unwrap(), ScatterPoint::new(1.0, 1.0));
        assert_eq!(ring.point_at(1).unwrap(), ScatterPoint::new(2.0, 2.0));
        assert!(ring.point_at(2).is_err());
    }
}
