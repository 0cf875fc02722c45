use serde::{Deserialize, Serialize};

/// A coordinate in plot data space
///
/// Points have no identity beyond their index in a data source. Non-finite
/// coordinates are allowed; segments touching them are drawn as gaps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
}

impl ScatterPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether both coordinates are finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for ScatterPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<ScatterPoint> for (f64, f64) {
    fn from(point: ScatterPoint) -> Self {
        (point.x, point.y)
    }
}
