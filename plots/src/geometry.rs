//! Per-segment stroke and fill geometry.
//!
//! Geometry lives in plot space: `x` is unchanged from data space and the
//! vertical coordinate is the plot height
//! `(y - minimum_value_for_plot_height) * plot_height_multiplier`, so the
//! baseline is always at height `0`.

use crate::point::ScatterPoint;

/// Maps data values to plot heights
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeightMapping {
    pub baseline: f64,
    pub multiplier: f64,
}

impl HeightMapping {
    pub fn new(baseline: f64, multiplier: f64) -> Self {
        Self {
            baseline,
            multiplier,
        }
    }

    /// Plot height of a data value; `0` at the baseline
    pub fn height(&self, y: f64) -> f64 {
        (y - self.baseline) * self.multiplier
    }
}

impl Default for HeightMapping {
    fn default() -> Self {
        Self::new(0.0, 1.0)
    }
}

/// How consecutive points are connected
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Interpolation {
    /// A direct line between points
    #[default]
    Straight,
    /// Horizontal to the next x, then vertical to the next value
    Stepped,
}

/// Which fill color a region takes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FillTone {
    /// At or above the baseline (`fill_color1`)
    Upper,
    /// Below the baseline (`fill_color2`)
    Lower,
}

impl FillTone {
    fn of_height(height: f64) -> Self {
        if height < 0.0 {
            FillTone::Lower
        } else {
            FillTone::Upper
        }
    }
}

/// A closed polygon between the curve and the baseline
#[derive(Clone, Debug, PartialEq)]
pub struct FillRegion {
    pub tone: FillTone,
    pub polygon: Vec<(f64, f64)>,
}

/// Geometry for the span between point `i` and point `i + 1`
///
/// An empty stroke means the segment is a gap (one of its points is not
/// finite or could not be read).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SegmentGeometry {
    /// Polyline vertices in plot space
    pub stroke: Vec<(f64, f64)>,
    pub fills: Vec<FillRegion>,
}

impl SegmentGeometry {
    pub fn is_empty(&self) -> bool {
        self.stroke.is_empty()
    }

    /// Number of line segments in the stroke: 1 straight, 2 stepped
    pub fn stroke_segment_count(&self) -> usize {
        self.stroke.len().saturating_sub(1)
    }

    pub fn has_tone(&self, tone: FillTone) -> bool {
        self.fills.iter().any(|fill| fill.tone == tone)
    }
}

/// Build stroke and fill geometry for one pair of consecutive points
pub fn segment_geometry(
    start: ScatterPoint,
    end: ScatterPoint,
    mapping: HeightMapping,
    interpolation: Interpolation,
) -> SegmentGeometry {
    if !start.is_finite() || !end.is_finite() {
        return SegmentGeometry::default();
    }

    let (x0, h0) = (start.x, mapping.height(start.y));
    let (x1, h1) = (end.x, mapping.height(end.y));
    if !h0.is_finite() || !h1.is_finite() {
        return SegmentGeometry::default();
    }

    match interpolation {
        Interpolation::Straight => SegmentGeometry {
            stroke: vec![(x0, h0), (x1, h1)],
            fills: straight_fills(x0, h0, x1, h1),
        },
        Interpolation::Stepped => SegmentGeometry {
            stroke: vec![(x0, h0), (x1, h0), (x1, h1)],
            fills: vec![FillRegion {
                tone: FillTone::of_height(h0),
                polygon: vec![(x0, 0.0), (x0, h0), (x1, h0), (x1, 0.0)],
            }],
        },
    }
}

fn straight_fills(x0: f64, h0: f64, x1: f64, h1: f64) -> Vec<FillRegion> {
    let crosses = (h0 > 0.0 && h1 < 0.0) || (h0 < 0.0 && h1 > 0.0);
    if !crosses {
        // Touching the baseline at one end does not split the region
        let tone = if h0 < 0.0 || h1 < 0.0 {
            FillTone::Lower
        } else {
            FillTone::Upper
        };
        return vec![FillRegion {
            tone,
            polygon: vec![(x0, 0.0), (x0, h0), (x1, h1), (x1, 0.0)],
        }];
    }

    let crossing = x0 + (x1 - x0) * h0 / (h0 - h1);
    vec![
        FillRegion {
            tone: FillTone::of_height(h0),
            polygon: vec![(x0, 0.0), (x0, h0), (crossing, 0.0)],
        },
        FillRegion {
            tone: FillTone::of_height(h1),
            polygon: vec![(crossing, 0.0), (x1, h1), (x1, 0.0)],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn straight(a: (f64, f64), b: (f64, f64)) -> SegmentGeometry {
        segment_geometry(
            a.into(),
            b.into(),
            HeightMapping::default(),
            Interpolation::Straight,
        )
    }

    #[test]
    fn test_straight_segment_has_single_stroke() {
        let geometry = straight((0.0, 1.0), (1.0, 2.0));
        assert_eq!(geometry.stroke_segment_count(), 1);
        assert_eq!(geometry.stroke, vec![(0.0, 1.0), (1.0, 2.0)]);
    }

    #[test]
    fn test_stepped_segment_goes_horizontal_then_vertical() {
        let geometry = segment_geometry(
            ScatterPoint::new(0.0, 1.0),
            ScatterPoint::new(2.0, 4.0),
            HeightMapping::default(),
            Interpolation::Stepped,
        );
        assert_eq!(geometry.stroke_segment_count(), 2);
        assert_eq!(geometry.stroke, vec![(0.0, 1.0), (2.0, 1.0), (2.0, 4.0)]);
        assert_eq!(geometry.fills.len(), 1);
        assert_eq!(geometry.fills[0].tone, FillTone::Upper);
    }

    #[test]
    fn test_stepped_fill_takes_tone_of_leading_value() {
        let geometry = segment_geometry(
            ScatterPoint::new(0.0, -1.0),
            ScatterPoint::new(1.0, 3.0),
            HeightMapping::default(),
            Interpolation::Stepped,
        );
        assert_eq!(geometry.fills.len(), 1);
        assert_eq!(geometry.fills[0].tone, FillTone::Lower);
    }

    #[test]
    fn test_fill_tone_above_and_below() {
        assert!(straight((0.0, 0.0), (1.0, 5.0)).fills.iter().all(|f| f.tone == FillTone::Upper));
        assert!(straight((0.0, -1.0), (1.0, -5.0)).fills.iter().all(|f| f.tone == FillTone::Lower));
        // Ending exactly on the baseline from below stays a single lower region
        let touching = straight((0.0, -2.0), (1.0, 0.0));
        assert_eq!(touching.fills.len(), 1);
        assert_eq!(touching.fills[0].tone, FillTone::Lower);
    }

    #[test]
    fn test_crossing_segment_splits_at_baseline() {
        let geometry = straight((1.0, 5.0), (2.0, -3.0));
        assert_eq!(geometry.fills.len(), 2);
        assert_eq!(geometry.fills[0].tone, FillTone::Upper);
        assert_eq!(geometry.fills[1].tone, FillTone::Lower);

        let (crossing, height) = geometry.fills[0].polygon[2];
        assert_relative_eq!(crossing, 1.625);
        assert_relative_eq!(height, 0.0);
        assert_relative_eq!(geometry.fills[1].polygon[0].0, 1.625);
    }

    #[test]
    fn test_rising_crossing_splits_lower_then_upper() {
        let geometry = straight((0.0, -3.0), (1.0, 1.0));
        let tones: Vec<FillTone> = geometry.fills.iter().map(|f| f.tone).collect();
        assert_eq!(tones, vec![FillTone::Lower, FillTone::Upper]);

        let (crossing, height) = geometry.fills[0].polygon[2];
        assert_relative_eq!(crossing, 0.75);
        assert_relative_eq!(height, 0.0);
        assert_relative_eq!(geometry.fills[1].polygon[0].0, 0.75);
    }

    #[test]
    fn test_leaving_baseline_downwards_is_single_lower_region() {
        let geometry = straight((0.0, 0.0), (1.0, -2.0));
        assert_eq!(geometry.fills.len(), 1);
        assert_eq!(geometry.fills[0].tone, FillTone::Lower);
        assert_eq!(
            geometry.fills[0].polygon,
            vec![(0.0, 0.0), (0.0, 0.0), (1.0, -2.0), (1.0, 0.0)]
        );
    }

    #[test]
    fn test_mapping_applies_baseline_and_multiplier() {
        let mapping = HeightMapping::new(10.0, 2.0);
        assert_relative_eq!(mapping.height(10.0), 0.0);
        assert_relative_eq!(mapping.height(15.0), 10.0);
        assert_relative_eq!(mapping.height(5.0), -10.0);

        let geometry = segment_geometry(
            ScatterPoint::new(0.0, 12.0),
            ScatterPoint::new(1.0, 8.0),
            mapping,
            Interpolation::Straight,
        );
        assert_eq!(geometry.stroke, vec![(0.0, 4.0), (1.0, -4.0)]);
        assert!(geometry.has_tone(FillTone::Upper));
        assert!(geometry.has_tone(FillTone::Lower));
    }

    #[test]
    fn test_non_finite_point_is_a_gap() {
        let geometry = straight((0.0, f64::NAN), (1.0, 1.0));
        assert!(geometry.is_empty());
        assert!(geometry.fills.is_empty());
    }
}
