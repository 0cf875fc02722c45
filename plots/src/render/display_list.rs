use crate::geometry::{FillTone, SegmentGeometry};
use crate::options::{Color, ScatterPlotOptions};

/// A filled polygon in plot space
#[derive(Clone, Debug, PartialEq)]
pub struct FillCommand {
    /// Segment the polygon belongs to
    pub segment: usize,
    pub tone: FillTone,
    pub polygon: Vec<(f64, f64)>,
    pub color: Color,
}

/// A stroked polyline in plot space
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeCommand {
    pub path: Vec<(f64, f64)>,
    pub color: Color,
    pub width: f64,
}

/// Colored drawing commands for the current plot geometry
///
/// Fills are drawn first, strokes on top. Consecutive segments are joined
/// into a single stroke; gaps start a new one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DisplayList {
    pub fills: Vec<FillCommand>,
    pub strokes: Vec<StrokeCommand>,
}

impl DisplayList {
    pub fn from_segments(segments: &[SegmentGeometry], options: &ScatterPlotOptions) -> Self {
        let mut list = DisplayList::default();

        for (index, segment) in segments.iter().enumerate() {
            for region in &segment.fills {
                let color = match region.tone {
                    FillTone::Upper => options.fill_color1,
                    FillTone::Lower => options.fill_color2,
                };
                if color.is_transparent() {
                    continue;
                }
                list.fills.push(FillCommand {
                    segment: index,
                    tone: region.tone,
                    polygon: region.polygon.clone(),
                    color,
                });
            }
        }

        if options.line_width > 0.0 && !options.line_color.is_transparent() {
            let mut path: Vec<(f64, f64)> = Vec::new();
            for segment in segments {
                if segment.is_empty() {
                    list.push_stroke(std::mem::take(&mut path), options);
                } else if path.is_empty() {
                    path.extend_from_slice(&segment.stroke);
                } else {
                    path.extend_from_slice(&segment.stroke[1..]);
                }
            }
            list.push_stroke(path, options);
        }

        list
    }

    fn push_stroke(&mut self, path: Vec<(f64, f64)>, options: &ScatterPlotOptions) {
        if path.len() < 2 {
            return;
        }
        self.strokes.push(StrokeCommand {
            path,
            color: options.line_color,
            width: options.line_width,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.fills.is_empty() && self.strokes.is_empty()
    }

    /// Total drawing commands
    pub fn len(&self) -> usize {
        self.fills.len() + self.strokes.len()
    }

    /// Fill colors used by one segment, in drawing order
    pub fn fill_colors_for_segment(&self, segment: usize) -> Vec<Color> {
        self.fills
            .iter()
            .filter(|fill| fill.segment == segment)
            .map(|fill| fill.color)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{HeightMapping, Interpolation, segment_geometry};
    use crate::point::ScatterPoint;

    fn segments(points: &[(f64, f64)], interpolation: Interpolation) -> Vec<SegmentGeometry> {
        points
            .windows(2)
            .map(|pair| {
                segment_geometry(
                    ScatterPoint::from(pair[0]),
                    ScatterPoint::from(pair[1]),
                    HeightMapping::default(),
                    interpolation,
                )
            })
            .collect()
    }

    #[test]
    fn test_consecutive_segments_share_one_stroke() {
        let options = ScatterPlotOptions::default();
        let list = DisplayList::from_segments(
            &segments(&[(0.0, 0.0), (1.0, 5.0), (2.0, -3.0)], Interpolation::Straight),
            &options,
        );
        assert_eq!(list.strokes.len(), 1);
        assert_eq!(list.strokes[0].path, vec![(0.0, 0.0), (1.0, 5.0), (2.0, -3.0)]);
    }

    #[test]
    fn test_gap_splits_stroke() {
        let options = ScatterPlotOptions::default();
        let list = DisplayList::from_segments(
            &segments(
                &[(0.0, 1.0), (1.0, 2.0), (2.0, f64::NAN), (3.0, 1.0), (4.0, 2.0)],
                Interpolation::Straight,
            ),
            &options,
        );
        assert_eq!(list.strokes.len(), 2);
        assert_eq!(list.fills.len(), 2);
    }

    #[test]
    fn test_stepped_stroke_vertices() {
        let options = ScatterPlotOptions::default();
        let list = DisplayList::from_segments(
            &segments(&[(0.0, 1.0), (1.0, 2.0), (2.0, 0.5)], Interpolation::Stepped),
            &options,
        );
        assert_eq!(
            list.strokes[0].path,
            vec![(0.0, 1.0), (1.0, 1.0), (1.0, 2.0), (2.0, 2.0), (2.0, 0.5)]
        );
    }

    #[test]
    fn test_zero_line_width_draws_no_stroke() {
        let options = ScatterPlotOptions::new().line_width(0.0).build().unwrap();
        let list = DisplayList::from_segments(
            &segments(&[(0.0, 1.0), (1.0, 2.0)], Interpolation::Straight),
            &options,
        );
        assert!(list.strokes.is_empty());
        assert_eq!(list.fills.len(), 1);
    }

    #[test]
    fn test_fill_colors_follow_tone() {
        let upper = Color::rgb(0, 200, 0);
        let lower = Color::rgb(200, 0, 0);
        let options = ScatterPlotOptions::new()
            .fill_color1(upper)
            .fill_color2(lower)
            .build()
            .unwrap();
        let list = DisplayList::from_segments(
            &segments(&[(0.0, 0.0), (1.0, 5.0), (2.0, -3.0)], Interpolation::Straight),
            &options,
        );
        assert_eq!(list.fill_colors_for_segment(0), vec![upper]);
        assert_eq!(list.fill_colors_for_segment(1), vec![upper, lower]);
    }
}
