//! Incremental invalidation of cached plot geometry.
//!
//! [`PlotCache`] mirrors the points a view last rendered and one
//! [`SegmentGeometry`] per consecutive pair. Changes are recorded as dirty
//! point indices or a pending append count and applied in [`PlotCache::sync`],
//! which touches only the affected segments. Appends cost time proportional to
//! the number of new points, never to the length of the history.

use crate::PlotBounds;
use crate::geometry::{HeightMapping, Interpolation, SegmentGeometry, segment_geometry};
use crate::point::ScatterPoint;
use crate::source::ScatterDataSource;
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// What a call to [`PlotCache::sync`] did
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UpdateSummary {
    /// Every point was re-read and every segment rebuilt
    pub full_rebuild: bool,
    /// Segments recomputed, excluding the ones created by an append
    pub rebuilt_segments: usize,
    /// Points read from the source by an append
    pub appended_points: usize,
}

impl UpdateSummary {
    pub fn is_noop(&self) -> bool {
        !self.full_rebuild && self.rebuilt_segments == 0 && self.appended_points == 0
    }
}

/// Cached points and per-segment geometry with dirty tracking
#[derive(Debug, Default)]
pub struct PlotCache {
    points: Vec<ScatterPoint>,
    segments: Vec<SegmentGeometry>,
    dirty_points: BTreeSet<usize>,
    pending_append: usize,
    needs_full_rebuild: bool,
}

impl PlotCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of points covered by the cached geometry
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Points the cache knows about, including appends not yet synced
    pub fn known_count(&self) -> usize {
        self.points.len().saturating_add(self.pending_append)
    }

    pub fn points(&self) -> &[ScatterPoint] {
        &self.points
    }

    pub fn segments(&self) -> &[SegmentGeometry] {
        &self.segments
    }

    pub fn needs_full_rebuild(&self) -> bool {
        self.needs_full_rebuild
    }

    /// Whether the next sync has work to do
    pub fn is_dirty(&self) -> bool {
        self.needs_full_rebuild || self.pending_append > 0 || !self.dirty_points.is_empty()
    }

    /// Schedule a full rebuild on the next sync
    pub fn invalidate_all(&mut self) {
        self.needs_full_rebuild = true;
        self.dirty_points.clear();
        self.pending_append = 0;
    }

    /// Schedule a re-read of a single point
    ///
    /// Indices not yet covered by the cache are ignored; a pending append or
    /// full rebuild will read them anyway.
    pub fn mark_point_dirty(&mut self, index: usize) {
        if !self.needs_full_rebuild && index < self.points.len() {
            self.dirty_points.insert(index);
        }
    }

    /// Record `count` points appended to the end of the source
    pub fn mark_appended(&mut self, count: usize) {
        if !self.needs_full_rebuild {
            self.pending_append = self.pending_append.saturating_add(count);
        }
    }

    /// Drop everything; the cache renders as empty until the next rebuild
    pub fn clear(&mut self) {
        self.points.clear();
        self.segments.clear();
        self.dirty_points.clear();
        self.pending_append = 0;
        self.needs_full_rebuild = false;
    }

    /// Bring the cache in line with `source`
    pub fn sync(
        &mut self,
        source: &dyn ScatterDataSource,
        mapping: HeightMapping,
        interpolation: Interpolation,
    ) -> UpdateSummary {
        if self.needs_full_rebuild {
            return self.rebuild(source, mapping, interpolation);
        }

        let count = source.point_count();
        let cached = self.points.len();
        if count < cached {
            warn!(
                cached,
                count, "data source shrank below the rendered point count, rebuilding"
            );
            return self.rebuild(source, mapping, interpolation);
        }

        let mut summary = UpdateSummary::default();

        let dirty = std::mem::take(&mut self.dirty_points);
        let mut touched = BTreeSet::new();
        for index in dirty {
            if index >= cached {
                continue;
            }
            self.points[index] = read_point(source, index);
            if index > 0 {
                touched.insert(index - 1);
            }
            if index + 1 < cached {
                touched.insert(index);
            }
        }
        for &segment in &touched {
            self.segments[segment] = segment_geometry(
                self.points[segment],
                self.points[segment + 1],
                mapping,
                interpolation,
            );
        }
        summary.rebuilt_segments = touched.len();

        if self.pending_append > 0 {
            let expected = cached.saturating_add(self.pending_append);
            if count < expected {
                warn!(
                    expected,
                    count, "data source reports fewer points than were announced, clamping append"
                );
            }
            let target = expected.min(count);
            summary.appended_points = self.append_points(source, target, mapping, interpolation);
            self.pending_append = 0;
        }

        if !summary.is_noop() {
            debug!(
                rebuilt = summary.rebuilt_segments,
                appended = summary.appended_points,
                points = self.points.len(),
                "synced plot geometry"
            );
        }

        summary
    }

    /// Extent of the cached geometry in plot space
    ///
    /// The y range always contains the baseline height `0`.
    pub fn bounds(&self, mapping: HeightMapping) -> Option<PlotBounds> {
        let mut extent: Option<(f64, f64, f64, f64)> = None;
        for point in self.points.iter().filter(|p| p.is_finite()) {
            let height = mapping.height(point.y);
            extent = Some(match extent {
                None => (point.x, point.x, height.min(0.0), height.max(0.0)),
                Some((min_x, max_x, min_h, max_h)) => (
                    min_x.min(point.x),
                    max_x.max(point.x),
                    min_h.min(height),
                    max_h.max(height),
                ),
            });
        }

        extent.map(|(min_x, max_x, min_h, max_h)| PlotBounds {
            x: min_x..=max_x,
            y: min_h..=max_h,
        })
    }

    fn rebuild(
        &mut self,
        source: &dyn ScatterDataSource,
        mapping: HeightMapping,
        interpolation: Interpolation,
    ) -> UpdateSummary {
        self.clear();
        let count = source.point_count();
        self.points.reserve(count);
        self.segments.reserve(count.saturating_sub(1));
        self.append_points(source, count, mapping, interpolation);

        debug!(points = count, "rebuilt plot geometry");

        UpdateSummary {
            full_rebuild: true,
            rebuilt_segments: self.segments.len(),
            appended_points: 0,
        }
    }

    /// Read points up to `target` and extend the segments; returns points read
    fn append_points(
        &mut self,
        source: &dyn ScatterDataSource,
        target: usize,
        mapping: HeightMapping,
        interpolation: Interpolation,
    ) -> usize {
        let start = self.points.len();
        for index in start..target {
            let point = read_point(source, index);
            if let Some(&previous) = self.points.last() {
                self.segments
                    .push(segment_geometry(previous, point, mapping, interpolation));
            }
            self.points.push(point);
        }
        target.saturating_sub(start)
    }
}

/// Read a point, degrading failures to a gap
fn read_point(source: &dyn ScatterDataSource, index: usize) -> ScatterPoint {
    match source.point_at(index) {
        Ok(point) => {
            if !point.is_finite() {
                debug!(index, ?point, "non-finite point leaves a gap in the plot");
            }
            point
        }
        Err(e) => {
            warn!(index, error = %e, "failed to read point, leaving a gap");
            ScatterPoint::new(f64::NAN, f64::NAN)
        }
    }
}
