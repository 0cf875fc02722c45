//! Incremental update tests
//!
//! Drives `ScatterPlotView` through a host-implemented data source that counts
//! how many points the view reads, to check that reloads and appends stay
//! local no matter how long the recording is.

use rand::Rng;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use trace_plots::{
    FillTone, PlotDataSource, PlotError, PlotView, ScatterDataSource, ScatterPlotOptions,
    ScatterPlotView, ScatterPoint,
};

/// Host-side storage that records every read the view makes
#[derive(Default)]
struct CountingSource {
    samples: Vec<f64>,
    reads: Cell<usize>,
}

impl CountingSource {
    fn with_samples(samples: Vec<f64>) -> Self {
        Self {
            samples,
            reads: Cell::new(0),
        }
    }

    fn take_reads(&self) -> usize {
        self.reads.replace(0)
    }
}

impl PlotDataSource for CountingSource {
    fn point_count(&self) -> usize {
        self.samples.len()
    }
}

impl ScatterDataSource for CountingSource {
    fn point_at(&self, index: usize) -> trace_plots::Result<ScatterPoint> {
        self.reads.set(self.reads.get() + 1);
        self.samples
            .get(index)
            .map(|&value| ScatterPoint::new(index as f64, value))
            .ok_or_else(|| PlotError::index_out_of_range(index, self.samples.len()))
    }
}

fn attached(samples: Vec<f64>) -> (ScatterPlotView, Rc<RefCell<CountingSource>>) {
    let source = Rc::new(RefCell::new(CountingSource::with_samples(samples)));
    let mut view = ScatterPlotView::default();
    view.set_data_source(&source);
    view.update();
    source.borrow().take_reads();
    (view, source)
}

#[test]
fn test_reload_point_only_touches_neighbouring_segments() {
    let mut rng = rand::rng();
    let samples: Vec<f64> = (0..1_000).map(|_| rng.random_range(-50.0..50.0)).collect();
    let (mut view, source) = attached(samples);
    let before = view.segments().to_vec();

    let index = 500;
    source.borrow_mut().samples[index] = 1_000.0;
    view.reload_point_at_index(index).unwrap();
    let summary = view.update();

    assert_eq!(source.borrow().take_reads(), 1);
    assert_eq!(summary.rebuilt_segments, 2);
    assert!(!summary.full_rebuild);

    let after = view.segments();
    for (segment, (old, new)) in before.iter().zip(after).enumerate() {
        if segment == index - 1 || segment == index {
            assert_ne!(old, new);
        } else {
            assert_eq!(old, new, "segment {segment} should be untouched");
        }
    }
    assert_eq!(after[index - 1].stroke[1], (index as f64, 1_000.0));
    assert_eq!(after[index].stroke[0], (index as f64, 1_000.0));
}

#[test]
fn test_append_cost_independent_of_history() {
    let (mut view, source) = attached(vec![1.0; 10_000]);

    source.borrow_mut().samples.extend([2.0, 3.0, -4.0]);
    view.add_number_of_points(3);
    let summary = view.update();

    assert_eq!(source.borrow().take_reads(), 3);
    assert_eq!(summary.appended_points, 3);
    assert_eq!(view.point_count(), source.borrow().point_count());
    assert_eq!(view.segments().len(), 10_002);
    assert!(view.segments()[10_001].has_tone(FillTone::Lower));
}

#[test]
fn test_repeated_appends_track_source_count() {
    let (mut view, source) = attached(Vec::new());
    assert_eq!(view.point_count(), 0);

    for batch in 1..=5 {
        source.borrow_mut().samples.extend((0..batch).map(|i| i as f64));
        view.add_number_of_points(batch);
        view.update();
        assert_eq!(view.point_count(), source.borrow().point_count());
    }
    assert_eq!(view.point_count(), 15);
    assert_eq!(view.segments().len(), 14);
}

#[test]
fn test_reload_and_append_in_one_update() {
    let (mut view, source) = attached(vec![1.0, 2.0, 3.0]);

    source.borrow_mut().samples[2] = -3.0;
    source.borrow_mut().samples.push(4.0);
    view.reload_point_at_index(2).unwrap();
    view.add_number_of_points(1);
    let summary = view.update();

    assert_eq!(summary.rebuilt_segments, 1);
    assert_eq!(summary.appended_points, 1);
    assert_eq!(source.borrow().take_reads(), 2);
    // The appended segment starts from the reloaded value
    assert_eq!(view.segments()[2].stroke[0], (2.0, -3.0));
}

#[test]
fn test_stepped_view_renders() {
    let source = Rc::new(RefCell::new(CountingSource::with_samples(vec![
        3.0, 7.0, -2.0, 5.0,
    ])));
    let options = ScatterPlotOptions::new()
        .stepped(true)
        .minimum_value_for_plot_height(1.0)
        .plot_height_multiplier(2.0)
        .build()
        .unwrap();
    let mut view = ScatterPlotView::new(options);
    view.set_data_source(&source);

    let list = view.display_list();
    assert_eq!(list.strokes.len(), 1);
    assert_eq!(list.strokes[0].path.len(), 7);
    assert_eq!(list.fills.len(), 3);

    let bytes = view
        .render(&mut trace_plots::RenderConfig::default())
        .unwrap();
    assert!(!bytes.is_empty());
}

#[test]
fn test_oversized_append_clamps_to_source() {
    let (mut view, source) = attached(vec![1.0]);

    source.borrow_mut().samples.push(2.0);
    view.add_number_of_points(usize::MAX);
    view.add_number_of_points(1);
    let summary = view.update();

    assert_eq!(summary.appended_points, 1);
    assert_eq!(view.point_count(), 2);
    assert_eq!(source.borrow().take_reads(), 1);
}
