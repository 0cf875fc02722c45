use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Instant;
use trace_plots::{
    PlotDataSource, PlotView, RenderConfig, RingDataSource, ScatterPlotOptions, ScatterPlotView,
    ScatterPoint, VecDataSource,
};
use tracing::{debug, info};

/// trace-plot - Render profiler telemetry as a line/area plot
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "trace-plot")]
struct Cli {
    /// JSON file with the samples: an array of {"x": .., "y": ..} objects or [x, y] pairs
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output PNG path
    #[arg(short, long, value_name = "OUTPUT")]
    output: PathBuf,

    /// JSON file with plot options; command-line flags override it
    #[arg(long, value_name = "OPTIONS_JSON")]
    options: Option<PathBuf>,

    /// Connect points with horizontal-then-vertical steps
    #[arg(long)]
    stepped: bool,

    /// Baseline value separating the two fill colors
    #[arg(long)]
    baseline: Option<f64>,

    /// Scale from data height to plot height
    #[arg(long)]
    multiplier: Option<f64>,

    /// Image width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Title drawn above the plot
    #[arg(long)]
    title: Option<String>,

    /// Feed the samples to the view in batches of this size, as a live recording would
    #[arg(long, value_name = "N")]
    batch: Option<usize>,

    /// Keep only the most recent N samples (ring buffer)
    #[arg(long, value_name = "N")]
    capacity: Option<usize>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// One sample in the input file
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(untagged)]
enum PointRecord {
    Object(ScatterPoint),
    Pair(f64, f64),
}

impl From<PointRecord> for ScatterPoint {
    fn from(record: PointRecord) -> Self {
        match record {
            PointRecord::Object(point) => point,
            PointRecord::Pair(x, y) => ScatterPoint::new(x, y),
        }
    }
}

/// Parse samples from JSON text
fn parse_points(json: &str) -> Result<Vec<ScatterPoint>> {
    let records: Vec<PointRecord> =
        serde_json::from_str(json).context("input must be a JSON array of points")?;
    Ok(records.into_iter().map(ScatterPoint::from).collect())
}

fn load_points(path: &Path) -> Result<Vec<ScatterPoint>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read input file {}", path.display()))?;
    parse_points(&json).with_context(|| format!("failed to parse {}", path.display()))
}

/// Load options from the optional file, then apply command-line overrides
fn build_options(cli: &Cli) -> Result<ScatterPlotOptions> {
    let mut options = match &cli.options {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read options file {}", path.display()))?;
            ScatterPlotOptions::from_json(&json)
                .with_context(|| format!("invalid options in {}", path.display()))?
        }
        None => ScatterPlotOptions::default(),
    };

    if cli.stepped {
        options.stepped = true;
    }
    if let Some(baseline) = cli.baseline {
        options.minimum_value_for_plot_height = baseline;
    }
    if let Some(multiplier) = cli.multiplier {
        options.plot_height_multiplier = multiplier;
    }
    if let Some(width) = cli.width {
        options.base.width = width;
    }
    if let Some(height) = cli.height {
        options.base.height = height;
    }
    if let Some(title) = &cli.title {
        options.base.title = title.clone();
    }

    options.validate()?;
    Ok(options)
}

/// Append samples to an array-backed source, notifying the view per batch
///
/// The view only holds a weak handle, so the caller keeps the returned source
/// alive until rendering is done.
fn feed_vec_source(
    view: &mut ScatterPlotView,
    points: &[ScatterPoint],
    batch: usize,
) -> Rc<RefCell<VecDataSource>> {
    let source = Rc::new(RefCell::new(VecDataSource::with_capacity(points.len())));
    view.set_data_source(&source);
    view.update();

    for chunk in points.chunks(batch.max(1)) {
        let added = source.borrow_mut().extend(chunk.iter().copied());
        view.add_number_of_points(added);
        let summary = view.update();
        debug!(
            appended = summary.appended_points,
            total = view.point_count(),
            "appended batch"
        );
    }

    if let Some(range) = source.borrow().data_range() {
        info!(x = ?range.x, y = ?range.y, "recorded data range");
    }
    source
}

/// Push samples through a ring buffer, reloading the view whenever points are evicted
fn feed_ring_source(
    view: &mut ScatterPlotView,
    points: &[ScatterPoint],
    batch: usize,
    capacity: usize,
) -> Result<Rc<RefCell<RingDataSource>>> {
    let source = Rc::new(RefCell::new(RingDataSource::new(capacity)?));
    view.set_data_source(&source);
    view.update();

    for chunk in points.chunks(batch.max(1)) {
        let mut evicted = false;
        for &point in chunk {
            evicted |= source.borrow_mut().push(point);
        }

        if evicted {
            view.reload_data();
        } else {
            view.add_number_of_points(chunk.len());
        }
        let summary = view.update();
        debug!(
            full_rebuild = summary.full_rebuild,
            appended = summary.appended_points,
            total = view.point_count(),
            "fed ring buffer batch"
        );
    }

    info!(
        retained = source.borrow().len(),
        evicted = source.borrow().evicted(),
        "ring buffer filled"
    );
    Ok(source)
}

fn render(view: &mut ScatterPlotView) -> Result<Vec<u8>> {
    view.render(&mut RenderConfig::default())
        .context("failed to render plot")
}

fn run(cli: &Cli) -> Result<()> {
    let start_time = Instant::now();

    let points = load_points(&cli.input)?;
    info!("Loaded {} samples from {}", points.len(), cli.input.display());

    let options = build_options(cli)?;
    let mut view = ScatterPlotView::new(options);
    let batch = cli.batch.unwrap_or(points.len());

    let bytes = match cli.capacity {
        Some(capacity) => {
            let _source = feed_ring_source(&mut view, &points, batch, capacity)?;
            render(&mut view)?
        }
        None => {
            let _source = feed_vec_source(&mut view, &points, batch);
            render(&mut view)?
        }
    };
    std::fs::write(&cli.output, &bytes)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;

    info!(
        "Wrote {} ({} points, {} bytes) in {:?}",
        cli.output.display(),
        view.point_count(),
        bytes.len(),
        start_time.elapsed()
    );
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing subscriber with environment filter
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    run(&args)
}
