use crate::error::{PlotError, Result};
use crate::options::BasePlotOptions;
use crate::render::{DisplayList, ProgressInfo, RenderConfig};
use crate::{PlotBounds, PlotBytes, create_axis_specs};
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbImage};
use plotters::prelude::{BitMapBackend, ChartBuilder, IntoDrawingArea, PathElement, Polygon};
use plotters::style::{Color as _, RGBAColor};
use tracing::debug;

/// Commands drawn between progress reports
const PROGRESS_CHUNK: usize = 256;

const BASELINE_COLOR: RGBAColor = RGBAColor(160, 160, 160, 1.0);

const TITLE_FONT_SIZE: f64 = 16.0;

/// Bytes needed for an RGB buffer, computed in `usize` so large images don't wrap
fn rgb_buffer_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * 3
}

/// Render a display list to a PNG image using the Plotters backend
///
/// This function handles the complete rendering pipeline:
/// 1. Fills the background
/// 2. Sets up a Plotters chart over the plot-space bounds
/// 3. Draws fills, the baseline and strokes in that order
/// 4. Encodes to PNG format
///
/// An empty display list or missing bounds produce a background-only image.
/// The title is only drawn alongside data.
pub fn render_display_list(
    list: &DisplayList,
    bounds: Option<&PlotBounds>,
    base: &BasePlotOptions,
    render_config: &mut RenderConfig,
) -> Result<PlotBytes> {
    let width = base.width;
    let height = base.height;
    if width == 0 || height == 0 {
        return Err(PlotError::invalid_argument(
            "size",
            format!("cannot render a {width}x{height} image"),
        ));
    }

    let draw_start = std::time::Instant::now();
    // RGB buffer (3 bytes per pixel), alpha is blended by Plotters while drawing
    let mut pixel_buffer = vec![255; rgb_buffer_len(width, height)];

    {
        let backend = BitMapBackend::with_buffer(&mut pixel_buffer, (width, height));
        let root = backend.into_drawing_area();
        root.fill(&RGBAColor::from(base.background))
            .map_err(|e| PlotError::render(format!("failed to fill plot background: {e}")))?;

        if let Some(bounds) = bounds.filter(|_| !list.is_empty()) {
            let (x_spec, y_spec) = create_axis_specs(bounds, base.x_range.as_ref());

            let mut builder = ChartBuilder::on(&root);
            builder.margin(base.margin);
            if !base.title.is_empty() {
                builder.caption(&base.title, ("sans-serif", TITLE_FONT_SIZE));
            }
            let mut chart = builder
                .build_cartesian_2d(x_spec.clone(), y_spec)
                .map_err(|e| PlotError::render(format!("failed to build plot area: {e}")))?;

            let total = list.len();
            let mut drawn = 0;

            for chunk in list.fills.chunks(PROGRESS_CHUNK) {
                chart
                    .draw_series(chunk.iter().map(|fill| {
                        Polygon::new(fill.polygon.clone(), RGBAColor::from(fill.color).filled())
                    }))
                    .map_err(|e| PlotError::render(format!("failed to draw fills: {e}")))?;
                drawn += chunk.len();
                render_config.report_progress(ProgressInfo::new(drawn, total));
            }

            chart
                .draw_series(std::iter::once(PathElement::new(
                    vec![(x_spec.start, 0.0), (x_spec.end, 0.0)],
                    BASELINE_COLOR.stroke_width(1),
                )))
                .map_err(|e| PlotError::render(format!("failed to draw baseline: {e}")))?;

            for chunk in list.strokes.chunks(PROGRESS_CHUNK) {
                chart
                    .draw_series(chunk.iter().map(|stroke| {
                        let stroke_width = stroke.width.round().max(1.0) as u32;
                        PathElement::new(
                            stroke.path.clone(),
                            RGBAColor::from(stroke.color).stroke_width(stroke_width),
                        )
                    }))
                    .map_err(|e| PlotError::render(format!("failed to draw strokes: {e}")))?;
                drawn += chunk.len();
                render_config.report_progress(ProgressInfo::new(drawn, total));
            }
        }

        root.present()
            .map_err(|e| PlotError::render(format!("failed to present plotters buffer: {e}")))?;
    } // End Plotters scope - pixel_buffer is released

    debug!(
        fills = list.fills.len(),
        strokes = list.strokes.len(),
        elapsed = ?draw_start.elapsed(),
        "drew scatter plot"
    );

    let img: RgbImage = image::ImageBuffer::from_vec(width, height, pixel_buffer)
        .ok_or_else(|| PlotError::render("plot image buffer had unexpected size"))?;

    let mut encoded_data = Vec::new();
    PngEncoder::new(&mut encoded_data).write_image(
        img.as_raw(),
        width,
        height,
        ExtendedColorType::Rgb8,
    )?;

    Ok(encoded_data)
}
