pub mod scatter;
pub mod traits;

pub use scatter::ScatterPlotView;
pub use traits::PlotView;
