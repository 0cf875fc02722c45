pub mod display_list;
pub mod plotters_backend;
pub mod progress;

pub use display_list::{DisplayList, FillCommand, StrokeCommand};
pub use progress::{ProgressCallback, ProgressInfo};

use tracing::warn;

/// Configuration for plot rendering
///
/// This struct allows applications to inject their own progress reporting
/// logic without the library depending on specific frameworks.
#[derive(Default)]
pub struct RenderConfig {
    /// Optional progress callback for reporting rendering progress
    ///
    /// Called as batches of fills and strokes are drawn. Useful for very long
    /// recordings where a render can take noticeable time.
    pub progress: Option<ProgressCallback>,
}

impl std::fmt::Debug for RenderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderConfig")
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

impl RenderConfig {
    /// Create a new RenderConfig with no callbacks
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a RenderConfig that reports progress to `callback`
    pub fn with_progress(callback: ProgressCallback) -> Self {
        Self {
            progress: Some(callback),
        }
    }

    /// Call the progress callback if present
    pub fn report_progress(&mut self, info: ProgressInfo) {
        if let Some(ref mut callback) = self.progress {
            if let Err(e) = callback(info) {
                warn!(error = %e, "failed to report render progress");
            }
        }
    }
}
