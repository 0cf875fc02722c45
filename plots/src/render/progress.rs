/// Information about plot rendering progress
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressInfo {
    /// Drawing commands completed so far
    pub drawn: usize,
    /// Total drawing commands in the display list
    pub total: usize,
    /// Progress percentage (0.0 to 100.0)
    pub percent: f32,
}

impl ProgressInfo {
    pub fn new(drawn: usize, total: usize) -> Self {
        let percent = if total == 0 {
            100.0
        } else {
            (drawn as f32 / total as f32) * 100.0
        };
        Self {
            drawn,
            total,
            percent,
        }
    }
}

/// Callback function type for reporting plot rendering progress
///
/// The callback receives progress information and returns a result.
/// Errors from the callback are logged but do not stop rendering.
pub type ProgressCallback =
    Box<dyn FnMut(ProgressInfo) -> Result<(), Box<dyn std::error::Error + Send + Sync>>>;
