//! Error types for plot operations.
//!
//! This module defines `PlotError`, the error type shared by data sources,
//! views and the raster backend. It uses `thiserror` for convenient error
//! construction.

use crate::options::{BasePlotOptionsBuilderError, ScatterPlotOptionsBuilderError};
use std::error::Error as StdError;
use thiserror::Error;

/// Custom error type for plot operations.
///
/// Note that a missing data source is never an error: views treat it as an
/// empty plot.
#[derive(Debug, Error)]
pub enum PlotError {
    /// Indexed access past the end of a data source or the rendered points
    #[error("Index {index} is out of range for {count} points")]
    IndexOutOfRange { index: usize, count: usize },

    /// A numeric option or argument was rejected
    #[error("Invalid argument '{name}': {message}")]
    InvalidArgument { name: String, message: String },

    /// Options builder or validation failures
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// Raster backend failures
    #[error("Render error: {message}")]
    Render { message: String },

    /// Image encoding errors
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with context (for wrapping other errors)
    #[error("{message}")]
    Other {
        message: String,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },
}

impl PlotError {
    /// Create an IndexOutOfRange error
    pub fn index_out_of_range(index: usize, count: usize) -> Self {
        Self::IndexOutOfRange { index, count }
    }

    /// Create an InvalidArgument error
    pub fn invalid_argument(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a Render error with a message
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render {
            message: message.into(),
        }
    }

    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        match self {
            Self::IndexOutOfRange { .. } | Self::Image(_) | Self::Io(_) => Self::Other {
                message: format!("{}: {}", context.into(), self),
                source: Some(Box::new(self)),
            },
            Self::InvalidArgument { name, message } => Self::InvalidArgument {
                name,
                message: format!("{}: {}", context.into(), message),
            },
            Self::InvalidOptions(message) => {
                Self::InvalidOptions(format!("{}: {}", context.into(), message))
            }
            Self::Render { message } => Self::Render {
                message: format!("{}: {}", context.into(), message),
            },
            Self::Serialization(e) => Self::Other {
                message: format!("{}: {}", context.into(), e),
                source: Some(Box::new(e)),
            },
            Self::Other { message, source } => Self::Other {
                message: format!("{}: {}", context.into(), message),
                source,
            },
        }
    }
}

impl From<ScatterPlotOptionsBuilderError> for PlotError {
    fn from(err: ScatterPlotOptionsBuilderError) -> Self {
        Self::InvalidOptions(err.to_string())
    }
}

impl From<BasePlotOptionsBuilderError> for PlotError {
    fn from(err: BasePlotOptionsBuilderError) -> Self {
        Self::InvalidOptions(err.to_string())
    }
}

// Conversion from anyhow::Error for convenience
impl From<anyhow::Error> for PlotError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other {
            message: err.to_string(),
            source: None, // anyhow::Error already contains the full context
        }
    }
}

// Type alias for Result using PlotError
pub type Result<T> = std::result::Result<T, PlotError>;
