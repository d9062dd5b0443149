use thiserror::Error;

// ---------------------------------------------------------------------------
// Error kinds surfaced by the converter
// ---------------------------------------------------------------------------

/// Every fatal condition the pipeline can hit.
///
/// Data cells that fail to parse are *not* errors: they become missing values
/// in [`Series`](crate::data::model::Series). Option values in the header, on
/// the other hand, must parse or the run aborts with [`ChartError::Value`].
#[derive(Debug, Error)]
pub enum ChartError {
    /// Bad command line: missing input, identical paths, empty output path.
    #[error("{0}")]
    Usage(String),

    /// Malformed options header or CSV body shape.
    #[error("line {line}: {message}")]
    Format { line: usize, message: String },

    /// An option value that is neither quoted, boolean nor numeric.
    #[error("option `{key}`: cannot interpret `{value}` as a boolean or number")]
    Value { key: String, value: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Drawing the chart failed inside the plotting backend.
    #[error("rendering chart: {0}")]
    Render(String),

    /// Converting the rendered SVG to PDF failed.
    #[error("converting chart to PDF: {0}")]
    Pdf(String),
}

impl ChartError {
    pub fn usage(message: impl Into<String>) -> Self {
        ChartError::Usage(message.into())
    }

    pub fn format(line: usize, message: impl Into<String>) -> Self {
        ChartError::Format {
            line,
            message: message.into(),
        }
    }
}

pub type Result<T, E = ChartError> = std::result::Result<T, E>;
