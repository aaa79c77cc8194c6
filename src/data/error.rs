use thiserror::Error;

/// Failures raised by the analysis pipeline.
///
/// Loader and I/O problems go through `anyhow` instead; these variants are the
/// named, recoverable conditions the UI reports next to the affected table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("required column '{0}' is missing from the sheet")]
    MissingColumn(String),

    #[error("no rows matched the current selection")]
    EmptyDataset,

    #[error("zero-width interpolation bracket at depth {depth} m")]
    InvalidBracket { depth: f64 },

    #[error("row has no numeric value for '{0}'")]
    MissingField(String),
}
