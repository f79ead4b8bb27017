use thiserror::Error;

/// Errors originating from the core module.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Invalid configuration value or structure.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Invalid matrix or canvas dimensions.
    #[error("invalid dimensions: {rows}×{cols}")]
    InvalidDimensions {
        /// Row count (input dimension).
        rows: usize,
        /// Column count (output dimension).
        cols: usize,
    },
}
