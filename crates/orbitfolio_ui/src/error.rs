//! # UI Error Types
//!
//! Only loading is fallible. Once a config and a timeline are in memory,
//! nothing in the frame loop returns an error.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading configuration or timeline data.
#[derive(Error, Debug)]
pub enum UiError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The TOML document did not parse or did not match the schema.
    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value parsed but is outside its allowed range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Two timeline items share the same id.
    #[error("duplicate timeline item id: {0}")]
    DuplicateItemId(u32),
}

/// Result type for loading operations.
pub type UiResult<T> = Result<T, UiError>;
