//! Errors raised while reading or writing tables.

use std::path::PathBuf;

use pipeline::LeadRouterError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    /// A file could not be opened, read or created.
    #[error("Cannot access '{}': {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// A data line has more fields than the header.
    #[error("Line {line}: expected at most {expected} fields, found {found}")]
    TooManyFields {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// The table lacks required columns.
    #[error(transparent)]
    Schema(#[from] LeadRouterError),
}

impl TableError {
    pub(crate) fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::File {
            path: path.into(),
            source,
        }
    }
}
