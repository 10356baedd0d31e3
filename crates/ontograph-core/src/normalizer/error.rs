//! Normal-form file error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors reading or writing normal-form files.
#[derive(Debug, Error)]
pub enum NormalFormError {
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl NormalFormError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        NormalFormError::Io {
            path: path.into(),
            source,
        }
    }
}
