//! Projection driver error types.

use thiserror::Error;

use super::config::RECOGNIZED_OPTIONS;

/// Caller errors at the projection driver boundary.
///
/// Both are raised before any axiom is visited.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectionError {
    /// No strategy is registered under this name.
    #[error("Unknown projection strategy: {0}")]
    UnknownStrategy(String),

    /// An option has the wrong type or is not recognized.
    #[error("{message}")]
    InvalidConfiguration { parameter: String, message: String },
}

impl ProjectionError {
    pub fn type_mismatch(parameter: &str, expected: &str) -> Self {
        ProjectionError::InvalidConfiguration {
            parameter: parameter.to_string(),
            message: format!(
                "Optional parameter {} must be of type {}",
                parameter, expected
            ),
        }
    }

    pub fn unrecognized(parameter: &str) -> Self {
        ProjectionError::InvalidConfiguration {
            parameter: parameter.to_string(),
            message: format!(
                "Unknown parameter {}; recognized parameters are {}",
                parameter,
                RECOGNIZED_OPTIONS.join(", ")
            ),
        }
    }
}
