//! Expression model error types.

use thiserror::Error;

/// Errors raised while building or validating class expressions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpressionError {
    /// A restriction lacks its relation or filler, or a side of a rendered
    /// axiom could not be read back.
    #[error("Malformed expression: {0}")]
    MalformedExpression(String),
}

impl ExpressionError {
    pub fn malformed(message: impl Into<String>) -> Self {
        ExpressionError::MalformedExpression(message.into())
    }
}
