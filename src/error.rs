use thiserror::Error;

/// Errors surfaced by the projector / translator pair.
///
/// Nothing here is recovered locally: either all three branch probabilities
/// are produced or the call fails.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TryWpError {
    #[error("invalid input for `{field}`: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("model invocation failed: {0}")]
    ModelInvocation(String),

    #[error("feature schema mismatch: model expects {expected:?}, got {found:?}")]
    SchemaMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },
}

impl TryWpError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        TryWpError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TryWpError>;
