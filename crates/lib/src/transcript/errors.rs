//! Transcript-specific error types.

use thiserror::Error;

/// Errors that can occur when submitting a message.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// The user submitted an empty or absent message
    #[error("No Message")]
    EmptyInput,
}

impl SubmitError {
    /// Check if this error is an empty-input rejection.
    pub fn is_empty_input(&self) -> bool {
        matches!(self, SubmitError::EmptyInput)
    }
}

// Conversion from SubmitError to the main Error type
impl From<SubmitError> for crate::Error {
    fn from(err: SubmitError) -> Self {
        crate::Error::Submit(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_conversion() {
        let err: crate::Error = SubmitError::EmptyInput.into();
        assert!(err.is_empty_input());
        assert!(err.is_validation_error());
        assert_eq!(err.module(), "transcript");
        assert_eq!(err.to_string(), "No Message");
    }
}
