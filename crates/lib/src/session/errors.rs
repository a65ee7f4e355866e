//! Session-specific error types.

use thiserror::Error;

/// Errors raised by the per-session request guard.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// A request is already outstanding for this session
    #[error("A request is already pending for this session")]
    RequestPending,
}

impl SessionError {
    /// Check if this error is caused by an outstanding request.
    pub fn is_request_pending(&self) -> bool {
        matches!(self, SessionError::RequestPending)
    }
}

// Conversion from SessionError to the main Error type
impl From<SessionError> for crate::Error {
    fn from(err: SessionError) -> Self {
        crate::Error::Session(err)
    }
}
