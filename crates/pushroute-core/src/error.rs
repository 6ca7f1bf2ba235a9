//! Shared error type across pushroute crates.

use thiserror::Error;

/// Stable error codes (used in logs and metrics labels).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Envelope or entity payload could not be decoded.
    Decode,
    /// Unsupported config/protocol version.
    UnsupportedVersion,
    /// Configuration rejected by strict parsing or validation.
    InvalidConfig,
    /// A center failed while handling a dispatched payload.
    Handler,
    /// Internal failure (pool, runtime).
    Internal,
}

impl ErrorCode {
    /// String representation used in logs and metric labels.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Decode => "DECODE",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::InvalidConfig => "INVALID_CONFIG",
            ErrorCode::Handler => "HANDLER",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, PushError>;

/// Unified error type used by core and dispatch.
#[derive(Debug, Error)]
pub enum PushError {
    #[error("decode failed: {0}")]
    Decode(String),
    #[error("unsupported version")]
    UnsupportedVersion,
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("handler failed ({center}): {msg}")]
    Handler { center: &'static str, msg: String },
    #[error("internal: {0}")]
    Internal(String),
}

impl PushError {
    /// Map an error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            PushError::Decode(_) => ErrorCode::Decode,
            PushError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            PushError::InvalidConfig(_) => ErrorCode::InvalidConfig,
            PushError::Handler { .. } => ErrorCode::Handler,
            PushError::Internal(_) => ErrorCode::Internal,
        }
    }

    /// Convenience constructor for center implementations.
    pub fn handler(center: &'static str, msg: impl Into<String>) -> Self {
        PushError::Handler {
            center,
            msg: msg.into(),
        }
    }
}
