//! Error types for terra-select core systems.

/// The main error type for core operations.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A control was created outside of a Tokio runtime.
    #[error("No Tokio runtime is available; controls must be mounted inside a runtime")]
    NoRuntime,
    /// Timer-related error.
    #[error("Timer error: {0}")]
    Timer(#[from] TimerError),
    /// Signal-related error.
    #[error("Signal error: {0}")]
    Signal(#[from] SignalError),
}

/// Timer-specific errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimerError {
    /// The timer ID is stale: the commit was cancelled, replaced or already taken.
    #[error("Invalid or expired timer ID")]
    InvalidTimerId,
}

/// Signal-specific errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignalError {
    /// The connection ID is invalid or has already been disconnected.
    #[error("Invalid or disconnected connection ID")]
    InvalidConnection,
    /// The signal has been dropped and is no longer available.
    #[error("Signal has been dropped")]
    SignalDropped,
}

/// A specialized Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::from(TimerError::InvalidTimerId);
        assert_eq!(err.to_string(), "Timer error: Invalid or expired timer ID");

        let err = CoreError::from(SignalError::SignalDropped);
        assert_eq!(err.to_string(), "Signal error: Signal has been dropped");
    }

    #[test]
    fn test_error_source() {
        use std::error::Error;

        let err = CoreError::from(SignalError::InvalidConnection);
        assert!(err.source().is_some());
        assert!(CoreError::NoRuntime.source().is_none());
    }
}
