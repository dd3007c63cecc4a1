//! Error types for window construction.
//!
//! Configuration errors are reported at construction time, before a window
//! accepts its first value. Errors raised by aggregate or emit functions are
//! never wrapped here; they propagate as panics to whichever actor invoked
//! them (see the crate-level concurrency notes).

use thiserror::Error;

/// Error type for window configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
  /// Window size must be greater than zero.
  #[error("window size must be greater than zero")]
  ZeroWindowSize,
  /// Tick period must be greater than zero.
  #[error("tick period must be greater than zero")]
  ZeroPeriod,
}

/// Result type for window construction.
pub type WindowResult<T> = Result<T, WindowError>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_window_error_display() {
    let err = WindowError::ZeroWindowSize;
    assert!(err.to_string().contains("size must be greater than zero"));

    let err = WindowError::ZeroPeriod;
    assert!(err.to_string().contains("period must be greater than zero"));
  }
}
