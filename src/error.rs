//! Error types for graymap.
//!
//! Only environmental failures are reported here: allocation, malformed
//! files and I/O. Caller misuse (bad coordinates, rectangles that do not fit,
//! a zero maxval) panics at the call site instead.

use std::io;
use thiserror::Error;

/// Errors returned by fallible graymap operations.
#[derive(Debug, Error)]
pub enum GraymapError {
    /// A pixel buffer or blur accumulator could not be allocated.
    #[error("out of memory: cannot allocate {pixels} pixels")]
    Allocation {
        /// Number of elements requested.
        pixels: usize,
    },

    /// The input is not a valid 8-bit binary graymap.
    #[error("invalid file format: {0}")]
    Format(String),

    /// Opening, reading or writing a file failed.
    #[error("{context}: {source}")]
    Io {
        /// Which step failed.
        context: &'static str,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },
}

impl GraymapError {
    pub(crate) fn format(msg: impl Into<String>) -> Self {
        GraymapError::Format(msg.into())
    }

    pub(crate) fn io(context: &'static str) -> impl FnOnce(io::Error) -> Self {
        move |source| GraymapError::Io { context, source }
    }

    /// The OS error code preserved from the failing system call, if any.
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            GraymapError::Io { source, .. } => source.raw_os_error(),
            _ => None,
        }
    }
}

/// Result type for graymap operations.
pub type Result<T> = std::result::Result<T, GraymapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_keeps_os_code() {
        let err = GraymapError::io("open failed")(io::Error::from_raw_os_error(2));
        assert_eq!(err.raw_os_error(), Some(2));
        assert!(err.to_string().starts_with("open failed: "));
    }

    #[test]
    fn test_format_error_has_no_os_code() {
        let err = GraymapError::format("invalid maxval");
        assert_eq!(err.raw_os_error(), None);
        assert_eq!(err.to_string(), "invalid file format: invalid maxval");
    }
}
