//! Error types for filter construction and streaming.

use crate::specs::Specs;

/// Errors raised while building filters or pulling samples through them.
///
/// The type is `Clone` so a failed reader can hand the same error back on
/// every subsequent call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A design parameter or coefficient is out of range.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// Description of why the value was rejected.
        reason: String,
    },

    /// Coefficients were requested for a sample rate that is not a positive finite number.
    #[error("invalid sample rate: {0} Hz")]
    InvalidSampleRate(f64),

    /// An upstream reader delivered data in a format that cannot be filtered.
    #[error("invalid stream specs: {0}")]
    InvalidSpecs(Specs),

    /// The wrapped factory could not produce a reader.
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The wrapped reader failed while producing samples.
    #[error("upstream read failed: {0}")]
    UpstreamReadFailure(String),

    /// The recursion produced a NaN or infinite sample.
    #[error("non-finite filter output on channel {channel}")]
    NumericInstability {
        /// Channel whose output went non-finite.
        channel: usize,
    },
}

impl Error {
    /// Create an invalid parameter error.
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Convert an error raised while creating an upstream reader into
    /// [`Error::UpstreamUnavailable`], leaving an existing one untouched.
    pub fn into_upstream_unavailable(self) -> Self {
        match self {
            err @ Error::UpstreamUnavailable(_) => err,
            other => Error::UpstreamUnavailable(other.to_string()),
        }
    }
}

/// Convenience result type for filter operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_parameter_display() {
        let err = Error::invalid_parameter("q", "must be positive, got -1");
        assert_eq!(err.to_string(), "invalid parameter 'q': must be positive, got -1");
    }

    #[test]
    fn invalid_specs_display_includes_format() {
        let err = Error::InvalidSpecs(Specs::new(0.0, 2));
        let msg = err.to_string();
        assert!(msg.contains("0 Hz"), "got: {msg}");
        assert!(msg.contains("2 channels"), "got: {msg}");
    }

    #[test]
    fn upstream_unavailable_is_not_rewrapped() {
        let err = Error::UpstreamUnavailable("gone".to_string()).into_upstream_unavailable();
        assert_eq!(err, Error::UpstreamUnavailable("gone".to_string()));
    }

    #[test]
    fn other_errors_become_upstream_unavailable() {
        let err = Error::InvalidSampleRate(-1.0).into_upstream_unavailable();
        assert_eq!(
            err,
            Error::UpstreamUnavailable("invalid sample rate: -1 Hz".to_string())
        );
    }
}
