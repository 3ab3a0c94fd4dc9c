//! Error types for configuration operations.

use std::path::PathBuf;
use thiserror::Error;

use crate::validation::ValidationError;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("failed to write file '{path}': {source}")]
    WriteFile {
        /// Path of the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create directory
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        /// Path of the directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Preset not found
    #[error("preset not found: {0}")]
    PresetNotFound(String),

    /// Unknown filter type
    #[error("unknown filter type: {0}")]
    UnknownFilter(String),

    /// Invalid parameter
    #[error("invalid parameter '{param}' for filter '{filter}': {reason}")]
    InvalidParameter {
        /// Filter type containing the invalid parameter.
        filter: String,
        /// Name of the invalid parameter.
        param: String,
        /// Description of why the parameter is invalid.
        reason: String,
    },

    /// Validation errors
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Filter construction rejected by the core crate
    #[error("filter error: {0}")]
    Filter(#[from] audfx_core::Error),
}

impl ConfigError {
    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a write file error.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// Create a create directory error.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::CreateDir {
            path: path.into(),
            source,
        }
    }

    /// Lift a validation error found in `filter`'s configuration.
    ///
    /// Unknown types and malformed values get their dedicated variants;
    /// everything else stays a [`ConfigError::Validation`].
    pub fn from_validation(filter: &str, err: ValidationError) -> Self {
        match err {
            ValidationError::UnknownFilter(name) => ConfigError::UnknownFilter(name),
            ValidationError::InvalidFormat { param, reason } => ConfigError::InvalidParameter {
                filter: filter.to_string(),
                param,
                reason,
            },
            other => ConfigError::Validation(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    fn mock_io_err() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::NotFound, "mock")
    }

    #[test]
    fn io_constructors_keep_path() {
        let err = ConfigError::read_file("/some/path", mock_io_err());
        assert!(
            matches!(err, ConfigError::ReadFile { ref path, .. } if path == std::path::Path::new("/some/path"))
        );
        let err = ConfigError::write_file("/out/path", mock_io_err());
        assert!(matches!(err, ConfigError::WriteFile { .. }));
        let err = ConfigError::create_dir("/dir/path", mock_io_err());
        assert!(matches!(err, ConfigError::CreateDir { .. }));
    }

    #[test]
    fn display_messages() {
        let msg = ConfigError::read_file("/a/b.toml", mock_io_err()).to_string();
        assert!(msg.contains("failed to read file"), "got: {msg}");
        assert!(msg.contains("/a/b.toml"), "got: {msg}");

        assert_eq!(
            ConfigError::PresetNotFound("radio".to_string()).to_string(),
            "preset not found: radio"
        );
        assert_eq!(
            ConfigError::UnknownFilter("comb".to_string()).to_string(),
            "unknown filter type: comb"
        );
        let err = ConfigError::InvalidParameter {
            filter: "lowpass".to_string(),
            param: "frequency".to_string(),
            reason: "not a number".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid parameter 'frequency' for filter 'lowpass': not a number"
        );
    }

    #[test]
    fn io_variants_expose_source() {
        assert!(ConfigError::read_file("/x", mock_io_err()).source().is_some());
        assert!(ConfigError::write_file("/x", mock_io_err()).source().is_some());
        assert!(ConfigError::create_dir("/x", mock_io_err()).source().is_some());
        assert!(ConfigError::PresetNotFound("p".to_string()).source().is_none());
    }

    #[test]
    fn core_errors_convert() {
        let err: ConfigError = audfx_core::Error::InvalidSampleRate(0.0).into();
        assert!(matches!(err, ConfigError::Filter(_)));
        assert!(err.to_string().starts_with("filter error:"));
    }

    #[test]
    fn validation_errors_are_lifted() {
        let err = ConfigError::from_validation(
            "lowpass",
            ValidationError::UnknownFilter("comb".to_string()),
        );
        assert!(matches!(err, ConfigError::UnknownFilter(ref name) if name == "comb"));

        let err = ConfigError::from_validation(
            "lowpass",
            ValidationError::InvalidFormat {
                param: "q".to_string(),
                reason: "not a number".to_string(),
            },
        );
        assert!(matches!(
            err,
            ConfigError::InvalidParameter { ref filter, ref param, .. } if filter == "lowpass" && param == "q"
        ));

        let err = ConfigError::from_validation(
            "notch",
            ValidationError::MissingParameter {
                filter: "notch".to_string(),
                param: "frequency".to_string(),
            },
        );
        assert!(matches!(err, ConfigError::Validation(_)));
    }
}
