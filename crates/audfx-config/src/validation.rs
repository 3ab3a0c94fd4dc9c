//! Filter and preset validation.
//!
//! Checks filter types, parameter names and parameter values before any
//! factory is built, so a bad preset is rejected as a whole with every
//! problem listed.
//!
//! # Example
//!
//! ```rust
//! use audfx_config::{FilterConfig, validate_filter, validate_filter_config};
//!
//! assert!(validate_filter("lowpass").is_ok());
//! assert!(validate_filter("comb").is_err());
//!
//! let config = FilterConfig::new("notch").with_param("frequency", "50Hz");
//! let (family, spec) = validate_filter_config(&config).unwrap();
//! assert_eq!(family.name(), "notch");
//! assert_eq!(spec.frequency(), 50.0);
//! ```

use core::f64::consts::FRAC_1_SQRT_2;

use audfx_core::{FilterFamily, FilterSpec};
use thiserror::Error;

use crate::filter_config::{FilterConfig, parse_param_value};
use crate::preset::Preset;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Unknown filter type.
    #[error("unknown filter type: {0}")]
    UnknownFilter(String),

    /// Unknown parameter name.
    #[error("unknown parameter '{param}' for filter '{filter}'")]
    UnknownParameter {
        /// Filter type.
        filter: String,
        /// Name of the unrecognized parameter.
        param: String,
    },

    /// Required parameter not given.
    #[error("missing parameter '{param}' for filter '{filter}'")]
    MissingParameter {
        /// Filter type.
        filter: String,
        /// Name of the missing parameter.
        param: String,
    },

    /// Parameter value out of range.
    #[error("parameter '{param}' value {value} out of range ({min}, {max}]")]
    OutOfRange {
        /// Name of the parameter.
        param: String,
        /// The value that was out of range.
        value: f64,
        /// Exclusive lower bound.
        min: f64,
        /// Inclusive upper bound.
        max: f64,
    },

    /// Invalid parameter format.
    #[error("invalid format for parameter '{param}': {reason}")]
    InvalidFormat {
        /// Name of the parameter.
        param: String,
        /// Description of the format error.
        reason: String,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

impl ValidationError {
    /// Fold a non-empty list: one error stays as is, several become [`ValidationError::Multiple`].
    fn from_list(mut errors: Vec<ValidationError>) -> Self {
        if errors.len() == 1 {
            errors.remove(0)
        } else {
            ValidationError::Multiple(errors)
        }
    }
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Parameter metadata for validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamValidationInfo {
    /// Parameter name as written in presets.
    pub name: &'static str,
    /// Exclusive lower bound.
    pub min: f64,
    /// Inclusive upper bound.
    pub max: f64,
    /// Value used when the parameter is omitted; `None` if it is required.
    pub default: Option<f64>,
}

/// Parameters shared by every biquad family.
pub const FILTER_PARAMS: &[ParamValidationInfo] = &[
    ParamValidationInfo {
        name: "frequency",
        min: 0.0,
        max: 1_000_000.0,
        default: None,
    },
    ParamValidationInfo {
        name: "q",
        min: 0.0,
        max: 1000.0,
        default: Some(FRAC_1_SQRT_2),
    },
];

/// Look up parameter metadata by name.
pub fn param_info(name: &str) -> Option<&'static ParamValidationInfo> {
    FILTER_PARAMS.iter().find(|info| info.name == name)
}

/// Check that a filter type exists.
pub fn validate_filter(filter_type: &str) -> ValidationResult<FilterFamily> {
    FilterFamily::from_name(filter_type)
        .ok_or_else(|| ValidationError::UnknownFilter(filter_type.to_string()))
}

/// Parse and range-check a single parameter.
pub fn validate_filter_param(filter_type: &str, param: &str, value: &str) -> ValidationResult<f64> {
    let info = param_info(param).ok_or_else(|| ValidationError::UnknownParameter {
        filter: filter_type.to_string(),
        param: param.to_string(),
    })?;

    let parsed = parse_param_value(value).ok_or_else(|| ValidationError::InvalidFormat {
        param: param.to_string(),
        reason: format!("cannot parse '{value}' as a number"),
    })?;

    if !(parsed.is_finite() && parsed > info.min && parsed <= info.max) {
        return Err(ValidationError::OutOfRange {
            param: param.to_string(),
            value: parsed,
            min: info.min,
            max: info.max,
        });
    }
    Ok(parsed)
}

/// Validate a filter configuration and resolve it into design parameters.
///
/// Every problem in the configuration is reported, not just the first.
pub fn validate_filter_config(config: &FilterConfig) -> ValidationResult<(FilterFamily, FilterSpec)> {
    let filter_type = config.canonical_type();
    let family = validate_filter(filter_type)?;

    let value_of = |info: &ParamValidationInfo| match config.get_param(info.name) {
        Some(value) => validate_filter_param(filter_type, info.name, value),
        None => info.default.ok_or_else(|| ValidationError::MissingParameter {
            filter: filter_type.to_string(),
            param: info.name.to_string(),
        }),
    };
    let frequency = value_of(&FILTER_PARAMS[0]);
    let q = value_of(&FILTER_PARAMS[1]);

    let mut errors: Vec<ValidationError> = config
        .params
        .keys()
        .filter(|param| param_info(param).is_none())
        .map(|param| ValidationError::UnknownParameter {
            filter: filter_type.to_string(),
            param: param.clone(),
        })
        .collect();

    match (frequency, q) {
        (Ok(frequency), Ok(q)) if errors.is_empty() => FilterSpec::new(frequency, q)
            .map(|spec| (family, spec))
            .map_err(|err| match err {
                audfx_core::Error::InvalidParameter { name, reason } => {
                    ValidationError::InvalidFormat {
                        param: name.to_string(),
                        reason,
                    }
                }
                other => ValidationError::InvalidFormat {
                    param: FILTER_PARAMS[0].name.to_string(),
                    reason: other.to_string(),
                },
            }),
        (frequency, q) => {
            errors.extend(frequency.err());
            errors.extend(q.err());
            Err(ValidationError::from_list(errors))
        }
    }
}

/// Validate every filter of a preset.
pub fn validate_preset(preset: &Preset) -> ValidationResult<()> {
    let errors: Vec<ValidationError> = preset
        .filters
        .iter()
        .filter_map(|config| validate_filter_config(config).err())
        .collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::from_list(errors))
    }
}
