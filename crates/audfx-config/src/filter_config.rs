//! Filter configuration types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration for a single filter in a preset.
///
/// Each filter has a type identifier and string parameters. Filters can be
/// bypassed by prefixing the type with `!` (e.g., `!notch`).
///
/// # Example
///
/// ```rust
/// use audfx_config::FilterConfig;
///
/// let config = FilterConfig::new("lowpass")
///     .with_param("frequency", "1.2kHz")
///     .with_param("q", "0.707");
///
/// assert_eq!(config.filter_type, "lowpass");
/// assert_eq!(config.parse_param("frequency"), Some(1200.0));
/// assert!(!config.bypassed);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilterConfig {
    /// Filter type name (e.g., "lowpass", "notch").
    /// Use `!` prefix to bypass (e.g., "!notch").
    #[serde(rename = "type")]
    pub filter_type: String,

    /// Whether the filter is bypassed.
    #[serde(default)]
    pub bypassed: bool,

    /// Filter parameters as key-value pairs.
    /// Values are strings so units can be spelled out ("1.2kHz", "50%").
    #[serde(default)]
    pub params: BTreeMap<String, String>,
}

impl FilterConfig {
    /// Create a new filter configuration.
    ///
    /// If the type starts with `!`, the filter will be marked as bypassed.
    pub fn new(filter_type: impl Into<String>) -> Self {
        let type_str = filter_type.into();
        let (filter_type, bypassed) = match type_str.strip_prefix('!') {
            Some(stripped) => (stripped.to_string(), true),
            None => (type_str, false),
        };

        Self {
            filter_type,
            bypassed,
            params: BTreeMap::new(),
        }
    }

    /// Add a parameter to the configuration.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Set whether the filter is bypassed.
    pub fn with_bypass(mut self, bypassed: bool) -> Self {
        self.bypassed = bypassed;
        self
    }

    /// Get a parameter value.
    pub fn get_param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Set a parameter value.
    pub fn set_param(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    /// Parse a parameter value with [`parse_param_value`].
    pub fn parse_param(&self, key: &str) -> Option<f64> {
        parse_param_value(self.params.get(key)?)
    }

    /// Filter type without the bypass prefix.
    pub fn canonical_type(&self) -> &str {
        &self.filter_type
    }

    /// Filter type for display (with `!` prefix if bypassed).
    pub fn display_type(&self) -> String {
        if self.bypassed {
            format!("!{}", self.filter_type)
        } else {
            self.filter_type.clone()
        }
    }
}

/// Parse a parameter value string into an f64.
///
/// Supports:
/// - Plain numbers: "1000", "0.707", "-3"
/// - Percentages: "50%" (divided by 100)
/// - Frequency in Hz: "440Hz"
/// - Frequency in kHz: "1.2kHz" (converted to Hz)
pub fn parse_param_value(value: &str) -> Option<f64> {
    let value = value.trim();

    if let Some(pct) = value.strip_suffix('%') {
        return pct.trim().parse::<f64>().ok().map(|v| v / 100.0);
    }

    if let Some(khz) = value
        .strip_suffix("kHz")
        .or_else(|| value.strip_suffix("khz"))
    {
        return khz.trim().parse::<f64>().ok().map(|v| v * 1000.0);
    }

    if let Some(hz) = value
        .strip_suffix("Hz")
        .or_else(|| value.strip_suffix("hz"))
    {
        return hz.trim().parse::<f64>().ok();
    }

    value.parse::<f64>().ok()
}
