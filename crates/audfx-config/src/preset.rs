//! Preset file format and operations.

use serde::{Deserialize, Serialize};
use std::path::Path;

use audfx_core::Specs;

use crate::error::ConfigError;
use crate::filter_config::FilterConfig;

/// Preset file format for filter chains.
///
/// Presets are stored as TOML files containing an ordered list of filters
/// with their parameters. The first filter listed sits closest to the source.
///
/// # TOML Format
///
/// ```toml
/// name = "Telephone"
/// description = "Narrow voice band"
/// sample_rate = 8000
///
/// [[filters]]
/// type = "highpass"
/// [filters.params]
/// frequency = "300Hz"
///
/// [[filters]]
/// type = "lowpass"
/// [filters.params]
/// frequency = "3.4kHz"
/// q = "0.707"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Sample rate the preset was tuned at (defaults to 48000).
    ///
    /// Metadata only: filters built from the preset always design their
    /// coefficients for the rate of the stream they read. Use
    /// [`Preset::specs`] to build a source at this rate.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Filters in chain order.
    #[serde(default)]
    pub filters: Vec<FilterConfig>,
}

fn default_sample_rate() -> u32 {
    48000
}

impl Preset {
    /// Create a new empty preset.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            sample_rate: default_sample_rate(),
            filters: Vec::new(),
        }
    }

    /// Create a preset with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the sample rate hint.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Stream layout at the preset's sample rate with `channels` channels.
    pub fn specs(&self, channels: usize) -> Specs {
        Specs::new(f64::from(self.sample_rate), channels)
    }

    /// Append a filter to the preset.
    pub fn with_filter(mut self, filter: FilterConfig) -> Self {
        self.filters.push(filter);
        self
    }

    /// Append several filters to the preset.
    pub fn with_filters(mut self, filters: impl IntoIterator<Item = FilterConfig>) -> Self {
        self.filters.extend(filters);
        self
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let preset = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), name = %preset.name, "loaded preset");
        Ok(preset)
    }

    /// Load a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file, creating parent directories as needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        tracing::debug!(path = %path.display(), name = %self.name, "saved preset");
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Number of filters in the preset.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Returns true if the preset has no filters.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Get a filter by index.
    pub fn get(&self, index: usize) -> Option<&FilterConfig> {
        self.filters.get(index)
    }

    /// Iterate over filters in chain order.
    pub fn iter(&self) -> impl Iterator<Item = &FilterConfig> {
        self.filters.iter()
    }

    /// Filter types, with `!` prefix for bypassed filters.
    pub fn filter_types(&self) -> Vec<String> {
        self.filters.iter().map(FilterConfig::display_type).collect()
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_preset() {
        let preset = Preset::new("Test");
        assert_eq!(preset.name, "Test");
        assert!(preset.description.is_none());
        assert_eq!(preset.sample_rate, 48000);
        assert!(preset.is_empty());
        assert_eq!(Preset::default().name, "Untitled");
    }

    #[test]
    fn builder() {
        let preset = Preset::new("Voice")
            .with_description("Voice band")
            .with_sample_rate(16000)
            .with_filter(FilterConfig::new("highpass").with_param("frequency", "100"))
            .with_filters([FilterConfig::new("!notch"), FilterConfig::new("lowpass")]);

        assert_eq!(preset.description.as_deref(), Some("Voice band"));
        assert_eq!(preset.sample_rate, 16000);
        assert_eq!(preset.specs(2), Specs::new(16000.0, 2));
        assert_eq!(preset.len(), 3);
        assert_eq!(preset.get(0).unwrap().filter_type, "highpass");
        assert_eq!(preset.filter_types(), vec!["highpass", "!notch", "lowpass"]);
    }

    #[test]
    fn from_toml() {
        let toml = r#"
name = "Test"
description = "A test preset"
sample_rate = 44100

[[filters]]
type = "lowpass"
[filters.params]
frequency = "2kHz"
q = "0.707"

[[filters]]
type = "notch"
bypassed = true
[filters.params]
frequency = "60"
"#;

        let preset = Preset::from_toml(toml).unwrap();
        assert_eq!(preset.name, "Test");
        assert_eq!(preset.sample_rate, 44100);
        assert_eq!(preset.len(), 2);

        let lowpass = &preset.filters[0];
        assert_eq!(lowpass.filter_type, "lowpass");
        assert!(!lowpass.bypassed);
        assert_eq!(lowpass.parse_param("frequency"), Some(2000.0));

        let notch = &preset.filters[1];
        assert!(notch.bypassed);
        assert_eq!(notch.get_param("frequency"), Some("60"));
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let preset = Preset::from_toml("name = \"Minimal\"").unwrap();
        assert_eq!(preset.name, "Minimal");
        assert_eq!(preset.sample_rate, 48000);
        assert!(preset.is_empty());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(
            Preset::from_toml("name = "),
            Err(ConfigError::TomlParse(_))
        ));
        assert!(matches!(
            Preset::from_toml("description = \"no name\""),
            Err(ConfigError::TomlParse(_))
        ));
    }

    #[test]
    fn to_toml_then_back() {
        let original = Preset::new("Roundtrip")
            .with_description("Serialization")
            .with_sample_rate(96000)
            .with_filter(
                FilterConfig::new("bandpass")
                    .with_param("frequency", "1kHz")
                    .with_param("q", "4"),
            )
            .with_filter(FilterConfig::new("!highpass").with_param("frequency", "20"));

        let toml = original.to_toml().unwrap();
        assert!(toml.contains("name = \"Roundtrip\""));
        assert!(toml.contains("type = \"bandpass\""));
        assert_eq!(Preset::from_toml(&toml).unwrap(), original);
    }

    #[test]
    fn load_missing_file() {
        let err = Preset::load("/nonexistent/audfx/preset.toml").unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }
}
