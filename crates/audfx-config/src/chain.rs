//! Filter chain management.
//!
//! A [`FilterChain`] is the validated, ready-to-build form of a preset: an
//! ordered list of filter stages, each with its family, design parameters and
//! bypass flag. [`FilterChain::apply`] wraps any upstream factory in the
//! active stages.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use audfx_config::{FilterChain, FilterConfig, Preset};
//! use audfx_core::{Factory, SineFactory, Specs, render};
//!
//! let preset = Preset::new("Band")
//!     .with_filter(FilterConfig::new("highpass").with_param("frequency", "100Hz"))
//!     .with_filter(FilterConfig::new("lowpass").with_param("frequency", "5kHz"));
//!
//! let chain = FilterChain::from_preset(&preset).unwrap();
//! let tone = Arc::new(SineFactory::new(1000.0, Specs::new(48000.0, 2), 4800));
//! let filtered = chain.apply(tone);
//!
//! let mut reader = filtered.create_reader().unwrap();
//! let samples = render(reader.as_mut(), 256).unwrap();
//! assert_eq!(samples.len(), 4800 * 2);
//! ```

use std::sync::Arc;

use audfx_core::{BiquadCalculator, Factory, FilterFamily, FilterSpec, IirFilterFactory};

use crate::error::ConfigError;
use crate::filter_config::FilterConfig;
use crate::preset::Preset;
use crate::validation::validate_filter_config;

/// One stage of a [`FilterChain`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterStage {
    /// Filter family.
    pub family: FilterFamily,
    /// Design parameters.
    pub spec: FilterSpec,
    /// Whether the stage is skipped when the chain is applied.
    pub bypassed: bool,
}

impl FilterStage {
    /// Stage type for display (with `!` prefix if bypassed).
    pub fn display_type(&self) -> String {
        if self.bypassed {
            format!("!{}", self.family.name())
        } else {
            self.family.name().to_string()
        }
    }

    /// Convert back to a preset entry.
    pub fn to_config(&self) -> FilterConfig {
        FilterConfig::new(self.family.name())
            .with_bypass(self.bypassed)
            .with_param("frequency", self.spec.frequency().to_string())
            .with_param("q", self.spec.q().to_string())
    }
}

/// An ordered, validated list of filter stages.
///
/// The first stage sits closest to the source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterChain {
    stages: Vec<FilterStage>,
}

impl FilterChain {
    /// Create a new empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a chain from a preset.
    ///
    /// # Errors
    ///
    /// Returns the first invalid filter's error: [`ConfigError::UnknownFilter`],
    /// [`ConfigError::InvalidParameter`] or [`ConfigError::Validation`].
    pub fn from_preset(preset: &Preset) -> Result<Self, ConfigError> {
        let mut chain = Self::new();
        for config in &preset.filters {
            chain.add_filter_config(config)?;
        }
        tracing::debug!(preset = %preset.name, stages = chain.len(), "built filter chain");
        Ok(chain)
    }

    /// Validate a filter configuration and append it.
    pub fn add_filter_config(&mut self, config: &FilterConfig) -> Result<(), ConfigError> {
        let (family, spec) = validate_filter_config(config)
            .map_err(|err| ConfigError::from_validation(config.canonical_type(), err))?;
        self.push(family, spec, config.bypassed);
        Ok(())
    }

    /// Append a biquad stage by family name.
    ///
    /// Use a `!` prefix to add it bypassed.
    pub fn add_filter(&mut self, filter_type: &str, frequency: f64, q: f64) -> Result<(), ConfigError> {
        let config = FilterConfig::new(filter_type);
        let family = FilterFamily::from_name(config.canonical_type())
            .ok_or_else(|| ConfigError::UnknownFilter(config.canonical_type().to_string()))?;
        let spec = FilterSpec::new(frequency, q)?;
        self.push(family, spec, config.bypassed);
        Ok(())
    }

    /// Append an already-validated stage.
    pub fn push(&mut self, family: FilterFamily, spec: FilterSpec, bypassed: bool) {
        self.stages.push(FilterStage {
            family,
            spec,
            bypassed,
        });
    }

    /// Number of stages, bypassed ones included.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Returns true if the chain has no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// All stages in order.
    pub fn stages(&self) -> &[FilterStage] {
        &self.stages
    }

    /// Number of stages that will be applied.
    pub fn active_len(&self) -> usize {
        self.stages.iter().filter(|stage| !stage.bypassed).count()
    }

    /// Stage types in the chain (with `!` prefix for bypassed).
    pub fn filter_types(&self) -> Vec<String> {
        self.stages.iter().map(FilterStage::display_type).collect()
    }

    /// Check if the stage at `index` is bypassed.
    pub fn is_bypassed(&self, index: usize) -> Option<bool> {
        self.stages.get(index).map(|stage| stage.bypassed)
    }

    /// Set the bypass state of the stage at `index`. Returns false if out of range.
    pub fn set_bypassed(&mut self, index: usize, bypassed: bool) -> bool {
        match self.stages.get_mut(index) {
            Some(stage) => {
                stage.bypassed = bypassed;
                true
            }
            None => false,
        }
    }

    /// Toggle bypass for the stage at `index`, returning the new state.
    pub fn toggle_bypass(&mut self, index: usize) -> Option<bool> {
        self.stages.get_mut(index).map(|stage| {
            stage.bypassed = !stage.bypassed;
            stage.bypassed
        })
    }

    /// Remove the stage at `index`.
    pub fn remove(&mut self, index: usize) -> Option<FilterStage> {
        (index < self.stages.len()).then(|| self.stages.remove(index))
    }

    /// Remove all stages.
    pub fn clear(&mut self) {
        self.stages.clear();
    }

    /// Wrap `upstream` in every active stage, in order.
    ///
    /// Returns the outermost factory; with no active stages that is
    /// `upstream` itself.
    pub fn apply(&self, upstream: Arc<dyn Factory>) -> Arc<dyn Factory> {
        self.stages
            .iter()
            .filter(|stage| !stage.bypassed)
            .fold(upstream, |inner, stage| {
                tracing::trace!(
                    filter = stage.family.name(),
                    frequency = stage.spec.frequency(),
                    q = stage.spec.q(),
                    "wrapping filter stage"
                );
                let calculator = BiquadCalculator::new(stage.family, stage.spec);
                let outer: Arc<dyn Factory> =
                    Arc::new(IirFilterFactory::new(inner, Arc::new(calculator)));
                outer
            })
    }

    /// Convert the chain into a preset named `name`.
    pub fn to_preset(&self, name: impl Into<String>) -> Preset {
        Preset::new(name).with_filters(self.stages.iter().map(FilterStage::to_config))
    }
}
