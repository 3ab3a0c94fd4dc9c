//! Configuration and preset management for audfx filter chains.
//!
//! Filter chains can be described in TOML presets, validated as a whole,
//! and applied to any upstream [`audfx_core::Factory`].
//!
//! # Features
//!
//! - **Preset System**: Load and save filter presets from TOML files
//! - **Filter Chains**: Turn presets into nested filter factories
//! - **Validation**: Check filter types, parameter names and ranges
//! - **Factory Presets**: Built-in presets for common filter setups
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use audfx_config::{FilterChain, FilterConfig, Preset};
//! use audfx_core::{BufferFactory, Specs};
//!
//! // Load a preset from file
//! let preset = Preset::load("telephone.toml").unwrap();
//!
//! // Or build one programmatically
//! let preset = Preset::new("Hum Removal")
//!     .with_description("Notch out mains hum and its first harmonic")
//!     .with_filter(FilterConfig::new("notch").with_param("frequency", "50Hz").with_param("q", "10"))
//!     .with_filter(FilterConfig::new("notch").with_param("frequency", "100Hz").with_param("q", "10"));
//! preset.save("hum_removal.toml").unwrap();
//!
//! // Apply it to a source
//! let source = Arc::new(BufferFactory::new(vec![0.0; 4800], Specs::new(48000.0, 1)));
//! let filtered = FilterChain::from_preset(&preset).unwrap().apply(source);
//! ```

mod chain;
mod error;
mod filter_config;
mod preset;

/// Filter and preset validation.
pub mod validation;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use chain::{FilterChain, FilterStage};
pub use error::ConfigError;
pub use factory_presets::{
    FACTORY_PRESET_NAMES, factory_preset_names, factory_presets, get_factory_preset,
    is_factory_preset, load_factory_preset,
};
pub use filter_config::{FilterConfig, parse_param_value};
pub use preset::Preset;
pub use validation::{
    FILTER_PARAMS, ParamValidationInfo, ValidationError, ValidationResult, param_info,
    validate_filter, validate_filter_config, validate_filter_param, validate_preset,
};
