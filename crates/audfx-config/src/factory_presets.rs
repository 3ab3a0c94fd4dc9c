//! Factory presets bundled with the audfx library.
//!
//! Built-in presets that are always available without external files. They
//! cover common corrective and creative filter setups and serve as starting
//! points for user presets.

use crate::Preset;
use crate::error::ConfigError;

/// Names of the factory presets.
pub static FACTORY_PRESET_NAMES: &[&str] = &["telephone", "muffled", "rumble_cut"];

/// TOML content for factory presets, embedded at compile time.
static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("telephone", TELEPHONE_PRESET),
    ("muffled", MUFFLED_PRESET),
    ("rumble_cut", RUMBLE_CUT_PRESET),
];

/// Telephone preset - narrow voice band.
const TELEPHONE_PRESET: &str = r#"
name = "Telephone"
description = "Narrow 300 Hz - 3.4 kHz voice band"
sample_rate = 8000

[[filters]]
type = "highpass"
[filters.params]
frequency = "300Hz"
q = "0.707"

[[filters]]
type = "lowpass"
[filters.params]
frequency = "3.4kHz"
q = "0.707"
"#;

/// Muffled preset - sound through a wall.
const MUFFLED_PRESET: &str = r#"
name = "Muffled"
description = "Heavy lowpass, as heard through a wall"
sample_rate = 48000

[[filters]]
type = "lowpass"
[filters.params]
frequency = "800Hz"
q = "0.5"
"#;

/// Rumble cut preset - remove low-frequency noise.
const RUMBLE_CUT_PRESET: &str = r#"
name = "Rumble Cut"
description = "Steep cut below 80 Hz with an optional mains hum notch"
sample_rate = 48000

[[filters]]
type = "highpass"
[filters.params]
frequency = "80Hz"
q = "0.707"

[[filters]]
type = "highpass"
[filters.params]
frequency = "80Hz"
q = "0.707"

[[filters]]
type = "notch"
bypassed = true
[filters.params]
frequency = "50Hz"
q = "10"
"#;

/// Get all factory presets.
///
/// # Example
///
/// ```rust
/// use audfx_config::factory_presets;
///
/// for preset in factory_presets() {
///     println!("{}: {}", preset.name, preset.filters.len());
/// }
/// ```
pub fn factory_presets() -> Vec<Preset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| Preset::from_toml(toml).ok())
        .collect()
}

/// Get a factory preset by name.
///
/// Matches either the internal name (`rumble_cut`) or the display name
/// (`Rumble Cut`), case-insensitively.
///
/// # Example
///
/// ```rust
/// use audfx_config::get_factory_preset;
///
/// let preset = get_factory_preset("telephone").unwrap();
/// assert_eq!(preset.name, "Telephone");
/// ```
pub fn get_factory_preset(name: &str) -> Option<Preset> {
    let name_lower = name.to_lowercase();

    if let Some((_, toml)) = FACTORY_PRESETS_TOML
        .iter()
        .find(|(preset_name, _)| preset_name.to_lowercase() == name_lower)
    {
        return Preset::from_toml(toml).ok();
    }

    factory_presets()
        .into_iter()
        .find(|preset| preset.name.to_lowercase() == name_lower)
}

/// Load a factory preset by name, failing if there is none.
///
/// Same matching rules as [`get_factory_preset`].
///
/// # Errors
///
/// Returns [`ConfigError::PresetNotFound`] when no factory preset matches.
pub fn load_factory_preset(name: &str) -> Result<Preset, ConfigError> {
    get_factory_preset(name).ok_or_else(|| ConfigError::PresetNotFound(name.to_string()))
}

/// Get the names of all factory presets.
pub fn factory_preset_names() -> Vec<&'static str> {
    FACTORY_PRESETS_TOML.iter().map(|(name, _)| *name).collect()
}

/// Check if a preset name is a factory preset (case-insensitive).
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_preset;

    #[test]
    fn every_factory_preset_parses_and_validates() {
        let presets = factory_presets();
        assert_eq!(presets.len(), FACTORY_PRESET_NAMES.len());
        for preset in &presets {
            assert!(!preset.is_empty(), "{} has no filters", preset.name);
            validate_preset(preset).unwrap_or_else(|e| panic!("{}: {e}", preset.name));
        }
    }

    #[test]
    fn names_match_table() {
        assert_eq!(factory_preset_names(), FACTORY_PRESET_NAMES);
    }

    #[test]
    fn lookup_by_either_name() {
        assert_eq!(get_factory_preset("rumble_cut").unwrap().name, "Rumble Cut");
        assert_eq!(get_factory_preset("Rumble Cut").unwrap().name, "Rumble Cut");
        assert_eq!(get_factory_preset("MUFFLED").unwrap().name, "Muffled");
        assert!(get_factory_preset("radio").is_none());
    }

    #[test]
    fn load_reports_missing_preset() {
        assert_eq!(load_factory_preset("Telephone").unwrap().name, "Telephone");
        match load_factory_preset("radio") {
            Err(ConfigError::PresetNotFound(name)) => assert_eq!(name, "radio"),
            other => panic!("expected PresetNotFound, got {other:?}"),
        }
    }

    #[test]
    fn is_factory_preset_is_case_insensitive() {
        assert!(is_factory_preset("telephone"));
        assert!(is_factory_preset("Telephone"));
        assert!(!is_factory_preset("my_preset"));
    }

    #[test]
    fn rumble_cut_notch_is_bypassed() {
        let preset = get_factory_preset("rumble_cut").unwrap();
        assert_eq!(preset.filter_types(), vec!["highpass", "highpass", "!notch"]);
    }
}
