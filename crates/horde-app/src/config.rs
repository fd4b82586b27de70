//! Engine config loading and validation.

use std::fs;
use std::path::Path;

use tracing::info;

use horde_sim::EngineConfig;

use crate::error::ConfigError;

/// Read `path` as JSON, or fall back to defaults when no path is given.
/// Missing fields take their default values.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig, ConfigError> {
    let config = match path {
        Some(path) => {
            let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            let config: EngineConfig =
                serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
                    path: path.to_path_buf(),
                    source,
                })?;
            info!(path = %path.display(), "loaded engine config");
            config
        }
        None => EngineConfig::default(),
    };
    validate(&config)?;
    Ok(config)
}

/// Reject configs the engine cannot run sensibly.
pub fn validate(config: &EngineConfig) -> Result<(), ConfigError> {
    let world = &config.world;
    if !(world.width.is_finite() && world.height.is_finite()) || world.width <= 0.0 || world.height <= 0.0 {
        return Err(invalid(format!(
            "world must have a positive size, got {}x{}",
            world.width, world.height
        )));
    }
    if !config.time_scale.is_finite() || !(0.0..=4.0).contains(&config.time_scale) {
        return Err(invalid(format!(
            "time_scale must be within 0..=4, got {}",
            config.time_scale
        )));
    }

    let formation = &config.formation;
    if formation.min_members < 1 {
        return Err(invalid("formation.min_members must be at least 1".into()));
    }
    if formation.min_form_size < 3 {
        return Err(invalid(format!(
            "formation.min_form_size must be at least 3, got {}",
            formation.min_form_size
        )));
    }
    if formation.sample_size == 0 {
        return Err(invalid("formation.sample_size must be positive".into()));
    }
    if !(formation.proximity.is_finite() && formation.proximity > 0.0) {
        return Err(invalid("formation.proximity must be positive".into()));
    }

    let waves = &config.waves;
    if waves.first_wave == 0 {
        return Err(invalid("waves.first_wave starts at 1".into()));
    }
    if !(waves.base_spawn_delay.is_finite() && waves.base_spawn_delay > 0.0) {
        return Err(invalid("waves.base_spawn_delay must be positive".into()));
    }
    if waves.hp_scale < 0.0 || waves.attack_scale < 0.0 {
        return Err(invalid("wave scaling cannot be negative".into()));
    }
    Ok(())
}

fn invalid(message: String) -> ConfigError {
    ConfigError::Invalid(message)
}
