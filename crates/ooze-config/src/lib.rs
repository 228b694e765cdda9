//! Loads the optional `config.toml` that overrides the built-in constants.
//!
//! The file is read once at startup. A missing file means defaults; a file
//! that fails to parse or validate is an error.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use ooze_core::FxConfig;
use thiserror::Error;
use tracing::{debug, info};

const CONFIG_FILE: &str = "config.toml";

/// Configuration loading failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Platform project directories for ooze, if a home directory exists.
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "ooze")
}

/// Default location of the config file.
pub fn config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

/// Load configuration from the default location.
pub fn load() -> Result<FxConfig, ConfigError> {
    match config_path() {
        Some(path) => load_from(&path),
        None => {
            debug!("no home directory, using built-in configuration");
            Ok(FxConfig::default())
        }
    }
}

/// Load configuration from `path`, falling back to defaults when it does not
/// exist.
pub fn load_from(path: &Path) -> Result<FxConfig, ConfigError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(FxConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let config: FxConfig = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    validate(&config)?;
    info!(path = %path.display(), "loaded configuration");
    Ok(config)
}

/// Reject values the simulation cannot work with.
pub fn validate(config: &FxConfig) -> Result<(), ConfigError> {
    let p = &config.particles;
    let f = &config.fog;
    let r = &config.render;

    check_range("particles radius", p.min_radius, p.max_radius)?;
    check_range("particles speed", p.min_speed, p.max_speed)?;
    check_range("fog radius", f.min_radius, f.max_radius)?;
    check_range("fog opacity", f.opacity_min, f.opacity_max)?;
    if f.opacity_max > 1.0 {
        return Err(ConfigError::Invalid(
            "fog opacity must not exceed 1.0".to_string(),
        ));
    }
    for (name, friction) in [("particles friction", p.friction), ("fog friction", f.friction)] {
        if !(friction > 0.0 && friction <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "{name} must be in (0, 1], got {friction}"
            )));
        }
    }
    if p.max_speed_cap <= p.min_speed_enforce {
        return Err(ConfigError::Invalid(format!(
            "particles max_speed_cap ({}) must exceed min_speed_enforce ({})",
            p.max_speed_cap, p.min_speed_enforce
        )));
    }
    if p.attract_radius <= 0.0 || p.repel_radius_factor <= 0.0 {
        return Err(ConfigError::Invalid(
            "particles attract_radius and repel_radius_factor must be positive".to_string(),
        ));
    }
    if r.cell_width_px == 0 || r.cell_height_px < 2 {
        return Err(ConfigError::Invalid(
            "render cell size must be at least 1x2 pixels".to_string(),
        ));
    }
    if r.particle_fps == 0 || r.fog_fps == 0 {
        return Err(ConfigError::Invalid(
            "render frame rates must be non-zero".to_string(),
        ));
    }
    for (name, chain) in [("particle_filter", r.particle_filter), ("fog_filter", r.fog_filter)] {
        if chain.blur_px < 0.0 || chain.contrast < 0.0 || chain.brightness < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "render {name} parameters must be non-negative"
            )));
        }
    }
    Ok(())
}

fn check_range(name: &str, min: f32, max: f32) -> Result<(), ConfigError> {
    if min < 0.0 || min > max {
        return Err(ConfigError::Invalid(format!(
            "{name} range {min}..{max} is empty or negative"
        )));
    }
    Ok(())
}
