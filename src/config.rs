use egui::{Vec2, vec2};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Environment variable naming an optional JSON file that overrides the defaults
pub const CONFIG_ENV_VAR: &str = "PLANO_SKETCH_CONFIG";

/// Errors that can occur while loading the startup configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Drawing constants. Loaded once at startup and never changed while the
/// editor runs.
///
/// The scale and the anchor threshold are part of the plan's meaning and are
/// never read from a file; only the cosmetic values can be overridden.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // a partial file only overrides the keys it names
pub struct EditorConfig {
    /// Visual units per real-world meter
    #[serde(skip, default = "default_pixels_per_meter")]
    pub pixels_per_meter: f32,
    /// Radius within which a point counts as hitting an endpoint
    #[serde(skip, default = "default_anchor_threshold")]
    pub anchor_threshold: f32,
    /// Distance the length label sits above the segment midpoint
    pub label_offset: f32,
    /// Half-extents of the box used to hit a length label
    pub label_hit_box: Vec2,
    pub font_size: f32,
    pub stroke_width: f32,
    pub marker_radius: f32,
    /// Size of the drawing surface, also used as the SVG canvas size
    pub surface_size: Vec2,
}

fn default_pixels_per_meter() -> f32 {
    50.0
}

fn default_anchor_threshold() -> f32 {
    10.0
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            pixels_per_meter: default_pixels_per_meter(),
            anchor_threshold: default_anchor_threshold(),
            label_offset: 10.0,
            label_hit_box: vec2(20.0, 10.0),
            font_size: 12.0,
            stroke_width: 2.0,
            marker_radius: 5.0,
            surface_size: vec2(1335.0, 660.0),
        }
    }
}

impl EditorConfig {
    /// Load a config from a JSON file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Parse and validate a config from JSON text
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read the file named by [`CONFIG_ENV_VAR`], falling back to the defaults
    /// when the variable is unset or the file is unusable.
    pub fn from_env() -> Self {
        let Some(path) = std::env::var_os(CONFIG_ENV_VAR) else {
            return Self::default();
        };
        let path = Path::new(&path);
        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded editor config from {}", path.display());
                config
            }
            Err(err) => {
                log::warn!("Ignoring config {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("pixels_per_meter", self.pixels_per_meter),
            ("anchor_threshold", self.anchor_threshold),
            ("font_size", self.font_size),
            ("stroke_width", self.stroke_width),
            ("marker_radius", self.marker_radius),
            ("surface_size.x", self.surface_size.x),
            ("surface_size.y", self.surface_size.y),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        if !self.label_offset.is_finite() {
            return Err(ConfigError::Invalid("label_offset must be finite".to_owned()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_drawing_constants() {
        let config = EditorConfig::default();
        assert_eq!(config.pixels_per_meter, 50.0);
        assert_eq!(config.anchor_threshold, 10.0);
        assert_eq!(config.surface_size, vec2(1335.0, 660.0));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EditorConfig::from_json(r#"{ "font_size": 14 }"#).unwrap();
        assert_eq!(config.font_size, 14.0);
        assert_eq!(config.stroke_width, 2.0);
        assert_eq!(config.marker_radius, 5.0);
    }

    #[test]
    fn test_scale_and_threshold_stay_fixed() {
        let config =
            EditorConfig::from_json(r#"{ "pixels_per_meter": 10, "anchor_threshold": 30 }"#).unwrap();
        assert_eq!(config.pixels_per_meter, 50.0);
        assert_eq!(config.anchor_threshold, 10.0);

        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("pixels_per_meter"));
    }

    #[test]
    fn test_rejects_non_positive_sizes() {
        let result = EditorConfig::from_json(r#"{ "stroke_width": 0 }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let result = EditorConfig::from_json("{ not json");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
