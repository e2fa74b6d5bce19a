//! Viewer configuration, read from a JSON file.
//!
//! Every field has a default, so a config file only needs the values it wants to change.

use std::path::{Path, PathBuf};

use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// When set, the window covers the desktop and `width`/`height` are ignored.
    pub fullscreen: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "glint".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    pub color: [f32; 4],
    pub ambient_scale: f32,
    /// The direction the light travels in.
    pub direction: [f32; 3],
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0, 1.0],
            ambient_scale: 0.15,
            direction: [-0.4, -1.0, -0.6],
        }
    }
}

impl LightConfig {
    pub fn color(&self) -> Vec4 {
        Vec4::from(self.color)
    }

    pub fn direction(&self) -> Vec3 {
        Vec3::from(self.direction)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub window: WindowConfig,
    pub model: PathBuf,
    pub texture: Option<PathBuf>,
    pub light: LightConfig,
    /// One of `error`, `warn`, `info`, `debug` or `trace`.
    pub log_level: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            model: PathBuf::from("assets/cube.obj"),
            texture: None,
            light: LightConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl ViewerConfig {
    pub fn from_json(s: &str) -> Result<Self, String> {
        serde_json::from_str(s).map_err(|e| e.to_string())
    }

    /// Reads the config file at `path`.
    pub fn load(path: &Path) -> Result<Self, String> {
        let s = std::fs::read_to_string(path).map_err(|e| format!("{}: {}", path.display(), e))?;
        Self::from_json(&s).map_err(|e| format!("{}: {}", path.display(), e))
    }

    /// Reads the explicitly requested config file, or else `fallback` if it exists, or else
    /// returns the defaults.
    ///
    /// An explicit path that cannot be read is an error, a missing fallback is not.
    pub fn load_or_default(explicit: Option<&Path>, fallback: Option<&Path>) -> Result<Self, String> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match fallback {
            Some(path) if path.exists() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }

    /// The configured log level, falling back to `info` for unknown names.
    pub fn log_level(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = ViewerConfig::from_json(
            r#"{ "window": { "width": 640 }, "texture": "assets/crate.png" }"#,
        )
        .unwrap();
        assert_eq!(config.window.width, 640);
        assert_eq!(config.window.height, 720);
        assert_eq!(config.window.title, "glint");
        assert_eq!(config.texture, Some(PathBuf::from("assets/crate.png")));
        assert_eq!(config.model, PathBuf::from("assets/cube.obj"));
        assert_eq!(config.light, LightConfig::default());
    }

    #[test]
    fn test_light_accessors() {
        let config = ViewerConfig::from_json(
            r#"{ "light": { "color": [0.5, 0.5, 1.0, 1.0], "direction": [0, -1, 0] } }"#,
        )
        .unwrap();
        assert_eq!(config.light.color(), Vec4::new(0.5, 0.5, 1.0, 1.0));
        assert_eq!(config.light.direction(), Vec3::NEG_Y);
        assert_eq!(config.light.ambient_scale, 0.15);
    }

    #[test]
    fn test_invalid_json() {
        assert!(ViewerConfig::from_json("{ not json").is_err());
        assert!(ViewerConfig::from_json(r#"{ "window": { "width": "wide" } }"#).is_err());
    }

    #[test]
    fn test_log_level() {
        let mut config = ViewerConfig::default();
        assert_eq!(config.log_level(), log::LevelFilter::Info);
        config.log_level = "debug".to_string();
        assert_eq!(config.log_level(), log::LevelFilter::Debug);
        config.log_level = "loud".to_string();
        assert_eq!(config.log_level(), log::LevelFilter::Info);
    }

    #[test]
    fn test_load_or_default() {
        let missing = Path::new("does/not/exist.json");
        assert_eq!(
            ViewerConfig::load_or_default(None, Some(missing)).unwrap(),
            ViewerConfig::default()
        );
        assert_eq!(
            ViewerConfig::load_or_default(None, None).unwrap(),
            ViewerConfig::default()
        );
        assert!(ViewerConfig::load_or_default(Some(missing), None).is_err());
    }
}
