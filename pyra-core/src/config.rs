/// Runtime configuration shared by the window and terminal frontends
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::camera::{DEFAULT_SENSITIVITY, DEFAULT_SPEED};
use crate::geometry::Shape;
use crate::transform::RotationState;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `env_logger` filter, e.g. `"info"` or `"pyra_window=debug,wgpu=warn"`.
    pub log: Option<String>,
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub projection: ProjectionConfig,
    pub scene: SceneConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Hide and confine the cursor to the window.
    pub capture_cursor: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "pyra".to_string(),
            width: 800,
            height: 600,
            capture_cursor: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub yaw: f32,
    pub pitch: f32,
    pub sensitivity: f32,
    pub speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            yaw: -90.0,
            pitch: 0.0,
            sensitivity: DEFAULT_SENSITIVITY,
            speed: DEFAULT_SPEED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Horizontal field of view in degrees.
    pub fov_x: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fov_x: 90.0,
            z_near: 0.1,
            z_far: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub shape: Shape,
    /// Radius of the circular drift applied in the vertex shader; 0 disables it.
    pub orbit_radius: f32,
    pub clear_color: [f32; 4],
    /// Initial model rotation around x, y, z in degrees.
    pub rotation: [f32; 3],
    /// Model spin around x, y, z in degrees per second.
    pub spin: [f32; 3],
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            shape: Shape::Pyramid,
            orbit_radius: 1.0,
            clear_color: [0.8, 0.0, 0.5, 1.0],
            rotation: [0.0; 3],
            spin: [0.0; 3],
        }
    }
}

impl SceneConfig {
    pub fn initial_rotation(&self) -> RotationState {
        let [x, y, z] = self.rotation;
        RotationState::new(x, y, z)
    }

    /// Applies `dt` seconds of spin to `rotation`.
    pub fn advance(&self, rotation: &mut RotationState, dt: f32) {
        let [x, y, z] = self.spin.map(|rate| rate * dt);
        rotation.rotate(x, y, z);
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` when given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.projection;
        if !(p.fov_x > 0.0 && p.fov_x < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "projection.fov_x must be in (0, 180), got {}",
                p.fov_x
            )));
        }
        if !(p.z_near > 0.0 && p.z_far > p.z_near) {
            return Err(ConfigError::Invalid(format!(
                "projection planes must satisfy 0 < z_near < z_far, got {} / {}",
                p.z_near, p.z_far
            )));
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid("window size must be non-zero".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.camera.sensitivity, 0.1);
        assert_eq!(config.scene.shape, Shape::Pyramid);
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config = Config::from_toml_str(
            r#"
            log = "debug"

            [camera]
            speed = 5.0

            [scene]
            shape = "prism"
            "#,
        )
        .unwrap();
        assert_eq!(config.camera.speed, 5.0);
        assert_eq!(config.camera.yaw, -90.0);
        assert_eq!(config.scene.shape, Shape::Prism);
        assert_eq!(config.scene.orbit_radius, 1.0);
        assert_eq!(config.log.as_deref(), Some("debug"));
        assert_eq!(config.scene.spin, [0.0; 3]);
    }

    #[test]
    fn test_scene_spin() {
        let config =
            Config::from_toml_str("[scene]\nrotation = [0.0, 45.0, 0.0]\nspin = [0.0, 30.0, 0.0]")
                .unwrap();
        let mut rotation = config.scene.initial_rotation();
        assert_eq!(rotation, RotationState::new(0.0, 45.0, 0.0));
        config.scene.advance(&mut rotation, 0.5);
        assert_eq!(rotation, RotationState::new(0.0, 60.0, 0.0));
    }

    #[test]
    fn test_rejects_bad_projection() {
        let err = Config::from_toml_str("[projection]\nz_near = 5.0\nz_far = 1.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = Config::from_toml_str("[projection]\nfov_x = 180.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_unknown_shape() {
        let err = Config::from_toml_str("[scene]\nshape = \"torus\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_dump_parses_back() {
        let mut config = Config::default();
        config.scene.shape = Shape::Prism;
        config.log = Some("warn".to_string());
        let text = config.to_toml_string().unwrap();
        assert_eq!(Config::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load(Path::new("/nonexistent/pyra.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(Config::load_or_default(None).is_ok());
    }
}
