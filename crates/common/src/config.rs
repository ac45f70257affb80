//! Sandbox configuration, loaded from YAML with every field optional.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Smallest field of view the camera zooms to, in degrees.
pub const ZOOM_MIN: f32 = 1.0;
/// Widest field of view, in degrees. Also the default.
pub const ZOOM_MAX: f32 = 45.0;
/// Pitch bound applied when pitch is constrained, in degrees.
pub const PITCH_LIMIT: f32 = 89.0;

/// Errors from loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// How the view matrix is constructed from the camera state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookAtMode {
    /// glam's right-handed look-at.
    #[default]
    Standard,
    /// Hand-built rotation * translation from the camera axes.
    Explicit,
}

/// How simultaneously held movement keys combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectionPolicy {
    /// Every held direction contributes and opposite keys cancel. The sum is
    /// normalized so diagonals move at the same speed as a single key.
    #[default]
    Accumulate,
    /// Only one direction applies; right > left > backward > forward.
    Exclusive,
}

/// Primitive drawn at each scene slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    Triangle,
    Plane,
    #[default]
    Cube,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 3] = [Self::Triangle, Self::Plane, Self::Cube];

    pub fn label(self) -> &'static str {
        match self {
            Self::Triangle => "Triangle",
            Self::Plane => "Plane",
            Self::Cube => "Cube",
        }
    }
}

impl std::str::FromStr for PrimitiveKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "triangle" => Ok(Self::Triangle),
            "plane" => Ok(Self::Plane),
            "cube" => Ok(Self::Cube),
            other => Err(ConfigError::Invalid(format!("unknown primitive '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Rendering Sandbox".into(),
            width: 960,
            height: 720,
            resizable: true,
        }
    }
}

/// Initial camera state and tunables. Angles are in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub position: Vec3,
    pub world_up: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
    pub zoom: f32,
    pub fps_mode: bool,
    pub look_at: LookAtMode,
    pub direction_policy: DirectionPolicy,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 3.0),
            world_up: Vec3::Y,
            yaw: -90.0,
            pitch: 0.0,
            movement_speed: 2.5,
            mouse_sensitivity: 0.1,
            zoom: ZOOM_MAX,
            fps_mode: false,
            look_at: LookAtMode::Standard,
            direction_policy: DirectionPolicy::Accumulate,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub primitive: PrimitiveKind,
    pub clear_color: [f32; 4],
    pub wireframe: bool,
    pub vsync: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            primitive: PrimitiveKind::Cube,
            clear_color: [0.2, 0.3, 0.3, 1.0],
            wireframe: false,
            vsync: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetSettings {
    /// Content root. When unset, `<exe dir>/contents` then `./contents` are tried.
    pub root: Option<PathBuf>,
}

/// Top-level configuration file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    pub window: WindowSettings,
    pub camera: CameraSettings,
    pub render: RenderConfig,
    pub assets: AssetSettings,
}

impl SandboxConfig {
    /// Read and validate a YAML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(&text)?;
        tracing::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load `path` when given, otherwise return the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.window;
        if w.width == 0 || w.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be non-zero, got {}x{}",
                w.width, w.height
            )));
        }

        let c = &self.camera;
        if !(c.movement_speed.is_finite() && c.movement_speed > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "camera.movement_speed must be finite and positive, got {}",
                c.movement_speed
            )));
        }
        if !(c.mouse_sensitivity.is_finite() && c.mouse_sensitivity > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "camera.mouse_sensitivity must be finite and positive, got {}",
                c.mouse_sensitivity
            )));
        }
        if !(ZOOM_MIN..=ZOOM_MAX).contains(&c.zoom) {
            return Err(ConfigError::Invalid(format!(
                "camera.zoom must be within [{ZOOM_MIN}, {ZOOM_MAX}], got {}",
                c.zoom
            )));
        }
        if !c.world_up.is_finite() || c.world_up.length_squared() < 1e-12 {
            return Err(ConfigError::Invalid(
                "camera.world_up must be a finite non-zero vector".into(),
            ));
        }
        if !c.position.is_finite() || !c.yaw.is_finite() || !c.pitch.is_finite() {
            return Err(ConfigError::Invalid(
                "camera position and angles must be finite".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = SandboxConfig::default();
        config.validate().unwrap();
        assert_eq!(config.camera.yaw, -90.0);
        assert_eq!(config.camera.zoom, 45.0);
        assert_eq!(config.camera.position, Vec3::new(0.0, 0.0, 3.0));
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let config = SandboxConfig::from_yaml_str(
            "camera:\n  fps_mode: true\n  look_at: explicit\nrender:\n  primitive: plane\n",
        )
        .unwrap();
        assert!(config.camera.fps_mode);
        assert_eq!(config.camera.look_at, LookAtMode::Explicit);
        assert_eq!(config.camera.movement_speed, 2.5);
        assert_eq!(config.render.primitive, PrimitiveKind::Plane);
        assert_eq!(config.window.width, 960);
    }

    #[test]
    fn empty_document_is_default() {
        let config = SandboxConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, SandboxConfig::default());
    }

    #[test]
    fn yaml_roundtrip_preserves_settings() {
        let mut config = SandboxConfig::default();
        config.camera.direction_policy = DirectionPolicy::Exclusive;
        config.window.title = "test".into();
        let text = config.to_yaml_string().unwrap();
        let back = SandboxConfig::from_yaml_str(&text).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn rejects_out_of_range_zoom() {
        let err = SandboxConfig::from_yaml_str("camera:\n  zoom: 90.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_zero_window() {
        let err = SandboxConfig::from_yaml_str("window:\n  width: 0\n").unwrap_err();
        assert!(err.to_string().contains("window size"));
    }

    #[test]
    fn rejects_zero_world_up() {
        let err =
            SandboxConfig::from_yaml_str("camera:\n  world_up: [0.0, 0.0, 0.0]\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_bad_yaml() {
        let err = SandboxConfig::from_yaml_str("camera: [").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "window:\n  title: From File\n  height: 600").unwrap();
        let config = SandboxConfig::load(file.path()).unwrap();
        assert_eq!(config.window.title, "From File");
        assert_eq!(config.window.height, 600);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SandboxConfig::load(dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn load_or_default_without_path() {
        let config = SandboxConfig::load_or_default(None).unwrap();
        assert_eq!(config, SandboxConfig::default());
    }

    #[test]
    fn primitive_from_str() {
        assert_eq!("Cube".parse::<PrimitiveKind>().unwrap(), PrimitiveKind::Cube);
        assert_eq!(
            "triangle".parse::<PrimitiveKind>().unwrap(),
            PrimitiveKind::Triangle
        );
        assert!("sphere".parse::<PrimitiveKind>().is_err());
    }
}
