//! Shared vocabulary for the rendering sandbox: per-frame input and timing
//! values, settings enums and the YAML configuration file.

pub mod config;
pub mod timing;
pub mod types;

pub use config::{
    AssetSettings, CameraSettings, ConfigError, DirectionPolicy, LookAtMode, PITCH_LIMIT,
    PrimitiveKind, RenderConfig, SandboxConfig, WindowSettings, ZOOM_MAX, ZOOM_MIN,
};
pub use timing::FrameClock;
pub use types::{Direction, FrameTime, MovementInput, PointerEvent};
