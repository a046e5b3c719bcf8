//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`AXC_SECTION__KEY`)

use axiscube_core::{CameraSettings, OrbitState, ProjectionMode};
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// View configuration
    #[serde(default)]
    pub view: ViewConfig,
    /// Camera configuration
    #[serde(default)]
    pub camera: CameraConfig,
    /// Input configuration
    #[serde(default)]
    pub input: InputConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // AXC_CAMERA__FOV_DEGREES=45 -> camera.fov_degrees = 45
        figment = figment.merge(Env::prefixed("AXC_").split("__"));

        let config: Self = figment.extract()?;
        config.camera.validate()?;
        Ok(config)
    }
}

/// View configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Axis descriptor loaded when none is given on the command line
    pub axes_file: Option<String>,
    /// Yaw added every frame, in radians
    pub auto_rotate: f32,
    /// Frames per second to aim for
    pub target_fps: u32,
    /// Virtual pixels per terminal cell, horizontally
    pub cell_width_px: f32,
    /// Virtual pixels per terminal cell, vertically
    pub cell_height_px: f32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            axes_file: None,
            auto_rotate: 0.005,
            target_fps: 30,
            cell_width_px: 8.0,
            cell_height_px: 16.0,
        }
    }
}

/// Projection kind as written in config files
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Projection {
    Perspective,
    Orthographic,
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub projection: Projection,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Starting perspective strength, 0 to 10
    pub perspective: f32,
    /// Starting yaw in degrees
    pub yaw_degrees: f32,
    /// Starting pitch in degrees
    pub pitch_degrees: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            projection: Projection::Perspective,
            fov_degrees: 30.0,
            near: 0.1,
            far: 100.0,
            perspective: 2.0,
            yaw_degrees: 30.0,
            pitch_degrees: -20.0,
        }
    }
}

impl CameraConfig {
    /// Reject clip planes and fields of view the projection cannot use
    pub fn validate(&self) -> Result<(), ConfigError> {
        let numbers = [self.fov_degrees, self.near, self.far, self.perspective];
        if !numbers.iter().all(|n| n.is_finite()) {
            return Err(ConfigError::invalid("camera settings must be finite numbers"));
        }
        if !(self.near > 0.0 && self.near < self.far) {
            return Err(ConfigError::invalid(format!(
                "camera.near ({}) must be positive and less than camera.far ({})",
                self.near, self.far
            )));
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(ConfigError::invalid(format!(
                "camera.fov_degrees ({}) must be between 0 and 180",
                self.fov_degrees
            )));
        }
        Ok(())
    }

    pub fn settings(&self) -> CameraSettings {
        CameraSettings {
            mode: match self.projection {
                Projection::Perspective => ProjectionMode::Perspective,
                Projection::Orthographic => ProjectionMode::Orthographic,
            },
            vertical_fov: self.fov_degrees.to_radians(),
            near: self.near,
            far: self.far,
        }
    }

    pub fn orbit(&self) -> OrbitState {
        OrbitState::new(
            self.yaw_degrees.to_radians(),
            self.pitch_degrees.to_radians(),
            self.perspective,
        )
    }
}

/// Input configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Radians per dragged pixel
    pub drag_sensitivity: f32,
    /// Radians per orbit key press
    pub rotate_step: f32,
    /// Fraction of an axis range per value key press
    pub value_step: f32,
    /// Distance change per key press
    pub distance_step: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            drag_sensitivity: 0.01,
            rotate_step: 0.1,
            value_step: 0.05,
            distance_step: 0.1,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Show the axis overlay
    pub show_overlay: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            show_overlay: true,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    fn invalid(message: impl Into<String>) -> Self {
        ConfigError {
            message: message.into(),
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
