use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Viewer settings, stored as human-readable JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub camera: CameraSettings,
    pub controls: ControlsSettings,
    /// Device pixels per logical container pixel.
    pub pixel_ratio: f64,
    /// Request a draw whenever input has been processed.
    pub redraw_on_input: bool,
    /// Frame rate for interval-paced hosts.
    pub target_fps: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub position: [f32; 3],
    pub target: [f32; 3],
    pub up: [f32; 3],
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            camera: CameraSettings::default(),
            controls: ControlsSettings::default(),
            pixel_ratio: 1.0,
            redraw_on_input: true,
            target_fps: 60,
        }
    }
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 50.0],
            target: [0.0, 0.0, 0.0],
            up: [0.0, 1.0, 0.0],
            fov_degrees: 45.0,
            near: 0.01,
            far: 10_000.0,
        }
    }
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            rotate_speed: 3.0,
            zoom_speed: 0.1,
            pan_speed: 1.0,
            min_distance: 0.1,
            max_distance: 5_000.0,
        }
    }
}

impl ViewerConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded viewer config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.camera.validate()?;
        self.controls.validate()?;
        if !(self.pixel_ratio > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "pixel_ratio must be positive, got {}",
                self.pixel_ratio
            )));
        }
        if self.target_fps == 0 {
            return Err(ConfigError::Invalid("target_fps must be non-zero".to_string()));
        }
        Ok(())
    }
}

impl CameraSettings {
    /// Reject settings that would give a degenerate look-at or projection.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let position = Vec3::from_array(self.position);
        let target = Vec3::from_array(self.target);
        let up = Vec3::from_array(self.up);
        if !(position.is_finite() && target.is_finite() && up.is_finite()) {
            return Err(ConfigError::Invalid(
                "camera position, target and up must be finite".to_string(),
            ));
        }
        let forward = target - position;
        if forward.length_squared() <= f32::EPSILON {
            return Err(ConfigError::Invalid(
                "camera.position must differ from camera.target".to_string(),
            ));
        }
        if up.cross(forward).length_squared() <= f32::EPSILON * forward.length_squared() {
            return Err(ConfigError::Invalid(
                "camera.up must be non-zero and not parallel to the view direction".to_string(),
            ));
        }
        if !(self.near > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "camera.near must be positive, got {}",
                self.near
            )));
        }
        if !(self.far > self.near) {
            return Err(ConfigError::Invalid(format!(
                "camera.far ({}) must exceed camera.near ({})",
                self.far, self.near
            )));
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "camera.fov_degrees must be in (0, 180), got {}",
                self.fov_degrees
            )));
        }
        Ok(())
    }
}

impl ControlsSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, speed) in [
            ("rotate_speed", self.rotate_speed),
            ("zoom_speed", self.zoom_speed),
            ("pan_speed", self.pan_speed),
        ] {
            if !speed.is_finite() {
                return Err(ConfigError::Invalid(format!(
                    "controls.{name} must be finite, got {speed}"
                )));
            }
        }
        if !(self.min_distance > 0.0 && self.max_distance >= self.min_distance) {
            return Err(ConfigError::Invalid(format!(
                "controls distance range [{}, {}] is invalid",
                self.min_distance, self.max_distance
            )));
        }
        Ok(())
    }
}
