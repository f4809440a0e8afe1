use glam::{Mat4, Vec3};

use crate::config::CameraSettings;
use crate::viewport::Viewport;

/// Camera parameters plus the matrices derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraState {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    pub viewport: Viewport,
    /// World-to-view transform, refreshed by `Camera::update`.
    pub view: Mat4,
    /// View-to-clip transform, refreshed by `Camera::update`.
    pub projection: Mat4,
}

impl CameraState {
    pub fn from_settings(settings: &CameraSettings) -> Self {
        Self {
            position: Vec3::from_array(settings.position),
            target: Vec3::from_array(settings.target),
            up: Vec3::from_array(settings.up).normalize_or(Vec3::Y),
            fov_y: settings.fov_degrees.to_radians(),
            near: settings.near,
            far: settings.far,
            viewport: Viewport::default(),
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
        }
    }

    /// Distance from the eye to the orbit target.
    pub fn distance(&self) -> f32 {
        (self.position - self.target).length()
    }
}

/// A camera the viewer drives once per frame.
pub trait Camera {
    fn state(&self) -> &CameraState;
    fn state_mut(&mut self) -> &mut CameraState;
    /// Recompute derived matrices from the current state.
    fn update(&mut self);

    fn viewport(&self) -> Viewport {
        self.state().viewport
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.state_mut().viewport = viewport;
    }
}

#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    state: CameraState,
}

impl PerspectiveCamera {
    pub fn new(settings: &CameraSettings) -> Self {
        let mut camera = Self {
            state: CameraState::from_settings(settings),
        };
        camera.update();
        camera
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(&CameraSettings::default())
    }
}

impl Camera for PerspectiveCamera {
    fn state(&self) -> &CameraState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut CameraState {
        &mut self.state
    }

    fn update(&mut self) {
        let state = &mut self.state;
        state.view = Mat4::look_at_rh(state.position, state.target, state.up);
        // Keep the last valid projection while the viewport has no area.
        if let Some(aspect) = state.viewport.aspect_ratio() {
            state.projection = Mat4::perspective_rh(state.fov_y, aspect, state.near, state.far);
        }
    }
}
