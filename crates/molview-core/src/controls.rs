use glam::{Quat, Vec2, Vec3};

use crate::camera::Camera;
use crate::config::ControlsSettings;
use crate::error::ConfigError;
use crate::input::{InputEvent, PointerButton};
use crate::viewport::Viewport;

/// Input-driven camera manipulation.
pub trait Controls {
    fn viewport(&self) -> Viewport;
    fn set_viewport(&mut self, viewport: Viewport);
    /// Accumulate an input event; nothing touches the camera until `update`.
    fn handle_input(&mut self, event: &InputEvent);
    /// Apply the accumulated deltas to the camera and reset them.
    fn update(&mut self, camera: &mut dyn Camera);
    fn dispose(&mut self);
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    button: PointerButton,
    last: Vec2,
}

/// Trackball-style controls: primary drag rotates around the target,
/// secondary/middle drag pans, wheel dollies.
#[derive(Debug, Clone)]
pub struct TrackballControls {
    settings: ControlsSettings,
    viewport: Viewport,
    drag: Option<Drag>,
    rotate_delta: Vec2,
    pan_delta: Vec2,
    zoom_delta: f32,
    disposed: bool,
}

impl TrackballControls {
    /// Build controls from `settings`, rejecting ranges the frame pass
    /// cannot clamp against.
    pub fn new(settings: ControlsSettings) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self::with_valid_settings(settings))
    }

    fn with_valid_settings(settings: ControlsSettings) -> Self {
        Self {
            settings,
            viewport: Viewport::default(),
            drag: None,
            rotate_delta: Vec2::ZERO,
            pan_delta: Vec2::ZERO,
            zoom_delta: 0.0,
            disposed: false,
        }
    }

    pub fn settings(&self) -> &ControlsSettings {
        &self.settings
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Whether any input is waiting to be applied.
    pub fn has_pending_motion(&self) -> bool {
        self.rotate_delta != Vec2::ZERO || self.pan_delta != Vec2::ZERO || self.zoom_delta != 0.0
    }

    fn accumulate_drag(&mut self, position: Vec2) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        let previous = std::mem::replace(&mut drag.last, position);
        // NDC deltas are resolution independent and already +Y up.
        let (Some(from), Some(to)) = (
            self.viewport.screen_to_ndc(previous.x, previous.y),
            self.viewport.screen_to_ndc(position.x, position.y),
        ) else {
            return;
        };
        let delta = to - from;
        match drag.button {
            PointerButton::Primary => self.rotate_delta += delta,
            PointerButton::Secondary | PointerButton::Middle => self.pan_delta += delta,
        }
    }

    fn rotate(&self, camera: &mut dyn Camera, delta: Vec2) {
        let state = camera.state_mut();
        let eye = state.position - state.target;
        let angle = delta.length() * self.settings.rotate_speed;
        if angle <= f32::EPSILON || eye.length_squared() <= f32::EPSILON {
            return;
        }
        let eye_dir = eye.normalize();
        let up = state.up.normalize_or(Vec3::Y);
        let side = up.cross(eye_dir).normalize_or_zero();
        let move_dir = up * delta.y + side * delta.x;
        let axis = move_dir.cross(eye).normalize_or_zero();
        if axis == Vec3::ZERO {
            return;
        }
        let rotation = Quat::from_axis_angle(axis, angle);
        state.position = state.target + rotation * eye;
        state.up = (rotation * up).normalize_or(Vec3::Y);
    }

    fn zoom(&self, camera: &mut dyn Camera, delta: f32) {
        let state = camera.state_mut();
        let eye = state.position - state.target;
        let distance = eye.length();
        if !distance.is_finite() || distance <= f32::EPSILON {
            return;
        }
        let factor = (1.0 - delta * self.settings.zoom_speed).clamp(0.2, 5.0);
        let new_distance =
            (distance * factor).clamp(self.settings.min_distance, self.settings.max_distance);
        state.position = state.target + eye / distance * new_distance;
    }

    fn pan(&self, camera: &mut dyn Camera, delta: Vec2) {
        let state = camera.state_mut();
        let eye = state.position - state.target;
        let distance = eye.length();
        if distance <= f32::EPSILON {
            return;
        }
        let up = state.up.normalize_or(Vec3::Y);
        let side = up.cross(eye).normalize_or_zero();
        // Grab-style: the scene follows the pointer.
        let offset = (side * -delta.x + up * -delta.y) * distance * self.settings.pan_speed;
        state.position += offset;
        state.target += offset;
    }
}

impl Default for TrackballControls {
    fn default() -> Self {
        Self::with_valid_settings(ControlsSettings::default())
    }
}

impl Controls for TrackballControls {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn handle_input(&mut self, event: &InputEvent) {
        if self.disposed {
            return;
        }
        match *event {
            InputEvent::PointerDown { x, y, button } => {
                // Presses outside the canvas never start a drag.
                if !self.viewport.contains(x, y) {
                    return;
                }
                self.drag = Some(Drag {
                    button,
                    last: Vec2::new(x, y),
                });
            }
            InputEvent::PointerMove { x, y } => self.accumulate_drag(Vec2::new(x, y)),
            InputEvent::PointerUp { button } => {
                if self.drag.is_some_and(|d| d.button == button) {
                    self.drag = None;
                }
            }
            InputEvent::Wheel { delta } => self.zoom_delta += delta,
            InputEvent::Resize { .. } => {}
        }
    }

    fn update(&mut self, camera: &mut dyn Camera) {
        if !self.has_pending_motion() {
            return;
        }
        let (rotate, pan, zoom) = (self.rotate_delta, self.pan_delta, self.zoom_delta);
        self.rotate_delta = Vec2::ZERO;
        self.pan_delta = Vec2::ZERO;
        self.zoom_delta = 0.0;

        if rotate != Vec2::ZERO {
            self.rotate(camera, rotate);
        }
        if zoom != 0.0 {
            self.zoom(camera, zoom);
        }
        if pan != Vec2::ZERO {
            self.pan(camera, pan);
        }
        log::trace!(
            "Controls applied rotate={:?} pan={:?} zoom={}",
            rotate,
            pan,
            zoom
        );
    }

    fn dispose(&mut self) {
        self.disposed = true;
        self.drag = None;
        self.rotate_delta = Vec2::ZERO;
        self.pan_delta = Vec2::ZERO;
        self.zoom_delta = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::PerspectiveCamera;

    fn setup() -> (TrackballControls, PerspectiveCamera) {
        let mut controls = TrackballControls::default();
        controls.set_viewport(Viewport::from_size(800, 600));
        let mut camera = PerspectiveCamera::default();
        camera.state_mut().viewport = Viewport::from_size(800, 600);
        (controls, camera)
    }

    fn drag(controls: &mut TrackballControls, button: PointerButton, dx: f32, dy: f32) {
        controls.handle_input(&InputEvent::PointerDown {
            x: 400.0,
            y: 300.0,
            button,
        });
        controls.handle_input(&InputEvent::PointerMove {
            x: 400.0 + dx,
            y: 300.0 + dy,
        });
        controls.handle_input(&InputEvent::PointerUp { button });
    }

    #[test]
    fn test_input_is_deferred_until_update() {
        let (mut controls, mut camera) = setup();
        let before = camera.state().position;
        drag(&mut controls, PointerButton::Primary, 60.0, 0.0);
        assert_eq!(camera.state().position, before);
        assert!(controls.has_pending_motion());

        controls.update(&mut camera);
        assert_ne!(camera.state().position, before);
        assert!(!controls.has_pending_motion());
    }

    #[test]
    fn test_rotation_orbits_at_constant_distance() {
        let (mut controls, mut camera) = setup();
        drag(&mut controls, PointerButton::Primary, 120.0, -45.0);
        controls.update(&mut camera);
        assert!((camera.state().distance() - 50.0).abs() < 1e-3);
        assert_eq!(camera.state().target, Vec3::ZERO);
    }

    #[test]
    fn test_wheel_dollies_toward_target() {
        let (mut controls, mut camera) = setup();
        controls.handle_input(&InputEvent::Wheel { delta: 2.0 });
        controls.update(&mut camera);
        assert!((camera.state().distance() - 40.0).abs() < 1e-3);
    }

    #[test]
    fn test_zoom_respects_min_distance() {
        let (mut controls, mut camera) = setup();
        for _ in 0..200 {
            controls.handle_input(&InputEvent::Wheel { delta: 4.0 });
            controls.update(&mut camera);
        }
        assert!(camera.state().distance() >= controls.settings().min_distance - 1e-5);
    }

    #[test]
    fn test_pan_moves_target_and_eye_together() {
        let (mut controls, mut camera) = setup();
        drag(&mut controls, PointerButton::Secondary, 30.0, 0.0);
        controls.update(&mut camera);
        let state = camera.state();
        assert_ne!(state.target, Vec3::ZERO);
        assert!((state.distance() - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_move_without_button_is_ignored() {
        let (mut controls, _) = setup();
        controls.handle_input(&InputEvent::PointerMove { x: 10.0, y: 10.0 });
        assert!(!controls.has_pending_motion());
        assert!(!controls.is_dragging());
    }

    #[test]
    fn test_dispose_drops_pending_motion_and_input() {
        let (mut controls, mut camera) = setup();
        drag(&mut controls, PointerButton::Primary, 50.0, 50.0);
        controls.dispose();
        controls.handle_input(&InputEvent::Wheel { delta: 1.0 });
        let before = camera.state().position;
        controls.update(&mut camera);
        assert_eq!(camera.state().position, before);
        assert!(controls.is_disposed());
    }

    #[test]
    fn test_inverted_distance_range_is_rejected() {
        let settings = ControlsSettings {
            min_distance: 100.0,
            max_distance: 10.0,
            ..ControlsSettings::default()
        };
        assert!(matches!(
            TrackballControls::new(settings),
            Err(ConfigError::Invalid(_))
        ));

        let nan_bound = ControlsSettings {
            max_distance: f32::NAN,
            ..ControlsSettings::default()
        };
        assert!(TrackballControls::new(nan_bound).is_err());
    }

    #[test]
    fn test_valid_settings_zoom_without_panic() {
        let settings = ControlsSettings {
            min_distance: 10.0,
            max_distance: 100.0,
            ..ControlsSettings::default()
        };
        let mut controls = TrackballControls::new(settings).unwrap();
        controls.set_viewport(Viewport::from_size(800, 600));
        let mut camera = PerspectiveCamera::default();
        controls.handle_input(&InputEvent::Wheel { delta: 1.0 });
        controls.update(&mut camera);
        assert!((camera.state().distance() - 45.0).abs() < 1e-3);
    }

    #[test]
    fn test_press_outside_viewport_does_not_drag() {
        let (mut controls, _) = setup();
        controls.handle_input(&InputEvent::PointerDown {
            x: 900.0,
            y: 300.0,
            button: PointerButton::Primary,
        });
        controls.handle_input(&InputEvent::PointerMove { x: 700.0, y: 300.0 });
        assert!(!controls.is_dragging());
        assert!(!controls.has_pending_motion());
    }

    #[test]
    fn test_drag_delta_is_in_ndc() {
        let (mut controls, mut camera) = setup();
        // A quarter of the canvas width is half an NDC unit.
        drag(&mut controls, PointerButton::Primary, 200.0, 0.0);
        assert_eq!(controls.rotate_delta, Vec2::new(0.5, 0.0));
        controls.update(&mut camera);
        assert!((camera.state().distance() - 50.0).abs() < 1e-3);
    }
}
