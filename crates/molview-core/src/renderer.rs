use crate::camera::Camera;
use crate::viewport::Viewport;

/// The rendering backend the viewer drives.
///
/// The renderer owns the scene-object registry and is the only authority on
/// object identity; the viewer forwards mutations without inspecting them.
pub trait Renderer {
    /// Opaque drawable handle.
    type Object;

    fn add(&mut self, object: Self::Object);
    fn remove(&mut self, object: &Self::Object);
    fn clear(&mut self);
    /// Issue the draw for every registered object under `camera`.
    fn draw(&mut self, camera: &dyn Camera);
    fn set_viewport(&mut self, viewport: Viewport);
    /// The viewport last passed to `set_viewport`.
    fn viewport(&self) -> Viewport;
    /// Release GPU-side resources.
    fn dispose(&mut self);
}
