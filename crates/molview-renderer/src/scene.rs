use molview_core::{Camera, Renderer, Viewport};

use crate::object::{ObjectId, RenderObject};
use crate::render_data::{DrawCommand, RenderFrame};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub frames_drawn: u64,
    /// Draws skipped because the viewport had no area.
    pub frames_skipped: u64,
}

/// Registry-backed renderer that turns each draw into a [`RenderFrame`]
/// draw list for the GPU frontend.
#[derive(Debug, Default)]
pub struct SceneRenderer {
    objects: Vec<RenderObject>,
    viewport: Viewport,
    frame_count: u64,
    last_frame: Option<RenderFrame>,
    stats: RenderStats,
    disposed: bool,
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn contains(&self, id: &ObjectId) -> bool {
        self.objects.iter().any(|o| o.id == *id)
    }

    pub fn get(&self, id: &ObjectId) -> Option<&RenderObject> {
        self.objects.iter().find(|o| o.id == *id)
    }

    /// Registered object ids in insertion order.
    pub fn object_ids(&self) -> Vec<ObjectId> {
        self.objects.iter().map(|o| o.id).collect()
    }

    pub fn last_frame(&self) -> Option<&RenderFrame> {
        self.last_frame.as_ref()
    }

    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl Renderer for SceneRenderer {
    type Object = RenderObject;

    fn add(&mut self, object: RenderObject) {
        match self.objects.iter_mut().find(|o| o.id == object.id) {
            Some(existing) => {
                log::warn!("Replacing render object {} ({})", object.id, object.name);
                *existing = object;
            }
            None => self.objects.push(object),
        }
    }

    fn remove(&mut self, object: &RenderObject) {
        let before = self.objects.len();
        self.objects.retain(|o| o.id != object.id);
        if self.objects.len() == before {
            log::warn!("Render object {} is not registered", object.id);
        }
    }

    fn clear(&mut self) {
        self.objects.clear();
    }

    fn draw(&mut self, camera: &dyn Camera) {
        if self.disposed {
            log::warn!("Draw on disposed renderer ignored");
            return;
        }
        if self.viewport.is_empty() {
            log::debug!(
                "Skipping draw on {}x{} viewport",
                self.viewport.width,
                self.viewport.height
            );
            self.stats.frames_skipped += 1;
            return;
        }

        self.frame_count += 1;
        let mut frame = RenderFrame::new(self.frame_count, self.viewport, camera);
        frame.commands = self
            .objects
            .iter()
            .filter(|o| o.visible)
            .map(DrawCommand::for_object)
            .collect();
        log::trace!(
            "Frame {}: {} draw commands",
            frame.frame_number,
            frame.commands.len()
        );
        self.last_frame = Some(frame);
        self.stats.frames_drawn += 1;
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn dispose(&mut self) {
        self.objects.clear();
        self.last_frame = None;
        self.disposed = true;
        log::debug!("Scene renderer disposed after {} frames", self.stats.frames_drawn);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::ObjectKind;
    use molview_core::PerspectiveCamera;

    fn points(name: &str) -> RenderObject {
        RenderObject::new(name, ObjectKind::Points, vec![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]])
    }

    fn camera_for(viewport: Viewport) -> PerspectiveCamera {
        let mut camera = PerspectiveCamera::default();
        camera.state_mut().viewport = viewport;
        camera.update();
        camera
    }

    #[test]
    fn test_add_remove_clear() {
        let mut renderer = SceneRenderer::new();
        let a = points("a");
        let b = points("b");
        renderer.add(a.clone());
        renderer.add(b.clone());
        assert_eq!(renderer.object_count(), 2);
        assert!(renderer.contains(&a.id));

        renderer.remove(&a);
        assert!(!renderer.contains(&a.id));
        assert_eq!(renderer.object_ids(), vec![b.id]);

        renderer.clear();
        assert_eq!(renderer.object_count(), 0);
    }

    #[test]
    fn test_add_same_id_replaces() {
        let mut renderer = SceneRenderer::new();
        let obj = points("atoms");
        renderer.add(obj.clone());
        renderer.add(obj.clone().with_color(1.0, 0.0, 0.0, 1.0));
        assert_eq!(renderer.object_count(), 1);
        assert_eq!(renderer.get(&obj.id).unwrap().color, [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut renderer = SceneRenderer::new();
        renderer.add(points("a"));
        renderer.remove(&points("stranger"));
        assert_eq!(renderer.object_count(), 1);
    }

    #[test]
    fn test_draw_emits_visible_objects() {
        let viewport = Viewport::from_size(800, 600);
        let mut renderer = SceneRenderer::new();
        renderer.set_viewport(viewport);
        let shown = points("shown");
        renderer.add(shown.clone());
        renderer.add(points("hidden").with_visibility(false));

        renderer.draw(&camera_for(viewport));
        let frame = renderer.last_frame().unwrap();
        assert_eq!(frame.frame_number, 1);
        assert_eq!(frame.viewport, viewport);
        assert_eq!(frame.object_ids(), vec![shown.id]);
        assert_eq!(frame.commands[0].vertex_count, 2);
        assert_eq!(frame.camera_position, [0.0, 0.0, 50.0]);
    }

    #[test]
    fn test_zero_area_viewport_skips_draw() {
        let mut renderer = SceneRenderer::new();
        renderer.set_viewport(Viewport::from_size(0, 600));
        renderer.add(points("a"));
        renderer.draw(&camera_for(Viewport::from_size(0, 600)));
        assert!(renderer.last_frame().is_none());
        assert_eq!(
            renderer.stats(),
            RenderStats {
                frames_drawn: 0,
                frames_skipped: 1
            }
        );
    }

    #[test]
    fn test_frame_json_roundtrip() {
        let viewport = Viewport::from_size(320, 240);
        let mut renderer = SceneRenderer::new();
        renderer.set_viewport(viewport);
        renderer.add(points("a"));
        renderer.draw(&camera_for(viewport));

        let frame = renderer.last_frame().unwrap();
        let json = frame.to_json().unwrap();
        assert!(json.contains("\"frame_number\": 1"));
        assert_eq!(&RenderFrame::from_json(&json).unwrap(), frame);
    }

    #[test]
    fn test_dispose_releases_registry() {
        let viewport = Viewport::from_size(320, 240);
        let mut renderer = SceneRenderer::new();
        renderer.set_viewport(viewport);
        renderer.add(points("a"));
        renderer.draw(&camera_for(viewport));
        renderer.dispose();

        assert!(renderer.is_disposed());
        assert_eq!(renderer.object_count(), 0);
        assert!(renderer.last_frame().is_none());
        renderer.draw(&camera_for(viewport));
        assert_eq!(renderer.stats().frames_drawn, 1);
    }
}
