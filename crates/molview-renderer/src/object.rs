use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique render object identifier.
pub type ObjectId = Uuid;

/// Primitive topology of a render object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    Mesh,
    Points,
    Lines,
    Spheres,
}

/// A drawable registered with the [`SceneRenderer`](crate::SceneRenderer).
///
/// Identity is the `id`; two objects with the same id are the same drawable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderObject {
    pub id: ObjectId,
    pub name: String,
    pub kind: ObjectKind,
    /// Vertex positions in world space.
    pub positions: Vec<[f32; 3]>,
    /// RGBA
    pub color: [f32; 4],
    pub visible: bool,
}

impl RenderObject {
    pub fn new(name: &str, kind: ObjectKind, positions: Vec<[f32; 3]>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            kind,
            positions,
            color: [1.0, 1.0, 1.0, 1.0],
            visible: true,
        }
    }

    pub fn with_color(mut self, r: f32, g: f32, b: f32, a: f32) -> Self {
        self.color = [r, g, b, a];
        self
    }

    pub fn with_visibility(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }
}
