use molview_core::{Camera, Viewport};
use serde::{Deserialize, Serialize};

use crate::object::{ObjectId, ObjectKind, RenderObject};

/// One draw call in a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawCommand {
    pub object_id: ObjectId,
    pub name: String,
    pub kind: ObjectKind,
    pub vertex_count: usize,
    pub color: [f32; 4], // RGBA
}

impl DrawCommand {
    pub fn for_object(object: &RenderObject) -> Self {
        Self {
            object_id: object.id,
            name: object.name.clone(),
            kind: object.kind,
            vertex_count: object.vertex_count(),
            color: object.color,
        }
    }
}

/// Complete frame data handed to the GPU frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub frame_number: u64,
    pub viewport: Viewport,
    /// Column-major view matrix.
    pub view: [[f32; 4]; 4],
    /// Column-major projection matrix.
    pub projection: [[f32; 4]; 4],
    pub camera_position: [f32; 3],
    pub commands: Vec<DrawCommand>,
}

impl RenderFrame {
    pub fn new(frame_number: u64, viewport: Viewport, camera: &dyn Camera) -> Self {
        let state = camera.state();
        Self {
            frame_number,
            viewport,
            view: state.view.to_cols_array_2d(),
            projection: state.projection.to_cols_array_2d(),
            camera_position: state.position.to_array(),
            commands: Vec::new(),
        }
    }

    pub fn object_ids(&self) -> Vec<ObjectId> {
        self.commands.iter().map(|c| c.object_id).collect()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
