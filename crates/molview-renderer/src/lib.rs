//! # molview Renderer
//!
//! Scene-object registry and draw-list renderer for the molview viewer.
//!
//! Each draw produces a JSON-serializable [`RenderFrame`] that a GPU
//! frontend consumes; compiling and issuing the actual GPU commands happens
//! there.

pub mod object;
pub mod render_data;
pub mod scene;

pub use object::{ObjectId, ObjectKind, RenderObject};
pub use render_data::{DrawCommand, RenderFrame};
pub use scene::{RenderStats, SceneRenderer};
