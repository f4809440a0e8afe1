//! # molview Core
//!
//! Coordination core of the molview 3D scene viewer: frame scheduling with
//! request coalescing and a continuous mode, resize synchronization across
//! camera, controls and renderer, and ordered teardown.
//!
//! Camera, controls, input and the renderer sit behind small traits so the
//! host (or a test) can substitute its own implementations.

pub mod camera;
pub mod canvas;
pub mod config;
pub mod controls;
pub mod error;
pub mod input;
pub mod renderer;
pub mod scheduler;
pub mod viewer;
pub mod viewport;

pub use camera::{Camera, CameraState, PerspectiveCamera};
pub use canvas::Canvas;
pub use config::{CameraSettings, ControlsSettings, ViewerConfig};
pub use controls::{Controls, TrackballControls};
pub use error::{ConfigError, ViewerError};
pub use input::{InputEvent, InputObserver, InputSender, InputSource, PointerButton};
pub use renderer::Renderer;
pub use scheduler::{FrameScheduler, IntervalScheduler, ManualScheduler};
pub use viewer::{DrawMode, Viewer, ViewerStats};
pub use viewport::Viewport;
