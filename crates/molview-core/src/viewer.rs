use crate::camera::{Camera, PerspectiveCamera};
use crate::canvas::Canvas;
use crate::config::ViewerConfig;
use crate::controls::{Controls, TrackballControls};
use crate::error::{ConfigError, ViewerError};
use crate::input::{InputEvent, InputSource};
use crate::renderer::Renderer;
use crate::scheduler::{FrameScheduler, ManualScheduler};
use crate::viewport::Viewport;

/// Draw scheduling state. Anything other than `Idle` means a frame request
/// is outstanding on the scheduler; there is never more than one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawMode {
    #[default]
    Idle,
    /// One on-demand frame is in flight.
    Scheduled,
    /// Every frame re-schedules the next one.
    Continuous,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewerStats {
    /// Frame passes executed (scheduled, continuous and direct `draw` calls).
    pub frames_drawn: u64,
    /// `request_draw` calls folded into an already scheduled frame.
    pub requests_coalesced: u64,
    /// Scheduler callbacks that arrived with nothing to draw, or after dispose.
    pub frames_dropped: u64,
    /// Resize transactions applied.
    pub resizes: u64,
}

/// Coordinates input, camera, controls and renderer for one canvas.
///
/// The viewer exclusively owns its collaborators. Each frame pass runs
/// `Controls::update`, `Camera::update` and `Renderer::draw` in that order,
/// and every resize writes one viewport to renderer, camera and controls
/// before returning.
pub struct Viewer<R: Renderer, S: FrameScheduler = ManualScheduler> {
    canvas: Canvas,
    input: Box<dyn InputSource>,
    camera: Box<dyn Camera>,
    controls: Box<dyn Controls>,
    renderer: R,
    scheduler: S,
    mode: DrawMode,
    redraw_on_input: bool,
    disposed: bool,
    stats: ViewerStats,
}

impl<R: Renderer, S: FrameScheduler> Viewer<R, S> {
    pub fn new(
        canvas: Canvas,
        input: Box<dyn InputSource>,
        camera: Box<dyn Camera>,
        controls: Box<dyn Controls>,
        renderer: R,
        scheduler: S,
    ) -> Self {
        let mut viewer = Self {
            canvas,
            input,
            camera,
            controls,
            renderer,
            scheduler,
            mode: DrawMode::Idle,
            redraw_on_input: false,
            disposed: false,
            stats: ViewerStats::default(),
        };
        viewer.apply_resize();
        viewer
    }

    /// Build a viewer with a perspective camera and trackball controls
    /// configured from `config`, on a container of the given logical size.
    pub fn with_config(
        config: &ViewerConfig,
        container_size: (f64, f64),
        input: impl InputSource + 'static,
        renderer: R,
        scheduler: S,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let canvas = Canvas::new(container_size.0, container_size.1, config.pixel_ratio);
        let viewer = Self::new(
            canvas,
            Box::new(input),
            Box::new(PerspectiveCamera::new(&config.camera)),
            Box::new(TrackballControls::new(config.controls.clone())?),
            renderer,
            scheduler,
        )
        .with_redraw_on_input(config.redraw_on_input);
        log::info!(
            "Viewer created on {}x{} canvas",
            viewer.canvas.width(),
            viewer.canvas.height()
        );
        Ok(viewer)
    }

    /// Make processed input request a draw.
    pub fn with_redraw_on_input(mut self, enabled: bool) -> Self {
        self.redraw_on_input = enabled;
        self
    }

    fn ensure_live(&self) -> Result<(), ViewerError> {
        if self.disposed {
            Err(ViewerError::Disposed)
        } else {
            Ok(())
        }
    }

    // ── Scene mutation ───────────────────────────────────────────────

    /// Register an object with the renderer. Does not draw.
    pub fn add(&mut self, object: R::Object) -> Result<(), ViewerError> {
        self.ensure_live()?;
        self.renderer.add(object);
        Ok(())
    }

    /// Unregister an object; unknown objects are ignored.
    pub fn remove(&mut self, object: &R::Object) -> Result<(), ViewerError> {
        self.ensure_live()?;
        self.renderer.remove(object);
        Ok(())
    }

    /// Unregister every object.
    pub fn clear(&mut self) -> Result<(), ViewerError> {
        self.ensure_live()?;
        self.renderer.clear();
        Ok(())
    }

    // ── Frame scheduling ─────────────────────────────────────────────

    /// Run one frame pass immediately, independent of the schedule.
    pub fn draw(&mut self) -> Result<(), ViewerError> {
        self.ensure_live()?;
        self.draw_pass();
        Ok(())
    }

    /// Schedule a frame unless one is already in flight.
    pub fn request_draw(&mut self) -> Result<(), ViewerError> {
        self.ensure_live()?;
        match self.mode {
            DrawMode::Idle => {
                self.mode = DrawMode::Scheduled;
                self.scheduler.request_frame();
            }
            DrawMode::Scheduled | DrawMode::Continuous => {
                self.stats.requests_coalesced += 1;
            }
        }
        Ok(())
    }

    /// Draw now and keep drawing every frame until `stop_animation`.
    pub fn animate(&mut self) -> Result<(), ViewerError> {
        self.ensure_live()?;
        self.draw_pass();
        match self.mode {
            DrawMode::Idle => self.scheduler.request_frame(),
            // The frame already in flight carries continuous mode forward.
            DrawMode::Scheduled | DrawMode::Continuous => {}
        }
        if self.mode != DrawMode::Continuous {
            log::debug!("Entering continuous draw mode");
        }
        self.mode = DrawMode::Continuous;
        Ok(())
    }

    /// Leave continuous mode. The frame already in flight still draws once.
    pub fn stop_animation(&mut self) -> Result<(), ViewerError> {
        self.ensure_live()?;
        if self.mode == DrawMode::Continuous {
            log::debug!("Leaving continuous draw mode");
            self.mode = DrawMode::Scheduled;
        }
        Ok(())
    }

    /// Scheduler callback: the host invokes this once per fired frame request.
    pub fn on_frame(&mut self) {
        if self.disposed {
            log::debug!("Dropping frame delivered after dispose");
            self.stats.frames_dropped += 1;
            return;
        }
        match self.mode {
            DrawMode::Idle => {
                log::debug!("Dropping frame with no draw pending");
                self.stats.frames_dropped += 1;
            }
            DrawMode::Scheduled => {
                self.draw_pass();
                self.mode = DrawMode::Idle;
            }
            DrawMode::Continuous => {
                self.draw_pass();
                self.scheduler.request_frame();
            }
        }
    }

    fn draw_pass(&mut self) {
        self.controls.update(&mut *self.camera);
        self.camera.update();
        self.renderer.draw(&*self.camera);
        self.stats.frames_drawn += 1;
        log::trace!("Frame {} drawn", self.stats.frames_drawn);
    }

    // ── Input & resize ───────────────────────────────────────────────

    /// Drain the input source. Resize events run the resize transaction;
    /// pointer and wheel events go to the controls. Returns the number of
    /// events handled.
    pub fn process_input(&mut self) -> Result<usize, ViewerError> {
        self.ensure_live()?;
        let mut handled = 0;
        while let Some(event) = self.input.poll() {
            match event {
                InputEvent::Resize { width, height } => {
                    self.canvas.set_container_size(width, height);
                    self.apply_resize();
                }
                other => self.controls.handle_input(&other),
            }
            handled += 1;
        }
        if handled > 0 && self.redraw_on_input {
            self.request_draw()?;
        }
        Ok(handled)
    }

    /// Refit the canvas to its container and propagate the new viewport to
    /// renderer, camera and controls, in that order.
    pub fn handle_resize(&mut self) -> Result<(), ViewerError> {
        self.ensure_live()?;
        self.apply_resize();
        Ok(())
    }

    // Renderer first so the raster target is ready before the camera
    // projection follows it.
    fn apply_resize(&mut self) -> Viewport {
        self.canvas.fit_to_container();
        let viewport = self.canvas.viewport();
        self.renderer.set_viewport(viewport);
        self.camera.set_viewport(viewport);
        self.controls.set_viewport(viewport);
        self.stats.resizes += 1;
        log::debug!("Viewport resized to {}x{}", viewport.width, viewport.height);
        viewport
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Release input, controls and renderer resources, in that order.
    ///
    /// A frame already scheduled is not cancelled; it is dropped when it
    /// arrives. Every later call returns [`ViewerError::Disposed`].
    pub fn dispose(&mut self) -> Result<(), ViewerError> {
        self.ensure_live()?;
        self.input.dispose();
        self.controls.dispose();
        self.renderer.dispose();
        self.disposed = true;
        log::info!(
            "Viewer disposed after {} frames ({} requests coalesced)",
            self.stats.frames_drawn,
            self.stats.requests_coalesced
        );
        Ok(())
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// The camera the frame pass updates.
    pub fn camera(&self) -> &dyn Camera {
        &*self.camera
    }

    /// The controls that turn input into camera motion.
    pub fn controls(&self) -> &dyn Controls {
        &*self.controls
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Host access to the scheduler, to learn when a frame is due.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Host access to the canvas, e.g. to update the container size before
    /// calling [`handle_resize`](Self::handle_resize).
    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn mode(&self) -> DrawMode {
        self.mode
    }

    pub fn is_draw_pending(&self) -> bool {
        self.mode != DrawMode::Idle
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn stats(&self) -> ViewerStats {
        self.stats
    }
}
