use crate::viewport::Viewport;

/// Drawing surface sized against its container.
///
/// The container size is in logical pixels; the backing store is in device
/// pixels (`container * pixel_ratio`, truncated).
#[derive(Debug, Clone)]
pub struct Canvas {
    container_width: f64,
    container_height: f64,
    pixel_ratio: f64,
    width: u32,
    height: u32,
}

impl Canvas {
    pub fn new(container_width: f64, container_height: f64, pixel_ratio: f64) -> Self {
        Self {
            container_width,
            container_height,
            pixel_ratio,
            width: 0,
            height: 0,
        }
    }

    pub fn set_container_size(&mut self, width: f64, height: f64) {
        self.container_width = width;
        self.container_height = height;
    }

    /// Recompute the backing size from the container and return it.
    pub fn fit_to_container(&mut self) -> (u32, u32) {
        self.width = to_device_pixels(self.container_width, self.pixel_ratio);
        self.height = to_device_pixels(self.container_height, self.pixel_ratio);
        (self.width, self.height)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Full-canvas viewport for the current backing size.
    pub fn viewport(&self) -> Viewport {
        Viewport::from_size(self.width, self.height)
    }
}

// `as` saturates: negative and NaN land on 0.
fn to_device_pixels(logical: f64, pixel_ratio: f64) -> u32 {
    (logical * pixel_ratio).floor() as u32
}
