use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Pixel rectangle a camera projects into and a renderer rasterizes onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Viewport {
    /// Left edge in device pixels.
    pub x: i32,
    /// Top edge in device pixels.
    pub y: i32,
    /// Width in device pixels.
    pub width: u32,
    /// Height in device pixels.
    pub height: u32,
}

impl Viewport {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A viewport anchored at the origin covering `width` x `height` pixels.
    pub fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width over height, or `None` for a zero-area viewport.
    pub fn aspect_ratio(&self) -> Option<f32> {
        if self.is_empty() {
            None
        } else {
            Some(self.width as f32 / self.height as f32)
        }
    }

    /// Whether a device-pixel position falls inside the rectangle.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        let left = self.x as f32;
        let top = self.y as f32;
        px >= left && py >= top && px < left + self.width as f32 && py < top + self.height as f32
    }

    /// Convert a device-pixel position to normalized device coordinates
    /// ([-1, 1] on both axes, +Y up).
    pub fn screen_to_ndc(&self, px: f32, py: f32) -> Option<Vec2> {
        if self.is_empty() {
            return None;
        }
        let nx = (px - self.x as f32) / self.width as f32 * 2.0 - 1.0;
        let ny = 1.0 - (py - self.y as f32) / self.height as f32 * 2.0;
        Some(Vec2::new(nx, ny))
    }
}
