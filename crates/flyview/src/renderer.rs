//! Concrete viewport renderer.

use flyview_core::{Camera, Renderer};
use glam::Vec2;

use crate::camera::OrbitCamera;

/// A renderer occupying a normalized rectangle of the render window.
///
/// Display coordinates are pixels with the origin at the bottom-left corner.
#[derive(Debug, Clone)]
pub struct ViewportRenderer {
    /// Lower-left corner of the viewport in normalized window coordinates.
    pub viewport_min: Vec2,
    /// Upper-right corner of the viewport in normalized window coordinates.
    pub viewport_max: Vec2,
    /// Render window size in pixels.
    pub display_size: (u32, u32),
    /// Whether this renderer accepts interaction events.
    pub interactive: bool,
    /// The camera this renderer draws through.
    pub camera: OrbitCamera,
}

impl ViewportRenderer {
    /// Creates an interactive renderer covering the whole window.
    pub fn new(width: u32, height: u32) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let aspect_ratio = width as f32 / height.max(1) as f32;
        Self {
            viewport_min: Vec2::ZERO,
            viewport_max: Vec2::ONE,
            display_size: (width, height),
            interactive: true,
            camera: OrbitCamera::new(aspect_ratio),
        }
    }

    /// Restricts the renderer to a normalized sub-rectangle of the window.
    #[must_use]
    pub fn with_viewport(mut self, min: Vec2, max: Vec2) -> Self {
        self.viewport_min = min.min(max);
        self.viewport_max = min.max(max);
        self
    }

    /// Sets whether the renderer accepts interaction events.
    #[must_use]
    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Updates the window size after a resize.
    pub fn set_display_size(&mut self, width: u32, height: u32) {
        self.display_size = (width, height);
    }
}

impl Renderer for ViewportRenderer {
    fn is_in_viewport(&self, x: i32, y: i32) -> bool {
        #[allow(clippy::cast_precision_loss)]
        let size = Vec2::new(self.display_size.0 as f32, self.display_size.1 as f32);
        let lower = self.viewport_min * size;
        let upper = self.viewport_max * size;
        #[allow(clippy::cast_precision_loss)]
        let point = Vec2::new(x as f32, y as f32);
        point.cmpge(lower).all() && point.cmple(upper).all()
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn active_camera(&self) -> &dyn Camera {
        &self.camera
    }

    fn active_camera_mut(&mut self) -> &mut dyn Camera {
        &mut self.camera
    }
}
