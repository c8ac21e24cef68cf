//! Renderer capability and event-target resolution.

use crate::camera::Camera;

/// A renderer drawing into one viewport of a render window.
pub trait Renderer {
    /// Returns true if display coordinate `(x, y)` falls inside this renderer's viewport.
    fn is_in_viewport(&self, x: i32, y: i32) -> bool;

    /// Whether this renderer accepts interaction events.
    fn is_interactive(&self) -> bool;

    /// The camera this renderer draws through.
    fn active_camera(&self) -> &dyn Camera;

    /// The camera this renderer draws through, mutably.
    fn active_camera_mut(&mut self) -> &mut dyn Camera;
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn is_in_viewport(&self, x: i32, y: i32) -> bool {
        (**self).is_in_viewport(x, y)
    }

    fn is_interactive(&self) -> bool {
        (**self).is_interactive()
    }

    fn active_camera(&self) -> &dyn Camera {
        (**self).active_camera()
    }

    fn active_camera_mut(&mut self) -> &mut dyn Camera {
        (**self).active_camera_mut()
    }
}

/// Picks the renderer that should receive an event at display coordinate `(x, y)`.
///
/// `renderers` is ordered back to front, so the scan starts at the last one.
/// The first interactive renderer containing the point wins. Failing that,
/// the first interactive renderer met in the scan, then the first one
/// containing the point, then index 0. Returns `None` only for an empty slice.
pub fn find_poked_renderer<R: Renderer>(renderers: &[R], x: i32, y: i32) -> Option<usize> {
    let mut interactive = None;
    let mut in_viewport = None;

    for (i, renderer) in renderers.iter().enumerate().rev() {
        let contains = renderer.is_in_viewport(x, y);
        let accepts = renderer.is_interactive();
        if contains && accepts {
            return Some(i);
        }
        if accepts && interactive.is_none() {
            interactive = Some(i);
        }
        if contains && in_viewport.is_none() {
            in_viewport = Some(i);
        }
    }

    interactive
        .or(in_viewport)
        .or_else(|| (!renderers.is_empty()).then_some(0))
}
