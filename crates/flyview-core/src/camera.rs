//! Camera capability used by flights and direct manipulation.

use glam::Vec3;

/// The camera operations an interactor needs.
///
/// Implemented by the viewer's concrete camera; flights are written against
/// this trait only.
pub trait Camera {
    /// Point the camera looks at.
    fn focal_point(&self) -> Vec3;

    /// Moves the focal point without moving the eye.
    fn set_focal_point(&mut self, focal_point: Vec3);

    /// Eye position in world space.
    fn position(&self) -> Vec3;

    /// Moves the eye without moving the focal point.
    fn set_position(&mut self, position: Vec3);

    /// Moves the eye along the view direction, dividing the eye-to-focal
    /// distance by `factor`. Factors above 1 move closer.
    fn dolly(&mut self, factor: f32);

    /// Re-projects the view-up vector so it is perpendicular to the view direction.
    fn orthogonalize_view_up(&mut self);

    /// Fits the near/far clipping planes to the visible scene.
    fn reset_clipping_range(&mut self);
}

impl<C: Camera + ?Sized> Camera for &mut C {
    fn focal_point(&self) -> Vec3 {
        (**self).focal_point()
    }

    fn set_focal_point(&mut self, focal_point: Vec3) {
        (**self).set_focal_point(focal_point);
    }

    fn position(&self) -> Vec3 {
        (**self).position()
    }

    fn set_position(&mut self, position: Vec3) {
        (**self).set_position(position);
    }

    fn dolly(&mut self, factor: f32) {
        (**self).dolly(factor);
    }

    fn orthogonalize_view_up(&mut self) {
        (**self).orthogonalize_view_up();
    }

    fn reset_clipping_range(&mut self) {
        (**self).reset_clipping_range();
    }
}
