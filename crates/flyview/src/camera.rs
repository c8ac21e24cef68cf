//! Concrete perspective camera.

use flyview_core::Camera;
use glam::{Mat4, Vec3};

/// Near/far ratio kept when fitting the clipping range.
const NEAR_PLANE_TOLERANCE: f32 = 0.001;

/// A 3D camera looking at a focal point.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    /// Camera position in world space.
    pub position: Vec3,
    /// Point the camera is looking at.
    pub focal_point: Vec3,
    /// Up vector.
    pub view_up: Vec3,
    /// Field of view in radians.
    pub fov: f32,
    /// Aspect ratio (width / height).
    pub aspect_ratio: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
    /// Scene bounds used to fit the clipping range.
    pub scene_bounds: Option<(Vec3, Vec3)>,
}

impl OrbitCamera {
    /// Creates a new camera with default settings.
    #[must_use]
    pub fn new(aspect_ratio: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 3.0),
            focal_point: Vec3::ZERO,
            view_up: Vec3::Y,
            fov: std::f32::consts::FRAC_PI_4, // 45 degrees
            aspect_ratio,
            near: 0.01,
            far: 1000.0,
            scene_bounds: None,
        }
    }

    /// Returns the view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.focal_point, self.view_up)
    }

    /// Returns the projection matrix.
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect_ratio, self.near, self.far)
    }

    /// Unit vector from the eye toward the focal point.
    #[must_use]
    pub fn view_direction(&self) -> Vec3 {
        (self.focal_point - self.position).normalize_or_zero()
    }

    /// Eye-to-focal-point distance.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.position.distance(self.focal_point)
    }

    /// Sets the bounds the clipping range is fitted to.
    pub fn set_scene_bounds(&mut self, min: Vec3, max: Vec3) {
        self.scene_bounds = Some((min.min(max), min.max(max)));
    }

    /// Points the camera at the center of a bounding box and fits the clipping range.
    pub fn look_at_box(&mut self, min: Vec3, max: Vec3) {
        let center = (min + max) * 0.5;
        let size = (max - min).length();

        self.set_scene_bounds(min, max);
        self.focal_point = center;
        self.position = center + Vec3::new(0.0, 0.0, size * 1.5);
        self.view_up = Vec3::Y;
        self.reset_clipping_range();
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(16.0 / 9.0)
    }
}

impl Camera for OrbitCamera {
    fn focal_point(&self) -> Vec3 {
        self.focal_point
    }

    fn set_focal_point(&mut self, focal_point: Vec3) {
        self.focal_point = focal_point;
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn dolly(&mut self, factor: f32) {
        if factor <= 0.0 {
            return;
        }
        let direction = self.view_direction();
        let distance = self.distance() / factor;
        self.position = self.focal_point - direction * distance;
    }

    fn orthogonalize_view_up(&mut self) {
        let forward = self.view_direction();
        let right = forward.cross(self.view_up);
        // Degenerate when up is parallel to the view direction
        if right.length_squared() < 1e-12 {
            return;
        }
        self.view_up = right.cross(forward).normalize();
    }

    fn reset_clipping_range(&mut self) {
        let Some((min, max)) = self.scene_bounds else {
            self.near = 0.01;
            self.far = 1000.0;
            return;
        };

        let forward = self.view_direction();
        let mut nearest = f32::MAX;
        let mut farthest = f32::MIN;
        for i in 0..8 {
            let corner = Vec3::new(
                if i & 1 == 0 { min.x } else { max.x },
                if i & 2 == 0 { min.y } else { max.y },
                if i & 4 == 0 { min.z } else { max.z },
            );
            let depth = (corner - self.position).dot(forward);
            nearest = nearest.min(depth);
            farthest = farthest.max(depth);
        }

        // Pad so geometry on the bounds is not clipped
        let far = (farthest * 1.01).max(NEAR_PLANE_TOLERANCE);
        let near = (nearest * 0.99).max(far * NEAR_PLANE_TOLERANCE);
        self.near = near;
        self.far = far;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_defaults() {
        let camera = OrbitCamera::default();
        assert_eq!(camera.view_up, Vec3::Y);
        assert!((camera.distance() - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_dolly_moves_closer() {
        let mut camera = OrbitCamera::new(1.0);
        camera.dolly(2.0);
        assert!((camera.distance() - 1.5).abs() < 1e-5);
        assert_eq!(camera.focal_point, Vec3::ZERO);
    }

    #[test]
    fn test_dolly_ignores_non_positive() {
        let mut camera = OrbitCamera::new(1.0);
        camera.dolly(0.0);
        camera.dolly(-1.0);
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 3.0));
    }

    #[test]
    fn test_orthogonalize_view_up() {
        let mut camera = OrbitCamera::new(1.0);
        camera.view_up = Vec3::new(0.0, 1.0, 1.0).normalize();
        camera.orthogonalize_view_up();
        assert!(camera.view_up.dot(camera.view_direction()).abs() < 1e-5);
        assert!((camera.view_up.length() - 1.0).abs() < 1e-5);
        assert!(camera.view_up.y > 0.0);
    }

    #[test]
    fn test_orthogonalize_parallel_up_is_noop() {
        let mut camera = OrbitCamera::new(1.0);
        camera.view_up = Vec3::NEG_Z;
        camera.orthogonalize_view_up();
        assert_eq!(camera.view_up, Vec3::NEG_Z);
    }

    #[test]
    fn test_clipping_range_fits_bounds() {
        let mut camera = OrbitCamera::new(1.0);
        camera.position = Vec3::new(0.0, 0.0, 10.0);
        camera.set_scene_bounds(Vec3::splat(-1.0), Vec3::splat(1.0));
        camera.reset_clipping_range();
        assert!(camera.near <= 9.0 && camera.near > 8.0);
        assert!(camera.far >= 11.0 && camera.far < 12.0);
    }

    #[test]
    fn test_clipping_range_without_bounds() {
        let mut camera = OrbitCamera::new(1.0);
        camera.near = 5.0;
        camera.reset_clipping_range();
        assert!((camera.near - 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_look_at_box() {
        let mut camera = OrbitCamera::new(1.0);
        camera.look_at_box(Vec3::ZERO, Vec3::splat(2.0));
        assert_eq!(camera.focal_point, Vec3::ONE);
        assert!(camera.near > 0.0 && camera.near < camera.far);
    }
}
