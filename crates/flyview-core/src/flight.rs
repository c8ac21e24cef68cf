//! Camera "fly-to" animation.
//!
//! A flight moves the focal point in equal steps toward a target, dollying a
//! little on every frame and rendering each frame synchronously. The
//! image-plane variant keeps the focal depth fixed and translates the eye
//! along with the focal point.

use std::num::NonZeroU32;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use glam::{Vec2, Vec3};

use crate::camera::Camera;
use crate::error::{InteractorError, Result};

/// Which kind of flight a plan describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightMode {
    /// Focal point moves in 3D; view-up is re-orthogonalized every frame.
    Point,
    /// Focal point and eye move in x,y only; z is held.
    ImagePlane,
}

/// Result of executing a flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightOutcome {
    /// Every frame was rendered.
    Completed,
    /// The cancel token was raised between frames.
    Cancelled { frames_rendered: u32 },
}

/// Shared flag checked by a flight between frames.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Clears a previous cancellation.
    pub fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }

    /// Returns true once [`cancel`](Self::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Precomputed path of one flight.
///
/// The path is fixed at construction; build a new plan to change it.
#[derive(Debug, Clone)]
pub struct FlightPlan {
    mode: FlightMode,
    start_focal_point: Vec3,
    target_focal_point: Vec3,
    start_position: Option<Vec3>,
    target_position: Option<Vec3>,
    frame_count: NonZeroU32,
    dolly_factor: f32,
    direction: Vec3,
    step: f32,
}

impl FlightPlan {
    fn new(
        mode: FlightMode,
        start: Vec3,
        target: Vec3,
        start_position: Option<Vec3>,
        frame_count: NonZeroU32,
        dolly_factor: f32,
    ) -> Self {
        let offset = target - start;
        let distance = offset.length();
        let direction = offset.normalize_or_zero();
        #[allow(clippy::cast_precision_loss)]
        let step = distance / frame_count.get() as f32;

        Self {
            mode,
            start_focal_point: start,
            target_focal_point: target,
            start_position,
            target_position: start_position.map(|p| p + offset),
            frame_count,
            dolly_factor,
            direction,
            step,
        }
    }

    /// Plans a 3D flight of `camera`'s focal point to `target`.
    pub fn to_point(
        camera: &dyn Camera,
        target: Vec3,
        frame_count: NonZeroU32,
        dolly_factor: f32,
    ) -> Self {
        Self::new(
            FlightMode::Point,
            camera.focal_point(),
            target,
            None,
            frame_count,
            dolly_factor,
        )
    }

    /// Plans an image-plane flight to `target` (x, y), keeping the focal depth.
    pub fn to_image_point(
        camera: &dyn Camera,
        target: Vec2,
        frame_count: NonZeroU32,
        dolly_factor: f32,
    ) -> Self {
        let start = camera.focal_point();
        Self::new(
            FlightMode::ImagePlane,
            start,
            target.extend(start.z),
            Some(camera.position()),
            frame_count,
            dolly_factor,
        )
    }

    /// Which variant to run.
    pub fn mode(&self) -> FlightMode {
        self.mode
    }

    /// Focal point at frame 0.
    pub fn start_focal_point(&self) -> Vec3 {
        self.start_focal_point
    }

    /// Focal point at the last frame.
    pub fn target_focal_point(&self) -> Vec3 {
        self.target_focal_point
    }

    /// Eye position at frame 0 (image-plane flights only).
    pub fn start_position(&self) -> Option<Vec3> {
        self.start_position
    }

    /// Eye position at the last frame (image-plane flights only).
    pub fn target_position(&self) -> Option<Vec3> {
        self.target_position
    }

    /// Number of frames rendered.
    pub fn frame_count(&self) -> NonZeroU32 {
        self.frame_count
    }

    /// Total dolly spread over the flight.
    pub fn dolly_factor(&self) -> f32 {
        self.dolly_factor
    }

    /// Straight-line distance the focal point travels.
    pub fn distance(&self) -> f32 {
        #[allow(clippy::cast_precision_loss)]
        let frames = self.frame_count.get() as f32;
        self.step * frames
    }

    /// Dolly applied on every frame.
    pub fn dolly_per_frame(&self) -> f32 {
        #[allow(clippy::cast_precision_loss)]
        let frames = self.frame_count.get() as f32;
        self.dolly_factor / frames + 1.0
    }

    /// Focal point after `frame` steps.
    pub fn focal_point_at(&self, frame: u32) -> Vec3 {
        #[allow(clippy::cast_precision_loss)]
        let i = frame as f32;
        self.start_focal_point + self.direction * i * self.step
    }

    /// Eye position after `frame` steps, for image-plane flights.
    pub fn position_at(&self, frame: u32) -> Option<Vec3> {
        #[allow(clippy::cast_precision_loss)]
        let i = frame as f32;
        self.start_position.map(|p| p + self.direction * i * self.step)
    }

    /// Runs the flight, calling `render` once per frame.
    pub fn fly<C, F>(
        &self,
        camera: &mut C,
        mut render: F,
        cancel: Option<&CancelToken>,
    ) -> FlightOutcome
    where
        C: Camera + ?Sized,
        F: FnMut(),
    {
        let dolly = self.dolly_per_frame();
        log::debug!(
            "flying {:?} from {} to {} over {} frames",
            self.mode,
            self.start_focal_point,
            self.target_focal_point,
            self.frame_count
        );

        for frame in 1..=self.frame_count.get() {
            if cancel.is_some_and(CancelToken::is_cancelled) {
                log::debug!("flight cancelled after {} frames", frame - 1);
                return FlightOutcome::Cancelled {
                    frames_rendered: frame - 1,
                };
            }

            camera.set_focal_point(self.focal_point_at(frame));
            if let Some(position) = self.position_at(frame) {
                camera.set_position(position);
            }
            camera.dolly(dolly);
            if self.mode == FlightMode::Point {
                camera.orthogonalize_view_up();
            }
            camera.reset_clipping_range();
            render();
        }

        FlightOutcome::Completed
    }
}

fn frames(frame_count: u32) -> Result<NonZeroU32> {
    NonZeroU32::new(frame_count).ok_or(InteractorError::InvalidFrameCount)
}

/// Flies `camera`'s focal point to `target` over `frame_count` frames.
pub fn fly_to<C, F>(
    camera: &mut C,
    target: Vec3,
    frame_count: u32,
    dolly_factor: f32,
    render: F,
    cancel: Option<&CancelToken>,
) -> Result<FlightOutcome>
where
    C: Camera,
    F: FnMut(),
{
    let plan = FlightPlan::to_point(&*camera, target, frames(frame_count)?, dolly_factor);
    Ok(plan.fly(camera, render, cancel))
}

/// Flies `camera` across the image plane to `target` over `frame_count` frames.
pub fn fly_to_image<C, F>(
    camera: &mut C,
    target: Vec2,
    frame_count: u32,
    dolly_factor: f32,
    render: F,
    cancel: Option<&CancelToken>,
) -> Result<FlightOutcome>
where
    C: Camera,
    F: FnMut(),
{
    let plan = FlightPlan::to_image_point(&*camera, target, frames(frame_count)?, dolly_factor);
    Ok(plan.fly(camera, render, cancel))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records calls without any view geometry.
    #[derive(Default)]
    struct RecordingCamera {
        focal: Vec3,
        position: Vec3,
        dollies: Vec<f32>,
        orthogonalized: u32,
        clipping_resets: u32,
    }

    impl Camera for RecordingCamera {
        fn focal_point(&self) -> Vec3 {
            self.focal
        }
        fn set_focal_point(&mut self, focal_point: Vec3) {
            self.focal = focal_point;
        }
        fn position(&self) -> Vec3 {
            self.position
        }
        fn set_position(&mut self, position: Vec3) {
            self.position = position;
        }
        fn dolly(&mut self, factor: f32) {
            self.dollies.push(factor);
        }
        fn orthogonalize_view_up(&mut self) {
            self.orthogonalized += 1;
        }
        fn reset_clipping_range(&mut self) {
            self.clipping_resets += 1;
        }
    }

    #[test]
    fn test_fly_to_reaches_target() {
        let mut camera = RecordingCamera::default();
        let target = Vec3::new(3.0, -4.0, 12.0);
        let mut renders = 0;
        let outcome = fly_to(&mut camera, target, 15, 0.3, || renders += 1, None).unwrap();

        assert_eq!(outcome, FlightOutcome::Completed);
        assert_eq!(renders, 15);
        assert!((camera.focal - target).length() < 1e-4);
        assert_eq!(camera.orthogonalized, 15);
        assert_eq!(camera.clipping_resets, 15);
        assert!(camera.dollies.iter().all(|d| (d - 1.02).abs() < 1e-6));
    }

    #[test]
    fn test_zero_distance_is_pure_dolly() {
        let mut camera = RecordingCamera {
            focal: Vec3::ONE,
            position: Vec3::new(1.0, 1.0, 5.0),
            ..Default::default()
        };
        let mut renders = 0;
        fly_to(&mut camera, Vec3::ONE, 4, 0.4, || renders += 1, None).unwrap();

        assert_eq!(renders, 4);
        assert_eq!(camera.dollies.len(), 4);
        assert_eq!(camera.focal, Vec3::ONE);
        assert_eq!(camera.position, Vec3::new(1.0, 1.0, 5.0));
    }

    #[test]
    fn test_zero_frames_rejected() {
        let mut camera = RecordingCamera::default();
        let result = fly_to(&mut camera, Vec3::X, 0, 0.3, || {}, None);
        assert!(matches!(result, Err(InteractorError::InvalidFrameCount)));
        assert!(camera.dollies.is_empty());
    }

    #[test]
    fn test_image_flight_holds_depth() {
        let mut camera = RecordingCamera {
            focal: Vec3::new(0.0, 0.0, -2.0),
            position: Vec3::new(0.0, 0.0, 8.0),
            ..Default::default()
        };
        fly_to_image(&mut camera, Vec2::new(6.0, 8.0), 10, 0.3, || {}, None).unwrap();

        assert!((camera.focal - Vec3::new(6.0, 8.0, -2.0)).length() < 1e-4);
        assert!((camera.position - Vec3::new(6.0, 8.0, 8.0)).length() < 1e-4);
        assert_eq!(camera.orthogonalized, 0);
        assert_eq!(camera.clipping_resets, 10);
    }

    #[test]
    fn test_plan_interpolation() {
        let camera = RecordingCamera::default();
        let plan = FlightPlan::to_point(
            &camera,
            Vec3::new(10.0, 0.0, 0.0),
            NonZeroU32::new(5).unwrap(),
            0.5,
        );
        assert!((plan.distance() - 10.0).abs() < 1e-5);
        assert!((plan.dolly_per_frame() - 1.1).abs() < 1e-6);
        assert!((plan.focal_point_at(2) - Vec3::new(4.0, 0.0, 0.0)).length() < 1e-5);
        assert!(plan.position_at(2).is_none());
        assert!(plan.target_position().is_none());
    }

    #[test]
    fn test_plan_last_frame_lands_on_declared_target() {
        let mut camera = RecordingCamera {
            position: Vec3::new(0.0, 0.0, 6.0),
            ..Default::default()
        };
        let plan = FlightPlan::to_image_point(
            &camera,
            Vec2::new(10.0, 0.0),
            NonZeroU32::new(5).unwrap(),
            0.3,
        );
        let last = plan.frame_count().get();
        assert_eq!(plan.mode(), FlightMode::ImagePlane);
        assert_eq!(plan.start_focal_point(), Vec3::ZERO);
        assert!((plan.focal_point_at(last) - plan.target_focal_point()).length() < 1e-5);
        let landed = plan.position_at(last).unwrap();
        assert!((landed - plan.target_position().unwrap()).length() < 1e-5);

        let replay = plan.clone();
        let mut renders = 0;
        let outcome = replay.fly(&mut camera, || renders += 1, None);
        assert_eq!(outcome, FlightOutcome::Completed);
        assert_eq!(renders, 5);
        assert!((camera.focal - plan.target_focal_point()).length() < 1e-5);
        assert!((camera.position - Vec3::new(10.0, 0.0, 6.0)).length() < 1e-5);
        assert!((plan.dolly_factor() - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn test_cancel_between_frames() {
        let mut camera = RecordingCamera::default();
        let token = CancelToken::new();
        let mut renders = 0;
        let outcome = fly_to(
            &mut camera,
            Vec3::new(0.0, 10.0, 0.0),
            10,
            0.3,
            || {
                renders += 1;
                if renders == 3 {
                    token.cancel();
                }
            },
            Some(&token),
        )
        .unwrap();

        assert_eq!(outcome, FlightOutcome::Cancelled { frames_rendered: 3 });
        assert_eq!(renders, 3);
        assert!((camera.focal - Vec3::new(0.0, 3.0, 0.0)).length() < 1e-5);
    }
}
