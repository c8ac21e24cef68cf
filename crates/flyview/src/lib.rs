//! flyview: a render-window interactor for 3D viewers.
//!
//! The interactor sits between a windowing system and a renderer. It keeps
//! track of timers, decides which renderer an event belongs to, notifies
//! observers and animates the camera with "fly-to" flights.
//!
//! # Quick Start
//!
//! ```no_run
//! use flyview::*;
//!
//! fn main() -> Result<()> {
//!     init_logging();
//!
//!     let mut interactor = Interactor::headless();
//!     interactor.set_render_window(|| { /* draw one frame */ });
//!     let view = interactor.add_renderer(ViewportRenderer::new(1280, 720));
//!     interactor.initialize();
//!
//!     // Animate the camera toward a point of interest
//!     interactor.fly_to(view, Vec3::new(1.0, 0.5, 0.0))?;
//!
//!     // Drive timers from the event loop
//!     let timer = interactor.create_repeating_timer(16);
//!     interactor.advance_timers(16);
//!     interactor.destroy_timer(timer);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`flyview_core`] holds the engine-independent parts: the [`Camera`],
//!   [`Renderer`] and [`TimerPlatform`] traits, the [`TimerRegistry`] and the
//!   flight controller.
//! - This crate adds the [`Interactor`] facade and concrete collaborators:
//!   [`OrbitCamera`], [`ViewportRenderer`] and [`SoftTimerPlatform`].

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::struct_excessive_bools)]

mod camera;
mod events;
mod interactor;
mod renderer;
mod soft_timer;

// Re-export core types
pub use flyview_core::{
    find_poked_renderer, fly_to, fly_to_image, Camera, CancelToken, FlightMode, FlightOutcome,
    FlightPlan, InteractorError, InteractorOptions, LegacyTimerRequest, LegacyTimers,
    PlatformTimerHandle, Renderer, Result, TimerId, TimerKind, TimerPlatform, TimerRecord,
    TimerRegistry, Vec2, Vec3,
};

pub use camera::OrbitCamera;
pub use events::{EventState, InteractorEvent, ObserverId};
pub use interactor::Interactor;
pub use renderer::ViewportRenderer;
pub use soft_timer::SoftTimerPlatform;

/// Installs the `env_logger` backend for the `log` macros used by flyview.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    let _ = env_logger::try_init();
}
