//! Core abstractions for flyview.
//!
//! This crate provides the pieces of a render-window interactor that do not
//! depend on any windowing system or rendering engine:
//! - [`Camera`], [`Renderer`] and [`TimerPlatform`] capability traits
//! - [`TimerRegistry`] and the [`LegacyTimers`] compatibility surface
//! - Camera fly-to animation ([`FlightPlan`], [`fly_to`], [`fly_to_image`])
//! - Event-target resolution ([`find_poked_renderer`])
//! - Configuration options

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Options structs legitimately have many boolean flags
#![allow(clippy::struct_excessive_bools)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod camera;
pub mod error;
pub mod flight;
pub mod legacy;
pub mod options;
pub mod renderer;
pub mod timer;

pub use camera::Camera;
pub use error::{InteractorError, Result};
pub use flight::{fly_to, fly_to_image, CancelToken, FlightMode, FlightOutcome, FlightPlan};
pub use legacy::{LegacyTimerRequest, LegacyTimers};
pub use options::InteractorOptions;
pub use renderer::{find_poked_renderer, Renderer};
pub use timer::{PlatformTimerHandle, TimerId, TimerKind, TimerPlatform, TimerRecord, TimerRegistry};

// Re-export glam types for convenience
pub use glam::{Vec2, Vec3};
