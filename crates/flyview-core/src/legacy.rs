//! Single-timer compatibility surface.
//!
//! Older callers assume an interactor runs at most one timer. [`LegacyTimers`]
//! keeps that contract on top of a [`TimerRegistry`]: the implicit "current"
//! timer is whichever id the registry counter holds right now. It is a
//! narrower and less safe API than the registry itself; new code should use
//! the id-returning methods instead.

use crate::timer::{TimerId, TimerKind, TimerPlatform, TimerRegistry};

/// Kind of request made through the legacy API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyTimerRequest {
    /// Start the implicit timer.
    First,
    /// Refresh the implicit timer. The timer is repeating, so nothing is done.
    Update,
}

/// Compatibility shim over a borrowed [`TimerRegistry`].
pub struct LegacyTimers<'a, P: TimerPlatform> {
    registry: &'a mut TimerRegistry<P>,
}

impl<'a, P: TimerPlatform> LegacyTimers<'a, P> {
    /// Wraps `registry`.
    pub fn new(registry: &'a mut TimerRegistry<P>) -> Self {
        Self { registry }
    }

    /// Handles a legacy create request.
    ///
    /// `First` creates a repeating timer of the legacy duration under the
    /// current counter value, without advancing it, and returns that id or
    /// [`TimerId::NONE`] if the platform refuses. `Update` is a silent no-op
    /// returning [`TimerId::LEGACY_SUCCESS`].
    pub fn create(&mut self, request: LegacyTimerRequest) -> TimerId {
        match request {
            LegacyTimerRequest::First => {
                let id = self.registry.current_timer_id();
                let duration_ms = self.registry.legacy_duration_ms();
                match self
                    .registry
                    .insert_timer(id, TimerKind::Repeating, duration_ms)
                {
                    Ok(()) => id,
                    Err(e) => {
                        log::warn!("legacy timer: {e}");
                        TimerId::NONE
                    }
                }
            }
            LegacyTimerRequest::Update => TimerId::LEGACY_SUCCESS,
        }
    }

    /// Destroys the timer stored under the current counter value.
    pub fn destroy(&mut self) -> bool {
        let id = self.registry.current_timer_id();
        self.registry.destroy_timer(id)
    }

    /// Id the next legacy request will target.
    pub fn current_id(&self) -> TimerId {
        self.registry.current_timer_id()
    }
}
