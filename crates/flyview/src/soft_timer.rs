//! Software timer service for headless loops and tests.
//!
//! Time only moves when [`SoftTimerPlatform::advance`] is called, so an event
//! loop without native timers can drive an interactor deterministically.

use std::collections::BTreeMap;

use flyview_core::{PlatformTimerHandle, TimerId, TimerKind, TimerPlatform};

#[derive(Debug, Clone, Copy)]
struct SoftTimer {
    kind: TimerKind,
    duration_ms: u64,
    elapsed_ms: u64,
}

/// A [`TimerPlatform`] whose clock is advanced manually.
#[derive(Debug, Default)]
pub struct SoftTimerPlatform {
    timers: BTreeMap<u64, SoftTimer>,
    last_handle: u64,
    fail_next_create: bool,
}

impl SoftTimerPlatform {
    /// Creates a platform with no armed timers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `create_timer` call fail.
    pub fn set_fail_next_create(&mut self, fail: bool) {
        self.fail_next_create = fail;
    }

    /// Number of armed native timers.
    pub fn armed_count(&self) -> usize {
        self.timers.len()
    }

    /// Returns true if `handle` is armed.
    pub fn is_armed(&self, handle: PlatformTimerHandle) -> bool {
        self.timers.contains_key(&handle.0)
    }

    /// Advances the clock and returns one handle per firing, in handle order.
    ///
    /// Repeating timers may fire several times in one call. One-shot timers
    /// fire once and are disarmed. Zero-duration timers fire once per call.
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<PlatformTimerHandle> {
        let mut fired = Vec::new();
        let mut expired = Vec::new();

        for (&handle, timer) in &mut self.timers {
            timer.elapsed_ms += elapsed_ms;
            let firings = if timer.duration_ms == 0 {
                1
            } else {
                timer.elapsed_ms / timer.duration_ms
            };
            if firings == 0 {
                continue;
            }

            match timer.kind {
                TimerKind::OneShot => {
                    fired.push(PlatformTimerHandle(handle));
                    expired.push(handle);
                }
                TimerKind::Repeating => {
                    if timer.duration_ms > 0 {
                        timer.elapsed_ms %= timer.duration_ms;
                    }
                    fired.extend((0..firings).map(|_| PlatformTimerHandle(handle)));
                }
            }
        }

        for handle in expired {
            self.timers.remove(&handle);
        }
        fired
    }
}

impl TimerPlatform for SoftTimerPlatform {
    fn create_timer(
        &mut self,
        timer_id: TimerId,
        kind: TimerKind,
        duration_ms: u64,
    ) -> Option<PlatformTimerHandle> {
        if std::mem::take(&mut self.fail_next_create) {
            log::debug!("soft timer platform refusing timer {timer_id}");
            return None;
        }
        self.last_handle += 1;
        self.timers.insert(
            self.last_handle,
            SoftTimer {
                kind,
                duration_ms,
                elapsed_ms: 0,
            },
        );
        Some(PlatformTimerHandle(self.last_handle))
    }

    fn destroy_timer(&mut self, handle: PlatformTimerHandle) -> bool {
        self.timers.remove(&handle.0).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeating_fires_per_period() {
        let mut platform = SoftTimerPlatform::new();
        let handle = platform
            .create_timer(TimerId(2), TimerKind::Repeating, 10)
            .unwrap();
        assert!(platform.advance(9).is_empty());
        assert_eq!(platform.advance(1), vec![handle]);
        assert_eq!(platform.advance(25), vec![handle, handle]);
        assert_eq!(platform.advance(5), vec![handle]);
        assert!(platform.is_armed(handle));
    }

    #[test]
    fn test_one_shot_disarms() {
        let mut platform = SoftTimerPlatform::new();
        let handle = platform
            .create_timer(TimerId(2), TimerKind::OneShot, 10)
            .unwrap();
        assert_eq!(platform.advance(30), vec![handle]);
        assert!(!platform.is_armed(handle));
        assert!(platform.advance(30).is_empty());
        assert!(!platform.destroy_timer(handle));
    }

    #[test]
    fn test_fail_next_create_is_single_use() {
        let mut platform = SoftTimerPlatform::new();
        platform.set_fail_next_create(true);
        assert!(platform.create_timer(TimerId(2), TimerKind::OneShot, 1).is_none());
        assert!(platform.create_timer(TimerId(3), TimerKind::OneShot, 1).is_some());
        assert_eq!(platform.armed_count(), 1);
    }
}
