//! Timer registry mapping interactor timer ids to platform timer handles.
//!
//! Interactor code hands out its own [`TimerId`]s and keeps the platform
//! representation behind a [`TimerPlatform`]. When a native timer fires, the
//! platform layer reports its handle and [`TimerRegistry::translate_platform_handle`]
//! maps it back.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{InteractorError, Result};

/// Identifier of a timer owned by a [`TimerRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TimerId(pub u32);

impl TimerId {
    /// Sentinel for "not found" and "creation failed". Never assigned.
    pub const NONE: TimerId = TimerId(0);

    /// Non-zero success marker returned by legacy update requests.
    ///
    /// It does not necessarily name a live timer.
    pub const LEGACY_SUCCESS: TimerId = TimerId(1);

    /// Returns true unless this is [`TimerId::NONE`].
    #[must_use]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque handle issued by a [`TimerPlatform`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlatformTimerHandle(pub u64);

/// Whether a timer fires once or periodically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimerKind {
    /// Fires once.
    #[default]
    OneShot,
    /// Fires every `duration_ms` until destroyed.
    Repeating,
}

impl fmt::Display for TimerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerKind::OneShot => f.write_str("one-shot"),
            TimerKind::Repeating => f.write_str("repeating"),
        }
    }
}

/// Native timer service supplied by the windowing layer.
pub trait TimerPlatform {
    /// Creates a native timer. Returns `None` if the platform refuses.
    fn create_timer(
        &mut self,
        timer_id: TimerId,
        kind: TimerKind,
        duration_ms: u64,
    ) -> Option<PlatformTimerHandle>;

    /// Destroys a native timer. Returns whether the platform knew the handle.
    fn destroy_timer(&mut self, handle: PlatformTimerHandle) -> bool;
}

impl<P: TimerPlatform + ?Sized> TimerPlatform for Box<P> {
    fn create_timer(
        &mut self,
        timer_id: TimerId,
        kind: TimerKind,
        duration_ms: u64,
    ) -> Option<PlatformTimerHandle> {
        (**self).create_timer(timer_id, kind, duration_ms)
    }

    fn destroy_timer(&mut self, handle: PlatformTimerHandle) -> bool {
        (**self).destroy_timer(handle)
    }
}

/// Bookkeeping for one registered timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerRecord {
    /// Handle of the native timer currently backing this id.
    pub platform_handle: PlatformTimerHandle,
    /// One-shot or repeating.
    pub kind: TimerKind,
    /// Timer period in milliseconds.
    pub duration_ms: u64,
}

/// Default duration of timers created through the legacy API.
pub const DEFAULT_LEGACY_DURATION_MS: u64 = 10;

/// Registry of active timers.
///
/// Ids are allocated from a counter owned by the registry. Modern creates
/// pre-increment it, so the first modern id is 2; the legacy surface reuses
/// the current value (see [`LegacyTimers`](crate::LegacyTimers)).
#[derive(Debug)]
pub struct TimerRegistry<P> {
    platform: P,
    timers: BTreeMap<TimerId, TimerRecord>,
    current_id: u32,
    legacy_duration_ms: u64,
}

impl<P: TimerPlatform> TimerRegistry<P> {
    /// Creates an empty registry backed by `platform`.
    pub fn new(platform: P) -> Self {
        Self {
            platform,
            timers: BTreeMap::new(),
            current_id: 1,
            legacy_duration_ms: DEFAULT_LEGACY_DURATION_MS,
        }
    }

    /// Creates a timer, reporting platform refusal or id exhaustion as an error.
    pub fn create_timer(&mut self, kind: TimerKind, duration_ms: u64) -> Result<TimerId> {
        let Some(next) = self.current_id.checked_add(1) else {
            log::error!("timer ids exhausted");
            return Err(InteractorError::TimerCreationFailed { kind, duration_ms });
        };
        self.current_id = next;
        let id = TimerId(next);
        self.insert_timer(id, kind, duration_ms)?;
        Ok(id)
    }

    /// Creates a repeating timer. Returns [`TimerId::NONE`] if the platform refuses.
    pub fn create_repeating_timer(&mut self, duration_ms: u64) -> TimerId {
        self.create_or_none(TimerKind::Repeating, duration_ms)
    }

    /// Creates a one-shot timer. Returns [`TimerId::NONE`] if the platform refuses.
    pub fn create_one_shot_timer(&mut self, duration_ms: u64) -> TimerId {
        self.create_or_none(TimerKind::OneShot, duration_ms)
    }

    fn create_or_none(&mut self, kind: TimerKind, duration_ms: u64) -> TimerId {
        match self.create_timer(kind, duration_ms) {
            Ok(id) => id,
            Err(e) => {
                log::warn!("{e}");
                TimerId::NONE
            }
        }
    }

    /// Asks the platform for a timer and stores it under `id`.
    ///
    /// An existing record under `id` is replaced and its native timer destroyed.
    pub(crate) fn insert_timer(
        &mut self,
        id: TimerId,
        kind: TimerKind,
        duration_ms: u64,
    ) -> Result<()> {
        let handle = self
            .platform
            .create_timer(id, kind, duration_ms)
            .ok_or(InteractorError::TimerCreationFailed { kind, duration_ms })?;

        let record = TimerRecord {
            platform_handle: handle,
            kind,
            duration_ms,
        };
        if let Some(old) = self.timers.insert(id, record) {
            log::warn!("timer {id} replaced; destroying its previous native timer");
            self.platform.destroy_timer(old.platform_handle);
        }
        log::debug!("created {kind} timer {id} ({duration_ms} ms) -> {handle:?}");
        Ok(())
    }

    /// Destroys a timer. Returns false if `id` is unknown.
    pub fn destroy_timer(&mut self, id: TimerId) -> bool {
        let Some(record) = self.timers.remove(&id) else {
            return false;
        };
        self.platform.destroy_timer(record.platform_handle);
        log::debug!("destroyed timer {id}");
        true
    }

    /// Restarts a timer with its original kind and duration.
    ///
    /// If the platform refuses to recreate it, the timer is dropped from the
    /// registry and false is returned.
    pub fn reset_timer(&mut self, id: TimerId) -> bool {
        let Some(record) = self.timers.get(&id).copied() else {
            return false;
        };
        self.platform.destroy_timer(record.platform_handle);

        match self
            .platform
            .create_timer(id, record.kind, record.duration_ms)
        {
            Some(handle) => {
                if let Some(stored) = self.timers.get_mut(&id) {
                    stored.platform_handle = handle;
                }
                true
            }
            None => {
                log::warn!("timer {id} could not be recreated; removing it");
                self.timers.remove(&id);
                false
            }
        }
    }

    /// Returns true if `id` names a live one-shot timer.
    pub fn is_one_shot(&self, id: TimerId) -> bool {
        self.kind(id) == Some(TimerKind::OneShot)
    }

    /// Returns the duration of `id`, or 0 if unknown.
    pub fn duration(&self, id: TimerId) -> u64 {
        self.timers.get(&id).map_or(0, |r| r.duration_ms)
    }

    /// Returns the kind of `id`.
    pub fn kind(&self, id: TimerId) -> Option<TimerKind> {
        self.timers.get(&id).map(|r| r.kind)
    }

    /// Returns the full record of `id`.
    pub fn record(&self, id: TimerId) -> Option<&TimerRecord> {
        self.timers.get(&id)
    }

    /// Maps a platform handle back to its timer id, or [`TimerId::NONE`].
    ///
    /// Linear in the number of active timers.
    pub fn translate_platform_handle(&self, handle: PlatformTimerHandle) -> TimerId {
        self.timers
            .iter()
            .find(|(_, r)| r.platform_handle == handle)
            .map_or(TimerId::NONE, |(id, _)| *id)
    }

    /// Current value of the id counter.
    pub fn current_timer_id(&self) -> TimerId {
        TimerId(self.current_id)
    }

    /// Duration used by legacy timer creation.
    pub fn legacy_duration_ms(&self) -> u64 {
        self.legacy_duration_ms
    }

    /// Sets the duration used by legacy timer creation.
    pub fn set_legacy_duration_ms(&mut self, duration_ms: u64) {
        self.legacy_duration_ms = duration_ms;
    }

    /// Ids of all live timers, ascending.
    pub fn ids(&self) -> impl Iterator<Item = TimerId> + '_ {
        self.timers.keys().copied()
    }

    /// Returns the number of live timers.
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// Returns true if no timers are live.
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Destroys every live timer.
    pub fn clear(&mut self) {
        for record in std::mem::take(&mut self.timers).into_values() {
            self.platform.destroy_timer(record.platform_handle);
        }
    }

    /// Returns the backing platform.
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Returns the backing platform mutably.
    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }
}
