//! Interactor events, observers, and per-event bookkeeping.

use flyview_core::{PlatformTimerHandle, TimerId, TimerKind};

/// Events an interactor notifies observers about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractorEvent {
    /// A frame was requested through `render()`.
    Render,
    /// The user asked to leave the application.
    Exit,
    /// Application-defined user event.
    User,
    /// A pick operation started.
    StartPick,
    /// A pick operation finished.
    EndPick,
    /// A registered timer fired.
    Timer,
}

/// Identifier returned when adding an observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(pub u64);

/// State of the event currently being dispatched.
///
/// Display coordinates are pixels with the origin at the bottom-left corner.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventState {
    /// Position of the current event.
    pub position: (i32, i32),
    /// Position of the previous event.
    pub last_position: (i32, i32),
    /// Current window size.
    pub size: (i32, i32),
    /// Size carried by the most recent resize event.
    pub event_size: (i32, i32),
    /// Whether Control was held.
    pub control_key: bool,
    /// Whether Shift was held.
    pub shift_key: bool,
    /// Whether Alt was held.
    pub alt_key: bool,
    /// Character of the key, if any.
    pub key_code: Option<char>,
    /// Key auto-repeat count.
    pub repeat_count: u32,
    /// Symbolic key name, e.g. `"Escape"`.
    pub key_sym: Option<String>,
    /// Scale factor of the current pinch gesture.
    pub pinch_gesture_factor: f64,
    /// Angle in degrees of the current rotate gesture.
    pub rotate_gesture_angle: f64,
    /// Direction code of the current swipe gesture.
    pub swipe_gesture_direction: i32,
    /// Timer that fired, or [`TimerId::NONE`].
    pub timer_event_id: TimerId,
    /// Kind of the timer that fired.
    pub timer_event_kind: Option<TimerKind>,
    /// Duration of the timer that fired.
    pub timer_event_duration_ms: u64,
    /// Platform handle of the timer that fired.
    pub timer_event_platform_handle: Option<PlatformTimerHandle>,
}

impl EventState {
    /// Creates an empty event state with a neutral pinch factor.
    pub fn new() -> Self {
        Self {
            pinch_gesture_factor: 1.0,
            ..Default::default()
        }
    }

    /// Records a new event position, keeping the previous one.
    pub fn set_event_position(&mut self, x: i32, y: i32) {
        self.last_position = self.position;
        self.position = (x, y);
    }

    /// Records position, modifiers and key information in one call.
    #[allow(clippy::too_many_arguments)]
    pub fn set_event_information(
        &mut self,
        x: i32,
        y: i32,
        control: bool,
        shift: bool,
        key_code: Option<char>,
        repeat_count: u32,
        key_sym: Option<&str>,
    ) {
        self.set_event_position(x, y);
        self.control_key = control;
        self.shift_key = shift;
        self.key_code = key_code;
        self.repeat_count = repeat_count;
        self.key_sym = key_sym.map(str::to_owned);
    }

    /// Records the modifier keys.
    pub fn set_key_modifiers(&mut self, control: bool, shift: bool, alt: bool) {
        self.control_key = control;
        self.shift_key = shift;
        self.alt_key = alt;
    }
}

type Callback = Box<dyn FnMut(&EventState)>;

struct Observer {
    id: ObserverId,
    event: InteractorEvent,
    callback: Callback,
}

/// Observer list, notified in insertion order.
#[derive(Default)]
pub(crate) struct Observers {
    observers: Vec<Observer>,
    next_id: u64,
}

impl Observers {
    pub(crate) fn add(&mut self, event: InteractorEvent, callback: Callback) -> ObserverId {
        self.next_id += 1;
        let id = ObserverId(self.next_id);
        self.observers.push(Observer {
            id,
            event,
            callback,
        });
        id
    }

    pub(crate) fn remove(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|o| o.id != id);
        self.observers.len() != before
    }

    pub(crate) fn has(&self, event: InteractorEvent) -> bool {
        self.observers.iter().any(|o| o.event == event)
    }

    pub(crate) fn notify(&mut self, event: InteractorEvent, state: &EventState) {
        for observer in self.observers.iter_mut().filter(|o| o.event == event) {
            (observer.callback)(state);
        }
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.observers.len())
            .finish_non_exhaustive()
    }
}
