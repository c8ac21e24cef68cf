//! The render-window interactor.
//!
//! [`Interactor`] owns the timer registry, the renderer collection and the
//! observer list, and routes platform input to them. Everything runs on the
//! thread that owns the event loop.

use std::num::NonZeroU32;

use flyview_core::{
    find_poked_renderer, Camera, CancelToken, FlightOutcome, FlightPlan, InteractorError,
    InteractorOptions, LegacyTimerRequest, LegacyTimers, PlatformTimerHandle, Renderer, Result,
    TimerId, TimerKind, TimerPlatform, TimerRegistry,
};
use glam::{Vec2, Vec3};

use crate::events::{EventState, InteractorEvent, ObserverId, Observers};
use crate::soft_timer::SoftTimerPlatform;

/// Draw path shared by `render()` and flights.
#[derive(Default)]
struct RenderDispatch {
    window: Option<Box<dyn FnMut()>>,
    observers: Observers,
    enabled: bool,
}

impl RenderDispatch {
    fn render(&mut self, enable_render: bool, state: &EventState) {
        if self.enabled && enable_render {
            if let Some(window) = self.window.as_mut() {
                window();
            }
        }
        // Observers run even when drawing is gated so callers can redirect the render
        self.observers.notify(InteractorEvent::Render, state);
    }
}

/// Mediates user input, timers and camera flights for a render window.
pub struct Interactor<P: TimerPlatform = SoftTimerPlatform> {
    options: InteractorOptions,
    timers: TimerRegistry<P>,
    renderers: Vec<Box<dyn Renderer>>,
    dispatch: RenderDispatch,
    event: EventState,
    flight_cancel: CancelToken,
    initialized: bool,
    terminated: bool,
}

impl Interactor<SoftTimerPlatform> {
    /// Creates an interactor driven by a [`SoftTimerPlatform`].
    pub fn headless() -> Self {
        Self::new(SoftTimerPlatform::new())
    }

    /// Advances the software clock and dispatches every timer that fired.
    ///
    /// Returns the number of timer events dispatched.
    pub fn advance_timers(&mut self, elapsed_ms: u64) -> usize {
        let fired = self.timers.platform_mut().advance(elapsed_ms);
        fired
            .into_iter()
            .filter(|&handle| self.handle_platform_timer(handle))
            .count()
    }
}

impl<P: TimerPlatform> Interactor<P> {
    /// Creates an interactor with default options.
    pub fn new(platform: P) -> Self {
        let mut timers = TimerRegistry::new(platform);
        let options = InteractorOptions::default();
        timers.set_legacy_duration_ms(options.timer_duration_ms);
        Self {
            options,
            timers,
            renderers: Vec::new(),
            dispatch: RenderDispatch::default(),
            event: EventState::new(),
            flight_cancel: CancelToken::new(),
            initialized: false,
            terminated: false,
        }
    }

    /// Creates an interactor with the given options.
    pub fn with_options(platform: P, options: InteractorOptions) -> Result<Self> {
        let mut interactor = Self::new(platform);
        interactor.set_options(options)?;
        Ok(interactor)
    }

    /// Current options.
    pub fn options(&self) -> &InteractorOptions {
        &self.options
    }

    /// Validates and installs new options.
    pub fn set_options(&mut self, options: InteractorOptions) -> Result<()> {
        options.validate()?;
        self.timers.set_legacy_duration_ms(options.timer_duration_ms);
        self.options = options;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Lifecycle and rendering

    /// Marks the interactor initialized, enables it and renders once.
    pub fn initialize(&mut self) {
        self.initialized = true;
        self.enable();
        self.render();
        log::info!("interactor initialized");
    }

    /// Whether [`initialize`](Self::initialize) has run.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Enables event processing and drawing.
    pub fn enable(&mut self) {
        self.dispatch.enabled = true;
    }

    /// Disables event processing and drawing.
    pub fn disable(&mut self) {
        self.dispatch.enabled = false;
    }

    /// Whether the interactor is enabled.
    pub fn is_enabled(&self) -> bool {
        self.dispatch.enabled
    }

    /// Installs the callback that draws one frame of the render window.
    pub fn set_render_window(&mut self, draw: impl FnMut() + 'static) {
        self.dispatch.window = Some(Box::new(draw));
    }

    /// Removes the render window callback.
    pub fn clear_render_window(&mut self) {
        self.dispatch.window = None;
    }

    /// Draws a frame when enabled, then notifies `Render` observers.
    pub fn render(&mut self) {
        self.dispatch.render(self.options.enable_render, &self.event);
    }

    // ------------------------------------------------------------------
    // Observers

    /// Registers a callback for `event`.
    pub fn add_observer(
        &mut self,
        event: InteractorEvent,
        callback: impl FnMut(&EventState) + 'static,
    ) -> ObserverId {
        self.dispatch.observers.add(event, Box::new(callback))
    }

    /// Removes an observer. Returns false if `id` is unknown.
    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        self.dispatch.observers.remove(id)
    }

    /// Whether any observer listens for `event`.
    pub fn has_observer(&self, event: InteractorEvent) -> bool {
        self.dispatch.observers.has(event)
    }

    fn invoke(&mut self, event: InteractorEvent) {
        self.dispatch.observers.notify(event, &self.event);
    }

    /// Notifies `Exit` observers, or terminates if there are none.
    pub fn exit_callback(&mut self) {
        if self.has_observer(InteractorEvent::Exit) {
            self.invoke(InteractorEvent::Exit);
        } else {
            self.terminate_app();
        }
    }

    /// Asks the event loop to stop.
    pub fn terminate_app(&mut self) {
        log::info!("interactor terminating");
        self.terminated = true;
    }

    /// Whether [`terminate_app`](Self::terminate_app) has been requested.
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Notifies `User` observers.
    pub fn user_callback(&mut self) {
        self.invoke(InteractorEvent::User);
    }

    /// Notifies `StartPick` observers.
    pub fn start_pick_callback(&mut self) {
        self.invoke(InteractorEvent::StartPick);
    }

    /// Notifies `EndPick` observers.
    pub fn end_pick_callback(&mut self) {
        self.invoke(InteractorEvent::EndPick);
    }

    // ------------------------------------------------------------------
    // Event state

    /// State of the current event.
    pub fn event(&self) -> &EventState {
        &self.event
    }

    /// Mutable state of the current event, for platform layers.
    pub fn event_mut(&mut self) -> &mut EventState {
        &mut self.event
    }

    /// Records a new event position.
    pub fn set_event_position(&mut self, x: i32, y: i32) {
        self.event.set_event_position(x, y);
    }

    /// Records a window size change. Returns false if the size is unchanged.
    pub fn update_size(&mut self, width: i32, height: i32) -> bool {
        if self.event.size == (width, height) {
            return false;
        }
        self.event.size = (width, height);
        self.event.event_size = (width, height);
        true
    }

    // ------------------------------------------------------------------
    // Renderers

    /// Adds a renderer on top of the existing ones and returns its index.
    pub fn add_renderer(&mut self, renderer: impl Renderer + 'static) -> usize {
        self.renderers.push(Box::new(renderer));
        self.renderers.len() - 1
    }

    /// Number of renderers.
    pub fn renderer_count(&self) -> usize {
        self.renderers.len()
    }

    /// Renderer at `index`.
    pub fn renderer(&self, index: usize) -> Option<&(dyn Renderer + 'static)> {
        self.renderers.get(index).map(AsRef::as_ref)
    }

    /// Renderer at `index`, mutably.
    pub fn renderer_mut(&mut self, index: usize) -> Option<&mut (dyn Renderer + 'static)> {
        self.renderers.get_mut(index).map(AsMut::as_mut)
    }

    /// Index of the renderer that should receive an event at `(x, y)`.
    pub fn find_poked_renderer(&self, x: i32, y: i32) -> Option<usize> {
        find_poked_renderer(&self.renderers, x, y)
    }

    // ------------------------------------------------------------------
    // Flights

    /// Token that cancels the flight in progress.
    ///
    /// Every flight clears it before the first frame, so a clone taken by an
    /// observer can stop a flight from inside its render callback.
    pub fn flight_cancel_token(&self) -> CancelToken {
        self.flight_cancel.clone()
    }

    /// Flies renderer `index`'s camera so its focal point ends at `target`.
    pub fn fly_to(&mut self, index: usize, target: Vec3) -> Result<FlightOutcome> {
        self.fly(index, |camera, frames, dolly| {
            FlightPlan::to_point(camera, target, frames, dolly)
        })
    }

    /// Flies renderer `index`'s camera across the image plane to `(x, y)`.
    pub fn fly_to_image(&mut self, index: usize, x: f32, y: f32) -> Result<FlightOutcome> {
        self.fly(index, |camera, frames, dolly| {
            FlightPlan::to_image_point(camera, Vec2::new(x, y), frames, dolly)
        })
    }

    fn fly(
        &mut self,
        index: usize,
        plan: impl FnOnce(&dyn Camera, NonZeroU32, f32) -> FlightPlan,
    ) -> Result<FlightOutcome> {
        let frames = NonZeroU32::new(self.options.number_of_fly_frames)
            .ok_or(InteractorError::InvalidFrameCount)?;
        let Self {
            options,
            renderers,
            dispatch,
            event,
            flight_cancel,
            ..
        } = self;

        let camera = renderers
            .get_mut(index)
            .ok_or(InteractorError::RendererNotFound(index))?
            .active_camera_mut();
        let plan = plan(&*camera, frames, options.dolly);

        flight_cancel.reset();
        let enable_render = options.enable_render;
        let state = &*event;
        Ok(plan.fly(
            camera,
            || dispatch.render(enable_render, state),
            Some(&*flight_cancel),
        ))
    }

    // ------------------------------------------------------------------
    // Timers

    /// The underlying timer registry.
    pub fn timers(&self) -> &TimerRegistry<P> {
        &self.timers
    }

    /// The underlying timer registry, mutably.
    pub fn timers_mut(&mut self) -> &mut TimerRegistry<P> {
        &mut self.timers
    }

    /// Creates a repeating timer, or returns [`TimerId::NONE`].
    pub fn create_repeating_timer(&mut self, duration_ms: u64) -> TimerId {
        self.timers.create_repeating_timer(duration_ms)
    }

    /// Creates a one-shot timer, or returns [`TimerId::NONE`].
    pub fn create_one_shot_timer(&mut self, duration_ms: u64) -> TimerId {
        self.timers.create_one_shot_timer(duration_ms)
    }

    /// Destroys a timer. Returns false if `id` is unknown.
    pub fn destroy_timer(&mut self, id: TimerId) -> bool {
        self.timers.destroy_timer(id)
    }

    /// Restarts a timer. Returns false if unknown or if the platform refused.
    pub fn reset_timer(&mut self, id: TimerId) -> bool {
        self.timers.reset_timer(id)
    }

    /// Whether `id` is a live one-shot timer.
    pub fn is_one_shot_timer(&self, id: TimerId) -> bool {
        self.timers.is_one_shot(id)
    }

    /// Duration of `id`, or 0 if unknown.
    pub fn timer_duration(&self, id: TimerId) -> u64 {
        self.timers.duration(id)
    }

    /// Legacy single-timer API over this interactor's registry.
    pub fn legacy_timers(&mut self) -> LegacyTimers<'_, P> {
        LegacyTimers::new(&mut self.timers)
    }

    /// Legacy create; see [`LegacyTimers::create`].
    pub fn create_timer(&mut self, request: LegacyTimerRequest) -> TimerId {
        self.legacy_timers().create(request)
    }

    /// Legacy destroy of the most recent timer; see [`LegacyTimers::destroy`].
    pub fn destroy_current_timer(&mut self) -> bool {
        self.legacy_timers().destroy()
    }

    /// Dispatches a native timer firing to `Timer` observers.
    ///
    /// Returns false if the handle does not belong to this interactor.
    pub fn handle_platform_timer(&mut self, handle: PlatformTimerHandle) -> bool {
        let id = self.timers.translate_platform_handle(handle);
        let Some(record) = self.timers.record(id).copied() else {
            log::debug!("ignoring foreign timer handle {handle:?}");
            return false;
        };

        self.event.timer_event_id = id;
        self.event.timer_event_kind = Some(record.kind);
        self.event.timer_event_duration_ms = record.duration_ms;
        self.event.timer_event_platform_handle = Some(handle);
        self.invoke(InteractorEvent::Timer);

        if record.kind == TimerKind::OneShot {
            log::debug!("one-shot timer {id} fired");
        }
        true
    }
}

impl<P: TimerPlatform> Drop for Interactor<P> {
    fn drop(&mut self) {
        self.timers.clear();
    }
}

impl<P: TimerPlatform> std::fmt::Debug for Interactor<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interactor")
            .field("options", &self.options)
            .field("timers", &self.timers.len())
            .field("renderers", &self.renderers.len())
            .field("enabled", &self.dispatch.enabled)
            .field("initialized", &self.initialized)
            .field("event", &self.event)
            .field("observers", &self.dispatch.observers)
            .finish_non_exhaustive()
    }
}
