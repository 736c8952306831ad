// animation.rs - Idle/Running state machine over an injected frame scheduler

use tracing::{info, trace, warn};

/// Token for one pending frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Host capability: ask for a callback on the next frame, or withdraw one.
/// Cancelling a handle that already fired or was already cancelled must be harmless.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// What the play/pause control should currently show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Affordance {
    Play,
    Pause,
}

impl Affordance {
    pub fn label(self) -> &'static str {
        match self {
            Affordance::Play => "▶",
            Affordance::Pause => "⏸",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The frame rendered and the automaton advanced.
    Stepped,
    /// The budget was exhausted; the loop is now idle.
    Finished,
    /// The handle was not the one currently scheduled.
    Stale,
}

/// Step budget control: a bounded integer plus its display label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepBudget {
    value: u32,
    max: u32,
}

impl StepBudget {
    pub fn new(value: u32, max: u32) -> Self {
        Self { value: value.min(max), max }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn set(&mut self, value: u32) {
        self.value = value.min(self.max);
    }

    pub fn label(&self) -> String {
        self.value.to_string()
    }
}

pub struct AnimationController<F> {
    scheduler: F,
    scheduled: Option<FrameHandle>,
    frames_elapsed: u64,
}

impl<F: FrameScheduler> AnimationController<F> {
    pub fn new(scheduler: F) -> Self {
        Self { scheduler, scheduled: None, frames_elapsed: 0 }
    }

    pub fn is_running(&self) -> bool {
        self.scheduled.is_some()
    }

    pub fn frames_elapsed(&self) -> u64 {
        self.frames_elapsed
    }

    pub fn scheduled(&self) -> Option<FrameHandle> {
        self.scheduled
    }

    pub fn affordance(&self) -> Affordance {
        if self.is_running() { Affordance::Pause } else { Affordance::Play }
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }

    pub fn play(&mut self) {
        if self.is_running() {
            return;
        }
        self.frames_elapsed = 0;
        self.scheduled = Some(self.scheduler.request_frame());
        info!("animation started");
    }

    pub fn pause(&mut self) {
        let Some(handle) = self.scheduled.take() else {
            return;
        };
        self.scheduler.cancel_frame(handle);
        info!(frames = self.frames_elapsed, "animation paused");
        self.frames_elapsed = 0;
    }

    pub fn toggle(&mut self) {
        if self.is_running() { self.pause() } else { self.play() }
    }

    /// Frame callback. `step` renders the current generation and then advances
    /// the automaton; it runs at most once, and only while within budget.
    pub fn on_frame(&mut self, fired: FrameHandle, step_budget: u32, step: impl FnOnce()) -> FrameOutcome {
        if self.scheduled != Some(fired) {
            warn!(?fired, scheduled = ?self.scheduled, "ignoring stale frame");
            return FrameOutcome::Stale;
        }

        if self.frames_elapsed > u64::from(step_budget) {
            self.pause();
            return FrameOutcome::Finished;
        }

        self.frames_elapsed += 1;
        trace!(frame = self.frames_elapsed, budget = step_budget, "frame");
        step();
        self.scheduled = Some(self.scheduler.request_frame());
        FrameOutcome::Stepped
    }
}
