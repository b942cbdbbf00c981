//! Step variants: the units of timed work a queue runs in order.
//!
//! Each step moves one way from pending to done. `step` consumes frame time
//! and returns the leftover time a following immediate-drained step may use;
//! `end` forces completion.
//!
//! | Step       | immediate | leftover on completion       |
//! |------------|-----------|------------------------------|
//! | Callback   | yes       | the whole delta              |
//! | Delay      | yes       | overshoot past `duration`    |
//! | Transition | no        | none                         |
//! | Frames     | no        | none                         |

use std::cell::RefCell;

use smallvec::SmallVec;

use super::tween::PropTween;
use crate::easing::{Easing, RandomSource};
use crate::target::Target;

/// Error returned by a fallible callback.
pub type CallbackError = Box<dyn std::error::Error>;

pub(crate) type CallbackFn = Box<dyn FnOnce() -> Result<(), CallbackError>>;

pub(crate) type SharedRandom = RefCell<Box<dyn RandomSource>>;

pub(crate) struct CallbackStep {
    func: Option<CallbackFn>,
}

impl CallbackStep {
    pub(crate) fn new(func: CallbackFn) -> Self {
        CallbackStep { func: Some(func) }
    }

    fn run(&mut self) -> Result<(), CallbackError> {
        match self.func.take() {
            Some(func) => func(),
            None => Ok(()),
        }
    }

    fn is_done(&self) -> bool {
        self.func.is_none()
    }
}

#[derive(Debug, Clone)]
pub(crate) struct DelayStep {
    duration: f32,
    elapsed: f32,
    done: bool,
}

impl DelayStep {
    pub(crate) fn new(duration: f32) -> Self {
        DelayStep {
            duration,
            elapsed: 0.0,
            done: false,
        }
    }

    fn step(&mut self, dt: f32) -> f32 {
        if self.done {
            return dt;
        }
        self.elapsed += dt;
        if self.elapsed >= self.duration {
            self.done = true;
            self.elapsed - self.duration
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone)]
struct TransitionEntry<P> {
    prop: P,
    dest: f32,
    easing: Easing,
    start: f32,
    delta: f32,
}

#[derive(Debug, Clone)]
pub(crate) struct TransitionStep<P> {
    entries: SmallVec<[TransitionEntry<P>; 4]>,
    duration: f32,
    elapsed: f32,
    started: bool,
    done: bool,
}

impl<P: Clone> TransitionStep<P> {
    pub(crate) fn new(
        tweens: impl IntoIterator<Item = PropTween<P>>,
        duration: f32,
        default_easing: Easing,
    ) -> Self {
        let entries = tweens
            .into_iter()
            .map(|t| TransitionEntry {
                prop: t.prop,
                dest: t.dest,
                easing: t.easing.unwrap_or(default_easing),
                start: 0.0,
                delta: 0.0,
            })
            .collect();
        TransitionStep {
            entries,
            duration,
            elapsed: 0.0,
            started: false,
            done: false,
        }
    }

    fn step<T: Target<Prop = P>>(
        &mut self,
        dt: f32,
        target: &mut T,
        rng: &mut dyn RandomSource,
    ) {
        if self.done {
            return;
        }
        self.elapsed += dt;

        // Start values are read on the first step so a transition continues
        // from whatever earlier steps left behind.
        if !self.started {
            for entry in self.entries.iter_mut() {
                entry.start = target.get(&entry.prop);
                entry.delta = entry.dest - entry.start;
            }
            self.started = true;
        }

        if self.elapsed >= self.duration {
            self.end(target);
            return;
        }

        let percent = self.elapsed / self.duration;
        for entry in &self.entries {
            let eased = entry.easing.apply(percent, rng);
            target.set(&entry.prop, entry.start + eased * entry.delta);
        }
    }

    fn end<T: Target<Prop = P>>(&mut self, target: &mut T) {
        for entry in &self.entries {
            target.set(&entry.prop, entry.dest);
        }
        self.done = true;
    }
}

#[derive(Debug, Clone)]
pub(crate) struct FrameStep<F> {
    frames: Vec<F>,
    interval: f32,
    repetitions: Option<u32>,
    elapsed: f32,
    count: u32,
    index: usize,
    done: bool,
}

impl<F: Clone> FrameStep<F> {
    /// `frames` must be non-empty and `frame_rate` positive; the queue checks both.
    pub(crate) fn new(frames: Vec<F>, frame_rate: f32, repetitions: Option<u32>) -> Self {
        FrameStep {
            frames,
            interval: 1.0 / frame_rate,
            repetitions,
            elapsed: 0.0,
            count: 0,
            index: 0,
            done: false,
        }
    }

    /// Show the first frame right away. This does not count as a repetition.
    pub(crate) fn prime<T: Target<Frame = F>>(&mut self, target: &mut T) {
        target.set_frame(self.frames[0].clone());
        self.index = 1 % self.frames.len();
    }

    fn step<T: Target<Frame = F>>(&mut self, dt: f32, target: &mut T) {
        if self.done {
            return;
        }
        self.elapsed += dt;
        if self.elapsed < self.interval {
            return;
        }
        self.elapsed = 0.0;

        let more = self.repetitions.is_none_or(|reps| self.count < reps);
        if more {
            target.set_frame(self.frames[self.index].clone());
            self.index = (self.index + 1) % self.frames.len();
            self.count += 1;
        } else {
            // The last repetition's frame has stayed up for a full interval.
            self.done = true;
        }
    }

    fn end<T: Target<Frame = F>>(&mut self, target: &mut T) {
        if let Some(reps) = self.repetitions {
            let last = reps as usize % self.frames.len();
            target.set_frame(self.frames[last].clone());
        }
        self.done = true;
    }
}

pub(crate) enum Step<T: Target> {
    Callback(CallbackStep),
    Delay(DelayStep),
    Transition(TransitionStep<T::Prop>),
    Frames(FrameStep<T::Frame>),
}

impl<T: Target> Step<T> {
    /// Advance by `dt` and return the time left over for the next step.
    ///
    /// Callbacks run with no borrow held on `target`, so they may touch it freely.
    pub(crate) fn step(
        &mut self,
        dt: f32,
        target: &RefCell<T>,
        rng: &SharedRandom,
    ) -> Result<f32, CallbackError> {
        match self {
            Step::Callback(cb) => {
                cb.run()?;
                Ok(dt)
            }
            Step::Delay(delay) => Ok(delay.step(dt)),
            Step::Transition(tr) => {
                let mut rng = rng.borrow_mut();
                tr.step(dt, &mut *target.borrow_mut(), &mut **rng);
                Ok(0.0)
            }
            Step::Frames(frames) => {
                frames.step(dt, &mut *target.borrow_mut());
                Ok(0.0)
            }
        }
    }

    /// Force completion. Steps that need the target are skipped when it is gone.
    pub(crate) fn end(&mut self, target: Option<&RefCell<T>>) -> Result<(), CallbackError> {
        match self {
            Step::Callback(cb) => cb.run(),
            Step::Delay(delay) => {
                delay.done = true;
                Ok(())
            }
            Step::Transition(tr) => {
                match target {
                    Some(target) => tr.end(&mut *target.borrow_mut()),
                    None => tr.done = true,
                }
                Ok(())
            }
            Step::Frames(frames) => {
                match target {
                    Some(target) => frames.end(&mut *target.borrow_mut()),
                    None => frames.done = true,
                }
                Ok(())
            }
        }
    }

    pub(crate) fn is_done(&self) -> bool {
        match self {
            Step::Callback(cb) => cb.is_done(),
            Step::Delay(delay) => delay.done,
            Step::Transition(tr) => tr.done,
            Step::Frames(frames) => frames.done,
        }
    }

    pub(crate) fn is_immediate(&self) -> bool {
        matches!(self, Step::Callback(_) | Step::Delay(_))
    }
}
