//! Action queues: ordered steps bound to one target.
//!
//! An [`ActionQueue`] is a cheap, cloneable handle. Builder calls append steps
//! and return the queue so they chain:
//!
//! ```ignore
//! registry
//!     .queue(&sprite)
//!     .wait(0.5)?
//!     .to(Tween::new().to(SpriteProp::X, 100.0), 1.0)?
//!     .then(|| log::info!("arrived"))
//!     .start();
//! ```
//!
//! A queue only advances after [`ActionQueue::start`]. It becomes done when
//! its last step completes, when [`ActionQueue::stop`] or
//! [`ActionQueue::finish`] is called, or when its target is dropped. A done
//! queue ignores further builder calls and cannot be restarted.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

use log::{debug, error, warn};

use super::registry::RegistryInner;
use super::step::{
    CallbackError, CallbackStep, DelayStep, FrameStep, SharedRandom, Step, TransitionStep,
};
use super::tween::Tween;
use crate::easing::Easing;
use crate::error::{ActionError, check_duration, check_frame_rate};
use crate::resources::framestore::FrameClip;
use crate::target::Target;

/// Registry-unique queue identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueueId(pub(crate) u64);

impl fmt::Display for QueueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Type-erased view of a queue used by the registry and listeners.
pub(crate) trait Advance {
    fn id(&self) -> QueueId;
    fn advance(&self, dt: f32, rng: &SharedRandom);
    fn is_done(&self) -> bool;
    fn stop(&self);
    fn is_bound_to(&self, addr: *const ()) -> bool;
}

/// Target-agnostic handle to a queue, used to build listeners.
#[derive(Clone)]
pub struct QueueHandle(pub(crate) Rc<dyn Advance>);

impl QueueHandle {
    pub fn id(&self) -> QueueId {
        self.0.id()
    }

    pub fn is_done(&self) -> bool {
        self.0.is_done()
    }

    pub fn stop(&self) {
        self.0.stop();
    }
}

impl fmt::Debug for QueueHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueueHandle")
            .field("id", &self.id())
            .field("done", &self.is_done())
            .finish()
    }
}

struct QueueState<T: Target> {
    steps: VecDeque<Step<T>>,
    target: Option<Weak<RefCell<T>>>,
    running: bool,
    done: bool,
    error: Option<String>,
}

impl<T: Target> QueueState<T> {
    fn complete(&mut self) {
        self.done = true;
        self.running = false;
        self.target = None;
    }
}

pub(crate) struct QueueCell<T: Target> {
    id: QueueId,
    registry: Weak<RegistryInner>,
    default_easing: Easing,
    max_steps: usize,
    state: RefCell<QueueState<T>>,
}

impl<T: Target> QueueCell<T> {
    fn deregister(&self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.remove_queue(self.id);
        }
    }

    fn fail(&self, err: CallbackError) {
        error!("queue {} callback failed: {}", self.id, err);
        self.state.borrow_mut().error = Some(err.to_string());
        self.stop();
    }
}

impl<T: Target> Advance for QueueCell<T> {
    fn id(&self) -> QueueId {
        self.id
    }

    fn advance(&self, dt: f32, rng: &SharedRandom) {
        let mut dt = dt;
        for _ in 0..self.max_steps {
            // Take the head step out so no queue borrow is held while it runs.
            let (mut step, target) = {
                let mut state = self.state.borrow_mut();
                if state.done {
                    return;
                }
                let Some(step) = state.steps.pop_front() else {
                    return;
                };
                (step, state.target.as_ref().and_then(Weak::upgrade))
            };
            let Some(target) = target else {
                warn!("queue {} lost its target, stopping", self.id);
                drop(step);
                self.stop();
                return;
            };

            let result = step.step(dt, &target, rng);
            drop(target);

            let leftover = match result {
                Ok(leftover) => leftover,
                Err(err) => {
                    self.fail(err);
                    return;
                }
            };

            let mut state = self.state.borrow_mut();
            if state.done {
                // Stopped or finished from inside the step's callback.
                return;
            }
            let immediate = step.is_immediate();
            if !step.is_done() {
                state.steps.push_front(step);
                return;
            }
            if state.steps.is_empty() {
                state.complete();
                debug!("queue {} completed", self.id);
                return;
            }
            if !immediate {
                return;
            }
            dt = leftover;
        }
        warn!(
            "queue {} ran {} immediate steps in one tick; resuming next tick",
            self.id, self.max_steps
        );
    }

    fn is_done(&self) -> bool {
        self.state.borrow().done
    }

    fn stop(&self) {
        let steps = {
            let mut state = self.state.borrow_mut();
            if state.done {
                return;
            }
            state.complete();
            std::mem::take(&mut state.steps)
        };
        // Dropped outside the borrow: captured closures may hold other handles.
        drop(steps);
        self.deregister();
        debug!("queue {} stopped", self.id);
    }

    fn is_bound_to(&self, addr: *const ()) -> bool {
        self.state
            .borrow()
            .target
            .as_ref()
            .is_some_and(|w| std::ptr::eq(w.as_ptr() as *const (), addr))
    }
}

/// Ordered sequence of steps driving one target.
pub struct ActionQueue<T: Target> {
    cell: Rc<QueueCell<T>>,
}

impl<T: Target> Clone for ActionQueue<T> {
    fn clone(&self) -> Self {
        ActionQueue {
            cell: self.cell.clone(),
        }
    }
}

impl<T: Target> fmt::Debug for ActionQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionQueue")
            .field("id", &self.id())
            .field("len", &self.len())
            .field("running", &self.is_running())
            .field("done", &self.is_done())
            .finish()
    }
}

impl<T: Target> ActionQueue<T> {
    pub(crate) fn new(
        id: QueueId,
        registry: Weak<RegistryInner>,
        target: &Rc<RefCell<T>>,
        default_easing: Easing,
        max_steps: usize,
    ) -> Self {
        ActionQueue {
            cell: Rc::new(QueueCell {
                id,
                registry,
                default_easing,
                max_steps,
                state: RefCell::new(QueueState {
                    steps: VecDeque::new(),
                    target: Some(Rc::downgrade(target)),
                    running: false,
                    done: false,
                    error: None,
                }),
            }),
        }
    }

    fn push(&self, step: Step<T>) {
        let mut state = self.cell.state.borrow_mut();
        if !state.done {
            state.steps.push_back(step);
        }
    }

    /// Append a one-shot callback.
    pub fn then(&self, func: impl FnOnce() + 'static) -> &Self {
        self.push(Step::Callback(CallbackStep::new(Box::new(move || {
            func();
            Ok(())
        }))));
        self
    }

    /// Append a fallible callback. An error stops this queue only and is kept
    /// in [`ActionQueue::error`].
    pub fn then_try(
        &self,
        func: impl FnOnce() -> Result<(), CallbackError> + 'static,
    ) -> &Self {
        self.push(Step::Callback(CallbackStep::new(Box::new(func))));
        self
    }

    /// Append a pause of `duration` seconds.
    pub fn wait(&self, duration: f32) -> Result<&Self, ActionError> {
        let duration = check_duration(duration)?;
        self.push(Step::Delay(DelayStep::new(duration)));
        Ok(self)
    }

    /// Append a transition of the tweened properties over `duration` seconds.
    pub fn to(&self, tween: Tween<T::Prop>, duration: f32) -> Result<&Self, ActionError> {
        let duration = check_duration(duration)?;
        if tween.is_empty() {
            return Err(ActionError::EmptyTween);
        }
        self.push(Step::Transition(TransitionStep::new(
            tween.into_entries(),
            duration,
            self.cell.default_easing,
        )));
        Ok(self)
    }

    /// Append a frame animation. The first frame is shown immediately, even
    /// before [`ActionQueue::start`].
    pub fn animate(
        &self,
        frames: impl IntoIterator<Item = T::Frame>,
        frame_rate: f32,
        repetitions: Option<u32>,
    ) -> Result<&Self, ActionError> {
        let frame_rate = check_frame_rate(frame_rate)?;
        let frames: Vec<T::Frame> = frames.into_iter().collect();
        if frames.is_empty() {
            return Err(ActionError::EmptyFrameList);
        }

        let mut state = self.cell.state.borrow_mut();
        if state.done {
            return Ok(self);
        }
        let mut step = FrameStep::new(frames, frame_rate, repetitions);
        if let Some(target) = state.target.as_ref().and_then(Weak::upgrade) {
            step.prime(&mut *target.borrow_mut());
        }
        state.steps.push_back(Step::Frames(step));
        drop(state);
        Ok(self)
    }

    /// Append a frame animation described by a stored clip.
    pub fn animate_clip(&self, clip: &FrameClip) -> Result<&Self, ActionError>
    where
        T::Frame: for<'a> From<&'a str>,
    {
        self.animate(
            clip.frames.iter().map(|f| T::Frame::from(f.as_str())),
            clip.fps,
            clip.repetitions,
        )
    }

    /// Register with the registry so ticks advance this queue. Idempotent.
    pub fn start(&self) -> &Self {
        {
            let mut state = self.cell.state.borrow_mut();
            if state.done || state.running {
                return self;
            }
            state.running = true;
        }
        match self.cell.registry.upgrade() {
            Some(registry) => {
                registry.add_queue(self.handle());
                debug!("queue {} started", self.cell.id);
            }
            None => warn!("queue {} started after its registry was dropped", self.cell.id),
        }
        self
    }

    /// Drop pending steps, mark done and release the target. Idempotent.
    pub fn stop(&self) {
        self.cell.stop();
    }

    /// Force every pending step to its end state, in order, then complete.
    ///
    /// Callbacks run, transitions snap to their destinations and delays are
    /// skipped. Steps added by callbacks during the fast-forward are finished too,
    /// up to the immediate-step guard.
    pub fn finish(&self) {
        let limit = self.len() + self.cell.max_steps;
        for _ in 0..limit {
            let (mut step, target) = {
                let mut state = self.cell.state.borrow_mut();
                if state.done {
                    return;
                }
                let Some(step) = state.steps.pop_front() else {
                    break;
                };
                (step, state.target.as_ref().and_then(Weak::upgrade))
            };
            if let Err(err) = step.end(target.as_deref()) {
                self.cell.fail(err);
                return;
            }
        }
        let steps = {
            let mut state = self.cell.state.borrow_mut();
            if state.done {
                return;
            }
            state.complete();
            std::mem::take(&mut state.steps)
        };
        if !steps.is_empty() {
            warn!(
                "queue {} dropped {} steps left after finishing",
                self.cell.id,
                steps.len()
            );
        }
        drop(steps);
        self.cell.deregister();
        debug!("queue {} finished", self.cell.id);
    }

    pub fn id(&self) -> QueueId {
        self.cell.id
    }

    /// Type-erased handle for listeners.
    pub fn handle(&self) -> QueueHandle {
        QueueHandle(self.cell.clone())
    }

    pub fn is_done(&self) -> bool {
        self.cell.state.borrow().done
    }

    pub fn is_running(&self) -> bool {
        self.cell.state.borrow().running
    }

    /// Number of pending steps.
    pub fn len(&self) -> usize {
        self.cell.state.borrow().steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cell.state.borrow().steps.is_empty()
    }

    /// Message of the callback error that stopped this queue, if any.
    pub fn error(&self) -> Option<String> {
        self.cell.state.borrow().error.clone()
    }

    /// Whether the queue still holds a reference to a target.
    pub fn has_target(&self) -> bool {
        self.cell
            .state
            .borrow()
            .target
            .as_ref()
            .is_some_and(|w| w.strong_count() > 0)
    }
}
