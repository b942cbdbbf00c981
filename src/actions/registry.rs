//! Scheduler registry: the set of active queues and listeners.
//!
//! A [`Registry`] is an explicit value rather than a global, so tests and
//! independent scenes can each own one. It is a cheap cloneable handle; every
//! clone refers to the same active sets.
//!
//! # Tick order
//!
//! 1. Snapshot the active queues and advance each one.
//! 2. Drop queues that became done.
//! 3. Snapshot the listeners and let each one re-evaluate.
//!
//! Snapshots make it safe for callbacks to start, stop or create queues and
//! listeners mid-tick. Queues started during a tick first advance on the next one.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::debug;

use super::listener::{ActionListener, ListenerCell};
use super::queue::{ActionQueue, QueueHandle, QueueId};
use super::step::SharedRandom;
use crate::easing::RandomSource;
use crate::error::ActionError;
use crate::resources::actionsconfig::ActionsConfig;
use crate::target::Target;

pub(crate) struct RegistryInner {
    queues: RefCell<Vec<QueueHandle>>,
    listeners: RefCell<Vec<ActionListener>>,
    rng: SharedRandom,
    config: ActionsConfig,
    next_id: Cell<u64>,
}

impl RegistryInner {
    pub(crate) fn add_queue(&self, handle: QueueHandle) {
        let mut queues = self.queues.borrow_mut();
        if !queues.iter().any(|q| q.id() == handle.id()) {
            queues.push(handle);
        }
    }

    pub(crate) fn remove_queue(&self, id: QueueId) {
        self.queues.borrow_mut().retain(|q| q.id() != id);
    }

    pub(crate) fn remove_listener(&self, cell: &Rc<ListenerCell>) {
        self.listeners
            .borrow_mut()
            .retain(|l| !Rc::ptr_eq(&l.cell, cell));
    }

    fn next_id(&self) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }
}

/// Active set of queues and listeners, advanced by [`Registry::tick`].
#[derive(Clone)]
pub struct Registry {
    inner: Rc<RegistryInner>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Registry with default configuration and an entropy-seeded random source.
    pub fn new() -> Self {
        Self::with_config(ActionsConfig::default())
    }

    /// Registry using `config`. A configured `random_seed` makes `flicker`
    /// reproducible.
    pub fn with_config(config: ActionsConfig) -> Self {
        let rng = match config.random_seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        Self::with_random(config, rng)
    }

    /// Registry using `config` and a caller-supplied random source.
    pub fn with_random(config: ActionsConfig, rng: impl RandomSource + 'static) -> Self {
        Registry {
            inner: Rc::new(RegistryInner {
                queues: RefCell::new(Vec::new()),
                listeners: RefCell::new(Vec::new()),
                rng: RefCell::new(Box::new(rng)),
                config,
                next_id: Cell::new(1),
            }),
        }
    }

    pub fn config(&self) -> &ActionsConfig {
        &self.inner.config
    }

    /// Create an idle queue bound to `target`. Call [`ActionQueue::start`] to run it.
    pub fn queue<T: Target>(&self, target: &Rc<RefCell<T>>) -> ActionQueue<T> {
        ActionQueue::new(
            QueueId(self.inner.next_id()),
            Rc::downgrade(&self.inner),
            target,
            self.inner.config.default_easing,
            self.inner.config.max_immediate_steps.max(1),
        )
    }

    /// Create a listener over `queues` and register it.
    pub fn watch(
        &self,
        queues: impl IntoIterator<Item = QueueHandle>,
    ) -> Result<ActionListener, ActionError> {
        let watched: Vec<QueueHandle> = queues.into_iter().collect();
        if watched.is_empty() {
            return Err(ActionError::EmptyWatchSet);
        }
        let listener = ActionListener::new(Rc::downgrade(&self.inner), watched);
        self.inner.listeners.borrow_mut().push(listener.clone());
        debug!("listener registered over {} queues", listener.watched_len());
        Ok(listener)
    }

    /// Advance every active queue by `dt` seconds, then every listener.
    ///
    /// Negative or non-finite deltas are treated as zero.
    pub fn tick(&self, dt: f32) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        let queues: Vec<QueueHandle> = self.inner.queues.borrow().clone();
        for queue in &queues {
            queue.0.advance(dt, &self.inner.rng);
        }
        self.inner.queues.borrow_mut().retain(|q| !q.is_done());

        let listeners: Vec<ActionListener> = self.inner.listeners.borrow().clone();
        for listener in &listeners {
            listener.evaluate();
        }
    }

    /// Stop every active queue bound to `target`.
    pub fn stop_all<T: Target>(&self, target: &Rc<RefCell<T>>) {
        let addr = Rc::as_ptr(target) as *const ();
        let queues: Vec<QueueHandle> = self.inner.queues.borrow().clone();
        let mut stopped = 0;
        for queue in queues.iter().filter(|q| q.0.is_bound_to(addr)) {
            queue.stop();
            stopped += 1;
        }
        if stopped > 0 {
            debug!("stopped {} queues for target {:p}", stopped, addr);
        }
    }

    /// Stop every active queue and drop every listener.
    pub fn clear(&self) {
        let queues: Vec<QueueHandle> = self.inner.queues.borrow().clone();
        for queue in &queues {
            queue.stop();
        }
        self.inner.queues.borrow_mut().clear();
        let listeners = std::mem::take(&mut *self.inner.listeners.borrow_mut());
        debug!(
            "registry cleared ({} queues, {} listeners)",
            queues.len(),
            listeners.len()
        );
    }

    pub fn active_queue_count(&self) -> usize {
        self.inner.queues.borrow().len()
    }

    pub fn active_listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// Whether nothing is left to advance.
    pub fn is_idle(&self) -> bool {
        self.active_queue_count() == 0 && self.active_listener_count() == 0
    }
}
