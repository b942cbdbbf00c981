//! Completion listeners over a fixed group of queues.
//!
//! - `any` callbacks fire once, on the first tick at which at least one watched
//!   queue is done.
//! - `all` callbacks fire once, on the first tick at which every watched queue
//!   is done. The listener then resolves and leaves the registry.
//!
//! A stopped queue counts as done. Subscribing to a resolved listener runs the
//! callback right away.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::debug;

use super::queue::QueueHandle;
use super::registry::RegistryInner;

type ListenerFn = Box<dyn FnOnce()>;

#[derive(Default)]
struct ListenerState {
    resolved: bool,
    any: Vec<ListenerFn>,
    all: Vec<ListenerFn>,
}

pub(crate) struct ListenerCell {
    registry: Weak<RegistryInner>,
    watched: Vec<QueueHandle>,
    state: RefCell<ListenerState>,
}

/// Handle to a registered listener. Clones share state.
///
/// Only resolving `all` callbacks removes a listener from the registry. A
/// listener with no `all` callbacks stays registered, and keeps
/// [`Registry::is_idle`](super::Registry::is_idle) false, until
/// [`Registry::clear`](super::Registry::clear) runs.
#[derive(Clone)]
pub struct ActionListener {
    pub(crate) cell: Rc<ListenerCell>,
}

impl ActionListener {
    pub(crate) fn new(registry: Weak<RegistryInner>, watched: Vec<QueueHandle>) -> Self {
        ActionListener {
            cell: Rc::new(ListenerCell {
                registry,
                watched,
                state: RefCell::new(ListenerState::default()),
            }),
        }
    }

    /// Run `callback` once every watched queue is done.
    pub fn all(&self, callback: impl FnOnce() + 'static) -> &Self {
        if self.is_resolved() {
            callback();
        } else {
            self.cell.state.borrow_mut().all.push(Box::new(callback));
        }
        self
    }

    /// Run `callback` once any watched queue is done.
    pub fn any(&self, callback: impl FnOnce() + 'static) -> &Self {
        if self.is_resolved() {
            callback();
        } else {
            self.cell.state.borrow_mut().any.push(Box::new(callback));
        }
        self
    }

    pub fn is_resolved(&self) -> bool {
        self.cell.state.borrow().resolved
    }

    pub(crate) fn watched_len(&self) -> usize {
        self.cell.watched.len()
    }

    /// Called by the registry after all queues have advanced for the tick.
    pub(crate) fn evaluate(&self) {
        if self.is_resolved() {
            return;
        }
        let watched = &self.cell.watched;
        let any_done = watched.iter().any(QueueHandle::is_done);
        let all_done = watched.iter().all(QueueHandle::is_done);

        if any_done {
            // Taken before running so callbacks can subscribe again.
            let pending = std::mem::take(&mut self.cell.state.borrow_mut().any);
            for callback in pending {
                callback();
            }
        }

        if all_done {
            let pending = {
                let mut state = self.cell.state.borrow_mut();
                if state.all.is_empty() {
                    return;
                }
                state.resolved = true;
                std::mem::take(&mut state.all)
            };
            if let Some(registry) = self.cell.registry.upgrade() {
                registry.remove_listener(&self.cell);
            }
            debug!("listener resolved over {} queues", watched.len());
            for callback in pending {
                callback();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::registry::Registry;
    use crate::easing::FixedSource;
    use crate::resources::actionsconfig::ActionsConfig;
    use crate::target::Target;

    struct Blank;

    impl Target for Blank {
        type Prop = ();
        type Frame = ();

        fn get(&self, _prop: &()) -> f32 {
            0.0
        }
        fn set(&mut self, _prop: &(), _value: f32) {}
        fn set_frame(&mut self, _frame: ()) {}
    }

    fn counter() -> (Rc<RefCell<u32>>, impl Fn() -> Box<dyn FnOnce()>) {
        let hits = Rc::new(RefCell::new(0));
        let h = hits.clone();
        (hits, move || -> Box<dyn FnOnce()> {
            let h = h.clone();
            Box::new(move || *h.borrow_mut() += 1)
        })
    }

    fn setup() -> (Registry, Rc<RefCell<Blank>>) {
        (
            Registry::with_random(ActionsConfig::default(), FixedSource(0.5)),
            Rc::new(RefCell::new(Blank)),
        )
    }

    #[test]
    fn test_any_fires_once_on_first_completion() {
        let (reg, t) = setup();
        let a = reg.queue(&t);
        let b = reg.queue(&t);
        a.wait(0.1).unwrap().start();
        b.wait(0.3).unwrap().start();
        let (hits, make) = counter();
        reg.watch([a.handle(), b.handle()]).unwrap().any(make());

        reg.tick(0.05);
        assert_eq!(*hits.borrow(), 0);
        reg.tick(0.05);
        assert_eq!(*hits.borrow(), 1);
        reg.tick(0.2);
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn test_all_fires_once_and_deregisters() {
        let (reg, t) = setup();
        let a = reg.queue(&t);
        let b = reg.queue(&t);
        a.wait(0.1).unwrap().start();
        b.wait(0.2).unwrap().start();
        let (hits, make) = counter();
        let listener = reg.watch([a.handle(), b.handle()]).unwrap();
        listener.all(make());

        reg.tick(0.1);
        assert_eq!(*hits.borrow(), 0);
        assert_eq!(reg.active_listener_count(), 1);
        reg.tick(0.1);
        assert_eq!(*hits.borrow(), 1);
        assert!(listener.is_resolved());
        assert_eq!(reg.active_listener_count(), 0);
        reg.tick(0.1);
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn test_subscribing_after_resolution_fires_immediately() {
        let (reg, t) = setup();
        let a = reg.queue(&t);
        a.wait(0.0).unwrap().start();
        let listener = reg.watch([a.handle()]).unwrap();
        let (hits, make) = counter();
        listener.all(make());
        reg.tick(0.0);
        assert_eq!(*hits.borrow(), 1);

        listener.all(make()).any(make());
        assert_eq!(*hits.borrow(), 3);
    }

    #[test]
    fn test_any_added_later_fires_on_next_tick() {
        let (reg, t) = setup();
        let a = reg.queue(&t);
        let b = reg.queue(&t);
        a.wait(0.0).unwrap().start();
        b.wait(1.0).unwrap().start();
        let listener = reg.watch([a.handle(), b.handle()]).unwrap();
        let (hits, make) = counter();
        listener.any(make());
        reg.tick(0.0);
        assert_eq!(*hits.borrow(), 1);

        listener.any(make());
        assert_eq!(*hits.borrow(), 1);
        reg.tick(0.0);
        assert_eq!(*hits.borrow(), 2);
    }

    #[test]
    fn test_listener_without_all_callbacks_stays_registered() {
        let (reg, t) = setup();
        let a = reg.queue(&t);
        a.wait(0.0).unwrap().start();
        let listener = reg.watch([a.handle()]).unwrap();
        let (hits, make) = counter();
        listener.any(make());
        reg.tick(0.0);
        reg.tick(0.0);
        assert_eq!(*hits.borrow(), 1);
        assert!(!listener.is_resolved());
        assert_eq!(reg.active_listener_count(), 1);
        assert!(!reg.is_idle());

        reg.clear();
        assert!(reg.is_idle());
    }

    #[test]
    fn test_stopped_queue_counts_as_done() {
        let (reg, t) = setup();
        let a = reg.queue(&t);
        a.wait(10.0).unwrap();
        let (hits, make) = counter();
        reg.watch([a.handle()]).unwrap().all(make());
        a.stop();
        reg.tick(0.0);
        assert_eq!(*hits.borrow(), 1);
    }
}
