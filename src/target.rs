//! Target capability consumed by the scheduler.
//!
//! A target is any mutable scene object that exposes a closed set of numeric
//! properties and, optionally, a "current frame" slot. Transitions read and
//! write properties through [`Target::get`]/[`Target::set`]; frame animations
//! write through [`Target::set_frame`].
//!
//! Targets are shared with queues as `Rc<RefCell<T>>`. Queues only keep a
//! `Weak` reference, so dropping the last strong handle detaches every queue.

use std::fmt::Debug;

pub trait Target: 'static {
    /// Property selector, usually a small enum.
    type Prop: Clone + PartialEq + Debug + 'static;
    /// Opaque frame reference shown by frame animations.
    type Frame: Clone + 'static;

    fn get(&self, prop: &Self::Prop) -> f32;
    fn set(&mut self, prop: &Self::Prop, value: f32);
    fn set_frame(&mut self, frame: Self::Frame);
}
