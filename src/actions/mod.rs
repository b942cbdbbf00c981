//! Action scheduling: queues of timed steps, completion listeners, and the
//! registry that advances them once per tick.
//!
//! Submodules overview:
//! - [`queue`] – per-target step sequences with a chaining builder API
//! - [`listener`] – `any`/`all` completion callbacks over a group of queues
//! - [`registry`] – active set of queues and listeners, driven by `tick`
//! - [`tween`] – property destinations for transitions
//! - `step` – the Callback, Delay, Transition and FrameAnimation step variants

pub mod listener;
pub mod queue;
pub mod registry;
mod step;
pub mod tween;

pub use listener::ActionListener;
pub use queue::{ActionQueue, QueueHandle, QueueId};
pub use registry::Registry;
pub use step::CallbackError;
pub use tween::{PropTween, Tween};
