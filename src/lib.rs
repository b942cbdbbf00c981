//! Aberred Actions library.
//!
//! Timed action queues for scene objects: callbacks, delays, eased property
//! transitions and frame animations, advanced by an explicit [`Registry`]
//! tick. Completion listeners report when any or all of a group of queues
//! are done.
//!
//! The ECS side (components, resources, systems) plugs the registry into a
//! `bevy_ecs` world and is used by the demo binary and integration tests.
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use aberredactions::actions::{Registry, Tween};
//! use aberredactions::components::sprite::{Sprite, SpriteProp};
//!
//! let registry = Registry::new();
//! let sprite = Rc::new(RefCell::new(Sprite::new("idle")));
//! registry
//!     .queue(&sprite)
//!     .wait(0.5)?
//!     .to(Tween::new().to(SpriteProp::X, 100.0), 1.0)?
//!     .start();
//!
//! for _ in 0..3 {
//!     registry.tick(0.5);
//! }
//! assert_eq!(sprite.borrow().x, 100.0);
//! # Ok::<(), aberredactions::error::ActionError>(())
//! ```

pub mod actions;
pub mod components;
pub mod easing;
pub mod error;
pub mod resources;
pub mod systems;
pub mod target;

pub use actions::{ActionListener, ActionQueue, QueueHandle, Registry, Tween};
pub use easing::Easing;
pub use error::ActionError;
pub use target::Target;
