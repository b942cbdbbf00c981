//! Action scheduler system.
//!
//! The [`Registry`] holds `Rc` handles, so it lives in the world as a
//! non-send resource and this system runs on the main thread.
use bevy_ecs::prelude::*;
use log::trace;

use crate::actions::Registry;
use crate::resources::worldtime::WorldTime;

/// Advance every active action queue and listener by the frame delta.
pub fn update_actions(time: Res<WorldTime>, registry: NonSend<Registry>) {
    registry.tick(time.delta);
    trace!(
        "actions tick {}: {} queues, {} listeners",
        time.frame_count,
        registry.active_queue_count(),
        registry.active_listener_count()
    );
}
