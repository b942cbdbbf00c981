//! Time update system.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per frame, clamping and scaling the provided delta.
use bevy_ecs::prelude::*;

use crate::resources::actionsconfig::ActionsConfig;
use crate::resources::worldtime::WorldTime;

/// Update elapsed, delta and frame count on the `WorldTime` resource.
///
/// `dt` is the unscaled frame delta in seconds. Negative or non-finite values
/// count as zero. When an [`ActionsConfig`] resource is present, `dt` is first
/// clamped to its `max_delta` (unless that is `0`) and the configured
/// `time_scale` is applied on top of the clock's own.
pub fn update_world_time(world: &mut World, dt: f32) {
    let mut dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
    let mut config_scale = 1.0;
    if let Some(config) = world.get_resource::<ActionsConfig>() {
        if config.max_delta > 0.0 {
            dt = dt.min(config.max_delta);
        }
        config_scale = config.time_scale;
    }

    let mut wt = world.resource_mut::<WorldTime>();
    let scaled_dt = (dt * wt.time_scale * config_scale).max(0.0);
    wt.elapsed += scaled_dt;
    wt.delta = scaled_dt;
    wt.frame_count += 1;
}
