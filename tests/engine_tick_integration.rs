//! Engine tick integration tests for the time and action systems.

use std::cell::RefCell;
use std::rc::Rc;

use bevy_ecs::prelude::*;

use aberredactions::actions::{Registry, Tween};
use aberredactions::components::sprite::{Sprite, SpriteProp};
use aberredactions::easing::{Easing, FixedSource};
use aberredactions::resources::actionsconfig::ActionsConfig;
use aberredactions::resources::worldtime::WorldTime;
use aberredactions::systems::actions::update_actions;
use aberredactions::systems::time::update_world_time;

const EPSILON: f32 = 1e-5;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn make_world(config: ActionsConfig) -> (World, Schedule, Registry) {
    let registry = Registry::with_random(config.clone(), FixedSource(0.5));
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(config);
    world.insert_non_send_resource(registry.clone());

    let mut schedule = Schedule::default();
    schedule.add_systems(update_actions);
    (world, schedule, registry)
}

fn frame(world: &mut World, schedule: &mut Schedule, dt: f32) {
    update_world_time(world, dt);
    schedule.run(world);
}

#[test]
fn world_time_counts_frames_and_elapsed() {
    let (mut world, mut schedule, _registry) = make_world(ActionsConfig::default());
    for _ in 0..4 {
        frame(&mut world, &mut schedule, 0.1);
    }
    let time = world.resource::<WorldTime>();
    assert_eq!(time.frame_count, 4);
    assert!(approx_eq(time.elapsed, 0.4));
    assert!(approx_eq(time.delta, 0.1));
}

#[test]
fn world_time_clamps_long_frames() {
    let (mut world, mut schedule, _registry) = make_world(ActionsConfig::default());
    frame(&mut world, &mut schedule, 3.0);
    assert!(approx_eq(world.resource::<WorldTime>().delta, 0.25));

    frame(&mut world, &mut schedule, -1.0);
    assert_eq!(world.resource::<WorldTime>().delta, 0.0);
}

#[test]
fn world_time_without_config_is_unclamped() {
    let mut world = World::new();
    world.insert_resource(WorldTime::default().with_time_scale(0.5));
    update_world_time(&mut world, 3.0);
    assert!(approx_eq(world.resource::<WorldTime>().delta, 1.5));
}

#[test]
fn time_scales_multiply() {
    let config = ActionsConfig {
        time_scale: 2.0,
        max_delta: 0.0,
        ..ActionsConfig::default()
    };
    let (mut world, mut schedule, _registry) = make_world(config);
    world.resource_mut::<WorldTime>().time_scale = 0.5;
    frame(&mut world, &mut schedule, 1.0);
    assert!(approx_eq(world.resource::<WorldTime>().delta, 1.0));
}

#[test]
fn action_system_advances_registry_with_scaled_delta() {
    let (mut world, mut schedule, registry) = make_world(ActionsConfig::default());
    world.resource_mut::<WorldTime>().time_scale = 2.0;
    let sprite = Rc::new(RefCell::new(Sprite::new("idle")));
    registry
        .queue(&sprite)
        .to(Tween::new().to_eased(SpriteProp::X, 100.0, Easing::Linear), 1.0)
        .unwrap()
        .start();

    frame(&mut world, &mut schedule, 0.1);
    assert!(approx_eq(sprite.borrow().x, 20.0));
    for _ in 0..5 {
        frame(&mut world, &mut schedule, 0.1);
    }
    assert_eq!(sprite.borrow().x, 100.0);
    assert!(world.non_send_resource::<Registry>().is_idle());
}

#[test]
fn paused_world_holds_actions() {
    let (mut world, mut schedule, registry) = make_world(ActionsConfig::default());
    world.resource_mut::<WorldTime>().time_scale = 0.0;
    let sprite = Rc::new(RefCell::new(Sprite::new("idle")));
    let q = registry.queue(&sprite);
    q.wait(0.1).unwrap().start();

    for _ in 0..10 {
        frame(&mut world, &mut schedule, 0.1);
    }
    assert!(!q.is_done());
    assert_eq!(registry.active_queue_count(), 1);
}
