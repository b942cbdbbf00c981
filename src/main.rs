//! Aberred Actions demo entry point.
//!
//! A headless scene that drives a single [`Sprite`] through the action
//! scheduler inside a `bevy_ecs` world:
//! - a motion queue with a callback, a bouncing move, a pause and a spin
//! - a frame queue playing a walk cycle, from a clip file when one is given
//! - a fade queue that flickers the sprite out
//! - a listener that reports when the first and the last queue finish
//!
//! # Main Loop
//!
//! 1. Load the INI config and optional JSON clips
//! 2. Insert `WorldTime`, `ActionsConfig`, `FrameStore` and the non-send `Registry`
//! 3. Queue the scene, then run `update_actions` once per fixed frame until
//!    the registry is idle or the frame limit is hit
//!
//! # Running
//!
//! ```sh
//! cargo run -- --frames 120 --dt 0.016 --clips ./clips.json
//! ```

use std::cell::RefCell;
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;
use std::sync::Arc;

use bevy_ecs::prelude::*;
use clap::Parser;
use log::{debug, error, info, warn};

use aberredactions::actions::{Registry, Tween};
use aberredactions::components::sprite::{Sprite, SpriteProp};
use aberredactions::easing::Easing;
use aberredactions::error::ActionError;
use aberredactions::resources::actionsconfig::ActionsConfig;
use aberredactions::resources::framestore::FrameStore;
use aberredactions::resources::worldtime::WorldTime;
use aberredactions::systems::actions::update_actions;
use aberredactions::systems::time::update_world_time;

#[derive(Parser, Debug)]
#[command(version, about = "Run a headless action scheduler demo")]
struct Cli {
    /// INI configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Maximum number of frames to simulate.
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Fixed frame delta in seconds.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// JSON frame clip file. A clip named `walk` replaces the built-in cycle.
    #[arg(long)]
    clips: Option<String>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            let mut config = ActionsConfig::with_path(path);
            if let Err(e) = config.load_from_file() {
                error!("{}", e);
                return ExitCode::FAILURE;
            }
            config
        }
        None => ActionsConfig::new(),
    };

    let clips = match &cli.clips {
        Some(path) => match FrameStore::load_from_file(path) {
            Ok(store) => {
                info!("Loaded {} frame clips from {}", store.clips.len(), path);
                store
            }
            Err(e) => {
                error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => FrameStore::new(),
    };

    let registry = Registry::with_config(config.clone());
    let sprite = Rc::new(RefCell::new(Sprite::new("walk_0").at(0.0, 0.0)));

    if let Err(e) = build_scene(&registry, &sprite, &clips) {
        error!("Failed to build scene: {}", e);
        return ExitCode::FAILURE;
    }

    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(config);
    world.insert_resource(clips);
    world.insert_non_send_resource(registry);

    let mut update = Schedule::default();
    update.add_systems(update_actions);
    if let Err(e) = update.initialize(&mut world) {
        error!("Failed to initialize schedule: {:?}", e);
        return ExitCode::FAILURE;
    }

    // --------------- Main loop ---------------
    for _ in 0..cli.frames {
        update_world_time(&mut world, cli.dt);
        update.run(&mut world);

        {
            let s = sprite.borrow();
            debug!(
                "frame {}: x={:.2} y={:.2} rot={:.1} sx={:.2} alpha={:.2} tex={}",
                world.resource::<WorldTime>().frame_count,
                s.x,
                s.y,
                s.rotation,
                s.scale_x,
                s.alpha,
                s.tex_key
            );
        }

        if world.non_send_resource::<Registry>().is_idle() {
            break;
        }
    }

    let time = *world.resource::<WorldTime>();
    let registry = world.non_send_resource::<Registry>();
    if !registry.is_idle() {
        warn!(
            "Frame limit reached with {} queues and {} listeners still active",
            registry.active_queue_count(),
            registry.active_listener_count()
        );
    }
    let s = sprite.borrow();
    info!(
        "Finished after {} frames ({:.2}s): {:?}",
        time.frame_count, time.elapsed, *s
    );
    ExitCode::SUCCESS
}

fn build_scene(
    registry: &Registry,
    sprite: &Rc<RefCell<Sprite>>,
    clips: &FrameStore,
) -> Result<(), ActionError> {
    let motion = registry.queue(sprite);
    motion
        .then(|| info!("Scene started"))
        .to(
            Tween::new()
                .to(SpriteProp::X, 200.0)
                .to_named(SpriteProp::Y, 120.0, "easeOutBounce")?,
            1.0,
        )?
        .wait(0.25)?
        .to(
            Tween::new()
                .to_eased(SpriteProp::Rotation, 360.0, Easing::SwingFromTo)
                .to(SpriteProp::ScaleX, 2.0)
                .to(SpriteProp::ScaleY, 2.0),
            0.5,
        )?
        .then(|| info!("Motion finished"))
        .start();

    let frames = registry.queue(sprite);
    let walk = match clips.get("walk") {
        Ok(clip) => frames.animate_clip(clip)?,
        Err(e) => {
            debug!("{}; using the built-in walk cycle", e);
            frames.animate(
                ["walk_0", "walk_1", "walk_2", "walk_3"].map(Arc::<str>::from),
                12.0,
                Some(8),
            )?
        }
    };
    walk.start();

    let fade = registry.queue(sprite);
    fade.wait(1.5)?
        .to(Tween::new().to_eased(SpriteProp::Alpha, 0.0, Easing::Flicker), 0.5)?
        .start();

    registry
        .watch([motion.handle(), frames.handle(), fade.handle()])?
        .any(|| info!("First queue finished"))
        .all(|| info!("All queues finished"));

    Ok(())
}
