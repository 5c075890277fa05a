//! actorcore demo driver.
//!
//! Runs a headless knight-versus-monsters round on the tick-driven actor
//! core:
//! - **bevy_ecs** for entity-component-system architecture
//! - a fixed-step [`TickClock`](actorcore::resources::tickclock::TickClock)
//!   turning frame time into simulation ticks
//! - a scripted input pattern standing in for a keyboard
//!
//! # Main Loop
//!
//! 1. Load `config.ini` (defaults when missing) and the animation sets
//! 2. Insert resources, spawn the knight and the monsters
//! 3. Each frame: feed scripted input, run the due ticks, collect the render
//!    snapshot
//! 4. Stop when the knight falls, the arena is cleared or `--ticks` ran out
//! 5. Release every task, print the run summary as JSON
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run --release -- --ticks 5000 --seed 3
//! ```

use std::error::Error;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use bevy_ecs::prelude::*;
use clap::Parser;
use log::{debug, info, warn};

use actorcore::components::actor::Direction;
use actorcore::game::{
    build_render_schedule, build_tick_schedule, monsters_left, player_alive, run_frame,
    setup_world, spawn_monsters, spawn_player, summarize, teardown_scene,
};
use actorcore::resources::animationstore::AnimationStore;
use actorcore::resources::input::InputState;
use actorcore::resources::renderqueue::RenderQueue;
use actorcore::resources::simconfig::SimConfig;
use actorcore::resources::tickclock::TickClock;

/// Length of one lap of the scripted input pattern, in ticks.
const SCRIPT_LAP: u64 = 240;

/// actorcore headless arena
#[derive(Parser)]
#[command(version, about = "Tick-driven actor core: a headless knight versus monsters round")]
struct Cli {
    /// INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Animation sets JSON. The built-in sets are used when omitted.
    #[arg(long, value_name = "PATH")]
    animations: Option<PathBuf>,

    /// Stop after this many ticks.
    #[arg(long, default_value_t = 3000)]
    ticks: u64,

    /// Override the configured random seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Pace frames with the wall clock instead of synthetic frame times.
    #[arg(long)]
    realtime: bool,

    /// Write the effective configuration to the config path and exit.
    #[arg(long)]
    write_config: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let mut config = SimConfig::with_path(&cli.config);
    if cli.config.exists() {
        config.load_from_file()?;
    } else {
        warn!("{:?} not found, using defaults", cli.config);
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }

    if cli.write_config {
        config.save_to_file()?;
        info!("configuration written to {:?}", config.config_path);
        return Ok(());
    }

    let store = match &cli.animations {
        Some(path) => AnimationStore::load(path)?,
        None => AnimationStore::builtin()?,
    };

    let frame = Duration::from_millis(config.frame_ms.max(1));
    let monster_count = config.monster_count;

    let mut world = World::new();
    setup_world(&mut world, config, store);
    spawn_player(&mut world)?;
    spawn_monsters(&mut world, monster_count)?;

    let mut tick = build_tick_schedule();
    let mut render = build_render_schedule();
    let mut last = Instant::now();

    loop {
        let ticks = world.resource::<TickClock>().ticks;
        if ticks >= cli.ticks || !player_alive(&mut world) || monsters_left(&mut world) == 0 {
            break;
        }

        scripted_input(ticks, &mut world.resource_mut::<InputState>());

        let elapsed = if cli.realtime {
            std::thread::sleep(frame.saturating_sub(last.elapsed()));
            let now = Instant::now();
            let elapsed = now - last;
            last = now;
            elapsed
        } else {
            frame
        };

        let ran = run_frame(&mut world, &mut tick, &mut render, elapsed);
        if ran > 0 {
            let queue = world.resource::<RenderQueue>();
            debug!(
                "frame {}: {} ticks, {} sprites",
                queue.frame,
                ran,
                queue.items.len()
            );
        }
    }

    let summary = summarize(&mut world);
    teardown_scene(&mut world);
    info!("round over: {:?}", summary.outcome);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// Walk a loop around the arena, swinging between legs.
fn scripted_input(tick: u64, input: &mut InputState) {
    input.clear();
    match tick % SCRIPT_LAP {
        0..60 => input.set_direction(Direction::Right, true),
        60..80 => input.set_attack(true),
        80..140 => {
            input.set_direction(Direction::Down, true);
            input.set_direction(Direction::Left, true);
        }
        140..160 => input.set_attack(true),
        160..220 => input.set_direction(Direction::Up, true),
        // hands off: everything released
        _ => {}
    }
}
