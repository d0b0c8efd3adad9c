use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use glam::Vec2;

use tumble::config::{DragPolicy, SimConfig};
use tumble::engine::{FrameTimer, PointerTracker};
use tumble::scene::load_demo_scene;
use tumble::systems::{Tick, PHYSICS_DT};

#[derive(Parser)]
#[command(name = "tumble", about = "Headless drag-and-drop physics demo")]
struct Args {
    /// JSON configuration file; missing fields use defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(long, default_value_t = 300)]
    frames: u64,

    /// Fixed frame delta in seconds (ignored with --realtime)
    #[arg(long, default_value_t = PHYSICS_DT)]
    dt: f32,

    /// Measure real frame time and pace to --dt instead of using a fixed step
    #[arg(long)]
    realtime: bool,

    /// Override the configured drag policy
    #[arg(long, value_parser = parse_policy)]
    policy: Option<DragPolicy>,

    /// Extra crates to drop next to the player
    #[arg(long, default_value_t = 0)]
    crates: usize,

    /// Press the pointer here on --grab-frame (e.g. "400,250")
    #[arg(long, value_parser = parse_point)]
    grab: Option<Vec2>,

    /// Pointer position while held; the pointer moves there linearly
    #[arg(long, value_parser = parse_point)]
    drag_to: Option<Vec2>,

    #[arg(long, default_value_t = 0)]
    grab_frame: u64,

    #[arg(long, default_value_t = 60)]
    release_frame: u64,

    /// Reset every body on this frame
    #[arg(long)]
    reset_frame: Option<u64>,

    /// Print every body and collision each frame
    #[arg(long)]
    trace: bool,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    print_config: bool,
}

fn parse_point(s: &str) -> Result<Vec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {s:?}"))?;
    let x: f32 = x.trim().parse().map_err(|e| format!("bad x {x:?}: {e}"))?;
    let y: f32 = y.trim().parse().map_err(|e| format!("bad y {y:?}: {e}"))?;
    Ok(Vec2::new(x, y))
}

fn parse_policy(s: &str) -> Result<DragPolicy, String> {
    match s {
        "direct" => Ok(DragPolicy::Direct),
        "steer" => Ok(DragPolicy::Steer),
        other => Err(format!("unknown drag policy {other:?} (direct|steer)")),
    }
}

/// Scripted pointer: pressed at `grab` on `grab_frame`, glides to `drag_to`,
/// released on `release_frame`.
fn pointer_sample(args: &Args, frame: u64) -> (bool, Vec2) {
    let Some(grab) = args.grab else {
        return (false, Vec2::ZERO);
    };
    let target = args.drag_to.unwrap_or(grab);
    let down = frame >= args.grab_frame && frame < args.release_frame;
    let span = args.release_frame.saturating_sub(args.grab_frame).max(1) as f32;
    let t = (frame.saturating_sub(args.grab_frame) as f32 / span).clamp(0.0, 1.0);
    (down, grab.lerp(target, t))
}

fn run(args: &Args) -> tumble::Result<()> {
    let mut config = match &args.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    if let Some(policy) = args.policy {
        config.drag.policy = policy;
    }

    if args.print_config {
        println!("{}", config.to_json_pretty()?);
        return Ok(());
    }

    let (mut sim, player) = load_demo_scene(config, args.crates)?;
    let mut tracker = PointerTracker::new();
    let mut timer = FrameTimer::new();
    let target = Duration::try_from_secs_f32(args.dt).unwrap_or(Duration::ZERO);

    for frame in 0..args.frames {
        let dt = if args.realtime {
            timer.pace(target);
            timer.tick();
            timer.dt
        } else {
            args.dt
        };

        if args.reset_frame == Some(frame) {
            sim.reset_all();
            log::info!("frame {frame}: reset");
        }

        let (down, position) = pointer_sample(args, frame);
        let pointer = tracker.update(down, position);

        if sim.step(dt, &pointer) == Tick::Skipped {
            continue;
        }

        if args.trace {
            for (entity, body) in sim.world().query::<&tumble::Body>().iter() {
                let name = sim.name(entity).unwrap_or_else(|| format!("{entity:?}"));
                println!(
                    "{frame:5} {name:>8} pos=({:8.2},{:8.2}) vel=({:8.2},{:8.2}) drag={}",
                    body.rect.x,
                    body.rect.y,
                    body.physics.velocity.x,
                    body.physics.velocity.y,
                    body.drag.is_dragging()
                );
            }
            for event in sim.events() {
                println!(
                    "{frame:5} collision {:?} obstacle#{} side={} depth={:.3} vel {:?} -> {:?}",
                    event.entity,
                    event.obstacle_index,
                    event.side,
                    event.depth,
                    event.velocity_before,
                    event.velocity_after
                );
            }
        }
    }

    let rect = sim.rect(player)?;
    println!(
        "player after {} frame(s): x={:.2} y={:.2} w={} h={} grounded={}",
        sim.frames(),
        rect.x,
        rect.y,
        rect.width,
        rect.height,
        sim.is_grounded(player)
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
