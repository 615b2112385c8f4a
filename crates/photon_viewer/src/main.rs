mod display;
mod input;
mod observer;
mod presets;

use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use photon_core::Scene;
use photon_renderer::{FrameScheduler, RenderConfig, RenderState};
use rand::rngs::StdRng;
use rand::SeedableRng;

use display::{present, progress_text, ImageSink};
use input::{InputSource, ScriptedInput};
use observer::ObserverController;

/// Interactive recursive ray tracer.
#[derive(Parser, Debug)]
#[command(name = "photon", version, about)]
struct Args {
    /// Displayed width in pixels
    #[arg(long, default_value_t = 350)]
    width: u32,

    /// Displayed height in pixels
    #[arg(long, default_value_t = 300)]
    height: u32,

    /// Render threads (defaults to every logical CPU)
    #[arg(short, long)]
    threads: Option<usize>,

    /// Supersampling factor per axis
    #[arg(long, default_value_t = 2)]
    supersample: u32,

    /// Where to write the last completed frame
    #[arg(short, long, default_value = "photon.png")]
    output: PathBuf,

    /// Observer key script, one key per frame (w s a d r f q e z x)
    #[arg(short, long, default_value = "")]
    keys: String,

    /// Random objects added on top of the default scene
    #[arg(long, default_value_t = 0)]
    random: usize,

    /// Seed for random objects
    #[arg(long)]
    seed: Option<u64>,

    /// Remove this many of the most recently added objects
    #[arg(long, default_value_t = 0)]
    remove_objects: usize,

    /// Remove this many of the most recently added light sources
    #[arg(long, default_value_t = 0)]
    remove_lights: usize,

    /// Delay between frames in milliseconds
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,
}

/// Push the controller pose into the scene.
fn sync_observer(scene: &mut Scene, controller: &ObserverController) {
    scene.set_observer_position(controller.position);
    scene.set_observer_direction(controller.direction());
}

fn build_scene(args: &Args) -> Scene {
    let mut scene = presets::default_scene();

    if args.random > 0 {
        let mut rng = match args.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        for _ in 0..args.random {
            scene.add_object(presets::random_object(&mut rng));
        }
    }

    if args.remove_objects > 0 || args.remove_lights > 0 {
        let removed = presets::trim_scene(&mut scene, args.remove_objects, args.remove_lights);
        log::info!("Removed {} object(s)", removed);
    }

    log::info!("Scene: {}", presets::scene_summary(&scene));
    for line in presets::object_listing(&scene) {
        log::info!("  {}", line);
    }
    scene
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Starting Photon");

    let args = Args::parse();

    let mut config = RenderConfig::default().with_supersample(args.supersample);
    if let Some(threads) = args.threads {
        config = config.with_thread_count(threads);
    }

    let mut scene = build_scene(&args);
    let mut controller = ObserverController::new(scene.observer_position());
    sync_observer(&mut scene, &controller);

    let mut scheduler = FrameScheduler::new(args.width, args.height, config)
        .context("Failed to start the frame scheduler")?;
    let mut input = ScriptedInput::parse(&args.keys);
    let mut sink = ImageSink::new(args.width, args.height);

    let frame_interval = Duration::from_millis(args.frame_ms);
    let started = Instant::now();
    let mut frames = 0usize;
    let mut last_decile = None;

    loop {
        if let Some(key) = input.poll() {
            controller.handle_key(key);
            sync_observer(&mut scene, &controller);
            scheduler.request_redraw();
        }

        let was_rendering = scheduler.is_rendering();
        match scheduler.poll(&scene)? {
            RenderState::Rendering => {
                let decile = (scheduler.progress() * 10.0) as u32;
                if last_decile != Some(decile) {
                    log::info!("{}", progress_text(scheduler.progress()));
                    last_decile = Some(decile);
                }
            }
            RenderState::Idle => {
                if was_rendering {
                    present(scheduler.buffer(), scheduler.config().supersample, &mut sink);
                    frames += 1;
                    last_decile = None;
                }
                if input.is_empty() && !scheduler.needs_redraw() {
                    break;
                }
            }
        }

        thread::sleep(frame_interval);
    }

    log::info!(
        "Presented {} frame(s) in {:.2?}",
        frames,
        started.elapsed()
    );

    sink.save(&args.output)?;
    log::info!("Saved {}", args.output.display());

    Ok(())
}
