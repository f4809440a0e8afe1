//! Headless molview runner.
//!
//! Drives a viewer against a small sample scene with a real-time interval
//! scheduler and writes the last rendered frame as JSON, the same draw list a
//! GPU frontend would consume.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use molview_core::{
    InputEvent, InputObserver, InputSender, IntervalScheduler, PointerButton, Viewer, ViewerConfig,
};
use molview_renderer::{ObjectKind, RenderObject, SceneRenderer};

#[derive(Parser, Debug)]
#[command(name = "molview-headless", about = "Run the molview viewer core without a window")]
struct Args {
    /// Viewer configuration (JSON). Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of frames to run.
    #[arg(short, long, default_value_t = 120)]
    frames: u32,

    /// Container width in logical pixels.
    #[arg(long, default_value_t = 800.0)]
    width: f64,

    /// Container height in logical pixels.
    #[arg(long, default_value_t = 600.0)]
    height: f64,

    /// Draw continuously instead of only on demand.
    #[arg(long)]
    animate: bool,

    /// Write the last frame's draw list here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

type HeadlessViewer = Viewer<SceneRenderer, IntervalScheduler>;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ViewerConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ViewerConfig::default(),
    };

    let (input, sender) = InputObserver::channel();
    let scheduler = IntervalScheduler::with_target_fps(config.target_fps);
    let mut viewer = Viewer::with_config(
        &config,
        (args.width, args.height),
        input,
        SceneRenderer::new(),
        scheduler,
    )?;

    for object in sample_scene() {
        viewer.add(object)?;
    }
    if args.animate {
        viewer.animate()?;
    } else {
        viewer.request_draw()?;
    }

    run(&mut viewer, &sender, &args)?;

    let stats = viewer.stats();
    log::info!(
        "{} frames drawn, {} requests coalesced, {} resizes",
        stats.frames_drawn,
        stats.requests_coalesced,
        stats.resizes
    );

    if let Some(frame) = viewer.renderer().last_frame() {
        let json = frame.to_json()?;
        match &args.output {
            Some(path) => std::fs::write(path, json)
                .with_context(|| format!("failed to write {}", path.display()))?,
            None => println!("{json}"),
        }
    }

    viewer.dispose()?;
    Ok(())
}

/// Host loop: feed a slow orbit drag as input and fire frames when due.
fn run(viewer: &mut HeadlessViewer, sender: &InputSender, args: &Args) -> anyhow::Result<()> {
    let (cx, cy) = (args.width as f32 / 2.0, args.height as f32 / 2.0);
    sender.send(InputEvent::PointerDown {
        x: cx,
        y: cy,
        button: PointerButton::Primary,
    })?;

    let mut fired = 0;
    let mut step = 0.0_f32;
    while fired < args.frames {
        step += 4.0;
        sender.send(InputEvent::PointerMove { x: cx + step, y: cy })?;
        viewer.process_input()?;

        let Some(due) = viewer.scheduler().next_frame_time() else {
            log::debug!("Nothing scheduled, stopping after {fired} frames");
            break;
        };
        let now = Instant::now();
        if due > now {
            std::thread::sleep(due - now);
        }
        if viewer.scheduler_mut().poll(Instant::now()) {
            viewer.on_frame();
            fired += 1;
        }
    }

    sender.send(InputEvent::PointerUp {
        button: PointerButton::Primary,
    })?;
    viewer.process_input()?;
    Ok(())
}

/// A helix of atoms and the bonds between them.
fn sample_scene() -> Vec<RenderObject> {
    let positions: Vec<[f32; 3]> = (0..48)
        .map(|i| {
            let t = i as f32 * 0.35;
            [8.0 * t.cos(), i as f32 * 0.6 - 14.0, 8.0 * t.sin()]
        })
        .collect();
    let bonds: Vec<[f32; 3]> = positions
        .windows(2)
        .flat_map(|pair| [pair[0], pair[1]])
        .collect();

    vec![
        RenderObject::new("atoms", ObjectKind::Spheres, positions).with_color(0.2, 0.6, 1.0, 1.0),
        RenderObject::new("bonds", ObjectKind::Lines, bonds).with_color(0.8, 0.8, 0.8, 1.0),
    ]
}
