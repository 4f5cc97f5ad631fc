//! Standalone walker binary.
//!
//! Usage:
//!   cargo run -p engine_client -- [--config walker.json] [--scene map1]
//!       [--objects-dir Objects] [--sprites-dir Sprites] [--frames 500]
//!       [--input timeline.txt] [--svg last_frame.svg] [--fly]
//!
//! Loads the scene, then runs the frame loop at the configured rate until
//! cancel is pressed, the frame limit is hit, or a scripted timeline runs
//! out. Without `--frames` or `--input` it runs forever.

use std::env;
use std::time::Duration;

use anyhow::Context;
use engine_client::{
    canvas::SvgCanvas,
    client::WalkerClient,
    input::{IdleInput, InputSource, ScriptedInput},
};
use engine_shared::{config::EngineConfig, physics::MovementMode};
use tracing::info;

#[derive(Debug, Default)]
struct Args {
    config: Option<String>,
    scene: Option<String>,
    objects_dir: Option<String>,
    sprites_dir: Option<String>,
    frames: Option<u64>,
    input: Option<String>,
    svg: Option<String>,
    fly: bool,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut out = Args::default();
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" if i + 1 < args.len() => {
                out.config = Some(args[i + 1].clone());
                i += 2;
            }
            "--scene" if i + 1 < args.len() => {
                out.scene = Some(args[i + 1].clone());
                i += 2;
            }
            "--objects-dir" if i + 1 < args.len() => {
                out.objects_dir = Some(args[i + 1].clone());
                i += 2;
            }
            "--sprites-dir" if i + 1 < args.len() => {
                out.sprites_dir = Some(args[i + 1].clone());
                i += 2;
            }
            "--frames" if i + 1 < args.len() => {
                let n = args[i + 1]
                    .parse()
                    .with_context(|| format!("parse --frames '{}'", args[i + 1]))?;
                out.frames = Some(n);
                i += 2;
            }
            "--input" if i + 1 < args.len() => {
                out.input = Some(args[i + 1].clone());
                i += 2;
            }
            "--svg" if i + 1 < args.len() => {
                out.svg = Some(args[i + 1].clone());
                i += 2;
            }
            "--fly" => {
                out.fly = true;
                i += 1;
            }
            _ => i += 1,
        }
    }
    Ok(out)
}

fn build_config(args: &Args) -> anyhow::Result<EngineConfig> {
    let mut cfg = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if let Some(scene) = &args.scene {
        cfg.scene = scene.clone();
    }
    if let Some(dir) = &args.objects_dir {
        cfg.objects_dir = dir.clone();
    }
    if let Some(dir) = &args.sprites_dir {
        cfg.sprites_dir = dir.clone();
    }
    if args.fly {
        cfg.physics.mode = MovementMode::Fly;
    }
    Ok(cfg)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = parse_args()?;
    let cfg = build_config(&args)?;
    info!(scene = %cfg.scene, frame_hz = cfg.frame_hz, mode = ?cfg.physics.mode, "Starting walker");

    let mut client = WalkerClient::load(&cfg)?;

    let mut input: Box<dyn InputSource> = match &args.input {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read input timeline {path}"))?;
            Box::new(ScriptedInput::parse(&text).with_context(|| format!("parse {path}"))?)
        }
        None => Box::new(IdleInput),
    };
    let stop_when_exhausted = args.input.is_some() && args.frames.is_none();

    let mut canvas = SvgCanvas::new();
    let frame_interval = Duration::from_secs_f64(1.0 / f64::from(cfg.frame_hz.max(1)));
    let mut next_frame = tokio::time::Instant::now();

    loop {
        if args.frames.is_some_and(|limit| client.frames() >= limit) {
            break;
        }
        if stop_when_exhausted && input.is_exhausted() {
            break;
        }

        let buttons = input.poll();
        let Some(stats) = client.frame(buttons, &mut canvas) else {
            break;
        };
        if stats.geometry_errors > 0 {
            info!(frame = client.frames(), errors = stats.geometry_errors, "Polygons skipped");
        }

        // Wait for next frame.
        next_frame += frame_interval;
        tokio::time::sleep_until(next_frame).await;
    }

    info!(
        frames = client.frames(),
        position = ?client.camera.position,
        yaw = client.camera.yaw,
        "Walker stopped"
    );

    if let Some(path) = &args.svg {
        canvas.save(path)?;
        info!(path = %path, "Wrote last frame");
    }

    Ok(())
}
