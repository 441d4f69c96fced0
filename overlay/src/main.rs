//! Headless presence compositor.
//!
//! Connects to the presence socket, fetches the profile supplement once,
//! and runs the scene at the configured tick rate with a scripted pointer
//! sweep. By default frames are composited and dropped; with
//! `--capture <dir> [frames]` each frame is also written out as a PNG.
//!
//! Run with: cargo run -p noisefloor-overlay

use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use noisefloor_core::presence::{cdn, profile};
use noisefloor_core::{AppConfig, PresenceClient, PresencePhase};
use noisefloor_overlay::{FrameInput, Scene};

struct CaptureArgs {
    dir: PathBuf,
    frames: u64,
}

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    // If NOISEFLOOR_LOG_PATH is set, append to that file
    if let Ok(path) = std::env::var("NOISEFLOOR_LOG_PATH") {
        if let Ok(file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
        {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_ansi(false)
                .with_writer(file)
                .init();
            return;
        }
    }

    // Fallback to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_capture_args() -> Option<CaptureArgs> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--capture" {
            let Some(dir) = args.next() else {
                warn!("--capture needs a directory; ignoring");
                return None;
            };
            let frames = args
                .next()
                .and_then(|n| n.parse().ok())
                .unwrap_or(300);
            return Some(CaptureArgs { dir: PathBuf::from(dir), frames });
        }
    }
    None
}

/// Slow figure-eight sweep across the viewport, standing in for a real
/// pointer so the trail and halo have something to follow.
fn scripted_pointer(elapsed: Duration, width: f32, height: f32) -> (f32, f32) {
    let t = elapsed.as_secs_f32() * 0.4;
    let x = width * (0.5 + 0.35 * t.sin());
    let y = height * (0.5 + 0.3 * (2.0 * t).sin());
    (x, y)
}

#[tokio::main]
async fn main() {
    init_logging();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let Some(mut scene) = Scene::new(&config.effects, &config.capture) else {
        error!(
            "invalid capture dimensions {}x{}",
            config.capture.width, config.capture.height
        );
        std::process::exit(1);
    };

    let capture = parse_capture_args();
    if let Some(capture) = &capture {
        if let Err(e) = std::fs::create_dir_all(&capture.dir) {
            error!("cannot create capture directory {:?}: {e}", capture.dir);
            std::process::exit(1);
        }
        info!("capturing {} frames to {:?}", capture.frames, capture.dir);
    }

    let handle = PresenceClient::spawn(config.presence.clone());

    // One-shot side channel; the card renders without it until it lands.
    let supplement = profile::fetch_supplement_once(&config.presence).await;
    if let Some(supplement) = &supplement {
        match &supplement.banner {
            Some(hash) => info!(
                "profile supplement loaded; banner {}",
                cdn::banner_url(&config.presence.cdn_base, &config.presence.account_id, hash)
            ),
            None => info!("profile supplement loaded"),
        }
    }
    scene.set_supplement(supplement);

    let tick = Duration::from_secs_f32(1.0 / config.capture.fps.max(1.0));
    let mut interval = tokio::time::interval(tick);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let started = Instant::now();
    let viewport = scene.viewport();
    let (width, height) = (viewport.width as f32, viewport.height as f32);
    let mut last_pointer: Option<(f32, f32)> = None;
    let mut frame: u64 = 0;
    let mut saw_live = false;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("shutting down");
                break;
            }
            _ = interval.tick() => {}
        }

        let now = Instant::now();
        let pointer = scripted_pointer(now.duration_since(started), width, height);
        let moved = last_pointer != Some(pointer);
        last_pointer = Some(pointer);

        let input = FrameInput::new(now, viewport).with_pointer(pointer.0, pointer.1, moved);
        scene.advance(&input);
        let phase = handle.phase();
        scene.render(&phase);

        if !saw_live
            && let PresencePhase::Live(snapshot) = &phase
        {
            saw_live = true;
            let user = &snapshot.discord_user;
            if let Some(hash) = &user.avatar {
                info!(
                    "live for @{}; avatar {}",
                    user.username,
                    cdn::avatar_url(&config.presence.cdn_base, &user.id, hash)
                );
            } else {
                info!("live for @{}", user.username);
            }
        }

        if let Some(capture) = &capture {
            let path = capture.dir.join(format!("frame-{frame:05}.png"));
            if let Err(e) = scene.surface().save_png(&path) {
                error!("capture write failed at {path:?}: {e}");
                break;
            }
            if frame + 1 >= capture.frames {
                info!("capture complete after {} frames", capture.frames);
                break;
            }
        }
        frame += 1;

        if handle.is_finished() {
            // Terminal failure upstream. Render the failed card once so a
            // capture run records it, then stop.
            scene.render(&handle.phase());
            warn!("presence session ended; exiting");
            break;
        }
    }

    scene.teardown();
    handle.close().await;
}
