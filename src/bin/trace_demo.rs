//! Headless trace demo
//!
//! Runs a challenge end-to-end without a window or tracker: a scripted hand
//! walks the path vertices, draw calls land in a recording renderer, the eye
//! sways side to side through the off-axis projection, and the scoring JSON
//! lands on stdout.
//!
//! Usage: `trace_demo [challenge-file]` (defaults to the first practice
//! path under `data/challenges/`).

use anyhow::Result;
use fishtank::challenge::{challenge_file, Challenge, ChallengeConfig};
use fishtank::cloud::PointCloud;
use fishtank::display::Display;
use fishtank::hand::ScriptedHand;
use fishtank::render::RecordingRenderer;
use glam::Vec3;
use log::info;
use std::path::PathBuf;

/// Physical display: a 34x52 cm portrait panel standing on the table plane.
const DISPLAY_WIDTH: f32 = 34.0;
const DISPLAY_HEIGHT: f32 = 52.0;
const DISPLAY_DEPTH: f32 = 30.0;

fn main() -> Result<()> {
    env_logger::init();

    let path: PathBuf = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| challenge_file(-1));

    let display = Display::new(
        Vec3::ZERO,
        DISPLAY_WIDTH,
        DISPLAY_HEIGHT,
        DISPLAY_DEPTH,
        0.1,
        200.0,
    )?;

    let config = ChallengeConfig {
        centre: Vec3::new(0.0, DISPLAY_HEIGHT / 2.0, 10.0),
        ..ChallengeConfig::default()
    };
    let mut challenge = Challenge::from_file(&path, config)?;
    info!(
        "Loaded challenge {:?} with {} segments",
        path,
        challenge.segments().len()
    );

    // Script a perfect trace: one tick per segment end.
    let ends: Vec<Vec3> = challenge.segments().iter().map(|s| s.end).collect();
    let hand = ScriptedHand::tracing_path(ends.clone());

    let mut renderer = RecordingRenderer::new();
    let mut cloud = PointCloud::new();

    let mut tick = 0u32;
    while !challenge.is_finished() && tick <= challenge.segments().len() as u32 + 1 {
        // The tracked eye sways laterally in front of the panel.
        let eye = Vec3::new(
            (tick as f32 * 0.4).sin() * 8.0,
            DISPLAY_HEIGHT / 2.0,
            60.0,
        );
        let view_projection = display.projection_to_eye(eye);

        challenge.update(&hand);
        cloud.update_cloud(ends.clone());

        renderer.clear();
        challenge.draw(&mut renderer);
        cloud.draw_with(&mut renderer, Vec3::ZERO, eye);

        if let Some(active) = challenge.segments().iter().find(|s| !s.completed) {
            let clip = view_projection * active.end.extend(1.0);
            let ndc = clip.truncate() / clip.w;
            info!(
                "tick {}: {}/{} complete, {} draw calls, next target at NDC ({:.2}, {:.2})",
                tick,
                challenge.completed_count(),
                challenge.segments().len(),
                renderer.calls.len(),
                ndc.x,
                ndc.y,
            );
        }
        tick += 1;
    }

    info!("Challenge finished after {} ticks", tick);
    cloud.save("pointcloud.csv");

    println!("{}", challenge.progress_json()?);
    Ok(())
}
