//! Voxterra - headless streaming demo
//!
//! Loads the world around the configured camera, then flies a scripted path
//! through it, breaking and placing voxels along the way, and logs what the
//! world streamed and drew.
//!
//! ```text
//! voxterra [--config scene.json] [--seed N | --random-seed] [--frames N]
//!          [--save-config out.json]
//! ```

use std::path::{Path, PathBuf};

use voxterra::core::camera::Movement;
use voxterra::core::logging;
use voxterra::render::RecordingBackend;
use voxterra::scene::{App, FrameInput, SceneConfig};
use voxterra::voxel::edit::{ButtonEdge, EditAction};
use voxterra::voxel::Material;

/// Simulated frame time
const FRAME_DT: f32 = 1.0 / 60.0;

fn main() {
    logging::init();

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> voxterra::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config_path = parse_str_arg(&args, "--config").map(PathBuf::from);
    let frames = parse_usize_arg(&args, "--frames").unwrap_or(600);

    let mut config = match &config_path {
        Some(path) => load_config(path),
        None => SceneConfig::default(),
    };
    if let Some(seed) = seed_override(&args) {
        config.generation.seed = seed;
    }

    if let Some(path) = parse_str_arg(&args, "--save-config") {
        config.save(Path::new(&path))?;
        log::info!("Wrote scene config to {}", path);
    }

    log::info!(
        "Seed {}, render distance {}",
        config.generation.seed,
        config.streaming.render_distance
    );

    let mut app = App::new(config, RecordingBackend::new())?;
    app.load_world(|progress| {
        if progress.loaded % 16 == 0 || progress.is_complete() {
            log::info!(
                "Loading terrain {}/{} ({:.0}%)",
                progress.loaded,
                progress.total,
                progress.fraction() * 100.0
            );
        }
    });

    let mut break_button = ButtonEdge::default();
    let mut place_button = ButtonEdge::default();
    let mut loaded = 0;
    let mut evicted = 0;
    let mut edits = 0;

    for frame in 0..frames {
        // Fly forward while slowly sweeping the view, dipping every few seconds
        let mut input = FrameInput {
            movement: vec![Movement::Forward],
            mouse_delta: (2.0, if (frame / 120) % 2 == 0 { -1.0 } else { 1.0 }),
            dt: Some(FRAME_DT),
            edit: None,
        };
        if break_button.pressed(frame % 90 < 10) {
            input.edit = Some(EditAction::Break);
        } else if place_button.pressed(frame % 90 >= 45 && frame % 90 < 55) {
            input.edit = Some(EditAction::Place(Material::Log));
        }

        app.backend_mut().begin_frame();
        let stats = app.frame(&input);
        loaded += stats.streaming.loaded.len();
        evicted += stats.streaming.evicted.len();
        if let Some(outcome) = stats.edit {
            edits += 1;
            log::debug!("Frame {}: {:?}", frame, outcome);
        }

        if frame % 60 == 0 {
            log::debug!(
                "Frame {}: {} visible, {} culled, {} remeshed, {} vertices",
                frame,
                stats.render.visible,
                stats.render.culled,
                stats.render.remeshed,
                stats.render.vertices
            );
            match serde_json::to_string(&app.debug_info()) {
                Ok(json) => log::info!("{}", json),
                Err(e) => log::warn!("Failed to serialize debug info: {}", e),
            }
        }
    }

    log::info!(
        "Done: {} frames, {} chunks loaded, {} evicted ({} released), {} edits, {} draw calls",
        frames,
        loaded,
        evicted,
        app.backend().release_count(),
        edits,
        app.backend().draw_calls()
    );
    Ok(())
}

/// Missing or broken config files fall back to defaults
fn load_config(path: &Path) -> SceneConfig {
    match SceneConfig::load(path) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Using default scene config, {} failed to load: {}", path.display(), e);
            SceneConfig::default()
        }
    }
}

/// `--seed N` wins over `--random-seed`
fn seed_override(args: &[String]) -> Option<u32> {
    parse_u32_arg(args, "--seed").or_else(|| {
        args.iter()
            .any(|a| a == "--random-seed")
            .then(rand::random::<u32>)
    })
}

fn parse_u32_arg(args: &[String], flag: &str) -> Option<u32> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_usize_arg(args: &[String], flag: &str) -> Option<usize> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
