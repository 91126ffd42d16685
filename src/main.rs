//! Topdown Arena entry point
//!
//! Headless host: runs a seeded session with scripted input and logs what a
//! real renderer would be asked to draw.
//!
//! Usage: `topdown-arena [config.json] [seed] [frames]`

use std::process::ExitCode;

use topdown_arena::renderer::{RecordingRenderer, Renderer, SpriteId};
use topdown_arena::sim::{Camera, InputSnapshot, SimulationLoop, WorldBounds};
use topdown_arena::{SimConfig, SimError, Vec2};

const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);
const DEFAULT_SEED: u64 = 12345;
const DEFAULT_FRAMES: u64 = 600;

/// Logs draw calls and keeps counts for the final summary
#[derive(Default)]
struct LogRenderer {
    inner: RecordingRenderer,
}

impl Renderer for LogRenderer {
    fn set_camera(&mut self, camera: &Camera) {
        log::trace!("camera origin ({:.1}, {:.1})", camera.origin.x, camera.origin.y);
        self.inner.set_camera(camera);
    }

    fn draw_background(&mut self, bounds: &WorldBounds, grid_spacing: f64) {
        log::trace!("grid {}x{} every {}", bounds.width, bounds.height, grid_spacing);
        self.inner.draw_background(bounds, grid_spacing);
    }

    fn draw_sprite(&mut self, sprite: SpriteId, pos: Vec2, rotation: f64, half_extent: Vec2) {
        log::trace!("{} at ({:.1}, {:.1}) rot {:.2}", sprite.as_str(), pos.x, pos.y, rotation);
        self.inner.draw_sprite(sprite, pos, rotation, half_extent);
    }

    fn draw_status(&mut self, text: &str) {
        self.inner.draw_status(text);
    }

    fn end_frame(&mut self) {
        self.inner.end_frame();
        if self.inner.frames % 60 == 0 {
            if let Some(status) = &self.inner.last_status {
                log::info!("frame {}: {}", self.inner.frames, status);
            }
        }
    }
}

/// Walk a square loop while sweeping the pointer around the player
fn scripted_input(frame: u64, player_pos: Vec2) -> InputSnapshot {
    let leg = (frame / 120) % 4;
    let angle = frame as f64 * 0.05;
    InputSnapshot {
        right: leg == 0,
        down: leg == 1,
        left: leg == 2,
        up: leg == 3,
        pointer: Some(player_pos + Vec2::new(angle.cos(), angle.sin()) * 100.0),
    }
}

fn load_config(path: Option<&String>) -> Result<SimConfig, SimError> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .map_err(|e| SimError::InvalidConfiguration {
                    reason: format!("cannot read {path}: {e}"),
                })?;
            let config = SimConfig::from_json(&json)?;
            log::info!("Loaded config from {}", path);
            Ok(config)
        }
        None => Ok(SimConfig::default()),
    }
}

fn run() -> Result<(), SimError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = load_config(args.first())?;
    let seed = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(DEFAULT_SEED);
    let frames = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(DEFAULT_FRAMES);

    let mut sim = SimulationLoop::new(config);
    sim.start_seeded(VIEWPORT, seed)?;
    log::info!("Started new session with seed: {}", seed);

    let mut renderer = LogRenderer::default();
    if let Some(commands) = sim.render_commands() {
        commands.submit(&mut renderer);
    }

    for frame in 0..frames {
        let player_pos = sim.player().map(|p| p.pos).unwrap_or(Vec2::ZERO);
        let input = scripted_input(frame, player_pos);
        let commands = sim.tick(&input)?;
        commands.submit(&mut renderer);
    }

    if let Some(snapshot) = sim.snapshot() {
        match serde_json::to_string_pretty(&snapshot.player) {
            Ok(json) => println!("{json}"),
            Err(e) => log::warn!("Could not serialize player: {}", e),
        }
    }
    log::info!(
        "Rendered {} frames, {} sprites",
        renderer.inner.frames,
        renderer.inner.sprites_drawn
    );

    sim.destroy();
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Topdown Arena (headless) starting...");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
