//! Frame loop
//!
//! `SimulationLoop` owns the whole world and advances it once per host frame:
//! input -> motion -> integrate -> resolve collisions -> camera -> render commands.

use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::collision::{self, Resolution};
use super::input::InputSnapshot;
use super::movement::compute_frame_motion;
use super::obstacles::ObstacleField;
use super::random::{RandomSource, SeededRandom};
use super::state::{LoopPhase, Player, RngState, WorldBounds};
use crate::Vec2;
use crate::error::SimError;
use crate::renderer::{RenderCommand, RenderCommands, SpriteId};
use crate::settings::SimConfig;

/// State that only exists while running
#[derive(Debug, Clone)]
struct World {
    bounds: WorldBounds,
    field: ObstacleField,
    player: Player,
    camera: Camera,
    viewport: Vec2,
    rng_state: Option<RngState>,
    frame: u64,
}

/// Serializable copy of a running world (debug dumps, tests)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub bounds: WorldBounds,
    pub field: ObstacleField,
    pub player: Player,
    pub camera: Camera,
    pub frame: u64,
    pub rng_state: Option<RngState>,
}

/// One simulation session: Uninitialized -> Running -> Destroyed
#[derive(Debug, Clone)]
pub struct SimulationLoop {
    config: SimConfig,
    phase: LoopPhase,
    world: Option<World>,
}

impl Default for SimulationLoop {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}

impl SimulationLoop {
    /// A loop that has not built its world yet
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            phase: LoopPhase::Uninitialized,
            world: None,
        }
    }

    /// Build the world for `viewport` and enter `Running`
    ///
    /// World = viewport × `world_scale`; obstacles come from `rng`; the player
    /// spawns at the world center. Any setup failure leaves the loop untouched.
    pub fn start(&mut self, viewport: Vec2, rng: &mut impl RandomSource) -> Result<(), SimError> {
        self.start_with_state(viewport, rng, None)
    }

    /// `start` with a PCG source seeded from `seed` (recorded in snapshots)
    pub fn start_seeded(&mut self, viewport: Vec2, seed: u64) -> Result<(), SimError> {
        let mut rng = SeededRandom::new(seed);
        self.start_with_state(viewport, &mut rng, Some(RngState::new(seed)))
    }

    fn start_with_state(
        &mut self,
        viewport: Vec2,
        rng: &mut impl RandomSource,
        rng_state: Option<RngState>,
    ) -> Result<(), SimError> {
        match self.phase {
            LoopPhase::Running => return Err(SimError::AlreadyRunning),
            LoopPhase::Destroyed => return Err(SimError::Destroyed),
            LoopPhase::Uninitialized => {}
        }

        let config = &self.config;
        config.validate()?;
        let bounds = WorldBounds::from_viewport(viewport, config.world_scale)?;
        let field = ObstacleField::generate(
            config.obstacle_count,
            &bounds,
            config.obstacle_margin,
            config.obstacle_half_extent(),
            rng,
        )?;

        let mut player = Player::spawn(&bounds, config.player_half_extent());
        let spawn = collision::resolve(player.pos, player.half_extent, &field.obstacles, &bounds);
        if !spawn.stable {
            log::warn!(
                "Spawn point blocked and could not be cleared after {} passes",
                spawn.passes
            );
        }
        player.pos = spawn.position;

        let camera = Camera::follow(player.pos, &bounds, viewport, config.zoom);

        log::info!(
            "Simulation started: viewport {}x{}, world {}x{}, {} obstacles",
            viewport.x,
            viewport.y,
            bounds.width,
            bounds.height,
            field.len()
        );

        self.world = Some(World {
            bounds,
            field,
            player,
            camera,
            viewport,
            rng_state,
            frame: 0,
        });
        self.phase = LoopPhase::Running;
        Ok(())
    }

    /// Advance one frame using the configured fixed step
    pub fn tick(&mut self, input: &InputSnapshot) -> Result<RenderCommands, SimError> {
        let dt = self.config.frame_dt;
        self.tick_dt(input, dt)
    }

    /// Advance one frame of `dt` seconds
    ///
    /// Bad steps (NaN, negative) integrate nothing; long steps are capped at
    /// `max_frame_dt`.
    pub fn tick_dt(&mut self, input: &InputSnapshot, dt: f64) -> Result<RenderCommands, SimError> {
        let config = &self.config;
        let world = running_world(self.phase, &mut self.world)?;
        let dt = clamp_dt(dt, config.max_frame_dt);

        let motion = compute_frame_motion(input, world.player.pos, config.player_speed);
        match motion.facing {
            Some(facing) => world.player.facing = facing,
            None => log::debug!(
                "Frame {}: no usable pointer, keeping facing {:.3}",
                world.frame,
                world.player.facing
            ),
        }
        world.player.vel = motion.vel;

        let previous = world.player.pos;
        let proposed = previous + motion.vel * dt;
        let resolution = collision::resolve(
            proposed,
            world.player.half_extent,
            &world.field.obstacles,
            &world.bounds,
        );
        if !resolution.stable {
            log::warn!(
                "Frame {}: collision resolution unstable after {} passes ({} contacts)",
                world.frame,
                resolution.passes,
                resolution.contacts
            );
        }
        world.player.pos = settle(previous, &resolution, world);

        world.camera = Camera::follow(world.player.pos, &world.bounds, world.viewport, config.zoom);
        world.frame += 1;

        Ok(world.render_commands(config.grid_spacing))
    }

    /// Change the viewport; the world and obstacles are kept
    pub fn resize(&mut self, viewport: Vec2) -> Result<(), SimError> {
        let zoom = self.config.zoom;
        let world = running_world(self.phase, &mut self.world)?;
        if !(viewport.is_finite() && viewport.x > 0.0 && viewport.y > 0.0) {
            return Err(SimError::invalid(format!(
                "viewport must be positive, got {}x{}",
                viewport.x, viewport.y
            )));
        }
        world.viewport = viewport;
        world.camera = Camera::follow(world.player.pos, &world.bounds, viewport, zoom);
        log::info!("Viewport resized to {}x{}", viewport.x, viewport.y);
        Ok(())
    }

    /// Tear down the session; safe to call more than once
    pub fn destroy(&mut self) {
        if self.phase == LoopPhase::Destroyed {
            log::debug!("destroy() on an already destroyed simulation ignored");
            return;
        }
        let frames = self.world.as_ref().map_or(0, |w| w.frame);
        self.world = None;
        self.phase = LoopPhase::Destroyed;
        log::info!("Simulation destroyed after {} frames", frames);
    }

    /// Commands for the current state without advancing
    pub fn render_commands(&self) -> Option<RenderCommands> {
        self.world
            .as_ref()
            .map(|w| w.render_commands(self.config.grid_spacing))
    }

    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == LoopPhase::Running
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn player(&self) -> Option<&Player> {
        self.world.as_ref().map(|w| &w.player)
    }

    pub fn camera(&self) -> Option<&Camera> {
        self.world.as_ref().map(|w| &w.camera)
    }

    pub fn bounds(&self) -> Option<&WorldBounds> {
        self.world.as_ref().map(|w| &w.bounds)
    }

    pub fn obstacles(&self) -> Option<&ObstacleField> {
        self.world.as_ref().map(|w| &w.field)
    }

    /// Frames ticked since start (0 when not running)
    pub fn frame(&self) -> u64 {
        self.world.as_ref().map_or(0, |w| w.frame)
    }

    pub fn snapshot(&self) -> Option<WorldSnapshot> {
        self.world.as_ref().map(|w| WorldSnapshot {
            bounds: w.bounds,
            field: w.field.clone(),
            player: w.player,
            camera: w.camera,
            frame: w.frame,
            rng_state: w.rng_state,
        })
    }
}

impl World {
    fn render_commands(&self, grid_spacing: f64) -> RenderCommands {
        let mut out = RenderCommands::with_capacity(self.field.len() + 4);
        out.push(RenderCommand::Camera(self.camera));
        out.push(RenderCommand::Background {
            bounds: self.bounds,
            grid_spacing,
        });

        let view = self.camera.world_view();
        for obstacle in self.field.within(&view) {
            out.push(RenderCommand::Sprite {
                sprite: SpriteId::Obstacle,
                pos: obstacle.pos,
                rotation: 0.0,
                half_extent: obstacle.half_extent,
            });
        }

        out.push(RenderCommand::Sprite {
            sprite: SpriteId::Player,
            pos: self.player.pos,
            rotation: self.player.facing,
            half_extent: self.player.half_extent,
        });
        out.push(RenderCommand::StatusText(format!(
            "x: {:.0}  y: {:.0}  facing: {:.0}°",
            self.player.pos.x,
            self.player.pos.y,
            self.player.facing.to_degrees()
        )));
        out
    }
}

fn running_world(phase: LoopPhase, world: &mut Option<World>) -> Result<&mut World, SimError> {
    match phase {
        LoopPhase::Uninitialized => Err(SimError::NotStarted),
        LoopPhase::Destroyed => Err(SimError::Destroyed),
        LoopPhase::Running => world.as_mut().ok_or(SimError::NotStarted),
    }
}

/// Sanitize a host-supplied step
fn clamp_dt(dt: f64, max_dt: f64) -> f64 {
    if !dt.is_finite() || dt < 0.0 {
        log::debug!("Ignoring invalid frame step {dt}");
        0.0
    } else if dt > max_dt {
        log::debug!("Frame step {dt:.4}s capped to {max_dt:.4}s");
        max_dt
    } else {
        dt
    }
}

/// Final position for the frame
///
/// An unstable solve falls back to the previous position when that one was
/// clear; otherwise the best attempt stands.
fn settle(previous: Vec2, resolution: &Resolution, world: &World) -> Vec2 {
    if resolution.stable {
        return resolution.position;
    }
    let half = world.player.half_extent;
    let previous_clear = world.bounds.contains_box(previous, half)
        && !collision::overlaps_any(previous, half, &world.field.obstacles);
    if previous_clear {
        previous
    } else {
        resolution.position
    }
}

/// Build and start a loop with default config
pub fn start(viewport: Vec2, rng: &mut impl RandomSource) -> Result<SimulationLoop, SimError> {
    let mut sim = SimulationLoop::default();
    sim.start(viewport, rng)?;
    Ok(sim)
}
