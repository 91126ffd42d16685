//! Renderer capability
//!
//! The simulation never draws. Each tick yields a `RenderCommands` list that the
//! host replays into whatever backend implements `Renderer`.

use serde::{Deserialize, Serialize};

use crate::Vec2;
use crate::sim::{Camera, WorldBounds};

/// Texture/shape ids the host maps to real assets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteId {
    Player,
    Obstacle,
}

impl SpriteId {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpriteId::Player => "player",
            SpriteId::Obstacle => "obstacle",
        }
    }
}

/// One drawable placement or view update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderCommand {
    /// Move the view (always first in a frame)
    Camera(Camera),
    /// Grid background covering the world
    Background { bounds: WorldBounds, grid_spacing: f64 },
    /// Place a sprite centered at `pos`, rotated by `rotation` radians
    Sprite {
        sprite: SpriteId,
        pos: Vec2,
        rotation: f64,
        half_extent: Vec2,
    },
    /// Screen-space status line
    StatusText(String),
}

/// Everything the host needs to draw one frame, in draw order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderCommands {
    pub commands: Vec<RenderCommand>,
}

impl RenderCommands {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            commands: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    /// Camera set for this frame
    pub fn camera(&self) -> Option<&Camera> {
        self.commands.iter().find_map(|c| match c {
            RenderCommand::Camera(camera) => Some(camera),
            _ => None,
        })
    }

    /// Number of sprites of a given kind
    pub fn sprite_count(&self, id: SpriteId) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, RenderCommand::Sprite { sprite, .. } if *sprite == id))
            .count()
    }

    /// Replay into a renderer
    pub fn submit<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        for command in &self.commands {
            match command {
                RenderCommand::Camera(camera) => renderer.set_camera(camera),
                RenderCommand::Background {
                    bounds,
                    grid_spacing,
                } => renderer.draw_background(bounds, *grid_spacing),
                RenderCommand::Sprite {
                    sprite,
                    pos,
                    rotation,
                    half_extent,
                } => renderer.draw_sprite(*sprite, *pos, *rotation, *half_extent),
                RenderCommand::StatusText(text) => renderer.draw_status(text),
            }
        }
        renderer.end_frame();
    }
}

/// Drawing backend supplied by the host
pub trait Renderer {
    fn set_camera(&mut self, camera: &Camera);
    fn draw_background(&mut self, bounds: &WorldBounds, grid_spacing: f64);
    fn draw_sprite(&mut self, sprite: SpriteId, pos: Vec2, rotation: f64, half_extent: Vec2);
    fn draw_status(&mut self, text: &str);
    /// Called once after all of a frame's commands
    fn end_frame(&mut self) {}
}

/// Renderer that only counts what it was asked to draw
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    pub frames: u64,
    pub sprites_drawn: u64,
    pub last_camera: Option<Camera>,
    pub last_status: Option<String>,
    pub last_player: Option<(Vec2, f64)>,
}

impl Renderer for RecordingRenderer {
    fn set_camera(&mut self, camera: &Camera) {
        self.last_camera = Some(*camera);
    }

    fn draw_background(&mut self, _bounds: &WorldBounds, _grid_spacing: f64) {}

    fn draw_sprite(&mut self, sprite: SpriteId, pos: Vec2, rotation: f64, _half_extent: Vec2) {
        self.sprites_drawn += 1;
        if sprite == SpriteId::Player {
            self.last_player = Some((pos, rotation));
        }
    }

    fn draw_status(&mut self, text: &str) {
        self.last_status = Some(text.to_string());
    }

    fn end_frame(&mut self) {
        self.frames += 1;
    }
}
