//! Topdown Arena - simulation core for a top-down arcade movement demo
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, camera, frame loop)
//! - `renderer`: Renderer capability and per-frame render commands
//! - `settings`: Data-driven session configuration
//! - `error`: Setup and lifecycle errors

pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::SimError;
pub use settings::SimConfig;

/// World-space vector type used throughout the simulation
pub use glam::DVec2 as Vec2;

/// Game configuration constants
pub mod consts {
    /// Default simulation step (one frame at 60 Hz)
    pub const FRAME_DT: f64 = 1.0 / 60.0;
    /// Largest step a single tick may integrate (prevents tunneling after a stall)
    pub const MAX_FRAME_DT: f64 = 0.1;

    /// World extent is the viewport size times this factor
    pub const WORLD_SCALE: f64 = 5.0;

    /// Obstacle defaults
    pub const OBSTACLE_COUNT: u32 = 50;
    pub const OBSTACLE_MARGIN: f64 = 100.0;
    pub const OBSTACLE_SIZE: f64 = 32.0;

    /// Player defaults
    pub const PLAYER_SIZE: f64 = 16.0;
    /// Per-axis speed in pixels/s (diagonals are not normalized)
    pub const PLAYER_SPEED: f64 = 200.0;

    /// Camera zoom (fixed for now)
    pub const CAMERA_ZOOM: f64 = 1.0;

    /// Background grid cell size
    pub const GRID_SPACING: f64 = 64.0;
}

/// Angle (radians) from `from` toward `to`, in [-π, π]
///
/// Coincident points yield 0.
#[inline]
pub fn facing_toward(from: Vec2, to: Vec2) -> f64 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Clamp `value` into `[min, max]`, collapsing to the midpoint when the range is inverted
#[inline]
pub fn clamp_to_extent(value: f64, min: f64, max: f64) -> f64 {
    if min > max {
        (min + max) / 2.0
    } else {
        value.clamp(min, max)
    }
}
