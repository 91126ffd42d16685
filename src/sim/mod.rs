//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Randomness only through `RandomSource` (seeded by default)
//! - Stable iteration order (obstacles by id)
//! - No rendering or platform dependencies

pub mod camera;
pub mod collision;
pub mod input;
pub mod movement;
pub mod obstacles;
pub mod random;
pub mod state;
pub mod tick;

pub use camera::Camera;
pub use collision::{Aabb, Resolution, overlaps_any, resolve};
pub use input::InputSnapshot;
pub use movement::{FrameMotion, compute_frame_motion};
pub use obstacles::ObstacleField;
pub use random::{RandomSource, SeededRandom};
pub use state::{LoopPhase, Obstacle, Player, RngState, WorldBounds};
pub use tick::{SimulationLoop, WorldSnapshot, start};
