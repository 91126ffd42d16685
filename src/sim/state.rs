//! World state and core simulation types
//!
//! Everything here is owned by the `SimulationLoop` and touched only during its tick.

use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::Vec2;
use crate::error::SimError;

/// Lifecycle of a simulation session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoopPhase {
    /// Constructed, world not built yet
    Uninitialized,
    /// Ticking once per host frame
    Running,
    /// Torn down; cannot be restarted
    Destroyed,
}

/// Playable rectangle, origin fixed at (0, 0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub width: f64,
    pub height: f64,
}

impl WorldBounds {
    pub fn new(width: f64, height: f64) -> Result<Self, SimError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(SimError::invalid(format!(
                "world bounds must be positive, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// World derived from the viewport (viewport × scale)
    pub fn from_viewport(viewport: Vec2, scale: f64) -> Result<Self, SimError> {
        if !(viewport.is_finite() && viewport.x > 0.0 && viewport.y > 0.0) {
            return Err(SimError::invalid(format!(
                "viewport must be positive, got {}x{}",
                viewport.x, viewport.y
            )));
        }
        Self::new(viewport.x * scale, viewport.y * scale)
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.size() / 2.0
    }

    /// Clamp a box center so the box stays fully inside the world
    pub fn clamp_center(&self, center: Vec2, half_extent: Vec2) -> Vec2 {
        Vec2::new(
            crate::clamp_to_extent(center.x, half_extent.x, self.width - half_extent.x),
            crate::clamp_to_extent(center.y, half_extent.y, self.height - half_extent.y),
        )
    }

    /// True if a box with this center lies fully inside the world
    pub fn contains_box(&self, center: Vec2, half_extent: Vec2) -> bool {
        center.x >= half_extent.x
            && center.x <= self.width - half_extent.x
            && center.y >= half_extent.y
            && center.y <= self.height - half_extent.y
    }
}

/// A static, immovable square obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec2,
    pub half_extent: Vec2,
}

impl Obstacle {
    pub fn new(id: u32, pos: Vec2, half_extent: f64) -> Self {
        Self {
            id,
            pos,
            half_extent: Vec2::splat(half_extent),
        }
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.half_extent)
    }
}

/// The player-controlled agent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub half_extent: Vec2,
    /// Facing angle in radians, follows the pointer
    pub facing: f64,
}

impl Player {
    /// Player centered in the world, at rest, facing +x
    pub fn spawn(bounds: &WorldBounds, half_extent: f64) -> Self {
        Self {
            pos: bounds.center(),
            vel: Vec2::ZERO,
            half_extent: Vec2::splat(half_extent),
            facing: 0.0,
        }
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.half_extent)
    }
}

/// RNG seed record for reproducing a layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_from_viewport() {
        let bounds = WorldBounds::from_viewport(Vec2::new(800.0, 600.0), 5.0).unwrap();
        assert_eq!(bounds.width, 4000.0);
        assert_eq!(bounds.height, 3000.0);
        assert_eq!(bounds.center(), Vec2::new(2000.0, 1500.0));
    }

    #[test]
    fn test_bounds_reject_degenerate_viewport() {
        assert!(WorldBounds::from_viewport(Vec2::new(0.0, 600.0), 5.0).is_err());
        assert!(WorldBounds::from_viewport(Vec2::new(800.0, f64::NAN), 5.0).is_err());
        assert!(WorldBounds::new(-1.0, 10.0).is_err());
    }

    #[test]
    fn test_clamp_center_keeps_box_inside() {
        let bounds = WorldBounds::new(100.0, 50.0).unwrap();
        let half = Vec2::splat(8.0);
        assert_eq!(
            bounds.clamp_center(Vec2::new(-20.0, 70.0), half),
            Vec2::new(8.0, 42.0)
        );
        assert!(bounds.contains_box(Vec2::new(8.0, 42.0), half));
        assert!(!bounds.contains_box(Vec2::new(7.9, 20.0), half));
    }

    #[test]
    fn test_player_spawns_at_center() {
        let bounds = WorldBounds::new(4000.0, 3000.0).unwrap();
        let player = Player::spawn(&bounds, 8.0);
        assert_eq!(player.pos, Vec2::new(2000.0, 1500.0));
        assert_eq!(player.vel, Vec2::ZERO);
        assert_eq!(player.facing, 0.0);
    }
}
