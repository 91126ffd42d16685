//! Axis-aligned collision detection and response
//!
//! The player box is pushed out of each obstacle along the axis of least
//! penetration, so motion along the other axis survives (sliding along edges).
//! Passes repeat until nothing overlaps or the pass cap is hit.

use serde::{Deserialize, Serialize};

use super::state::{Obstacle, WorldBounds};
use crate::Vec2;

/// Penetration below this is treated as touching, not overlapping
pub const CONTACT_EPSILON: f64 = 1e-9;

/// Axis-aligned box given by center and half extent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec2,
    pub half_extent: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, half_extent: Vec2) -> Self {
        Self {
            center,
            half_extent,
        }
    }

    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        let half_extent = size / 2.0;
        Self {
            center: min + half_extent,
            half_extent,
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half_extent
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half_extent
    }

    /// Penetration depth on each axis (positive on both axes means overlap)
    #[inline]
    pub fn penetration(&self, other: &Aabb) -> Vec2 {
        self.half_extent + other.half_extent - (self.center - other.center).abs()
    }

    /// Strict overlap; boxes sharing an edge do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let p = self.penetration(other);
        p.x > CONTACT_EPSILON && p.y > CONTACT_EPSILON
    }

    /// Minimum translation that moves `self` out of `other`, if they overlap
    ///
    /// Only one axis is non-zero. Equal depths resolve vertically.
    pub fn separation(&self, other: &Aabb) -> Option<Vec2> {
        if !self.overlaps(other) {
            return None;
        }
        let p = self.penetration(other);
        let d = self.center - other.center;
        let dir = |v: f64| if v >= 0.0 { 1.0 } else { -1.0 };
        if p.x < p.y {
            Some(Vec2::new(dir(d.x) * p.x, 0.0))
        } else {
            Some(Vec2::new(0.0, dir(d.y) * p.y))
        }
    }
}

/// Outcome of resolving one proposed player position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    /// Corrected center, always inside the world
    pub position: Vec2,
    /// False when the pass cap ran out with an overlap remaining
    pub stable: bool,
    /// Passes run
    pub passes: usize,
    /// Pushes applied over all passes
    pub contacts: usize,
}

/// Correct `proposed` so the player box ends outside every obstacle and inside the world
///
/// Runs at most `max(obstacles.len(), 1)` passes. Dense clusters may not settle
/// within the cap; the last attempt is returned with `stable == false`.
pub fn resolve(
    proposed: Vec2,
    half_extent: Vec2,
    obstacles: &[Obstacle],
    bounds: &WorldBounds,
) -> Resolution {
    let cap = obstacles.len().max(1);
    let mut pos = bounds.clamp_center(proposed, half_extent);
    let mut contacts = 0;
    let mut passes = 0;

    while passes < cap {
        passes += 1;
        let mut pushed = false;
        for obstacle in obstacles {
            let player = Aabb::new(pos, half_extent);
            if let Some(mtv) = player.separation(&obstacle.aabb()) {
                pos += mtv;
                contacts += 1;
                pushed = true;
            }
        }
        pos = bounds.clamp_center(pos, half_extent);
        if !pushed {
            return Resolution {
                position: pos,
                stable: true,
                passes,
                contacts,
            };
        }
    }

    let stable = !overlaps_any(pos, half_extent, obstacles);
    Resolution {
        position: pos,
        stable,
        passes,
        contacts,
    }
}

/// True if a box at `center` overlaps any obstacle
pub fn overlaps_any(center: Vec2, half_extent: Vec2, obstacles: &[Obstacle]) -> bool {
    let player = Aabb::new(center, half_extent);
    obstacles.iter().any(|o| player.overlaps(&o.aabb()))
}
