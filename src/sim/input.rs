//! Per-frame input snapshot
//!
//! Built fresh by the host's input collaborator each frame; the simulation
//! reads it during one tick and never keeps it.

use serde::{Deserialize, Serialize};

use crate::Vec2;

/// Normalized directional keys plus pointer position in world space
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Pointer in world coordinates (None when the pointer is unavailable)
    pub pointer: Option<Vec2>,
}

impl InputSnapshot {
    pub fn with_pointer(mut self, pointer: Vec2) -> Self {
        self.pointer = Some(pointer);
        self
    }

    /// Key axis: each component is -1, 0 or 1 (opposing keys cancel)
    pub fn axis(&self) -> Vec2 {
        let x = [(self.right, 1.0), (self.left, -1.0)]
            .iter()
            .filter(|(held, _)| *held)
            .map(|(_, v)| v)
            .sum::<f64>();
        let y = [(self.down, 1.0), (self.up, -1.0)]
            .iter()
            .filter(|(held, _)| *held)
            .map(|(_, v)| v)
            .sum::<f64>();
        Vec2::new(x, y)
    }

    /// Pointer if present and finite
    pub fn valid_pointer(&self) -> Option<Vec2> {
        self.pointer.filter(|p| p.is_finite())
    }
}
