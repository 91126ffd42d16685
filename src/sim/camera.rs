//! Follow camera
//!
//! Derived every frame from the player position; the view rectangle is kept
//! inside the world. Axes where the view is larger than the world are centered.

use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::state::WorldBounds;
use crate::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Viewport size in screen pixels
    pub viewport: Vec2,
    pub zoom: f64,
    /// World position of the view's top-left corner
    pub origin: Vec2,
}

impl Camera {
    /// Camera centered on `target`, clamped to the world
    pub fn follow(target: Vec2, bounds: &WorldBounds, viewport: Vec2, zoom: f64) -> Self {
        let view = viewport / zoom;
        let origin = Vec2::new(
            clamp_axis(target.x - view.x / 2.0, bounds.width, view.x),
            clamp_axis(target.y - view.y / 2.0, bounds.height, view.y),
        );
        Self {
            viewport,
            zoom,
            origin,
        }
    }

    /// Visible world size
    #[inline]
    pub fn view_size(&self) -> Vec2 {
        self.viewport / self.zoom
    }

    /// Visible world rectangle
    pub fn world_view(&self) -> Aabb {
        Aabb::from_min_size(self.origin, self.view_size())
    }

    /// World point under the view's center
    pub fn center(&self) -> Vec2 {
        self.origin + self.view_size() / 2.0
    }

    /// Map a pointer in viewport pixels into world space
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        self.origin + screen / self.zoom
    }

    /// Map a world point into viewport pixels
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        (world - self.origin) * self.zoom
    }
}

/// Recompute the camera for this frame
pub fn update(player_pos: Vec2, bounds: &WorldBounds, viewport: Vec2) -> Camera {
    Camera::follow(player_pos, bounds, viewport, crate::consts::CAMERA_ZOOM)
}

fn clamp_axis(origin: f64, world: f64, view: f64) -> f64 {
    if view >= world {
        (world - view) / 2.0
    } else {
        origin.clamp(0.0, world - view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamps_at_world_corner() {
        let bounds = WorldBounds::new(1000.0, 1000.0).unwrap();
        let camera = update(Vec2::new(10.0, 10.0), &bounds, Vec2::new(400.0, 400.0));
        assert_eq!(camera.origin, Vec2::ZERO);
        assert_eq!(camera.zoom, 1.0);
    }

    #[test]
    fn test_clamps_at_far_corner() {
        let bounds = WorldBounds::new(1000.0, 1000.0).unwrap();
        let camera = update(Vec2::new(995.0, 990.0), &bounds, Vec2::new(400.0, 400.0));
        assert_eq!(camera.origin, Vec2::new(600.0, 600.0));
    }

    #[test]
    fn test_centers_on_player_in_open_space() {
        let bounds = WorldBounds::new(4000.0, 3000.0).unwrap();
        let camera = update(Vec2::new(2000.0, 1500.0), &bounds, Vec2::new(800.0, 600.0));
        assert_eq!(camera.origin, Vec2::new(1600.0, 1200.0));
        assert_eq!(camera.center(), Vec2::new(2000.0, 1500.0));
    }

    #[test]
    fn test_view_larger_than_world_is_centered() {
        let bounds = WorldBounds::new(300.0, 1000.0).unwrap();
        let camera = update(Vec2::new(150.0, 500.0), &bounds, Vec2::new(400.0, 400.0));
        assert_eq!(camera.origin.x, -50.0);
        assert_eq!(camera.origin.y, 300.0);
    }

    #[test]
    fn test_zoom_shrinks_view() {
        let bounds = WorldBounds::new(1000.0, 1000.0).unwrap();
        let camera = Camera::follow(Vec2::new(500.0, 500.0), &bounds, Vec2::new(400.0, 400.0), 2.0);
        assert_eq!(camera.view_size(), Vec2::new(200.0, 200.0));
        assert_eq!(camera.origin, Vec2::new(400.0, 400.0));
    }

    #[test]
    fn test_screen_world_mapping() {
        let bounds = WorldBounds::new(4000.0, 3000.0).unwrap();
        let camera = update(Vec2::new(2000.0, 1500.0), &bounds, Vec2::new(800.0, 600.0));
        let world = camera.screen_to_world(Vec2::new(400.0, 300.0));
        assert_eq!(world, Vec2::new(2000.0, 1500.0));
        assert_eq!(camera.world_to_screen(world), Vec2::new(400.0, 300.0));
    }
}
