//! Input to motion
//!
//! Keys give 8-way velocity (diagonals are faster than axial moves, kept on
//! purpose); the pointer alone decides facing.

use super::input::InputSnapshot;
use crate::{Vec2, facing_toward};

/// Velocity and facing for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameMotion {
    pub vel: Vec2,
    /// None when the snapshot carried no usable pointer
    pub facing: Option<f64>,
}

/// Convert an input snapshot into velocity (pixels/s) and facing (radians)
pub fn compute_frame_motion(input: &InputSnapshot, player_pos: Vec2, speed: f64) -> FrameMotion {
    FrameMotion {
        vel: input.axis() * speed,
        facing: input.valid_pointer().map(|p| facing_toward(player_pos, p)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_4, PI};

    #[test]
    fn test_velocity_composition() {
        let input = InputSnapshot {
            left: true,
            down: true,
            ..Default::default()
        };
        let motion = compute_frame_motion(&input, Vec2::ZERO, 200.0);
        assert_eq!(motion.vel, Vec2::new(-200.0, 200.0));
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let input = InputSnapshot {
            left: true,
            right: true,
            up: true,
            ..Default::default()
        };
        let motion = compute_frame_motion(&input, Vec2::ZERO, 200.0);
        assert_eq!(motion.vel.x, 0.0);
        assert_eq!(motion.vel.y, -200.0);
    }

    #[test]
    fn test_diagonal_not_normalized() {
        let input = InputSnapshot {
            right: true,
            up: true,
            ..Default::default()
        };
        let motion = compute_frame_motion(&input, Vec2::ZERO, 200.0);
        assert!((motion.vel.length() - 200.0 * 2f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_facing_follows_pointer() {
        let input = InputSnapshot::default().with_pointer(Vec2::new(10.0, 10.0));
        let motion = compute_frame_motion(&input, Vec2::ZERO, 200.0);
        assert!((motion.facing.unwrap() - FRAC_PI_4).abs() < 1e-12);

        let input = InputSnapshot::default().with_pointer(Vec2::new(-10.0, 0.0));
        let motion = compute_frame_motion(&input, Vec2::ZERO, 200.0);
        assert!((motion.facing.unwrap() - PI).abs() < 1e-12);
    }

    #[test]
    fn test_pointer_on_player_faces_zero() {
        let pos = Vec2::new(50.0, 50.0);
        let input = InputSnapshot::default().with_pointer(pos);
        assert_eq!(compute_frame_motion(&input, pos, 200.0).facing, Some(0.0));
    }

    #[test]
    fn test_missing_pointer_has_no_facing() {
        let motion = compute_frame_motion(&InputSnapshot::default(), Vec2::ZERO, 200.0);
        assert_eq!(motion.facing, None);
        assert_eq!(motion.vel, Vec2::ZERO);
    }
}
