//! Static obstacle field
//!
//! Obstacles are scattered uniformly inside a margin band at session start and
//! never move, change or disappear afterwards. Overlapping obstacles are allowed.

use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::random::RandomSource;
use super::state::{Obstacle, WorldBounds};
use crate::Vec2;
use crate::error::SimError;

/// The set of static obstacles plus the parameters that placed them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleField {
    pub margin: f64,
    pub obstacles: Vec<Obstacle>,
}

impl ObstacleField {
    /// Place `count` obstacles with centers in `[margin, dim - margin)` on each axis
    ///
    /// Each coordinate is an independent uniform draw. Fails when the placement
    /// band is empty on either axis.
    pub fn generate(
        count: u32,
        bounds: &WorldBounds,
        margin: f64,
        half_extent: f64,
        rng: &mut impl RandomSource,
    ) -> Result<Self, SimError> {
        if !margin.is_finite() || margin < 0.0 {
            return Err(SimError::invalid(format!(
                "obstacle margin must be non-negative, got {margin}"
            )));
        }
        if margin * 2.0 >= bounds.width || margin * 2.0 >= bounds.height {
            return Err(SimError::invalid(format!(
                "obstacle margin {margin} leaves no room in a {}x{} world",
                bounds.width, bounds.height
            )));
        }
        if !half_extent.is_finite() || half_extent <= 0.0 {
            return Err(SimError::invalid(format!(
                "obstacle half extent must be positive, got {half_extent}"
            )));
        }

        let obstacles = (0..count)
            .map(|id| {
                let x = rng.uniform(margin, bounds.width - margin);
                let y = rng.uniform(margin, bounds.height - margin);
                Obstacle::new(id, Vec2::new(x, y), half_extent)
            })
            .collect::<Vec<_>>();

        log::info!(
            "Generated {} obstacles in {}x{} world (margin {})",
            obstacles.len(),
            bounds.width,
            bounds.height,
            margin
        );

        Ok(Self { margin, obstacles })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    /// Obstacles whose box overlaps `area` (used for viewport culling)
    pub fn within<'a>(&'a self, area: &'a Aabb) -> impl Iterator<Item = &'a Obstacle> + 'a {
        self.obstacles.iter().filter(move |o| o.aabb().overlaps(area))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::random::SeededRandom;
    use proptest::prelude::*;

    struct Constant(f64);

    impl RandomSource for Constant {
        fn uniform(&mut self, _min: f64, _max: f64) -> f64 {
            self.0
        }
    }

    #[test]
    fn test_generate_count_and_ids() {
        let bounds = WorldBounds::new(5000.0, 5000.0).unwrap();
        let mut rng = SeededRandom::new(1);
        let field = ObstacleField::generate(50, &bounds, 100.0, 16.0, &mut rng).unwrap();
        assert_eq!(field.len(), 50);
        assert_eq!(field.margin, 100.0);
        for (i, o) in field.iter().enumerate() {
            assert_eq!(o.id, i as u32);
            assert_eq!(o.half_extent, Vec2::splat(16.0));
        }
    }

    #[test]
    fn test_generate_same_seed_same_layout() {
        let bounds = WorldBounds::new(4000.0, 3000.0).unwrap();
        let a = ObstacleField::generate(20, &bounds, 100.0, 16.0, &mut SeededRandom::new(9));
        let b = ObstacleField::generate(20, &bounds, 100.0, 16.0, &mut SeededRandom::new(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_generate_allows_stacked_obstacles() {
        let bounds = WorldBounds::new(1000.0, 1000.0).unwrap();
        let field = ObstacleField::generate(3, &bounds, 100.0, 16.0, &mut Constant(500.0)).unwrap();
        assert_eq!(field.len(), 3);
        assert!(field.iter().all(|o| o.pos == Vec2::new(500.0, 500.0)));
    }

    #[test]
    fn test_generate_rejects_oversized_margin() {
        let bounds = WorldBounds::new(200.0, 1000.0).unwrap();
        let err = ObstacleField::generate(5, &bounds, 100.0, 16.0, &mut SeededRandom::new(1));
        assert!(matches!(err, Err(SimError::InvalidConfiguration { .. })));

        let bounds = WorldBounds::new(1000.0, 150.0).unwrap();
        let err = ObstacleField::generate(5, &bounds, 100.0, 16.0, &mut SeededRandom::new(1));
        assert!(matches!(err, Err(SimError::InvalidConfiguration { .. })));
    }

    #[test]
    fn test_generate_rejects_degenerate_half_extent() {
        let bounds = WorldBounds::new(1000.0, 1000.0).unwrap();
        let mut rng = SeededRandom::new(1);
        for half in [0.0, -4.0, f64::NAN] {
            let err = ObstacleField::generate(5, &bounds, 100.0, half, &mut rng);
            assert!(matches!(err, Err(SimError::InvalidConfiguration { .. })));
        }
    }

    #[test]
    fn test_zero_count_is_empty() {
        let bounds = WorldBounds::new(1000.0, 1000.0).unwrap();
        let mut rng = SeededRandom::new(1);
        let field = ObstacleField::generate(0, &bounds, 100.0, 16.0, &mut rng).unwrap();
        assert!(field.is_empty());
    }

    #[test]
    fn test_within_culls_far_obstacles() {
        let field = ObstacleField {
            margin: 0.0,
            obstacles: vec![
                Obstacle::new(0, Vec2::new(100.0, 100.0), 16.0),
                Obstacle::new(1, Vec2::new(900.0, 900.0), 16.0),
            ],
        };
        let view = Aabb::from_min_size(Vec2::ZERO, Vec2::new(400.0, 400.0));
        let ids: Vec<u32> = field.within(&view).map(|o| o.id).collect();
        assert_eq!(ids, vec![0]);
    }

    proptest! {
        #[test]
        fn prop_placement_stays_in_margin_band(seed in any::<u64>()) {
            let bounds = WorldBounds::new(5000.0, 5000.0).unwrap();
            let mut rng = SeededRandom::new(seed);
            let field = ObstacleField::generate(50, &bounds, 100.0, 16.0, &mut rng).unwrap();
            for o in field.iter() {
                prop_assert!(o.pos.x >= 100.0 && o.pos.x < 4900.0);
                prop_assert!(o.pos.y >= 100.0 && o.pos.y < 4900.0);
            }
        }
    }
}
