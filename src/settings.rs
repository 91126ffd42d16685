//! Session configuration
//!
//! Loaded by the host (JSON) before a session starts; never changed while running.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SimError;

/// Simulation tuning for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// World extent = viewport size × this factor
    pub world_scale: f64,

    // === Obstacles ===
    /// Number of obstacles generated at start
    pub obstacle_count: u32,
    /// Keep-out band along every world edge
    pub obstacle_margin: f64,
    /// Obstacle edge length
    pub obstacle_size: f64,

    // === Player ===
    /// Player edge length
    pub player_size: f64,
    /// Per-axis speed (pixels/s)
    pub player_speed: f64,

    // === Timing ===
    /// Step used by `SimulationLoop::tick`
    pub frame_dt: f64,
    /// Upper bound for a variable step
    pub max_frame_dt: f64,

    // === Presentation ===
    pub zoom: f64,
    pub grid_spacing: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            world_scale: WORLD_SCALE,

            obstacle_count: OBSTACLE_COUNT,
            obstacle_margin: OBSTACLE_MARGIN,
            obstacle_size: OBSTACLE_SIZE,

            player_size: PLAYER_SIZE,
            player_speed: PLAYER_SPEED,

            frame_dt: FRAME_DT,
            max_frame_dt: MAX_FRAME_DT,

            zoom: CAMERA_ZOOM,
            grid_spacing: GRID_SPACING,
        }
    }
}

impl SimConfig {
    /// Parse a config from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let config: SimConfig = serde_json::from_str(json)
            .map_err(|e| SimError::invalid(format!("config parse error: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> String {
        // A struct of plain numbers always serializes
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SimError> {
        positive("world_scale", self.world_scale)?;
        positive("obstacle_size", self.obstacle_size)?;
        positive("player_size", self.player_size)?;
        positive("frame_dt", self.frame_dt)?;
        positive("max_frame_dt", self.max_frame_dt)?;
        positive("zoom", self.zoom)?;
        positive("grid_spacing", self.grid_spacing)?;

        if !self.obstacle_margin.is_finite() || self.obstacle_margin < 0.0 {
            return Err(SimError::invalid(format!(
                "obstacle_margin must be finite and non-negative, got {}",
                self.obstacle_margin
            )));
        }
        if !self.player_speed.is_finite() || self.player_speed < 0.0 {
            return Err(SimError::invalid(format!(
                "player_speed must be finite and non-negative, got {}",
                self.player_speed
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn player_half_extent(&self) -> f64 {
        self.player_size / 2.0
    }

    #[inline]
    pub fn obstacle_half_extent(&self) -> f64 {
        self.obstacle_size / 2.0
    }
}

fn positive(name: &str, value: f64) -> Result<(), SimError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::invalid(format!(
            "{name} must be finite and positive, got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.obstacle_count, 50);
        assert_eq!(config.obstacle_margin, 100.0);
        assert_eq!(config.world_scale, 5.0);
    }

    #[test]
    fn test_from_json_partial() {
        let config = SimConfig::from_json(r#"{ "obstacle_count": 3, "player_speed": 120.0 }"#)
            .expect("valid json");
        assert_eq!(config.obstacle_count, 3);
        assert_eq!(config.player_speed, 120.0);
        assert_eq!(config.obstacle_margin, OBSTACLE_MARGIN);
    }

    #[test]
    fn test_from_json_rejects_bad_values() {
        let err = SimConfig::from_json(r#"{ "zoom": 0.0 }"#).unwrap_err();
        assert!(matches!(err, SimError::InvalidConfiguration { .. }));

        let err = SimConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, SimError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_json_roundtrip_preserves_values() {
        let mut config = SimConfig::default();
        config.obstacle_count = 7;
        let parsed = SimConfig::from_json(&config.to_json()).expect("roundtrip");
        assert_eq!(parsed.obstacle_count, 7);
        assert_eq!(parsed.obstacle_size, config.obstacle_size);
        assert!((parsed.frame_dt - config.frame_dt).abs() < 1e-12);
    }
}
