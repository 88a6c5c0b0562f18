//! Camera choreography tunables: scroll response, smoothing rates, deep zoom
//! and phase thresholds.

use std::f32::consts::FRAC_PI_2;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::waypoint::WaypointTable;

/// Tunables for the scroll/zoom camera choreography
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChoreographyParams {
    /// Scroll progress gained per unit of wheel delta (browser pixels)
    /// 0.001 = ten 100px notches sweep the whole [-1, 1] half-range
    pub scroll_speed: f32,

    /// Smoothing rate for progress and rotation (fraction of remaining
    /// distance per second, clamped to 1 per frame)
    pub animation_speed: f32,

    /// Smoothing rate for the intro blend (fraction per second)
    pub intro_speed: f32,

    /// Blend in from the wide intro waypoint after entry
    /// Disable for instantaneous entry
    pub intro_enabled: bool,

    /// Direction the camera travels past the base waypoint (normalized on use)
    pub zoom_direction: [f32; 3],

    /// Distance travelled along `zoom_direction` at full deep zoom (scene units)
    pub zoom_depth_m: f32,

    /// Orbital yaw at full zoom (radians)
    pub max_rotation_rad: f32,

    /// Smoothed progress above which the desktop overlay takes over (0–2 scale)
    pub phase_threshold: f32,

    /// Target progress below which zoom is dropped automatically (0–2 scale)
    pub auto_exit_threshold: f32,

    pub waypoints: WaypointTable,
}

impl Default for ChoreographyParams {
    fn default() -> Self {
        Self {
            scroll_speed: 0.001,
            animation_speed: 2.5,
            intro_speed: 1.2,
            intro_enabled: true,
            zoom_direction: [0.0, 0.0, -1.0], // Into the monitor
            zoom_depth_m: 1.0,
            max_rotation_rad: FRAC_PI_2,
            phase_threshold: 1.7,
            auto_exit_threshold: 0.5,
            waypoints: WaypointTable::default(),
        }
    }
}

impl ChoreographyParams {
    /// Load from a JSON file; missing fields keep their defaults
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let params: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        params.validate()?;
        Ok(params)
    }

    /// Unit vector of the deep-zoom travel
    ///
    /// Falls back to -Z if the configured direction is degenerate; `validate`
    /// rejects that case up front.
    pub fn zoom_direction(&self) -> Vec3 {
        Vec3::from_array(self.zoom_direction)
            .try_normalize()
            .unwrap_or(Vec3::NEG_Z)
    }

    /// Validate configuration (positive rates, thresholds on the 0–2 scale)
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("scroll_speed", self.scroll_speed),
            ("animation_speed", self.animation_speed),
            ("intro_speed", self.intro_speed),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        for (field, value, max) in [
            ("zoom_depth_m", self.zoom_depth_m, f32::MAX),
            ("max_rotation_rad", self.max_rotation_rad, FRAC_PI_2),
            ("phase_threshold", self.phase_threshold, 2.0),
            ("auto_exit_threshold", self.auto_exit_threshold, 1.0),
        ] {
            if !value.is_finite() || !(0.0..=max).contains(&value) {
                return Err(ConfigError::OutOfRange {
                    field,
                    value,
                    min: 0.0,
                    max,
                });
            }
        }

        if self.zoom_direction.iter().any(|c| !c.is_finite()) {
            return Err(ConfigError::NonFinite {
                field: "zoom_direction",
            });
        }
        if Vec3::from_array(self.zoom_direction).length_squared() == 0.0 {
            return Err(ConfigError::ZeroZoomDirection);
        }
        if !self.waypoints.is_finite() {
            return Err(ConfigError::NonFinite { field: "waypoints" });
        }

        Ok(())
    }
}
