//! Rendering and layout configuration.

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Window width (logical pixels)
    pub window_width: u32,

    /// Window height (logical pixels)
    pub window_height: u32,

    /// Vertical field of view (degrees)
    /// 35° = narrow lens, keeps the desk and monitor undistorted
    pub fov_degrees: f32,

    /// Near clipping plane (scene units)
    pub near_plane_m: f32,

    /// Far clipping plane (scene units)
    pub far_plane_m: f32,

    /// Viewports narrower than this use the mobile layout (logical pixels)
    pub mobile_breakpoint_px: u32,

    /// Background behind the 3D room (linear RGB)
    pub scene_clear_color: [f64; 3],

    /// Desktop overlay background, platinum grey #7e7e7e (linear RGB)
    pub desktop_clear_color: [f64; 3],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            fov_degrees: 35.0,
            near_plane_m: 0.1,
            far_plane_m: 100.0,
            mobile_breakpoint_px: 768,
            scene_clear_color: [0.0, 0.0, 0.0],
            desktop_clear_color: [0.208, 0.208, 0.208],
        }
    }
}

impl RenderConfig {
    pub fn aspect_ratio(&self) -> f32 {
        self.window_width as f32 / self.window_height.max(1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_ratio_survives_zero_height() {
        let config = RenderConfig {
            window_height: 0,
            ..Default::default()
        };
        assert!(config.aspect_ratio().is_finite());
    }
}
