//! Scroll-driven camera choreography: intro blend, base approach, deep zoom,
//! orbital yaw and the pinned screen view.

use glam::{Mat4, Quat, Vec3};
use log::debug;

use crate::input::InputCollector;
use crate::params::{ChoreographyParams, RenderConfig};
use crate::phase::PhaseGate;
use crate::smoothing::approach;
use crate::store::PhaseStore;

/// Camera position and look-at target for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
}

/// The render camera the driver writes to once per frame
pub trait RenderCamera {
    fn set_position(&mut self, position: Vec3);
    fn look_at(&mut self, target: Vec3);
}

/// Minimal camera holding the last applied pose, for building matrices
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewCamera {
    pub position: Vec3,
    pub target: Vec3,
}

impl ViewCamera {
    pub fn new(pose: CameraPose) -> Self {
        Self {
            position: pose.position,
            target: pose.look_at,
        }
    }

    /// Create view-projection matrix for rendering
    ///
    /// # Returns
    /// Tuple of (view_proj_matrix, camera_position)
    pub fn view_proj(&self, render_config: &RenderConfig) -> (Mat4, Vec3) {
        // Always keep Y as up vector (camera never rolls)
        let view = Mat4::look_at_rh(self.position, self.target, Vec3::Y);
        let proj = Mat4::perspective_rh(
            render_config.fov_degrees.to_radians(),
            render_config.aspect_ratio(),
            render_config.near_plane_m,
            render_config.far_plane_m,
        );

        (proj * view, self.position)
    }
}

impl RenderCamera for ViewCamera {
    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }
}

/// Per-frame driver owning every smoothed scalar of the choreography
///
/// The only writer of smoothed progress, smoothed rotation and the camera
/// pose. Reads flags from the store, and writes back phase transitions
/// (through the gate) and the zoom auto-exit.
#[derive(Debug, Clone)]
pub struct AnimationDriver {
    params: ChoreographyParams,
    gate: PhaseGate,
    zoom_direction: Vec3,

    /// 0 = intro waypoint, 1 = interactive pose
    intro_progress: f32,

    /// 0 = start, 1 = base, 2 = maximum deep zoom
    smoothed_progress: f32,

    /// Orbital yaw around the look-at target (radians)
    smoothed_rotation: f32,

    last_pose: CameraPose,
}

impl AnimationDriver {
    /// Create a driver resting at the pre-entry pose
    pub fn new(params: ChoreographyParams) -> Self {
        let gate = PhaseGate::new(params.phase_threshold);
        let zoom_direction = params.zoom_direction();
        let rest = if params.intro_enabled {
            params.waypoints.intro
        } else {
            params.waypoints.start
        };

        Self {
            gate,
            zoom_direction,
            intro_progress: 0.0,
            smoothed_progress: 0.0,
            smoothed_rotation: 0.0,
            last_pose: CameraPose {
                position: rest.position(),
                look_at: rest.look_at(),
            },
            params,
        }
    }

    pub fn params(&self) -> &ChoreographyParams {
        &self.params
    }

    pub fn smoothed_progress(&self) -> f32 {
        self.smoothed_progress
    }

    pub fn smoothed_rotation(&self) -> f32 {
        self.smoothed_rotation
    }

    pub fn intro_progress(&self) -> f32 {
        self.intro_progress
    }

    /// Pose computed by the most recent frame
    pub fn pose(&self) -> CameraPose {
        self.last_pose
    }

    /// Progress target for the current flags and scroll accumulator
    ///
    /// # Returns
    /// Tuple of (target_progress, target_rotation)
    pub fn targets(&self, has_zoomed: bool, scroll_progress: f32) -> (f32, f32) {
        let target_progress = if has_zoomed {
            1.0 + scroll_progress
        } else {
            0.0
        };
        let target_rotation = self.params.max_rotation_rad * target_progress.clamp(0.0, 1.0);
        (target_progress, target_rotation)
    }

    /// Advance one frame of `dt` seconds
    ///
    /// A non-finite or negative `dt` leaves every scalar and the pose
    /// untouched.
    pub fn advance(
        &mut self,
        dt: f32,
        input: &mut InputCollector,
        store: &mut PhaseStore,
    ) -> CameraPose {
        if !dt.is_finite() || dt < 0.0 {
            return self.last_pose;
        }
        let flags = store.flags();

        if self.params.intro_enabled {
            let target = if flags.has_entered { 1.0 } else { 0.0 };
            self.intro_progress =
                approach(self.intro_progress, target, dt, self.params.intro_speed);
        } else {
            self.intro_progress = 1.0;
        }

        // Pinned reading position: no smoothing, perfectly stable
        if flags.is_screen_focused {
            let screen = self.params.waypoints.screen;
            self.last_pose = CameraPose {
                position: screen.position(),
                look_at: screen.look_at(),
            };
            return self.last_pose;
        }

        let mut has_zoomed = flags.has_zoomed;
        let (mut target_progress, _) = self.targets(has_zoomed, input.scroll_progress());

        // Scrolled back out past the threshold: snap to the unzoomed regime
        if has_zoomed && target_progress < self.params.auto_exit_threshold {
            debug!("auto-exit from zoom at target {:.3}", target_progress);
            input.collapse_zoom(store);
            has_zoomed = false;
            target_progress = 0.0;
        }
        let (_, target_rotation) = self.targets(has_zoomed, input.scroll_progress());

        let speed = self.params.animation_speed;
        self.smoothed_progress = approach(self.smoothed_progress, target_progress, dt, speed);
        self.smoothed_rotation = approach(self.smoothed_rotation, target_rotation, dt, speed);

        self.last_pose = self.compose_pose();

        if !flags.is_mobile {
            self.gate.apply(store, self.smoothed_progress);
        }

        self.last_pose
    }

    /// Advance and write the resulting pose onto `camera`
    pub fn drive<C: RenderCamera + ?Sized>(
        &mut self,
        dt: f32,
        input: &mut InputCollector,
        store: &mut PhaseStore,
        camera: &mut C,
    ) -> CameraPose {
        let pose = self.advance(dt, input, store);
        camera.set_position(pose.position);
        camera.look_at(pose.look_at);
        pose
    }

    /// Pose for the current smoothed scalars (no state change)
    pub fn compose_pose(&self) -> CameraPose {
        let waypoints = &self.params.waypoints;

        // Stage 1: start -> base, stage 2: past base along the zoom direction
        let stage1 = self.smoothed_progress.clamp(0.0, 1.0);
        let stage2 = (self.smoothed_progress - 1.0).max(0.0);

        let (mut position, mut look_at) = waypoints.start.lerp(&waypoints.base, stage1);
        if stage2 > 0.0 {
            let travel = self.zoom_direction * self.params.zoom_depth_m * stage2;
            position += travel;
            look_at += travel;
        }

        // Orbit around the look-at target, not the scene origin
        if self.smoothed_rotation != 0.0 {
            let offset = position - look_at;
            position = look_at + Quat::from_rotation_y(self.smoothed_rotation) * offset;
        }

        if self.params.intro_enabled {
            let intro = waypoints.intro;
            position = intro.position().lerp(position, self.intro_progress);
            look_at = intro.look_at().lerp(look_at, self.intro_progress);
        }

        CameraPose { position, look_at }
    }
}
