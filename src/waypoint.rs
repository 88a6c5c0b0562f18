//! Named camera poses used as interpolation endpoints.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Fixed camera pose: where the camera sits and what it looks at (scene units)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub position: [f32; 3],
    pub look_at: [f32; 3],
}

impl Waypoint {
    pub const fn new(position: [f32; 3], look_at: [f32; 3]) -> Self {
        Self { position, look_at }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn look_at(&self) -> Vec3 {
        Vec3::from_array(self.look_at)
    }

    /// Linear blend of both position and look-at toward `other`
    pub fn lerp(&self, other: &Waypoint, t: f32) -> (Vec3, Vec3) {
        (
            self.position().lerp(other.position(), t),
            self.look_at().lerp(other.look_at(), t),
        )
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.position.iter().chain(self.look_at.iter()).all(|c| c.is_finite())
    }
}

/// The full set of poses the choreography moves between
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaypointTable {
    /// Wide establishing shot shown before the visitor enters
    pub intro: Waypoint,

    /// Room overview once entered (progress 0)
    pub start: Waypoint,

    /// Desk approach before the orbit (progress 1)
    ///
    /// The driver yaws the camera a quarter turn around `look_at` as
    /// progress reaches 1, so the offset here sits on the -X side; after
    /// the orbit the camera faces the monitor along -Z.
    pub base: Waypoint,

    /// Pinned reading position straight in front of the monitor
    pub screen: Waypoint,
}

impl Default for WaypointTable {
    fn default() -> Self {
        Self {
            intro: Waypoint::new([0.0, 3.5, 12.0], [0.0, 0.5, 0.0]),
            start: Waypoint::new([-3.0, 2.0, 1.16], [0.05, 0.7, 1.16]),
            // Monitor screen is centred near (0.05, 0.9) on the plane z = 1.16
            base: Waypoint::new([-1.29, 0.85, 1.16], [0.05, 0.85, 1.16]),
            screen: Waypoint::new([0.05, 0.9, 1.65], [0.05, 0.9, 1.16]),
        }
    }
}

impl WaypointTable {
    pub(crate) fn is_finite(&self) -> bool {
        [self.intro, self.start, self.base, self.screen]
            .iter()
            .all(Waypoint::is_finite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        let table = WaypointTable::default();

        let (pos, look) = table.start.lerp(&table.base, 0.0);
        assert_eq!(pos, table.start.position());
        assert_eq!(look, table.start.look_at());

        let (pos, look) = table.start.lerp(&table.base, 1.0);
        assert!((pos - table.base.position()).length() < 1e-6);
        assert!((look - table.base.look_at()).length() < 1e-6);
    }

    #[test]
    fn test_lerp_midpoint() {
        let a = Waypoint::new([0.0, 0.0, 0.0], [0.0, 0.0, -1.0]);
        let b = Waypoint::new([2.0, 4.0, 6.0], [0.0, 2.0, -1.0]);
        let (pos, look) = a.lerp(&b, 0.5);
        assert_eq!(pos, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(look, Vec3::new(0.0, 1.0, -1.0));
    }

    #[test]
    fn test_default_table_is_finite() {
        assert!(WaypointTable::default().is_finite());

        let mut table = WaypointTable::default();
        table.base.position[1] = f32::NAN;
        assert!(!table.is_finite());
    }
}
