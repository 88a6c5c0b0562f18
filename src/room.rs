//! Wireframe room geometry: walls, floor grid, desk and monitor.
//!
//! Proportions line up with the default waypoints: the monitor screen sits
//! on the plane z = 1.16 centred near (0.05, 0.9).

use bytemuck::{Pod, Zeroable};

/// Line-list vertex (position + colour)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

const WALL_COLOR: [f32; 3] = [0.35, 0.32, 0.28];
const FLOOR_COLOR: [f32; 3] = [0.22, 0.2, 0.18];
const DESK_COLOR: [f32; 3] = [0.6, 0.42, 0.25];
const MONITOR_COLOR: [f32; 3] = [0.85, 0.83, 0.78];
const SCREEN_COLOR: [f32; 3] = [0.3, 0.9, 0.6];

/// Half extents of the room box (x, z); floor at y = 0
const ROOM_HALF_X: f32 = 4.0;
const ROOM_HALF_Z: f32 = 4.0;
const ROOM_HEIGHT: f32 = 3.0;
const FLOOR_GRID_LINES: usize = 9;

/// Line segments making up the room
#[derive(Debug, Clone, Default)]
pub struct RoomMesh {
    pub vertices: Vec<Vertex>,
}

impl RoomMesh {
    pub fn new() -> Self {
        let mut mesh = Self::default();

        // Room shell
        mesh.push_box(
            [-ROOM_HALF_X, 0.0, -ROOM_HALF_Z],
            [ROOM_HALF_X, ROOM_HEIGHT, ROOM_HALF_Z],
            WALL_COLOR,
        );

        // Floor grid
        for i in 0..FLOOR_GRID_LINES {
            let t = i as f32 / (FLOOR_GRID_LINES - 1) as f32;
            let x = -ROOM_HALF_X + t * 2.0 * ROOM_HALF_X;
            let z = -ROOM_HALF_Z + t * 2.0 * ROOM_HALF_Z;
            mesh.push_line([x, 0.0, -ROOM_HALF_Z], [x, 0.0, ROOM_HALF_Z], FLOOR_COLOR);
            mesh.push_line([-ROOM_HALF_X, 0.0, z], [ROOM_HALF_X, 0.0, z], FLOOR_COLOR);
        }

        // Desk top and legs
        mesh.push_box([-0.8, 0.7, 0.8], [0.9, 0.75, 1.5], DESK_COLOR);
        for (x, z) in [(-0.75, 0.85), (0.85, 0.85), (-0.75, 1.45), (0.85, 1.45)] {
            mesh.push_line([x, 0.0, z], [x, 0.7, z], DESK_COLOR);
        }

        // Monitor housing, screen face and stand
        mesh.push_box([-0.25, 0.72, 1.0], [0.35, 1.12, 1.15], MONITOR_COLOR);
        mesh.push_rect_z(1.16, [-0.2, 0.77], [0.3, 1.07], SCREEN_COLOR);
        mesh.push_line([0.05, 0.75, 1.08], [0.05, 0.72, 1.08], MONITOR_COLOR);

        mesh
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    fn push_line(&mut self, a: [f32; 3], b: [f32; 3], color: [f32; 3]) {
        self.vertices.push(Vertex { position: a, color });
        self.vertices.push(Vertex { position: b, color });
    }

    /// Axis-aligned rectangle in the plane z = `z`
    fn push_rect_z(&mut self, z: f32, min: [f32; 2], max: [f32; 2], color: [f32; 3]) {
        let corners = [
            [min[0], min[1], z],
            [max[0], min[1], z],
            [max[0], max[1], z],
            [min[0], max[1], z],
        ];
        for i in 0..4 {
            self.push_line(corners[i], corners[(i + 1) % 4], color);
        }
    }

    /// Axis-aligned box outline (12 edges)
    fn push_box(&mut self, min: [f32; 3], max: [f32; 3], color: [f32; 3]) {
        self.push_rect_z(min[2], [min[0], min[1]], [max[0], max[1]], color);
        self.push_rect_z(max[2], [min[0], min[1]], [max[0], max[1]], color);
        for (x, y) in [
            (min[0], min[1]),
            (max[0], min[1]),
            (max[0], max[1]),
            (min[0], max[1]),
        ] {
            self.push_line([x, y, min[2]], [x, y, max[2]], color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waypoint::WaypointTable;

    #[test]
    fn test_line_list_is_paired() {
        let mesh = RoomMesh::new();
        assert!(mesh.vertex_count() > 0);
        assert_eq!(mesh.vertices.len() % 2, 0);
    }

    #[test]
    fn test_screen_faces_default_waypoints() {
        let mesh = RoomMesh::new();
        let screen: Vec<&Vertex> = mesh
            .vertices
            .iter()
            .filter(|v| v.color == SCREEN_COLOR)
            .collect();
        assert_eq!(screen.len(), 8);

        let table = WaypointTable::default();
        let look_at = table.screen.look_at();
        assert!(screen.iter().all(|v| v.position[2] == look_at.z));

        let (min_x, max_x) = screen.iter().fold((f32::MAX, f32::MIN), |(lo, hi), v| {
            (lo.min(v.position[0]), hi.max(v.position[0]))
        });
        assert!(min_x < look_at.x && look_at.x < max_x);
    }

    #[test]
    fn test_cameras_start_inside_room() {
        let table = WaypointTable::default();
        for waypoint in [table.start, table.base, table.screen] {
            let p = waypoint.position();
            assert!(p.x.abs() < ROOM_HALF_X && p.z.abs() < ROOM_HALF_Z);
            assert!(p.y > 0.0 && p.y < ROOM_HEIGHT);
        }
    }
}
