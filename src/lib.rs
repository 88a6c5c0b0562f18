//! retrodesk library - scroll-driven camera choreography from a 3D room
//! into a retro desktop overlay

pub mod camera;
pub mod cli;
pub mod desktop;
pub mod error;
pub mod events;
pub mod input;
pub mod params;
pub mod phase;
pub mod rendering;
pub mod room;
pub mod scene;
pub mod smoothing;
pub mod store;
pub mod tour;
pub mod waypoint;
