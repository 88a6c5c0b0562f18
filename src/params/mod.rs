//! Parameter definitions with physical units and documented semantics.
//!
//! All magic numbers are extracted here with:
//! - Units (scene units, radians, fraction-per-second, pixels)
//! - Documented ranges and meanings
//! - Validation where a bad value would break an invariant

mod choreography;
mod render;

// Re-export all types
pub use choreography::ChoreographyParams;
pub use render::RenderConfig;
