pub mod constants;
pub mod error;
pub mod geometry;

pub use constants::*;
pub use error::ForceError;
pub use geometry::{ContactPair, Pose2, WorldBounds, angle_diff, bearing, wrap_angle};
