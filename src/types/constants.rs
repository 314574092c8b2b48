//! Default engine parameters, mirrored from the reference pedestrian plugin.

/// Scale applied to the goal-attraction force.
pub const DEFAULT_TARGET_WEIGHT: f64 = 1.15;

/// Scale applied to each neighbor's repulsive force.
pub const DEFAULT_OBSTACLE_WEIGHT: f64 = 1.5;

/// Radius (meters) within which neighbors contribute forces.
pub const DEFAULT_SENSING_RADIUS: f64 = 4.0;

/// Per-axis speed (m/s) above which an instantaneous velocity estimate is
/// treated as a teleport and rejected.
pub const DEFAULT_MAX_SPEED: f64 = 15.0;

/// Distance (meters) under which the current target counts as reached.
pub const DEFAULT_TARGET_TOLERANCE: f64 = 0.3;

/// Walking speed (m/s) the goal term relaxes the velocity toward.
pub const DEFAULT_DESIRED_SPEED: f64 = 0.8;

/// Relaxation time (seconds) of the goal term; the velocity closes the gap
/// to the desired velocity with this time constant.
pub const DEFAULT_RELAXATION_TIME: f64 = 0.5;

/// Default world bounds: x in [-3.0, 3.5], y in [-10.0, 2.0].
pub const DEFAULT_WORLD_MIN: [f64; 2] = [-3.0, -10.0];
pub const DEFAULT_WORLD_MAX: [f64; 2] = [3.5, 2.0];

/// Offset (meters) applied to a contact point that coincides with the query
/// origin, so a zero-length separation never produces a zero-direction force.
pub const CONTACT_NUDGE: f64 = 0.005;

/// Half-gap (meters) between the two fallback contact points returned for
/// interpenetrating shapes. Keeps the contact distance positive and so bounds
/// the repulsion magnitude geometrically.
pub const INTERPENETRATION_HALF_GAP: f64 = 0.005;

/// Speeds below this are treated as standing still; the pose yaw then stands
/// in for the direction of travel.
pub const MIN_MOVING_SPEED: f64 = 1e-3;
