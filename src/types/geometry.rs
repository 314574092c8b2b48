//! Geometric and spatial types used across the shape, contact and engine APIs.

use glam::DVec2;

/// Agent pose in world coordinates (meters, radians).
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct Pose2 {
    pub position: DVec2,
    pub yaw: f64,
}

impl Pose2 {
    pub fn new(position: DVec2, yaw: f64) -> Self {
        Self { position, yaw }
    }

    pub fn from_xy(x: f64, y: f64) -> Self {
        Self {
            position: DVec2::new(x, y),
            yaw: 0.0,
        }
    }
}

/// World-axis-aligned rectangle in meters.
/// Convention: [min.x, max.x] x [min.y, max.y] in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub min: DVec2,
    pub max: DVec2,
}

impl WorldBounds {
    pub fn new(min: DVec2, max: DVec2) -> Self {
        Self { min, max }
    }

    /// Clamp a position onto the bounds, axis by axis. Positions already
    /// inside come back unchanged; outside positions snap to the nearest
    /// edge (no reflection).
    pub fn clamp(&self, p: DVec2) -> DVec2 {
        DVec2::new(
            p.x.clamp(self.min.x, self.max.x),
            p.y.clamp(self.min.y, self.max.y),
        )
    }

    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn is_valid(&self) -> bool {
        self.min.x < self.max.x
            && self.min.y < self.max.y
            && self.min.is_finite()
            && self.max.is_finite()
    }
}

/// Result of a closest-point query between an agent and a neighboring body,
/// both points in world coordinates. When the shapes overlap the pair comes
/// from the interpenetration fallback, so the separation vector is always
/// well defined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactPair {
    pub on_agent: DVec2,
    pub on_neighbor: DVec2,
}

impl ContactPair {
    /// Vector from the neighbor's contact point to the agent's, i.e. the
    /// direction a repulsive force pushes the agent.
    #[inline]
    pub fn separation(&self) -> DVec2 {
        self.on_agent - self.on_neighbor
    }

    #[inline]
    pub fn distance(&self) -> f64 {
        self.separation().length()
    }

    /// Same pair seen from the other body's perspective.
    #[inline]
    pub fn swapped(&self) -> Self {
        Self {
            on_agent: self.on_neighbor,
            on_neighbor: self.on_agent,
        }
    }
}

/// Normalize an angle into `(-pi, pi]`.
#[inline]
pub fn wrap_angle(angle: f64) -> f64 {
    let two_pi = 2.0 * std::f64::consts::PI;
    let mut a = angle % two_pi;
    if a <= -std::f64::consts::PI {
        a += two_pi;
    } else if a > std::f64::consts::PI {
        a -= two_pi;
    }
    a
}

/// Smallest signed difference `a - b` on the circle, in `(-pi, pi]`.
#[inline]
pub fn angle_diff(a: f64, b: f64) -> f64 {
    wrap_angle(a - b)
}

/// Bearing of `to` as seen from `from`, in world frame.
#[inline]
pub fn bearing(from: DVec2, to: DVec2) -> f64 {
    let d = to - from;
    d.y.atan2(d.x)
}
