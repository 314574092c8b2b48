//! Bounding envelopes substituted for agents' and obstacles' true geometry.
//!
//! The shape set is a closed enum dispatched explicitly: the contact engine
//! runs once per neighbor per tick, and an exhaustively checkable variant set
//! is preferable to open polymorphism on that path.

pub mod circle;
pub mod ellipse;
pub mod rect;

pub use circle::BoundCircle;
pub use ellipse::{BoundEllipse, EllipseIntersection};
pub use rect::BoundBox;

use glam::DVec2;

use crate::types::ForceError;

/// Collision envelope of an agent or obstacle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Box(BoundBox),
    Circle(BoundCircle),
    Ellipse(BoundEllipse),
}

impl Shape {
    pub fn center(&self) -> DVec2 {
        match self {
            Shape::Box(b) => b.center(),
            Shape::Circle(c) => c.center(),
            Shape::Ellipse(e) => e.center(),
        }
    }

    /// Reference point for closest-point queries: the interaction center.
    /// Identical to [`center`](Self::center) except for an offset ellipse.
    pub fn interaction_center(&self) -> DVec2 {
        match self {
            Shape::Ellipse(e) => e.shifted_center(),
            other => other.center(),
        }
    }

    pub fn contains(&self, p: DVec2) -> bool {
        match self {
            Shape::Box(b) => b.contains(p),
            Shape::Circle(c) => c.contains(p),
            Shape::Ellipse(e) => e.contains(p),
        }
    }

    /// Point where this shape's boundary crosses the line from its
    /// interaction center toward `target`. `None` when the direction
    /// degenerates (target on the center) or, for a box, when the ray
    /// construction fails.
    pub fn boundary_toward(&self, target: DVec2) -> Option<DVec2> {
        match self {
            Shape::Box(b) => b.intersect_ray(b.center(), target),
            Shape::Circle(c) => c.boundary_toward(target),
            Shape::Ellipse(e) => e.intersection_toward(target).map(|hit| hit.point),
        }
    }

    /// Reject NaN/Inf parameters and non-positive sizes before a query uses
    /// the shape; a corrupted envelope must fail loudly, not produce a
    /// corrupted force.
    pub fn validate(&self) -> Result<(), ForceError> {
        match self {
            Shape::Box(b) => b.validate(),
            Shape::Circle(c) => c.validate(),
            Shape::Ellipse(e) => e.validate(),
        }
    }

    /// Re-anchor the shape at a new position (orientation for ellipses).
    pub fn set_pose(&mut self, position: DVec2, yaw: f64) {
        match self {
            Shape::Box(b) => b.set_center(position),
            Shape::Circle(c) => c.set_center(position),
            Shape::Ellipse(e) => e.set_pose(position, yaw),
        }
    }
}
