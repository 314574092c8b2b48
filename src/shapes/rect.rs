//! World-axis-aligned bounding box.

use glam::DVec2;

use crate::types::ForceError;

/// Axis-aligned box envelope for a static obstacle (or a box-shaped agent).
///
/// The simulation only ever produces axis-aligned envelopes for obstacles, so
/// the box carries no rotation; its pose reduces to the center position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundBox {
    center: DVec2,
    half_extents: DVec2,
}

impl BoundBox {
    pub fn new(center: DVec2, half_extents: DVec2) -> Self {
        Self {
            center,
            half_extents,
        }
    }

    /// Box spanning `[min, max]`.
    pub fn from_corners(min: DVec2, max: DVec2) -> Self {
        Self {
            center: 0.5 * (min + max),
            half_extents: 0.5 * (max - min),
        }
    }

    pub fn center(&self) -> DVec2 {
        self.center
    }

    pub fn half_extents(&self) -> DVec2 {
        self.half_extents
    }

    pub fn min(&self) -> DVec2 {
        self.center - self.half_extents
    }

    pub fn max(&self) -> DVec2 {
        self.center + self.half_extents
    }

    pub fn set_center(&mut self, center: DVec2) {
        self.center = center;
    }

    pub fn validate(&self) -> Result<(), ForceError> {
        if !self.center.is_finite() || !self.half_extents.is_finite() {
            return Err(ForceError::InvalidShape(
                "box has non-finite center or extents".to_string(),
            ));
        }
        if self.half_extents.x <= 0.0 || self.half_extents.y <= 0.0 {
            return Err(ForceError::InvalidShape(format!(
                "box extents must be positive, got ({}, {})",
                self.half_extents.x, self.half_extents.y
            )));
        }
        Ok(())
    }

    /// The four corner vertices, counter-clockwise from the min corner.
    pub fn vertices(&self) -> [DVec2; 4] {
        let min = self.min();
        let max = self.max();
        [
            min,
            DVec2::new(max.x, min.y),
            max,
            DVec2::new(min.x, max.y),
        ]
    }

    pub fn contains(&self, p: DVec2) -> bool {
        let min = self.min();
        let max = self.max();
        p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y
    }

    /// Range membership used for long walls: when `p` shares a coordinate
    /// range with the box along one axis, the intersection search should be
    /// anchored on a point aligned with `p` along that axis rather than on
    /// the box center, otherwise the query selects a far corner.
    ///
    /// Returns the anchor point (inside the box) or `None` when `p` is
    /// outside the box's range on both axes.
    pub fn axis_range_anchor(&self, p: DVec2) -> Option<DVec2> {
        let min = self.min();
        let max = self.max();
        if p.x >= min.x && p.x <= max.x {
            return Some(DVec2::new(p.x, self.center.y));
        }
        if p.y >= min.y && p.y <= max.y {
            return Some(DVec2::new(self.center.x, p.y));
        }
        None
    }

    /// Nearest boundary point hit by the ray from `origin` toward `toward`.
    ///
    /// `origin` must lie outside the box for a boundary hit to exist;
    /// returns `None` when the ray misses or the direction degenerates.
    pub fn intersect_ray(&self, origin: DVec2, toward: DVec2) -> Option<DVec2> {
        let dir = toward - origin;
        if dir.length_squared() < f64::EPSILON {
            return None;
        }
        let min = self.min();
        let max = self.max();

        // Slab test per axis, tracking the parametric entry/exit interval.
        let mut t_enter = f64::NEG_INFINITY;
        let mut t_exit = f64::INFINITY;
        for axis in 0..2 {
            let (o, d, lo, hi) = match axis {
                0 => (origin.x, dir.x, min.x, max.x),
                _ => (origin.y, dir.y, min.y, max.y),
            };
            if d.abs() < f64::EPSILON {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }
            let t0 = (lo - o) / d;
            let t1 = (hi - o) / d;
            let (near, far) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };
            t_enter = t_enter.max(near);
            t_exit = t_exit.min(far);
            if t_enter > t_exit {
                return None;
            }
        }
        if t_exit < 0.0 {
            return None;
        }
        // Entry point if the origin is outside, exit point if inside.
        let t = if t_enter >= 0.0 { t_enter } else { t_exit };
        Some(origin + dir * t)
    }

    /// Vertex closest to `p` by Euclidean distance.
    pub fn closest_vertex(&self, p: DVec2) -> DVec2 {
        let mut best = self.vertices()[0];
        let mut best_d = best.distance_squared(p);
        for v in self.vertices().into_iter().skip(1) {
            let d = v.distance_squared(p);
            if d < best_d {
                best = v;
                best_d = d;
            }
        }
        best
    }
}
