//! Elliptic bounding envelope with an optional center offset.
//!
//! The ellipse is the usual envelope for a walking person: elongated along
//! the shoulders, optionally displaced from the kinematic origin when the
//! model's visual center does not coincide with it. Containment and boundary
//! intersection share one routine, so the two predicates can never disagree.

use glam::DVec2;

use crate::types::{ForceError, angle_diff};

/// Result of casting a line from the (shifted) center toward a target point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipseIntersection {
    /// Boundary point on the target's side of the ellipse, world coordinates.
    pub point: DVec2,
    /// Whether the target lies on or inside the boundary.
    pub target_inside: bool,
}

/// Ellipse-line quadratic roots in the ellipse's local frame.
struct LineRoots {
    count: u8,
    first: DVec2,
    second: DVec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundEllipse {
    /// Semi-major axis. Invariant: `a >= b > 0`.
    a: f64,
    /// Semi-minor axis.
    b: f64,
    /// Orientation of the major axis in the world frame.
    yaw: f64,
    center: DVec2,
    /// Displacement of the interaction center from `center`, expressed along
    /// the ellipse's own axes. Zero unless explicitly set; setters reject
    /// offsets falling outside the un-offset ellipse.
    offset: DVec2,
}

impl BoundEllipse {
    pub fn new(a: f64, b: f64, yaw: f64, center: DVec2) -> Self {
        Self {
            a,
            b,
            yaw,
            center,
            offset: DVec2::ZERO,
        }
    }

    /// Construct with a center offset; fails if the offset leaves the
    /// un-offset ellipse.
    pub fn with_offset(
        a: f64,
        b: f64,
        yaw: f64,
        center: DVec2,
        offset: DVec2,
    ) -> Result<Self, ForceError> {
        let mut e = Self::new(a, b, yaw, center);
        e.set_center_offset(offset)?;
        Ok(e)
    }

    pub fn semi_major(&self) -> f64 {
        self.a
    }

    pub fn semi_minor(&self) -> f64 {
        self.b
    }

    pub fn yaw(&self) -> f64 {
        self.yaw
    }

    pub fn center(&self) -> DVec2 {
        self.center
    }

    pub fn center_offset(&self) -> DVec2 {
        self.offset
    }

    /// Interaction center: the geometric center translated by the offset
    /// rotated into the ellipse's orientation.
    pub fn shifted_center(&self) -> DVec2 {
        self.center + rotate(self.offset, self.yaw)
    }

    pub fn set_pose(&mut self, center: DVec2, yaw: f64) {
        self.center = center;
        self.yaw = yaw;
    }

    /// Set the center offset (ellipse-local axes). An offset outside the
    /// un-offset ellipse is rejected and the stored offset is left unchanged,
    /// so an invalid displacement is never silently accepted.
    pub fn set_center_offset(&mut self, offset: DVec2) -> Result<(), ForceError> {
        if !offset.is_finite() {
            return Err(ForceError::InvalidShape(
                "ellipse offset must be finite".to_string(),
            ));
        }
        if offset.length_squared() < f64::EPSILON {
            self.offset = DVec2::ZERO;
            return Ok(());
        }
        let norm = (offset.x / self.a).powi(2) + (offset.y / self.b).powi(2);
        if norm >= 1.0 {
            return Err(ForceError::InvalidShape(format!(
                "ellipse offset ({}, {}) lies outside the {}x{} ellipse",
                offset.x, offset.y, self.a, self.b
            )));
        }
        self.offset = offset;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ForceError> {
        if !self.a.is_finite()
            || !self.b.is_finite()
            || !self.yaw.is_finite()
            || !self.center.is_finite()
        {
            return Err(ForceError::InvalidShape(
                "ellipse has non-finite parameters".to_string(),
            ));
        }
        if self.b <= 0.0 || self.a < self.b {
            return Err(ForceError::InvalidShape(format!(
                "ellipse axes must satisfy a >= b > 0, got a={} b={}",
                self.a, self.b
            )));
        }
        Ok(())
    }

    /// Boundary point where the line from the shifted center toward `target`
    /// leaves the ellipse, plus whether `target` itself lies inside.
    ///
    /// `None` only when `target` coincides with the shifted center, where no
    /// bearing exists; callers perturb and retry in that case.
    pub fn intersection_toward(&self, target: DVec2) -> Option<EllipseIntersection> {
        // Local frame: origin at the ellipse center, axes along a and b.
        // The shifted center sits at `offset` in this frame.
        let to_target = rotate(target - self.shifted_center(), -self.yaw);
        if to_target.length_squared() < f64::EPSILON * f64::EPSILON {
            return None;
        }
        let psi = to_target.y.atan2(to_target.x);

        let roots = self.line_roots(psi);
        if roots.count == 0 {
            // Unreachable while the offset invariant holds (the line always
            // passes through the interior), kept as a guard.
            return None;
        }

        // Pick the root whose bearing from the shifted center matches psi;
        // the other root is the antipodal crossing. Ties go to the first.
        let selected = if roots.count == 1 {
            roots.first
        } else {
            let bearing_of = |p: DVec2| {
                let v = p - self.offset;
                v.y.atan2(v.x)
            };
            let d1 = angle_diff(bearing_of(roots.first), psi).abs();
            let d2 = angle_diff(bearing_of(roots.second), psi).abs();
            if d1 <= d2 { roots.first } else { roots.second }
        };

        // The target is inside iff it is no farther from the shifted center
        // than the boundary crossing on its own bearing. This doubles as the
        // containment predicate.
        let target_inside =
            to_target.length_squared() <= (selected - self.offset).length_squared();

        Some(EllipseIntersection {
            point: self.center + rotate(selected, self.yaw),
            target_inside,
        })
    }

    /// Containment, derived from [`intersection_toward`](Self::intersection_toward)
    /// so both stay consistent by construction. The shifted center itself
    /// counts as inside.
    pub fn contains(&self, p: DVec2) -> bool {
        match self.intersection_toward(p) {
            Some(hit) => hit.target_inside,
            None => true,
        }
    }

    /// Solve the ellipse-line quadratic for the line through the shifted
    /// center at bearing `psi` (local frame). Parametric form
    /// `P(t) = offset + t * (cos psi, sin psi)` avoids the tan(psi) pole at
    /// +-pi/2 while keeping the 0/1/2-root structure of the slope form.
    fn line_roots(&self, psi: f64) -> LineRoots {
        let dir = DVec2::new(psi.cos(), psi.sin());
        let o = self.offset;

        let qa = (dir.x / self.a).powi(2) + (dir.y / self.b).powi(2);
        let qb = 2.0 * (o.x * dir.x / (self.a * self.a) + o.y * dir.y / (self.b * self.b));
        let qc = (o.x / self.a).powi(2) + (o.y / self.b).powi(2) - 1.0;

        let delta = qb * qb - 4.0 * qa * qc;
        if delta < -1e-12 {
            return LineRoots {
                count: 0,
                first: DVec2::ZERO,
                second: DVec2::ZERO,
            };
        }
        if delta.abs() <= 1e-12 {
            let t = -qb / (2.0 * qa);
            return LineRoots {
                count: 1,
                first: o + t * dir,
                second: DVec2::ZERO,
            };
        }
        let sqrt_delta = delta.sqrt();
        let t1 = (-qb + sqrt_delta) / (2.0 * qa);
        let t2 = (-qb - sqrt_delta) / (2.0 * qa);
        LineRoots {
            count: 2,
            first: o + t1 * dir,
            second: o + t2 * dir,
        }
    }
}

#[inline]
fn rotate(v: DVec2, angle: f64) -> DVec2 {
    let (s, c) = angle.sin_cos();
    DVec2::new(c * v.x - s * v.y, s * v.x + c * v.y)
}
