//! Circular bounding envelope.

use glam::DVec2;

use crate::types::ForceError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundCircle {
    center: DVec2,
    radius: f64,
}

impl BoundCircle {
    pub fn new(center: DVec2, radius: f64) -> Self {
        Self { center, radius }
    }

    pub fn center(&self) -> DVec2 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn set_center(&mut self, center: DVec2) {
        self.center = center;
    }

    pub fn validate(&self) -> Result<(), ForceError> {
        if !self.center.is_finite() || !self.radius.is_finite() {
            return Err(ForceError::InvalidShape(
                "circle has non-finite center or radius".to_string(),
            ));
        }
        if self.radius <= 0.0 {
            return Err(ForceError::InvalidShape(format!(
                "circle radius must be positive, got {}",
                self.radius
            )));
        }
        Ok(())
    }

    pub fn contains(&self, p: DVec2) -> bool {
        self.center.distance_squared(p) <= self.radius * self.radius
    }

    /// Boundary point in the direction of `toward` from the center, or
    /// `None` when `toward` coincides with the center.
    pub fn boundary_toward(&self, toward: DVec2) -> Option<DVec2> {
        let dir = toward - self.center;
        let len = dir.length();
        if len < f64::EPSILON {
            return None;
        }
        Some(self.center + dir * (self.radius / len))
    }
}
