//! Trapezoidal membership regions on the unit circle.
//!
//! A region is a plateau arc plus linear ramps on both sides. Membership is
//! evaluated with circular arc distances, so a region whose plateau crosses
//! the +-pi seam behaves exactly like any other region; there is no
//! truncation at the seam.

use crate::types::wrap_angle;

const TWO_PI: f64 = 2.0 * std::f64::consts::PI;

/// One linguistic term of an angular fuzzy variable.
///
/// Location-dependent terms are built once from a fixed sector
/// ([`TrapezoidRegion::sector`]); location-independent terms are built from a
/// half-width and recentered on a runtime angle
/// ([`TrapezoidRegion::centered`], [`recenter`](TrapezoidRegion::recenter)).
#[derive(Debug, Clone)]
pub struct TrapezoidRegion {
    label: &'static str,
    /// Start of the plateau arc, normalized to `(-pi, pi]`.
    start: f64,
    /// Counter-clockwise plateau length in `[0, 2*pi)`.
    span: f64,
    /// Ramp width on each side of the plateau, > 0.
    ramp: f64,
}

impl TrapezoidRegion {
    /// Fixed sector from `start` counter-clockwise to `end` (both normalized
    /// after arithmetic, so wrapped sectors are fine).
    pub fn sector(label: &'static str, start: f64, end: f64, ramp: f64) -> Self {
        let start = wrap_angle(start);
        let span = positive_arc(wrap_angle(end) - start);
        Self {
            label,
            start,
            span,
            ramp: ramp.max(f64::EPSILON),
        }
    }

    /// Region with plateau `center +- half_width`, recenterable at runtime.
    pub fn centered(label: &'static str, center: f64, half_width: f64, ramp: f64) -> Self {
        Self::sector(label, center - half_width, center + half_width, ramp)
    }

    /// Move the plateau so it is centered on `center`, keeping width and
    /// ramps. Angles are re-normalized, so recentering near the seam is safe.
    pub fn recenter(&mut self, center: f64) {
        self.start = wrap_angle(center - 0.5 * self.span);
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Membership grade in `[0, 1]`, continuous in `angle`.
    pub fn membership(&self, angle: f64) -> f64 {
        // Position along the circle from the plateau start, in [0, 2*pi).
        let t = positive_arc(wrap_angle(angle) - self.start);
        if t <= self.span {
            return 1.0;
        }
        // In the gap: distance past the end edge, and distance short of the
        // start edge going the other way around.
        let past_end = t - self.span;
        let before_start = TWO_PI - t;
        let d = past_end.min(before_start);
        (1.0 - d / self.ramp).max(0.0)
    }
}

/// Arc length in `[0, 2*pi)` for a signed angular difference.
#[inline]
fn positive_arc(diff: f64) -> f64 {
    let mut d = diff % TWO_PI;
    if d < 0.0 {
        d += TWO_PI;
    }
    d
}
