//! Fuzzy social-relation classifier.
//!
//! Maps the geometry of an encounter — where a neighbor is relative to the
//! agent's direction of travel, and how the two directions of travel relate —
//! to a continuous weight in `[0, 1]` that scales the neighbor's repulsion.
//! Someone walking beside you in your direction warrants little avoidance;
//! someone approaching head-on warrants the full force. The inference is
//! deterministic and pure: a fixed rule base over trapezoidal memberships,
//! defuzzified by a weighted centroid, continuous across region boundaries
//! (a jump here would surface as a velocity jerk).

pub mod regions;

pub use regions::TrapezoidRegion;

use std::f64::consts::{FRAC_PI_4, PI};

use crate::types::wrap_angle;

/// Ramp width shared by all regions; plateaus tile the circle exactly, so
/// the ramps provide the overlap that makes transitions smooth.
const RAMP: f64 = FRAC_PI_4 / 2.0;

/// One rule of the block: location term AND direction term -> output level.
struct Rule {
    location: &'static str,
    direction: &'static str,
    weight: f64,
}

/// Fixed-rule fuzzy classifier for pairwise social yielding.
pub struct SocialRelationClassifier {
    /// "Relative location" variable: fixed sectors around the agent's
    /// direction of travel.
    location: Vec<TrapezoidRegion>,
    /// "Relative direction of motion" variable: regions recentered on the
    /// canonical agreement angles (same, crossing, opposite).
    direction: Vec<TrapezoidRegion>,
    rules: Vec<Rule>,
}

impl Default for SocialRelationClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl SocialRelationClassifier {
    pub fn new() -> Self {
        let location = vec![
            TrapezoidRegion::sector("front", -FRAC_PI_4, FRAC_PI_4, RAMP),
            TrapezoidRegion::sector("front_left", FRAC_PI_4, 3.0 * FRAC_PI_4, RAMP),
            TrapezoidRegion::sector("rear", 3.0 * FRAC_PI_4, -3.0 * FRAC_PI_4, RAMP),
            TrapezoidRegion::sector("front_right", -3.0 * FRAC_PI_4, -FRAC_PI_4, RAMP),
        ];

        // Direction terms are location-independent: the same plateau width
        // recentered on each canonical relative-motion angle.
        let mut same = TrapezoidRegion::centered("same", 0.0, FRAC_PI_4, RAMP);
        same.recenter(0.0);
        let mut cross_left = TrapezoidRegion::centered("cross_left", 0.0, FRAC_PI_4, RAMP);
        cross_left.recenter(2.0 * FRAC_PI_4);
        let mut cross_right = TrapezoidRegion::centered("cross_right", 0.0, FRAC_PI_4, RAMP);
        cross_right.recenter(-2.0 * FRAC_PI_4);
        let mut opposite = TrapezoidRegion::centered("opposite", 0.0, FRAC_PI_4, RAMP);
        opposite.recenter(PI);
        let direction = vec![same, cross_left, cross_right, opposite];

        let rules = vec![
            rule("front", "opposite", 1.0),
            rule("front", "cross_left", 0.8),
            rule("front", "cross_right", 0.8),
            rule("front", "same", 0.5),
            rule("front_left", "opposite", 0.8),
            rule("front_left", "cross_left", 0.5),
            rule("front_left", "cross_right", 0.5),
            rule("front_left", "same", 0.2),
            rule("front_right", "opposite", 0.8),
            rule("front_right", "cross_left", 0.5),
            rule("front_right", "cross_right", 0.5),
            rule("front_right", "same", 0.2),
            rule("rear", "opposite", 0.1),
            rule("rear", "cross_left", 0.1),
            rule("rear", "cross_right", 0.1),
            rule("rear", "same", 0.1),
        ];

        Self {
            location,
            direction,
            rules,
        }
    }

    /// Social-behavior weight for one neighbor pair.
    ///
    /// `relative_velocity_angle` is the angular difference between the two
    /// bodies' directions of travel; `relative_bearing` is the direction from
    /// the agent to the neighbor measured from the agent's direction of
    /// travel. Both are normalized internally, so callers may pass raw
    /// differences.
    pub fn classify(&self, relative_velocity_angle: f64, relative_bearing: f64) -> f64 {
        let bearing = wrap_angle(relative_bearing);
        let vel_angle = wrap_angle(relative_velocity_angle);

        let mut weighted = 0.0;
        let mut total = 0.0;
        for r in &self.rules {
            let mu_loc = self.membership(&self.location, r.location, bearing);
            let mu_dir = self.membership(&self.direction, r.direction, vel_angle);
            let activation = mu_loc.min(mu_dir);
            weighted += activation * r.weight;
            total += activation;
        }

        // The plateaus of each variable tile the full circle, so at least one
        // rule fires with activation 1 and the centroid is always defined.
        debug_assert!(total > 0.0);
        if total <= 0.0 {
            return 1.0;
        }
        weighted / total
    }

    fn membership(&self, var: &[TrapezoidRegion], label: &str, angle: f64) -> f64 {
        var.iter()
            .find(|r| r.label() == label)
            .map(|r| r.membership(angle))
            .unwrap_or(0.0)
    }
}

fn rule(location: &'static str, direction: &'static str, weight: f64) -> Rule {
    Rule {
        location,
        direction,
        weight,
    }
}
