//! Per-tick force accumulation and bounded pose integration.
//!
//! One call to [`SocialForceEngine::tick`] runs the whole pipeline for one
//! agent: sense neighbors, form a weighted repulsive force per neighbor from
//! its contact pair, add the goal attraction, then integrate velocity and
//! position under the plausibility limits. The computation is pure in its
//! inputs; a tick replayed on a frozen state produces the identical outcome.

pub mod config;
pub mod diagnostics;
pub mod world;

pub use config::SocialForceConfig;
pub use diagnostics::{DiagnosticsSink, NeighborContribution, RecordingSink};
pub use world::{Neighbor, NeighborProvider, StaticWorld};

use glam::DVec2;
use tracing::{debug, warn};

use crate::fuzzy::SocialRelationClassifier;
use crate::inflator;
use crate::shapes::Shape;
use crate::types::{ForceError, MIN_MOVING_SPEED, Pose2, angle_diff, bearing};

/// Kinematic state owned by the agent, mutated once per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentState {
    pub pose: Pose2,
    pub velocity: DVec2,
    /// Position at the start of the previous tick; basis for the next tick's
    /// instantaneous velocity estimate. Updated at the very end of a tick.
    pub last_position: DVec2,
}

impl AgentState {
    pub fn at(pose: Pose2) -> Self {
        Self {
            pose,
            velocity: DVec2::ZERO,
            last_position: pose.position,
        }
    }
}

/// What one tick produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutcome {
    pub pose: Pose2,
    pub velocity: DVec2,
    /// Goal force plus all neighbor contributions.
    pub total_force: DVec2,
    /// Signal for the external target/path collaborator; the engine never
    /// selects new targets itself.
    pub target_reached: bool,
    /// Ground covered this tick, after the bounds clamp.
    pub distance_traveled: f64,
    /// Neighbors dropped this tick because their geometry query failed.
    pub skipped_neighbors: usize,
}

pub struct SocialForceEngine {
    config: SocialForceConfig,
    classifier: SocialRelationClassifier,
}

impl SocialForceEngine {
    pub fn new(config: SocialForceConfig) -> Result<Self, ForceError> {
        config.validate()?;
        Ok(Self {
            config,
            classifier: SocialRelationClassifier::new(),
        })
    }

    pub fn config(&self) -> &SocialForceConfig {
        &self.config
    }

    /// Advance one agent by one tick of `dt` seconds.
    ///
    /// `neighbors` is this tick's world snapshot (typically from a
    /// [`NeighborProvider`]); the engine additionally applies its sensing
    /// radius and configured ignore list. A neighbor whose closest-point
    /// query fails is skipped for this tick only and counted in the outcome.
    ///
    /// Errors only on caller mistakes: a non-finite or non-positive `dt`, or
    /// an invalid agent envelope. Nothing observed during the tick is fatal.
    pub fn tick(
        &self,
        state: &mut AgentState,
        agent_shape: &Shape,
        target: DVec2,
        neighbors: &[Neighbor],
        dt: f64,
        mut diagnostics: Option<&mut dyn DiagnosticsSink>,
    ) -> Result<TickOutcome, ForceError> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(ForceError::InvalidParameter(format!(
                "tick duration must be positive and finite, got {dt}"
            )));
        }
        agent_shape.validate()?;

        let position = state.pose.position;

        // Instantaneous velocity from the position delta. An axis exceeding
        // the speed limit means the pose was disturbed externally (teleport);
        // that axis keeps its previous velocity so one disturbed tick cannot
        // inject an unbounded force later.
        let estimate = (position - state.last_position) / dt;
        state.velocity = DVec2::new(
            plausible_axis(estimate.x, state.velocity.x, self.config.max_speed, "x"),
            plausible_axis(estimate.y, state.velocity.y, self.config.max_speed, "y"),
        );

        // Direction of travel; the heading stands in when standing still.
        let alpha_dir = if state.velocity.length() > MIN_MOVING_SPEED {
            state.velocity.y.atan2(state.velocity.x)
        } else {
            state.pose.yaw
        };

        let mut neighbor_sum = DVec2::ZERO;
        let mut skipped = 0usize;
        for neighbor in neighbors {
            if self.config.ignore.iter().any(|id| *id == neighbor.id) {
                continue;
            }
            if neighbor.pose.position.distance(position) > self.config.sensing_radius {
                continue;
            }

            let contact = match inflator::closest_points(
                &state.pose,
                agent_shape,
                &neighbor.pose,
                &neighbor.shape,
            ) {
                Ok(pair) => pair,
                Err(err) => {
                    warn!(neighbor = %neighbor.id, %err, "skipping neighbor for this tick");
                    skipped += 1;
                    continue;
                }
            };

            // Separation is guaranteed non-zero by the inflator's degenerate
            // and interpenetration handling.
            let distance = contact.distance();
            let direction = contact.separation() / distance;

            let beta_dir = if neighbor.velocity.length() > MIN_MOVING_SPEED {
                neighbor.velocity.y.atan2(neighbor.velocity.x)
            } else {
                neighbor.pose.yaw
            };
            let relative_velocity_angle = angle_diff(beta_dir, alpha_dir);
            let relative_bearing = angle_diff(bearing(position, neighbor.pose.position), alpha_dir);
            let weight = self
                .classifier
                .classify(relative_velocity_angle, relative_bearing);

            let force = direction * (self.config.obstacle_weight / distance) * weight;
            if let Some(sink) = diagnostics.as_deref_mut() {
                sink.neighbor_contribution(&neighbor.id, &contact, weight, force);
            }
            neighbor_sum += force;
        }

        // Goal term: relax the velocity toward walking at the desired speed
        // straight at the target. The -velocity part damps whatever the
        // neighbor repulsions injected, so the agent neither winds up past
        // its walking speed nor orbits the target. At the target itself the
        // desired velocity is zero and the same term brakes to a stop.
        let to_target = target - position;
        let desired_velocity = if to_target.length() > f64::EPSILON {
            to_target.normalize() * self.config.desired_speed
        } else {
            DVec2::ZERO
        };
        let goal_force = (desired_velocity - state.velocity)
            * (self.config.target_weight / self.config.relaxation_time);
        let total_force = goal_force + neighbor_sum;
        if let Some(sink) = diagnostics.as_deref_mut() {
            sink.tick_total(total_force);
        }

        // Integrate and clamp. The clamp snaps to the world edge; it does not
        // reflect, and the velocity is left for the next tick's estimate to
        // correct.
        let new_velocity = state.velocity + total_force * dt;
        let bounds = self.config.world_bounds();
        let new_position = bounds.clamp(position + new_velocity * dt);
        let new_yaw = if new_velocity.length() > MIN_MOVING_SPEED {
            new_velocity.y.atan2(new_velocity.x)
        } else {
            state.pose.yaw
        };

        let target_reached = to_target.length() < self.config.target_tolerance;
        let distance_traveled = new_position.distance(position);

        state.pose = Pose2::new(new_position, new_yaw);
        state.velocity = new_velocity;
        // Last: the next tick estimates velocity against this tick's start.
        state.last_position = position;

        Ok(TickOutcome {
            pose: state.pose,
            velocity: state.velocity,
            total_force,
            target_reached,
            distance_traveled,
            skipped_neighbors: skipped,
        })
    }
}

fn plausible_axis(estimate: f64, previous: f64, max_speed: f64, axis: &str) -> f64 {
    if estimate.abs() > max_speed {
        debug!(axis, estimate, max_speed, "velocity shoot-out, keeping previous");
        previous
    } else {
        estimate
    }
}
