//! Neighbor snapshots and the provider seam to the surrounding simulation.

use glam::DVec2;

use crate::shapes::Shape;
use crate::types::Pose2;

/// One nearby body as seen at the start of a tick. Transient: rebuilt every
/// tick from a consistent world snapshot, never persisted.
#[derive(Debug, Clone)]
pub struct Neighbor {
    pub id: String,
    pub shape: Shape,
    pub pose: Pose2,
    pub velocity: DVec2,
}

impl Neighbor {
    pub fn new(id: impl Into<String>, shape: Shape, pose: Pose2, velocity: DVec2) -> Self {
        Self {
            id: id.into(),
            shape,
            pose,
            velocity,
        }
    }

    /// Static obstacle: zero velocity.
    pub fn obstacle(id: impl Into<String>, shape: Shape, pose: Pose2) -> Self {
        Self::new(id, shape, pose, DVec2::ZERO)
    }
}

/// Supplier of per-tick neighbor snapshots.
///
/// Implementations must take all agents' snapshots for a tick from the same
/// world state, before any agent's pose is advanced; otherwise two agents
/// processed in sequence see asymmetric forces.
pub trait NeighborProvider {
    fn neighbors_within(&self, pose: &Pose2, radius: f64, exclude: &[String]) -> Vec<Neighbor>;
}

/// Fixed list of bodies; the provider used by tests and demos.
#[derive(Debug, Default, Clone)]
pub struct StaticWorld {
    bodies: Vec<Neighbor>,
}

impl StaticWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, body: Neighbor) {
        self.bodies.push(body);
    }

    pub fn bodies(&self) -> &[Neighbor] {
        &self.bodies
    }
}

impl NeighborProvider for StaticWorld {
    fn neighbors_within(&self, pose: &Pose2, radius: f64, exclude: &[String]) -> Vec<Neighbor> {
        self.bodies
            .iter()
            .filter(|b| !exclude.iter().any(|id| *id == b.id))
            .filter(|b| b.pose.position.distance(pose.position) <= radius)
            .cloned()
            .collect()
    }
}
