//! Optional read-only view into one tick's force composition.
//!
//! A visualization or logging collaborator attaches a sink to a tick call
//! and receives every per-neighbor contact pair, weight and force plus the
//! total. The engine computes identically whether or not a sink is attached;
//! this replaces the debug-print conditionals of older social-force code
//! with a single always-compiled path.

use glam::DVec2;

use crate::types::ContactPair;

pub trait DiagnosticsSink {
    /// Called once per contributing neighbor.
    fn neighbor_contribution(&mut self, id: &str, contact: &ContactPair, weight: f64, force: DVec2);

    /// Called once per tick with the summed force (goal term included).
    fn tick_total(&mut self, total_force: DVec2);
}

/// Per-neighbor record captured by [`RecordingSink`].
#[derive(Debug, Clone)]
pub struct NeighborContribution {
    pub id: String,
    pub contact: ContactPair,
    pub weight: f64,
    pub force: DVec2,
}

/// Sink that keeps everything it is given; used by tests and simple viewers.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub contributions: Vec<NeighborContribution>,
    pub totals: Vec<DVec2>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.contributions.clear();
        self.totals.clear();
    }
}

impl DiagnosticsSink for RecordingSink {
    fn neighbor_contribution(
        &mut self,
        id: &str,
        contact: &ContactPair,
        weight: f64,
        force: DVec2,
    ) {
        self.contributions.push(NeighborContribution {
            id: id.to_string(),
            contact: *contact,
            weight,
            force,
        });
    }

    fn tick_total(&mut self, total_force: DVec2) {
        self.totals.push(total_force);
    }
}
