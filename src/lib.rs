//! Social-force steering for simulated pedestrians.
//!
//! Computes, once per simulation tick, a socially plausible steering force
//! for an agent moving among static obstacles and other agents, and
//! integrates it into a bounded velocity/pose update. Three subsystems do
//! the work:
//!
//! - [`shapes`] + [`inflator`]: bounding envelopes (box, circle, ellipse)
//!   and closest-point contact geometry between them, including the
//!   interpenetration fallback for overlapping bodies;
//! - [`fuzzy`]: a fuzzy classifier turning relative bearing and relative
//!   direction of motion into a continuous yielding weight;
//! - [`engine`]: per-tick force accumulation and velocity integration under
//!   kinematic plausibility limits.
//!
//! Global path planning, world maintenance and transport stay outside; the
//! crate is a pure in-process computation library consumed through
//! [`engine::SocialForceEngine::tick`] and the narrow collaborator traits in
//! [`engine`].

pub mod engine;
pub mod fuzzy;
pub mod inflator;
pub mod loaders;
pub mod shapes;
pub mod types;

pub use engine::{
    AgentState, Neighbor, NeighborProvider, SocialForceConfig, SocialForceEngine, StaticWorld,
    TickOutcome,
};
pub use fuzzy::SocialRelationClassifier;
pub use loaders::load_config;
pub use shapes::{BoundBox, BoundCircle, BoundEllipse, Shape};
pub use types::{ContactPair, ForceError, Pose2, WorldBounds};
