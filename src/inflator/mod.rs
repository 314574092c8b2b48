//! Closest-point ("inflation") queries between bounding envelopes.
//!
//! Force computation treats the points returned here as the effective
//! positions of the interacting bodies, which inflates every body to its
//! envelope. All queries degrade gracefully: a zero-length separation is
//! perturbed by a fixed nudge and overlapping shapes fall through to the
//! interpenetration fallback, so a repulsive direction always exists.
//! Malformed envelopes (NaN/Inf, non-positive sizes) fail the query instead,
//! and the engine skips that neighbor for the tick.

use glam::DVec2;

use crate::shapes::{BoundBox, Shape};
use crate::types::{
    CONTACT_NUDGE, ContactPair, ForceError, INTERPENETRATION_HALF_GAP, Pose2,
};

/// Closest boundary points between an agent's envelope and a neighbor's,
/// both re-anchored at the given poses.
///
/// The pair's `on_agent`/`on_neighbor` points sit on the respective
/// boundaries along the line connecting the bodies; overlapping bodies get
/// fallback points straddling the penetration midpoint instead, so the
/// separation is always non-zero.
pub fn closest_points(
    agent_pose: &Pose2,
    agent_shape: &Shape,
    object_pose: &Pose2,
    object_shape: &Shape,
) -> Result<ContactPair, ForceError> {
    let agent = placed(agent_shape, agent_pose)?;
    let object = placed(object_shape, object_pose)?;

    let agent_pos = agent_pose.position;
    let agent_ref = agent.interaction_center();

    // Neighbor-side point: boundary of the object's envelope facing the agent.
    let object_pt = match &object {
        Shape::Box(bb) => box_facing_point(bb, agent_pos, agent_ref),
        _ => object.boundary_toward(agent_ref),
    };
    // A missing boundary point means the centers coincide; nudge the object
    // center so the connecting line has a direction.
    let mut object_pt =
        object_pt.unwrap_or_else(|| object_pose.position + DVec2::new(CONTACT_NUDGE, -CONTACT_NUDGE));

    // The computed point can still land exactly on the agent when the agent
    // has stepped onto the boundary; same nudge, same reason.
    if (object_pt - agent_pos).length_squared() < f64::EPSILON {
        object_pt = object_pose.position + DVec2::new(CONTACT_NUDGE, -CONTACT_NUDGE);
    }

    // Agent already contains the object's boundary point: the envelopes
    // overlap and a boundary-vs-boundary pair would be ill-defined.
    if agent.contains(object_pt) {
        return Ok(interpenetration_fallback(&agent, agent_pos, &object));
    }

    match agent.boundary_toward(object_pt) {
        Some(agent_pt) => Ok(ContactPair {
            on_agent: agent_pt,
            on_neighbor: object_pt,
        }),
        None => Ok(interpenetration_fallback(&agent, agent_pos, &object)),
    }
}

/// Point-vs-shape overload: the agent is treated as a bare point (no
/// envelope of its own) against the neighbor's envelope.
pub fn closest_point_to_shape(
    origin: DVec2,
    object_pose: &Pose2,
    object_shape: &Shape,
) -> Result<DVec2, ForceError> {
    let object = placed(object_shape, object_pose)?;
    if !origin.is_finite() {
        return Err(ForceError::InvalidShape(
            "query origin is not finite".to_string(),
        ));
    }

    let pt = match &object {
        Shape::Box(bb) => box_facing_point(bb, origin, origin),
        _ => object.boundary_toward(origin),
    };
    let mut pt =
        pt.unwrap_or_else(|| object_pose.position + DVec2::new(CONTACT_NUDGE, -CONTACT_NUDGE));
    if (pt - origin).length_squared() < f64::EPSILON {
        pt = object_pose.position + DVec2::new(CONTACT_NUDGE, -CONTACT_NUDGE);
    }
    Ok(pt)
}

/// Clone the shape re-anchored at the pose, validated.
fn placed(shape: &Shape, pose: &Pose2) -> Result<Shape, ForceError> {
    if !pose.position.is_finite() || !pose.yaw.is_finite() {
        return Err(ForceError::InvalidShape("pose is not finite".to_string()));
    }
    let mut s = *shape;
    s.set_pose(pose.position, pose.yaw);
    s.validate()?;
    Ok(s)
}

/// Boundary point of a box facing a query point.
///
/// When the query point shares a coordinate range with the box along an axis
/// (the long-wall case), the ray toward the box is aimed at an anchor aligned
/// with the query point on that axis; aiming at the geometric center would
/// select a point far down the wall. Without range membership the nearest
/// vertex wins.
fn box_facing_point(bb: &BoundBox, query: DVec2, ray_origin: DVec2) -> Option<DVec2> {
    match bb.axis_range_anchor(query) {
        Some(anchor) => bb
            .intersect_ray(ray_origin, anchor)
            .or_else(|| Some(bb.closest_vertex(query))),
        None => Some(bb.closest_vertex(query)),
    }
}

/// Contact points for overlapping envelopes.
///
/// With any overlap the facing boundary points lie past each other, so no
/// boundary-vs-boundary pair can both sit on the surfaces and keep the
/// separation pointing from the object toward the agent. Instead the pair
/// straddles the midpoint of the penetration segment between the two facing
/// boundary points, with a fixed half-gap and the agent-side point toward
/// the agent. The constant distance bounds the repulsion magnitude
/// geometrically as shapes approach full overlap. When either boundary
/// point degenerates (a center inside the other shape on the query line),
/// the segment between the agent position and the object center stands in.
fn interpenetration_fallback(agent: &Shape, agent_pos: DVec2, object: &Shape) -> ContactPair {
    let object_center = object.interaction_center();
    let mut sep = agent_pos - object_center;
    if sep.length_squared() < f64::EPSILON {
        sep = DVec2::new(CONTACT_NUDGE, -CONTACT_NUDGE);
    }
    let u = sep.normalize();
    let agent_boundary = agent.boundary_toward(object_center);
    let object_boundary = object.boundary_toward(agent_pos);
    let mid = match (agent_boundary, object_boundary) {
        (Some(a), Some(n)) => 0.5 * (a + n),
        _ => 0.5 * (agent_pos + object_center),
    };
    ContactPair {
        on_agent: mid + u * INTERPENETRATION_HALF_GAP,
        on_neighbor: mid - u * INTERPENETRATION_HALF_GAP,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{BoundCircle, BoundEllipse};
    use approx::assert_abs_diff_eq;

    fn circle_agent(x: f64, y: f64, r: f64) -> (Pose2, Shape) {
        (
            Pose2::from_xy(x, y),
            Shape::Circle(BoundCircle::new(DVec2::new(x, y), r)),
        )
    }

    #[test]
    fn circle_vs_circle_points_sit_on_boundaries() {
        let (pa, sa) = circle_agent(0.0, 0.0, 0.3);
        let (pb, sb) = circle_agent(2.0, 0.0, 0.5);
        let pair = closest_points(&pa, &sa, &pb, &sb).unwrap();
        assert_abs_diff_eq!(pair.on_agent.x, 0.3, epsilon = 1e-9);
        assert_abs_diff_eq!(pair.on_neighbor.x, 1.5, epsilon = 1e-9);
        assert_abs_diff_eq!(pair.on_agent.y, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(pair.distance(), 1.2, epsilon = 1e-9);
    }

    #[test]
    fn query_is_symmetric_under_argument_swap() {
        let box_at = |x: f64, y: f64| {
            (
                Pose2::from_xy(x, y),
                Shape::Box(BoundBox::new(DVec2::new(x, y), DVec2::new(0.25, 0.25))),
            )
        };
        let ellipse_at = |x: f64, y: f64| {
            (
                Pose2::from_xy(x, y),
                Shape::Ellipse(BoundEllipse::new(1.2, 0.5, 0.0, DVec2::new(x, y))),
            )
        };
        let pairings = [
            (circle_agent(0.0, 0.0, 0.3), circle_agent(2.0, 1.0, 0.5)),
            (circle_agent(0.0, 0.0, 0.3), box_at(2.0, 0.0)),
            (ellipse_at(0.0, 0.0), circle_agent(4.0, 0.0, 0.5)),
            (ellipse_at(0.0, 0.0), box_at(3.0, 0.0)),
            (box_at(0.0, 0.0), box_at(2.0, 2.0)),
        ];
        for ((pa, sa), (pb, sb)) in pairings {
            let forward = closest_points(&pa, &sa, &pb, &sb).unwrap();
            let backward = closest_points(&pb, &sb, &pa, &sa).unwrap();
            assert!(
                forward.on_agent.distance(backward.on_neighbor) < 1e-9,
                "{sa:?} vs {sb:?}: {forward:?} / {backward:?}"
            );
            assert!(
                forward.on_neighbor.distance(backward.on_agent) < 1e-9,
                "{sa:?} vs {sb:?}: {forward:?} / {backward:?}"
            );
        }
    }

    #[test]
    fn circle_vs_box_hits_facing_edge() {
        let (pa, sa) = circle_agent(0.0, 0.0, 0.3);
        let pb = Pose2::from_xy(2.0, 0.0);
        let sb = Shape::Box(BoundBox::new(DVec2::new(2.0, 0.0), DVec2::new(0.25, 0.25)));
        let pair = closest_points(&pa, &sa, &pb, &sb).unwrap();
        assert_abs_diff_eq!(pair.on_neighbor.x, 1.75, epsilon = 1e-9);
        assert_abs_diff_eq!(pair.on_agent.x, 0.3, epsilon = 1e-9);
    }

    #[test]
    fn long_wall_contact_stays_in_front_of_the_agent() {
        let (pa, sa) = circle_agent(4.0, 0.0, 0.3);
        let pb = Pose2::from_xy(0.0, 3.0);
        let sb = Shape::Box(BoundBox::new(DVec2::new(0.0, 3.0), DVec2::new(10.0, 0.2)));
        let pair = closest_points(&pa, &sa, &pb, &sb).unwrap();
        // Contact directly above the agent, not at a wall corner.
        assert_abs_diff_eq!(pair.on_neighbor.x, 4.0, epsilon = 1e-9);
        assert_abs_diff_eq!(pair.on_neighbor.y, 2.8, epsilon = 1e-9);
    }

    #[test]
    fn corner_fallback_outside_both_ranges() {
        let origin = DVec2::new(5.0, 5.0);
        let pose = Pose2::from_xy(0.0, 0.0);
        let shape = Shape::Box(BoundBox::new(DVec2::ZERO, DVec2::new(1.0, 1.0)));
        let pt = closest_point_to_shape(origin, &pose, &shape).unwrap();
        assert_eq!(pt, DVec2::new(1.0, 1.0));
    }

    #[test]
    fn overlapping_shapes_use_the_fallback() {
        let (pa, sa) = circle_agent(0.0, 0.0, 0.5);
        let (pb, sb) = circle_agent(0.4, 0.0, 0.5);
        let pair = closest_points(&pa, &sa, &pb, &sb).unwrap();
        // Fixed gap, agent-side point toward the agent.
        assert_abs_diff_eq!(pair.distance(), 2.0 * INTERPENETRATION_HALF_GAP, epsilon = 1e-9);
        assert!(pair.on_agent.x < pair.on_neighbor.x);
    }

    #[test]
    fn shallow_overlap_anchors_on_the_penetration_segment() {
        // Circle edge at x=0.2, box face at x=0.25: 5 cm of penetration.
        let (pa, sa) = circle_agent(0.5, 0.0, 0.3);
        let pb = Pose2::from_xy(0.0, 0.0);
        let sb = Shape::Box(BoundBox::new(DVec2::ZERO, DVec2::new(0.25, 0.25)));
        let pair = closest_points(&pa, &sa, &pb, &sb).unwrap();

        // The pair sits inside the overlap band between the two boundaries
        // and keeps the separation pointing from the box toward the agent.
        assert_abs_diff_eq!(pair.on_agent.x, 0.23, epsilon = 1e-9);
        assert_abs_diff_eq!(pair.on_neighbor.x, 0.22, epsilon = 1e-9);
        assert_abs_diff_eq!(pair.on_agent.y, 0.0, epsilon = 1e-9);
        assert!(pair.on_agent.x > pair.on_neighbor.x);
        assert!(pair.on_neighbor.x >= 0.2 && pair.on_agent.x <= 0.25);
        assert_abs_diff_eq!(pair.distance(), 2.0 * INTERPENETRATION_HALF_GAP, epsilon = 1e-9);
    }

    #[test]
    fn coincident_centers_still_produce_a_direction() {
        let (pa, sa) = circle_agent(1.0, 1.0, 0.3);
        let (pb, sb) = circle_agent(1.0, 1.0, 0.3);
        let pair = closest_points(&pa, &sa, &pb, &sb).unwrap();
        assert!(pair.distance() > 0.0);
    }

    #[test]
    fn ellipse_agent_uses_its_own_boundary() {
        let pa = Pose2::from_xy(0.0, 0.0);
        let sa = Shape::Ellipse(BoundEllipse::new(1.2, 0.5, 0.0, DVec2::ZERO));
        let (pb, sb) = circle_agent(4.0, 0.0, 0.5);
        let pair = closest_points(&pa, &sa, &pb, &sb).unwrap();
        assert_abs_diff_eq!(pair.on_agent.x, 1.2, epsilon = 1e-9);
        assert_abs_diff_eq!(pair.on_neighbor.x, 3.5, epsilon = 1e-9);
    }

    #[test]
    fn invalid_shape_fails_the_query() {
        let (pa, sa) = circle_agent(0.0, 0.0, 0.3);
        let pb = Pose2::from_xy(2.0, 0.0);
        let bad = Shape::Circle(BoundCircle::new(DVec2::new(2.0, 0.0), f64::NAN));
        assert!(closest_points(&pa, &sa, &pb, &bad).is_err());
        let zero = Shape::Box(BoundBox::new(DVec2::ZERO, DVec2::ZERO));
        assert!(closest_points(&pa, &sa, &pb, &zero).is_err());
    }
}
