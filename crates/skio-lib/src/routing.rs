//! Waypoint routing across a built course graph.
//!
//! The router walks consecutive waypoint pairs, solving each segment with an
//! exact shortest-path search and stitching the results together:
//!
//! - the total distance is the sum of every segment's weight;
//! - the junction sequence lists the junction nodes of every segment in
//!   traversal order, so a junction shared by two segments appears twice;
//! - the first unreachable pair aborts the whole plan.
//!
//! Junction waypoints are checked against the graph before any segment is
//! searched. A start or finish that no track touches fails with
//! [`Error::UnknownJunction`] and never surfaces as [`Error::Unreachable`].
//!
//! # Example
//!
//! ```
//! use skio_lib::{build_graph, plan_course, Course, Track, TrackRegistry};
//!
//! let registry: TrackRegistry = [
//!     Track::new("T1", "J1", "J2", 10.0, 6.0),
//!     Track::new("T2", "J2", "J3", 4.0, 4.0),
//! ]
//! .into_iter()
//! .collect();
//! let course = Course::new("J1", ["T1"], "J3");
//!
//! let graph = build_graph(&registry, &course);
//! let plan = plan_course(&graph, &course.waypoints())?;
//! assert_eq!(plan.total_distance, 12.0);
//! # Ok::<(), skio_lib::Error>(())
//! ```

use serde::Serialize;
use tracing::{debug, info};

use crate::course::{Course, NodeId};
use crate::error::{Error, Result};
use crate::graph::{build_graph_with, Graph, GraphBuildOptions, NodeIndex};
use crate::path::find_shortest_path;
use crate::track::TrackRegistry;

/// Number of "did you mean" suggestions attached to an unknown junction.
const MAX_SUGGESTIONS: usize = 3;

/// Route between two consecutive waypoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseLeg {
    pub from: NodeId,
    pub to: NodeId,
    pub distance: f64,
    /// Every node visited on this leg, controls included.
    pub nodes: Vec<NodeId>,
}

/// Planned course returned by the router.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoursePlan {
    pub total_distance: f64,
    /// Junctions traversed in order; segment boundaries are repeated.
    pub junctions: Vec<String>,
    pub legs: Vec<CourseLeg>,
}

impl CoursePlan {
    pub fn leg_count(&self) -> usize {
        self.legs.len()
    }
}

/// Route the waypoint sequence in order over `graph`.
pub fn plan_course(graph: &Graph, waypoints: &[NodeId]) -> Result<CoursePlan> {
    if waypoints.len() < 2 {
        return Err(Error::IncompleteCourse {
            found: waypoints.len(),
        });
    }

    for waypoint in waypoints {
        if let NodeId::Junction(name) = waypoint {
            if !graph.contains(waypoint) {
                return Err(Error::UnknownJunction {
                    name: name.clone(),
                    suggestions: graph.fuzzy_junction_matches(name, MAX_SUGGESTIONS),
                });
            }
        }
    }

    let mut total_distance = 0.0;
    let mut junctions = Vec::new();
    let mut legs = Vec::with_capacity(waypoints.len() - 1);

    for pair in waypoints.windows(2) {
        let (origin, target) = (&pair[0], &pair[1]);
        let unreachable = || Error::Unreachable {
            origin: origin.clone(),
            target: target.clone(),
        };

        let (Some(start), Some(goal)) = (graph.index_of(origin), graph.index_of(target)) else {
            return Err(unreachable());
        };
        let path = find_shortest_path(graph, start, goal).ok_or_else(unreachable)?;
        debug!(from = %origin, to = %target, distance = path.weight, "solved course leg");

        total_distance += path.weight;
        let nodes = resolve_nodes(graph, &path.nodes);
        let leg_junctions = nodes.iter().filter_map(NodeId::as_junction);
        junctions.extend(leg_junctions.map(str::to_string));
        legs.push(CourseLeg {
            from: origin.clone(),
            to: target.clone(),
            distance: path.weight,
            nodes,
        });
    }

    info!(
        legs = legs.len(),
        total_distance,
        junctions = junctions.len(),
        "planned course"
    );
    Ok(CoursePlan {
        total_distance,
        junctions,
        legs,
    })
}

/// Build the graph for `course` and route it.
pub fn plan_course_from(
    registry: &TrackRegistry,
    course: &Course,
    options: &GraphBuildOptions,
) -> Result<CoursePlan> {
    let graph = build_graph_with(registry, course, options)?;
    plan_course(&graph, &course.waypoints())
}

fn resolve_nodes(graph: &Graph, path: &[NodeIndex]) -> Vec<NodeId> {
    path.iter().map(|&index| graph.node(index).clone()).collect()
}
