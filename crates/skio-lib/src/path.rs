use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::graph::{Graph, NodeIndex};

/// Lowest-cost path between two nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPath {
    /// Visited nodes from start to goal, both inclusive.
    pub nodes: Vec<NodeIndex>,
    pub weight: f64,
}

/// Run Dijkstra's algorithm from `start` to `goal`.
///
/// Edge weights must be non-negative. Among equal-cost frontier entries the
/// node registered first is expanded first, and a parent is only replaced by a
/// strictly cheaper one, so identical graphs always yield identical paths.
pub fn find_shortest_path(
    graph: &Graph,
    start: NodeIndex,
    goal: NodeIndex,
) -> Option<ShortestPath> {
    if start == goal {
        return Some(ShortestPath {
            nodes: vec![start],
            weight: 0.0,
        });
    }

    let node_count = graph.node_count();
    if start >= node_count || goal >= node_count {
        return None;
    }

    let mut distances = vec![f64::INFINITY; node_count];
    let mut parents: Vec<Option<NodeIndex>> = vec![None; node_count];
    let mut queue = BinaryHeap::new();

    distances[start] = 0.0;
    queue.push(QueueEntry::new(start, 0.0));

    while let Some(entry) = queue.pop() {
        let current_distance = distances[entry.node];
        if entry.cost.0 > current_distance {
            continue;
        }

        if entry.node == goal {
            return Some(ShortestPath {
                nodes: reconstruct_path(&parents, start, goal),
                weight: current_distance,
            });
        }

        for edge in graph.neighbours(entry.node) {
            let next = edge.target;
            let next_cost = current_distance + edge.weight;
            if next_cost < distances[next] {
                distances[next] = next_cost;
                parents[next] = Some(entry.node);
                queue.push(QueueEntry::new(next, next_cost));
            }
        }
    }

    None
}

fn reconstruct_path(
    parents: &[Option<NodeIndex>],
    start: NodeIndex,
    goal: NodeIndex,
) -> Vec<NodeIndex> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(node) = current {
        path.push(node);
        if node == start {
            break;
        }
        current = parents[node];
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: NodeIndex,
    cost: FloatOrd,
}

impl QueueEntry {
    fn new(node: NodeIndex, cost: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::{Course, NodeId};
    use crate::graph::build_graph;
    use crate::track::{Track, TrackRegistry};

    fn diamond() -> Graph {
        // J1 -> J2 -> J4 costs 2, J1 -> J3 -> J4 costs 2, J1 -> J4 costs 5.
        let registry: TrackRegistry = [
            Track::new("T1", "J1", "J2", 1.0, 1.0),
            Track::new("T2", "J2", "J4", 1.0, 1.0),
            Track::new("T3", "J1", "J3", 1.0, 1.0),
            Track::new("T4", "J3", "J4", 1.0, 1.0),
            Track::new("T5", "J1", "J4", 5.0, 5.0),
        ]
        .into_iter()
        .collect();
        build_graph(&registry, &Course::new("J1", Vec::<String>::new(), "J4"))
    }

    #[test]
    fn prefers_cheaper_multi_hop_route() {
        let graph = diamond();
        let start = graph.index_of(&NodeId::junction("J1")).unwrap();
        let goal = graph.index_of(&NodeId::junction("J4")).unwrap();

        let path = find_shortest_path(&graph, start, goal).expect("path exists");
        assert_eq!(path.weight, 2.0);
        assert_eq!(path.nodes.len(), 3);
    }

    #[test]
    fn equal_cost_ties_resolve_the_same_way_every_time() {
        let graph = diamond();
        let start = graph.index_of(&NodeId::junction("J1")).unwrap();
        let goal = graph.index_of(&NodeId::junction("J4")).unwrap();

        let first = find_shortest_path(&graph, start, goal).unwrap();
        for _ in 0..10 {
            assert_eq!(find_shortest_path(&graph, start, goal).unwrap(), first);
        }
        // J2 is registered before J3, so it wins the tie.
        assert_eq!(graph.node(first.nodes[1]), &NodeId::junction("J2"));
    }

    #[test]
    fn start_equals_goal_is_a_zero_cost_path() {
        let graph = diamond();
        let start = graph.index_of(&NodeId::junction("J1")).unwrap();
        let path = find_shortest_path(&graph, start, start).unwrap();
        assert_eq!(path.nodes, vec![start]);
        assert_eq!(path.weight, 0.0);
    }

    #[test]
    fn disconnected_goal_has_no_path() {
        let registry: TrackRegistry = [
            Track::new("T1", "J1", "J2", 1.0, 1.0),
            Track::new("T2", "J3", "J4", 1.0, 1.0),
        ]
        .into_iter()
        .collect();
        let graph = build_graph(&registry, &Course::default());
        let start = graph.index_of(&NodeId::junction("J1")).unwrap();
        let goal = graph.index_of(&NodeId::junction("J4")).unwrap();
        assert!(find_shortest_path(&graph, start, goal).is_none());
    }
}
