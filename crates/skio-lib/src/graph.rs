use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::course::{Course, NodeId};
use crate::error::{Error, Result};
use crate::track::{Track, TrackRegistry};

/// Minimum Jaro-Winkler similarity for a junction to be offered as a suggestion.
const FUZZY_MATCH_THRESHOLD: f64 = 0.8;

/// Dense index of a node inside a [`Graph`], assigned in registration order.
pub type NodeIndex = usize;

/// What to do when a second track produces an edge for an ordered node pair
/// that already has one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateEdgePolicy {
    /// Keep the first registered weight and discard later ones.
    #[default]
    FirstWins,
    /// Keep the smallest weight among all candidates.
    KeepMinimum,
    /// Refuse to build the graph.
    Reject,
}

/// Options controlling graph construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphBuildOptions {
    pub duplicate_edges: DuplicateEdgePolicy,
}

/// Directed edge within the routing graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub target: NodeIndex,
    pub weight: f64,
}

/// Record of a candidate edge that collided with an existing one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuplicateEdge {
    pub from: NodeId,
    pub to: NodeId,
    /// Track whose candidate edge collided.
    pub track: String,
    pub kept: f64,
    pub discarded: f64,
}

/// Simple directed weighted graph over junction and control nodes.
///
/// Read-only once built; at most one edge exists per ordered node pair.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<NodeId>,
    index: HashMap<NodeId, NodeIndex>,
    adjacency: Vec<Vec<Edge>>,
    duplicates: Vec<DuplicateEdge>,
}

impl Graph {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    pub fn index_of(&self, node: &NodeId) -> Option<NodeIndex> {
        self.index.get(node).copied()
    }

    pub fn contains(&self, node: &NodeId) -> bool {
        self.index.contains_key(node)
    }

    /// Identifier of the node at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` was not produced by this graph.
    pub fn node(&self, index: NodeIndex) -> &NodeId {
        &self.nodes[index]
    }

    pub fn nodes(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.iter()
    }

    /// Outgoing edges of a node, in the order they were added.
    pub fn neighbours(&self, index: NodeIndex) -> &[Edge] {
        self.adjacency.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Weight of the edge `from -> to`, if present.
    pub fn edge_weight(&self, from: &NodeId, to: &NodeId) -> Option<f64> {
        let from = self.index_of(from)?;
        let to = self.index_of(to)?;
        self.neighbours(from)
            .iter()
            .find(|edge| edge.target == to)
            .map(|edge| edge.weight)
    }

    /// Candidate edges that collided with an existing edge during construction.
    pub fn duplicates(&self) -> &[DuplicateEdge] {
        &self.duplicates
    }

    /// Junction names that look similar to `name`, best match first.
    pub fn fuzzy_junction_matches(&self, name: &str, limit: usize) -> Vec<String> {
        let mut scored: Vec<(f64, &str)> = self
            .nodes
            .iter()
            .filter_map(NodeId::as_junction)
            .map(|candidate| (strsim::jaro_winkler(name, candidate), candidate))
            .filter(|(score, _)| *score >= FUZZY_MATCH_THRESHOLD)
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, candidate)| candidate.to_string())
            .collect()
    }

    fn add_node(&mut self, node: NodeId) -> NodeIndex {
        if let Some(&existing) = self.index.get(&node) {
            return existing;
        }
        let index = self.nodes.len();
        self.index.insert(node.clone(), index);
        self.nodes.push(node);
        self.adjacency.push(Vec::new());
        index
    }

    fn add_edge(
        &mut self,
        from: NodeIndex,
        to: NodeIndex,
        weight: f64,
        track: &str,
        policy: DuplicateEdgePolicy,
    ) {
        let position = self.adjacency[from].iter().position(|e| e.target == to);
        let Some(position) = position else {
            self.adjacency[from].push(Edge { target: to, weight });
            return;
        };
        let existing = &mut self.adjacency[from][position];

        let (kept, discarded) = match policy {
            DuplicateEdgePolicy::KeepMinimum if weight < existing.weight => {
                let replaced = existing.weight;
                existing.weight = weight;
                (weight, replaced)
            }
            _ => (existing.weight, weight),
        };

        let duplicate = DuplicateEdge {
            from: self.nodes[from].clone(),
            to: self.nodes[to].clone(),
            track: track.to_string(),
            kept,
            discarded,
        };
        warn!(
            from = %duplicate.from,
            to = %duplicate.to,
            track,
            kept,
            discarded,
            "duplicate edge for ordered pair"
        );
        self.duplicates.push(duplicate);
    }
}

/// Build the routing graph using the historical first-wins duplicate rule.
pub fn build_graph(registry: &TrackRegistry, course: &Course) -> Graph {
    assemble(registry, course, DuplicateEdgePolicy::FirstWins)
}

/// Build the routing graph with an explicit duplicate-edge policy.
///
/// Only [`DuplicateEdgePolicy::Reject`] can fail, with the first colliding pair.
pub fn build_graph_with(
    registry: &TrackRegistry,
    course: &Course,
    options: &GraphBuildOptions,
) -> Result<Graph> {
    let graph = assemble(registry, course, options.duplicate_edges);
    if options.duplicate_edges == DuplicateEdgePolicy::Reject {
        if let Some(duplicate) = graph.duplicates.first() {
            return Err(Error::DuplicateEdge {
                from: duplicate.from.clone(),
                to: duplicate.to.clone(),
            });
        }
    }
    Ok(graph)
}

fn assemble(registry: &TrackRegistry, course: &Course, policy: DuplicateEdgePolicy) -> Graph {
    let mut graph = Graph::default();

    for track in registry.iter() {
        graph.add_node(NodeId::junction(track.source.as_str()));
        graph.add_node(NodeId::junction(track.destination.as_str()));
    }

    let mut controls = HashSet::new();
    for track_id in &course.controls {
        graph.add_node(NodeId::control(track_id.as_str()));
        if !registry.contains(track_id) {
            warn!(track = %track_id, "control references unknown track; it will be unreachable");
        }
        controls.insert(track_id.as_str());
    }

    for track in registry.iter() {
        add_track_edges(&mut graph, track, policy);
        if controls.contains(track.id.as_str()) {
            add_control_edges(&mut graph, track, policy);
        }
    }

    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        duplicates = graph.duplicates.len(),
        "built course graph"
    );
    graph
}

fn add_track_edges(graph: &mut Graph, track: &Track, policy: DuplicateEdgePolicy) {
    let source = graph.add_node(NodeId::junction(track.source.as_str()));
    let destination = graph.add_node(NodeId::junction(track.destination.as_str()));

    if source == destination {
        debug!(track = %track.id, "skipping self-loop track edges");
        return;
    }

    graph.add_edge(source, destination, track.forward_weight, &track.id, policy);
    graph.add_edge(destination, source, track.reverse_weight, &track.id, policy);
}

/// Leaving the control costs half the forward weight towards either endpoint;
/// reaching it costs half the reverse weight from either endpoint.
fn add_control_edges(graph: &mut Graph, track: &Track, policy: DuplicateEdgePolicy) {
    let control = graph.add_node(NodeId::control(track.id.as_str()));
    let source = graph.add_node(NodeId::junction(track.source.as_str()));
    let destination = graph.add_node(NodeId::junction(track.destination.as_str()));

    let mut endpoints = vec![source];
    if destination != source {
        endpoints.push(destination);
    }

    let leave = track.forward_weight / 2.0;
    let reach = track.reverse_weight / 2.0;
    for &endpoint in &endpoints {
        graph.add_edge(control, endpoint, leave, &track.id, policy);
    }
    for &endpoint in &endpoints {
        graph.add_edge(endpoint, control, reach, &track.id, policy);
    }
}
