//! CMAP Graph - Concept graph construction and layout
//!
//! Folds concept triples into an undirected graph with one node per distinct
//! concept and one labeled edge per unordered concept pair, then positions
//! the nodes for rendering.
//!
//! Author: hephaex@gmail.com

use std::collections::{HashMap, HashSet};

use ndarray::Array2;
use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use tracing::debug;

use cmap_core::{ConceptTriple, Graph, GraphEdge, GraphNode, LayoutConfig, Position};

pub mod layout;

pub use layout::SpringLayout;

/// Trait for node placement strategies
pub trait Layout: Send + Sync {
    /// One position per node, in node insertion order
    fn positions(&self, graph: &ConceptGraph) -> Vec<Position>;
}

// ============================================================================
// Concept Graph
// ============================================================================

/// Undirected concept graph; node weights are concepts and edge weights are
/// relation labels
#[derive(Debug, Clone, Default)]
pub struct ConceptGraph {
    graph: UnGraph<String, String>,
    index: HashMap<String, NodeIndex>,
}

impl ConceptGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from triples; the first triple seen for a pair labels its edge
    pub fn from_triples(triples: &[ConceptTriple]) -> Self {
        let mut graph = Self::new();
        for triple in triples {
            graph.add_triple(triple);
        }
        debug!(
            triples = triples.len(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Built concept graph"
        );
        graph
    }

    pub fn add_triple(&mut self, triple: &ConceptTriple) {
        let a = self.add_concept(&triple.concept1);
        let b = self.add_concept(&triple.concept2);
        if self.graph.find_edge(a, b).is_none() {
            self.graph.add_edge(a, b, triple.relation.clone());
        }
    }

    fn add_concept(&mut self, concept: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(concept) {
            return idx;
        }
        let idx = self.graph.add_node(concept.to_string());
        self.index.insert(concept.to_string(), idx);
        idx
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Concepts in first-appearance order
    pub fn concepts(&self) -> impl Iterator<Item = &str> {
        self.graph.node_indices().map(|idx| self.graph[idx].as_str())
    }

    /// Relation label between two concepts, in either direction
    pub fn relation(&self, a: &str, b: &str) -> Option<&str> {
        let a = *self.index.get(a)?;
        let b = *self.index.get(b)?;
        self.graph.find_edge(a, b).map(|e| self.graph[e].as_str())
    }

    /// Symmetric 0/1 adjacency in node order
    pub fn adjacency(&self) -> Array2<f64> {
        let n = self.node_count();
        let mut matrix = Array2::zeros((n, n));
        for edge in self.graph.edge_references() {
            let (a, b) = (edge.source().index(), edge.target().index());
            matrix[[a, b]] = 1.0;
            matrix[[b, a]] = 1.0;
        }
        matrix
    }

    /// Edges as `(source, target, label)`
    ///
    /// Nodes are visited in insertion order; each node emits its edges to
    /// neighbors not yet visited, oldest edge first, with itself as source.
    pub fn edges(&self) -> Vec<(&str, &str, &str)> {
        let mut visited: HashSet<NodeIndex> = HashSet::new();
        let mut emitted: HashSet<EdgeIndex> = HashSet::new();
        let mut edges = Vec::with_capacity(self.edge_count());

        for node in self.graph.node_indices() {
            let mut incident: Vec<_> = self.graph.edges(node).collect();
            incident.sort_by_key(|e| e.id().index());

            for edge in incident {
                let other = if edge.source() == node {
                    edge.target()
                } else {
                    edge.source()
                };
                if visited.contains(&other) || !emitted.insert(edge.id()) {
                    continue;
                }
                edges.push((
                    self.graph[node].as_str(),
                    self.graph[other].as_str(),
                    edge.weight().as_str(),
                ));
            }
            visited.insert(node);
        }
        edges
    }

    /// Render with positions from `layout`
    pub fn to_graph(&self, layout: &dyn Layout) -> Graph {
        let positions = layout.positions(self);
        let nodes = self
            .concepts()
            .zip(positions)
            .map(|(concept, position)| GraphNode::new(concept, position))
            .collect();
        let edges = self
            .edges()
            .into_iter()
            .map(|(source, target, label)| GraphEdge::new(source, target, label))
            .collect();

        Graph { nodes, edges }
    }
}

/// Build and lay out the concept map of `triples`
pub fn layout_triples(triples: &[ConceptTriple], config: &LayoutConfig) -> Graph {
    ConceptGraph::from_triples(triples).to_graph(&SpringLayout::from_config(config))
}
