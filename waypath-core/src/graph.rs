//! In-memory weighted graph backed by petgraph.
//!
//! The graph is undirected: every edge is traversable in both directions with
//! the same weight. Node indices follow insertion order, which the path finder
//! relies on for deterministic tie-breaking.
//!
//! # Wire format
//!
//! ```json
//! {
//!   "nodes": [{ "id": "zeus", "name": "Zeus", "x": 400.0, "y": 300.0 }],
//!   "edges": [{ "source": "zeus", "target": "hermes", "weight": 180.0 }]
//! }
//! ```

use crate::error::{GraphError, GraphResult};
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// 2D layout coordinates owned by the presentation layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Linear interpolation from `a` to `b`; `t = 0` yields `a`, `t = 1` yields `b`.
    pub fn lerp(a: Point, b: Point, t: f64) -> Point {
        Point {
            x: a.x + (b.x - a.x) * t,
            y: a.y + (b.y - a.y) * t,
        }
    }
}

/// Resolves a node identifier to its on-screen position.
pub trait PositionLookup {
    fn position_of(&self, id: &str) -> Option<Point>;
}

impl PositionLookup for HashMap<String, Point> {
    fn position_of(&self, id: &str) -> Option<Point> {
        self.get(id).copied()
    }
}

/// A graph vertex.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub position: Point,
}

impl Node {
    pub fn new(id: impl Into<String>, name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            position: Point::new(x, y),
        }
    }
}

/// An undirected weighted edge between two node identifiers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub weight: f64,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>, weight: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight,
        }
    }
}

/// Serializable node and edge lists, as handed over by a graph supplier.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

/// Inclusive integer range used when regenerating edge weights.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WeightRange {
    pub min: u32,
    pub max: u32,
}

impl WeightRange {
    /// Build a range, swapping the bounds if they are reversed.
    pub fn new(a: u32, b: u32) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }
}

impl Default for WeightRange {
    fn default() -> Self {
        Self { min: 10, max: 309 }
    }
}

/// Undirected weighted graph keyed by string node identifiers.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    inner: UnGraph<Node, f64>,
    node_map: HashMap<String, NodeIndex>,
}

impl Graph {
    pub fn new() -> Self {
        Self {
            inner: UnGraph::new_undirected(),
            node_map: HashMap::new(),
        }
    }

    /// Build a graph from supplier data, validating ids and edge endpoints.
    pub fn from_data(data: GraphData) -> GraphResult<Self> {
        let mut graph = Self::new();
        for node in data.nodes {
            graph.add_node(node)?;
        }
        for edge in data.edges {
            graph.add_edge(edge)?;
        }
        Ok(graph)
    }

    pub fn from_json_str(json: &str) -> GraphResult<Self> {
        let data: GraphData = serde_json::from_str(json)?;
        Self::from_data(data)
    }

    /// Load a graph from a JSON file.
    pub fn load(path: &Path) -> GraphResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let graph = Self::from_json_str(&content)?;
        tracing::debug!(
            "Loaded graph from {}: {} nodes, {} edges",
            path.display(),
            graph.node_count(),
            graph.edge_count()
        );
        Ok(graph)
    }

    /// The five-node sample graph.
    pub fn pantheon() -> Self {
        let data = GraphData {
            nodes: vec![
                Node::new("afrodite", "Afrodite", 400.0, 100.0),
                Node::new("zeus", "Zeus", 400.0, 300.0),
                Node::new("atena", "Atena", 200.0, 300.0),
                Node::new("hefesto", "Hefesto", 600.0, 300.0),
                Node::new("hermes", "Hermes", 400.0, 500.0),
            ],
            edges: vec![
                Edge::new("afrodite", "zeus", 10.0),
                Edge::new("afrodite", "atena", 150.0),
                Edge::new("afrodite", "hefesto", 120.0),
                Edge::new("zeus", "atena", 320.0),
                Edge::new("zeus", "hefesto", 70.0),
                Edge::new("zeus", "hermes", 180.0),
                Edge::new("atena", "hermes", 200.0),
                Edge::new("hefesto", "hermes", 250.0),
            ],
        };
        let mut graph = Self::new();
        for node in data.nodes {
            let idx = graph.inner.add_node(node.clone());
            graph.node_map.insert(node.id, idx);
        }
        for edge in data.edges {
            let (a, b) = (graph.node_map[&edge.source], graph.node_map[&edge.target]);
            graph.inner.update_edge(a, b, edge.weight);
        }
        graph
    }

    pub fn add_node(&mut self, node: Node) -> GraphResult<()> {
        if self.node_map.contains_key(&node.id) {
            return Err(GraphError::DuplicateNode { id: node.id });
        }
        let id = node.id.clone();
        let idx = self.inner.add_node(node);
        self.node_map.insert(id, idx);
        Ok(())
    }

    /// Add an edge. Re-adding an existing pair (in either order) overwrites its weight.
    pub fn add_edge(&mut self, edge: Edge) -> GraphResult<()> {
        let (a, b) = self.resolve_endpoints(&edge)?;
        self.inner.update_edge(a, b, edge.weight);
        Ok(())
    }

    /// Replace the whole edge set.
    ///
    /// All endpoints are validated before anything is dropped, so on error the
    /// graph keeps its previous edges.
    pub fn replace_edges(&mut self, edges: Vec<Edge>) -> GraphResult<()> {
        let resolved = edges
            .iter()
            .map(|edge| self.resolve_endpoints(edge).map(|(a, b)| (a, b, edge.weight)))
            .collect::<GraphResult<Vec<_>>>()?;

        self.inner.clear_edges();
        for (a, b, weight) in resolved {
            self.inner.update_edge(a, b, weight);
        }
        tracing::debug!("Replaced edge set: {} edges", self.inner.edge_count());
        Ok(())
    }

    /// Draw a fresh integer weight for every edge, keeping endpoints intact.
    pub fn randomize_weights<R: Rng + ?Sized>(&mut self, rng: &mut R, range: WeightRange) {
        for weight in self.inner.edge_weights_mut() {
            *weight = rng.gen_range(range.min..=range.max) as f64;
        }
    }

    fn resolve_endpoints(&self, edge: &Edge) -> GraphResult<(NodeIndex, NodeIndex)> {
        let lookup = |id: &String| {
            self.node_map
                .get(id)
                .copied()
                .ok_or_else(|| GraphError::UnknownNode {
                    source_id: edge.source.clone(),
                    target_id: edge.target.clone(),
                    missing: id.clone(),
                })
        };
        Ok((lookup(&edge.source)?, lookup(&edge.target)?))
    }

    pub(crate) fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.node_map.get(id).copied()
    }

    pub(crate) fn inner(&self) -> &UnGraph<Node, f64> {
        &self.inner
    }

    pub fn contains(&self, id: &str) -> bool {
        self.node_map.contains_key(id)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index_of(id).map(|idx| &self.inner[idx])
    }

    pub fn position(&self, id: &str) -> Option<Point> {
        self.node(id).map(|n| n.position)
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.inner.node_indices().map(move |idx| &self.inner[idx])
    }

    /// Edges in insertion order, endpoints as originally supplied.
    pub fn edges(&self) -> Vec<Edge> {
        self.inner
            .edge_references()
            .map(|e| {
                Edge::new(
                    self.inner[e.source()].id.clone(),
                    self.inner[e.target()].id.clone(),
                    *e.weight(),
                )
            })
            .collect()
    }

    /// Neighbors of `id` with the connecting edge weight.
    pub fn neighbors(&self, id: &str) -> Vec<(&str, f64)> {
        let Some(idx) = self.index_of(id) else {
            return vec![];
        };
        self.inner
            .edges(idx)
            .map(|e| {
                let other = if e.source() == idx { e.target() } else { e.source() };
                (self.inner[other].id.as_str(), *e.weight())
            })
            .collect()
    }

    /// Symmetric adjacency: node id -> neighbor id -> weight. Isolated nodes map to an empty map.
    pub fn adjacency(&self) -> HashMap<String, HashMap<String, f64>> {
        let mut adjacency: HashMap<String, HashMap<String, f64>> = self
            .nodes()
            .map(|n| (n.id.clone(), HashMap::new()))
            .collect();
        for e in self.inner.edge_references() {
            let (a, b) = (&self.inner[e.source()].id, &self.inner[e.target()].id);
            if let Some(row) = adjacency.get_mut(a) {
                row.insert(b.clone(), *e.weight());
            }
            if let Some(row) = adjacency.get_mut(b) {
                row.insert(a.clone(), *e.weight());
            }
        }
        adjacency
    }

    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    pub fn to_data(&self) -> GraphData {
        GraphData {
            nodes: self.nodes().cloned().collect(),
            edges: self.edges(),
        }
    }
}

impl PositionLookup for Graph {
    fn position_of(&self, id: &str) -> Option<Point> {
        self.position(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_pantheon_shape() {
        let graph = Graph::pantheon();
        assert_eq!(graph.node_count(), 5);
        assert_eq!(graph.edge_count(), 8);
        assert_eq!(graph.position("atena"), Some(Point::new(200.0, 300.0)));
        assert_eq!(graph.node("hermes").map(|n| n.name.as_str()), Some("Hermes"));
    }

    #[test]
    fn test_nodes_keep_insertion_order() {
        let graph = Graph::pantheon();
        let ids: Vec<&str> = graph.nodes().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["afrodite", "zeus", "atena", "hefesto", "hermes"]);
    }

    #[test]
    fn test_adjacency_is_symmetric() {
        let graph = Graph::pantheon();
        let adjacency = graph.adjacency();
        for (a, row) in &adjacency {
            for (b, w) in row {
                assert_eq!(adjacency[b][a], *w, "{} -- {} not symmetric", a, b);
            }
        }
        assert_eq!(adjacency["hermes"]["zeus"], 180.0);
        assert_eq!(adjacency["zeus"]["hermes"], 180.0);
    }

    #[test]
    fn test_isolated_node_has_empty_adjacency() {
        let mut graph = Graph::new();
        graph.add_node(Node::new("solo", "Solo", 0.0, 0.0)).unwrap();
        assert!(graph.adjacency()["solo"].is_empty());
        assert!(graph.neighbors("solo").is_empty());
        assert!(graph.neighbors("missing").is_empty());
    }

    #[test]
    fn test_duplicate_node_rejected() {
        let mut graph = Graph::new();
        graph.add_node(Node::new("a", "A", 0.0, 0.0)).unwrap();
        let err = graph.add_node(Node::new("a", "Again", 1.0, 1.0)).unwrap_err();
        assert!(matches!(err, GraphError::DuplicateNode { ref id } if id == "a"));
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_edge_with_unknown_endpoint_rejected() {
        let mut graph = Graph::new();
        graph.add_node(Node::new("a", "A", 0.0, 0.0)).unwrap();
        let err = graph.add_edge(Edge::new("a", "ghost", 1.0)).unwrap_err();
        assert!(matches!(err, GraphError::UnknownNode { ref missing, .. } if missing == "ghost"));
    }

    #[test]
    fn test_readding_pair_overwrites_weight() {
        let mut graph = Graph::pantheon();
        graph.add_edge(Edge::new("hermes", "zeus", 5.0)).unwrap();
        assert_eq!(graph.edge_count(), 8);
        assert_eq!(graph.adjacency()["zeus"]["hermes"], 5.0);
    }

    #[test]
    fn test_replace_edges() {
        let mut graph = Graph::pantheon();
        graph
            .replace_edges(vec![Edge::new("afrodite", "hermes", 1.0)])
            .unwrap();
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.neighbors("afrodite"), vec![("hermes", 1.0)]);
        assert!(graph.neighbors("zeus").is_empty());
    }

    #[test]
    fn test_replace_edges_is_atomic() {
        let mut graph = Graph::pantheon();
        let before = graph.edges();
        let result = graph.replace_edges(vec![
            Edge::new("afrodite", "hermes", 1.0),
            Edge::new("afrodite", "poseidon", 1.0),
        ]);
        assert!(result.is_err());
        assert_eq!(graph.edges(), before);
    }

    #[test]
    fn test_randomize_weights_in_range() {
        let mut graph = Graph::pantheon();
        let endpoints_before: Vec<(String, String)> = graph
            .edges()
            .into_iter()
            .map(|e| (e.source, e.target))
            .collect();

        let mut rng = StdRng::seed_from_u64(42);
        graph.randomize_weights(&mut rng, WeightRange::default());

        for edge in graph.edges() {
            assert!((10.0..=309.0).contains(&edge.weight));
            assert_eq!(edge.weight.fract(), 0.0);
        }
        let endpoints_after: Vec<(String, String)> = graph
            .edges()
            .into_iter()
            .map(|e| (e.source, e.target))
            .collect();
        assert_eq!(endpoints_before, endpoints_after);
    }

    #[test]
    fn test_randomize_weights_is_reproducible() {
        let mut a = Graph::pantheon();
        let mut b = Graph::pantheon();
        a.randomize_weights(&mut StdRng::seed_from_u64(7), WeightRange::default());
        b.randomize_weights(&mut StdRng::seed_from_u64(7), WeightRange::default());
        assert_eq!(a.edges(), b.edges());
    }

    #[test]
    fn test_weight_range_orders_bounds() {
        assert_eq!(WeightRange::new(50, 5), WeightRange { min: 5, max: 50 });
    }

    #[test]
    fn test_json_roundtrip_through_data() {
        let json = r#"{
            "nodes": [
                { "id": "a", "name": "A", "x": 1.0, "y": 2.0 },
                { "id": "b", "name": "B" }
            ],
            "edges": [{ "source": "a", "target": "b", "weight": 3.5 }]
        }"#;
        let graph = Graph::from_json_str(json).unwrap();
        assert_eq!(graph.position("a"), Some(Point::new(1.0, 2.0)));
        assert_eq!(graph.position("b"), Some(Point::default()));

        let data = graph.to_data();
        assert_eq!(data.edges, vec![Edge::new("a", "b", 3.5)]);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");
        let json = serde_json::to_string(&Graph::pantheon().to_data()).unwrap();
        std::fs::write(&path, json).unwrap();

        let graph = Graph::load(&path).unwrap();
        assert_eq!(graph.edges(), Graph::pantheon().edges());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Graph::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, GraphError::Io(_)));
    }

    #[test]
    fn test_lerp() {
        let p = Point::lerp(Point::new(0.0, 0.0), Point::new(10.0, -20.0), 0.25);
        assert_eq!(p, Point::new(2.5, -5.0));
    }
}
