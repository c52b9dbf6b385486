//! Single-source shortest path over non-negative weights.
//!
//! Uses the simple O(V^2) selection scan: the graphs this crate targets are
//! small, and scanning in node insertion order with a strict `<` gives a
//! deterministic tie-break (the earliest-inserted node wins).

use crate::error::PathError;
use crate::graph::Graph;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};

/// A shortest path from source to target (both inclusive) and its total weight.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathResult {
    pub path: Vec<String>,
    pub distance: f64,
}

impl PathResult {
    /// Number of edges traversed.
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    pub fn source(&self) -> Option<&str> {
        self.path.first().map(String::as_str)
    }

    pub fn target(&self) -> Option<&str> {
        self.path.last().map(String::as_str)
    }

    /// Whether `a` and `b` are consecutive on the path, in either order.
    pub fn contains_edge(&self, a: &str, b: &str) -> bool {
        contains_edge(&self.path, a, b)
    }
}

/// Whether `a` and `b` are consecutive somewhere in `path`, in either order.
pub fn contains_edge(path: &[String], a: &str, b: &str) -> bool {
    path.windows(2)
        .any(|w| (w[0] == a && w[1] == b) || (w[0] == b && w[1] == a))
}

/// Find the minimum-weight path between `source` and `target`.
///
/// # Errors
///
/// * [`PathError::InvalidEndpoint`] if either id is not in the graph
/// * [`PathError::InvalidWeight`] if any edge weight is negative or not finite
/// * [`PathError::NoPathExists`] if `target` is unreachable from `source`
pub fn find_path(graph: &Graph, source: &str, target: &str) -> Result<PathResult, PathError> {
    let start = graph
        .index_of(source)
        .ok_or_else(|| PathError::InvalidEndpoint { id: source.to_string() })?;
    let end = graph
        .index_of(target)
        .ok_or_else(|| PathError::InvalidEndpoint { id: target.to_string() })?;

    let inner = graph.inner();

    for edge in inner.edge_references() {
        let weight = *edge.weight();
        if !weight.is_finite() || weight < 0.0 {
            return Err(PathError::InvalidWeight {
                source_id: inner[edge.source()].id.clone(),
                target_id: inner[edge.target()].id.clone(),
                weight,
            });
        }
    }

    if start == end {
        return Ok(PathResult {
            path: vec![source.to_string()],
            distance: 0.0,
        });
    }

    let n = inner.node_count();
    let mut distance = vec![f64::INFINITY; n];
    let mut previous: Vec<Option<NodeIndex>> = vec![None; n];
    let mut settled = vec![false; n];
    distance[start.index()] = 0.0;

    let mut settled_count = 0usize;
    loop {
        // Scan unsettled nodes in insertion order; strict `<` keeps the first minimum.
        let mut current: Option<NodeIndex> = None;
        let mut min_distance = f64::INFINITY;
        for idx in inner.node_indices() {
            if !settled[idx.index()] && distance[idx.index()] < min_distance {
                min_distance = distance[idx.index()];
                current = Some(idx);
            }
        }

        let Some(current) = current else {
            break;
        };
        if current == end {
            break;
        }

        settled[current.index()] = true;
        settled_count += 1;

        for edge in inner.edges(current) {
            let neighbor = if edge.source() == current {
                edge.target()
            } else {
                edge.source()
            };
            if settled[neighbor.index()] {
                continue;
            }
            let candidate = distance[current.index()] + *edge.weight();
            if candidate < distance[neighbor.index()] {
                distance[neighbor.index()] = candidate;
                previous[neighbor.index()] = Some(current);
            }
        }
    }

    tracing::debug!(
        "Settled {} of {} nodes searching {} -> {}",
        settled_count,
        n,
        source,
        target
    );

    let mut path = vec![inner[end].id.clone()];
    let mut cursor = end;
    while let Some(p) = previous[cursor.index()] {
        path.push(inner[p].id.clone());
        cursor = p;
    }

    if cursor != start {
        return Err(PathError::NoPathExists {
            source_id: source.to_string(),
            target_id: target.to_string(),
        });
    }

    path.reverse();
    let result = PathResult {
        path,
        distance: distance[end.index()],
    };
    tracing::debug!("Shortest path {:?} (distance {})", result.path, result.distance);
    Ok(result)
}

impl Graph {
    /// Shortest path between two nodes of this graph. See [`find_path`].
    pub fn shortest_path(&self, source: &str, target: &str) -> Result<PathResult, PathError> {
        find_path(self, source, target)
    }
}
