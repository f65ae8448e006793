//! Graph construction from a distance matrix.
//!
//! Two connectivity policies are supported: a full mesh over every finite
//! pair, or a k-nearest-neighbour graph. Both produce undirected edges, and
//! the result may be disconnected.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::matrix::DistanceMatrix;

/// Neighbour count used when a KNN request does not name one.
pub const DEFAULT_K: usize = 3;

/// Rule deciding which node pairs become edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "graphType", rename_all = "lowercase")]
pub enum Connectivity {
    #[default]
    Full,
    Knn {
        #[serde(default = "default_k")]
        k: usize,
    },
}

fn default_k() -> usize {
    DEFAULT_K
}

impl Connectivity {
    /// KNN with the default neighbour count.
    pub fn knn_default() -> Self {
        Connectivity::Knn { k: DEFAULT_K }
    }
}

impl fmt::Display for Connectivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Connectivity::Full => f.write_str("Fully Connected Graph"),
            Connectivity::Knn { k } => write!(f, "K-Nearest Neighbors (k={k})"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub to: usize,
    pub weight: f64,
}

/// Adjacency lists indexed by node.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    adjacency: Vec<Vec<Edge>>,
}

impl Graph {
    /// Build a graph from `matrix` under the given connectivity policy.
    ///
    /// Only pairs with a finite matrix entry become edges. Callers guarantee
    /// at least two nodes.
    pub fn build(matrix: &DistanceMatrix, connectivity: Connectivity) -> Self {
        let n = matrix.size();
        let mut graph = Self {
            adjacency: vec![Vec::new(); n],
        };

        match connectivity {
            Connectivity::Full => {
                for i in 0..n {
                    for j in i + 1..n {
                        let weight = matrix.get(i, j);
                        if weight.is_finite() {
                            graph.connect(i, j, weight);
                        }
                    }
                }
            }
            Connectivity::Knn { k } => {
                let k = k.clamp(1, n.saturating_sub(1).max(1));
                for i in 0..n {
                    let mut candidates: Vec<(usize, f64)> = (0..n)
                        .filter(|&j| j != i)
                        .map(|j| (j, matrix.get(i, j)))
                        .filter(|(_, weight)| weight.is_finite())
                        .collect();
                    // Stable, and the candidates are already in index order,
                    // so equal distances keep the lower neighbour first.
                    candidates.sort_by(|a, b| a.1.total_cmp(&b.1));

                    for &(j, weight) in candidates.iter().take(k) {
                        graph.connect(i, j, weight);
                    }
                }
            }
        }

        graph
    }

    /// Add `a ↔ b` unless the directed edge is already present.
    fn connect(&mut self, a: usize, b: usize, weight: f64) {
        self.add_directed(a, b, weight);
        self.add_directed(b, a, weight);
    }

    fn add_directed(&mut self, from: usize, to: usize, weight: f64) {
        if self.adjacency[from].iter().all(|edge| edge.to != to) {
            self.adjacency[from].push(Edge { to, weight });
        }
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn neighbours(&self, node: usize) -> &[Edge] {
        &self.adjacency[node]
    }

    /// Weight of the directed edge `from → to`, if present.
    pub fn edge_weight(&self, from: usize, to: usize) -> Option<f64> {
        self.adjacency[from]
            .iter()
            .find(|edge| edge.to == to)
            .map(|edge| edge.weight)
    }

    /// Undirected edge count: sum of adjacency sizes halved.
    pub fn total_edges(&self) -> f64 {
        let directed: usize = self.adjacency.iter().map(Vec::len).sum();
        directed as f64 / 2.0
    }
}
