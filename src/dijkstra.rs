//! Instrumented Dijkstra search.
//!
//! Uses a lazy-deletion heap: a node may sit in the frontier several times,
//! and entries that no longer match the best known distance are skipped when
//! popped. Alongside the path the search records one [`SearchStep`] per
//! settled node and a set of descriptive [`SearchMetrics`].
//!
//! Within a step, relaxations follow adjacency order. When two neighbours
//! end up with exactly equal candidate distances their relative order in the
//! frontier, and so in later steps, follows heap order rather than index.

use std::time::Instant;

use serde::Serialize;
use tracing::debug;

use crate::graph::Graph;
use crate::heap::MinHeap;

/// One successful edge relaxation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Relaxation {
    pub neighbor: usize,
    /// Distance before relaxation; `None` when the neighbour was unreached.
    pub old_distance: Option<f64>,
    pub new_distance: f64,
    /// `old - new`; `None` when the neighbour was first reached here.
    pub improvement: Option<f64>,
}

/// Snapshot taken after a node is settled and its edges relaxed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchStep {
    pub current_node: usize,
    pub current_distance: f64,
    pub visited_count: usize,
    pub heap_size: usize,
    pub relaxations: Vec<Relaxation>,
}

/// Counters and ratios describing a finished search.
///
/// Percentages are on a 0–100 scale, rounded to one decimal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMetrics {
    pub execution_time_ms: f64,
    pub nodes_explored: usize,
    pub total_nodes: usize,
    pub edges_considered: usize,
    pub total_edges: f64,
    pub heap_operations: usize,
    pub path_length: usize,
    pub edges_in_path: usize,
    pub avg_edges_per_node: f64,
    pub edge_utilization: f64,
    pub pruning_rate: f64,
    pub heap_efficiency: f64,
    pub graph_density: f64,
    pub time_complexity: &'static str,
    pub space_complexity: &'static str,
}

/// Outcome of a single search.
#[derive(Debug, Clone, PartialEq)]
pub struct PathResult {
    /// Settled distance to the target; infinite when unreachable.
    pub distance: f64,
    /// Node indices from start to target inclusive; empty when unreachable.
    pub path: Vec<usize>,
    pub trace: Vec<SearchStep>,
    pub metrics: SearchMetrics,
}

impl PathResult {
    pub fn is_reachable(&self) -> bool {
        !self.path.is_empty() && self.distance.is_finite()
    }
}

#[derive(Debug, Default)]
struct Counters {
    nodes_explored: usize,
    edges_considered: usize,
    heap_operations: usize,
}

/// Shortest path from `start` to `end`.
///
/// Indices must be in range; the boundary validates them. The loop exits as
/// soon as `end` is settled.
pub fn shortest_path(graph: &Graph, start: usize, end: usize) -> PathResult {
    let started = Instant::now();
    let n = graph.node_count();

    let mut distances = vec![f64::INFINITY; n];
    let mut previous: Vec<Option<usize>> = vec![None; n];
    let mut visited = vec![false; n];
    let mut visited_count = 0;
    let mut heap = MinHeap::new();
    let mut trace = Vec::new();
    let mut counters = Counters::default();

    distances[start] = 0.0;
    heap.insert(start, 0.0);
    counters.heap_operations += 1;

    while let Some((node, dist)) = heap.extract_min() {
        counters.heap_operations += 1;

        // Stale entry.
        if dist > distances[node] {
            continue;
        }
        if visited[node] {
            continue;
        }

        visited[node] = true;
        visited_count += 1;
        counters.nodes_explored += 1;

        let mut relaxations = Vec::new();
        for edge in graph.neighbours(node) {
            counters.edges_considered += 1;
            let candidate = dist + edge.weight;
            let old = distances[edge.to];

            if candidate < old {
                distances[edge.to] = candidate;
                previous[edge.to] = Some(node);
                heap.insert(edge.to, candidate);
                counters.heap_operations += 1;

                let old_distance = old.is_finite().then_some(old);
                relaxations.push(Relaxation {
                    neighbor: edge.to,
                    old_distance,
                    new_distance: candidate,
                    improvement: old_distance.map(|old| round_to(old - candidate, 2)),
                });
            }
        }

        trace.push(SearchStep {
            current_node: node,
            current_distance: dist,
            visited_count,
            heap_size: heap.len(),
            relaxations,
        });

        if node == end {
            break;
        }
    }

    let path = reconstruct(&previous, start, end);
    let distance = if path.is_empty() {
        f64::INFINITY
    } else {
        distances[end]
    };
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
    let metrics = derive_metrics(graph, &counters, path.len(), elapsed_ms);

    debug!(
        start,
        end,
        nodes_explored = counters.nodes_explored,
        heap_operations = counters.heap_operations,
        reachable = !path.is_empty(),
        "search finished"
    );

    PathResult {
        distance,
        path,
        trace,
        metrics,
    }
}

/// Walk predecessors back from `end`. Empty if the chain does not reach
/// `start`, so callers never see a partial path.
fn reconstruct(previous: &[Option<usize>], start: usize, end: usize) -> Vec<usize> {
    let mut path = vec![end];
    let mut current = end;
    while let Some(prev) = previous[current] {
        path.push(prev);
        current = prev;
    }
    path.reverse();

    if path[0] == start {
        path
    } else {
        Vec::new()
    }
}

fn derive_metrics(graph: &Graph, counters: &Counters, path_length: usize, elapsed_ms: f64) -> SearchMetrics {
    let n = graph.node_count();
    let total_edges = graph.total_edges();
    let edges_in_path = path_length.saturating_sub(1);

    let edge_utilization = if edges_in_path > 0 && counters.edges_considered > 0 {
        edges_in_path as f64 / counters.edges_considered as f64 * 100.0
    } else {
        0.0
    };
    let pruning_rate = if n > 0 {
        (n - counters.nodes_explored) as f64 / n as f64 * 100.0
    } else {
        0.0
    };
    let max_edges = n as f64 * n.saturating_sub(1) as f64 / 2.0;
    let graph_density = if max_edges > 0.0 {
        total_edges / max_edges * 100.0
    } else {
        0.0
    };

    SearchMetrics {
        execution_time_ms: round_to(elapsed_ms, 2),
        nodes_explored: counters.nodes_explored,
        total_nodes: n,
        edges_considered: counters.edges_considered,
        total_edges,
        heap_operations: counters.heap_operations,
        path_length,
        edges_in_path,
        avg_edges_per_node: if n > 0 { round_to(total_edges / n as f64, 2) } else { 0.0 },
        edge_utilization: round_to(edge_utilization, 1),
        pruning_rate: round_to(pruning_rate, 1),
        heap_efficiency: round_to(
            counters.nodes_explored as f64 / counters.heap_operations.max(1) as f64,
            2,
        ),
        graph_density: round_to(graph_density, 1),
        time_complexity: "O((V + E) log V)",
        space_complexity: "O(V)",
    }
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
