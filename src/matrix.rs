//! Square pairwise-distance matrix.

/// Sentinel for pairs with no route between them.
pub const UNREACHABLE: f64 = f64::INFINITY;

/// Row-major N×N matrix of kilometre costs.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    size: usize,
    cells: Vec<f64>,
}

impl DistanceMatrix {
    /// A zero-filled matrix for `size` points.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![0.0; size * size],
        }
    }

    /// Build from explicit rows. Returns `None` if the rows are not square.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Option<Self> {
        let size = rows.len();
        if rows.iter().any(|row| row.len() != size) {
            return None;
        }
        Some(Self {
            size,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.cells[from * self.size + to]
    }

    pub fn set(&mut self, from: usize, to: usize, value: f64) {
        self.cells[from * self.size + to] = value;
    }

    pub fn is_reachable(&self, from: usize, to: usize) -> bool {
        self.get(from, to).is_finite()
    }

    /// Sum of the costs along consecutive pairs of `path`.
    pub fn path_cost(&self, path: &[usize]) -> f64 {
        path.windows(2).map(|pair| self.get(pair[0], pair[1])).sum()
    }
}
