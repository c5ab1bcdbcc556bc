//! Thresholded correlation graph.

use super::matrix::CorrelationMatrix;

/// Undirected graph as a boolean adjacency matrix. No self-loops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyGraph {
    adjacency: Vec<Vec<bool>>,
}

impl AdjacencyGraph {
    /// Edge (i, j) iff i != j and correlation(i, j) >= threshold.
    pub fn from_matrix(matrix: &CorrelationMatrix, threshold: f64) -> Self {
        let n = matrix.size();
        let adjacency = (0..n)
            .map(|i| (0..n).map(|j| i != j && matrix.get(i, j) >= threshold).collect())
            .collect();
        Self { adjacency }
    }

    /// Same vertices; edge iff distinct and not adjacent here.
    pub fn complement(&self) -> Self {
        let n = self.len();
        let adjacency = (0..n)
            .map(|i| (0..n).map(|j| i != j && !self.adjacency[i][j]).collect())
            .collect();
        Self { adjacency }
    }

    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn has_edge(&self, i: usize, j: usize) -> bool {
        self.adjacency[i][j]
    }

    pub fn degree(&self, v: usize) -> usize {
        self.adjacency[v].iter().filter(|&&e| e).count()
    }

    pub fn edge_count(&self) -> usize {
        (0..self.len()).map(|v| self.degree(v)).sum::<usize>() / 2
    }

    /// True when every pair of distinct vertices in `vertices` is adjacent.
    pub fn is_clique(&self, vertices: &[usize]) -> bool {
        vertices.iter().enumerate().all(|(k, &a)| {
            vertices[k + 1..].iter().all(|&b| a != b && self.has_edge(a, b))
        })
    }

    /// True when no pair of vertices in `vertices` is adjacent.
    pub fn is_independent(&self, vertices: &[usize]) -> bool {
        vertices.iter().enumerate().all(|(k, &a)| {
            vertices[k + 1..].iter().all(|&b| a != b && !self.has_edge(a, b))
        })
    }
}
