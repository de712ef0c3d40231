//! Complete undirected graph built from a distance matrix.

use log::debug;

use super::{Edge, EdgeId};
use crate::distance::DistanceMatrix;
use crate::error::{Error, Result};

/// Relative tolerance used when checking that `w(i, j) == w(j, i)`.
pub const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// Smallest instance the cutting-plane loop accepts.
pub const MIN_VERTICES: usize = 3;

/// An immutable complete graph with symmetric non-negative weights.
///
/// Holds one [`Edge`] per unordered vertex pair, numbered lexicographically,
/// together with per-vertex incidence lists. Weight and edge-index lookups
/// are O(1).
///
/// # Examples
///
/// ```
/// use u_subtour::distance::DistanceMatrix;
/// use u_subtour::graph::Graph;
///
/// let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (3.0, 0.0), (3.0, 4.0)]);
/// let graph = Graph::build(&dm).unwrap();
/// assert_eq!(graph.num_vertices(), 3);
/// assert_eq!(graph.num_edges(), 3);
/// assert!((graph.weight(2, 0) - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct Graph {
    n: usize,
    edges: Vec<Edge>,
    weights: DistanceMatrix,
    incident: Vec<Vec<EdgeId>>,
}

impl Graph {
    /// Builds the complete graph over `distances.size()` vertices.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInstance`] if there are fewer than 3 vertices,
    /// any off-diagonal distance is negative or non-finite, or the matrix is
    /// not symmetric within [`SYMMETRY_TOLERANCE`].
    pub fn build(distances: &DistanceMatrix) -> Result<Self> {
        let n = distances.size();
        if n < MIN_VERTICES {
            return Err(Error::invalid_instance(format!(
                "need at least {MIN_VERTICES} vertices, got {n}"
            )));
        }

        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let d = distances.get(i, j);
                if !d.is_finite() || d < 0.0 {
                    return Err(Error::invalid_instance(format!(
                        "distance ({i}, {j}) = {d} is not a finite non-negative number"
                    )));
                }
            }
        }

        if let Some((i, j)) = distances.first_asymmetry(SYMMETRY_TOLERANCE) {
            return Err(Error::invalid_instance(format!(
                "distances are not symmetric: d({i}, {j}) = {} but d({j}, {i}) = {}",
                distances.get(i, j),
                distances.get(j, i)
            )));
        }

        let mut edges = Vec::with_capacity(n * (n - 1) / 2);
        let mut weights = DistanceMatrix::new(n);
        let mut incident = vec![Vec::with_capacity(n - 1); n];
        for i in 0..n {
            for j in (i + 1)..n {
                let w = distances.get(i, j);
                let id = EdgeId(edges.len());
                edges.push(Edge::new(i, j, w));
                weights.set_symmetric(i, j, w);
                incident[i].push(id);
                incident[j].push(id);
            }
        }

        debug!("built complete graph: {n} vertices, {} edges", edges.len());
        Ok(Self {
            n,
            edges,
            weights,
            incident,
        })
    }

    /// Builds a graph from nested distance rows.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Graph::build`], plus non-square input.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        Self::build(&DistanceMatrix::from_rows(rows)?)
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.n
    }

    /// Number of edges, `n(n-1)/2`.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Iterates over vertex ids in ascending order.
    pub fn vertices(&self) -> std::ops::Range<usize> {
        0..self.n
    }

    /// All edges in [`EdgeId`] order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Iterates over `(EdgeId, &Edge)` pairs.
    pub fn edge_ids(&self) -> impl Iterator<Item = (EdgeId, &Edge)> + '_ {
        self.edges.iter().enumerate().map(|(i, e)| (EdgeId(i), e))
    }

    /// Returns the edge with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this graph.
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0]
    }

    /// Weight between two vertices (0 on the diagonal).
    pub fn weight(&self, a: usize, b: usize) -> f64 {
        self.weights.get(a, b)
    }

    /// Id of the edge joining `a` and `b`, or `None` for `a == b` or
    /// out-of-range vertices.
    pub fn edge_id(&self, a: usize, b: usize) -> Option<EdgeId> {
        if a == b || a >= self.n || b >= self.n {
            return None;
        }
        let (i, j) = if a < b { (a, b) } else { (b, a) };
        Some(EdgeId(i * (2 * self.n - i - 1) / 2 + (j - i - 1)))
    }

    /// Edges incident to `vertex`, ordered by the opposite endpoint.
    pub fn incident_edges(&self, vertex: usize) -> &[EdgeId] {
        &self.incident[vertex]
    }
}
