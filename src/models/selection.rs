//! Edge selections returned by the solver.

use crate::error::{Error, Result};
use crate::graph::{EdgeId, Graph};

/// The set of edges chosen by one integral solver solution.
///
/// Stores one flag per [`EdgeId`] together with the selection degree of
/// every vertex. Immutable once built.
///
/// # Examples
///
/// ```
/// use u_subtour::distance::DistanceMatrix;
/// use u_subtour::graph::Graph;
/// use u_subtour::models::Selection;
///
/// let graph = Graph::build(&DistanceMatrix::from_points(&[
///     (0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0),
/// ])).unwrap();
/// let sel = Selection::from_pairs(&graph, &[(0, 1), (2, 3)]).unwrap();
/// assert_eq!(sel.num_selected(), 2);
/// assert_eq!(sel.degree(0), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    selected: Vec<bool>,
    degrees: Vec<usize>,
}

impl Selection {
    /// Creates a selection from one flag per edge, in [`EdgeId`] order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Solver`] if `flags.len()` differs from the number
    /// of edges in `graph`.
    pub fn new(graph: &Graph, flags: Vec<bool>) -> Result<Self> {
        if flags.len() != graph.num_edges() {
            return Err(Error::solver(format!(
                "selection has {} flags for {} edges",
                flags.len(),
                graph.num_edges()
            )));
        }
        let mut degrees = vec![0; graph.num_vertices()];
        for (id, edge) in graph.edge_ids() {
            if flags[id.index()] {
                degrees[edge.u()] += 1;
                degrees[edge.v()] += 1;
            }
        }
        Ok(Self {
            selected: flags,
            degrees,
        })
    }

    /// Creates a selection from explicit vertex pairs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Solver`] if a pair is a self-loop or references a
    /// vertex outside the graph.
    pub fn from_pairs(graph: &Graph, pairs: &[(usize, usize)]) -> Result<Self> {
        let mut flags = vec![false; graph.num_edges()];
        for &(a, b) in pairs {
            let id = graph
                .edge_id(a, b)
                .ok_or_else(|| Error::solver(format!("no edge between {a} and {b}")))?;
            flags[id.index()] = true;
        }
        Self::new(graph, flags)
    }

    /// Returns `true` if the edge is selected.
    pub fn is_selected(&self, id: EdgeId) -> bool {
        self.selected[id.index()]
    }

    /// Value of the edge variable, 1.0 or 0.0.
    pub fn value(&self, id: EdgeId) -> f64 {
        if self.is_selected(id) {
            1.0
        } else {
            0.0
        }
    }

    /// Iterates over selected edge ids in ascending order.
    pub fn selected_edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.selected
            .iter()
            .enumerate()
            .filter(|(_, &s)| s)
            .map(|(i, _)| EdgeId(i))
    }

    /// Number of selected edges.
    pub fn num_selected(&self) -> usize {
        self.selected.iter().filter(|&&s| s).count()
    }

    /// Number of selected edges incident to `vertex`.
    pub fn degree(&self, vertex: usize) -> usize {
        self.degrees[vertex]
    }

    /// Selection degree of every vertex.
    pub fn degrees(&self) -> &[usize] {
        &self.degrees
    }

    /// First vertex whose degree differs from `expected`, with its degree.
    pub fn first_degree_mismatch(&self, expected: usize) -> Option<(usize, usize)> {
        self.degrees
            .iter()
            .copied()
            .enumerate()
            .find(|&(_, d)| d != expected)
    }

    /// Total weight of the selected edges.
    pub fn weight(&self, graph: &Graph) -> f64 {
        self.selected_edges().map(|id| graph.edge(id).weight()).sum()
    }
}
