//! Hamiltonian tours.

use serde::Serialize;

use super::Selection;
use crate::error::{Error, Result};
use crate::graph::Graph;

/// A cycle visiting every vertex exactly once.
///
/// The order always starts at vertex 0 and continues toward the smaller of
/// its two tour neighbors, so equal edge sets give equal orders.
///
/// # Examples
///
/// ```
/// use u_subtour::distance::DistanceMatrix;
/// use u_subtour::graph::Graph;
/// use u_subtour::models::{Selection, Tour};
///
/// let graph = Graph::build(&DistanceMatrix::from_points(&[
///     (0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0),
/// ])).unwrap();
/// let sel = Selection::from_pairs(&graph, &[(0, 3), (3, 2), (2, 1), (1, 0)]).unwrap();
/// let tour = Tour::from_selection(&graph, &sel).unwrap();
/// assert_eq!(tour.order(), &[0, 1, 2, 3]);
/// assert!((tour.length() - 4.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tour {
    order: Vec<usize>,
    length: f64,
}

impl Tour {
    /// Reads the tour encoded by a selection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateSolution`] if some vertex does not have
    /// selection degree 2 or the selected edges form more than one cycle.
    pub fn from_selection(graph: &Graph, selection: &Selection) -> Result<Self> {
        let n = graph.num_vertices();
        if let Some((vertex, degree)) = selection.first_degree_mismatch(2) {
            return Err(Error::DegenerateSolution {
                vertex,
                degree,
                iteration: 0,
            });
        }

        let mut order = Vec::with_capacity(n);
        let mut visited = vec![false; n];
        let mut prev = 0;
        let mut current = 0;
        loop {
            order.push(current);
            visited[current] = true;
            let next = selected_neighbors(graph, selection, current)
                .filter(|&u| u != prev || order.len() == 1)
                .min();
            match next {
                Some(u) if !visited[u] => {
                    prev = current;
                    current = u;
                }
                _ => break,
            }
        }

        if let Some(vertex) = visited.iter().position(|&v| !v) {
            return Err(Error::DegenerateSolution {
                vertex,
                degree: 2,
                iteration: 0,
            });
        }

        let length = Self::cycle_length(graph, &order);
        Ok(Self { order, length })
    }

    /// Vertices in visiting order, starting at 0. The closing edge back to
    /// the first vertex is implicit.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Sum of edge weights around the cycle.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Number of vertices on the tour.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the tour has no vertices.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Consecutive vertex pairs, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.order.len();
        (0..n).map(move |k| (self.order[k], self.order[(k + 1) % n]))
    }

    /// Converts the tour back into an edge selection over `graph`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Solver`] if the tour references vertices outside `graph`.
    pub fn to_selection(&self, graph: &Graph) -> Result<Selection> {
        let pairs: Vec<_> = self.edges().collect();
        Selection::from_pairs(graph, &pairs)
    }

    fn cycle_length(graph: &Graph, order: &[usize]) -> f64 {
        let n = order.len();
        (0..n)
            .map(|k| graph.weight(order[k], order[(k + 1) % n]))
            .sum()
    }
}

fn selected_neighbors<'a>(
    graph: &'a Graph,
    selection: &'a Selection,
    v: usize,
) -> impl Iterator<Item = usize> + 'a {
    graph
        .incident_edges(v)
        .iter()
        .filter(move |&&id| selection.is_selected(id))
        .filter_map(move |&id| graph.edge(id).other(v))
}
