//! Subtour-elimination cuts.

use super::{Component, Selection};
use crate::graph::Graph;

/// A subtour-elimination constraint `Σ x_ij ≤ |S| − 1` over the edges with
/// both endpoints in vertex set `S`.
///
/// Edges are stored as vertex pairs so a cut does not depend on any one
/// graph's edge numbering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cut {
    vertices: Vec<usize>,
    edges: Vec<(usize, usize)>,
    bound: usize,
}

impl Cut {
    pub(crate) fn from_component(component: &Component) -> Self {
        Self {
            vertices: component.vertices().to_vec(),
            edges: component.internal_pairs().collect(),
            bound: component.len() - 1,
        }
    }

    /// Vertex set `S`, ascending.
    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    /// Internal edges `(i, j)`, `i < j`, in lexicographic order.
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Right-hand side, `|S| − 1`.
    pub fn bound(&self) -> usize {
        self.bound
    }

    /// Number of selected internal edges.
    ///
    /// Pairs that are not edges of `graph` are ignored.
    pub fn lhs(&self, graph: &Graph, selection: &Selection) -> usize {
        self.edges
            .iter()
            .filter_map(|&(i, j)| graph.edge_id(i, j))
            .filter(|&id| selection.is_selected(id))
            .count()
    }

    /// Returns `true` if `selection` puts more than `bound` edges inside `S`.
    pub fn is_violated_by(&self, graph: &Graph, selection: &Selection) -> bool {
        self.lhs(graph, selection) > self.bound
    }
}
