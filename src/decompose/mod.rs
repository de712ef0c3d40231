//! Tour decomposition: splitting a selection into connected components.
//!
//! # Algorithm
//!
//! The graph restricted to selected edges is traversed with an explicit
//! stack. Roots are taken in ascending vertex order; each unvisited root
//! starts a depth-first sweep that marks every reachable vertex. The
//! vertices swept from one root form one [`Component`].
//!
//! A vertex with selection degree 0 cannot occur in a solution that honors
//! the degree-2 constraints, so it is reported as
//! [`Error::DegenerateSolution`] instead of becoming a singleton component.
//!
//! # Complexity
//!
//! O(n²) per call on a complete graph (each vertex scans its incidence list
//! once).

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::models::{Component, Selection};

/// Lazily decomposes `selection` into connected components.
///
/// Components are yielded in order of their smallest vertex. After the
/// first error the iterator is exhausted.
///
/// # Examples
///
/// ```
/// use u_subtour::distance::DistanceMatrix;
/// use u_subtour::graph::Graph;
/// use u_subtour::models::Selection;
/// use u_subtour::decompose::decompose;
///
/// let graph = Graph::build(&DistanceMatrix::from_points(&[
///     (0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0),
/// ])).unwrap();
/// let sel = Selection::from_pairs(&graph, &[(0, 1), (2, 3)]).unwrap();
/// let sizes: Vec<usize> = decompose(&graph, &sel)
///     .map(|c| c.unwrap().len())
///     .collect();
/// assert_eq!(sizes, vec![2, 2]);
/// ```
pub fn decompose<'a>(graph: &'a Graph, selection: &'a Selection) -> Components<'a> {
    Components {
        graph,
        selection,
        visited: vec![false; graph.num_vertices()],
        next_root: 0,
        stack: Vec::new(),
        failed: false,
    }
}

/// Eagerly collects all components of `selection`.
///
/// # Errors
///
/// Returns [`Error::DegenerateSolution`] if any vertex has no selected edge.
pub fn decompose_all(graph: &Graph, selection: &Selection) -> Result<Vec<Component>> {
    decompose(graph, selection).collect()
}

/// Iterator returned by [`decompose`].
#[derive(Debug)]
pub struct Components<'a> {
    graph: &'a Graph,
    selection: &'a Selection,
    visited: Vec<bool>,
    next_root: usize,
    stack: Vec<usize>,
    failed: bool,
}

impl Components<'_> {
    fn sweep(&mut self, root: usize) -> Vec<usize> {
        let mut members = Vec::new();
        self.visited[root] = true;
        self.stack.push(root);

        while let Some(v) = self.stack.pop() {
            members.push(v);
            for &id in self.graph.incident_edges(v).iter().rev() {
                if !self.selection.is_selected(id) {
                    continue;
                }
                let Some(u) = self.graph.edge(id).other(v) else {
                    continue;
                };
                if !self.visited[u] {
                    self.visited[u] = true;
                    self.stack.push(u);
                }
            }
        }
        members
    }
}

impl Iterator for Components<'_> {
    type Item = Result<Component>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let n = self.visited.len();
        while self.next_root < n && self.visited[self.next_root] {
            self.next_root += 1;
        }
        if self.next_root >= n {
            return None;
        }

        let root = self.next_root;
        if self.selection.degree(root) == 0 {
            self.failed = true;
            return Some(Err(Error::DegenerateSolution {
                vertex: root,
                degree: 0,
                iteration: 0,
            }));
        }

        Some(Ok(Component::new(self.sweep(root))))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            (0, Some(0))
        } else {
            (0, Some(self.visited.len() - self.next_root))
        }
    }
}

impl std::iter::FusedIterator for Components<'_> {}
