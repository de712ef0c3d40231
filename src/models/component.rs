//! Connected components of a selection.

/// A maximal set of vertices connected by selected edges.
///
/// Vertices are kept sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Component {
    vertices: Vec<usize>,
}

impl Component {
    /// Creates a component, sorting and deduplicating the vertices.
    pub fn new(mut vertices: Vec<usize>) -> Self {
        vertices.sort_unstable();
        vertices.dedup();
        Self { vertices }
    }

    /// Member vertices, ascending.
    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    /// Number of member vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns `true` if the component has no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns `true` if `vertex` belongs to this component.
    pub fn contains(&self, vertex: usize) -> bool {
        self.vertices.binary_search(&vertex).is_ok()
    }

    /// Iterates over all vertex pairs `(i, j)`, `i < j`, inside the component.
    pub fn internal_pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .flat_map(move |(k, &i)| self.vertices[k + 1..].iter().map(move |&j| (i, j)))
    }
}
