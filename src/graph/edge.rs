//! Edge types.

/// Dense edge index into a [`Graph`](super::Graph)'s edge list.
///
/// Edges are numbered lexicographically over `(i, j)` with `i < j`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(pub(crate) usize);

impl EdgeId {
    /// Position of the edge in the graph's edge list.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// An undirected weighted edge between two distinct vertices.
///
/// Endpoints are normalized so that `u() < v()`.
///
/// # Examples
///
/// ```
/// use u_subtour::graph::Edge;
///
/// let e = Edge::new(3, 1, 2.5);
/// assert_eq!(e.endpoints(), (1, 3));
/// assert_eq!(e.other(1), Some(3));
/// assert_eq!(e.other(2), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    u: usize,
    v: usize,
    weight: f64,
}

impl Edge {
    /// Creates an edge, ordering the endpoints.
    ///
    /// # Panics
    ///
    /// Panics if `a == b`.
    pub fn new(a: usize, b: usize, weight: f64) -> Self {
        assert_ne!(a, b, "self-loops are not edges");
        let (u, v) = if a < b { (a, b) } else { (b, a) };
        Self { u, v, weight }
    }

    /// Smaller endpoint.
    pub fn u(&self) -> usize {
        self.u
    }

    /// Larger endpoint.
    pub fn v(&self) -> usize {
        self.v
    }

    /// Both endpoints as `(smaller, larger)`.
    pub fn endpoints(&self) -> (usize, usize) {
        (self.u, self.v)
    }

    /// Edge weight (distance).
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Returns `true` if `vertex` is an endpoint.
    pub fn touches(&self, vertex: usize) -> bool {
        self.u == vertex || self.v == vertex
    }

    /// Returns the endpoint opposite to `vertex`, or `None` if `vertex`
    /// is not on this edge.
    pub fn other(&self, vertex: usize) -> Option<usize> {
        if vertex == self.u {
            Some(self.v)
        } else if vertex == self.v {
            Some(self.u)
        } else {
            None
        }
    }
}
