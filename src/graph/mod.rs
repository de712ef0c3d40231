//! Graph model for symmetric TSP instances.
//!
//! A [`Graph`] is built once from a [`DistanceMatrix`](crate::distance::DistanceMatrix)
//! and is read-only afterwards.

mod complete;
mod edge;

pub use complete::{Graph, MIN_VERTICES, SYMMETRY_TOLERANCE};
pub use edge::{Edge, EdgeId};
