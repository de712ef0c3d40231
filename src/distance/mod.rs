//! Distance matrices.
//!
//! Provides a dense distance matrix used to build [`Graph`](crate::graph::Graph)
//! instances.

mod matrix;

pub use matrix::DistanceMatrix;
