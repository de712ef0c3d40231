//! # u-subtour
//!
//! Exact symmetric traveling salesman solving by lazy subtour elimination.
//! The integer programming itself is delegated to a pluggable MILP solver;
//! this crate owns the cutting-plane protocol around it.
//!
//! ## Modules
//!
//! - [`graph`] — Complete weighted graph built from a distance matrix
//! - [`distance`] — Dense distance matrix
//! - [`models`] — Selection, Component, Cut, and Tour value types
//! - [`decompose`] — Connected-component decomposition of a selection
//! - [`cuts`] — Subtour-elimination cut generation
//! - [`solver`] — MILP solver contract and the `microlp` backend
//! - [`cutting_plane`] — The solve loop (Dantzig-Fulkerson-Johnson)
//! - [`report`] — Result rendering
//! - [`instance`] — Random instance generation

pub mod cutting_plane;
pub mod cuts;
pub mod decompose;
pub mod distance;
pub mod error;
pub mod graph;
pub mod instance;
pub mod models;
pub mod report;
pub mod solver;

pub use error::{Error, Result};
