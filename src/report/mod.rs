//! Result reporting for converged runs.
//!
//! A [`TourReport`] is a plain, serializable snapshot of a
//! [`CuttingPlaneResult`]: the selected edges with their weights, the tour
//! order, and the loop statistics. Its [`Display`](std::fmt::Display)
//! implementation renders a human-readable summary.

use std::fmt;

use serde::Serialize;

use crate::cutting_plane::CuttingPlaneResult;
use crate::graph::Graph;

/// One edge of the final tour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportedEdge {
    /// Smaller endpoint.
    pub from: usize,
    /// Larger endpoint.
    pub to: usize,
    /// Edge weight.
    pub weight: f64,
}

/// Serializable summary of a converged run.
///
/// # Examples
///
#[cfg_attr(feature = "microlp", doc = "```")]
#[cfg_attr(not(feature = "microlp"), doc = "```ignore")]
/// use u_subtour::distance::DistanceMatrix;
/// use u_subtour::graph::Graph;
/// use u_subtour::cutting_plane::{CuttingPlane, CuttingPlaneConfig};
/// use u_subtour::report::TourReport;
/// use u_subtour::solver::MicrolpSolver;
///
/// let graph = Graph::build(&DistanceMatrix::from_points(&[
///     (0.0, 0.0), (3.0, 0.0), (3.0, 4.0),
/// ])).unwrap();
/// let result = CuttingPlane::new(&graph, CuttingPlaneConfig::default())
///     .solve(&mut MicrolpSolver::new())
///     .unwrap();
/// let report = TourReport::new(&graph, &result);
/// assert_eq!(report.edges.len(), 3);
/// assert_eq!(report.rounded_objective, 12);
/// assert!(report.to_string().contains("Total distance: 12"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TourReport {
    /// Selected edges in ascending `(from, to)` order.
    pub edges: Vec<ReportedEdge>,
    /// Visiting order, starting at vertex 0.
    pub order: Vec<usize>,
    /// Objective reported by the solver.
    pub objective: f64,
    /// Objective rounded to the nearest integer.
    pub rounded_objective: i64,
    /// Solver calls made.
    pub iterations: usize,
    /// Subtour cuts added.
    pub cuts: usize,
}

impl TourReport {
    /// Builds a report for `result` over `graph`.
    pub fn new(graph: &Graph, result: &CuttingPlaneResult) -> Self {
        let mut edges: Vec<ReportedEdge> = result
            .tour
            .edges()
            .map(|(a, b)| {
                let (from, to) = if a < b { (a, b) } else { (b, a) };
                ReportedEdge {
                    from,
                    to,
                    weight: graph.weight(from, to),
                }
            })
            .collect();
        edges.sort_by_key(|e| (e.from, e.to));

        Self {
            edges,
            order: result.tour.order().to_vec(),
            objective: result.objective,
            rounded_objective: result.objective.round() as i64,
            iterations: result.iterations,
            cuts: result.cuts.len(),
        }
    }

    /// Renders the report as JSON.
    ///
    /// # Errors
    ///
    /// Propagates serialization failures from `serde_json`.
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for TourReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Selected edges:")?;
        for e in &self.edges {
            writeln!(f, "  {} -> {} : {}", e.from, e.to, e.weight)?;
        }
        let order: Vec<String> = self.order.iter().map(ToString::to_string).collect();
        writeln!(f, "Tour: {}", order.join(" -> "))?;
        writeln!(f, "Iterations: {}, cuts: {}", self.iterations, self.cuts)?;
        write!(f, "Total distance: {}", self.rounded_objective)
    }
}
