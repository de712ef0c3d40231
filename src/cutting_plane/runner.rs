//! The lazy subtour-elimination loop.

use std::collections::HashSet;
use std::time::Instant;

use log::{debug, info, trace, warn};

use super::{CuttingPlaneConfig, CuttingPlaneResult, IterationStats};
use crate::cuts::generate_all;
use crate::decompose::decompose_all;
use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::models::{Component, Cut, Selection, Tour};
use crate::solver::{
    CancelToken, ConstraintHandle, Direction, LinearExpr, MilpSolver, Relation, SolveStatus,
    VarDomain, VariableHandle,
};

/// Phase of the cutting-plane loop.
#[derive(Debug, Clone, PartialEq)]
pub enum LoopState {
    /// Checking budgets before handing the current model to the solver.
    Formulating,
    /// Waiting on the solver, then decomposing its answer.
    Optimizing,
    /// A single spanning cycle was accepted.
    Converged {
        /// The accepted tour.
        tour: Tour,
        /// Objective reported for it.
        objective: f64,
    },
}

/// Solves a symmetric TSP exactly by lazy subtour elimination.
///
/// The solver first sees only the degree-2 constraints. Every time its
/// integral answer splits into several cycles, one
/// [cut](crate::cuts::generate) per cycle is added and the model is
/// re-optimized. The loop stops once the answer is a single Hamiltonian
/// cycle.
///
/// # Examples
///
#[cfg_attr(feature = "microlp", doc = "```")]
#[cfg_attr(not(feature = "microlp"), doc = "```ignore")]
/// use u_subtour::distance::DistanceMatrix;
/// use u_subtour::graph::Graph;
/// use u_subtour::cutting_plane::{CuttingPlane, CuttingPlaneConfig};
/// use u_subtour::solver::MicrolpSolver;
///
/// let graph = Graph::build(&DistanceMatrix::from_points(&[
///     (0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (0.0, 1.0),
/// ])).unwrap();
/// let runner = CuttingPlane::new(&graph, CuttingPlaneConfig::default());
/// let result = runner.solve(&mut MicrolpSolver::new()).unwrap();
/// assert_eq!(result.tour.order(), &[0, 1, 2, 3]);
/// assert!((result.objective - 6.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct CuttingPlane<'g> {
    graph: &'g Graph,
    config: CuttingPlaneConfig,
}

/// Mutable bookkeeping for one run.
struct Run {
    vars: Vec<VariableHandle>,
    degree_rows: Vec<ConstraintHandle>,
    cuts: Vec<Cut>,
    cut_rows: Vec<ConstraintHandle>,
    cut_keys: HashSet<Vec<usize>>,
    history: Vec<IterationStats>,
    iterations: usize,
    last_sizes: Vec<usize>,
    start: Instant,
}

impl<'g> CuttingPlane<'g> {
    /// Creates a runner for `graph`.
    pub fn new(graph: &'g Graph, config: CuttingPlaneConfig) -> Self {
        Self { graph, config }
    }

    /// The graph being solved.
    pub fn graph(&self) -> &Graph {
        self.graph
    }

    /// The active configuration.
    pub fn config(&self) -> &CuttingPlaneConfig {
        &self.config
    }

    /// Runs the loop on a fresh `solver` until a single tour is found.
    ///
    /// # Errors
    ///
    /// See [`solve_with_cancel`](Self::solve_with_cancel).
    pub fn solve<S: MilpSolver + ?Sized>(&self, solver: &mut S) -> Result<CuttingPlaneResult> {
        self.solve_with_cancel(solver, &CancelToken::new())
    }

    /// Runs the loop, stopping early when `cancel` fires.
    ///
    /// `solver` must be empty: the runner declares one binary variable per
    /// edge and one degree constraint per vertex.
    ///
    /// # Errors
    ///
    /// - [`Error::SolverFailure`] if the solver reports infeasible or unbounded
    /// - [`Error::SolverPrecision`] if rounding non-integral values breaks a degree constraint
    /// - [`Error::DegenerateSolution`] if a vertex is left without a proper degree
    /// - [`Error::RepeatedCut`] if the solver violates a cut it was already given
    /// - [`Error::BudgetExceeded`] if an iteration or time cap is hit
    /// - [`Error::Cancelled`] if `cancel` fires
    pub fn solve_with_cancel<S: MilpSolver + ?Sized>(
        &self,
        solver: &mut S,
        cancel: &CancelToken,
    ) -> Result<CuttingPlaneResult> {
        let (vars, degree_rows) = self.formulate(solver)?;
        let mut run = Run {
            vars,
            degree_rows,
            cuts: Vec::new(),
            cut_rows: Vec::new(),
            cut_keys: HashSet::new(),
            history: Vec::new(),
            iterations: 0,
            last_sizes: Vec::new(),
            start: Instant::now(),
        };

        let mut state = LoopState::Formulating;
        loop {
            trace!("iteration {}: {}", run.iterations, state_name(&state));
            state = match state {
                LoopState::Formulating => {
                    self.check_budget(&run, cancel)?;
                    LoopState::Optimizing
                }
                LoopState::Optimizing => self.optimize_once(solver, cancel, &mut run)?,
                LoopState::Converged { tour, objective } => {
                    info!(
                        "converged after {} iterations and {} cuts: tour length {:.4}",
                        run.iterations,
                        run.cuts.len(),
                        tour.length()
                    );
                    return Ok(CuttingPlaneResult {
                        tour,
                        objective,
                        iterations: run.iterations,
                        cuts: run.cuts,
                        cut_rows: run.cut_rows,
                        degree_rows: run.degree_rows,
                        history: run.history,
                        elapsed: run.start.elapsed(),
                    });
                }
            };
        }
    }

    /// Declares edge variables, the objective, and degree-2 constraints.
    fn formulate<S: MilpSolver + ?Sized>(
        &self,
        solver: &mut S,
    ) -> Result<(Vec<VariableHandle>, Vec<ConstraintHandle>)> {
        let vars: Vec<VariableHandle> = self
            .graph
            .edges()
            .iter()
            .map(|e| solver.create_variable(VarDomain::Binary, e.weight()))
            .collect();

        let objective: Vec<_> = vars
            .iter()
            .zip(self.graph.edges())
            .map(|(&var, e)| (var, e.weight()))
            .collect();
        solver.set_objective(&objective, Direction::Minimize);

        let mut degree_rows = Vec::with_capacity(self.graph.num_vertices());
        for v in self.graph.vertices() {
            let expr: LinearExpr = self
                .graph
                .incident_edges(v)
                .iter()
                .map(|id| (vars[id.index()], 1.0))
                .collect();
            degree_rows.push(solver.add_constraint(&expr, Relation::Eq, 2.0)?);
        }

        debug!(
            "formulated {} edge variables and {} degree constraints",
            vars.len(),
            self.graph.num_vertices()
        );
        Ok((vars, degree_rows))
    }

    fn check_budget(&self, run: &Run, cancel: &CancelToken) -> Result<()> {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled {
                iterations: run.iterations,
            });
        }

        let iterations_spent = self
            .config
            .max_iterations
            .is_some_and(|max| run.iterations >= max);
        let time_spent = self
            .config
            .time_limit
            .is_some_and(|limit| run.start.elapsed() >= limit);
        if iterations_spent || time_spent {
            warn!(
                "budget exceeded after {} iterations ({} cuts)",
                run.iterations,
                run.cuts.len()
            );
            return Err(Error::BudgetExceeded {
                iterations: run.iterations,
                component_sizes: run.last_sizes.clone(),
                best: None,
            });
        }
        Ok(())
    }

    /// One solver call followed by decomposition and, if needed, cut injection.
    fn optimize_once<S: MilpSolver + ?Sized>(
        &self,
        solver: &mut S,
        cancel: &CancelToken,
        run: &mut Run,
    ) -> Result<LoopState> {
        run.iterations += 1;
        let iteration = run.iterations;

        match solver.optimize(cancel)? {
            SolveStatus::Optimal => {}
            SolveStatus::Cancelled => return Err(Error::Cancelled { iterations: iteration }),
            SolveStatus::TimeLimit => {
                let best = self.incumbent_tour(solver, &run.vars, iteration);
                warn!(
                    "solver time limit at iteration {iteration}; incumbent tour available: {}",
                    best.is_some()
                );
                return Err(Error::BudgetExceeded {
                    iterations: iteration,
                    component_sizes: run.last_sizes.clone(),
                    best: best.map(Box::new),
                });
            }
            status @ (SolveStatus::Infeasible | SolveStatus::Unbounded) => {
                return Err(Error::SolverFailure { status, iteration });
            }
        }

        let objective = solver.objective_value()?;
        let selection = self.read_selection(solver, &run.vars, iteration)?;
        let components =
            decompose_all(self.graph, &selection).map_err(|e| at_iteration(e, iteration))?;
        run.last_sizes = components.iter().map(Component::len).collect();
        debug!(
            "iteration {iteration}: objective {objective:.4}, component sizes {:?}",
            run.last_sizes
        );

        if components.len() == 1 {
            let tour = Tour::from_selection(self.graph, &selection)
                .map_err(|e| at_iteration(e, iteration))?;
            run.history.push(IterationStats {
                iteration,
                objective,
                component_sizes: run.last_sizes.clone(),
                cuts_added: 0,
            });
            return Ok(LoopState::Converged { tour, objective });
        }

        let cuts = generate_all(&components)?;
        // A repeated cut means the solver ignored a row it already holds.
        if let Some(cut) = cuts.iter().find(|c| run.cut_keys.contains(c.vertices())) {
            return Err(Error::RepeatedCut {
                iteration,
                vertices: cut.vertices().to_vec(),
            });
        }
        for cut in &cuts {
            let expr: LinearExpr = cut
                .edges()
                .iter()
                .filter_map(|&(i, j)| self.graph.edge_id(i, j))
                .map(|id| (run.vars[id.index()], 1.0))
                .collect();
            let row = solver.add_constraint(&expr, Relation::Le, cut.bound() as f64)?;
            run.cut_rows.push(row);
            run.cut_keys.insert(cut.vertices().to_vec());
        }
        run.history.push(IterationStats {
            iteration,
            objective,
            component_sizes: run.last_sizes.clone(),
            cuts_added: cuts.len(),
        });
        run.cuts.extend(cuts);
        Ok(LoopState::Formulating)
    }

    /// Reads edge values, rounding anything farther than the tolerance
    /// from 0 or 1.
    fn read_selection<S: MilpSolver + ?Sized>(
        &self,
        solver: &S,
        vars: &[VariableHandle],
        iteration: usize,
    ) -> Result<Selection> {
        let tol = self.config.integrality_tolerance;
        let mut rounded = 0;
        let mut flags = Vec::with_capacity(vars.len());
        for (&var, edge) in vars.iter().zip(self.graph.edges()) {
            let value = solver.value_of(var)?;
            if !value.is_finite() {
                return Err(Error::solver(format!(
                    "non-finite value {value} for edge {:?}",
                    edge.endpoints()
                )));
            }
            let selected = value >= 0.5;
            let target = if selected { 1.0 } else { 0.0 };
            if (value - target).abs() > tol {
                rounded += 1;
                warn!(
                    "iteration {iteration}: edge {:?} has non-integral value {value}, rounding to {target}",
                    edge.endpoints()
                );
            }
            flags.push(selected);
        }

        let selection = Selection::new(self.graph, flags)?;
        if rounded > 0 {
            if let Some((vertex, degree)) = selection.first_degree_mismatch(2) {
                return Err(Error::SolverPrecision {
                    iteration,
                    vertex,
                    degree,
                });
            }
        }
        Ok(selection)
    }

    /// Tour encoded by the solver's incumbent after a time limit, if any.
    fn incumbent_tour<S: MilpSolver + ?Sized>(
        &self,
        solver: &S,
        vars: &[VariableHandle],
        iteration: usize,
    ) -> Option<Tour> {
        if !solver.has_incumbent() {
            return None;
        }
        let selection = self.read_selection(solver, vars, iteration).ok()?;
        Tour::from_selection(self.graph, &selection).ok()
    }
}

fn state_name(state: &LoopState) -> &'static str {
    match state {
        LoopState::Formulating => "formulating",
        LoopState::Optimizing => "optimizing",
        LoopState::Converged { .. } => "converged",
    }
}

fn at_iteration(err: Error, iteration: usize) -> Error {
    match err {
        Error::DegenerateSolution { vertex, degree, .. } => Error::DegenerateSolution {
            vertex,
            degree,
            iteration,
        },
        other => other,
    }
}
