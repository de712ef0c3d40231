//! [`MilpSolver`] backend over the pure-Rust `microlp` crate.
//!
//! `microlp` fixes the objective at variable creation, so this adapter keeps
//! its own copy of the model and rebuilds a `microlp::Problem` on every
//! [`optimize`](MilpSolver::optimize) call. Constraints therefore persist
//! exactly as the contract requires.

use std::collections::BTreeMap;

use log::{debug, trace};
use microlp::{ComparisonOp, OptimizationDirection, Problem};

use super::{
    CancelToken, ConstraintHandle, Direction, LinearExpr, MilpSolver, Relation, SolveStatus,
    VarDomain, VariableHandle,
};
use crate::error::{Error, Result};

#[derive(Debug, Clone)]
struct Row {
    terms: Vec<(usize, f64)>,
    relation: Relation,
    bound: f64,
}

#[derive(Debug, Clone)]
struct Solved {
    values: Vec<f64>,
    objective: f64,
}

/// Branch-and-bound backend provided by `microlp`.
///
/// # Examples
///
/// ```
/// use u_subtour::solver::{
///     CancelToken, LinearExpr, MicrolpSolver, MilpSolver, Relation, SolveStatus, VarDomain,
/// };
///
/// let mut s = MicrolpSolver::new();
/// let x = s.create_variable(VarDomain::Binary, 3.0);
/// let y = s.create_variable(VarDomain::Binary, 2.0);
/// let expr: LinearExpr = [(x, 1.0), (y, 1.0)].into_iter().collect();
/// s.add_constraint(&expr, Relation::Ge, 1.0).unwrap();
///
/// assert_eq!(s.optimize(&CancelToken::new()).unwrap(), SolveStatus::Optimal);
/// assert!((s.objective_value().unwrap() - 2.0).abs() < 1e-9);
/// assert!(s.value_of(y).unwrap() > 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct MicrolpSolver {
    direction: Direction,
    domains: Vec<VarDomain>,
    objective: Vec<f64>,
    rows: Vec<Row>,
    solved: Option<Solved>,
}

impl MicrolpSolver {
    /// Creates an empty minimization model.
    pub fn new() -> Self {
        Self {
            direction: Direction::Minimize,
            domains: Vec::new(),
            objective: Vec::new(),
            rows: Vec::new(),
            solved: None,
        }
    }

    /// Number of declared variables.
    pub fn num_variables(&self) -> usize {
        self.domains.len()
    }

    /// Number of constraints added so far.
    pub fn num_constraints(&self) -> usize {
        self.rows.len()
    }

    fn check(&self, var: VariableHandle) -> Result<usize> {
        if var.index() < self.domains.len() {
            Ok(var.index())
        } else {
            Err(Error::solver(format!("unknown variable {}", var.index())))
        }
    }

    fn build_problem(&self) -> (Problem, Vec<microlp::Variable>) {
        let direction = match self.direction {
            Direction::Minimize => OptimizationDirection::Minimize,
            Direction::Maximize => OptimizationDirection::Maximize,
        };
        let mut problem = Problem::new(direction);
        let vars: Vec<_> = self
            .domains
            .iter()
            .zip(&self.objective)
            .map(|(domain, &obj)| match *domain {
                VarDomain::Binary => problem.add_binary_var(obj),
                VarDomain::Continuous { lower, upper } => problem.add_var(obj, (lower, upper)),
            })
            .collect();

        for row in &self.rows {
            let op = match row.relation {
                Relation::Le => ComparisonOp::Le,
                Relation::Ge => ComparisonOp::Ge,
                Relation::Eq => ComparisonOp::Eq,
            };
            let expr: Vec<(microlp::Variable, f64)> =
                row.terms.iter().map(|&(i, c)| (vars[i], c)).collect();
            problem.add_constraint(expr, op, row.bound);
        }
        (problem, vars)
    }
}

impl Default for MicrolpSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl MilpSolver for MicrolpSolver {
    fn create_variable(&mut self, domain: VarDomain, objective: f64) -> VariableHandle {
        let handle = VariableHandle::new(self.domains.len());
        self.domains.push(domain);
        self.objective.push(objective);
        self.solved = None;
        handle
    }

    fn set_objective(&mut self, coefficients: &[(VariableHandle, f64)], direction: Direction) {
        self.direction = direction;
        self.objective.iter_mut().for_each(|c| *c = 0.0);
        for &(var, coeff) in coefficients {
            if let Some(slot) = self.objective.get_mut(var.index()) {
                *slot += coeff;
            }
        }
        self.solved = None;
    }

    fn add_constraint(
        &mut self,
        expr: &LinearExpr,
        relation: Relation,
        bound: f64,
    ) -> Result<ConstraintHandle> {
        let mut merged = BTreeMap::new();
        for &(var, coeff) in expr.terms() {
            *merged.entry(self.check(var)?).or_insert(0.0) += coeff;
        }
        let handle = ConstraintHandle::new(self.rows.len());
        self.rows.push(Row {
            terms: merged.into_iter().collect(),
            relation,
            bound,
        });
        self.solved = None;
        Ok(handle)
    }

    fn optimize(&mut self, cancel: &CancelToken) -> Result<SolveStatus> {
        self.solved = None;
        if cancel.is_cancelled() {
            return Ok(SolveStatus::Cancelled);
        }

        let (problem, vars) = self.build_problem();
        debug!(
            "microlp: solving {} variables, {} constraints",
            vars.len(),
            self.rows.len()
        );
        match problem.solve() {
            Ok(solution) => {
                let values = vars.iter().map(|&v| solution[v]).collect();
                let objective = solution.objective();
                trace!("microlp: optimal objective {objective}");
                self.solved = Some(Solved { values, objective });
                Ok(SolveStatus::Optimal)
            }
            Err(microlp::Error::Infeasible) => Ok(SolveStatus::Infeasible),
            Err(microlp::Error::Unbounded) => Ok(SolveStatus::Unbounded),
            Err(microlp::Error::InternalError(msg)) => Err(Error::solver(msg)),
        }
    }

    fn value_of(&self, var: VariableHandle) -> Result<f64> {
        let solved = self
            .solved
            .as_ref()
            .ok_or_else(|| Error::solver("no solution available"))?;
        Ok(solved.values[self.check(var)?])
    }

    fn objective_value(&self) -> Result<f64> {
        self.solved
            .as_ref()
            .map(|s| s.objective)
            .ok_or_else(|| Error::solver("no solution available"))
    }
}
