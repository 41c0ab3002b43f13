//! Continuous relaxation of an [`IntegerProgram`].
//!
//! Solved with a dense two-phase primal simplex over box-shifted variables
//! (`x = lower + y`, `0 <= y <= upper - lower`). Bland's rule selects both the
//! entering and the leaving column, so the method cannot cycle. Problems here
//! have a handful of variables and a few rows, so the dense tableau is cheap.
//!
//! The tableau is kept in 28-digit decimal arithmetic. Division still rounds,
//! so entries below [`PIVOT_EPSILON`] count as zero, but the rounding noise is
//! many orders of magnitude below any gap between objective coefficients that
//! a catalog can produce.

use rust_decimal::Decimal;

use crate::error::SolveError;
use crate::program::{dot, IntegerProgram};

/// Pivot elements and reduced costs at or below this are treated as zero.
pub const PIVOT_EPSILON: Decimal = Decimal::from_parts(1, 0, 0, false, 18);

/// Phase one residual above which the relaxation is declared infeasible.
const FEASIBILITY_EPSILON: Decimal = Decimal::from_parts(1, 0, 0, false, 15);

/// Outcome of solving a relaxation.
#[derive(Debug, Clone, PartialEq)]
pub enum LpOutcome {
    /// Optimal relaxed point; `objective` is in the program's own sense.
    Optimal {
        values: Vec<Decimal>,
        objective: Decimal,
    },
    Infeasible,
    Unbounded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowKind {
    Le,
    Ge,
    Eq,
}

impl RowKind {
    fn flipped(self) -> Self {
        match self {
            RowKind::Le => RowKind::Ge,
            RowKind::Ge => RowKind::Le,
            RowKind::Eq => RowKind::Eq,
        }
    }
}

struct Row {
    coefficients: Vec<Decimal>,
    kind: RowKind,
    rhs: Decimal,
}

fn overflow(context: &str) -> SolveError {
    SolveError::Numerical(format!("decimal overflow while {context}"))
}

/// Solves the relaxation of `program` with variable bounds replaced by
/// `lower`/`upper` (as used by branch-and-bound nodes).
///
/// # Errors
///
/// Returns [`SolveError::Numerical`] if the simplex exceeds its iteration cap
/// or a tableau entry leaves the decimal range.
///
/// # Example
///
/// ```
/// use alloyforge_solver::simplex::{solve_relaxation, LpOutcome};
/// use alloyforge_solver::IntegerProgram;
/// use rust_decimal::Decimal;
///
/// let mut program = IntegerProgram::maximize();
/// let x = program.add_variable("x", 0, 10);
/// program.set_objective_coefficient(x, Decimal::ONE);
/// program.add_constraint("half", vec![Decimal::TWO], None, Some(Decimal::new(7, 0)));
///
/// match solve_relaxation(&program, &[0], &[10]).unwrap() {
///     LpOutcome::Optimal { values, objective } => {
///         assert_eq!(values[0], Decimal::new(35, 1));
///         assert_eq!(objective, Decimal::new(35, 1));
///     }
///     other => panic!("unexpected {other:?}"),
/// }
/// ```
pub fn solve_relaxation(
    program: &IntegerProgram,
    lower: &[i64],
    upper: &[i64],
) -> Result<LpOutcome, SolveError> {
    let n = program.variable_count();
    if lower.len() != n || upper.len() != n {
        return Err(SolveError::InvalidProgram(format!(
            "expected {n} bounds, got {} lower and {} upper",
            lower.len(),
            upper.len()
        )));
    }
    if lower.iter().zip(upper).any(|(l, u)| u < l) {
        return Ok(LpOutcome::Infeasible);
    }

    let lower: Vec<Decimal> = lower.iter().map(|&v| Decimal::from(v)).collect();
    let upper: Vec<Decimal> = upper.iter().map(|&v| Decimal::from(v)).collect();
    let rows = standard_rows(program, &lower, &upper)?;
    let mut tableau = Tableau::new(n, &rows);

    if tableau.has_artificials() {
        let phase_one: Vec<Decimal> = (0..tableau.columns)
            .map(|j| {
                if tableau.artificial[j] {
                    Decimal::NEGATIVE_ONE
                } else {
                    Decimal::ZERO
                }
            })
            .collect();
        tableau.optimize(&phase_one, |_| true)?;
        if tableau.artificial_residual()? > FEASIBILITY_EPSILON {
            return Ok(LpOutcome::Infeasible);
        }
        tableau.drive_out_artificials()?;
    }

    // Scaled so the largest coefficient is one and reduced costs stay
    // comparable to PIVOT_EPSILON whatever the magnitude of the objective.
    let objective = program.maximization_objective();
    let scale = objective
        .iter()
        .map(Decimal::abs)
        .max()
        .filter(|s| !s.is_zero())
        .unwrap_or(Decimal::ONE);
    let mut phase_two = vec![Decimal::ZERO; tableau.columns];
    for (cost, c) in phase_two.iter_mut().zip(&objective) {
        *cost = c.checked_div(scale).ok_or_else(|| overflow("scaling the objective"))?;
    }
    let artificial = tableau.artificial.clone();
    if !tableau.optimize(&phase_two, |j| !artificial[j])? {
        return Ok(LpOutcome::Unbounded);
    }

    let mut values = lower;
    for (i, &column) in tableau.basis.iter().enumerate() {
        if column < n {
            values[column] = values[column]
                .checked_add(tableau.rhs(i))
                .ok_or_else(|| overflow("reading the basis"))?;
        }
    }
    let objective =
        dot(program.objective(), &values).ok_or_else(|| overflow("evaluating the objective"))?;
    Ok(LpOutcome::Optimal { values, objective })
}

/// Builds shifted rows with a non-negative right-hand side.
fn standard_rows(
    program: &IntegerProgram,
    lower: &[Decimal],
    upper: &[Decimal],
) -> Result<Vec<Row>, SolveError> {
    let n = program.variable_count();
    let mut rows = Vec::with_capacity(2 * program.constraints().len() + n);
    let shifted = |bound: Decimal, shift: Decimal| {
        bound
            .checked_sub(shift)
            .ok_or_else(|| overflow("shifting a row"))
    };

    for constraint in program.constraints() {
        let shift = constraint
            .activity(lower)
            .ok_or_else(|| overflow("shifting a row"))?;
        match (constraint.lower, constraint.upper) {
            (Some(l), Some(u)) if l == u => {
                rows.push(row(&constraint.coefficients, RowKind::Eq, shifted(l, shift)?));
            }
            (l, u) => {
                if let Some(u) = u {
                    rows.push(row(&constraint.coefficients, RowKind::Le, shifted(u, shift)?));
                }
                if let Some(l) = l {
                    rows.push(row(&constraint.coefficients, RowKind::Ge, shifted(l, shift)?));
                }
            }
        }
    }

    for j in 0..n {
        let mut unit = vec![Decimal::ZERO; n];
        unit[j] = Decimal::ONE;
        rows.push(row(&unit, RowKind::Le, shifted(upper[j], lower[j])?));
    }
    Ok(rows)
}

fn row(coefficients: &[Decimal], kind: RowKind, rhs: Decimal) -> Row {
    if rhs < Decimal::ZERO {
        Row {
            coefficients: coefficients.iter().map(|a| -*a).collect(),
            kind: kind.flipped(),
            rhs: -rhs,
        }
    } else {
        Row {
            coefficients: coefficients.to_vec(),
            kind,
            rhs,
        }
    }
}

struct Tableau {
    /// Each row holds `columns` coefficients followed by the right-hand side.
    cells: Vec<Vec<Decimal>>,
    basis: Vec<usize>,
    columns: usize,
    artificial: Vec<bool>,
}

impl Tableau {
    fn new(structural: usize, rows: &[Row]) -> Self {
        let slacks = rows.iter().filter(|r| r.kind != RowKind::Eq).count();
        let artificials = rows.iter().filter(|r| r.kind != RowKind::Le).count();
        let columns = structural + slacks + artificials;

        let mut cells = Vec::with_capacity(rows.len());
        let mut basis = Vec::with_capacity(rows.len());
        let mut artificial = vec![false; columns];
        let mut next_slack = structural;
        let mut next_artificial = structural + slacks;

        for r in rows {
            let mut cell = vec![Decimal::ZERO; columns + 1];
            cell[..structural].copy_from_slice(&r.coefficients);
            cell[columns] = r.rhs;
            match r.kind {
                RowKind::Le => {
                    cell[next_slack] = Decimal::ONE;
                    basis.push(next_slack);
                    next_slack += 1;
                }
                RowKind::Ge => {
                    cell[next_slack] = Decimal::NEGATIVE_ONE;
                    next_slack += 1;
                    cell[next_artificial] = Decimal::ONE;
                    artificial[next_artificial] = true;
                    basis.push(next_artificial);
                    next_artificial += 1;
                }
                RowKind::Eq => {
                    cell[next_artificial] = Decimal::ONE;
                    artificial[next_artificial] = true;
                    basis.push(next_artificial);
                    next_artificial += 1;
                }
            }
            cells.push(cell);
        }

        Self {
            cells,
            basis,
            columns,
            artificial,
        }
    }

    fn has_artificials(&self) -> bool {
        self.artificial.iter().any(|a| *a)
    }

    #[inline]
    fn rhs(&self, row: usize) -> Decimal {
        self.cells[row][self.columns]
    }

    fn artificial_residual(&self) -> Result<Decimal, SolveError> {
        self.basis
            .iter()
            .enumerate()
            .filter(|(_, &column)| self.artificial[column])
            .try_fold(Decimal::ZERO, |sum, (i, _)| sum.checked_add(self.rhs(i)))
            .ok_or_else(|| overflow("summing artificials"))
    }

    /// Pivots basic artificials out wherever a non-artificial column allows it.
    /// Rows where none does are redundant and keep their zero-valued artificial.
    fn drive_out_artificials(&mut self) -> Result<(), SolveError> {
        for i in 0..self.basis.len() {
            if !self.artificial[self.basis[i]] {
                continue;
            }
            let replacement = (0..self.columns)
                .find(|&j| !self.artificial[j] && self.cells[i][j].abs() > PIVOT_EPSILON);
            if let Some(j) = replacement {
                self.pivot(i, j)?;
            }
        }
        Ok(())
    }

    fn pivot(&mut self, row: usize, column: usize) -> Result<(), SolveError> {
        let divisor = self.cells[row][column];
        for value in self.cells[row].iter_mut() {
            *value = value
                .checked_div(divisor)
                .ok_or_else(|| overflow("pivoting"))?;
        }
        self.cells[row][column] = Decimal::ONE;
        let pivot_row = self.cells[row].clone();
        for (i, cell) in self.cells.iter_mut().enumerate() {
            if i == row {
                continue;
            }
            let factor = cell[column];
            if factor.is_zero() {
                continue;
            }
            for (value, p) in cell.iter_mut().zip(&pivot_row) {
                *value = factor
                    .checked_mul(*p)
                    .and_then(|delta| value.checked_sub(delta))
                    .ok_or_else(|| overflow("pivoting"))?;
            }
            cell[column] = Decimal::ZERO;
        }
        self.basis[row] = column;
        Ok(())
    }

    /// Maximizes `cost . x` over the current basis.
    ///
    /// Returns `Ok(false)` if the objective is unbounded.
    fn optimize(
        &mut self,
        cost: &[Decimal],
        allowed: impl Fn(usize) -> bool,
    ) -> Result<bool, SolveError> {
        let max_iterations = 50 * (self.cells.len() + self.columns) + 1_000;
        for _ in 0..max_iterations {
            let mut in_basis = vec![false; self.columns];
            for &column in &self.basis {
                in_basis[column] = true;
            }

            let mut entering = None;
            for j in 0..self.columns {
                if !in_basis[j] && allowed(j) && self.reduced_cost(cost, j)? > PIVOT_EPSILON {
                    entering = Some(j);
                    break;
                }
            }
            let Some(entering) = entering else {
                return Ok(true);
            };

            let mut leaving: Option<(usize, Decimal)> = None;
            for i in 0..self.cells.len() {
                let a = self.cells[i][entering];
                if a <= PIVOT_EPSILON {
                    continue;
                }
                let ratio = self
                    .rhs(i)
                    .checked_div(a)
                    .ok_or_else(|| overflow("running the ratio test"))?;
                let better = match leaving {
                    None => true,
                    Some((best_row, best_ratio)) => {
                        ratio < best_ratio - PIVOT_EPSILON
                            || ((ratio - best_ratio).abs() <= PIVOT_EPSILON
                                && self.basis[i] < self.basis[best_row])
                    }
                };
                if better {
                    leaving = Some((i, ratio));
                }
            }
            let Some((leaving, _)) = leaving else {
                return Ok(false);
            };
            self.pivot(leaving, entering)?;
        }
        Err(SolveError::Numerical(format!(
            "simplex did not converge within {max_iterations} iterations"
        )))
    }

    fn reduced_cost(&self, cost: &[Decimal], column: usize) -> Result<Decimal, SolveError> {
        self.basis
            .iter()
            .enumerate()
            .try_fold(cost[column], |sum, (i, &b)| {
                sum.checked_sub(cost[b].checked_mul(self.cells[i][column])?)
            })
            .ok_or_else(|| overflow("pricing a column"))
    }
}
