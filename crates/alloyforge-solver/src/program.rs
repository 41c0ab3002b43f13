//! Bounded-integer linear programs.
//!
//! An [`IntegerProgram`] is a set of integer variables with finite bounds, a
//! linear objective and ranged linear constraints (`lower <= a.x <= upper`).
//! Coefficients are exact decimals, so checking an integer point against the
//! program involves no rounding.

use std::fmt;

use rust_decimal::Decimal;

use crate::error::SolveError;

/// Direction of the objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObjectiveSense {
    #[default]
    Maximize,
    Minimize,
}

/// An integer decision variable bounded by `[lower, upper]`.
#[derive(Debug, Clone, PartialEq)]
pub struct IntVariable {
    pub name: String,
    pub lower: i64,
    pub upper: i64,
}

/// A ranged linear constraint. Either side may be open.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    /// Name/label for the constraint (for diagnostics)
    pub name: String,
    /// Coefficients for each variable
    pub coefficients: Vec<Decimal>,
    pub lower: Option<Decimal>,
    pub upper: Option<Decimal>,
}

impl LinearConstraint {
    /// Evaluates `a.x`, or `None` if the sum leaves the decimal range.
    pub fn activity(&self, values: &[Decimal]) -> Option<Decimal> {
        dot(&self.coefficients, values)
    }

    /// Returns true if `a.x` lies within the range.
    pub fn is_satisfied(&self, values: &[Decimal]) -> bool {
        match self.activity(values) {
            Some(activity) => {
                self.lower.map_or(true, |l| activity >= l)
                    && self.upper.map_or(true, |u| activity <= u)
            }
            None => false,
        }
    }
}

/// Checked dot product.
pub(crate) fn dot(coefficients: &[Decimal], values: &[Decimal]) -> Option<Decimal> {
    coefficients
        .iter()
        .zip(values)
        .try_fold(Decimal::ZERO, |sum, (a, x)| sum.checked_add(a.checked_mul(*x)?))
}

fn to_decimals(values: &[i64]) -> Vec<Decimal> {
    values.iter().map(|&v| Decimal::from(v)).collect()
}

/// A bounded-integer linear program.
///
/// # Example
///
/// ```
/// use alloyforge_solver::IntegerProgram;
/// use rust_decimal::Decimal;
///
/// let mut program = IntegerProgram::maximize();
/// let x = program.add_variable("x", 0, 4);
/// let y = program.add_variable("y", 0, 4);
/// program.set_objective_coefficient(x, Decimal::new(3, 0));
/// program.set_objective_coefficient(y, Decimal::new(25, 1));
/// program.add_constraint(
///     "capacity",
///     vec![Decimal::ONE, Decimal::ONE],
///     None,
///     Some(Decimal::new(5, 0)),
/// );
///
/// assert_eq!(program.variable_count(), 2);
/// assert_eq!(program.evaluate(&[4, 1]).unwrap(), Decimal::new(145, 1));
/// assert!(program.is_feasible(&[4, 1]));
/// assert!(!program.is_feasible(&[4, 2]));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IntegerProgram {
    variables: Vec<IntVariable>,
    objective: Vec<Decimal>,
    sense: ObjectiveSense,
    constraints: Vec<LinearConstraint>,
}

impl IntegerProgram {
    pub fn new(sense: ObjectiveSense) -> Self {
        Self {
            sense,
            ..Self::default()
        }
    }

    pub fn maximize() -> Self {
        Self::new(ObjectiveSense::Maximize)
    }

    pub fn minimize() -> Self {
        Self::new(ObjectiveSense::Minimize)
    }

    /// Adds a variable and returns its index. Its objective coefficient starts at zero.
    pub fn add_variable(&mut self, name: impl Into<String>, lower: i64, upper: i64) -> usize {
        self.variables.push(IntVariable {
            name: name.into(),
            lower,
            upper,
        });
        self.objective.push(Decimal::ZERO);
        for constraint in &mut self.constraints {
            constraint.coefficients.push(Decimal::ZERO);
        }
        self.variables.len() - 1
    }

    pub fn set_objective_coefficient(&mut self, variable: usize, coefficient: Decimal) {
        self.objective[variable] = coefficient;
    }

    /// Adds a ranged constraint `lower <= coefficients . x <= upper`.
    ///
    /// Missing trailing coefficients are treated as zero.
    pub fn add_constraint(
        &mut self,
        name: impl Into<String>,
        mut coefficients: Vec<Decimal>,
        lower: Option<Decimal>,
        upper: Option<Decimal>,
    ) -> usize {
        coefficients.resize(self.variables.len(), Decimal::ZERO);
        self.constraints.push(LinearConstraint {
            name: name.into(),
            coefficients,
            lower,
            upper,
        });
        self.constraints.len() - 1
    }

    pub fn variables(&self) -> &[IntVariable] {
        &self.variables
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    pub fn objective(&self) -> &[Decimal] {
        &self.objective
    }

    pub fn sense(&self) -> ObjectiveSense {
        self.sense
    }

    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    /// Objective coefficients oriented for maximization.
    pub(crate) fn maximization_objective(&self) -> Vec<Decimal> {
        match self.sense {
            ObjectiveSense::Maximize => self.objective.clone(),
            ObjectiveSense::Minimize => self.objective.iter().map(|c| -*c).collect(),
        }
    }

    pub fn lower_bounds(&self) -> Vec<i64> {
        self.variables.iter().map(|v| v.lower).collect()
    }

    pub fn upper_bounds(&self) -> Vec<i64> {
        self.variables.iter().map(|v| v.upper).collect()
    }

    /// Evaluates the objective exactly at an integer point.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::Numerical`] if the value leaves the decimal range.
    pub fn evaluate(&self, values: &[i64]) -> Result<Decimal, SolveError> {
        dot(&self.objective, &to_decimals(values)).ok_or_else(|| {
            SolveError::Numerical(format!("objective overflows at {values:?}"))
        })
    }

    /// Returns true if the integer point satisfies every bound and constraint exactly.
    pub fn is_feasible(&self, values: &[i64]) -> bool {
        if values.len() != self.variables.len() {
            return false;
        }
        let in_bounds = self
            .variables
            .iter()
            .zip(values)
            .all(|(v, x)| (v.lower..=v.upper).contains(x));
        if !in_bounds {
            return false;
        }
        let point = to_decimals(values);
        self.constraints.iter().all(|c| c.is_satisfied(&point))
    }

    /// Checks that the program is well formed.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::InvalidProgram`] for inverted variable bounds or
    /// inverted constraint ranges.
    pub fn validate(&self) -> Result<(), SolveError> {
        for v in &self.variables {
            if v.lower > v.upper {
                return Err(SolveError::InvalidProgram(format!(
                    "variable '{}' has lower bound {} above upper bound {}",
                    v.name, v.lower, v.upper
                )));
            }
        }
        for c in &self.constraints {
            if let (Some(l), Some(u)) = (c.lower, c.upper) {
                if l > u {
                    return Err(SolveError::InvalidProgram(format!(
                        "constraint '{}' has lower bound {} above upper bound {}",
                        c.name, l, u
                    )));
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for IntegerProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sense = match self.sense {
            ObjectiveSense::Maximize => "maximize",
            ObjectiveSense::Minimize => "minimize",
        };
        write!(f, "{sense} ")?;
        write_terms(f, &self.objective, &self.variables)?;
        writeln!(f)?;
        for c in &self.constraints {
            write!(f, "  {}: ", c.name)?;
            if let Some(l) = c.lower {
                write!(f, "{l} <= ")?;
            }
            write_terms(f, &c.coefficients, &self.variables)?;
            if let Some(u) = c.upper {
                write!(f, " <= {u}")?;
            }
            writeln!(f)?;
        }
        for v in &self.variables {
            writeln!(f, "  {} <= {} <= {} (integer)", v.lower, v.name, v.upper)?;
        }
        Ok(())
    }
}

fn write_terms(
    f: &mut fmt::Formatter<'_>,
    coefficients: &[Decimal],
    variables: &[IntVariable],
) -> fmt::Result {
    let mut first = true;
    for (c, v) in coefficients.iter().zip(variables) {
        if c.is_zero() {
            continue;
        }
        if !first {
            write!(f, " + ")?;
        }
        write!(f, "{c}*{}", v.name)?;
        first = false;
    }
    if first {
        write!(f, "0")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(value: i64) -> Decimal {
        Decimal::from(value)
    }

    #[test]
    fn test_add_variable_extends_constraints() {
        let mut program = IntegerProgram::maximize();
        let x = program.add_variable("x", 0, 3);
        program.add_constraint("c", vec![d(2)], None, Some(d(4)));
        let y = program.add_variable("y", 0, 3);

        assert_eq!((x, y), (0, 1));
        assert_eq!(program.constraints()[0].coefficients, vec![d(2), d(0)]);
        assert_eq!(program.objective(), &[d(0), d(0)]);
    }

    #[test]
    fn test_ranged_constraint() {
        let c = LinearConstraint {
            name: "band".to_string(),
            coefficients: vec![Decimal::ONE, Decimal::ONE],
            lower: Some(Decimal::new(999, 2)),
            upper: Some(Decimal::new(1001, 2)),
        };
        assert!(c.is_satisfied(&[d(4), d(6)]));
        assert!(!c.is_satisfied(&[d(4), d(5)]));
        assert!(!c.is_satisfied(&[d(5), d(6)]));
    }

    #[test]
    fn test_feasibility_is_exact_at_the_boundary() {
        let mut program = IntegerProgram::maximize();
        program.add_variable("x", 0, 10);
        program.add_constraint(
            "budget",
            vec![Decimal::new(17944, 3)],
            None,
            Some(Decimal::new(17_943_999_999_999, 12)),
        );

        assert!(program.is_feasible(&[0]));
        assert!(!program.is_feasible(&[1]));
        assert!(!program.is_feasible(&[11]));
        assert!(!program.is_feasible(&[0, 0]));
    }

    #[test]
    fn test_evaluate_reports_overflow() {
        let mut program = IntegerProgram::maximize();
        let x = program.add_variable("x", 0, i64::MAX);
        program.set_objective_coefficient(x, Decimal::MAX);

        assert_eq!(program.evaluate(&[0]).unwrap(), Decimal::ZERO);
        assert!(matches!(program.evaluate(&[2]), Err(SolveError::Numerical(_))));
    }

    #[test]
    fn test_minimization_objective_is_negated() {
        let mut program = IntegerProgram::minimize();
        let x = program.add_variable("x", 0, 1);
        program.set_objective_coefficient(x, Decimal::new(25, 1));
        assert_eq!(program.maximization_objective(), vec![Decimal::new(-25, 1)]);
    }

    #[test]
    fn test_validate() {
        let mut program = IntegerProgram::maximize();
        program.add_variable("x", 2, 1);
        assert!(matches!(
            program.validate(),
            Err(SolveError::InvalidProgram(_))
        ));

        let mut program = IntegerProgram::maximize();
        program.add_variable("x", 0, 1);
        program.add_constraint("c", vec![d(1)], Some(d(2)), Some(d(1)));
        assert!(program.validate().is_err());
    }

    #[test]
    fn test_display() {
        let mut program = IntegerProgram::maximize();
        let x = program.add_variable("x", 0, 3);
        program.set_objective_coefficient(x, d(2));
        program.add_constraint("c", vec![d(1)], None, Some(d(2)));
        let text = program.to_string();
        assert!(text.starts_with("maximize 2*x"));
        assert!(text.contains("c: 1*x <= 2"));
        assert!(text.contains("0 <= x <= 3 (integer)"));
    }
}
