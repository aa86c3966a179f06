//! CSP model definition.

use chrono::NaiveDate;

use super::error::ModelError;
use super::types::{Constraint, Operator};

/// A date-scheduling problem: `n` variables over a shared inclusive date
/// range, plus unary and binary constraints.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use u_csp::csp::{CspModel, Operator};
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
///
/// let mut model = CspModel::new(2, start, end);
/// model.add_binary(0, Operator::NotEqual, 1);
/// model.add_unary(0, Operator::Equal, start);
/// assert!(model.validate().is_ok());
/// assert_eq!(model.constraint_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CspModel {
    /// Number of variables (events to schedule).
    pub num_variables: usize,
    /// First date of every initial domain.
    pub start: NaiveDate,
    /// Last date of every initial domain (inclusive).
    pub end: NaiveDate,
    /// Constraints, in insertion order.
    pub constraints: Vec<Constraint>,
}

impl CspModel {
    /// Creates a model with no constraints.
    pub fn new(num_variables: usize, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            num_variables,
            start,
            end,
            constraints: Vec::new(),
        }
    }

    /// Replaces the constraint list.
    pub fn with_constraints(mut self, constraints: impl IntoIterator<Item = Constraint>) -> Self {
        self.constraints = constraints.into_iter().collect();
        self
    }

    /// Adds a constraint.
    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    /// Convenience: add `var <op> bound`.
    pub fn add_unary(&mut self, var: usize, op: Operator, bound: NaiveDate) {
        self.constraints.push(Constraint::unary(var, op, bound));
    }

    /// Convenience: add `left <op> right`.
    pub fn add_binary(&mut self, left: usize, op: Operator, right: usize) {
        self.constraints.push(Constraint::binary(left, op, right));
    }

    /// Validates the model.
    ///
    /// Checks that the date range is not inverted and that every constraint
    /// references existing variables.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.start > self.end {
            return Err(ModelError::InvalidRange {
                start: self.start,
                end: self.end,
            });
        }
        for (i, c) in self.constraints.iter().enumerate() {
            let index = c.max_index();
            if index >= self.num_variables {
                return Err(ModelError::VariableOutOfRange {
                    constraint: i,
                    index,
                    num_variables: self.num_variables,
                });
            }
        }
        Ok(())
    }

    /// Returns the number of variables.
    pub fn variable_count(&self) -> usize {
        self.num_variables
    }

    /// Returns the number of constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Number of days in the shared range (0 if inverted).
    pub fn range_len(&self) -> usize {
        let days = (self.end - self.start).num_days();
        if days < 0 {
            0
        } else {
            days as usize + 1
        }
    }

    /// Whether `assignment` is a complete solution.
    ///
    /// Requires one in-range date per variable and every constraint to hold.
    /// Unlike the partial check used during search, nothing is left unset
    /// here, so a short assignment is rejected rather than vacuously accepted.
    pub fn is_solution(&self, assignment: &[NaiveDate]) -> bool {
        assignment.len() == self.num_variables
            && assignment
                .iter()
                .all(|d| (self.start..=self.end).contains(d))
            && self.constraints.iter().all(|c| c.is_satisfied_by(assignment))
    }
}
