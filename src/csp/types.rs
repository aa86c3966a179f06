//! Comparison operators, constraints and arcs.

use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

use super::error::ParseOperatorError;

/// A comparison between two calendar dates.
///
/// Dates compare by calendar order only (day granularity).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Operator {
    /// `==`: same day.
    Equal,
    /// `!=`: different days.
    NotEqual,
    /// `>`: strictly after.
    After,
    /// `<`: strictly before.
    Before,
    /// `>=`: on or after.
    OnOrAfter,
    /// `<=`: on or before.
    OnOrBefore,
}

impl Operator {
    /// All operators, in declaration order.
    pub const ALL: [Operator; 6] = [
        Operator::Equal,
        Operator::NotEqual,
        Operator::After,
        Operator::Before,
        Operator::OnOrAfter,
        Operator::OnOrBefore,
    ];

    /// Evaluates `left <op> right`.
    pub fn holds(self, left: NaiveDate, right: NaiveDate) -> bool {
        match self {
            Operator::Equal => left == right,
            Operator::NotEqual => left != right,
            Operator::After => left > right,
            Operator::Before => left < right,
            Operator::OnOrAfter => left >= right,
            Operator::OnOrBefore => left <= right,
        }
    }

    /// Evaluates `left <op> right` where either side may be unset.
    ///
    /// An unset operand makes the comparison vacuously true.
    pub fn check(self, left: Option<NaiveDate>, right: Option<NaiveDate>) -> bool {
        match (left, right) {
            (Some(l), Some(r)) => self.holds(l, r),
            _ => true,
        }
    }

    /// The textual symbol, e.g. `">="`.
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Equal => "==",
            Operator::NotEqual => "!=",
            Operator::After => ">",
            Operator::Before => "<",
            Operator::OnOrAfter => ">=",
            Operator::OnOrBefore => "<=",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operator {
    type Err = ParseOperatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "==" => Ok(Operator::Equal),
            "!=" => Ok(Operator::NotEqual),
            ">" => Ok(Operator::After),
            "<" => Ok(Operator::Before),
            ">=" => Ok(Operator::OnOrAfter),
            "<=" => Ok(Operator::OnOrBefore),
            other => Err(ParseOperatorError(other.to_string())),
        }
    }
}

/// A constraint on the dates assigned to one or two variables.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use u_csp::csp::{Constraint, Operator};
///
/// let jan1 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let jan2 = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
///
/// let c = Constraint::binary(0, Operator::Before, 1);
/// assert_eq!(c.arity(), 2);
/// assert!(c.is_satisfied(Some(jan1), Some(jan2)));
/// assert!(!c.is_satisfied(Some(jan2), Some(jan1)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Constraint {
    /// `var <op> bound`.
    Unary {
        /// Constrained variable.
        var: usize,
        /// Comparison operator.
        op: Operator,
        /// Fixed right-hand date.
        bound: NaiveDate,
    },

    /// `left <op> right`, both sides variables.
    Binary {
        /// Left-hand variable.
        left: usize,
        /// Comparison operator.
        op: Operator,
        /// Right-hand variable.
        right: usize,
    },
}

impl Constraint {
    /// Creates a unary constraint `var <op> bound`.
    pub fn unary(var: usize, op: Operator, bound: NaiveDate) -> Self {
        Constraint::Unary { var, op, bound }
    }

    /// Creates a binary constraint `left <op> right`.
    pub fn binary(left: usize, op: Operator, right: usize) -> Self {
        Constraint::Binary { left, op, right }
    }

    /// Number of variables this constraint references (1 or 2).
    pub fn arity(&self) -> usize {
        match self {
            Constraint::Unary { .. } => 1,
            Constraint::Binary { .. } => 2,
        }
    }

    pub fn operator(&self) -> Operator {
        match *self {
            Constraint::Unary { op, .. } | Constraint::Binary { op, .. } => op,
        }
    }

    /// Left-hand variable index.
    pub fn left(&self) -> usize {
        match *self {
            Constraint::Unary { var, .. } => var,
            Constraint::Binary { left, .. } => left,
        }
    }

    /// Right-hand variable index, for binary constraints.
    pub fn right(&self) -> Option<usize> {
        match *self {
            Constraint::Unary { .. } => None,
            Constraint::Binary { right, .. } => Some(right),
        }
    }

    /// Fixed bound, for unary constraints.
    pub fn bound(&self) -> Option<NaiveDate> {
        match *self {
            Constraint::Unary { bound, .. } => Some(bound),
            Constraint::Binary { .. } => None,
        }
    }

    /// Largest variable index referenced.
    pub fn max_index(&self) -> usize {
        match *self {
            Constraint::Unary { var, .. } => var,
            Constraint::Binary { left, right, .. } => left.max(right),
        }
    }

    /// Applies the operator to `left` and `right`.
    ///
    /// For unary constraints the caller passes the bound as `right`.
    /// Either side being `None` counts as satisfied.
    pub fn is_satisfied(&self, left: Option<NaiveDate>, right: Option<NaiveDate>) -> bool {
        self.operator().check(left, right)
    }

    /// Checks the constraint against a (possibly partial) assignment.
    ///
    /// `assignment[i]` is the date of variable `i`; variables at or past
    /// `assignment.len()` are unassigned.
    pub fn is_satisfied_by(&self, assignment: &[NaiveDate]) -> bool {
        match *self {
            Constraint::Unary { var, op, bound } => {
                op.check(assignment.get(var).copied(), Some(bound))
            }
            Constraint::Binary { left, op, right } => {
                op.check(assignment.get(left).copied(), assignment.get(right).copied())
            }
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Unary { var, op, bound } => write!(f, "x{var} {op} {bound}"),
            Constraint::Binary { left, op, right } => write!(f, "x{left} {op} x{right}"),
        }
    }
}

/// A directed arc: values of `head` need support in `tail`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Arc {
    pub head: usize,
    pub tail: usize,
}

impl Arc {
    pub fn new(head: usize, tail: usize) -> Self {
        Self { head, tail }
    }

    /// The same arc pointing the other way.
    pub fn reversed(self) -> Self {
        Self {
            head: self.tail,
            tail: self.head,
        }
    }
}
