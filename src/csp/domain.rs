//! Per-variable date domains.

use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Every day from `start` to `end`, inclusive, in ascending order.
///
/// Empty when `start > end`.
pub fn date_range(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    std::iter::successors(Some(start), |d| d.succ_opt()).take_while(move |d| *d <= end)
}

/// Candidate dates for every variable.
///
/// Each variable owns its own set; domains only ever shrink. Iteration is in
/// ascending date order, which fixes the value order used by search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainStore {
    domains: Vec<BTreeSet<NaiveDate>>,
}

impl DomainStore {
    /// Creates `n` domains, each holding every day in `[start, end]`.
    pub fn new(n: usize, start: NaiveDate, end: NaiveDate) -> Self {
        let full: BTreeSet<NaiveDate> = date_range(start, end).collect();
        Self {
            domains: vec![full; n],
        }
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// The domain of variable `var`.
    ///
    /// # Panics
    /// Panics if `var` is out of range.
    pub fn domain(&self, var: usize) -> &BTreeSet<NaiveDate> {
        &self.domains[var]
    }

    /// Number of values left for `var`.
    pub fn size(&self, var: usize) -> usize {
        self.domains[var].len()
    }

    pub fn contains(&self, var: usize, value: NaiveDate) -> bool {
        self.domains[var].contains(&value)
    }

    /// Whether some variable has no value left.
    pub fn has_empty_domain(&self) -> bool {
        self.domains.iter().any(BTreeSet::is_empty)
    }

    /// Sum of all domain sizes.
    pub fn total_size(&self) -> usize {
        self.domains.iter().map(BTreeSet::len).sum()
    }

    /// Keeps only values of `var` for which `keep` returns true.
    ///
    /// Returns the number of values removed.
    pub fn retain<F>(&mut self, var: usize, mut keep: F) -> usize
    where
        F: FnMut(NaiveDate) -> bool,
    {
        let domain = &mut self.domains[var];
        let before = domain.len();
        domain.retain(|d| keep(*d));
        before - domain.len()
    }

    /// Removes every value in `values` from `var`'s domain.
    ///
    /// Returns the number of values actually removed.
    pub fn remove_all(&mut self, var: usize, values: &[NaiveDate]) -> usize {
        let domain = &mut self.domains[var];
        values.iter().filter(|v| domain.remove(v)).count()
    }

    /// Consumes the store, returning one sorted `Vec` per variable.
    pub fn into_vecs(self) -> Vec<Vec<NaiveDate>> {
        self.domains
            .into_iter()
            .map(|d| d.into_iter().collect())
            .collect()
    }
}
