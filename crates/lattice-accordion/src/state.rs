//! Expansion state: which rows are currently expanded.

use serde::{Deserialize, Serialize};

use crate::logging::targets;
use crate::row::RowId;

/// Ordered, duplicate-free collection of expanded rows.
///
/// This is the single source of truth for whether a row is expanded. Views are
/// recycled and never consulted; they are synchronized *from* this state.
///
/// Rows are kept in insertion order. All operations are total: adding a row
/// that is already present or removing one that is absent does nothing.
///
/// # Example
///
/// ```
/// use lattice_accordion::{ExpansionState, RowId};
///
/// let mut state = ExpansionState::new();
/// state.add(RowId::flat(5));
/// assert!(state.contains(RowId::flat(5)));
/// assert!(!state.contains(RowId::flat(3)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<RowId>", into = "Vec<RowId>")]
pub struct ExpansionState {
    rows: Vec<RowId>,
}

impl ExpansionState {
    /// Creates an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `row` is expanded.
    #[inline]
    pub fn contains(&self, row: RowId) -> bool {
        self.rows.contains(&row)
    }

    /// Marks `row` as expanded.
    ///
    /// Returns `true` if the row was inserted, `false` if it was already present.
    pub fn add(&mut self, row: RowId) -> bool {
        if self.contains(row) {
            tracing::trace!(target: targets::STATE, %row, "row already expanded");
            return false;
        }
        self.rows.push(row);
        true
    }

    /// Marks `row` as collapsed.
    ///
    /// Returns `true` if the row was present. The relative order of the
    /// remaining rows is preserved.
    pub fn remove(&mut self, row: RowId) -> bool {
        match self.rows.iter().position(|r| *r == row) {
            Some(pos) => {
                self.rows.remove(pos);
                true
            }
            None => {
                tracing::trace!(target: targets::STATE, %row, "row not expanded");
                false
            }
        }
    }

    /// Clears all entries.
    ///
    /// Used when rows are inserted, removed or reordered, since the stored
    /// positions would otherwise refer to different logical rows.
    pub fn reset(&mut self) {
        self.rows.clear();
    }

    /// Returns the number of expanded rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if no row is expanded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterates over expanded rows in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = RowId> + '_ {
        self.rows.iter().copied()
    }

    /// Returns the expanded rows in insertion order.
    pub fn as_slice(&self) -> &[RowId] {
        &self.rows
    }
}

impl From<Vec<RowId>> for ExpansionState {
    fn from(rows: Vec<RowId>) -> Self {
        rows.into_iter().collect()
    }
}

impl From<ExpansionState> for Vec<RowId> {
    fn from(state: ExpansionState) -> Self {
        state.rows
    }
}

impl FromIterator<RowId> for ExpansionState {
    fn from_iter<I: IntoIterator<Item = RowId>>(iter: I) -> Self {
        let mut state = Self::new();
        state.extend(iter);
        state
    }
}

impl Extend<RowId> for ExpansionState {
    fn extend<I: IntoIterator<Item = RowId>>(&mut self, iter: I) {
        for row in iter {
            self.add(row);
        }
    }
}

impl<'a> IntoIterator for &'a ExpansionState {
    type Item = RowId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, RowId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter().copied()
    }
}
