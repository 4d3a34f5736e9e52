//! Row identifiers for addressing logical rows in a sectioned list.
//!
//! A [`RowId`] locates a logical row by section and position. Unlike the view
//! showing it, a `RowId` is stable while the underlying data keeps its shape;
//! after rows are inserted, removed or reordered, previously obtained ids may
//! point at a different logical row.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Represents a row position within a sectioned list.
///
/// Equality, hashing and ordering are structural: two ids are equal iff both
/// section and row match, and ids sort by section first, then row.
///
/// # Example
///
/// ```
/// use lattice_accordion::RowId;
///
/// let a = RowId::new(0, 3);
/// let b = RowId::new(1, 0);
/// assert!(a < b);
/// assert_eq!(a.sibling(4), RowId::new(0, 4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RowId {
    section: usize,
    row: usize,
}

impl RowId {
    /// Creates a row id for `row` within `section`.
    #[inline]
    pub const fn new(section: usize, row: usize) -> Self {
        Self { section, row }
    }

    /// Creates a row id in section 0, for flat (unsectioned) lists.
    #[inline]
    pub const fn flat(row: usize) -> Self {
        Self::new(0, row)
    }

    /// Returns the section of this row.
    #[inline]
    pub fn section(&self) -> usize {
        self.section
    }

    /// Returns the position of this row within its section.
    #[inline]
    pub fn row(&self) -> usize {
        self.row
    }

    /// Creates an id for another row in the same section.
    #[inline]
    pub fn sibling(&self, row: usize) -> Self {
        Self::new(self.section, row)
    }
}

impl From<(usize, usize)> for RowId {
    fn from((section, row): (usize, usize)) -> Self {
        Self::new(section, row)
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}:{}]", self.section, self.row)
    }
}
