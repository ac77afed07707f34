//! One-based source positions for diagnostics.
//!
//! Tree-sitter positions are zero-based; everything shown to a user is
//! one-based.

use std::fmt;

/// A one-based line and column pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LineColumn {
    /// Line number, starting at one.
    pub line: u32,
    /// Column number, starting at one.
    pub column: u32,
}

impl LineColumn {
    /// Converts a Tree-sitter point into display coordinates.
    #[must_use]
    pub fn from_point(point: tree_sitter::Point) -> Self {
        let (line, column) = point_to_one_based(point);
        Self { line, column }
    }
}

impl fmt::Display for LineColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

pub(crate) fn point_to_one_based(pos: tree_sitter::Point) -> (u32, u32) {
    // Saturate rather than wrap on absurdly large files.
    let line = u32::try_from(pos.row.saturating_add(1)).unwrap_or(u32::MAX);
    let column = u32::try_from(pos.column.saturating_add(1)).unwrap_or(u32::MAX);
    (line, column)
}
