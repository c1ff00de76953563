//! Chart storage.
//!
//! Four cells per span `[s, t]`, `0 <= s <= t <= N`, kept in flat arenas
//! indexed by `s * (N + 1) + t`.

use depforge_scoring::{EdgeScore, SatisfiedSet};

/// The four cell kinds of a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// Complete span headed by `t`, no more dependents wanted on the left
    /// (`l_true`).
    LeftComplete,
    /// Complete span headed by `s` (`r_true`).
    RightComplete,
    /// Arc `t -> s` with `s`'s subtree still open (`l_false`).
    LeftIncomplete,
    /// Arc `s -> t` with `t`'s subtree still open (`r_false`).
    RightIncomplete,
}

impl CellKind {
    /// All kinds in recurrence order.
    pub const ALL: [CellKind; 4] = [
        CellKind::LeftIncomplete,
        CellKind::RightIncomplete,
        CellKind::LeftComplete,
        CellKind::RightComplete,
    ];

    fn slot(self) -> usize {
        match self {
            CellKind::LeftComplete => 0,
            CellKind::RightComplete => 1,
            CellKind::LeftIncomplete => 2,
            CellKind::RightIncomplete => 3,
        }
    }

    /// Returns true for the arc-bearing kinds.
    pub fn is_incomplete(self) -> bool {
        matches!(self, CellKind::LeftIncomplete | CellKind::RightIncomplete)
    }
}

/// One chart cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub score: f64,
    /// Split point of the best derivation; `None` for diagonal cells.
    pub split: Option<usize>,
    /// Facts counted toward `score`.
    pub satisfied: SatisfiedSet,
    /// The arc's own score, for incomplete cells.
    pub edge: Option<EdgeScore>,
}

impl Cell {
    /// The base case: score 0, nothing satisfied, no split.
    pub fn base() -> Self {
        Self {
            score: 0.0,
            split: None,
            satisfied: SatisfiedSet::new(),
            edge: None,
        }
    }

    /// Returns the arc label of an incomplete cell, empty otherwise.
    pub fn label(&self) -> &str {
        self.edge.as_ref().map_or("", |edge| edge.label.as_str())
    }
}

/// The chart of one parse.
#[derive(Debug, Clone)]
pub struct Chart {
    width: usize,
    cells: [Vec<Cell>; 4],
}

impl Chart {
    /// Creates a chart for `sentence_length` tokens with every cell at the
    /// base case.
    pub fn new(sentence_length: usize) -> Self {
        let width = sentence_length + 1;
        let arena = || vec![Cell::base(); width * width];
        Self {
            width,
            cells: [arena(), arena(), arena(), arena()],
        }
    }

    /// Returns the number of tokens.
    pub fn sentence_length(&self) -> usize {
        self.width - 1
    }

    /// Returns a cell.
    ///
    /// # Panics
    /// Panics if `s` or `t` exceeds the sentence length.
    #[inline]
    pub fn get(&self, kind: CellKind, s: usize, t: usize) -> &Cell {
        &self.cells[kind.slot()][s * self.width + t]
    }

    #[inline]
    pub(crate) fn set(&mut self, kind: CellKind, s: usize, t: usize, cell: Cell) {
        let index = s * self.width + t;
        self.cells[kind.slot()][index] = cell;
    }

    /// Returns the cell spanning the whole sentence from the root.
    pub fn root(&self) -> &Cell {
        self.get(CellKind::RightComplete, 0, self.sentence_length())
    }
}
