use serde::{Deserialize, Serialize};

/// What a cell holds, fixed once mines are generated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    Empty,
    Mine,
    /// Safe cell touching `1..=8` mines.
    Number(u8),
}

impl Default for CellKind {
    fn default() -> Self {
        Self::Empty
    }
}

/// One grid position. Flags are independent of each other, the controller keeps them consistent.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) kind: CellKind,
    pub(crate) revealed: bool,
    pub(crate) flagged: bool,
    pub(crate) exploded: bool,
    pub(crate) chorded: bool,
}

impl Cell {
    pub const fn kind(&self) -> CellKind {
        self.kind
    }

    pub const fn is_mine(&self) -> bool {
        matches!(self.kind, CellKind::Mine)
    }

    /// Stored number, zero for empty cells and mines.
    pub const fn adjacent_mines(&self) -> u8 {
        match self.kind {
            CellKind::Number(count) => count,
            CellKind::Empty | CellKind::Mine => 0,
        }
    }

    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub const fn is_flagged(&self) -> bool {
        self.flagged
    }

    pub const fn is_exploded(&self) -> bool {
        self.exploded
    }

    /// Highlighted by the chord gesture currently held.
    pub const fn is_chorded(&self) -> bool {
        self.chorded
    }

    /// Hidden and not flagged, the only state a direct reveal acts on.
    pub const fn can_reveal(&self) -> bool {
        !self.revealed && !self.flagged
    }
}
