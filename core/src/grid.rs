use core::ops::Index;
use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Fixed-size grid of cells indexed by `(x, y)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellGrid {
    cells: Array2<Cell>,
    mine_count: CellCount,
}

impl CellGrid {
    /// Grid of hidden empty cells, mines are placed later.
    pub fn new(size: Coord2) -> Self {
        Self {
            cells: Array2::default(size.to_nd_index()),
            mine_count: 0,
        }
    }

    /// Grid with mines at exactly `mine_coords` and numbers already computed.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut grid = Self::new(size);
        for &coords in mine_coords {
            let coords = grid.validate_coords(coords)?;
            grid.set_mine(coords);
        }
        grid.compute_numbers();
        Ok(grid)
    }

    pub fn size(&self) -> Coord2 {
        let (x, y) = self.cells.dim();
        (x as Coord, y as Coord)
    }

    pub fn width(&self) -> Coord {
        self.size().0
    }

    pub fn height(&self) -> Coord {
        self.size().1
    }

    pub fn total_cells(&self) -> CellCount {
        let (x, y) = self.size();
        mult(x, y)
    }

    /// Mines placed so far, zero until generation.
    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains(&self, (x, y): Coord2) -> bool {
        let (width, height) = self.size();
        x < width && y < height
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn at(&self, coords: Coord2) -> Option<&Cell> {
        self.cells.get(coords.to_nd_index())
    }

    pub(crate) fn at_mut(&mut self, coords: Coord2) -> Option<&mut Cell> {
        self.cells.get_mut(coords.to_nd_index())
    }

    /// Whether `b` lies in the 3x3 block centered on `a`, `a` itself included.
    pub fn are_adjacent(a: Coord2, b: Coord2) -> bool {
        a.0.abs_diff(b.0) <= 1 && a.1.abs_diff(b.1) <= 1
    }

    /// Places `count` mines away from `exclude` and its neighbors, returns how many were placed.
    ///
    /// Overfull requests degrade the exclusion zone instead of failing, see [`SafeZone`].
    pub fn place_mines<R: Rng + ?Sized>(
        &mut self,
        exclude: Coord2,
        count: CellCount,
        policy: PlacementPolicy,
        rng: &mut R,
    ) -> CellCount {
        generator::place_mines(self, exclude, count, policy, rng)
    }

    pub(crate) fn set_mine(&mut self, coords: Coord2) {
        if let Some(cell) = self.at_mut(coords) {
            if !cell.is_mine() {
                cell.kind = CellKind::Mine;
                self.mine_count += 1;
            }
        }
    }

    /// Resolves every non-mine cell into `Empty` or `Number`.
    pub fn compute_numbers(&mut self) {
        let (width, height) = self.size();
        for x in 0..width {
            for y in 0..height {
                let coords = (x, y);
                if self[coords].is_mine() {
                    continue;
                }

                let count = self.neighbor_mine_count(coords);
                if let Some(cell) = self.at_mut(coords) {
                    cell.kind = if count > 0 {
                        CellKind::Number(count)
                    } else {
                        CellKind::Empty
                    };
                }
            }
        }
    }

    pub fn neighbor_mine_count(&self, coords: Coord2) -> u8 {
        self.count_neighbors(coords, |cell| cell.is_mine())
    }

    /// Flags on neighbors that are still hidden.
    pub fn neighbor_flag_count(&self, coords: Coord2) -> u8 {
        self.count_neighbors(coords, |cell| !cell.revealed && cell.flagged)
    }

    fn count_neighbors(&self, coords: Coord2, predicate: impl Fn(&Cell) -> bool) -> u8 {
        let mut count = 0;
        for pos in self.iter_neighbors(coords) {
            if predicate(&self[pos]) {
                count += 1;
            }
        }
        count
    }

    pub fn count_flags(&self) -> CellCount {
        let mut count = 0;
        for cell in self.cells.iter() {
            if cell.flagged {
                count += 1;
            }
        }
        count
    }

    pub fn all_safe_revealed(&self) -> bool {
        self.cells
            .iter()
            .all(|cell| cell.is_mine() || cell.revealed)
    }

    /// Every cell with its coordinates, `x` major then `y`.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, &Cell)> {
        self.cells
            .indexed_iter()
            .map(|((x, y), cell)| ((x as Coord, y as Coord), cell))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (Coord2, &mut Cell)> {
        self.cells
            .indexed_iter_mut()
            .map(|((x, y), cell)| ((x as Coord, y as Coord), cell))
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    pub fn iter_orthogonal(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_orthogonal(coords)
    }
}

impl Index<Coord2> for CellGrid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}
