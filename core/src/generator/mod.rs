use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

mod scan;
mod uniform;

/// How each mine's position is chosen.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementPolicy {
    /// Random pick, colliding picks walk forward to the next free cell (x first, wrapping).
    Scan,
    /// Uniform pick among the cells that are still free.
    Uniform,
}

impl Default for PlacementPolicy {
    fn default() -> Self {
        Self::Scan
    }
}

/// Cells around the first reveal that must stay free of mines.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SafeZone {
    /// No guarantee, used only for boards that are almost entirely mines.
    Nothing,
    StartCell,
    /// The start cell and its eight neighbors, so the first reveal opens an area.
    StartBlock,
}

impl SafeZone {
    pub fn contains(self, start: Coord2, coords: Coord2) -> bool {
        match self {
            Self::Nothing => false,
            Self::StartCell => start == coords,
            Self::StartBlock => CellGrid::are_adjacent(start, coords),
        }
    }
}

pub(crate) fn is_free(grid: &CellGrid, zone: SafeZone, start: Coord2, coords: Coord2) -> bool {
    !grid[coords].is_mine() && !zone.contains(start, coords)
}

fn free_cells(grid: &CellGrid, zone: SafeZone, start: Coord2) -> CellCount {
    let mut count = 0;
    for (coords, _) in grid.iter() {
        if is_free(grid, zone, start, coords) {
            count += 1;
        }
    }
    count
}

pub(crate) fn place_mines<R: Rng + ?Sized>(
    grid: &mut CellGrid,
    start: Coord2,
    count: CellCount,
    policy: PlacementPolicy,
    rng: &mut R,
) -> CellCount {
    use SafeZone::*;

    let mut zone = StartBlock;
    if free_cells(grid, zone, start) < count {
        log::warn!("Cannot keep the start block clear, fallback to a safe start cell");
        zone = StartCell;
    }
    if free_cells(grid, zone, start) < count {
        log::warn!("Cannot make start cell safe, fallback to random");
        zone = Nothing;
    }

    let free = free_cells(grid, zone, start);
    let count = if count > free {
        log::warn!(
            "Grid already full, requested {} mines but only {} fit",
            count,
            free
        );
        free
    } else {
        count
    };

    let before = grid.mine_count();
    for _ in 0..count {
        let coords = match policy {
            PlacementPolicy::Scan => scan::pick(grid, zone, start, rng),
            PlacementPolicy::Uniform => uniform::pick(grid, zone, start, rng),
        };
        match coords {
            Some(coords) => grid.set_mine(coords),
            None => break,
        }
    }

    let placed = grid.mine_count() - before;
    log::debug!(
        "Placed {} mines with {:?} around {:?} using {:?}",
        placed,
        zone,
        start,
        policy
    );
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    fn placed(size: Coord2, start: Coord2, count: CellCount, policy: PlacementPolicy) -> CellGrid {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut grid = CellGrid::new(size);
        let placed = grid.place_mines(start, count, policy, &mut rng);
        assert_eq!(placed, grid.mine_count());
        grid
    }

    #[test]
    fn places_exact_count_away_from_start() {
        for policy in [PlacementPolicy::Scan, PlacementPolicy::Uniform] {
            for seed in 0..20 {
                let mut rng = SmallRng::seed_from_u64(seed);
                let mut grid = CellGrid::new((9, 9));
                let start = (seed as Coord % 9, (seed as Coord * 5) % 9);

                assert_eq!(grid.place_mines(start, 10, policy, &mut rng), 10);

                let mines = grid.iter().filter(|(_, cell)| cell.is_mine()).count();
                assert_eq!(mines, 10);
                assert!(
                    grid.iter()
                        .all(|(pos, cell)| !cell.is_mine() || !CellGrid::are_adjacent(start, pos))
                );
            }
        }
    }

    #[test]
    fn dense_board_fills_everything_outside_start_block() {
        let grid = placed((9, 9), (0, 0), 77, PlacementPolicy::Scan);

        assert_eq!(grid.mine_count(), 77);
        for (pos, cell) in grid.iter() {
            assert_eq!(cell.is_mine(), !CellGrid::are_adjacent((0, 0), pos));
        }
    }

    #[test]
    fn single_mine_on_three_by_three_avoids_corner_block() {
        let grid = placed((3, 3), (0, 0), 1, PlacementPolicy::Scan);

        let (mine, _) = grid.iter().find(|(_, cell)| cell.is_mine()).unwrap();
        assert!(!CellGrid::are_adjacent((0, 0), mine));
    }

    #[test]
    fn center_start_on_three_by_three_keeps_start_cell_safe() {
        let grid = placed((3, 3), (1, 1), 1, PlacementPolicy::Scan);

        assert_eq!(grid.mine_count(), 1);
        assert!(!grid[(1, 1)].is_mine());
    }

    #[test]
    fn full_board_places_everywhere() {
        let grid = placed((2, 2), (0, 0), 4, PlacementPolicy::Uniform);

        assert_eq!(grid.mine_count(), 4);
        assert!(grid[(0, 0)].is_mine());
    }

    #[test]
    fn overfull_request_is_clamped() {
        let grid = placed((2, 2), (0, 0), 9, PlacementPolicy::Scan);
        assert_eq!(grid.mine_count(), 4);
    }

    #[test]
    fn zero_mines_places_nothing() {
        let grid = placed((4, 4), (2, 2), 0, PlacementPolicy::Scan);
        assert_eq!(grid.mine_count(), 0);
    }
}
