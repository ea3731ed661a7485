use rand::Rng;

use super::*;

/// Picks the `n`-th free cell for a uniform `n`, every free cell is equally likely.
pub(super) fn pick<R: Rng + ?Sized>(
    grid: &CellGrid,
    zone: SafeZone,
    start: Coord2,
    rng: &mut R,
) -> Option<Coord2> {
    let free = free_cells(grid, zone, start);
    if free == 0 {
        return None;
    }

    let place = rng.random_range(0..free);
    grid.iter()
        .map(|(coords, _)| coords)
        .filter(|&coords| is_free(grid, zone, start, coords))
        .nth(place.into())
}
