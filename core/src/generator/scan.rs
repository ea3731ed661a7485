use rand::Rng;

use super::*;

/// Random start, then the first free cell at or after it in scan order.
///
/// Picks that collide walk forward, so cells right after clusters are slightly favored.
pub(super) fn pick<R: Rng + ?Sized>(
    grid: &CellGrid,
    zone: SafeZone,
    start: Coord2,
    rng: &mut R,
) -> Option<Coord2> {
    let (width, height) = grid.size();
    let mut coords = (rng.random_range(0..width), rng.random_range(0..height));

    for _ in 0..grid.total_cells() {
        if is_free(grid, zone, start, coords) {
            return Some(coords);
        }
        coords = advance(coords, (width, height));
    }

    None
}

fn advance((x, y): Coord2, (width, height): Coord2) -> Coord2 {
    if x + 1 < width {
        (x + 1, y)
    } else if y + 1 < height {
        (0, y + 1)
    } else {
        (0, 0)
    }
}
