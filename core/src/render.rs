use crate::*;

/// Draws the whole grid, called by the controller after every change.
pub trait BoardRenderer {
    fn draw(&mut self, grid: &CellGrid);
}

impl<R: BoardRenderer + ?Sized> BoardRenderer for &mut R {
    fn draw(&mut self, grid: &CellGrid) {
        (**self).draw(grid);
    }
}

/// Headless play.
impl BoardRenderer for () {
    fn draw(&mut self, _grid: &CellGrid) {}
}
