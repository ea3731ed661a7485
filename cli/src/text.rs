use std::io::Write;

use sweeper_core::{BoardRenderer, Cell, CellGrid, CellKind};

/// Writes a character dump of the grid after every change.
pub(crate) struct TextRenderer<W> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub(crate) fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    fn get_ref(&self) -> &W {
        &self.out
    }
}

impl<W: Write> BoardRenderer for TextRenderer<W> {
    fn draw(&mut self, grid: &CellGrid) {
        let board = render_board(grid);
        if let Err(err) = self.out.write_all(board.as_bytes()).and_then(|_| self.out.flush()) {
            log::warn!("Could not draw board: {}", err);
        }
    }
}

fn cell_char(cell: &Cell) -> char {
    if cell.is_exploded() {
        return 'X';
    }

    if cell.is_revealed() {
        return match cell.kind() {
            CellKind::Mine => '*',
            CellKind::Empty => '.',
            CellKind::Number(count) => char::from(b'0' + count),
        };
    }

    if cell.is_flagged() {
        'F'
    } else if cell.is_chorded() {
        'o'
    } else {
        '#'
    }
}

/// Rows top to bottom by `y`, columns by `x`, then a status line.
pub(crate) fn render_board(grid: &CellGrid) -> String {
    let (width, height) = grid.size();
    let mut out = String::from("   ");

    for x in 0..width {
        out.push_str(&format!(" {}", x % 10));
    }
    out.push('\n');

    for y in 0..height {
        out.push_str(&format!("{:>3}", y));
        for x in 0..width {
            out.push(' ');
            out.push(cell_char(&grid[(x, y)]));
        }
        out.push('\n');
    }

    out.push_str(&format!("flags: {}\n", grid.count_flags()));

    let lost = grid.iter().any(|(_, cell)| cell.is_exploded());
    if lost {
        out.push_str("Boom! Type n for a new game.\n");
    } else if grid.all_safe_revealed() {
        out.push_str("Cleared! Type n for a new game.\n");
    }
    out
}
