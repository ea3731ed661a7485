use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::ops::ControlFlow;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

const DEFAULT_SEED: u64 = 0;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Mines not generated yet, waiting for the first reveal.
    Ready,
    Active,
    Won,
    Lost,
}

impl SessionState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Ready
    }
}

/// Owns the grid of the current game and turns player actions into cell transitions.
#[derive(Debug)]
pub struct GameController<R> {
    config: GameConfig,
    grid: CellGrid,
    state: SessionState,
    rng: SmallRng,
    renderer: R,
}

impl<R: BoardRenderer> GameController<R> {
    pub fn new(config: GameConfig, renderer: R) -> Self {
        let mut controller = Self {
            config,
            grid: CellGrid::new(config.size),
            state: SessionState::Ready,
            rng: SmallRng::seed_from_u64(config.seed.unwrap_or(DEFAULT_SEED)),
            renderer,
        };
        controller.redraw();
        controller
    }

    /// Plays on a grid whose mines are already placed and numbered.
    pub fn from_grid(grid: CellGrid, renderer: R) -> Self {
        let config = GameConfig::new_unchecked(grid.size(), grid.mine_count());
        let mut controller = Self {
            config,
            grid,
            state: SessionState::Active,
            rng: SmallRng::seed_from_u64(DEFAULT_SEED),
            renderer,
        };
        controller.redraw();
        controller
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_finished()
    }

    pub fn mines_generated(&self) -> bool {
        !self.state.is_ready()
    }

    /// Mines minus flags, may go negative when over-flagging.
    pub fn mines_left(&self) -> isize {
        let mines = if self.mines_generated() {
            self.grid.mine_count()
        } else {
            self.config.mines
        };
        (mines as isize) - (self.grid.count_flags() as isize)
    }

    /// Discards the grid and starts over with the same configuration.
    pub fn new_game(&mut self) {
        self.grid = CellGrid::new(self.config.size);
        self.state = SessionState::Ready;
        log::debug!("New game {:?} with {} mines", self.config.size, self.config.mines);
        self.redraw();
    }

    /// Pulls actions from `input` until it runs dry or asks to quit.
    pub fn run(&mut self, mut input: impl InputSource) {
        while let Some(action) = input.next_action() {
            if self.handle(action).is_break() {
                break;
            }
        }
    }

    /// Applies one action, moves outside the grid or after the game ended are ignored.
    pub fn handle(&mut self, action: InputAction) -> ControlFlow<()> {
        use InputAction::*;

        let result = match action {
            Reveal(coords) => self.reveal(coords).map(|_| ()),
            Flag(coords) => self.toggle_flag(coords).map(|_| ()),
            ChordPress(coords) => self.chord_preview(coords).map(|_| ()),
            ChordRelease => self.chord_commit().map(|_| ()),
            NewGame => {
                self.new_game();
                Ok(())
            }
            Quit => return ControlFlow::Break(()),
        };

        if let Err(err) = result {
            log::debug!("Ignored {:?}: {}", action, err);
        }
        ControlFlow::Continue(())
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.grid.validate_coords(coords)?;
        self.check_not_finished()?;

        if !self.grid[coords].can_reveal() {
            return Ok(RevealOutcome::NoChange);
        }

        if self.state.is_ready() {
            self.generate_mines(coords);
        }

        let outcome = self.reveal_cell(coords);
        if outcome.has_update() {
            self.redraw();
        }
        Ok(outcome)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.grid.validate_coords(coords)?;
        self.check_not_finished()?;

        let cell = self.cell_mut(coords)?;
        if cell.revealed {
            return Ok(MarkOutcome::NoChange);
        }
        cell.flagged = !cell.flagged;
        log::debug!("Flag at {:?} set to {}", coords, cell.flagged);

        self.redraw();
        Ok(MarkOutcome::Changed)
    }

    /// Highlights the hidden, unflagged cells around `coords`, dropping any earlier highlight.
    ///
    /// Coordinates outside the grid only clear the highlight.
    pub fn chord_preview(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        self.check_not_finished()?;

        let target = self.grid.validate_coords(coords).ok();
        let mut changed = false;
        for (pos, cell) in self.grid.iter_mut() {
            let chorded = target.is_some_and(|target| CellGrid::are_adjacent(target, pos))
                && cell.can_reveal();
            if cell.chorded != chorded {
                cell.chorded = chorded;
                changed = true;
            }
        }

        if changed {
            self.redraw();
            Ok(MarkOutcome::Changed)
        } else {
            Ok(MarkOutcome::NoChange)
        }
    }

    /// Reveals every highlighted cell that touches a satisfied number and clears the highlight.
    pub fn chord_commit(&mut self) -> Result<RevealOutcome> {
        self.check_not_finished()?;

        let chorded: Vec<Coord2> = self
            .grid
            .iter()
            .filter(|(_, cell)| cell.chorded)
            .map(|(coords, _)| coords)
            .collect();
        if chorded.is_empty() {
            return Ok(RevealOutcome::NoChange);
        }

        let mut outcome = RevealOutcome::NoChange;
        for coords in chorded {
            self.cell_mut(coords)?.chorded = false;
            // an explosion mid-chord stops the rest
            if self.state.is_finished() || !self.has_satisfied_neighbor(coords) {
                continue;
            }
            outcome = outcome | self.reveal_cell(coords);
        }

        self.redraw();
        Ok(outcome)
    }

    fn generate_mines(&mut self, start: Coord2) {
        let placed = self.grid.place_mines(
            start,
            self.config.mines,
            self.config.placement,
            &mut self.rng,
        );
        self.grid.compute_numbers();
        self.state = SessionState::Active;
        log::debug!("Generated {} mines, first reveal at {:?}", placed, start);
    }

    fn reveal_cell(&mut self, coords: Coord2) -> RevealOutcome {
        let cell = self.grid[coords];
        if !cell.can_reveal() {
            return RevealOutcome::NoChange;
        }

        match cell.kind() {
            CellKind::Mine => {
                self.explode(coords);
                RevealOutcome::HitMine
            }
            CellKind::Empty => {
                self.flood(coords);
                self.check_win()
            }
            CellKind::Number(count) => {
                if let Some(cell) = self.grid.at_mut(coords) {
                    cell.revealed = true;
                }
                log::debug!("Revealed cell at {:?}, mine count: {}", coords, count);
                self.check_win()
            }
        }
    }

    /// Opens the orthogonally connected area around an empty cell, numbers bound it.
    fn flood(&mut self, start: Coord2) {
        let mut to_visit = VecDeque::from([start]);
        let mut opened: CellCount = 0;

        while let Some(coords) = to_visit.pop_front() {
            let Some(cell) = self.grid.at_mut(coords) else {
                continue;
            };
            if cell.revealed || cell.is_mine() {
                continue;
            }

            cell.revealed = true;
            cell.flagged = false;
            opened += 1;
            log::trace!("Flood opened cell at {:?}, kind: {:?}", coords, cell.kind);

            if matches!(cell.kind, CellKind::Empty) {
                to_visit.extend(self.grid.iter_orthogonal(coords));
            }
        }

        log::debug!("Flood from {:?} opened {} cells", start, opened);
    }

    fn explode(&mut self, coords: Coord2) {
        if let Some(cell) = self.grid.at_mut(coords) {
            cell.revealed = true;
            cell.exploded = true;
        }
        self.state = SessionState::Lost;

        for (_, cell) in self.grid.iter_mut() {
            if cell.is_mine() {
                cell.revealed = true;
            }
        }
        log::debug!("Hit mine at {:?}, game lost", coords);
    }

    fn check_win(&mut self) -> RevealOutcome {
        if !self.grid.all_safe_revealed() {
            return RevealOutcome::Revealed;
        }

        self.state = SessionState::Won;
        for (_, cell) in self.grid.iter_mut() {
            if cell.is_mine() {
                cell.flagged = true;
            }
        }
        log::debug!("All safe cells revealed, game won");
        RevealOutcome::Won
    }

    fn has_satisfied_neighbor(&self, coords: Coord2) -> bool {
        self.grid.iter_neighbors(coords).any(|pos| {
            let cell = &self.grid[pos];
            match cell.kind() {
                CellKind::Number(count) if cell.revealed => {
                    self.grid.neighbor_flag_count(pos) >= count
                }
                _ => false,
            }
        })
    }

    fn cell_mut(&mut self, coords: Coord2) -> Result<&mut Cell> {
        self.grid.at_mut(coords).ok_or(GameError::InvalidCoords)
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }

    fn redraw(&mut self) {
        self.renderer.draw(&self.grid);
    }
}
