use alloc::collections::VecDeque;

use crate::*;

/// Player action already resolved to grid coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputAction {
    /// Primary action.
    Reveal(Coord2),
    /// Secondary action.
    Flag(Coord2),
    /// Tertiary press or drag, highlights the cells a release would open.
    ChordPress(Coord2),
    /// Tertiary release.
    ChordRelease,
    NewGame,
    Quit,
}

pub trait InputSource {
    /// Next action, `None` once the source is exhausted.
    fn next_action(&mut self) -> Option<InputAction>;
}

impl<S: InputSource + ?Sized> InputSource for &mut S {
    fn next_action(&mut self) -> Option<InputAction> {
        (**self).next_action()
    }
}

/// Scripted input, mostly for replays and tests.
impl InputSource for VecDeque<InputAction> {
    fn next_action(&mut self) -> Option<InputAction> {
        self.pop_front()
    }
}
