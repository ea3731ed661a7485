use std::collections::VecDeque;
use std::io::{BufRead, Lines};

use sweeper_core::{Coord, Coord2, InputAction, InputSource};
use thiserror::Error;

pub(crate) const HELP: &str = "\
commands:
  r X Y    reveal
  f X Y    toggle flag
  c X Y    press chord (highlight)
  u        release chord
  cc X Y   press and release chord
  n        new game
  q        quit";

#[derive(Error, Debug, PartialEq, Eq)]
pub(crate) enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command {0:?}, try one of r f c u cc n q")]
    Unknown(String),
    #[error("Expected coordinates X Y")]
    MissingCoords,
    #[error("Invalid coordinate {0:?}")]
    InvalidCoord(String),
    #[error("Unexpected argument {0:?}")]
    TrailingInput(String),
}

/// Parses one command line, a chord shorthand expands into press and release.
pub(crate) fn parse_line(line: &str) -> Result<Vec<InputAction>, CommandError> {
    use InputAction::*;

    let mut tokens = line.split_whitespace();
    let name = tokens.next().ok_or(CommandError::Empty)?.to_ascii_lowercase();

    let actions = match name.as_str() {
        "r" | "reveal" => vec![Reveal(parse_coords(&mut tokens)?)],
        "f" | "flag" => vec![Flag(parse_coords(&mut tokens)?)],
        "c" | "press" => vec![ChordPress(parse_coords(&mut tokens)?)],
        "u" | "release" => vec![ChordRelease],
        "cc" | "chord" => vec![ChordPress(parse_coords(&mut tokens)?), ChordRelease],
        "n" | "new" => vec![NewGame],
        "q" | "quit" | "exit" => vec![Quit],
        _ => return Err(CommandError::Unknown(name)),
    };

    match tokens.next() {
        Some(extra) => Err(CommandError::TrailingInput(extra.to_string())),
        None => Ok(actions),
    }
}

fn parse_coords<'a>(tokens: &mut impl Iterator<Item = &'a str>) -> Result<Coord2, CommandError> {
    let x = parse_coord(tokens.next())?;
    let y = parse_coord(tokens.next())?;
    Ok((x, y))
}

fn parse_coord(token: Option<&str>) -> Result<Coord, CommandError> {
    let token = token.ok_or(CommandError::MissingCoords)?;
    token
        .parse()
        .map_err(|_| CommandError::InvalidCoord(token.to_string()))
}

/// Reads commands line by line, bad lines are reported and skipped.
pub(crate) struct LineInput<B> {
    lines: Lines<B>,
    pending: VecDeque<InputAction>,
}

impl<B: BufRead> LineInput<B> {
    pub(crate) fn new(reader: B) -> Self {
        Self {
            lines: reader.lines(),
            pending: VecDeque::new(),
        }
    }
}

impl<B: BufRead> InputSource for LineInput<B> {
    fn next_action(&mut self) -> Option<InputAction> {
        loop {
            if let Some(action) = self.pending.pop_front() {
                return Some(action);
            }

            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(err) => {
                    log::error!("Could not read input: {}", err);
                    return None;
                }
            };

            match parse_line(&line) {
                Ok(actions) => self.pending.extend(actions),
                Err(CommandError::Empty) => {}
                Err(err) => log::warn!("{}", err),
            }
        }
    }
}
