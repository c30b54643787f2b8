// This file is part of the pawnstorm library.
// Copyright (C) 2024 The pawnstorm developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

//! Per-side tally of move destinations.
//!
//! This is not a position hash. Only the destination square of every move
//! is recorded, and a side that sends pieces to the same square three times
//! draws the game.

use std::fmt;

use crate::{
    side::{BySide, Side},
    square::Square,
    types::Piece,
};

/// Destinations reached this many times draw the game.
pub const REPETITION_LIMIT: usize = 3;

/// A move as recorded in the history.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HistoryEntry {
    /// The moving piece, as it was before the move.
    pub piece: Piece,
    pub to: Square,
}

/// Draw by repeated destination, attributed to a side and piece.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Repetition {
    pub side: Side,
    /// Latest piece to move to the repeated destination.
    pub piece: Piece,
    pub to: Square,
}

impl fmt::Display for Repetition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} side {} repeated {} too many times",
            self.side, self.piece.role, self.to
        )
    }
}

/// Move destinations of both sides, since the start of the game.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct History {
    by_side: BySide<Vec<HistoryEntry>>,
}

impl History {
    pub fn new() -> History {
        History::default()
    }

    /// Records a move of `piece` to `to`, for the side owning the piece.
    pub fn push(&mut self, piece: Piece, to: Square) {
        self.by_side.get_mut(piece.side).push(HistoryEntry { piece, to });
    }

    pub fn entries(&self, side: Side) -> &[HistoryEntry] {
        self.by_side.get(side)
    }

    pub fn len(&self) -> usize {
        self.by_side.first.len() + self.by_side.second.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of moves of `side` that ended on `to`.
    pub fn count(&self, side: Side, to: Square) -> usize {
        self.entries(side).iter().filter(|e| e.to == to).count()
    }

    /// Tests if `piece` already moved to `to` exactly twice, so that moving
    /// there again would draw.
    pub fn is_repeating(&self, piece: Piece, to: Square) -> bool {
        self.entries(piece.side)
            .iter()
            .filter(|e| e.piece.id == piece.id && e.to == to)
            .count()
            == REPETITION_LIMIT - 1
    }

    /// Finds a destination that `side` reached at least
    /// [`REPETITION_LIMIT`] times.
    pub fn repetition_of(&self, side: Side) -> Option<Repetition> {
        let entries = self.entries(side);
        entries
            .iter()
            .rev()
            .find(|e| self.count(side, e.to) >= REPETITION_LIMIT)
            .map(|e| Repetition {
                side,
                piece: e.piece,
                to: e.to,
            })
    }

    /// Finds a repeated destination of either side, checking `first` before
    /// the other side.
    pub fn repetition(&self, first: Side) -> Option<Repetition> {
        self.repetition_of(first)
            .or_else(|| self.repetition_of(!first))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::Role;

    fn sq(name: &str) -> Square {
        name.parse().expect("valid square")
    }

    #[test]
    fn test_repetition() {
        let knight = Piece::new(5, Side::First, Role::Knight);
        let rook = Piece::new(23, Side::Second, Role::Rook);
        let mut history = History::new();

        history.push(knight, sq("c2"));
        history.push(rook, sq("c2"));
        history.push(knight, sq("b0"));
        history.push(knight, sq("c2"));
        assert!(history.is_repeating(knight, sq("c2")));
        assert!(!history.is_repeating(knight, sq("b0")));
        assert!(!history.is_repeating(rook, sq("c2")));
        assert_eq!(history.repetition(Side::First), None);

        history.push(knight, sq("c2"));
        assert!(!history.is_repeating(knight, sq("c2")));
        assert_eq!(
            history.repetition(Side::Second),
            Some(Repetition {
                side: Side::First,
                piece: knight,
                to: sq("c2"),
            })
        );
        assert_eq!(history.count(Side::Second, sq("c2")), 1);
        assert_eq!(history.len(), 5);
    }

    #[test]
    fn test_repetition_across_pieces() {
        let mut history = History::new();
        let a = Piece::new(7, Side::First, Role::Rook);
        let b = Piece::new(8, Side::First, Role::Rook);
        history.push(a, sq("d3"));
        history.push(b, sq("d3"));
        history.push(a, sq("d3"));
        let repetition = history.repetition(Side::First).expect("drawn");
        assert_eq!(repetition.piece, a);
        assert_eq!(
            repetition.to_string(),
            "first side Rook repeated d3 too many times"
        );
    }
}
