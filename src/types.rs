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

use std::fmt;

use crate::{role::Role, side::Side, square::Square};

/// Stable identity of a piece, assigned once at setup.
///
/// Promotion keeps the id, so a crowned pawn is still recognized as the
/// same piece by the repetition history.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct PieceId(pub u16);

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A piece with identity, [`Side`] and [`Role`].
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct Piece {
    pub id: PieceId,
    pub side: Side,
    pub role: Role,
}

impl Piece {
    #[inline]
    pub const fn new(id: u16, side: Side, role: Role) -> Piece {
        Piece {
            id: PieceId(id),
            side,
            role,
        }
    }

    /// Default material weight of the piece.
    #[inline]
    pub const fn value(self) -> i32 {
        self.role.value()
    }

    /// The same piece, crowned as `role`.
    #[inline]
    #[must_use]
    pub const fn promoted(self, role: Role) -> Piece {
        Piece { role, ..self }
    }

    /// Placement letter: uppercase for the first side, lowercase for the
    /// second.
    pub fn char(self) -> char {
        self.side.fold(self.role.upper_char(), self.role.char())
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.side, self.role)
    }
}

/// A move from one square to another.
///
/// Whether the move captures is not stored. It follows from the occupant of
/// the destination at the time the move is played.
///
/// # Display
///
/// `Move` is displayed as the two square names joined by a dash, e.g.
/// `e1-e3`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Move {
        Move { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}
