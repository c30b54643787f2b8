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

//! Per-kind move geometry.
//!
//! Each piece kind has three rules:
//!
//! * [`moves()`]: squares reachable on an empty board,
//! * [`is_blocked()`]: whether a particular move is obstructed on a given
//!   board,
//! * [`capture_moves()`]: unobstructed moves that land on an enemy.
//!
//! None of these look at the safety of the mover's own king. See
//! [`check`](crate::check) for that.
//!
//! # Examples
//!
//! ```
//! use pawnstorm::{rules, Board, Role, Side};
//!
//! let board = Board::new();
//! let b0 = "b0".parse()?;
//! let jumps = rules::moves(Side::First, Role::Knight, b0);
//! assert_eq!(jumps.len(), 3); // a2, c2 and d1
//!
//! let d1 = "d1".parse()?;
//! assert!(rules::is_blocked(&board, Side::First, Role::Knight, b0, d1));
//! # Ok::<_, pawnstorm::ParseSquareError>(())
//! ```

use bitflags::bitflags;

use crate::{
    board::Board,
    role::Role,
    side::Side,
    square::{Square, SquareList},
};

bitflags! {
    /// Set of directions a sliding piece moves along.
    #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
    pub struct Rays: u8 {
        const NORTH = 1 << 0;
        const SOUTH = 1 << 1;
        const EAST = 1 << 2;
        const WEST = 1 << 3;
        const NORTH_EAST = 1 << 4;
        const NORTH_WEST = 1 << 5;
        const SOUTH_EAST = 1 << 6;
        const SOUTH_WEST = 1 << 7;

        const ORTHOGONAL = Self::NORTH.bits() | Self::SOUTH.bits() | Self::EAST.bits() | Self::WEST.bits();
        const DIAGONAL = Self::NORTH_EAST.bits() | Self::NORTH_WEST.bits() | Self::SOUTH_EAST.bits() | Self::SOUTH_WEST.bits();
    }
}

impl Rays {
    const DELTAS: [(Rays, (i8, i8)); 8] = [
        (Rays::NORTH, (0, 1)),
        (Rays::SOUTH, (0, -1)),
        (Rays::EAST, (1, 0)),
        (Rays::WEST, (-1, 0)),
        (Rays::NORTH_EAST, (1, 1)),
        (Rays::NORTH_WEST, (-1, 1)),
        (Rays::SOUTH_EAST, (1, -1)),
        (Rays::SOUTH_WEST, (-1, -1)),
    ];

    /// Unit deltas of all directions in the set.
    pub fn deltas(self) -> impl Iterator<Item = (i8, i8)> {
        Rays::DELTAS
            .into_iter()
            .filter(move |&(ray, _)| self.contains(ray))
            .map(|(_, delta)| delta)
    }

    /// Direction leading from `from` to `to`, if they share a line.
    pub fn between_direction(from: Square, to: Square) -> Option<(i8, i8)> {
        let files = to.file() as i8 - from.file() as i8;
        let rows = to.row() as i8 - from.row() as i8;
        if from == to || (files != 0 && rows != 0 && files.abs() != rows.abs()) {
            None
        } else {
            Some((files.signum(), rows.signum()))
        }
    }
}

/// Squares strictly between two squares on a shared line, or nothing if
/// they are not aligned.
pub fn between(from: Square, to: Square) -> impl Iterator<Item = Square> {
    let dir = Rays::between_direction(from, to);
    let mut current = from;
    std::iter::from_fn(move || {
        let (files, rows) = dir?;
        current = current.offset(files, rows)?;
        (current != to).then_some(current)
    })
}

trait Stepper {
    const OFFSETS: [(i8, i8); 8];

    fn moves(from: Square) -> SquareList {
        Self::OFFSETS
            .iter()
            .filter_map(|&(files, rows)| from.offset(files, rows))
            .collect()
    }
}

trait Slider {
    const RAYS: Rays;

    fn moves(from: Square) -> SquareList {
        let mut moves = SquareList::new();
        for (files, rows) in Self::RAYS.deltas() {
            let mut current = from;
            while let Some(next) = current.offset(files, rows) {
                moves.push(next);
                current = next;
            }
        }
        moves
    }
}

struct KingTag;
struct KnightTag;
struct BishopTag;
struct RookTag;
struct QueenTag;

impl Stepper for KingTag {
    const OFFSETS: [(i8, i8); 8] = [
        (0, 1),
        (0, -1),
        (-1, 0),
        (1, 0),
        (1, 1),
        (-1, 1),
        (1, -1),
        (-1, -1),
    ];
}

impl Stepper for KnightTag {
    const OFFSETS: [(i8, i8); 8] = [
        (1, 2),
        (1, -2),
        (2, 1),
        (2, -1),
        (-1, 2),
        (-1, -2),
        (-2, 1),
        (-2, -1),
    ];
}

impl Slider for BishopTag {
    const RAYS: Rays = Rays::DIAGONAL;
}

impl Slider for RookTag {
    const RAYS: Rays = Rays::ORTHOGONAL;
}

impl Slider for QueenTag {
    const RAYS: Rays = Rays::all();
}

fn pawn_moves(side: Side, from: Square) -> SquareList {
    let mut moves = SquareList::new();
    if let Some(single) = from.offset(0, side.forward()) {
        moves.push(single);
        if from.row() == side.pawn_row() {
            if let Some(double) = single.offset(0, side.forward()) {
                moves.push(double);
            }
        }
    }
    moves
}

fn pawn_diagonals(side: Side, from: Square) -> impl Iterator<Item = Square> {
    [-1, 1]
        .into_iter()
        .filter_map(move |files| from.offset(files, side.forward()))
}

/// Squares a piece of the given kind could reach from `from` on an empty
/// board.
///
/// For pawns these are the forward steps only; the double step is
/// included from the pawn's starting row. Diagonal pawn captures depend on
/// occupancy and come from [`capture_moves()`].
pub fn moves(side: Side, role: Role, from: Square) -> SquareList {
    match role {
        Role::Pawn => pawn_moves(side, from),
        Role::Knight => KnightTag::moves(from),
        Role::Bishop => BishopTag::moves(from),
        Role::Rook => RookTag::moves(from),
        Role::Queen => QueenTag::moves(from),
        Role::King => KingTag::moves(from),
    }
}

/// Whether moving a piece of the given kind from `from` to `to` is
/// obstructed on `board`.
///
/// A move is blocked if it lands on a piece of the same side, or if a
/// sliding piece passes over an occupied square. A pawn is also blocked
/// when stepping forward onto any piece, when the square it skips on a
/// double step is occupied, or when moving diagonally onto anything but
/// an enemy.
pub fn is_blocked(board: &Board, side: Side, role: Role, from: Square, to: Square) -> bool {
    let target = board.side_at(to);
    if target == Some(side) {
        return true;
    }

    match role {
        Role::Pawn => {
            if from.file() == to.file() {
                target.is_some() || between(from, to).any(|sq| board.is_occupied(sq))
            } else {
                target.is_none()
            }
        }
        Role::Knight | Role::King => false,
        Role::Bishop | Role::Rook | Role::Queen => {
            between(from, to).any(|sq| board.is_occupied(sq))
        }
    }
}

/// Unobstructed moves of a piece of the given kind that land on an enemy.
///
/// The piece does not have to stand on `from`. Probing with a synthetic
/// queen finds every piece that shares an open line with a square.
pub fn capture_moves(board: &Board, side: Side, role: Role, from: Square) -> SquareList {
    let is_capture = |to: Square| {
        board.side_at(to) == Some(!side) && !is_blocked(board, side, role, from, to)
    };

    match role {
        Role::Pawn => pawn_diagonals(side, from).filter(|&to| is_capture(to)).collect(),
        _ => moves(side, role, from)
            .into_iter()
            .filter(|&to| is_capture(to))
            .collect(),
    }
}

/// Unobstructed moves and captures of the piece on `from`, without regard
/// to the safety of its own king. Empty if `from` is empty.
pub fn reachable(board: &Board, from: Square) -> SquareList {
    let Some(piece) = board.get(from) else {
        return SquareList::new();
    };

    let mut reachable: SquareList = moves(piece.side, piece.role, from)
        .into_iter()
        .filter(|&to| !is_blocked(board, piece.side, piece.role, from, to))
        .collect();

    for to in capture_moves(board, piece.side, piece.role, from) {
        if !reachable.contains(&to) {
            reachable.push(to);
        }
    }

    reachable
}
