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

//! Piece positions, without any game state.

use std::{
    error::Error,
    fmt::{self, Write as _},
    str::FromStr,
};

use arrayvec::ArrayVec;

use crate::{
    role::Role,
    side::Side,
    square::{File, Square},
    types::{Piece, PieceId},
};

/// Error when a side has no king on the board.
///
/// Every active side owns exactly one king, so this is an invariant
/// violation. Operations that hit it are aborted.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct KingNotFound {
    pub side: Side,
}

impl fmt::Display for KingNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} side has no king", self.side)
    }
}

impl Error for KingNotFound {}

/// Error when parsing an invalid piece placement.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParsePlacementError;

impl fmt::Display for ParsePlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid piece placement")
    }
}

impl Error for ParsePlacementError {}

/// [`Piece`] positions on an 8x8 board.
///
/// The board is an arena: 64 slots that refer into a fixed-capacity piece
/// table. Cloning it never allocates, so hypothetical moves are explored on
/// throwaway copies while the live board stays untouched.
///
/// No legality is checked here.
///
/// # Examples
///
/// ```
/// use pawnstorm::{Board, Role, Side};
///
/// let board = Board::new();
/// let e0 = "e0".parse()?;
/// let king = board.get(e0).expect("king on e0");
/// assert_eq!(king.role, Role::King);
/// assert_eq!(king.side, Side::First);
///
/// // r n b q k b n r
/// // p p p p p p p p
/// // . . . . . . . .
/// // . . . . . . . .
/// // . . . . . . . .
/// // . . . . . . . .
/// // P P P P P P P P
/// // R N B Q K B N R
/// # Ok::<_, pawnstorm::ParseSquareError>(())
/// ```
#[derive(Clone, Eq, PartialEq)]
pub struct Board {
    grid: [Option<u8>; 64],
    pieces: ArrayVec<Piece, 64>,
}

impl Board {
    /// The initial layout.
    ///
    /// Ids follow the setup order King, Queen, Bishops, Knights, Rooks,
    /// then Pawns from `a` to `h`: `1..=16` for the first side and
    /// `17..=32` for the second side.
    pub fn new() -> Board {
        const BACK: [(File, Role); 8] = [
            (File::E, Role::King),
            (File::D, Role::Queen),
            (File::C, Role::Bishop),
            (File::F, Role::Bishop),
            (File::B, Role::Knight),
            (File::G, Role::Knight),
            (File::A, Role::Rook),
            (File::H, Role::Rook),
        ];

        let mut board = Board::empty();
        for side in Side::ALL {
            let mut id = side.fold(1, 17);
            for (file, role) in BACK {
                board.put(file, side.back_row(), Piece::new(id, side, role));
                id += 1;
            }
            for file in File::ALL {
                board.put(file, side.pawn_row(), Piece::new(id, side, Role::Pawn));
                id += 1;
            }
        }
        board
    }

    fn put(&mut self, file: File, row: u8, piece: Piece) {
        if let Some(sq) = Square::new(file, row) {
            self.set(sq, Some(piece));
        }
    }

    /// A board without any pieces.
    pub const fn empty() -> Board {
        Board {
            grid: [None; 64],
            pieces: ArrayVec::new_const(),
        }
    }

    /// Parses the piece placement part of a FEN, with ranks from row 7
    /// down to row 0. Uppercase letters are first side pieces, lowercase
    /// letters second side pieces. Ids are assigned in reading order,
    /// starting at 1.
    ///
    /// # Errors
    ///
    /// Returns [`ParsePlacementError`] if the placement does not describe
    /// exactly 8 rows of 8 squares.
    pub fn from_placement(placement: &str) -> Result<Board, ParsePlacementError> {
        let mut board = Board::empty();
        let mut id = 1;
        let mut rows = 0;

        for (i, rank) in placement.split('/').enumerate() {
            let row = 7u8.checked_sub(i as u8).ok_or(ParsePlacementError)?;
            let mut file = 0u8;
            for ch in rank.chars() {
                if let Some(empty) = ch.to_digit(10) {
                    if !(1..=8).contains(&empty) {
                        return Err(ParsePlacementError);
                    }
                    file += empty as u8;
                } else {
                    let role = Role::from_char(ch).ok_or(ParsePlacementError)?;
                    let side = if ch.is_ascii_uppercase() {
                        Side::First
                    } else {
                        Side::Second
                    };
                    let sq = File::new(file)
                        .and_then(|file| Square::new(file, row))
                        .ok_or(ParsePlacementError)?;
                    board.set(sq, Some(Piece::new(id, side, role)));
                    id += 1;
                    file += 1;
                }
                if file > 8 {
                    return Err(ParsePlacementError);
                }
            }
            if file != 8 {
                return Err(ParsePlacementError);
            }
            rows += 1;
        }

        if rows == 8 {
            Ok(board)
        } else {
            Err(ParsePlacementError)
        }
    }

    /// Writes the piece placement, with ranks from row 7 down to row 0.
    pub fn placement(&self) -> String {
        let mut out = String::with_capacity(64);
        for row in (0..8).rev() {
            let mut empty = 0;
            for file in File::ALL {
                match Square::new(file, row).and_then(|sq| self.get(sq)) {
                    Some(piece) => {
                        if empty > 0 {
                            out.push(char::from(b'0' + empty));
                            empty = 0;
                        }
                        out.push(piece.char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push(char::from(b'0' + empty));
            }
            if row > 0 {
                out.push('/');
            }
        }
        out
    }

    /// Gets the occupant of a square.
    #[inline]
    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.grid[sq.index()].map(|slot| self.pieces[usize::from(slot)])
    }

    #[inline]
    pub fn is_occupied(&self, sq: Square) -> bool {
        self.grid[sq.index()].is_some()
    }

    /// Gets the side of the occupant of a square.
    #[inline]
    pub fn side_at(&self, sq: Square) -> Option<Side> {
        self.get(sq).map(|piece| piece.side)
    }

    /// Replaces the occupant of a square.
    ///
    /// A piece is identified by its id: if it already stands elsewhere on
    /// the board, it is lifted from there first, so no piece ever occupies
    /// two squares. Setting a piece with a known id and a different role
    /// replaces the record, which is how pawns are crowned.
    pub fn set(&mut self, sq: Square, piece: Option<Piece>) {
        self.grid[sq.index()] = None;

        let Some(piece) = piece else {
            return;
        };

        let slot = match self.slot_of(piece.id) {
            Some(slot) => {
                if let Some(prev) = self.grid.iter_mut().find(|s| **s == Some(slot)) {
                    *prev = None;
                }
                self.pieces[usize::from(slot)] = piece;
                slot
            }
            None => self.alloc(piece),
        };

        self.grid[sq.index()] = Some(slot);
    }

    fn slot_of(&self, id: PieceId) -> Option<u8> {
        self.pieces
            .iter()
            .position(|p| p.id == id)
            .map(|slot| slot as u8)
    }

    fn alloc(&mut self, piece: Piece) -> u8 {
        if self.pieces.is_full() {
            // At most 63 pieces remain on the board here, so some slot
            // belongs to a piece that has left it.
            let slot = (0..64u8)
                .find(|slot| !self.grid.contains(&Some(*slot)))
                .unwrap_or(0);
            self.pieces[usize::from(slot)] = piece;
            slot
        } else {
            self.pieces.push(piece);
            (self.pieces.len() - 1) as u8
        }
    }

    /// Takes the occupant off a square.
    pub fn remove(&mut self, sq: Square) -> Option<Piece> {
        let piece = self.get(sq);
        self.grid[sq.index()] = None;
        piece
    }

    /// Moves the occupant of `from` to `to` and returns the piece that
    /// previously stood on `to`, which is discarded.
    ///
    /// Does nothing if `from` is empty.
    pub fn apply_move(&mut self, from: Square, to: Square) -> Option<Piece> {
        let slot = self.grid[from.index()].take()?;
        let captured = self.get(to);
        self.grid[to.index()] = Some(slot);
        captured
    }

    /// Gets the square of a piece.
    pub fn find(&self, id: PieceId) -> Option<Square> {
        let slot = self.slot_of(id)?;
        Square::all().find(|sq| self.grid[sq.index()] == Some(slot))
    }

    /// Gets the square of the king of `side`.
    ///
    /// # Errors
    ///
    /// Returns [`KingNotFound`] if the side has no king on the board.
    pub fn king_of(&self, side: Side) -> Result<Square, KingNotFound> {
        self.pieces()
            .find(|(_, piece)| piece.side == side && piece.role == Role::King)
            .map(|(sq, _)| sq)
            .ok_or(KingNotFound { side })
    }

    /// Iterates over all pieces on the board, in square order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.get(sq).map(|piece| (sq, piece)))
    }

    /// Iterates over the pieces of `side`, in square order.
    pub fn pieces_of(&self, side: Side) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.side == side)
    }

    /// Number of pieces on the board.
    pub fn len(&self) -> usize {
        self.grid.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.grid.iter().all(Option::is_none)
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}

impl FromStr for Board {
    type Err = ParsePlacementError;

    fn from_str(s: &str) -> Result<Board, ParsePlacementError> {
        Board::from_placement(s)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..8).rev() {
            for file in File::ALL {
                f.write_char(
                    Square::new(file, row)
                        .and_then(|sq| self.get(sq))
                        .map_or('.', Piece::char),
                )?;
                f.write_char(if file < File::H { ' ' } else { '\n' })?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
