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

//! Attacks on kings, and the legality filter built on top of them.
//!
//! # Examples
//!
//! ```
//! use pawnstorm::{check, Board, Side};
//!
//! let board: Board = "7r/8/8/8/8/8/8/7K".parse()?;
//! assert_eq!(check::is_king_attacked(&board, Side::First), Ok(true));
//!
//! let escapes = check::find_check_escapes(&board, Side::First)?.expect("in check");
//! assert_eq!(escapes.attackers.len(), 1);
//! assert!(!escapes.is_checkmate());
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

use arrayvec::ArrayVec;

use crate::{
    board::{Board, KingNotFound},
    role::Role,
    rules,
    side::Side,
    square::{Square, SquareList},
    types::Piece,
};

/// Pieces attacking a square. At most eight along lines, plus at most eight
/// knights.
pub type Attackers = ArrayVec<(Square, Piece), 16>;

/// Pieces of side `by` that could capture the occupant of `target`.
///
/// Lines are found by probing from `target` with a synthetic queen of the
/// defending side, knights by scanning the board. Every candidate is then
/// confirmed with its own capture rule. Empty if `target` is empty or
/// holds a piece of side `by`.
pub fn attackers_of(board: &Board, target: Square, by: Side) -> Attackers {
    let mut attackers = Attackers::new();

    let lines = rules::capture_moves(board, !by, Role::Queen, target);
    let knights = board
        .pieces_of(by)
        .filter(|(_, piece)| piece.role == Role::Knight)
        .map(|(sq, _)| sq);

    for sq in lines.into_iter().chain(knights) {
        let Some(piece) = board.get(sq) else {
            continue;
        };
        if rules::capture_moves(board, piece.side, piece.role, sq).contains(&target)
            && !attackers.iter().any(|(known, _)| *known == sq)
        {
            attackers.push((sq, piece));
        }
    }

    attackers
}

/// Tests if the king of `side` is attacked.
///
/// # Errors
///
/// Returns [`KingNotFound`] if `side` has no king.
pub fn is_king_attacked(board: &Board, side: Side) -> Result<bool, KingNotFound> {
    let king = board.king_of(side)?;
    Ok(!attackers_of(board, king, !side).is_empty())
}

/// Tests if moving the occupant of `from` to `to` would leave the king of
/// `side` attacked. The move is played on a copy; `board` is not touched.
///
/// # Errors
///
/// Returns [`KingNotFound`] if `side` has no king after the move.
pub fn would_expose(
    board: &Board,
    from: Square,
    to: Square,
    side: Side,
) -> Result<bool, KingNotFound> {
    let mut after = board.clone();
    after.apply_move(from, to);
    is_king_attacked(&after, side)
}

/// Legal destinations of the piece on `from`: unobstructed moves and
/// captures that do not leave its own king attacked. Empty if `from` is
/// empty.
///
/// # Errors
///
/// Returns [`KingNotFound`] if the mover's side has no king.
pub fn legal_moves(board: &Board, from: Square) -> Result<SquareList, KingNotFound> {
    let Some(piece) = board.get(from) else {
        return Ok(SquareList::new());
    };

    let mut legal = SquareList::new();
    for to in rules::reachable(board, from) {
        if !would_expose(board, from, to, piece.side)? {
            legal.push(to);
        }
    }
    Ok(legal)
}

/// A piece together with its legal destinations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PieceMoves {
    pub from: Square,
    pub piece: Piece,
    pub to: SquareList,
}

/// Legal moves of every piece of `side` that has at least one, in square
/// order.
///
/// # Errors
///
/// Returns [`KingNotFound`] if `side` has no king.
pub fn all_legal_moves(board: &Board, side: Side) -> Result<Vec<PieceMoves>, KingNotFound> {
    board.king_of(side)?;

    let mut all = Vec::new();
    for (from, piece) in board.pieces_of(side) {
        let to = legal_moves(board, from)?;
        if !to.is_empty() {
            all.push(PieceMoves { from, piece, to });
        }
    }
    Ok(all)
}

/// Tests if `side` has any legal move at all.
///
/// # Errors
///
/// Returns [`KingNotFound`] if `side` has no king.
pub fn has_legal_moves(board: &Board, side: Side) -> Result<bool, KingNotFound> {
    board.king_of(side)?;

    for (from, _) in board.pieces_of(side) {
        if !legal_moves(board, from)?.is_empty() {
            return Ok(true);
        }
    }
    Ok(false)
}

/// What a side in check has to work with.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CheckEscapes {
    /// The attacked king and its square.
    pub king: (Square, Piece),
    /// Enemy pieces giving check.
    pub attackers: Attackers,
    /// Pieces with at least one move that resolves the check.
    pub safe_moves: Vec<PieceMoves>,
}

impl CheckEscapes {
    /// No piece can resolve the check.
    pub fn is_checkmate(&self) -> bool {
        self.safe_moves.is_empty()
    }

    /// Safe destinations of the piece on `from`, if any.
    pub fn moves_from(&self, from: Square) -> Option<&SquareList> {
        self.safe_moves
            .iter()
            .find(|moves| moves.from == from)
            .map(|moves| &moves.to)
    }
}

/// Collects the check escapes of `side`, or `None` if its king is not
/// attacked.
///
/// # Errors
///
/// Returns [`KingNotFound`] if `side` has no king.
pub fn find_check_escapes(board: &Board, side: Side) -> Result<Option<CheckEscapes>, KingNotFound> {
    let king_square = board.king_of(side)?;
    let attackers = attackers_of(board, king_square, !side);
    if attackers.is_empty() {
        return Ok(None);
    }

    let Some(king) = board.get(king_square) else {
        return Err(KingNotFound { side });
    };

    Ok(Some(CheckEscapes {
        king: (king_square, king),
        attackers,
        safe_moves: all_legal_moves(board, side)?,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().expect("valid square")
    }

    fn board(placement: &str) -> Board {
        placement.parse().expect("valid placement")
    }

    #[test]
    fn test_file_attack_and_blocker() {
        let mut b = board("7r/8/8/8/8/8/8/7K");
        assert_eq!(is_king_attacked(&b, Side::First), Ok(true));
        assert_eq!(is_king_attacked(&b, Side::Second), Err(KingNotFound { side: Side::Second }));

        b.set(sq("h4"), Some(Piece::new(99, Side::Second, Role::Knight)));
        assert_eq!(is_king_attacked(&b, Side::First), Ok(false));
    }

    #[test]
    fn test_knight_and_pawn_attacks() {
        let b = board("4k3/8/8/8/8/8/3p4/4K3");
        let attackers = attackers_of(&b, sq("e0"), Side::Second);
        assert_eq!(attackers.len(), 1);
        assert_eq!(attackers[0].0, sq("d1"));

        let b = board("4k3/8/8/8/8/5n2/8/4K3");
        assert_eq!(is_king_attacked(&b, Side::First), Ok(true));

        // A pawn straight ahead does not attack.
        let b = board("4k3/8/8/8/8/8/4p3/4K3");
        assert_eq!(is_king_attacked(&b, Side::First), Ok(false));
    }

    #[test]
    fn test_pinned_piece() {
        let b = board("4r1k1/8/8/8/8/8/4B3/4K3");
        let bishop = sq("e1");
        assert_eq!(would_expose(&b, bishop, sq("d2"), Side::First), Ok(true));
        assert_eq!(legal_moves(&b, bishop), Ok(SquareList::new()));

        // Unchanged by the simulation.
        assert_eq!(b, board("4r1k1/8/8/8/8/8/4B3/4K3"));
    }

    #[test]
    fn test_king_cannot_step_into_attack() {
        let b = board("3r2k1/8/8/8/8/8/8/4K3");
        let moves = legal_moves(&b, sq("e0")).expect("king exists");
        assert!(!moves.contains(&sq("d0")));
        assert!(!moves.contains(&sq("d1")));
        assert!(moves.contains(&sq("f1")));
    }

    #[test]
    fn test_check_escapes() {
        // Rook checks along the back row, the knight can block on f0.
        let b = board("6k1/8/8/8/8/8/PPP5/K6r");
        let escapes = find_check_escapes(&b, Side::First)
            .expect("kings exist")
            .expect("in check");
        assert_eq!(escapes.king.0, sq("a0"));
        assert_eq!(escapes.attackers[0].0, sq("h0"));
        assert!(escapes.is_checkmate());

        let b = board("6k1/8/8/8/8/8/PPP2N2/K6r");
        let escapes = find_check_escapes(&b, Side::First)
            .expect("kings exist")
            .expect("in check");
        assert!(!escapes.is_checkmate());
        assert_eq!(escapes.safe_moves.len(), 1);
        let knight = escapes.moves_from(sq("f1")).expect("knight escapes");
        assert!(knight.contains(&sq("h0")));
        assert!(knight.contains(&sq("d0")));
        assert_eq!(knight.len(), 2);
    }

    #[test]
    fn test_no_check() {
        assert_eq!(find_check_escapes(&Board::new(), Side::First), Ok(None));
        assert!(has_legal_moves(&Board::new(), Side::Second).expect("kings exist"));
        assert_eq!(
            all_legal_moves(&Board::new(), Side::First)
                .expect("kings exist")
                .iter()
                .map(|moves| moves.to.len())
                .sum::<usize>(),
            20
        );
    }
}
