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

//! Count legal move paths.
//!
//! # Examples
//!
//! ```
//! use pawnstorm::{perft, Game};
//!
//! let game = Game::new();
//! assert_eq!(perft(&game, 1)?, 20);
//! assert_eq!(perft(&game, 2)?, 400);
//! assert_eq!(perft(&game, 3)?, 8902);
//! # Ok::<_, pawnstorm::KingNotFound>(())
//! ```

use crate::{
    board::{Board, KingNotFound},
    check,
    game::Game,
    role::Role,
    side::Side,
};

/// Counts legal move paths of a given length.
///
/// Each way to crown a pawn counts as a separate move. Draws by material
/// or repetition are not detected. Useful for comparing, testing and
/// debugging move generation.
///
/// # Errors
///
/// Returns [`KingNotFound`] if a side loses its king on the way.
pub fn perft(game: &Game, depth: u32) -> Result<u64, KingNotFound> {
    perft_board(game.board(), game.turn(), depth)
}

fn perft_board(board: &Board, turn: Side, depth: u32) -> Result<u64, KingNotFound> {
    if depth < 1 {
        return Ok(1);
    }

    let mut nodes = 0;
    for moves in check::all_legal_moves(board, turn)? {
        for to in moves.to {
            let crowning =
                moves.piece.role == Role::Pawn && to.row() == turn.promotion_row();
            let choices: &[Role] = if crowning {
                &[Role::Queen, Role::Rook, Role::Bishop, Role::Knight]
            } else {
                &[moves.piece.role]
            };

            if depth == 1 {
                nodes += choices.len() as u64;
                continue;
            }

            for &role in choices {
                let mut child = board.clone();
                child.apply_move(moves.from, to);
                if crowning {
                    child.set(to, Some(moves.piece.promoted(role)));
                }
                nodes += perft_board(&child, !turn, depth - 1)?;
            }
        }
    }
    Ok(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_promotions() {
        let game = Game::from_placement("7k/P7/8/8/8/8/8/K7", Side::First).expect("valid");
        // Four crowning choices plus three king moves.
        assert_eq!(perft(&game, 1), Ok(7));
    }

    #[test]
    fn test_checkmated() {
        let game = Game::from_placement("6k1/5ppp/8/8/8/8/8/K2R4", Side::First).expect("valid");
        assert_eq!(perft(&game, 0), Ok(1));
        let mated = {
            let mut game = game;
            game.play_str("d0", "d7").expect("legal");
            game
        };
        assert_eq!(perft(&mated, 1), Ok(0));
    }
}
