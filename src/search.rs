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

//! A shallow heuristic opponent.
//!
//! Every legal move is scored by an exchange estimate on its destination
//! square: the cheapest enemy piece recaptures, the most valuable own
//! piece answers, and the exchange is followed along that single line
//! until nobody can recapture or the ply limit is reached. This is not a
//! game tree search.
//!
//! # Examples
//!
//! ```
//! use pawnstorm::{Game, Opponent, SearchConfig};
//!
//! let game: Game = Game::new();
//! let opponent = Opponent::new(SearchConfig::default().with_max_plies(8));
//! let ranked = opponent.rank(&game)?;
//! assert_eq!(ranked.len(), 20);
//! assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
//! # Ok::<_, pawnstorm::KingNotFound>(())
//! ```

use std::fmt;

use tracing::trace;

use crate::{
    board::{Board, KingNotFound},
    check::{self, PieceMoves},
    game::{Game, PlayError},
    role::{PieceValues, Role},
    rules,
    side::Side,
    square::Square,
    types::{Move, Piece},
};

/// Tuning of the [`Opponent`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Plies an exchange is followed for. Values outside `2..=64` are
    /// clamped.
    pub max_plies: u32,

    /// Material weights.
    pub values: PieceValues,

    /// Added for a move that checks the enemy king without the king being
    /// able to take the checker. Subtracted when the enemy recapture does
    /// the same to our king.
    pub check_bonus: i32,

    /// Score of a move that neither captures nor can be recaptured.
    pub quiet_move_score: i32,

    /// Skip moves that would send a piece to the same square a third time.
    pub avoid_repetition: bool,
}

impl SearchConfig {
    pub const MIN_PLIES: u32 = 2;
    pub const MAX_PLIES: u32 = 64;

    #[must_use]
    pub fn with_max_plies(mut self, max_plies: u32) -> SearchConfig {
        self.max_plies = max_plies.clamp(Self::MIN_PLIES, Self::MAX_PLIES);
        self
    }

    #[must_use]
    pub fn with_values(mut self, values: PieceValues) -> SearchConfig {
        self.values = values;
        self
    }

    #[must_use]
    pub fn with_check_bonus(mut self, check_bonus: i32) -> SearchConfig {
        self.check_bonus = check_bonus;
        self
    }

    #[must_use]
    pub fn with_quiet_move_score(mut self, quiet_move_score: i32) -> SearchConfig {
        self.quiet_move_score = quiet_move_score;
        self
    }

    #[must_use]
    pub fn with_avoid_repetition(mut self, avoid_repetition: bool) -> SearchConfig {
        self.avoid_repetition = avoid_repetition;
        self
    }

    fn plies(&self) -> u32 {
        self.max_plies.clamp(Self::MIN_PLIES, Self::MAX_PLIES)
    }
}

impl Default for SearchConfig {
    fn default() -> SearchConfig {
        SearchConfig {
            max_plies: 32,
            values: PieceValues::default(),
            check_bonus: 1000,
            quiet_move_score: -1,
            avoid_repetition: true,
        }
    }
}

/// A scored move.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Candidate {
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
    pub score: i32,
}

impl Candidate {
    pub const fn to_move(self) -> Move {
        Move::new(self.from, self.to)
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}-{} ({})", self.piece.role, self.from, self.to, self.score)
    }
}

/// Result of one recapture round on a square.
struct Exchange {
    /// For the cheapest enemy recapture.
    defensive: i32,
    /// For the most valuable own answer, with the board after the enemy
    /// recapture and the square of the answering piece.
    offensive: Option<(i32, Board, Square)>,
}

/// The heuristic opponent. Holds no game state.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Opponent {
    config: SearchConfig,
}

impl Opponent {
    pub fn new(config: SearchConfig) -> Opponent {
        Opponent { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    fn value(&self, role: Role) -> i32 {
        self.config.values.get(role)
    }

    /// Scores every legal move of the side to move, best first. Moves with
    /// equal scores keep the enumeration order: piece by piece in square
    /// order, captures of the most valuable pieces first, then quiet moves.
    ///
    /// # Errors
    ///
    /// Returns [`KingNotFound`] if a side has no king.
    pub fn rank(&self, game: &Game) -> Result<Vec<Candidate>, KingNotFound> {
        let board = game.board();
        let side = game.turn();

        let pieces = match game.check_escapes()? {
            Some(escapes) => escapes.safe_moves,
            None => check::all_legal_moves(board, side)?,
        };

        let mut ranked = Vec::new();
        for PieceMoves { from, piece, to } in pieces {
            let mut destinations: Vec<Square> = to.into_iter().collect();
            destinations.sort_by_key(|&to| {
                std::cmp::Reverse(board.get(to).map_or(i32::MIN, |p| self.value(p.role)))
            });

            for to in destinations {
                let score = self.predict(board, from, to)?;
                trace!(%piece, %from, %to, score, "candidate");
                ranked.push(Candidate {
                    piece,
                    from,
                    to,
                    score,
                });
            }
        }

        ranked.sort_by_key(|candidate| std::cmp::Reverse(candidate.score));
        Ok(ranked)
    }

    /// Picks the move to play for the side to move, without playing it.
    ///
    /// A move that would send a piece to the same square a third time is
    /// passed over for the next best one. If all moves would, the best one
    /// is taken anyway.
    ///
    /// # Errors
    ///
    /// Returns [`PlayError::NoLegalMoves`] if there is nothing to play.
    pub fn choose(&self, game: &Game) -> Result<Candidate, PlayError> {
        let ranked = self.rank(game)?;
        let best = ranked
            .first()
            .copied()
            .ok_or(PlayError::NoLegalMoves { side: game.turn() })?;

        if !self.config.avoid_repetition {
            return Ok(best);
        }

        Ok(ranked
            .into_iter()
            .find(|c| !game.is_repeating_destination(c.piece, c.to))
            .unwrap_or(best))
    }

    /// Scores the move `from`-`to` on `board`.
    ///
    /// The exchange on the destination is followed with an accumulator.
    /// Each round covers two plies: the enemy recapture and the own answer.
    /// The answering piece becomes the mover of the next round, whose
    /// capture was already counted, so it is scored as capturing nothing.
    ///
    /// # Errors
    ///
    /// Returns [`KingNotFound`] if a side has no king.
    pub fn predict(&self, board: &Board, from: Square, to: Square) -> Result<i32, KingNotFound> {
        let mut board = board.clone();
        let mut from = from;
        let mut fallback = None;
        let mut score = 0;
        let mut plies = 0;

        loop {
            let Some(mover) = board.get(from) else {
                break;
            };
            let captured = board.apply_move(from, to);
            let captured_value = match fallback {
                None => captured.map_or(0, |p| self.value(p.role)),
                Some(_) => 0,
            };
            let fallback_score = fallback.unwrap_or(match captured {
                Some(p) => self.value(p.role),
                None => self.config.quiet_move_score,
            });

            // A responder's check was already scored by the exchange.
            if fallback.is_none() && gives_unanswered_check(&board, to)? {
                score += self.config.check_bonus;
            }

            let Some(exchange) = self.exchange(&board, to, mover, captured_value)? else {
                score += fallback_score;
                break;
            };
            score += exchange.defensive;

            let Some((offensive, recaptured, responder)) = exchange.offensive else {
                break;
            };
            score += offensive;

            plies += 2;
            if plies >= self.config.plies() {
                break;
            }

            board = recaptured;
            from = responder;
            fallback = Some(0);
        }

        Ok(score)
    }

    /// One recapture round on `to`, where `mover` just arrived on `board`.
    fn exchange(
        &self,
        board: &Board,
        to: Square,
        mover: Piece,
        captured_value: i32,
    ) -> Result<Option<Exchange>, KingNotFound> {
        let attackers = self.recapturers(board, to, !mover.side)?;
        let Some(&(attacker_square, attacker)) = attackers
            .iter()
            .min_by_key(|(_, piece)| self.value(piece.role))
        else {
            return Ok(None);
        };

        let mut recaptured = board.clone();
        recaptured.apply_move(attacker_square, to);

        let defensive = if gives_unanswered_check(&recaptured, to)? {
            captured_value - self.config.check_bonus
        } else {
            captured_value - self.value(mover.role)
        };

        let responder = self
            .recapturers(&recaptured, to, mover.side)?
            .into_iter()
            .rev()
            .max_by_key(|(_, piece)| self.value(piece.role));

        let offensive = match responder {
            Some((responder_square, _)) => {
                let mut answered = recaptured.clone();
                answered.apply_move(responder_square, to);
                let gained = self.value(attacker.role);
                let offensive = if gives_unanswered_check(&answered, to)? {
                    self.config.check_bonus + gained
                } else {
                    gained
                };
                Some((offensive, recaptured, responder_square))
            }
            None => None,
        };

        Ok(Some(Exchange {
            defensive,
            offensive,
        }))
    }

    /// Pieces of `by` that can capture on `target`. A king is only counted
    /// if the capture is safe for it.
    fn recapturers(
        &self,
        board: &Board,
        target: Square,
        by: Side,
    ) -> Result<Vec<(Square, Piece)>, KingNotFound> {
        let mut recapturers = Vec::new();
        for (sq, piece) in check::attackers_of(board, target, by) {
            if piece.role == Role::King && check::would_expose(board, sq, target, by)? {
                continue;
            }
            recapturers.push((sq, piece));
        }
        Ok(recapturers)
    }
}

/// Tests if the piece on `at` attacks the enemy king, and the king cannot
/// take it.
fn gives_unanswered_check(board: &Board, at: Square) -> Result<bool, KingNotFound> {
    let Some(piece) = board.get(at) else {
        return Ok(false);
    };
    let king = board.king_of(!piece.side)?;
    if !rules::capture_moves(board, piece.side, piece.role, at).contains(&king) {
        return Ok(false);
    }
    let king_takes = king.distance(at) == 1 && !check::would_expose(board, king, at, !piece.side)?;
    Ok(!king_takes)
}
