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

//! The live game: board, side to move, history and phase.

use std::{error::Error, fmt};

use tracing::{debug, info};

use crate::{
    board::{Board, KingNotFound, ParsePlacementError},
    check::{self, CheckEscapes},
    history::{History, Repetition},
    material::Material,
    role::Role,
    search::Opponent,
    side::Side,
    square::{ParseSquareError, Square, SquareList},
    types::{Move, Piece},
};

/// Outcome of a finished game.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Checkmate { winner: Side },
    Stalemate,
    InsufficientMaterial,
    RepetitionDraw(Repetition),
}

impl Outcome {
    pub const fn winner(self) -> Option<Side> {
        match self {
            Outcome::Checkmate { winner } => Some(winner),
            _ => None,
        }
    }

    pub const fn is_draw(self) -> bool {
        self.winner().is_none()
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Outcome::Checkmate { winner } => write!(f, "checkmate, {winner} side wins"),
            Outcome::Stalemate => f.write_str("stalemate"),
            Outcome::InsufficientMaterial => f.write_str("draw by insufficient material"),
            Outcome::RepetitionDraw(repetition) => write!(f, "draw, {repetition}"),
        }
    }
}

/// Where the game stands between calls.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Phase {
    /// Waiting for the side to move.
    Idle,
    /// A piece of the side to move was selected.
    PieceSelected(Square),
    /// A pawn reached the far row and waits to be crowned with
    /// [`Game::promote()`]. The turn has not passed yet.
    Promotion(Square),
    Finished(Outcome),
}

/// Whether a king is in check.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct CheckStatus {
    pub in_check: bool,
    /// The side in check, or the side to move if nobody is.
    pub side: Side,
}

/// Error when playing a move or crowning a pawn.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PlayError {
    /// A move string does not name a square.
    InvalidMoveFormat,
    /// The move breaks the movement, blocking or king safety rules.
    IllegalMove { from: Square, to: Square },
    KingNotFound(KingNotFound),
    /// There is no piece on this square.
    EmptySquare { square: Square },
    /// The piece belongs to the side that is not to move.
    NotYourTurn { side: Side },
    /// A pawn on this square must be crowned first.
    PromotionPending { square: Square },
    /// Not a piece kind a pawn can be crowned as, or no pawn to crown.
    InvalidPromotion,
    GameOver(Outcome),
    /// The side to move has no legal move.
    NoLegalMoves { side: Side },
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            PlayError::InvalidMoveFormat => f.write_str("invalid move format"),
            PlayError::IllegalMove { from, to } => write!(f, "illegal move {from}-{to}"),
            PlayError::KingNotFound(ref err) => fmt::Display::fmt(err, f),
            PlayError::EmptySquare { square } => write!(f, "no piece on {square}"),
            PlayError::NotYourTurn { side } => write!(f, "not the turn of the {side} side"),
            PlayError::PromotionPending { square } => {
                write!(f, "pawn on {square} must be promoted first")
            }
            PlayError::InvalidPromotion => f.write_str("invalid promotion"),
            PlayError::GameOver(outcome) => write!(f, "game over: {outcome}"),
            PlayError::NoLegalMoves { side } => write!(f, "{side} side has no legal moves"),
        }
    }
}

impl Error for PlayError {}

impl From<KingNotFound> for PlayError {
    fn from(err: KingNotFound) -> PlayError {
        PlayError::KingNotFound(err)
    }
}

impl From<ParseSquareError> for PlayError {
    fn from(_: ParseSquareError) -> PlayError {
        PlayError::InvalidMoveFormat
    }
}

/// Error when setting up an invalid position.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PositionError {
    NoKing { side: Side },
    TooManyKings { side: Side },
    TooManyPieces { side: Side },
    /// The side not to move is in check.
    OppositeCheck { side: Side },
    InvalidPlacement,
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            PositionError::NoKing { side } => write!(f, "{side} side has no king"),
            PositionError::TooManyKings { side } => write!(f, "{side} side has more than one king"),
            PositionError::TooManyPieces { side } => {
                write!(f, "{side} side has more than 16 pieces")
            }
            PositionError::OppositeCheck { side } => {
                write!(f, "{side} side is in check but not to move")
            }
            PositionError::InvalidPlacement => f.write_str("invalid piece placement"),
        }
    }
}

impl Error for PositionError {}

impl From<ParsePlacementError> for PositionError {
    fn from(_: ParsePlacementError) -> PositionError {
        PositionError::InvalidPlacement
    }
}

/// A game in progress.
///
/// Moves submitted with [`Game::play()`] leave a crowning pawn pending
/// until [`Game::promote()`]; the built-in [`Opponent`] always crowns a
/// queen.
///
/// # Examples
///
/// ```
/// use pawnstorm::{Game, Phase, Side};
///
/// let mut game = Game::new();
/// let e1 = "e1".parse()?;
/// let e3 = "e3".parse()?;
/// assert_eq!(game.legal_moves(e1)?.len(), 2);
///
/// game.play(e1, e3)?;
/// assert_eq!(game.turn(), Side::Second);
/// assert_eq!(game.phase(), Phase::Idle);
///
/// let reply = game.play_opponent(&Default::default())?;
/// assert_eq!(game.board().get(reply.to).map(|p| p.side), Some(Side::Second));
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    turn: Side,
    history: History,
    phase: Phase,
}

impl Game {
    /// The initial layout, first side to move.
    pub fn new() -> Game {
        Game {
            board: Board::new(),
            turn: Side::First,
            history: History::new(),
            phase: Phase::Idle,
        }
    }

    /// Sets up a game from a custom board.
    ///
    /// # Errors
    ///
    /// Returns [`PositionError`] unless each side has exactly one king and
    /// at most 16 pieces, and the side not to move is not in check.
    pub fn from_board(board: Board, turn: Side) -> Result<Game, PositionError> {
        let material = Material::from_board(&board);
        for side in Side::ALL {
            match material.side(side).by_role(Role::King) {
                0 => return Err(PositionError::NoKing { side }),
                1 => (),
                _ => return Err(PositionError::TooManyKings { side }),
            }
            if material.side(side).count() > 16 {
                return Err(PositionError::TooManyPieces { side });
            }
        }

        let opposite_check = check::is_king_attacked(&board, !turn)
            .map_err(|KingNotFound { side }| PositionError::NoKing { side })?;
        if opposite_check {
            return Err(PositionError::OppositeCheck { side: !turn });
        }

        let mut game = Game {
            board,
            turn,
            history: History::new(),
            phase: Phase::Idle,
        };
        game.update_phase()
            .map_err(|KingNotFound { side }| PositionError::NoKing { side })?;
        Ok(game)
    }

    /// Sets up a game from a piece placement, see
    /// [`Board::from_placement()`].
    ///
    /// # Errors
    ///
    /// Returns [`PositionError`] if the placement cannot be parsed or
    /// describes an invalid position.
    pub fn from_placement(placement: &str, turn: Side) -> Result<Game, PositionError> {
        Game::from_board(placement.parse()?, turn)
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The side to move.
    #[inline]
    pub fn turn(&self) -> Side {
        self.turn
    }

    #[inline]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Legal destinations of the piece on `square`, whichever side it
    /// belongs to. Empty for an empty square.
    ///
    /// # Errors
    ///
    /// Returns [`KingNotFound`] if the piece's side has no king.
    pub fn legal_moves(&self, square: Square) -> Result<SquareList, KingNotFound> {
        check::legal_moves(&self.board, square)
    }

    /// Selects a piece of the side to move and returns its legal
    /// destinations.
    ///
    /// # Errors
    ///
    /// Fails if the game is over or waiting for a promotion, if `square`
    /// is empty or does not hold a piece of the side to move.
    pub fn select(&mut self, square: Square) -> Result<SquareList, PlayError> {
        self.ensure_playable()?;

        let piece = self
            .board
            .get(square)
            .ok_or(PlayError::EmptySquare { square })?;
        if piece.side != self.turn {
            return Err(PlayError::NotYourTurn { side: piece.side });
        }

        let moves = match self.check_escapes()? {
            Some(escapes) => escapes.moves_from(square).cloned().unwrap_or_default(),
            None => self.legal_moves(square)?,
        };
        self.phase = Phase::PieceSelected(square);
        Ok(moves)
    }

    /// Plays a move of the side to move.
    ///
    /// When a pawn reaches the far row, the game enters
    /// [`Phase::Promotion`] and waits for [`Game::promote()`].
    ///
    /// # Errors
    ///
    /// Returns [`PlayError::IllegalMove`] if `to` is not a legal destination
    /// of the piece on `from`. The game is unchanged on error.
    #[doc(alias = "apply_move")]
    pub fn play(&mut self, from: Square, to: Square) -> Result<(), PlayError> {
        self.ensure_playable()?;

        let piece = self
            .board
            .get(from)
            .ok_or(PlayError::IllegalMove { from, to })?;
        if piece.side != self.turn {
            return Err(PlayError::NotYourTurn { side: piece.side });
        }
        if !self.legal_moves(from)?.contains(&to) {
            return Err(PlayError::IllegalMove { from, to });
        }

        self.commit(piece, from, to);

        if is_crowning(piece, to) {
            self.phase = Phase::Promotion(to);
            Ok(())
        } else {
            self.end_turn()
        }
    }

    /// Plays a move given as two square names.
    ///
    /// # Errors
    ///
    /// Returns [`PlayError::InvalidMoveFormat`] if either name is not a
    /// square, otherwise as [`Game::play()`].
    pub fn play_str(&mut self, from: &str, to: &str) -> Result<(), PlayError> {
        self.play(from.parse()?, to.parse()?)
    }

    /// Plays a move and crowns the pawn as `role` if it reaches the far
    /// row. `role` is ignored for other moves.
    ///
    /// # Errors
    ///
    /// Returns [`PlayError::InvalidPromotion`] if `role` is not a promotion
    /// target, otherwise as [`Game::play()`].
    pub fn play_with_promotion(
        &mut self,
        from: Square,
        to: Square,
        role: Role,
    ) -> Result<(), PlayError> {
        if !role.is_promotion_target() {
            return Err(PlayError::InvalidPromotion);
        }
        self.play(from, to)?;
        if let Phase::Promotion(square) = self.phase {
            self.promote(square, role)?;
        }
        Ok(())
    }

    /// Crowns the pending pawn on `square` and passes the turn.
    ///
    /// # Errors
    ///
    /// Returns [`PlayError::InvalidPromotion`] if no pawn is waiting on
    /// `square` or `role` is not a promotion target.
    pub fn promote(&mut self, square: Square, role: Role) -> Result<(), PlayError> {
        if self.phase != Phase::Promotion(square) || !role.is_promotion_target() {
            return Err(PlayError::InvalidPromotion);
        }
        let pawn = self.board.get(square).ok_or(PlayError::InvalidPromotion)?;

        self.board.set(square, Some(pawn.promoted(role)));
        debug!(side = %pawn.side, %square, %role, "promoted");
        self.end_turn()
    }

    /// Computes the reply of `opponent` for the side to move and plays it,
    /// crowning a queen if a pawn reaches the far row.
    ///
    /// # Errors
    ///
    /// Returns [`PlayError::NoLegalMoves`] if there is nothing to play.
    pub fn play_opponent(&mut self, opponent: &Opponent) -> Result<Move, PlayError> {
        self.ensure_playable()?;

        let candidate = opponent.choose(self)?;
        let m = Move::new(candidate.from, candidate.to);
        debug!(side = %self.turn, %m, score = candidate.score, "opponent move");

        self.commit(candidate.piece, m.from, m.to);
        if is_crowning(candidate.piece, m.to) {
            self.board
                .set(m.to, Some(candidate.piece.promoted(Role::Queen)));
            debug!(side = %self.turn, square = %m.to, "auto promoted");
        }
        self.end_turn()?;
        Ok(m)
    }

    /// Computes, without playing it, the move the default [`Opponent`]
    /// would choose for the side to move.
    ///
    /// # Errors
    ///
    /// Returns [`PlayError::NoLegalMoves`] if there is nothing to play.
    pub fn compute_opponent_move(&self) -> Result<Move, PlayError> {
        self.ensure_playable()?;
        let candidate = Opponent::default().choose(self)?;
        Ok(Move::new(candidate.from, candidate.to))
    }

    /// Tests if `piece` already moved to `square` twice, so that another
    /// move there draws the game.
    pub fn is_repeating_destination(&self, piece: Piece, square: Square) -> bool {
        self.history.is_repeating(piece, square)
    }

    /// Check escapes of the side to move, or `None` if it is not in check.
    ///
    /// # Errors
    ///
    /// Returns [`KingNotFound`] if the side to move has no king.
    pub fn check_escapes(&self) -> Result<Option<CheckEscapes>, KingNotFound> {
        check::find_check_escapes(&self.board, self.turn)
    }

    /// Reports a king in check, looking at the side to move first.
    ///
    /// # Errors
    ///
    /// Returns [`KingNotFound`] if a side has no king.
    pub fn check_status(&self) -> Result<CheckStatus, KingNotFound> {
        for side in [self.turn, !self.turn] {
            if check::is_king_attacked(&self.board, side)? {
                return Ok(CheckStatus {
                    in_check: true,
                    side,
                });
            }
        }
        Ok(CheckStatus {
            in_check: false,
            side: self.turn,
        })
    }

    /// Detects the end of the game, for the side to move.
    ///
    /// Checked in order: checkmate, insufficient material, repetition,
    /// stalemate.
    ///
    /// # Errors
    ///
    /// Returns [`KingNotFound`] if the side to move has no king.
    pub fn terminal_status(&self) -> Result<Option<Outcome>, KingNotFound> {
        if let Some(escapes) = self.check_escapes()? {
            if escapes.is_checkmate() {
                return Ok(Some(Outcome::Checkmate {
                    winner: !self.turn,
                }));
            }
        }

        if Material::from_board(&self.board).is_insufficient() {
            return Ok(Some(Outcome::InsufficientMaterial));
        }

        if let Some(repetition) = self.history.repetition(!self.turn) {
            return Ok(Some(Outcome::RepetitionDraw(repetition)));
        }

        if !check::has_legal_moves(&self.board, self.turn)? {
            return Ok(Some(Outcome::Stalemate));
        }

        Ok(None)
    }

    fn ensure_playable(&self) -> Result<(), PlayError> {
        match self.phase {
            Phase::Finished(outcome) => Err(PlayError::GameOver(outcome)),
            Phase::Promotion(square) => Err(PlayError::PromotionPending { square }),
            Phase::Idle | Phase::PieceSelected(_) => Ok(()),
        }
    }

    fn commit(&mut self, piece: Piece, from: Square, to: Square) {
        let captured = self.board.apply_move(from, to);
        self.history.push(piece, to);
        match captured {
            Some(captured) => debug!(
                side = %piece.side,
                piece = %piece.role,
                %from,
                %to,
                captured = %captured.role,
                "move"
            ),
            None => debug!(side = %piece.side, piece = %piece.role, %from, %to, "move"),
        }
    }

    fn end_turn(&mut self) -> Result<(), PlayError> {
        self.turn = !self.turn;
        self.update_phase()?;
        Ok(())
    }

    fn update_phase(&mut self) -> Result<(), KingNotFound> {
        self.phase = match self.terminal_status()? {
            Some(outcome) => {
                info!(%outcome, "game over");
                Phase::Finished(outcome)
            }
            None => Phase::Idle,
        };
        Ok(())
    }
}

impl Default for Game {
    fn default() -> Game {
        Game::new()
    }
}

fn is_crowning(piece: Piece, to: Square) -> bool {
    piece.role == Role::Pawn && to.row() == piece.side.promotion_row()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceId;

    fn sq(name: &str) -> Square {
        name.parse().expect("valid square")
    }

    fn game(placement: &str, turn: Side) -> Game {
        Game::from_placement(placement, turn).expect("valid position")
    }

    #[test]
    fn test_pawn_steps() {
        let mut game = Game::new();
        let moves = game.legal_moves(sq("e1")).expect("kings exist");
        assert_eq!(moves.as_slice(), &[sq("e2"), sq("e3")]);

        game.play(sq("e1"), sq("e2")).expect("legal");
        game.play(sq("a6"), sq("a5")).expect("legal");
        let moves = game.legal_moves(sq("e2")).expect("kings exist");
        assert_eq!(moves.as_slice(), &[sq("e3")]);
    }

    #[test]
    fn test_rejects() {
        let mut game = Game::new();
        assert_eq!(
            game.play(sq("e1"), sq("e4")),
            Err(PlayError::IllegalMove {
                from: sq("e1"),
                to: sq("e4")
            })
        );
        assert_eq!(
            game.play(sq("e6"), sq("e5")),
            Err(PlayError::NotYourTurn { side: Side::Second })
        );
        assert_eq!(
            game.play(sq("e3"), sq("e4")),
            Err(PlayError::IllegalMove {
                from: sq("e3"),
                to: sq("e4")
            })
        );
        assert_eq!(game.play_str("e1", "e9"), Err(PlayError::InvalidMoveFormat));
        assert_eq!(game.board(), &Board::new());
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_select() {
        let mut game = Game::new();
        let moves = game.select(sq("g0")).expect("own knight");
        assert_eq!(moves.len(), 2);
        assert_eq!(game.phase(), Phase::PieceSelected(sq("g0")));
        assert_eq!(
            game.select(sq("g7")),
            Err(PlayError::NotYourTurn { side: Side::Second })
        );
        assert_eq!(
            game.select(sq("g4")),
            Err(PlayError::EmptySquare { square: sq("g4") })
        );
        assert_eq!(game.phase(), Phase::PieceSelected(sq("g0")));
    }

    #[test]
    fn test_pending_promotion() {
        let mut game = game("7k/P7/8/8/8/8/8/K7", Side::First);
        game.play(sq("a6"), sq("a7")).expect("legal");
        assert_eq!(game.phase(), Phase::Promotion(sq("a7")));
        assert_eq!(game.turn(), Side::First);
        assert_eq!(
            game.play(sq("a0"), sq("a1")),
            Err(PlayError::PromotionPending { square: sq("a7") })
        );
        assert_eq!(game.promote(sq("a7"), Role::King), Err(PlayError::InvalidPromotion));
        assert_eq!(game.promote(sq("a6"), Role::Rook), Err(PlayError::InvalidPromotion));

        game.promote(sq("a7"), Role::Rook).expect("pending");
        let rook = game.board().get(sq("a7")).expect("crowned");
        assert_eq!(rook.role, Role::Rook);
        assert_eq!(rook.id, PieceId(2));
        assert_eq!(game.turn(), Side::Second);
        assert_eq!(game.check_status(), Ok(CheckStatus { in_check: true, side: Side::Second }));
    }

    #[test]
    fn test_play_with_promotion() {
        let mut game = game("7k/P7/8/8/8/8/8/K7", Side::First);
        assert_eq!(
            game.play_with_promotion(sq("a6"), sq("a7"), Role::Pawn),
            Err(PlayError::InvalidPromotion)
        );
        game.play_with_promotion(sq("a6"), sq("a7"), Role::Queen)
            .expect("legal");
        assert_eq!(game.board().get(sq("a7")).map(|p| p.role), Some(Role::Queen));
        assert_eq!(game.phase(), Phase::Idle);
    }

    #[test]
    fn test_checkmate() {
        // Back row mate: the rook on d0 goes to d7.
        let mut game = game("6k1/5ppp/8/8/8/8/8/K2R4", Side::First);
        game.play(sq("d0"), sq("d7")).expect("legal");
        let outcome = Outcome::Checkmate { winner: Side::First };
        assert_eq!(game.outcome(), Some(outcome));
        assert_eq!(
            game.play(sq("g7"), sq("h7")),
            Err(PlayError::GameOver(outcome))
        );
    }

    #[test]
    fn test_stalemate() {
        let mut game = game("k7/8/1Q6/8/8/8/8/7K", Side::First);
        assert_eq!(game.terminal_status(), Ok(None));
        game.play(sq("b5"), sq("c6")).expect("legal");
        assert_eq!(game.outcome(), Some(Outcome::Stalemate));
    }

    #[test]
    fn test_insufficient_material_before_stalemate() {
        let game = game("8/8/8/8/8/8/8/K1k5", Side::First);
        assert_eq!(game.outcome(), Some(Outcome::InsufficientMaterial));
    }

    #[test]
    fn test_position_errors() {
        assert_eq!(
            Game::from_placement("8/8/8/8/8/8/8/K7", Side::First).map(|_| ()),
            Err(PositionError::NoKing { side: Side::Second })
        );
        assert_eq!(
            Game::from_placement("k7/8/8/8/8/8/8/KK6", Side::First).map(|_| ()),
            Err(PositionError::TooManyKings { side: Side::First })
        );
        assert_eq!(
            Game::from_placement("k7/8/8/8/8/8/8/9", Side::First).map(|_| ()),
            Err(PositionError::InvalidPlacement)
        );
        assert_eq!(
            Game::from_placement("k7/8/8/8/8/PPPPPPPP/PPPPPPPP/KPPPPPPP", Side::First)
                .map(|_| ()),
            Err(PositionError::TooManyPieces { side: Side::First })
        );
    }

    #[test]
    fn test_opposite_check() {
        // The rook could take the king on a7.
        assert_eq!(
            Game::from_placement("k6R/8/8/8/8/8/8/K7", Side::First).map(|_| ()),
            Err(PositionError::OppositeCheck { side: Side::Second })
        );

        let mut game = game("k6R/8/8/8/8/8/8/K7", Side::Second);
        assert_eq!(
            game.check_status(),
            Ok(CheckStatus {
                in_check: true,
                side: Side::Second
            })
        );
        assert_eq!(
            game.play(sq("h7"), sq("a7")),
            Err(PlayError::NotYourTurn { side: Side::First })
        );
        assert_eq!(game.board().len(), 3);
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_repetition_draw() {
        let mut game = game("k7/8/8/8/8/8/8/K6R", Side::First);
        let moves = [
            ("h0", "h3"),
            ("a7", "b7"),
            ("h3", "h2"),
            ("b7", "a7"),
            ("h2", "h3"),
            ("a7", "b7"),
            ("h3", "h2"),
            ("b7", "a7"),
        ];
        for (from, to) in moves {
            game.play_str(from, to).expect("legal");
        }
        assert_eq!(game.phase(), Phase::Idle);

        let rook = game.board().get(sq("h2")).expect("rook");
        assert!(game.is_repeating_destination(rook, sq("h3")));

        game.play_str("h2", "h3").expect("legal");
        match game.outcome() {
            Some(Outcome::RepetitionDraw(repetition)) => {
                assert_eq!(repetition.side, Side::First);
                assert_eq!(repetition.piece.role, Role::Rook);
                assert_eq!(repetition.to, sq("h3"));
            }
            other => panic!("expected repetition draw, got {other:?}"),
        }
    }
}
