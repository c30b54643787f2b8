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

//! A chess rules engine with a shallow heuristic opponent.
//!
//! Squares are named by column letter and row index, with rows counted
//! from `0`: the first side's king starts on `e0`, the second side's on
//! `e7`. There is no castling and no en passant.
//!
//! # Examples
//!
//! List legal moves in the starting position:
//!
//! ```
//! use pawnstorm::Game;
//!
//! let game = Game::new();
//! let e1 = "e1".parse()?;
//! let moves = game.legal_moves(e1)?;
//! assert_eq!(moves.len(), 2); // e2 and e3
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! Play against the opponent:
//!
//! ```
//! use pawnstorm::{Game, Opponent, SearchConfig};
//!
//! let mut game = Game::new();
//! let opponent = Opponent::new(SearchConfig::default());
//!
//! game.play_str("e1", "e3")?;
//! let reply = game.play_opponent(&opponent)?;
//! println!("opponent played {reply}");
//! # Ok::<_, pawnstorm::PlayError>(())
//! ```
//!
//! Detect game end conditions:
//!
//! ```
//! use pawnstorm::{Game, Outcome, Side};
//!
//! let game = Game::from_placement("8/8/8/4k3/8/8/8/K7", Side::First)?;
//! assert_eq!(game.outcome(), Some(Outcome::InsufficientMaterial));
//! # Ok::<_, pawnstorm::PositionError>(())
//! ```
//!
//! # Logging
//!
//! Played moves and opponent decisions are reported through
//! [`tracing`](https://docs.rs/tracing). No subscriber is installed.
//!
//! # Feature flags
//!
//! * `serde`: Implements [`serde::Serialize`](https://docs.rs/serde/1/serde/trait.Serialize.html)
//!   and [`serde::Deserialize`](https://docs.rs/serde/1/serde/trait.Deserialize.html) for
//!   vocabulary types, outcomes and the search configuration.
//! * `arbitrary`: Implements [`arbitrary::Arbitrary`](https://docs.rs/arbitrary/1/arbitrary/trait.Arbitrary.html)
//!   for vocabulary types.
//! * `nohash-hasher`: Implements
//!   [`nohash_hasher::IsEnabled`](https://docs.rs/nohash-hasher/0.2/nohash_hasher/trait.IsEnabled.html)
//!   for sensible types.

#![doc(html_root_url = "https://docs.rs/pawnstorm/0.1.0")]
#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]
#![cfg_attr(docs_rs, feature(doc_auto_cfg))]

mod perft;
mod role;
mod side;
mod types;

pub mod board;
pub mod check;
pub mod game;
pub mod history;
pub mod material;
pub mod rules;
pub mod search;
pub mod square;

pub use board::{Board, KingNotFound, ParsePlacementError};
pub use game::{CheckStatus, Game, Outcome, Phase, PlayError, PositionError};
pub use history::{History, Repetition};
pub use perft::perft;
pub use role::{ByRole, PieceValues, Role};
pub use search::{Candidate, Opponent, SearchConfig};
pub use side::{BySide, ParseSideError, Side};
pub use square::{File, ParseSquareError, Square, SquareList};
pub use types::{Move, Piece, PieceId};

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for File {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Square {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Role {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Side {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for PieceId {}
