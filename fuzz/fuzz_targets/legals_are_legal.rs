#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pawnstorm::{check, Game, Move, Side};

#[derive(Debug, Arbitrary)]
struct Data {
    placement: String,
    turn: Side,
    candidate: Move,
}

fuzz_target!(|data: Data| {
    let Ok(game) = Game::from_placement(&data.placement, data.turn) else {
        return;
    };
    if game.outcome().is_some() || game.board().side_at(data.candidate.from) != Some(data.turn) {
        return;
    }

    let legals = game.legal_moves(data.candidate.from).expect("kings");
    let mut played = game.clone();
    let result = played.play(data.candidate.from, data.candidate.to);
    assert_eq!(legals.contains(&data.candidate.to), result.is_ok());

    if result.is_ok() {
        assert_eq!(check::is_king_attacked(played.board(), data.turn), Ok(false));
    }
});
