#![no_main]

use libfuzzer_sys::fuzz_target;
use pawnstorm::Board;

fuzz_target!(|data: &[u8]| {
    let Ok(placement) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(board) = Board::from_placement(placement) else {
        return;
    };
    let roundtripped = Board::from_placement(&board.placement()).expect("roundtrip");
    assert_eq!(board.placement(), roundtripped.placement());
    assert_eq!(board.len(), roundtripped.len());
});
