#![no_main]

use libfuzzer_sys::fuzz_target;
use pawnstorm::Square;

fuzz_target!(|data: &[u8]| {
    let Ok(square) = Square::from_ascii(data) else {
        return;
    };
    assert_eq!(data, square.to_string().as_bytes());
});
