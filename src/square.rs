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

//! Squares and the move-string codec.
//!
//! A square is written as its column letter followed by its row index,
//! where rows are counted from `0` (the first side's back row) to `7`.
//! So the first side's king starts on `e0` and its king pawn on `e1`.

use std::{error::Error, fmt, str::FromStr};

use arrayvec::ArrayVec;

/// A column of the board, `a` to `h`.
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[repr(u8)]
pub enum File {
    A = 0,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl File {
    #[inline]
    pub const fn new(index: u8) -> Option<File> {
        Some(match index {
            0 => File::A,
            1 => File::B,
            2 => File::C,
            3 => File::D,
            4 => File::E,
            5 => File::F,
            6 => File::G,
            7 => File::H,
            _ => return None,
        })
    }

    #[inline]
    pub fn from_char(ch: char) -> Option<File> {
        if ch.is_ascii_lowercase() {
            File::new(ch as u8 - b'a')
        } else {
            None
        }
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    #[inline]
    pub fn char(self) -> char {
        char::from(b'a' + self as u8)
    }

    /// `a` to `h`, in this order.
    pub const ALL: [File; 8] = [
        File::A,
        File::B,
        File::C,
        File::D,
        File::E,
        File::F,
        File::G,
        File::H,
    ];
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

/// Error when a move string does not name a square on the board.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseSquareError;

impl fmt::Display for ParseSquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid move format")
    }
}

impl Error for ParseSquareError {}

/// A square of the 8x8 board.
///
/// Squares are indexed `0..64` in row-major order, so that `a0` is `0`,
/// `h0` is `7` and `h7` is `63`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Square(u8);

impl Square {
    #[inline]
    pub const fn new(file: File, row: u8) -> Option<Square> {
        if row < 8 {
            Some(Square(row * 8 + file as u8))
        } else {
            None
        }
    }

    /// Gets the square with the given signed coordinates, or `None` if they
    /// are off the board.
    #[inline]
    pub const fn from_coords(file: i8, row: i8) -> Option<Square> {
        if 0 <= file && file < 8 && 0 <= row && row < 8 {
            Some(Square((row * 8 + file) as u8))
        } else {
            None
        }
    }

    /// Gets the square with the given index.
    #[inline]
    pub const fn from_index(index: u8) -> Option<Square> {
        if index < 64 {
            Some(Square(index))
        } else {
            None
        }
    }

    /// Parses a square name. The input must be exactly a column letter
    /// `a`-`h` followed by a row digit `0`-`7`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pawnstorm::{File, Square};
    ///
    /// let sq = Square::from_ascii(b"e1")?;
    /// assert_eq!(sq.file(), File::E);
    /// assert_eq!(sq.row(), 1);
    ///
    /// assert!(Square::from_ascii(b"e8").is_err());
    /// assert!(Square::from_ascii(b"e12").is_err());
    /// # Ok::<_, pawnstorm::ParseSquareError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ParseSquareError`] for anything that is not an on-board
    /// square name.
    pub fn from_ascii(s: &[u8]) -> Result<Square, ParseSquareError> {
        match s {
            [file, row] => {
                let file = File::from_char(char::from(*file)).ok_or(ParseSquareError)?;
                let row: u8 = btoi::btou(&[*row]).map_err(|_| ParseSquareError)?;
                Square::new(file, row).ok_or(ParseSquareError)
            }
            _ => Err(ParseSquareError),
        }
    }

    #[inline]
    pub const fn file(self) -> File {
        match File::new(self.0 & 7) {
            Some(file) => file,
            None => File::A,
        }
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.0 >> 3
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Moves the square by the given column and row deltas, returning `None`
    /// if that leaves the board.
    #[inline]
    pub const fn offset(self, files: i8, rows: i8) -> Option<Square> {
        Square::from_coords(self.file() as i8 + files, self.row() as i8 + rows)
    }

    /// Chebyshev distance between two squares.
    pub fn distance(self, other: Square) -> u8 {
        let files = (self.file() as i8 - other.file() as i8).unsigned_abs();
        let rows = (self.row() as i8 - other.row() as i8).unsigned_abs();
        files.max(rows)
    }

    /// All 64 squares, in index order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file().char(), self.row())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Square, ParseSquareError> {
        Square::from_ascii(s.as_bytes())
    }
}

impl From<Square> for usize {
    #[inline]
    fn from(sq: Square) -> usize {
        sq.index()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Square {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Square {
    fn deserialize<D>(deserializer: D) -> Result<Square, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct SquareVisitor;

        impl serde::de::Visitor<'_> for SquareVisitor {
            type Value = Square;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("square name")
            }

            fn visit_str<E>(self, value: &str) -> Result<Square, E>
            where
                E: serde::de::Error,
            {
                value.parse().map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_str(SquareVisitor)
    }
}

#[cfg(feature = "arbitrary")]
impl<'a> arbitrary::Arbitrary<'a> for Square {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Square> {
        Ok(Square(u.int_in_range(0..=63)?))
    }
}

/// Squares reachable by a single piece, stored inline.
///
/// A queen in the middle of an empty board reaches 27 squares, the most of
/// any piece.
pub type SquareList = ArrayVec<Square, 32>;

/// Extracts the column letter and row number of a loosely formatted move
/// string, such as `"e1"` or `"move to e12"`.
///
/// The first lowercase letter and the first digit are taken. Neither is
/// validated against the board; use [`retain_on_board`] for that.
///
/// # Errors
///
/// Returns [`ParseSquareError`] if there is no letter or no digit.
pub fn extract_coords(s: &str) -> Result<(char, u32), ParseSquareError> {
    let column = s
        .chars()
        .find(char::is_ascii_lowercase)
        .ok_or(ParseSquareError)?;
    let row = s
        .chars()
        .find_map(|ch| ch.to_digit(10))
        .ok_or(ParseSquareError)?;
    Ok((column, row))
}

/// Keeps only the candidates that name an on-board square, in order.
///
/// # Examples
///
/// ```
/// use pawnstorm::square::retain_on_board;
///
/// let squares = retain_on_board(["a0", "h7", "a8", "i3", "b", "c-1", "d12"]);
/// assert_eq!(squares.len(), 2);
/// ```
pub fn retain_on_board<I, S>(candidates: I) -> Vec<Square>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    candidates
        .into_iter()
        .filter_map(|candidate| candidate.as_ref().parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coords() {
        for file in File::ALL {
            for row in 0..8 {
                let sq = Square::new(file, row).expect("on board");
                assert_eq!(sq.file(), file);
                assert_eq!(sq.row(), row);
            }
        }
        assert_eq!(Square::new(File::A, 8), None);
    }

    #[test]
    fn test_parse_and_display() {
        for sq in Square::all() {
            assert_eq!(sq.to_string().parse::<Square>(), Ok(sq));
        }
        assert_eq!("e1".parse::<Square>().map(|sq| sq.index()), Ok(12));
        assert!("".parse::<Square>().is_err());
        assert!("E1".parse::<Square>().is_err());
        assert!("e".parse::<Square>().is_err());
        assert!("e9".parse::<Square>().is_err());
        assert!("1e".parse::<Square>().is_err());
    }

    #[test]
    fn test_offset() {
        let sq: Square = "a0".parse().expect("valid");
        assert_eq!(sq.offset(1, 2), "b2".parse().ok());
        assert_eq!(sq.offset(-1, 0), None);
        assert_eq!(sq.offset(0, 8), None);
    }

    #[test]
    fn test_distance() {
        let a: Square = "d1".parse().expect("valid");
        let b: Square = "g2".parse().expect("valid");
        assert_eq!(a.distance(b), 3);
    }

    #[test]
    fn test_extract_coords() {
        assert_eq!(extract_coords("e1"), Ok(('e', 1)));
        assert_eq!(extract_coords("z9"), Ok(('z', 9)));
        assert_eq!(extract_coords("42"), Err(ParseSquareError));
        assert_eq!(extract_coords("ab"), Err(ParseSquareError));
    }

    #[test]
    fn test_retain_on_board() {
        let squares = retain_on_board(vec!["a0", "a8", "h7", "x1", "", "b-1"]);
        assert_eq!(squares, vec!["a0".parse().unwrap(), "h7".parse().unwrap()]);
    }
}
