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

use std::{error::Error, fmt, ops, str::FromStr};

/// `First` or `Second`.
///
/// The first side starts on rows 0 and 1 and moves towards row 7. The
/// second side starts on rows 6 and 7 and moves towards row 0.
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum Side {
    First = 0,
    Second = 1,
}

impl Side {
    #[inline]
    pub fn fold<T>(self, first: T, second: T) -> T {
        match self {
            Side::First => first,
            Side::Second => second,
        }
    }

    #[inline]
    pub fn is_first(self) -> bool {
        self == Side::First
    }

    #[inline]
    pub fn is_second(self) -> bool {
        self == Side::Second
    }

    /// Row delta of a single pawn step.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Side::First => 1,
            Side::Second => -1,
        }
    }

    /// Row the pawns of this side start on. A double step is only
    /// available from here.
    #[inline]
    pub const fn pawn_row(self) -> u8 {
        match self {
            Side::First => 1,
            Side::Second => 6,
        }
    }

    /// Row on which pawns of this side are crowned.
    #[inline]
    pub const fn promotion_row(self) -> u8 {
        match self {
            Side::First => 7,
            Side::Second => 0,
        }
    }

    /// Row holding the pieces of this side in the initial layout.
    #[inline]
    pub const fn back_row(self) -> u8 {
        match self {
            Side::First => 0,
            Side::Second => 7,
        }
    }

    pub fn char(self) -> char {
        self.fold('f', 's')
    }

    /// `First` and `Second`, in this order.
    pub const ALL: [Side; 2] = [Side::First, Side::Second];
}

impl ops::Not for Side {
    type Output = Side;

    #[inline]
    fn not(self) -> Side {
        self.fold(Side::Second, Side::First)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.fold("first", "second"))
    }
}

/// Error when parsing an invalid side name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseSideError;

impl fmt::Display for ParseSideError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid side")
    }
}

impl Error for ParseSideError {}

impl FromStr for Side {
    type Err = ParseSideError;

    fn from_str(s: &str) -> Result<Side, ParseSideError> {
        Ok(match s {
            "first" => Side::First,
            "second" => Side::Second,
            _ => return Err(ParseSideError),
        })
    }
}

/// Container with values for each [`Side`].
#[derive(Clone, Default, Eq, PartialEq, Debug, Hash)]
pub struct BySide<T> {
    pub first: T,
    pub second: T,
}

impl<T> BySide<T> {
    #[inline]
    pub fn new_with<F>(mut init: F) -> BySide<T>
    where
        F: FnMut(Side) -> T,
    {
        BySide {
            first: init(Side::First),
            second: init(Side::Second),
        }
    }

    #[inline]
    pub fn get(&self, side: Side) -> &T {
        match side {
            Side::First => &self.first,
            Side::Second => &self.second,
        }
    }

    #[inline]
    pub fn get_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::First => &mut self.first,
            Side::Second => &mut self.second,
        }
    }

    #[inline]
    pub fn map<U, F>(self, mut f: F) -> BySide<U>
    where
        F: FnMut(T) -> U,
    {
        BySide {
            first: f(self.first),
            second: f(self.second),
        }
    }

    #[inline]
    pub fn find<F>(&self, mut predicate: F) -> Option<Side>
    where
        F: FnMut(&T) -> bool,
    {
        if predicate(&self.first) {
            Some(Side::First)
        } else if predicate(&self.second) {
            Some(Side::Second)
        } else {
            None
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        [(Side::First, &self.first), (Side::Second, &self.second)].into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not() {
        assert_eq!(!Side::First, Side::Second);
        assert_eq!(!Side::Second, Side::First);
    }

    #[test]
    fn test_rows() {
        assert_eq!(Side::First.pawn_row(), 1);
        assert_eq!(Side::Second.pawn_row(), 6);
        assert_eq!(Side::First.promotion_row(), 7);
        assert_eq!(Side::Second.promotion_row(), 0);
    }

    #[test]
    fn test_by_side() {
        let mut counts = BySide::new_with(|side| side.fold(1, 2));
        *counts.get_mut(Side::Second) += 1;
        assert_eq!(counts.get(Side::Second), &3);
        assert_eq!(counts.find(|c| *c == 1), Some(Side::First));
        assert_eq!("second".parse::<Side>(), Ok(Side::Second));
    }
}
