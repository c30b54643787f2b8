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

//! Material counts and the insufficient material table.

use std::{error::Error, fmt, ops::AddAssign, str::FromStr};

use crate::{
    board::Board,
    role::{ByRole, Role},
    side::{BySide, Side},
};

/// Error when parsing an invalid material key.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseMaterialError;

impl fmt::Display for ParseMaterialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid material key")
    }
}

impl Error for ParseMaterialError {}

/// Piece counts of one side.
#[derive(Clone, Default, Eq, PartialEq, Hash)]
pub struct MaterialSide {
    by_role: ByRole<u8>,
}

impl MaterialSide {
    pub fn new() -> MaterialSide {
        MaterialSide::default()
    }

    #[inline]
    pub fn by_role(&self, role: Role) -> u8 {
        *self.by_role.get(role)
    }

    pub fn count(&self) -> usize {
        self.by_role.iter().map(|(_, n)| usize::from(*n)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    pub fn from_ascii(s: &[u8]) -> Result<MaterialSide, ParseMaterialError> {
        if s.len() > 64 {
            return Err(ParseMaterialError);
        }

        let mut result = MaterialSide::new();
        for &ch in s {
            let role = Role::from_char(char::from(ch)).ok_or(ParseMaterialError)?;
            *result.by_role.get_mut(role) += 1;
        }
        Ok(result)
    }
}

impl Extend<Role> for MaterialSide {
    fn extend<T: IntoIterator<Item = Role>>(&mut self, iter: T) {
        for role in iter {
            let count = self.by_role.get_mut(role);
            *count = count.saturating_add(1);
        }
    }
}

impl FromIterator<Role> for MaterialSide {
    fn from_iter<T: IntoIterator<Item = Role>>(iter: T) -> MaterialSide {
        let mut result = MaterialSide::new();
        result.extend(iter);
        result
    }
}

impl<'a> AddAssign<&'a MaterialSide> for MaterialSide {
    fn add_assign(&mut self, other: &'a MaterialSide) {
        for role in Role::ALL {
            *self.by_role.get_mut(role) += other.by_role(role);
        }
    }
}

impl fmt::Display for MaterialSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for role in Role::ALL.into_iter().rev() {
            for _ in 0..self.by_role(role) {
                write!(f, "{}", role.upper_char())?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for MaterialSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("-")
        } else {
            fmt::Display::fmt(self, f)
        }
    }
}

impl FromStr for MaterialSide {
    type Err = ParseMaterialError;

    fn from_str(s: &str) -> Result<MaterialSide, ParseMaterialError> {
        MaterialSide::from_ascii(s.as_bytes())
    }
}

/// Piece counts of both sides.
///
/// The material key notation lists first side pieces, a `v`, then second
/// side pieces, e.g. `KBvKN`.
///
/// # Examples
///
/// ```
/// use pawnstorm::{material::Material, Board};
///
/// let board: Board = "8/8/2k5/8/8/8/8/K1N5".parse()?;
/// let material = Material::from_board(&board);
/// assert_eq!(material.to_string(), "KNvK");
/// assert!(material.is_insufficient());
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Default, Eq, PartialEq, Hash)]
pub struct Material {
    pub by_side: BySide<MaterialSide>,
}

impl Material {
    pub fn new() -> Material {
        Material::default()
    }

    pub fn from_board(board: &Board) -> Material {
        Material {
            by_side: BySide::new_with(|side| {
                board.pieces_of(side).map(|(_, piece)| piece.role).collect()
            }),
        }
    }

    /// Counts across both sides.
    pub fn total(&self) -> MaterialSide {
        let mut total = self.by_side.first.clone();
        total += &self.by_side.second;
        total
    }

    pub fn side(&self, side: Side) -> &MaterialSide {
        self.by_side.get(side)
    }

    /// Tests the fixed table of drawn endings: bare kings, a single minor
    /// piece, or up to four bishops in total, with nothing else on the
    /// board.
    ///
    /// The table is not a general rule. King and two knights against king,
    /// for example, is not flagged.
    pub fn is_insufficient(&self) -> bool {
        let total = self.total();
        if total.by_role(Role::Pawn) > 0
            || total.by_role(Role::Rook) > 0
            || total.by_role(Role::Queen) > 0
        {
            return false;
        }

        matches!(
            (total.by_role(Role::Knight), total.by_role(Role::Bishop)),
            (0, 0) | (1, 0) | (0, 1) | (0, 2) | (0, 3) | (0, 4)
        )
    }

    pub fn from_ascii(s: &[u8]) -> Result<Material, ParseMaterialError> {
        let mut parts = s.splitn(2, |ch| *ch == b'v');
        let first = MaterialSide::from_ascii(parts.next().ok_or(ParseMaterialError)?)?;
        let second = MaterialSide::from_ascii(parts.next().ok_or(ParseMaterialError)?)?;
        Ok(Material {
            by_side: BySide { first, second },
        })
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.by_side.first, self.by_side.second)
    }
}

impl fmt::Debug for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}v{:?}", self.by_side.first, self.by_side.second)
    }
}

impl FromStr for Material {
    type Err = ParseMaterialError;

    fn from_str(s: &str) -> Result<Material, ParseMaterialError> {
        Material::from_ascii(s.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn material(key: &str) -> Material {
        key.parse().expect("valid material key")
    }

    #[test]
    fn test_parse_and_display() {
        let m = material("KQvKRP");
        assert_eq!(m.side(Side::First).by_role(Role::Queen), 1);
        assert_eq!(m.side(Side::Second).count(), 3);
        assert_eq!(m.to_string(), "KQvKRP");
        assert_eq!(material("PKvK").to_string(), "KPvK");
        assert!("KQK".parse::<Material>().is_err());
        assert!("KXvK".parse::<Material>().is_err());
    }

    #[test]
    fn test_from_board() {
        let m = Material::from_board(&Board::new());
        assert_eq!(m.to_string(), "KQRRBBNNPPPPPPPPvKQRRBBNNPPPPPPPP");
        assert_eq!(m.total().count(), 32);
        assert!(!m.is_insufficient());
    }

    #[test]
    fn test_insufficient_table() {
        for key in ["KvK", "KNvK", "KvKN", "KBvK", "KBvKB", "KBBvKB", "KBBvKBB"] {
            assert!(material(key).is_insufficient(), "{key}");
        }
        for key in ["KRvK", "KNNvK", "KNvKN", "KBvKN", "KBBBvKBB", "KPvK"] {
            assert!(!material(key).is_insufficient(), "{key}");
        }
    }
}
