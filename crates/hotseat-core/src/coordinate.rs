//! Board coordinate representation.

use crate::board_utils::{column_of, is_valid_coordinate, row_of, NUM_TILES};
use std::fmt;
use thiserror::Error;

/// Errors produced when converting raw values into a [`Coordinate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoordinateError {
    #[error("coordinate {0} is outside the board")]
    OutOfRange(i32),

    #[error("invalid algebraic coordinate: '{0}'")]
    InvalidAlgebraic(String),
}

/// A tile on the board, indexed 0-63.
///
/// Tiles are indexed row by row from the top of the board as White sees it:
/// - a8 = 0, b8 = 1, ..., h8 = 7
/// - a7 = 8, ..., h1 = 63
///
/// A `Coordinate` is always valid; out-of-range indices are rejected at
/// construction.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate(u8);

impl Coordinate {
    /// Creates a coordinate from a signed index, rejecting anything off the board.
    #[inline]
    pub const fn new(index: i32) -> Result<Self, CoordinateError> {
        if is_valid_coordinate(index) {
            Ok(Coordinate(index as u8))
        } else {
            Err(CoordinateError::OutOfRange(index))
        }
    }

    /// Creates a coordinate from index (0-63).
    #[inline]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < NUM_TILES {
            Some(Coordinate(index as u8))
        } else {
            None
        }
    }

    /// Creates a coordinate from a column and row (both 0-7).
    #[inline]
    pub const fn from_column_row(column: usize, row: usize) -> Option<Self> {
        if column < 8 && row < 8 {
            Some(Coordinate((row * 8 + column) as u8))
        } else {
            None
        }
    }

    /// Returns the coordinate `delta` tiles away in index space.
    ///
    /// This is raw arithmetic: it does not guard against wrapping from one
    /// edge column to the other. Callers that care use the column tables.
    #[inline]
    pub const fn offset(self, delta: i32) -> Option<Self> {
        let index = self.0 as i32 + delta;
        if is_valid_coordinate(index) {
            Some(Coordinate(index as u8))
        } else {
            None
        }
    }

    /// Parses a coordinate from algebraic notation (e.g., "e4").
    pub fn from_algebraic(s: &str) -> Result<Self, CoordinateError> {
        let invalid = || CoordinateError::InvalidAlgebraic(s.to_string());
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(invalid());
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(invalid());
        }
        let column = (file - b'a') as usize;
        let row = (b'8' - rank) as usize;
        Self::from_column_row(column, row).ok_or_else(invalid)
    }

    /// Returns the index (0-63).
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the column (0 = a-file).
    #[inline]
    pub const fn column(self) -> usize {
        column_of(self.0 as usize)
    }

    /// Returns the row (0 = eighth rank).
    #[inline]
    pub const fn row(self) -> usize {
        row_of(self.0 as usize)
    }

    /// Returns the algebraic notation for this coordinate.
    pub fn to_algebraic(self) -> String {
        let file = (b'a' + self.column() as u8) as char;
        let rank = (b'8' - self.row() as u8) as char;
        format!("{}{}", file, rank)
    }

    // Back-rank tiles used by castling
    pub const A8: Coordinate = Coordinate(0);
    pub const B8: Coordinate = Coordinate(1);
    pub const C8: Coordinate = Coordinate(2);
    pub const D8: Coordinate = Coordinate(3);
    pub const E8: Coordinate = Coordinate(4);
    pub const F8: Coordinate = Coordinate(5);
    pub const G8: Coordinate = Coordinate(6);
    pub const H8: Coordinate = Coordinate(7);
    pub const A1: Coordinate = Coordinate(56);
    pub const B1: Coordinate = Coordinate(57);
    pub const C1: Coordinate = Coordinate(58);
    pub const D1: Coordinate = Coordinate(59);
    pub const E1: Coordinate = Coordinate(60);
    pub const F1: Coordinate = Coordinate(61);
    pub const G1: Coordinate = Coordinate(62);
    pub const H1: Coordinate = Coordinate(63);
}

impl TryFrom<i32> for Coordinate {
    type Error = CoordinateError;

    fn try_from(index: i32) -> Result<Self, Self::Error> {
        Self::new(index)
    }
}

impl std::str::FromStr for Coordinate {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_algebraic(s)
    }
}

impl fmt::Debug for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coordinate({})", self.to_algebraic())
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_new() {
        assert_eq!(Coordinate::new(0), Ok(Coordinate::A8));
        assert_eq!(Coordinate::new(63), Ok(Coordinate::H1));
        assert_eq!(Coordinate::new(64), Err(CoordinateError::OutOfRange(64)));
        assert_eq!(Coordinate::new(-1), Err(CoordinateError::OutOfRange(-1)));
        assert!(Coordinate::try_from(70).is_err());
    }

    #[test]
    fn coordinate_from_algebraic() {
        assert_eq!(Coordinate::from_algebraic("a8"), Ok(Coordinate::A8));
        assert_eq!(Coordinate::from_algebraic("e1"), Ok(Coordinate::E1));
        assert_eq!(Coordinate::from_algebraic("e4").map(|c| c.index()), Ok(36));
        assert_eq!(Coordinate::from_algebraic("H1"), Ok(Coordinate::H1));
        assert!(Coordinate::from_algebraic("i1").is_err());
        assert!(Coordinate::from_algebraic("a9").is_err());
        assert!(Coordinate::from_algebraic("a0").is_err());
        assert!(Coordinate::from_algebraic("").is_err());
        assert!("e44".parse::<Coordinate>().is_err());
    }

    #[test]
    fn coordinate_to_algebraic() {
        assert_eq!(Coordinate::A8.to_algebraic(), "a8");
        assert_eq!(Coordinate::H1.to_algebraic(), "h1");
        assert_eq!(Coordinate::E1.to_algebraic(), "e1");
        assert_eq!(format!("{:?}", Coordinate::G8), "Coordinate(g8)");
    }

    #[test]
    fn coordinate_row_and_column() {
        let e2 = Coordinate::from_algebraic("e2").unwrap();
        assert_eq!(e2.index(), 52);
        assert_eq!(e2.row(), 6);
        assert_eq!(e2.column(), 4);
    }

    #[test]
    fn coordinate_offset() {
        assert_eq!(Coordinate::E1.offset(-8).map(|c| c.to_algebraic()), Some("e2".into()));
        assert_eq!(Coordinate::A8.offset(-1), None);
        assert_eq!(Coordinate::H1.offset(1), None);
    }

    mod properties {
        use crate::{Coordinate, CoordinateError};
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn algebraic_matches_index(index in 0usize..64) {
                let coordinate = Coordinate::from_index(index).unwrap();
                let text = coordinate.to_algebraic();
                prop_assert_eq!(Coordinate::from_algebraic(&text), Ok(coordinate));
                prop_assert_eq!(coordinate.row() * 8 + coordinate.column(), index);
            }

            #[test]
            fn new_rejects_out_of_range(index in prop_oneof![-1000i32..0, 64i32..1000]) {
                prop_assert_eq!(Coordinate::new(index), Err(CoordinateError::OutOfRange(index)));
            }
        }
    }
}
