//! Side representation.

/// The two sides of a game. White always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Alliance {
    White = 0,
    Black = 1,
}

impl Alliance {
    /// Both alliances in move order.
    pub const ALL: [Alliance; 2] = [Alliance::White, Alliance::Black];

    /// Returns the opposing alliance.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Alliance::White => Alliance::Black,
            Alliance::Black => Alliance::White,
        }
    }

    /// Returns the index (0 for White, 1 for Black).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the row step a pawn of this alliance advances by.
    ///
    /// Row 0 is the top of the board, so White advances towards lower
    /// indices (-1) and Black towards higher ones (+1).
    #[inline]
    pub const fn direction(self) -> i32 {
        match self {
            Alliance::White => -1,
            Alliance::Black => 1,
        }
    }

    /// Returns the row pawns of this alliance start on.
    #[inline]
    pub const fn pawn_start_row(self) -> usize {
        match self {
            Alliance::White => 6,
            Alliance::Black => 1,
        }
    }

    /// Returns the row on which pawns of this alliance promote.
    #[inline]
    pub const fn promotion_row(self) -> usize {
        match self {
            Alliance::White => 0,
            Alliance::Black => 7,
        }
    }

    /// Returns the row holding this alliance's pieces at the start.
    #[inline]
    pub const fn back_row(self) -> usize {
        match self {
            Alliance::White => 7,
            Alliance::Black => 0,
        }
    }

    #[inline]
    pub const fn is_white(self) -> bool {
        matches!(self, Alliance::White)
    }

    #[inline]
    pub const fn is_black(self) -> bool {
        matches!(self, Alliance::Black)
    }
}

impl std::fmt::Display for Alliance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Alliance::White => write!(f, "White"),
            Alliance::Black => write!(f, "Black"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_alliance() {
        assert_eq!(Alliance::White.opposite(), Alliance::Black);
        assert_eq!(Alliance::Black.opposite(), Alliance::White);
    }

    #[test]
    fn pawn_geometry() {
        assert_eq!(Alliance::White.direction(), -1);
        assert_eq!(Alliance::Black.direction(), 1);
        assert_eq!(Alliance::White.pawn_start_row(), 6);
        assert_eq!(Alliance::Black.pawn_start_row(), 1);
        assert_eq!(Alliance::White.promotion_row(), 0);
        assert_eq!(Alliance::Black.promotion_row(), 7);
    }

    #[test]
    fn back_row() {
        assert_eq!(Alliance::White.back_row(), 7);
        assert_eq!(Alliance::Black.back_row(), 0);
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Alliance::White), "White");
        assert_eq!(format!("{}", Alliance::Black), "Black");
    }
}
