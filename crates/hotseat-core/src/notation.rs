//! Position notation (FEN-style) parsing and writing.
//!
//! The notation carries piece placement, side to move, castling rights, an
//! optional en passant target and, optionally, the two move clocks. Turning
//! the parsed data into a playable board is the engine's job.

use crate::board_utils::{NUM_TILES, NUM_TILES_PER_ROW};
use crate::{Alliance, Coordinate, PieceKind};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing position notation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("invalid position notation: expected 4 or 6 fields, got {0}")]
    InvalidFieldCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid side to move: expected 'w' or 'b', got '{0}'")]
    InvalidSideToMove(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant target: {0}")]
    InvalidEnPassantTarget(String),

    #[error("invalid move clock: {0}")]
    InvalidClock(String),
}

/// Piece placement indexed by tile (0 = a8).
pub type Placement = [Option<(PieceKind, Alliance)>; NUM_TILES];

/// Castling availability as written in the notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CastlingRights {
    pub white_king_side: bool,
    pub white_queen_side: bool,
    pub black_king_side: bool,
    pub black_queen_side: bool,
}

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights {
        white_king_side: false,
        white_queen_side: false,
        black_king_side: false,
        black_queen_side: false,
    };

    pub const ALL: CastlingRights = CastlingRights {
        white_king_side: true,
        white_queen_side: true,
        black_king_side: true,
        black_queen_side: true,
    };

    /// Returns true if the given alliance may castle king-side.
    #[inline]
    pub const fn king_side(self, alliance: Alliance) -> bool {
        match alliance {
            Alliance::White => self.white_king_side,
            Alliance::Black => self.black_king_side,
        }
    }

    /// Returns true if the given alliance may castle queen-side.
    #[inline]
    pub const fn queen_side(self, alliance: Alliance) -> bool {
        match alliance {
            Alliance::White => self.white_queen_side,
            Alliance::Black => self.black_queen_side,
        }
    }

    /// Sets both rights for an alliance.
    pub fn set(&mut self, alliance: Alliance, king_side: bool, queen_side: bool) {
        match alliance {
            Alliance::White => {
                self.white_king_side = king_side;
                self.white_queen_side = queen_side;
            }
            Alliance::Black => {
                self.black_king_side = king_side;
                self.black_queen_side = queen_side;
            }
        }
    }

    /// Returns true if no side may castle.
    pub const fn is_none(self) -> bool {
        !(self.white_king_side
            || self.white_queen_side
            || self.black_king_side
            || self.black_queen_side)
    }

    fn parse(field: &str) -> Result<Self, NotationError> {
        let mut rights = CastlingRights::NONE;
        if field == "-" {
            return Ok(rights);
        }
        for c in field.chars() {
            let flag = match c {
                'K' => &mut rights.white_king_side,
                'Q' => &mut rights.white_queen_side,
                'k' => &mut rights.black_king_side,
                'q' => &mut rights.black_queen_side,
                _ => {
                    return Err(NotationError::InvalidCastlingRights(format!(
                        "invalid character '{}'",
                        c
                    )))
                }
            };
            if *flag {
                return Err(NotationError::InvalidCastlingRights(format!(
                    "duplicate '{}'",
                    c
                )));
            }
            *flag = true;
        }
        Ok(rights)
    }
}

impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            return write!(f, "-");
        }
        for (set, c) in [
            (self.white_king_side, 'K'),
            (self.white_queen_side, 'Q'),
            (self.black_king_side, 'k'),
            (self.black_queen_side, 'q'),
        ] {
            if set {
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}

/// Halfmove clock and fullmove number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveClocks {
    pub halfmove: u32,
    pub fullmove: u32,
}

/// A parsed position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionNotation {
    pub placement: Placement,
    pub side_to_move: Alliance,
    pub castling: CastlingRights,
    pub en_passant_target: Option<Coordinate>,
    /// Present only when the text carried the two clock fields.
    pub clocks: Option<MoveClocks>,
}

impl PositionNotation {
    /// The standard starting position.
    pub const STANDARD: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses position notation.
    pub fn parse(text: &str) -> Result<Self, NotationError> {
        let fields: Vec<&str> = text.split_whitespace().collect();
        if fields.len() != 4 && fields.len() != 6 {
            return Err(NotationError::InvalidFieldCount(fields.len()));
        }

        let placement = Self::parse_placement(fields[0])?;

        let side_to_move = match fields[1] {
            "w" => Alliance::White,
            "b" => Alliance::Black,
            other => return Err(NotationError::InvalidSideToMove(other.to_string())),
        };

        let castling = CastlingRights::parse(fields[2])?;
        let en_passant_target = Self::parse_en_passant(fields[3])?;

        let clocks = if fields.len() == 6 {
            let halfmove = fields[4]
                .parse::<u32>()
                .map_err(|_| NotationError::InvalidClock(fields[4].to_string()))?;
            let fullmove = fields[5]
                .parse::<u32>()
                .map_err(|_| NotationError::InvalidClock(fields[5].to_string()))?;
            Some(MoveClocks { halfmove, fullmove })
        } else {
            None
        };

        Ok(PositionNotation {
            placement,
            side_to_move,
            castling,
            en_passant_target,
            clocks,
        })
    }

    fn parse_placement(field: &str) -> Result<Placement, NotationError> {
        let rows: Vec<&str> = field.split('/').collect();
        if rows.len() != NUM_TILES_PER_ROW {
            return Err(NotationError::InvalidPiecePlacement(format!(
                "expected 8 ranks, got {}",
                rows.len()
            )));
        }

        let mut placement: Placement = [None; NUM_TILES];
        for (row, text) in rows.iter().enumerate() {
            let rank = NUM_TILES_PER_ROW - row;
            let mut column = 0usize;
            for c in text.chars() {
                if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                    column += skip as usize;
                } else if let Some(piece) = PieceKind::from_char(c) {
                    if column >= NUM_TILES_PER_ROW {
                        return Err(NotationError::InvalidPiecePlacement(format!(
                            "rank {} has more than 8 squares",
                            rank
                        )));
                    }
                    placement[row * NUM_TILES_PER_ROW + column] = Some(piece);
                    column += 1;
                } else {
                    return Err(NotationError::InvalidPiecePlacement(format!(
                        "invalid character '{}' in rank {}",
                        c, rank
                    )));
                }
            }
            if column != NUM_TILES_PER_ROW {
                return Err(NotationError::InvalidPiecePlacement(format!(
                    "rank {} has {} squares, expected 8",
                    rank, column
                )));
            }
        }
        Ok(placement)
    }

    fn parse_en_passant(field: &str) -> Result<Option<Coordinate>, NotationError> {
        if field == "-" {
            return Ok(None);
        }
        let target = Coordinate::from_algebraic(field)
            .map_err(|_| NotationError::InvalidEnPassantTarget(field.to_string()))?;
        // Only the third and sixth ranks can hold a skipped-over tile.
        if target.row() != 2 && target.row() != 5 {
            return Err(NotationError::InvalidEnPassantTarget(field.to_string()));
        }
        Ok(Some(target))
    }

    /// Converts the position back to notation text.
    pub fn to_notation(&self) -> String {
        let mut text = String::new();

        for row in 0..NUM_TILES_PER_ROW {
            let mut empty = 0;
            for column in 0..NUM_TILES_PER_ROW {
                match self.placement[row * NUM_TILES_PER_ROW + column] {
                    Some((kind, alliance)) => {
                        if empty > 0 {
                            text.push_str(&empty.to_string());
                            empty = 0;
                        }
                        text.push(kind.to_char(alliance));
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                text.push_str(&empty.to_string());
            }
            if row + 1 < NUM_TILES_PER_ROW {
                text.push('/');
            }
        }

        text.push(' ');
        text.push(match self.side_to_move {
            Alliance::White => 'w',
            Alliance::Black => 'b',
        });

        text.push(' ');
        text.push_str(&self.castling.to_string());

        text.push(' ');
        match self.en_passant_target {
            Some(target) => text.push_str(&target.to_algebraic()),
            None => text.push('-'),
        }

        if let Some(clocks) = self.clocks {
            text.push_str(&format!(" {} {}", clocks.halfmove, clocks.fullmove));
        }

        text
    }
}

impl FromStr for PositionNotation {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PositionNotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_notation())
    }
}

impl Default for PositionNotation {
    fn default() -> Self {
        Self::parse(Self::STANDARD).expect("STANDARD is valid")
    }
}
