//! Moves and their application to boards.
//!
//! A [`Move`] is a plain value describing one transition. It records the
//! source board's en passant pawn so that [`Move::undo`] can rebuild the
//! source board exactly; that context plays no part in move equality.

use crate::board::Board;
use crate::error::EngineError;
use crate::piece::Piece;
use hotseat_core::{Alliance, Coordinate, PieceKind};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Which side of the board a castle goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

/// The transition a move describes, with the data needed to apply and reverse it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Non-pawn move onto an empty tile.
    Major {
        piece: Piece,
        destination: Coordinate,
    },
    /// Non-pawn capture.
    Attack {
        piece: Piece,
        destination: Coordinate,
        captured: Piece,
    },
    /// Single pawn step.
    PawnStep {
        piece: Piece,
        destination: Coordinate,
    },
    /// Double pawn step from the start row.
    PawnJump {
        piece: Piece,
        destination: Coordinate,
    },
    /// Diagonal pawn capture.
    PawnAttack {
        piece: Piece,
        destination: Coordinate,
        captured: Piece,
    },
    /// Capture of a pawn that just jumped past `destination`.
    EnPassant {
        piece: Piece,
        destination: Coordinate,
        captured: Piece,
    },
    /// Pawn step or capture onto the far row.
    Promotion {
        piece: Piece,
        destination: Coordinate,
        captured: Option<Piece>,
        promote_to: PieceKind,
    },
    Castle {
        side: CastleSide,
        king: Piece,
        destination: Coordinate,
        rook: Piece,
        rook_destination: Coordinate,
    },
    /// Sentinel for "no move". Cannot be executed.
    Null,
}

/// A move bound to the position it was generated from.
#[derive(Clone, Copy)]
pub struct Move {
    kind: MoveKind,
    en_passant_before: Option<Piece>,
}

impl Move {
    /// The null move.
    pub const NULL: Move = Move {
        kind: MoveKind::Null,
        en_passant_before: None,
    };

    /// Creates a move generated on `board`.
    #[inline]
    pub fn new(board: &Board, kind: MoveKind) -> Self {
        Move {
            kind,
            en_passant_before: board.en_passant_pawn(),
        }
    }

    #[inline]
    pub const fn kind(&self) -> &MoveKind {
        &self.kind
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self.kind, MoveKind::Null)
    }

    #[inline]
    pub const fn is_castle(&self) -> bool {
        matches!(self.kind, MoveKind::Castle { .. })
    }

    /// Returns true if the move removes an enemy piece.
    #[inline]
    pub const fn is_attack(&self) -> bool {
        self.captured_piece().is_some()
    }

    /// The piece being moved, as it stood before the move.
    pub const fn moved_piece(&self) -> Option<Piece> {
        match self.kind {
            MoveKind::Major { piece, .. }
            | MoveKind::Attack { piece, .. }
            | MoveKind::PawnStep { piece, .. }
            | MoveKind::PawnJump { piece, .. }
            | MoveKind::PawnAttack { piece, .. }
            | MoveKind::EnPassant { piece, .. }
            | MoveKind::Promotion { piece, .. } => Some(piece),
            MoveKind::Castle { king, .. } => Some(king),
            MoveKind::Null => None,
        }
    }

    pub const fn origin(&self) -> Option<Coordinate> {
        match self.moved_piece() {
            Some(piece) => Some(piece.position()),
            None => None,
        }
    }

    pub const fn destination(&self) -> Option<Coordinate> {
        match self.kind {
            MoveKind::Major { destination, .. }
            | MoveKind::Attack { destination, .. }
            | MoveKind::PawnStep { destination, .. }
            | MoveKind::PawnJump { destination, .. }
            | MoveKind::PawnAttack { destination, .. }
            | MoveKind::EnPassant { destination, .. }
            | MoveKind::Promotion { destination, .. }
            | MoveKind::Castle { destination, .. } => Some(destination),
            MoveKind::Null => None,
        }
    }

    pub const fn captured_piece(&self) -> Option<Piece> {
        match self.kind {
            MoveKind::Attack { captured, .. }
            | MoveKind::PawnAttack { captured, .. }
            | MoveKind::EnPassant { captured, .. } => Some(captured),
            MoveKind::Promotion { captured, .. } => captured,
            _ => None,
        }
    }

    pub const fn promotion(&self) -> Option<PieceKind> {
        match self.kind {
            MoveKind::Promotion { promote_to, .. } => Some(promote_to),
            _ => None,
        }
    }

    /// Applies the move to `board`, producing the next board.
    ///
    /// `board` must be the board the move was generated from (or one with the
    /// same occupancy). Executing the null move, or a move whose piece is not
    /// where the move expects it, returns [`EngineError::IllegalMove`].
    pub fn execute(&self, board: &Board) -> Result<Board, EngineError> {
        let (piece, destination) = match (self.moved_piece(), self.destination()) {
            (Some(piece), Some(destination)) => (piece, destination),
            _ => {
                return Err(EngineError::IllegalMove(
                    "the null move cannot be executed".to_string(),
                ))
            }
        };
        if board.piece_at(piece.position()) != Some(piece) {
            return Err(EngineError::IllegalMove(format!(
                "{} expects {} on {}",
                self,
                piece,
                piece.position()
            )));
        }

        let captured = self.captured_piece().map(|c| c.position());
        let castle_rook = self.castle_rook().map(|(rook, _)| rook.position());

        let mut builder = Board::builder();
        for other in board.all_active_pieces() {
            let position = other.position();
            if position == piece.position()
                || Some(position) == captured
                || Some(position) == castle_rook
            {
                continue;
            }
            builder.set_piece(*other);
        }

        let landed = self.landed_piece(piece, destination);
        builder.set_piece(landed);
        if let Some((rook, rook_destination)) = self.castle_rook() {
            builder.set_piece(rook.moved_to(rook_destination));
        }

        let en_passant = match self.kind {
            MoveKind::PawnJump { .. } => Some(landed),
            _ => None,
        };
        builder
            .set_move_maker(piece.alliance().opposite())
            .set_en_passant_pawn(en_passant)
            .set_transition_move(Some(*self));
        Ok(builder.build())
    }

    /// Reverses the move on the board it produced, rebuilding the source board.
    ///
    /// The rebuilt board has no transition move. A board that does not hold the
    /// moved piece on the destination returns [`EngineError::InvariantViolation`].
    pub fn undo(&self, board: &Board) -> Result<Board, EngineError> {
        let (piece, destination) = match (self.moved_piece(), self.destination()) {
            (Some(piece), Some(destination)) => (piece, destination),
            _ => {
                return Err(EngineError::IllegalMove(
                    "the null move cannot be taken back".to_string(),
                ))
            }
        };
        expect_piece_on(board, self.landed_piece(piece, destination), self)?;
        let castled_rook = match self.castle_rook() {
            Some((rook, rook_destination)) => {
                expect_piece_on(board, rook.moved_to(rook_destination), self)?;
                Some(rook_destination)
            }
            None => None,
        };

        let mut builder = Board::builder();
        for other in board.all_active_pieces() {
            let position = other.position();
            if position == destination || Some(position) == castled_rook {
                continue;
            }
            builder.set_piece(*other);
        }

        builder.set_piece(piece);
        if let Some(captured) = self.captured_piece() {
            builder.set_piece(captured);
        }
        if let Some((rook, _)) = self.castle_rook() {
            builder.set_piece(rook);
        }
        builder
            .set_move_maker(piece.alliance())
            .set_en_passant_pawn(self.en_passant_before)
            .set_transition_move(None);
        Ok(builder.build())
    }

    /// Returns the move in coordinate form (`e2e4`, `e7e8q`), or `0000` for the null move.
    pub fn to_uci(&self) -> String {
        match (self.origin(), self.destination()) {
            (Some(from), Some(to)) => match self.promotion() {
                Some(kind) => format!("{}{}{}", from, to, kind.to_char(Alliance::Black)),
                None => format!("{}{}", from, to),
            },
            _ => "0000".to_string(),
        }
    }

    fn landed_piece(&self, piece: Piece, destination: Coordinate) -> Piece {
        match self.kind {
            MoveKind::Promotion { promote_to, .. } => piece.promoted(promote_to, destination),
            _ => piece.moved_to(destination),
        }
    }

    const fn castle_rook(&self) -> Option<(Piece, Coordinate)> {
        match self.kind {
            MoveKind::Castle {
                rook,
                rook_destination,
                ..
            } => Some((rook, rook_destination)),
            _ => None,
        }
    }
}

fn expect_piece_on(board: &Board, expected: Piece, mv: &Move) -> Result<(), EngineError> {
    let tile = expected.position();
    if board.piece_at(tile) == Some(expected) {
        Ok(())
    } else {
        Err(EngineError::InvariantViolation(format!(
            "cannot take back {}: expected {} on {}",
            mv, expected, tile
        )))
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
    }
}

impl Default for Move {
    fn default() -> Self {
        Move::NULL
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_uci())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}
