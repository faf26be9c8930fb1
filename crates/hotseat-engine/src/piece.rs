//! Pieces and their candidate moves.
//!
//! A [`Piece`] is an immutable value. Moving never mutates it; the board
//! after the move holds the next version produced by [`Piece::moved_to`].

use crate::board::Board;
use crate::moves::{CastleSide, Move, MoveKind};
use crate::tables::{
    Line, BISHOP_DIRECTIONS, KING_TARGETS, KNIGHT_TARGETS, QUEEN_DIRECTIONS, RAYS,
    ROOK_DIRECTIONS,
};
use hotseat_core::board_utils::{EIGHTH_COLUMN, FIRST_COLUMN};
use hotseat_core::{Alliance, Coordinate, PieceKind};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Castling capability carried by a king.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CastleCapability {
    pub king_side: bool,
    pub queen_side: bool,
}

impl CastleCapability {
    pub const NONE: CastleCapability = CastleCapability {
        king_side: false,
        queen_side: false,
    };

    pub const BOTH: CastleCapability = CastleCapability {
        king_side: true,
        queen_side: true,
    };

    #[inline]
    pub const fn allows(self, side: CastleSide) -> bool {
        match side {
            CastleSide::KingSide => self.king_side,
            CastleSide::QueenSide => self.queen_side,
        }
    }
}

/// Fixed tiles taking part in one castle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastleLayout {
    pub king_origin: Coordinate,
    pub king_destination: Coordinate,
    pub rook_origin: Coordinate,
    pub rook_destination: Coordinate,
    /// Tiles that must be empty.
    pub between: &'static [Coordinate],
    /// Tiles the king crosses or lands on, which must not be attacked.
    pub transit: &'static [Coordinate],
}

impl CastleLayout {
    const WHITE_KING_SIDE: CastleLayout = CastleLayout {
        king_origin: Coordinate::E1,
        king_destination: Coordinate::G1,
        rook_origin: Coordinate::H1,
        rook_destination: Coordinate::F1,
        between: &[Coordinate::F1, Coordinate::G1],
        transit: &[Coordinate::F1, Coordinate::G1],
    };

    const WHITE_QUEEN_SIDE: CastleLayout = CastleLayout {
        king_origin: Coordinate::E1,
        king_destination: Coordinate::C1,
        rook_origin: Coordinate::A1,
        rook_destination: Coordinate::D1,
        between: &[Coordinate::B1, Coordinate::C1, Coordinate::D1],
        transit: &[Coordinate::D1, Coordinate::C1],
    };

    const BLACK_KING_SIDE: CastleLayout = CastleLayout {
        king_origin: Coordinate::E8,
        king_destination: Coordinate::G8,
        rook_origin: Coordinate::H8,
        rook_destination: Coordinate::F8,
        between: &[Coordinate::F8, Coordinate::G8],
        transit: &[Coordinate::F8, Coordinate::G8],
    };

    const BLACK_QUEEN_SIDE: CastleLayout = CastleLayout {
        king_origin: Coordinate::E8,
        king_destination: Coordinate::C8,
        rook_origin: Coordinate::A8,
        rook_destination: Coordinate::D8,
        between: &[Coordinate::B8, Coordinate::C8, Coordinate::D8],
        transit: &[Coordinate::D8, Coordinate::C8],
    };

    pub const fn of(alliance: Alliance, side: CastleSide) -> CastleLayout {
        match (alliance, side) {
            (Alliance::White, CastleSide::KingSide) => Self::WHITE_KING_SIDE,
            (Alliance::White, CastleSide::QueenSide) => Self::WHITE_QUEEN_SIDE,
            (Alliance::Black, CastleSide::KingSide) => Self::BLACK_KING_SIDE,
            (Alliance::Black, CastleSide::QueenSide) => Self::BLACK_QUEEN_SIDE,
        }
    }
}

/// A piece on the board.
///
/// Equality and hashing consider the kind, alliance, position, and first-move
/// flag. The castling capability only matters for kings and is left out.
#[derive(Debug, Clone, Copy)]
pub struct Piece {
    kind: PieceKind,
    alliance: Alliance,
    position: Coordinate,
    first_move: bool,
    castling: CastleCapability,
}

impl Piece {
    /// Creates a piece. Kings created this way cannot castle; use [`Piece::king`].
    #[inline]
    pub const fn new(
        kind: PieceKind,
        alliance: Alliance,
        position: Coordinate,
        first_move: bool,
    ) -> Self {
        Piece {
            kind,
            alliance,
            position,
            first_move,
            castling: CastleCapability::NONE,
        }
    }

    /// Creates a king with explicit castling capability.
    #[inline]
    pub const fn king(
        alliance: Alliance,
        position: Coordinate,
        first_move: bool,
        castling: CastleCapability,
    ) -> Self {
        Piece {
            kind: PieceKind::King,
            alliance,
            position,
            first_move,
            castling,
        }
    }

    #[inline]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub const fn alliance(&self) -> Alliance {
        self.alliance
    }

    #[inline]
    pub const fn position(&self) -> Coordinate {
        self.position
    }

    #[inline]
    pub const fn is_first_move(&self) -> bool {
        self.first_move
    }

    #[inline]
    pub const fn castling(&self) -> CastleCapability {
        self.castling
    }

    #[inline]
    pub const fn is_king(&self) -> bool {
        matches!(self.kind, PieceKind::King)
    }

    /// Returns the piece as it stands after travelling to `destination`.
    #[inline]
    pub const fn moved_to(self, destination: Coordinate) -> Self {
        Piece {
            position: destination,
            first_move: false,
            castling: CastleCapability::NONE,
            ..self
        }
    }

    /// Returns the piece a pawn becomes when promoting on `destination`.
    #[inline]
    pub const fn promoted(self, kind: PieceKind, destination: Coordinate) -> Self {
        Piece::new(kind, self.alliance, destination, false)
    }

    /// Generates every candidate move for this piece, ignoring whether the
    /// mover's own king is left in check. Castling is produced separately by
    /// [`Piece::castle_moves`].
    pub fn calculate_legal_moves(&self, board: &Board) -> Vec<Move> {
        let origin = self.position.index();
        match self.kind {
            PieceKind::Pawn => self.pawn_moves(board),
            PieceKind::Knight => self.leaper_moves(board, &KNIGHT_TARGETS[origin]),
            PieceKind::King => self.leaper_moves(board, &KING_TARGETS[origin]),
            PieceKind::Bishop => self.slider_moves(board, BISHOP_DIRECTIONS),
            PieceKind::Rook => self.slider_moves(board, ROOK_DIRECTIONS),
            PieceKind::Queen => self.slider_moves(board, QUEEN_DIRECTIONS),
        }
    }

    /// Returns true if this piece attacks `target` on the given board.
    pub fn attacks(&self, target: Coordinate, board: &Board) -> bool {
        let origin = self.position.index();
        match self.kind {
            PieceKind::Pawn => self.pawn_capture_targets().any(|c| c == target),
            PieceKind::Knight => KNIGHT_TARGETS[origin].contains(target),
            PieceKind::King => KING_TARGETS[origin].contains(target),
            PieceKind::Bishop => self.slides_to(target, BISHOP_DIRECTIONS, board),
            PieceKind::Rook => self.slides_to(target, ROOK_DIRECTIONS, board),
            PieceKind::Queen => self.slides_to(target, QUEEN_DIRECTIONS, board),
        }
    }

    /// Generates the castle moves available to this king.
    ///
    /// Requires the king and the rook to be unmoved, the capability flag for
    /// that side, empty tiles between them, and no attacked tile on the
    /// king's path (its start included).
    pub fn castle_moves(&self, board: &Board) -> Vec<Move> {
        let mut moves = Vec::new();
        if !self.is_king() || !self.first_move {
            return moves;
        }
        let opponent = self.alliance.opposite();
        if board.is_attacked(self.position, opponent) {
            return moves;
        }

        for side in [CastleSide::KingSide, CastleSide::QueenSide] {
            if !self.castling.allows(side) {
                continue;
            }
            let layout = CastleLayout::of(self.alliance, side);
            if self.position != layout.king_origin {
                continue;
            }
            let rook = match board.piece_at(layout.rook_origin) {
                Some(rook)
                    if rook.kind == PieceKind::Rook
                        && rook.alliance == self.alliance
                        && rook.first_move =>
                {
                    rook
                }
                _ => continue,
            };
            if layout.between.iter().any(|&c| board.tile(c).is_occupied()) {
                continue;
            }
            if layout
                .transit
                .iter()
                .any(|&c| board.is_attacked(c, opponent))
            {
                continue;
            }
            moves.push(Move::new(
                board,
                MoveKind::Castle {
                    side,
                    king: *self,
                    destination: layout.king_destination,
                    rook,
                    rook_destination: layout.rook_destination,
                },
            ));
        }
        moves
    }

    fn leaper_moves(&self, board: &Board, targets: &Line) -> Vec<Move> {
        let mut moves = Vec::with_capacity(targets.len());
        for destination in targets.coordinates() {
            match board.piece_at(destination) {
                None => moves.push(Move::new(
                    board,
                    MoveKind::Major {
                        piece: *self,
                        destination,
                    },
                )),
                Some(occupant) if occupant.alliance != self.alliance => moves.push(Move::new(
                    board,
                    MoveKind::Attack {
                        piece: *self,
                        destination,
                        captured: occupant,
                    },
                )),
                Some(_) => {}
            }
        }
        moves
    }

    fn slider_moves(&self, board: &Board, directions: &[usize]) -> Vec<Move> {
        let mut moves = Vec::new();
        for &direction in directions {
            for destination in RAYS[self.position.index()][direction].coordinates() {
                match board.piece_at(destination) {
                    None => moves.push(Move::new(
                        board,
                        MoveKind::Major {
                            piece: *self,
                            destination,
                        },
                    )),
                    Some(occupant) => {
                        if occupant.alliance != self.alliance {
                            moves.push(Move::new(
                                board,
                                MoveKind::Attack {
                                    piece: *self,
                                    destination,
                                    captured: occupant,
                                },
                            ));
                        }
                        break;
                    }
                }
            }
        }
        moves
    }

    fn slides_to(&self, target: Coordinate, directions: &[usize], board: &Board) -> bool {
        directions.iter().any(|&direction| {
            let ray = &RAYS[self.position.index()][direction];
            if !ray.contains(target) {
                return false;
            }
            for tile in ray.coordinates() {
                if tile == target {
                    return true;
                }
                if board.tile(tile).is_occupied() {
                    return false;
                }
            }
            false
        })
    }

    fn pawn_moves(&self, board: &Board) -> Vec<Move> {
        let mut moves = Vec::new();
        let forward = 8 * self.alliance.direction();

        if let Some(step) = self.position.offset(forward) {
            if board.tile(step).is_empty() {
                self.push_pawn_advance(board, step, None, &mut moves);

                if self.first_move && self.position.row() == self.alliance.pawn_start_row() {
                    if let Some(jump) = step.offset(forward) {
                        if board.tile(jump).is_empty() {
                            moves.push(Move::new(
                                board,
                                MoveKind::PawnJump {
                                    piece: *self,
                                    destination: jump,
                                },
                            ));
                        }
                    }
                }
            }
        }

        for target in self.pawn_capture_targets() {
            match board.piece_at(target) {
                Some(occupant) if occupant.alliance != self.alliance => {
                    self.push_pawn_advance(board, target, Some(occupant), &mut moves);
                }
                Some(_) => {}
                None => {
                    // The pawn that just jumped sits beside us, one row behind the target.
                    if let Some(jumped) = board.en_passant_pawn() {
                        if jumped.alliance != self.alliance
                            && target.offset(-forward) == Some(jumped.position)
                        {
                            moves.push(Move::new(
                                board,
                                MoveKind::EnPassant {
                                    piece: *self,
                                    destination: target,
                                    captured: jumped,
                                },
                            ));
                        }
                    }
                }
            }
        }
        moves
    }

    /// Pushes a pawn step or capture, expanding it into promotions on the far row.
    fn push_pawn_advance(
        &self,
        board: &Board,
        destination: Coordinate,
        captured: Option<Piece>,
        moves: &mut Vec<Move>,
    ) {
        if destination.row() == self.alliance.promotion_row() {
            for promote_to in PieceKind::PROMOTIONS {
                moves.push(Move::new(
                    board,
                    MoveKind::Promotion {
                        piece: *self,
                        destination,
                        captured,
                        promote_to,
                    },
                ));
            }
            return;
        }
        let kind = match captured {
            Some(captured) => MoveKind::PawnAttack {
                piece: *self,
                destination,
                captured,
            },
            None => MoveKind::PawnStep {
                piece: *self,
                destination,
            },
        };
        moves.push(Move::new(board, kind));
    }

    /// The two diagonal tiles in front of a pawn, minus any that would wrap.
    fn pawn_capture_targets(&self) -> impl Iterator<Item = Coordinate> {
        let forward = 8 * self.alliance.direction();
        let index = self.position.index();
        let left = if FIRST_COLUMN[index] {
            None
        } else {
            self.position.offset(forward - 1)
        };
        let right = if EIGHTH_COLUMN[index] {
            None
        } else {
            self.position.offset(forward + 1)
        };
        left.into_iter().chain(right)
    }
}

impl PartialEq for Piece {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.alliance == other.alliance
            && self.position == other.position
            && self.first_move == other.first_move
    }
}

impl Eq for Piece {}

impl Hash for Piece {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.alliance.hash(state);
        self.position.hash(state);
        self.first_move.hash(state);
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind.to_char(self.alliance))
    }
}
