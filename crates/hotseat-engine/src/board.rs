//! Immutable board snapshots and their builder.

use crate::error::EngineError;
use crate::moves::{CastleSide, Move};
use crate::piece::{CastleCapability, CastleLayout, Piece};
use crate::player::Player;
use hotseat_core::board_utils::{NUM_TILES, NUM_TILES_PER_ROW};
use hotseat_core::{
    Alliance, CastlingRights, Coordinate, NotationError, Placement, PieceKind, PositionNotation,
};
use std::fmt;

/// One of the 64 tiles of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tile {
    #[default]
    Empty,
    Occupied(Piece),
}

impl Tile {
    #[inline]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Tile::Empty)
    }

    #[inline]
    pub const fn is_occupied(&self) -> bool {
        !self.is_empty()
    }

    #[inline]
    pub const fn piece(&self) -> Option<Piece> {
        match *self {
            Tile::Occupied(piece) => Some(piece),
            Tile::Empty => None,
        }
    }
}

/// An immutable board position.
///
/// Boards are only produced by [`BoardBuilder::build`]. Applying a move never
/// changes a board; it builds the next one.
#[derive(Debug, Clone)]
pub struct Board {
    tiles: [Tile; NUM_TILES],
    white_pieces: Vec<Piece>,
    black_pieces: Vec<Piece>,
    next_move_maker: Alliance,
    en_passant_pawn: Option<Piece>,
    transition_move: Option<Move>,
}

impl Board {
    /// Returns an empty builder with White to move.
    #[inline]
    pub fn builder() -> BoardBuilder {
        BoardBuilder::new()
    }

    /// The standard starting position.
    pub fn standard() -> Self {
        Self::from_notation(PositionNotation::STANDARD).expect("standard position is valid")
    }

    /// Builds a board from position notation text.
    pub fn from_notation(text: &str) -> Result<Self, EngineError> {
        let parsed = PositionNotation::parse(text)?;
        Self::from_parsed(&parsed)
    }

    /// Builds a board from parsed position notation.
    ///
    /// Kings and rooks keep their first move only when the castling rights
    /// name them on their home tiles. The en passant target must sit directly
    /// behind a pawn of the side that just moved.
    pub fn from_parsed(notation: &PositionNotation) -> Result<Self, EngineError> {
        let mut builder = Board::builder();
        for (index, entry) in notation.placement.iter().enumerate() {
            if let Some((kind, alliance)) = *entry {
                let position = Coordinate::new(index as i32)?;
                builder.set_piece(piece_from_notation(
                    kind,
                    alliance,
                    position,
                    notation.castling,
                ));
            }
        }
        builder.set_move_maker(notation.side_to_move);

        if let Some(target) = notation.en_passant_target {
            let jumped = notation.side_to_move.opposite();
            let pawn = target
                .offset(NUM_TILES_PER_ROW as i32 * jumped.direction())
                .and_then(|tile| builder.piece_at(tile))
                .filter(|p| p.kind() == PieceKind::Pawn && p.alliance() == jumped)
                .ok_or_else(|| {
                    NotationError::InvalidEnPassantTarget(format!(
                        "no {} pawn in front of {}",
                        jumped, target
                    ))
                })?;
            builder.set_en_passant_pawn(Some(pawn));
        }

        Ok(builder.build())
    }

    /// Writes the board as position notation without move clocks.
    pub fn to_notation(&self) -> String {
        let mut placement: Placement = [None; NUM_TILES];
        for piece in self.all_active_pieces() {
            placement[piece.position().index()] = Some((piece.kind(), piece.alliance()));
        }

        let mut castling = CastlingRights::NONE;
        for alliance in Alliance::ALL {
            castling.set(
                alliance,
                self.castle_right(alliance, CastleSide::KingSide),
                self.castle_right(alliance, CastleSide::QueenSide),
            );
        }

        let en_passant_target = self.en_passant_pawn.and_then(|pawn| {
            pawn.position()
                .offset(-(NUM_TILES_PER_ROW as i32) * pawn.alliance().direction())
        });

        PositionNotation {
            placement,
            side_to_move: self.next_move_maker,
            castling,
            en_passant_target,
            clocks: None,
        }
        .to_notation()
    }

    fn castle_right(&self, alliance: Alliance, side: CastleSide) -> bool {
        let layout = CastleLayout::of(alliance, side);
        let king_ready = self.piece_at(layout.king_origin).is_some_and(|king| {
            king.is_king()
                && king.alliance() == alliance
                && king.is_first_move()
                && king.castling().allows(side)
        });
        let rook_ready = self.piece_at(layout.rook_origin).is_some_and(|rook| {
            rook.kind() == PieceKind::Rook && rook.alliance() == alliance && rook.is_first_move()
        });
        king_ready && rook_ready
    }

    #[inline]
    pub fn tile(&self, coordinate: Coordinate) -> &Tile {
        &self.tiles[coordinate.index()]
    }

    #[inline]
    pub fn piece_at(&self, coordinate: Coordinate) -> Option<Piece> {
        self.tiles[coordinate.index()].piece()
    }

    /// Pieces of one alliance, in coordinate order.
    #[inline]
    pub fn active_pieces(&self, alliance: Alliance) -> &[Piece] {
        match alliance {
            Alliance::White => &self.white_pieces,
            Alliance::Black => &self.black_pieces,
        }
    }

    pub fn all_active_pieces(&self) -> impl Iterator<Item = &Piece> {
        self.white_pieces.iter().chain(self.black_pieces.iter())
    }

    #[inline]
    pub const fn next_move_maker(&self) -> Alliance {
        self.next_move_maker
    }

    /// The pawn that jumped on the previous move, if any.
    #[inline]
    pub const fn en_passant_pawn(&self) -> Option<Piece> {
        self.en_passant_pawn
    }

    /// The move that produced this board, if any.
    #[inline]
    pub const fn transition_move(&self) -> Option<Move> {
        self.transition_move
    }

    /// Returns the single king of an alliance.
    pub fn king(&self, alliance: Alliance) -> Result<Piece, EngineError> {
        let mut kings = self.active_pieces(alliance).iter().filter(|p| p.is_king());
        match (kings.next(), kings.next()) {
            (Some(king), None) => Ok(*king),
            (None, _) => Err(EngineError::InvariantViolation(format!(
                "{} has no king",
                alliance
            ))),
            (Some(_), Some(_)) => Err(EngineError::InvariantViolation(format!(
                "{} has more than one king",
                alliance
            ))),
        }
    }

    /// Returns true if any piece of `by` attacks `target`.
    pub fn is_attacked(&self, target: Coordinate, by: Alliance) -> bool {
        self.active_pieces(by)
            .iter()
            .any(|piece| piece.attacks(target, self))
    }

    /// The player whose turn it is.
    pub fn current_player(&self) -> Result<Player<'_>, EngineError> {
        Player::new(self, self.next_move_maker)
    }

    pub fn player(&self, alliance: Alliance) -> Result<Player<'_>, EngineError> {
        Player::new(self, alliance)
    }

    /// Renders the board with rank and file labels, seen from `perspective`.
    pub fn render(&self, perspective: Alliance) -> String {
        let rows: Vec<usize> = match perspective {
            Alliance::White => (0..NUM_TILES_PER_ROW).collect(),
            Alliance::Black => (0..NUM_TILES_PER_ROW).rev().collect(),
        };
        let mut files: Vec<char> = ('a'..='h').collect();
        if perspective.is_black() {
            files.reverse();
        }

        let mut out = String::new();
        for &row in &rows {
            out.push_str(&format!("{} ", NUM_TILES_PER_ROW - row));
            for (i, &file) in files.iter().enumerate() {
                let column = (file as u8 - b'a') as usize;
                if i > 0 {
                    out.push(' ');
                }
                out.push(self.tile_char(row * NUM_TILES_PER_ROW + column));
            }
            out.push('\n');
        }
        out.push_str("  ");
        let labels: Vec<String> = files.iter().map(|f| f.to_string()).collect();
        out.push_str(&labels.join(" "));
        out.push('\n');
        out
    }

    fn tile_char(&self, index: usize) -> char {
        match self.tiles[index] {
            Tile::Occupied(piece) => piece.kind().to_char(piece.alliance()),
            Tile::Empty => '-',
        }
    }
}

fn piece_from_notation(
    kind: PieceKind,
    alliance: Alliance,
    position: Coordinate,
    rights: CastlingRights,
) -> Piece {
    let side_right = |side: CastleSide| match side {
        CastleSide::KingSide => rights.king_side(alliance),
        CastleSide::QueenSide => rights.queen_side(alliance),
    };
    match kind {
        PieceKind::King => {
            let home = CastleLayout::of(alliance, CastleSide::KingSide).king_origin;
            let castling = if position == home {
                CastleCapability {
                    king_side: side_right(CastleSide::KingSide),
                    queen_side: side_right(CastleSide::QueenSide),
                }
            } else {
                CastleCapability::NONE
            };
            let first_move = castling.king_side || castling.queen_side;
            Piece::king(alliance, position, first_move, castling)
        }
        PieceKind::Rook => {
            let first_move = [CastleSide::KingSide, CastleSide::QueenSide]
                .into_iter()
                .any(|side| {
                    CastleLayout::of(alliance, side).rook_origin == position && side_right(side)
                });
            Piece::new(kind, alliance, position, first_move)
        }
        PieceKind::Pawn => Piece::new(
            kind,
            alliance,
            position,
            position.row() == alliance.pawn_start_row(),
        ),
        _ => Piece::new(kind, alliance, position, position.row() == alliance.back_row()),
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.tiles == other.tiles
            && self.next_move_maker == other.next_move_maker
            && self.en_passant_pawn == other.en_passant_pawn
    }
}

impl Eq for Board {}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..NUM_TILES_PER_ROW {
            for column in 0..NUM_TILES_PER_ROW {
                if column > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", self.tile_char(row * NUM_TILES_PER_ROW + column))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Accumulates the pieces and flags of the next board.
#[derive(Debug, Clone)]
pub struct BoardBuilder {
    config: [Option<Piece>; NUM_TILES],
    next_move_maker: Alliance,
    en_passant_pawn: Option<Piece>,
    transition_move: Option<Move>,
}

impl BoardBuilder {
    pub fn new() -> Self {
        BoardBuilder {
            config: [None; NUM_TILES],
            next_move_maker: Alliance::White,
            en_passant_pawn: None,
            transition_move: None,
        }
    }

    /// Places a piece on its own position, replacing any previous occupant.
    pub fn set_piece(&mut self, piece: Piece) -> &mut Self {
        self.config[piece.position().index()] = Some(piece);
        self
    }

    pub fn piece_at(&self, coordinate: Coordinate) -> Option<Piece> {
        self.config[coordinate.index()]
    }

    pub fn set_move_maker(&mut self, alliance: Alliance) -> &mut Self {
        self.next_move_maker = alliance;
        self
    }

    pub fn set_en_passant_pawn(&mut self, pawn: Option<Piece>) -> &mut Self {
        self.en_passant_pawn = pawn;
        self
    }

    pub fn set_transition_move(&mut self, mv: Option<Move>) -> &mut Self {
        self.transition_move = mv;
        self
    }

    pub fn build(&self) -> Board {
        let mut tiles = [Tile::Empty; NUM_TILES];
        let mut white_pieces = Vec::with_capacity(16);
        let mut black_pieces = Vec::with_capacity(16);
        for (tile, entry) in tiles.iter_mut().zip(self.config.iter()) {
            if let Some(piece) = *entry {
                *tile = Tile::Occupied(piece);
                match piece.alliance() {
                    Alliance::White => white_pieces.push(piece),
                    Alliance::Black => black_pieces.push(piece),
                }
            }
        }
        Board {
            tiles,
            white_pieces,
            black_pieces,
            next_move_maker: self.next_move_maker,
            en_passant_pawn: self.en_passant_pawn,
            transition_move: self.transition_move,
        }
    }
}

impl Default for BoardBuilder {
    fn default() -> Self {
        Self::new()
    }
}
