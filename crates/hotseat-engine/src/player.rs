//! Per-alliance view of a board: legal moves, check status, and move application.

use crate::board::Board;
use crate::error::EngineError;
use crate::moves::Move;
use crate::piece::Piece;
use hotseat_core::{Alliance, Coordinate, PieceKind};
use tracing::trace;

/// Outcome of [`Player::make_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveStatus {
    Done,
    /// The move is not a candidate move on this board.
    IllegalMove,
    /// The move is a candidate but would leave the mover's king attacked.
    LeavesPlayerInCheck,
}

impl MoveStatus {
    #[inline]
    pub const fn is_done(self) -> bool {
        matches!(self, MoveStatus::Done)
    }
}

/// The board produced by an attempted move.
///
/// When the move is rejected `board` is the unchanged source board.
#[derive(Debug, Clone)]
pub struct MoveTransition {
    pub board: Board,
    pub mv: Move,
    pub status: MoveStatus,
}

/// One alliance's view of a board.
///
/// Derived from the board on construction; holds no state of its own.
#[derive(Debug, Clone)]
pub struct Player<'a> {
    board: &'a Board,
    alliance: Alliance,
    king: Piece,
    candidate_moves: Vec<Move>,
    legal_moves: Vec<Move>,
    in_check: bool,
}

impl<'a> Player<'a> {
    /// Computes the player for `alliance`. Both sides must have exactly one king.
    pub fn new(board: &'a Board, alliance: Alliance) -> Result<Self, EngineError> {
        let king = board.king(alliance)?;
        board.king(alliance.opposite())?;

        let in_check = board.is_attacked(king.position(), alliance.opposite());

        let mut candidate_moves = Vec::new();
        for piece in board.active_pieces(alliance) {
            candidate_moves.extend(piece.calculate_legal_moves(board));
        }
        candidate_moves.extend(king.castle_moves(board));

        let mut legal_moves = Vec::with_capacity(candidate_moves.len());
        for mv in &candidate_moves {
            if leaves_king_safe(board, mv, alliance)? {
                legal_moves.push(*mv);
            }
        }
        trace!(
            %alliance,
            candidates = candidate_moves.len(),
            legal = legal_moves.len(),
            in_check,
            "player computed"
        );

        Ok(Player {
            board,
            alliance,
            king,
            candidate_moves,
            legal_moves,
            in_check,
        })
    }

    #[inline]
    pub const fn alliance(&self) -> Alliance {
        self.alliance
    }

    #[inline]
    pub const fn king(&self) -> Piece {
        self.king
    }

    #[inline]
    pub const fn board(&self) -> &'a Board {
        self.board
    }

    /// Every move of this alliance's pieces, ignoring king safety.
    #[inline]
    pub fn candidate_moves(&self) -> &[Move] {
        &self.candidate_moves
    }

    /// Candidate moves that do not leave the king attacked.
    #[inline]
    pub fn legal_moves(&self) -> &[Move] {
        &self.legal_moves
    }

    #[inline]
    pub const fn is_in_check(&self) -> bool {
        self.in_check
    }

    #[inline]
    pub fn is_in_checkmate(&self) -> bool {
        self.in_check && self.legal_moves.is_empty()
    }

    #[inline]
    pub fn is_in_stalemate(&self) -> bool {
        !self.in_check && self.legal_moves.is_empty()
    }

    /// Resolves a from/to pair against the candidate moves.
    ///
    /// Promotions match `promotion`, or the queen when none is given. The first
    /// match in generation order wins; no match yields [`Move::NULL`].
    pub fn select_move(
        &self,
        from: Coordinate,
        to: Coordinate,
        promotion: Option<PieceKind>,
    ) -> Move {
        let wanted = promotion.unwrap_or(PieceKind::Queen);
        self.candidate_moves
            .iter()
            .copied()
            .find(|mv| {
                mv.origin() == Some(from)
                    && mv.destination() == Some(to)
                    && mv.promotion().map_or(true, |kind| kind == wanted)
            })
            .unwrap_or(Move::NULL)
    }

    /// Validates and applies a move.
    pub fn make_move(&self, mv: Move) -> MoveTransition {
        let rejected = |status| MoveTransition {
            board: self.board.clone(),
            mv,
            status,
        };

        // Play our own instance so the move carries this board's en passant pawn.
        let mv = match self.legal_moves.iter().find(|legal| **legal == mv) {
            Some(legal) => *legal,
            None => {
                let status = if self.candidate_moves.contains(&mv) {
                    MoveStatus::LeavesPlayerInCheck
                } else {
                    MoveStatus::IllegalMove
                };
                return rejected(status);
            }
        };

        // Legal moves were executed once already while filtering.
        match mv.execute(self.board) {
            Ok(board) => MoveTransition {
                board,
                mv,
                status: MoveStatus::Done,
            },
            Err(_) => rejected(MoveStatus::IllegalMove),
        }
    }
}

fn leaves_king_safe(board: &Board, mv: &Move, alliance: Alliance) -> Result<bool, EngineError> {
    let next = mv.execute(board)?;
    let king = next.king(alliance)?;
    Ok(!next.is_attacked(king.position(), alliance.opposite()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> Coordinate {
        Coordinate::from_algebraic(s).unwrap()
    }

    #[test]
    fn twenty_opening_moves() {
        let board = Board::standard();
        let player = board.current_player().unwrap();
        assert_eq!(player.alliance(), Alliance::White);
        assert_eq!(player.legal_moves().len(), 20);
        assert!(!player.is_in_check());
        assert!(!player.is_in_checkmate());
        assert!(!player.is_in_stalemate());

        let black = board.player(Alliance::Black).unwrap();
        assert_eq!(black.legal_moves().len(), 20);
    }

    #[test]
    fn pinned_piece_cannot_move() {
        // The knight on e2 shields its king from the rook on e8.
        let board = Board::from_notation("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
        let player = board.current_player().unwrap();
        assert!(player
            .candidate_moves()
            .iter()
            .any(|m| m.origin() == Some(at("e2"))));
        assert!(player
            .legal_moves()
            .iter()
            .all(|m| m.origin() != Some(at("e2"))));

        let mv = player.select_move(at("e2"), at("c3"), None);
        let transition = player.make_move(mv);
        assert_eq!(transition.status, MoveStatus::LeavesPlayerInCheck);
        assert_eq!(transition.board, board);
    }

    #[test]
    fn unknown_move_is_illegal() {
        let board = Board::standard();
        let player = board.current_player().unwrap();
        let mv = player.select_move(at("e2"), at("e5"), None);
        assert!(mv.is_null());

        let transition = player.make_move(mv);
        assert_eq!(transition.status, MoveStatus::IllegalMove);
        assert_eq!(transition.board, board);
    }

    #[test]
    fn make_move_done() {
        let board = Board::standard();
        let player = board.current_player().unwrap();
        let mv = player.select_move(at("b1"), at("c3"), None);
        let transition = player.make_move(mv);
        assert!(transition.status.is_done());
        assert_eq!(transition.board.next_move_maker(), Alliance::Black);
        assert_eq!(transition.board.transition_move(), Some(mv));
    }

    #[test]
    fn select_move_defaults_to_queen() {
        let board = Board::from_notation("8/P7/8/8/8/8/8/4K2k w - - 0 1").unwrap();
        let player = board.current_player().unwrap();

        let queen = player.select_move(at("a7"), at("a8"), None);
        assert_eq!(queen.promotion(), Some(PieceKind::Queen));
        let rook = player.select_move(at("a7"), at("a8"), Some(PieceKind::Rook));
        assert_eq!(rook.promotion(), Some(PieceKind::Rook));
    }

    #[test]
    fn check_must_be_answered() {
        let board = Board::from_notation("4k3/8/8/8/8/8/4q3/4K3 w - - 0 1").unwrap();
        let player = board.current_player().unwrap();
        assert!(player.is_in_check());
        assert!(!player.is_in_checkmate());
        // The only reply is to take the queen.
        let ucis: Vec<String> = player.legal_moves().iter().map(|m| m.to_uci()).collect();
        assert_eq!(ucis, vec!["e1e2"]);
    }

    #[test]
    fn make_move_plays_own_instance() {
        let quiet = Board::from_notation("4k3/8/8/3pP3/8/8/8/4K1N1 w - - 0 1").unwrap();
        let foreign = quiet
            .current_player()
            .unwrap()
            .select_move(at("g1"), at("f3"), None);

        let board = Board::from_notation("4k3/8/8/3pP3/8/8/8/4K1N1 w - d6 0 1").unwrap();
        let transition = board.current_player().unwrap().make_move(foreign);
        assert!(transition.status.is_done());
        assert_eq!(transition.mv, foreign);
        assert_eq!(transition.mv.undo(&transition.board).unwrap(), board);
    }

    #[test]
    fn missing_king_is_invariant_violation() {
        let board = Board::from_notation("8/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert!(matches!(
            Player::new(&board, Alliance::White),
            Err(EngineError::InvariantViolation(_))
        ));
    }
}
