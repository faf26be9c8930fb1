//! Game session with move history and undo.
//!
//! [`Game`] owns the current board, the board it started from, and the moves
//! played since. Boards are never changed in place: every move or take-back
//! swaps in a freshly built board.

use crate::board::Board;
use crate::error::EngineError;
use crate::moves::Move;
use crate::player::MoveStatus;
use hotseat_core::{Alliance, Coordinate, PieceKind};
use std::fmt;
use tracing::debug;

/// Status of the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    InProgress,
    Check,
    Checkmate { winner: Alliance },
    Stalemate,
}

impl GameStatus {
    /// Returns true for checkmate and stalemate.
    #[inline]
    pub const fn is_over(self) -> bool {
        matches!(self, GameStatus::Checkmate { .. } | GameStatus::Stalemate)
    }

    fn of(board: &Board) -> Result<Self, EngineError> {
        let player = board.current_player()?;
        Ok(if player.is_in_checkmate() {
            GameStatus::Checkmate {
                winner: player.alliance().opposite(),
            }
        } else if player.is_in_stalemate() {
            GameStatus::Stalemate
        } else if player.is_in_check() {
            GameStatus::Check
        } else {
            GameStatus::InProgress
        })
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "in progress"),
            GameStatus::Check => write!(f, "check"),
            GameStatus::Checkmate { winner } => write!(f, "checkmate, {} wins", winner),
            GameStatus::Stalemate => write!(f, "stalemate"),
        }
    }
}

/// A hot-seat game between two human players.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    start: Board,
    history: Vec<Move>,
    status: GameStatus,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a game from the standard starting position.
    pub fn new() -> Self {
        let board = Board::standard();
        Game {
            start: board.clone(),
            board,
            history: Vec::new(),
            status: GameStatus::InProgress,
        }
    }

    /// Creates a game from a custom board. Both sides need exactly one king.
    pub fn from_board(board: Board) -> Result<Self, EngineError> {
        let status = GameStatus::of(&board)?;
        Ok(Game {
            start: board.clone(),
            board,
            history: Vec::new(),
            status,
        })
    }

    /// Creates a game from position notation.
    pub fn from_notation(text: &str) -> Result<Self, EngineError> {
        Self::from_board(Board::from_notation(text)?)
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn start_board(&self) -> &Board {
        &self.start
    }

    /// Moves played since the start board, oldest first.
    #[inline]
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    #[inline]
    pub fn ply_count(&self) -> usize {
        self.history.len()
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    #[inline]
    pub fn side_to_move(&self) -> Alliance {
        self.board.next_move_maker()
    }

    /// Legal moves of the side to move.
    pub fn legal_moves(&self) -> Result<Vec<Move>, EngineError> {
        Ok(self.board.current_player()?.legal_moves().to_vec())
    }

    pub fn to_notation(&self) -> String {
        self.board.to_notation()
    }

    /// Plays the move from `from` to `to`. Promotions default to a queen.
    pub fn play(
        &mut self,
        from: Coordinate,
        to: Coordinate,
        promotion: Option<PieceKind>,
    ) -> Result<Move, EngineError> {
        if self.is_over() {
            return Err(EngineError::GameOver);
        }
        let mv = self
            .board
            .current_player()?
            .select_move(from, to, promotion);
        if mv.is_null() {
            return Err(EngineError::IllegalMove(format!(
                "no move from {} to {}",
                from, to
            )));
        }
        self.make_move(mv)
    }

    /// Plays a move in coordinate form, e.g. `e2e4` or `e7e8n`.
    pub fn play_uci(&mut self, text: &str) -> Result<Move, EngineError> {
        let text = text.trim();
        if !text.is_ascii() || !(4..=5).contains(&text.len()) {
            return Err(EngineError::IllegalMove(format!(
                "'{}' is not a coordinate move",
                text
            )));
        }
        let from = Coordinate::from_algebraic(&text[0..2])?;
        let to = Coordinate::from_algebraic(&text[2..4])?;
        let promotion = match text[4..].chars().next() {
            None => None,
            Some(c) => match PieceKind::from_char(c) {
                Some((kind, _)) if kind.is_promotion_target() => Some(kind),
                _ => {
                    return Err(EngineError::IllegalMove(format!(
                        "'{}' is not a promotion piece",
                        c
                    )))
                }
            },
        };
        self.play(from, to, promotion)
    }

    /// Validates and plays a move generated on the current board.
    pub fn make_move(&mut self, mv: Move) -> Result<Move, EngineError> {
        if self.is_over() {
            return Err(EngineError::GameOver);
        }
        let transition = {
            let player = self.board.current_player()?;
            player.make_move(mv)
        };
        match transition.status {
            MoveStatus::Done => {}
            MoveStatus::IllegalMove => {
                return Err(EngineError::IllegalMove(format!("{} is not playable", mv)))
            }
            MoveStatus::LeavesPlayerInCheck => {
                return Err(EngineError::IllegalMove(format!(
                    "{} leaves the king in check",
                    mv
                )))
            }
        }

        let mv = transition.mv;
        let status = GameStatus::of(&transition.board)?;
        self.board = transition.board;
        self.history.push(mv);
        self.status = status;
        debug!(%mv, ply = self.history.len(), %status, "move played");
        Ok(mv)
    }

    /// Takes back the last move.
    pub fn undo(&mut self) -> Result<Move, EngineError> {
        let mv = self.history.pop().ok_or(EngineError::NothingToUndo)?;
        let previous = match mv.undo(&self.board) {
            Ok(board) => board,
            Err(err) => {
                self.history.push(mv);
                return Err(err);
            }
        };
        let status = match GameStatus::of(&previous) {
            Ok(status) => status,
            Err(err) => {
                self.history.push(mv);
                return Err(err);
            }
        };
        self.board = previous;
        self.status = status;
        debug!(%mv, ply = self.history.len(), "move taken back");
        Ok(mv)
    }

    /// Takes back every move, returning how many were undone.
    pub fn undo_all(&mut self) -> Result<usize, EngineError> {
        let mut count = 0;
        while !self.history.is_empty() {
            self.undo()?;
            count += 1;
        }
        Ok(count)
    }

    /// Returns to the start board and clears the history.
    pub fn reset(&mut self) {
        self.board = self.start.clone();
        self.history.clear();
        // The start board was validated when the game was created.
        self.status = GameStatus::of(&self.board).unwrap_or(GameStatus::InProgress);
        debug!("game reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> Coordinate {
        Coordinate::from_algebraic(s).unwrap()
    }

    #[test]
    fn new_game() {
        let game = Game::new();
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.side_to_move(), Alliance::White);
        assert_eq!(game.legal_moves().unwrap().len(), 20);
        assert_eq!(game.ply_count(), 0);
    }

    #[test]
    fn play_and_undo() {
        let mut game = Game::new();
        game.play(at("e2"), at("e4"), None).unwrap();
        game.play_uci("e7e5").unwrap();
        assert_eq!(game.ply_count(), 2);
        assert_eq!(game.side_to_move(), Alliance::White);

        let last = game.undo().unwrap();
        assert_eq!(last.to_uci(), "e7e5");
        assert_eq!(game.side_to_move(), Alliance::Black);

        game.undo().unwrap();
        assert_eq!(game.board(), game.start_board());
        assert_eq!(game.undo(), Err(EngineError::NothingToUndo));
    }

    #[test]
    fn illegal_move_leaves_game_unchanged() {
        let mut game = Game::new();
        let before = game.board().clone();
        assert!(matches!(
            game.play_uci("e2e5"),
            Err(EngineError::IllegalMove(_))
        ));
        assert_eq!(game.board(), &before);
        assert_eq!(game.ply_count(), 0);
    }

    #[test]
    fn malformed_uci() {
        let mut game = Game::new();
        assert!(matches!(
            game.play_uci("e2"),
            Err(EngineError::IllegalMove(_))
        ));
        assert!(matches!(
            game.play_uci("e2z4"),
            Err(EngineError::InvalidCoordinate(_))
        ));
        assert!(matches!(
            game.play_uci("e2e4k"),
            Err(EngineError::IllegalMove(_))
        ));
    }

    #[test]
    fn fools_mate_ends_game() {
        let mut game = Game::new();
        for uci in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            game.play_uci(uci).unwrap();
        }
        assert_eq!(
            game.status(),
            GameStatus::Checkmate {
                winner: Alliance::Black
            }
        );
        assert!(game.is_over());
        assert_eq!(game.play_uci("a2a3"), Err(EngineError::GameOver));

        game.undo().unwrap();
        assert_eq!(game.status(), GameStatus::InProgress);
    }

    #[test]
    fn check_status() {
        let mut game = Game::new();
        for uci in ["e2e4", "f7f6", "d2d4", "g7g5"] {
            game.play_uci(uci).unwrap();
        }
        game.play_uci("d1h5").unwrap();
        assert_eq!(
            game.status(),
            GameStatus::Checkmate {
                winner: Alliance::White
            }
        );

        let mut game = Game::new();
        for uci in ["e2e4", "f7f6", "d1h5"] {
            game.play_uci(uci).unwrap();
        }
        assert_eq!(game.status(), GameStatus::Check);
    }

    #[test]
    fn underpromotion_by_uci() {
        let mut game = Game::from_notation("8/P7/8/8/8/8/8/4K2k w - - 0 1").unwrap();
        let mv = game.play_uci("a7a8r").unwrap();
        assert_eq!(mv.promotion(), Some(PieceKind::Rook));
        assert_eq!(
            game.board().piece_at(at("a8")).unwrap().kind(),
            PieceKind::Rook
        );
    }

    #[test]
    fn reset_and_undo_all() {
        let mut game = Game::new();
        for uci in ["g1f3", "g8f6", "b1c3"] {
            game.play_uci(uci).unwrap();
        }
        let mut copy = game.clone();
        assert_eq!(copy.undo_all().unwrap(), 3);
        assert_eq!(copy.board(), copy.start_board());

        game.reset();
        assert_eq!(game.ply_count(), 0);
        assert_eq!(game.board(), &Board::standard());
    }

    #[test]
    fn undo_restores_en_passant_of_played_board() {
        let quiet = Board::from_notation("4k3/8/8/3pP3/8/8/8/4K1N1 w - - 0 1").unwrap();
        let mv = quiet
            .current_player()
            .unwrap()
            .select_move(at("g1"), at("f3"), None);

        let mut game = Game::from_notation("4k3/8/8/3pP3/8/8/8/4K1N1 w - d6 0 1").unwrap();
        let before = game.board().clone();
        assert!(before.en_passant_pawn().is_some());

        game.make_move(mv).unwrap();
        game.undo().unwrap();
        assert_eq!(game.board(), &before);
        assert!(game.board().en_passant_pawn().is_some());
    }

    #[test]
    fn stalemate_start_is_over() {
        let game = Game::from_notation("8/8/8/8/8/kq6/8/K7 w - - 0 1").unwrap();
        assert_eq!(game.status(), GameStatus::Stalemate);
        assert!(game.is_over());
    }

    #[test]
    fn from_notation_requires_kings() {
        assert!(matches!(
            Game::from_notation("8/8/8/8/8/8/8/4K3 w - - 0 1"),
            Err(EngineError::InvariantViolation(_))
        ));
    }
}
