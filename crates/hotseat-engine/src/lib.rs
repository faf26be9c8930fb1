//! Chess rules engine for hot-seat play.
//!
//! This crate provides:
//! - [`Piece`] - pieces and their candidate move generation
//! - [`Move`] - transitions that can be executed and taken back exactly
//! - [`Board`] - immutable positions, built through [`BoardBuilder`]
//! - [`Player`] - legal move filtering, check, checkmate, and stalemate
//! - [`Game`] - a session with history and undo
//! - [`perft`] - move generator validation
//!
//! # Architecture
//!
//! Boards are never mutated. A piece generates candidate moves against a
//! board, the player keeps those that leave its king safe, and executing a
//! move builds the next board from scratch. Undoing a move rebuilds the
//! previous board from the next one.
//!
//! # Example
//!
//! ```
//! use hotseat_engine::{Board, Game};
//!
//! let board = Board::standard();
//! let player = board.current_player().unwrap();
//! println!("Legal moves from the start: {}", player.legal_moves().len());
//!
//! let mut game = Game::new();
//! game.play_uci("e2e4").unwrap();
//! game.play_uci("e7e5").unwrap();
//! println!("After 1.e4 e5: {}", game.to_notation());
//! ```

mod board;
mod error;
mod game;
mod moves;
pub mod perft;
mod piece;
mod player;
mod tables;

pub use board::{Board, BoardBuilder, Tile};
pub use error::EngineError;
pub use game::{Game, GameStatus};
pub use moves::{CastleSide, Move, MoveKind};
pub use perft::{perft, perft_divide};
pub use piece::{CastleCapability, CastleLayout, Piece};
pub use player::{MoveStatus, MoveTransition, Player};
