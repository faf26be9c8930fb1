//! Core types for hotseat chess.
//!
//! This crate provides the leaf types shared by the rules engine and its
//! front ends:
//! - [`Alliance`] for the two sides
//! - [`PieceKind`] for the six piece types
//! - [`Coordinate`] and the [`board_utils`] geometry tables
//! - Position notation parsing and writing

mod alliance;
pub mod board_utils;
mod coordinate;
mod notation;
mod piece_kind;

pub use alliance::Alliance;
pub use coordinate::{Coordinate, CoordinateError};
pub use notation::{CastlingRights, MoveClocks, NotationError, Placement, PositionNotation};
pub use piece_kind::PieceKind;
