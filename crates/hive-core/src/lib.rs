//! Hive rules engine
//!
//! This crate provides the core rules for a two-player Hive match:
//! - Axial hex coordinates and neighbor geometry
//! - Piece types, reserves and placement ledgers
//! - Movement generators for every piece type, with the one-hive and
//!   freedom-of-movement constraints
//! - A match state machine that validates and applies actions and detects
//!   wins and draws
//!
//! # Architecture
//!
//! The engine is platform-agnostic. It can be compiled to:
//! - Native Rust for server-side match hosting
//! - WebAssembly for a client running matches locally
//!
//! # Modules
//!
//! - [`hex`]: Axial coordinates, directions and distances
//! - [`piece`]: Piece types and on-board pieces
//! - [`player`]: Colors, reserves and per-player state
//! - [`movement`]: Hive connectivity, sliding/climbing gates and move generators
//! - [`board`]: Stacks of pieces, placement and move legality
//! - [`actions`]: Actions and the events they produce
//! - [`game`]: Match state machine

pub mod actions;
pub mod board;
pub mod game;
pub mod hex;
pub mod movement;
pub mod piece;
pub mod player;
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use actions::{MatchAction, MatchEvent};
pub use board::{Board, MoveMap};
pub use game::{MatchError, MatchPhase, MatchState, MatchView, PieceView, PlayerView};
pub use hex::{Direction, HexCoord};
pub use movement::{legal_destinations, HiveView};
pub use piece::{Piece, PieceId, PieceType, UnknownPieceType};
pub use player::{PlayerColor, PlayerState, Reserve};
