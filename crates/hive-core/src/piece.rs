//! Piece types and placed pieces.

use crate::hex::HexCoord;
use crate::player::PlayerColor;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a piece, unique within one match
pub type PieceId = u8;

/// The five kinds of bug in the base game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PieceType {
    /// Slides one cell; surrounding it wins the match
    Queen,
    /// Slides any distance around the hive
    Ant,
    /// Moves one cell and may climb on top of other pieces
    Beetle,
    /// Slides exactly three cells
    Spider,
    /// Jumps in a straight line over at least one piece
    Grasshopper,
}

impl PieceType {
    /// All piece types
    pub const ALL: [PieceType; 5] = [
        PieceType::Queen,
        PieceType::Ant,
        PieceType::Beetle,
        PieceType::Spider,
        PieceType::Grasshopper,
    ];

    /// How many of this type each player starts with
    pub const fn initial_count(self) -> u8 {
        match self {
            PieceType::Queen => 1,
            PieceType::Ant => 3,
            PieceType::Beetle => 2,
            PieceType::Spider => 2,
            PieceType::Grasshopper => 3,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PieceType::Queen => "Queen",
            PieceType::Ant => "Ant",
            PieceType::Beetle => "Beetle",
            PieceType::Spider => "Spider",
            PieceType::Grasshopper => "Grasshopper",
        }
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown piece type: {0}")]
pub struct UnknownPieceType(pub String);

impl FromStr for PieceType {
    type Err = UnknownPieceType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "queen" | "queenbee" | "queen_bee" => Ok(PieceType::Queen),
            "ant" => Ok(PieceType::Ant),
            "beetle" => Ok(PieceType::Beetle),
            "spider" => Ok(PieceType::Spider),
            "grasshopper" => Ok(PieceType::Grasshopper),
            _ => Err(UnknownPieceType(s.to_string())),
        }
    }
}

/// A piece that has been put into play.
///
/// `position` and `stack_height` are written by the board when the piece is
/// dropped. `stack_height` is the index the piece took in its cell's stack at
/// that moment and is not refreshed when pieces below it leave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub piece_type: PieceType,
    pub owner: PlayerColor,
    pub position: Option<HexCoord>,
    pub stack_height: usize,
}

impl Piece {
    /// Create an unplaced piece
    pub fn new(id: PieceId, piece_type: PieceType, owner: PlayerColor) -> Self {
        Self {
            id,
            piece_type,
            owner,
            position: None,
            stack_height: 0,
        }
    }

    pub fn is_placed(&self) -> bool {
        self.position.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_counts_total_eleven() {
        let total: u8 = PieceType::ALL.iter().map(|t| t.initial_count()).sum();
        assert_eq!(total, 11);
    }

    #[test]
    fn test_parse_piece_type() {
        assert_eq!("QueenBee".parse::<PieceType>().unwrap(), PieceType::Queen);
        assert_eq!("queen".parse::<PieceType>().unwrap(), PieceType::Queen);
        assert_eq!("GRASSHOPPER".parse::<PieceType>().unwrap(), PieceType::Grasshopper);
        assert!("Mosquito".parse::<PieceType>().is_err());
    }

    #[test]
    fn test_new_piece_is_unplaced() {
        let piece = Piece::new(3, PieceType::Spider, PlayerColor::Black);
        assert!(!piece.is_placed());
        assert_eq!(piece.stack_height, 0);
    }
}
