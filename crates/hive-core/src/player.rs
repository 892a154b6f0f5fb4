//! Player state and piece reserves.
//!
//! This module contains:
//! - PlayerColor, the two sides of a match
//! - Reserve, the per-type count of pieces not yet in play
//! - PlayerState, the reserve plus the ledger of placed pieces

use crate::piece::{PieceId, PieceType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of non-queen pieces a player may place before the queen is mandatory
pub const MAX_PLACEMENTS_WITHOUT_QUEEN: usize = 3;

/// The two sides of a match. White always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlayerColor {
    White,
    Black,
}

impl PlayerColor {
    /// Both colors in turn order
    pub const ALL: [PlayerColor; 2] = [PlayerColor::White, PlayerColor::Black];

    /// The other side
    pub const fn opponent(self) -> Self {
        match self {
            PlayerColor::White => PlayerColor::Black,
            PlayerColor::Black => PlayerColor::White,
        }
    }
}

impl fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerColor::White => f.write_str("White"),
            PlayerColor::Black => f.write_str("Black"),
        }
    }
}

/// Pieces a player has not yet put into play
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reserve {
    pub queen: u8,
    pub ant: u8,
    pub beetle: u8,
    pub spider: u8,
    pub grasshopper: u8,
}

impl Default for Reserve {
    fn default() -> Self {
        Self::full()
    }
}

impl Reserve {
    /// The starting set: 1 queen, 3 ants, 2 beetles, 2 spiders, 3 grasshoppers
    pub fn full() -> Self {
        Self {
            queen: PieceType::Queen.initial_count(),
            ant: PieceType::Ant.initial_count(),
            beetle: PieceType::Beetle.initial_count(),
            spider: PieceType::Spider.initial_count(),
            grasshopper: PieceType::Grasshopper.initial_count(),
        }
    }

    /// A reserve with nothing left in it
    pub fn empty() -> Self {
        Self {
            queen: 0,
            ant: 0,
            beetle: 0,
            spider: 0,
            grasshopper: 0,
        }
    }

    /// Get count of a specific piece type
    pub fn count(&self, piece_type: PieceType) -> u8 {
        match piece_type {
            PieceType::Queen => self.queen,
            PieceType::Ant => self.ant,
            PieceType::Beetle => self.beetle,
            PieceType::Spider => self.spider,
            PieceType::Grasshopper => self.grasshopper,
        }
    }

    fn slot_mut(&mut self, piece_type: PieceType) -> &mut u8 {
        match piece_type {
            PieceType::Queen => &mut self.queen,
            PieceType::Ant => &mut self.ant,
            PieceType::Beetle => &mut self.beetle,
            PieceType::Spider => &mut self.spider,
            PieceType::Grasshopper => &mut self.grasshopper,
        }
    }

    pub fn contains(&self, piece_type: PieceType) -> bool {
        self.count(piece_type) > 0
    }

    /// Take one piece of a type out of the reserve, returning false if none are left
    pub fn take(&mut self, piece_type: PieceType) -> bool {
        let slot = self.slot_mut(piece_type);
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }

    /// Total number of pieces left
    pub fn total(&self) -> u32 {
        PieceType::ALL.iter().map(|&t| self.count(t) as u32).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Piece types that still have at least one piece, with their counts
    pub fn entries(&self) -> Vec<(PieceType, u8)> {
        PieceType::ALL
            .iter()
            .map(|&t| (t, self.count(t)))
            .filter(|&(_, n)| n > 0)
            .collect()
    }
}

/// One side's reserve and placed-piece ledger.
///
/// For every piece type, `reserve.count(t)` plus the number of placed pieces
/// of that type equals `t.initial_count()` for the whole match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub color: PlayerColor,
    pub reserve: Reserve,
    /// Pieces put into play, in placement order
    pub placed: Vec<(PieceId, PieceType)>,
    /// The queen, once placed
    pub queen: Option<PieceId>,
}

impl PlayerState {
    pub fn new(color: PlayerColor) -> Self {
        Self {
            color,
            reserve: Reserve::full(),
            placed: Vec::new(),
            queen: None,
        }
    }

    pub fn queen_placed(&self) -> bool {
        self.queen.is_some()
    }

    /// Whether the next placement has to be the queen
    pub fn must_place_queen(&self) -> bool {
        !self.queen_placed() && self.placed.len() >= MAX_PLACEMENTS_WITHOUT_QUEEN
    }

    /// Whether the player may put a piece of this type into play next,
    /// ignoring where it would go
    pub fn can_place(&self, piece_type: PieceType) -> bool {
        self.reserve.contains(piece_type)
            && (piece_type == PieceType::Queen || !self.must_place_queen())
    }

    /// How many pieces of a type are in play
    pub fn placed_count(&self, piece_type: PieceType) -> usize {
        self.placed.iter().filter(|(_, t)| *t == piece_type).count()
    }

    /// Record a piece taken from the reserve and put into play.
    ///
    /// Returns false, leaving the ledger untouched, if the reserve has none left.
    pub fn record_placement(&mut self, id: PieceId, piece_type: PieceType) -> bool {
        if !self.reserve.take(piece_type) {
            return false;
        }
        self.placed.push((id, piece_type));
        if piece_type == PieceType::Queen {
            self.queen = Some(id);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_reserve() {
        let reserve = Reserve::full();
        assert_eq!(reserve.total(), 11);
        assert_eq!(reserve.count(PieceType::Ant), 3);
        assert!(!reserve.is_empty());
    }

    #[test]
    fn test_take_stops_at_zero() {
        let mut reserve = Reserve::full();
        assert!(reserve.take(PieceType::Queen));
        assert!(!reserve.take(PieceType::Queen));
        assert_eq!(reserve.count(PieceType::Queen), 0);
        assert_eq!(reserve.total(), 10);
    }

    #[test]
    fn test_entries_skip_exhausted_types() {
        let mut reserve = Reserve::empty();
        reserve.spider = 2;
        assert_eq!(reserve.entries(), vec![(PieceType::Spider, 2)]);
    }

    #[test]
    fn test_ledger_balances() {
        let mut player = PlayerState::new(PlayerColor::White);
        assert!(player.record_placement(0, PieceType::Ant));
        assert!(player.record_placement(2, PieceType::Ant));

        for t in PieceType::ALL {
            assert_eq!(
                player.reserve.count(t) as usize + player.placed_count(t),
                t.initial_count() as usize
            );
        }
    }

    #[test]
    fn test_queen_becomes_mandatory_after_three() {
        let mut player = PlayerState::new(PlayerColor::Black);
        for (id, t) in [(1, PieceType::Ant), (3, PieceType::Spider), (5, PieceType::Beetle)] {
            assert!(!player.must_place_queen());
            player.record_placement(id, t);
        }

        assert!(player.must_place_queen());
        assert!(!player.can_place(PieceType::Grasshopper));
        assert!(player.can_place(PieceType::Queen));

        player.record_placement(7, PieceType::Queen);
        assert!(player.queen_placed());
        assert_eq!(player.queen, Some(7));
        assert!(player.can_place(PieceType::Grasshopper));
    }

    #[test]
    fn test_opponent() {
        assert_eq!(PlayerColor::White.opponent(), PlayerColor::Black);
        assert_eq!(PlayerColor::Black.opponent(), PlayerColor::White);
    }
}
