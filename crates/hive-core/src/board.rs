//! Board representation: which pieces sit where.
//!
//! This module contains:
//! - The occupancy store (cell -> stack of pieces, bottom first)
//! - Low-level drop/lift used to commit validated actions
//! - Placement legality for a player
//! - Legal move maps built from the generators in [`crate::movement`]

use crate::hex::HexCoord;
use crate::movement::{legal_destinations, HiveView};
use crate::piece::{Piece, PieceId};
use crate::player::PlayerColor;
use std::collections::{HashMap, HashSet};

/// Legal destinations per movable piece, keyed by the cell the piece sits on
pub type MoveMap = HashMap<HexCoord, HashSet<HexCoord>>;

/// The hive: every piece in play, stacked per cell.
///
/// Only the last piece of a stack is on top; it alone counts for ownership,
/// adjacency and movement. Cells with no pieces are not stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    stacks: HashMap<HexCoord, Vec<Piece>>,
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no piece has been placed yet
    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    /// The piece on top of the stack at `at`
    pub fn top_piece(&self, at: HexCoord) -> Option<&Piece> {
        self.stacks.get(&at).and_then(|stack| stack.last())
    }

    /// Pieces at `at`, bottom first
    pub fn stack_at(&self, at: HexCoord) -> &[Piece] {
        self.stacks.get(&at).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Cells holding at least one piece
    pub fn occupied_positions(&self) -> impl Iterator<Item = HexCoord> + '_ {
        self.stacks.keys().copied()
    }

    /// All pieces in play, sorted by cell and then bottom to top
    pub fn pieces(&self) -> Vec<&Piece> {
        let mut cells: Vec<_> = self.stacks.iter().collect();
        cells.sort_by_key(|(coord, _)| **coord);
        cells.into_iter().flat_map(|(_, stack)| stack.iter()).collect()
    }

    /// Where a piece currently sits
    pub fn locate(&self, id: PieceId) -> Option<HexCoord> {
        self.stacks
            .iter()
            .find(|(_, stack)| stack.iter().any(|p| p.id == id))
            .map(|(coord, _)| *coord)
    }

    /// Unconditionally put a piece on top of the stack at `at`
    pub fn drop_piece(&mut self, mut piece: Piece, at: HexCoord) {
        let stack = self.stacks.entry(at).or_default();
        piece.position = Some(at);
        piece.stack_height = stack.len();
        stack.push(piece);
    }

    /// Unconditionally take the top piece off the stack at `at`
    pub fn lift_top(&mut self, at: HexCoord) -> Option<Piece> {
        let stack = self.stacks.get_mut(&at)?;
        let piece = stack.pop();
        if stack.is_empty() {
            self.stacks.remove(&at);
        }
        piece
    }

    /// Move the top piece at `from` to `to` without checking any rule.
    ///
    /// Returns the moved piece as it now stands, or `None` if `from` was empty.
    pub fn relocate_top(&mut self, from: HexCoord, to: HexCoord) -> Option<Piece> {
        let piece = self.lift_top(from)?;
        self.drop_piece(piece, to);
        self.top_piece(to).copied()
    }

    /// Cells where `player` may put a new piece.
    ///
    /// The opening piece must go on the origin and the reply must touch it.
    /// After that a new piece must touch at least one piece and may only touch
    /// stacks topped by its owner.
    pub fn legal_placements_for(&self, player: PlayerColor) -> HashSet<HexCoord> {
        if self.stacks.is_empty() {
            return HashSet::from([HexCoord::ORIGIN]);
        }

        if self.stacks.len() == 1 {
            if let Some((&only, stack)) = self.stacks.iter().next() {
                if stack.len() == 1 {
                    return only.neighbors().into_iter().collect();
                }
            }
        }

        let mut legal = HashSet::new();
        let mut seen = HashSet::new();

        for (&coord, stack) in &self.stacks {
            let Some(top) = stack.last() else { continue };
            if top.owner != player {
                continue;
            }

            for candidate in coord.neighbors() {
                if self.is_occupied(candidate) || !seen.insert(candidate) {
                    continue;
                }
                if self.touches_only(candidate, player) {
                    legal.insert(candidate);
                }
            }
        }

        legal
    }

    /// Whether `at` has at least one occupied neighbor and every one of them is topped by `player`
    fn touches_only(&self, at: HexCoord, player: PlayerColor) -> bool {
        let mut touching = at.neighbors().into_iter().filter_map(|n| self.top_piece(n)).peekable();
        touching.peek().is_some() && touching.all(|p| p.owner == player)
    }

    /// Legal destinations for the top piece at `from`, whoever owns it
    pub fn legal_moves_from(&self, from: HexCoord) -> HashSet<HexCoord> {
        match self.top_piece(from) {
            Some(piece) => legal_destinations(self, piece.piece_type, from),
            None => HashSet::new(),
        }
    }

    /// Every movable top piece owned by `player` with its legal destinations.
    ///
    /// Pieces with no legal destination are left out.
    pub fn legal_moves_for(&self, player: PlayerColor) -> MoveMap {
        self.stacks
            .iter()
            .filter_map(|(&coord, stack)| {
                let top = stack.last()?;
                if top.owner != player {
                    return None;
                }
                let dests = legal_destinations(self, top.piece_type, coord);
                (!dests.is_empty()).then_some((coord, dests))
            })
            .collect()
    }

    /// Move the top piece at `from` to `to` if its generator allows it
    pub fn move_top_piece(&mut self, from: HexCoord, to: HexCoord) -> bool {
        if !self.legal_moves_from(from).contains(&to) {
            return false;
        }
        self.relocate_top(from, to).is_some()
    }

    /// Whether every neighbor of `at` is occupied
    pub fn is_surrounded(&self, at: HexCoord) -> bool {
        at.neighbors().iter().all(|&n| self.is_occupied(n))
    }

    /// Whether the occupied cells form one connected group (vacuously true when empty)
    pub fn is_connected(&self) -> bool {
        let Some(start) = self.occupied_positions().next() else {
            return true;
        };

        let mut visited = HashSet::with_capacity(self.stacks.len());
        let mut frontier = vec![start];
        while let Some(cur) = frontier.pop() {
            if !visited.insert(cur) {
                continue;
            }
            frontier.extend(
                cur.neighbors()
                    .into_iter()
                    .filter(|n| self.stacks.contains_key(n) && !visited.contains(n)),
            );
        }

        visited.len() == self.stacks.len()
    }
}

impl HiveView for Board {
    fn is_occupied(&self, at: HexCoord) -> bool {
        self.stacks.contains_key(&at)
    }

    fn stack_height(&self, at: HexCoord) -> usize {
        self.stacks.get(&at).map_or(0, Vec::len)
    }

    fn occupied_cells(&self) -> Vec<HexCoord> {
        self.stacks.keys().copied().collect()
    }
}
