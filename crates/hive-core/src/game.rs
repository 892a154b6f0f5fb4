//! Core match state machine.
//!
//! `MatchState` owns the board and both players. Every action is checked
//! against the legal sets cached at the last turn change before anything is
//! mutated, so a rejected action never leaves a trace.

use crate::actions::{MatchAction, MatchEvent};
use crate::board::{Board, MoveMap};
use crate::hex::HexCoord;
use crate::piece::{Piece, PieceId, PieceType};
use crate::player::{PlayerColor, PlayerState, Reserve};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, info};

/// Match phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchPhase {
    /// At least one queen is still in reserve
    Start,
    /// Both queens are in play
    PlaceOrMove,
    /// Terminal; every action is rejected
    GameOver,
}

/// Reasons an action is rejected. None of them change the match.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum MatchError {
    #[error("Match is over")]
    GameOver,

    #[error("Cannot place a piece at {0}")]
    IllegalPlacement(HexCoord),

    #[error("No {0} left in reserve")]
    NotInReserve(PieceType),

    #[error("Queen must be placed by the fourth placement")]
    QueenRequired,

    #[error("Queen must be placed before moving")]
    QueenNotPlaced,

    #[error("No piece at {0}")]
    NoPieceAt(HexCoord),

    #[error("Piece at {0} belongs to the other player")]
    NotYourPiece(HexCoord),

    #[error("Illegal move from {from} to {to}")]
    IllegalMove { from: HexCoord, to: HexCoord },

    #[error("Cannot pass while a placement or move is available")]
    CannotPass,
}

/// A piece on the board, flattened for clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceView {
    pub piece_type: PieceType,
    pub owner: PlayerColor,
    pub q: i32,
    pub r: i32,
    pub stack_height: usize,
}

impl PieceView {
    fn from_piece(piece: &Piece) -> Option<Self> {
        let at = piece.position?;
        Some(Self {
            piece_type: piece.piece_type,
            owner: piece.owner,
            q: at.q,
            r: at.r,
            stack_height: piece.stack_height,
        })
    }
}

/// One player's side of the snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub color: PlayerColor,
    pub reserve: Reserve,
    pub queen_placed: bool,
}

/// Serializable snapshot of a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchView {
    pub phase: MatchPhase,
    pub current_player: PlayerColor,
    pub pieces: Vec<PieceView>,
    pub players: Vec<PlayerView>,
    /// The current player has nothing to do but pass
    pub can_pass: bool,
    pub winner: Option<PlayerColor>,
    pub is_draw: bool,
}

/// The complete state of one match
#[derive(Debug, Clone)]
pub struct MatchState {
    board: Board,
    white: PlayerState,
    black: PlayerState,
    current_player: PlayerColor,
    phase: MatchPhase,
    winner: Option<PlayerColor>,
    is_draw: bool,
    /// Placement cells for the current player, computed at the last turn change
    legal_placements: HashSet<HexCoord>,
    /// Moves for the current player, computed at the last turn change
    legal_moves: MoveMap,
    /// The current player has no placement and no move
    current_must_pass: bool,
    /// The player before had to pass
    previous_passed: bool,
    next_piece_id: PieceId,
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchState {
    /// Start a new match: empty board, full reserves, White to play
    pub fn new() -> Self {
        let mut state = Self {
            board: Board::new(),
            white: PlayerState::new(PlayerColor::White),
            black: PlayerState::new(PlayerColor::Black),
            current_player: PlayerColor::White,
            phase: MatchPhase::Start,
            winner: None,
            is_draw: false,
            legal_placements: HashSet::new(),
            legal_moves: MoveMap::new(),
            current_must_pass: false,
            previous_passed: false,
            next_piece_id: 0,
        };
        state.refresh_legal_sets();
        state.current_must_pass = state.compute_must_pass();
        state
    }

    // ==================== Queries ====================

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn current_player(&self) -> PlayerColor {
        self.current_player
    }

    pub fn winner(&self) -> Option<PlayerColor> {
        self.winner
    }

    pub fn is_draw(&self) -> bool {
        self.is_draw
    }

    pub fn is_finished(&self) -> bool {
        self.phase == MatchPhase::GameOver
    }

    /// Whether the current player's only legal action is to pass
    pub fn must_pass(&self) -> bool {
        self.current_must_pass
    }

    /// Whether the player who moved last was forced to pass
    pub fn previous_player_passed(&self) -> bool {
        self.previous_passed
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn player(&self, color: PlayerColor) -> &PlayerState {
        match color {
            PlayerColor::White => &self.white,
            PlayerColor::Black => &self.black,
        }
    }

    fn player_mut(&mut self, color: PlayerColor) -> &mut PlayerState {
        match color {
            PlayerColor::White => &mut self.white,
            PlayerColor::Black => &mut self.black,
        }
    }

    fn current(&self) -> &PlayerState {
        self.player(self.current_player)
    }

    /// All pieces on the board, sorted by cell and then stack height
    pub fn pieces(&self) -> Vec<PieceView> {
        self.board
            .pieces()
            .into_iter()
            .filter_map(PieceView::from_piece)
            .collect()
    }

    /// Cells where the current player may place a piece, sorted
    pub fn legal_placements(&self) -> Vec<HexCoord> {
        sorted(&self.legal_placements)
    }

    /// Cells where the current player may place a piece of this type.
    ///
    /// Empty when the type is exhausted or when the queen is due and this
    /// is not the queen.
    pub fn legal_placements_for(&self, piece_type: PieceType) -> Vec<HexCoord> {
        if !self.current().can_place(piece_type) {
            return Vec::new();
        }
        self.legal_placements()
    }

    /// Destinations for the current player's piece at `from`, sorted
    pub fn legal_moves_from(&self, from: HexCoord) -> Vec<HexCoord> {
        self.legal_moves.get(&from).map(sorted).unwrap_or_default()
    }

    /// Every movable piece of the current player with its destinations
    pub fn legal_moves(&self) -> &MoveMap {
        &self.legal_moves
    }

    /// Every action the current player may take right now
    pub fn valid_actions(&self) -> Vec<MatchAction> {
        let mut actions = Vec::new();

        if self.phase == MatchPhase::GameOver {
            return actions;
        }

        if self.current_must_pass {
            actions.push(MatchAction::Pass);
            return actions;
        }

        let placements = self.legal_placements();
        for piece_type in PieceType::ALL {
            if !self.current().can_place(piece_type) {
                continue;
            }
            for &at in &placements {
                actions.push(MatchAction::PlaceBug { piece_type, at });
            }
        }

        let mut sources: Vec<_> = self.legal_moves.keys().copied().collect();
        sources.sort();
        for from in sources {
            for to in self.legal_moves_from(from) {
                actions.push(MatchAction::MoveBug { from, to });
            }
        }

        actions
    }

    /// Snapshot for clients
    pub fn view(&self) -> MatchView {
        MatchView {
            phase: self.phase,
            current_player: self.current_player,
            pieces: self.pieces(),
            players: PlayerColor::ALL
                .iter()
                .map(|&color| {
                    let player = self.player(color);
                    PlayerView {
                        color,
                        reserve: player.reserve.clone(),
                        queen_placed: player.queen_placed(),
                    }
                })
                .collect(),
            can_pass: self.current_must_pass,
            winner: self.winner,
            is_draw: self.is_draw,
        }
    }

    // ==================== Actions ====================

    /// Place a piece; false if the placement is not allowed
    pub fn place_bug(&mut self, piece_type: PieceType, at: HexCoord) -> bool {
        self.apply_and_report(MatchAction::PlaceBug { piece_type, at })
    }

    /// Move the top piece at `from`; false if the move is not allowed
    pub fn move_bug(&mut self, from: HexCoord, to: HexCoord) -> bool {
        self.apply_and_report(MatchAction::MoveBug { from, to })
    }

    /// Pass the turn; false unless the current player has no other option
    pub fn force_pass(&mut self) -> bool {
        self.apply_and_report(MatchAction::Pass)
    }

    fn apply_and_report(&mut self, action: MatchAction) -> bool {
        match self.apply_action(action) {
            Ok(_) => true,
            Err(err) => {
                debug!(player = %self.current_player, ?action, %err, "action rejected");
                false
            }
        }
    }

    /// Apply an action for the current player
    pub fn apply_action(&mut self, action: MatchAction) -> Result<Vec<MatchEvent>, MatchError> {
        match action {
            MatchAction::PlaceBug { piece_type, at } => self.try_place_bug(piece_type, at),
            MatchAction::MoveBug { from, to } => self.try_move_bug(from, to),
            MatchAction::Pass => self.try_force_pass(),
        }
    }

    pub fn try_place_bug(
        &mut self,
        piece_type: PieceType,
        at: HexCoord,
    ) -> Result<Vec<MatchEvent>, MatchError> {
        if self.phase == MatchPhase::GameOver {
            return Err(MatchError::GameOver);
        }
        if !self.legal_placements.contains(&at) {
            return Err(MatchError::IllegalPlacement(at));
        }

        let player = self.current();
        if !player.reserve.contains(piece_type) {
            return Err(MatchError::NotInReserve(piece_type));
        }
        if piece_type != PieceType::Queen && player.must_place_queen() {
            return Err(MatchError::QueenRequired);
        }

        let color = self.current_player;
        let id = self.next_piece_id;
        if !self.player_mut(color).record_placement(id, piece_type) {
            return Err(MatchError::NotInReserve(piece_type));
        }
        self.next_piece_id += 1;
        self.board.drop_piece(Piece::new(id, piece_type, color), at);

        let mut events = vec![MatchEvent::PiecePlaced {
            player: color,
            piece_type,
            at,
        }];

        if piece_type == PieceType::Queen
            && self.phase == MatchPhase::Start
            && self.player(color.opponent()).queen_placed()
        {
            self.phase = MatchPhase::PlaceOrMove;
            info!("both queens placed, movement open to both players");
            events.push(MatchEvent::PhaseChanged {
                phase: MatchPhase::PlaceOrMove,
            });
        }

        self.advance_turn(&mut events);
        Ok(events)
    }

    pub fn try_move_bug(
        &mut self,
        from: HexCoord,
        to: HexCoord,
    ) -> Result<Vec<MatchEvent>, MatchError> {
        if self.phase == MatchPhase::GameOver {
            return Err(MatchError::GameOver);
        }
        if !self.current().queen_placed() {
            return Err(MatchError::QueenNotPlaced);
        }

        let piece = *self.board.top_piece(from).ok_or(MatchError::NoPieceAt(from))?;
        if piece.owner != self.current_player {
            return Err(MatchError::NotYourPiece(from));
        }

        let allowed = self
            .legal_moves
            .get(&from)
            .is_some_and(|dests| dests.contains(&to));
        if !allowed {
            return Err(MatchError::IllegalMove { from, to });
        }

        self.board
            .relocate_top(from, to)
            .ok_or(MatchError::NoPieceAt(from))?;

        let mut events = vec![MatchEvent::PieceMoved {
            player: self.current_player,
            piece_type: piece.piece_type,
            from,
            to,
        }];
        self.advance_turn(&mut events);
        Ok(events)
    }

    pub fn try_force_pass(&mut self) -> Result<Vec<MatchEvent>, MatchError> {
        if self.phase == MatchPhase::GameOver {
            return Err(MatchError::GameOver);
        }
        if !self.current_must_pass {
            return Err(MatchError::CannotPass);
        }

        let mut events = vec![MatchEvent::TurnPassed {
            player: self.current_player,
        }];
        self.advance_turn(&mut events);
        Ok(events)
    }

    // ==================== Turn Management ====================

    fn advance_turn(&mut self, events: &mut Vec<MatchEvent>) {
        self.current_player = self.current_player.opponent();
        self.refresh_legal_sets();
        self.previous_passed = self.current_must_pass;
        self.current_must_pass = self.compute_must_pass();
        self.check_game_end(events);
    }

    fn refresh_legal_sets(&mut self) {
        let color = self.current_player;
        self.legal_placements = self.board.legal_placements_for(color);
        self.legal_moves = if self.player(color).queen_placed() {
            self.board.legal_moves_for(color)
        } else {
            MoveMap::new()
        };
    }

    /// No placement (reserve empty or nowhere to go) and no move (queen in
    /// reserve or nothing movable)
    fn compute_must_pass(&self) -> bool {
        if self.phase == MatchPhase::GameOver {
            return false;
        }

        let player = self.current();
        let can_place = !player.reserve.is_empty() && !self.legal_placements.is_empty();
        let can_move = player.queen_placed() && !self.legal_moves.is_empty();

        !can_place && !can_move
    }

    fn queen_surrounded(&self, color: PlayerColor) -> bool {
        self.player(color)
            .queen
            .and_then(|id| self.board.locate(id))
            .is_some_and(|at| self.board.is_surrounded(at))
    }

    fn check_game_end(&mut self, events: &mut Vec<MatchEvent>) {
        let white_surrounded = self.queen_surrounded(PlayerColor::White);
        let black_surrounded = self.queen_surrounded(PlayerColor::Black);

        if (white_surrounded && black_surrounded) || (self.previous_passed && self.current_must_pass)
        {
            self.is_draw = true;
            info!("match drawn");
            events.push(MatchEvent::MatchDrawn);
        } else if white_surrounded || black_surrounded {
            let winner = if white_surrounded {
                PlayerColor::Black
            } else {
                PlayerColor::White
            };
            self.winner = Some(winner);
            info!(%winner, "queen surrounded, match won");
            events.push(MatchEvent::MatchWon { winner });
        } else {
            return;
        }

        self.phase = MatchPhase::GameOver;
        self.legal_placements.clear();
        self.legal_moves.clear();
        self.current_must_pass = false;
        events.push(MatchEvent::PhaseChanged {
            phase: MatchPhase::GameOver,
        });
    }
}

fn sorted(cells: &HashSet<HexCoord>) -> Vec<HexCoord> {
    let mut cells: Vec<_> = cells.iter().copied().collect();
    cells.sort();
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn at(q: i32, r: i32) -> HexCoord {
        HexCoord::new(q, r)
    }

    /// Build a mid-match position directly, bypassing placement rules
    fn position(
        pieces: &[(i32, i32, PieceType, PlayerColor)],
        to_move: PlayerColor,
    ) -> MatchState {
        let mut state = MatchState::new();
        for &(q, r, piece_type, color) in pieces {
            let id = state.next_piece_id;
            state.next_piece_id += 1;
            assert!(state.player_mut(color).record_placement(id, piece_type));
            state.board.drop_piece(Piece::new(id, piece_type, color), at(q, r));
        }
        if state.white.queen_placed() && state.black.queen_placed() {
            state.phase = MatchPhase::PlaceOrMove;
        }
        state.current_player = to_move;
        state.refresh_legal_sets();
        state.current_must_pass = state.compute_must_pass();
        state
    }

    use PieceType::*;
    use PlayerColor::*;

    /// White queen at the origin hemmed in on five sides by Black
    fn hemmed_in_queen() -> MatchState {
        position(
            &[
                (0, 0, Queen, White),
                (1, 0, Ant, Black),
                (1, -1, Queen, Black),
                (0, -1, Ant, Black),
                (-1, 0, Beetle, Black),
                (-1, 1, Spider, Black),
                (1, 1, Ant, Black),
            ],
            White,
        )
    }

    #[test]
    fn test_new_match() {
        let state = MatchState::new();
        assert_eq!(state.phase(), MatchPhase::Start);
        assert_eq!(state.current_player(), White);
        assert_eq!(state.winner(), None);
        assert!(!state.is_draw());
        assert!(!state.must_pass());
        assert_eq!(state.legal_placements(), vec![HexCoord::ORIGIN]);
        assert!(state.legal_moves().is_empty());
    }

    #[test]
    fn test_first_placement_only_at_origin() {
        let mut state = MatchState::new();
        assert_eq!(
            state.try_place_bug(Ant, at(1, 0)),
            Err(MatchError::IllegalPlacement(at(1, 0)))
        );
        assert!(state.board().is_empty());
        assert!(state.place_bug(Ant, HexCoord::ORIGIN));
    }

    #[test]
    fn test_queens_open_movement_phase() {
        let mut state = MatchState::new();

        assert!(state.place_bug(Queen, at(0, 0)));
        assert_eq!(state.phase(), MatchPhase::Start);
        assert_eq!(state.current_player(), Black);

        let events = state.try_place_bug(Queen, at(1, 0)).unwrap();
        assert_eq!(state.phase(), MatchPhase::PlaceOrMove);
        assert!(events.contains(&MatchEvent::PhaseChanged {
            phase: MatchPhase::PlaceOrMove
        }));
    }

    #[test]
    fn test_queen_required_by_fourth_placement() {
        let mut state = MatchState::new();

        for q in 0..3 {
            assert!(state.place_bug(Ant, at(q, 0)), "white ant {q}");
            let black = if q == 0 { Spider } else { Grasshopper };
            assert!(state.place_bug(black, at(-q - 1, 0)), "black piece {q}");
        }

        assert_eq!(state.legal_placements_for(Spider), Vec::<HexCoord>::new());
        assert_eq!(state.try_place_bug(Spider, at(3, 0)), Err(MatchError::QueenRequired));
        assert!(state.place_bug(Queen, at(3, 0)));

        assert_eq!(state.try_place_bug(Spider, at(-4, 0)), Err(MatchError::QueenRequired));
        assert!(state.place_bug(Queen, at(-4, 0)));
        assert_eq!(state.phase(), MatchPhase::PlaceOrMove);

        // Once the queen is down the restriction no longer applies
        assert!(!state.legal_placements_for(Spider).is_empty());
    }

    #[test]
    fn test_exhausted_type_is_rejected() {
        let mut state = MatchState::new();
        assert!(state.place_bug(Queen, at(0, 0)));
        assert!(state.place_bug(Queen, at(1, 0)));
        assert_eq!(
            state.try_place_bug(Queen, at(-1, 0)),
            Err(MatchError::NotInReserve(Queen))
        );
        assert!(state.legal_placements_for(Queen).is_empty());
    }

    #[test]
    fn test_move_requires_queen() {
        let mut state = MatchState::new();
        assert!(state.place_bug(Ant, at(0, 0)));
        assert!(state.place_bug(Ant, at(1, 0)));

        assert_eq!(
            state.try_move_bug(at(0, 0), at(0, 1)),
            Err(MatchError::QueenNotPlaced)
        );
    }

    #[test]
    fn test_move_after_queen() {
        let mut state = MatchState::new();
        assert!(state.place_bug(Queen, at(0, 0)));
        assert!(state.place_bug(Queen, at(1, 0)));
        assert!(state.place_bug(Ant, at(-1, 0)));
        assert!(state.place_bug(Ant, at(2, 0)));

        // White queen is pinned between its ant and the black queen
        assert!(state.legal_moves_from(at(0, 0)).is_empty());
        assert!(!state.move_bug(at(0, 0), at(0, 1)));

        // Black's ant is not White's to move
        assert_eq!(
            state.try_move_bug(at(2, 0), at(2, -1)),
            Err(MatchError::NotYourPiece(at(2, 0)))
        );
        assert_eq!(state.try_move_bug(at(5, 5), at(0, 1)), Err(MatchError::NoPieceAt(at(5, 5))));

        let events = state.try_move_bug(at(-1, 0), at(0, 1)).unwrap();
        assert_eq!(
            events[0],
            MatchEvent::PieceMoved {
                player: White,
                piece_type: Ant,
                from: at(-1, 0),
                to: at(0, 1)
            }
        );
        assert_eq!(state.current_player(), Black);
        assert!(state.board().is_connected());
    }

    #[test]
    fn test_rejected_action_changes_nothing() {
        let mut state = MatchState::new();
        assert!(state.place_bug(Queen, at(0, 0)));
        assert!(state.place_bug(Queen, at(1, 0)));
        let before = state.view();

        assert!(!state.place_bug(Ant, at(2, 0)));
        assert!(!state.move_bug(at(0, 0), at(-1, 0)));
        assert!(!state.force_pass());

        assert_eq!(state.view(), before);
        assert_eq!(state.current_player(), White);
    }

    #[test]
    fn test_hemmed_in_player_must_pass() {
        let mut state = hemmed_in_queen();
        assert!(state.must_pass());
        assert_eq!(state.valid_actions(), vec![MatchAction::Pass]);
        assert!(!state.place_bug(Ant, at(0, 1)));

        assert!(state.force_pass());
        assert_eq!(state.current_player(), Black);
        assert!(state.previous_player_passed());
        assert!(!state.must_pass());
        assert_eq!(state.phase(), MatchPhase::PlaceOrMove);
    }

    #[test]
    fn test_pass_rejected_when_moves_exist() {
        let mut state = MatchState::new();
        assert_eq!(state.try_force_pass(), Err(MatchError::CannotPass));
    }

    #[test]
    fn test_surrounding_queen_wins() {
        let mut state = hemmed_in_queen();
        assert!(state.force_pass());

        // Black ant closes the last gap around White's queen
        let events = state.try_move_bug(at(1, 1), at(0, 1)).unwrap();

        assert_eq!(state.phase(), MatchPhase::GameOver);
        assert_eq!(state.winner(), Some(Black));
        assert!(!state.is_draw());
        assert!(events.contains(&MatchEvent::MatchWon { winner: Black }));

        assert_eq!(state.try_force_pass(), Err(MatchError::GameOver));
        assert_eq!(state.try_place_bug(Ant, at(5, 5)), Err(MatchError::GameOver));
        assert!(state.valid_actions().is_empty());
    }

    #[test]
    fn test_surrounding_both_queens_at_once_draws() {
        // Queens side by side, ringed by every neighbor but (0, 1)
        let mut state = position(
            &[
                (0, 0, Queen, White),
                (1, 0, Queen, Black),
                (-1, 1, Ant, White),
                (-1, 0, Ant, White),
                (0, -1, Spider, White),
                (1, -1, Ant, Black),
                (2, -1, Ant, Black),
                (2, 0, Spider, Black),
                (1, 1, Grasshopper, Black),
                (-1, 1, Beetle, White),
            ],
            White,
        );
        assert!(state.legal_moves_from(at(-1, 1)).contains(&at(0, 1)));

        // Beetle steps off its stack into the shared gap
        let events = state.try_move_bug(at(-1, 1), at(0, 1)).unwrap();

        assert!(state.board().is_surrounded(at(0, 0)));
        assert!(state.board().is_surrounded(at(1, 0)));
        assert!(state.is_draw());
        assert_eq!(state.winner(), None);
        assert_eq!(state.phase(), MatchPhase::GameOver);
        assert!(events.contains(&MatchEvent::MatchDrawn));
        assert!(!events.iter().any(|e| matches!(e, MatchEvent::MatchWon { .. })));
    }

    #[test]
    fn test_two_forced_passes_draw() {
        let mut state = position(&[(0, 0, Ant, White), (1, 0, Ant, Black)], White);
        // Neither side can place, and with no queen down neither can move
        state.white.reserve = Reserve::empty();
        state.black.reserve = Reserve::empty();
        state.current_must_pass = state.compute_must_pass();
        assert!(state.must_pass());
        assert!(!state.previous_player_passed());

        let events = state.try_force_pass().unwrap();

        assert!(state.previous_player_passed());
        assert!(state.is_draw());
        assert_eq!(state.winner(), None);
        assert_eq!(state.phase(), MatchPhase::GameOver);
        assert!(!state.must_pass());
        assert_eq!(
            events,
            vec![
                MatchEvent::TurnPassed { player: White },
                MatchEvent::MatchDrawn,
                MatchEvent::PhaseChanged {
                    phase: MatchPhase::GameOver
                },
            ]
        );
        assert!(!state.force_pass());
    }

    #[test]
    fn test_valid_actions_all_succeed() {
        let mut state = MatchState::new();
        assert!(state.place_bug(Queen, at(0, 0)));
        assert!(state.place_bug(Queen, at(1, 0)));

        for action in state.valid_actions() {
            let mut probe = state.clone();
            assert!(probe.apply_action(action).is_ok(), "{action:?}");
        }
    }

    #[test]
    fn test_view_reports_pieces_and_reserves() {
        let mut state = MatchState::new();
        assert!(state.place_bug(Spider, at(0, 0)));

        let view = state.view();
        assert_eq!(view.current_player, Black);
        assert_eq!(
            view.pieces,
            vec![PieceView {
                piece_type: Spider,
                owner: White,
                q: 0,
                r: 0,
                stack_height: 0
            }]
        );
        assert_eq!(view.players[0].reserve.spider, 1);
        assert_eq!(view.players[1].reserve, Reserve::full());
        assert!(!view.players[0].queen_placed);
    }
}
