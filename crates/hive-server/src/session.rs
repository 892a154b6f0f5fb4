//! Hosted match sessions.

use hive_core::{
    HexCoord, MatchError, MatchEvent, MatchState, MatchView, PieceType, PlayerColor,
    UnknownPieceType,
};
use std::collections::HashSet;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Match {0} not found")]
    MatchNotFound(Uuid),

    #[error("Not attached to match {0}")]
    NotAttached(Uuid),

    #[error(transparent)]
    UnknownPieceType(#[from] UnknownPieceType),

    #[error("Action rejected: {0}")]
    Rejected(#[from] MatchError),
}

/// How a finished match ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub winner: Option<PlayerColor>,
    pub draw: bool,
}

/// One hosted match and the clients following it.
pub struct MatchSession {
    pub id: Uuid,
    /// Clients that receive this match's updates
    pub attached: HashSet<Uuid>,
    state: MatchState,
}

impl MatchSession {
    /// A fresh match with its creator attached
    pub fn new(id: Uuid, creator: Uuid) -> Self {
        Self {
            id,
            attached: HashSet::from([creator]),
            state: MatchState::new(),
        }
    }

    pub fn attach(&mut self, client_id: Uuid) {
        self.attached.insert(client_id);
    }

    /// Stop sending updates to a client.
    ///
    /// Returns true if no client is left attached.
    pub fn detach(&mut self, client_id: Uuid) -> bool {
        self.attached.remove(&client_id);
        self.is_abandoned()
    }

    pub fn is_abandoned(&self) -> bool {
        self.attached.is_empty()
    }

    /// Only attached clients may act on a match
    pub fn ensure_attached(&self, client_id: Uuid) -> Result<(), SessionError> {
        if self.attached.contains(&client_id) {
            Ok(())
        } else {
            Err(SessionError::NotAttached(self.id))
        }
    }

    pub fn place_bug(
        &mut self,
        piece_type: &str,
        q: i32,
        r: i32,
    ) -> Result<Vec<MatchEvent>, SessionError> {
        let piece_type: PieceType = piece_type.parse()?;
        let result = self.state.try_place_bug(piece_type, HexCoord::new(q, r));
        self.record(result)
    }

    pub fn move_bug(&mut self, from: HexCoord, to: HexCoord) -> Result<Vec<MatchEvent>, SessionError> {
        let result = self.state.try_move_bug(from, to);
        self.record(result)
    }

    pub fn pass(&mut self) -> Result<Vec<MatchEvent>, SessionError> {
        let result = self.state.try_force_pass();
        self.record(result)
    }

    fn record(
        &self,
        result: Result<Vec<MatchEvent>, MatchError>,
    ) -> Result<Vec<MatchEvent>, SessionError> {
        if let Err(e) = &result {
            debug!(match_id = %self.id, error = %e, "action rejected");
        }
        Ok(result?)
    }

    pub fn view(&self) -> MatchView {
        self.state.view()
    }

    pub fn legal_placements(&self, piece_type: Option<&str>) -> Result<Vec<HexCoord>, SessionError> {
        match piece_type {
            Some(name) => Ok(self.state.legal_placements_for(name.parse()?)),
            None => Ok(self.state.legal_placements()),
        }
    }

    pub fn legal_moves(&self, from: HexCoord) -> Vec<HexCoord> {
        self.state.legal_moves_from(from)
    }

    /// Winner or draw, once the match is over
    pub fn outcome(&self) -> Option<Outcome> {
        self.state.is_finished().then(|| Outcome {
            winner: self.state.winner(),
            draw: self.state.is_draw(),
        })
    }
}
