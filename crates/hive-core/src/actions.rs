//! Actions players can take and the events they produce.

use crate::game::MatchPhase;
use crate::hex::HexCoord;
use crate::piece::PieceType;
use crate::player::PlayerColor;
use serde::{Deserialize, Serialize};

/// Everything the current player can do on their turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchAction {
    /// Put a piece from the reserve into play
    PlaceBug { piece_type: PieceType, at: HexCoord },
    /// Move the top piece at `from` (must be the player's own)
    MoveBug { from: HexCoord, to: HexCoord },
    /// Pass; only allowed when no placement and no move exists
    Pass,
}

/// Events that occur as a result of actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchEvent {
    PiecePlaced {
        player: PlayerColor,
        piece_type: PieceType,
        at: HexCoord,
    },

    PieceMoved {
        player: PlayerColor,
        piece_type: PieceType,
        from: HexCoord,
        to: HexCoord,
    },

    TurnPassed {
        player: PlayerColor,
    },

    /// The match moved to a new phase
    PhaseChanged {
        phase: MatchPhase,
    },

    /// A queen was surrounded
    MatchWon {
        winner: PlayerColor,
    },

    /// Both queens surrounded at once, or both players forced to pass
    MatchDrawn,
}
