//! WebSocket protocol messages for hosted Hive matches.

use hive_core::{HexCoord, MatchEvent, MatchView, PlayerColor};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Messages sent from client to server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ClientMessage {
    /// Start a new match and attach to it
    CreateMatch,

    /// Follow an existing match
    AttachMatch { match_id: Uuid },

    /// Drop a match for everyone
    DiscardMatch { match_id: Uuid },

    /// Place a piece for whoever is to move
    PlaceBug {
        match_id: Uuid,
        piece_type: String,
        q: i32,
        r: i32,
    },

    /// Move the top piece at (from_q, from_r)
    MoveBug {
        match_id: Uuid,
        from_q: i32,
        from_r: i32,
        to_q: i32,
        to_r: i32,
    },

    /// Forced pass
    Pass { match_id: Uuid },

    /// Request the current snapshot
    GetState { match_id: Uuid },

    /// Placement cells, optionally narrowed to one piece type
    LegalPlacements {
        match_id: Uuid,
        #[serde(default)]
        piece_type: Option<String>,
    },

    /// Destinations for the piece at (q, r)
    LegalMoves { match_id: Uuid, q: i32, r: i32 },

    /// Ping for keepalive
    Ping,
}

/// Messages sent from server to client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ServerMessage {
    /// Welcome message with assigned client ID
    Welcome { client_id: Uuid },

    /// Match created; the creator is already attached
    MatchCreated { match_id: Uuid },

    /// Attached to a match
    Attached { match_id: Uuid, state: MatchView },

    /// Match discarded
    Discarded { match_id: Uuid },

    /// Match snapshot, sent on request and after every accepted action
    MatchState { match_id: Uuid, state: MatchView },

    /// Outcome of an action, sent to the client that submitted it
    ActionResult {
        match_id: Uuid,
        success: bool,
        events: Vec<MatchEvent>,
        error: Option<String>,
    },

    LegalPlacements {
        match_id: Uuid,
        cells: Vec<HexCoord>,
    },

    LegalMoves {
        match_id: Uuid,
        from: HexCoord,
        cells: Vec<HexCoord>,
    },

    /// Match finished
    GameOver {
        match_id: Uuid,
        winner: Option<PlayerColor>,
        draw: bool,
    },

    /// Error occurred
    Error { message: String },

    /// Pong response
    Pong,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_client_message_shape() {
        let match_id = Uuid::new_v4();
        let text = format!(
            r#"{{"type":"PlaceBug","payload":{{"match_id":"{}","piece_type":"spider","q":1,"r":-1}}}}"#,
            match_id
        );

        match serde_json::from_str::<ClientMessage>(&text).unwrap() {
            ClientMessage::PlaceBug {
                match_id: id,
                piece_type,
                q,
                r,
            } => {
                assert_eq!(id, match_id);
                assert_eq!(piece_type, "spider");
                assert_eq!((q, r), (1, -1));
            }
            other => panic!("unexpected message {:?}", other),
        }
    }

    #[test]
    fn test_piece_type_filter_is_optional() {
        let text = format!(
            r#"{{"type":"LegalPlacements","payload":{{"match_id":"{}"}}}}"#,
            Uuid::nil()
        );
        let msg: ClientMessage = serde_json::from_str(&text).unwrap();
        assert!(matches!(
            msg,
            ClientMessage::LegalPlacements {
                piece_type: None,
                ..
            }
        ));

        let ping: ClientMessage = serde_json::from_str(r#"{"type":"Ping"}"#).unwrap();
        assert!(matches!(ping, ClientMessage::Ping));
    }

    #[test]
    fn test_game_over_serialization() {
        let msg = ServerMessage::GameOver {
            match_id: Uuid::nil(),
            winner: Some(PlayerColor::Black),
            draw: false,
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "GameOver");
        assert_eq!(json["payload"]["winner"], "Black");
        assert_eq!(json["payload"]["draw"], false);
    }
}
