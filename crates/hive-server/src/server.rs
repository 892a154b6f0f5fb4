//! WebSocket server and connection handling.

use crate::protocol::{ClientMessage, ServerMessage};
use crate::session::{MatchSession, SessionError};
use dashmap::DashMap;
use futures_util::{SinkExt, StreamExt};
use hive_core::{HexCoord, MatchEvent, MatchView};
use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_tungstenite::{accept_async, tungstenite::Message};
use tracing::{error, info, warn};
use uuid::Uuid;

/// Server state shared across all connections.
pub struct ServerState {
    /// All hosted matches
    pub matches: DashMap<Uuid, MatchSession>,
    /// Mapping from client ID to the matches it is attached to
    pub client_matches: DashMap<Uuid, HashSet<Uuid>>,
    /// Mapping from client ID to their message sender
    pub client_senders: DashMap<Uuid, mpsc::UnboundedSender<ServerMessage>>,
}

impl ServerState {
    pub fn new() -> Self {
        Self {
            matches: DashMap::new(),
            client_matches: DashMap::new(),
            client_senders: DashMap::new(),
        }
    }

    /// Send a message to a specific client.
    pub fn send_to_client(&self, client_id: Uuid, msg: ServerMessage) {
        if let Some(sender) = self.client_senders.get(&client_id) {
            let _ = sender.send(msg);
        }
    }

    /// Send a message to every client attached to a match.
    pub fn broadcast_to_match(&self, match_id: Uuid, msg: ServerMessage) {
        let attached: Vec<Uuid> = match self.matches.get(&match_id) {
            Some(session) => session.attached.iter().copied().collect(),
            None => return,
        };
        for client_id in attached {
            self.send_to_client(client_id, msg.clone());
        }
    }

    /// Start a new match with its creator attached.
    pub fn create_match(&self, creator: Uuid) -> Uuid {
        let match_id = Uuid::new_v4();
        self.matches
            .insert(match_id, MatchSession::new(match_id, creator));
        self.client_matches.entry(creator).or_default().insert(match_id);
        info!(%match_id, %creator, "match created");
        match_id
    }

    /// Attach a client to a match, returning the current snapshot.
    pub fn attach(&self, match_id: Uuid, client_id: Uuid) -> Result<MatchView, SessionError> {
        let view = {
            let mut session = self
                .matches
                .get_mut(&match_id)
                .ok_or(SessionError::MatchNotFound(match_id))?;
            session.attach(client_id);
            session.view()
        };
        self.client_matches.entry(client_id).or_default().insert(match_id);
        Ok(view)
    }

    /// Remove a match on behalf of one of its attached clients.
    pub fn discard_match(&self, match_id: Uuid, client_id: Uuid) -> Result<MatchSession, SessionError> {
        let Some((_, session)) = self
            .matches
            .remove_if(&match_id, |_, session| session.attached.contains(&client_id))
        else {
            return Err(if self.matches.contains_key(&match_id) {
                SessionError::NotAttached(match_id)
            } else {
                SessionError::MatchNotFound(match_id)
            });
        };

        for attached in &session.attached {
            if let Some(mut ids) = self.client_matches.get_mut(attached) {
                ids.remove(&match_id);
            }
        }
        info!(%match_id, %client_id, "match discarded");
        Ok(session)
    }

    /// Run an action against a match while holding its exclusive guard.
    pub fn act<F>(&self, match_id: Uuid, action: F) -> Result<Vec<MatchEvent>, SessionError>
    where
        F: FnOnce(&mut MatchSession) -> Result<Vec<MatchEvent>, SessionError>,
    {
        let mut session = self
            .matches
            .get_mut(&match_id)
            .ok_or(SessionError::MatchNotFound(match_id))?;
        action(session.value_mut())
    }

    /// Read from a match under its shared guard.
    pub fn inspect<T, F>(&self, match_id: Uuid, read: F) -> Result<T, SessionError>
    where
        F: FnOnce(&MatchSession) -> T,
    {
        let session = self
            .matches
            .get(&match_id)
            .ok_or(SessionError::MatchNotFound(match_id))?;
        Ok(read(session.value()))
    }

    /// Detach a departing client from its matches and drop the ones nobody follows any more.
    pub fn handle_disconnect(&self, client_id: Uuid) {
        let Some((_, match_ids)) = self.client_matches.remove(&client_id) else {
            return;
        };

        for match_id in match_ids {
            let abandoned = self
                .matches
                .get_mut(&match_id)
                .map(|mut session| session.detach(client_id))
                .unwrap_or(false);
            // Someone may have attached since the guard was released
            if abandoned
                && self
                    .matches
                    .remove_if(&match_id, |_, session| session.is_abandoned())
                    .is_some()
            {
                info!(%match_id, "abandoned match removed");
            }
        }
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the WebSocket server.
pub async fn run_server(addr: SocketAddr, state: Arc<ServerState>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Hive server listening on {}", addr);

    while let Ok((stream, peer_addr)) = listener.accept().await {
        let state = Arc::clone(&state);
        tokio::spawn(async move {
            if let Err(e) = handle_connection(stream, peer_addr, state).await {
                error!("Connection error from {}: {}", peer_addr, e);
            }
        });
    }

    Ok(())
}

/// Handle a single WebSocket connection.
async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    state: Arc<ServerState>,
) -> anyhow::Result<()> {
    let ws_stream = accept_async(stream).await?;
    info!("New WebSocket connection from {}", addr);

    let (mut ws_sender, mut ws_receiver) = ws_stream.split();

    let client_id = Uuid::new_v4();

    // Create channel for outgoing messages
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();
    state.client_senders.insert(client_id, tx);

    let welcome = ServerMessage::Welcome { client_id };
    let msg_text = serde_json::to_string(&welcome)?;
    ws_sender.send(Message::Text(msg_text)).await?;

    // Forward messages from channel to WebSocket
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if let Ok(text) = serde_json::to_string(&msg) {
                if ws_sender.send(Message::Text(text)).await.is_err() {
                    break;
                }
            }
        }
    });

    while let Some(msg) = ws_receiver.next().await {
        match msg {
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientMessage>(&text) {
                Ok(client_msg) => handle_message(client_id, client_msg, &state),
                Err(e) => {
                    warn!("Invalid message from {}: {}", client_id, text);
                    state.send_to_client(
                        client_id,
                        ServerMessage::Error {
                            message: format!("Invalid message: {}", e),
                        },
                    );
                }
            },
            Ok(Message::Close(_)) => {
                info!("Client {} closing connection", client_id);
                break;
            }
            Ok(Message::Ping(_)) => {
                state.send_to_client(client_id, ServerMessage::Pong);
            }
            Err(e) => {
                error!("WebSocket error from {}: {}", client_id, e);
                break;
            }
            _ => {}
        }
    }

    // Clean up on disconnect
    state.handle_disconnect(client_id);
    state.client_senders.remove(&client_id);
    send_task.abort();

    info!("Connection closed for {}", client_id);
    Ok(())
}

fn send_error(state: &ServerState, client_id: Uuid, err: SessionError) {
    state.send_to_client(
        client_id,
        ServerMessage::Error {
            message: err.to_string(),
        },
    );
}

/// Report an action's outcome to its sender and the new state to everyone attached.
fn finish_action(
    state: &ServerState,
    client_id: Uuid,
    match_id: Uuid,
    result: Result<Vec<MatchEvent>, SessionError>,
) {
    let events = match result {
        Ok(events) => events,
        Err(SessionError::MatchNotFound(id)) => {
            send_error(state, client_id, SessionError::MatchNotFound(id));
            return;
        }
        Err(e) => {
            state.send_to_client(
                client_id,
                ServerMessage::ActionResult {
                    match_id,
                    success: false,
                    events: vec![],
                    error: Some(e.to_string()),
                },
            );
            return;
        }
    };

    state.send_to_client(
        client_id,
        ServerMessage::ActionResult {
            match_id,
            success: true,
            events,
            error: None,
        },
    );

    let Ok((view, outcome)) = state.inspect(match_id, |s| (s.view(), s.outcome())) else {
        return;
    };

    state.broadcast_to_match(
        match_id,
        ServerMessage::MatchState {
            match_id,
            state: view,
        },
    );

    if let Some(outcome) = outcome {
        state.broadcast_to_match(
            match_id,
            ServerMessage::GameOver {
                match_id,
                winner: outcome.winner,
                draw: outcome.draw,
            },
        );
    }
}

/// Handle a client message.
fn handle_message(client_id: Uuid, msg: ClientMessage, state: &Arc<ServerState>) {
    match msg {
        ClientMessage::CreateMatch => {
            let match_id = state.create_match(client_id);
            state.send_to_client(client_id, ServerMessage::MatchCreated { match_id });
        }

        ClientMessage::AttachMatch { match_id } => {
            match state.attach(match_id, client_id) {
                Ok(view) => state.send_to_client(
                    client_id,
                    ServerMessage::Attached {
                        match_id,
                        state: view,
                    },
                ),
                Err(e) => send_error(state, client_id, e),
            }
        }

        ClientMessage::DiscardMatch { match_id } => match state.discard_match(match_id, client_id) {
            Ok(session) => {
                for attached in session.attached {
                    state.send_to_client(attached, ServerMessage::Discarded { match_id });
                }
            }
            Err(e) => send_error(state, client_id, e),
        },

        ClientMessage::PlaceBug {
            match_id,
            piece_type,
            q,
            r,
        } => {
            let result = state.act(match_id, |session| {
                session.ensure_attached(client_id)?;
                session.place_bug(&piece_type, q, r)
            });
            finish_action(state, client_id, match_id, result);
        }

        ClientMessage::MoveBug {
            match_id,
            from_q,
            from_r,
            to_q,
            to_r,
        } => {
            let from = HexCoord::new(from_q, from_r);
            let to = HexCoord::new(to_q, to_r);
            let result = state.act(match_id, |session| {
                session.ensure_attached(client_id)?;
                session.move_bug(from, to)
            });
            finish_action(state, client_id, match_id, result);
        }

        ClientMessage::Pass { match_id } => {
            let result = state.act(match_id, |session| {
                session.ensure_attached(client_id)?;
                session.pass()
            });
            finish_action(state, client_id, match_id, result);
        }

        ClientMessage::GetState { match_id } => match state.inspect(match_id, |s| s.view()) {
            Ok(view) => state.send_to_client(
                client_id,
                ServerMessage::MatchState {
                    match_id,
                    state: view,
                },
            ),
            Err(e) => send_error(state, client_id, e),
        },

        ClientMessage::LegalPlacements {
            match_id,
            piece_type,
        } => {
            let cells = state
                .inspect(match_id, |s| s.legal_placements(piece_type.as_deref()))
                .and_then(|cells| cells);
            match cells {
                Ok(cells) => state.send_to_client(
                    client_id,
                    ServerMessage::LegalPlacements { match_id, cells },
                ),
                Err(e) => send_error(state, client_id, e),
            }
        }

        ClientMessage::LegalMoves { match_id, q, r } => {
            let from = HexCoord::new(q, r);
            match state.inspect(match_id, |s| s.legal_moves(from)) {
                Ok(cells) => state.send_to_client(
                    client_id,
                    ServerMessage::LegalMoves {
                        match_id,
                        from,
                        cells,
                    },
                ),
                Err(e) => send_error(state, client_id, e),
            }
        }

        ClientMessage::Ping => {
            state.send_to_client(client_id, ServerMessage::Pong);
        }
    }
}
