//! Per-connection protocol handler
//!
//! Each accepted connection gets one [`ClientHandler`]. It reads one JSON
//! message per line, drives the connection's [`Session`], and writes every
//! reply as a single JSON line flushed right away. Nothing here is shared
//! with other connections except the [`RecordsStore`].

use crate::config::HandlerSettings;
use crate::error::SessionError;
use crate::records::RecordsStore;
use crate::session::Session;
use crate::shoe::Shoe;
use crate::utils::player_id;
use log::{debug, info, warn};
use shared::{ClientMessage, GameMode, GamePhase, ServerMessage};
use std::io;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::time::{sleep, timeout};

const NO_ACTIVE_GAME: &str = "No active game. Join a game first";
const PVP_UNSUPPORTED: &str = "Multiplayer mode is not implemented yet. Use PVE.";

#[derive(Debug, Clone, Copy)]
enum Move {
    Hit,
    Stand,
}

pub struct ClientHandler {
    id: u32,
    player_id: String,
    player_name: String,
    mode: Option<GameMode>,
    session: Option<Session>,
    records: Arc<RecordsStore>,
    settings: HandlerSettings,
}

impl ClientHandler {
    pub fn new(id: u32, records: Arc<RecordsStore>, settings: HandlerSettings) -> Self {
        Self {
            id,
            player_id: player_id(id),
            player_name: "Player".to_string(),
            mode: None,
            session: None,
            records,
            settings,
        }
    }

    /// Serves the connection until the client leaves, goes idle, or the stream fails
    ///
    /// The stream is owned by this call and closed whichever way it ends.
    pub async fn run<S>(mut self, stream: S)
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let (reader, mut writer) = tokio::io::split(stream);
        let mut reader = BufReader::new(reader);
        // Raw bytes, so a line that is not UTF-8 is a protocol error, not a transport one
        let mut line = Vec::new();

        loop {
            line.clear();
            match timeout(self.settings.read_timeout, reader.read_until(b'\n', &mut line)).await {
                Err(_) => {
                    info!("Client {} ({}) timed out", self.id, self.player_name);
                    break;
                }
                Ok(Err(e)) => {
                    warn!("Connection error for client {}: {}", self.id, e);
                    break;
                }
                Ok(Ok(0)) => {
                    info!("Client {} ({}) disconnected", self.id, self.player_name);
                    break;
                }
                Ok(Ok(_)) => {}
            }

            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            if let Err(e) = self.handle_line(&line, &mut writer).await {
                warn!("Failed to write to client {}: {}", self.id, e);
                break;
            }
        }

        if let Err(e) = writer.shutdown().await {
            debug!("Shutdown of client {} stream failed: {}", self.id, e);
        }
    }

    async fn handle_line<W>(&mut self, line: &[u8], writer: &mut W) -> io::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        match serde_json::from_slice::<ClientMessage>(line) {
            Ok(message) => {
                debug!("Client {} sent {:?}", self.id, message);
                self.handle_message(message, writer).await
            }
            Err(e) => {
                warn!("Malformed message from client {}: {}", self.id, e);
                let reply = ServerMessage::error(format!("Could not process message: {}", e));
                send(writer, &reply).await
            }
        }
    }

    async fn handle_message<W>(&mut self, message: ClientMessage, writer: &mut W) -> io::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        match message {
            ClientMessage::JoinGame { name, mode } => self.handle_join(name, mode, writer).await,
            ClientMessage::RequestCard => self.handle_move(Move::Hit, writer).await,
            ClientMessage::Stand => self.handle_move(Move::Stand, writer).await,
            ClientMessage::NewGame => self.handle_new_game(writer).await,
            ClientMessage::RequestRecords => {
                let records = self.records.top_records(self.settings.top_records).await;
                send(writer, &ServerMessage::RecordsList { records }).await
            }
            ClientMessage::Ping => send(writer, &ServerMessage::Pong).await,
        }
    }

    async fn handle_join<W>(&mut self, name: String, mode: GameMode, writer: &mut W) -> io::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        self.player_name = name;
        self.mode = Some(mode);
        info!("Client {} joins as {} ({:?})", self.id, self.player_name, mode);

        match mode {
            GameMode::Pve => {
                let confirmation = ServerMessage::JoinConfirmation {
                    id: self.player_id.clone(),
                    text: format!("Welcome {}. Mode: player vs dealer", self.player_name),
                };
                send(writer, &confirmation).await?;

                if self.session.is_none() {
                    let shoe = self.new_shoe();
                    self.session = Some(Session::new(self.player_id.clone(), shoe));
                }
                let result = match self.session.as_mut() {
                    Some(session) => session.start_round(),
                    None => Err(SessionError::RoundNotStarted),
                };
                self.emit_transition(result, writer).await
            }
            GameMode::Pvp => {
                let confirmation = ServerMessage::JoinConfirmation {
                    id: self.player_id.clone(),
                    text: format!(
                        "Welcome {}. Mode: multiplayer (in development)",
                        self.player_name
                    ),
                };
                send(writer, &confirmation).await?;
                send(writer, &ServerMessage::error(PVP_UNSUPPORTED)).await
            }
        }
    }

    fn new_shoe(&self) -> Shoe {
        match self.settings.seed {
            Some(seed) => Shoe::with_seed(seed.wrapping_add(u64::from(self.id))),
            None => Shoe::new(),
        }
    }

    /// The session, when the connection is in single-player mode
    fn pve_session(&mut self) -> Result<&mut Session, &'static str> {
        match (self.mode, self.session.as_mut()) {
            (Some(GameMode::Pvp), _) => Err(PVP_UNSUPPORTED),
            (Some(GameMode::Pve), Some(session)) if session.has_started() => Ok(session),
            _ => Err(NO_ACTIVE_GAME),
        }
    }

    async fn handle_move<W>(&mut self, action: Move, writer: &mut W) -> io::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let result = match self.pve_session() {
            Ok(session) => match action {
                Move::Hit => session.hit(),
                Move::Stand => session.stand(),
            },
            Err(text) => return send(writer, &ServerMessage::error(text)).await,
        };
        self.emit_transition(result, writer).await
    }

    async fn handle_new_game<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let result = match self.pve_session() {
            Ok(session) => session.start_round(),
            Err(text) => return send(writer, &ServerMessage::error(text)).await,
        };
        self.emit_transition(result, writer).await
    }

    /// Sends the new game state, and the result once the round is over
    async fn emit_transition<W>(
        &self,
        result: Result<GamePhase, SessionError>,
        writer: &mut W,
    ) -> io::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let phase = match result {
            Ok(phase) => phase,
            Err(e) => {
                if e == SessionError::EmptyShoe {
                    warn!("Round aborted for client {}: {}", self.id, e);
                }
                return send(writer, &ServerMessage::error(e.to_string())).await;
            }
        };

        let Some(session) = self.session.as_ref() else {
            return send(writer, &ServerMessage::error(NO_ACTIVE_GAME)).await;
        };
        send(writer, &session.view()).await?;

        if phase != GamePhase::GameOver {
            return Ok(());
        }

        let Some(outcome) = session.outcome() else {
            return Ok(());
        };

        if !self.settings.result_pause.is_zero() {
            sleep(self.settings.result_pause).await;
        }

        info!(
            "Result for {}: {:?} - {}",
            self.player_name, outcome.result, outcome.text
        );
        self.records
            .record_result(&self.player_name, outcome.result)
            .await;
        send(writer, &outcome.to_message()).await
    }
}

impl Drop for ClientHandler {
    fn drop(&mut self) {
        info!(
            "Released connection {} ({}, {} rounds)",
            self.id,
            self.player_name,
            self.session.as_ref().map_or(0, Session::rounds_started)
        );
    }
}

/// Writes one message as a JSON line and flushes it
async fn send<W>(writer: &mut W, message: &ServerMessage) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut line = serde_json::to_vec(message)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    line.push(b'\n');
    writer.write_all(&line).await?;
    writer.flush().await
}
