use super::protocol::{ClientCommand, ConnectToRoom, ServerEvent};
use crate::{
    config::{Config, ErrorPolicy},
    errors::{live_error::LiveError, registry_error::RegistryError, session_error::SessionError},
    live::{
        connector::{LiveConnection, LiveConnector},
        event::{ChatMessage, LiveEvent},
    },
    localize::{UNKNOWN_ERROR, localize, localize_error},
    models::participant::Participant,
    raffle::{
        raffles::Raffles,
        registry::{AddOutcome, RejectReason, Registry},
    },
};
use log::{error, info, trace, warn};
use std::sync::Arc;
use tokio::sync::mpsc;

const ALREADY_JOINED: &str = "Bu kullanıcı zaten katılmış!";
const NO_PARTICIPANTS: &str = "Henüz katılımcı yok!";
const LIVE_DROPPED: &str = "Canlı yayın bağlantısı kesildi";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Connecting,
    Connected,
    Error,
    Disconnected,
}

/// A live connection attempt. The connection is gone once the attempt failed,
/// the source went away or the handle was torn down.
struct LiveHandle {
    generation: u64,
    connection: Option<LiveConnection>,
}

impl LiveHandle {
    fn tear_down(&mut self) {
        if let Some(connection) = self.connection.take() {
            connection.disconnect();
        }
    }
}

/// One operator connection and the live connection it drives
pub struct Session<C: LiveConnector> {
    connector: Arc<C>,
    raffles: Raffles,
    config: Arc<Config>,
    outbound: mpsc::Sender<ServerEvent>,
    connection_id: Arc<String>,
    operator: Option<Arc<String>>,
    source_username: Option<Arc<String>>,
    keyword: String,
    allow_duplicates: bool,
    state: SessionState,
    generation: u64,
    live: Option<LiveHandle>,
}

impl<C: LiveConnector> Session<C> {
    pub fn new(
        connector: Arc<C>,
        raffles: Raffles,
        config: Arc<Config>,
        outbound: mpsc::Sender<ServerEvent>,
    ) -> Self {
        Session {
            connector,
            raffles,
            config,
            outbound,
            connection_id: Arc::new(guid_create::GUID::rand().to_string().to_lowercase()),
            operator: None,
            source_username: None,
            keyword: String::new(),
            allow_duplicates: false,
            state: SessionState::Idle,
            generation: 0,
            live: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn connection_id(&self) -> &Arc<String> {
        &self.connection_id
    }

    /// Registry key of this session: the operator identity, or the connection
    /// when the operator did not identify
    pub fn operator_key(&self) -> Arc<String> {
        self.operator
            .clone()
            .unwrap_or_else(|| self.connection_id.clone())
    }

    /// Handles commands and live events until the operator channel closes
    pub async fn run(mut self, mut commands: mpsc::Receiver<ClientCommand>) {
        loop {
            tokio::select! {
                command = commands.recv() => {
                    match command {
                        Some(command) => self.handle_command(command).await,
                        None => break,
                    }
                }

                (generation, event) = next_live_event(&mut self.live) => {
                    self.handle_live_event(generation, event).await;
                }
            }
        }

        self.close();
    }

    pub async fn handle_command(&mut self, command: ClientCommand) {
        trace!("Operator {}: {command:?}", self.connection_id);
        match command {
            ClientCommand::ConnectToRoom(request) => self.connect(request).await,
            ClientCommand::DrawWinner => self.draw_winner().await,
            ClientCommand::ResetRaffle => self.reset_raffle().await,
        }
    }

    /// Handles an event of the live connection with the given generation.
    /// Events of a replaced connection are dropped.
    pub async fn handle_live_event(&mut self, generation: u64, event: Option<LiveEvent>) {
        if generation != self.generation {
            trace!(
                "Dropping event of stale live connection {generation}, current is {}",
                self.generation
            );
            return;
        }

        match event {
            Some(LiveEvent::Chat(chat)) => self.on_chat(chat).await,
            Some(LiveEvent::Error(raw)) => self.on_live_error(raw).await,
            Some(LiveEvent::Disconnected) | None => {
                if let Some(live) = self.live.as_mut() {
                    live.connection = None;
                }
                self.on_live_disconnect().await;
            }
        }
    }

    async fn connect(&mut self, request: ConnectToRoom) {
        let operator = request
            .email
            .filter(|email| !email.trim().is_empty())
            .map(Arc::new);

        // the connection-scoped pool is unreachable once the operator identifies
        if self.operator.is_none() && operator.is_some() {
            if let Err(error) = self.raffles.remove(&self.connection_id) {
                error!("{error}");
            }
        }

        self.operator = operator;

        if let Some(previous) = self.live.as_mut() {
            previous.tear_down();
            if let Err(error) = self.clear_registry() {
                self.report_internal(error).await;
            }
            self.log_connection_event("disconnect");
        }

        self.source_username = Some(Arc::new(request.username.clone()));

        let Some(keyword) = request.keyword else {
            warn!("Connect to {} without a keyword", request.username);
            self.state = SessionState::Error;
            self.emit(ServerEvent::error(UNKNOWN_ERROR)).await;
            return;
        };

        self.keyword = keyword.to_lowercase();
        self.allow_duplicates = request.allow_duplicates;
        self.generation += 1;
        self.state = SessionState::Connecting;
        self.live = Some(LiveHandle {
            generation: self.generation,
            connection: None,
        });

        let connecting = self.connector.connect(&request.username);
        let connected = match tokio::time::timeout(self.config.connect_timeout, connecting).await {
            Ok(connected) => connected,
            Err(_) => Err(LiveError::Timeout),
        };

        match connected {
            Ok(connection) => {
                if let Some(live) = self.live.as_mut() {
                    live.connection = Some(connection);
                }
                self.state = SessionState::Connected;
                self.log_connection_event("connect");
                self.emit(ServerEvent::connection_success(format!(
                    "{} kullanıcısının yayınına başarıyla bağlanıldı!",
                    request.username
                )))
                .await;
            }

            Err(error) => {
                warn!("Could not connect to {}: {error}", request.username);
                self.state = SessionState::Error;
                self.emit(ServerEvent::connection_error(localize_error(&error)))
                    .await;
            }
        }
    }

    async fn on_chat(&mut self, chat: ChatMessage) {
        if self.state != SessionState::Connected {
            return;
        }

        if !chat.comment.to_lowercase().contains(&self.keyword) {
            return;
        }

        let allow_duplicates = self.allow_duplicates;
        let candidate = Participant::from(&chat);

        match self.with_registry(|registry| registry.try_add(candidate, allow_duplicates)) {
            Ok(AddOutcome::Added { participant, count }) => {
                self.emit(ServerEvent::ValidMessage(participant)).await;
                self.emit(ServerEvent::ParticipantCount(count)).await;
            }

            Ok(AddOutcome::Rejected(RejectReason::DuplicateUser)) => {
                self.emit(ServerEvent::DuplicateEntry {
                    username: chat.nickname,
                    message: ALREADY_JOINED.to_string(),
                    profile_picture: chat.profile_picture_url,
                })
                .await;
            }

            Err(error) => self.report_internal(error).await,
        }
    }

    async fn on_live_error(&mut self, raw: String) {
        warn!(
            "Live source error for {}: {raw}",
            self.source_username.as_deref().map_or("-", |s| s.as_str())
        );
        self.emit(ServerEvent::connection_error(localize(&raw))).await;

        if self.config.error_policy == ErrorPolicy::Teardown {
            if let Some(live) = self.live.as_mut() {
                live.tear_down();
            }
            self.state = SessionState::Disconnected;
            self.log_connection_event("disconnect");
        }
    }

    async fn on_live_disconnect(&mut self) {
        self.state = SessionState::Disconnected;
        self.emit(ServerEvent::connection_error(LIVE_DROPPED)).await;
        self.log_connection_event("disconnect");
    }

    async fn draw_winner(&mut self) {
        let drawn = self
            .raffles
            .with_existing(&self.operator_key(), |registry| registry.draw_winner());

        match drawn {
            Ok(Some(Ok(winner))) => {
                info!(
                    "{} drew {} ({}) as winner",
                    self.operator_key(),
                    winner.display_name,
                    winner.id
                );
                self.emit(ServerEvent::Winner(winner)).await;
            }
            Ok(Some(Err(RegistryError::Empty)) | None) => {
                self.emit(ServerEvent::error(NO_PARTICIPANTS)).await
            }
            Err(error) => self.report_internal(error).await,
        }
    }

    async fn reset_raffle(&mut self) {
        if let Err(error) = self.clear_registry() {
            self.report_internal(error).await;
            return;
        }

        self.emit(ServerEvent::ParticipantCount(0)).await;
        self.emit(ServerEvent::RaffleReset {}).await;
    }

    /// Tears down the live connection once the operator channel is gone.
    /// The raffle of an identified operator is kept for its next connection.
    pub fn close(mut self) {
        if let Some(mut live) = self.live.take() {
            live.tear_down();
            self.log_connection_event("disconnect");
        }

        if let Err(error) = self.raffles.remove(&self.connection_id) {
            error!("{error}");
        }
    }

    fn with_registry<T>(&self, f: impl FnOnce(&mut Registry) -> T) -> Result<T, SessionError> {
        self.raffles.with(&self.operator_key(), f)
    }

    fn clear_registry(&self) -> Result<(), SessionError> {
        self.raffles
            .with_existing(&self.operator_key(), Registry::clear)
            .map(|_| ())
    }

    async fn report_internal(&self, error: SessionError) {
        error!("Operator {}: {error}", self.connection_id);
        self.emit(ServerEvent::error(UNKNOWN_ERROR)).await;
    }

    async fn emit(&self, event: ServerEvent) {
        trace!("S: {event:?}");
        if self.outbound.send(event).await.is_err() {
            trace!("Operator {} is gone, dropping event", self.connection_id);
        }
    }

    fn log_connection_event(&self, event: &str) {
        info!(
            "{} - {}: {event}",
            self.operator.as_deref().map_or("-", |operator| operator.as_str()),
            self.source_username
                .as_deref()
                .map_or("-", |username| username.as_str())
        );
    }
}

async fn next_live_event(live: &mut Option<LiveHandle>) -> (u64, Option<LiveEvent>) {
    match live {
        Some(LiveHandle {
            generation,
            connection: Some(connection),
        }) => (*generation, connection.next_event().await),
        _ => std::future::pending().await,
    }
}
