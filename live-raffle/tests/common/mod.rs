#![allow(dead_code)]

use live_raffle::{
    config::{Config, ErrorPolicy},
    errors::live_error::LiveError,
    live::{
        connector::{LiveConnection, LiveConnector},
        event::{ChatMessage, LiveEvent},
    },
    operator::protocol::{ClientCommand, ConnectToRoom, ServerEvent},
};
use std::{
    collections::HashMap,
    future::Future,
    io,
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::sync::mpsc;

/// Streamer whose live source never answers
pub const HANGING: &str = "hanging";
/// Streamer whose live has ended
pub const ENDED: &str = "ended";
/// Streamer that cannot be reached
pub const OFFLINE: &str = "offline";

/// Live source driven by the test through per-streamer feeds
#[derive(Clone, Default)]
pub struct FakeSource {
    feeds: Arc<Mutex<HashMap<String, mpsc::Sender<LiveEvent>>>>,
}

impl FakeSource {
    pub fn feed(&self, username: &str) -> mpsc::Sender<LiveEvent> {
        self.feeds
            .lock()
            .unwrap()
            .get(username)
            .cloned()
            .expect("streamer was never connected")
    }
}

impl LiveConnector for FakeSource {
    fn connect(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<LiveConnection, LiveError>> + Send {
        let hang = username == HANGING;
        let result = match username {
            ENDED => Err(LiveError::Rejected(
                "LIVE has ended for this streamer".to_string(),
            )),
            OFFLINE => Err(LiveError::Network(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "connection refused",
            ))),
            _ => {
                let (events_tx, events_rx) = mpsc::channel(64);
                self.feeds
                    .lock()
                    .unwrap()
                    .insert(username.to_string(), events_tx);
                Ok(LiveConnection::new(events_rx, None))
            }
        };

        async move {
            if hang {
                std::future::pending::<()>().await;
            }
            result
        }
    }
}

pub fn test_config(error_policy: ErrorPolicy) -> Config {
    Config {
        connect_timeout: Duration::from_millis(200),
        error_policy,
        ..Config::default()
    }
}

pub fn chat(user_id: &str, comment: &str) -> LiveEvent {
    LiveEvent::Chat(ChatMessage {
        comment: comment.to_string(),
        nickname: format!("{user_id}-nick"),
        profile_picture_url: format!("https://cdn.example.com/{user_id}.jpg"),
        user_id: user_id.to_string(),
    })
}

pub fn connect(
    username: &str,
    keyword: &str,
    allow_duplicates: bool,
    email: Option<&str>,
) -> ClientCommand {
    ClientCommand::ConnectToRoom(ConnectToRoom {
        username: username.to_string(),
        keyword: Some(keyword.to_string()),
        allow_duplicates,
        email: email.map(str::to_string),
    })
}

pub fn connected_message(username: &str) -> ServerEvent {
    ServerEvent::connection_success(format!(
        "{username} kullanıcısının yayınına başarıyla bağlanıldı!"
    ))
}

pub async fn next_event(events: &mut mpsc::Receiver<ServerEvent>) -> ServerEvent {
    tokio::time::timeout(Duration::from_secs(2), events.recv())
        .await
        .expect("timed out waiting for an operator event")
        .expect("operator channel closed")
}
