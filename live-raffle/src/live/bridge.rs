use super::{
    connector::{LiveConnection, LiveConnector},
    event::{ChatMessage, LiveEvent},
};
use crate::errors::live_error::LiveError;
use futures_util::{Stream, StreamExt};
use log::{info, trace, warn};
use serde::Deserialize;
use std::{future::Future, sync::Arc};
use tokio::sync::mpsc;
use tokio_tungstenite::{
    connect_async,
    tungstenite::{self, Message},
};

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum BridgeFrame {
    Connected,
    Chat(ChatMessage),
    Error { message: String },
    Disconnect,
    #[serde(other)]
    Unknown,
}

/// Connects to a chat bridge that relays a streamer's live chat as JSON frames
/// over a WebSocket at `{base_url}/{username}`
#[derive(Debug, Clone)]
pub struct WebcastBridge {
    base_url: Arc<String>,
}

impl WebcastBridge {
    pub fn new(base_url: impl Into<String>) -> Self {
        WebcastBridge {
            base_url: Arc::new(base_url.into()),
        }
    }

    fn url_for(&self, username: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            username.trim_start_matches('@')
        )
    }
}

impl LiveConnector for WebcastBridge {
    fn connect(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<LiveConnection, LiveError>> + Send {
        let url = self.url_for(username);

        async move {
            let (mut stream, _) = connect_async(url.as_str()).await.map_err(source_error)?;
            wait_until_ready(&mut stream).await?;

            info!("Live bridge ready at {url}");

            let (events_tx, events_rx) = mpsc::channel(256);
            let pump = tokio::spawn(pump_events(stream, events_tx, url));
            Ok(LiveConnection::new(events_rx, Some(pump.abort_handle())))
        }
    }
}

async fn wait_until_ready<S>(stream: &mut S) -> Result<(), LiveError>
where
    S: Stream<Item = Result<Message, tungstenite::Error>> + Unpin,
{
    loop {
        match stream.next().await {
            Some(Ok(Message::Text(text))) => {
                trace!("Bridge: {}", text.as_str());
                match serde_json::from_str::<BridgeFrame>(text.as_str())? {
                    BridgeFrame::Connected => return Ok(()),
                    BridgeFrame::Error { message } => return Err(LiveError::Rejected(message)),
                    BridgeFrame::Disconnect => return Err(LiveError::ClosedBeforeReady),
                    _ => continue,
                }
            }
            Some(Ok(Message::Close(_))) | None => return Err(LiveError::ClosedBeforeReady),
            Some(Ok(_)) => continue,
            Some(Err(error)) => return Err(source_error(error)),
        }
    }
}

/// Forwards bridge frames as live events until the bridge goes away or the
/// connection is dropped
async fn pump_events<S>(mut stream: S, events_tx: mpsc::Sender<LiveEvent>, url: String)
where
    S: Stream<Item = Result<Message, tungstenite::Error>> + Unpin,
{
    while let Some(received) = stream.next().await {
        let event = match received {
            Ok(Message::Text(text)) => {
                trace!("Bridge: {}", text.as_str());
                match serde_json::from_str::<BridgeFrame>(text.as_str()) {
                    Ok(BridgeFrame::Chat(chat)) => LiveEvent::Chat(chat),
                    Ok(BridgeFrame::Error { message }) => LiveEvent::Error(message),
                    Ok(BridgeFrame::Disconnect) => break,
                    Ok(_) => continue,
                    Err(error) => {
                        warn!("Invalid frame from {url}: {error}");
                        continue;
                    }
                }
            }
            Ok(Message::Close(_)) => break,
            Ok(_) => continue,
            Err(error) => {
                warn!("Live bridge error from {url}: {error}");
                break;
            }
        };

        if events_tx.send(event).await.is_err() {
            return;
        }
    }

    let _ = events_tx.send(LiveEvent::Disconnected).await;
}

fn source_error(error: tungstenite::Error) -> LiveError {
    match error {
        tungstenite::Error::Io(error) => LiveError::Network(error),
        error => LiveError::Handshake(error),
    }
}
