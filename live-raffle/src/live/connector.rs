use super::event::LiveEvent;
use crate::errors::live_error::LiveError;
use std::future::Future;
use tokio::{sync::mpsc, task::AbortHandle};

/// A source of live chat events for a streamer
pub trait LiveConnector: Send + Sync + 'static {
    fn connect(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<LiveConnection, LiveError>> + Send;
}

/// An established live connection.
///
/// Events arrive in the order the source delivers them. Dropping the
/// connection stops its pump task, so nothing is delivered afterwards.
#[derive(Debug)]
pub struct LiveConnection {
    events: mpsc::Receiver<LiveEvent>,
    pump: Option<AbortHandle>,
}

impl LiveConnection {
    pub fn new(events: mpsc::Receiver<LiveEvent>, pump: Option<AbortHandle>) -> Self {
        LiveConnection { events, pump }
    }

    pub async fn next_event(&mut self) -> Option<LiveEvent> {
        self.events.recv().await
    }

    pub fn disconnect(mut self) {
        self.events.close();
    }
}

impl Drop for LiveConnection {
    fn drop(&mut self) {
        if let Some(pump) = self.pump.take() {
            pump.abort();
        }
    }
}
