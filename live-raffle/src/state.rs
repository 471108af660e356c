use crate::{config::Config, live::connector::LiveConnector, raffle::raffles::Raffles};
use std::sync::{Arc, atomic::AtomicUsize};

/// State shared by every operator connection
pub struct AppState<C: LiveConnector> {
    pub connector: Arc<C>,
    pub raffles: Raffles,
    pub config: Arc<Config>,
    pub sessions: Arc<AtomicUsize>,
}

impl<C: LiveConnector> AppState<C> {
    pub fn new(connector: C, config: Config) -> Self {
        AppState {
            connector: Arc::new(connector),
            raffles: Raffles::new(),
            config: Arc::new(config),
            sessions: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl<C: LiveConnector> Clone for AppState<C> {
    fn clone(&self) -> Self {
        AppState {
            connector: self.connector.clone(),
            raffles: self.raffles.clone(),
            config: self.config.clone(),
            sessions: self.sessions.clone(),
        }
    }
}
