use config::Config;
use errors::server_error::ServerError;
use live::connector::LiveConnector;
use log::info;
use state::AppState;
use tokio::net::TcpListener;

pub mod config;
pub mod errors;
pub mod http;
pub mod live;
pub mod localize;
pub mod models;
pub mod operator;
pub mod raffle;
pub mod state;

/// Binds the configured address and serves operators until the process exits
pub async fn listen<C: LiveConnector>(config: Config, connector: C) -> Result<(), ServerError> {
    let address = format!("{}:{}", config.bind_address, config.port);
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| ServerError::Bind {
            address: address.clone(),
            source,
        })?;

    let local_addr = listener.local_addr().map_err(ServerError::LocalAddress)?;
    info!("Raffle server listening on {local_addr}");
    info!(
        "Live chat bridge at {}, {:?} error policy",
        config.live_bridge_url, config.error_policy
    );

    http::serve(listener, AppState::new(connector, config)).await;
    Ok(())
}
