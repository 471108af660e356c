use super::{
    protocol::{ClientCommand, ServerEvent},
    session::Session,
};
use crate::{live::connector::LiveConnector, state::AppState};
use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use log::{error, info, trace, warn};
use std::sync::atomic::Ordering;
use tokio::sync::mpsc;

pub(crate) async fn operator_socket<C: LiveConnector>(
    ws: WebSocketUpgrade,
    State(state): State<AppState<C>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket<C: LiveConnector>(socket: WebSocket, state: AppState<C>) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let (outbound_tx, mut outbound_rx) = mpsc::channel::<ServerEvent>(256);
    let (commands_tx, commands_rx) = mpsc::channel::<ClientCommand>(64);

    let session = Session::new(
        state.connector.clone(),
        state.raffles.clone(),
        state.config.clone(),
        outbound_tx,
    );
    let connection_id = session.connection_id().clone();

    state.sessions.fetch_add(1, Ordering::Relaxed);
    info!("Operator {connection_id} connected");

    let writer = tokio::spawn(async move {
        while let Some(event) = outbound_rx.recv().await {
            let json = match serde_json::to_string(&event) {
                Ok(json) => json,
                Err(error) => {
                    error!("Could not serialize {event:?}: {error}");
                    continue;
                }
            };

            if ws_tx.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
    });

    let session_task = tokio::spawn(session.run(commands_rx));

    while let Some(received) = ws_rx.next().await {
        match received {
            Ok(Message::Text(text)) => {
                trace!("C: {}", text.as_str());
                match ClientCommand::parse(text.as_str()) {
                    Ok(command) => {
                        if commands_tx.send(command).await.is_err() {
                            break;
                        }
                    }
                    Err(error) => warn!("Operator {connection_id}: {error}"),
                }
            }

            Ok(Message::Close(_)) => break,
            Ok(_) => (),

            Err(error) => {
                warn!("Operator {connection_id} socket error: {error}");
                break;
            }
        }
    }

    drop(commands_tx);
    if let Err(error) = session_task.await {
        error!("Session of operator {connection_id} failed: {error}");
    }

    writer.abort();
    state.sessions.fetch_sub(1, Ordering::Relaxed);
    info!("Operator {connection_id} disconnected");
}
