use crate::{live::connector::LiveConnector, state::AppState};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use log::error;
use serde_json::json;
use std::sync::atomic::Ordering;

pub(crate) async fn stats<C: LiveConnector>(State(state): State<AppState<C>>) -> impl IntoResponse {
    match state.raffles.len() {
        Ok(raffles) => (
            StatusCode::OK,
            Json(json!({
                "sessions": state.sessions.load(Ordering::Relaxed),
                "raffles": raffles
            })),
        ),
        Err(error) => {
            error!("{error}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": error.to_string() })),
            )
        }
    }
}
