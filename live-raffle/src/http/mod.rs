use crate::{live::connector::LiveConnector, operator::socket, state::AppState};
use axum::{Router, http::Method, routing::get};
use hyper::{Request, body::Incoming};
use hyper_util::{
    rt::{TokioExecutor, TokioIo},
    server,
};
use log::error;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_service::Service;

mod stats;

pub fn router<C: LiveConnector>(state: AppState<C>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST]);

    Router::new()
        .route("/", get(socket::operator_socket::<C>))
        .route("/stats", get(stats::stats::<C>))
        .with_state(state)
        .layer(cors)
}

/// Accepts operator connections until the process stops. Each connection is
/// served by its own task, and `/` may upgrade to the operator socket.
pub async fn serve<C: LiveConnector>(listener: TcpListener, state: AppState<C>) {
    let app = router(state);

    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(error) => {
                error!("Could not accept operator connection: {error}");
                continue;
            }
        };

        let app = app.clone();
        tokio::spawn(async move {
            let service = hyper::service::service_fn(move |request: Request<Incoming>| {
                app.clone().call(request)
            });

            let mut builder = server::conn::auto::Builder::new(TokioExecutor::new());
            builder.http1().title_case_headers(true);

            if let Err(error) = builder
                .serve_connection_with_upgrades(TokioIo::new(stream), service)
                .await
            {
                error!("Connection from {peer} failed: {error:#}");
            }
        });
    }
}
