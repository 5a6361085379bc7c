pub use crate::common::RouteResult;

use std::net::SocketAddr;

use axum::{extract::FromRef, routing::on, Router};
use common::{route_not_found, METHOD_FILTER_ALL};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use trip_planner::TripPlanner;

pub mod api;
pub mod common;
pub mod config;

#[derive(Clone, FromRef)]
pub struct WebState {
    pub planner: TripPlanner,
}

/// The complete router, without binding to a socket.
pub fn app(state: WebState) -> Router {
    Router::new()
        .nest_service("/api", api::routes(state))
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
        // the trip planner frontend is served from a different origin
        .layer(CorsLayer::permissive())
}

pub async fn start_web_server(
    bind_address: SocketAddr,
    state: WebState,
) -> std::io::Result<()> {
    let listener = TcpListener::bind(bind_address).await?;
    log::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state).into_make_service()).await?;

    Ok(())
}
